mod auth;
pub mod client;
mod products;
mod purchases;
mod reports;
mod reservations;
mod rooms;
pub mod types;

pub use client::*;
pub use types::*;
