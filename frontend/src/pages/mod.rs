pub mod dashboard;
pub mod employees;
pub mod guest_history;
pub mod guest_registration;
pub mod login;
pub mod register;
pub mod report;
pub mod reservation_history;
pub mod rooms;
pub mod sales;
