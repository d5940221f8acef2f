use leptos::*;

pub mod utils;

mod panel;

pub use panel::GuestRegistrationPanel;

#[component]
pub fn GuestRegistrationPage() -> impl IntoView {
    view! { <GuestRegistrationPanel /> }
}
