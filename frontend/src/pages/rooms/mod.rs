use leptos::*;

pub mod utils;

mod panel;

pub use panel::RoomsPanel;

#[component]
pub fn RoomsPage() -> impl IntoView {
    view! { <RoomsPanel /> }
}
