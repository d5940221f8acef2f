use leptos::*;

pub mod utils;

mod panel;

pub use panel::SalesPanel;

#[component]
pub fn SalesPage() -> impl IntoView {
    view! { <SalesPanel /> }
}
