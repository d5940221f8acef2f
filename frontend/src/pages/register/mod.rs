use leptos::*;

pub mod utils;

mod panel;

pub use panel::RegisterEmployeePanel;

#[component]
pub fn RegisterEmployeePage() -> impl IntoView {
    view! { <RegisterEmployeePanel /> }
}
