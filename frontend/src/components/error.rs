use crate::api::ApiError;
use leptos::*;

#[component]
pub fn InlineErrorMessage(#[prop(into)] error: Signal<Option<ApiError>>) -> impl IntoView {
    view! {
        <Show when=move || error.with(Option::is_some) fallback=|| ()>
            <div class="alert alert-danger text-center my-2">
                {move || error.get().map(|e| e.to_string()).unwrap_or_default()}
            </div>
        </Show>
    }
}

#[component]
pub fn InlineMessage(
    #[prop(into)] message: Signal<Option<String>>,
    #[prop(optional)] success: bool,
) -> impl IntoView {
    let class = if success {
        "alert alert-success text-center my-2"
    } else {
        "alert alert-danger text-center my-2"
    };
    view! {
        <Show when=move || message.with(Option::is_some) fallback=|| ()>
            <div class=class>{move || message.get().unwrap_or_default()}</div>
        </Show>
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::ssr::render_to_string;

    #[test]
    fn inline_error_renders_server_message() {
        let html = render_to_string(move || {
            let error = create_rw_signal(Some(ApiError::Http {
                status: 409,
                message: Some("Habitación ocupada".into()),
            }));
            view! { <InlineErrorMessage error=error /> }
        });
        assert!(html.contains("Habitación ocupada"));
    }

    #[test]
    fn inline_message_is_empty_without_message() {
        let html = render_to_string(move || {
            let message = create_rw_signal(None::<String>);
            view! { <InlineMessage message=message success=true /> }
        });
        assert!(!html.contains("alert"));
    }
}
