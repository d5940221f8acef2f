use crate::{
    components::layout::LoadingSpinner,
    router::{HOME_PATH, LOGIN_PATH},
    state::{
        auth::AuthState,
        auth::use_session,
        navigation::{use_navigation, NavigationIntent},
    },
};
use leptos::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthorizationDecision {
    ShowLoading,
    RedirectLogin,
    RedirectHome,
    RenderChildren,
}

impl AuthorizationDecision {
    pub fn redirect_target(self) -> Option<&'static str> {
        match self {
            AuthorizationDecision::RedirectLogin => Some(LOGIN_PATH),
            AuthorizationDecision::RedirectHome => Some(HOME_PATH),
            AuthorizationDecision::ShowLoading | AuthorizationDecision::RenderChildren => None,
        }
    }
}

pub fn authenticated_area_decision(state: &AuthState) -> AuthorizationDecision {
    if state.loading {
        AuthorizationDecision::ShowLoading
    } else if state.is_authenticated {
        AuthorizationDecision::RenderChildren
    } else {
        AuthorizationDecision::RedirectLogin
    }
}

pub fn admin_only_decision(state: &AuthState) -> AuthorizationDecision {
    if state.loading {
        AuthorizationDecision::ShowLoading
    } else if !state.is_authenticated {
        AuthorizationDecision::RedirectLogin
    } else if !state.is_admin() {
        AuthorizationDecision::RedirectHome
    } else {
        AuthorizationDecision::RenderChildren
    }
}

/// Hands a redirecting decision to the router; other decisions leave the
/// intent untouched.
pub fn request_redirect(decision: AuthorizationDecision, navigation: NavigationIntent) {
    if let Some(target) = decision.redirect_target() {
        navigation.request(target);
    }
}

#[component]
fn Gate(
    decide: fn(&AuthState) -> AuthorizationDecision,
    loading_message: &'static str,
    children: ChildrenFn,
) -> impl IntoView {
    let session = use_session();
    let navigation = use_navigation();
    let state = session.state();
    let decision = create_memo(move |_| state.with(decide));

    create_effect(move |_| request_redirect(decision.get(), navigation));

    view! {
        <Show
            when=move || decision.get() == AuthorizationDecision::RenderChildren
            fallback=move || {
                if decision.get() == AuthorizationDecision::ShowLoading {
                    view! { <LoadingSpinner message=loading_message /> }.into_view()
                } else {
                    ().into_view()
                }
            }
        >
            {children()}
        </Show>
    }
}

#[component]
pub fn RequireAuth(children: ChildrenFn) -> impl IntoView {
    view! {
        <Gate decide=authenticated_area_decision loading_message="Cargando panel...">
            {children()}
        </Gate>
    }
}

#[component]
pub fn RequireAdmin(children: ChildrenFn) -> impl IntoView {
    view! {
        <Gate decide=admin_only_decision loading_message="Verificando permisos...">
            {children()}
        </Gate>
    }
}
