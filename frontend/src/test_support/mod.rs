#[cfg(all(test, not(target_arch = "wasm32")))]
pub mod ssr;

#[cfg(test)]
pub mod helpers {
    use std::rc::Rc;

    use crate::api::{ApiClient, Role, SessionUser};
    use crate::state::auth::{AuthState, SessionStore};
    use crate::state::navigation::use_navigation;
    use crate::utils::storage::MemoryTokenStore;
    use leptos::*;

    pub fn admin_user() -> SessionUser {
        SessionUser {
            username: "admin".into(),
            full_name: Some("Administrador Sierra".into()),
            role: Role::Admin,
            email: Some("admin@sierra.test".into()),
            national_id: Some("0100000001".into()),
        }
    }

    pub fn employee_user() -> SessionUser {
        SessionUser {
            username: "recepcion".into(),
            full_name: Some("Rosa Recepción".into()),
            role: Role::Employee,
            email: None,
            national_id: None,
        }
    }

    /// Provides a session whose client points nowhere; render tests never
    /// reach the network.
    pub fn provide_session(state: AuthState) -> SessionStore {
        let api = ApiClient::new_with_base_url(
            "http://127.0.0.1:9",
            Rc::new(MemoryTokenStore::new()),
        );
        let session = SessionStore::new(api, use_navigation());
        session.overwrite_state_for_test(state);
        provide_context(session.clone());
        session
    }
}
