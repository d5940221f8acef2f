use super::utils::{validate_credentials, LoginFormState};
use crate::{
    api::LoginRequest,
    router::HOME_PATH,
    state::{
        auth::{self, LoginOutcome},
        navigation::use_navigation,
    },
};
use leptos::*;

#[derive(Clone, Copy)]
pub struct LoginViewModel {
    pub form: LoginFormState,
    pub error: RwSignal<Option<String>>,
    pub login_action: Action<LoginRequest, LoginOutcome>,
}

impl LoginViewModel {
    pub fn submit(&self) {
        if self.login_action.pending().get_untracked() {
            return;
        }
        let password = self.form.password.get_untracked();
        match validate_credentials(&self.form.username.get_untracked(), &password) {
            Ok(username) => {
                self.error.set(None);
                self.login_action.dispatch(LoginRequest { username, password });
            }
            Err(message) => self.error.set(Some(message)),
        }
    }
}

pub fn use_login_view_model() -> LoginViewModel {
    let form = LoginFormState::default();
    let error = create_rw_signal(None::<String>);
    let login_action = auth::use_login_action();
    let navigation = use_navigation();

    create_effect(move |_| {
        if let Some(outcome) = login_action.value().get() {
            match outcome {
                LoginOutcome::Success => {
                    error.set(None);
                    form.password.set(String::new());
                    navigation.request(HOME_PATH);
                }
                LoginOutcome::Failure { message } => error.set(Some(message)),
            }
        }
    });

    LoginViewModel {
        form,
        error,
        login_action,
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::state::auth::AuthState;
    use crate::test_support::helpers::provide_session;
    use crate::test_support::ssr::with_runtime;

    #[test]
    fn login_view_model_defaults_empty() {
        with_runtime(|| {
            provide_session(AuthState::signed_out());
            let vm = use_login_view_model();
            assert!(vm.error.get().is_none());
            assert!(vm.form.username.get().is_empty());
        });
    }

    #[test]
    fn invalid_form_sets_error_without_dispatch() {
        with_runtime(|| {
            provide_session(AuthState::signed_out());
            let vm = use_login_view_model();
            vm.form.username.set("   ".into());
            vm.form.password.set("secret".into());
            vm.submit();
            assert_eq!(
                vm.error.get_untracked().as_deref(),
                Some("Ingresa tu nombre de usuario")
            );
            assert_eq!(vm.login_action.version().get_untracked(), 0);
        });
    }
}
