use std::rc::Rc;

use crate::{
    api::{ApiClient, ApiError, LoginRequest, Role, SessionEvent, SessionUser},
    router::LOGIN_PATH,
    state::navigation::{use_navigation, NavigationIntent},
    utils::storage::TokenStore,
};
use leptos::*;

pub const INVALID_CREDENTIALS_MESSAGE: &str = "Usuario o contraseña incorrectos";
pub const SERVER_UNREACHABLE_MESSAGE: &str =
    "No se pudo conectar con el servidor. ¿Está el backend corriendo?";
pub const UNKNOWN_LOGIN_ERROR_MESSAGE: &str = "Error desconocido al iniciar sesión";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthState {
    pub user: Option<SessionUser>,
    pub role: Option<Role>,
    pub is_authenticated: bool,
    pub loading: bool,
}

impl AuthState {
    /// State at start-up, before the stored token has been checked.
    pub fn booting() -> Self {
        Self {
            loading: true,
            ..Self::default()
        }
    }

    pub fn authenticated(user: SessionUser) -> Self {
        Self {
            role: Some(user.role),
            user: Some(user),
            is_authenticated: true,
            loading: false,
        }
    }

    pub fn signed_out() -> Self {
        Self::default()
    }

    pub fn is_admin(&self) -> bool {
        self.role.map_or(false, Role::is_admin)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
    Success,
    Failure { message: String },
}

impl LoginOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, LoginOutcome::Success)
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            LoginOutcome::Success => None,
            LoginOutcome::Failure { message } => Some(message),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        LoginOutcome::Failure {
            message: message.into(),
        }
    }
}

pub fn login_failure_message(error: &ApiError) -> String {
    match error {
        ApiError::Unauthorized => INVALID_CREDENTIALS_MESSAGE.to_string(),
        ApiError::Http {
            message: Some(message),
            ..
        } => message.clone(),
        ApiError::Http { status, .. } => format!("Error {}", status),
        ApiError::Network(_) => SERVER_UNREACHABLE_MESSAGE.to_string(),
        ApiError::Decode(_) | ApiError::Storage(_) => UNKNOWN_LOGIN_ERROR_MESSAGE.to_string(),
    }
}

/// Who is logged in, and with which role.
///
/// The store is the only writer of the persisted token. It listens to the
/// client's [`SessionEvent`]s so a 401 from any page signs the user out and
/// asks the router for `/login`.
#[derive(Clone)]
pub struct SessionStore {
    state: RwSignal<AuthState>,
    api: ApiClient,
    tokens: Rc<dyn TokenStore>,
    navigation: NavigationIntent,
}

impl SessionStore {
    pub fn new(api: ApiClient, navigation: NavigationIntent) -> Self {
        let store = Self {
            state: create_rw_signal(AuthState::booting()),
            tokens: api.token_store(),
            api,
            navigation,
        };
        store.listen_for_invalidation();
        store
    }

    fn listen_for_invalidation(&self) {
        let state = self.state;
        let tokens = Rc::clone(&self.tokens);
        let navigation = self.navigation;
        self.api.events().subscribe(move |event| match event {
            SessionEvent::Invalidated => {
                tokens.clear();
                state.set(AuthState::signed_out());
                navigation.request(LOGIN_PATH);
            }
        });
    }

    pub fn state(&self) -> Signal<AuthState> {
        self.state.into()
    }

    pub fn snapshot(&self) -> AuthState {
        self.state.get_untracked()
    }

    pub fn is_admin(&self) -> bool {
        self.state.with(AuthState::is_admin)
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    /// Validates the stored token against `/api/auth/me`. Never fails: every
    /// error path ends signed out with `loading == false`.
    pub async fn recover_session(&self) {
        if self.tokens.token().is_none() {
            log::debug!("no stored token, starting signed out");
            self.state.set(AuthState::signed_out());
            return;
        }

        match self.api.me().await {
            Ok(profile) => {
                let user = SessionUser::from(profile);
                log::info!("session recovered for {}", user.username);
                self.state.set(AuthState::authenticated(user));
            }
            Err(error) => {
                log::warn!("stored session rejected: {}", error);
                self.tokens.clear();
                self.state.set(AuthState::signed_out());
            }
        }
    }

    pub async fn login(&self, username: &str, password: &str) -> LoginOutcome {
        let request = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        let response = match self.api.login(&request).await {
            Ok(response) => response,
            Err(error) => {
                log::warn!("login failed for {}: {}", username, error);
                return LoginOutcome::failure(login_failure_message(&error));
            }
        };

        let Some(token) = response.token.clone().filter(|token| !token.is_empty()) else {
            log::warn!("login response for {} carried no token", username);
            return LoginOutcome::failure(UNKNOWN_LOGIN_ERROR_MESSAGE);
        };
        if let Err(error) = self.tokens.save(&token) {
            log::error!("could not persist token: {}", error);
            return LoginOutcome::failure(login_failure_message(&ApiError::Storage(error)));
        }

        let user = SessionUser::from(response);
        log::info!("logged in as {} ({})", user.username, user.role.as_wire());
        self.state.set(AuthState::authenticated(user));
        LoginOutcome::Success
    }

    #[cfg(test)]
    pub(crate) fn overwrite_state_for_test(&self, state: AuthState) {
        self.state.set(state);
    }

    pub fn logout(&self) {
        log::info!("logging out");
        self.tokens.clear();
        self.state.set(AuthState::signed_out());
        self.navigation.request(LOGIN_PATH);
    }
}

#[component]
pub fn AuthProvider(children: Children) -> impl IntoView {
    let api = use_context::<ApiClient>().unwrap_or_default();
    let session = SessionStore::new(api, use_navigation());
    provide_context(session.clone());

    spawn_local(async move {
        session.recover_session().await;
    });

    view! { <>{children()}</> }
}

pub fn use_session() -> SessionStore {
    use_context::<SessionStore>().unwrap_or_else(|| {
        let session = SessionStore::new(ApiClient::default(), use_navigation());
        session.state.set(AuthState::signed_out());
        session
    })
}

pub fn use_login_action() -> Action<LoginRequest, LoginOutcome> {
    let session = use_session();

    create_action(move |request: &LoginRequest| {
        let session = session.clone();
        let request = request.clone();
        async move { session.login(&request.username, &request.password).await }
    })
}


#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::utils::storage::MemoryTokenStore;
    use httpmock::prelude::*;
    use serde_json::json;

    struct Harness {
        runtime: RuntimeId,
        session: SessionStore,
        tokens: MemoryTokenStore,
        navigation: NavigationIntent,
    }

    impl Harness {
        fn new(base_url: &str, tokens: MemoryTokenStore) -> Self {
            let runtime = create_runtime();
            let api = ApiClient::new_with_base_url(base_url, Rc::new(tokens.clone()));
            let navigation = NavigationIntent::new();
            let session = SessionStore::new(api, navigation);
            Self {
                runtime,
                session,
                tokens,
                navigation,
            }
        }

        fn dispose(self) {
            self.runtime.dispose();
        }
    }

    #[tokio::test]
    async fn recovery_without_token_skips_profile_call() {
        let server = MockServer::start_async().await;
        let me = server.mock(|when, then| {
            when.method(GET).path("/api/auth/me");
            then.status(200).json_body(json!({ "username": "admin" }));
        });
        let harness = Harness::new(&server.base_url(), MemoryTokenStore::new());
        assert!(harness.session.snapshot().loading);

        harness.session.recover_session().await;

        let state = harness.session.snapshot();
        assert!(!state.loading);
        assert!(!state.is_authenticated);
        me.assert_hits_async(0).await;
        harness.dispose();
    }

    #[tokio::test]
    async fn recovery_with_rejected_token_clears_it() {
        for status in [401u16, 500] {
            let server = MockServer::start_async().await;
            server.mock(|when, then| {
                when.method(GET).path("/api/auth/me");
                then.status(status);
            });
            let harness = Harness::new(&server.base_url(), MemoryTokenStore::with_token("old"));

            harness.session.recover_session().await;

            let state = harness.session.snapshot();
            assert!(!state.loading, "status {}", status);
            assert!(!state.is_authenticated, "status {}", status);
            assert!(state.user.is_none() && state.role.is_none());
            assert!(harness.tokens.token().is_none(), "status {}", status);
            harness.dispose();
        }
    }

    #[tokio::test]
    async fn recovery_with_unreachable_server_clears_token() {
        let harness = Harness::new("http://127.0.0.1:9", MemoryTokenStore::with_token("old"));

        harness.session.recover_session().await;

        let state = harness.session.snapshot();
        assert!(!state.loading);
        assert!(!state.is_authenticated);
        assert!(harness.tokens.token().is_none());
        harness.dispose();
    }

    #[tokio::test]
    async fn recovery_with_accepted_token_populates_user() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(GET)
                .path("/api/auth/me")
                .header("Authorization", "Bearer good");
            then.status(200).json_body(json!({
                "username": "maria",
                "nombreCompleto": "María Pérez",
                "email": "maria@sierra.test"
            }));
        });
        let harness = Harness::new(&server.base_url(), MemoryTokenStore::with_token("good"));

        harness.session.recover_session().await;

        let state = harness.session.snapshot();
        assert!(state.is_authenticated);
        assert!(!state.loading);
        assert_eq!(state.role, Some(Role::Employee));
        let user = state.user.expect("user populated");
        assert_eq!(user.username, "maria");
        assert_eq!(user.full_name.as_deref(), Some("María Pérez"));
        assert!(!harness.session.is_admin());
        assert_eq!(harness.tokens.token().as_deref(), Some("good"));
        harness.dispose();
    }

    #[tokio::test]
    async fn login_with_wrong_password_reports_invalid_credentials() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(POST).path("/api/auth/login");
            then.status(401);
        });
        let harness = Harness::new(&server.base_url(), MemoryTokenStore::new());
        harness.session.recover_session().await;

        let outcome = harness.session.login("admin", "wrong").await;

        assert_eq!(
            outcome,
            LoginOutcome::Failure {
                message: INVALID_CREDENTIALS_MESSAGE.into()
            }
        );
        assert!(!harness.session.snapshot().is_authenticated);
        assert!(harness.tokens.token().is_none());
        harness.dispose();
    }

    #[tokio::test]
    async fn login_with_correct_password_persists_token() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(POST)
                .path("/api/auth/login")
                .json_body(json!({ "username": "admin", "password": "correct" }));
            then.status(200).json_body(json!({
                "token": "t1",
                "username": "admin",
                "nombreCompleto": "Administrador",
                "rol": "ADMIN",
                "email": "admin@sierra.test",
                "cedula": "0100"
            }));
        });
        let harness = Harness::new(&server.base_url(), MemoryTokenStore::new());
        harness.session.recover_session().await;

        let outcome = harness.session.login("admin", "correct").await;

        assert!(outcome.is_success());
        assert_eq!(harness.tokens.token().as_deref(), Some("t1"));
        assert!(harness.session.is_admin());
        let state = harness.session.snapshot();
        assert!(state.is_authenticated);
        assert!(!state.loading);
        assert_eq!(state.user.unwrap().national_id.as_deref(), Some("0100"));
        harness.dispose();
    }

    #[tokio::test]
    async fn login_failures_map_to_readable_messages() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(POST)
                .path("/api/auth/login")
                .json_body(json!({ "username": "bloqueado", "password": "x" }));
            then.status(403)
                .json_body(json!({ "message": "Usuario deshabilitado" }));
        });
        server.mock(|when, then| {
            when.method(POST)
                .path("/api/auth/login")
                .json_body(json!({ "username": "caido", "password": "x" }));
            then.status(503);
        });
        server.mock(|when, then| {
            when.method(POST)
                .path("/api/auth/login")
                .json_body(json!({ "username": "sintoken", "password": "x" }));
            then.status(200).json_body(json!({ "username": "sintoken" }));
        });
        let harness = Harness::new(&server.base_url(), MemoryTokenStore::new());

        let blocked = harness.session.login("bloqueado", "x").await;
        assert_eq!(blocked.message(), Some("Usuario deshabilitado"));

        let down = harness.session.login("caido", "x").await;
        assert_eq!(down.message(), Some("Error 503"));

        let tokenless = harness.session.login("sintoken", "x").await;
        assert_eq!(tokenless.message(), Some(UNKNOWN_LOGIN_ERROR_MESSAGE));

        assert!(!harness.session.snapshot().is_authenticated);
        assert!(harness.tokens.token().is_none());
        harness.dispose();
    }

    #[tokio::test]
    async fn login_against_unreachable_server_reports_connectivity() {
        let harness = Harness::new("http://127.0.0.1:9", MemoryTokenStore::new());

        let outcome = harness.session.login("admin", "correct").await;

        assert_eq!(outcome.message(), Some(SERVER_UNREACHABLE_MESSAGE));
        harness.dispose();
    }

    #[tokio::test]
    async fn logout_is_idempotent() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(POST).path("/api/auth/login");
            then.status(200)
                .json_body(json!({ "token": "t1", "username": "admin", "rol": "ADMIN" }));
        });
        let harness = Harness::new(&server.base_url(), MemoryTokenStore::new());
        assert!(harness.session.login("admin", "correct").await.is_success());

        harness.session.logout();
        let once = harness.session.snapshot();
        assert_eq!(harness.navigation.take().as_deref(), Some(LOGIN_PATH));

        harness.session.logout();
        let twice = harness.session.snapshot();

        assert_eq!(once, twice);
        assert_eq!(twice, AuthState::signed_out());
        assert!(harness.tokens.token().is_none());
        assert_eq!(harness.navigation.take().as_deref(), Some(LOGIN_PATH));
        harness.dispose();
    }

    #[tokio::test]
    async fn unauthorized_page_request_signs_out_and_requests_login() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(GET).path("/api/auth/me");
            then.status(200)
                .json_body(json!({ "username": "admin", "rol": "ADMIN" }));
        });
        server.mock(|when, then| {
            when.method(GET).path("/api/reservas");
            then.status(401);
        });
        server.mock(|when, then| {
            when.method(GET).path("/api/productos");
            then.status(401);
        });
        let harness = Harness::new(&server.base_url(), MemoryTokenStore::with_token("t1"));
        harness.session.recover_session().await;
        assert!(harness.session.snapshot().is_authenticated);

        let api = harness.session.api().clone();
        let (reservations, products) = tokio::join!(api.list_reservations(), api.list_products());

        assert_eq!(reservations.unwrap_err(), ApiError::Unauthorized);
        assert_eq!(products.unwrap_err(), ApiError::Unauthorized);
        assert_eq!(harness.session.snapshot(), AuthState::signed_out());
        assert!(harness.tokens.token().is_none());
        assert_eq!(harness.navigation.take().as_deref(), Some(LOGIN_PATH));
        harness.dispose();
    }
}
