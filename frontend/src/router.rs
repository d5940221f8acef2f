use leptos::*;
use leptos_meta::{provide_meta_context, Title};
use leptos_router::*;

use crate::{
    api::ApiClient,
    components::{
        guard::{RequireAdmin, RequireAuth},
        layout::AppLayout,
    },
    pages::{
        dashboard::DashboardPage, employees::EmployeesPage, guest_history::GuestHistoryPage,
        guest_registration::GuestRegistrationPage, login::LoginPage,
        register::RegisterEmployeePage, report::ReportPage,
        reservation_history::ReservationHistoryPage, rooms::RoomsPage, sales::SalesPage,
    },
    state::{auth::AuthProvider, navigation::use_navigation},
};

pub const LOGIN_PATH: &str = "/login";
pub const HOME_PATH: &str = "/dashboard";

pub const ROUTE_PATHS: &[&str] = &[
    "/",
    "/login",
    "/dashboard",
    "/ventas",
    "/informe",
    "/habitaciones",
    "/registro-huesped",
    "/historial-huespedes",
    "/historial-reservas",
    "/register",
    "/empleados",
];

pub const PROTECTED_ROUTE_PATHS: &[&str] = &[
    "/dashboard",
    "/ventas",
    "/informe",
    "/habitaciones",
    "/registro-huesped",
    "/historial-huespedes",
    "/historial-reservas",
    "/register",
    "/empleados",
];

pub const ADMIN_ROUTE_PATHS: &[&str] = &["/register", "/empleados"];

pub fn mount_app() {
    mount_to_body(app_root);
}

pub fn app_root() -> impl IntoView {
    provide_meta_context();
    provide_context(ApiClient::new());
    use_navigation();

    view! {
        <Title text="Hospedaje Sierra"/>
        <AuthProvider>
            <Router>
                <NavigationOutlet/>
                <Routes>
                    <Route path="/login" view=LoginPage/>
                    <Route path="/dashboard" view=|| protected(DashboardPage)/>
                    <Route path="/ventas" view=|| protected(SalesPage)/>
                    <Route path="/informe" view=|| protected(ReportPage)/>
                    <Route path="/habitaciones" view=|| protected(RoomsPage)/>
                    <Route path="/registro-huesped" view=|| protected(GuestRegistrationPage)/>
                    <Route path="/historial-huespedes" view=|| protected(GuestHistoryPage)/>
                    <Route path="/historial-reservas" view=|| protected(ReservationHistoryPage)/>
                    <Route path="/register" view=|| admin_only(RegisterEmployeePage)/>
                    <Route path="/empleados" view=|| admin_only(EmployeesPage)/>
                    <Route path="/" view=|| view! { <Redirect path=HOME_PATH/> }/>
                    <Route path="/*any" view=|| view! { <Redirect path=LOGIN_PATH/> }/>
                </Routes>
            </Router>
        </AuthProvider>
    }
}

fn protected<V: IntoView + 'static>(page: fn() -> V) -> impl IntoView {
    view! {
        <RequireAuth>
            <AppLayout>{page()}</AppLayout>
        </RequireAuth>
    }
}

fn admin_only<V: IntoView + 'static>(page: fn() -> V) -> impl IntoView {
    view! {
        <RequireAuth>
            <AppLayout>
                <RequireAdmin>{page()}</RequireAdmin>
            </AppLayout>
        </RequireAuth>
    }
}

/// Whether a requested target differs from where the router already is.
pub fn needs_navigation(current: &str, target: &str) -> bool {
    current.trim_end_matches('/') != target.trim_end_matches('/')
}

/// Performs every navigation requested through the intent signal.
#[component]
fn NavigationOutlet() -> impl IntoView {
    let intent = use_navigation();
    let navigate = use_navigate();
    let location = use_location();

    create_effect(move |_| {
        if intent.pending().is_none() {
            return;
        }
        let Some(target) = intent.take() else {
            return;
        };
        let current = location.pathname.get_untracked();
        if needs_navigation(&current, &target) {
            log::debug!("navigating from {} to {}", current, target);
            navigate(
                &target,
                NavigateOptions {
                    replace: true,
                    ..Default::default()
                },
            );
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn protected_routes_are_subset_of_all() {
        let all: HashSet<&str> = ROUTE_PATHS.iter().copied().collect();
        for path in PROTECTED_ROUTE_PATHS {
            assert!(
                all.contains(path),
                "protected path missing from ROUTE_PATHS: {}",
                path
            );
        }
    }

    #[test]
    fn admin_routes_are_protected() {
        for path in ADMIN_ROUTE_PATHS {
            assert!(PROTECTED_ROUTE_PATHS.contains(path));
        }
    }

    #[test]
    fn login_is_public() {
        assert!(!PROTECTED_ROUTE_PATHS.contains(&LOGIN_PATH));
        assert!(PROTECTED_ROUTE_PATHS.contains(&HOME_PATH));
    }

    #[test]
    fn no_duplicate_routes() {
        let unique: HashSet<&str> = ROUTE_PATHS.iter().copied().collect();
        assert_eq!(unique.len(), ROUTE_PATHS.len());
    }

    #[test]
    fn navigation_is_skipped_when_already_there() {
        assert!(!needs_navigation("/login", "/login"));
        assert!(!needs_navigation("/login/", "/login"));
        assert!(needs_navigation("/ventas", "/login"));
        assert!(needs_navigation("/empleados", "/dashboard"));
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use std::{cell::RefCell, rc::Rc};

    /// Renders the whole app on the server at `path` and returns the redirect
    /// target the router emitted, if any.
    fn server_redirect_for(path: &str) -> Option<String> {
        let captured = Rc::new(RefCell::new(None::<String>));
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        // `AuthProvider` spawns session recovery; it is queued and never polled.
        let local = tokio::task::LocalSet::new();
        let url = format!("http://localhost{}", path);
        let sink = Rc::clone(&captured);
        local.block_on(&runtime, async move {
            leptos_reactive::suppress_resource_load(true);
            let reactive = create_runtime();
            provide_context(RouterIntegrationContext::new(ServerIntegration { path: url }));
            provide_server_redirect(move |target: &str| {
                *sink.borrow_mut() = Some(target.to_string());
            });
            let _ = app_root().into_view().render_to_string();
            reactive.dispose();
            leptos_reactive::suppress_resource_load(false);
        });
        let target = captured.borrow().clone();
        target
    }

    #[test]
    fn unknown_paths_redirect_to_login() {
        assert_eq!(server_redirect_for("/nowhere").as_deref(), Some(LOGIN_PATH));
        assert_eq!(server_redirect_for("/a/b/c").as_deref(), Some(LOGIN_PATH));
    }

    #[test]
    fn root_redirects_to_dashboard() {
        assert_eq!(server_redirect_for("/").as_deref(), Some(HOME_PATH));
    }

    #[test]
    fn login_page_does_not_redirect() {
        assert_eq!(server_redirect_for(LOGIN_PATH), None);
    }
}
