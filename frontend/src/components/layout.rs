use crate::{api::SessionUser, state::auth::use_session};
use leptos::*;

#[component]
pub fn LoadingSpinner(#[prop(optional)] message: Option<&'static str>) -> impl IntoView {
    view! {
        <div class="text-center mt-5 py-5">
            <div class="spinner-border text-primary" role="status">
                <span class="visually-hidden">"Cargando..."</span>
            </div>
            {message.map(|text| view! { <p class="mt-3">{text}</p> })}
        </div>
    }
}

pub fn greeting_name(user: Option<&SessionUser>) -> String {
    user.map(|user| user.display_name().to_string())
        .unwrap_or_else(|| "admin".to_string())
}

struct NavLink {
    href: &'static str,
    label: &'static str,
    admin_only: bool,
}

const NAV_LINKS: &[NavLink] = &[
    NavLink { href: "/dashboard", label: "Inicio", admin_only: false },
    NavLink { href: "/ventas", label: "Ventas", admin_only: false },
    NavLink { href: "/informe", label: "Informe", admin_only: false },
    NavLink { href: "/habitaciones", label: "Habitaciones", admin_only: false },
    NavLink { href: "/registro-huesped", label: "Registrar huésped", admin_only: false },
    NavLink { href: "/historial-huespedes", label: "Huéspedes", admin_only: false },
    NavLink { href: "/historial-reservas", label: "Reservas", admin_only: false },
    NavLink { href: "/register", label: "Nuevo empleado", admin_only: true },
    NavLink { href: "/empleados", label: "Empleados", admin_only: true },
];

#[component]
pub fn Header() -> impl IntoView {
    let session = use_session();
    let state = session.state();
    let welcome = move || state.with(|s| greeting_name(s.user.as_ref()));
    let on_logout = move |_| session.logout();

    view! {
        <header class="dashboard-header">
            <div class="header-text">
                <h4>
                    "Hospedaje Sierra - Panel"
                    <small>"Bienvenido, " {welcome}</small>
                </h4>
            </div>
            <button class="btn btn-outline-light btn-logout" on:click=on_logout>
                "Cerrar sesión"
            </button>
        </header>
    }
}

#[component]
pub fn Sidebar() -> impl IntoView {
    let state = use_session().state();
    let is_admin = move || state.with(|s| s.is_admin());

    view! {
        <nav class="sidebar">
            {NAV_LINKS
                .iter()
                .map(|link| {
                    let admin_only = link.admin_only;
                    view! {
                        <Show when=move || !admin_only || is_admin() fallback=|| ()>
                            <a href=link.href>{link.label}</a>
                        </Show>
                    }
                })
                .collect_view()}
        </nav>
    }
}

/// Frame of every authenticated page.
#[component]
pub fn AppLayout(children: Children) -> impl IntoView {
    view! {
        <div class="app-shell">
            <Header/>
            <div class="d-flex flex-grow-1">
                <Sidebar/>
                <main class="app-main">{children()}</main>
            </div>
        </div>
    }
}
