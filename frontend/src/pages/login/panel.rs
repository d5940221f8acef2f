use super::view_model::use_login_view_model;
use crate::components::error::InlineMessage;
use leptos::{ev::SubmitEvent, *};

#[component]
pub fn LoginPanel() -> impl IntoView {
    let vm = use_login_view_model();
    let pending = vm.login_action.pending();
    let show_password = create_rw_signal(false);

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        vm.submit();
    };

    view! {
        <div class="container-fluid vh-100">
            <div class="row h-100">
                <div class="col-md-5 left-panel">
                    <img src="/logo.png" alt="Logo Hospedaje Sierra"/>
                    <p class="mt-2">"Todo el control, en un solo lugar."</p>
                </div>
                <div class="col-md-7 right-panel d-flex align-items-center justify-content-center">
                    <div class="login-card p-5 shadow-lg">
                        <h2 class="text-center mb-4 fw-bold">"Iniciar Sesión"</h2>
                        <InlineMessage message=vm.error/>
                        <form on:submit=on_submit>
                            <div class="mb-3">
                                <label class="form-label fw-bold">"Usuario"</label>
                                <input
                                    type="text"
                                    class="form-control"
                                    placeholder="Nombre de usuario"
                                    prop:value=move || vm.form.username.get()
                                    on:input=move |ev| vm.form.username.set(event_target_value(&ev))
                                />
                            </div>
                            <div class="mb-3">
                                <label class="form-label fw-bold">"Contraseña"</label>
                                <div class="input-group">
                                    <input
                                        type=move || if show_password.get() { "text" } else { "password" }
                                        class="form-control"
                                        placeholder="Contraseña"
                                        prop:value=move || vm.form.password.get()
                                        on:input=move |ev| vm.form.password.set(event_target_value(&ev))
                                    />
                                    <button
                                        type="button"
                                        class="btn btn-outline-secondary"
                                        on:click=move |_| show_password.update(|v| *v = !*v)
                                    >
                                        {move || if show_password.get() { "Ocultar" } else { "Ver" }}
                                    </button>
                                </div>
                            </div>
                            <p class="text-muted text-end">
                                "¿Olvidaste tu contraseña? Contacta al administrador para que la resetee desde el panel."
                            </p>
                            <button type="submit" class="btn btn-orange w-100" disabled=move || pending.get()>
                                {move || if pending.get() { "Ingresando..." } else { "Ingresar" }}
                            </button>
                        </form>
                    </div>
                </div>
            </div>
        </div>
    }
}
