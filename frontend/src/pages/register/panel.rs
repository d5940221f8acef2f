use super::utils::{validate_employee_form, EmployeeForm};
use crate::{
    api::{ApiError, RegisterEmployeeRequest, Role},
    components::error::{InlineErrorMessage, InlineMessage},
    router::HOME_PATH,
    state::{auth::use_session, navigation::use_navigation},
};
use gloo_timers::future::TimeoutFuture;
use leptos::{ev::SubmitEvent, *};

const REDIRECT_DELAY_MS: u32 = 1_800;

#[component]
pub fn RegisterEmployeePanel() -> impl IntoView {
    let api = use_session().api().clone();
    let navigation = use_navigation();
    let form = create_rw_signal(EmployeeForm::default());
    let validation = create_rw_signal(None::<String>);
    let success = create_rw_signal(None::<String>);
    let submit_error = create_rw_signal(None::<ApiError>);

    let register = create_action(move |request: &RegisterEmployeeRequest| {
        let api = api.clone();
        let request = request.clone();
        async move { api.register_employee(&request).await }
    });

    create_effect(move |_| match register.value().get() {
        Some(Ok(())) => {
            success.set(Some(
                "Empleado registrado correctamente. Redirigiendo...".into(),
            ));
            spawn_local(async move {
                TimeoutFuture::new(REDIRECT_DELAY_MS).await;
                navigation.request(HOME_PATH);
            });
        }
        Some(Err(err)) => submit_error.set(Some(err)),
        None => {}
    });

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        validation.set(None);
        success.set(None);
        submit_error.set(None);
        match form.with_untracked(validate_employee_form) {
            Ok(request) => register.dispatch(request),
            Err(message) => validation.set(Some(message)),
        }
    };

    view! {
        <section class="register-employee w-75 mx-auto">
            <h3 class="text-center mb-4">"Registrar empleado"</h3>
            <InlineMessage message=validation/>
            <InlineErrorMessage error=submit_error/>
            <InlineMessage message=success success=true/>
            <form on:submit=on_submit>
                {text_field(form, validation, "text", "Nombre de usuario *", |f| f.username.clone(), |f, v| f.username = v)}
                {text_field(form, validation, "text", "Nombres y apellidos * (solo letras)", |f| f.full_name.clone(), |f, v| f.full_name = v)}
                {text_field(form, validation, "text", "Cédula * (solo números)", |f| f.national_id.clone(), |f, v| f.national_id = v)}
                {text_field(form, validation, "email", "Correo electrónico", |f| f.email.clone(), |f, v| f.email = v)}
                {text_field(form, validation, "password", "Contraseña * (mín. 8 car., mayús., minús., núm., símbolo)", |f| f.password.clone(), |f, v| f.password = v)}
                {text_field(form, validation, "password", "Confirmar contraseña *", |f| f.confirm_password.clone(), |f, v| f.confirm_password = v)}
                <div class="mb-4">
                    <select
                        class="form-select"
                        on:change=move |ev| {
                            let role = Role::from_wire(Some(event_target_value(&ev).as_str()));
                            form.update(|f| f.role = role);
                        }
                    >
                        <option value="EMPLEADO">"Empleado"</option>
                        <option value="ADMIN">"Administrador"</option>
                    </select>
                </div>
                <button
                    type="submit"
                    class="btn btn-orange w-100 py-3 fw-bold"
                    disabled=move || register.pending().get()
                >
                    {move || if register.pending().get() { "Registrando..." } else { "Registrarse" }}
                </button>
            </form>
        </section>
    }
}

fn text_field(
    form: RwSignal<EmployeeForm>,
    validation: RwSignal<Option<String>>,
    kind: &'static str,
    placeholder: &'static str,
    read: fn(&EmployeeForm) -> String,
    write: fn(&mut EmployeeForm, String),
) -> impl IntoView {
    view! {
        <div class="mb-3">
            <input
                type=kind
                class="form-control"
                placeholder=placeholder
                prop:value=move || form.with(read)
                on:input=move |ev| {
                    validation.set(None);
                    let value = event_target_value(&ev);
                    form.update(|f| write(f, value));
                }
            />
        </div>
    }
}
