use crate::{
    api::{ApiError, Employee, Role},
    components::{
        error::{InlineErrorMessage, InlineMessage},
        layout::LoadingSpinner,
    },
    state::auth::use_session,
};
use leptos::*;

#[derive(Debug, Clone, PartialEq)]
enum EmployeeAction {
    Delete(i64),
    ResetPassword { id: i64, password: String },
}

pub fn validate_new_password(raw: &str) -> Result<String, String> {
    let password = raw.trim();
    if password.is_empty() {
        Err("Contraseña vacía cancelada".into())
    } else {
        Ok(password.to_string())
    }
}

fn role_label(employee: &Employee) -> &'static str {
    match employee.role() {
        Role::Admin => "Administrador",
        Role::Employee => "Empleado",
    }
}

#[component]
pub fn EmployeesPage() -> impl IntoView {
    let api = use_session().api().clone();
    let reload = create_rw_signal(0u32);
    let resetting = create_rw_signal(None::<i64>);
    let new_password = create_rw_signal(String::new());
    let notice = create_rw_signal(None::<String>);
    let success = create_rw_signal(None::<String>);
    let action_error = create_rw_signal(None::<ApiError>);

    let api_for_list = api.clone();
    let employees = create_resource(
        move || reload.get(),
        move |_| {
            let api = api_for_list.clone();
            async move { api.list_employees().await }
        },
    );

    let run = create_action(move |action: &EmployeeAction| {
        let api = api.clone();
        let action = action.clone();
        async move {
            match action {
                EmployeeAction::Delete(id) => api
                    .delete_employee(id)
                    .await
                    .map(|()| "Empleado eliminado correctamente"),
                EmployeeAction::ResetPassword { id, password } => api
                    .reset_password_by_admin(id, &password)
                    .await
                    .map(|()| "Contraseña reseteada correctamente"),
            }
        }
    });

    create_effect(move |_| match run.value().get() {
        Some(Ok(message)) => {
            success.set(Some(message.to_string()));
            resetting.set(None);
            new_password.set(String::new());
            reload.update(|value| *value = value.wrapping_add(1));
        }
        Some(Err(err)) => action_error.set(Some(err)),
        None => {}
    });

    let clear_messages = move || {
        notice.set(None);
        success.set(None);
        action_error.set(None);
    };

    let submit_reset = move |id: i64| {
        clear_messages();
        match validate_new_password(&new_password.get_untracked()) {
            Ok(password) => run.dispatch(EmployeeAction::ResetPassword { id, password }),
            Err(message) => {
                resetting.set(None);
                notice.set(Some(message));
            }
        }
    };

    let load_error = Signal::derive(move || employees.get().and_then(Result::err));

    view! {
        <section class="employees">
            <h2 class="text-center mb-5 fw-bold text-orange">"Gestión de Empleados"</h2>
            <InlineErrorMessage error=load_error/>
            <InlineErrorMessage error=action_error/>
            <InlineMessage message=notice/>
            <InlineMessage message=success success=true/>
            <Suspense fallback=|| view! { <LoadingSpinner message="Cargando empleados..."/> }>
                <table class="table table-hover">
                    <thead>
                        <tr>
                            <th>"Usuario"</th>
                            <th>"Nombre"</th>
                            <th>"Cédula"</th>
                            <th>"Email"</th>
                            <th>"Rol"</th>
                            <th></th>
                        </tr>
                    </thead>
                    <tbody>
                        {move || {
                            employees
                                .get()
                                .and_then(Result::ok)
                                .unwrap_or_default()
                                .into_iter()
                                .map(|employee| {
                                    let id = employee.id;
                                    let role = role_label(&employee);
                                    view! {
                                        <tr>
                                            <td>{employee.username}</td>
                                            <td>{employee.full_name.unwrap_or_default()}</td>
                                            <td>{employee.national_id.unwrap_or_default()}</td>
                                            <td>{employee.email.unwrap_or_default()}</td>
                                            <td>{role}</td>
                                            <td class="text-end">
                                                <Show
                                                    when=move || resetting.get() == Some(id)
                                                    fallback=move || view! {
                                                        <button
                                                            class="btn btn-sm btn-outline-secondary me-1"
                                                            on:click=move |_| {
                                                                new_password.set(String::new());
                                                                resetting.set(Some(id));
                                                            }
                                                        >
                                                            "Resetear contraseña"
                                                        </button>
                                                    }
                                                >
                                                    <input
                                                        type="password"
                                                        class="form-control form-control-sm d-inline w-auto me-1"
                                                        placeholder="Nueva contraseña"
                                                        prop:value=move || new_password.get()
                                                        on:input=move |ev| new_password.set(event_target_value(&ev))
                                                    />
                                                    <button
                                                        class="btn btn-sm btn-orange me-1"
                                                        on:click=move |_| submit_reset(id)
                                                    >
                                                        "Guardar"
                                                    </button>
                                                </Show>
                                                <button
                                                    class="btn btn-sm btn-outline-danger"
                                                    disabled=move || run.pending().get()
                                                    on:click=move |_| {
                                                        clear_messages();
                                                        run.dispatch(EmployeeAction::Delete(id));
                                                    }
                                                >
                                                    "Eliminar"
                                                </button>
                                            </td>
                                        </tr>
                                    }
                                })
                                .collect_view()
                        }}
                    </tbody>
                </table>
            </Suspense>
        </section>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_password_cancels_reset() {
        assert_eq!(
            validate_new_password("   ").unwrap_err(),
            "Contraseña vacía cancelada"
        );
        assert_eq!(validate_new_password(" Nueva#1 ").as_deref(), Ok("Nueva#1"));
    }

    #[test]
    fn role_labels_follow_wire_role() {
        let mut employee = Employee {
            id: 1,
            username: "rosa".into(),
            full_name: None,
            national_id: None,
            email: None,
            role: Some("ADMIN".into()),
        };
        assert_eq!(role_label(&employee), "Administrador");
        employee.role = None;
        assert_eq!(role_label(&employee), "Empleado");
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::state::auth::AuthState;
    use crate::test_support::helpers::{admin_user, provide_session};
    use crate::test_support::ssr::render_to_string;

    #[test]
    fn employees_page_renders_heading() {
        let html = render_to_string(|| {
            provide_session(AuthState::authenticated(admin_user()));
            view! { <EmployeesPage/> }
        });
        assert!(html.contains("Gestión de Empleados"));
    }
}
