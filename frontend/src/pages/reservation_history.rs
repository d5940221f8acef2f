use crate::{
    api::{ApiError, Reservation},
    components::{
        error::{InlineErrorMessage, InlineMessage},
        layout::LoadingSpinner,
    },
    state::auth::use_session,
};
use leptos::*;

/// Newest stays first; unreadable dates sink to the bottom.
pub fn sort_by_entry_desc(mut reservations: Vec<Reservation>) -> Vec<Reservation> {
    reservations.sort_by(|a, b| b.entry_date().cmp(&a.entry_date()));
    reservations
}

#[component]
pub fn ReservationHistoryPage() -> impl IntoView {
    let api = use_session().api().clone();
    let reload = create_rw_signal(0u32);
    let confirming = create_rw_signal(None::<i64>);
    let success = create_rw_signal(None::<String>);
    let action_error = create_rw_signal(None::<ApiError>);

    let api_for_list = api.clone();
    let reservations = create_resource(
        move || reload.get(),
        move |_| {
            let api = api_for_list.clone();
            async move { api.list_reservations().await.map(sort_by_entry_desc) }
        },
    );

    let cancel_action = create_action(move |id: &i64| {
        let api = api.clone();
        let id = *id;
        async move { api.delete_reservation(id).await }
    });

    create_effect(move |_| {
        if let Some(result) = cancel_action.value().get() {
            confirming.set(None);
            match result {
                Ok(()) => {
                    success.set(Some("Reserva cancelada".into()));
                    reload.update(|value| *value = value.wrapping_add(1));
                }
                Err(err) => action_error.set(Some(err)),
            }
        }
    });

    let load_error = Signal::derive(move || reservations.get().and_then(Result::err));

    view! {
        <section class="reservation-history">
            <h3>"Historial de reservas"</h3>
            <InlineErrorMessage error=load_error/>
            <InlineErrorMessage error=action_error/>
            <InlineMessage message=success success=true/>
            <Suspense fallback=|| view! { <LoadingSpinner message="Cargando reservas..."/> }>
                <table class="table table-striped">
                    <thead>
                        <tr>
                            <th>"#"</th>
                            <th>"Huésped"</th>
                            <th>"Habitación"</th>
                            <th>"Entrada"</th>
                            <th>"Salida"</th>
                            <th>"Total"</th>
                            <th></th>
                        </tr>
                    </thead>
                    <tbody>
                        {move || {
                            reservations
                                .get()
                                .and_then(Result::ok)
                                .unwrap_or_default()
                                .into_iter()
                                .map(|reservation| {
                                    let id = reservation.id;
                                    let guest = reservation
                                        .guest
                                        .as_ref()
                                        .map(|g| g.full_name())
                                        .unwrap_or_default();
                                    view! {
                                        <tr>
                                            <td>{id}</td>
                                            <td>{guest}</td>
                                            <td>{reservation.room_number().to_string()}</td>
                                            <td>{reservation.entry.clone()}</td>
                                            <td>{reservation.exit.clone()}</td>
                                            <td>{format!("{:.2}", reservation.room_total.unwrap_or_default())}</td>
                                            <td>
                                                <Show
                                                    when=move || confirming.get() == Some(id)
                                                    fallback=move || view! {
                                                        <button
                                                            class="btn btn-sm btn-outline-danger"
                                                            on:click=move |_| confirming.set(Some(id))
                                                        >
                                                            "Cancelar"
                                                        </button>
                                                    }
                                                >
                                                    <button
                                                        class="btn btn-sm btn-danger"
                                                        disabled=move || cancel_action.pending().get()
                                                        on:click=move |_| cancel_action.dispatch(id)
                                                    >
                                                        "Confirmar"
                                                    </button>
                                                    <button
                                                        class="btn btn-sm btn-link"
                                                        on:click=move |_| confirming.set(None)
                                                    >
                                                        "No"
                                                    </button>
                                                </Show>
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

    fn reservation(id: i64, entry: &str) -> Reservation {
        Reservation {
            id,
            entry: entry.into(),
            exit: entry.into(),
            companions: None,
            room_total: None,
            room: None,
            guest: None,
        }
    }

    #[test]
    fn newest_first() {
        let sorted = sort_by_entry_desc(vec![
            reservation(1, "2025-01-01"),
            reservation(2, "sin fecha"),
            reservation(3, "2025-06-01T10:00:00"),
        ]);
        assert_eq!(sorted.iter().map(|r| r.id).collect::<Vec<_>>(), vec![3, 1, 2]);
    }
}
