use super::utils::{parse_day_input, reservations_active_on};
use crate::{
    api::Reservation,
    components::{error::InlineErrorMessage, layout::LoadingSpinner},
    state::auth::use_session,
    utils::time::today,
};
use leptos::*;

#[component]
pub fn DashboardPanel() -> impl IntoView {
    let session = use_session();
    let api = session.api().clone();
    let selected_day = create_rw_signal(today());

    let reservations = create_resource(
        || (),
        move |_| {
            let api = api.clone();
            async move { api.list_reservations().await }
        },
    );
    let error = Signal::derive(move || reservations.get().and_then(Result::err));
    let active = move || {
        let day = selected_day.get();
        reservations
            .get()
            .and_then(Result::ok)
            .map(|all| reservations_active_on(&all, day))
    };

    view! {
        <section class="dashboard">
            <div class="d-flex align-items-center gap-3 mb-3">
                <h3 class="mb-0">"Reservas vigentes"</h3>
                <input
                    type="date"
                    class="form-control w-auto"
                    prop:value=move || selected_day.get().format("%Y-%m-%d").to_string()
                    on:change=move |ev| {
                        if let Some(day) = parse_day_input(&event_target_value(&ev)) {
                            selected_day.set(day);
                        }
                    }
                />
            </div>
            <InlineErrorMessage error=error/>
            <Suspense fallback=|| view! { <LoadingSpinner message="Cargando reservas..."/> }>
                {move || active().map(|rows| view! { <ActiveReservations rows=rows/> })}
            </Suspense>
        </section>
    }
}

#[component]
fn ActiveReservations(rows: Vec<Reservation>) -> impl IntoView {
    if rows.is_empty() {
        return view! { <p class="text-muted">"No hay reservas para este día."</p> }.into_view();
    }
    view! {
        <table class="table table-striped">
            <thead>
                <tr>
                    <th>"Habitación"</th>
                    <th>"Huésped"</th>
                    <th>"Entrada"</th>
                    <th>"Salida"</th>
                </tr>
            </thead>
            <tbody>
                {rows
                    .into_iter()
                    .map(|reservation| {
                        let guest = reservation
                            .guest
                            .as_ref()
                            .map(|guest| guest.full_name())
                            .unwrap_or_default();
                        view! {
                            <tr>
                                <td>{reservation.room_number().to_string()}</td>
                                <td>{guest}</td>
                                <td>{reservation.entry.clone()}</td>
                                <td>{reservation.exit.clone()}</td>
                            </tr>
                        }
                    })
                    .collect_view()}
            </tbody>
        </table>
    }
    .into_view()
}
