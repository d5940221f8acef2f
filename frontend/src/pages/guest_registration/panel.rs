use super::utils::{build_new_reservation, ReservationForm};
use crate::{
    api::{ApiError, NewReservation},
    components::{
        error::{InlineErrorMessage, InlineMessage},
        layout::LoadingSpinner,
    },
    state::auth::use_session,
};
use leptos::{ev::SubmitEvent, *};

#[component]
pub fn GuestRegistrationPanel() -> impl IntoView {
    let api = use_session().api().clone();
    let form = create_rw_signal(ReservationForm::default());
    let validation = create_rw_signal(None::<String>);
    let success = create_rw_signal(None::<String>);
    let submit_error = create_rw_signal(None::<ApiError>);
    let reload = create_rw_signal(0u32);

    let api_for_rooms = api.clone();
    let rooms = create_resource(
        move || reload.get(),
        move |_| {
            let api = api_for_rooms.clone();
            async move { api.list_available_rooms().await }
        },
    );

    // Keep the selection on a room that is still listed.
    create_effect(move |_| {
        if let Some(Ok(available)) = rooms.get() {
            form.update(|f| {
                let still_there = f
                    .room_id
                    .map_or(false, |id| available.iter().any(|room| room.id == id));
                if !still_there {
                    f.room_id = available.first().map(|room| room.id);
                }
            });
        }
    });

    let register_action = create_action(move |reservation: &NewReservation| {
        let api = api.clone();
        let reservation = reservation.clone();
        async move { api.create_reservation(&reservation).await }
    });

    create_effect(move |_| {
        if let Some(result) = register_action.value().get() {
            match result {
                Ok(()) => {
                    success.set(Some("¡Reserva registrada con éxito!".into()));
                    form.set(ReservationForm::default());
                    reload.update(|value| *value = value.wrapping_add(1));
                }
                Err(err) => submit_error.set(Some(err)),
            }
        }
    });

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        validation.set(None);
        success.set(None);
        submit_error.set(None);
        match form.with_untracked(build_new_reservation) {
            Ok(reservation) => register_action.dispatch(reservation),
            Err(message) => validation.set(Some(message)),
        }
    };

    let rooms_error = Signal::derive(move || rooms.get().and_then(Result::err));

    view! {
        <section class="guest-registration">
            <h3>"Registrar huésped"</h3>
            <InlineErrorMessage error=rooms_error/>
            <InlineErrorMessage error=submit_error/>
            <InlineMessage message=validation/>
            <InlineMessage message=success success=true/>
            <form on:submit=on_submit>
                <div class="row g-2">
                    <div class="col-md-4">
                        <input class="form-control" placeholder="Nombres"
                            prop:value=move || form.with(|f| f.first_names.clone())
                            on:input=move |ev| form.update(|f| f.first_names = event_target_value(&ev))/>
                    </div>
                    <div class="col-md-4">
                        <input class="form-control" placeholder="Apellidos"
                            prop:value=move || form.with(|f| f.last_names.clone())
                            on:input=move |ev| form.update(|f| f.last_names = event_target_value(&ev))/>
                    </div>
                    <div class="col-md-4">
                        <input class="form-control" placeholder="Cédula"
                            prop:value=move || form.with(|f| f.national_id.clone())
                            on:input=move |ev| form.update(|f| f.national_id = event_target_value(&ev))/>
                    </div>
                    <div class="col-md-4">
                        <label class="form-label">"Ingreso"</label>
                        <input type="date" class="form-control"
                            prop:value=move || form.with(|f| f.entry.clone())
                            on:input=move |ev| form.update(|f| f.entry = event_target_value(&ev))/>
                    </div>
                    <div class="col-md-4">
                        <label class="form-label">"Salida"</label>
                        <input type="date" class="form-control"
                            prop:value=move || form.with(|f| f.exit.clone())
                            on:input=move |ev| form.update(|f| f.exit = event_target_value(&ev))/>
                    </div>
                    <div class="col-md-4">
                        <label class="form-label">"Acompañantes"</label>
                        <input type="number" min="0" class="form-control"
                            prop:value=move || form.with(|f| f.companions.to_string())
                            on:input=move |ev| {
                                let companions = event_target_value(&ev).parse().unwrap_or(0);
                                form.update(|f| f.companions = companions);
                            }/>
                    </div>
                </div>
                <h5 class="mt-4">"Habitaciones disponibles"</h5>
                <Suspense fallback=|| view! { <LoadingSpinner message="Cargando habitaciones..."/> }>
                    <div class="d-flex flex-wrap gap-2">
                        {move || {
                            rooms
                                .get()
                                .and_then(Result::ok)
                                .unwrap_or_default()
                                .into_iter()
                                .map(|room| {
                                    let id = room.id;
                                    let selected = move || form.with(|f| f.room_id == Some(id));
                                    view! {
                                        <button
                                            type="button"
                                            class=move || if selected() { "btn btn-orange" } else { "btn btn-outline-secondary" }
                                            on:click=move |_| form.update(|f| f.room_id = Some(id))
                                        >
                                            {room.number.clone().unwrap_or_default()}
                                            " · $"
                                            {room.price.unwrap_or_default()}
                                        </button>
                                    }
                                })
                                .collect_view()
                        }}
                    </div>
                </Suspense>
                <button type="submit" class="btn btn-orange mt-4" disabled=move || register_action.pending().get()>
                    "Registrar reserva"
                </button>
            </form>
        </section>
    }
}
