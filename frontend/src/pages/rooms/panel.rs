use super::utils::{
    build_room_update, state_badge_class, state_label, validate_note, RoomForm, ROOM_STATES,
};
use crate::{
    api::{ApiError, NewRoomNote, Role, Room, RoomUpdate},
    components::{
        error::{InlineErrorMessage, InlineMessage},
        layout::LoadingSpinner,
    },
    state::auth::use_session,
};
use leptos::*;

#[component]
pub fn RoomsPanel() -> impl IntoView {
    let session = use_session();
    let api = session.api().clone();
    let state = session.state();
    let is_admin = move || state.with(|s| s.is_admin());

    let reload = create_rw_signal(0u32);
    let selected = create_rw_signal(None::<Room>);
    let form = create_rw_signal(RoomForm::default());
    let note_text = create_rw_signal(String::new());
    let message = create_rw_signal(None::<String>);
    let action_error = create_rw_signal(None::<ApiError>);

    let api_for_rooms = api.clone();
    let rooms = create_resource(
        move || reload.get(),
        move |_| {
            let api = api_for_rooms.clone();
            async move { api.list_rooms().await }
        },
    );

    let notes_reload = create_rw_signal(0u32);
    let api_for_notes = api.clone();
    let notes = create_resource(
        move || (selected.with(|room| room.as_ref().map(|r| r.id)), notes_reload.get()),
        move |(room_id, _)| {
            let api = api_for_notes.clone();
            async move {
                match room_id {
                    Some(id) => api.list_room_notes(id).await,
                    None => Ok(Vec::new()),
                }
            }
        },
    );

    let api_for_update = api.clone();
    let update_action = create_action(move |(id, update): &(i64, RoomUpdate)| {
        let api = api_for_update.clone();
        let (id, update) = (*id, update.clone());
        async move { api.update_room(id, &update).await }
    });

    let api_for_note = api.clone();
    let add_note_action = create_action(move |note: &NewRoomNote| {
        let api = api_for_note.clone();
        let note = note.clone();
        async move { api.create_room_note(&note).await }
    });

    let api_for_delete = api.clone();
    let delete_note_action = create_action(move |id: &i64| {
        let api = api_for_delete.clone();
        let id = *id;
        async move { api.delete_room_note(id).await }
    });

    create_effect(move |_| {
        if let Some(result) = update_action.value().get() {
            match result {
                Ok(room) => {
                    message.set(Some(format!(
                        "Habitación {} actualizada",
                        room.number.clone().unwrap_or_default()
                    )));
                    selected.set(Some(room));
                    reload.update(|value| *value = value.wrapping_add(1));
                }
                Err(err) => action_error.set(Some(err)),
            }
        }
    });

    for note_action in [add_note_action.value(), delete_note_action.value()] {
        create_effect(move |_| match note_action.get() {
            Some(Ok(())) => notes_reload.update(|value| *value = value.wrapping_add(1)),
            Some(Err(err)) => action_error.set(Some(err)),
            None => {}
        });
    }

    let select_room = move |room: Room| {
        form.set(RoomForm {
            state: room.state.clone().unwrap_or_else(|| "DISPONIBLE".into()),
            capacity: room.capacity.map(|c| c.to_string()).unwrap_or_default(),
            price: room.price.map(|p| p.to_string()).unwrap_or_default(),
            image_url: room.image_url.clone().unwrap_or_default(),
        });
        message.set(None);
        action_error.set(None);
        selected.set(Some(room));
    };

    let save = move |_| {
        let Some(room) = selected.get_untracked() else {
            return;
        };
        let role = state.with_untracked(|s| s.role.unwrap_or(Role::Employee));
        match form.with_untracked(|f| build_room_update(f, role)) {
            Ok(update) => {
                message.set(None);
                action_error.set(None);
                update_action.dispatch((room.id, update));
            }
            Err(text) => message.set(Some(text)),
        }
    };

    let add_note = move |_| {
        let Some(room_id) = selected.with_untracked(|room| room.as_ref().map(|r| r.id)) else {
            return;
        };
        match validate_note(&note_text.get_untracked()) {
            Ok(comment) => {
                note_text.set(String::new());
                add_note_action.dispatch(NewRoomNote { room_id, comment });
            }
            Err(text) => message.set(Some(text)),
        }
    };

    let rooms_error = Signal::derive(move || rooms.get().and_then(Result::err));
    let notes_error = Signal::derive(move || notes.get().and_then(Result::err));

    view! {
        <section class="rooms">
            <h3>"Habitaciones"</h3>
            <InlineErrorMessage error=rooms_error/>
            <InlineErrorMessage error=action_error/>
            <InlineMessage message=message/>
            <Suspense fallback=|| view! { <LoadingSpinner message="Cargando habitaciones..."/> }>
                <div class="row g-3">
                    {move || {
                        rooms
                            .get()
                            .and_then(Result::ok)
                            .unwrap_or_default()
                            .into_iter()
                            .map(|room| {
                                let label = state_label(room.state.as_deref());
                                let badge = state_badge_class(room.state.as_deref());
                                let number = room.number.clone().unwrap_or_default();
                                view! {
                                    <div class="col-md-3">
                                        <button
                                            class="card p-3 w-100"
                                            on:click=move |_| select_room(room.clone())
                                        >
                                            <h5>"Habitación " {number}</h5>
                                            <span class=badge>{label}</span>
                                        </button>
                                    </div>
                                }
                            })
                            .collect_view()
                    }}
                </div>
            </Suspense>
            <Show when=move || selected.with(Option::is_some) fallback=|| ()>
                <div class="card mt-4 p-4">
                    <h4>
                        "Habitación "
                        {move || selected.with(|r| r.as_ref().and_then(|r| r.number.clone()).unwrap_or_default())}
                    </h4>
                    <select
                        class="form-select mb-3"
                        prop:value=move || form.with(|f| f.state.clone())
                        on:change=move |ev| form.update(|f| f.state = event_target_value(&ev))
                    >
                        {ROOM_STATES
                            .iter()
                            .map(|(wire, label)| view! { <option value=*wire>{*label}</option> })
                            .collect_view()}
                    </select>
                    <Show when=is_admin fallback=|| ()>
                        <input
                            type="number"
                            class="form-control mb-2"
                            placeholder="Personas"
                            prop:value=move || form.with(|f| f.capacity.clone())
                            on:input=move |ev| form.update(|f| f.capacity = event_target_value(&ev))
                        />
                        <input
                            type="number"
                            step="0.01"
                            class="form-control mb-2"
                            placeholder="Precio"
                            prop:value=move || form.with(|f| f.price.clone())
                            on:input=move |ev| form.update(|f| f.price = event_target_value(&ev))
                        />
                        <input
                            type="text"
                            class="form-control mb-2"
                            placeholder="URL de imagen"
                            prop:value=move || form.with(|f| f.image_url.clone())
                            on:input=move |ev| form.update(|f| f.image_url = event_target_value(&ev))
                        />
                    </Show>
                    <button class="btn btn-orange" on:click=save disabled=move || update_action.pending().get()>
                        "Guardar cambios"
                    </button>

                    <h5 class="mt-4">"Observaciones"</h5>
                    <InlineErrorMessage error=notes_error/>
                    <ul class="list-group mb-3">
                        {move || {
                            notes
                                .get()
                                .and_then(Result::ok)
                                .unwrap_or_default()
                                .into_iter()
                                .map(|note| {
                                    let id = note.id;
                                    view! {
                                        <li class="list-group-item d-flex justify-content-between">
                                            <span>{note.comment} " " <small class="text-muted">{note.date.unwrap_or_default()}</small></span>
                                            <button
                                                class="btn btn-sm btn-outline-danger"
                                                on:click=move |_| delete_note_action.dispatch(id)
                                            >
                                                "Eliminar"
                                            </button>
                                        </li>
                                    }
                                })
                                .collect_view()
                        }}
                    </ul>
                    <textarea
                        class="form-control mb-2"
                        placeholder="Nueva observación"
                        prop:value=move || note_text.get()
                        on:input=move |ev| note_text.set(event_target_value(&ev))
                    ></textarea>
                    <button class="btn btn-outline-secondary" on:click=add_note>
                        "Agregar observación"
                    </button>
                </div>
            </Show>
        </section>
    }
}
