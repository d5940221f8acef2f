use crate::{
    api::Guest,
    components::{error::InlineErrorMessage, layout::LoadingSpinner},
    state::auth::use_session,
};
use leptos::*;

/// Case-insensitive match on name or ID card.
pub fn filter_guests(guests: &[Guest], query: &str) -> Vec<Guest> {
    let query = query.trim().to_lowercase();
    guests
        .iter()
        .filter(|guest| {
            query.is_empty()
                || guest.full_name().to_lowercase().contains(&query)
                || guest
                    .national_id
                    .as_deref()
                    .map_or(false, |id| id.contains(&query))
        })
        .cloned()
        .collect()
}

#[component]
pub fn GuestHistoryPage() -> impl IntoView {
    let api = use_session().api().clone();
    let query = create_rw_signal(String::new());
    let guests = create_resource(
        || (),
        move |_| {
            let api = api.clone();
            async move { api.list_guests().await }
        },
    );
    let error = Signal::derive(move || guests.get().and_then(Result::err));

    view! {
        <section class="guest-history">
            <h3>"Historial de huéspedes"</h3>
            <input
                class="form-control mb-3"
                placeholder="Buscar por nombre o cédula"
                prop:value=move || query.get()
                on:input=move |ev| query.set(event_target_value(&ev))
            />
            <InlineErrorMessage error=error/>
            <Suspense fallback=|| view! { <LoadingSpinner message="Cargando huéspedes..."/> }>
                <table class="table table-hover">
                    <thead>
                        <tr>
                            <th>"Nombre"</th>
                            <th>"Cédula"</th>
                        </tr>
                    </thead>
                    <tbody>
                        {move || {
                            let all = guests.get().and_then(Result::ok).unwrap_or_default();
                            query
                                .with(|q| filter_guests(&all, q))
                                .into_iter()
                                .map(|guest| {
                                    view! {
                                        <tr>
                                            <td>{guest.full_name()}</td>
                                            <td>{guest.national_id.unwrap_or_default()}</td>
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

    fn guest(id: i64, first: &str, last: &str, national_id: &str) -> Guest {
        Guest {
            id,
            first_names: first.into(),
            last_names: Some(last.into()),
            national_id: Some(national_id.into()),
        }
    }

    #[test]
    fn filters_by_name_and_id() {
        let guests = vec![
            guest(1, "Ana", "Quispe", "0102"),
            guest(2, "Luis", "Andrade", "0999"),
        ];
        assert_eq!(filter_guests(&guests, "quis")[0].id, 1);
        assert_eq!(filter_guests(&guests, "099")[0].id, 2);
        assert_eq!(filter_guests(&guests, "  ").len(), 2);
        assert!(filter_guests(&guests, "zzz").is_empty());
    }
}
