use super::utils::{build_product_input, build_purchase_line, ProductForm};
use crate::{
    api::{ApiError, NewPurchaseDetail, ProductInput},
    components::{
        error::{InlineErrorMessage, InlineMessage},
        layout::LoadingSpinner,
    },
    pages::dashboard::utils::reservations_active_on,
    state::auth::use_session,
    utils::time::today,
};
use leptos::*;

#[component]
pub fn SalesPanel() -> impl IntoView {
    let api = use_session().api().clone();
    let products_reload = create_rw_signal(0u32);
    let product_form = create_rw_signal(ProductForm::default());
    let selected_reservation = create_rw_signal(None::<i64>);
    let selected_product = create_rw_signal(None::<i64>);
    let quantity = create_rw_signal(1u32);
    let notice = create_rw_signal(None::<String>);
    let success = create_rw_signal(None::<String>);
    let action_error = create_rw_signal(None::<ApiError>);

    let api_for_reservations = api.clone();
    let reservations = create_resource(
        || (),
        move |_| {
            let api = api_for_reservations.clone();
            async move {
                api.list_reservations()
                    .await
                    .map(|all| reservations_active_on(&all, today()))
            }
        },
    );

    let api_for_products = api.clone();
    let products = create_resource(
        move || products_reload.get(),
        move |_| {
            let api = api_for_products.clone();
            async move { api.list_products().await }
        },
    );

    let api_for_save = api.clone();
    let save_product = create_action(move |(editing, input): &(Option<i64>, ProductInput)| {
        let api = api_for_save.clone();
        let (editing, input) = (*editing, input.clone());
        async move {
            match editing {
                Some(id) => api.update_product(id, &input).await,
                None => api.create_product(&input).await,
            }
        }
    });

    let api_for_delete = api.clone();
    let delete_product = create_action(move |id: &i64| {
        let api = api_for_delete.clone();
        let id = *id;
        async move { api.delete_product(id).await }
    });

    let add_line = create_action(move |(reservation_id, line): &(i64, NewPurchaseDetail)| {
        let api = api.clone();
        let (reservation_id, line) = (*reservation_id, line.clone());
        async move {
            let purchase = api.purchase_for_reservation(reservation_id).await?;
            api.add_purchase_detail(purchase.id, &line).await
        }
    });

    for product_action in [save_product.value(), delete_product.value()] {
        create_effect(move |_| match product_action.get() {
            Some(Ok(())) => {
                product_form.set(ProductForm::default());
                products_reload.update(|value| *value = value.wrapping_add(1));
            }
            Some(Err(err)) => action_error.set(Some(err)),
            None => {}
        });
    }

    create_effect(move |_| match add_line.value().get() {
        Some(Ok(())) => {
            success.set(Some("Producto agregado a la cuenta".into()));
            selected_reservation.set(None);
            selected_product.set(None);
            quantity.set(1);
        }
        Some(Err(err)) => action_error.set(Some(err)),
        None => {}
    });

    let submit_product = move |_| {
        notice.set(None);
        action_error.set(None);
        let (editing, built) = product_form.with_untracked(|f| (f.editing, build_product_input(f)));
        match built {
            Ok(input) => save_product.dispatch((editing, input)),
            Err(message) => notice.set(Some(message)),
        }
    };

    let submit_line = move |_| {
        notice.set(None);
        success.set(None);
        action_error.set(None);
        let Some(reservation_id) = selected_reservation.get_untracked() else {
            return;
        };
        match build_purchase_line(selected_product.get_untracked(), quantity.get_untracked()) {
            Ok(line) => add_line.dispatch((reservation_id, line)),
            Err(message) => notice.set(Some(message)),
        }
    };

    let load_error = Signal::derive(move || {
        reservations
            .get()
            .and_then(Result::err)
            .or_else(|| products.get().and_then(Result::err))
    });

    view! {
        <section class="sales">
            <h3>"Ventas del día"</h3>
            <InlineErrorMessage error=load_error/>
            <InlineErrorMessage error=action_error/>
            <InlineMessage message=notice/>
            <InlineMessage message=success success=true/>
            <Suspense fallback=|| view! { <LoadingSpinner message="Cargando ventas del día..."/> }>
                <div class="row">
                    <div class="col-md-6">
                        <h5>"Reservas vigentes"</h5>
                        <ul class="list-group">
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
                                            <li class="list-group-item d-flex justify-content-between">
                                                <span>"Hab. " {reservation.room_number().to_string()} " · " {guest}</span>
                                                <button
                                                    class="btn btn-sm btn-orange"
                                                    on:click=move |_| selected_reservation.set(Some(id))
                                                >
                                                    "Agregar consumo"
                                                </button>
                                            </li>
                                        }
                                    })
                                    .collect_view()
                            }}
                        </ul>
                        <Show when=move || selected_reservation.with(Option::is_some) fallback=|| ()>
                            <div class="card p-3 mt-3">
                                <h6>
                                    "Agregar producto a reserva #"
                                    {move || selected_reservation.get().unwrap_or_default()}
                                </h6>
                                <select
                                    class="form-select mb-2"
                                    on:change=move |ev| selected_product.set(event_target_value(&ev).parse().ok())
                                >
                                    <option value="">"Selecciona un producto"</option>
                                    {move || {
                                        products
                                            .get()
                                            .and_then(Result::ok)
                                            .unwrap_or_default()
                                            .into_iter()
                                            .map(|product| view! {
                                                <option value=product.id.to_string()>
                                                    {format!("{} (${:.2})", product.name, product.price)}
                                                </option>
                                            })
                                            .collect_view()
                                    }}
                                </select>
                                <input
                                    type="number"
                                    min="1"
                                    class="form-control mb-2"
                                    prop:value=move || quantity.get().to_string()
                                    on:input=move |ev| quantity.set(event_target_value(&ev).parse().unwrap_or(0))
                                />
                                <div class="d-flex gap-2">
                                    <button class="btn btn-orange" on:click=submit_line disabled=move || add_line.pending().get()>
                                        "Guardar"
                                    </button>
                                    <button class="btn btn-link" on:click=move |_| selected_reservation.set(None)>
                                        "Cerrar"
                                    </button>
                                </div>
                            </div>
                        </Show>
                    </div>
                    <div class="col-md-6">
                        <h5>"Productos"</h5>
                        <div class="d-flex gap-2 mb-2">
                            <input
                                class="form-control"
                                placeholder="Nombre"
                                prop:value=move || product_form.with(|f| f.name.clone())
                                on:input=move |ev| product_form.update(|f| f.name = event_target_value(&ev))
                            />
                            <input
                                type="number"
                                step="0.01"
                                class="form-control"
                                placeholder="Precio"
                                prop:value=move || product_form.with(|f| f.price.clone())
                                on:input=move |ev| product_form.update(|f| f.price = event_target_value(&ev))
                            />
                            <button class="btn btn-orange" on:click=submit_product>
                                {move || if product_form.with(|f| f.editing.is_some()) { "Actualizar" } else { "Crear" }}
                            </button>
                        </div>
                        <table class="table table-sm">
                            <tbody>
                                {move || {
                                    products
                                        .get()
                                        .and_then(Result::ok)
                                        .unwrap_or_default()
                                        .into_iter()
                                        .map(|product| {
                                            let id = product.id;
                                            let form = ProductForm {
                                                editing: Some(id),
                                                name: product.name.clone(),
                                                price: product.price.to_string(),
                                            };
                                            view! {
                                                <tr>
                                                    <td>{product.name}</td>
                                                    <td>{format!("${:.2}", product.price)}</td>
                                                    <td class="text-end">
                                                        <button
                                                            class="btn btn-sm btn-outline-secondary me-1"
                                                            on:click=move |_| product_form.set(form.clone())
                                                        >
                                                            "Editar"
                                                        </button>
                                                        <button
                                                            class="btn btn-sm btn-outline-danger"
                                                            on:click=move |_| delete_product.dispatch(id)
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
                    </div>
                </div>
            </Suspense>
        </section>
    }
}
