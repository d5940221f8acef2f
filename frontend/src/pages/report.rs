use crate::{
    api::{ApiError, DailyReportItem, PurchaseDetail, ReportKind},
    components::{
        error::{InlineErrorMessage, InlineMessage},
        layout::LoadingSpinner,
    },
    state::auth::use_session,
    utils::download::trigger_pdf_download,
};
use leptos::*;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ReportTotals {
    pub rooms: f64,
    pub services: f64,
    pub grand: f64,
}

pub fn report_totals(items: &[DailyReportItem]) -> ReportTotals {
    items.iter().fold(ReportTotals::default(), |acc, item| ReportTotals {
        rooms: acc.rooms + item.room_cost,
        services: acc.services + item.services_total,
        grand: acc.grand + item.grand_total,
    })
}

pub fn details_error_message(error: &ApiError) -> String {
    match error.status() {
        Some(404) => "No se encontraron detalles para esta compra.".into(),
        _ => "Error al cargar los detalles de compras. Intenta de nuevo.".into(),
    }
}

#[component]
pub fn ReportPage() -> impl IntoView {
    let api = use_session().api().clone();
    let selected_purchase = create_rw_signal(None::<(i64, String)>);
    let notice = create_rw_signal(None::<String>);

    let api_for_report = api.clone();
    let report = create_resource(
        || (),
        move |_| {
            let api = api_for_report.clone();
            async move { api.daily_report().await }
        },
    );

    let api_for_details = api.clone();
    let details = create_resource(
        move || selected_purchase.with(|p| p.as_ref().map(|(id, _)| *id)),
        move |purchase_id| {
            let api = api_for_details.clone();
            async move {
                match purchase_id {
                    Some(id) => api.purchase_details(id).await.map(Some),
                    None => Ok(None),
                }
            }
        },
    );

    let download = create_action(move |kind: &ReportKind| {
        let api = api.clone();
        let kind = *kind;
        async move {
            let bytes = api.report_pdf(kind).await.map_err(|e| e.to_string())?;
            trigger_pdf_download(kind.file_name(), &bytes)
        }
    });

    create_effect(move |_| {
        if let Some(Err(err)) = download.value().get() {
            log::error!("report download failed: {}", err);
            notice.set(Some("No se pudo generar el reporte.".into()));
        }
    });

    let show_details = move |item: &DailyReportItem| {
        notice.set(None);
        match item.purchase_id {
            Some(id) => selected_purchase.set(Some((
                id,
                item.guest.clone().unwrap_or_else(|| "este huésped".into()),
            ))),
            None => notice.set(Some("Esta reserva no tiene compras asociadas aún.".into())),
        }
    };

    let report_error = Signal::derive(move || report.get().and_then(Result::err));

    view! {
        <section class="report">
            <h3>"Informe del día"</h3>
            <div class="d-flex gap-2 mb-3">
                {ReportKind::ALL
                    .into_iter()
                    .map(|kind| view! {
                        <button
                            class="btn btn-outline-secondary"
                            disabled=move || download.pending().get()
                            on:click=move |_| download.dispatch(kind)
                        >
                            "PDF " {kind.title()}
                        </button>
                    })
                    .collect_view()}
            </div>
            <InlineErrorMessage error=report_error/>
            <InlineMessage message=notice/>
            <Suspense fallback=|| view! { <LoadingSpinner message="Cargando informe..."/> }>
                {move || {
                    report.get().and_then(Result::ok).map(|items| {
                        let totals = report_totals(&items);
                        view! {
                            <table class="table table-striped">
                                <thead>
                                    <tr>
                                        <th>"Huésped"</th>
                                        <th>"Cédula"</th>
                                        <th>"Habitación"</th>
                                        <th>"Entrada"</th>
                                        <th>"Salida"</th>
                                        <th>"Habitación $"</th>
                                        <th>"Servicios $"</th>
                                        <th>"Total $"</th>
                                        <th></th>
                                    </tr>
                                </thead>
                                <tbody>
                                    {items
                                        .into_iter()
                                        .map(|item| {
                                            let row = item.clone();
                                            view! {
                                                <tr>
                                                    <td>{item.guest.unwrap_or_default()}</td>
                                                    <td>{item.national_id.unwrap_or_default()}</td>
                                                    <td>{item.room.unwrap_or_default()}</td>
                                                    <td>{item.entry.unwrap_or_default()}</td>
                                                    <td>{item.exit.unwrap_or_default()}</td>
                                                    <td>{format!("{:.2}", item.room_cost)}</td>
                                                    <td>{format!("{:.2}", item.services_total)}</td>
                                                    <td>{format!("{:.2}", item.grand_total)}</td>
                                                    <td>
                                                        <button
                                                            class="btn btn-sm btn-link"
                                                            on:click=move |_| show_details(&row)
                                                        >
                                                            "Ver compras"
                                                        </button>
                                                    </td>
                                                </tr>
                                            }
                                        })
                                        .collect_view()}
                                </tbody>
                                <tfoot>
                                    <tr class="fw-bold">
                                        <td colspan="5">"Totales"</td>
                                        <td>{format!("{:.2}", totals.rooms)}</td>
                                        <td>{format!("{:.2}", totals.services)}</td>
                                        <td>{format!("{:.2}", totals.grand)}</td>
                                        <td></td>
                                    </tr>
                                </tfoot>
                            </table>
                        }
                    })
                }}
            </Suspense>
            <Show when=move || selected_purchase.with(Option::is_some) fallback=|| ()>
                <div class="card p-3">
                    <div class="d-flex justify-content-between">
                        <h5>
                            "Compras de "
                            {move || selected_purchase.with(|p| p.as_ref().map(|(_, name)| name.clone()).unwrap_or_default())}
                        </h5>
                        <button class="btn-close" on:click=move |_| selected_purchase.set(None)></button>
                    </div>
                    <Suspense fallback=|| view! { <LoadingSpinner/> }>
                        {move || details.get().map(|result| match result {
                            Ok(lines) => view! { <PurchaseLines lines=lines.unwrap_or_default()/> }.into_view(),
                            Err(err) => view! {
                                <div class="alert alert-danger">{details_error_message(&err)}</div>
                            }
                            .into_view(),
                        })}
                    </Suspense>
                </div>
            </Show>
        </section>
    }
}

#[component]
fn PurchaseLines(lines: Vec<PurchaseDetail>) -> impl IntoView {
    if lines.is_empty() {
        return view! { <p class="text-muted">"Sin consumos registrados."</p> }.into_view();
    }
    view! {
        <ul class="list-group">
            {lines
                .into_iter()
                .map(|line| view! {
                    <li class="list-group-item d-flex justify-content-between">
                        <span>{line.quantity} " × " {line.product_name}</span>
                        <span>{format!("${:.2}", line.subtotal)}</span>
                    </li>
                })
                .collect_view()}
        </ul>
    }
    .into_view()
}
