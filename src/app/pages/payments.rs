//! Payment ledger with billed, collected and outstanding totals.

use dioxus::prelude::*;

use super::visits::window_options;
use crate::app::auth_context::use_api;
use crate::app::components::{
    options, ErrorAlert, Loading, RoleLink, SelectField, StatCard, TextField,
};
use crate::app::Route;
use crate::clinic::{
    display_date, format_amount, DateWindow, ListFilter, Payment, PaymentTotals, ANY_STATUS,
};

const PAYMENT_STATUSES: &[(&str, &str)] = &[
    (ANY_STATUS, "Tous les statuts"),
    ("paye", "Payé"),
    ("partiel", "Partiel"),
    ("impaye", "Impayé"),
];

fn status_class(status: Option<&str>) -> &'static str {
    match status {
        Some("paye") => "bg-green-100 text-green-800",
        Some("partiel") => "bg-yellow-100 text-yellow-800",
        Some("impaye") => "bg-red-100 text-red-800",
        _ => "bg-gray-100 text-gray-800",
    }
}

fn debt_class(debt_status: Option<&str>) -> &'static str {
    match debt_status {
        Some("active") => "text-red-600",
        Some("soldee") => "text-green-600",
        _ => "text-gray-600",
    }
}

fn fc(amount: Option<f64>) -> String {
    format!("{} FC", format_amount(amount.unwrap_or(0.0)))
}

#[component]
pub fn Payments() -> Element {
    let api = use_api();
    let mut filter = use_signal(ListFilter::default);

    let mut payments = use_resource(move || {
        let api = api.clone();
        async move { api.list::<Payment>("/payments").await }
    });

    let listing = payments.read().clone();
    let window = filter.read().window.as_str().to_string();

    rsx! {
        div { class: "mb-6",
            h2 { class: "text-2xl font-bold text-gray-900", "Paiements" }
            p { class: "text-gray-600", "Historique des paiements et dettes" }
        }
        div { class: "bg-white rounded-xl shadow-sm border border-gray-200 p-4 mb-6 grid grid-cols-1 md:grid-cols-3 gap-4",
            TextField {
                label: "Rechercher",
                value: filter.read().search.clone(),
                placeholder: "Patient ou numéro",
                on_input: move |v: String| filter.write().search = v,
            }
            SelectField {
                label: "Période",
                value: window,
                options: window_options(),
                on_change: move |v: String| filter.write().window = DateWindow::parse(&v),
            }
            SelectField {
                label: "Statut",
                value: filter.read().status.clone(),
                options: options(PAYMENT_STATUSES),
                on_change: move |v: String| filter.write().status = v,
            }
        }
        {match listing {
            None => rsx! { Loading {} },
            Some(Err(e)) => rsx! {
                ErrorAlert { message: e.user_message("Erreur chargement paiements"), on_dismiss: move |_| payments.restart() }
            },
            Some(Ok(list)) => {
                let shown = filter.read().apply(&list, chrono::Local::now());
                let totals = PaymentTotals::of(&shown);
                rsx! {
                    div { class: "grid grid-cols-1 md:grid-cols-4 gap-6 mb-6",
                        StatCard { title: "Total Facturé", value: fc(Some(totals.total)) }
                        StatCard { title: "Total Payé", value: fc(Some(totals.paid)), tint: "bg-green-50" }
                        StatCard { title: "Dettes Restantes", value: fc(Some(totals.remaining)), tint: "bg-red-50" }
                        StatCard { title: "Paiements", value: totals.count.to_string(), tint: "bg-purple-50" }
                    }
                    div { class: "bg-white rounded-xl shadow-sm border border-gray-200 overflow-hidden",
                        table { class: "w-full",
                            thead { class: "bg-gray-50",
                                tr {
                                    th { class: "px-6 py-3 text-left", "N° Paiement" }
                                    th { class: "px-6 py-3 text-left", "Date" }
                                    th { class: "px-6 py-3 text-left", "Patient" }
                                    th { class: "px-6 py-3 text-left", "Visite" }
                                    th { class: "px-6 py-3 text-left", "Total" }
                                    th { class: "px-6 py-3 text-left", "Payé" }
                                    th { class: "px-6 py-3 text-left", "Reste" }
                                    th { class: "px-6 py-3 text-left", "Statut" }
                                }
                            }
                            tbody {
                                if shown.is_empty() {
                                    tr {
                                        td { class: "px-6 py-8 text-center text-gray-500", colspan: "8", "Aucun paiement trouvé" }
                                    }
                                }
                                for payment in shown {
                                    tr { key: "{payment.id}", class: "border-t border-gray-100",
                                        td { class: "px-6 py-4 text-sm font-mono", {payment.payment_number.clone().unwrap_or_else(|| "-".to_string())} }
                                        td { class: "px-6 py-4 text-gray-600", {display_date(payment.created_at.as_deref())} }
                                        td { class: "px-6 py-4 font-medium",
                                            {payment.patient.as_ref().map(|p| p.fullname.clone()).unwrap_or_default()}
                                        }
                                        td { class: "px-6 py-4 text-sm",
                                            {match payment.visit.clone() {
                                                Some(visit) => rsx! {
                                                    RoleLink { to: Route::VisitDetail { id: visit.id.clone() }, class: "text-blue-600",
                                                        {visit.visit_number.clone().unwrap_or_else(|| "Voir".to_string())}
                                                    }
                                                },
                                                None => rsx! { "-" },
                                            }}
                                        }
                                        td { class: "px-6 py-4", {fc(payment.final_amount.or(payment.total_amount))} }
                                        td { class: "px-6 py-4 text-green-700", {fc(payment.paid_amount)} }
                                        td { class: format!("px-6 py-4 {}", debt_class(payment.debt_status.as_deref())),
                                            {fc(payment.remaining_amount)}
                                        }
                                        td { class: "px-6 py-4",
                                            span { class: format!("px-2 py-1 rounded-full text-xs {}", status_class(payment.status.as_deref())),
                                                {payment.status.clone().unwrap_or_default()}
                                            }
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }}
    }
}
