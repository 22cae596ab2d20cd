//! Analysis prescriptions: list, detail and the prescription cart.

use dioxus::prelude::*;
use serde_json::Value;

use super::visits::{patient_option, window_options, PaymentSummary};
use crate::app::auth_context::use_api;
use crate::app::components::{
    options, parse_amount, BillingFields, ErrorAlert, Loading, RoleLink, SelectField,
    TextField, PAYMENT_METHODS,
};
use crate::app::Route;
use crate::auth::ApiError;
use crate::clinic::{
    display_date, format_amount, Analysis, AnalysisCart, DateWindow, ListFilter,
    NewAnalysisRequest, Patient, Ref, StaffMember, ANY_STATUS,
};

const ANALYSIS_STATUSES: &[(&str, &str)] = &[
    (ANY_STATUS, "Tous les statuts"),
    ("en attente", "En attente"),
    ("en cours", "En cours"),
    ("terminé", "Terminé"),
    ("validé", "Validé"),
];

const CATEGORIES: &[(&str, &str)] = &[("Laboratoire", "Laboratoire"), ("Imagerie", "Imagerie")];

const PRIORITIES: &[(&str, &str)] = &[("Normal", "Normal"), ("Urgent", "Urgent")];

fn status_class(status: Option<&str>) -> &'static str {
    match status {
        Some("en attente") => "bg-yellow-100 text-yellow-800",
        Some("en cours") => "bg-blue-100 text-blue-800",
        Some("terminé") => "bg-green-100 text-green-800",
        Some("validé") => "bg-purple-100 text-purple-800",
        _ => "bg-gray-100 text-gray-800",
    }
}

fn total_label(analysis: &Analysis) -> String {
    let total = analysis
        .total_price
        .unwrap_or_else(|| analysis.items.iter().map(|i| i.price).sum());
    format!("{} FC", format_amount(total))
}

#[component]
pub fn Analyses() -> Element {
    let api = use_api();
    let mut filter = use_signal(ListFilter::default);
    let mut category = use_signal(|| ANY_STATUS.to_string());

    let mut analyses = use_resource(move || {
        let api = api.clone();
        async move { api.list::<Analysis>("/analyses").await }
    });

    let listing = analyses.read().clone();
    let window = filter.read().window.as_str().to_string();
    let mut categories = vec![(ANY_STATUS.to_string(), "Toutes les catégories".to_string())];
    categories.extend(options(CATEGORIES));

    rsx! {
        div { class: "mb-6 flex justify-between items-center",
            div {
                h2 { class: "text-2xl font-bold text-gray-900", "Analyses" }
                p { class: "text-gray-600", "Prescriptions de laboratoire et d'imagerie" }
            }
            RoleLink { to: Route::NewAnalysis {}, hide_refused: true, class: "btn btn-primary", "Prescrire une analyse" }
        }
        div { class: "bg-white rounded-xl shadow-sm border border-gray-200 p-4 mb-6 grid grid-cols-1 md:grid-cols-4 gap-4",
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
                options: options(ANALYSIS_STATUSES),
                on_change: move |v: String| filter.write().status = v,
            }
            SelectField {
                label: "Catégorie",
                value: category(),
                options: categories,
                on_change: move |v: String| category.set(v),
            }
        }
        {match listing {
            None => rsx! { Loading {} },
            Some(Err(e)) => rsx! {
                ErrorAlert { message: e.user_message("Erreur chargement analyses"), on_dismiss: move |_| analyses.restart() }
            },
            Some(Ok(list)) => {
                let wanted = category();
                let shown: Vec<Analysis> = filter
                    .read()
                    .apply(&list, chrono::Local::now())
                    .into_iter()
                    .filter(|a| wanted == ANY_STATUS || a.category.as_deref() == Some(wanted.as_str()))
                    .collect();
                let count = shown.len();
                rsx! {
                    p { class: "text-sm text-gray-600 mb-2", "{count} analyse(s)" }
                    div { class: "bg-white rounded-xl shadow-sm border border-gray-200 overflow-hidden",
                        table { class: "w-full",
                            thead { class: "bg-gray-50",
                                tr {
                                    th { class: "px-6 py-3 text-left", "N° Analyse" }
                                    th { class: "px-6 py-3 text-left", "Patient" }
                                    th { class: "px-6 py-3 text-left", "Catégorie" }
                                    th { class: "px-6 py-3 text-left", "Examens" }
                                    th { class: "px-6 py-3 text-left", "Montant" }
                                    th { class: "px-6 py-3 text-left", "Date" }
                                    th { class: "px-6 py-3 text-left", "Statut" }
                                }
                            }
                            tbody {
                                if shown.is_empty() {
                                    tr {
                                        td { class: "px-6 py-8 text-center text-gray-500", colspan: "7", "Aucune analyse trouvée" }
                                    }
                                }
                                for analysis in shown {
                                    tr { key: "{analysis.id}", class: "border-t border-gray-100",
                                        td { class: "px-6 py-4 text-sm font-mono",
                                            RoleLink { to: Route::AnalysisDetail { id: analysis.id.clone() }, class: "text-blue-600",
                                                {analysis.analysis_number.clone().unwrap_or_else(|| "-".to_string())}
                                            }
                                        }
                                        td { class: "px-6 py-4 font-medium",
                                            {analysis.patient.as_ref().map(|p| p.fullname.clone()).unwrap_or_default()}
                                        }
                                        td { class: "px-6 py-4 text-gray-600", {analysis.category.clone().unwrap_or_default()} }
                                        td { class: "px-6 py-4 text-gray-600", {analysis.items.len().to_string()} }
                                        td { class: "px-6 py-4", {total_label(&analysis)} }
                                        td { class: "px-6 py-4 text-gray-600", {display_date(analysis.prescription_date.as_deref())} }
                                        td { class: "px-6 py-4",
                                            span { class: format!("px-2 py-1 rounded-full text-xs {}", status_class(analysis.status.as_deref())),
                                                {analysis.status.clone().unwrap_or_default()}
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

#[component]
pub fn AnalysisDetail(id: String) -> Element {
    let api = use_api();

    let analysis = use_resource(use_reactive!(|id| {
        let api = api.clone();
        async move { api.get_item::<Analysis>(&format!("/analyses/{id}")).await }
    }));

    let result = analysis.read().clone();
    match result {
        None => rsx! { Loading {} },
        Some(Err(e)) => rsx! {
            div { class: "text-center py-12",
                p { class: "text-gray-600 mb-4", {e.user_message("Analyse non trouvée")} }
                RoleLink { to: Route::Analyses {}, class: "text-blue-600", "Retour aux analyses" }
            }
        },
        Some(Ok(analysis)) => {
            let payment = analysis.payment.as_ref().and_then(Ref::populated).cloned();
            let total = total_label(&analysis);
            rsx! {
                div { class: "mb-6",
                    RoleLink { to: Route::Analyses {}, class: "text-sm text-blue-600", "← Retour aux analyses" }
                    h2 { class: "text-2xl font-bold text-gray-900",
                        "Analyse "
                        {analysis.analysis_number.clone().unwrap_or_default()}
                    }
                    p { class: "text-gray-600",
                        "Prescrite le "
                        {display_date(analysis.prescription_date.as_deref())}
                    }
                }
                div { class: "grid grid-cols-1 lg:grid-cols-3 gap-6",
                    div { class: "lg:col-span-2 space-y-6",
                        div { class: "bg-white rounded-xl shadow-sm border border-gray-200 p-6",
                            h3 { class: "text-lg font-semibold mb-4", "Examens" }
                            table { class: "w-full text-sm",
                                thead {
                                    tr {
                                        th { class: "text-left py-2", "Analyse" }
                                        th { class: "text-left py-2", "Prix" }
                                        th { class: "text-left py-2", "Résultat" }
                                    }
                                }
                                tbody {
                                    for (index, item) in analysis.items.iter().enumerate() {
                                        tr { key: "{index}", class: "border-t border-gray-100",
                                            td { class: "py-2", "{item.name}" }
                                            td { class: "py-2", {format!("{} FC", format_amount(item.price))} }
                                            td { class: "py-2 text-gray-600", {item.result.clone().unwrap_or_else(|| "-".to_string())} }
                                        }
                                    }
                                }
                            }
                            p { class: "mt-4 text-right font-semibold", "Total: {total}" }
                        }
                        if analysis.doctor_comment.is_some() || analysis.technician_comment.is_some() {
                            div { class: "bg-white rounded-xl shadow-sm border border-gray-200 p-6 space-y-2 text-sm",
                                h3 { class: "text-lg font-semibold mb-2", "Commentaires" }
                                if let Some(comment) = analysis.doctor_comment.clone() {
                                    p { span { class: "font-medium", "Médecin: " } "{comment}" }
                                }
                                if let Some(comment) = analysis.technician_comment.clone() {
                                    p { span { class: "font-medium", "Laborantin: " } "{comment}" }
                                }
                            }
                        }
                    }
                    div { class: "space-y-6",
                        div { class: "bg-white rounded-xl shadow-sm border border-gray-200 p-6 space-y-2 text-sm",
                            h3 { class: "text-lg font-semibold mb-2", "Informations" }
                            {match analysis.patient.clone() {
                                Some(patient) => rsx! {
                                    p {
                                        "Patient: "
                                        RoleLink { to: Route::PatientDetail { id: patient.id.clone() }, class: "text-blue-600", "{patient.fullname}" }
                                    }
                                },
                                None => rsx! {},
                            }}
                            if let Some(doctor) = analysis.doctor.clone() {
                                p { "Médecin: Dr. {doctor.fullname}" }
                            }
                            if let Some(technician) = analysis.technician.clone() {
                                p { "Laborantin: {technician.fullname}" }
                            }
                            p { "Catégorie: " {analysis.category.clone().unwrap_or_default()} }
                            p { "Priorité: " {analysis.priority.clone().unwrap_or_default()} }
                            p {
                                "Statut: "
                                span { class: format!("px-2 py-1 rounded-full text-xs {}", status_class(analysis.status.as_deref())),
                                    {analysis.status.clone().unwrap_or_default()}
                                }
                            }
                            if analysis.result_date.is_some() {
                                p { "Résultats du " {display_date(analysis.result_date.as_deref())} }
                            }
                        }
                        div { class: "bg-white rounded-xl shadow-sm border border-gray-200 p-6",
                            h3 { class: "text-lg font-semibold mb-4", "Paiement" }
                            {match payment {
                                Some(payment) => rsx! { PaymentSummary { payment: payment } },
                                None => rsx! { p { class: "text-gray-500 text-sm", "Aucun paiement associé" } },
                            }}
                        }
                    }
                }
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
struct AnalysisChoices {
    patients: Vec<Patient>,
    doctors: Vec<StaffMember>,
}

#[component]
pub fn NewAnalysis() -> Element {
    let api = use_api();
    let nav = navigator();
    let mut error = use_signal(|| None::<String>);
    let mut submitting = use_signal(|| false);
    let mut cart = use_signal(AnalysisCart::default);
    let mut item_name = use_signal(String::new);
    let mut item_price = use_signal(String::new);
    let mut form = use_signal(|| NewAnalysisRequest {
        category: "Laboratoire".into(),
        priority: "Normal".into(),
        payment_method: "especes".into(),
        ..NewAnalysisRequest::default()
    });

    let load_api = api.clone();
    let choices = use_resource(move || {
        let api = load_api.clone();
        async move {
            let (patients, doctors) = futures::try_join!(
                api.list::<Patient>("/patients"),
                api.list::<StaffMember>("/doctors"),
            )?;
            Ok::<_, ApiError>(AnalysisChoices { patients, doctors })
        }
    });

    let add_item = move |_: MouseEvent| {
        let price = parse_amount(&item_price());
        let added = cart.write().add(&item_name(), price);
        match added {
            Ok(()) => {
                item_name.set(String::new());
                item_price.set(String::new());
                let due = cart.read().billing(form.read().discount_percentage).final_amount();
                form.write().paid_amount = due;
            }
            Err(e) => error.set(Some(e.to_string())),
        }
    };

    let on_submit = move |evt: FormEvent| {
        evt.prevent_default();
        let mut body = form();
        if body.patient.is_empty() {
            error.set(Some("Patient requis".into()));
            return;
        }
        let current = cart();
        let settled = current.billing(body.discount_percentage).settle(body.paid_amount);
        let items = current.into_items();
        match (items, settled) {
            (Err(e), _) | (_, Err(e)) => {
                error.set(Some(e.to_string()));
                return;
            }
            (Ok(items), Ok(due)) => {
                body.items = items;
                body.paid_amount = due;
            }
        }
        let api = api.clone();
        submitting.set(true);
        spawn(async move {
            match api.post::<_, Value>("/analysis", &body).await {
                Ok(_) => {
                    tracing::info!("analysis prescribed");
                    nav.push(Route::Analyses {});
                }
                Err(e) => {
                    error.set(Some(e.user_message("Erreur lors de la création")));
                    submitting.set(false);
                }
            }
        });
    };

    let state = choices.read().clone();
    let values = form();
    let current = cart();
    let total = current.total();

    rsx! {
        div { class: "mb-6",
            RoleLink { to: Route::Analyses {}, class: "text-sm text-blue-600", "← Retour aux analyses" }
            h2 { class: "text-2xl font-bold text-gray-900", "Prescrire une analyse" }
            p { class: "text-gray-600", "Créer une prescription d'analyses avec paiement" }
        }
        if let Some(message) = error() {
            ErrorAlert { message: message, on_dismiss: move |_| error.set(None) }
        }
        {match state {
            None => rsx! { Loading {} },
            Some(Err(e)) => rsx! {
                p { class: "text-gray-600", {e.user_message("Erreur lors du chargement des données")} }
            },
            Some(Ok(choices)) => {
                let patients: Vec<(String, String)> = choices
                    .patients
                    .iter()
                    .map(|p| (p.id.clone(), patient_option(p)))
                    .collect();
                let doctors: Vec<(String, String)> = choices
                    .doctors
                    .iter()
                    .map(|d| (d.id.clone(), format!("Dr. {}", d.fullname)))
                    .collect();
                rsx! {
                    form { class: "space-y-6", onsubmit: on_submit,
                        div { class: "bg-white rounded-xl shadow-sm border border-gray-200 p-6 grid grid-cols-1 md:grid-cols-2 gap-4",
                            SelectField {
                                label: "Patient",
                                value: values.patient.clone(),
                                options: patients,
                                placeholder: "-- Choisir un patient --",
                                required: true,
                                on_change: move |v: String| form.write().patient = v,
                            }
                            SelectField {
                                label: "Médecin prescripteur",
                                value: values.doctor.clone(),
                                options: doctors,
                                placeholder: "-- Optionnel --",
                                on_change: move |v: String| form.write().doctor = v,
                            }
                            SelectField {
                                label: "Catégorie",
                                value: values.category.clone(),
                                options: options(CATEGORIES),
                                required: true,
                                on_change: move |v: String| form.write().category = v,
                            }
                            SelectField {
                                label: "Priorité",
                                value: values.priority.clone(),
                                options: options(PRIORITIES),
                                on_change: move |v: String| form.write().priority = v,
                            }
                        }
                        div { class: "bg-white rounded-xl shadow-sm border border-gray-200 p-6",
                            h3 { class: "text-lg font-semibold mb-4", "Analyses demandées" }
                            div { class: "grid grid-cols-1 md:grid-cols-3 gap-4 items-end mb-4",
                                TextField { label: "Nom de l'analyse", value: item_name(), on_input: move |v: String| item_name.set(v) }
                                TextField { label: "Prix (FC)", input_type: "number", value: item_price(), on_input: move |v: String| item_price.set(v) }
                                button { r#type: "button", class: "btn btn-secondary", onclick: add_item, "Ajouter" }
                            }
                            if current.is_empty() {
                                p { class: "text-gray-500 text-sm", "Aucune analyse ajoutée" }
                            }
                            ul { class: "divide-y divide-gray-100",
                                for (index, item) in current.items().iter().enumerate() {
                                    li { key: "{index}", class: "py-2 flex justify-between items-center",
                                        span { "{item.name}" }
                                        div { class: "flex items-center gap-4",
                                            span { {format!("{} FC", format_amount(item.price))} }
                                            button {
                                                r#type: "button",
                                                class: "text-red-600 text-sm",
                                                onclick: move |_| {
                                                    cart.write().remove(index);
                                                    let due = cart.read().billing(form.read().discount_percentage).final_amount();
                                                    form.write().paid_amount = due;
                                                },
                                                "Retirer"
                                            }
                                        }
                                    }
                                }
                            }
                        }
                        BillingFields {
                            total: total,
                            discount_percentage: values.discount_percentage,
                            paid: values.paid_amount,
                            total_editable: false,
                            on_total: move |_: f64| {},
                            on_discount: move |pct: f64| {
                                let due = cart.read().billing(pct).final_amount();
                                let mut draft = form.write();
                                draft.discount_percentage = pct;
                                draft.paid_amount = due;
                            },
                            on_paid: move |paid: f64| form.write().paid_amount = paid,
                        }
                        div { class: "bg-white rounded-xl shadow-sm border border-gray-200 p-6",
                            SelectField {
                                label: "Mode de paiement",
                                value: values.payment_method.clone(),
                                options: options(PAYMENT_METHODS),
                                on_change: move |v: String| form.write().payment_method = v,
                            }
                        }
                        div { class: "flex justify-end gap-3",
                            RoleLink { to: Route::Analyses {}, hide_refused: true, class: "btn", "Annuler" }
                            button { r#type: "submit", class: "btn btn-primary", disabled: submitting(),
                                if submitting() { "Création..." } else { "Prescrire" }
                            }
                        }
                    }
                }
            }
        }}
    }
}
