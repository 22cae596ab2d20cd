//! Surgical operations: schedule list and booking form.

use dioxus::prelude::*;
use serde_json::Value;

use super::visits::patient_option;
use crate::app::auth_context::use_api;
use crate::app::components::{
    options, parse_amount, BillingFields, ErrorAlert, Loading, RoleLink, SelectField,
    TextField, PAYMENT_METHODS,
};
use crate::app::Route;
use crate::auth::ApiError;
use crate::clinic::{
    display_date, format_amount, Billing, ListFilter, NewOperationRequest, Operation, Patient,
    StaffMember, ANY_STATUS,
};

const OPERATION_STATUSES: &[(&str, &str)] = &[
    (ANY_STATUS, "Tous les statuts"),
    ("programmée", "Programmée"),
    ("en cours", "En cours"),
    ("terminée", "Terminée"),
    ("annulée", "Annulée"),
];

const OPERATION_TYPES: &[&str] = &[
    "Résection bipolaire (TURP)",
    "Lithotripsie urétérale",
    "Urétéro-résectoscopie",
    "Urétéroscopie (R. WOLF)",
    "Urétéroscopie (KARL STORZ)",
    "Urétro-cystoscopie rigide",
    "Urétro-cystoscopie flexible",
    "Urétrotomie interne",
    "Hystéroscopie",
    "Urétéroscopie pédiatrique",
    "Urétro-cystoscopie pédiatrique",
    "Urétrotomie interne pédiatrique",
];

const EQUIPMENTS: &[&str] = &[
    "R. WOLF",
    "KARL STORZ",
    "Résectoscope bipolaire",
    "Lithotripteur",
    "Cystoscope flexible",
];

const DEFAULT_OPERATION_FEE: f64 = 50_000.0;
const DEFAULT_DURATION_MINUTES: u32 = 60;

fn status_class(status: Option<&str>) -> &'static str {
    match status {
        Some("programmée") => "bg-blue-100 text-blue-800",
        Some("en cours") => "bg-yellow-100 text-yellow-800",
        Some("terminée") => "bg-green-100 text-green-800",
        _ => "bg-red-100 text-red-800",
    }
}

fn same_label(values: &[&str]) -> Vec<(String, String)> {
    values.iter().map(|v| (v.to_string(), v.to_string())).collect()
}

#[component]
pub fn Operations() -> Element {
    let api = use_api();
    let mut filter = use_signal(ListFilter::default);

    let mut operations = use_resource(move || {
        let api = api.clone();
        async move { api.list::<Operation>("/operations/all").await }
    });

    let listing = operations.read().clone();

    rsx! {
        div { class: "mb-6 flex justify-between items-center",
            div {
                h2 { class: "text-2xl font-bold text-gray-900", "Opérations" }
                p { class: "text-gray-600", "Planning du bloc opératoire" }
            }
            RoleLink { to: Route::NewOperation {}, hide_refused: true, class: "btn btn-primary", "Programmer une opération" }
        }
        div { class: "bg-white rounded-xl shadow-sm border border-gray-200 p-4 mb-6 grid grid-cols-1 md:grid-cols-2 gap-4",
            TextField {
                label: "Rechercher",
                value: filter.read().search.clone(),
                placeholder: "Patient, numéro ou type",
                on_input: move |v: String| filter.write().search = v,
            }
            SelectField {
                label: "Statut",
                value: filter.read().status.clone(),
                options: options(OPERATION_STATUSES),
                on_change: move |v: String| filter.write().status = v,
            }
        }
        {match listing {
            None => rsx! { Loading {} },
            Some(Err(e)) => rsx! {
                ErrorAlert { message: e.user_message("Erreur chargement opérations"), on_dismiss: move |_| operations.restart() }
            },
            Some(Ok(list)) => {
                let shown = filter.read().apply(&list, chrono::Local::now());
                let count = shown.len();
                rsx! {
                    p { class: "text-sm text-gray-600 mb-2", "{count} opération(s)" }
                    div { class: "bg-white rounded-xl shadow-sm border border-gray-200 overflow-hidden",
                        table { class: "w-full",
                            thead { class: "bg-gray-50",
                                tr {
                                    th { class: "px-6 py-3 text-left", "N° Opération" }
                                    th { class: "px-6 py-3 text-left", "Patient" }
                                    th { class: "px-6 py-3 text-left", "Chirurgien" }
                                    th { class: "px-6 py-3 text-left", "Type" }
                                    th { class: "px-6 py-3 text-left", "Date prévue" }
                                    th { class: "px-6 py-3 text-left", "Montant" }
                                    th { class: "px-6 py-3 text-left", "Statut" }
                                }
                            }
                            tbody {
                                if shown.is_empty() {
                                    tr {
                                        td { class: "px-6 py-8 text-center text-gray-500", colspan: "7", "Aucune opération trouvée" }
                                    }
                                }
                                for operation in shown {
                                    tr { key: "{operation.id}", class: "border-t border-gray-100",
                                        td { class: "px-6 py-4 text-sm font-mono", {operation.operation_number.clone().unwrap_or_else(|| "-".to_string())} }
                                        td { class: "px-6 py-4 font-medium",
                                            {operation.patient.as_ref().map(|p| p.fullname.clone()).unwrap_or_default()}
                                        }
                                        td { class: "px-6 py-4 text-gray-600",
                                            {operation.surgeon.as_ref().map(|s| format!("Dr. {}", s.fullname)).unwrap_or_default()}
                                        }
                                        td { class: "px-6 py-4 text-gray-600", {operation.operation_type.clone().unwrap_or_default()} }
                                        td { class: "px-6 py-4 text-gray-600", {display_date(operation.scheduled_date.as_deref())} }
                                        td { class: "px-6 py-4",
                                            {format!("{} FC", format_amount(operation.total_amount.unwrap_or(0.0)))}
                                        }
                                        td { class: "px-6 py-4",
                                            span { class: format!("px-2 py-1 rounded-full text-xs {}", status_class(operation.status.as_deref())),
                                                {operation.status.clone().unwrap_or_default()}
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

#[derive(Clone, Debug, PartialEq)]
struct OperationChoices {
    patients: Vec<Patient>,
    surgeons: Vec<StaffMember>,
}

#[component]
pub fn NewOperation() -> Element {
    let api = use_api();
    let nav = navigator();
    let mut error = use_signal(|| None::<String>);
    let mut submitting = use_signal(|| false);
    let mut form = use_signal(|| NewOperationRequest {
        estimated_duration: DEFAULT_DURATION_MINUTES,
        total_amount: DEFAULT_OPERATION_FEE,
        paid_amount: DEFAULT_OPERATION_FEE,
        payment_method: "especes".into(),
        ..NewOperationRequest::default()
    });

    let load_api = api.clone();
    let choices = use_resource(move || {
        let api = load_api.clone();
        async move {
            let (patients, surgeons) = futures::try_join!(
                api.list::<Patient>("/patients"),
                api.list::<StaffMember>("/doctors"),
            )?;
            Ok::<_, ApiError>(OperationChoices { patients, surgeons })
        }
    });

    let on_submit = move |evt: FormEvent| {
        evt.prevent_default();
        let mut body = form();
        if body.patient.is_empty() || body.surgeon.is_empty() || body.operation_type.is_empty() {
            error.set(Some("Patient, chirurgien et type d'opération requis".into()));
            return;
        }
        match Billing::new(body.total_amount, body.discount_percentage).settle(body.paid_amount) {
            Ok(due) => body.paid_amount = due,
            Err(e) => {
                error.set(Some(e.to_string()));
                return;
            }
        }
        if let Err(message) = body.combine_schedule() {
            error.set(Some(message.into()));
            return;
        }
        let api = api.clone();
        submitting.set(true);
        spawn(async move {
            match api.post::<_, Value>("/operations", &body).await {
                Ok(_) => {
                    tracing::info!("operation scheduled");
                    nav.push(Route::Operations {});
                }
                Err(e) => {
                    error.set(Some(e.user_message("Erreur lors de la programmation")));
                    submitting.set(false);
                }
            }
        });
    };

    let state = choices.read().clone();
    let values = form();

    rsx! {
        div { class: "mb-6",
            RoleLink { to: Route::Operations {}, class: "text-sm text-blue-600", "← Retour aux opérations" }
            h2 { class: "text-2xl font-bold text-gray-900", "Programmer une opération" }
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
                let surgeons: Vec<(String, String)> = choices
                    .surgeons
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
                                label: "Chirurgien",
                                value: values.surgeon.clone(),
                                options: surgeons,
                                placeholder: "-- Choisir un chirurgien --",
                                required: true,
                                on_change: move |v: String| form.write().surgeon = v,
                            }
                            SelectField {
                                label: "Type d'opération",
                                value: values.operation_type.clone(),
                                options: same_label(OPERATION_TYPES),
                                placeholder: "-- Choisir le type --",
                                required: true,
                                on_change: move |v: String| form.write().operation_type = v,
                            }
                            SelectField {
                                label: "Équipement",
                                value: values.equipment.clone(),
                                options: same_label(EQUIPMENTS),
                                placeholder: "-- Choisir l'équipement --",
                                on_change: move |v: String| form.write().equipment = v,
                            }
                            TextField {
                                label: "Date prévue",
                                input_type: "date",
                                value: values.scheduled_date.clone(),
                                required: true,
                                on_input: move |v: String| form.write().scheduled_date = v,
                            }
                            TextField {
                                label: "Heure prévue",
                                input_type: "time",
                                value: values.scheduled_time.clone(),
                                required: true,
                                on_input: move |v: String| form.write().scheduled_time = v,
                            }
                            TextField {
                                label: "Durée estimée (minutes)",
                                input_type: "number",
                                value: values.estimated_duration.to_string(),
                                on_input: move |v: String| form.write().estimated_duration = parse_amount(&v).max(0.0) as u32,
                            }
                            TextField {
                                label: "Notes pré-opératoires",
                                value: values.pre_op_notes.clone(),
                                on_input: move |v: String| form.write().pre_op_notes = v,
                            }
                        }
                        BillingFields {
                            total: values.total_amount,
                            discount_percentage: values.discount_percentage,
                            paid: values.paid_amount,
                            on_total: move |total: f64| {
                                let mut draft = form.write();
                                draft.total_amount = total;
                                draft.paid_amount = Billing::new(total, draft.discount_percentage).final_amount();
                            },
                            on_discount: move |pct: f64| {
                                let mut draft = form.write();
                                draft.discount_percentage = pct;
                                draft.paid_amount = Billing::new(draft.total_amount, pct).final_amount();
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
                            RoleLink { to: Route::Operations {}, hide_refused: true, class: "btn", "Annuler" }
                            button { r#type: "submit", class: "btn btn-primary", disabled: submitting(),
                                if submitting() { "Programmation..." } else { "Programmer" }
                            }
                        }
                    }
                }
            }
        }}
    }
}
