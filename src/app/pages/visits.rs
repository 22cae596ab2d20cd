//! Visits: daily list, detail and registration with payment.

use dioxus::prelude::*;
use serde_json::Value;

use crate::app::auth_context::use_api;
use crate::app::components::{
    options, BillingFields, ErrorAlert, Loading, RoleLink, SelectField, SuccessAlert,
    TextField, PAYMENT_METHODS,
};
use crate::app::Route;
use crate::auth::ApiError;
use crate::clinic::{
    display_date, format_amount, Billing, DateWindow, ListFilter, NewVisitRequest, Patient, Ref,
    Speciality, StaffMember, Visit, ANY_STATUS,
};

const VISIT_STATUSES: &[(&str, &str)] = &[
    (ANY_STATUS, "Tous les statuts"),
    ("en attente", "En attente"),
    ("en consultation", "En consultation"),
    ("terminé", "Terminé"),
    ("annulé", "Annulé"),
];

const VISIT_TYPES: &[(&str, &str)] = &[
    ("consultation", "Consultation"),
    ("urgence", "Urgence"),
    ("suivi", "Suivi"),
];

const PRIORITIES: &[(&str, &str)] = &[
    ("normal", "Normale"),
    ("urgent", "Urgent"),
    ("critique", "Critique"),
];

/// Consultation fee suggested for a new visit
const DEFAULT_VISIT_FEE: f64 = 7500.0;

fn status_class(status: Option<&str>) -> &'static str {
    match status {
        Some("en attente") => "bg-yellow-100 text-yellow-800",
        Some("en consultation") => "bg-blue-100 text-blue-800",
        Some("terminé") => "bg-green-100 text-green-800",
        _ => "bg-red-100 text-red-800",
    }
}

pub(crate) fn window_options() -> Vec<(String, String)> {
    DateWindow::ALL
        .iter()
        .map(|w| (w.as_str().to_string(), w.label().to_string()))
        .collect()
}

fn person_name(person: Option<&crate::clinic::PersonRef>) -> String {
    person.map(|p| p.fullname.clone()).unwrap_or_else(|| "-".to_string())
}

#[component]
pub fn Visits() -> Element {
    let api = use_api();
    let mut filter = use_signal(ListFilter::default);

    let mut visits = use_resource(move || {
        let api = api.clone();
        async move { api.list::<Visit>("/visits").await }
    });

    let listing = visits.read().clone();
    let window = filter.read().window.as_str().to_string();

    rsx! {
        div { class: "mb-6 flex justify-between items-center",
            div {
                h2 { class: "text-2xl font-bold text-gray-900", "Visites" }
                p { class: "text-gray-600", "Suivi des visites et consultations" }
            }
            RoleLink { to: Route::NewVisit {}, hide_refused: true, class: "btn btn-primary", "Nouvelle visite" }
        }
        div { class: "bg-white rounded-xl shadow-sm border border-gray-200 p-4 mb-6 grid grid-cols-1 md:grid-cols-3 gap-4",
            TextField {
                label: "Rechercher",
                value: filter.read().search.clone(),
                placeholder: "Patient, numéro ou motif",
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
                options: options(VISIT_STATUSES),
                on_change: move |v: String| filter.write().status = v,
            }
        }
        {match listing {
            None => rsx! { Loading {} },
            Some(Err(e)) => rsx! {
                ErrorAlert { message: e.user_message("Erreur chargement visites"), on_dismiss: move |_| visits.restart() }
            },
            Some(Ok(list)) => {
                let shown = filter.read().apply(&list, chrono::Local::now());
                let count = shown.len();
                rsx! {
                    p { class: "text-sm text-gray-600 mb-2", "{count} visite(s)" }
                    div { class: "bg-white rounded-xl shadow-sm border border-gray-200 overflow-hidden",
                        table { class: "w-full",
                            thead { class: "bg-gray-50",
                                tr {
                                    th { class: "px-6 py-3 text-left", "N° Visite" }
                                    th { class: "px-6 py-3 text-left", "Patient" }
                                    th { class: "px-6 py-3 text-left", "Médecin" }
                                    th { class: "px-6 py-3 text-left", "Motif" }
                                    th { class: "px-6 py-3 text-left", "Date" }
                                    th { class: "px-6 py-3 text-left", "Statut" }
                                }
                            }
                            tbody {
                                if shown.is_empty() {
                                    tr {
                                        td { class: "px-6 py-8 text-center text-gray-500", colspan: "6", "Aucune visite trouvée" }
                                    }
                                }
                                for visit in shown {
                                    tr { key: "{visit.id}", class: "border-t border-gray-100",
                                        td { class: "px-6 py-4 text-sm font-mono",
                                            RoleLink { to: Route::VisitDetail { id: visit.id.clone() }, class: "text-blue-600",
                                                {visit.visit_number.clone().unwrap_or_else(|| "-".to_string())}
                                            }
                                        }
                                        td { class: "px-6 py-4 font-medium", {person_name(visit.patient.as_ref())} }
                                        td { class: "px-6 py-4 text-gray-600", "Dr. " {person_name(visit.doctor.as_ref())} }
                                        td { class: "px-6 py-4 text-gray-600", {visit.visit_reason.clone().unwrap_or_default()} }
                                        td { class: "px-6 py-4 text-gray-600", {display_date(visit.visit_date.as_deref())} }
                                        td { class: "px-6 py-4",
                                            span { class: format!("px-2 py-1 rounded-full text-xs {}", status_class(visit.status.as_deref())),
                                                {visit.status.clone().unwrap_or_default()}
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
pub fn VisitDetail(id: String) -> Element {
    let api = use_api();

    let visit = use_resource(use_reactive!(|id| {
        let api = api.clone();
        async move { api.get_item::<Visit>(&format!("/visits/{id}")).await }
    }));

    let result = visit.read().clone();
    match result {
        None => rsx! { Loading {} },
        Some(Err(e)) => rsx! {
            div { class: "text-center py-12",
                p { class: "text-gray-600 mb-4", {e.user_message("Visite non trouvée")} }
                RoleLink { to: Route::Visits {}, class: "text-blue-600", "Retour aux visites" }
            }
        },
        Some(Ok(visit)) => {
            let payment = visit.payment.as_ref().and_then(Ref::populated).cloned();
            let speciality = visit
                .speciality
                .as_ref()
                .and_then(Ref::populated)
                .map(|s| s.name.clone());
            rsx! {
                div { class: "mb-6",
                    RoleLink { to: Route::Visits {}, class: "text-sm text-blue-600", "← Retour aux visites" }
                    h2 { class: "text-2xl font-bold text-gray-900",
                        "Visite "
                        {visit.visit_number.clone().unwrap_or_default()}
                    }
                    p { class: "text-gray-600", {display_date(visit.visit_date.as_deref())} }
                }
                div { class: "grid grid-cols-1 lg:grid-cols-3 gap-6",
                    div { class: "lg:col-span-2 bg-white rounded-xl shadow-sm border border-gray-200 p-6",
                        h3 { class: "text-lg font-semibold mb-4", "Détails" }
                        dl { class: "grid grid-cols-2 gap-4 text-sm",
                            dt { class: "text-gray-500", "Patient" }
                            dd {
                                {match visit.patient.clone() {
                                    Some(patient) => rsx! {
                                        RoleLink { to: Route::PatientDetail { id: patient.id.clone() }, class: "text-blue-600", "{patient.fullname}" }
                                    },
                                    None => rsx! { "-" },
                                }}
                            }
                            dt { class: "text-gray-500", "Médecin" }
                            dd { "Dr. " {person_name(visit.doctor.as_ref())} }
                            dt { class: "text-gray-500", "Spécialité" }
                            dd { {speciality.unwrap_or_else(|| "-".to_string())} }
                            dt { class: "text-gray-500", "Motif" }
                            dd { {visit.visit_reason.clone().unwrap_or_default()} }
                            dt { class: "text-gray-500", "Type" }
                            dd { class: "capitalize", {visit.visit_type.clone().unwrap_or_default()} }
                            dt { class: "text-gray-500", "Priorité" }
                            dd { class: "capitalize", {visit.priority.clone().unwrap_or_default()} }
                            dt { class: "text-gray-500", "Statut" }
                            dd {
                                span { class: format!("px-2 py-1 rounded-full text-xs {}", status_class(visit.status.as_deref())),
                                    {visit.status.clone().unwrap_or_default()}
                                }
                            }
                        }
                    }
                    div { class: "bg-white rounded-xl shadow-sm border border-gray-200 p-6",
                        h3 { class: "text-lg font-semibold mb-4", "Paiement" }
                        {match payment {
                            Some(payment) => rsx! {
                                PaymentSummary { payment: payment }
                            },
                            None => rsx! { p { class: "text-gray-500 text-sm", "Aucun paiement associé" } },
                        }}
                    }
                }
            }
        }
    }
}

/// Amount breakdown of a payment attached to a visit or analysis
#[component]
pub(crate) fn PaymentSummary(payment: crate::clinic::Payment) -> Element {
    let total = format_amount(payment.total_amount.unwrap_or(0.0));
    let discount = format_amount(payment.discount_amount.unwrap_or(0.0));
    let final_amount = format_amount(payment.final_amount.unwrap_or(0.0));
    let has_discount = payment.discount_amount.unwrap_or(0.0) > 0.0;

    rsx! {
        dl { class: "space-y-2 text-sm",
            if let Some(number) = payment.payment_number.clone() {
                div { class: "flex justify-between",
                    dt { class: "text-gray-500", "N° Paiement" }
                    dd { class: "font-mono", "{number}" }
                }
            }
            div { class: "flex justify-between",
                dt { class: "text-gray-500", "Montant total" }
                dd { "{total} FC" }
            }
            if has_discount {
                div { class: "flex justify-between text-green-700",
                    dt {
                        "Réduction ("
                        {payment.discount_percentage.unwrap_or(0.0).to_string()}
                        "%)"
                    }
                    dd { "-{discount} FC" }
                }
            }
            div { class: "flex justify-between font-semibold",
                dt { "Montant final" }
                dd { "{final_amount} FC" }
            }
            div { class: "flex justify-between",
                dt { class: "text-gray-500", "Statut" }
                dd { {payment.status.clone().unwrap_or_default()} }
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
struct VisitChoices {
    patients: Vec<Patient>,
    specialities: Vec<Speciality>,
    doctors: Vec<StaffMember>,
}

#[component]
pub fn NewVisit() -> Element {
    let api = use_api();
    let nav = navigator();
    let mut error = use_signal(|| None::<String>);
    let mut notice = use_signal(|| None::<String>);
    let mut submitting = use_signal(|| false);
    let mut form = use_signal(|| NewVisitRequest {
        visit_type: "consultation".into(),
        priority: "normal".into(),
        total_amount: DEFAULT_VISIT_FEE,
        paid_amount: DEFAULT_VISIT_FEE,
        payment_method: "especes".into(),
        ..NewVisitRequest::default()
    });

    let load_api = api.clone();
    let choices = use_resource(move || {
        let api = load_api.clone();
        async move {
            let (patients, specialities, doctors) = futures::try_join!(
                api.list::<Patient>("/patients"),
                api.list::<Speciality>("/specialities"),
                api.list::<StaffMember>("/doctors"),
            )?;
            Ok::<_, ApiError>(VisitChoices {
                patients,
                specialities,
                doctors,
            })
        }
    });

    let on_submit = move |evt: FormEvent| {
        evt.prevent_default();
        let mut body = form();
        if body.patient.is_empty() || body.doctor.is_empty() || body.visit_reason.trim().is_empty() {
            error.set(Some("Patient, médecin et motif requis".into()));
            return;
        }
        match Billing::new(body.total_amount, body.discount_percentage).settle(body.paid_amount) {
            Ok(due) => body.paid_amount = due,
            Err(e) => {
                error.set(Some(e.to_string()));
                return;
            }
        }
        let api = api.clone();
        submitting.set(true);
        spawn(async move {
            match api.post::<_, Value>("/visit", &body).await {
                Ok(_) => {
                    notice.set(Some("Visite créée avec succès !".into()));
                    nav.push(Route::Visits {});
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

    rsx! {
        div { class: "mb-6",
            RoleLink { to: Route::Visits {}, class: "text-sm text-blue-600", "← Retour aux visites" }
            h2 { class: "text-2xl font-bold text-gray-900", "Nouvelle visite" }
        }
        if let Some(message) = error() {
            ErrorAlert { message: message, on_dismiss: move |_| error.set(None) }
        }
        if let Some(message) = notice() {
            SuccessAlert { message: message }
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
                let specialities: Vec<(String, String)> = choices
                    .specialities
                    .iter()
                    .filter(|s| s.is_active)
                    .map(|s| (s.id.clone(), s.name.clone()))
                    .collect();
                let doctors: Vec<(String, String)> = choices
                    .doctors
                    .iter()
                    .filter(|d| values.speciality.is_empty() || d.has_speciality(&values.speciality))
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
                                label: "Spécialité",
                                value: values.speciality.clone(),
                                options: specialities,
                                placeholder: "-- Choisir une spécialité --",
                                required: true,
                                on_change: move |v: String| {
                                    let mut draft = form.write();
                                    draft.speciality = v;
                                    draft.doctor.clear();
                                },
                            }
                            SelectField {
                                label: "Médecin",
                                value: values.doctor.clone(),
                                options: doctors,
                                placeholder: "-- Choisir un médecin --",
                                required: true,
                                on_change: move |v: String| form.write().doctor = v,
                            }
                            SelectField {
                                label: "Type de visite",
                                value: values.visit_type.clone(),
                                options: options(VISIT_TYPES),
                                on_change: move |v: String| form.write().visit_type = v,
                            }
                            SelectField {
                                label: "Priorité",
                                value: values.priority.clone(),
                                options: options(PRIORITIES),
                                on_change: move |v: String| form.write().priority = v,
                            }
                            TextField {
                                label: "Motif de la visite",
                                value: values.visit_reason.clone(),
                                required: true,
                                on_input: move |v: String| form.write().visit_reason = v,
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
                            RoleLink { to: Route::Visits {}, hide_refused: true, class: "btn", "Annuler" }
                            button { r#type: "submit", class: "btn btn-primary", disabled: submitting(),
                                if submitting() { "Création..." } else { "Créer la visite" }
                            }
                        }
                    }
                }
            }
        }}
    }
}

pub(crate) fn patient_option(patient: &Patient) -> String {
    match patient.patient_number.as_deref() {
        Some(number) => format!("{} ({number})", patient.fullname),
        None => patient.fullname.clone(),
    }
}
