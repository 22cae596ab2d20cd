//! Patient register: list, dossier and the create/edit forms.

use dioxus::prelude::*;
use serde_json::Value;

use crate::app::auth_context::use_api;
use crate::app::components::{
    options, ErrorAlert, Loading, RoleLink, SelectField, TextField,
};
use crate::app::Route;
use crate::clinic::{
    age_from_iso, display_date, ListFilter, Patient, PatientDossier, PatientForm, ANY_STATUS,
};

const PATIENT_STATUSES: &[(&str, &str)] = &[
    (ANY_STATUS, "Tous les statuts"),
    ("actif", "Actif"),
    ("inactif", "Inactif"),
    ("décédé", "Décédé"),
];

const GENDERS: &[(&str, &str)] = &[("M", "Masculin"), ("F", "Féminin")];

const BLOOD_GROUPS: &[(&str, &str)] = &[
    ("inconnu", "Inconnu"),
    ("A+", "A+"),
    ("A-", "A-"),
    ("B+", "B+"),
    ("B-", "B-"),
    ("AB+", "AB+"),
    ("AB-", "AB-"),
    ("O+", "O+"),
    ("O-", "O-"),
];

const ORIGINS: &[(&str, &str)] = &[("local", "Local"), ("diaspora", "Diaspora")];

fn status_class(status: Option<&str>) -> &'static str {
    match status {
        Some("actif") => "bg-green-100 text-green-800",
        Some("décédé") => "bg-gray-200 text-gray-800",
        _ => "bg-red-100 text-red-800",
    }
}

fn age_label(patient: &Patient) -> String {
    patient
        .date_of_birth
        .as_deref()
        .and_then(age_from_iso)
        .map(|age| format!("{age} ans"))
        .unwrap_or_else(|| "-".to_string())
}

#[component]
pub fn Patients() -> Element {
    let api = use_api();
    let mut filter = use_signal(ListFilter::default);

    let mut patients = use_resource(move || {
        let api = api.clone();
        async move { api.list::<Patient>("/patients").await }
    });

    let listing = patients.read().clone();

    rsx! {
        div { class: "mb-6 flex justify-between items-center",
            div {
                h2 { class: "text-2xl font-bold text-gray-900", "Patients" }
                p { class: "text-gray-600", "Registre des patients de la clinique" }
            }
            RoleLink { to: Route::NewPatient {}, hide_refused: true, class: "btn btn-primary", "Nouveau patient" }
        }
        div { class: "bg-white rounded-xl shadow-sm border border-gray-200 p-4 mb-6 grid grid-cols-1 md:grid-cols-2 gap-4",
            TextField {
                label: "Rechercher",
                value: filter.read().search.clone(),
                placeholder: "Nom, numéro ou téléphone",
                on_input: move |v: String| filter.write().search = v,
            }
            SelectField {
                label: "Statut",
                value: filter.read().status.clone(),
                options: options(PATIENT_STATUSES),
                on_change: move |v: String| filter.write().status = v,
            }
        }
        {match listing {
            None => rsx! { Loading {} },
            Some(Err(e)) => rsx! {
                ErrorAlert { message: e.user_message("Erreur chargement patients"), on_dismiss: move |_| patients.restart() }
            },
            Some(Ok(list)) => {
                let shown = filter.read().apply(&list, chrono::Local::now());
                let count = shown.len();
                rsx! {
                    p { class: "text-sm text-gray-600 mb-2", "{count} patient(s)" }
                    div { class: "bg-white rounded-xl shadow-sm border border-gray-200 overflow-hidden",
                        table { class: "w-full",
                            thead { class: "bg-gray-50",
                                tr {
                                    th { class: "px-6 py-3 text-left", "N° Patient" }
                                    th { class: "px-6 py-3 text-left", "Nom" }
                                    th { class: "px-6 py-3 text-left", "Âge" }
                                    th { class: "px-6 py-3 text-left", "Téléphone" }
                                    th { class: "px-6 py-3 text-left", "Statut" }
                                    th { class: "px-6 py-3 text-left", "Actions" }
                                }
                            }
                            tbody {
                                if shown.is_empty() {
                                    tr {
                                        td { class: "px-6 py-8 text-center text-gray-500", colspan: "6", "Aucun patient trouvé" }
                                    }
                                }
                                for patient in shown {
                                    tr { key: "{patient.id}", class: "border-t border-gray-100",
                                        td { class: "px-6 py-4 text-sm font-mono", {patient.patient_number.clone().unwrap_or_default()} }
                                        td { class: "px-6 py-4 font-medium", "{patient.fullname}" }
                                        td { class: "px-6 py-4 text-gray-600", {age_label(&patient)} }
                                        td { class: "px-6 py-4 text-gray-600", {patient.phone.clone().unwrap_or_default()} }
                                        td { class: "px-6 py-4",
                                            span { class: format!("px-2 py-1 rounded-full text-xs {}", status_class(patient.status.as_deref())),
                                                {patient.status.clone().unwrap_or_default()}
                                            }
                                        }
                                        td { class: "px-6 py-4 flex gap-3",
                                            RoleLink { to: Route::PatientDetail { id: patient.id.clone() }, class: "text-blue-600", "Voir" }
                                            RoleLink { to: Route::EditPatient { id: patient.id.clone() }, class: "text-gray-600", "Modifier" }
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
pub fn PatientDetail(id: String) -> Element {
    let api = use_api();

    let dossier = use_resource(use_reactive!(|id| {
        let api = api.clone();
        async move { api.get::<PatientDossier>(&format!("/patients/{id}")).await }
    }));

    let result = dossier.read().clone();
    match result {
        None => rsx! { Loading {} },
        Some(Err(e)) => rsx! {
            div { class: "text-center py-12",
                p { class: "text-gray-600 mb-4", {e.user_message("Patient non trouvé")} }
                RoleLink { to: Route::Patients {}, class: "text-blue-600", "Retour à la liste" }
            }
        },
        Some(Ok(PatientDossier { patient, medical_record })) => rsx! {
            div { class: "mb-6 flex justify-between items-center",
                div {
                    RoleLink { to: Route::Patients {}, class: "text-sm text-blue-600", "← Retour aux patients" }
                    h2 { class: "text-2xl font-bold text-gray-900", "{patient.fullname}" }
                    p { class: "text-gray-600", {patient.patient_number.clone().unwrap_or_default()} }
                }
                div { class: "flex gap-3",
                    RoleLink { to: Route::NewVisit {}, hide_refused: true, class: "btn btn-primary", "Nouvelle visite" }
                    RoleLink { to: Route::EditPatient { id: patient.id.clone() }, hide_refused: true, class: "btn btn-secondary", "Modifier" }
                }
            }
            div { class: "grid grid-cols-1 lg:grid-cols-3 gap-6",
                div { class: "lg:col-span-2 space-y-6",
                    div { class: "bg-white rounded-xl shadow-sm border border-gray-200 p-6",
                        h3 { class: "text-lg font-semibold mb-4", "Informations personnelles" }
                        dl { class: "grid grid-cols-2 gap-4 text-sm",
                            Field { label: "Sexe", value: patient.gender.clone() }
                            Field { label: "Âge", value: Some(age_label(&patient)) }
                            Field { label: "Date de naissance", value: Some(display_date(patient.date_of_birth.as_deref())) }
                            Field { label: "Groupe sanguin", value: patient.blood_group.clone() }
                            Field { label: "Téléphone", value: patient.phone.clone() }
                            Field { label: "Email", value: patient.email.clone() }
                            Field { label: "Adresse", value: patient.address.clone() }
                            Field { label: "Ville", value: patient.city.clone() }
                            Field { label: "Nationalité", value: patient.nationality.clone() }
                            Field { label: "Origine", value: patient.origin.clone() }
                        }
                    }
                    div { class: "bg-white rounded-xl shadow-sm border border-gray-200 p-6",
                        h3 { class: "text-lg font-semibold mb-4", "Dossier médical" }
                        {match medical_record.as_ref() {
                            Some(record) if record.medical_history.is_some() || record.surgical_history.is_some() => rsx! {
                                if let Some(history) = record.medical_history.clone() {
                                    p { class: "text-sm mb-2", span { class: "font-medium", "Antécédents médicaux: " } "{history}" }
                                }
                                if let Some(history) = record.surgical_history.clone() {
                                    p { class: "text-sm", span { class: "font-medium", "Antécédents chirurgicaux: " } "{history}" }
                                }
                            },
                            _ => rsx! { p { class: "text-gray-500 text-sm", "Aucun antécédent enregistré" } },
                        }}
                    }
                    div { class: "bg-white rounded-xl shadow-sm border border-gray-200 p-6",
                        h3 { class: "text-lg font-semibold mb-4", "Visites récentes" }
                        {
                            let visits: Vec<_> = medical_record
                                .as_ref()
                                .map(|r| r.visits().take(5).cloned().collect())
                                .unwrap_or_default();
                            rsx! {
                                if visits.is_empty() {
                                    p { class: "text-gray-500 text-sm", "Aucune visite" }
                                }
                                ul { class: "divide-y divide-gray-100",
                                    for visit in visits {
                                        li { key: "{visit.id}", class: "py-3 flex justify-between",
                                            RoleLink { to: Route::VisitDetail { id: visit.id.clone() }, class: "text-blue-600",
                                                {visit.visit_reason.clone().unwrap_or_else(|| "Visite".to_string())}
                                            }
                                            span { class: "text-sm text-gray-500", {display_date(visit.visit_date.as_deref())} }
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
                div { class: "space-y-6",
                    div { class: "bg-white rounded-xl shadow-sm border border-gray-200 p-6",
                        h3 { class: "text-lg font-semibold mb-4", "Contact d'urgence" }
                        {match patient.emergency_contact.clone().filter(|c| !c.fullname.is_empty()) {
                            Some(contact) => rsx! {
                                p { class: "font-medium", "{contact.fullname}" }
                                p { class: "text-sm text-gray-600", "{contact.relationship}" }
                                p { class: "text-sm text-gray-600", "{contact.phone}" }
                            },
                            None => rsx! { p { class: "text-gray-500 text-sm", "Non renseigné" } },
                        }}
                    }
                    div { class: "bg-white rounded-xl shadow-sm border border-gray-200 p-6 flex flex-col gap-3",
                        h3 { class: "text-lg font-semibold", "Actions rapides" }
                        RoleLink { to: Route::NewVisit {}, hide_refused: true, class: "text-blue-600", "Créer une visite" }
                        RoleLink { to: Route::NewAnalysis {}, hide_refused: true, class: "text-blue-600", "Prescrire une analyse" }
                    }
                }
            }
        },
    }
}

#[component]
fn Field(label: &'static str, value: Option<String>) -> Element {
    let shown = value.filter(|v| !v.is_empty()).unwrap_or_else(|| "-".to_string());
    rsx! {
        div {
            dt { class: "text-gray-500", "{label}" }
            dd { class: "font-medium text-gray-900", "{shown}" }
        }
    }
}

#[component]
pub fn NewPatient() -> Element {
    let api = use_api();
    let nav = navigator();
    let mut error = use_signal(|| None::<String>);
    let mut submitting = use_signal(|| false);
    let form = use_signal(|| PatientForm {
        blood_group: "inconnu".into(),
        origin: "local".into(),
        ..PatientForm::default()
    });

    let on_submit = move |evt: FormEvent| {
        evt.prevent_default();
        let body = form();
        if let Some(missing) = body.missing_field() {
            error.set(Some(missing.into()));
            return;
        }
        let api = api.clone();
        submitting.set(true);
        spawn(async move {
            match api.post::<_, Value>("/patient", &body).await {
                Ok(created) => {
                    tracing::info!("patient created");
                    match created["patient"]["_id"].as_str() {
                        Some(id) => nav.push(Route::PatientDetail { id: id.to_string() }),
                        None => nav.push(Route::Patients {}),
                    };
                }
                Err(e) => {
                    error.set(Some(e.user_message("Erreur lors de la création")));
                    submitting.set(false);
                }
            }
        });
    };

    rsx! {
        div { class: "mb-6",
            RoleLink { to: Route::Patients {}, class: "text-sm text-blue-600", "← Retour aux patients" }
            h2 { class: "text-2xl font-bold text-gray-900", "Nouveau patient" }
        }
        if let Some(message) = error() {
            ErrorAlert { message: message, on_dismiss: move |_| error.set(None) }
        }
        PatientFormFields { form: form, submitting: submitting(), on_submit: on_submit, submit_label: "Enregistrer le patient" }
    }
}

#[component]
pub fn EditPatient(id: String) -> Element {
    let api = use_api();
    let nav = navigator();
    let mut error = use_signal(|| None::<String>);
    let mut submitting = use_signal(|| false);
    let mut form = use_signal(PatientForm::default);
    let submit_id = id.clone();
    let back_id = id.clone();

    let load_api = api.clone();
    let loaded = use_resource(use_reactive!(|id| {
        let api = load_api.clone();
        async move {
            let dossier = api.get::<PatientDossier>(&format!("/patients/{id}")).await?;
            form.set(PatientForm::from_patient(&dossier.patient));
            Ok::<_, crate::auth::ApiError>(())
        }
    }));

    let on_submit = move |evt: FormEvent| {
        evt.prevent_default();
        let body = form();
        if let Some(missing) = body.missing_field() {
            error.set(Some(missing.into()));
            return;
        }
        let api = api.clone();
        let id = submit_id.clone();
        submitting.set(true);
        spawn(async move {
            match api.put::<_, Value>(&format!("/patients/{id}"), &body).await {
                Ok(_) => {
                    nav.push(Route::PatientDetail { id });
                }
                Err(e) => {
                    error.set(Some(e.user_message("Erreur lors de la modification")));
                    submitting.set(false);
                }
            }
        });
    };

    let state = loaded.read().clone();
    rsx! {
        div { class: "mb-6",
            RoleLink { to: Route::PatientDetail { id: back_id }, class: "text-sm text-blue-600", "← Retour au dossier" }
            h2 { class: "text-2xl font-bold text-gray-900", "Modifier le patient" }
        }
        if let Some(message) = error() {
            ErrorAlert { message: message, on_dismiss: move |_| error.set(None) }
        }
        {match state {
            None => rsx! { Loading {} },
            Some(Err(e)) => rsx! {
                p { class: "text-gray-600", {e.user_message("Patient non trouvé")} }
            },
            Some(Ok(())) => rsx! {
                PatientFormFields { form: form, submitting: submitting(), on_submit: on_submit, submit_label: "Enregistrer les modifications" }
            },
        }}
    }
}

/// Shared body of the create and edit forms
#[component]
fn PatientFormFields(
    form: Signal<PatientForm>,
    submitting: bool,
    on_submit: EventHandler<FormEvent>,
    submit_label: &'static str,
) -> Element {
    let mut form = form;
    let values = form();

    rsx! {
        form { class: "space-y-6", onsubmit: move |evt| on_submit.call(evt),
            div { class: "bg-white rounded-xl shadow-sm border border-gray-200 p-6",
                h3 { class: "text-lg font-semibold mb-4", "Identité" }
                div { class: "grid grid-cols-1 md:grid-cols-2 gap-4",
                    TextField { label: "Nom complet", value: values.fullname.clone(), required: true, on_input: move |v: String| form.write().fullname = v }
                    SelectField {
                        label: "Sexe",
                        value: values.gender.clone(),
                        options: options(GENDERS),
                        placeholder: "-- Choisir --",
                        required: true,
                        on_change: move |v: String| form.write().gender = v,
                    }
                    TextField { label: "Date de naissance", input_type: "date", value: values.date_of_birth.clone(), on_input: move |v: String| form.write().date_of_birth = v }
                    SelectField {
                        label: "Groupe sanguin",
                        value: values.blood_group.clone(),
                        options: options(BLOOD_GROUPS),
                        on_change: move |v: String| form.write().blood_group = v,
                    }
                    TextField { label: "Nationalité", value: values.nationality.clone(), on_input: move |v: String| form.write().nationality = v }
                    SelectField {
                        label: "Origine",
                        value: values.origin.clone(),
                        options: options(ORIGINS),
                        on_change: move |v: String| form.write().origin = v,
                    }
                }
            }
            div { class: "bg-white rounded-xl shadow-sm border border-gray-200 p-6",
                h3 { class: "text-lg font-semibold mb-4", "Coordonnées" }
                div { class: "grid grid-cols-1 md:grid-cols-2 gap-4",
                    TextField { label: "Téléphone", input_type: "tel", value: values.phone.clone(), required: true, on_input: move |v: String| form.write().phone = v }
                    TextField { label: "Email", input_type: "email", value: values.email.clone(), on_input: move |v: String| form.write().email = v }
                    TextField { label: "Adresse", value: values.address.clone(), on_input: move |v: String| form.write().address = v }
                    TextField { label: "Ville", value: values.city.clone(), on_input: move |v: String| form.write().city = v }
                }
            }
            div { class: "bg-white rounded-xl shadow-sm border border-gray-200 p-6",
                h3 { class: "text-lg font-semibold mb-4", "Contact d'urgence" }
                div { class: "grid grid-cols-1 md:grid-cols-3 gap-4",
                    TextField { label: "Nom", value: values.emergency_contact.fullname.clone(), on_input: move |v: String| form.write().emergency_contact.fullname = v }
                    TextField { label: "Téléphone", input_type: "tel", value: values.emergency_contact.phone.clone(), on_input: move |v: String| form.write().emergency_contact.phone = v }
                    TextField { label: "Lien de parenté", value: values.emergency_contact.relationship.clone(), on_input: move |v: String| form.write().emergency_contact.relationship = v }
                }
            }
            div { class: "flex justify-end gap-3",
                RoleLink { to: Route::Patients {}, hide_refused: true, class: "btn", "Annuler" }
                button { r#type: "submit", class: "btn btn-primary", disabled: submitting,
                    if submitting { "Enregistrement..." } else { "{submit_label}" }
                }
            }
        }
    }
}
