//! Dashboard landing page, one overview per role.

use dioxus::prelude::*;

use super::not_found::UnderConstruction;
use crate::app::auth_context::{use_api, use_auth};
use crate::app::components::{ErrorAlert, Loading, RoleLink, StatCard};
use crate::app::Route;
use crate::auth::{ApiError, Role};
use crate::clinic::{display_date, Patient, StaffMember, Visit};

const LOAD_ERROR: &str = "Erreur lors du chargement du tableau de bord";

#[component]
pub fn DashboardHome() -> Element {
    let auth = use_auth();

    match auth.active_role() {
        Some(Role::Secretaire) => rsx! { SecretaireOverview {} },
        Some(Role::Medecin) => rsx! { UnderConstruction { title: "Dashboard Médecin" } },
        Some(Role::Laborantin) => rsx! { UnderConstruction { title: "Dashboard Laborantin" } },
        Some(Role::Comptable) => rsx! { UnderConstruction { title: "Dashboard Comptable" } },
        Some(Role::Admin) | None => rsx! { AdminOverview {} },
    }
}

#[derive(Clone, Debug, PartialEq)]
struct AdminCounts {
    users: usize,
    patients: usize,
}

#[component]
fn AdminOverview() -> Element {
    let api = use_api();
    let mut dismissed = use_signal(|| false);

    let counts = use_resource(move || {
        let api = api.clone();
        async move {
            let (users, patients) = futures::try_join!(
                api.list::<StaffMember>("/users"),
                api.list::<Patient>("/patients"),
            )?;
            Ok::<_, ApiError>(AdminCounts {
                users: users.len(),
                patients: patients.len(),
            })
        }
    });

    let result = counts.read().clone();
    match result {
        None => rsx! { Loading {} },
        Some(Err(e)) => rsx! {
            if !dismissed() {
                ErrorAlert { message: e.user_message(LOAD_ERROR), on_dismiss: move |_| dismissed.set(true) }
            }
        },
        Some(Ok(c)) => rsx! {
            div { class: "mb-6",
                h2 { class: "text-2xl font-bold text-gray-900", "Vue d'ensemble" }
            }
            div { class: "grid grid-cols-1 md:grid-cols-2 lg:grid-cols-4 gap-6",
                StatCard { title: "Utilisateurs", value: c.users.to_string(), link: Route::Users {} }
                StatCard { title: "Patients", value: c.patients.to_string(), tint: "bg-green-50" }
                StatCard { title: "Visites", value: "0", tint: "bg-purple-50" }
                StatCard { title: "Recettes", value: "0 FC", tint: "bg-yellow-50" }
            }
        },
    }
}

#[derive(Clone, Debug, PartialEq)]
struct SecretaireData {
    total_patients: usize,
    today: Vec<Visit>,
}

#[component]
fn SecretaireOverview() -> Element {
    let api = use_api();
    let mut dismissed = use_signal(|| false);

    let data = use_resource(move || {
        let api = api.clone();
        async move {
            let (patients, today) = futures::try_join!(
                api.list::<Patient>("/patients"),
                api.list::<Visit>("/visits/today/all"),
            )?;
            Ok::<_, ApiError>(SecretaireData {
                total_patients: patients.len(),
                today,
            })
        }
    });

    let result = data.read().clone();
    match result {
        None => rsx! { Loading {} },
        Some(Err(e)) => rsx! {
            if !dismissed() {
                ErrorAlert { message: e.user_message(LOAD_ERROR), on_dismiss: move |_| dismissed.set(true) }
            }
        },
        Some(Ok(d)) => {
            let today = chrono::Local::now().format("%d/%m/%Y").to_string();
            let visits_today = d.today.len().to_string();
            rsx! {
                div { class: "mb-6 flex justify-between items-center",
                    div {
                        h2 { class: "text-2xl font-bold text-gray-900", "Accueil secrétariat" }
                        p { class: "text-gray-600", "{today}" }
                    }
                    div { class: "flex gap-3",
                        RoleLink { to: Route::NewPatient {}, hide_refused: true, class: "btn btn-primary", "Nouveau patient" }
                        RoleLink { to: Route::NewVisit {}, hide_refused: true, class: "btn btn-secondary", "Nouvelle visite" }
                    }
                }
                div { class: "grid grid-cols-1 md:grid-cols-2 lg:grid-cols-4 gap-6 mb-8",
                    StatCard { title: "Patients Aujourd'hui", value: visits_today.clone(), link: Route::Visits {} }
                    StatCard { title: "Total Patients", value: d.total_patients.to_string(), tint: "bg-green-50", link: Route::Patients {} }
                    StatCard { title: "Visites du Jour", value: visits_today, tint: "bg-purple-50", link: Route::Visits {} }
                    StatCard { title: "Paiements en Attente", value: "0", tint: "bg-yellow-50", link: Route::Payments {} }
                }
                div { class: "bg-white rounded-xl shadow-sm border border-gray-200 p-6",
                    h3 { class: "text-lg font-semibold text-gray-900 mb-4", "Visites récentes" }
                    if d.today.is_empty() {
                        p { class: "text-gray-500", "Aucune visite aujourd'hui" }
                    }
                    ul { class: "divide-y divide-gray-100",
                        for visit in d.today.iter().take(5) {
                            li { key: "{visit.id}", class: "py-3 flex justify-between",
                                RoleLink {
                                    to: Route::VisitDetail { id: visit.id.clone() },
                                    class: "font-medium text-gray-900",
                                    {visit.patient.as_ref().map(|p| p.fullname.clone()).unwrap_or_default()}
                                }
                                span { class: "text-sm text-gray-500", {visit_caption(visit)} }
                            }
                        }
                    }
                }
            }
        }
    }
}

fn visit_caption(visit: &Visit) -> String {
    format!(
        "{} · {}",
        visit.visit_reason.as_deref().unwrap_or("-"),
        display_date(visit.visit_date.as_deref())
    )
}
