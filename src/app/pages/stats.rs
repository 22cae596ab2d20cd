//! Clinic-wide statistics (admin).

use dioxus::prelude::*;

use crate::app::auth_context::use_api;
use crate::app::components::{ErrorAlert, Loading, StatCard};
use crate::auth::ApiError;
use crate::clinic::{plural_label, ClinicStats, Patient, StaffMember, Visit};

#[component]
pub fn Stats() -> Element {
    let api = use_api();

    let mut stats = use_resource(move || {
        let api = api.clone();
        async move {
            let (users, patients, visits) = futures::try_join!(
                api.list::<StaffMember>("/users"),
                api.list::<Patient>("/patients"),
                api.list::<Visit>("/visits"),
            )?;
            Ok::<_, ApiError>(ClinicStats::compute(&users, &patients, &visits))
        }
    });

    let result = stats.read().clone();
    let body = match result {
        None => rsx! { Loading {} },
        Some(Err(e)) => rsx! {
            ErrorAlert { message: e.user_message("Erreur chargement stats"), on_dismiss: move |_| stats.restart() }
        },
        Some(Ok(s)) => rsx! {
            section { class: "bg-white rounded-xl shadow-sm border border-gray-200 p-6 mb-6",
                h3 { class: "text-lg font-semibold text-gray-900 mb-4", "Utilisateurs & Personnel" }
                div { class: "grid grid-cols-2 md:grid-cols-3 lg:grid-cols-6 gap-4",
                    div { class: "text-center p-4 bg-blue-50 rounded-lg",
                        p { class: "text-3xl font-bold text-blue-600", "{s.users}" }
                        p { class: "text-sm text-gray-600 mt-1", "Total" }
                    }
                    for (role, count) in s.users_by_role.iter().copied() {
                        div { key: "{role}", class: "text-center p-4 bg-gray-50 rounded-lg",
                            p { class: "text-2xl font-bold text-gray-900", "{count}" }
                            p { class: "text-xs text-gray-600 mt-1", "{plural_label(role)}" }
                        }
                    }
                }
            }
            div { class: "grid grid-cols-1 md:grid-cols-3 gap-6",
                StatCard { title: "Patients", value: s.patients.to_string(), tint: "bg-green-50" }
                StatCard { title: "Patients actifs", value: s.active_patients.to_string(), tint: "bg-green-50" }
                StatCard { title: "Visites", value: s.visits.to_string(), tint: "bg-purple-50" }
            }
        },
    };

    rsx! {
        div { class: "mb-6",
            h2 { class: "text-2xl font-bold text-gray-900 mb-2", "Statistiques Détaillées" }
            p { class: "text-gray-600", "Vue complète de l'activité de la clinique" }
        }
        {body}
    }
}
