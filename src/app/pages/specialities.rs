//! Medical specialities (admin).

use dioxus::prelude::*;
use serde_json::Value;

use crate::app::auth_context::use_api;
use crate::app::components::{ErrorAlert, Loading, SuccessAlert, TextField};
use crate::clinic::{NewSpecialityRequest, Speciality};

#[component]
pub fn Specialities() -> Element {
    let api = use_api();
    let mut error = use_signal(|| None::<String>);
    let mut notice = use_signal(|| None::<String>);
    // None: closed; Some(None): creating; Some(Some(id)): editing
    let mut editing = use_signal(|| None::<Option<String>>);
    let mut form = use_signal(NewSpecialityRequest::default);

    let fetch_api = api.clone();
    let mut specialities = use_resource(move || {
        let api = fetch_api.clone();
        async move { api.list::<Speciality>("/specialities").await }
    });

    let toggle_api = api.clone();
    let toggle_status = move |id: String| {
        let api = toggle_api.clone();
        spawn(async move {
            match api.put_empty::<Value>(&format!("/speciality/{id}/status")).await {
                Ok(_) => {
                    notice.set(Some("Statut modifié !".into()));
                    specialities.restart();
                }
                Err(e) => error.set(Some(e.user_message("Erreur lors de la modification du statut"))),
            }
        });
    };

    let submit_api = api.clone();
    let on_submit = move |evt: FormEvent| {
        evt.prevent_default();
        let Some(target) = editing() else { return };
        let body = form();
        if body.name.trim().is_empty() {
            error.set(Some("Le nom est requis".into()));
            return;
        }
        let api = submit_api.clone();
        spawn(async move {
            let result = match &target {
                Some(id) => api.patch::<_, Value>(&format!("/specialities/{id}"), &body).await,
                None => api.post::<_, Value>("/speciality", &body).await,
            };
            match result {
                Ok(_) => {
                    notice.set(Some(if target.is_some() {
                        "Spécialité modifiée avec succès !".into()
                    } else {
                        "Spécialité créée avec succès !".into()
                    }));
                    editing.set(None);
                    specialities.restart();
                }
                Err(e) => error.set(Some(e.user_message("Erreur lors de l'opération"))),
            }
        });
    };

    let listing = specialities.read().clone();

    rsx! {
        div { class: "mb-6 flex justify-between items-center",
            h2 { class: "text-2xl font-bold text-gray-900", "Spécialités" }
            button {
                class: "btn btn-primary",
                onclick: move |_| {
                    form.set(NewSpecialityRequest::default());
                    editing.set(Some(None));
                },
                "Nouvelle spécialité"
            }
        }
        if let Some(message) = error() {
            ErrorAlert { message: message, on_dismiss: move |_| error.set(None) }
        }
        if let Some(message) = notice() {
            SuccessAlert { message: message }
        }
        {match listing {
            None => rsx! { Loading {} },
            Some(Err(e)) => rsx! {
                ErrorAlert { message: e.user_message("Erreur chargement spécialités"), on_dismiss: move |_| specialities.restart() }
            },
            Some(Ok(list)) => rsx! {
                div { class: "grid grid-cols-1 md:grid-cols-2 lg:grid-cols-3 gap-6",
                    if list.is_empty() {
                        p { class: "text-gray-500", "Aucune spécialité" }
                    }
                    for speciality in list {
                        div { key: "{speciality.id}", class: "bg-white rounded-xl shadow-sm border border-gray-200 p-6",
                            div { class: "flex justify-between items-start mb-2",
                                h3 { class: "text-lg font-semibold text-gray-900", "{speciality.name}" }
                                if speciality.is_active {
                                    span { class: "text-xs text-green-600", "Active" }
                                } else {
                                    span { class: "text-xs text-red-600", "Inactive" }
                                }
                            }
                            p { class: "text-gray-600 text-sm mb-4",
                                {speciality.description.clone().unwrap_or_default()}
                            }
                            div { class: "flex gap-3",
                                button {
                                    class: "text-blue-600 text-sm",
                                    onclick: {
                                        let speciality = speciality.clone();
                                        move |_| {
                                            form.set(NewSpecialityRequest {
                                                name: speciality.name.clone(),
                                                description: speciality.description.clone().unwrap_or_default(),
                                            });
                                            editing.set(Some(Some(speciality.id.clone())));
                                        }
                                    },
                                    "Modifier"
                                }
                                button {
                                    class: "text-gray-600 text-sm",
                                    onclick: {
                                        let id = speciality.id.clone();
                                        let toggle_status = toggle_status.clone();
                                        move |_| toggle_status(id.clone())
                                    },
                                    if speciality.is_active { "Désactiver" } else { "Activer" }
                                }
                            }
                        }
                    }
                }
            },
        }}
        if let Some(target) = editing() {
            div { class: "fixed inset-0 bg-black/50 flex items-center justify-center z-50 p-4",
                form { class: "bg-white rounded-xl max-w-lg w-full p-6 space-y-4", onsubmit: on_submit,
                    h3 { class: "text-lg font-semibold",
                        if target.is_some() { "Modifier la spécialité" } else { "Nouvelle spécialité" }
                    }
                    TextField { label: "Nom", value: form.read().name.clone(), required: true, on_input: move |v: String| form.write().name = v }
                    TextField { label: "Description", value: form.read().description.clone(), on_input: move |v: String| form.write().description = v }
                    div { class: "flex justify-end gap-3",
                        button { r#type: "button", class: "btn", onclick: move |_| editing.set(None), "Annuler" }
                        button { r#type: "submit", class: "btn btn-primary", "Enregistrer" }
                    }
                }
            }
        }
    }
}
