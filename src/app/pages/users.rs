//! Staff accounts (admin).

use dioxus::prelude::*;
use serde_json::Value;

use crate::app::auth_context::use_api;
use crate::app::components::{ErrorAlert, Loading, SuccessAlert, TextField};
use crate::auth::Role;
use crate::clinic::{Speciality, StaffForm, StaffMember};

#[component]
pub fn Users() -> Element {
    let api = use_api();
    let mut error = use_signal(|| None::<String>);
    let mut notice = use_signal(|| None::<String>);
    // None: closed; Some(None): creating; Some(Some(id)): editing
    let mut editing = use_signal(|| None::<Option<String>>);
    let mut form = use_signal(StaffForm::default);

    let fetch_api = api.clone();
    let mut users = use_resource(move || {
        let api = fetch_api.clone();
        async move { api.list::<StaffMember>("/users").await }
    });
    let spec_api = api.clone();
    let specialities = use_resource(move || {
        let api = spec_api.clone();
        async move { api.list::<Speciality>("/specialities").await.unwrap_or_default() }
    });

    let toggle_api = api.clone();
    let toggle_status = move |id: String| {
        let api = toggle_api.clone();
        spawn(async move {
            match api.put_empty::<Value>(&format!("/users/{id}/status")).await {
                Ok(_) => {
                    notice.set(Some("Statut modifié !".into()));
                    users.restart();
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
        if let Some(missing) = body.missing_field(target.is_none()) {
            error.set(Some(missing.into()));
            return;
        }
        let api = submit_api.clone();
        spawn(async move {
            let result = match &target {
                Some(id) => api.patch::<_, Value>(&format!("/users/{id}/role"), &body).await,
                None => api.post::<_, Value>("/register", &body).await,
            };
            match result {
                Ok(_) => {
                    notice.set(Some(if target.is_some() {
                        "Utilisateur modifié avec succès !".into()
                    } else {
                        "Utilisateur créé avec succès !".into()
                    }));
                    editing.set(None);
                    users.restart();
                }
                Err(e) => error.set(Some(e.user_message("Erreur lors de l'opération"))),
            }
        });
    };

    let listing = users.read().clone();
    let all_specialities = specialities.read().clone().unwrap_or_default();

    rsx! {
        div { class: "mb-6 flex justify-between items-center",
            div {
                h2 { class: "text-2xl font-bold text-gray-900", "Utilisateurs" }
                p { class: "text-gray-600", "Gérer le personnel et leurs rôles" }
            }
            button {
                class: "btn btn-primary",
                onclick: move |_| {
                    form.set(StaffForm::default());
                    editing.set(Some(None));
                },
                "Nouvel utilisateur"
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
                ErrorAlert { message: e.user_message("Erreur chargement utilisateurs"), on_dismiss: move |_| users.restart() }
            },
            Some(Ok(list)) => rsx! {
                div { class: "bg-white rounded-xl shadow-sm border border-gray-200 overflow-hidden",
                    table { class: "w-full",
                        thead { class: "bg-gray-50",
                            tr {
                                th { class: "px-6 py-3 text-left", "Nom" }
                                th { class: "px-6 py-3 text-left", "Email" }
                                th { class: "px-6 py-3 text-left", "Rôles" }
                                th { class: "px-6 py-3 text-left", "Statut" }
                                th { class: "px-6 py-3 text-left", "Actions" }
                            }
                        }
                        tbody {
                            for member in list {
                                tr { key: "{member.id}", class: "border-t border-gray-100",
                                    td { class: "px-6 py-4 font-medium", "{member.fullname}" }
                                    td { class: "px-6 py-4 text-gray-600", "{member.email}" }
                                    td { class: "px-6 py-4 text-sm", {role_labels(&member)} }
                                    td { class: "px-6 py-4",
                                        if member.is_active {
                                            span { class: "text-green-600", "Actif" }
                                        } else {
                                            span { class: "text-red-600", "Inactif" }
                                        }
                                    }
                                    td { class: "px-6 py-4 flex gap-3",
                                        button {
                                            class: "text-blue-600",
                                            onclick: {
                                                let member = member.clone();
                                                move |_| {
                                                    form.set(StaffForm::from_member(&member));
                                                    editing.set(Some(Some(member.id.clone())));
                                                }
                                            },
                                            "Modifier"
                                        }
                                        button {
                                            class: "text-gray-600",
                                            onclick: {
                                                let id = member.id.clone();
                                                let toggle_status = toggle_status.clone();
                                                move |_| toggle_status(id.clone())
                                            },
                                            if member.is_active { "Désactiver" } else { "Activer" }
                                        }
                                    }
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
                        if target.is_some() { "Modifier l'utilisateur" } else { "Nouvel utilisateur" }
                    }
                    TextField { label: "Nom complet", value: form.read().fullname.clone(), required: true, on_input: move |v: String| form.write().fullname = v }
                    TextField { label: "Email", input_type: "email", value: form.read().email.clone(), required: true, on_input: move |v: String| form.write().email = v }
                    TextField { label: "Téléphone", value: form.read().phone.clone(), on_input: move |v: String| form.write().phone = v }
                    if target.is_none() {
                        TextField { label: "Mot de passe", input_type: "password", value: form.read().password.clone(), required: true, on_input: move |v: String| form.write().password = v }
                    }
                    fieldset {
                        legend { class: "text-sm font-medium text-gray-700 mb-2", "Rôles" }
                        for role in Role::ALL {
                            label { key: "{role}", class: "mr-4 inline-flex items-center gap-1",
                                input {
                                    r#type: "checkbox",
                                    checked: form.read().role.contains(&role),
                                    onchange: move |_| form.write().toggle_role(role),
                                }
                                "{role.label()}"
                            }
                        }
                    }
                    if form.read().role.contains(&Role::Medecin) {
                        fieldset {
                            legend { class: "text-sm font-medium text-gray-700 mb-2", "Spécialités" }
                            for speciality in all_specialities.iter().filter(|s| s.is_active).cloned() {
                                label { key: "{speciality.id}", class: "mr-4 inline-flex items-center gap-1",
                                    input {
                                        r#type: "checkbox",
                                        checked: form.read().speciality.contains(&speciality.id),
                                        onchange: {
                                            let id = speciality.id.clone();
                                            move |_| form.write().toggle_speciality(&id)
                                        },
                                    }
                                    "{speciality.name}"
                                }
                            }
                        }
                    }
                    div { class: "flex justify-end gap-3",
                        button { r#type: "button", class: "btn", onclick: move |_| editing.set(None), "Annuler" }
                        button { r#type: "submit", class: "btn btn-primary", "Enregistrer" }
                    }
                }
            }
        }
    }
}

fn role_labels(member: &StaffMember) -> String {
    member
        .role
        .iter()
        .map(|r| Role::parse(r).map(|role| role.label()).unwrap_or(r.as_str()))
        .collect::<Vec<_>>()
        .join(", ")
}
