//! Profile and password settings, available to every role.

use dioxus::prelude::*;
use serde_json::Value;

use crate::app::auth_context::{use_api, use_auth};
use crate::app::components::{ErrorAlert, SuccessAlert, TextField};
use crate::clinic::{PasswordChange, ProfileUpdate};

#[component]
pub fn Settings() -> Element {
    let auth = use_auth();
    let api = use_api();
    let mut saving = use_signal(|| false);
    let mut error = use_signal(|| None::<String>);
    let mut notice = use_signal(|| None::<String>);

    let mut profile = use_signal(move || {
        auth.user()
            .map(|u| ProfileUpdate {
                fullname: u.fullname,
                email: u.email,
                phone: u.phone.unwrap_or_default(),
            })
            .unwrap_or_default()
    });
    let mut current_password = use_signal(String::new);
    let mut new_password = use_signal(String::new);
    let mut confirm_password = use_signal(String::new);

    let profile_api = api.clone();
    let on_profile = move |evt: FormEvent| {
        evt.prevent_default();
        let api = profile_api.clone();
        let body = profile();
        saving.set(true);
        error.set(None);
        notice.set(None);
        spawn(async move {
            match api.put::<_, Value>("/users/profile", &body).await {
                Ok(_) => {
                    notice.set(Some("Profil mis à jour avec succès !".into()));
                    if let Err(e) = auth.refresh_profile().await {
                        tracing::warn!("Profile refresh after update failed: {}", e);
                    }
                }
                Err(e) => error.set(Some(e.user_message("Erreur lors de la mise à jour"))),
            }
            saving.set(false);
        });
    };

    let password_api = api.clone();
    let on_password = move |evt: FormEvent| {
        evt.prevent_default();
        error.set(None);
        notice.set(None);
        let body = match PasswordChange::checked(&current_password(), &new_password(), &confirm_password()) {
            Ok(body) => body,
            Err(message) => {
                error.set(Some(message.into()));
                return;
            }
        };
        let api = password_api.clone();
        saving.set(true);
        spawn(async move {
            match api.post::<_, Value>("/change-password", &body).await {
                Ok(_) => {
                    notice.set(Some("Mot de passe modifié avec succès !".into()));
                    current_password.set(String::new());
                    new_password.set(String::new());
                    confirm_password.set(String::new());
                }
                Err(e) => error.set(Some(e.user_message("Erreur lors du changement de mot de passe"))),
            }
            saving.set(false);
        });
    };

    rsx! {
        div { class: "mb-6",
            h2 { class: "text-2xl font-bold text-gray-900 mb-2", "Paramètres" }
            p { class: "text-gray-600", "Gérer votre profil et vos préférences" }
        }
        if let Some(message) = error() {
            ErrorAlert { message: message, on_dismiss: move |_| error.set(None) }
        }
        if let Some(message) = notice() {
            SuccessAlert { message: message }
        }
        div { class: "grid grid-cols-1 lg:grid-cols-2 gap-6",
            form { class: "bg-white rounded-xl shadow-sm border border-gray-200 p-6 space-y-4", onsubmit: on_profile,
                h3 { class: "text-lg font-semibold text-gray-900", "Profil" }
                TextField { label: "Nom complet", value: profile.read().fullname.clone(), required: true, on_input: move |v: String| profile.write().fullname = v }
                TextField { label: "Email", input_type: "email", value: profile.read().email.clone(), required: true, on_input: move |v: String| profile.write().email = v }
                TextField { label: "Téléphone", value: profile.read().phone.clone(), on_input: move |v: String| profile.write().phone = v }
                button { r#type: "submit", class: "btn btn-primary", disabled: saving(), "Enregistrer" }
            }
            form { class: "bg-white rounded-xl shadow-sm border border-gray-200 p-6 space-y-4", onsubmit: on_password,
                h3 { class: "text-lg font-semibold text-gray-900", "Mot de passe" }
                TextField { label: "Mot de passe actuel", input_type: "password", value: current_password(), required: true, on_input: move |v: String| current_password.set(v) }
                TextField { label: "Nouveau mot de passe", input_type: "password", value: new_password(), required: true, on_input: move |v: String| new_password.set(v) }
                TextField { label: "Confirmer le mot de passe", input_type: "password", value: confirm_password(), required: true, on_input: move |v: String| confirm_password.set(v) }
                button { r#type: "submit", class: "btn btn-primary", disabled: saving(), "Changer le mot de passe" }
            }
        }
    }
}
