//! Staff login dialog opened from the public navbar.

use dioxus::prelude::*;

use crate::app::auth_context::use_auth;
use crate::app::Route;

#[component]
pub fn LoginModal(on_close: EventHandler<()>) -> Element {
    let auth = use_auth();
    let nav = navigator();
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut show_password = use_signal(|| false);
    let mut submitting = use_signal(|| false);
    let mut error = use_signal(|| None::<String>);

    // Disabled while a request is in flight or the session is still rehydrating
    let busy = submitting() || auth.session.read().is_loading();

    let on_submit = move |evt: FormEvent| {
        evt.prevent_default();
        submitting.set(true);
        error.set(None);
        spawn(async move {
            match auth.login(email(), password()).await {
                Ok(_) => {
                    on_close.call(());
                    nav.push(Route::DashboardHome {});
                }
                Err(e) => {
                    error.set(Some(e.to_string()));
                    submitting.set(false);
                }
            }
        });
    };

    rsx! {
        div {
            class: "fixed inset-0 bg-black/50 flex items-center justify-center z-50 p-4",
            onclick: move |_| on_close.call(()),
            div {
                class: "bg-white rounded-2xl shadow-2xl max-w-md w-full p-8 relative",
                onclick: move |e| e.stop_propagation(),
                button {
                    class: "absolute top-4 right-4 text-gray-400 hover:text-gray-600",
                    r#type: "button",
                    onclick: move |_| on_close.call(()),
                    "×"
                }
                div { class: "text-center mb-6",
                    h2 { class: "text-2xl font-bold text-gray-900 mb-2", "Espace Professionnel" }
                    p { class: "text-gray-600", "Réservé au personnel médical" }
                }
                form { class: "space-y-4", onsubmit: on_submit,
                    div {
                        label { class: "block text-sm font-medium text-gray-700 mb-2", "Email" }
                        input {
                            class: "w-full px-4 py-3 border border-gray-300 rounded-lg",
                            r#type: "email",
                            name: "email",
                            required: true,
                            placeholder: "votre.email@exemple.com",
                            disabled: busy,
                            value: "{email}",
                            oninput: move |e| {
                                email.set(e.value());
                                error.set(None);
                            },
                        }
                    }
                    div {
                        label { class: "block text-sm font-medium text-gray-700 mb-2", "Mot de passe" }
                        div { class: "relative",
                            input {
                                class: "w-full px-4 py-3 border border-gray-300 rounded-lg pr-12",
                                r#type: if show_password() { "text" } else { "password" },
                                name: "password",
                                required: true,
                                placeholder: "••••••••",
                                disabled: busy,
                                value: "{password}",
                                oninput: move |e| {
                                    password.set(e.value());
                                    error.set(None);
                                },
                            }
                            button {
                                class: "absolute right-3 top-1/2 -translate-y-1/2 text-gray-500 text-sm",
                                r#type: "button",
                                disabled: busy,
                                onclick: move |_| show_password.toggle(),
                                if show_password() { "Masquer" } else { "Afficher" }
                            }
                        }
                    }
                    if let Some(message) = error() {
                        div { class: "bg-red-50 border border-red-200 text-red-600 px-4 py-3 rounded-lg text-sm",
                            "{message}"
                        }
                    }
                    button {
                        class: "w-full bg-gray-800 text-white py-3 rounded-lg font-semibold hover:bg-gray-900 disabled:opacity-50",
                        r#type: "submit",
                        disabled: busy,
                        if submitting() { "Connexion..." } else { "Se connecter" }
                    }
                }
            }
        }
    }
}
