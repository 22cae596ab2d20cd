//! Public site chrome: navbar, footer and the staff login entry point.

use dioxus::prelude::*;

use super::login_modal::LoginModal;
use crate::app::auth_context::use_auth;
use crate::app::Route;

const PUBLIC_LINKS: [(&str, &str); 6] = [
    ("/", "Accueil"),
    ("/urologie", "Urologie"),
    ("/laboratoire", "Laboratoire"),
    ("/a-propos", "À Propos"),
    ("/equipe", "Équipe"),
    ("/contact", "Contact"),
];

/// Layout of every public page
#[component]
pub fn PublicLayout() -> Element {
    rsx! {
        document::Title { "Clinique CMC-UA" }
        div { class: "min-h-screen flex flex-col",
            Navbar {}
            main { class: "flex-1",
                Outlet::<Route> {}
            }
            Footer {}
        }
    }
}

#[component]
pub fn Navbar() -> Element {
    let auth = use_auth();
    let nav = navigator();
    let mut login_open = use_signal(|| false);

    let session = auth.session.read();
    let signed_in_as = session
        .is_authenticated()
        .then(|| session.user().map(|u| u.fullname.clone()))
        .flatten();
    drop(session);

    rsx! {
        header { class: "bg-white shadow-sm sticky top-0 z-40",
            nav { class: "container-custom flex justify-between items-center py-4",
                Link { to: Route::Home {}, class: "text-2xl font-bold text-blue-700", "CMC" }
                ul { class: "hidden lg:flex items-center gap-1",
                    for (path, label) in PUBLIC_LINKS {
                        li { key: "{path}",
                            Link {
                                to: path,
                                class: "px-3 py-2 text-gray-700 hover:text-blue-700",
                                active_class: "font-semibold text-blue-700",
                                "{label}"
                            }
                        }
                    }
                }
                div { class: "flex items-center gap-3",
                    {match signed_in_as {
                        Some(fullname) => rsx! {
                            span { class: "font-medium text-gray-700 text-sm", "{fullname}" }
                            Link { to: Route::DashboardHome {}, class: "btn btn-primary", "Mon Dashboard" }
                            button {
                                class: "text-red-600 text-sm",
                                onclick: move |_| {
                                    auth.logout();
                                    nav.push(Route::Home {});
                                },
                                "Déconnexion"
                            }
                        },
                        None => rsx! {
                            button {
                                class: "btn btn-secondary",
                                onclick: move |_| login_open.set(true),
                                "Espace Pro"
                            }
                        },
                    }}
                }
            }
        }
        if login_open() {
            LoginModal { on_close: move |_| login_open.set(false) }
        }
    }
}

#[component]
pub fn Footer() -> Element {
    let version = env!("CARGO_PKG_VERSION");

    rsx! {
        footer { class: "bg-gray-900 text-gray-300",
            div { class: "container-custom py-12 grid grid-cols-1 md:grid-cols-3 gap-8",
                div {
                    h3 { class: "text-white font-semibold mb-3", "Liens rapides" }
                    ul { class: "space-y-2",
                        for (path, label) in PUBLIC_LINKS {
                            li { key: "{path}", Link { to: path, class: "hover:text-white", "{label}" } }
                        }
                    }
                }
                div {
                    h3 { class: "text-white font-semibold mb-3", "Services" }
                    ul { class: "space-y-2 text-sm",
                        li { "Résection Bipolaire" }
                        li { "Lithotripsie" }
                        li { "Urétéroscopie" }
                        li { "Cystoscopie" }
                        li { "Analyses Laboratoire" }
                        li { "Consultations" }
                    }
                }
                div {
                    h3 { class: "text-white font-semibold mb-3", "Horaires" }
                    p { "Lun-Sam: 8h-13h" }
                    p { "Urgences 24/7" }
                }
            }
            div { class: "border-t border-gray-800 py-6 text-center text-sm",
                "CMC Portal v{version}"
            }
        }
    }
}
