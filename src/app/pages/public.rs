//! Public site pages.

use dioxus::prelude::*;

use crate::app::Route;

/// Gradient banner opening each public page
#[component]
fn Hero(title: &'static str, subtitle: &'static str) -> Element {
    rsx! {
        div { class: "bg-gradient-to-br from-blue-700 to-blue-900 text-white py-20",
            div { class: "container-custom",
                h1 { class: "text-4xl md:text-5xl font-bold mb-4", "{title}" }
                p { class: "text-xl text-blue-100", "{subtitle}" }
            }
        }
    }
}

#[component]
pub fn Home() -> Element {
    rsx! {
        div { class: "bg-gradient-to-br from-blue-700 to-blue-900 text-white",
            div { class: "container-custom py-32 max-w-3xl",
                h1 { class: "text-5xl md:text-6xl font-bold mb-6", "Clinique CMC-UA" }
                p { class: "text-2xl md:text-3xl mb-8", "Excellence en Urologie et Analyses Médicales" }
                p { class: "text-lg mb-8",
                    "Soins spécialisés de qualité avec équipements modernes et équipe expérimentée"
                }
                div { class: "flex flex-wrap gap-4",
                    Link { to: Route::Urologie {}, class: "btn bg-white text-blue-700", "Nos Services" }
                    Link { to: Route::Contact {}, class: "btn bg-blue-600 text-white", "Prendre Rendez-vous" }
                }
            }
        }
        div { class: "container-custom py-16 text-center",
            h2 { class: "text-3xl font-bold mb-4", "Bienvenue sur notre site" }
        }
    }
}

#[component]
pub fn Urologie() -> Element {
    rsx! {
        Hero { title: "Service d'Urologie", subtitle: "Chirurgie et suivi urologique" }
        div { class: "container-custom py-16",
            ul { class: "grid md:grid-cols-2 gap-4",
                for name in ["Résection Bipolaire", "Lithotripsie", "Urétéroscopie", "Cystoscopie"] {
                    li { key: "{name}", class: "bg-white rounded-xl shadow-sm border p-6 font-semibold", "{name}" }
                }
            }
        }
    }
}

#[component]
pub fn Laboratoire() -> Element {
    rsx! {
        Hero { title: "Laboratoire d'Analyses", subtitle: "Biologie médicale et imagerie" }
        div { class: "container-custom py-16 text-gray-600", "Contenu à venir..." }
    }
}

#[component]
pub fn APropos() -> Element {
    rsx! {
        Hero { title: "À Propos de la Clinique", subtitle: "Notre histoire et nos valeurs" }
        div { class: "container-custom py-16 max-w-3xl",
            h2 { class: "text-3xl font-bold mb-6", "Clinique CMC-UA" }
            p { class: "text-gray-600 mb-4",
                "La Clinique CMC-UA est un établissement de santé spécialisé en urologie et analyses médicales, situé à Moroni, Grande Comore."
            }
        }
    }
}

#[component]
pub fn Equipe() -> Element {
    rsx! {
        Hero { title: "Notre Équipe", subtitle: "Des professionnels à votre service" }
        div { class: "container-custom py-16 text-gray-600", "Présentation de l'équipe à venir..." }
    }
}

#[component]
pub fn Contact() -> Element {
    rsx! {
        Hero { title: "Contactez-nous", subtitle: "Nous sommes à votre écoute" }
        div { class: "container-custom py-16 space-y-2",
            h2 { class: "text-2xl font-bold mb-4", "Informations" }
            p { "Route de l'Aéroport, Moroni, Grande Comore" }
            p { "Urgences 24/7" }
            p { "Lun-Sam: 8h-13h" }
        }
    }
}
