//! Fallback pages: unknown paths and sections still being built.

use dioxus::prelude::*;

use crate::app::Route;

#[component]
pub fn NotFound(segments: Vec<String>) -> Element {
    tracing::debug!("No route for /{}", segments.join("/"));

    rsx! {
        div { class: "min-h-screen flex items-center justify-center",
            div { class: "text-center",
                h1 { class: "text-6xl font-bold text-gray-900 mb-4", "404" }
                p { class: "text-xl text-gray-600 mb-8", "Page non trouvée" }
                Link { to: Route::Home {}, class: "btn btn-primary", "Retour à l'accueil" }
            }
        }
    }
}

#[component]
pub fn UnderConstruction(title: &'static str) -> Element {
    rsx! {
        div { class: "p-6",
            h2 { class: "text-2xl font-bold text-gray-900 mb-2", "{title}" }
            p { class: "text-gray-600", "En construction" }
        }
    }
}

#[component]
pub fn Consultations() -> Element {
    rsx! { UnderConstruction { title: "Consultations" } }
}

#[component]
pub fn Recettes() -> Element {
    rsx! { UnderConstruction { title: "Recettes" } }
}

#[component]
pub fn Dettes() -> Element {
    rsx! { UnderConstruction { title: "Dettes" } }
}
