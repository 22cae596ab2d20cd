use dioxus::prelude::*;

/// Centered spinner with a caption
#[component]
pub fn Loading(#[props(default = "Chargement...".to_string())] message: String) -> Element {
    rsx! {
        div { class: "flex flex-col items-center justify-center h-64 gap-3",
            div { class: "animate-spin rounded-full h-12 w-12 border-b-2 border-blue-600" }
            p { class: "text-gray-600", "{message}" }
        }
    }
}
