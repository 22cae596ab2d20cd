//! Dismissable error alert component.

use dioxus::prelude::*;

/// A dismissable error alert that displays an error message with a close button.
#[component]
pub fn ErrorAlert(
    /// The error message to display
    message: String,
    /// Called when the dismiss button is clicked
    on_dismiss: EventHandler<()>,
) -> Element {
    rsx! {
        div { class: "bg-red-50 border border-red-200 text-red-600 px-4 py-3 rounded-lg text-sm mb-4 flex justify-between",
            span { "{message}" }
            button {
                class: "ml-2 text-red-400 hover:text-red-600",
                r#type: "button",
                onclick: move |_| on_dismiss.call(()),
                "×"
            }
        }
    }
}

/// Green confirmation banner
#[component]
pub fn SuccessAlert(message: String) -> Element {
    rsx! {
        div { class: "bg-green-50 border border-green-200 text-green-700 px-4 py-3 rounded-lg text-sm mb-4",
            "{message}"
        }
    }
}
