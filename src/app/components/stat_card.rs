use dioxus::prelude::*;

use super::role_link::can_open;
use crate::app::auth_context::use_auth;
use crate::app::Route;

/// Summary tile on the dashboard overviews
#[component]
pub fn StatCard(
    title: &'static str,
    #[props(into)] value: String,
    #[props(default = "bg-blue-50")] tint: &'static str,
    /// Optional page the tile links to, dropped when the role cannot open it
    link: Option<Route>,
) -> Element {
    let role = use_auth().active_role();
    let body = rsx! {
        div { class: "bg-white rounded-xl shadow-sm border border-gray-200 p-6 flex items-center justify-between",
            div {
                p { class: "text-sm text-gray-600 mb-1", "{title}" }
                p { class: "text-3xl font-bold text-gray-900", "{value}" }
            }
            div { class: "w-12 h-12 rounded-lg {tint}" }
        }
    };

    match link {
        Some(to) if can_open(role, &to) => rsx! { Link { to: to, {body} } },
        _ => body,
    }
}
