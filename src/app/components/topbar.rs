//! Dashboard header: role switcher and user menu.

use dioxus::prelude::*;

use crate::app::auth_context::use_auth;
use crate::app::Route;

#[component]
pub fn Topbar() -> Element {
    let auth = use_auth();
    let nav = navigator();
    let mut show_role_menu = use_signal(|| false);
    let mut show_user_menu = use_signal(|| false);

    let user = auth.user();
    let active = auth.active_role();
    let title = active.map(|r| r.label()).unwrap_or_default();
    let roles = user.as_ref().map(|u| u.roles.clone()).unwrap_or_default();
    let fullname = user.as_ref().map(|u| u.fullname.clone()).unwrap_or_default();
    let email = user.as_ref().map(|u| u.email.clone()).unwrap_or_default();

    rsx! {
        header { class: "bg-white shadow-sm border-b border-gray-200 sticky top-0 z-40",
            div { class: "px-6 py-4 flex items-center justify-between",
                h1 { class: "text-2xl font-bold text-gray-900", "Dashboard {title}" }
                div { class: "flex items-center gap-4",
                    // Only worth offering with a choice to make
                    if roles.len() > 1 {
                        div { class: "relative",
                            button {
                                class: "flex items-center gap-2 px-4 py-2 bg-gray-100 rounded-lg hover:bg-gray-200",
                                onclick: move |_| show_role_menu.toggle(),
                                span { class: "text-sm font-medium text-gray-700", "{title}" }
                                span { class: "text-gray-500", "▾" }
                            }
                            if show_role_menu() {
                                div { class: "absolute right-0 mt-2 w-48 bg-white rounded-lg shadow-xl border border-gray-200 py-2",
                                    for role in roles {
                                        button {
                                            key: "{role}",
                                            class: if Some(role) == active { "w-full text-left px-4 py-2 bg-blue-50 text-blue-600" } else { "w-full text-left px-4 py-2 text-gray-700 hover:bg-gray-50" },
                                            onclick: move |_| {
                                                show_role_menu.set(false);
                                                if auth.switch_role(role) {
                                                    nav.push(Route::DashboardHome {});
                                                }
                                            },
                                            if Some(role) == active { "✓ " }
                                            "{role.label()}"
                                        }
                                    }
                                }
                            }
                        }
                    }
                    div { class: "relative",
                        button {
                            class: "flex items-center gap-3 px-3 py-2 hover:bg-gray-100 rounded-lg",
                            onclick: move |_| show_user_menu.toggle(),
                            div { class: "text-left hidden md:block",
                                p { class: "text-sm font-medium text-gray-900", "{fullname}" }
                                p { class: "text-xs text-gray-500", "{email}" }
                            }
                            span { class: "text-gray-500", "▾" }
                        }
                        if show_user_menu() {
                            div { class: "absolute right-0 mt-2 w-56 bg-white rounded-lg shadow-xl border border-gray-200 py-2",
                                div { class: "px-4 py-3 border-b border-gray-100",
                                    p { class: "text-sm font-medium text-gray-900", "{fullname}" }
                                    p { class: "text-xs text-gray-500", "{email}" }
                                }
                                Link {
                                    to: Route::Settings {},
                                    class: "block px-4 py-2 text-gray-700 hover:bg-gray-50",
                                    onclick: move |_| show_user_menu.set(false),
                                    "Paramètres"
                                }
                                button {
                                    class: "w-full text-left px-4 py-2 text-red-600 hover:bg-red-50",
                                    onclick: move |_| {
                                        auth.logout();
                                        nav.push(Route::Home {});
                                    },
                                    "Déconnexion"
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
