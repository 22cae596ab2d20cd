//! Gated dashboard chrome.
//!
//! Every `/dashboard` route renders through [`DashboardLayout`], which asks
//! [`gate`] what to show for the current session and path.

use dioxus::prelude::*;

use super::loading::Loading;
use super::sidebar::Sidebar;
use super::topbar::Topbar;
use crate::app::auth_context::use_auth;
use crate::app::Route;
use crate::auth::{gate, GateDecision};

#[component]
pub fn DashboardLayout() -> Element {
    let auth = use_auth();
    let nav = navigator();
    let path = use_route::<Route>().to_string();
    let decision = gate(&auth.session.read(), &path);

    // A 401 on an earlier page wipes storage; drop the stale user on the next route
    use_effect(use_reactive!(|path| {
        tracing::trace!("Checking session before rendering {}", path);
        auth.reconcile();
    }));

    // Redirect once rehydration settles on "not signed in"
    use_effect(move || {
        let session = auth.session.read();
        if !session.is_loading() && !session.is_authenticated() {
            tracing::debug!("Dashboard visited without a session, redirecting");
            nav.replace(Route::Home {});
        }
    });

    match decision {
        GateDecision::Loading | GateDecision::Redirect(_) => rsx! {
            div { class: "min-h-screen flex items-center justify-center",
                Loading {}
            }
        },
        GateDecision::Forbidden => rsx! {
            DashboardChrome { AccessDenied {} }
        },
        GateDecision::Render => rsx! {
            DashboardChrome { Outlet::<Route> {} }
        },
    }
}

#[component]
fn DashboardChrome(children: Element) -> Element {
    rsx! {
        document::Title { "CMC - Espace professionnel" }
        div { class: "min-h-screen bg-gray-50 flex",
            Sidebar {}
            div { class: "flex-1 flex flex-col",
                Topbar {}
                main { class: "flex-1 overflow-y-auto p-6", {children} }
            }
        }
    }
}

/// Shown when the active role has no menu entry covering the page
#[component]
pub fn AccessDenied() -> Element {
    rsx! {
        div { class: "max-w-lg mx-auto mt-16 bg-white rounded-xl shadow-sm border border-gray-200 p-8 text-center",
            h2 { class: "text-xl font-bold text-gray-900 mb-2", "Accès refusé" }
            p { class: "text-gray-600 mb-6",
                "Votre rôle actuel ne permet pas d'accéder à cette page."
            }
            Link { to: Route::DashboardHome {}, class: "btn btn-primary", "Retour au tableau de bord" }
        }
    }
}
