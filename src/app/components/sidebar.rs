//! Dashboard sidebar, rendered from the role table.

use dioxus::prelude::*;

use crate::app::auth_context::use_auth;
use crate::app::Route;
use crate::auth::{is_active, menu_for};

#[component]
pub fn Sidebar() -> Element {
    let auth = use_auth();
    let current = use_route::<Route>().to_string();
    let menu = menu_for(auth.active_role());

    rsx! {
        aside { class: "w-64 bg-gray-900 text-gray-100 min-h-screen flex flex-col",
            div { class: "px-6 py-5 border-b border-gray-800",
                Link { to: Route::Home {}, class: "text-xl font-bold text-white", "CMC" }
                p { class: "text-xs text-gray-400", "Espace professionnel" }
            }
            nav { class: "flex-1 px-3 py-4 space-y-1",
                for entry in menu.iter() {
                    Link {
                        key: "{entry.path}",
                        to: entry.path,
                        class: if is_active(entry.path, &current) {
                            "block px-4 py-2 rounded-lg bg-blue-600 text-white"
                        } else {
                            "block px-4 py-2 rounded-lg text-gray-300 hover:bg-gray-800"
                        },
                        "{entry.label}"
                    }
                }
            }
        }
    }
}
