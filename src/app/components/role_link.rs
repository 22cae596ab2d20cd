//! Links that respect the active role's access table.

use dioxus::prelude::*;

use crate::app::auth_context::use_auth;
use crate::app::Route;
use crate::auth::{allows, is_dashboard_path, Role};

/// Whether `role` may open `route`. Public routes are open to everyone.
pub fn can_open(role: Option<Role>, route: &Route) -> bool {
    let path = route.to_string();
    !is_dashboard_path(&path) || allows(role, &path)
}

/// A [`Link`] that falls back to plain text when the active role cannot
/// open the target. Action buttons set `hide_refused` and vanish instead.
#[component]
pub fn RoleLink(
    to: Route,
    #[props(default)] class: &'static str,
    #[props(default = false)] hide_refused: bool,
    children: Element,
) -> Element {
    let auth = use_auth();

    if can_open(auth.active_role(), &to) {
        rsx! {
            Link { to: to, class: class, {children} }
        }
    } else if hide_refused {
        rsx! {}
    } else {
        rsx! {
            span { {children} }
        }
    }
}
