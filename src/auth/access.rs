//! Role table and dashboard gate.
//!
//! One declarative table maps each role to its sidebar entries. The sidebar
//! renders it and the route gate consults it, so a page is reachable exactly
//! when its menu entry (or a parent entry) is listed for the active role.

use super::role::Role;
use super::session::Session;

/// Prefix of every gated path
pub const DASHBOARD_ROOT: &str = "/dashboard";

/// Where unauthenticated dashboard visitors are sent
pub const PUBLIC_ROOT: &str = "/";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MenuEntry {
    pub path: &'static str,
    pub label: &'static str,
}

const fn entry(path: &'static str, label: &'static str) -> MenuEntry {
    MenuEntry { path, label }
}

const HOME: MenuEntry = entry("/dashboard", "Tableau de bord");
const SETTINGS: MenuEntry = entry("/dashboard/settings", "Paramètres");
const PATIENTS: MenuEntry = entry("/dashboard/patients", "Patients");
const ANALYSES: MenuEntry = entry("/dashboard/analyses", "Analyses");
const OPERATIONS: MenuEntry = entry("/dashboard/operations", "Opérations");

/// What one role may see and reach
#[derive(Debug, PartialEq, Eq)]
pub struct RoleAccess {
    pub role: Role,
    pub menu: &'static [MenuEntry],
}

pub static ROLE_TABLE: [RoleAccess; 5] = [
    RoleAccess {
        role: Role::Admin,
        menu: &[
            HOME,
            entry("/dashboard/users", "Utilisateurs"),
            entry("/dashboard/specialities", "Spécialités"),
            entry("/dashboard/stats", "Statistiques"),
            SETTINGS,
        ],
    },
    RoleAccess {
        role: Role::Medecin,
        menu: &[
            HOME,
            PATIENTS,
            entry("/dashboard/consultations", "Consultations"),
            ANALYSES,
            OPERATIONS,
            SETTINGS,
        ],
    },
    RoleAccess {
        role: Role::Secretaire,
        menu: &[
            HOME,
            PATIENTS,
            entry("/dashboard/visites", "Visites"),
            ANALYSES,
            OPERATIONS,
            entry("/dashboard/paiements", "Paiements"),
            SETTINGS,
        ],
    },
    RoleAccess {
        role: Role::Laborantin,
        menu: &[HOME, ANALYSES, SETTINGS],
    },
    RoleAccess {
        role: Role::Comptable,
        menu: &[
            HOME,
            entry("/dashboard/recettes", "Recettes"),
            entry("/dashboard/dettes", "Dettes"),
            SETTINGS,
        ],
    },
];

impl RoleAccess {
    /// Whether `path` is the dashboard home or lies under one of this role's
    /// menu entries.
    pub fn allows(&self, path: &str) -> bool {
        let path = normalize(path);
        if path == DASHBOARD_ROOT {
            return true;
        }
        self.menu
            .iter()
            .filter(|e| e.path != DASHBOARD_ROOT)
            .any(|e| is_within(path, e.path))
    }
}

/// Table row for `role`; absent roles fall back to admin.
pub fn access_for(role: Option<Role>) -> &'static RoleAccess {
    let role = role.unwrap_or(Role::Admin);
    ROLE_TABLE
        .iter()
        .find(|access| access.role == role)
        .unwrap_or(&ROLE_TABLE[0])
}

/// Ordered sidebar entries for the active role
pub fn menu_for(role: Option<Role>) -> &'static [MenuEntry] {
    access_for(role).menu
}

pub fn allows(role: Option<Role>, path: &str) -> bool {
    access_for(role).allows(path)
}

/// Whether `path` belongs to the gated subtree
pub fn is_dashboard_path(path: &str) -> bool {
    is_within(normalize(path), DASHBOARD_ROOT)
}

/// Whether the sidebar entry at `entry_path` should be highlighted for
/// `current`. The dashboard home only matches itself.
pub fn is_active(entry_path: &str, current: &str) -> bool {
    let current = normalize(current);
    if entry_path == DASHBOARD_ROOT {
        current == DASHBOARD_ROOT
    } else {
        is_within(current, entry_path)
    }
}

/// Outcome of a navigation into the dashboard subtree
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GateDecision {
    /// Rehydration pending: show the loading chrome, do not redirect
    Loading,
    /// Replace the location; the requested path is not remembered
    Redirect(&'static str),
    /// Signed in, but the active role has no entry covering the path
    Forbidden,
    Render,
}

pub fn gate(session: &Session, path: &str) -> GateDecision {
    if session.is_loading() {
        return GateDecision::Loading;
    }
    if !session.is_authenticated() {
        return GateDecision::Redirect(PUBLIC_ROOT);
    }
    if allows(session.active_role(), path) {
        GateDecision::Render
    } else {
        GateDecision::Forbidden
    }
}

/// Drop query, fragment and trailing slash
fn normalize(path: &str) -> &str {
    let end = path.find(['?', '#']).unwrap_or(path.len());
    let path = &path[..end];
    match path.trim_end_matches('/') {
        "" => "/",
        trimmed => trimmed,
    }
}

fn is_within(path: &str, prefix: &str) -> bool {
    path == prefix
        || path
            .strip_prefix(prefix)
            .is_some_and(|rest| rest.starts_with('/'))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(role: Option<Role>) -> Vec<&'static str> {
        menu_for(role).iter().map(|e| e.label).collect()
    }

    #[test]
    fn every_role_has_exactly_one_row() {
        for role in Role::ALL {
            assert_eq!(ROLE_TABLE.iter().filter(|a| a.role == role).count(), 1);
            assert_eq!(access_for(Some(role)).role, role);
        }
    }

    #[test]
    fn absent_role_falls_back_to_admin_menu() {
        assert_eq!(menu_for(None), menu_for(Some(Role::Admin)));
    }

    #[test]
    fn menu_lookup_is_stable() {
        for role in Role::ALL {
            assert_eq!(menu_for(Some(role)), menu_for(Some(role)));
        }
    }

    #[test]
    fn menus_start_home_and_end_settings() {
        for role in Role::ALL {
            let menu = menu_for(Some(role));
            assert_eq!(menu.first().map(|e| e.path), Some(DASHBOARD_ROOT));
            assert_eq!(menu.last().map(|e| e.path), Some("/dashboard/settings"));
        }
    }

    #[test]
    fn laborantin_menu_matches_sidebar_order() {
        assert_eq!(
            labels(Some(Role::Laborantin)),
            vec!["Tableau de bord", "Analyses", "Paramètres"]
        );
    }

    #[test]
    fn secretaire_menu_matches_sidebar_order() {
        assert_eq!(
            labels(Some(Role::Secretaire)),
            vec![
                "Tableau de bord",
                "Patients",
                "Visites",
                "Analyses",
                "Opérations",
                "Paiements",
                "Paramètres"
            ]
        );
    }

    #[test]
    fn nested_pages_inherit_their_menu_entry() {
        let secretaire = Some(Role::Secretaire);
        assert!(allows(secretaire, "/dashboard/patients/new"));
        assert!(allows(secretaire, "/dashboard/patients/42/edit"));
        assert!(allows(secretaire, "/dashboard/visites/7?tab=paiement"));
        assert!(!allows(secretaire, "/dashboard/users"));
    }

    #[test]
    fn dashboard_home_is_always_allowed() {
        for role in Role::ALL {
            assert!(allows(Some(role), "/dashboard"));
            assert!(allows(Some(role), "/dashboard/"));
        }
    }

    #[test]
    fn prefix_match_respects_segment_boundaries() {
        assert!(!allows(Some(Role::Medecin), "/dashboard/patientsx"));
        assert!(!is_dashboard_path("/dashboards"));
        assert!(is_dashboard_path("/dashboard/stats"));
        assert!(!is_dashboard_path("/"));
    }

    #[test]
    fn home_entry_is_only_active_on_home() {
        assert!(is_active("/dashboard", "/dashboard/"));
        assert!(!is_active("/dashboard", "/dashboard/patients"));
        assert!(is_active("/dashboard/patients", "/dashboard/patients/12"));
        assert!(!is_active("/dashboard/patients", "/dashboard/paiements"));
    }

    #[test]
    fn comptable_cannot_reach_patients() {
        assert!(!allows(Some(Role::Comptable), "/dashboard/patients"));
        assert!(allows(Some(Role::Comptable), "/dashboard/recettes"));
    }
}
