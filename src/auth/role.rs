//! Staff roles.
//!
//! A user may hold several roles at once; exactly one of them is active and
//! drives the dashboard view. Roles travel over the wire as lowercase French
//! identifiers (`"medecin"`, `"secretaire"`, ...).

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Medecin,
    Secretaire,
    Laborantin,
    Comptable,
}

impl Role {
    pub const ALL: [Role; 5] = [
        Role::Admin,
        Role::Medecin,
        Role::Secretaire,
        Role::Laborantin,
        Role::Comptable,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Medecin => "medecin",
            Role::Secretaire => "secretaire",
            Role::Laborantin => "laborantin",
            Role::Comptable => "comptable",
        }
    }

    /// Parse a wire identifier. Unknown strings yield `None`.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "admin" => Some(Role::Admin),
            "medecin" => Some(Role::Medecin),
            "secretaire" => Some(Role::Secretaire),
            "laborantin" => Some(Role::Laborantin),
            "comptable" => Some(Role::Comptable),
            _ => None,
        }
    }

    /// Human-readable label shown in the topbar and role switcher
    pub fn label(&self) -> &'static str {
        match self {
            Role::Admin => "Administration",
            Role::Medecin => "Médecin",
            Role::Secretaire => "Secrétaire",
            Role::Laborantin => "Laborantin",
            Role::Comptable => "Comptable",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Decode a role array, dropping unknown identifiers and duplicates.
///
/// Order is preserved: the first known role is the default active role.
pub(crate) fn lenient_roles<'de, D>(deserializer: D) -> Result<Vec<Role>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default();
    let mut roles = Vec::with_capacity(raw.len());
    for value in raw {
        match Role::parse(&value) {
            Some(role) if !roles.contains(&role) => roles.push(role),
            Some(_) => {}
            None => tracing::warn!("Ignoring unknown role {:?}", value),
        }
    }
    Ok(roles)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Holder {
        #[serde(deserialize_with = "lenient_roles", default)]
        role: Vec<Role>,
    }

    #[test]
    fn parse_round_trips_every_role() {
        for role in Role::ALL {
            assert_eq!(Role::parse(role.as_str()), Some(role));
        }
    }

    #[test]
    fn parse_rejects_unknown_and_case_variants() {
        assert_eq!(Role::parse("infirmier"), None);
        assert_eq!(Role::parse("Admin"), None);
        assert_eq!(Role::parse(""), None);
    }

    #[test]
    fn lenient_roles_drops_unknown_and_duplicates() {
        let holder: Holder =
            serde_json::from_str(r#"{"role":["medecin","chirurgien","secretaire","medecin"]}"#)
                .unwrap();
        assert_eq!(holder.role, vec![Role::Medecin, Role::Secretaire]);
    }

    #[test]
    fn lenient_roles_accepts_null_and_missing() {
        let holder: Holder = serde_json::from_str(r#"{"role":null}"#).unwrap();
        assert!(holder.role.is_empty());
        let holder: Holder = serde_json::from_str("{}").unwrap();
        assert!(holder.role.is_empty());
    }

    #[test]
    fn serializes_as_wire_identifier() {
        assert_eq!(
            serde_json::to_string(&Role::Laborantin).unwrap(),
            "\"laborantin\""
        );
    }
}
