//! Aggregates shown on the statistics page.

use super::records::{Patient, StaffMember, Visit};
use crate::auth::Role;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ClinicStats {
    pub users: usize,
    /// Accounts per role in table order; a user with two roles counts twice
    pub users_by_role: Vec<(Role, usize)>,
    pub patients: usize,
    pub active_patients: usize,
    pub visits: usize,
}

impl ClinicStats {
    pub fn compute(users: &[StaffMember], patients: &[Patient], visits: &[Visit]) -> Self {
        let users_by_role = Role::ALL
            .into_iter()
            .map(|role| {
                let count = users
                    .iter()
                    .filter(|u| u.role.iter().any(|r| r == role.as_str()))
                    .count();
                (role, count)
            })
            .filter(|(_, count)| *count > 0)
            .collect();

        Self {
            users: users.len(),
            users_by_role,
            patients: patients.len(),
            active_patients: patients
                .iter()
                .filter(|p| p.status.as_deref() == Some("actif"))
                .count(),
            visits: visits.len(),
        }
    }
}

/// Heading for a role's head count
pub fn plural_label(role: Role) -> &'static str {
    match role {
        Role::Admin => "Administrateurs",
        Role::Medecin => "Médecins",
        Role::Secretaire => "Secrétaires",
        Role::Laborantin => "Laborantins",
        Role::Comptable => "Comptables",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn staff(roles: &[&str]) -> StaffMember {
        StaffMember {
            role: roles.iter().map(|r| r.to_string()).collect(),
            ..StaffMember::default()
        }
    }

    #[test]
    fn multi_role_users_count_once_per_role() {
        let users = vec![
            staff(&["admin"]),
            staff(&["medecin", "secretaire"]),
            staff(&["medecin"]),
        ];
        let stats = ClinicStats::compute(&users, &[], &[]);
        assert_eq!(stats.users, 3);
        assert_eq!(
            stats.users_by_role,
            vec![(Role::Admin, 1), (Role::Medecin, 2), (Role::Secretaire, 1)]
        );
    }

    #[test]
    fn active_patients_are_those_marked_actif() {
        let patients = vec![
            Patient {
                status: Some("actif".into()),
                ..Patient::default()
            },
            Patient {
                status: Some("inactif".into()),
                ..Patient::default()
            },
            Patient::default(),
        ];
        let stats = ClinicStats::compute(&[], &patients, &[Visit::default()]);
        assert_eq!(stats.patients, 3);
        assert_eq!(stats.active_patients, 1);
        assert_eq!(stats.visits, 1);
    }
}
