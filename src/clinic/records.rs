//! Wire records returned by the clinic backend.
//!
//! Every field the UI does not strictly need is optional or defaulted: the
//! backend populates references (`patient`, `doctor`, ...) inconsistently.

use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::auth::Role;

/// Embedded reference to another record (`{ _id, fullname, ... }`)
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PersonRef {
    #[serde(alias = "_id", default)]
    pub id: String,
    #[serde(default)]
    pub fullname: String,
    pub patient_number: Option<String>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EmergencyContact {
    #[serde(default)]
    pub fullname: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub relationship: String,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    #[serde(alias = "_id", default)]
    pub id: String,
    pub patient_number: Option<String>,
    #[serde(default)]
    pub fullname: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub gender: Option<String>,
    /// ISO date or datetime
    pub date_of_birth: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub nationality: Option<String>,
    pub blood_group: Option<String>,
    /// `local` or `diaspora`
    pub origin: Option<String>,
    pub status: Option<String>,
    pub emergency_contact: Option<EmergencyContact>,
}

/// Body for `POST /patient` and `PUT /patients/:id`
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PatientForm {
    pub fullname: String,
    pub phone: String,
    pub email: String,
    pub gender: String,
    pub date_of_birth: String,
    pub address: String,
    pub city: String,
    pub nationality: String,
    pub blood_group: String,
    pub origin: String,
    pub emergency_contact: EmergencyContact,
}

impl PatientForm {
    pub fn from_patient(patient: &Patient) -> Self {
        Self {
            fullname: patient.fullname.clone(),
            phone: patient.phone.clone().unwrap_or_default(),
            email: patient.email.clone().unwrap_or_default(),
            gender: patient.gender.clone().unwrap_or_default(),
            // Inputs of type=date want YYYY-MM-DD
            date_of_birth: patient
                .date_of_birth
                .as_deref()
                .map(|d| d.chars().take(10).collect())
                .unwrap_or_default(),
            address: patient.address.clone().unwrap_or_default(),
            city: patient.city.clone().unwrap_or_default(),
            nationality: patient.nationality.clone().unwrap_or_default(),
            blood_group: patient.blood_group.clone().unwrap_or_default(),
            origin: patient.origin.clone().unwrap_or_default(),
            emergency_contact: patient.emergency_contact.clone().unwrap_or_default(),
        }
    }

    /// First missing required field, as a user-facing message
    pub fn missing_field(&self) -> Option<&'static str> {
        if self.fullname.trim().is_empty() {
            Some("Le nom complet est requis")
        } else if self.phone.trim().is_empty() {
            Some("Le téléphone est requis")
        } else if self.gender.trim().is_empty() {
            Some("Le sexe est requis")
        } else {
            None
        }
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Speciality {
    #[serde(alias = "_id", default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub is_active: bool,
}

/// Staff member as listed by `GET /users` and `GET /doctors`
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StaffMember {
    #[serde(alias = "_id", default)]
    pub id: String,
    #[serde(default)]
    pub fullname: String,
    #[serde(default)]
    pub email: String,
    pub phone: Option<String>,
    #[serde(default)]
    pub role: Vec<String>,
    #[serde(default)]
    pub speciality: Vec<SpecialityRef>,
    #[serde(default)]
    pub is_active: bool,
}

/// Specialities arrive either populated or as bare ids
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum SpecialityRef {
    Populated(Speciality),
    Id(String),
}

impl SpecialityRef {
    pub fn id(&self) -> &str {
        match self {
            SpecialityRef::Populated(s) => &s.id,
            SpecialityRef::Id(id) => id,
        }
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            SpecialityRef::Populated(s) => Some(&s.name),
            SpecialityRef::Id(_) => None,
        }
    }
}

/// A reference the backend may or may not have populated
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum Ref<T> {
    Populated(T),
    Id(String),
}

impl<T> Ref<T> {
    pub fn populated(&self) -> Option<&T> {
        match self {
            Ref::Populated(item) => Some(item),
            Ref::Id(_) => None,
        }
    }
}

impl StaffMember {
    pub fn has_speciality(&self, speciality_id: &str) -> bool {
        self.speciality.iter().any(|s| s.id() == speciality_id)
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Visit {
    #[serde(alias = "_id", default)]
    pub id: String,
    #[serde(alias = "numeroVisite")]
    pub visit_number: Option<String>,
    pub patient: Option<PersonRef>,
    pub doctor: Option<PersonRef>,
    pub visit_reason: Option<String>,
    pub visit_type: Option<String>,
    pub visit_date: Option<String>,
    pub priority: Option<String>,
    pub status: Option<String>,
    pub total_amount: Option<f64>,
    pub final_amount: Option<f64>,
    pub speciality: Option<Ref<Speciality>>,
    pub payment: Option<Ref<Payment>>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisItem {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub price: f64,
    pub result: Option<String>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Analysis {
    #[serde(alias = "_id", default)]
    pub id: String,
    pub analysis_number: Option<String>,
    pub patient: Option<PersonRef>,
    pub doctor: Option<PersonRef>,
    pub category: Option<String>,
    #[serde(default)]
    pub items: Vec<AnalysisItem>,
    pub priority: Option<String>,
    pub status: Option<String>,
    pub prescription_date: Option<String>,
    pub result_date: Option<String>,
    pub total_price: Option<f64>,
    pub technician: Option<PersonRef>,
    pub doctor_comment: Option<String>,
    pub technician_comment: Option<String>,
    pub payment: Option<Ref<Payment>>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Operation {
    #[serde(alias = "_id", default)]
    pub id: String,
    pub operation_number: Option<String>,
    pub patient: Option<PersonRef>,
    pub surgeon: Option<PersonRef>,
    pub operation_type: Option<String>,
    pub scheduled_date: Option<String>,
    pub status: Option<String>,
    pub total_amount: Option<f64>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VisitRef {
    #[serde(alias = "_id", default)]
    pub id: String,
    pub visit_number: Option<String>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    #[serde(alias = "_id", default)]
    pub id: String,
    pub payment_number: Option<String>,
    pub patient: Option<PersonRef>,
    pub visit: Option<VisitRef>,
    pub total_amount: Option<f64>,
    pub discount_percentage: Option<f64>,
    pub discount_amount: Option<f64>,
    pub final_amount: Option<f64>,
    pub paid_amount: Option<f64>,
    pub payment_method: Option<String>,
    pub remaining_amount: Option<f64>,
    pub status: Option<String>,
    pub debt_status: Option<String>,
    pub created_at: Option<String>,
}

/// Response of `GET /patients/:id`
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PatientDossier {
    pub patient: Patient,
    pub medical_record: Option<MedicalRecord>,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MedicalRecord {
    pub medical_history: Option<String>,
    pub surgical_history: Option<String>,
    #[serde(default)]
    visits: Vec<Ref<Visit>>,
}

impl MedicalRecord {
    /// Populated visits, in backend order
    pub fn visits(&self) -> impl Iterator<Item = &Visit> {
        self.visits.iter().filter_map(Ref::populated)
    }
}

/// Body for `POST /visit`
#[derive(Clone, Debug, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewVisitRequest {
    pub patient: String,
    pub speciality: String,
    pub doctor: String,
    pub visit_reason: String,
    pub visit_type: String,
    pub priority: String,
    pub total_amount: f64,
    pub discount_percentage: f64,
    pub paid_amount: f64,
    pub payment_method: String,
}

/// Body for `POST /analysis`
#[derive(Clone, Debug, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewAnalysisRequest {
    pub patient: String,
    pub visit: String,
    pub doctor: String,
    pub category: String,
    pub items: Vec<AnalysisItem>,
    pub priority: String,
    pub discount_percentage: f64,
    pub paid_amount: f64,
    pub payment_method: String,
}

/// Body for `POST /operations`
#[derive(Clone, Debug, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewOperationRequest {
    pub patient: String,
    pub surgeon: String,
    pub operation_type: String,
    pub scheduled_date: String,
    pub scheduled_time: String,
    /// Minutes
    pub estimated_duration: u32,
    pub equipment: String,
    pub pre_op_notes: String,
    pub total_amount: f64,
    pub discount_percentage: f64,
    pub paid_amount: f64,
    pub payment_method: String,
}

impl NewOperationRequest {
    /// Merge the date and time inputs into one local timestamp, as the
    /// backend expects `scheduledDate` to carry both.
    pub fn combine_schedule(&mut self) -> Result<(), &'static str> {
        let naive = NaiveDateTime::parse_from_str(
            &format!("{} {}", self.scheduled_date.trim(), self.scheduled_time.trim()),
            "%Y-%m-%d %H:%M",
        )
        .map_err(|_| "Date et heure prévues requises")?;
        let local = naive
            .and_local_timezone(Local)
            .earliest()
            .ok_or("Date et heure prévues requises")?;
        self.scheduled_date = local.to_rfc3339();
        Ok(())
    }
}

/// Body for `POST /speciality`
#[derive(Clone, Debug, Default, Serialize, PartialEq)]
pub struct NewSpecialityRequest {
    pub name: String,
    pub description: String,
}

/// Body for `PUT /users/profile`
#[derive(Clone, Debug, Default, Serialize, PartialEq)]
pub struct ProfileUpdate {
    pub fullname: String,
    pub email: String,
    pub phone: String,
}

/// Body for `POST /change-password`
#[derive(Clone, Debug, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PasswordChange {
    pub current_password: String,
    pub new_password: String,
}

pub const MIN_PASSWORD_LEN: usize = 6;

impl PasswordChange {
    /// Check the confirmation field and the minimum length.
    pub fn checked(current: &str, new: &str, confirm: &str) -> Result<Self, &'static str> {
        if new != confirm {
            return Err("Les mots de passe ne correspondent pas");
        }
        if new.chars().count() < MIN_PASSWORD_LEN {
            return Err("Le mot de passe doit contenir au moins 6 caractères");
        }
        Ok(Self {
            current_password: current.to_string(),
            new_password: new.to_string(),
        })
    }
}

/// Body for `POST /register` and `PATCH /users/:id/role`
#[derive(Clone, Debug, Default, Serialize, PartialEq)]
pub struct StaffForm {
    pub fullname: String,
    pub email: String,
    /// Only sent on creation
    #[serde(skip_serializing_if = "String::is_empty")]
    pub password: String,
    pub role: Vec<Role>,
    pub phone: String,
    /// Speciality ids
    pub speciality: Vec<String>,
}

impl StaffForm {
    pub fn from_member(member: &StaffMember) -> Self {
        Self {
            fullname: member.fullname.clone(),
            email: member.email.clone(),
            password: String::new(),
            role: member
                .role
                .iter()
                .filter_map(|r| Role::parse(r))
                .collect(),
            phone: member.phone.clone().unwrap_or_default(),
            speciality: member.speciality.iter().map(|s| s.id().to_string()).collect(),
        }
    }

    pub fn toggle_role(&mut self, role: Role) {
        if let Some(pos) = self.role.iter().position(|r| *r == role) {
            self.role.remove(pos);
        } else {
            self.role.push(role);
        }
    }

    pub fn toggle_speciality(&mut self, id: &str) {
        if let Some(pos) = self.speciality.iter().position(|s| s == id) {
            self.speciality.remove(pos);
        } else {
            self.speciality.push(id.to_string());
        }
    }

    /// `creating` requires a password
    pub fn missing_field(&self, creating: bool) -> Option<&'static str> {
        if self.fullname.trim().is_empty() || self.email.trim().is_empty() {
            Some("Nom et email requis")
        } else if creating && self.password.is_empty() {
            Some("Mot de passe requis")
        } else if self.role.is_empty() {
            Some("Au moins un rôle est requis")
        } else {
            None
        }
    }
}
