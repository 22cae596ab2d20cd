//! Page components, one module per area of the site.

mod analyses;
mod dashboard_home;
mod not_found;
mod operations;
mod patients;
mod payments;
mod public;
mod settings;
mod specialities;
mod stats;
mod users;
mod visits;

pub use analyses::{Analyses, AnalysisDetail, NewAnalysis};
pub use dashboard_home::DashboardHome;
pub use not_found::{Consultations, Dettes, NotFound, Recettes, UnderConstruction};
pub use operations::{NewOperation, Operations};
pub use patients::{EditPatient, NewPatient, PatientDetail, Patients};
pub use payments::Payments;
pub use public::{APropos, Contact, Equipe, Home, Laboratoire, Urologie};
pub use settings::Settings;
pub use specialities::Specialities;
pub use stats::Stats;
pub use users::Users;
pub use visits::{NewVisit, VisitDetail, Visits};
