//! Clinic domain: backend records, billing arithmetic and list filters.
//!
//! Nothing here performs I/O; pages fetch through [`crate::auth::ApiClient`]
//! and hand the decoded records to these helpers.

pub mod billing;
pub mod filters;
pub mod records;
pub mod stats;

pub use billing::{format_amount, AnalysisCart, Billing, BillingError};
pub use filters::{
    age_from_iso, display_date, DateWindow, Filterable, ListFilter, PaymentTotals, ANY_STATUS,
};
pub use records::*;
pub use stats::{plural_label, ClinicStats};
