//! Shared UI components for the Dioxus fullstack web UI.

pub mod dashboard_layout;
pub mod error_alert;
pub mod form_inputs;
pub mod loading;
pub mod login_modal;
pub mod public_layout;
pub mod role_link;
pub mod sidebar;
pub mod stat_card;
pub mod topbar;

pub use dashboard_layout::{AccessDenied, DashboardLayout};
pub use error_alert::{ErrorAlert, SuccessAlert};
pub use form_inputs::{options, parse_amount, BillingFields, SelectField, TextField, PAYMENT_METHODS};
pub use loading::Loading;
pub use login_modal::LoginModal;
pub use public_layout::{Footer, Navbar, PublicLayout};
pub use role_link::{can_open, RoleLink};
pub use sidebar::Sidebar;
pub use stat_card::StatCard;
pub use topbar::Topbar;
