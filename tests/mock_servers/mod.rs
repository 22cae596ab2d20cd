//! Mock servers for integration testing
//!
//! These mock servers simulate the clinic REST backend so the API client and
//! session store can be exercised over real HTTP.

pub mod clinic_api;

pub use clinic_api::{MockClinicApi, RecordedRequest};
