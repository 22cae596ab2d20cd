//! Clinique CMC-UA web portal
//!
//! Public site of the clinic plus the staff dashboard, rendered with Dioxus
//! fullstack and talking to the clinic REST backend.
//!
//! This library provides:
//! - Session handling, role switching and the authenticated API client
//! - Role-based menus and route gating
//! - Clinic records, billing rules and list filters
//! - The Dioxus app: layouts, dashboard pages and the public pages

pub mod app;
pub mod auth;
pub mod clinic;
pub mod config;
