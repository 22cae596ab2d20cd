//! Dioxus fullstack application entry point.
//!
//! This module provides the root App component and the route tree: a public
//! site and a gated `/dashboard` subtree, plus a catch-all not-found page.

use dioxus::prelude::*;

pub mod auth_context;
pub mod components;
pub mod pages;

use auth_context::use_auth_provider;
use components::{DashboardLayout, PublicLayout};
use pages::*;

/// Root app component with routing
#[component]
pub fn App() -> Element {
    // Initialize auth context at app root (rehydrates from localStorage in the browser)
    use_auth_provider();

    rsx! {
        document::Script { src: "https://cdn.tailwindcss.com" }
        Router::<Route> {}
    }
}

/// Application routes
#[derive(Clone, Routable, Debug, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(PublicLayout)]
        #[route("/")]
        Home {},
        #[route("/urologie")]
        Urologie {},
        #[route("/laboratoire")]
        Laboratoire {},
        #[route("/a-propos")]
        APropos {},
        #[route("/equipe")]
        Equipe {},
        #[route("/contact")]
        Contact {},
    #[end_layout]

    #[nest("/dashboard")]
        #[layout(DashboardLayout)]
            #[route("/")]
            DashboardHome {},
            #[route("/users")]
            Users {},
            #[route("/specialities")]
            Specialities {},
            #[route("/stats")]
            Stats {},
            #[route("/settings")]
            Settings {},
            #[route("/patients")]
            Patients {},
            #[route("/patients/new")]
            NewPatient {},
            #[route("/patients/:id")]
            PatientDetail { id: String },
            #[route("/patients/:id/edit")]
            EditPatient { id: String },
            #[route("/visites")]
            Visits {},
            #[route("/visites/new")]
            NewVisit {},
            #[route("/visites/:id")]
            VisitDetail { id: String },
            #[route("/analyses")]
            Analyses {},
            #[route("/analyses/new")]
            NewAnalysis {},
            #[route("/analyses/:id")]
            AnalysisDetail { id: String },
            #[route("/operations")]
            Operations {},
            #[route("/operations/new")]
            NewOperation {},
            #[route("/paiements")]
            Payments {},
            #[route("/consultations")]
            Consultations {},
            #[route("/recettes")]
            Recettes {},
            #[route("/dettes")]
            Dettes {},
        #[end_layout]
    #[end_nest]

    #[route("/:..segments")]
    NotFound { segments: Vec<String> },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::components::can_open;
    use crate::auth::{menu_for, Role};
    use std::str::FromStr;

    fn parse(path: &str) -> Route {
        Route::from_str(path).unwrap_or_else(|_| panic!("{path} should parse"))
    }

    #[test]
    fn every_menu_entry_has_a_page() {
        for role in Role::ALL {
            for entry in menu_for(Some(role)) {
                let route = parse(entry.path);
                assert!(
                    !matches!(route, Route::NotFound { .. }),
                    "{} ({}) has no route",
                    entry.path,
                    role
                );
            }
        }
    }

    #[test]
    fn static_segments_win_over_ids() {
        assert_eq!(parse("/dashboard/patients/new"), Route::NewPatient {});
        assert_eq!(
            parse("/dashboard/patients/abc123"),
            Route::PatientDetail { id: "abc123".into() }
        );
        assert_eq!(
            parse("/dashboard/patients/abc123/edit"),
            Route::EditPatient { id: "abc123".into() }
        );
    }

    #[test]
    fn unknown_paths_fall_through_to_not_found() {
        assert!(matches!(parse("/nowhere"), Route::NotFound { .. }));
        assert!(matches!(parse("/dashboard/nowhere"), Route::NotFound { .. }));
    }

    #[test]
    fn public_paths_render_public_pages() {
        assert_eq!(parse("/"), Route::Home {});
        assert_eq!(parse("/a-propos"), Route::APropos {});
        assert_eq!(Route::Contact {}.to_string(), "/contact");
    }

    #[test]
    fn medecin_follows_patient_record_to_analyses_but_not_visits() {
        let medecin = Some(Role::Medecin);
        assert!(can_open(medecin, &Route::PatientDetail { id: "p1".into() }));
        assert!(can_open(medecin, &Route::EditPatient { id: "p1".into() }));
        assert!(can_open(medecin, &Route::NewAnalysis {}));
        assert!(!can_open(medecin, &Route::NewVisit {}));
        assert!(!can_open(medecin, &Route::VisitDetail { id: "v1".into() }));
    }

    #[test]
    fn laborantin_cannot_open_patient_records() {
        let laborantin = Some(Role::Laborantin);
        assert!(can_open(laborantin, &Route::AnalysisDetail { id: "a1".into() }));
        assert!(!can_open(laborantin, &Route::PatientDetail { id: "p1".into() }));
    }

    #[test]
    fn public_pages_and_dashboard_home_open_to_every_role() {
        for role in Role::ALL {
            assert!(can_open(Some(role), &Route::Home {}));
            assert!(can_open(Some(role), &Route::DashboardHome {}));
        }
        assert!(can_open(None, &Route::Contact {}));
    }

    #[test]
    fn secretaire_overview_links_stay_within_menu() {
        let secretaire = Some(Role::Secretaire);
        for route in [
            Route::NewPatient {},
            Route::NewVisit {},
            Route::Visits {},
            Route::Patients {},
            Route::Payments {},
            Route::VisitDetail { id: "v1".into() },
        ] {
            assert!(can_open(secretaire, &route), "{route} refused");
        }
    }

    #[test]
    fn dashboard_routes_display_their_paths() {
        assert_eq!(Route::Payments {}.to_string(), "/dashboard/paiements");
        assert_eq!(
            Route::VisitDetail { id: "v1".into() }.to_string(),
            "/dashboard/visites/v1"
        );
    }
}
