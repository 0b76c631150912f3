// engine/src/app.rs

use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use client::Submitter;
use models::errors::SiteResult;
use models::facility::Facility;
use models::forms::{FacilityForm, ReservationForm};
use models::reservation::StoredReservation;
use storage::{RecordStore, KEY_FACILITIES, KEY_RESERVATIONS};

use crate::content;
use crate::listing::{self, RosterRow};
use crate::nav::{Navigator, Page};
use crate::normalize::normalize;

// Placeholder gate; real authentication is deliberately out of scope.
const ADMIN_USERNAME: &str = "admin";
const ADMIN_PASSWORD: &str = "admin123";

/// Everything the interface can ask of the core.
#[derive(Debug, Clone)]
pub enum Action {
    Navigate(Page),
    SubmitReservation(ReservationForm),
    AdminLogin { username: String, password: String },
    Logout,
    FilterReservations { month: Option<u32>, year: Option<i32> },
    AddFacility(FacilityForm),
    SaveAbout(String),
    SavePrivacy(String),
}

/// What a dispatched action hands back for display. No rendering here, just
/// the strings and rows a surface would show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Feedback {
    Shown(Page),
    ReservationSaved {
        alert: String,
        status: String,
        application_id: Option<String>,
    },
    AdminGranted,
    AdminDenied(String),
    Roster {
        rows: Vec<RosterRow>,
        months: BTreeSet<u32>,
        years: BTreeSet<i32>,
    },
    Facilities {
        admin: Vec<String>,
        public: Vec<String>,
    },
    Content {
        about: String,
        privacy: String,
    },
}

/// The application object: explicit handles, no ambient state. One instance
/// per running interface; actions are dispatched one at a time.
pub struct App {
    store: RecordStore,
    submitter: Arc<dyn Submitter>,
    nav: Navigator,
}

impl App {
    pub fn new(store: RecordStore, submitter: Arc<dyn Submitter>) -> Self {
        Self {
            store,
            submitter,
            nav: Navigator::default(),
        }
    }

    pub fn navigator(&self) -> &Navigator {
        &self.nav
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    /// Executes one command. Only the reservation submission awaits; every
    /// other action completes synchronously under the hood.
    pub async fn dispatch(&mut self, action: Action) -> SiteResult<Feedback> {
        match action {
            Action::Navigate(page) => {
                self.nav.show(page);
                Ok(Feedback::Shown(page))
            }
            Action::SubmitReservation(form) => self.submit_reservation(form).await,
            Action::AdminLogin { username, password } => {
                if username.trim() == ADMIN_USERNAME && password.trim() == ADMIN_PASSWORD {
                    self.nav.show(Page::AdminDashboard);
                    Ok(Feedback::AdminGranted)
                } else {
                    Ok(Feedback::AdminDenied("Invalid account.".to_string()))
                }
            }
            Action::Logout => {
                self.nav.show(Page::Home);
                Ok(Feedback::Shown(Page::Home))
            }
            Action::FilterReservations { month, year } => Ok(self.reload_roster(month, year)),
            Action::AddFacility(form) => {
                let facility = Facility {
                    name: form.facility_name,
                    purpose: form.facility_purpose,
                    description: form.facility_description,
                };
                self.store.append(KEY_FACILITIES, facility)?;
                Ok(self.render_facilities())
            }
            Action::SaveAbout(text) => {
                content::save_about(&self.store, &text)?;
                Ok(self.reload_content())
            }
            Action::SavePrivacy(text) => {
                content::save_privacy(&self.store, &text)?;
                Ok(self.reload_content())
            }
        }
    }

    /// Normalize, append locally, then echo to the enrollment endpoint.
    /// The local append is unconditional; a remote failure only changes the
    /// message, never the store.
    async fn submit_reservation(&mut self, form: ReservationForm) -> SiteResult<Feedback> {
        let reservation = normalize(&form);
        let stored = StoredReservation {
            reservation: reservation.clone(),
            submitted_at: Utc::now(),
        };
        self.store.append(KEY_RESERVATIONS, stored)?;

        match self.submitter.submit(&reservation).await {
            Ok(application_id) => {
                info!("Reservation accepted, application id {}", application_id);
                Ok(Feedback::ReservationSaved {
                    alert: format!("Submitted! Application ID: {}", application_id),
                    status: "Reservation submitted successfully.".to_string(),
                    application_id: Some(application_id),
                })
            }
            Err(err) => {
                warn!("Remote submission failed: {}", err);
                Ok(Feedback::ReservationSaved {
                    alert: format!("Error: {}", err),
                    status: "Submission failed.".to_string(),
                    application_id: None,
                })
            }
        }
    }

    fn reload_roster(&self, month: Option<u32>, year: Option<i32>) -> Feedback {
        let records: Vec<StoredReservation> = self.store.load(KEY_RESERVATIONS, Vec::new());
        let months = listing::available_months(&records);
        let years = listing::available_years(&records);
        let rows = listing::roster_rows(&listing::filter(&records, month, year));
        Feedback::Roster { rows, months, years }
    }

    fn render_facilities(&self) -> Feedback {
        let facilities: Vec<Facility> = self.store.load(KEY_FACILITIES, Vec::new());
        Feedback::Facilities {
            admin: facilities.iter().map(Facility::admin_line).collect(),
            public: facilities.iter().map(Facility::public_line).collect(),
        }
    }

    fn reload_content(&self) -> Feedback {
        Feedback::Content {
            about: content::load_about(&self.store),
            privacy: content::load_privacy(&self.store),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use client::SubmitError;
    use tempfile::TempDir;

    struct StubSubmitter {
        response: Result<String, String>,
    }

    #[async_trait]
    impl Submitter for StubSubmitter {
        async fn submit(
            &self,
            _reservation: &models::reservation::Reservation,
        ) -> Result<String, SubmitError> {
            self.response.clone().map_err(SubmitError::Rejected)
        }
    }

    fn open_app(response: Result<String, String>) -> (TempDir, App) {
        let dir = TempDir::new().unwrap();
        let store = RecordStore::open(dir.path().join("records")).unwrap();
        let app = App::new(store, Arc::new(StubSubmitter { response }));
        (dir, app)
    }

    fn form() -> ReservationForm {
        ReservationForm {
            surname: "Cruz".to_string(),
            given_name: "Ana".to_string(),
            lrn: "123456789012".to_string(),
            track: "Academic Track".to_string(),
            academic_strand: "STEM".to_string(),
            grade_level: "Grade 11".to_string(),
            ..ReservationForm::default()
        }
    }

    #[tokio::test]
    async fn should_append_and_report_application_id() {
        let (_dir, mut app) = open_app(Ok("42".to_string()));
        let feedback = app
            .dispatch(Action::SubmitReservation(form()))
            .await
            .unwrap();

        assert_eq!(
            feedback,
            Feedback::ReservationSaved {
                alert: "Submitted! Application ID: 42".to_string(),
                status: "Reservation submitted successfully.".to_string(),
                application_id: Some("42".to_string()),
            }
        );
        let records: Vec<StoredReservation> = app.store().load(KEY_RESERVATIONS, Vec::new());
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].reservation.full_name, "Cruz Ana");
    }

    #[tokio::test]
    async fn should_keep_local_record_when_remote_rejects() {
        let (_dir, mut app) = open_app(Err("duplicate LRN".to_string()));
        let feedback = app
            .dispatch(Action::SubmitReservation(form()))
            .await
            .unwrap();

        assert_eq!(
            feedback,
            Feedback::ReservationSaved {
                alert: "Error: duplicate LRN".to_string(),
                status: "Submission failed.".to_string(),
                application_id: None,
            }
        );
        let records: Vec<StoredReservation> = app.store().load(KEY_RESERVATIONS, Vec::new());
        assert_eq!(records.len(), 1);
    }

    #[tokio::test]
    async fn should_reload_roster_after_appends() {
        let (_dir, mut app) = open_app(Ok("1".to_string()));
        app.dispatch(Action::SubmitReservation(form())).await.unwrap();
        app.dispatch(Action::SubmitReservation(form())).await.unwrap();

        let feedback = app
            .dispatch(Action::FilterReservations { month: None, year: None })
            .await
            .unwrap();
        let Feedback::Roster { rows, months, years } = feedback else {
            panic!("expected roster feedback");
        };
        assert_eq!(rows.len(), 2);
        assert_eq!(months.len(), 1);
        assert_eq!(years.len(), 1);
    }

    #[tokio::test]
    async fn should_gate_admin_dashboard() {
        let (_dir, mut app) = open_app(Ok("1".to_string()));
        let denied = app
            .dispatch(Action::AdminLogin {
                username: "admin".to_string(),
                password: "wrong".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(denied, Feedback::AdminDenied("Invalid account.".to_string()));
        assert_eq!(app.navigator().current(), Page::Home);

        let granted = app
            .dispatch(Action::AdminLogin {
                username: "admin".to_string(),
                password: "admin123".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(granted, Feedback::AdminGranted);
        assert_eq!(app.navigator().current(), Page::AdminDashboard);
    }

    #[tokio::test]
    async fn should_render_facility_lines() {
        let (_dir, mut app) = open_app(Ok("1".to_string()));
        let feedback = app
            .dispatch(Action::AddFacility(FacilityForm {
                facility_name: "Library".to_string(),
                facility_purpose: "Research".to_string(),
                facility_description: "Open 8am-5pm".to_string(),
            }))
            .await
            .unwrap();
        assert_eq!(
            feedback,
            Feedback::Facilities {
                admin: vec!["Library - Research".to_string()],
                public: vec!["Library: Open 8am-5pm".to_string()],
            }
        );
    }

    #[tokio::test]
    async fn should_reload_content_after_save() {
        let (_dir, mut app) = open_app(Ok("1".to_string()));
        let feedback = app
            .dispatch(Action::SaveAbout("Our school.".to_string()))
            .await
            .unwrap();
        let Feedback::Content { about, privacy } = feedback else {
            panic!("expected content feedback");
        };
        assert_eq!(about, "Our school.");
        assert_eq!(privacy, content::DEFAULT_PRIVACY);
    }

    #[tokio::test]
    async fn should_navigate_between_pages() {
        let (_dir, mut app) = open_app(Ok("1".to_string()));
        let shown = app.dispatch(Action::Navigate(Page::Privacy)).await.unwrap();
        assert_eq!(shown, Feedback::Shown(Page::Privacy));
        assert_eq!(app.navigator().current(), Page::Privacy);

        app.dispatch(Action::Logout).await.unwrap();
        assert_eq!(app.navigator().current(), Page::Home);
    }
}
