// models/src/lib.rs

pub mod errors;
pub mod facility;
pub mod forms;
pub mod registry;
pub mod reservation;

pub use errors::{SiteError, SiteResult};
pub use facility::Facility;
pub use forms::{FacilityForm, ReservationForm, Track};
pub use registry::{Application, ApplicationRow, ApplicationStatus, Student};
pub use reservation::{Reservation, StoredReservation};
