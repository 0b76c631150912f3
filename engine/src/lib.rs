// engine/src/lib.rs
//
// The application core of the reservation site, independent of any
// rendering surface. Commands arrive as typed actions (`app::Action`);
// state lives in explicit handles owned by `app::App`.

pub mod app;
pub mod content;
pub mod listing;
pub mod nav;
pub mod normalize;

pub use app::{Action, App, Feedback};
pub use listing::{available_months, available_years, filter, roster_rows, RosterRow};
pub use nav::{Navigator, Page};
pub use normalize::normalize;
