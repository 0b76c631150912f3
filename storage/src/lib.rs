// storage/src/lib.rs

pub mod registry;
pub mod store;

pub use registry::RegistryStore;
pub use store::{RecordStore, KEY_ABOUT, KEY_FACILITIES, KEY_PRIVACY, KEY_RESERVATIONS};
