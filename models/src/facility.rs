use serde::{Deserialize, Serialize};

/// A school facility entry, append-only like the reservation list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Facility {
    pub name: String,
    pub purpose: String,
    pub description: String,
}

impl Facility {
    /// The admin-side list line.
    pub fn admin_line(&self) -> String {
        format!("{} - {}", self.name, self.purpose)
    }

    /// The public-side list line.
    pub fn public_line(&self) -> String {
        format!("{}: {}", self.name, self.description)
    }
}
