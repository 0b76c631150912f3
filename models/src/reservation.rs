// models/src/reservation.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A normalized reservation record, the shape submitted to the enrollment
/// endpoint. Field names are the case-sensitive wire names; every field is a
/// plain string so that absent form input survives as `""` rather than being
/// dropped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
    pub full_name: String,
    pub lrn: String,
    pub dob: String,
    pub pob: String,
    pub address: String,
    pub sex: String,
    pub nationality: String,
    pub email: String,
    pub contact_no: String,

    pub jhs_graduated: String,
    pub date_graduation: String,

    pub grade_level: String,
    pub strand: String,
    pub tvl_spec: String,
    pub general_ave: String,

    pub medical_conditions: Vec<String>,
    pub medical_other: String,
    pub how_supported: String,

    pub guardian_name: String,
    pub guardian_relationship: String,
    pub guardian_occupation: String,
    pub tel_no: String,
    pub cellphone_no: String,

    pub credentials_submitted: String,
}

/// A reservation as it sits in the local store: the submitted record plus
/// the append-time timestamp. `submitted_at` is assigned exactly once, when
/// the record is appended, and never mutated afterward.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredReservation {
    #[serde(flatten)]
    pub reservation: Reservation,
    #[serde(rename = "submittedAt")]
    pub submitted_at: DateTime<Utc>,
}
