// models/src/forms.rs

use serde::{Deserialize, Serialize};

/// The raw reservation form, one field per input control. Deserialization is
/// strict about names (an unrecognized key is an error) but lenient about
/// presence: every field defaults to empty, so a partially filled form still
/// produces a complete mapping.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct ReservationForm {
    pub surname: String,
    pub given_name: String,
    pub middle_name: String,
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
    pub track: String,
    pub academic_strand: String,
    pub tvl_spec: String,
    pub general_ave: String,

    // Multi-select control; all checked values, in selection order.
    #[serde(rename = "medical[]")]
    pub medical: Vec<String>,
    pub medical_other: String,
    pub how_supported: String,

    pub guardian_name: String,
    pub relationship: String,
    pub occupation: String,
    pub tel_no: String,
    pub cellphone_no: String,

    pub credentials_submitted: String,
}

/// The facility form fields, named after the input controls.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct FacilityForm {
    pub facility_name: String,
    pub facility_purpose: String,
    pub facility_description: String,
}

/// The enrollment track selected on the form. Anything other than the two
/// known literals falls through to `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Track {
    Academic,
    Tvl,
    Other,
}

impl Track {
    pub const ACADEMIC: &'static str = "Academic Track";
    pub const TVL: &'static str = "TVL Track";

    pub fn from_value(value: &str) -> Self {
        match value {
            Self::ACADEMIC => Track::Academic,
            Self::TVL => Track::Tvl,
            _ => Track::Other,
        }
    }

    /// Derives the strand column value: the academic strand for the academic
    /// track, the fixed literal `"TVL"` for the TVL track, empty otherwise.
    pub fn strand(self, academic_strand: &str) -> String {
        match self {
            Track::Academic => academic_strand.to_string(),
            Track::Tvl => "TVL".to_string(),
            Track::Other => String::new(),
        }
    }
}
