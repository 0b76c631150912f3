// engine/src/normalize.rs

use models::forms::{ReservationForm, Track};
use models::reservation::Reservation;

/// Builds the canonical reservation record from a submitted form. Pure: the
/// same form always yields the same record; the submission timestamp is the
/// caller's business, assigned at append time.
///
/// Every form field maps to exactly one output attribute. The two derived
/// fields are the full name (surname, given, middle; trimmed, empties
/// dropped, single-space joined) and the strand (per track).
pub fn normalize(form: &ReservationForm) -> Reservation {
    let full_name = assemble_name(&[&form.surname, &form.given_name, &form.middle_name]);
    let strand = Track::from_value(&form.track).strand(&form.academic_strand);

    Reservation {
        full_name,
        lrn: form.lrn.clone(),
        dob: form.dob.clone(),
        pob: form.pob.clone(),
        address: form.address.clone(),
        sex: form.sex.clone(),
        nationality: form.nationality.clone(),
        email: form.email.clone(),
        contact_no: form.contact_no.clone(),
        jhs_graduated: form.jhs_graduated.clone(),
        date_graduation: form.date_graduation.clone(),
        grade_level: form.grade_level.clone(),
        strand,
        tvl_spec: form.tvl_spec.clone(),
        general_ave: form.general_ave.clone(),
        medical_conditions: form.medical.clone(),
        medical_other: form.medical_other.clone(),
        how_supported: form.how_supported.clone(),
        guardian_name: form.guardian_name.clone(),
        guardian_relationship: form.relationship.clone(),
        guardian_occupation: form.occupation.clone(),
        tel_no: form.tel_no.clone(),
        cellphone_no: form.cellphone_no.clone(),
        credentials_submitted: form.credentials_submitted.clone(),
    }
}

fn assemble_name(parts: &[&str]) -> String {
    parts
        .iter()
        .map(|part| part.trim())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
