// engine/src/listing.rs

use std::collections::BTreeSet;

use chrono::Datelike;

use models::reservation::StoredReservation;

/// One row of the admin reservations table, in display order: submission
/// date, full name, grade level, strand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterRow {
    pub submitted: String,
    pub full_name: String,
    pub grade_level: String,
    pub strand: String,
}

/// The distinct calendar months (1-12) present across the records.
pub fn available_months(records: &[StoredReservation]) -> BTreeSet<u32> {
    records.iter().map(|r| r.submitted_at.month()).collect()
}

/// The distinct calendar years present across the records.
pub fn available_years(records: &[StoredReservation]) -> BTreeSet<i32> {
    records.iter().map(|r| r.submitted_at.year()).collect()
}

/// Restricts `records` to the given month and/or year; omitting a
/// constraint means match-any. Insertion order is preserved.
pub fn filter(
    records: &[StoredReservation],
    month: Option<u32>,
    year: Option<i32>,
) -> Vec<StoredReservation> {
    records
        .iter()
        .filter(|record| month.is_none_or(|m| record.submitted_at.month() == m))
        .filter(|record| year.is_none_or(|y| record.submitted_at.year() == y))
        .cloned()
        .collect()
}

/// Projects records to their table rows.
pub fn roster_rows(records: &[StoredReservation]) -> Vec<RosterRow> {
    records
        .iter()
        .map(|record| RosterRow {
            submitted: record.submitted_at.format("%-m/%-d/%Y").to_string(),
            full_name: record.reservation.full_name.clone(),
            grade_level: record.reservation.grade_level.clone(),
            strand: record.reservation.strand.clone(),
        })
        .collect()
}
