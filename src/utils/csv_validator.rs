//! Whole-batch CSV validation.
//!
//! The validator walks every data row and accumulates structured errors so a
//! caller can report all problems from one submission instead of forcing a
//! fix-one-resubmit loop. Only a broken header short-circuits: without the six
//! required columns no per-row check is meaningful.

use std::collections::HashSet;
use std::str::FromStr;

use chrono::NaiveDate;
use num_bigint::BigInt;
use num_traits::Zero;
use serde::Serialize;
use serde_json::json;

use crate::error::AppError;
use crate::utils::month_format::parse_month_year;
use crate::utils::record_parser::{HeaderIndex, RawTalkRow, csv_reader, read_failure};

/// One structured validation error.
///
/// `row` is 1-based counting the header, so the first data row is row 2.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationError {
    pub row: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    pub error: String,
}

impl ValidationError {
    pub fn for_row(row: u64, error: impl Into<String>) -> Self {
        Self {
            row,
            column: None,
            value: None,
            error: error.into(),
        }
    }

    pub fn for_column(
        row: u64,
        column: impl Into<String>,
        value: impl Into<String>,
        error: impl Into<String>,
    ) -> Self {
        Self {
            row,
            column: Some(column.into()),
            value: Some(value.into()),
            error: error.into(),
        }
    }
}

/// Validates a whole CSV batch against the given snapshot of links already in
/// the store.
///
/// Returns the accumulated error list in row order (check order within a row);
/// an empty list means the batch is fully valid. The existing-link set is a
/// snapshot taken by the caller at the start of the import: links committed by
/// a concurrent import after that point are not seen here and are only caught
/// by the store's uniqueness constraint at save time.
///
/// # Errors
///
/// Returns [`AppError::Validation`] without row detail when the header is
/// missing required columns (the batch-level failure) or when the input cannot
/// be read as CSV at all.
pub fn validate_csv(
    data: &[u8],
    existing_links: &HashSet<String>,
    today: NaiveDate,
) -> Result<Vec<ValidationError>, AppError> {
    let mut reader = csv_reader(data);
    let headers = HeaderIndex::from_headers(reader.headers().map_err(|e| read_failure(&e))?);

    if !headers.has_all_required() {
        return Err(AppError::bad_request(
            "CSV validation failed",
            json!([{ "error": "CSV file contains empty or invalid column names." }]),
        ));
    }

    let mut errors = Vec::new();
    let mut links_in_file: HashSet<String> = HashSet::new();

    for (idx, record) in reader.records().enumerate() {
        let record = record.map_err(|e| read_failure(&e))?;
        let row = idx as u64 + 2;
        validate_row(
            &headers,
            &record,
            row,
            existing_links,
            &mut links_in_file,
            today,
            &mut errors,
        );
    }

    Ok(errors)
}

fn validate_row(
    headers: &HeaderIndex,
    record: &csv::StringRecord,
    row: u64,
    existing_links: &HashSet<String>,
    links_in_file: &mut HashSet<String>,
    today: NaiveDate,
    errors: &mut Vec<ValidationError>,
) {
    let Some(raw) = RawTalkRow::extract(headers, record) else {
        errors.push(ValidationError::for_row(row, "Missing required fields."));
        return;
    };

    // Check against links already persisted in the store
    if existing_links.contains(raw.link) {
        errors.push(ValidationError::for_column(
            row,
            "link",
            raw.link,
            "Duplicate talk link found.",
        ));
        return;
    }

    // Check against links seen earlier in this same file; only the second and
    // later occurrences are errors
    if !links_in_file.insert(raw.link.to_string()) {
        errors.push(ValidationError::for_column(
            row,
            "link",
            raw.link,
            "Duplicate talk link found in the same CSV file.",
        ));
        return;
    }

    validate_count(raw.views, "views", row, errors);
    validate_count(raw.likes, "likes", row, errors);
    validate_date(raw.date, row, today, errors);
}

fn validate_count(value: &str, column: &'static str, row: u64, errors: &mut Vec<ValidationError>) {
    match BigInt::from_str(value) {
        Ok(number) => {
            if number < BigInt::zero() {
                errors.push(ValidationError::for_column(
                    row,
                    column,
                    value,
                    "Number must be non-negative.",
                ));
            }
        }
        Err(_) => errors.push(ValidationError::for_column(
            row,
            column,
            value,
            "Invalid number format.",
        )),
    }
}

fn validate_date(value: &str, row: u64, today: NaiveDate, errors: &mut Vec<ValidationError>) {
    match parse_month_year(value) {
        Some(date) => {
            if date > today {
                errors.push(ValidationError::for_column(
                    row,
                    "date",
                    value,
                    "Date cannot be in the future.",
                ));
            }
        }
        None => errors.push(ValidationError::for_column(
            row,
            "date",
            value,
            "Invalid date format. Expected format: '<full month name> <year>' (example: 'February 2025').",
        )),
    }
}
