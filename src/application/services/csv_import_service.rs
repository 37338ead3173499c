//! CSV import pipeline.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::Utc;
use serde_json::json;

use crate::domain::entities::NewTalk;
use crate::domain::repositories::TalkRepository;
use crate::error::AppError;
use crate::utils::csv_validator::validate_csv;
use crate::utils::record_parser::{HeaderIndex, csv_reader, parse_row, read_failure};

/// Service orchestrating batch CSV imports.
///
/// An import is all-or-nothing: the whole file is validated first and nothing
/// is persisted unless every row passes. Validation runs against a snapshot of
/// the store's link set taken at the start of the call; imports racing between
/// that snapshot and the save rely on the store's uniqueness constraint, whose
/// violation surfaces as a conflict error.
pub struct CsvImportService<R: TalkRepository> {
    repository: Arc<R>,
}

impl<R: TalkRepository> CsvImportService<R> {
    /// Creates a new import service.
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Imports a whole CSV file, returning the number of persisted records.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] carrying the full ordered error list
    /// when any row fails, or a single header-shape entry when the required
    /// columns are missing. Returns [`AppError::Conflict`] when a concurrent
    /// import committed a colliding link after validation.
    pub async fn import_csv(&self, data: &[u8]) -> Result<usize, AppError> {
        let existing_links: HashSet<String> = self
            .repository
            .find_all()
            .await?
            .into_iter()
            .map(|talk| talk.link)
            .collect();

        let today = Utc::now().date_naive();
        let errors = validate_csv(data, &existing_links, today)?;
        if !errors.is_empty() {
            tracing::error!(error_count = errors.len(), "CSV validation failed");
            return Err(AppError::bad_request("CSV validation failed", json!(errors)));
        }

        let talks = parse_csv(data)?;
        let saved = self.repository.save_all(talks).await?;
        tracing::info!(count = saved.len(), "talks imported successfully");

        Ok(saved.len())
    }
}

/// Second-pass parse of a validated file into persistable records.
///
/// Rows that fail to parse here slipped past validation somehow; they are
/// skipped and logged rather than aborting the import that validation already
/// approved.
pub fn parse_csv(data: &[u8]) -> Result<Vec<NewTalk>, AppError> {
    let mut reader = csv_reader(data);
    let headers = HeaderIndex::from_headers(reader.headers().map_err(|e| read_failure(&e))?);

    let mut talks = Vec::new();
    for (idx, record) in reader.records().enumerate() {
        let record = record.map_err(|e| read_failure(&e))?;
        match parse_row(&headers, &record) {
            Ok(talk) => talks.push(talk),
            Err(e) => {
                tracing::error!(row = idx as u64 + 2, error = %e, "skipping invalid row");
            }
        }
    }

    Ok(talks)
}
