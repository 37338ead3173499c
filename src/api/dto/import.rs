//! DTOs for the CSV import endpoint.

use serde::Serialize;

/// Response for a successful batch import.
#[derive(Debug, Serialize)]
pub struct ImportResponse {
    pub message: String,
    pub imported: usize,
}
