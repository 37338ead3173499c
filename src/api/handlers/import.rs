//! Handler for the CSV import endpoint.

use axum::{
    Json,
    body::Bytes,
    extract::{Multipart, State},
};
use serde_json::json;

use crate::api::dto::import::ImportResponse;
use crate::error::AppError;
use crate::state::AppState;

/// Imports a batch of talks from an uploaded CSV file.
///
/// # Endpoint
///
/// `POST /talks/import`
///
/// # Request
///
/// `multipart/form-data` with the CSV under the `file` field. Expected
/// columns (case-insensitive, any order): `title, author, views, likes,
/// date, link`.
///
/// # Response
///
/// ```json
/// {
///   "message": "CSV file imported successfully",
///   "imported": 42
/// }
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request with the full ordered error list when validation
/// fails; nothing is persisted in that case. Returns 409 Conflict when a
/// concurrent import committed a colliding link between validation and save.
pub async fn import_csv_handler(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<ImportResponse>, AppError> {
    let data = read_file_field(multipart).await?;
    if data.is_empty() {
        return Err(AppError::bad_request("CSV file is required", json!({})));
    }

    let imported = state.import_service.import_csv(&data).await?;

    Ok(Json(ImportResponse {
        message: "CSV file imported successfully".to_string(),
        imported,
    }))
}

/// Extracts the `file` field from the multipart body.
async fn read_file_field(mut multipart: Multipart) -> Result<Bytes, AppError> {
    while let Some(field) = multipart.next_field().await.map_err(|e| {
        AppError::bad_request("Malformed multipart request", json!({ "reason": e.to_string() }))
    })? {
        if field.name() == Some("file") {
            return field.bytes().await.map_err(|e| {
                AppError::bad_request(
                    "Failed to read uploaded file",
                    json!({ "reason": e.to_string() }),
                )
            });
        }
    }

    Err(AppError::bad_request("CSV file is required", json!({})))
}
