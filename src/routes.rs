//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `POST /talks/import`                    - Batch CSV import
//! - `GET  /talks`                           - Paginated listing
//! - `GET  /talks/author/{author}`           - Talks by author
//! - `GET  /talks/year/{year}`               - Talks per calendar year
//! - `GET  /talks/with-influence-score`      - All talks scored, descending
//! - `GET  /talks/most-influential`          - Highest score under given weights
//! - `GET  /talks/most-influential/views`    - Highest view count
//! - `GET  /talks/most-influential/likes`    - Highest like count
//! - `GET  /talks/most-influential/{year}`   - Highest score within one year
//! - `GET  /health`                          - Component health check
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Body limit** - Upload size cap on the import route
//! - **Path normalization** - Trailing slash handling

use crate::api::handlers::{
    health_handler, import_csv_handler, list_talks_handler, most_influential_handler,
    most_influential_per_year_handler, most_liked_handler, most_viewed_handler,
    talks_by_author_handler, talks_per_year_handler, talks_with_scores_handler,
};
use crate::api::middleware::tracing;
use crate::state::AppState;
use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Constructs the application router with all routes and middleware.
///
/// # Arguments
///
/// - `state` - shared application state injected into all handlers
/// - `max_upload_bytes` - body size cap applied to the import route
pub fn app_router(state: AppState, max_upload_bytes: usize) -> NormalizePath<Router> {
    let router = Router::new()
        .route(
            "/talks/import",
            post(import_csv_handler).layer(DefaultBodyLimit::max(max_upload_bytes)),
        )
        .route("/talks", get(list_talks_handler))
        .route("/talks/author/{author}", get(talks_by_author_handler))
        .route("/talks/year/{year}", get(talks_per_year_handler))
        .route("/talks/with-influence-score", get(talks_with_scores_handler))
        .route("/talks/most-influential", get(most_influential_handler))
        .route("/talks/most-influential/views", get(most_viewed_handler))
        .route("/talks/most-influential/likes", get(most_liked_handler))
        .route(
            "/talks/most-influential/{year}",
            get(most_influential_per_year_handler),
        )
        .route("/health", get(health_handler))
        .with_state(state)
        .layer(tracing::layer());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}
