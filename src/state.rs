use sqlx::PgPool;
use std::sync::Arc;

use crate::application::services::{CsvImportService, TalkService};
use crate::infrastructure::persistence::PgTalkRepository;

/// Shared application state injected into all handlers.
#[derive(Clone)]
pub struct AppState {
    pub talk_service: Arc<TalkService<PgTalkRepository>>,
    pub import_service: Arc<CsvImportService<PgTalkRepository>>,
    pub db: Arc<PgPool>,
}

impl AppState {
    /// Wires services to a PostgreSQL-backed repository.
    pub fn new(pool: Arc<PgPool>) -> Self {
        let repository = Arc::new(PgTalkRepository::new(pool.clone()));
        Self {
            talk_service: Arc::new(TalkService::new(repository.clone())),
            import_service: Arc::new(CsvImportService::new(repository)),
            db: pool,
        }
    }
}
