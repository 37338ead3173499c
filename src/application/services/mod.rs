//! Application services.

mod csv_import_service;
mod talk_service;

pub use csv_import_service::{CsvImportService, parse_csv};
pub use talk_service::TalkService;
