//! API request handlers.

mod health;
mod import;
mod talks;

pub use health::health_handler;
pub use import::import_csv_handler;
pub use talks::{
    list_talks_handler, most_influential_handler, most_influential_per_year_handler,
    most_liked_handler, most_viewed_handler, talks_by_author_handler, talks_per_year_handler,
    talks_with_scores_handler,
};
