//! Repository trait for talk data access.

use crate::domain::entities::{NewTalk, Talk};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::NaiveDate;
use serde_json::json;

/// Sortable columns for the paginated listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Title,
    Author,
    Views,
    Likes,
    Date,
}

impl SortField {
    /// Database column backing this sort field.
    pub fn column(&self) -> &'static str {
        match self {
            SortField::Title => "title",
            SortField::Author => "author",
            SortField::Views => "views",
            SortField::Likes => "likes",
            SortField::Date => "published_on",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn keyword(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

/// Sort criteria parsed from a `field,direction` query string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec {
    pub field: SortField,
    pub direction: SortDirection,
}

impl SortSpec {
    /// Parses sort criteria such as `"likes,desc"` or `"title"`.
    ///
    /// Direction defaults to ascending when omitted. Fields and directions are
    /// matched case-insensitively against a closed whitelist.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] for unknown fields or directions.
    pub fn parse(raw: &str) -> Result<Self, AppError> {
        let mut parts = raw.split(',').map(str::trim);

        let field = match parts.next().unwrap_or("").to_ascii_lowercase().as_str() {
            "title" => SortField::Title,
            "author" => SortField::Author,
            "views" => SortField::Views,
            "likes" => SortField::Likes,
            "date" => SortField::Date,
            other => {
                return Err(AppError::bad_request(
                    "Unknown sort field",
                    json!({ "field": other }),
                ));
            }
        };

        let direction = match parts.next() {
            None => SortDirection::Asc,
            Some(dir) => match dir.to_ascii_lowercase().as_str() {
                "asc" => SortDirection::Asc,
                "desc" => SortDirection::Desc,
                other => {
                    return Err(AppError::bad_request(
                        "Unknown sort direction",
                        json!({ "direction": other }),
                    ));
                }
            },
        };

        Ok(Self { field, direction })
    }
}

/// Repository interface for the talk store.
///
/// The store is a key-ordered collection of immutable records queryable by
/// exact field match and by a date range. There is no update or delete path.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgTalkRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TalkRepository: Send + Sync {
    /// Returns all talks in insertion order.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_all(&self) -> Result<Vec<Talk>, AppError>;

    /// Returns all talks by the given author.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_author(&self, author: &str) -> Result<Vec<Talk>, AppError>;

    /// Returns talks published within `[start, end]` (inclusive).
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_date_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Talk>, AppError>;

    /// Returns the `limit` talks with the highest view counts.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_top_by_views_desc(&self, limit: i64) -> Result<Vec<Talk>, AppError>;

    /// Returns the `limit` talks with the highest like counts.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_top_by_likes_desc(&self, limit: i64) -> Result<Vec<Talk>, AppError>;

    /// Lists talks with pagination and sorting.
    ///
    /// `page` is 0-indexed.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn list(&self, page: i64, page_size: i64, sort: SortSpec)
    -> Result<Vec<Talk>, AppError>;

    /// Persists a whole batch, assigning identities.
    ///
    /// The batch is saved atomically: either every record is committed or none.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if a link collides with an existing record
    /// (the store-level uniqueness backstop for concurrent imports).
    /// Returns [`AppError::Internal`] on database errors.
    async fn save_all(&self, talks: Vec<NewTalk>) -> Result<Vec<Talk>, AppError>;
}
