//! Talk entity representing one imported talk record.

use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use num_bigint::BigInt;

/// A talk record with engagement counts and publication date.
///
/// View and like counts are arbitrary-precision integers: source data carries
/// values beyond the 64-bit range and must never be truncated. `published_on`
/// always falls on the first of a month; source files only supply month and
/// year, so the day component is a fixed convention rather than real data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Talk {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub views: BigInt,
    pub likes: BigInt,
    pub published_on: NaiveDate,
    pub link: String,
}

impl Talk {
    /// Creates a new Talk instance.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: i64,
        title: String,
        author: String,
        views: BigInt,
        likes: BigInt,
        published_on: NaiveDate,
        link: String,
    ) -> Self {
        Self {
            id,
            title,
            author,
            views,
            likes,
            published_on,
            link,
        }
    }
}

/// Input data for persisting a talk parsed from one CSV row.
///
/// Carries no identity; the store assigns `id` on save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTalk {
    pub title: String,
    pub author: String,
    pub views: BigInt,
    pub likes: BigInt,
    pub published_on: NaiveDate,
    pub link: String,
}

/// A talk paired with its influence score for one query.
///
/// The score is derived per request from caller-supplied weights and is never
/// persisted alongside the record.
#[derive(Debug, Clone)]
pub struct ScoredTalk {
    pub talk: Talk,
    pub influence_score: BigDecimal,
}
