//! PostgreSQL implementation of the talk repository.

use async_trait::async_trait;
use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use num_bigint::BigInt;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use std::sync::Arc;

use crate::domain::entities::{NewTalk, Talk};
use crate::domain::repositories::{SortSpec, TalkRepository};
use crate::error::AppError;

const TALK_COLUMNS: &str = "id, title, author, views, likes, published_on, link";

/// PostgreSQL repository for talk storage and retrieval.
///
/// View and like counts are stored as NUMERIC so values beyond the 64-bit
/// range survive the round trip. The `link` column carries a UNIQUE
/// constraint; it is the backstop for imports racing past validation.
pub struct PgTalkRepository {
    pool: Arc<PgPool>,
}

impl PgTalkRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

fn row_to_talk(row: &PgRow) -> Result<Talk, AppError> {
    Ok(Talk::new(
        row.try_get("id")?,
        row.try_get("title")?,
        row.try_get("author")?,
        numeric_to_count(row.try_get("views")?),
        numeric_to_count(row.try_get("likes")?),
        row.try_get("published_on")?,
        row.try_get("link")?,
    ))
}

/// NUMERIC → arbitrary-precision integer. Counts are stored whole, so the
/// scale-0 conversion is lossless.
fn numeric_to_count(value: BigDecimal) -> BigInt {
    value.with_scale(0).into_bigint_and_exponent().0
}

fn count_to_numeric(value: &BigInt) -> BigDecimal {
    BigDecimal::from(value.clone())
}

#[async_trait]
impl TalkRepository for PgTalkRepository {
    async fn find_all(&self) -> Result<Vec<Talk>, AppError> {
        let rows = sqlx::query(&format!("SELECT {TALK_COLUMNS} FROM talks ORDER BY id"))
            .fetch_all(self.pool.as_ref())
            .await?;

        rows.iter().map(row_to_talk).collect()
    }

    async fn find_by_author(&self, author: &str) -> Result<Vec<Talk>, AppError> {
        let rows = sqlx::query(&format!(
            "SELECT {TALK_COLUMNS} FROM talks WHERE author = $1 ORDER BY id"
        ))
        .bind(author)
        .fetch_all(self.pool.as_ref())
        .await?;

        rows.iter().map(row_to_talk).collect()
    }

    async fn find_by_date_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Talk>, AppError> {
        let rows = sqlx::query(&format!(
            "SELECT {TALK_COLUMNS} FROM talks WHERE published_on BETWEEN $1 AND $2 ORDER BY id"
        ))
        .bind(start)
        .bind(end)
        .fetch_all(self.pool.as_ref())
        .await?;

        rows.iter().map(row_to_talk).collect()
    }

    async fn find_top_by_views_desc(&self, limit: i64) -> Result<Vec<Talk>, AppError> {
        let rows = sqlx::query(&format!(
            "SELECT {TALK_COLUMNS} FROM talks ORDER BY views DESC, id LIMIT $1"
        ))
        .bind(limit)
        .fetch_all(self.pool.as_ref())
        .await?;

        rows.iter().map(row_to_talk).collect()
    }

    async fn find_top_by_likes_desc(&self, limit: i64) -> Result<Vec<Talk>, AppError> {
        let rows = sqlx::query(&format!(
            "SELECT {TALK_COLUMNS} FROM talks ORDER BY likes DESC, id LIMIT $1"
        ))
        .bind(limit)
        .fetch_all(self.pool.as_ref())
        .await?;

        rows.iter().map(row_to_talk).collect()
    }

    async fn list(
        &self,
        page: i64,
        page_size: i64,
        sort: SortSpec,
    ) -> Result<Vec<Talk>, AppError> {
        let offset = page * page_size;

        // Sort column and direction come from closed enums, never raw input
        let query = format!(
            "SELECT {TALK_COLUMNS} FROM talks ORDER BY {} {}, id LIMIT $1 OFFSET $2",
            sort.field.column(),
            sort.direction.keyword()
        );

        let rows = sqlx::query(&query)
            .bind(page_size)
            .bind(offset)
            .fetch_all(self.pool.as_ref())
            .await?;

        rows.iter().map(row_to_talk).collect()
    }

    async fn save_all(&self, talks: Vec<NewTalk>) -> Result<Vec<Talk>, AppError> {
        let mut tx = self.pool.begin().await?;
        let mut saved = Vec::with_capacity(talks.len());

        for talk in talks {
            let row = sqlx::query(&format!(
                "INSERT INTO talks (title, author, views, likes, published_on, link) \
                 VALUES ($1, $2, $3, $4, $5, $6) RETURNING {TALK_COLUMNS}"
            ))
            .bind(&talk.title)
            .bind(&talk.author)
            .bind(count_to_numeric(&talk.views))
            .bind(count_to_numeric(&talk.likes))
            .bind(talk.published_on)
            .bind(&talk.link)
            .fetch_one(&mut *tx)
            .await?;

            saved.push(row_to_talk(&row)?);
        }

        tx.commit().await?;
        Ok(saved)
    }
}
