#![allow(dead_code)]

use std::sync::Mutex;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use chrono::NaiveDate;
use num_bigint::BigInt;
use serde_json::json;

use talk_insights::domain::entities::{NewTalk, Talk};
use talk_insights::domain::repositories::{SortDirection, SortField, SortSpec, TalkRepository};
use talk_insights::error::AppError;

/// In-memory talk store mirroring the PostgreSQL repository's contract,
/// including the unique-link constraint on save.
#[derive(Default)]
pub struct InMemoryTalkRepository {
    talks: Mutex<Vec<Talk>>,
    next_id: AtomicI64,
}

impl InMemoryTalkRepository {
    pub fn new() -> Self {
        Self {
            talks: Mutex::new(Vec::new()),
            next_id: AtomicI64::new(1),
        }
    }

    fn snapshot(&self) -> Vec<Talk> {
        self.talks.lock().unwrap().clone()
    }
}

#[async_trait]
impl TalkRepository for InMemoryTalkRepository {
    async fn find_all(&self) -> Result<Vec<Talk>, AppError> {
        Ok(self.snapshot())
    }

    async fn find_by_author(&self, author: &str) -> Result<Vec<Talk>, AppError> {
        Ok(self
            .snapshot()
            .into_iter()
            .filter(|t| t.author == author)
            .collect())
    }

    async fn find_by_date_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Talk>, AppError> {
        Ok(self
            .snapshot()
            .into_iter()
            .filter(|t| t.published_on >= start && t.published_on <= end)
            .collect())
    }

    async fn find_top_by_views_desc(&self, limit: i64) -> Result<Vec<Talk>, AppError> {
        let mut talks = self.snapshot();
        talks.sort_by(|a, b| b.views.cmp(&a.views));
        talks.truncate(limit.max(0) as usize);
        Ok(talks)
    }

    async fn find_top_by_likes_desc(&self, limit: i64) -> Result<Vec<Talk>, AppError> {
        let mut talks = self.snapshot();
        talks.sort_by(|a, b| b.likes.cmp(&a.likes));
        talks.truncate(limit.max(0) as usize);
        Ok(talks)
    }

    async fn list(
        &self,
        page: i64,
        page_size: i64,
        sort: SortSpec,
    ) -> Result<Vec<Talk>, AppError> {
        let mut talks = self.snapshot();
        talks.sort_by(|a, b| {
            let ordering = match sort.field {
                SortField::Title => a.title.cmp(&b.title),
                SortField::Author => a.author.cmp(&b.author),
                SortField::Views => a.views.cmp(&b.views),
                SortField::Likes => a.likes.cmp(&b.likes),
                SortField::Date => a.published_on.cmp(&b.published_on),
            };
            match sort.direction {
                SortDirection::Asc => ordering,
                SortDirection::Desc => ordering.reverse(),
            }
        });

        Ok(talks
            .into_iter()
            .skip((page * page_size).max(0) as usize)
            .take(page_size.max(0) as usize)
            .collect())
    }

    async fn save_all(&self, new_talks: Vec<NewTalk>) -> Result<Vec<Talk>, AppError> {
        let mut talks = self.talks.lock().unwrap();

        // Unique-link backstop, checked before anything is appended so the
        // batch stays all-or-nothing
        let mut incoming: Vec<&str> = Vec::with_capacity(new_talks.len());
        for talk in &new_talks {
            let collides = talks.iter().any(|t| t.link == talk.link)
                || incoming.contains(&talk.link.as_str());
            if collides {
                return Err(AppError::conflict(
                    "Unique constraint violation",
                    json!({ "link": talk.link }),
                ));
            }
            incoming.push(&talk.link);
        }

        let mut saved = Vec::with_capacity(new_talks.len());
        for talk in new_talks {
            let id = self.next_id.fetch_add(1, Ordering::SeqCst);
            let persisted = Talk::new(
                id,
                talk.title,
                talk.author,
                talk.views,
                talk.likes,
                talk.published_on,
                talk.link,
            );
            talks.push(persisted.clone());
            saved.push(persisted);
        }

        Ok(saved)
    }
}

/// Builds a `NewTalk` fixture with sensible defaults.
pub fn new_talk(title: &str, views: i64, likes: i64, link: &str) -> NewTalk {
    NewTalk {
        title: title.to_string(),
        author: "Fixture Author".to_string(),
        views: BigInt::from(views),
        likes: BigInt::from(likes),
        published_on: NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
        link: link.to_string(),
    }
}
