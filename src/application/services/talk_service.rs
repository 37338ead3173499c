//! Talk query service: listings, lookups, and influence ranking.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use serde_json::json;

use crate::domain::entities::{ScoredTalk, Talk};
use crate::domain::repositories::{SortSpec, TalkRepository};
use crate::domain::scoring::{ScoreWeights, influence_score};
use crate::error::AppError;

/// Service answering talk queries, including "most influential" rankings.
///
/// Scores are computed per request with caller-supplied weights; nothing
/// derived is ever written back to the store.
pub struct TalkService<R: TalkRepository> {
    repository: Arc<R>,
}

impl<R: TalkRepository> TalkService<R> {
    /// Creates a new talk service.
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Lists talks with pagination and a `field,direction` sort string.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] for an unknown sort field or direction.
    pub async fn get_talks(
        &self,
        page: i64,
        page_size: i64,
        sort: &str,
    ) -> Result<Vec<Talk>, AppError> {
        let sort = SortSpec::parse(sort)?;
        self.repository.list(page, page_size, sort).await
    }

    /// Returns all talks by the given author.
    pub async fn get_talks_by_author(&self, author: &str) -> Result<Vec<Talk>, AppError> {
        self.repository.find_by_author(author).await
    }

    /// Returns all talks published in the given calendar year.
    pub async fn get_talks_per_year(&self, year: i32) -> Result<Vec<Talk>, AppError> {
        let (start, end) = year_bounds(year)?;
        self.repository.find_by_date_range(start, end).await
    }

    /// Returns the talk with the highest view count.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] when the store is empty.
    pub async fn get_most_viewed(&self) -> Result<Talk, AppError> {
        self.repository
            .find_top_by_views_desc(1)
            .await?
            .into_iter()
            .next()
            .ok_or_else(no_talks)
    }

    /// Returns the talk with the highest like count.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] when the store is empty.
    pub async fn get_most_liked(&self) -> Result<Talk, AppError> {
        self.repository
            .find_top_by_likes_desc(1)
            .await?
            .into_iter()
            .next()
            .ok_or_else(no_talks)
    }

    /// Returns the talk with the highest influence score under the given
    /// weights.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] when the store is empty.
    pub async fn get_most_influential(
        &self,
        weights: &ScoreWeights,
    ) -> Result<ScoredTalk, AppError> {
        let talks = self.repository.find_all().await?;
        pick_most_influential(talks, weights, Utc::now().date_naive()).ok_or_else(no_talks)
    }

    /// Returns the most influential talk among those published in `year`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] when no talk was published that year.
    pub async fn get_most_influential_per_year(
        &self,
        year: i32,
        weights: &ScoreWeights,
    ) -> Result<ScoredTalk, AppError> {
        let (start, end) = year_bounds(year)?;
        let talks = self.repository.find_by_date_range(start, end).await?;
        pick_most_influential(talks, weights, Utc::now().date_naive()).ok_or_else(no_talks)
    }

    /// Returns every talk with its influence score, sorted descending.
    ///
    /// The sort is stable, so equally-scored talks keep their store order.
    pub async fn get_all_with_influence_score(
        &self,
        weights: &ScoreWeights,
    ) -> Result<Vec<ScoredTalk>, AppError> {
        let today = Utc::now().date_naive();
        let mut scored: Vec<ScoredTalk> = self
            .repository
            .find_all()
            .await?
            .into_iter()
            .map(|talk| ScoredTalk {
                influence_score: influence_score(&talk, weights, today),
                talk,
            })
            .collect();

        scored.sort_by(|a, b| b.influence_score.cmp(&a.influence_score));
        Ok(scored)
    }
}

fn no_talks() -> AppError {
    AppError::not_found("No talks found", json!({}))
}

fn year_bounds(year: i32) -> Result<(NaiveDate, NaiveDate), AppError> {
    let start = NaiveDate::from_ymd_opt(year, 1, 1);
    let end = NaiveDate::from_ymd_opt(year, 12, 31);
    match (start, end) {
        (Some(start), Some(end)) => Ok((start, end)),
        _ => Err(AppError::bad_request("Invalid year", json!({ "year": year }))),
    }
}

/// Picks the highest-scored talk; ties keep the first-encountered record.
fn pick_most_influential(
    talks: Vec<Talk>,
    weights: &ScoreWeights,
    today: NaiveDate,
) -> Option<ScoredTalk> {
    let mut best: Option<ScoredTalk> = None;
    for talk in talks {
        let score = influence_score(&talk, weights, today);
        if best
            .as_ref()
            .is_none_or(|current| score > current.influence_score)
        {
            best = Some(ScoredTalk {
                talk,
                influence_score: score,
            });
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockTalkRepository;
    use num_bigint::BigInt;

    fn talk(id: i64, title: &str, views: i64, likes: i64) -> Talk {
        Talk::new(
            id,
            title.to_string(),
            "Author".to_string(),
            BigInt::from(views),
            BigInt::from(likes),
            NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
            format!("https://ted.com/{id}"),
        )
    }

    #[tokio::test]
    async fn test_get_most_viewed_empty_store_is_not_found() {
        let mut mock_repo = MockTalkRepository::new();
        mock_repo
            .expect_find_top_by_views_desc()
            .times(1)
            .returning(|_| Ok(vec![]));

        let service = TalkService::new(Arc::new(mock_repo));

        let result = service.get_most_viewed().await;
        assert!(matches!(result, Err(AppError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_get_most_viewed_returns_top_result() {
        let mut mock_repo = MockTalkRepository::new();
        mock_repo
            .expect_find_top_by_views_desc()
            .withf(|limit| *limit == 1)
            .times(1)
            .returning(|_| Ok(vec![talk(1, "Top", 9000, 10)]));

        let service = TalkService::new(Arc::new(mock_repo));

        let top = service.get_most_viewed().await.unwrap();
        assert_eq!(top.title, "Top");
    }

    #[tokio::test]
    async fn test_get_most_influential_picks_highest_score() {
        let mut mock_repo = MockTalkRepository::new();
        mock_repo.expect_find_all().times(1).returning(|| {
            Ok(vec![
                talk(1, "Small", 1_000, 10),
                talk(2, "Large", 5_000_000, 200_000),
            ])
        });

        let service = TalkService::new(Arc::new(mock_repo));

        let best = service
            .get_most_influential(&ScoreWeights::default())
            .await
            .unwrap();
        assert_eq!(best.talk.title, "Large");
    }

    #[tokio::test]
    async fn test_get_most_influential_tie_keeps_first_encountered() {
        let mut mock_repo = MockTalkRepository::new();
        mock_repo.expect_find_all().times(1).returning(|| {
            Ok(vec![
                talk(1, "First", 1_000, 100),
                talk(2, "Second", 1_000, 100),
            ])
        });

        let service = TalkService::new(Arc::new(mock_repo));

        let best = service
            .get_most_influential(&ScoreWeights::default())
            .await
            .unwrap();
        assert_eq!(best.talk.title, "First");
    }

    #[tokio::test]
    async fn test_get_most_influential_empty_store_is_not_found() {
        let mut mock_repo = MockTalkRepository::new();
        mock_repo.expect_find_all().times(1).returning(|| Ok(vec![]));

        let service = TalkService::new(Arc::new(mock_repo));

        let result = service.get_most_influential(&ScoreWeights::default()).await;
        assert!(matches!(result, Err(AppError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_per_year_queries_full_calendar_year() {
        let mut mock_repo = MockTalkRepository::new();
        mock_repo
            .expect_find_by_date_range()
            .withf(|start, end| {
                *start == NaiveDate::from_ymd_opt(2022, 1, 1).unwrap()
                    && *end == NaiveDate::from_ymd_opt(2022, 12, 31).unwrap()
            })
            .times(1)
            .returning(|_, _| Ok(vec![]));

        let service = TalkService::new(Arc::new(mock_repo));

        let talks = service.get_talks_per_year(2022).await.unwrap();
        assert!(talks.is_empty());
    }

    #[tokio::test]
    async fn test_get_all_with_influence_score_sorted_descending() {
        let mut mock_repo = MockTalkRepository::new();
        mock_repo.expect_find_all().times(1).returning(|| {
            Ok(vec![
                talk(1, "Small", 1_000, 10),
                talk(2, "Large", 5_000_000, 200_000),
                talk(3, "Medium", 50_000, 2_000),
            ])
        });

        let service = TalkService::new(Arc::new(mock_repo));

        let scored = service
            .get_all_with_influence_score(&ScoreWeights::default())
            .await
            .unwrap();

        let titles: Vec<&str> = scored.iter().map(|s| s.talk.title.as_str()).collect();
        assert_eq!(titles, vec!["Large", "Medium", "Small"]);
        assert!(scored[0].influence_score > scored[1].influence_score);
    }

    #[tokio::test]
    async fn test_get_talks_rejects_unknown_sort() {
        let mut mock_repo = MockTalkRepository::new();
        mock_repo.expect_list().times(0);

        let service = TalkService::new(Arc::new(mock_repo));

        let result = service.get_talks(0, 10, "rating,desc").await;
        assert!(matches!(result, Err(AppError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_get_talks_passes_parsed_sort_to_repository() {
        use crate::domain::repositories::{SortDirection, SortField};

        let mut mock_repo = MockTalkRepository::new();
        mock_repo
            .expect_list()
            .withf(|page, size, sort| {
                *page == 0
                    && *size == 10
                    && sort.field == SortField::Likes
                    && sort.direction == SortDirection::Desc
            })
            .times(1)
            .returning(|_, _, _| Ok(vec![]));

        let service = TalkService::new(Arc::new(mock_repo));

        service.get_talks(0, 10, "likes,desc").await.unwrap();
    }
}
