//! Handlers for talk query endpoints.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use validator::Validate;

use crate::api::dto::talks::{ListTalksQuery, ScoredTalkDto, TalkDto, WeightsQuery};
use crate::error::AppError;
use crate::state::AppState;

/// Lists talks with pagination and sorting.
///
/// # Endpoint
///
/// `GET /talks`
///
/// # Query Parameters
///
/// - `page` (optional): 0-indexed page number (default: 0)
/// - `size` (optional): Items per page (default: 10, max: 100)
/// - `sort` (optional): `field,direction` over
///   `title|author|views|likes|date` (default: `likes,desc`)
pub async fn list_talks_handler(
    State(state): State<AppState>,
    Query(params): Query<ListTalksQuery>,
) -> Result<Json<Vec<TalkDto>>, AppError> {
    params.validate()?;

    let talks = state
        .talk_service
        .get_talks(params.page, params.size, &params.sort)
        .await?;

    Ok(Json(talks.into_iter().map(TalkDto::from).collect()))
}

/// Lists all talks by one author.
///
/// # Endpoint
///
/// `GET /talks/author/{author}`
pub async fn talks_by_author_handler(
    State(state): State<AppState>,
    Path(author): Path<String>,
) -> Result<Json<Vec<TalkDto>>, AppError> {
    let talks = state.talk_service.get_talks_by_author(&author).await?;
    Ok(Json(talks.into_iter().map(TalkDto::from).collect()))
}

/// Lists all talks published in one calendar year.
///
/// # Endpoint
///
/// `GET /talks/year/{year}`
pub async fn talks_per_year_handler(
    State(state): State<AppState>,
    Path(year): Path<i32>,
) -> Result<Json<Vec<TalkDto>>, AppError> {
    let talks = state.talk_service.get_talks_per_year(year).await?;
    Ok(Json(talks.into_iter().map(TalkDto::from).collect()))
}

/// Returns the talk with the highest view count.
///
/// # Endpoint
///
/// `GET /talks/most-influential/views`
///
/// # Errors
///
/// Returns 404 Not Found when the store is empty.
pub async fn most_viewed_handler(
    State(state): State<AppState>,
) -> Result<Json<TalkDto>, AppError> {
    let talk = state.talk_service.get_most_viewed().await?;
    Ok(Json(talk.into()))
}

/// Returns the talk with the highest like count.
///
/// # Endpoint
///
/// `GET /talks/most-influential/likes`
///
/// # Errors
///
/// Returns 404 Not Found when the store is empty.
pub async fn most_liked_handler(State(state): State<AppState>) -> Result<Json<TalkDto>, AppError> {
    let talk = state.talk_service.get_most_liked().await?;
    Ok(Json(talk.into()))
}

/// Returns the most influential talk under caller-supplied weights.
///
/// # Endpoint
///
/// `GET /talks/most-influential`
///
/// # Query Parameters
///
/// - `viewsWeight` (default: 0.4)
/// - `likesWeight` (default: 0.4)
/// - `engagementWeight` (default: 0.1)
/// - `growthWeight` (default: 0.1)
///
/// # Errors
///
/// Returns 404 Not Found when the store is empty.
pub async fn most_influential_handler(
    State(state): State<AppState>,
    Query(params): Query<WeightsQuery>,
) -> Result<Json<ScoredTalkDto>, AppError> {
    let weights = params.into_weights();
    let scored = state.talk_service.get_most_influential(&weights).await?;
    Ok(Json(scored.into()))
}

/// Returns the most influential talk published in one year.
///
/// # Endpoint
///
/// `GET /talks/most-influential/{year}`
///
/// # Errors
///
/// Returns 404 Not Found when no talk was published that year.
pub async fn most_influential_per_year_handler(
    State(state): State<AppState>,
    Path(year): Path<i32>,
    Query(params): Query<WeightsQuery>,
) -> Result<Json<ScoredTalkDto>, AppError> {
    let weights = params.into_weights();
    let scored = state
        .talk_service
        .get_most_influential_per_year(year, &weights)
        .await?;
    Ok(Json(scored.into()))
}

/// Returns every talk with its influence score, highest first.
///
/// # Endpoint
///
/// `GET /talks/with-influence-score`
pub async fn talks_with_scores_handler(
    State(state): State<AppState>,
    Query(params): Query<WeightsQuery>,
) -> Result<Json<Vec<ScoredTalkDto>>, AppError> {
    let weights = params.into_weights();
    let scored = state
        .talk_service
        .get_all_with_influence_score(&weights)
        .await?;

    Ok(Json(scored.into_iter().map(ScoredTalkDto::from).collect()))
}
