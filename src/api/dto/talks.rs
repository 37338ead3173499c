//! DTOs for talk query endpoints.

use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use num_bigint::BigInt;
use serde::{Deserialize, Serialize};
use serde_with::{DisplayFromStr, serde_as};
use validator::Validate;

use crate::domain::entities::{ScoredTalk, Talk};
use crate::domain::scoring::ScoreWeights;

/// One talk in API responses.
///
/// Counts serialize as decimal strings: they are arbitrary-precision and would
/// not survive JSON number parsing in common clients.
#[serde_as]
#[derive(Debug, Serialize)]
pub struct TalkDto {
    pub id: i64,
    pub title: String,
    pub author: String,
    #[serde_as(as = "DisplayFromStr")]
    pub views: BigInt,
    #[serde_as(as = "DisplayFromStr")]
    pub likes: BigInt,
    pub date: NaiveDate,
    pub link: String,
}

impl From<Talk> for TalkDto {
    fn from(talk: Talk) -> Self {
        Self {
            id: talk.id,
            title: talk.title,
            author: talk.author,
            views: talk.views,
            likes: talk.likes,
            date: talk.published_on,
            link: talk.link,
        }
    }
}

/// One talk with its influence score for the ranking endpoints.
#[serde_as]
#[derive(Debug, Serialize)]
pub struct ScoredTalkDto {
    #[serde(flatten)]
    pub talk: TalkDto,
    #[serde_as(as = "DisplayFromStr")]
    pub influence_score: BigDecimal,
}

impl From<ScoredTalk> for ScoredTalkDto {
    fn from(scored: ScoredTalk) -> Self {
        Self {
            talk: scored.talk.into(),
            influence_score: scored.influence_score,
        }
    }
}

/// Pagination and sorting parameters for the talk listing.
#[derive(Debug, Deserialize, Validate)]
pub struct ListTalksQuery {
    #[serde(default)]
    #[validate(range(min = 0))]
    pub page: i64,

    #[serde(default = "default_page_size")]
    #[validate(range(min = 1, max = 100))]
    pub size: i64,

    #[serde(default = "default_sort")]
    pub sort: String,
}

fn default_page_size() -> i64 {
    10
}

fn default_sort() -> String {
    "likes,desc".to_string()
}

/// Influence-score weights supplied as query parameters.
///
/// All four weights default to the standard 0.4/0.4/0.1/0.1 split. Values are
/// parsed as arbitrary-precision decimals and are deliberately not validated:
/// zero and negative weights are legal inputs to the score engine.
#[serde_as]
#[derive(Debug, Deserialize)]
pub struct WeightsQuery {
    #[serde_as(as = "DisplayFromStr")]
    #[serde(rename = "viewsWeight", default = "default_count_weight")]
    pub views_weight: BigDecimal,

    #[serde_as(as = "DisplayFromStr")]
    #[serde(rename = "likesWeight", default = "default_count_weight")]
    pub likes_weight: BigDecimal,

    #[serde_as(as = "DisplayFromStr")]
    #[serde(rename = "engagementWeight", default = "default_rate_weight")]
    pub engagement_weight: BigDecimal,

    #[serde_as(as = "DisplayFromStr")]
    #[serde(rename = "growthWeight", default = "default_rate_weight")]
    pub growth_weight: BigDecimal,
}

fn default_count_weight() -> BigDecimal {
    BigDecimal::new(4.into(), 1)
}

fn default_rate_weight() -> BigDecimal {
    BigDecimal::new(1.into(), 1)
}

impl WeightsQuery {
    pub fn into_weights(self) -> ScoreWeights {
        ScoreWeights {
            views: self.views_weight,
            likes: self.likes_weight,
            engagement: self.engagement_weight,
            growth: self.growth_weight,
        }
    }
}
