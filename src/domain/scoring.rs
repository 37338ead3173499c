//! Influence score engine.
//!
//! Pure functions from a talk and four caller-supplied weights to a decimal
//! score. All arithmetic runs on arbitrary-precision decimals; every division
//! is rounded to five fractional digits (half-up) before the next step, so
//! scores are bit-for-bit reproducible for a given `today`.

use bigdecimal::{BigDecimal, RoundingMode};
use chrono::{Datelike, NaiveDate};
use num_traits::Zero;

use crate::domain::entities::Talk;

/// Fractional digits kept by every rounding step.
const SCORE_SCALE: i64 = 5;

/// Caller-supplied weights for the influence score terms.
///
/// Weights are not validated: zero and negative values are legal and simply
/// shift how the terms contribute.
#[derive(Debug, Clone)]
pub struct ScoreWeights {
    pub views: BigDecimal,
    pub likes: BigDecimal,
    pub engagement: BigDecimal,
    pub growth: BigDecimal,
}

impl Default for ScoreWeights {
    /// 0.4 / 0.4 / 0.1 / 0.1, matching the API's default query parameters.
    fn default() -> Self {
        Self {
            views: BigDecimal::new(4.into(), 1),
            likes: BigDecimal::new(4.into(), 1),
            engagement: BigDecimal::new(1.into(), 1),
            growth: BigDecimal::new(1.into(), 1),
        }
    }
}

fn round5(value: BigDecimal) -> BigDecimal {
    value.with_scale_round(SCORE_SCALE, RoundingMode::HalfUp)
}

/// Computes the influence score:
///
/// `viewsWeight×views + likesWeight×likes + engagementWeight×engagementRate +
/// growthWeight×growthRate`, rounded to five decimal places half-up.
pub fn influence_score(talk: &Talk, weights: &ScoreWeights, today: NaiveDate) -> BigDecimal {
    let engagement = engagement_rate(talk);
    let growth = growth_rate(talk, today);

    let score = BigDecimal::from(talk.views.clone()) * &weights.views
        + BigDecimal::from(talk.likes.clone()) * &weights.likes
        + engagement * &weights.engagement
        + growth * &weights.growth;

    round5(score)
}

/// Engagement rate: `(likes / views) × 100`.
///
/// The division is rounded to five decimal places before the percentage step.
/// Exactly zero when `views` is zero; engagement is undefined there and is
/// treated as zero rather than missing.
pub fn engagement_rate(talk: &Talk) -> BigDecimal {
    if talk.views.is_zero() {
        return BigDecimal::zero();
    }

    let likes = BigDecimal::from(talk.likes.clone());
    let views = BigDecimal::from(talk.views.clone());

    round5(likes / views) * BigDecimal::from(100)
}

/// Growth rate: `(views + likes) / daysSincePublished`, rounded to five
/// decimal places.
///
/// Exactly zero when `views` OR `likes` is zero. The zero condition is looser
/// than the engagement rate's views-only rule; ranking outcomes depend on it,
/// so both conditions are part of the contract.
pub fn growth_rate(talk: &Talk, today: NaiveDate) -> BigDecimal {
    if talk.views.is_zero() || talk.likes.is_zero() {
        return BigDecimal::zero();
    }

    let days = BigDecimal::from(days_since_published(talk.published_on, today));
    let total = BigDecimal::from(talk.views.clone()) + BigDecimal::from(talk.likes.clone());

    round5(total / days)
}

/// Approximate day count since publication: whole months × 30, floored at 1.
///
/// The floor guarantees a usable divisor even for records published in the
/// current month.
fn days_since_published(published: NaiveDate, today: NaiveDate) -> i64 {
    (whole_months_between(published, today) * 30).max(1)
}

/// Whole calendar months from `start` to `end`; a partial trailing month does
/// not count.
fn whole_months_between(start: NaiveDate, end: NaiveDate) -> i64 {
    let mut months = (i64::from(end.year()) - i64::from(start.year())) * 12
        + (i64::from(end.month()) - i64::from(start.month()));
    if end.day() < start.day() {
        months -= 1;
    }
    months
}
