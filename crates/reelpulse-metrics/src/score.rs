//! Composite 0–10 content quality score.

use serde::Serialize;

const ENGAGEMENT_WEIGHT: f64 = 0.4;
const ACTIVITY_WEIGHT: f64 = 0.3;
const REACH_WEIGHT: f64 = 0.2;
const CONSISTENCY_WEIGHT: f64 = 0.1;

/// Ceiling for every sub-score and for the final blend.
const MAX_SCORE: f64 = 10.0;

/// Ordinal rating band for a content score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Rating {
    Poor,
    Fair,
    Good,
    VeryGood,
    Excellent,
    Exceptional,
}

impl Rating {
    /// Bands are closed below: a score of exactly 9.0 is `Exceptional`.
    #[must_use]
    pub fn from_score(score: f64) -> Self {
        if score >= 9.0 {
            Rating::Exceptional
        } else if score >= 7.5 {
            Rating::Excellent
        } else if score >= 6.0 {
            Rating::VeryGood
        } else if score >= 4.5 {
            Rating::Good
        } else if score >= 3.0 {
            Rating::Fair
        } else {
            Rating::Poor
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Rating::Poor => "Poor",
            Rating::Fair => "Fair",
            Rating::Good => "Good",
            Rating::VeryGood => "Very Good",
            Rating::Excellent => "Excellent",
            Rating::Exceptional => "Exceptional",
        }
    }
}

/// Inputs to [`calculate_content_score`].
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScoreInputs {
    /// Average engagement rate in percent.
    pub avg_engagement: f64,
    pub total_posts: u64,
    pub total_followers: u64,
    pub total_reach: u64,
    pub platform_count: usize,
}

/// A score in `[0, 10]` with its rating. `rating` is `None` when there are no
/// connected platforms to score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ContentScore {
    pub score: f64,
    pub rating: Option<Rating>,
}

impl ContentScore {
    pub const NO_DATA: ContentScore = ContentScore {
        score: 0.0,
        rating: None,
    };

    #[must_use]
    pub fn label(&self) -> &'static str {
        self.rating.map_or("No Data", Rating::label)
    }

    /// Width of the score bar, 0–100.
    #[must_use]
    pub fn bar_percent(&self) -> f64 {
        self.score / MAX_SCORE * 100.0
    }
}

/// Blend engagement, posting activity, reach efficiency and platform spread
/// into a single score.
///
/// Each sub-score is capped at 10 before weighting and the final sum is capped
/// again. Negative inputs are floored at zero so the result always lies in
/// `[0, 10]`.
#[must_use]
pub fn calculate_content_score(inputs: &ScoreInputs) -> ContentScore {
    if inputs.platform_count == 0 {
        return ContentScore::NO_DATA;
    }

    #[allow(clippy::cast_precision_loss)]
    let (posts, followers, reach, platforms) = (
        inputs.total_posts as f64,
        inputs.total_followers as f64,
        inputs.total_reach as f64,
        inputs.platform_count as f64,
    );

    let engagement_score = (inputs.avg_engagement.max(0.0) / 10.0).min(MAX_SCORE);
    let activity_score = (posts / 10.0).min(MAX_SCORE);
    let reach_efficiency = if inputs.total_followers > 0 {
        (reach / followers / 5.0).min(MAX_SCORE)
    } else {
        0.0
    };
    let consistency_score = (platforms * 2.5).min(MAX_SCORE);

    let blended = engagement_score * ENGAGEMENT_WEIGHT
        + activity_score * ACTIVITY_WEIGHT
        + reach_efficiency * REACH_WEIGHT
        + consistency_score * CONSISTENCY_WEIGHT;
    let score = blended.min(MAX_SCORE);

    ContentScore {
        score,
        rating: Some(Rating::from_score(score)),
    }
}
