//! Feature Extraction
//!
//! Normalizes a validated growth request into bounded numeric features.
//! Lookup tables are compiled-in constants; unknown keys fall back to a
//! neutral multiplier of 1.0.

use growth_core::{ContentType, Niche, PostingTime, ValidatedRequest};
use serde::{Deserialize, Serialize};

/// Multiplier used when a niche, posting time or content type is unknown.
pub const NEUTRAL_MULTIPLIER: f64 = 1.0;

/// Hashtag count treated as saturation.
const HASHTAG_CAP: f64 = 30.0;

/// Numeric features consumed by the predictor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Features {
    /// log10 of follower count
    pub followers: f64,
    /// Engagement rate in percent
    pub engagement: f64,
    pub posts: f64,
    /// log10 of account age in months
    pub age: f64,
    /// Hashtag usage, 0.0 - 1.0
    pub hashtags: f64,
    pub stories: f64,
    pub reels: f64,
    pub niche: f64,
    pub posting_time: f64,
    pub content_type: f64,
}

pub fn niche_multiplier(niche: Niche) -> f64 {
    match niche {
        Niche::Fashion => 1.2,
        Niche::Beauty => 1.15,
        Niche::Fitness => 1.1,
        Niche::Food => 1.05,
        Niche::Travel => 1.1,
        Niche::Tech => 0.95,
        Niche::Business => 0.9,
        Niche::Lifestyle => 1.0,
        Niche::Education => 0.95,
        Niche::Entertainment => 1.15,
    }
}

pub fn posting_time_multiplier(time: PostingTime) -> f64 {
    match time {
        PostingTime::Morning => 1.1,
        PostingTime::Afternoon => 1.0,
        PostingTime::Evening => 1.2,
        PostingTime::Night => 0.9,
    }
}

pub fn content_type_weight(content: ContentType) -> f64 {
    match content {
        ContentType::Reel => 1.3,
        ContentType::Carousel => 1.15,
        ContentType::Video => 1.1,
        ContentType::Photo => 1.0,
        ContentType::Story => 0.9,
    }
}

/// Stateless feature extractor
#[derive(Debug, Clone, Copy, Default)]
pub struct FeatureExtractor;

impl FeatureExtractor {
    pub fn new() -> Self {
        Self
    }

    pub fn extract(&self, request: &ValidatedRequest) -> Features {
        Features {
            followers: request.current_followers.max(1.0).log10(),
            engagement: request.engagement_rate * 100.0,
            posts: request.posts_per_week,
            age: request.account_age_months.max(1.0).log10(),
            hashtags: (request.hashtag_count / HASHTAG_CAP).min(1.0),
            stories: request.story_frequency,
            reels: request.reel_frequency,
            niche: lookup_niche(request.niche.as_deref()),
            posting_time: lookup_posting_time(request.posting_time.as_deref()),
            content_type: content_score(&request.content_types),
        }
    }
}

fn lookup_niche(name: Option<&str>) -> f64 {
    name.and_then(Niche::parse)
        .map(niche_multiplier)
        .unwrap_or(NEUTRAL_MULTIPLIER)
}

fn lookup_posting_time(name: Option<&str>) -> f64 {
    name.and_then(PostingTime::parse)
        .map(posting_time_multiplier)
        .unwrap_or(NEUTRAL_MULTIPLIER)
}

/// Mean of per-type weights; an empty list scores neutral.
fn content_score(types: &[String]) -> f64 {
    if types.is_empty() {
        return NEUTRAL_MULTIPLIER;
    }
    let total: f64 = types
        .iter()
        .map(|t| {
            ContentType::parse(t)
                .map(content_type_weight)
                .unwrap_or(NEUTRAL_MULTIPLIER)
        })
        .sum();
    total / types.len() as f64
}
