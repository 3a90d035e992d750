use serde::{Deserialize, Serialize};

use crate::error::{GrowthError, GrowthResult};

pub const DEFAULT_ENGAGEMENT_RATE: f64 = 0.03;
pub const DEFAULT_POSTS_PER_WEEK: f64 = 3.0;
pub const DEFAULT_ACCOUNT_AGE_MONTHS: f64 = 12.0;
pub const DEFAULT_HASHTAG_COUNT: f64 = 10.0;
pub const DEFAULT_REEL_FREQUENCY: f64 = 0.3;
pub const DEFAULT_STORY_FREQUENCY: f64 = 0.5;

/// Growth request as it arrives over the wire.
///
/// Every field is optional here so that a missing required field can be
/// reported as a validation failure instead of a deserialization panic.
/// Use [`GrowthRequest::validate`] before handing it to an engine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GrowthRequest {
    pub current_followers: Option<f64>,
    pub follower_gain: Option<f64>,
    /// Plan length in months: 1, 3, 6 or 12
    pub plan_period: Option<u32>,
    /// Engagement as a fraction (0.03 = 3%)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub engagement_rate: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub posts_per_week: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_age_months: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hashtag_count: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub niche: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub posting_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_types: Option<Vec<String>>,
    /// Share of posts that are reels (0.0 - 1.0)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reel_frequency: Option<f64>,
    /// Share of days with a story (0.0 - 1.0)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub story_frequency: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goal_category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team_size: Option<f64>,
}

/// A request whose required fields are present and whose defaults are applied.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidatedRequest {
    pub current_followers: f64,
    pub follower_gain: f64,
    pub plan_period: PlanPeriod,
    pub engagement_rate: f64,
    pub posts_per_week: f64,
    pub account_age_months: f64,
    pub hashtag_count: f64,
    pub niche: Option<String>,
    pub posting_time: Option<String>,
    pub content_types: Vec<String>,
    pub reel_frequency: f64,
    pub story_frequency: f64,
    pub goal: GoalCategory,
    pub budget: Option<f64>,
    pub team_size: Option<f64>,
}

impl GrowthRequest {
    /// Check required fields and apply documented defaults.
    pub fn validate(&self) -> GrowthResult<ValidatedRequest> {
        let current_followers = required_positive("currentFollowers", self.current_followers)?;
        let follower_gain = required_positive("followerGain", self.follower_gain)?;
        let months = self
            .plan_period
            .ok_or_else(|| GrowthError::validation("planPeriod", "is required"))?;
        let plan_period = PlanPeriod::from_months(months).ok_or_else(|| {
            GrowthError::validation(
                "planPeriod",
                format!("must be one of 1, 3, 6 or 12 months (got {})", months),
            )
        })?;

        Ok(ValidatedRequest {
            current_followers,
            follower_gain,
            plan_period,
            engagement_rate: optional_non_negative(
                "engagementRate",
                self.engagement_rate,
                DEFAULT_ENGAGEMENT_RATE,
            )?,
            posts_per_week: optional_non_negative(
                "postsPerWeek",
                self.posts_per_week,
                DEFAULT_POSTS_PER_WEEK,
            )?,
            account_age_months: optional_non_negative(
                "accountAgeMonths",
                self.account_age_months,
                DEFAULT_ACCOUNT_AGE_MONTHS,
            )?,
            hashtag_count: optional_non_negative(
                "hashtagCount",
                self.hashtag_count,
                DEFAULT_HASHTAG_COUNT,
            )?,
            niche: self.niche.clone(),
            posting_time: self.posting_time.clone(),
            content_types: self.content_types.clone().unwrap_or_default(),
            reel_frequency: optional_non_negative(
                "reelFrequency",
                self.reel_frequency,
                DEFAULT_REEL_FREQUENCY,
            )?,
            story_frequency: optional_non_negative(
                "storyFrequency",
                self.story_frequency,
                DEFAULT_STORY_FREQUENCY,
            )?,
            goal: self
                .goal_category
                .as_deref()
                .map(GoalCategory::parse)
                .unwrap_or(GoalCategory::Unspecified),
            budget: optional_positive("budget", self.budget)?,
            team_size: optional_positive("teamSize", self.team_size)?,
        })
    }
}

fn required_positive(field: &'static str, value: Option<f64>) -> GrowthResult<f64> {
    match value {
        None => Err(GrowthError::validation(field, "is required")),
        Some(v) if !v.is_finite() => Err(GrowthError::validation(field, "must be a finite number")),
        Some(v) if v <= 0.0 => Err(GrowthError::validation(
            field,
            format!("must be greater than 0 (got {})", v),
        )),
        Some(v) => Ok(v),
    }
}

fn optional_non_negative(field: &'static str, value: Option<f64>, default: f64) -> GrowthResult<f64> {
    match value {
        None => Ok(default),
        Some(v) if !v.is_finite() || v < 0.0 => Err(GrowthError::validation(
            field,
            format!("must be a non-negative number (got {})", v),
        )),
        Some(v) => Ok(v),
    }
}

fn optional_positive(field: &'static str, value: Option<f64>) -> GrowthResult<Option<f64>> {
    match value {
        None => Ok(None),
        Some(v) if !v.is_finite() || v <= 0.0 => Err(GrowthError::validation(
            field,
            format!("must be greater than 0 (got {})", v),
        )),
        Some(v) => Ok(Some(v)),
    }
}

/// Supported plan lengths
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlanPeriod {
    OneMonth,
    ThreeMonths,
    SixMonths,
    TwelveMonths,
}

impl PlanPeriod {
    pub fn from_months(months: u32) -> Option<Self> {
        match months {
            1 => Some(PlanPeriod::OneMonth),
            3 => Some(PlanPeriod::ThreeMonths),
            6 => Some(PlanPeriod::SixMonths),
            12 => Some(PlanPeriod::TwelveMonths),
            _ => None,
        }
    }

    pub fn months(&self) -> u32 {
        match self {
            PlanPeriod::OneMonth => 1,
            PlanPeriod::ThreeMonths => 3,
            PlanPeriod::SixMonths => 6,
            PlanPeriod::TwelveMonths => 12,
        }
    }
}

/// Account niches with known engagement characteristics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Niche {
    Fashion,
    Beauty,
    Fitness,
    Food,
    Travel,
    Tech,
    Business,
    Lifestyle,
    Education,
    Entertainment,
}

impl Niche {
    /// Case-insensitive lookup; unknown names yield `None`.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "fashion" => Some(Niche::Fashion),
            "beauty" => Some(Niche::Beauty),
            "fitness" => Some(Niche::Fitness),
            "food" => Some(Niche::Food),
            "travel" => Some(Niche::Travel),
            "tech" | "technology" => Some(Niche::Tech),
            "business" => Some(Niche::Business),
            "lifestyle" => Some(Niche::Lifestyle),
            "education" => Some(Niche::Education),
            "entertainment" => Some(Niche::Entertainment),
            _ => None,
        }
    }
}

/// Time-of-day bucket for posting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostingTime {
    Morning,
    Afternoon,
    Evening,
    Night,
}

impl PostingTime {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "morning" => Some(PostingTime::Morning),
            "afternoon" => Some(PostingTime::Afternoon),
            "evening" => Some(PostingTime::Evening),
            "night" => Some(PostingTime::Night),
            _ => None,
        }
    }
}

/// Content formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Reel,
    Carousel,
    Photo,
    Video,
    Story,
}

impl ContentType {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "reel" | "reels" => Some(ContentType::Reel),
            "carousel" => Some(ContentType::Carousel),
            "photo" | "image" | "post" => Some(ContentType::Photo),
            "video" => Some(ContentType::Video),
            "story" | "stories" => Some(ContentType::Story),
            _ => None,
        }
    }
}

/// What the user is optimizing for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GoalCategory {
    Follower,
    Engagement,
    Reach,
    Unspecified,
}

impl GoalCategory {
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "follower" | "followers" => GoalCategory::Follower,
            "engagement" => GoalCategory::Engagement,
            "reach" => GoalCategory::Reach,
            _ => GoalCategory::Unspecified,
        }
    }
}

/// Three-level risk classification. Ordered so that `max` escalates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
        }
    }

    /// Raise to `other` if it is more severe; never lowers.
    pub fn escalate(self, other: RiskLevel) -> RiskLevel {
        self.max(other)
    }
}
