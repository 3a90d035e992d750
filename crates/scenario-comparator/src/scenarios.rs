//! Scenario Catalog
//!
//! The fixed set of posting strategies compared for every request. Expected
//! outcomes are multipliers over the request's own baseline.

use growth_core::stats::round_count;
use growth_core::{RiskLevel, ValidatedRequest};
use serde::{Deserialize, Serialize};

/// Share of output per format. Informally sums to about 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentMix {
    pub reels: f64,
    pub feed_posts: f64,
    pub carousels: f64,
    pub stories: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Strategy {
    pub posts_per_week: f64,
    pub content_mix: ContentMix,
    pub posting_schedule: Vec<String>,
    pub hashtag_strategy: String,
    pub engagement_strategy: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpectedOutcome {
    pub follower_growth: i64,
    pub engagement_rate: f64,
    pub reach: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceRequirement {
    /// Hours per week
    pub time_per_week: f64,
    pub budget: f64,
    pub team_size: f64,
}

/// Weighted components behind a scenario's score
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBreakdown {
    pub goal_alignment: f64,
    pub resource_fit: f64,
    pub risk_score: f64,
    pub engagement_score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scenario {
    pub id: String,
    pub name: String,
    pub description: String,
    pub strategy: Strategy,
    pub expected_outcome: ExpectedOutcome,
    pub risk_level: RiskLevel,
    pub resource_requirement: ResourceRequirement,
    /// 0 - 100, filled in by the scorer
    pub score: f64,
    pub score_breakdown: ScoreBreakdown,
}

struct ScenarioTemplate {
    id: &'static str,
    name: &'static str,
    description: &'static str,
    posts_per_week: f64,
    content_mix: ContentMix,
    posting_schedule: &'static [&'static str],
    hashtag_strategy: &'static str,
    engagement_strategy: &'static str,
    growth_multiplier: f64,
    engagement_multiplier: f64,
    reach_multiplier: f64,
    risk_level: RiskLevel,
    resources: ResourceRequirement,
}

const CATALOG: [ScenarioTemplate; 4] = [
    ScenarioTemplate {
        id: "reel-focused",
        name: "Reel-Focused Strategy",
        description: "Lead with short-form video to maximize reach among non-followers.",
        posts_per_week: 5.0,
        content_mix: ContentMix {
            reels: 0.6,
            feed_posts: 0.1,
            carousels: 0.1,
            stories: 0.2,
        },
        posting_schedule: &["Mon 19:00", "Wed 19:00", "Thu 12:00", "Sat 11:00", "Sun 20:00"],
        hashtag_strategy: "3-5 trending tags plus 10 niche tags per reel",
        engagement_strategy: "Reply to comments within the first hour after each reel",
        growth_multiplier: 1.3,
        engagement_multiplier: 1.2,
        reach_multiplier: 2.5,
        risk_level: RiskLevel::Medium,
        resources: ResourceRequirement {
            time_per_week: 12.0,
            budget: 3000.0,
            team_size: 1.0,
        },
    },
    ScenarioTemplate {
        id: "balanced",
        name: "Balanced Strategy",
        description: "Mix every format evenly for steady, sustainable growth.",
        posts_per_week: 4.0,
        content_mix: ContentMix {
            reels: 0.3,
            feed_posts: 0.2,
            carousels: 0.2,
            stories: 0.3,
        },
        posting_schedule: &["Tue 18:00", "Thu 18:00", "Sat 10:00", "Sun 19:00"],
        hashtag_strategy: "15-20 tags balanced between broad and niche",
        engagement_strategy: "Daily 15-minute engagement session with followers and peers",
        growth_multiplier: 1.0,
        engagement_multiplier: 1.0,
        reach_multiplier: 1.5,
        risk_level: RiskLevel::Low,
        resources: ResourceRequirement {
            time_per_week: 8.0,
            budget: 1000.0,
            team_size: 1.0,
        },
    },
    ScenarioTemplate {
        id: "engagement-focused",
        name: "Engagement-Focused Strategy",
        description: "Prioritize conversation and community to deepen follower loyalty.",
        posts_per_week: 3.0,
        content_mix: ContentMix {
            reels: 0.2,
            feed_posts: 0.1,
            carousels: 0.3,
            stories: 0.4,
        },
        posting_schedule: &["Mon 20:00", "Wed 20:00", "Fri 20:00"],
        hashtag_strategy: "10 tightly targeted community tags",
        engagement_strategy: "Polls, questions and Q&A stories; answer every DM and comment",
        growth_multiplier: 0.8,
        engagement_multiplier: 1.5,
        reach_multiplier: 1.2,
        risk_level: RiskLevel::Low,
        resources: ResourceRequirement {
            time_per_week: 10.0,
            budget: 500.0,
            team_size: 1.0,
        },
    },
    ScenarioTemplate {
        id: "high-frequency",
        name: "High-Frequency Strategy",
        description: "Publish daily or more to dominate feeds and test content quickly.",
        posts_per_week: 10.0,
        content_mix: ContentMix {
            reels: 0.4,
            feed_posts: 0.3,
            carousels: 0.1,
            stories: 0.2,
        },
        posting_schedule: &[
            "Daily 08:00",
            "Daily 19:00",
        ],
        hashtag_strategy: "Rotate 3 hashtag sets of 20-30 tags to avoid repetition",
        engagement_strategy: "Community manager covers comments and DMs throughout the day",
        growth_multiplier: 1.5,
        engagement_multiplier: 0.8,
        reach_multiplier: 3.0,
        risk_level: RiskLevel::High,
        resources: ResourceRequirement {
            time_per_week: 20.0,
            budget: 8000.0,
            team_size: 2.0,
        },
    },
];

/// Build the catalog against a request's baseline, unscored and in catalog order.
pub fn generate_scenarios(request: &ValidatedRequest) -> Vec<Scenario> {
    CATALOG
        .iter()
        .map(|t| Scenario {
            id: t.id.to_string(),
            name: t.name.to_string(),
            description: t.description.to_string(),
            strategy: Strategy {
                posts_per_week: t.posts_per_week,
                content_mix: t.content_mix,
                posting_schedule: t.posting_schedule.iter().map(|s| s.to_string()).collect(),
                hashtag_strategy: t.hashtag_strategy.to_string(),
                engagement_strategy: t.engagement_strategy.to_string(),
            },
            expected_outcome: ExpectedOutcome {
                follower_growth: round_count(request.follower_gain * t.growth_multiplier),
                engagement_rate: request.engagement_rate * t.engagement_multiplier,
                reach: round_count(request.current_followers * t.reach_multiplier),
            },
            risk_level: t.risk_level,
            resource_requirement: t.resources,
            score: 0.0,
            score_breakdown: ScoreBreakdown::default(),
        })
        .collect()
}
