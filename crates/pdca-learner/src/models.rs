//! PDCA Learner Data Models

use chrono::{DateTime, NaiveDate, Utc};
use growth_core::{GrowthError, GrowthRequest, GrowthResult};
use growth_predictor::PredictionResult;
use serde::{Deserialize, Serialize};

/// Stage of a Plan-Do-Check-Act cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PdcaPhase {
    Plan,
    Do,
    Check,
    Act,
}

impl PdcaPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            PdcaPhase::Plan => "plan",
            PdcaPhase::Do => "do",
            PdcaPhase::Check => "check",
            PdcaPhase::Act => "act",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "plan" => Some(PdcaPhase::Plan),
            "do" => Some(PdcaPhase::Do),
            "check" => Some(PdcaPhase::Check),
            "act" => Some(PdcaPhase::Act),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TargetMetrics {
    pub follower_gain: f64,
    pub engagement_rate: f64,
    pub reach: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ActualMetrics {
    pub follower_gain: f64,
    pub engagement_rate: f64,
    pub reach: f64,
    pub posts: f64,
    pub stories: f64,
    pub reels: f64,
}

/// A stored planning cycle. Immutable once appended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PdcaRecord {
    pub id: String,
    pub user_id: String,
    pub phase: PdcaPhase,
    pub start_date: NaiveDate,
    pub target_metrics: TargetMetrics,
    pub actual_metrics: ActualMetrics,
    #[serde(default)]
    pub strategies: Vec<String>,
    #[serde(default)]
    pub content_types: Vec<String>,
    #[serde(default)]
    pub insights: Vec<String>,
    pub created_at: DateTime<Utc>,
}

/// A record as submitted by the caller, before id and timestamps are assigned
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPdcaRecord {
    pub user_id: String,
    pub phase: PdcaPhase,
    pub start_date: NaiveDate,
    #[serde(default)]
    pub target_metrics: TargetMetrics,
    #[serde(default)]
    pub actual_metrics: ActualMetrics,
    #[serde(default)]
    pub strategies: Vec<String>,
    #[serde(default)]
    pub content_types: Vec<String>,
    #[serde(default)]
    pub insights: Vec<String>,
}

impl NewPdcaRecord {
    pub fn validate(&self) -> GrowthResult<()> {
        if self.user_id.trim().is_empty() {
            return Err(GrowthError::validation("userId", "must not be empty"));
        }
        let target = &self.target_metrics;
        if !target.follower_gain.is_finite() || target.follower_gain < 0.0 {
            return Err(GrowthError::validation(
                "targetMetrics.followerGain",
                "must be a non-negative number",
            ));
        }
        Ok(())
    }

    pub fn into_record(self, id: String, created_at: DateTime<Utc>) -> PdcaRecord {
        PdcaRecord {
            id,
            user_id: self.user_id,
            phase: self.phase,
            start_date: self.start_date,
            target_metrics: self.target_metrics,
            actual_metrics: self.actual_metrics,
            strategies: self.strategies,
            content_types: self.content_types,
            insights: self.insights,
            created_at,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GrowthTrend {
    Increasing,
    Stable,
    Decreasing,
}

impl GrowthTrend {
    pub fn from_ratio(ratio: f64) -> Self {
        if ratio > 1.1 {
            GrowthTrend::Increasing
        } else if ratio < 0.9 {
            GrowthTrend::Decreasing
        } else {
            GrowthTrend::Stable
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrategyPerformance {
    pub strategy: String,
    /// Mean of actual/target follower gain
    pub average_performance: f64,
    pub record_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeasonalPattern {
    pub month: String,
    pub average_performance: f64,
    pub record_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentPerformance {
    pub content_type: String,
    pub average_engagement_rate: f64,
    pub average_reach: f64,
    pub record_count: usize,
}

/// Summary over a user's history. Recomputed on every request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendAnalysis {
    pub period: String,
    pub average_growth: f64,
    pub growth_trend: GrowthTrend,
    pub best_strategies: Vec<StrategyPerformance>,
    pub worst_strategies: Vec<StrategyPerformance>,
    pub seasonal_patterns: Vec<SeasonalPattern>,
    pub content_performance: Vec<ContentPerformance>,
    pub recommendations: Vec<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricPredictions {
    pub follower_growth: f64,
    pub engagement_rate: f64,
    pub reach: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LearningModel {
    /// 0.6 - 0.95
    pub accuracy: f64,
    pub data_points: usize,
    pub predictions: MetricPredictions,
    /// 0.5 - 0.95
    pub confidence: f64,
    pub improvements: Vec<String>,
}

/// Multiplicative adjustment learned from a user's own history.
/// Each component lies in [0.8, 1.2].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalizationFactor {
    pub follower_gain: f64,
    pub engagement_rate: f64,
    pub reach: f64,
}

impl PersonalizationFactor {
    pub const MIN: f64 = 0.8;
    pub const MAX: f64 = 1.2;

    pub fn neutral() -> Self {
        Self {
            follower_gain: 1.0,
            engagement_rate: 1.0,
            reach: 1.0,
        }
    }

    /// Rescale a generic forecast toward this user's track record.
    pub fn apply_to(&self, prediction: &mut PredictionResult) {
        prediction.scale_growth(self.follower_gain);
    }

    /// Percentage points the follower factor adds or removes.
    pub fn learning_boost(&self) -> i64 {
        ((self.follower_gain - 1.0) * 100.0).round() as i64
    }
}

/// A growth request adjusted by the user's history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImprovedPrediction {
    #[serde(flatten)]
    pub request: GrowthRequest,
    pub learning_boost: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_points: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub personalization_factor: Option<PersonalizationFactor>,
    pub message: String,
}
