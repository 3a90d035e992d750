use growth_core::RiskLevel;
use serde::{Deserialize, Serialize};

use crate::feasibility::FeasibilityAssessment;

/// Cumulative follower gain at the headline horizons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictedGrowth {
    pub month1: i64,
    pub month3: i64,
    pub month6: i64,
    pub month12: i64,
}

/// One factor that pushes growth up or down
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyFactor {
    pub factor: String,
    /// Signed impact, roughly -1.0 to 1.0
    pub impact: f64,
    pub recommendation: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeasonalAdjustment {
    /// Calendar month, 1 - 12
    pub month: u32,
    pub month_name: String,
    pub multiplier: f64,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GrowthPhase {
    pub phase: String,
    pub period: String,
    pub expected_growth: i64,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskAssessment {
    pub level: RiskLevel,
    pub factors: Vec<String>,
    /// Parallel to `factors`
    pub mitigation: Vec<String>,
}

/// Full output of [`crate::GrowthPredictor::predict`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionResult {
    pub predicted_growth: PredictedGrowth,
    /// Month 1 through 12 of the growth curve
    pub monthly_growth: Vec<i64>,
    /// 0.1 - 1.0
    pub confidence: f64,
    /// Bias plus weighted features
    pub model_score: f64,
    pub key_factors: Vec<KeyFactor>,
    pub seasonal_adjustments: Vec<SeasonalAdjustment>,
    pub growth_pattern: Vec<GrowthPhase>,
    pub risk_assessment: RiskAssessment,
    pub feasibility: FeasibilityAssessment,
}

impl PredictionResult {
    /// Multiply every follower figure by `factor`, rounding each to a whole count.
    pub fn scale_growth(&mut self, factor: f64) {
        let scale = |v: i64| (v as f64 * factor).round() as i64;
        self.predicted_growth = PredictedGrowth {
            month1: scale(self.predicted_growth.month1),
            month3: scale(self.predicted_growth.month3),
            month6: scale(self.predicted_growth.month6),
            month12: scale(self.predicted_growth.month12),
        };
        for value in self.monthly_growth.iter_mut() {
            *value = scale(*value);
        }
        for phase in self.growth_pattern.iter_mut() {
            phase.expected_growth = scale(phase.expected_growth);
        }
    }
}
