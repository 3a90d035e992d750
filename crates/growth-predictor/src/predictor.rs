//! Growth Predictor
//!
//! Turns a growth request into a multi-horizon follower forecast. The forecast
//! follows a logistic curve over the plan period and freezes once the period
//! ends; confidence, key factors and risk come from hand-authored rules.

use growth_core::stats::{ensure_finite, round_count};
use growth_core::{GrowthRequest, GrowthResult, ValidatedRequest};

use crate::feasibility::assess_feasibility;
use crate::features::{FeatureExtractor, Features};
use crate::models::{GrowthPhase, PredictedGrowth, PredictionResult};
use crate::rules::{assess_risk, key_factors};
use crate::seasonal::seasonal_adjustments;

/// Months modeled by the growth curve
pub const HORIZON_MONTHS: u32 = 12;

/// Weights for the linear model score
#[derive(Debug, Clone)]
pub struct FeatureWeights {
    pub followers: f64,
    pub engagement: f64,
    pub posts: f64,
    pub age: f64,
    pub hashtags: f64,
    pub stories: f64,
    pub reels: f64,
    pub niche: f64,
    pub posting_time: f64,
    pub content_type: f64,
}

impl Default for FeatureWeights {
    fn default() -> Self {
        Self {
            followers: 0.001,
            engagement: 0.5,
            posts: 0.2,
            age: 0.1,
            hashtags: 0.15,
            stories: 0.1,
            reels: 0.25,
            niche: 0.3,
            posting_time: 0.2,
            content_type: 0.3,
        }
    }
}

/// Model constants, built once and shared by every prediction
#[derive(Debug, Clone)]
pub struct PredictorConfig {
    pub weights: FeatureWeights,
    pub bias: f64,
    /// Curve steepness before the engagement term is added
    pub base_steepness: f64,
    /// Curve midpoint as a fraction of the plan period
    pub midpoint_ratio: f64,
    pub base_confidence: f64,
}

impl Default for PredictorConfig {
    fn default() -> Self {
        Self {
            weights: FeatureWeights::default(),
            bias: 10.0,
            base_steepness: 0.1,
            midpoint_ratio: 0.5,
            base_confidence: 0.8,
        }
    }
}

pub struct GrowthPredictor {
    extractor: FeatureExtractor,
    config: PredictorConfig,
}

impl Default for GrowthPredictor {
    fn default() -> Self {
        Self::new()
    }
}

impl GrowthPredictor {
    pub fn new() -> Self {
        Self::with_config(PredictorConfig::default())
    }

    pub fn with_config(config: PredictorConfig) -> Self {
        Self {
            extractor: FeatureExtractor::new(),
            config,
        }
    }

    /// Validate the request and produce a full forecast.
    ///
    /// Returns a validation error, and nothing else, when a required field is
    /// missing or out of range.
    pub fn predict(&self, request: &GrowthRequest) -> GrowthResult<PredictionResult> {
        let validated = request.validate()?;
        self.predict_validated(&validated)
    }

    pub fn predict_validated(&self, request: &ValidatedRequest) -> GrowthResult<PredictionResult> {
        let features = self.extractor.extract(request);

        let model_score = ensure_finite("model score", self.linear_score(&features))?;
        let monthly_growth = self.growth_curve(request, &features)?;
        let predicted_growth = PredictedGrowth {
            month1: monthly_growth[0],
            month3: monthly_growth[2],
            month6: monthly_growth[5],
            month12: monthly_growth[11],
        };
        let confidence = ensure_finite("confidence", self.confidence(request))?;

        Ok(PredictionResult {
            growth_pattern: growth_pattern(&predicted_growth),
            predicted_growth,
            monthly_growth,
            confidence,
            model_score,
            key_factors: key_factors(request),
            seasonal_adjustments: seasonal_adjustments(),
            risk_assessment: assess_risk(request),
            feasibility: assess_feasibility(request)?,
        })
    }

    /// Bias plus the weighted sum of every feature.
    pub fn linear_score(&self, features: &Features) -> f64 {
        let w = &self.config.weights;
        self.config.bias
            + features.followers * w.followers
            + features.engagement * w.engagement
            + features.posts * w.posts
            + features.age * w.age
            + features.hashtags * w.hashtags
            + features.stories * w.stories
            + features.reels * w.reels
            + features.niche * w.niche
            + features.posting_time * w.posting_time
            + features.content_type * w.content_type
    }

    /// Cumulative gain for months 1..=12.
    ///
    /// `growth(m) = k / (1 + e^(-a(m - b*P)))` with k the requested gain,
    /// a = base steepness + engagement/100 and P the plan length. Months past
    /// the plan repeat the value reached at its last month.
    pub fn growth_curve(&self, request: &ValidatedRequest, features: &Features) -> GrowthResult<Vec<i64>> {
        let k = request.follower_gain;
        let a = self.config.base_steepness + features.engagement / 100.0;
        let period = request.plan_period.months();
        let midpoint = self.config.midpoint_ratio * period as f64;

        let mut curve = Vec::with_capacity(HORIZON_MONTHS as usize);
        let mut frozen = 0;
        for month in 1..=HORIZON_MONTHS {
            if month > period {
                curve.push(frozen);
                continue;
            }
            let raw = k / (1.0 + (-a * (month as f64 - midpoint)).exp());
            let value = round_count(ensure_finite("growth curve", raw)?);
            if month == period {
                frozen = value;
            }
            curve.push(value);
        }

        Ok(curve)
    }

    /// Base confidence nudged by account age, engagement and cadence.
    pub fn confidence(&self, request: &ValidatedRequest) -> f64 {
        let mut confidence = self.config.base_confidence;

        if request.account_age_months < 12.0 {
            confidence -= 0.2;
        } else if request.account_age_months > 24.0 {
            confidence += 0.1;
        }

        if request.engagement_rate < 0.01 {
            confidence -= 0.15;
        } else if request.engagement_rate > 0.05 {
            confidence += 0.1;
        }

        if request.posts_per_week < 2.0 {
            confidence -= 0.1;
        } else if request.posts_per_week > 10.0 {
            confidence += 0.05;
        }

        confidence.clamp(0.1, 1.0)
    }
}

fn growth_pattern(growth: &PredictedGrowth) -> Vec<GrowthPhase> {
    vec![
        GrowthPhase {
            phase: "initial".to_string(),
            period: "0-3 months".to_string(),
            expected_growth: round_count(growth.month3 as f64 * 0.3),
            description: "Audience discovery while the algorithm learns the account".to_string(),
        },
        GrowthPhase {
            phase: "growth".to_string(),
            period: "3-6 months".to_string(),
            expected_growth: round_count(growth.month6 as f64 * 0.4),
            description: "Compounding reach as proven formats are repeated".to_string(),
        },
        GrowthPhase {
            phase: "maturity".to_string(),
            period: "6-12 months".to_string(),
            expected_growth: round_count(growth.month12 as f64 * 0.3),
            description: "Growth steadies; retention and community matter most".to_string(),
        },
    ]
}
