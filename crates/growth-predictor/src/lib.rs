//! Growth Predictor
//!
//! Multi-horizon follower forecasts with confidence, key factors, seasonal
//! context, growth phases, risk and target feasibility.

pub mod feasibility;
pub mod features;
pub mod models;
pub mod predictor;
pub mod rules;
pub mod seasonal;
#[cfg(test)]
mod tests;

pub use feasibility::{assess_feasibility, Difficulty, FeasibilityAssessment};
pub use features::{FeatureExtractor, Features};
pub use models::{
    GrowthPhase, KeyFactor, PredictedGrowth, PredictionResult, RiskAssessment, SeasonalAdjustment,
};
pub use predictor::{FeatureWeights, GrowthPredictor, PredictorConfig};
