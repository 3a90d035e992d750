//! Scenario Comparator
//!
//! A/B comparison of a fixed catalog of posting strategies. Each strategy is
//! scored against the user's goal, resources and risk, and the best one is
//! recommended along with a rollout timeline.

pub mod comparator;
pub mod scenarios;
pub mod scoring;

pub use comparator::{ABTestComparison, ScenarioComparator, TimelinePhase};
pub use scenarios::{
    generate_scenarios, ContentMix, ExpectedOutcome, ResourceRequirement, Scenario, ScoreBreakdown,
    Strategy,
};
pub use scoring::{ComparatorConfig, ScenarioScorer, ScoringWeights};
