//! Scenario Scoring
//!
//! Scores a scenario against the user's goal, available resources and the
//! scenario's own risk. Component weights sum to 1.0.

use growth_core::stats::ratio_or;
use growth_core::{GoalCategory, GrowthError, GrowthResult, RiskLevel, ValidatedRequest};

use crate::scenarios::{Scenario, ScoreBreakdown};

/// Weights for score components
#[derive(Debug, Clone)]
pub struct ScoringWeights {
    pub goal_alignment: f64,
    pub resource_fit: f64,
    pub risk: f64,
    pub engagement: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            goal_alignment: 0.4,
            resource_fit: 0.3,
            risk: 0.2,
            engagement: 0.1,
        }
    }
}

/// Resources assumed for the user when the request does not state them
#[derive(Debug, Clone)]
pub struct ComparatorConfig {
    /// Hours per week. Not taken from the request.
    pub available_time_hours: f64,
    pub default_budget: f64,
    pub default_team_size: f64,
}

impl Default for ComparatorConfig {
    fn default() -> Self {
        Self {
            available_time_hours: 15.0,
            default_budget: 5000.0,
            default_team_size: 1.0,
        }
    }
}

pub fn risk_score(level: RiskLevel) -> f64 {
    match level {
        RiskLevel::Low => 0.9,
        RiskLevel::Medium => 0.7,
        RiskLevel::High => 0.4,
    }
}

pub struct ScenarioScorer {
    weights: ScoringWeights,
    config: ComparatorConfig,
}

impl Default for ScenarioScorer {
    fn default() -> Self {
        Self::new(ComparatorConfig::default())
    }
}

impl ScenarioScorer {
    pub fn new(config: ComparatorConfig) -> Self {
        Self {
            weights: ScoringWeights::default(),
            config,
        }
    }

    pub fn with_weights(config: ComparatorConfig, weights: ScoringWeights) -> Self {
        Self { weights, config }
    }

    /// Fill in `score` and `score_breakdown` on the scenario.
    ///
    /// Totals beyond the 0-100 scale are clamped, including infinities.
    /// A NaN total is a `GrowthError::Computation`.
    pub fn score(&self, scenario: &mut Scenario, request: &ValidatedRequest) -> GrowthResult<()> {
        let breakdown = ScoreBreakdown {
            goal_alignment: self.goal_alignment(scenario, request),
            resource_fit: self.resource_fit(scenario, request),
            risk_score: risk_score(scenario.risk_level),
            engagement_score: scenario.expected_outcome.engagement_rate * 10.0,
        };

        let total = breakdown.goal_alignment * self.weights.goal_alignment
            + breakdown.resource_fit * self.weights.resource_fit
            + breakdown.risk_score * self.weights.risk
            + breakdown.engagement_score * self.weights.engagement;

        if total.is_nan() {
            return Err(GrowthError::Computation(format!(
                "score for scenario {} is not a number",
                scenario.id
            )));
        }
        scenario.score = total.clamp(0.0, 100.0);
        scenario.score_breakdown = breakdown;
        Ok(())
    }

    fn goal_alignment(&self, scenario: &Scenario, request: &ValidatedRequest) -> f64 {
        let outcome = &scenario.expected_outcome;
        match request.goal {
            GoalCategory::Follower => {
                ratio_or(outcome.follower_growth as f64, request.follower_gain, 0.0)
            }
            GoalCategory::Engagement => outcome.engagement_rate * 20.0,
            GoalCategory::Reach => ratio_or(outcome.reach as f64, request.current_followers, 0.0),
            GoalCategory::Unspecified => 0.5,
        }
    }

    /// Mean of available/required for time, budget and team, each capped at 1.0.
    fn resource_fit(&self, scenario: &Scenario, request: &ValidatedRequest) -> f64 {
        let required = &scenario.resource_requirement;
        let budget = request.budget.unwrap_or(self.config.default_budget);
        let team = request.team_size.unwrap_or(self.config.default_team_size);

        let fits = [
            ratio_or(self.config.available_time_hours, required.time_per_week, 1.0).min(1.0),
            ratio_or(budget, required.budget, 1.0).min(1.0),
            ratio_or(team, required.team_size, 1.0).min(1.0),
        ];
        fits.iter().sum::<f64>() / fits.len() as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenarios::generate_scenarios;
    use approx::assert_relative_eq;
    use growth_core::GrowthRequest;

    fn request(goal: Option<&str>) -> ValidatedRequest {
        GrowthRequest {
            current_followers: Some(5000.0),
            follower_gain: Some(1000.0),
            plan_period: Some(3),
            engagement_rate: Some(0.03),
            goal_category: goal.map(str::to_string),
            ..Default::default()
        }
        .validate()
        .unwrap()
    }

    fn scored(goal: Option<&str>, id: &str) -> Scenario {
        let req = request(goal);
        let mut scenario = generate_scenarios(&req)
            .into_iter()
            .find(|s| s.id == id)
            .unwrap();
        ScenarioScorer::default().score(&mut scenario, &req).unwrap();
        scenario
    }

    #[test]
    fn test_follower_goal_score_for_balanced() {
        let s = scored(Some("follower"), "balanced");
        // goal 1.0, resources 1.0, low risk 0.9, engagement 0.03 * 10
        assert_relative_eq!(s.score_breakdown.goal_alignment, 1.0);
        assert_relative_eq!(s.score_breakdown.resource_fit, 1.0);
        assert_relative_eq!(s.score, 0.4 + 0.3 + 0.18 + 0.03, epsilon = 1e-9);
    }

    #[test]
    fn test_resource_fit_caps_each_ratio() {
        let s = scored(Some("follower"), "high-frequency");
        // 15/20, 5000/8000, 1/2
        let expected = (0.75 + 0.625 + 0.5) / 3.0;
        assert_relative_eq!(s.score_breakdown.resource_fit, expected, epsilon = 1e-9);
        assert_relative_eq!(s.score_breakdown.risk_score, 0.4);
    }

    #[test]
    fn test_goal_alignment_per_category() {
        let reach = scored(Some("reach"), "reel-focused");
        assert_relative_eq!(reach.score_breakdown.goal_alignment, 2.5);

        let engagement = scored(Some("engagement"), "engagement-focused");
        assert_relative_eq!(engagement.score_breakdown.goal_alignment, 0.045 * 20.0, epsilon = 1e-9);

        let unspecified = scored(None, "balanced");
        assert_relative_eq!(unspecified.score_breakdown.goal_alignment, 0.5);
    }

    #[test]
    fn test_scores_stay_in_range() {
        let req = GrowthRequest {
            current_followers: Some(1.0),
            follower_gain: Some(1.0),
            plan_period: Some(1),
            engagement_rate: Some(100.0),
            goal_category: Some("reach".to_string()),
            ..Default::default()
        }
        .validate()
        .unwrap();
        let scorer = ScenarioScorer::default();
        for mut scenario in generate_scenarios(&req) {
            scorer.score(&mut scenario, &req).unwrap();
            assert!((0.0..=100.0).contains(&scenario.score));
        }
    }

    #[test]
    fn test_overflowing_total_clamps_to_top_of_scale() {
        let req = GrowthRequest {
            current_followers: Some(5000.0),
            follower_gain: Some(1000.0),
            plan_period: Some(3),
            engagement_rate: Some(1e308),
            goal_category: Some("engagement".to_string()),
            ..Default::default()
        }
        .validate()
        .unwrap();
        let scorer = ScenarioScorer::default();
        for mut scenario in generate_scenarios(&req) {
            scorer.score(&mut scenario, &req).unwrap();
            assert_eq!(scenario.score, 100.0);
        }
    }

    #[test]
    fn test_nan_total_is_a_computation_error() {
        let req = request(Some("follower"));
        let mut scenario = generate_scenarios(&req).remove(0);
        let scorer = ScenarioScorer::with_weights(
            ComparatorConfig::default(),
            ScoringWeights {
                engagement: f64::NAN,
                ..ScoringWeights::default()
            },
        );
        let err = scorer.score(&mut scenario, &req).unwrap_err();
        assert_eq!(err.kind(), "computation");
    }
}
