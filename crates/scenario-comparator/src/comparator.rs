//! Scenario Comparison
//!
//! Generates the scenario catalog for a request, scores and ranks it, and
//! packages the winner with a recommendation and rollout timeline.

use growth_core::{GrowthRequest, GrowthResult, ValidatedRequest};
use serde::{Deserialize, Serialize};

use crate::scenarios::{generate_scenarios, Scenario};
use crate::scoring::{ComparatorConfig, ScenarioScorer};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelinePhase {
    pub phase: String,
    pub duration: String,
    pub tasks: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ABTestComparison {
    /// Sorted by score, highest first
    pub scenarios: Vec<Scenario>,
    /// Id of `scenarios[0]`
    pub winner: String,
    /// 0.5 - 0.95
    pub confidence: f64,
    pub recommendation: String,
    pub timeline: Vec<TimelinePhase>,
}

pub struct ScenarioComparator {
    scorer: ScenarioScorer,
}

impl Default for ScenarioComparator {
    fn default() -> Self {
        Self::new(ComparatorConfig::default())
    }
}

impl ScenarioComparator {
    pub fn new(config: ComparatorConfig) -> Self {
        Self {
            scorer: ScenarioScorer::new(config),
        }
    }

    pub fn with_scorer(scorer: ScenarioScorer) -> Self {
        Self { scorer }
    }

    pub fn compare(&self, request: &GrowthRequest) -> GrowthResult<ABTestComparison> {
        let validated = request.validate()?;
        self.compare_validated(&validated)
    }

    pub fn compare_validated(&self, request: &ValidatedRequest) -> GrowthResult<ABTestComparison> {
        let mut scenarios = generate_scenarios(request);
        for scenario in scenarios.iter_mut() {
            self.scorer.score(scenario, request)?;
        }

        // stable sort: equal scores keep catalog order
        scenarios.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        let confidence = ranking_confidence(&scenarios);
        let (winner, recommendation, timeline) = match scenarios.first() {
            Some(best) => (best.id.clone(), recommendation(best), timeline(best)),
            None => (String::new(), String::new(), Vec::new()),
        };

        Ok(ABTestComparison {
            scenarios,
            winner,
            confidence,
            recommendation,
            timeline,
        })
    }
}

/// 0.5 plus the winner's lead over the runner-up, on the 0-100 score scale.
fn ranking_confidence(sorted: &[Scenario]) -> f64 {
    match sorted {
        [first, second, ..] => (0.5 + (first.score - second.score) / 100.0).clamp(0.5, 0.95),
        _ => 0.5,
    }
}

fn recommendation(winner: &Scenario) -> String {
    format!(
        "We recommend the {} ({}). {} Run it for two weeks, measure the results, then adjust.",
        winner.name, winner.id, winner.description
    )
}

fn timeline(winner: &Scenario) -> Vec<TimelinePhase> {
    vec![
        TimelinePhase {
            phase: "Preparation".to_string(),
            duration: "Week 1".to_string(),
            tasks: vec![
                "Record baseline followers, engagement and reach".to_string(),
                "Plan two weeks of content for the chosen strategy".to_string(),
            ],
        },
        TimelinePhase {
            phase: "Testing".to_string(),
            duration: "Weeks 2-3".to_string(),
            tasks: vec![
                format!("Run the {} as planned", winner.name),
                "Track daily metrics for every post".to_string(),
            ],
        },
        TimelinePhase {
            phase: "Optimization".to_string(),
            duration: "Weeks 4-6".to_string(),
            tasks: vec![
                "Double down on the best-performing formats and time slots".to_string(),
                "Drop or rework the weakest content".to_string(),
            ],
        },
        TimelinePhase {
            phase: "Operation".to_string(),
            duration: "Week 7 onward".to_string(),
            tasks: vec![
                "Make the refined routine the standard schedule".to_string(),
                "Review results monthly and record a PDCA cycle".to_string(),
            ],
        },
    ]
}
