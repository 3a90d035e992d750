//! Personalization Learner
//!
//! Mines a user's plan-vs-actual history for trends, ranks strategies by real
//! performance and derives a bounded factor that nudges generic predictions
//! toward what has worked for that user.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use chrono::{Datelike, Utc};
use growth_core::stats::{last_n, mean_or, ratio_or, round_count};
use growth_core::{GrowthRequest, GrowthResult};

use crate::models::{
    ContentPerformance, GrowthTrend, ImprovedPrediction, LearningModel, MetricPredictions,
    NewPdcaRecord, PdcaRecord, PersonalizationFactor, SeasonalPattern, StrategyPerformance,
    TrendAnalysis,
};
use crate::repository::RecordRepository;

/// Records considered for the growth trend and learning-model predictions
const TREND_WINDOW: usize = 3;
/// Records considered for the personalization factor
const FACTOR_WINDOW: usize = 5;
const MIN_RECORDS_FOR_MODEL: usize = 3;
const MIN_RECORDS_FOR_FACTOR: usize = 2;
/// Engagement target assumed when a record has none
const DEFAULT_ENGAGEMENT_TARGET: f64 = 0.03;

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

pub struct PersonalizationLearner {
    repository: Arc<dyn RecordRepository>,
}

impl PersonalizationLearner {
    pub fn new(repository: Arc<dyn RecordRepository>) -> Self {
        Self { repository }
    }

    /// Assign an id and timestamp, then append.
    pub async fn save_record(&self, record: NewPdcaRecord) -> GrowthResult<PdcaRecord> {
        record.validate()?;
        let stored = record.into_record(uuid::Uuid::new_v4().to_string(), Utc::now());
        self.repository.append(stored).await
    }

    pub async fn records(&self, user_id: &str) -> GrowthResult<Vec<PdcaRecord>> {
        self.repository.query(user_id).await
    }

    pub async fn analyze_trends(&self, user_id: &str) -> GrowthResult<TrendAnalysis> {
        let records = self.repository.query(user_id).await?;
        Ok(analyze_records(&records))
    }

    pub async fn learning_model(&self, user_id: &str) -> GrowthResult<LearningModel> {
        let records = self.repository.query(user_id).await?;
        Ok(build_learning_model(&records))
    }

    /// `None` until the user has enough history.
    pub async fn personalization_factor(
        &self,
        user_id: &str,
    ) -> GrowthResult<Option<PersonalizationFactor>> {
        let records = self.repository.query(user_id).await?;
        Ok(personalization_factor(&records))
    }

    /// Scale the request's follower goal by the user's own track record.
    pub async fn improve_prediction(
        &self,
        request: &GrowthRequest,
        user_id: &str,
    ) -> GrowthResult<ImprovedPrediction> {
        let validated = request.validate()?;
        let records = self.repository.query(user_id).await?;

        let factor = match personalization_factor(&records) {
            Some(factor) => factor,
            None => {
                return Ok(ImprovedPrediction {
                    request: request.clone(),
                    learning_boost: 0,
                    confidence: None,
                    data_points: None,
                    personalization_factor: None,
                    message: format!(
                        "At least {} PDCA records are needed to personalize predictions",
                        MIN_RECORDS_FOR_FACTOR
                    ),
                });
            }
        };

        let mut adjusted = request.clone();
        adjusted.follower_gain =
            Some(round_count(validated.follower_gain * factor.follower_gain) as f64);

        Ok(ImprovedPrediction {
            request: adjusted,
            learning_boost: factor.learning_boost(),
            confidence: Some(model_confidence(records.len())),
            data_points: Some(records.len()),
            personalization_factor: Some(factor),
            message: format!(
                "Adjusted using your last {} PDCA cycles",
                records.len().min(FACTOR_WINDOW)
            ),
        })
    }
}

/// actual/target follower gain; a record without a target counts as on-target.
pub fn performance_ratio(record: &PdcaRecord) -> f64 {
    ratio_or(
        record.actual_metrics.follower_gain,
        record.target_metrics.follower_gain,
        1.0,
    )
}

fn model_confidence(records: usize) -> f64 {
    (0.5 + records as f64 * 0.05).min(0.95)
}

fn model_accuracy(records: usize) -> f64 {
    (0.6 + records as f64 * 0.05).min(0.95)
}

pub fn default_trend_analysis() -> TrendAnalysis {
    TrendAnalysis {
        period: "No data".to_string(),
        average_growth: 0.0,
        growth_trend: GrowthTrend::Stable,
        best_strategies: Vec::new(),
        worst_strategies: Vec::new(),
        seasonal_patterns: Vec::new(),
        content_performance: Vec::new(),
        recommendations: vec![
            "Record your first PDCA cycle to start receiving personalized insights".to_string(),
        ],
    }
}

pub fn analyze_records(records: &[PdcaRecord]) -> TrendAnalysis {
    let (first, last) = match (records.first(), records.last()) {
        (Some(first), Some(last)) => (first, last),
        _ => return default_trend_analysis(),
    };

    let recent: Vec<f64> = last_n(records, TREND_WINDOW)
        .iter()
        .map(performance_ratio)
        .collect();
    let growth_trend = GrowthTrend::from_ratio(mean_or(&recent, 1.0));

    let ranked = rank_strategies(records);
    let best_strategies: Vec<StrategyPerformance> = ranked.iter().take(3).cloned().collect();
    // May overlap with the best list when fewer than six strategies exist.
    let worst_strategies: Vec<StrategyPerformance> = last_n(&ranked, 3).to_vec();

    let all_ratios: Vec<f64> = records.iter().map(performance_ratio).collect();
    let overall = mean_or(&all_ratios, 1.0);

    let growth: Vec<f64> = records
        .iter()
        .map(|r| r.actual_metrics.follower_gain)
        .collect();

    TrendAnalysis {
        period: format!("{} to {}", first.start_date, last.start_date),
        average_growth: mean_or(&growth, 0.0),
        growth_trend,
        recommendations: trend_recommendations(&best_strategies, &worst_strategies, overall),
        best_strategies,
        worst_strategies,
        seasonal_patterns: seasonal_patterns(records),
        content_performance: content_performance(records),
    }
}

/// Strategies by mean performance ratio, best first. Ties keep the order in
/// which each strategy first appears in the history.
fn rank_strategies(records: &[PdcaRecord]) -> Vec<StrategyPerformance> {
    let mut grouped: Vec<(&str, Vec<f64>)> = Vec::new();
    let mut slots: HashMap<&str, usize> = HashMap::new();
    for record in records {
        let ratio = performance_ratio(record);
        for strategy in &record.strategies {
            let slot = *slots.entry(strategy.as_str()).or_insert_with(|| {
                grouped.push((strategy.as_str(), Vec::new()));
                grouped.len() - 1
            });
            grouped[slot].1.push(ratio);
        }
    }

    let mut ranked: Vec<StrategyPerformance> = grouped
        .into_iter()
        .map(|(strategy, ratios)| StrategyPerformance {
            strategy: strategy.to_string(),
            average_performance: mean_or(&ratios, 1.0),
            record_count: ratios.len(),
        })
        .collect();

    ranked.sort_by(|a, b| {
        b.average_performance
            .partial_cmp(&a.average_performance)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    ranked
}

fn seasonal_patterns(records: &[PdcaRecord]) -> Vec<SeasonalPattern> {
    let mut by_month: [Vec<f64>; 12] = Default::default();
    for record in records {
        by_month[record.start_date.month0() as usize].push(performance_ratio(record));
    }

    by_month
        .iter()
        .zip(MONTH_NAMES.iter())
        .filter(|(ratios, _)| !ratios.is_empty())
        .map(|(ratios, name)| SeasonalPattern {
            month: name.to_string(),
            average_performance: mean_or(ratios, 1.0),
            record_count: ratios.len(),
        })
        .collect()
}

fn content_performance(records: &[PdcaRecord]) -> Vec<ContentPerformance> {
    let mut grouped: BTreeMap<&str, (Vec<f64>, Vec<f64>)> = BTreeMap::new();
    for record in records {
        for content_type in &record.content_types {
            let entry = grouped.entry(content_type.as_str()).or_default();
            entry.0.push(record.actual_metrics.engagement_rate);
            entry.1.push(record.actual_metrics.reach);
        }
    }

    grouped
        .into_iter()
        .map(|(content_type, (engagement, reach))| ContentPerformance {
            content_type: content_type.to_string(),
            average_engagement_rate: mean_or(&engagement, 0.0),
            average_reach: mean_or(&reach, 0.0),
            record_count: engagement.len(),
        })
        .collect()
}

fn trend_recommendations(
    best: &[StrategyPerformance],
    worst: &[StrategyPerformance],
    overall: f64,
) -> Vec<String> {
    let mut recommendations = Vec::new();

    if let Some(top) = best.first() {
        recommendations.push(format!(
            "Keep using \"{}\": it reached {:.0}% of target on average",
            top.strategy,
            top.average_performance * 100.0
        ));
    }
    if let Some(bottom) = worst.last() {
        recommendations.push(format!(
            "Rethink \"{}\": it reached only {:.0}% of target on average",
            bottom.strategy,
            bottom.average_performance * 100.0
        ));
    }

    if overall < 0.8 {
        recommendations.push(
            "Targets have mostly been out of reach; set more achievable goals for the next cycle"
                .to_string(),
        );
    } else if overall > 1.2 {
        recommendations.push(
            "You are consistently beating your targets; set more ambitious goals".to_string(),
        );
    }

    recommendations
}

pub fn default_learning_model(data_points: usize) -> LearningModel {
    LearningModel {
        accuracy: 0.6,
        data_points,
        predictions: MetricPredictions::default(),
        confidence: 0.5,
        improvements: vec![format!(
            "Record at least {} PDCA cycles to enable personalized predictions",
            MIN_RECORDS_FOR_MODEL
        )],
    }
}

pub fn build_learning_model(records: &[PdcaRecord]) -> LearningModel {
    let count = records.len();
    if count < MIN_RECORDS_FOR_MODEL {
        return default_learning_model(count);
    }

    let recent = last_n(records, TREND_WINDOW);
    let metric = |f: fn(&PdcaRecord) -> f64| -> f64 {
        let values: Vec<f64> = recent.iter().map(f).collect();
        mean_or(&values, 0.0)
    };
    let predictions = MetricPredictions {
        follower_growth: metric(|r| r.actual_metrics.follower_gain),
        engagement_rate: metric(|r| r.actual_metrics.engagement_rate),
        reach: metric(|r| r.actual_metrics.reach),
    };

    let ratios: Vec<f64> = records.iter().map(performance_ratio).collect();
    let average_performance = mean_or(&ratios, 1.0);

    let mut improvements = Vec::new();
    if count < 10 {
        improvements
            .push("Log more cycles: predictions sharpen noticeably after 10 records".to_string());
    }
    if average_performance < 0.9 {
        improvements.push(
            "Review your strategies: results have trailed targets by more than 10%".to_string(),
        );
    }
    improvements.push("Keep recording a PDCA cycle every month to keep the model current".to_string());

    LearningModel {
        accuracy: model_accuracy(count),
        data_points: count,
        predictions,
        confidence: model_confidence(count),
        improvements,
    }
}

/// Mean actual/target ratios over the last five records, each clamped to
/// [0.8, 1.2]. `None` with fewer than two records.
pub fn personalization_factor(records: &[PdcaRecord]) -> Option<PersonalizationFactor> {
    if records.len() < MIN_RECORDS_FOR_FACTOR {
        return None;
    }

    let recent = last_n(records, FACTOR_WINDOW);
    let component = |f: fn(&PdcaRecord) -> f64| -> f64 {
        let ratios: Vec<f64> = recent.iter().map(f).collect();
        let value = mean_or(&ratios, 1.0);
        if value.is_finite() {
            value.clamp(PersonalizationFactor::MIN, PersonalizationFactor::MAX)
        } else {
            1.0
        }
    };

    Some(PersonalizationFactor {
        follower_gain: component(performance_ratio),
        engagement_rate: component(|r| {
            let target = if r.target_metrics.engagement_rate > 0.0 {
                r.target_metrics.engagement_rate
            } else {
                DEFAULT_ENGAGEMENT_TARGET
            };
            ratio_or(r.actual_metrics.engagement_rate, target, 1.0)
        }),
        reach: component(|r| ratio_or(r.actual_metrics.reach, r.target_metrics.reach, 1.0)),
    })
}
