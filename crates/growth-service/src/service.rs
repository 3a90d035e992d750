//! Growth Service
//!
//! The calling boundary. Wires the predictor, comparator and learner together,
//! dispatches JSON operations and logs at the edge. The engines themselves
//! stay silent.

use std::sync::Arc;

use growth_core::{GrowthError, GrowthRequest, GrowthResult};
use growth_predictor::{GrowthPredictor, PredictionResult};
use pdca_learner::{
    ImprovedPrediction, LearningModel, NewPdcaRecord, PdcaRecord, PersonalizationFactor,
    PersonalizationLearner, RecordRepository, TrendAnalysis,
};
use scenario_comparator::{ABTestComparison, ScenarioComparator};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::ServiceConfig;
use crate::response::ApiResponse;

/// One request line. The `operation` tag selects the variant.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "operation")]
pub enum Operation {
    #[serde(rename = "predictGrowth")]
    PredictGrowth { request: GrowthRequest },

    #[serde(rename = "compareScenarios")]
    CompareScenarios { request: GrowthRequest },

    #[serde(rename = "pdca.saveRecord")]
    SaveRecord { record: NewPdcaRecord },

    #[serde(rename = "pdca.getTrends", rename_all = "camelCase")]
    GetTrends { user_id: String },

    #[serde(rename = "pdca.getLearningModel", rename_all = "camelCase")]
    GetLearningModel { user_id: String },

    #[serde(rename = "pdca.improvePrediction", rename_all = "camelCase")]
    ImprovePrediction {
        request: GrowthRequest,
        user_id: String,
    },

    #[serde(rename = "pdca.personalizedPrediction", rename_all = "camelCase")]
    PersonalizedPrediction {
        request: GrowthRequest,
        user_id: String,
    },
}

impl Operation {
    pub fn name(&self) -> &'static str {
        match self {
            Operation::PredictGrowth { .. } => "predictGrowth",
            Operation::CompareScenarios { .. } => "compareScenarios",
            Operation::SaveRecord { .. } => "pdca.saveRecord",
            Operation::GetTrends { .. } => "pdca.getTrends",
            Operation::GetLearningModel { .. } => "pdca.getLearningModel",
            Operation::ImprovePrediction { .. } => "pdca.improvePrediction",
            Operation::PersonalizedPrediction { .. } => "pdca.personalizedPrediction",
        }
    }
}

/// A generic prediction rescaled by the user's own history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalizedPrediction {
    #[serde(flatten)]
    pub prediction: PredictionResult,
    /// Absent until the user has at least two records
    #[serde(skip_serializing_if = "Option::is_none")]
    pub personalization_factor: Option<PersonalizationFactor>,
    pub learning_boost: i64,
}

pub struct GrowthService {
    predictor: GrowthPredictor,
    comparator: ScenarioComparator,
    learner: PersonalizationLearner,
}

impl GrowthService {
    pub fn new(config: &ServiceConfig, repository: Arc<dyn RecordRepository>) -> Self {
        Self {
            predictor: GrowthPredictor::new(),
            comparator: ScenarioComparator::new(config.comparator_config()),
            learner: PersonalizationLearner::new(repository),
        }
    }

    pub fn predict_growth(&self, request: &GrowthRequest) -> GrowthResult<PredictionResult> {
        self.predictor.predict(request)
    }

    pub fn compare_scenarios(&self, request: &GrowthRequest) -> GrowthResult<ABTestComparison> {
        self.comparator.compare(request)
    }

    pub async fn save_record(&self, record: NewPdcaRecord) -> GrowthResult<PdcaRecord> {
        self.learner.save_record(record).await
    }

    pub async fn get_trends(&self, user_id: &str) -> GrowthResult<TrendAnalysis> {
        self.learner.analyze_trends(user_id).await
    }

    pub async fn get_learning_model(&self, user_id: &str) -> GrowthResult<LearningModel> {
        self.learner.learning_model(user_id).await
    }

    pub async fn improve_prediction(
        &self,
        request: &GrowthRequest,
        user_id: &str,
    ) -> GrowthResult<ImprovedPrediction> {
        self.learner.improve_prediction(request, user_id).await
    }

    pub async fn personalized_prediction(
        &self,
        request: &GrowthRequest,
        user_id: &str,
    ) -> GrowthResult<PersonalizedPrediction> {
        let mut prediction = self.predictor.predict(request)?;
        let factor = self.learner.personalization_factor(user_id).await?;
        if let Some(factor) = &factor {
            factor.apply_to(&mut prediction);
        }
        Ok(PersonalizedPrediction {
            prediction,
            learning_boost: factor.map(|f| f.learning_boost()).unwrap_or(0),
            personalization_factor: factor,
        })
    }

    /// Run one operation and wrap the outcome in the response envelope.
    pub async fn dispatch(&self, operation: Operation) -> ApiResponse<Value> {
        let name = operation.name();
        tracing::debug!("Dispatching {}", name);

        let outcome = match operation {
            Operation::PredictGrowth { request } => to_json(self.predict_growth(&request)),
            Operation::CompareScenarios { request } => to_json(self.compare_scenarios(&request)),
            Operation::SaveRecord { record } => to_json(self.save_record(record).await),
            Operation::GetTrends { user_id } => to_json(self.get_trends(&user_id).await),
            Operation::GetLearningModel { user_id } => {
                to_json(self.get_learning_model(&user_id).await)
            }
            Operation::ImprovePrediction { request, user_id } => {
                to_json(self.improve_prediction(&request, &user_id).await)
            }
            Operation::PersonalizedPrediction { request, user_id } => {
                to_json(self.personalized_prediction(&request, &user_id).await)
            }
        };

        match outcome {
            Ok(data) => ApiResponse::success(data),
            Err(e) => {
                match &e {
                    GrowthError::Validation { .. } => {
                        tracing::info!("{} rejected: {}", name, e)
                    }
                    _ => tracing::error!("{} failed: {}", name, e),
                }
                ApiResponse::failure(&e)
            }
        }
    }

    /// Decode a JSON envelope and dispatch it. Malformed envelopes and
    /// wrongly typed fields are reported as validation errors.
    pub async fn handle(&self, envelope: Value) -> ApiResponse<Value> {
        match serde_json::from_value::<Operation>(envelope) {
            Ok(operation) => self.dispatch(operation).await,
            Err(e) => {
                tracing::info!("Rejected malformed request: {}", e);
                ApiResponse::failure(&GrowthError::validation("request", e.to_string()))
            }
        }
    }

    /// One JSON line in, one JSON line out.
    pub async fn handle_line(&self, line: &str) -> String {
        let response = match serde_json::from_str::<Value>(line) {
            Ok(envelope) => self.handle(envelope).await,
            Err(e) => ApiResponse::failure(&GrowthError::validation("request", e.to_string())),
        };
        serde_json::to_string(&response).unwrap_or_else(|e| {
            format!(
                r#"{{"success":false,"error":{{"kind":"computation","message":"{}"}}}}"#,
                e.to_string().replace('"', "'")
            )
        })
    }
}

fn to_json<T: Serialize>(result: GrowthResult<T>) -> GrowthResult<Value> {
    let value = result?;
    serde_json::to_value(value).map_err(|e| GrowthError::Computation(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};
    use pdca_learner::{ActualMetrics, InMemoryRecordStore, PdcaPhase, TargetMetrics};
    use serde_json::json;

    fn service() -> GrowthService {
        GrowthService::new(
            &ServiceConfig::default(),
            Arc::new(InMemoryRecordStore::new()),
        )
    }

    fn service_with_history(ratio: f64, count: u32) -> GrowthService {
        let records = (1..=count)
            .map(|month| PdcaRecord {
                id: format!("seed-{month}"),
                user_id: "creator-1".to_string(),
                phase: PdcaPhase::Act,
                start_date: NaiveDate::from_ymd_opt(2024, month, 1).unwrap(),
                target_metrics: TargetMetrics {
                    follower_gain: 100.0,
                    engagement_rate: 0.03,
                    reach: 1000.0,
                },
                actual_metrics: ActualMetrics {
                    follower_gain: 100.0 * ratio,
                    engagement_rate: 0.03,
                    reach: 1000.0,
                    ..Default::default()
                },
                strategies: vec!["reels".to_string()],
                content_types: vec!["reel".to_string()],
                insights: vec![],
                created_at: Utc::now(),
            })
            .collect();
        GrowthService::new(
            &ServiceConfig::default(),
            Arc::new(InMemoryRecordStore::with_records(records)),
        )
    }

    fn growth_request() -> Value {
        json!({
            "currentFollowers": 5000,
            "followerGain": 1000,
            "planPeriod": 3,
            "engagementRate": 0.03,
            "postsPerWeek": 4
        })
    }

    fn typed_request() -> GrowthRequest {
        serde_json::from_value(growth_request()).unwrap()
    }

    #[tokio::test]
    async fn test_predict_growth_envelope() {
        let response = service()
            .handle(json!({ "operation": "predictGrowth", "request": growth_request() }))
            .await;
        assert!(response.success);
        assert!(response.error.is_none());
        let data = response.data.unwrap();
        assert_eq!(data["predictedGrowth"]["month1"], 484);
        assert_eq!(data["predictedGrowth"]["month3"], 549);
        assert_eq!(data["monthlyGrowth"].as_array().unwrap().len(), 12);
    }

    #[tokio::test]
    async fn test_missing_field_is_validation_not_empty_result() {
        let response = service()
            .handle(json!({
                "operation": "predictGrowth",
                "request": { "followerGain": 1000, "planPeriod": 3 }
            }))
            .await;
        assert!(!response.success);
        assert!(response.data.is_none());
        let error = response.error.unwrap();
        assert_eq!(error.kind, "validation");
        assert_eq!(error.field.as_deref(), Some("currentFollowers"));
    }

    #[tokio::test]
    async fn test_wrong_type_and_unknown_operation_are_validation() {
        let svc = service();
        let wrong_type = svc
            .handle(json!({
                "operation": "compareScenarios",
                "request": { "currentFollowers": "many", "followerGain": 10, "planPeriod": 1 }
            }))
            .await;
        assert_eq!(wrong_type.error.unwrap().kind, "validation");

        let unknown = svc.handle(json!({ "operation": "deleteEverything" })).await;
        assert_eq!(unknown.error.unwrap().kind, "validation");
    }

    #[tokio::test]
    async fn test_compare_scenarios_ranks_catalog() {
        let response = service()
            .handle(json!({ "operation": "compareScenarios", "request": growth_request() }))
            .await;
        let data = response.data.unwrap();
        let scenarios = data["scenarios"].as_array().unwrap();
        assert_eq!(scenarios.len(), 4);
        assert_eq!(data["winner"], scenarios[0]["id"]);
        assert_eq!(data["timeline"].as_array().unwrap().len(), 4);
        let scores: Vec<f64> = scenarios.iter().map(|s| s["score"].as_f64().unwrap()).collect();
        assert!(scores.windows(2).all(|w| w[0] >= w[1]));
    }

    #[tokio::test]
    async fn test_saved_records_feed_trends_and_model() {
        let svc = service();
        for (month, actual) in [(1, 90), (2, 110), (3, 130)] {
            let response = svc
                .handle(json!({
                    "operation": "pdca.saveRecord",
                    "record": {
                        "userId": "creator-9",
                        "phase": "check",
                        "startDate": format!("2024-0{month}-01"),
                        "targetMetrics": { "followerGain": 100, "engagementRate": 0.03, "reach": 5000 },
                        "actualMetrics": { "followerGain": actual, "engagementRate": 0.04, "reach": 6000 },
                        "strategies": ["reels"]
                    }
                }))
                .await;
            assert!(response.success);
            assert!(response.data.unwrap()["id"].as_str().is_some());
        }

        let trends = svc
            .handle(json!({ "operation": "pdca.getTrends", "userId": "creator-9" }))
            .await
            .data
            .unwrap();
        assert_eq!(trends["period"], "2024-01-01 to 2024-03-01");
        assert_eq!(trends["averageGrowth"], 110.0);
        assert_eq!(trends["bestStrategies"][0]["strategy"], "reels");

        let model = svc
            .handle(json!({ "operation": "pdca.getLearningModel", "userId": "creator-9" }))
            .await
            .data
            .unwrap();
        assert_eq!(model["dataPoints"], 3);
        assert!((model["accuracy"].as_f64().unwrap() - 0.75).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_invalid_record_is_rejected() {
        let response = service()
            .handle(json!({
                "operation": "pdca.saveRecord",
                "record": {
                    "userId": "",
                    "phase": "plan",
                    "startDate": "2024-01-01"
                }
            }))
            .await;
        assert_eq!(response.error.unwrap().field.as_deref(), Some("userId"));
    }

    #[tokio::test]
    async fn test_improve_prediction_with_single_record_is_untouched() {
        let response = service_with_history(1.5, 1)
            .handle(json!({
                "operation": "pdca.improvePrediction",
                "request": growth_request(),
                "userId": "creator-1"
            }))
            .await;
        let data = response.data.unwrap();
        assert_eq!(data["learningBoost"], 0);
        assert_eq!(data["followerGain"], 1000.0);
        assert!(data.get("confidence").is_none());
    }

    #[tokio::test]
    async fn test_personalized_prediction_applies_factor() {
        let svc = service_with_history(1.2, 3);
        let generic = svc.predict_growth(&typed_request()).unwrap();

        let response = svc
            .handle(json!({
                "operation": "pdca.personalizedPrediction",
                "request": growth_request(),
                "userId": "creator-1"
            }))
            .await;
        let data = response.data.unwrap();
        assert_eq!(data["learningBoost"], 20);
        assert_eq!(
            data["predictedGrowth"]["month3"],
            (generic.predicted_growth.month3 as f64 * 1.2).round() as i64
        );

        let newcomer = svc
            .personalized_prediction(&typed_request(), "nobody")
            .await
            .unwrap();
        assert!(newcomer.personalization_factor.is_none());
        assert_eq!(newcomer.prediction, generic);
    }

    #[tokio::test]
    async fn test_handle_line_rejects_garbage() {
        let line = service().handle_line("{not json").await;
        let parsed: Value = serde_json::from_str(&line).unwrap();
        assert_eq!(parsed["success"], false);
        assert_eq!(parsed["error"]["kind"], "validation");
    }
}
