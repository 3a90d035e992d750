#[cfg(test)]
mod predictor_tests {
    use approx::assert_relative_eq;
    use growth_core::{GrowthError, GrowthRequest, RiskLevel};

    use crate::GrowthPredictor;

    fn request(followers: f64, gain: f64, months: u32) -> GrowthRequest {
        GrowthRequest {
            current_followers: Some(followers),
            follower_gain: Some(gain),
            plan_period: Some(months),
            engagement_rate: Some(0.03),
            posts_per_week: Some(4.0),
            ..Default::default()
        }
    }

    #[test]
    fn test_three_month_plan_grows_then_freezes() {
        let result = GrowthPredictor::new()
            .predict(&request(5000.0, 1000.0, 3))
            .unwrap();

        let curve = &result.monthly_growth;
        assert_eq!(curve.len(), 12);
        assert_eq!(&curve[..3], &[484, 516, 549]);
        assert!(curve[0] < curve[1] && curve[1] < curve[2]);
        assert!(curve[3..].iter().all(|v| *v == curve[2]));

        assert_eq!(result.predicted_growth.month1, 484);
        assert_eq!(result.predicted_growth.month3, 549);
        assert_eq!(result.predicted_growth.month6, 549);
        assert_eq!(result.predicted_growth.month12, 549);

        // no confidence rule fires for this account
        assert_relative_eq!(result.confidence, 0.8, epsilon = 1e-9);
    }

    #[test]
    fn test_one_month_plan_is_flat() {
        let result = GrowthPredictor::new()
            .predict(&request(5000.0, 1000.0, 1))
            .unwrap();
        assert!(result.monthly_growth.iter().all(|v| *v == result.predicted_growth.month1));
    }

    #[test]
    fn test_twelve_month_plan_is_non_decreasing() {
        let result = GrowthPredictor::new()
            .predict(&request(5000.0, 2400.0, 12))
            .unwrap();
        assert!(result.monthly_growth.windows(2).all(|w| w[0] <= w[1]));
        assert!(result.monthly_growth[11] > result.monthly_growth[0]);
    }

    #[test]
    fn test_invalid_requests_never_produce_a_result() {
        let predictor = GrowthPredictor::new();

        let zero_gain = request(5000.0, 0.0, 3);
        assert!(matches!(
            predictor.predict(&zero_gain),
            Err(GrowthError::Validation { field: "followerGain", .. })
        ));

        let negative_followers = request(-10.0, 100.0, 3);
        assert!(matches!(
            predictor.predict(&negative_followers),
            Err(GrowthError::Validation { field: "currentFollowers", .. })
        ));

        let missing_period = GrowthRequest {
            plan_period: None,
            ..request(5000.0, 100.0, 3)
        };
        assert!(predictor.predict(&missing_period).is_err());
    }

    #[test]
    fn test_unrepresentable_feasibility_fails_the_prediction() {
        let tiny_base = request(1e-320, 1000.0, 1);
        let err = GrowthPredictor::new().predict(&tiny_base).unwrap_err();
        assert_eq!(err.kind(), "computation");
    }

    #[test]
    fn test_confidence_penalties_and_clamp() {
        let predictor = GrowthPredictor::new();

        let weak = GrowthRequest {
            account_age_months: Some(2.0),
            engagement_rate: Some(0.005),
            posts_per_week: Some(1.0),
            ..request(5000.0, 100.0, 3)
        };
        let result = predictor.predict(&weak).unwrap();
        assert_relative_eq!(result.confidence, 0.35, epsilon = 1e-9);

        let strong = GrowthRequest {
            account_age_months: Some(36.0),
            engagement_rate: Some(0.08),
            posts_per_week: Some(14.0),
            ..request(5000.0, 100.0, 3)
        };
        let result = predictor.predict(&strong).unwrap();
        assert_relative_eq!(result.confidence, 1.0);
    }

    #[test]
    fn test_growth_pattern_splits_horizons() {
        let result = GrowthPredictor::new()
            .predict(&request(5000.0, 1000.0, 6))
            .unwrap();
        let phases = &result.growth_pattern;
        assert_eq!(phases.len(), 3);
        assert_eq!(phases[0].phase, "initial");
        assert_eq!(
            phases[0].expected_growth,
            (result.predicted_growth.month3 as f64 * 0.3).round() as i64
        );
        assert_eq!(
            phases[1].expected_growth,
            (result.predicted_growth.month6 as f64 * 0.4).round() as i64
        );
        assert_eq!(phases[2].phase, "maturity");
    }

    #[test]
    fn test_risk_and_factors_flow_through() {
        let fragile = GrowthRequest {
            current_followers: Some(200.0),
            engagement_rate: Some(0.005),
            ..request(200.0, 100.0, 3)
        };
        let result = GrowthPredictor::new().predict(&fragile).unwrap();
        assert_eq!(result.risk_assessment.level, RiskLevel::High);
        assert!(result
            .key_factors
            .iter()
            .any(|f| f.factor == "Small follower base" && f.impact > 0.0));
        assert_eq!(result.seasonal_adjustments.len(), 12);
    }

    #[test]
    fn test_model_score_includes_bias() {
        let result = GrowthPredictor::new()
            .predict(&request(5000.0, 1000.0, 3))
            .unwrap();
        assert!(result.model_score > 10.0);
    }

    #[test]
    fn test_scale_growth_rescales_every_figure() {
        let mut result = GrowthPredictor::new()
            .predict(&request(5000.0, 1000.0, 3))
            .unwrap();
        result.scale_growth(1.1);
        assert_eq!(result.predicted_growth.month1, 532);
        assert_eq!(result.monthly_growth[11], 604);
    }

    #[test]
    fn test_serializes_with_camel_case_keys() {
        let result = GrowthPredictor::new()
            .predict(&request(5000.0, 1000.0, 3))
            .unwrap();
        let json = serde_json::to_value(&result).unwrap();
        assert!(json.get("predictedGrowth").is_some());
        assert_eq!(json["riskAssessment"]["level"], "low");
        assert!(json["feasibility"]["difficultyScore"].is_number());
    }
}
