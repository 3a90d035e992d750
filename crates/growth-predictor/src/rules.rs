//! Rule batteries for key factors and risk.
//!
//! Each battery is an ordered list of (predicate, effect) pairs. Rules are
//! evaluated independently and in list order; for risk, severity is merged
//! with [`RiskLevel::escalate`] so a later rule can never downgrade it.

use growth_core::{RiskLevel, ValidatedRequest};

use crate::models::{KeyFactor, RiskAssessment};

struct FactorRule {
    factor: &'static str,
    impact: f64,
    recommendation: &'static str,
    applies: fn(&ValidatedRequest) -> bool,
}

struct RiskRule {
    severity: RiskLevel,
    factor: &'static str,
    mitigation: &'static str,
    applies: fn(&ValidatedRequest) -> bool,
}

fn small_audience(r: &ValidatedRequest) -> bool {
    r.current_followers < 1000.0
}

fn low_engagement(r: &ValidatedRequest) -> bool {
    r.engagement_rate < 0.02
}

fn infrequent_posting(r: &ValidatedRequest) -> bool {
    r.posts_per_week < 3.0
}

fn reel_heavy(r: &ValidatedRequest) -> bool {
    r.reel_frequency > 0.5
}

fn few_hashtags(r: &ValidatedRequest) -> bool {
    r.hashtag_count < 10.0
}

fn tiny_audience(r: &ValidatedRequest) -> bool {
    r.current_followers < 500.0
}

fn very_low_engagement(r: &ValidatedRequest) -> bool {
    r.engagement_rate < 0.01
}

fn rare_posting(r: &ValidatedRequest) -> bool {
    r.posts_per_week < 2.0
}

fn new_account(r: &ValidatedRequest) -> bool {
    r.account_age_months < 3.0
}

const FACTOR_RULES: &[FactorRule] = &[
    FactorRule {
        factor: "Small follower base",
        impact: 0.8,
        recommendation: "Small accounts grow fastest in relative terms; focus on consistent, discoverable content",
        applies: small_audience,
    },
    FactorRule {
        factor: "Low engagement rate",
        impact: -0.7,
        recommendation: "Ask questions in captions and reply to every comment to lift engagement",
        applies: low_engagement,
    },
    FactorRule {
        factor: "Infrequent posting",
        impact: -0.5,
        recommendation: "Post at least 3 times per week to stay visible in feeds",
        applies: infrequent_posting,
    },
    FactorRule {
        factor: "Strong reel usage",
        impact: 0.6,
        recommendation: "Keep prioritizing reels; they reach non-followers more than any other format",
        applies: reel_heavy,
    },
    FactorRule {
        factor: "Limited hashtag usage",
        impact: -0.4,
        recommendation: "Use 10-30 relevant hashtags mixing broad and niche tags",
        applies: few_hashtags,
    },
];

const RISK_RULES: &[RiskRule] = &[
    RiskRule {
        severity: RiskLevel::High,
        factor: "Very small follower base (under 500)",
        mitigation: "Build an initial audience through collaborations and community engagement before scaling goals",
        applies: tiny_audience,
    },
    RiskRule {
        severity: RiskLevel::Medium,
        factor: "Engagement rate below 1%",
        mitigation: "Review content quality and audience fit; test interactive formats such as polls and Q&A",
        applies: very_low_engagement,
    },
    RiskRule {
        severity: RiskLevel::Medium,
        factor: "Posting less than twice per week",
        mitigation: "Set up a content calendar and batch-produce posts to keep a steady cadence",
        applies: rare_posting,
    },
    RiskRule {
        severity: RiskLevel::Medium,
        factor: "Account younger than 3 months",
        mitigation: "Expect volatile results while the algorithm learns the account; judge progress over longer windows",
        applies: new_account,
    },
];

/// Every key factor whose predicate holds, in rule order.
pub fn key_factors(request: &ValidatedRequest) -> Vec<KeyFactor> {
    FACTOR_RULES
        .iter()
        .filter(|rule| (rule.applies)(request))
        .map(|rule| KeyFactor {
            factor: rule.factor.to_string(),
            impact: rule.impact,
            recommendation: rule.recommendation.to_string(),
        })
        .collect()
}

/// Evaluate the risk battery starting from `Low`.
pub fn assess_risk(request: &ValidatedRequest) -> RiskAssessment {
    let mut assessment = RiskAssessment {
        level: RiskLevel::Low,
        factors: Vec::new(),
        mitigation: Vec::new(),
    };

    for rule in RISK_RULES.iter().filter(|rule| (rule.applies)(request)) {
        assessment.level = assessment.level.escalate(rule.severity);
        assessment.factors.push(rule.factor.to_string());
        assessment.mitigation.push(rule.mitigation.to_string());
    }

    assessment
}

#[cfg(test)]
mod tests {
    use super::*;
    use growth_core::GrowthRequest;

    fn request(followers: f64, engagement: f64, posts: f64, age: f64) -> ValidatedRequest {
        GrowthRequest {
            current_followers: Some(followers),
            follower_gain: Some(100.0),
            plan_period: Some(3),
            engagement_rate: Some(engagement),
            posts_per_week: Some(posts),
            account_age_months: Some(age),
            hashtag_count: Some(15.0),
            reel_frequency: Some(0.2),
            ..Default::default()
        }
        .validate()
        .unwrap()
    }

    #[test]
    fn test_healthy_account_is_low_risk() {
        let risk = assess_risk(&request(5000.0, 0.03, 4.0, 12.0));
        assert_eq!(risk.level, RiskLevel::Low);
        assert!(risk.factors.is_empty());
        assert!(risk.mitigation.is_empty());
    }

    #[test]
    fn test_medium_rules_do_not_downgrade_high() {
        let risk = assess_risk(&request(300.0, 0.005, 1.0, 1.0));
        assert_eq!(risk.level, RiskLevel::High);
        assert_eq!(risk.factors.len(), 4);
        assert_eq!(risk.factors.len(), risk.mitigation.len());
        assert!(risk.factors[0].contains("500"));
    }

    #[test]
    fn test_single_medium_rule() {
        let risk = assess_risk(&request(5000.0, 0.03, 1.0, 12.0));
        assert_eq!(risk.level, RiskLevel::Medium);
        assert_eq!(risk.factors.len(), 1);
    }

    #[test]
    fn test_factors_are_not_mutually_exclusive() {
        let mut req = request(800.0, 0.015, 2.0, 12.0);
        req.reel_frequency = 0.7;
        req.hashtag_count = 5.0;

        let factors = key_factors(&req);
        let impacts: Vec<f64> = factors.iter().map(|f| f.impact).collect();
        assert_eq!(impacts, vec![0.8, -0.7, -0.5, 0.6, -0.4]);
    }

    #[test]
    fn test_no_factors_for_typical_account() {
        assert!(key_factors(&request(5000.0, 0.03, 4.0, 12.0)).is_empty());
    }
}
