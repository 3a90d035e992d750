//! Target Feasibility
//!
//! Compares the monthly growth rate a plan requires against the typical
//! monthly growth rate for the account's niche. The resulting difficulty
//! ratio drives the colour coding shown next to a target.

use growth_core::stats::ensure_finite;
use growth_core::{GrowthResult, Niche, ValidatedRequest};
use serde::{Deserialize, Serialize};

/// Monthly growth rate assumed when the niche is unknown
pub const DEFAULT_INDUSTRY_GROWTH_RATE: f64 = 0.03;

pub fn industry_growth_rate(niche: Niche) -> f64 {
    match niche {
        Niche::Fashion => 0.04,
        Niche::Beauty => 0.04,
        Niche::Fitness => 0.035,
        Niche::Food => 0.03,
        Niche::Travel => 0.035,
        Niche::Tech => 0.025,
        Niche::Business => 0.02,
        Niche::Lifestyle => 0.03,
        Niche::Education => 0.025,
        Niche::Entertainment => 0.045,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Moderate,
    Challenging,
    Unrealistic,
}

impl Difficulty {
    pub fn from_ratio(ratio: f64) -> Self {
        match ratio {
            r if r <= 1.0 => Difficulty::Easy,
            r if r <= 2.0 => Difficulty::Moderate,
            r if r <= 3.5 => Difficulty::Challenging,
            _ => Difficulty::Unrealistic,
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            Difficulty::Easy => "green",
            Difficulty::Moderate => "yellow",
            Difficulty::Challenging => "orange",
            Difficulty::Unrealistic => "red",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeasibilityAssessment {
    pub required_monthly_rate: f64,
    pub industry_monthly_rate: f64,
    /// required / industry
    pub difficulty_score: f64,
    pub difficulty: Difficulty,
    pub color: String,
}

/// # Errors
///
/// - `GrowthError::Computation` when the required rate overflows, e.g. for a
///   vanishingly small follower base
pub fn assess_feasibility(request: &ValidatedRequest) -> GrowthResult<FeasibilityAssessment> {
    let months = request.plan_period.months() as f64;
    let required_monthly_rate = ensure_finite(
        "required monthly rate",
        request.follower_gain / request.current_followers / months,
    )?;
    let industry_monthly_rate = request
        .niche
        .as_deref()
        .and_then(Niche::parse)
        .map(industry_growth_rate)
        .unwrap_or(DEFAULT_INDUSTRY_GROWTH_RATE);

    let difficulty_score = ensure_finite(
        "difficulty score",
        required_monthly_rate / industry_monthly_rate,
    )?;
    let difficulty = Difficulty::from_ratio(difficulty_score);

    Ok(FeasibilityAssessment {
        required_monthly_rate,
        industry_monthly_rate,
        difficulty_score,
        difficulty,
        color: difficulty.color().to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use growth_core::GrowthRequest;

    fn request(followers: f64, gain: f64, months: u32, niche: Option<&str>) -> ValidatedRequest {
        GrowthRequest {
            current_followers: Some(followers),
            follower_gain: Some(gain),
            plan_period: Some(months),
            niche: niche.map(str::to_string),
            ..Default::default()
        }
        .validate()
        .unwrap()
    }

    #[test]
    fn test_modest_goal_is_easy() {
        // 300 / 10_000 / 3 = 1% per month against a 3% baseline
        let result = assess_feasibility(&request(10_000.0, 300.0, 3, None)).unwrap();
        assert_relative_eq!(result.required_monthly_rate, 0.01);
        assert_eq!(result.difficulty, Difficulty::Easy);
        assert_eq!(result.color, "green");
    }

    #[test]
    fn test_doubling_in_a_month_is_unrealistic() {
        let result = assess_feasibility(&request(1000.0, 1000.0, 1, Some("business"))).unwrap();
        assert_relative_eq!(result.industry_monthly_rate, 0.02);
        assert_eq!(result.difficulty, Difficulty::Unrealistic);
    }

    #[test]
    fn test_overflowing_rate_is_a_computation_error() {
        let err = assess_feasibility(&request(1e-320, 1000.0, 1, None)).unwrap_err();
        assert_eq!(err.kind(), "computation");
    }

    #[test]
    fn test_bands() {
        assert_eq!(Difficulty::from_ratio(1.5), Difficulty::Moderate);
        assert_eq!(Difficulty::from_ratio(3.0), Difficulty::Challenging);
    }
}
