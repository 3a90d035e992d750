//! Guarded numeric helpers shared by the engines.
//!
//! Every reduction here has an explicit answer for empty input so that no
//! engine ever divides by a zero length and leaks NaN into a result.

use crate::error::{GrowthError, GrowthResult};

/// Arithmetic mean, or `None` for an empty slice.
pub fn mean(data: &[f64]) -> Option<f64> {
    if data.is_empty() {
        return None;
    }
    Some(data.iter().sum::<f64>() / data.len() as f64)
}

/// Arithmetic mean with a fallback for empty input.
pub fn mean_or(data: &[f64], default: f64) -> f64 {
    mean(data).unwrap_or(default)
}

/// `numerator / denominator`, or `default` when the denominator is not a
/// positive finite number.
pub fn ratio_or(numerator: f64, denominator: f64, default: f64) -> f64 {
    if denominator > 0.0 && denominator.is_finite() && numerator.is_finite() {
        numerator / denominator
    } else {
        default
    }
}

/// The trailing `n` items of a slice (all of it when shorter).
pub fn last_n<T>(items: &[T], n: usize) -> &[T] {
    &items[items.len().saturating_sub(n)..]
}

/// Round half away from zero to a whole follower count.
pub fn round_count(value: f64) -> i64 {
    value.round() as i64
}

/// Reject NaN and infinities coming out of a computation.
pub fn ensure_finite(label: &str, value: f64) -> GrowthResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(GrowthError::Computation(format!(
            "{} is not finite ({})",
            label, value
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_mean_guards_empty() {
        assert_eq!(mean(&[]), None);
        assert_relative_eq!(mean_or(&[], 1.0), 1.0);
        assert_relative_eq!(mean_or(&[1.0, 2.0, 3.0], 0.0), 2.0);
    }

    #[test]
    fn test_ratio_guards_zero_denominator() {
        assert_relative_eq!(ratio_or(5.0, 0.0, 1.0), 1.0);
        assert_relative_eq!(ratio_or(5.0, -2.0, 0.5), 0.5);
        assert_relative_eq!(ratio_or(5.0, f64::NAN, 1.0), 1.0);
        assert_relative_eq!(ratio_or(6.0, 3.0, 1.0), 2.0);
    }

    #[test]
    fn test_last_n() {
        let data = [1, 2, 3, 4, 5];
        assert_eq!(last_n(&data, 3), &[3, 4, 5]);
        assert_eq!(last_n(&data, 10), &data);
        assert!(last_n::<i32>(&[], 3).is_empty());
    }

    #[test]
    fn test_ensure_finite() {
        assert!(ensure_finite("x", 1.5).is_ok());
        let err = ensure_finite("growth", f64::NAN).unwrap_err();
        assert_eq!(err.kind(), "computation");
    }
}
