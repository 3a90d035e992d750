use anyhow::{bail, Context, Result};
use scenario_comparator::ComparatorConfig;
use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    // Storage
    pub database_url: Option<String>, // None keeps records in memory

    // Comparator resource assumptions
    pub available_hours: f64,   // 15 hours/week
    pub default_budget: f64,    // 5000
    pub default_team_size: f64, // 1
}

impl Default for ServiceConfig {
    fn default() -> Self {
        let comparator = ComparatorConfig::default();
        Self {
            database_url: None,
            available_hours: comparator.available_time_hours,
            default_budget: comparator.default_budget,
            default_team_size: comparator.default_team_size,
        }
    }
}

impl ServiceConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup. Unset keys fall back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();
        let number = |key: &str, default: f64| -> Result<f64> {
            match lookup(key) {
                Some(raw) => raw
                    .trim()
                    .parse::<f64>()
                    .with_context(|| format!("{key} must be a number, got '{raw}'")),
                None => Ok(default),
            }
        };

        let config = Self {
            database_url: lookup("GROWTH_DATABASE_URL").filter(|url| !url.trim().is_empty()),
            available_hours: number("GROWTH_AVAILABLE_HOURS", defaults.available_hours)?,
            default_budget: number("GROWTH_DEFAULT_BUDGET", defaults.default_budget)?,
            default_team_size: number("GROWTH_DEFAULT_TEAM_SIZE", defaults.default_team_size)?,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let checks = [
            ("GROWTH_AVAILABLE_HOURS", self.available_hours),
            ("GROWTH_DEFAULT_BUDGET", self.default_budget),
            ("GROWTH_DEFAULT_TEAM_SIZE", self.default_team_size),
        ];
        for (key, value) in checks {
            if !value.is_finite() || value <= 0.0 {
                bail!("{key} must be a positive number, got {value}");
            }
        }
        Ok(())
    }

    pub fn comparator_config(&self) -> ComparatorConfig {
        ComparatorConfig {
            available_time_hours: self.available_hours,
            default_budget: self.default_budget,
            default_team_size: self.default_team_size,
        }
    }
}
