//! Planner settings.
//!
//! A planner is identified by an id and samples trajectories at a fixed rate.
//! Both are instance properties, never part of an individual motion request.

use crate::config::{ConfigError, SharedConfig};
use crate::consts::DEFAULT_RATE_HZ;
use serde::{Deserialize, Serialize};

fn default_rate() -> f64 {
    DEFAULT_RATE_HZ
}

/// Planner identity and sampling rate.
///
/// # TOML Example
///
/// ```toml
/// [planner]
/// id = "trapezoidal"
/// rate = 100.0
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PlannerConfig {
    /// Planner identifier.
    pub id: String,

    /// Sampling rate in samples per second.
    /// Defaults to `DEFAULT_RATE_HZ` if omitted.
    #[serde(default = "default_rate")]
    pub rate: f64,
}

impl PlannerConfig {
    /// Validate the planner configuration.
    ///
    /// # Validation Rules
    /// 1. `id` is not empty
    /// 2. `rate` is finite and > 0
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.id.is_empty() {
            return Err(ConfigError::ValidationError(
                "planner id cannot be empty".to_string(),
            ));
        }
        if !self.rate.is_finite() || self.rate <= 0.0 {
            return Err(ConfigError::ValidationError(format!(
                "planner rate must be finite and > 0, got {}",
                self.rate
            )));
        }
        Ok(())
    }
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            id: "trapezoidal".to_string(),
            rate: DEFAULT_RATE_HZ,
        }
    }
}

/// On-disk layout of `planner.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlannerFileConfig {
    /// Shared application settings.
    #[serde(default)]
    pub shared: SharedConfig,
    /// Planner section.
    pub planner: PlannerConfig,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigLoader;

    #[test]
    fn default_is_valid() {
        assert!(PlannerConfig::default().validate().is_ok());
    }

    #[test]
    fn rate_defaults_when_omitted() {
        let file = PlannerFileConfig::from_toml(
            r#"
[planner]
id = "p1"
"#,
        )
        .unwrap();
        assert_eq!(file.planner.rate, DEFAULT_RATE_HZ);
        assert_eq!(file.shared.service_name, "traj-planner");
    }

    #[test]
    fn rejects_empty_id() {
        let cfg = PlannerConfig {
            id: String::new(),
            rate: 50.0,
        };
        assert!(matches!(cfg.validate(), Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn rejects_bad_rate() {
        for rate in [0.0, -10.0, f64::NAN, f64::INFINITY] {
            let cfg = PlannerConfig {
                id: "p".to_string(),
                rate,
            };
            assert!(cfg.validate().is_err(), "rate {rate} accepted");
        }
    }

    #[test]
    fn rejects_unknown_fields() {
        let result = PlannerFileConfig::from_toml(
            r#"
[planner]
id = "p1"
rate = 10.0
jerk = 5.0
"#,
        );
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }
}
