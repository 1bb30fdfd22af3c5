//! Workspace-wide numeric constants.
//!
//! Single source of truth for tolerances and limits shared by the planner,
//! the robot model and configuration validation.

/// Maximum number of degrees of freedom a robot model may declare.
pub const MAX_DOF: usize = 64;

/// Floor applied to velocity/acceleration limits and threshold below which a
/// joint distance counts as "no motion".
///
/// Also used as the tolerance when comparing re-solved profiles against
/// their limits. Changing it shifts which profile (triangular vs.
/// trapezoidal) is selected near the threshold.
pub const LIMIT_EPSILON: f64 = 1e-6;

/// Tolerance used when matching the last generated grid step against the
/// synchronized duration.
pub const TIME_GRID_TOLERANCE: f64 = 1e-5;

/// Default sampling rate in samples per second.
pub const DEFAULT_RATE_HZ: f64 = 100.0;

/// Sample interval used when the configured rate is unusable (non-finite or
/// non-positive).
pub const FALLBACK_SAMPLE_INTERVAL: f64 = 1.0 / DEFAULT_RATE_HZ;

/// Default planner configuration file name inside a config directory.
pub const PLANNER_CONFIG_FILE: &str = "planner.toml";

/// Default robot model configuration file name inside a config directory.
pub const ROBOT_CONFIG_FILE: &str = "robot.toml";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constants_are_consistent() {
        assert!(MAX_DOF > 0 && MAX_DOF <= 256);
        assert!(LIMIT_EPSILON > 0.0);
        assert!(TIME_GRID_TOLERANCE > LIMIT_EPSILON);
        assert!(DEFAULT_RATE_HZ > 0.0);
    }

    #[test]
    fn fallback_interval_matches_default_rate() {
        assert!((FALLBACK_SAMPLE_INTERVAL - 0.01).abs() < 1e-15);
    }
}
