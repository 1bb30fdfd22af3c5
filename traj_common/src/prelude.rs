//! Prelude module for common re-exports.
//!
//! # Usage
//!
//! ```rust
//! use traj_common::prelude::*;
//! ```

// ─── Logging ────────────────────────────────────────────────────────
pub use crate::config::LogLevel;

// ─── Configuration ──────────────────────────────────────────────────
pub use crate::config::{ConfigError, ConfigLoader, FullConfig, SharedConfig, load_config_dir};
pub use crate::planner::PlannerConfig;

// ─── Robot ──────────────────────────────────────────────────────────
pub use crate::robot::{JointLimits, RobotError, RobotModel, RobotModelConfig};

// ─── Constants ──────────────────────────────────────────────────────
pub use crate::consts::{DEFAULT_RATE_HZ, LIMIT_EPSILON, MAX_DOF, TIME_GRID_TOLERANCE};
