//! # Trajectory Planner Library
//!
//! Multi-axis, time-synchronized trapezoidal velocity-profile planner.
//!
//! Given a start and target joint configuration, per-axis velocity and
//! acceleration limits and a sampling rate, the planner produces position,
//! velocity and acceleration samples for every axis such that no axis exceeds
//! its limits and all axes start and stop together. Moves too short to reach
//! the velocity limit degrade from trapezoidal to triangular profiles.
//!
//! # Module Structure
//!
//! - [`profile`] - Per-axis candidate profile and evaluation
//! - [`sync`] - Re-solving axes to a shared duration
//! - [`time_grid`] - Fixed-step sample times
//! - [`trajectory`] - Planned trajectory result type
//! - [`planner`] - `TrajectoryPlanner` trait and `TrapezoidalPlanner`
//! - [`controller`] - Playback of planned moves into a robot model
//! - [`error`] - Error types
//!
//! # Example
//!
//! ```rust
//! use traj_planner::planner::TrapezoidalPlanner;
//!
//! let planner = TrapezoidalPlanner::new("example", 100.0);
//! let traj = planner.plan(&[0.0], &[10.0], &[2.0], &[1.0]).unwrap();
//! assert_eq!(traj.positions().last().unwrap()[0], 10.0);
//! assert!((traj.peak_speed(0) - 2.0).abs() < 1e-9);
//! ```

#![deny(missing_docs)]

pub mod controller;
pub mod error;
pub mod planner;
pub mod profile;
pub mod sync;
pub mod time_grid;
pub mod trajectory;

// Re-export key types for convenience
pub use crate::controller::RobotController;
pub use crate::error::{ControllerError, PlanError};
pub use crate::planner::{TrajectoryPlanner, TrapezoidalPlanner};
pub use crate::trajectory::Trajectory;
