//! Trajectory Planner Common Library
//!
//! This crate provides shared constants, configuration loading and the robot
//! model for all crates of the trajectory planner workspace.
//!
//! # Module Structure
//!
//! - [`consts`] - Tolerances, default rate and DOF limit
//! - [`config`] - Configuration loading traits and types
//! - [`planner`] - Planner identity and sampling rate settings
//! - [`robot`] - Robot model configuration, runtime state and limits
//! - [`prelude`] - Common re-exports for convenience
//!
//! # Usage
//!
//! ```rust
//! use traj_common::consts::LIMIT_EPSILON;
//! use traj_common::config::{ConfigLoader, SharedConfig};
//! ```

pub mod config;
pub mod consts;
pub mod planner;
pub mod prelude;
pub mod robot;
