//! Planner and controller error types.

use thiserror::Error;
use traj_common::robot::RobotError;

/// Errors returned by trajectory planning.
///
/// Planning either fully succeeds or fails before any sample is produced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlanError {
    /// Current or target vector length differs from the robot DOF.
    #[error("state size does not match robot DOF {expected}: current has {current}, target has {target}")]
    DimensionMismatch {
        /// Robot DOF.
        expected: usize,
        /// Length of the current state vector.
        current: usize,
        /// Length of the target state vector.
        target: usize,
    },

    /// A limits vector length differs from the robot DOF.
    #[error("limits size does not match robot DOF {expected}: velocity has {velocity}, acceleration has {acceleration}")]
    LimitsMismatch {
        /// Robot DOF.
        expected: usize,
        /// Length of the velocity limits.
        velocity: usize,
        /// Length of the acceleration limits.
        acceleration: usize,
    },
}

/// Errors returned by [`crate::controller::RobotController`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ControllerError {
    /// Planning the move failed.
    #[error("planning failed: {0}")]
    Plan(#[from] PlanError),

    /// Applying a sample to the robot model failed.
    #[error("robot model rejected update: {0}")]
    Robot(#[from] RobotError),
}
