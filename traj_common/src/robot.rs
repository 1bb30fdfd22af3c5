//! Robot model configuration and runtime state.
//!
//! This module defines:
//! - `RobotModelConfig` - Joint count, joint ranges and per-joint limits
//! - `JointLimits` trait - What a planner needs to know about a robot
//! - `RobotModel` - Mutable joint state with explicit setters and listeners
//! - `RobotError` - Dimension errors raised by the setters

use crate::config::ConfigError;
use crate::consts::MAX_DOF;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::trace;

/// Errors raised when mutating a [`RobotModel`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RobotError {
    /// Vector length differs from the model DOF.
    #[error("{what} has {actual} components, robot has {expected} DOF")]
    DimensionMismatch {
        /// Which vector was rejected.
        what: &'static str,
        /// Robot DOF.
        expected: usize,
        /// Supplied length.
        actual: usize,
    },
}

/// Static description of a robot loaded from `robot.toml`.
///
/// # TOML Example
///
/// ```toml
/// [robot]
/// model = "arm2"
/// dof = 2
/// joint_names = ["shoulder", "elbow"]
/// joint_min = [-3.14, -2.0]
/// joint_max = [3.14, 2.0]
/// max_velocity = [0.5, 0.5]
/// max_acceleration = [0.5, 5.0]
/// initial_state = [0.0, 0.0]
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RobotModelConfig {
    /// Model identifier.
    pub model: String,
    /// Degrees of freedom.
    pub dof: usize,
    /// Joint names, one per DOF. May be omitted.
    #[serde(default)]
    pub joint_names: Vec<String>,
    /// Lower joint position bounds [rad].
    pub joint_min: Vec<f64>,
    /// Upper joint position bounds [rad].
    pub joint_max: Vec<f64>,
    /// Per-joint velocity limit [rad/s].
    pub max_velocity: Vec<f64>,
    /// Per-joint acceleration limit [rad/s²].
    pub max_acceleration: Vec<f64>,
    /// Joint state at startup [rad]. Defaults to all zeros.
    #[serde(default)]
    pub initial_state: Vec<f64>,
}

impl RobotModelConfig {
    /// Validate the robot configuration.
    ///
    /// # Validation Rules
    /// 1. `model` is not empty
    /// 2. 0 < `dof` <= MAX_DOF
    /// 3. Every per-joint array has `dof` entries (`joint_names` and
    ///    `initial_state` may also be empty)
    /// 4. All values are finite
    /// 5. `joint_min[i] <= joint_max[i]`
    /// 6. `initial_state[i]` lies inside the joint range
    ///
    /// Zero or negative limits are accepted here; the planner floors them.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.model.is_empty() {
            return Err(ConfigError::ValidationError(
                "robot model cannot be empty".to_string(),
            ));
        }

        if self.dof == 0 || self.dof > MAX_DOF {
            return Err(ConfigError::ValidationError(format!(
                "dof must be in 1..={MAX_DOF}, got {}",
                self.dof
            )));
        }

        if !self.joint_names.is_empty() && self.joint_names.len() != self.dof {
            return Err(ConfigError::ValidationError(format!(
                "joint_names has {} entries, expected {}",
                self.joint_names.len(),
                self.dof
            )));
        }

        let arrays: [(&str, &[f64], bool); 5] = [
            ("joint_min", self.joint_min.as_slice(), false),
            ("joint_max", self.joint_max.as_slice(), false),
            ("max_velocity", self.max_velocity.as_slice(), false),
            ("max_acceleration", self.max_acceleration.as_slice(), false),
            ("initial_state", self.initial_state.as_slice(), true),
        ];
        for (name, values, may_be_empty) in arrays {
            if may_be_empty && values.is_empty() {
                continue;
            }
            if values.len() != self.dof {
                return Err(ConfigError::ValidationError(format!(
                    "{name} has {} entries, expected {}",
                    values.len(),
                    self.dof
                )));
            }
            if let Some(i) = values.iter().position(|v| !v.is_finite()) {
                return Err(ConfigError::ValidationError(format!(
                    "{name}[{i}] is not finite"
                )));
            }
        }

        for i in 0..self.dof {
            if self.joint_min[i] > self.joint_max[i] {
                return Err(ConfigError::ValidationError(format!(
                    "joint {i}: joint_min {} > joint_max {}",
                    self.joint_min[i], self.joint_max[i]
                )));
            }
        }

        for (i, q) in self.initial_state.iter().enumerate() {
            if *q < self.joint_min[i] || *q > self.joint_max[i] {
                return Err(ConfigError::ValidationError(format!(
                    "joint {i}: initial_state {q} outside [{}, {}]",
                    self.joint_min[i], self.joint_max[i]
                )));
            }
        }

        Ok(())
    }

    /// Initial state, or all zeros when none was configured.
    pub fn initial_state_or_zero(&self) -> Vec<f64> {
        if self.initial_state.is_empty() {
            vec![0.0; self.dof]
        } else {
            self.initial_state.clone()
        }
    }
}

/// On-disk layout of `robot.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RobotFileConfig {
    /// Robot section.
    pub robot: RobotModelConfig,
}

/// Read-only view of a robot used by trajectory planners.
pub trait JointLimits {
    /// Degrees of freedom.
    fn dof(&self) -> usize;
    /// Per-joint velocity limits.
    fn max_velocity(&self) -> &[f64];
    /// Per-joint acceleration limits.
    fn max_acceleration(&self) -> &[f64];
}

/// Callback invoked with the new joint state after every state change.
pub type StateListener = Box<dyn FnMut(&[f64]) + Send>;

/// Runtime robot model.
///
/// Holds the current joint state and the limits the planner reads. Each
/// setter enforces the DOF. Consumers that need live updates register a
/// [`StateListener`].
pub struct RobotModel {
    model: String,
    dof: usize,
    joint_names: Vec<String>,
    joint_min: Vec<f64>,
    joint_max: Vec<f64>,
    max_velocity: Vec<f64>,
    max_acceleration: Vec<f64>,
    state: Vec<f64>,
    listeners: Vec<StateListener>,
}

impl std::fmt::Debug for RobotModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RobotModel")
            .field("model", &self.model)
            .field("dof", &self.dof)
            .field("state", &self.state)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl RobotModel {
    /// Build a model from a validated configuration.
    pub fn from_config(config: &RobotModelConfig) -> Self {
        let joint_names = if config.joint_names.is_empty() {
            (0..config.dof).map(|i| format!("joint_{i}")).collect()
        } else {
            config.joint_names.clone()
        };
        Self {
            model: config.model.clone(),
            dof: config.dof,
            joint_names,
            joint_min: config.joint_min.clone(),
            joint_max: config.joint_max.clone(),
            max_velocity: config.max_velocity.clone(),
            max_acceleration: config.max_acceleration.clone(),
            state: config.initial_state_or_zero(),
            listeners: Vec::new(),
        }
    }

    /// Model identifier.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Joint names.
    pub fn joint_names(&self) -> &[String] {
        &self.joint_names
    }

    /// Lower joint position bounds.
    pub fn joint_min(&self) -> &[f64] {
        &self.joint_min
    }

    /// Upper joint position bounds.
    pub fn joint_max(&self) -> &[f64] {
        &self.joint_max
    }

    /// Current joint state.
    pub fn state(&self) -> &[f64] {
        &self.state
    }

    /// Replace the joint state and notify listeners.
    pub fn set_state(&mut self, state: &[f64]) -> Result<(), RobotError> {
        self.check_len("state", state.len())?;
        self.state.copy_from_slice(state);
        trace!(model = %self.model, state = ?self.state, "robot state updated");
        for listener in &mut self.listeners {
            listener(&self.state);
        }
        Ok(())
    }

    /// Replace the per-joint velocity limits.
    pub fn set_velocity_limits(&mut self, limits: &[f64]) -> Result<(), RobotError> {
        self.check_len("velocity limits", limits.len())?;
        self.max_velocity.copy_from_slice(limits);
        Ok(())
    }

    /// Replace the per-joint acceleration limits.
    pub fn set_acceleration_limits(&mut self, limits: &[f64]) -> Result<(), RobotError> {
        self.check_len("acceleration limits", limits.len())?;
        self.max_acceleration.copy_from_slice(limits);
        Ok(())
    }

    /// Register a listener called after every [`RobotModel::set_state`].
    pub fn subscribe(&mut self, listener: StateListener) {
        self.listeners.push(listener);
    }

    /// Clamp `target` component-wise into the joint position range.
    ///
    /// `target` must have `dof` components.
    pub fn clamp_to_range(&self, target: &[f64]) -> Result<Vec<f64>, RobotError> {
        self.check_len("target", target.len())?;
        Ok(target
            .iter()
            .zip(self.joint_min.iter().zip(&self.joint_max))
            .map(|(q, (lo, hi))| q.clamp(*lo, *hi))
            .collect())
    }

    fn check_len(&self, what: &'static str, actual: usize) -> Result<(), RobotError> {
        if actual != self.dof {
            return Err(RobotError::DimensionMismatch {
                what,
                expected: self.dof,
                actual,
            });
        }
        Ok(())
    }
}

impl JointLimits for RobotModel {
    fn dof(&self) -> usize {
        self.dof
    }

    fn max_velocity(&self) -> &[f64] {
        &self.max_velocity
    }

    fn max_acceleration(&self) -> &[f64] {
        &self.max_acceleration
    }
}
