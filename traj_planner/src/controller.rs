//! Robot controller: plans joint moves and plays them back into the model.
//!
//! The controller owns a [`RobotModel`] and a planner. [`RobotController::move_to`]
//! clamps the requested target into the joint ranges, plans from the current
//! state and queues the result; each [`RobotController::tick`] then applies
//! the next sample. Callers drive `tick` at [`RobotController::interval`].

use crate::error::{ControllerError, PlanError};
use crate::planner::TrajectoryPlanner;
use crate::trajectory::Trajectory;
use std::time::Duration;
use tracing::{debug, info};
use traj_common::robot::{JointLimits, RobotModel};

/// Queued trajectory and the index of the next sample to apply.
#[derive(Debug)]
struct Playback {
    trajectory: Trajectory,
    next: usize,
}

/// Drives a robot model through planned joint moves.
#[derive(Debug)]
pub struct RobotController<P: TrajectoryPlanner> {
    model: RobotModel,
    planner: P,
    playback: Option<Playback>,
}

impl<P: TrajectoryPlanner> RobotController<P> {
    /// Create a controller for `model` using `planner`.
    pub fn new(model: RobotModel, planner: P) -> Self {
        Self {
            model,
            planner,
            playback: None,
        }
    }

    /// Robot model being driven.
    pub fn model(&self) -> &RobotModel {
        &self.model
    }

    /// Mutable access to the robot model (limits, listeners).
    pub fn model_mut(&mut self) -> &mut RobotModel {
        &mut self.model
    }

    /// Planner in use.
    pub fn planner(&self) -> &P {
        &self.planner
    }

    /// True while a move is being played back.
    pub fn is_moving(&self) -> bool {
        self.playback.is_some()
    }

    /// Time between two ticks.
    pub fn interval(&self) -> Duration {
        Duration::from_secs_f64(self.planner.sample_interval())
    }

    /// Plan a move to `target` and queue it, replacing any move in progress.
    ///
    /// Returns the number of samples queued; 0 means the model was set to
    /// the (clamped) target directly.
    pub fn move_to(&mut self, target: &[f64]) -> Result<usize, ControllerError> {
        self.playback = None;

        let dof = self.model.dof();
        if target.len() != dof {
            return Err(PlanError::DimensionMismatch {
                expected: dof,
                current: self.model.state().len(),
                target: target.len(),
            }
            .into());
        }

        let clamped = self.model.clamp_to_range(target)?;
        let current = self.model.state().to_vec();
        let trajectory = self.planner.plan_move_j(&self.model, &current, &clamped)?;

        let steps = trajectory.len();
        if steps == 0 {
            self.model.set_state(&clamped)?;
            return Ok(0);
        }

        info!(
            planner = self.planner.id(),
            steps,
            duration = trajectory.duration(),
            "move queued"
        );
        self.playback = Some(Playback {
            trajectory,
            next: 0,
        });
        Ok(steps)
    }

    /// Apply the next queued sample to the model.
    ///
    /// Returns `true` while more samples remain.
    pub fn tick(&mut self) -> Result<bool, ControllerError> {
        let Some(playback) = self.playback.as_mut() else {
            return Ok(false);
        };

        if let Some(q) = playback.trajectory.positions().get(playback.next) {
            self.model.set_state(q)?;
            playback.next += 1;
        }

        if playback.next >= playback.trajectory.len() {
            debug!("move complete");
            self.playback = None;
            return Ok(false);
        }
        Ok(true)
    }

    /// Play back the whole queued move without waiting between samples.
    pub fn run_to_completion(&mut self) -> Result<(), ControllerError> {
        while self.tick()? {}
        Ok(())
    }

    /// Abort the move in progress; the model keeps its current state.
    pub fn stop(&mut self) {
        if self.playback.take().is_some() {
            debug!("move stopped");
        }
    }
}
