//! Trajectory planner trait and the synchronized trapezoidal planner.
//!
//! # Algorithm
//!
//! ```text
//!   current, target, limits
//!            │
//!            ▼
//!   per-axis candidate profiles      (profile::AxisProfile::candidate)
//!            │
//!            ▼
//!   T = max candidate duration       (sync::governing_duration)
//!            │
//!            ▼
//!   re-solve every axis to span T    (sync::synchronize)
//!            │
//!            ▼
//!   sample at 0, dt, 2dt, ..., T     (time_grid + AxisProfile::evaluate)
//! ```

use crate::error::PlanError;
use crate::profile::AxisProfile;
use crate::sync::{governing_duration, synchronize};
use crate::time_grid::build_time_samples;
use crate::trajectory::Trajectory;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, trace, warn};
use traj_common::consts::FALLBACK_SAMPLE_INTERVAL;
use traj_common::planner::PlannerConfig;
use traj_common::robot::JointLimits;

/// Interface shared by trajectory planners.
///
/// A planner owns an identifier and a sampling rate; both are instance
/// properties, not part of a motion request.
pub trait TrajectoryPlanner: Send + Sync {
    /// Planner identifier.
    fn id(&self) -> &str;

    /// Sampling rate in samples per second.
    fn rate(&self) -> f64;

    /// Plan a synchronized point-to-point joint move from `current` to
    /// `target` within the limits of `robot`.
    ///
    /// # Errors
    ///
    /// `PlanError::DimensionMismatch` if `current` or `target` does not
    /// have `robot.dof()` components, `PlanError::LimitsMismatch` if the
    /// robot's limit vectors do not.
    fn plan_move_j(
        &self,
        robot: &dyn JointLimits,
        current: &[f64],
        target: &[f64],
    ) -> Result<Trajectory, PlanError>;

    /// Seconds between consecutive samples.
    ///
    /// Falls back to `FALLBACK_SAMPLE_INTERVAL` when the rate is not a
    /// finite positive number.
    fn sample_interval(&self) -> f64 {
        sample_interval_for(self.id(), self.rate())
    }
}

fn sample_interval_for(id: &str, rate: f64) -> f64 {
    let dt = 1.0 / rate;
    if rate > 0.0 && dt.is_finite() && dt > 0.0 {
        dt
    } else {
        warn!(
            planner = id,
            rate, "unusable sample rate, falling back to {FALLBACK_SAMPLE_INTERVAL} s"
        );
        FALLBACK_SAMPLE_INTERVAL
    }
}

/// Callback invoked with `(planner_id, new_rate)` after a rate change.
pub type RateListener = Box<dyn Fn(&str, f64) + Send + Sync>;

/// Synchronized trapezoidal point-to-point planner.
///
/// The rate is stored atomically: one writer may call [`set_rate`] while
/// other threads plan. Each planning call reads the rate once and uses that
/// snapshot for the whole computation.
///
/// [`set_rate`]: TrapezoidalPlanner::set_rate
pub struct TrapezoidalPlanner {
    id: String,
    rate_bits: AtomicU64,
    listeners: Vec<RateListener>,
}

impl std::fmt::Debug for TrapezoidalPlanner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TrapezoidalPlanner")
            .field("id", &self.id)
            .field("rate", &self.rate())
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl TrapezoidalPlanner {
    /// Create a planner with the given id and sampling rate.
    pub fn new(id: impl Into<String>, rate: f64) -> Self {
        Self {
            id: id.into(),
            rate_bits: AtomicU64::new(rate.to_bits()),
            listeners: Vec::new(),
        }
    }

    /// Create a planner from its configuration.
    pub fn from_config(config: &PlannerConfig) -> Self {
        debug!("Created trajectory planner {}", config.id);
        Self::new(config.id.clone(), config.rate)
    }

    /// Change the sampling rate. Affects only subsequent planning calls.
    pub fn set_rate(&self, rate: f64) {
        let previous = f64::from_bits(self.rate_bits.swap(rate.to_bits(), Ordering::AcqRel));
        debug!(planner = %self.id, previous, rate, "sample rate changed");
        for listener in &self.listeners {
            listener(&self.id, rate);
        }
    }

    /// Register a callback notified after every [`set_rate`](Self::set_rate).
    pub fn on_rate_change(&mut self, listener: RateListener) {
        self.listeners.push(listener);
    }

    /// Plan with explicit per-axis limits instead of a robot model.
    ///
    /// The DOF is the length of `max_velocity`.
    pub fn plan(
        &self,
        current: &[f64],
        target: &[f64],
        max_velocity: &[f64],
        max_acceleration: &[f64],
    ) -> Result<Trajectory, PlanError> {
        let dof = max_velocity.len();
        if max_acceleration.len() != dof {
            return Err(PlanError::LimitsMismatch {
                expected: dof,
                velocity: max_velocity.len(),
                acceleration: max_acceleration.len(),
            });
        }
        if current.len() != dof || target.len() != dof {
            return Err(PlanError::DimensionMismatch {
                expected: dof,
                current: current.len(),
                target: target.len(),
            });
        }

        // Single snapshot of the rate for the whole call.
        let dt = sample_interval_for(&self.id, self.rate());
        Ok(plan_point_to_point(
            current,
            target,
            max_velocity,
            max_acceleration,
            dt,
        ))
    }
}

impl TrajectoryPlanner for TrapezoidalPlanner {
    fn id(&self) -> &str {
        &self.id
    }

    fn rate(&self) -> f64 {
        f64::from_bits(self.rate_bits.load(Ordering::Acquire))
    }

    fn plan_move_j(
        &self,
        robot: &dyn JointLimits,
        current: &[f64],
        target: &[f64],
    ) -> Result<Trajectory, PlanError> {
        let dof = robot.dof();
        if current.len() != dof || target.len() != dof {
            return Err(PlanError::DimensionMismatch {
                expected: dof,
                current: current.len(),
                target: target.len(),
            });
        }
        let (max_velocity, max_acceleration) = (robot.max_velocity(), robot.max_acceleration());
        if max_velocity.len() != dof || max_acceleration.len() != dof {
            return Err(PlanError::LimitsMismatch {
                expected: dof,
                velocity: max_velocity.len(),
                acceleration: max_acceleration.len(),
            });
        }
        self.plan(current, target, max_velocity, max_acceleration)
    }
}

/// Plan a synchronized move sampled every `dt` seconds.
///
/// All slices must have the same length.
fn plan_point_to_point(
    current: &[f64],
    target: &[f64],
    max_velocity: &[f64],
    max_acceleration: &[f64],
    dt: f64,
) -> Trajectory {
    let candidates: Vec<AxisProfile> = (0..current.len())
        .map(|i| AxisProfile::candidate(current[i], target[i], max_velocity[i], max_acceleration[i]))
        .collect();

    let duration = governing_duration(&candidates);

    let profiles: Vec<AxisProfile> = candidates
        .iter()
        .enumerate()
        .map(|(i, c)| {
            let (p, strategy) = synchronize(c, duration, max_velocity[i], max_acceleration[i]);
            trace!(
                axis = i,
                ?strategy,
                shape = ?p.shape(),
                t_acc = p.t_acc,
                t_cruise = p.t_cruise,
                v_peak = p.v_peak,
                "axis synchronized"
            );
            p
        })
        .collect();

    let times = build_time_samples(duration, dt);
    let mut trajectory = Trajectory::with_capacity(times.len());
    for &t in &times {
        let mut q = Vec::with_capacity(profiles.len());
        let mut v = Vec::with_capacity(profiles.len());
        let mut a = Vec::with_capacity(profiles.len());
        for (i, p) in profiles.iter().enumerate() {
            let s = p.evaluate(current[i], target[i], t);
            q.push(s.position);
            v.push(s.velocity);
            a.push(s.acceleration);
        }
        trajectory.push(t, q, v, a);
    }

    debug!(
        dof = current.len(),
        duration,
        samples = trajectory.len(),
        "planned point-to-point move"
    );
    trajectory
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::AtomicUsize;

    #[test]
    fn rate_round_trip() {
        let p = TrapezoidalPlanner::new("p", 100.0);
        assert_eq!(p.rate(), 100.0);
        p.set_rate(250.0);
        assert_eq!(p.rate(), 250.0);
        assert!((p.sample_interval() - 0.004).abs() < 1e-15);
    }

    #[test]
    fn bad_rate_uses_fallback_interval() {
        for rate in [0.0, -5.0, f64::NAN, f64::INFINITY] {
            let p = TrapezoidalPlanner::new("p", rate);
            assert_eq!(p.sample_interval(), FALLBACK_SAMPLE_INTERVAL);
        }
    }

    #[test]
    fn listeners_notified_on_rate_change() {
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&calls);
        let mut p = TrapezoidalPlanner::new("listened", 100.0);
        p.on_rate_change(Box::new(move |id, rate| {
            assert_eq!(id, "listened");
            assert_eq!(rate, 50.0);
            seen.fetch_add(1, Ordering::SeqCst);
        }));
        p.set_rate(50.0);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn from_config_copies_settings() {
        let cfg = PlannerConfig {
            id: "cfg".to_string(),
            rate: 20.0,
        };
        let p = TrapezoidalPlanner::from_config(&cfg);
        assert_eq!(p.id(), "cfg");
        assert_eq!(p.rate(), 20.0);
    }

    #[test]
    fn limits_length_mismatch() {
        let p = TrapezoidalPlanner::new("p", 100.0);
        let err = p.plan(&[0.0, 0.0], &[1.0, 1.0], &[1.0, 1.0], &[1.0]).unwrap_err();
        assert_eq!(
            err,
            PlanError::LimitsMismatch {
                expected: 2,
                velocity: 2,
                acceleration: 1
            }
        );
    }

    #[test]
    fn state_length_mismatch() {
        let p = TrapezoidalPlanner::new("p", 100.0);
        let err = p.plan(&[0.0], &[1.0, 1.0], &[1.0, 1.0], &[1.0, 1.0]).unwrap_err();
        assert_eq!(
            err,
            PlanError::DimensionMismatch {
                expected: 2,
                current: 1,
                target: 2
            }
        );
    }

    #[test]
    fn rate_change_affects_sample_count() {
        let p = TrapezoidalPlanner::new("p", 100.0);
        let a = p.plan(&[0.0], &[1.0], &[2.0], &[1.0]).unwrap();
        p.set_rate(10.0);
        let b = p.plan(&[0.0], &[1.0], &[2.0], &[1.0]).unwrap();
        assert_eq!(a.len(), 201);
        assert_eq!(b.len(), 21);
        assert_eq!(a.duration(), b.duration());
    }

    #[test]
    fn no_motion_yields_single_sample() {
        let p = TrapezoidalPlanner::new("p", 100.0);
        let t = p.plan(&[0.3, -0.2], &[0.3, -0.2], &[1.0, 1.0], &[1.0, 1.0]).unwrap();
        assert_eq!(t.len(), 1);
        assert_eq!(t.timestamps(), &[0.0]);
        assert_eq!(t.positions()[0], vec![0.3, -0.2]);
    }

    #[test]
    fn zero_dof_request() {
        let p = TrapezoidalPlanner::new("p", 100.0);
        let t = p.plan(&[], &[], &[], &[]).unwrap();
        assert_eq!(t.len(), 1);
        assert_eq!(t.dof(), 0);
    }
}
