//! Multi-axis time synchronization.
//!
//! The slowest axis governs the move duration `T`. Every other axis is
//! re-solved so it also spans exactly `T`:
//!
//! 1. Stationary axes hold their position for the whole of `T`.
//! 2. Symmetric triangle over `T` if it stays within both limits.
//! 3. Trapezoid cruising exactly at the velocity limit, with the
//!    acceleration solved to fit `T`, if that acceleration is within limit.
//! 4. Otherwise the axis's own candidate profile is uniformly time-scaled
//!    by `T / own_total`.

use crate::profile::{AxisProfile, floor_limit};
use traj_common::consts::LIMIT_EPSILON;

/// How an axis was fitted to the synchronized duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncStrategy {
    /// Axis does not move and holds position.
    Hold,
    /// Symmetric triangular profile spanning the whole duration.
    Triangular,
    /// Trapezoid at the velocity limit with re-solved acceleration.
    Trapezoidal,
    /// Candidate profile uniformly stretched in time.
    Rescaled,
}

/// Synchronized duration: the longest candidate total time.
///
/// Returns 0 for an empty slice or when no axis moves.
pub fn governing_duration(candidates: &[AxisProfile]) -> f64 {
    candidates.iter().map(|p| p.total).fold(0.0, f64::max)
}

/// Re-solve `candidate` so that it spans exactly `duration` seconds.
///
/// `max_velocity` / `max_acceleration` are the axis limits (floored here).
pub fn synchronize(
    candidate: &AxisProfile,
    duration: f64,
    max_velocity: f64,
    max_acceleration: f64,
) -> (AxisProfile, SyncStrategy) {
    if candidate.is_stationary() {
        return (AxisProfile::stationary(duration), SyncStrategy::Hold);
    }

    let v_lim = floor_limit(max_velocity);
    let a_lim = floor_limit(max_acceleration);
    let d = candidate.distance;
    let t = duration;

    let v_req = 2.0 * d / t;
    let a_req = 4.0 * d / (t * t);
    if v_req <= v_lim + LIMIT_EPSILON && a_req <= a_lim + LIMIT_EPSILON {
        let half = 0.5 * t;
        let profile = AxisProfile {
            t_acc: half,
            t_cruise: 0.0,
            t_dec: half,
            v_peak: v_req,
            accel: a_req,
            total: t,
            ..*candidate
        };
        return (profile, SyncStrategy::Triangular);
    }

    let slack = v_lim * t - d;
    if slack > LIMIT_EPSILON {
        let a_calc = v_lim * v_lim / slack;
        if a_calc > 0.0 && a_calc <= a_lim + LIMIT_EPSILON {
            let t_ramp = v_lim / a_calc;
            let profile = AxisProfile {
                t_acc: t_ramp,
                t_cruise: (t - 2.0 * t_ramp).max(0.0),
                t_dec: t_ramp,
                v_peak: v_lim,
                accel: a_calc,
                total: t,
                ..*candidate
            };
            return (profile, SyncStrategy::Trapezoidal);
        }
    }

    (rescale(candidate, duration), SyncStrategy::Rescaled)
}

/// Uniformly stretch `candidate` in time so that it lasts `duration`.
pub fn rescale(candidate: &AxisProfile, duration: f64) -> AxisProfile {
    let k = if candidate.total <= LIMIT_EPSILON {
        1.0
    } else {
        duration / candidate.total
    };
    let t_acc = candidate.t_acc * k;
    let v_peak = candidate.v_peak / k;
    AxisProfile {
        t_acc,
        t_cruise: candidate.t_cruise * k,
        t_dec: candidate.t_dec * k,
        v_peak,
        accel: if t_acc <= LIMIT_EPSILON { 0.0 } else { v_peak / t_acc },
        total: candidate.total * k,
        ..*candidate
    }
}
