//! Per-axis trapezoidal/triangular velocity profile.
//!
//! An [`AxisProfile`] describes one joint's motion as three phases
//! (accelerate, cruise, decelerate) plus the direction of travel. It is
//! computed independently per axis by [`AxisProfile::candidate`], re-fitted
//! to a shared duration by [`crate::sync`], and evaluated at arbitrary times
//! by [`AxisProfile::evaluate`].

use traj_common::consts::LIMIT_EPSILON;

/// Floor a velocity/acceleration limit to `LIMIT_EPSILON`.
///
/// Zero, negative and NaN limits all become `LIMIT_EPSILON`; `+inf` is
/// capped at `f64::MAX` so the profile closed forms stay finite.
#[inline]
pub fn floor_limit(limit: f64) -> f64 {
    limit.max(LIMIT_EPSILON).min(f64::MAX)
}

/// Geometric shape of a velocity profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileShape {
    /// Axis does not move.
    Stationary,
    /// Accelerate then decelerate, never reaching a cruise phase.
    Triangular,
    /// Accelerate, cruise, decelerate.
    Trapezoidal,
}

/// Phase timings of a single axis.
///
/// All durations are in seconds, velocities/accelerations are magnitudes;
/// `sign` carries the direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisProfile {
    /// Direction of travel: -1, 0 (stationary) or +1.
    pub sign: f64,
    /// Absolute distance to travel.
    pub distance: f64,
    /// Acceleration phase duration.
    pub t_acc: f64,
    /// Cruise phase duration.
    pub t_cruise: f64,
    /// Deceleration phase duration.
    pub t_dec: f64,
    /// Peak (cruise) speed.
    pub v_peak: f64,
    /// Acceleration magnitude used in both ramps.
    pub accel: f64,
    /// Total motion time.
    pub total: f64,
}

/// Position, velocity and acceleration of one axis at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AxisSample {
    /// Joint position.
    pub position: f64,
    /// Joint velocity.
    pub velocity: f64,
    /// Joint acceleration.
    pub acceleration: f64,
}

impl AxisProfile {
    /// Profile of an axis that holds its position for `duration` seconds.
    pub fn stationary(duration: f64) -> Self {
        Self {
            sign: 0.0,
            distance: 0.0,
            t_acc: 0.0,
            t_cruise: duration,
            t_dec: 0.0,
            v_peak: 0.0,
            accel: 0.0,
            total: duration,
        }
    }

    /// Fastest unsynchronized profile moving from `start` to `target`.
    ///
    /// Limits are floored with [`floor_limit`]. A distance that cannot reach
    /// `max_velocity` (strictly less than twice the ramp distance) yields a
    /// triangular profile, otherwise the profile is trapezoidal.
    pub fn candidate(start: f64, target: f64, max_velocity: f64, max_acceleration: f64) -> Self {
        let v_lim = floor_limit(max_velocity);
        let a_lim = floor_limit(max_acceleration);
        let dq = target - start;
        let distance = dq.abs();

        if distance <= LIMIT_EPSILON {
            return Self::stationary(0.0);
        }
        let sign = dq.signum();

        let t_to_vmax = v_lim / a_lim;
        let d_accel = 0.5 * a_lim * t_to_vmax * t_to_vmax;

        if distance < 2.0 * d_accel {
            let t_ramp = (distance / a_lim).sqrt();
            Self {
                sign,
                distance,
                t_acc: t_ramp,
                t_cruise: 0.0,
                t_dec: t_ramp,
                v_peak: a_lim * t_ramp,
                accel: a_lim,
                total: 2.0 * t_ramp,
            }
        } else {
            let t_cruise = (distance - 2.0 * d_accel) / v_lim;
            Self {
                sign,
                distance,
                t_acc: t_to_vmax,
                t_cruise,
                t_dec: t_to_vmax,
                v_peak: v_lim,
                accel: a_lim,
                total: 2.0 * t_to_vmax + t_cruise,
            }
        }
    }

    /// True when the axis does not move.
    #[inline]
    pub fn is_stationary(&self) -> bool {
        self.sign == 0.0
    }

    /// Shape of the profile.
    pub fn shape(&self) -> ProfileShape {
        if self.is_stationary() {
            ProfileShape::Stationary
        } else if self.t_cruise > LIMIT_EPSILON {
            ProfileShape::Trapezoidal
        } else {
            ProfileShape::Triangular
        }
    }

    /// Evaluate the profile `t` seconds after motion start.
    ///
    /// Once `t` reaches the end of the deceleration phase the sample is
    /// exactly `target` at rest, independent of accumulated rounding.
    pub fn evaluate(&self, start: f64, target: f64, t: f64) -> AxisSample {
        if self.is_stationary() {
            return AxisSample {
                position: start,
                velocity: 0.0,
                acceleration: 0.0,
            };
        }

        let sgn = self.sign;
        let a = self.accel;
        let vp = self.v_peak;
        let t1 = self.t_acc;
        let tc = self.t_cruise;
        let t2 = self.t_dec;

        if t <= t1 {
            return AxisSample {
                position: start + sgn * (0.5 * a * t * t),
                velocity: sgn * a * t,
                acceleration: sgn * a,
            };
        }

        if t <= t1 + tc {
            let tt = t - t1;
            return AxisSample {
                position: start + sgn * (0.5 * a * t1 * t1 + vp * tt),
                velocity: sgn * vp,
                acceleration: 0.0,
            };
        }

        let end = (t1 + tc + t2).min(self.total);
        if t >= end {
            return AxisSample {
                position: target,
                velocity: 0.0,
                acceleration: 0.0,
            };
        }

        let tt = (t - (t1 + tc)).min(t2);
        let cruise_end = start + sgn * (0.5 * a * t1 * t1 + vp * tc);
        AxisSample {
            position: cruise_end + sgn * (vp * tt - 0.5 * a * tt * tt),
            velocity: sgn * (vp - a * tt),
            acceleration: -sgn * a,
        }
    }
}
