//! Fixed-step sample times.

use traj_common::consts::{FALLBACK_SAMPLE_INTERVAL, TIME_GRID_TOLERANCE};

/// Build sample timestamps `0, dt, 2dt, ...` covering `[0, duration]`.
///
/// The last timestamp is exactly `duration`: a final grid step within
/// `TIME_GRID_TOLERANCE` of it is replaced, otherwise `duration` is
/// appended. `duration == 0` yields the single timestamp `0`. An unusable
/// `dt` (non-finite or non-positive) falls back to `FALLBACK_SAMPLE_INTERVAL`.
pub fn build_time_samples(duration: f64, dt: f64) -> Vec<f64> {
    let dt = if dt.is_finite() && dt > 0.0 {
        dt
    } else {
        FALLBACK_SAMPLE_INTERVAL
    };
    let duration = duration.max(0.0);

    let n_max = (duration / dt).ceil() as usize + 2;
    let mut times = Vec::with_capacity(n_max + 1);
    for i in 0..n_max {
        times.push(i as f64 * dt);
        if (i + 1) as f64 * dt >= duration {
            break;
        }
    }

    if let Some(last) = times
        .last_mut()
        .filter(|last| (**last - duration).abs() <= TIME_GRID_TOLERANCE)
    {
        *last = duration;
    } else {
        times.push(duration);
    }
    times
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_duration_single_sample() {
        assert_eq!(build_time_samples(0.0, 0.01), vec![0.0]);
    }

    #[test]
    fn exact_multiple_ends_on_duration() {
        let t = build_time_samples(1.0, 0.25);
        assert_eq!(t, vec![0.0, 0.25, 0.5, 0.75, 1.0]);
    }

    #[test]
    fn non_multiple_appends_duration() {
        let t = build_time_samples(0.3, 0.25);
        assert_eq!(t, vec![0.0, 0.25, 0.3]);
    }

    #[test]
    fn last_step_within_tolerance_is_replaced() {
        let t = build_time_samples(0.500004, 0.25);
        assert_eq!(t, vec![0.0, 0.25, 0.500004]);
    }

    #[test]
    fn strictly_increasing_and_bounded() {
        let t = build_time_samples(2.0, 0.01);
        assert_eq!(t.len(), 201);
        assert_eq!(t[0], 0.0);
        assert_eq!(*t.last().unwrap(), 2.0);
        assert!(t.windows(2).all(|w| w[1] > w[0]));
    }

    #[test]
    fn bad_dt_falls_back() {
        for dt in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let t = build_time_samples(0.05, dt);
            assert_eq!(t.len(), 6, "dt {dt}");
            assert_eq!(*t.last().unwrap(), 0.05);
        }
    }
}
