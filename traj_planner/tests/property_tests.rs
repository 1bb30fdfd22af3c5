//! Property tests over random point-to-point requests.

use proptest::prelude::*;
use traj_common::consts::TIME_GRID_TOLERANCE;
use traj_planner::TrapezoidalPlanner;
use traj_planner::profile::AxisProfile;
use traj_planner::sync::governing_duration;

const PRECISION: f64 = 1e-6;

/// (current, target, max_velocity, max_acceleration) for 1..=6 axes.
fn request() -> impl Strategy<Value = (Vec<f64>, Vec<f64>, Vec<f64>, Vec<f64>)> {
    (1usize..=6).prop_flat_map(|dof| {
        (
            prop::collection::vec(-3.0..3.0f64, dof),
            prop::collection::vec(-3.0..3.0f64, dof),
            prop::collection::vec(0.1..4.0f64, dof),
            prop::collection::vec(0.1..8.0f64, dof),
        )
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn sequences_are_parallel_and_bounded((q0, q1, v, a) in request(), rate in 20.0..500.0f64) {
        let planner = TrapezoidalPlanner::new("prop", rate);
        let traj = planner.plan(&q0, &q1, &v, &a).unwrap();

        let n = traj.timestamps().len();
        prop_assert!(n >= 1);
        prop_assert_eq!(traj.positions().len(), n);
        prop_assert_eq!(traj.velocities().len(), n);
        prop_assert_eq!(traj.accelerations().len(), n);
        prop_assert_eq!(traj.timestamps()[0], 0.0);
        prop_assert!(traj.timestamps().windows(2).all(|w| w[1] >= w[0]));

        let candidates: Vec<AxisProfile> = (0..q0.len())
            .map(|i| AxisProfile::candidate(q0[i], q1[i], v[i], a[i]))
            .collect();
        let duration = governing_duration(&candidates);
        prop_assert!((traj.duration() - duration).abs() <= TIME_GRID_TOLERANCE);
    }

    #[test]
    fn starts_at_current_and_ends_at_rest_on_target((q0, q1, v, a) in request()) {
        let planner = TrapezoidalPlanner::new("prop", 100.0);
        let traj = planner.plan(&q0, &q1, &v, &a).unwrap();

        let first = &traj.positions()[0];
        let last = traj.positions().last().unwrap();
        let last_vel = traj.velocities().last().unwrap();
        for i in 0..q0.len() {
            prop_assert!((first[i] - q0[i]).abs() < PRECISION);
            prop_assert!((last[i] - q1[i]).abs() < PRECISION);
            prop_assert!(last_vel[i].abs() < PRECISION);
        }
    }

    #[test]
    fn limits_never_exceeded((q0, q1, v, a) in request()) {
        let planner = TrapezoidalPlanner::new("prop", 100.0);
        let traj = planner.plan(&q0, &q1, &v, &a).unwrap();

        for i in 0..q0.len() {
            prop_assert!(traj.peak_speed(i) <= v[i] + 1e-5);
            for s in traj.accelerations() {
                prop_assert!(s[i].abs() <= a[i] + 1e-5);
            }
        }
    }

    #[test]
    fn planning_is_deterministic((q0, q1, v, a) in request()) {
        let planner = TrapezoidalPlanner::new("prop", 100.0);
        let first = planner.plan(&q0, &q1, &v, &a).unwrap();
        let second = planner.plan(&q0, &q1, &v, &a).unwrap();
        prop_assert_eq!(first, second);
    }
}
