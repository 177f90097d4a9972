//! End-to-end checks of the steering primitive through the public trait

use std::f64::consts::PI;

use itertools::Itertools;
use rand::rngs::StdRng;
use rand::SeedableRng;

use dubins_velocity::common::{DynamicalSystem, Pose2D, SampleRegion, State2D};
use dubins_velocity::path_planning::dubins_velocity::{
    DubinsVelocity, DubinsVelocityConfig, TangentConfiguration,
};
use dubins_velocity::SteeringError;

/// Cost-then-steer, the way a tree-growing planner drives a system
fn connect_via_cache<D: DynamicalSystem>(
    system: &D,
    start: &D::State,
    goal: &D::State,
) -> Option<(f64, f64)> {
    let evaluated = system.evaluate_extend_cost(start, goal, None).ok()?;
    let traj = system.extend_to(start, goal, Some(&evaluated.cache)).ok()?;
    Some((evaluated.cost, traj.total_variation))
}

fn multi_radius() -> DubinsVelocity {
    let config = DubinsVelocityConfig::default().with_turning_radii(vec![3.0, 6.0, 8.0]);
    DubinsVelocity::new(config).unwrap()
}

#[test]
fn test_reference_query() {
    let steering = DubinsVelocity::with_defaults();
    let start = State2D::origin();
    let goal = State2D::new(10.0, 2.0, PI / 4.0, 1.0);

    let traj = steering.extend_to(&start, &goal, None).unwrap();
    assert!(traj.total_variation >= 0.0);
    assert!(!traj.is_empty());

    let first = traj.first_state().unwrap();
    assert!(first.position().distance(&start.position()) <= traj.delta_distance + 1e-9);
    let last = traj.final_state().unwrap();
    assert!(last.position().distance(&goal.position()) < 1e-6);

    // Consecutive samples are never further apart than the spacing
    assert!(traj
        .states
        .iter()
        .tuple_windows()
        .all(|(a, b)| a.position().distance(&b.position()) <= traj.delta_distance + 1e-9));
}

#[test]
fn test_cost_matches_trajectory_over_random_queries() {
    let steering = multi_radius();
    let mut rng = StdRng::seed_from_u64(11);
    let region = SampleRegion::new(Pose2D::new(0.0, 0.0, 0.0), Pose2D::new(25.0, 25.0, PI));

    let mut checked = 0;
    for _ in 0..300 {
        let s = steering.sample_state(&mut rng, &region);
        let g = steering.sample_state(&mut rng, &region);
        if let Some((cost, total_variation)) = connect_via_cache(&steering, &s, &g) {
            assert_eq!(cost, total_variation);
            checked += 1;
        }
    }
    assert!(checked > 0);
}

#[test]
fn test_random_trajectories_are_well_formed() {
    let steering = multi_radius();
    let mut rng = StdRng::seed_from_u64(5);
    let region = SampleRegion::new(Pose2D::new(0.0, 0.0, 0.0), Pose2D::new(25.0, 25.0, PI));

    for _ in 0..300 {
        let s = steering.sample_state(&mut rng, &region);
        let g = steering.sample_state(&mut rng, &region);
        assert!(s.yaw > -PI && s.yaw <= PI);

        let evaluated = match steering.evaluate_extend_cost(&s, &g, None) {
            Ok(evaluated) => evaluated,
            Err(_) => {
                assert!(steering.extend_to(&s, &g, None).is_err());
                continue;
            }
        };
        let traj = steering.extend_to(&s, &g, Some(&evaluated.cache)).unwrap();
        assert!(traj.states.iter().all(|st| st.yaw > -PI && st.yaw <= PI));

        let last = traj.final_state().unwrap();
        assert!(last.position().distance(&g.position()) < 1e-6);

        // Arcs up to half a turn are charged exactly, so the speed lands on the goal
        let radius = steering.turning_radius(evaluated.cache.radius_index).unwrap();
        let path = steering.best_connection(&s, &g, radius).unwrap();
        if path.start_sweep <= PI && path.goal_sweep <= PI {
            assert!((last.v - g.v).abs() < 1e-6);
        }

        let accel = evaluated.cache.acceleration;
        for (a, b) in traj.states.iter().tuple_windows() {
            if accel > 0.0 {
                assert!(b.v >= a.v);
            } else if accel < 0.0 {
                assert!(b.v <= a.v);
            } else {
                assert_eq!(b.v, a.v);
            }
        }
    }
}

#[test]
fn test_unreachable_speed_fails_everywhere() {
    let steering = multi_radius();
    let start = State2D::origin();
    let goal = State2D::new(10.0, 2.0, PI / 4.0, 100.0);

    for &radius in steering.config().turning_radii.iter() {
        assert!(steering.best_connection(&start, &goal, radius).is_none());
    }
    assert!(matches!(
        steering.evaluate_extend_cost(&start, &goal, None),
        Err(SteeringError::NoFeasiblePath { .. })
    ));
    assert!(steering.extend_to(&start, &goal, None).is_err());
}

#[test]
fn test_tie_breaks_are_stable() {
    let goal = State2D::new(20.0, 0.0, 0.0, 0.0);
    let steering = DubinsVelocity::new(
        DubinsVelocityConfig::default().with_turning_radii(vec![5.0, 3.0]),
    )
    .unwrap();

    for _ in 0..5 {
        let best = steering.best_connection(&State2D::origin(), &goal, 3.0).unwrap();
        assert_eq!(best.configuration, TangentConfiguration::Lsl);
        let evaluated = steering
            .evaluate_extend_cost(&State2D::origin(), &goal, None)
            .unwrap();
        assert_eq!(evaluated.cache.radius_index, 0);
    }
}

#[test]
fn test_config_from_json_drives_steering() {
    let config = DubinsVelocityConfig::from_json_str(
        r#"{ "delta_distance": 0.25, "accel_max": 2.0, "turning_radii": [4.0] }"#,
    )
    .unwrap();
    let steering = DubinsVelocity::new(config).unwrap();
    let traj = steering
        .extend_to(&State2D::origin(), &State2D::new(20.0, 0.0, 0.0, 0.0), None)
        .unwrap();
    assert_eq!(traj.delta_distance, 0.25);
    assert_eq!(traj.len(), 80);
}
