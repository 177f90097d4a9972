// Dubins steering with a bounded-acceleration velocity profile.
//
// Connects the origin at rest to (10, 2, pi/4) at 1 m/s, prints the
// samples, and plots the path and the velocity profile. An optional
// JSON file with steering parameters may be passed as the first argument.
use std::f64::consts::{FRAC_PI_4, PI};

use log::info;
use plotlib::page::Page;
use plotlib::repr::Plot;
use plotlib::style::LineStyle;
use plotlib::view::ContinuousView;
use rand::rngs::StdRng;
use rand::SeedableRng;

use dubins_velocity::common::{DynamicalSystem, Pose2D, SampleRegion, State2D};
use dubins_velocity::path_planning::dubins_velocity::{DubinsVelocity, DubinsVelocityConfig};
use dubins_velocity::utils::{colors, velocity_profile, PathStyle, Visualizer};
use dubins_velocity::{SteeringError, SteeringResult};

fn load_config() -> SteeringResult<DubinsVelocityConfig> {
    match std::env::args().nth(1) {
        Some(path) => {
            info!("loading steering parameters from {}", path);
            DubinsVelocityConfig::from_json_str(&std::fs::read_to_string(path)?)
        }
        None => Ok(DubinsVelocityConfig::default()),
    }
}

fn main() -> SteeringResult<()> {
    env_logger::init();

    let steering = DubinsVelocity::new(load_config()?)?;
    let start = State2D::origin();
    let goal = State2D::new(10.0, 2.0, FRAC_PI_4, 1.0);
    println!("goal: {:?}", goal);

    let cost = steering.evaluate_extend_cost(&start, &goal, None)?;
    let traj = steering.extend_to(&start, &goal, Some(&cost.cache))?;
    println!("cost: {}", traj.total_variation);
    println!(
        "radius: {} m, acceleration: {:.4} m/s^2, samples: {}",
        steering.turning_radius(cost.cache.radius_index)?,
        cost.cache.acceleration,
        traj.len()
    );
    let speeds = traj.velocities();
    println!(
        "speed: {:.3} -> {:.3} m/s over {:.3} m",
        speeds.first().copied().unwrap_or(start.v),
        speeds.last().copied().unwrap_or(start.v),
        traj.path_length()
    );
    for (state, control) in traj.iter() {
        println!(
            "{:8.4} {:8.4} {:8.4} {:8.4} | {:6.2}",
            state.x, state.y, state.yaw, state.v, control.signed_radius
        );
    }

    // A few random queries, as a tree-growing planner would issue them
    let mut rng = StdRng::seed_from_u64(0);
    let region = SampleRegion::new(Pose2D::new(0.0, 0.0, 0.0), Pose2D::new(10.0, 10.0, PI));
    for _ in 0..5 {
        let sample = steering.sample_state(&mut rng, &region);
        match steering.evaluate_extend_cost(&start, &sample, None) {
            Ok(c) => println!("{:?}: cost {:.3}", sample, c.cost),
            Err(e) => println!("{:?}: {}", sample, e),
        }
    }

    std::fs::create_dir_all("./img")?;

    let display: Vec<(f64, f64, f64)> = traj
        .states
        .iter()
        .map(|s| steering.project_for_display(s))
        .collect();

    let mut vis = Visualizer::new();
    vis.set_title("Dubins-Velocity Steering")
        .set_labels("x [m]", "y [m]")
        .plot_pose(&start.pose(), "Start", colors::START)
        .plot_pose(&goal.pose(), "Goal", colors::GOAL)
        .plot_display_path(&display, &PathStyle::default());
    vis.save_svg("./img/dubins_velocity.svg")?;
    vis.save_png("./img/dubins_velocity.png", 800, 600)?;

    let profile: Plot = Plot::new(velocity_profile(&display)).line_style(
        LineStyle::new()
            .colour(colors::VELOCITY)
            .width(2.),
    );
    let v = ContinuousView::new()
        .add(profile)
        .x_label("s [m]")
        .y_label("v [m/s]");
    Page::single(&v)
        .save("./img/dubins_velocity_speed.svg")
        .map_err(|e| SteeringError::VisualizationError(format!("{:?}", e)))?;

    println!("Plots saved to ./img/");
    Ok(())
}
