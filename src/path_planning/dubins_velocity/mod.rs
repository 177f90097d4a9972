//! Dubins-Velocity Steering Module
//!
//! Local-connection ("extend") operator for a car-like vehicle with a
//! bounded turning radius and a bounded longitudinal acceleration. Paths
//! are arc / tangent / arc Dubins connections; velocity changes linearly
//! with distance travelled at a constant acceleration chosen per query.
//!
//! # Components
//!
//! - `config`: sample spacing, acceleration bound, turning radii, velocity palette
//! - `tangent`: geometry, cost and sampling of one tangent configuration
//! - `steering`: configuration and radius selection, the query cache, and
//!   the `DynamicalSystem` implementation
//!
//! # Example
//!
//! ```no_run
//! use dubins_velocity::common::{DynamicalSystem, State2D};
//! use dubins_velocity::path_planning::dubins_velocity::DubinsVelocity;
//!
//! let steering = DubinsVelocity::with_defaults();
//! let start = State2D::new(0.0, 0.0, 0.0, 0.0);
//! let goal = State2D::new(10.0, 2.0, std::f64::consts::FRAC_PI_4, 1.0);
//!
//! // Cheap cost query first, then the trajectory for the same pair
//! let cost = steering.evaluate_extend_cost(&start, &goal, None).unwrap();
//! let traj = steering.extend_to(&start, &goal, Some(&cost.cache)).unwrap();
//! assert_eq!(traj.total_variation, cost.cost);
//! ```

pub mod config;
pub mod tangent;
pub mod steering;

// Re-exports
pub use config::DubinsVelocityConfig;
pub use tangent::{connect, TangentConfiguration, TangentPath, TurningCircle};
pub use steering::{DubinsTrajectory, DubinsVelocity, QueryCache};
