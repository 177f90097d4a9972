//! dubins_velocity - Dubins steering with a velocity profile
//!
//! This crate provides the local steering primitive a sampling-based
//! planner uses to connect two vehicle states under a bounded turning
//! radius and a bounded longitudinal acceleration.

// Core modules
pub mod common;
pub mod utils;

// Algorithm modules
pub mod path_planning;

// Re-export common types for convenience
pub use common::{Point2D, Pose2D, State2D, SteeringControl, SampleRegion, Trajectory, ExtendCost};
pub use common::DynamicalSystem;
pub use common::{SteeringError, SteeringResult};
pub use path_planning::dubins_velocity::{DubinsVelocity, DubinsVelocityConfig, QueryCache};
