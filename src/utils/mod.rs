//! Utility modules for dubins_velocity

pub mod visualization;

pub use visualization::{velocity_profile, Visualizer, PathStyle, colors};
