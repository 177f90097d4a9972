// Path Planning algorithms module

pub mod dubins_velocity;

pub use dubins_velocity::*;
