//! Common types, traits, and error definitions for dubins_velocity
//!
//! This module provides the value types exchanged with a host planner
//! and the capability trait a steering primitive implements.

pub mod types;
pub mod traits;
pub mod error;

pub use types::*;
pub use traits::*;
pub use error::*;
