//! Common types used throughout dubins_velocity

use std::f64::consts::{PI, TAU};

use itertools::Itertools;
use nalgebra::{Vector2, Vector4};

/// Normalize an angle into (-pi, pi]
pub fn normalize_angle(angle: f64) -> f64 {
    if !angle.is_finite() {
        return angle;
    }
    let mut result = if angle.abs() > 4.0 * TAU { angle % TAU } else { angle };
    while result > PI {
        result -= TAU;
    }
    while result <= -PI {
        result += TAU;
    }
    result
}

/// Normalize an angle into [0, 2pi)
pub fn wrap_to_two_pi(angle: f64) -> f64 {
    if !angle.is_finite() {
        return angle;
    }
    let mut result = if angle.abs() > 4.0 * TAU { angle % TAU } else { angle };
    while result < 0.0 {
        result += TAU;
    }
    while result >= TAU {
        result -= TAU;
    }
    result
}

/// 2D point representation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point2D {
    pub x: f64,
    pub y: f64,
}

impl Point2D {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: &Point2D) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }

    pub fn to_vector(&self) -> Vector2<f64> {
        Vector2::new(self.x, self.y)
    }
}

impl From<Vector2<f64>> for Point2D {
    fn from(v: Vector2<f64>) -> Self {
        Self { x: v[0], y: v[1] }
    }
}

/// 2D pose (position + orientation)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose2D {
    pub x: f64,
    pub y: f64,
    pub yaw: f64,
}

impl Pose2D {
    pub fn new(x: f64, y: f64, yaw: f64) -> Self {
        Self { x, y, yaw }
    }

    pub fn position(&self) -> Point2D {
        Point2D::new(self.x, self.y)
    }

    /// Normalize yaw to (-pi, pi]
    pub fn normalize_yaw(&mut self) {
        self.yaw = normalize_angle(self.yaw);
    }
}

/// Vehicle state: planar position, heading and forward velocity
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct State2D {
    pub x: f64,
    pub y: f64,
    pub yaw: f64,
    pub v: f64,
}

impl State2D {
    pub fn new(x: f64, y: f64, yaw: f64, v: f64) -> Self {
        Self { x, y, yaw, v }
    }

    pub fn origin() -> Self {
        Self { x: 0.0, y: 0.0, yaw: 0.0, v: 0.0 }
    }

    pub fn pose(&self) -> Pose2D {
        Pose2D::new(self.x, self.y, self.yaw)
    }

    pub fn position(&self) -> Point2D {
        Point2D::new(self.x, self.y)
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.yaw.is_finite() && self.v.is_finite()
    }

    pub fn to_vector(&self) -> Vector4<f64> {
        Vector4::new(self.x, self.y, self.yaw, self.v)
    }
}

impl From<Vector4<f64>> for State2D {
    fn from(v: Vector4<f64>) -> Self {
        Self { x: v[0], y: v[1], yaw: v[2], v: v[3] }
    }
}

/// Steering control applied between two trajectory samples.
///
/// `signed_radius` is the turning radius times the rotation direction
/// (+1 counter-clockwise, -1 clockwise) while on an arc, and zero on a
/// straight segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SteeringControl {
    pub signed_radius: f64,
}

impl SteeringControl {
    pub fn new(signed_radius: f64) -> Self {
        Self { signed_radius }
    }

    pub fn straight() -> Self {
        Self { signed_radius: 0.0 }
    }

    pub fn is_straight(&self) -> bool {
        self.signed_radius == 0.0
    }

    /// Signed path curvature [1/m], zero on straight segments
    pub fn curvature(&self) -> f64 {
        if self.is_straight() {
            0.0
        } else {
            1.0 / self.signed_radius
        }
    }
}

/// Axis-aligned sampling box over (x, y, yaw)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampleRegion {
    pub center: Pose2D,
    pub half_extent: Pose2D,
}

impl SampleRegion {
    pub fn new(center: Pose2D, half_extent: Pose2D) -> Self {
        Self { center, half_extent }
    }
}

/// Time-ordered samples produced by a steering query
#[derive(Debug, Clone, PartialEq)]
pub struct Trajectory<S, C> {
    pub states: Vec<S>,
    pub controls: Vec<C>,
    /// Path cost of the connection the samples were drawn from
    pub total_variation: f64,
    /// Arc-length spacing between samples
    pub delta_distance: f64,
}

impl<S, C> Trajectory<S, C> {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            states: Vec::with_capacity(capacity),
            controls: Vec::with_capacity(capacity),
            total_variation: 0.0,
            delta_distance: 0.0,
        }
    }

    /// Drop all samples, keeping the allocation
    pub fn clear(&mut self) {
        self.states.clear();
        self.controls.clear();
        self.total_variation = 0.0;
        self.delta_distance = 0.0;
    }

    pub fn reserve(&mut self, additional: usize) {
        self.states.reserve(additional);
        self.controls.reserve(additional);
    }

    pub fn push(&mut self, state: S, control: C) {
        self.states.push(state);
        self.controls.push(control);
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn first_state(&self) -> Option<&S> {
        self.states.first()
    }

    pub fn final_state(&self) -> Option<&S> {
        self.states.last()
    }

    /// Iterate over (state, control) pairs; may be called repeatedly
    pub fn iter(&self) -> impl Iterator<Item = (&S, &C)> + '_ {
        self.states.iter().zip(self.controls.iter())
    }
}

impl<S, C> Default for Trajectory<S, C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> Trajectory<State2D, C> {
    /// Polyline length through the sampled positions
    pub fn path_length(&self) -> f64 {
        self.states
            .iter()
            .tuple_windows()
            .map(|(a, b)| a.position().distance(&b.position()))
            .sum()
    }

    pub fn velocities(&self) -> Vec<f64> {
        self.states.iter().map(|s| s.v).collect()
    }
}

/// Cost of a steering query together with the cache that produced it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExtendCost<K> {
    pub cost: f64,
    pub cache: K,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point2d_distance() {
        let p1 = Point2D::new(0.0, 0.0);
        let p2 = Point2D::new(3.0, 4.0);
        assert!((p1.distance(&p2) - 5.0).abs() < 1e-10);
    }

    #[test]
    fn test_normalize_angle_half_open() {
        assert_eq!(normalize_angle(PI), PI);
        assert_eq!(normalize_angle(-PI), PI);
        assert!((normalize_angle(3.0 * PI / 2.0) + PI / 2.0).abs() < 1e-12);
        assert!((normalize_angle(-5.0 * PI / 2.0) + PI / 2.0).abs() < 1e-12);
        let big = normalize_angle(1.0e6);
        assert!(big > -PI && big <= PI);
    }

    #[test]
    fn test_wrap_to_two_pi() {
        assert_eq!(wrap_to_two_pi(-TAU), 0.0);
        assert_eq!(wrap_to_two_pi(TAU), 0.0);
        assert!((wrap_to_two_pi(-PI / 2.0) - 3.0 * PI / 2.0).abs() < 1e-12);
        assert!((wrap_to_two_pi(5.0 * PI) - PI).abs() < 1e-12);
    }

    #[test]
    fn test_pose2d_normalize_yaw() {
        let mut pose = Pose2D::new(0.0, 0.0, 4.0);
        pose.normalize_yaw();
        assert!(pose.yaw > -PI && pose.yaw <= PI);
    }

    #[test]
    fn test_state_vector_conversion() {
        let state = State2D::new(1.0, 2.0, 0.5, 0.75);
        assert_eq!(State2D::from(state.to_vector()), state);
    }

    #[test]
    fn test_control_curvature() {
        assert_eq!(SteeringControl::straight().curvature(), 0.0);
        assert!((SteeringControl::new(-4.0).curvature() + 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_trajectory_clear_and_length() {
        let mut traj: Trajectory<State2D, SteeringControl> = Trajectory::new();
        traj.push(State2D::new(0.0, 0.0, 0.0, 0.0), SteeringControl::straight());
        traj.push(State2D::new(1.0, 0.0, 0.0, 0.0), SteeringControl::straight());
        traj.push(State2D::new(1.0, 1.0, 0.0, 0.0), SteeringControl::straight());
        assert!((traj.path_length() - 2.0).abs() < 1e-10);
        assert_eq!(traj.iter().count(), 3);
        assert_eq!(traj.iter().count(), 3);
        assert_eq!(traj.velocities(), vec![0.0, 0.0, 0.0]);

        traj.clear();
        assert!(traj.is_empty());
        assert_eq!(traj.path_length(), 0.0);
    }
}
