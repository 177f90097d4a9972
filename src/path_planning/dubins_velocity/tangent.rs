//! Circle-tangent connections between the start and goal turning circles
//!
//! Each [`TangentConfiguration`] fixes which side the vehicle turns on at
//! the start and at the goal. [`connect`] computes the arc / tangent / arc
//! geometry for one configuration, scores it, and filters it for velocity
//! feasibility. [`TangentPath::sample_into`] discretizes an accepted
//! connection at a fixed arc-length spacing.

use std::f64::consts::{FRAC_PI_2, PI};

use nalgebra::Vector2;

use crate::common::{normalize_angle, wrap_to_two_pi, Point2D, State2D, SteeringControl, Trajectory};

/// The four arc-straight-arc families
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TangentConfiguration {
    /// Left turn, cross tangent, right turn
    Lsr,
    /// Right turn, cross tangent, left turn
    Rsl,
    /// Left turn, outer tangent, left turn
    Lsl,
    /// Right turn, outer tangent, right turn
    Rsr,
}

impl TangentConfiguration {
    /// All configurations in evaluation (and tie-break) order
    pub const ALL: [TangentConfiguration; 4] = [
        TangentConfiguration::Lsr,
        TangentConfiguration::Rsl,
        TangentConfiguration::Lsl,
        TangentConfiguration::Rsr,
    ];

    /// 1-based configuration number
    pub fn index(self) -> u8 {
        match self {
            TangentConfiguration::Lsr => 1,
            TangentConfiguration::Rsl => 2,
            TangentConfiguration::Lsl => 3,
            TangentConfiguration::Rsr => 4,
        }
    }

    pub fn from_index(index: u8) -> Option<Self> {
        match index {
            1 => Some(TangentConfiguration::Lsr),
            2 => Some(TangentConfiguration::Rsl),
            3 => Some(TangentConfiguration::Lsl),
            4 => Some(TangentConfiguration::Rsr),
            _ => None,
        }
    }

    /// +1 for a counter-clockwise start arc, -1 for clockwise
    pub fn start_direction(self) -> f64 {
        match self {
            TangentConfiguration::Rsl | TangentConfiguration::Rsr => -1.0,
            TangentConfiguration::Lsr | TangentConfiguration::Lsl => 1.0,
        }
    }

    /// +1 for a counter-clockwise goal arc, -1 for clockwise
    pub fn goal_direction(self) -> f64 {
        match self {
            TangentConfiguration::Lsr | TangentConfiguration::Rsr => -1.0,
            TangentConfiguration::Rsl | TangentConfiguration::Lsl => 1.0,
        }
    }
}

/// Turning circle through a state, tangent to its heading
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TurningCircle {
    pub center: Vector2<f64>,
    pub radius: f64,
    /// Polar angle of the state about `center`
    pub phase: f64,
    /// +1 counter-clockwise, -1 clockwise
    pub direction: f64,
}

impl TurningCircle {
    pub fn new(state: &State2D, radius: f64, direction: f64) -> Self {
        let sin_yaw = state.yaw.sin();
        let cos_yaw = state.yaw.cos();
        if direction > 0.0 {
            Self {
                center: Vector2::new(state.x - radius * sin_yaw, state.y + radius * cos_yaw),
                radius,
                phase: state.yaw + 3.0 * FRAC_PI_2,
                direction: 1.0,
            }
        } else {
            Self {
                center: Vector2::new(state.x + radius * sin_yaw, state.y - radius * cos_yaw),
                radius,
                phase: state.yaw + FRAC_PI_2,
                direction: -1.0,
            }
        }
    }

    pub fn point_at(&self, angle: f64) -> Point2D {
        Point2D::from(self.center + self.radius * Vector2::new(angle.cos(), angle.sin()))
    }

    /// Heading of a vehicle travelling the circle at polar angle `angle`
    pub fn heading_at(&self, angle: f64) -> f64 {
        let offset = if self.direction > 0.0 { FRAC_PI_2 } else { 3.0 * FRAC_PI_2 };
        normalize_angle(angle + offset)
    }

    fn control(&self) -> SteeringControl {
        SteeringControl::new(self.direction * self.radius)
    }
}

/// One accepted arc / tangent / arc connection
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TangentPath {
    pub configuration: TangentConfiguration,
    pub start_circle: TurningCircle,
    pub goal_circle: TurningCircle,
    /// Angle swept on the start circle, in [0, 2pi)
    pub start_sweep: f64,
    /// Angle swept on the goal circle, in [0, 2pi)
    pub goal_sweep: f64,
    pub tangent_start: Point2D,
    pub tangent_end: Point2D,
    /// Distance between the two circle centers
    pub center_distance: f64,
    /// Length of the tangent segment between `tangent_start` and `tangent_end`
    pub straight_length: f64,
    /// Path cost ("total variation")
    pub cost: f64,
    pub start_velocity: f64,
}

/// Connect `start` to `goal` with one tangent configuration.
///
/// Returns `None` when the circles admit no tangent of this family, when
/// the sweep filter rejects the arcs, or when the velocity change cannot
/// fit within `accel_max` over the path cost.
///
/// The sweep filter is conservative: any arc longer than 3pi/2, or two arcs
/// both longer than pi, are rejected even when they would form the only
/// connection. The cost charges each arc its sweep wrapped into (-pi, pi],
/// so arcs longer than pi are under-charged, and charges the straight leg
/// the center distance, which over-charges cross tangents. The velocity
/// test only compares squared speeds, so decelerations always pass here.
pub fn connect(
    start: &State2D,
    goal: &State2D,
    configuration: TangentConfiguration,
    turning_radius: f64,
    accel_max: f64,
) -> Option<TangentPath> {
    let start_circle = TurningCircle::new(start, turning_radius, configuration.start_direction());
    let goal_circle = TurningCircle::new(goal, turning_radius, configuration.goal_direction());

    let offset = goal_circle.center - start_circle.center;
    let center_distance = offset.norm();
    let bearing = offset.y.atan2(offset.x);

    let (start_angle, end_angle, straight_length) = match configuration {
        TangentConfiguration::Lsl => (bearing - FRAC_PI_2, bearing - FRAC_PI_2, center_distance),
        TangentConfiguration::Rsr => (bearing + FRAC_PI_2, bearing + FRAC_PI_2, center_distance),
        TangentConfiguration::Lsr | TangentConfiguration::Rsl => {
            // Cross tangents need disjoint circles
            if center_distance <= 2.0 * turning_radius {
                return None;
            }
            let alpha = (2.0 * turning_radius / center_distance).acos();
            let straight = (center_distance * center_distance
                - 4.0 * turning_radius * turning_radius)
                .sqrt();
            if configuration == TangentConfiguration::Lsr {
                (bearing - alpha, bearing + PI - alpha, straight)
            } else {
                (bearing + alpha, bearing - PI + alpha, straight)
            }
        }
    };

    let start_sweep = wrap_to_two_pi(start_circle.direction * (start_angle - start_circle.phase));
    let goal_sweep = wrap_to_two_pi(goal_circle.direction * (goal_circle.phase - end_angle));

    if (start_sweep > PI && goal_sweep > PI)
        || start_sweep > 3.0 * FRAC_PI_2
        || goal_sweep > 3.0 * FRAC_PI_2
    {
        return None;
    }

    let cost = (normalize_angle(start_sweep).abs() + normalize_angle(goal_sweep).abs())
        * turning_radius
        + center_distance;

    if goal.v * goal.v - start.v * start.v > 2.0 * accel_max * cost {
        return None;
    }

    Some(TangentPath {
        configuration,
        start_circle,
        goal_circle,
        start_sweep,
        goal_sweep,
        tangent_start: start_circle.point_at(start_angle),
        tangent_end: goal_circle.point_at(end_angle),
        center_distance,
        straight_length,
        cost,
        start_velocity: start.v,
    })
}

/// Steps of `step` along `[0, extent]`, the last one clipped to `extent`.
/// Yields (position after the step, length of the step).
fn clipped_steps(extent: f64, step: f64) -> impl Iterator<Item = (f64, f64)> {
    let mut current = 0.0;
    std::iter::from_fn(move || {
        if !(current < extent) {
            return None;
        }
        let mut increment = step;
        current += step;
        if current > extent {
            increment -= current - extent;
            current = extent;
        }
        Some((current, increment))
    })
}

impl TangentPath {
    pub fn turning_radius(&self) -> f64 {
        self.start_circle.radius
    }

    /// Length actually driven along the two arcs and the tangent
    pub fn arc_length(&self) -> f64 {
        (self.start_sweep + self.goal_sweep) * self.turning_radius() + self.straight_length
    }

    /// Upper bound on the samples `sample_into` emits
    pub fn sample_count(&self, delta_distance: f64) -> usize {
        let r = self.turning_radius();
        let legs = [self.start_sweep * r, self.center_distance, self.goal_sweep * r];
        legs.iter()
            .map(|len| (len / delta_distance).ceil() as usize + 1)
            .sum()
    }

    /// Heading held along the tangent segment
    pub fn straight_heading(&self) -> f64 {
        let circle = &self.start_circle;
        circle.heading_at(circle.direction * self.start_sweep + circle.phase)
    }

    /// Discretize the connection into `traj`, replacing its contents.
    ///
    /// Samples are spaced `delta_distance` apart in arc length, starting one
    /// step past the start state and ending exactly on the goal pose. The
    /// velocity grows linearly with distance travelled at `acceleration`.
    ///
    /// The tangent leg is stepped over the center distance, the same length
    /// the cost charges for it, so the distance integrated along the whole
    /// path equals the cost whenever both sweeps are at most pi. Cross
    /// tangents are shorter than that, so their samples sit closer together.
    pub fn sample_into(
        &self,
        acceleration: f64,
        delta_distance: f64,
        traj: &mut Trajectory<State2D, SteeringControl>,
    ) {
        traj.clear();
        traj.total_variation = self.cost;
        traj.delta_distance = delta_distance;
        traj.reserve(self.sample_count(delta_distance));

        let r = self.turning_radius();
        let angle_step = delta_distance / r;
        let mut travelled = 0.0;

        let circle = &self.start_circle;
        let control = circle.control();
        for (swept, increment) in clipped_steps(self.start_sweep, angle_step) {
            travelled += increment * r;
            let angle = circle.direction * swept + circle.phase;
            let p = circle.point_at(angle);
            let v = self.start_velocity + acceleration * travelled;
            traj.push(State2D::new(p.x, p.y, circle.heading_at(angle), v), control);
        }

        let heading = self.straight_heading();
        let dx = self.tangent_end.x - self.tangent_start.x;
        let dy = self.tangent_end.y - self.tangent_start.y;
        for (driven, increment) in clipped_steps(self.center_distance, delta_distance) {
            travelled += increment;
            let ratio = driven / self.center_distance;
            let v = self.start_velocity + acceleration * travelled;
            traj.push(
                State2D::new(
                    self.tangent_start.x + dx * ratio,
                    self.tangent_start.y + dy * ratio,
                    heading,
                    v,
                ),
                SteeringControl::straight(),
            );
        }

        let circle = &self.goal_circle;
        let control = circle.control();
        for (swept, increment) in clipped_steps(self.goal_sweep, angle_step) {
            travelled += increment * r;
            let angle = circle.direction * (swept - self.goal_sweep) + circle.phase;
            let p = circle.point_at(angle);
            let v = self.start_velocity + acceleration * travelled;
            traj.push(State2D::new(p.x, p.y, circle.heading_at(angle), v), control);
        }
    }
}
