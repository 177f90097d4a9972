//! Dubins steering with a constant-acceleration velocity profile
//!
//! [`DubinsVelocity`] connects two [`State2D`]s by the cheapest accepted
//! tangent configuration over a list of candidate turning radii. The first
//! query for a start/goal pair picks the radius and the acceleration and
//! returns them as a [`QueryCache`]; handing that cache back skips the
//! search and guarantees the same connection is reproduced.

use log::{debug, trace};
use ordered_float::OrderedFloat;
use rand::seq::SliceRandom;
use rand::Rng;
use rand_distr::{Distribution, Uniform};

use crate::common::{
    normalize_angle, DynamicalSystem, ExtendCost, SampleRegion, State2D, SteeringControl,
    SteeringError, SteeringResult, Trajectory,
};

use super::config::DubinsVelocityConfig;
use super::tangent::{connect, TangentConfiguration, TangentPath};

/// Trajectory type produced by [`DubinsVelocity`]
pub type DubinsTrajectory = Trajectory<State2D, SteeringControl>;

/// Costs above this are treated as "no path found"
const COST_CEILING: f64 = f32::MAX as f64 / 2.0;

/// Resolution of one start/goal query
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QueryCache {
    /// Index into the configured turning radii
    pub radius_index: usize,
    /// Constant acceleration applied along the trajectory [m/s^2]
    pub acceleration: f64,
    /// Transit-time estimate: the cost of the chosen connection
    pub transit_time: f64,
}

/// Dubins-velocity steering primitive
#[derive(Debug, Clone)]
pub struct DubinsVelocity {
    config: DubinsVelocityConfig,
}

impl DubinsVelocity {
    /// Create a steering primitive, validating the configuration
    pub fn new(config: DubinsVelocityConfig) -> SteeringResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn with_defaults() -> Self {
        Self {
            config: DubinsVelocityConfig::default(),
        }
    }

    pub fn config(&self) -> &DubinsVelocityConfig {
        &self.config
    }

    /// Turning radius for a cache index
    pub fn turning_radius(&self, index: usize) -> SteeringResult<f64> {
        self.config
            .turning_radii
            .get(index)
            .copied()
            .ok_or(SteeringError::InvalidCache {
                index,
                available: self.config.turning_radii.len(),
            })
    }

    /// Cheapest accepted tangent configuration for one turning radius.
    ///
    /// Configurations are tried in order 1..4; an exact tie keeps the
    /// lower-numbered one.
    pub fn best_connection(
        &self,
        start: &State2D,
        goal: &State2D,
        turning_radius: f64,
    ) -> Option<TangentPath> {
        TangentConfiguration::ALL
            .iter()
            .filter_map(|&c| connect(start, goal, c, turning_radius, self.config.accel_max))
            .min_by_key(|path| OrderedFloat(path.cost))
    }

    /// Choose the turning radius and acceleration for a start/goal pair.
    ///
    /// The radius with the smallest strictly positive cost wins, the lower
    /// index on an exact tie. The pair is accepted only if the velocity
    /// change fits within `cost * accel_max`.
    pub fn resolve(&self, start: &State2D, goal: &State2D) -> SteeringResult<QueryCache> {
        check_states(start, goal)?;

        let best = self
            .config
            .turning_radii
            .iter()
            .enumerate()
            .filter_map(|(index, &radius)| {
                let cost = self.best_connection(start, goal, radius).map(|p| p.cost);
                trace!("radius[{}] = {:.3}: cost {:?}", index, radius, cost);
                cost.filter(|&c| c > 0.0).map(|c| (index, c))
            })
            .min_by_key(|&(_, cost)| OrderedFloat(cost));

        let (radius_index, transit_time) = match best {
            Some((index, cost)) if cost <= COST_CEILING => (index, cost),
            _ => {
                debug!("no feasible connection from {:?} to {:?}", start, goal);
                return Err(SteeringError::NoFeasiblePath {
                    radii: self.config.turning_radii.len(),
                });
            }
        };

        let dv = goal.v - start.v;
        if transit_time * self.config.accel_max < dv.abs() {
            debug!(
                "velocity change {:.3} not reachable in {:.3} at {:.3} m/s^2",
                dv, transit_time, self.config.accel_max
            );
            return Err(SteeringError::AccelerationInfeasible {
                required: dv.abs() / transit_time,
                bound: self.config.accel_max,
            });
        }

        let cache = QueryCache {
            radius_index,
            acceleration: dv / transit_time,
            transit_time,
        };
        debug!("resolved {:?}", cache);
        Ok(cache)
    }

    /// Regenerate the trajectory into `traj`, reusing its allocation.
    ///
    /// Returns the cache the trajectory was built with; `traj` is left
    /// empty on error.
    pub fn extend_into(
        &self,
        start: &State2D,
        goal: &State2D,
        cache: Option<&QueryCache>,
        traj: &mut DubinsTrajectory,
    ) -> SteeringResult<QueryCache> {
        traj.clear();
        let cache = match cache {
            Some(cache) => *cache,
            None => self.resolve(start, goal)?,
        };
        let path = self.cached_connection(start, goal, &cache)?;
        path.sample_into(cache.acceleration, self.config.delta_distance, traj);
        Ok(cache)
    }

    fn cached_connection(
        &self,
        start: &State2D,
        goal: &State2D,
        cache: &QueryCache,
    ) -> SteeringResult<TangentPath> {
        check_states(start, goal)?;
        let radius = self.turning_radius(cache.radius_index)?;
        self.best_connection(start, goal, radius)
            .ok_or(SteeringError::CachedPathInfeasible)
    }
}

fn check_states(start: &State2D, goal: &State2D) -> SteeringResult<()> {
    if start.is_finite() && goal.is_finite() {
        Ok(())
    } else {
        Err(SteeringError::InvalidParameter(format!(
            "non-finite state in query {:?} -> {:?}",
            start, goal
        )))
    }
}

impl DynamicalSystem for DubinsVelocity {
    type State = State2D;
    type Control = SteeringControl;
    type Cache = QueryCache;

    fn sample_state<R: Rng + ?Sized>(&self, rng: &mut R, region: &SampleRegion) -> State2D {
        let unit = Uniform::new_inclusive(-1.0, 1.0);
        let c = &region.center;
        let h = &region.half_extent;
        let v = self.config.velocities.choose(rng).copied().unwrap_or(0.0);
        State2D::new(
            c.x + h.x * unit.sample(rng),
            c.y + h.y * unit.sample(rng),
            normalize_angle(c.yaw + h.yaw * unit.sample(rng)),
            v,
        )
    }

    fn evaluate_extend_cost(
        &self,
        start: &State2D,
        goal: &State2D,
        cache: Option<&QueryCache>,
    ) -> SteeringResult<ExtendCost<QueryCache>> {
        match cache {
            Some(cache) => {
                let path = self.cached_connection(start, goal, cache)?;
                Ok(ExtendCost {
                    cost: path.cost,
                    cache: *cache,
                })
            }
            None => {
                let cache = self.resolve(start, goal)?;
                Ok(ExtendCost {
                    cost: cache.transit_time,
                    cache,
                })
            }
        }
    }

    fn extend_to(
        &self,
        start: &State2D,
        goal: &State2D,
        cache: Option<&QueryCache>,
    ) -> SteeringResult<DubinsTrajectory> {
        let mut traj = Trajectory::new();
        self.extend_into(start, goal, cache, &mut traj)?;
        Ok(traj)
    }

    fn project_for_display(&self, state: &State2D) -> (f64, f64, f64) {
        (state.x, state.y, state.v)
    }
}
