//! Common traits defining interfaces for steering primitives

use rand::Rng;

use crate::common::error::SteeringResult;
use crate::common::types::{ExtendCost, SampleRegion, Trajectory};

/// Local-connection operator consumed by a sampling-based planner.
///
/// Implementors are stateless apart from their configuration. Anything
/// learned about a particular start/goal pair is returned to the caller
/// as a `Cache` value and handed back on later calls for the same pair.
pub trait DynamicalSystem {
    /// State type
    type State;
    /// Control type attached to each trajectory sample
    type Control;
    /// Per start/goal resolution memo
    type Cache;

    /// Draw a random state inside `region`
    fn sample_state<R: Rng + ?Sized>(&self, rng: &mut R, region: &SampleRegion) -> Self::State;

    /// Cost of connecting `start` to `goal`.
    ///
    /// Without a cache the connection is resolved from scratch and the
    /// resulting cache is returned; with one, the cached choice is reused.
    fn evaluate_extend_cost(
        &self,
        start: &Self::State,
        goal: &Self::State,
        cache: Option<&Self::Cache>,
    ) -> SteeringResult<ExtendCost<Self::Cache>>;

    /// Discretized trajectory from `start` to `goal`
    fn extend_to(
        &self,
        start: &Self::State,
        goal: &Self::State,
        cache: Option<&Self::Cache>,
    ) -> SteeringResult<Trajectory<Self::State, Self::Control>>;

    /// Reduced (x, y, velocity) tuple for plotting
    fn project_for_display(&self, state: &Self::State) -> (f64, f64, f64);
}
