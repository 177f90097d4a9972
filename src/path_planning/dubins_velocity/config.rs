//! Configuration for the Dubins-velocity steering primitive

use serde::{Deserialize, Serialize};

use crate::common::{SteeringError, SteeringResult};

mod defaults {
    pub fn delta_distance() -> f64 {
        0.05
    }

    pub fn accel_max() -> f64 {
        1.0
    }

    pub fn turning_radii() -> Vec<f64> {
        vec![3.0]
    }

    pub fn velocities() -> Vec<f64> {
        vec![0.0, 0.1, 0.5, 0.75]
    }
}

/// Steering parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DubinsVelocityConfig {
    /// Arc-length spacing between trajectory samples [m]
    #[serde(default = "defaults::delta_distance")]
    pub delta_distance: f64,
    /// Longitudinal acceleration bound [m/s^2]
    #[serde(default = "defaults::accel_max")]
    pub accel_max: f64,
    /// Candidate turning radii [m]; lower index wins ties
    #[serde(default = "defaults::turning_radii")]
    pub turning_radii: Vec<f64>,
    /// Velocities the state sampler draws from [m/s]
    #[serde(default = "defaults::velocities")]
    pub velocities: Vec<f64>,
}

impl Default for DubinsVelocityConfig {
    fn default() -> Self {
        Self {
            delta_distance: defaults::delta_distance(),
            accel_max: defaults::accel_max(),
            turning_radii: defaults::turning_radii(),
            velocities: defaults::velocities(),
        }
    }
}

impl DubinsVelocityConfig {
    /// Parse a JSON document; omitted fields take their defaults
    pub fn from_json_str(text: &str) -> SteeringResult<Self> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_delta_distance(mut self, delta_distance: f64) -> Self {
        self.delta_distance = delta_distance;
        self
    }

    pub fn with_accel_max(mut self, accel_max: f64) -> Self {
        self.accel_max = accel_max;
        self
    }

    pub fn with_turning_radii(mut self, turning_radii: Vec<f64>) -> Self {
        self.turning_radii = turning_radii;
        self
    }

    pub fn with_velocities(mut self, velocities: Vec<f64>) -> Self {
        self.velocities = velocities;
        self
    }

    pub fn validate(&self) -> SteeringResult<()> {
        if !(self.delta_distance.is_finite() && self.delta_distance > 0.0) {
            return Err(SteeringError::InvalidParameter(format!(
                "delta_distance must be positive, got {}",
                self.delta_distance
            )));
        }
        if !(self.accel_max.is_finite() && self.accel_max >= 0.0) {
            return Err(SteeringError::InvalidParameter(format!(
                "accel_max must be non-negative, got {}",
                self.accel_max
            )));
        }
        if self.turning_radii.is_empty() {
            return Err(SteeringError::InvalidParameter(
                "at least one turning radius is required".to_string(),
            ));
        }
        if let Some(r) = self
            .turning_radii
            .iter()
            .find(|r| !(r.is_finite() && **r > 0.0))
        {
            return Err(SteeringError::InvalidParameter(format!(
                "turning radius must be positive, got {}",
                r
            )));
        }
        if self.velocities.is_empty() {
            return Err(SteeringError::InvalidParameter(
                "velocity palette is empty".to_string(),
            ));
        }
        if self.velocities.iter().any(|v| !v.is_finite()) {
            return Err(SteeringError::InvalidParameter(
                "velocity palette contains a non-finite value".to_string(),
            ));
        }
        Ok(())
    }
}
