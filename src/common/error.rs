//! Error types for dubins_velocity

use thiserror::Error;

/// Main error type for steering queries
#[derive(Debug, Error)]
pub enum SteeringError {
    /// Invalid parameter
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
    /// No tangent configuration is feasible for any candidate turning radius
    #[error("No feasible path for any of the {radii} candidate turning radii")]
    NoFeasiblePath { radii: usize },
    /// The velocity change cannot be reached within the transit time
    #[error("Required acceleration {required:.4} exceeds bound {bound:.4}")]
    AccelerationInfeasible { required: f64, bound: f64 },
    /// A cache refers to a turning radius that is not configured
    #[error("Cached turning radius index {index} out of range ({available} radii configured)")]
    InvalidCache { index: usize, available: usize },
    /// A cached resolution no longer connects the given states
    #[error("Cached turning radius yields no feasible path")]
    CachedPathInfeasible,
    /// Configuration text could not be parsed
    #[error("Config error: {0}")]
    Config(#[from] serde_json::Error),
    /// I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
    /// Visualization error
    #[error("Visualization error: {0}")]
    VisualizationError(String),
}

/// Result type alias for steering operations
pub type SteeringResult<T> = Result<T, SteeringError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SteeringError::NoFeasiblePath { radii: 3 };
        assert_eq!(
            format!("{}", err),
            "No feasible path for any of the 3 candidate turning radii"
        );
    }

    #[test]
    fn test_error_from_json() {
        let json_err = serde_json::from_str::<f64>("not a number").unwrap_err();
        let err: SteeringError = json_err.into();
        assert!(matches!(err, SteeringError::Config(_)));
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: SteeringError = io_err.into();
        assert!(matches!(err, SteeringError::IoError(_)));
    }
}
