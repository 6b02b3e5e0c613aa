use thiserror::Error;

/// Configuration for the fixed-point solver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    max_iters: usize,
    relaxation: f64,
    tolerance: f64,
}

/// Errors that can occur when validating a fixed-point solver config.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    #[error("max_iters must be at least one")]
    MaxIters,

    #[error("relaxation must be in (0, 1]")]
    Relaxation,

    #[error("tolerance must be finite and positive")]
    Tolerance,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_iters: 100,
            relaxation: 1.0,
            tolerance: 1e-10,
        }
    }
}

impl Config {
    /// Creates a new config with validated settings.
    ///
    /// # Errors
    ///
    /// Returns an error if `max_iters` is zero, `relaxation` is outside
    /// `(0, 1]`, or `tolerance` is not finite and positive.
    pub fn new(max_iters: usize, relaxation: f64, tolerance: f64) -> Result<Self, ConfigError> {
        if max_iters == 0 {
            return Err(ConfigError::MaxIters);
        }
        if !(relaxation > 0.0 && relaxation <= 1.0) {
            return Err(ConfigError::Relaxation);
        }
        if !tolerance.is_finite() || tolerance <= 0.0 {
            return Err(ConfigError::Tolerance);
        }

        Ok(Self {
            max_iters,
            relaxation,
            tolerance,
        })
    }

    /// Returns the maximum number of evaluations.
    #[must_use]
    pub fn max_iters(&self) -> usize {
        self.max_iters
    }

    /// Returns the relaxation factor applied to each update.
    #[must_use]
    pub fn relaxation(&self) -> f64 {
        self.relaxation
    }

    /// Returns the residual tolerance for convergence.
    #[must_use]
    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }
}
