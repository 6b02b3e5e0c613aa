use bemrotor_solvers::fixed_point;

use crate::ConfigurationError;

/// Settings for the per-annulus induction iteration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnnulusConfig {
    solver: fixed_point::Config,
    n_azimuth: usize,
}

impl Default for AnnulusConfig {
    fn default() -> Self {
        // Known-good values, unwrap is safe
        Self::new(0.25, 1e-6, 100, 36).unwrap()
    }
}

impl AnnulusConfig {
    /// Creates a validated config.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigurationError`] if `relaxation` is outside `(0, 1]`,
    /// `tolerance` is not finite and positive, `max_iters` is zero, or
    /// `n_azimuth` is zero.
    pub fn new(
        relaxation: f64,
        tolerance: f64,
        max_iters: usize,
        n_azimuth: usize,
    ) -> Result<Self, ConfigurationError> {
        if n_azimuth == 0 {
            return Err(ConfigurationError::Azimuth);
        }
        let solver = fixed_point::Config::new(max_iters, relaxation, tolerance)?;
        Ok(Self { solver, n_azimuth })
    }

    #[must_use]
    pub fn relaxation(&self) -> f64 {
        self.solver.relaxation()
    }

    #[must_use]
    pub fn tolerance(&self) -> f64 {
        self.solver.tolerance()
    }

    #[must_use]
    pub fn max_iters(&self) -> usize {
        self.solver.max_iters()
    }

    /// Number of azimuthal quadrature points used under yaw.
    #[must_use]
    pub fn n_azimuth(&self) -> usize {
        self.n_azimuth
    }

    pub(super) fn solver(&self) -> &fixed_point::Config {
        &self.solver
    }
}
