use serde::{Deserialize, Serialize};

use crate::{AnnulusConfig, TangentialInduction, TipLoss};

use super::Quadrature;

/// Physics and numerics shared by every annulus of a rotor solve.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RotorOptions {
    pub annulus: AnnulusConfig,
    pub tangential: TangentialInduction,
    pub tip_loss: TipLoss,
    pub quadrature: Quadrature,
}

/// What a sweep does when one of its conditions fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OnError {
    /// Stop and return the failure.
    #[default]
    Abort,
    /// Record the failure and move on.
    Continue,
}

/// Settings for [`RotorSolver::sweep`](super::RotorSolver::sweep).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SweepOptions {
    /// Seed each solve with the previous converged solution.
    pub warm_start: bool,
    pub on_error: OnError,
}

impl Default for SweepOptions {
    fn default() -> Self {
        Self {
            warm_start: true,
            on_error: OnError::Abort,
        }
    }
}
