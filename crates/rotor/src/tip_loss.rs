//! Tip-loss factors.

use std::f64::consts::FRAC_2_PI;

use serde::{Deserialize, Serialize};

/// Lower bound on the tip-loss factor.
const MIN_FACTOR: f64 = 1e-4;

/// Correction for the finite number of blades near the tip.
///
/// With a factor `F`, the momentum model sees the annulus thrust coefficient
/// divided by `F`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TipLoss {
    #[default]
    None,
    /// Prandtl's factor `F = 2/π acos(exp(-B (1 - μ) / (2 μ sin φ)))`.
    Prandtl,
}

impl TipLoss {
    /// Returns the factor in `[1e-4, 1]` for `blades` blades at normalized
    /// radius `mu` with inflow angle `phi`.
    #[must_use]
    pub fn factor(self, blades: usize, mu: f64, phi: f64) -> f64 {
        match self {
            Self::None => 1.0,
            Self::Prandtl => {
                let exponent = blades as f64 * (1.0 - mu) / (2.0 * mu * phi.sin().abs());
                let factor = FRAC_2_PI * (-exponent).exp().clamp(0.0, 1.0).acos();
                if factor.is_finite() {
                    factor.clamp(MIN_FACTOR, 1.0)
                } else {
                    1.0
                }
            }
        }
    }
}
