//! Tangential (swirl) induction models.

use serde::{Deserialize, Serialize};

use crate::MomentumError;

/// Smallest normalized radius used in the tangential momentum balance.
const MIN_MU: f64 = 0.1;

/// How the tangential induction `a'` is updated each iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TangentialInduction {
    /// Wake rotation is neglected and `a'` stays zero.
    #[default]
    None,
    /// Angular momentum balance of the annulus:
    ///
    /// ```text
    /// a' = σ ⟨W² C_tan⟩ / (4 λ max(μ, 0.1) (1 - a) cos γ)
    /// ```
    Default,
}

impl TangentialInduction {
    /// Returns the tangential induction for the given annulus loading.
    ///
    /// # Errors
    ///
    /// Returns [`MomentumError::TangentialOutOfDomain`] when the balance has
    /// no finite solution, which happens for `a ≥ 1`.
    pub fn induction(
        self,
        solidity: f64,
        tangential_load: f64,
        tsr: f64,
        mu: f64,
        axial: f64,
        yaw: f64,
    ) -> Result<f64, MomentumError> {
        match self {
            Self::None => Ok(0.0),
            Self::Default => {
                let denominator = 4.0 * tsr * mu.max(MIN_MU) * (1.0 - axial) * yaw.cos();
                if !(denominator > 0.0) {
                    return Err(MomentumError::TangentialOutOfDomain { axial, yaw });
                }
                Ok(solidity * tangential_load / denominator)
            }
        }
    }
}
