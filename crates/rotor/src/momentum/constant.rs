use crate::ConfigurationError;

use super::{MomentumError, MomentumModel};

/// Returns the same axial induction for every thrust coefficient.
///
/// Useful for checking blade-element loads at a prescribed induction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConstantInduction(f64);

impl ConstantInduction {
    /// # Errors
    ///
    /// Returns an error if `axial` is not finite.
    pub fn new(axial: f64) -> Result<Self, ConfigurationError> {
        if !axial.is_finite() {
            return Err(ConfigurationError::InvalidMomentum {
                reason: "constant induction must be finite",
            });
        }
        Ok(Self(axial))
    }

    #[must_use]
    pub fn axial(&self) -> f64 {
        self.0
    }
}

impl MomentumModel for ConstantInduction {
    fn induction(&self, _ct: f64, _yaw: f64) -> Result<f64, MomentumError> {
        Ok(self.0)
    }
}
