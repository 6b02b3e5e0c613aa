//! Momentum relations mapping thrust coefficient to axial induction.
//!
//! A [`MomentumModel`] receives the annulus thrust coefficient (already
//! divided by any tip-loss factor) and the yaw angle in radians, and returns
//! the axial induction factor that momentum theory associates with it.
//! Models are shared read-only across annuli and threads.
//!
//! Any closure `Fn(f64, f64) -> Result<f64, MomentumError> + Send + Sync`
//! is itself a model, which is how an externally derived relation plugs in.

mod classical;
mod constant;
mod heck;

pub use classical::{ClassicalMomentum, HighThrustCorrection};
pub use constant::ConstantInduction;
pub use heck::{DiscSolution, Heck, LimitedHeck};

use std::error::Error as StdError;

use thiserror::Error;

/// Failure of a momentum relation.
#[derive(Debug, Error)]
pub enum MomentumError {
    #[error("thrust coefficient {ct} at yaw {yaw} rad is outside the domain of the momentum relation")]
    OutOfDomain { ct: f64, yaw: f64 },

    #[error("inverting the thrust relation at C_T = {ct} did not converge after {iters} iterations")]
    NoConvergence { ct: f64, iters: usize },

    #[error("tangential induction is undefined for axial induction {axial} at yaw {yaw} rad")]
    TangentialOutOfDomain { axial: f64, yaw: f64 },

    #[error("momentum relation failed")]
    Relation(#[source] Box<dyn StdError + Send + Sync>),
}

impl MomentumError {
    /// Wraps an error raised by a user-supplied relation.
    pub fn relation(error: impl StdError + Send + Sync + 'static) -> Self {
        Self::Relation(Box::new(error))
    }
}

/// Maps a thrust coefficient to an axial induction factor.
pub trait MomentumModel: Send + Sync {
    /// Returns the axial induction for thrust coefficient `ct` at `yaw`
    /// radians.
    ///
    /// # Errors
    ///
    /// Returns a [`MomentumError`] if `ct` has no realizable induction.
    fn induction(&self, ct: f64, yaw: f64) -> Result<f64, MomentumError>;
}

impl<F> MomentumModel for F
where
    F: Fn(f64, f64) -> Result<f64, MomentumError> + Send + Sync,
{
    fn induction(&self, ct: f64, yaw: f64) -> Result<f64, MomentumError> {
        self(ct, yaw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    fn solve_with(model: &impl MomentumModel, ct: f64) -> Result<f64, MomentumError> {
        model.induction(ct, 0.0)
    }

    #[test]
    fn closures_are_models() {
        let linear = |ct: f64, _yaw: f64| -> Result<f64, MomentumError> { Ok(ct / 4.0) };
        assert_relative_eq!(solve_with(&linear, 0.8).unwrap(), 0.2);
    }

    #[test]
    fn closure_errors_propagate() {
        #[derive(Debug, Error)]
        #[error("table exhausted")]
        struct Exhausted;

        let failing =
            |_ct: f64, _yaw: f64| -> Result<f64, MomentumError> { Err(MomentumError::relation(Exhausted)) };
        let error = solve_with(&failing, 0.5).unwrap_err();

        assert!(matches!(error, MomentumError::Relation(_)));
        assert_eq!(
            error.source().map(ToString::to_string),
            Some("table exhausted".to_string())
        );
    }
}
