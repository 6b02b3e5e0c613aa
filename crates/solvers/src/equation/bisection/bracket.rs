use crate::equation::Evaluation;

use thiserror::Error;

/// Errors that can occur when forming a [`Bracket`].
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum BracketError {
    #[error("bracket has zero width: left and right are both {value}")]
    ZeroWidth { value: f64 },

    #[error("bracket contains non-finite value: {value}")]
    NonFinite { value: f64 },

    #[error("no sign change in bracket: f({left})={left_residual}, f({right})={right_residual}")]
    NoSignChange {
        left: f64,
        right: f64,
        left_residual: f64,
        right_residual: f64,
    },
}

/// A bracket whose endpoint residuals have opposite signs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bracket {
    left: f64,
    right: f64,
    left_positive: bool,
}

impl Bracket {
    /// Validates raw endpoints and returns them in ascending order.
    pub(super) fn order(bracket: [f64; 2]) -> Result<[f64; 2], BracketError> {
        let [a, b] = bracket;

        for value in [a, b] {
            if !value.is_finite() {
                return Err(BracketError::NonFinite { value });
            }
        }

        #[allow(clippy::float_cmp)]
        if a == b {
            return Err(BracketError::ZeroWidth { value: a });
        }

        Ok(if a < b { [a, b] } else { [b, a] })
    }

    /// Builds a bracket from endpoint evaluations.
    pub(super) fn new<I, O>(
        left: &Evaluation<I, O, 1>,
        right: &Evaluation<I, O, 1>,
    ) -> Result<Self, BracketError> {
        let left_residual = left.residuals[0];
        let right_residual = right.residuals[0];

        if (left_residual >= 0.0) == (right_residual >= 0.0) {
            return Err(BracketError::NoSignChange {
                left: left.x[0],
                right: right.x[0],
                left_residual,
                right_residual,
            });
        }

        Ok(Self {
            left: left.x[0],
            right: right.x[0],
            left_positive: left_residual >= 0.0,
        })
    }

    /// Returns the bracket bounds as an array.
    #[must_use]
    pub fn as_array(&self) -> [f64; 2] {
        [self.left, self.right]
    }

    /// Returns the midpoint of the bracket.
    #[must_use]
    pub fn midpoint(&self) -> f64 {
        0.5 * (self.left + self.right)
    }

    /// Returns the bracket width.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    /// Replaces the endpoint whose residual sign matches `residual`.
    pub(super) fn shrink(&mut self, x: f64, residual: f64) {
        if (residual >= 0.0) == self.left_positive {
            self.left = x;
        } else {
            self.right = x;
        }
    }
}
