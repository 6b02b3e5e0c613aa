use thiserror::Error;

use super::bracket::BracketError;

/// Errors that end a bisection solve.
#[derive(Debug, Error)]
pub enum Error<ME, PE> {
    #[error(transparent)]
    Bracket(#[from] BracketError),

    #[error("non-finite residual {residual} at x = {x}")]
    NonFiniteResidual { x: f64, residual: f64 },

    #[error("model call failed at x = {x}")]
    Model {
        x: f64,
        #[source]
        source: ME,
    },

    #[error("problem rejected x = {x}")]
    Problem {
        x: f64,
        #[source]
        source: PE,
    },
}
