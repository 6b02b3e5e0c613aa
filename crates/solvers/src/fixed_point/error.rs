use thiserror::Error;

/// Errors that can occur during fixed-point iteration.
///
/// The model and problem error types are kept so callers can map failures
/// back to their own domain errors without downcasting.
#[derive(Debug, Error)]
pub enum Error<ME, PE, const N: usize> {
    /// The model call failed at `x`.
    #[error("model call failed at {x:?}")]
    Model {
        x: [f64; N],
        #[source]
        source: ME,
    },

    /// Failed to construct input or compute the update at `x`.
    #[error("problem error at {x:?}")]
    Problem {
        x: [f64; N],
        #[source]
        source: PE,
    },

    /// The initial guess or an update contained a non-finite value.
    #[error("non-finite iterate at iteration {iter}: {x:?}")]
    NonFinite { iter: usize, x: [f64; N] },
}
