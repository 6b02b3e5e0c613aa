use thiserror::Error;

use bemrotor_core::{EquationProblem, Model, Snapshot};

/// Residuals of an equation problem at one point, with the model call that
/// produced them.
#[derive(Debug, Clone)]
pub struct Evaluation<I, O, const N: usize> {
    pub x: [f64; N],
    pub residuals: [f64; N],
    pub snapshot: Snapshot<I, O>,
}

/// Failure while evaluating an equation problem at `x`.
#[derive(Debug, Error)]
pub enum EvalError<ME, PE, const N: usize> {
    #[error("model call failed at {x:?}")]
    Model {
        x: [f64; N],
        #[source]
        source: ME,
    },
    #[error("problem rejected {x:?}")]
    Problem {
        x: [f64; N],
        #[source]
        source: PE,
    },
}

/// Maps `x` to a model input, calls the model and computes residuals.
///
/// # Errors
///
/// Returns the failing step's error together with `x`.
pub fn evaluate<M, P, const N: usize>(
    model: &M,
    problem: &P,
    x: [f64; N],
) -> Result<Evaluation<M::Input, M::Output, N>, EvalError<M::Error, P::Error, N>>
where
    M: Model,
    P: EquationProblem<N, Input = M::Input, Output = M::Output>,
{
    let input = problem
        .input(&x)
        .map_err(|source| EvalError::Problem { x, source })?;
    let output = model
        .call(&input)
        .map_err(|source| EvalError::Model { x, source })?;
    let residuals = problem
        .residuals(&input, &output)
        .map_err(|source| EvalError::Problem { x, source })?;

    Ok(Evaluation {
        x,
        residuals,
        snapshot: Snapshot::new(input, output),
    })
}
