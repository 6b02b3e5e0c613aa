use bemrotor_core::{FixedPointProblem, Model, Snapshot};

use super::Error;

/// The result of evaluating a fixed-point problem at a given `x`.
#[derive(Debug, Clone)]
pub struct Evaluation<I, O, const N: usize> {
    pub x: [f64; N],
    pub target: [f64; N],
    pub residual: f64,
    pub snapshot: Snapshot<I, O>,
}

/// Evaluates the model in the context of a fixed-point problem.
///
/// The residual is the largest absolute component of `G(x) - x`, or NaN if
/// any component of `G(x)` is non-finite.
///
/// # Errors
///
/// Returns an error if input mapping, model call, or update fails.
pub fn evaluate<M, P, const N: usize>(
    model: &M,
    problem: &P,
    x: [f64; N],
) -> Result<Evaluation<M::Input, M::Output, N>, Error<M::Error, P::Error, N>>
where
    M: Model,
    P: FixedPointProblem<N, Input = M::Input, Output = M::Output>,
{
    let input = problem
        .input(&x)
        .map_err(|source| Error::Problem { x, source })?;
    let output = model
        .call(&input)
        .map_err(|source| Error::Model { x, source })?;
    let target = problem
        .update(&input, &output)
        .map_err(|source| Error::Problem { x, source })?;

    let residual = if target.iter().all(|v| v.is_finite()) {
        x.iter()
            .zip(&target)
            .map(|(xi, ti)| (ti - xi).abs())
            .fold(0.0, f64::max)
    } else {
        f64::NAN
    };

    Ok(Evaluation {
        x,
        target,
        residual,
        snapshot: Snapshot::new(input, output),
    })
}
