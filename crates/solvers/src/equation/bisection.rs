//! Bisection root finding for scalar equations.
//!
//! The solver keeps a bracket `[left, right]` whose residuals have opposite
//! signs and halves it until the bracket width or the residual meets the
//! configured tolerance. It emits one [`Event`] per midpoint evaluation.

mod bracket;
mod config;
mod error;
mod solution;

pub use bracket::{Bracket, BracketError};
pub use config::{Config, ConfigError};
pub use error::Error;
pub use solution::{Solution, Status};

use bemrotor_core::{EquationProblem, Model, Observer};

use crate::equation::{EvalError, Evaluation, evaluate};

/// What an observer may ask of the bisection loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Return the best evaluation so far.
    StopEarly,
}

/// One midpoint evaluation.
#[derive(Debug)]
pub struct Event<'a, I, O> {
    /// 1-based; endpoint evaluations are not reported.
    pub iter: usize,
    /// Bracket before it is shrunk around the midpoint.
    pub bracket: [f64; 2],
    pub eval: &'a Evaluation<I, O, 1>,
}

/// Bisects `bracket` until the residual changes sign across a small enough
/// interval.
///
/// # Errors
///
/// Returns an error if the bracket is invalid, a residual is non-finite, or
/// the model or problem returns an error during evaluation.
pub fn solve<M, P, Obs>(
    model: &M,
    problem: &P,
    bracket: [f64; 2],
    config: &Config,
    mut observer: Obs,
) -> Result<Solution<M::Input, M::Output>, Error<M::Error, P::Error>>
where
    M: Model,
    P: EquationProblem<1, Input = M::Input, Output = M::Output>,
    Obs: for<'a> Observer<Event<'a, M::Input, M::Output>, Action>,
{
    let [left, right] = Bracket::order(bracket)?;

    let left_eval = checked_eval(model, problem, left)?;
    if left_eval.residuals[0].abs() <= config.residual_tol() {
        return Ok(Solution::from_eval(left_eval, Status::Converged, 0));
    }

    let right_eval = checked_eval(model, problem, right)?;
    if right_eval.residuals[0].abs() <= config.residual_tol() {
        return Ok(Solution::from_eval(right_eval, Status::Converged, 0));
    }

    let mut bracket = Bracket::new(&left_eval, &right_eval)?;
    let mut best = if left_eval.residuals[0].abs() <= right_eval.residuals[0].abs() {
        left_eval
    } else {
        right_eval
    };

    for iter in 1..=config.max_iters() {
        let mid = bracket.midpoint();
        let mid_eval = checked_eval(model, problem, mid)?;
        let mid_residual = mid_eval.residuals[0];

        let event = Event {
            iter,
            bracket: bracket.as_array(),
            eval: &mid_eval,
        };
        let action = observer.observe(&event);

        let converged = mid_residual.abs() <= config.residual_tol()
            || bracket.width() <= config.x_abs_tol() + config.x_rel_tol() * mid.abs();

        bracket.shrink(mid, mid_residual);
        if mid_residual.abs() < best.residuals[0].abs() || converged {
            best = mid_eval;
        }

        if converged {
            return Ok(Solution::from_eval(best, Status::Converged, iter));
        }
        if let Some(Action::StopEarly) = action {
            return Ok(Solution::from_eval(best, Status::StoppedByObserver, iter));
        }
    }

    Ok(Solution::from_eval(best, Status::MaxIters, config.max_iters()))
}

/// [`solve`] with the no-op observer.
///
/// # Errors
///
/// Returns an error if the bracket is invalid, a residual is non-finite, or
/// the model or problem returns an error during evaluation.
pub fn solve_unobserved<M, P>(
    model: &M,
    problem: &P,
    bracket: [f64; 2],
    config: &Config,
) -> Result<Solution<M::Input, M::Output>, Error<M::Error, P::Error>>
where
    M: Model,
    P: EquationProblem<1, Input = M::Input, Output = M::Output>,
{
    solve(model, problem, bracket, config, ())
}

fn checked_eval<M, P>(
    model: &M,
    problem: &P,
    x: f64,
) -> Result<Evaluation<M::Input, M::Output, 1>, Error<M::Error, P::Error>>
where
    M: Model,
    P: EquationProblem<1, Input = M::Input, Output = M::Output>,
{
    let eval = evaluate(model, problem, [x]).map_err(|err| match err {
        EvalError::Model { source, .. } => Error::Model { x, source },
        EvalError::Problem { source, .. } => Error::Problem { x, source },
    })?;

    let residual = eval.residuals[0];
    if residual.is_finite() {
        Ok(eval)
    } else {
        Err(Error::NonFiniteResidual { x, residual })
    }
}
