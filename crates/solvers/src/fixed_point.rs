//! Relaxed fixed-point iteration.
//!
//! # Algorithm
//!
//! Given a [`FixedPointProblem`] that maps `x` to an updated estimate `G(x)`,
//! the solver iterates
//!
//! ```text
//! x_{k+1} = x_k + relaxation * (G(x_k) - x_k)
//! ```
//!
//! and stops once the residual `max_i |G(x)_i - x_i|` drops below the
//! configured tolerance. A relaxation factor below one damps oscillation when
//! `G` has a steep negative slope around the fixed point.
//!
//! # Observer Events
//!
//! The solver emits one [`Event`] per evaluation, after the residual is
//! known and before the convergence check. Observers can return
//! [`Action::StopEarly`] to halt with [`Status::StoppedByObserver`].
//!
//! # Termination
//!
//! The returned [`Solution`] always refers to the last evaluated point, so
//! its snapshot is consistent with `x`. Reaching `max_iters` yields
//! [`Status::MaxIters`]; callers decide whether that is an error.

mod action;
mod config;
mod error;
mod evaluate;
mod event;
mod solution;

#[cfg(test)]
mod tests;

pub use action::Action;
pub use config::{Config, ConfigError};
pub use error::Error;
pub use evaluate::{Evaluation, evaluate};
pub use event::Event;
pub use solution::{Solution, Status};

use bemrotor_core::{FixedPointProblem, Model, Observer};

/// Finds a fixed point of the problem starting from `x0`.
///
/// # Errors
///
/// Returns an error if `x0` or an update is non-finite, or if the model or
/// problem fails during evaluation.
pub fn solve<M, P, Obs, const N: usize>(
    model: &M,
    problem: &P,
    x0: [f64; N],
    config: &Config,
    mut observer: Obs,
) -> Result<Solution<M::Input, M::Output, N>, Error<M::Error, P::Error, N>>
where
    M: Model,
    P: FixedPointProblem<N, Input = M::Input, Output = M::Output>,
    Obs: for<'a> Observer<Event<'a, M::Input, M::Output, N>, Action>,
{
    if x0.iter().any(|v| !v.is_finite()) {
        return Err(Error::NonFinite { iter: 0, x: x0 });
    }

    let mut x = x0;
    let mut iter = 0;

    loop {
        iter += 1;
        let eval = evaluate(model, problem, x)?;

        if eval.target.iter().any(|v| !v.is_finite()) {
            return Err(Error::NonFinite {
                iter,
                x: eval.target,
            });
        }

        let event = Event {
            iter,
            x: eval.x,
            target: eval.target,
            residual: eval.residual,
            snapshot: &eval.snapshot,
        };
        let action = observer.observe(&event);

        if eval.residual < config.tolerance() {
            return Ok(Solution::from_eval(eval, Status::Converged, iter));
        }

        if let Some(Action::StopEarly) = action {
            return Ok(Solution::from_eval(eval, Status::StoppedByObserver, iter));
        }

        if iter >= config.max_iters() {
            return Ok(Solution::from_eval(eval, Status::MaxIters, iter));
        }

        let relaxation = config.relaxation();
        for (xi, ti) in x.iter_mut().zip(eval.target) {
            *xi += relaxation * (ti - *xi);
        }
    }
}

/// Finds a fixed point without observer support.
///
/// This is a convenience wrapper around [`solve`] that uses a no-op observer.
///
/// # Errors
///
/// Returns an error if `x0` or an update is non-finite, or if the model or
/// problem fails during evaluation.
pub fn solve_unobserved<M, P, const N: usize>(
    model: &M,
    problem: &P,
    x0: [f64; N],
    config: &Config,
) -> Result<Solution<M::Input, M::Output, N>, Error<M::Error, P::Error, N>>
where
    M: Model,
    P: FixedPointProblem<N, Input = M::Input, Output = M::Output>,
{
    solve(model, problem, x0, config, ())
}
