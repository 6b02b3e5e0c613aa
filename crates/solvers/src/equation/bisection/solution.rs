use bemrotor_core::Snapshot;

use crate::equation::Evaluation;

/// How a bisection solve ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// The residual or the bracket width met its tolerance.
    Converged,
    /// The iteration limit was reached first.
    MaxIters,
    /// An observer returned [`Action::StopEarly`](super::Action::StopEarly).
    StoppedByObserver,
}

/// Best root estimate found by bisection.
///
/// `x`, `residual` and `snapshot` always come from the same evaluation, the
/// one with the smallest residual seen (or the converging midpoint).
#[derive(Debug, Clone)]
pub struct Solution<I, O> {
    pub status: Status,
    pub x: f64,
    pub residual: f64,
    pub snapshot: Snapshot<I, O>,
    pub iters: usize,
}

impl<I, O> Solution<I, O> {
    pub(super) fn from_eval(eval: Evaluation<I, O, 1>, status: Status, iters: usize) -> Self {
        let [x] = eval.x;
        let [residual] = eval.residuals;
        Self {
            status,
            x,
            residual,
            snapshot: eval.snapshot,
            iters,
        }
    }
}
