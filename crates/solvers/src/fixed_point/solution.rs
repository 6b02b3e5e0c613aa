use bemrotor_core::Snapshot;

use super::Evaluation;

/// Indicates whether the solver converged or hit the iteration limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Converged according to the configured tolerance.
    Converged,

    /// Reached the iteration limit without converging.
    MaxIters,

    /// Stopped early due to an observer decision.
    StoppedByObserver,
}

/// The result of a fixed-point solve.
#[derive(Debug, Clone)]
pub struct Solution<I, O, const N: usize> {
    /// Final solver status.
    pub status: Status,

    /// The last evaluated point.
    pub x: [f64; N],

    /// The update `G(x)` at the last evaluated point.
    pub target: [f64; N],

    /// Residual at the last evaluated point.
    pub residual: f64,

    /// Snapshot at the last evaluated point.
    pub snapshot: Snapshot<I, O>,

    /// Number of evaluations performed.
    pub iters: usize,
}

impl<I, O, const N: usize> Solution<I, O, N> {
    pub(super) fn from_eval(eval: Evaluation<I, O, N>, status: Status, iters: usize) -> Self {
        Self {
            status,
            x: eval.x,
            target: eval.target,
            residual: eval.residual,
            snapshot: eval.snapshot,
            iters,
        }
    }

    /// Returns true if the solver met its tolerance.
    #[must_use]
    pub fn is_converged(&self) -> bool {
        self.status == Status::Converged
    }
}
