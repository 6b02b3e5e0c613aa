use bemrotor_core::Observer;

use crate::traits::{HasIteration, HasResidual};

/// Logs every solver iteration at `TRACE` level.
///
/// The observer never steers the solver. Install a `tracing` subscriber with
/// the `bemrotor_observers` target enabled to see the output.
#[derive(Debug, Clone, Copy)]
pub struct TraceObserver<'a> {
    label: &'a str,
    index: Option<usize>,
}

impl<'a> TraceObserver<'a> {
    /// Creates an observer whose log lines carry `label`.
    #[must_use]
    pub fn new(label: &'a str) -> Self {
        Self { label, index: None }
    }

    /// Attaches an index (for example an annulus number) to each log line.
    #[must_use]
    pub fn with_index(mut self, index: usize) -> Self {
        self.index = Some(index);
        self
    }
}

impl<E, A> Observer<E, A> for TraceObserver<'_>
where
    E: HasResidual + HasIteration,
{
    fn observe(&mut self, event: &E) -> Option<A> {
        tracing::trace!(
            label = self.label,
            index = self.index,
            iter = event.iteration(),
            residual = event.residual(),
            "solver iteration"
        );
        None
    }
}
