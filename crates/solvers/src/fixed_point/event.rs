use bemrotor_core::Snapshot;

/// Iteration event emitted by the fixed-point solver.
#[derive(Debug)]
pub struct Event<'a, I, O, const N: usize> {
    /// Iteration counter (1-based).
    pub iter: usize,

    /// The evaluated point.
    pub x: [f64; N],

    /// The updated estimate `G(x)` before relaxation.
    pub target: [f64; N],

    /// Largest absolute component of `G(x) - x`.
    pub residual: f64,

    /// Model input and output at `x`.
    pub snapshot: &'a Snapshot<I, O>,
}
