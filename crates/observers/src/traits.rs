//! What an observer may read from an event, and ask of a solver.
//!
//! Fixed-point and bisection events differ in shape. Writing an observer
//! against these traits lets the same observer watch an annulus induction
//! solve and a momentum inversion.
//!
//! # Example
//!
//! Give up on an iteration once it has used a budget of steps without the
//! residual falling below a loose threshold:
//!
//! ```rust
//! use bemrotor_core::Observer;
//! use bemrotor_observers::traits::{CanStopEarly, HasIteration, HasResidual};
//!
//! struct Budget {
//!     steps: usize,
//!     loose: f64,
//! }
//!
//! impl<E, A> Observer<E, A> for Budget
//! where
//!     E: HasIteration + HasResidual,
//!     A: CanStopEarly,
//! {
//!     fn observe(&mut self, event: &E) -> Option<A> {
//!         let stalled = event.iteration() >= self.steps && event.residual().abs() > self.loose;
//!         stalled.then(A::stop_early)
//!     }
//! }
//! ```

use bemrotor_solvers::{equation::bisection, fixed_point};

/// Event with a scalar residual. For fixed-point events this is the largest
/// update component.
pub trait HasResidual {
    fn residual(&self) -> f64;
}

/// Event numbered from 1 within its solve.
pub trait HasIteration {
    fn iteration(&self) -> usize;
}

/// Action set that includes stopping early.
pub trait CanStopEarly {
    fn stop_early() -> Self;
}

impl<I, O, const N: usize> HasResidual for fixed_point::Event<'_, I, O, N> {
    fn residual(&self) -> f64 {
        self.residual
    }
}

impl<I, O, const N: usize> HasIteration for fixed_point::Event<'_, I, O, N> {
    fn iteration(&self) -> usize {
        self.iter
    }
}

impl<I, O> HasResidual for bisection::Event<'_, I, O> {
    fn residual(&self) -> f64 {
        let [residual] = self.eval.residuals;
        residual
    }
}

impl<I, O> HasIteration for bisection::Event<'_, I, O> {
    fn iteration(&self) -> usize {
        self.iter
    }
}

impl CanStopEarly for fixed_point::Action {
    fn stop_early() -> Self {
        Self::StopEarly
    }
}

impl CanStopEarly for bisection::Action {
    fn stop_early() -> Self {
        Self::StopEarly
    }
}
