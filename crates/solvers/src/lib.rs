//! Numerical solvers for bemrotor.
//!
//! - [`fixed_point`] — relaxed fixed-point iteration for [`FixedPointProblem`]s
//! - [`equation`] — root finding for [`EquationProblem`]s
//!
//! Every solver reports its progress to an [`Observer`] and returns a
//! solution with an explicit status; reaching the iteration limit is reported
//! as [`fixed_point::Status::MaxIters`], never as convergence.
//!
//! [`FixedPointProblem`]: bemrotor_core::FixedPointProblem
//! [`EquationProblem`]: bemrotor_core::EquationProblem
//! [`Observer`]: bemrotor_core::Observer

pub mod equation;
pub mod fixed_point;
