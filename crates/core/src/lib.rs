//! Problem and model traits shared by the bemrotor solvers.
//!
//! A numerical solve is split into three parts:
//!
//! - a [`Model`] evaluates physics for a typed input, for example the loads on
//!   a blade element at a trial induction state;
//! - a problem trait ([`FixedPointProblem`] or [`EquationProblem`]) maps the
//!   solver's `f64` unknowns to that input and turns the model output back
//!   into an update or residual;
//! - an [`Observer`] watches each iteration and may stop it.
//!
//! Each evaluated pair is kept as a [`Snapshot`], so a solver result always
//! carries the model output that belongs to the reported unknowns.

mod model;
mod observer;
mod problems;

pub use model::{Model, Snapshot};
pub use observer::Observer;
pub use problems::{EquationProblem, FixedPointProblem};
