//! Reusable observers for bemrotor solvers.
//!
//! This crate provides [`Observer`] implementations and capability traits that
//! work across the solvers in `bemrotor-solvers`.
//!
//! # Modules
//!
//! - [`traits`] — Capability traits for cross-solver observers
//!   ([`HasResidual`], [`HasIteration`], [`CanStopEarly`])
//!
//! # Observers
//!
//! - [`TraceObserver`] — logs each iteration through `tracing`
//! - [`History`] — records the residual of each iteration
//!
//! [`Observer`]: bemrotor_core::Observer
//! [`HasResidual`]: traits::HasResidual
//! [`HasIteration`]: traits::HasIteration
//! [`CanStopEarly`]: traits::CanStopEarly

pub mod traits;

mod history;
mod trace;

pub use history::History;
pub use trace::TraceObserver;
