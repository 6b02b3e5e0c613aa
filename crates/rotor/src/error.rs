//! Error types shared across the crate.

use bemrotor_solvers::fixed_point;
use ninterp::error::{InterpolateError, ValidateError};
use thiserror::Error;

use crate::{InductionState, MomentumError, OperatingCondition};

/// Invalid configuration detected while building solver inputs.
///
/// Every constructor that validates data returns this error, so a value that
/// exists has already passed its checks.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigurationError {
    #[error("polar table needs at least two points, got {len}")]
    PolarTooShort { len: usize },

    #[error("polar columns differ in length: alpha {alpha}, cl {cl}, cd {cd}")]
    PolarLengthMismatch { alpha: usize, cl: usize, cd: usize },

    #[error("polar angles of attack must be finite and strictly increasing (index {index})")]
    PolarNotIncreasing { index: usize },

    #[error("polar coefficients must be finite (index {index})")]
    PolarNonFinite { index: usize },

    #[error("polar has no tables")]
    EmptyPolar,

    #[error("reynolds number {value} must be finite and positive")]
    InvalidReynolds { value: f64 },

    #[error("a polar with several tables needs a reynolds number on every table")]
    MissingReynolds,

    #[error("reynolds number {value} appears in more than one table")]
    DuplicateReynolds { value: f64 },

    #[error("interpolator rejected the data: {0}")]
    Interpolator(String),

    #[error("rotor geometry needs at least two annuli, got {count}")]
    TooFewAnnuli { count: usize },

    #[error("annulus {index}: {reason}")]
    InvalidAnnulus { index: usize, reason: &'static str },

    #[error("annulus {index} at mu = {mu} does not lie outboard of mu = {previous}")]
    NonIncreasingRadius { index: usize, mu: f64, previous: f64 },

    #[error("annuli {index} and {} are not contiguous (edge mismatch {mismatch:e})", .index + 1)]
    AnnulusEdges { index: usize, mismatch: f64 },

    #[error("annuli span [{inner}, {outer}], outside the rotor disc [0, 1]")]
    OutsideDisc { inner: f64, outer: f64 },

    #[error("a rotor needs at least one blade")]
    NoBlades,

    #[error("rotor radius must be finite and positive")]
    InvalidRadius,

    #[error("blade definition: {reason}")]
    InvalidBlade { reason: &'static str },

    #[error("tip-speed ratio {value} must be finite and positive")]
    InvalidTipSpeedRatio { value: f64 },

    #[error("{name} angle {value} rad is not allowed")]
    InvalidAngle { name: &'static str, value: f64 },

    #[error("inflow {name} must be finite and positive")]
    InvalidInflow { name: &'static str },

    #[error("momentum model: {reason}")]
    InvalidMomentum { reason: &'static str },

    #[error("annulus solver: {0}")]
    Solver(#[from] fixed_point::ConfigError),

    #[error("azimuthal quadrature needs at least one point")]
    Azimuth,

    #[error("warm start holds {found} annuli but the rotor has {expected}")]
    WarmStartLength { expected: usize, found: usize },
}

impl From<ValidateError> for ConfigurationError {
    fn from(error: ValidateError) -> Self {
        Self::Interpolator(error.to_string())
    }
}

/// Failure to obtain aerodynamic coefficients.
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("no polar registered for airfoil `{id}`")]
    UnknownAirfoil { id: String },

    #[error("angle of attack {alpha} rad outside the tabulated range [{min}, {max}]")]
    AngleOutOfRange { alpha: f64, min: f64, max: f64 },

    #[error("reynolds number {reynolds} outside the tabulated range [{min}, {max}]")]
    ReynoldsOutOfRange { reynolds: f64, min: f64, max: f64 },

    #[error("a reynolds number is needed to evaluate a polar with several tables")]
    MissingReynolds,

    #[error("angle of attack is not finite: {alpha}")]
    NonFiniteAngle { alpha: f64 },

    #[error(transparent)]
    Interpolate(#[from] InterpolateError),
}

/// The annulus iteration did not reach a converged induction state.
#[derive(Debug, Error)]
pub enum ConvergenceError {
    #[error("no convergence after {iters} iterations (residual {residual:e}, last state {state})")]
    MaxIterations {
        state: InductionState,
        iters: usize,
        residual: f64,
    },

    #[error("induction became non-finite at iteration {iter} ({state})")]
    NonFinite { state: InductionState, iter: usize },

    #[error("iteration stopped by an observer after {iters} iterations ({state})")]
    StoppedEarly { state: InductionState, iters: usize },

    #[error("momentum model failed at {state}")]
    Momentum {
        state: InductionState,
        #[source]
        source: MomentumError,
    },
}

/// Why a single annulus solve failed.
#[derive(Debug, Error)]
pub enum AnnulusError {
    #[error(transparent)]
    Lookup(#[from] LookupError),

    #[error(transparent)]
    Convergence(#[from] ConvergenceError),
}

/// Top-level error returned by rotor solves and sweeps.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error(transparent)]
    Lookup(#[from] LookupError),

    #[error("annulus {index} failed at {condition}")]
    Annulus {
        index: usize,
        condition: OperatingCondition,
        #[source]
        source: AnnulusError,
    },

    #[error("sweep point {index} failed")]
    Sweep {
        index: usize,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Returns the innermost [`ConvergenceError`], if this error wraps one.
    #[must_use]
    pub fn convergence(&self) -> Option<&ConvergenceError> {
        match self {
            Self::Annulus {
                source: AnnulusError::Convergence(error),
                ..
            } => Some(error),
            Self::Sweep { source, .. } => source.convergence(),
            _ => None,
        }
    }

    /// Returns the innermost [`LookupError`], if this error wraps one.
    #[must_use]
    pub fn lookup(&self) -> Option<&LookupError> {
        match self {
            Self::Lookup(error)
            | Self::Annulus {
                source: AnnulusError::Lookup(error),
                ..
            } => Some(error),
            Self::Sweep { source, .. } => source.lookup(),
            _ => None,
        }
    }
}
