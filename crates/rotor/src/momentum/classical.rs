use std::convert::Infallible;

use bemrotor_core::{EquationProblem, Model};
use bemrotor_solvers::equation::bisection;
use serde::{Deserialize, Serialize};

use crate::ConfigurationError;

use super::{MomentumError, MomentumModel};

/// Default normalized thrust above which the high-thrust correction applies.
pub const DEFAULT_CT_CRIT: f64 = 0.96;

/// Largest mismatch allowed between a correction polynomial and the classical
/// relation at the threshold.
const CONTINUITY_TOLERANCE: f64 = 1e-6;

/// Number of doublings tried when bracketing a polynomial root from above.
const MAX_BRACKET_DOUBLINGS: usize = 32;

/// Empirical relation used above the classical momentum threshold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HighThrustCorrection {
    /// Quadratic matching the classical relation in value and slope at the
    /// threshold and reaching `C_T = 2` at `a = 1`.
    Buhl,
    /// `C_T(a) = Σ c_k a^k` with coefficients in ascending powers.
    Polynomial(Vec<f64>),
}

impl HighThrustCorrection {
    /// Glauert's empirical curve `C_T = 4a - 5a² + 3a³`, which meets the
    /// classical relation at `C_T = 8/9`.
    #[must_use]
    pub fn glauert() -> Self {
        Self::Polynomial(vec![0.0, 4.0, -5.0, 3.0])
    }
}

/// One-dimensional momentum theory with a high-thrust correction.
///
/// The thrust coefficient is first normalized by `cos γ`. Up to `ct_crit`
/// the induction is the realizable root of `C_T = 4a(1 - a)`:
///
/// ```text
/// a = (1 - √(1 - C_T)) / 2
/// ```
///
/// Above it the configured [`HighThrustCorrection`] is inverted instead.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassicalMomentum {
    ct_crit: f64,
    a_crit: f64,
    branch: Branch,
}

#[derive(Debug, Clone, PartialEq)]
enum Branch {
    /// `C_T = ct_crit + slope·d + curvature·d²` with `d = a - a_crit`.
    Quadratic { slope: f64, curvature: f64 },
    Polynomial(Polynomial),
}

impl Default for ClassicalMomentum {
    fn default() -> Self {
        let a_crit = classical_induction(DEFAULT_CT_CRIT);
        let (slope, curvature) = buhl_coefficients(DEFAULT_CT_CRIT, a_crit);
        Self {
            ct_crit: DEFAULT_CT_CRIT,
            a_crit,
            branch: Branch::Quadratic { slope, curvature },
        }
    }
}

impl ClassicalMomentum {
    /// Creates a model switching to `correction` above `ct_crit`.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigurationError`] if `ct_crit` is outside `(0, 1)`, if
    /// a Buhl quadratic through `C_T = 2` cannot be tangent to the classical
    /// relation at `ct_crit`, or if a polynomial is discontinuous at the
    /// threshold or decreases above it.
    pub fn new(ct_crit: f64, correction: HighThrustCorrection) -> Result<Self, ConfigurationError> {
        if !(ct_crit > 0.0 && ct_crit < 1.0) {
            return Err(invalid("threshold must lie in (0, 1)"));
        }
        let a_crit = classical_induction(ct_crit);

        let branch = match correction {
            HighThrustCorrection::Buhl => {
                let (slope, curvature) = buhl_coefficients(ct_crit, a_crit);
                if curvature < -f64::EPSILON {
                    return Err(invalid(
                        "threshold is too low for a Buhl correction reaching C_T = 2 at a = 1",
                    ));
                }
                Branch::Quadratic {
                    slope,
                    curvature: curvature.max(0.0),
                }
            }
            HighThrustCorrection::Polynomial(coefficients) => {
                let polynomial = Polynomial::new(coefficients)?;
                if (polynomial.value(a_crit) - ct_crit).abs() > CONTINUITY_TOLERANCE {
                    return Err(invalid(
                        "correction polynomial does not meet the classical relation at the threshold",
                    ));
                }
                let increasing = (0..=100)
                    .map(|i| a_crit + (1.0 - a_crit) * f64::from(i) / 100.0)
                    .all(|a| polynomial.slope(a) > 0.0);
                if !increasing {
                    return Err(invalid(
                        "correction polynomial must increase with induction above the threshold",
                    ));
                }
                Branch::Polynomial(polynomial)
            }
        };

        Ok(Self {
            ct_crit,
            a_crit,
            branch,
        })
    }

    /// Glauert's correction with its natural threshold `C_T = 8/9`.
    #[must_use]
    pub fn glauert() -> Self {
        let ct_crit = 8.0 / 9.0;
        Self {
            ct_crit,
            a_crit: classical_induction(ct_crit),
            branch: Branch::Polynomial(Polynomial(vec![0.0, 4.0, -5.0, 3.0])),
        }
    }

    #[must_use]
    pub fn ct_crit(&self) -> f64 {
        self.ct_crit
    }

    /// Induction at the threshold, `(1 - √(1 - ct_crit)) / 2`.
    #[must_use]
    pub fn a_crit(&self) -> f64 {
        self.a_crit
    }

    /// Evaluates the forward relation `C_T(a)` at `yaw` radians.
    #[must_use]
    pub fn thrust(&self, axial: f64, yaw: f64) -> f64 {
        let normalized = if axial <= self.a_crit {
            4.0 * axial * (1.0 - axial)
        } else {
            match &self.branch {
                Branch::Quadratic { slope, curvature } => {
                    let d = axial - self.a_crit;
                    self.ct_crit + slope * d + curvature * d * d
                }
                Branch::Polynomial(polynomial) => polynomial.value(axial),
            }
        };
        normalized * yaw.cos()
    }

    fn invert_polynomial(&self, polynomial: &Polynomial, ct: f64) -> Result<f64, MomentumError> {
        let target = ThrustTarget(ct);
        let out_of_domain = || MomentumError::OutOfDomain { ct, yaw: 0.0 };

        let mut upper = 1.0_f64.max(2.0 * self.a_crit);
        let mut doublings = 0;
        while polynomial.value(upper) < ct {
            if doublings == MAX_BRACKET_DOUBLINGS {
                return Err(out_of_domain());
            }
            upper *= 2.0;
            doublings += 1;
        }

        let config = bisection::Config::default();
        let solution =
            bisection::solve_unobserved(polynomial, &target, [self.a_crit, upper], &config)
                .map_err(|_| out_of_domain())?;

        match solution.status {
            bisection::Status::Converged => Ok(solution.x),
            _ => Err(MomentumError::NoConvergence {
                ct,
                iters: solution.iters,
            }),
        }
    }
}

impl MomentumModel for ClassicalMomentum {
    fn induction(&self, ct: f64, yaw: f64) -> Result<f64, MomentumError> {
        let cos_yaw = yaw.cos();
        if !ct.is_finite() || !yaw.is_finite() || cos_yaw <= 0.0 {
            return Err(MomentumError::OutOfDomain { ct, yaw });
        }

        let normalized = ct / cos_yaw;
        if normalized <= self.ct_crit {
            return Ok(classical_induction(normalized));
        }

        match &self.branch {
            Branch::Quadratic { slope, curvature } => {
                let excess = normalized - self.ct_crit;
                let d = 2.0 * excess / (slope + (slope * slope + 4.0 * curvature * excess).sqrt());
                Ok(self.a_crit + d)
            }
            Branch::Polynomial(polynomial) => self
                .invert_polynomial(polynomial, normalized)
                .map_err(|error| match error {
                    MomentumError::OutOfDomain { .. } => MomentumError::OutOfDomain { ct, yaw },
                    other => other,
                }),
        }
    }
}

/// Realizable root of `C_T = 4a(1 - a)` for `C_T ≤ 1`, written to stay
/// accurate near zero.
pub(super) fn classical_induction(ct: f64) -> f64 {
    0.5 * ct / (1.0 + (1.0 - ct).sqrt())
}

/// Slope and curvature of the quadratic tangent to `4a(1 - a)` at `a_crit`
/// that passes through `C_T = 2` at `a = 1`.
fn buhl_coefficients(ct_crit: f64, a_crit: f64) -> (f64, f64) {
    let slope = 4.0 * (1.0 - 2.0 * a_crit);
    let span = 1.0 - a_crit;
    let curvature = (2.0 - ct_crit - slope * span) / (span * span);
    (slope, curvature)
}

fn invalid(reason: &'static str) -> ConfigurationError {
    ConfigurationError::InvalidMomentum { reason }
}

/// Polynomial in ascending powers, evaluated as a model of `a ↦ C_T`.
#[derive(Debug, Clone, PartialEq)]
struct Polynomial(Vec<f64>);

impl Polynomial {
    fn new(coefficients: Vec<f64>) -> Result<Self, ConfigurationError> {
        if coefficients.is_empty() || coefficients.iter().any(|c| !c.is_finite()) {
            return Err(invalid("correction polynomial needs finite coefficients"));
        }
        Ok(Self(coefficients))
    }

    fn value(&self, x: f64) -> f64 {
        self.0.iter().rev().fold(0.0, |acc, c| acc * x + c)
    }

    fn slope(&self, x: f64) -> f64 {
        self.0
            .iter()
            .enumerate()
            .skip(1)
            .rev()
            .fold(0.0, |acc, (k, c)| acc * x + k as f64 * c)
    }
}

impl Model for Polynomial {
    type Input = f64;
    type Output = f64;
    type Error = Infallible;

    fn call(&self, input: &f64) -> Result<f64, Infallible> {
        Ok(self.value(*input))
    }
}

/// Residual `C_T(a) - target` for bisection.
struct ThrustTarget(f64);

impl EquationProblem<1> for ThrustTarget {
    type Input = f64;
    type Output = f64;
    type Error = Infallible;

    fn input(&self, x: &[f64; 1]) -> Result<f64, Infallible> {
        Ok(x[0])
    }

    fn residuals(&self, _input: &f64, output: &f64) -> Result<[f64; 1], Infallible> {
        Ok([output - self.0])
    }
}
