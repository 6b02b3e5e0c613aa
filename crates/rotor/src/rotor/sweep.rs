use ndarray::Array1;
use uom::si::f64::Angle;

use crate::{ConfigurationError, Error, MomentumModel, OperatingCondition};

use super::{OnError, RotorSolution, RotorSolver, SweepOptions};

/// Outcome of one sweep condition.
#[derive(Debug)]
pub struct SweepPoint {
    pub condition: OperatingCondition,
    pub outcome: Result<RotorSolution, Error>,
}

/// Results of a sweep, in the order of the input conditions.
#[derive(Debug)]
pub struct Sweep {
    points: Vec<SweepPoint>,
}

impl Sweep {
    #[must_use]
    pub fn points(&self) -> &[SweepPoint] {
        &self.points
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Returns true if every condition converged.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.points.iter().all(|point| point.outcome.is_ok())
    }

    /// Iterates over `(index, solution)` for converged conditions.
    pub fn solutions(&self) -> impl Iterator<Item = (usize, &RotorSolution)> {
        self.points
            .iter()
            .enumerate()
            .filter_map(|(i, point)| point.outcome.as_ref().ok().map(|s| (i, s)))
    }

    /// Iterates over `(index, error)` for failed conditions.
    pub fn failures(&self) -> impl Iterator<Item = (usize, &Error)> {
        self.points
            .iter()
            .enumerate()
            .filter_map(|(i, point)| point.outcome.as_ref().err().map(|e| (i, e)))
    }

    fn column(&self, f: impl Fn(&RotorSolution) -> f64) -> Array1<f64> {
        self.points
            .iter()
            .map(|point| point.outcome.as_ref().map_or(f64::NAN, &f))
            .collect()
    }

    #[must_use]
    pub fn tsr(&self) -> Array1<f64> {
        self.points.iter().map(|point| point.condition.tsr()).collect()
    }

    /// Thrust coefficients, NaN where a condition failed.
    #[must_use]
    pub fn ct(&self) -> Array1<f64> {
        self.column(|s| s.ct)
    }

    /// Power coefficients, NaN where a condition failed.
    #[must_use]
    pub fn cp(&self) -> Array1<f64> {
        self.column(|s| s.cp)
    }

    /// Torque coefficients, NaN where a condition failed.
    #[must_use]
    pub fn cq(&self) -> Array1<f64> {
        self.column(|s| s.cq)
    }

    /// Mean axial induction, NaN where a condition failed.
    #[must_use]
    pub fn a(&self) -> Array1<f64> {
        self.column(|s| s.a)
    }
}

impl<M: MomentumModel> RotorSolver<M> {
    /// Solves the rotor at each condition in turn.
    ///
    /// With `warm_start`, each solve starts from the most recent converged
    /// solution. Under [`OnError::Continue`] failures are logged and recorded
    /// in the returned [`Sweep`].
    ///
    /// # Errors
    ///
    /// Under [`OnError::Abort`], returns [`Error::Sweep`] for the first
    /// condition that fails.
    pub fn sweep(
        &self,
        conditions: &[OperatingCondition],
        options: &SweepOptions,
    ) -> Result<Sweep, Error> {
        let outcomes = if options.warm_start {
            self.sweep_warm(conditions, options.on_error)
        } else {
            self.sweep_cold(conditions, options.on_error)
        };

        let mut points = Vec::with_capacity(outcomes.len());
        for (index, (condition, outcome)) in conditions.iter().zip(outcomes).enumerate() {
            let outcome = match (outcome, options.on_error) {
                (Err(error), OnError::Abort) => {
                    return Err(Error::Sweep {
                        index,
                        source: Box::new(error),
                    });
                }
                (Err(error), OnError::Continue) => {
                    tracing::warn!(index, %condition, %error, "sweep condition failed");
                    Err(error)
                }
                (solved, _) => solved,
            };
            points.push(SweepPoint {
                condition: *condition,
                outcome,
            });
        }

        Ok(Sweep { points })
    }

    fn sweep_warm(
        &self,
        conditions: &[OperatingCondition],
        on_error: OnError,
    ) -> Vec<Result<RotorSolution, Error>> {
        let mut outcomes: Vec<Result<RotorSolution, Error>> = Vec::with_capacity(conditions.len());
        let mut last_converged: Option<usize> = None;

        for condition in conditions {
            let warm = last_converged.and_then(|i| outcomes[i].as_ref().ok());
            let outcome = self.solve_from(condition, warm);
            let failed = outcome.is_err();
            if !failed {
                last_converged = Some(outcomes.len());
            }
            outcomes.push(outcome);
            if failed && on_error == OnError::Abort {
                break;
            }
        }
        outcomes
    }

    #[cfg(not(feature = "rayon"))]
    fn sweep_cold(
        &self,
        conditions: &[OperatingCondition],
        on_error: OnError,
    ) -> Vec<Result<RotorSolution, Error>> {
        let mut outcomes = Vec::with_capacity(conditions.len());
        for condition in conditions {
            let outcome = self.solve(condition);
            let failed = outcome.is_err();
            outcomes.push(outcome);
            if failed && on_error == OnError::Abort {
                break;
            }
        }
        outcomes
    }

    #[cfg(feature = "rayon")]
    fn sweep_cold(
        &self,
        conditions: &[OperatingCondition],
        _on_error: OnError,
    ) -> Vec<Result<RotorSolution, Error>> {
        use rayon::prelude::*;

        conditions
            .par_iter()
            .map(|condition| self.solve(condition))
            .collect()
    }
}

/// Conditions at each tip-speed ratio with fixed pitch and yaw.
///
/// # Errors
///
/// Returns the first invalid condition.
pub fn tsr_conditions(
    tsr: impl IntoIterator<Item = f64>,
    pitch: Angle,
    yaw: Angle,
) -> Result<Vec<OperatingCondition>, ConfigurationError> {
    tsr.into_iter()
        .map(|tsr| OperatingCondition::new(tsr, pitch, yaw))
        .collect()
}

/// Conditions at each pitch angle with fixed tip-speed ratio and yaw.
///
/// # Errors
///
/// Returns the first invalid condition.
pub fn pitch_conditions(
    pitch: impl IntoIterator<Item = Angle>,
    tsr: f64,
    yaw: Angle,
) -> Result<Vec<OperatingCondition>, ConfigurationError> {
    pitch
        .into_iter()
        .map(|pitch| OperatingCondition::new(tsr, pitch, yaw))
        .collect()
}
