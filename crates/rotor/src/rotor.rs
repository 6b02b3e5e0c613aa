//! Whole-rotor solves and operating-condition sweeps.
//!
//! Annuli are solved independently: under yaw the coupling is an azimuthal
//! average inside each annulus, never across annuli. With the `rayon`
//! feature enabled the annuli of a solve, and the conditions of a cold-start
//! sweep, run in parallel. Results do not depend on the execution order.

mod options;
mod quadrature;
mod solution;
mod sweep;

pub use options::{OnError, RotorOptions, SweepOptions};
pub use quadrature::Quadrature;
pub use solution::{AnnulusResult, RotorSolution};
pub use sweep::{Sweep, SweepPoint, pitch_conditions, tsr_conditions};

use std::sync::Arc;

use bemrotor_observers::TraceObserver;
use ndarray::Array1;

use crate::{
    AirfoilLibrary, AnnulusError, AnnulusSolution, AnnulusSolver, BladeElement,
    ClassicalMomentum, ConfigurationError, Error, InductionState, MomentumModel,
    OperatingCondition, RotorGeometry,
};

/// Solves a fixed rotor at any number of operating conditions.
///
/// Geometry and polars are held behind [`Arc`] so several solvers, for
/// example with different momentum models, can share them.
#[derive(Debug)]
pub struct RotorSolver<M = ClassicalMomentum> {
    geometry: Arc<RotorGeometry>,
    library: Arc<AirfoilLibrary>,
    momentum: M,
    options: RotorOptions,
    weights: Array1<f64>,
}

impl<M: MomentumModel> RotorSolver<M> {
    /// Creates a solver after checking that every annulus airfoil has a
    /// polar.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Lookup`] naming the first unregistered airfoil.
    pub fn new(
        geometry: impl Into<Arc<RotorGeometry>>,
        library: impl Into<Arc<AirfoilLibrary>>,
        momentum: M,
        options: RotorOptions,
    ) -> Result<Self, Error> {
        let geometry = geometry.into();
        let library = library.into();

        for annulus in geometry.annuli() {
            library.get(&annulus.airfoil)?;
        }

        let weights = options.quadrature.weights(&geometry);
        Ok(Self {
            geometry,
            library,
            momentum,
            options,
            weights,
        })
    }

    #[must_use]
    pub fn geometry(&self) -> &RotorGeometry {
        &self.geometry
    }

    #[must_use]
    pub fn library(&self) -> &AirfoilLibrary {
        &self.library
    }

    #[must_use]
    pub fn momentum(&self) -> &M {
        &self.momentum
    }

    #[must_use]
    pub fn options(&self) -> &RotorOptions {
        &self.options
    }

    /// Solves the rotor from zero induction.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Annulus`] for the lowest-indexed annulus that fails.
    pub fn solve(&self, condition: &OperatingCondition) -> Result<RotorSolution, Error> {
        self.solve_from(condition, None)
    }

    /// Solves the rotor, starting each annulus from `warm_start` if given.
    ///
    /// A warm start changes the iteration path but not the converged result
    /// beyond the solver tolerance.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] if `warm_start` has a different number
    /// of annuli, and [`Error::Annulus`] for the lowest-indexed annulus that
    /// fails.
    pub fn solve_from(
        &self,
        condition: &OperatingCondition,
        warm_start: Option<&RotorSolution>,
    ) -> Result<RotorSolution, Error> {
        let count = self.geometry.len();
        let initial: Vec<InductionState> = match warm_start {
            Some(previous) if previous.annuli.len() != count => {
                return Err(ConfigurationError::WarmStartLength {
                    expected: count,
                    found: previous.annuli.len(),
                }
                .into());
            }
            Some(previous) => previous.states().collect(),
            None => vec![InductionState::default(); count],
        };

        let solved = self.solve_annuli(condition, &initial);

        let annuli = solved
            .into_iter()
            .zip(self.geometry.annuli())
            .enumerate()
            .map(|(index, (outcome, annulus))| {
                outcome
                    .map(|solution| AnnulusResult::new(annulus.mu, annulus.width, solution))
                    .map_err(|source| Error::Annulus {
                        index,
                        condition: *condition,
                        source,
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let solution = RotorSolution::aggregate(*condition, annuli, &self.weights);
        tracing::debug!(
            %condition,
            ct = solution.ct,
            cp = solution.cp,
            iters = solution.total_iters(),
            "rotor solved"
        );
        Ok(solution)
    }

    #[cfg(not(feature = "rayon"))]
    fn solve_annuli(
        &self,
        condition: &OperatingCondition,
        initial: &[InductionState],
    ) -> Vec<Result<AnnulusSolution, AnnulusError>> {
        let mut outcomes = Vec::with_capacity(initial.len());
        for (index, init) in initial.iter().enumerate() {
            let outcome = self.solve_annulus(index, condition, *init);
            let failed = outcome.is_err();
            outcomes.push(outcome);
            if failed {
                break;
            }
        }
        outcomes
    }

    #[cfg(feature = "rayon")]
    fn solve_annuli(
        &self,
        condition: &OperatingCondition,
        initial: &[InductionState],
    ) -> Vec<Result<AnnulusSolution, AnnulusError>> {
        use rayon::prelude::*;

        initial
            .par_iter()
            .enumerate()
            .map(|(index, init)| self.solve_annulus(index, condition, *init))
            .collect()
    }

    fn solve_annulus(
        &self,
        index: usize,
        condition: &OperatingCondition,
        init: InductionState,
    ) -> Result<AnnulusSolution, AnnulusError> {
        let annulus = &self.geometry.annuli()[index];
        let polar = self.library.get(&annulus.airfoil)?;
        let element = BladeElement::new(
            annulus,
            polar,
            self.geometry.blades(),
            self.geometry.radius(),
        );

        AnnulusSolver::new(&self.momentum, self.options.annulus)
            .with_tangential(self.options.tangential)
            .with_tip_loss(self.options.tip_loss)
            .solve_observed(
                &element,
                condition,
                init,
                TraceObserver::new("annulus").with_index(index),
            )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::f64::consts::PI;

    use approx::assert_relative_eq;
    use uom::si::{
        angle::radian,
        f64::{Angle, Length},
        length::meter,
    };

    use crate::{
        Annulus, AnnulusError, Heck, LookupError, Polar, PolarTable, polar::Extrapolate,
    };

    fn polar(range: f64, lift_slope: f64) -> Polar {
        Polar::single(
            PolarTable::new(
                vec![-range, range],
                vec![-lift_slope * range, lift_slope * range],
                vec![0.01, 0.01],
                Extrapolate::Error,
            )
            .unwrap(),
        )
    }

    fn library() -> AirfoilLibrary {
        [
            ("wide", polar(PI, 2.0 * PI)),
            ("narrow", polar(0.3, 2.0 * PI)),
            ("zero", polar(PI, 0.0)),
        ]
        .into_iter()
        .collect()
    }

    fn geometry(hub: f64, airfoils: &[&str]) -> RotorGeometry {
        let width = (1.0 - hub) / airfoils.len() as f64;
        let annuli = airfoils
            .iter()
            .enumerate()
            .map(|(i, airfoil)| Annulus {
                mu: hub + (i as f64 + 0.5) * width,
                width,
                chord: 0.04,
                twist: 0.0,
                airfoil: (*airfoil).into(),
            })
            .collect();
        RotorGeometry::new(Length::new::<meter>(40.0), 3, annuli).unwrap()
    }

    fn solver(geometry: RotorGeometry) -> RotorSolver {
        RotorSolver::new(
            geometry,
            library(),
            ClassicalMomentum::default(),
            RotorOptions::default(),
        )
        .unwrap()
    }

    fn condition(tsr: f64) -> OperatingCondition {
        let zero = Angle::new::<radian>(0.0);
        OperatingCondition::new(tsr, zero, zero).unwrap()
    }

    #[test]
    fn unknown_airfoils_fail_up_front() {
        let result = RotorSolver::new(
            geometry(0.2, &["wide", "naca-4412"]),
            library(),
            ClassicalMomentum::default(),
            RotorOptions::default(),
        );
        assert!(matches!(
            result,
            Err(Error::Lookup(LookupError::UnknownAirfoil { id })) if id == "naca-4412"
        ));
    }

    #[test]
    fn aggregates_coefficients() {
        let solver = solver(geometry(0.5, &["narrow"; 6]));
        let solution = solver.solve(&condition(7.0)).unwrap();

        assert_eq!(solution.annuli.len(), 6);
        assert!(solution.ct > 0.0 && solution.cp > 0.0);
        assert_relative_eq!(solution.cq, solution.cp / 7.0);
        assert!(solution.a > 0.0 && solution.a < 0.5);
        assert_eq!(solution.mu().len(), 6);
    }

    #[test]
    fn effective_wind_speed_and_local_thrust() {
        let solver = solver(geometry(0.5, &["narrow"; 6]));
        let yaw = 0.3_f64;
        let condition = OperatingCondition::new(
            7.0,
            Angle::new::<radian>(0.0),
            Angle::new::<radian>(yaw),
        )
        .unwrap();
        let solution = solver.solve(&condition).unwrap();

        let speed = (1.0 - solution.a) * yaw.cos();
        assert_relative_eq!(solution.effective_wind_speed(), speed);
        assert_relative_eq!(solution.ctprime(), solution.ct / (speed * speed));

        let local = solution.ctprime_local();
        let axial = solution.axial_induction();
        let ct_local = solution.ct_local();
        assert_eq!(local.len(), 6);
        for i in 0..6 {
            let disc = (1.0 - axial[i]) * yaw.cos();
            assert_relative_eq!(local[i], ct_local[i] / (disc * disc));
        }
    }

    #[test]
    fn heck_momentum_matches_classical_without_yaw() {
        let classical = solver(geometry(0.5, &["narrow"; 6]));
        let heck = RotorSolver::new(
            geometry(0.5, &["narrow"; 6]),
            library(),
            Heck::default(),
            RotorOptions::default(),
        )
        .unwrap();

        let classical = classical.solve(&condition(7.0)).unwrap();
        let heck = heck.solve(&condition(7.0)).unwrap();

        assert_relative_eq!(heck.a, classical.a, epsilon = 1e-5);
        assert_relative_eq!(heck.cp, classical.cp, max_relative = 1e-4);
    }

    #[test]
    fn reports_lowest_failing_annulus() {
        let solver = solver(geometry(0.5, &["zero", "narrow", "narrow"]));
        let error = solver.solve(&condition(1.0)).unwrap_err();

        match error {
            Error::Annulus {
                index,
                condition,
                source: AnnulusError::Lookup(LookupError::AngleOutOfRange { .. }),
            } => {
                assert_eq!(index, 1);
                assert_relative_eq!(condition.tsr(), 1.0);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn warm_start_must_match_geometry() {
        let small = solver(geometry(0.5, &["narrow"; 3]));
        let large = solver(geometry(0.5, &["narrow"; 6]));
        let warm = small.solve(&condition(7.0)).unwrap();

        let result = large.solve_from(&condition(7.0), Some(&warm));
        assert!(matches!(
            result,
            Err(Error::Configuration(ConfigurationError::WarmStartLength {
                expected: 6,
                found: 3
            }))
        ));
    }

    #[test]
    fn sweep_error_policies() {
        let solver = solver(geometry(0.5, &["narrow"; 6]));
        let conditions = tsr_conditions([7.0, 1.0, 8.0], Angle::new::<radian>(0.0), Angle::new::<radian>(0.0))
            .unwrap();

        let aborted = solver.sweep(&conditions, &SweepOptions::default());
        assert!(matches!(aborted, Err(Error::Sweep { index: 1, .. })));

        let options = SweepOptions {
            on_error: OnError::Continue,
            ..SweepOptions::default()
        };
        let sweep = solver.sweep(&conditions, &options).unwrap();

        assert_eq!(sweep.len(), 3);
        assert!(!sweep.is_complete());
        let ct = sweep.ct();
        assert!(ct[0].is_finite() && ct[1].is_nan() && ct[2].is_finite());
        assert_eq!(sweep.failures().map(|(i, _)| i).collect::<Vec<_>>(), [1]);
        assert!(sweep.failures().all(|(_, error)| error.lookup().is_some()));
    }
}
