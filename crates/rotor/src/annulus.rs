//! Induction iteration for a single annulus.
//!
//! The state `x = [a, a']` is iterated with the relaxed fixed-point solver:
//! the blade element turns `x` into azimuth-averaged loads, the momentum
//! model turns the loads into a new estimate, and the solver blends the two
//! with the configured relaxation. The iteration is deterministic for a given
//! starting state.

mod config;
mod problem;
mod state;

pub use config::AnnulusConfig;
pub use state::InductionState;

use bemrotor_core::Observer;
use bemrotor_observers::TraceObserver;
use bemrotor_solvers::fixed_point::{self, Action, Event, Status};

use crate::{
    AnnulusError, AnnulusLoads, BladeElement, ConvergenceError, MomentumModel, OperatingCondition,
    TangentialInduction, TipLoss,
};

use problem::InductionProblem;

/// Converged state of one annulus.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnnulusSolution {
    pub state: InductionState,
    /// Loads evaluated at `state`.
    pub loads: AnnulusLoads,
    /// Tip-loss factor at `state`, one when tip loss is disabled.
    pub tip_loss: f64,
    pub iters: usize,
    pub residual: f64,
}

impl AnnulusSolution {
    #[must_use]
    pub fn ct(&self) -> f64 {
        self.loads.ct_local
    }

    #[must_use]
    pub fn cp(&self) -> f64 {
        self.loads.cp_local
    }
}

/// Observer events emitted while solving an annulus.
pub type AnnulusEvent<'a> = Event<'a, InductionState, AnnulusLoads, 2>;

/// Solves annuli against one momentum model and set of options.
#[derive(Debug, Clone, Copy)]
pub struct AnnulusSolver<'a, M: ?Sized> {
    momentum: &'a M,
    tangential: TangentialInduction,
    tip_loss: TipLoss,
    config: AnnulusConfig,
}

impl<'a, M: MomentumModel + ?Sized> AnnulusSolver<'a, M> {
    /// Creates a solver without tangential induction or tip loss.
    #[must_use]
    pub fn new(momentum: &'a M, config: AnnulusConfig) -> Self {
        Self {
            momentum,
            tangential: TangentialInduction::None,
            tip_loss: TipLoss::None,
            config,
        }
    }

    #[must_use]
    pub fn with_tangential(mut self, tangential: TangentialInduction) -> Self {
        self.tangential = tangential;
        self
    }

    #[must_use]
    pub fn with_tip_loss(mut self, tip_loss: TipLoss) -> Self {
        self.tip_loss = tip_loss;
        self
    }

    #[must_use]
    pub fn config(&self) -> &AnnulusConfig {
        &self.config
    }

    /// Solves the annulus starting from `init`, tracing each iteration.
    ///
    /// # Errors
    ///
    /// Returns [`AnnulusError::Lookup`] if the polar fails and
    /// [`AnnulusError::Convergence`] if the iteration does not converge.
    pub fn solve(
        &self,
        element: &BladeElement<'_>,
        condition: &OperatingCondition,
        init: InductionState,
    ) -> Result<AnnulusSolution, AnnulusError> {
        self.solve_observed(element, condition, init, TraceObserver::new("annulus"))
    }

    /// Solves the annulus, reporting every iteration to `observer`.
    ///
    /// An observer that stops the iteration early produces
    /// [`ConvergenceError::StoppedEarly`].
    ///
    /// # Errors
    ///
    /// As [`AnnulusSolver::solve`].
    pub fn solve_observed<Obs>(
        &self,
        element: &BladeElement<'_>,
        condition: &OperatingCondition,
        init: InductionState,
        observer: Obs,
    ) -> Result<AnnulusSolution, AnnulusError>
    where
        Obs: for<'e> Observer<AnnulusEvent<'e>, Action>,
    {
        let model = element.model(condition, self.config.n_azimuth());
        let problem =
            InductionProblem::new(self.momentum, self.tangential, self.tip_loss, element, condition);

        let solution = fixed_point::solve(
            &model,
            &problem,
            init.as_array(),
            self.config.solver(),
            observer,
        )
        .map_err(|error| match error {
            fixed_point::Error::Model { source, .. } => AnnulusError::Lookup(source),
            fixed_point::Error::Problem { x, source } => {
                AnnulusError::Convergence(ConvergenceError::Momentum {
                    state: x.into(),
                    source,
                })
            }
            fixed_point::Error::NonFinite { iter, x } => {
                AnnulusError::Convergence(ConvergenceError::NonFinite {
                    state: x.into(),
                    iter,
                })
            }
        })?;

        let state = InductionState::from(solution.x);
        match solution.status {
            Status::Converged => Ok(AnnulusSolution {
                state,
                loads: solution.snapshot.output,
                tip_loss: problem.tip_loss_factor(&solution.snapshot.output),
                iters: solution.iters,
                residual: solution.residual,
            }),
            Status::MaxIters => Err(ConvergenceError::MaxIterations {
                state,
                iters: solution.iters,
                residual: solution.residual,
            }
            .into()),
            Status::StoppedByObserver => Err(ConvergenceError::StoppedEarly {
                state,
                iters: solution.iters,
            }
            .into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::f64::consts::{PI, TAU};

    use approx::assert_relative_eq;
    use bemrotor_observers::History;
    use uom::si::{
        angle::radian,
        f64::{Angle, Length},
        length::meter,
    };

    use crate::{
        Annulus, ClassicalMomentum, ConstantInduction, LookupError, MomentumError, Polar,
        PolarTable, polar::Extrapolate,
    };

    fn flat_polar() -> Polar {
        let alpha = vec![-PI, PI];
        let cl = alpha.iter().map(|a| TAU * a).collect();
        Polar::single(PolarTable::new(alpha, cl, vec![0.0; 2], Extrapolate::Enable).unwrap())
    }

    fn step_polar() -> Polar {
        Polar::single(
            PolarTable::new(
                vec![-PI, 0.0, 1e-6, PI],
                vec![0.0, 0.0, 3.0, 3.0],
                vec![0.0; 4],
                Extrapolate::Clamp,
            )
            .unwrap(),
        )
    }

    fn annulus(mu: f64, chord: f64, twist: f64) -> Annulus {
        Annulus {
            mu,
            width: 0.1,
            chord,
            twist,
            airfoil: "test".into(),
        }
    }

    fn condition(tsr: f64) -> OperatingCondition {
        let zero = Angle::new::<radian>(0.0);
        OperatingCondition::new(tsr, zero, zero).unwrap()
    }

    fn radius() -> Length {
        Length::new::<meter>(50.0)
    }

    #[test]
    fn converges_to_momentum_balance() {
        let polar = flat_polar();
        let annulus = annulus(0.6, 0.04, 0.05);
        let element = BladeElement::new(&annulus, &polar, 3, radius());
        let momentum = ClassicalMomentum::default();
        let solver = AnnulusSolver::new(&momentum, AnnulusConfig::default())
            .with_tangential(TangentialInduction::Default);

        let solution = solver
            .solve(&element, &condition(7.0), InductionState::default())
            .unwrap();

        let a = solution.state.axial;
        assert!(a > 0.0 && a < 0.5);
        assert!(solution.state.tangential > 0.0);
        assert!(solution.residual < 1e-6);
        assert_relative_eq!(4.0 * a * (1.0 - a), solution.ct(), epsilon = 1e-5);
    }

    #[test]
    fn deterministic_and_independent_of_warm_start() {
        let polar = flat_polar();
        let annulus = annulus(0.6, 0.04, 0.05);
        let element = BladeElement::new(&annulus, &polar, 3, radius());
        let momentum = ClassicalMomentum::default();
        let solver = AnnulusSolver::new(&momentum, AnnulusConfig::default());

        let first = solver
            .solve(&element, &condition(7.0), InductionState::default())
            .unwrap();
        let second = solver
            .solve(&element, &condition(7.0), InductionState::default())
            .unwrap();
        assert_eq!(first, second);

        let warm = solver
            .solve(&element, &condition(7.0), first.state)
            .unwrap();
        assert!(warm.iters < first.iters);
        assert_relative_eq!(warm.state.axial, first.state.axial, epsilon = 1e-5);
    }

    #[test]
    fn zero_lift_gives_zero_induction() {
        let polar = Polar::single(
            PolarTable::new(vec![-1.0, 1.0], vec![0.0; 2], vec![0.0; 2], Extrapolate::Enable)
                .unwrap(),
        );
        let annulus = annulus(0.6, 0.04, 0.0);
        let element = BladeElement::new(&annulus, &polar, 3, radius());
        let momentum = ClassicalMomentum::default();

        let solution = AnnulusSolver::new(&momentum, AnnulusConfig::default())
            .solve(&element, &condition(7.0), InductionState::default())
            .unwrap();

        assert_eq!(solution.state, InductionState::default());
        assert_eq!(solution.iters, 1);
    }

    #[test]
    fn step_polar_does_not_converge() {
        let polar = step_polar();
        let annulus = annulus(0.7, 0.018, 0.15);
        let element = BladeElement::new(&annulus, &polar, 3, radius());
        let momentum = ClassicalMomentum::default();

        let result = AnnulusSolver::new(&momentum, AnnulusConfig::default()).solve(
            &element,
            &condition(7.0),
            InductionState::default(),
        );

        match result {
            Err(AnnulusError::Convergence(ConvergenceError::MaxIterations {
                iters, residual, ..
            })) => {
                assert_eq!(iters, 100);
                assert!(residual > 1e-3);
            }
            other => panic!("expected MaxIterations, got {other:?}"),
        }
    }

    #[test]
    fn momentum_failures_are_reported() {
        let polar = flat_polar();
        let annulus = annulus(0.6, 0.04, 0.05);
        let element = BladeElement::new(&annulus, &polar, 3, radius());
        let refuse = |ct: f64, yaw: f64| -> Result<f64, MomentumError> {
            Err(MomentumError::OutOfDomain { ct, yaw })
        };

        let result = AnnulusSolver::new(&refuse, AnnulusConfig::default()).solve(
            &element,
            &condition(7.0),
            InductionState::default(),
        );

        assert!(matches!(
            result,
            Err(AnnulusError::Convergence(ConvergenceError::Momentum {
                source: MomentumError::OutOfDomain { .. },
                ..
            }))
        ));
    }

    #[test]
    fn lookup_failures_are_reported() {
        let polar = Polar::single(
            PolarTable::new(vec![-0.01, 0.01], vec![0.0; 2], vec![0.0; 2], Extrapolate::Error)
                .unwrap(),
        );
        let annulus = annulus(0.6, 0.04, 0.0);
        let element = BladeElement::new(&annulus, &polar, 3, radius());
        let momentum = ClassicalMomentum::default();

        let result = AnnulusSolver::new(&momentum, AnnulusConfig::default()).solve(
            &element,
            &condition(7.0),
            InductionState::default(),
        );

        assert!(matches!(
            result,
            Err(AnnulusError::Lookup(LookupError::AngleOutOfRange { .. }))
        ));
    }

    #[test]
    fn constant_induction_pins_the_state() {
        let polar = flat_polar();
        let annulus = annulus(0.6, 0.04, 0.05);
        let element = BladeElement::new(&annulus, &polar, 3, radius());
        let momentum = ConstantInduction::new(0.3).unwrap();
        let config = AnnulusConfig::new(1.0, 1e-10, 10, 1).unwrap();

        let solution = AnnulusSolver::new(&momentum, config)
            .solve(&element, &condition(7.0), InductionState::default())
            .unwrap();

        assert_relative_eq!(solution.state.axial, 0.3);
        assert_eq!(solution.iters, 2);
    }

    #[test]
    fn observers_see_every_iteration() {
        let polar = flat_polar();
        let annulus = annulus(0.6, 0.04, 0.05);
        let element = BladeElement::new(&annulus, &polar, 3, radius());
        let momentum = ClassicalMomentum::default();
        let mut history = History::new();

        let solution = AnnulusSolver::new(&momentum, AnnulusConfig::default())
            .solve_observed(
                &element,
                &condition(7.0),
                InductionState::default(),
                &mut history,
            )
            .unwrap();

        assert_eq!(history.len(), solution.iters);
        assert_eq!(history.last(), Some(solution.residual));
    }

    #[test]
    fn observers_can_stop_the_iteration() {
        let polar = flat_polar();
        let annulus = annulus(0.6, 0.04, 0.05);
        let element = BladeElement::new(&annulus, &polar, 3, radius());
        let momentum = ClassicalMomentum::default();

        let stop_at_third = |event: &AnnulusEvent<'_>| (event.iter == 3).then_some(Action::StopEarly);
        let result = AnnulusSolver::new(&momentum, AnnulusConfig::default()).solve_observed(
            &element,
            &condition(7.0),
            InductionState::default(),
            stop_at_third,
        );

        assert!(matches!(
            result,
            Err(AnnulusError::Convergence(ConvergenceError::StoppedEarly { iters: 3, .. }))
        ));
    }
}
