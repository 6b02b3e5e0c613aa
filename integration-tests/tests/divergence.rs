use bemrotor::{
    AirfoilLibrary, Annulus, AnnulusError, ClassicalMomentum, ConvergenceError, Error,
    OperatingCondition, RotorGeometry, RotorOptions, RotorSolver,
};
use integration_tests::fixtures::step_polar;
use uom::si::{
    angle::radian,
    f64::{Angle, Length},
    length::meter,
};

fn step_rotor() -> RotorSolver {
    let annuli = [0.7, 0.8]
        .into_iter()
        .map(|mu| Annulus {
            mu,
            width: 0.1,
            chord: 0.018,
            twist: 0.15,
            airfoil: "step".into(),
        })
        .collect();
    let geometry = RotorGeometry::new(Length::new::<meter>(50.0), 3, annuli).unwrap();

    let mut library = AirfoilLibrary::new();
    library.insert("step", step_polar());

    RotorSolver::new(
        geometry,
        library,
        ClassicalMomentum::default(),
        RotorOptions::default(),
    )
    .unwrap()
}

#[test]
fn discontinuous_polar_exhausts_iterations() {
    let zero = Angle::new::<radian>(0.0);
    let condition = OperatingCondition::new(7.0, zero, zero).unwrap();

    let error = step_rotor().solve(&condition).unwrap_err();

    match &error {
        Error::Annulus {
            index: 0,
            source:
                AnnulusError::Convergence(ConvergenceError::MaxIterations {
                    iters, residual, ..
                }),
            ..
        } => {
            assert_eq!(*iters, 100);
            assert!(*residual > 1e-3);
        }
        other => panic!("expected annulus 0 to exhaust its iterations, got {other:?}"),
    }
    assert!(error.convergence().is_some());
}
