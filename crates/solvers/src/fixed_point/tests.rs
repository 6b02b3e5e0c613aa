use super::*;

use std::convert::Infallible;

use approx::assert_relative_eq;
use thiserror::Error;

/// Model that returns the cosine of its input.
struct CosineModel;

impl Model for CosineModel {
    type Input = f64;
    type Output = f64;
    type Error = Infallible;

    fn call(&self, input: &f64) -> Result<f64, Infallible> {
        Ok(input.cos())
    }
}

/// Problem whose update is the model output itself, so the fixed point
/// solves `x = cos(x)`.
struct OutputIsUpdate;

impl FixedPointProblem<1> for OutputIsUpdate {
    type Input = f64;
    type Output = f64;
    type Error = Infallible;

    fn input(&self, x: &[f64; 1]) -> Result<f64, Infallible> {
        Ok(x[0])
    }

    fn update(&self, _input: &f64, output: &f64) -> Result<[f64; 1], Infallible> {
        Ok([*output])
    }
}

/// Linear map `G(x) = slope * x + offset`, used to exercise relaxation.
struct LinearMap {
    slope: f64,
    offset: f64,
}

impl Model for LinearMap {
    type Input = [f64; 2];
    type Output = [f64; 2];
    type Error = Infallible;

    fn call(&self, input: &[f64; 2]) -> Result<[f64; 2], Infallible> {
        Ok(input.map(|v| self.slope * v + self.offset))
    }
}

struct Identity2;

impl FixedPointProblem<2> for Identity2 {
    type Input = [f64; 2];
    type Output = [f64; 2];
    type Error = Infallible;

    fn input(&self, x: &[f64; 2]) -> Result<[f64; 2], Infallible> {
        Ok(*x)
    }

    fn update(&self, _input: &[f64; 2], output: &[f64; 2]) -> Result<[f64; 2], Infallible> {
        Ok(*output)
    }
}

#[derive(Debug, Error)]
#[error("update rejected")]
struct Rejected;

struct RejectingProblem;

impl FixedPointProblem<1> for RejectingProblem {
    type Input = f64;
    type Output = f64;
    type Error = Rejected;

    fn input(&self, x: &[f64; 1]) -> Result<f64, Rejected> {
        Ok(x[0])
    }

    fn update(&self, _input: &f64, _output: &f64) -> Result<[f64; 1], Rejected> {
        Err(Rejected)
    }
}

#[test]
fn solves_dottie_number() {
    let config = Config::new(200, 1.0, 1e-12).unwrap();

    let solution = solve_unobserved(&CosineModel, &OutputIsUpdate, [1.0], &config)
        .expect("should converge");

    assert_eq!(solution.status, Status::Converged);
    assert_relative_eq!(solution.x[0], 0.739_085_133_215_160_6, epsilon = 1e-11);
    assert_relative_eq!(solution.snapshot.output, solution.x[0].cos());
}

#[test]
fn relaxation_damps_oscillating_map() {
    // Full steps flip sign around the fixed point and grow, relaxed steps
    // contract with factor |1 - 0.25 * (1 + 2.5)| = 0.125.
    let model = LinearMap {
        slope: -2.5,
        offset: 3.5,
    };

    let full = Config::new(50, 1.0, 1e-9).unwrap();
    let solution = solve_unobserved(&model, &Identity2, [0.0, 2.0], &full).unwrap();
    assert_eq!(solution.status, Status::MaxIters);

    let relaxed = Config::new(50, 0.25, 1e-9).unwrap();
    let solution = solve_unobserved(&model, &Identity2, [0.0, 2.0], &relaxed).unwrap();
    assert_eq!(solution.status, Status::Converged);
    assert_relative_eq!(solution.x[0], 1.0, epsilon = 1e-8);
    assert_relative_eq!(solution.x[1], 1.0, epsilon = 1e-8);
}

#[test]
fn max_iters_reports_last_evaluation() {
    let model = LinearMap {
        slope: 0.5,
        offset: 1.0,
    };
    let config = Config::new(3, 1.0, 1e-12).unwrap();

    let solution = solve_unobserved(&model, &Identity2, [0.0, 0.0], &config).unwrap();

    // x: 0 -> 1 -> 1.5, the third evaluation is at 1.5 with update 1.75.
    assert_eq!(solution.status, Status::MaxIters);
    assert_eq!(solution.iters, 3);
    assert_relative_eq!(solution.x[0], 1.5);
    assert_relative_eq!(solution.target[0], 1.75);
    assert_relative_eq!(solution.residual, 0.25);
}

#[test]
fn observer_sees_each_iteration_and_can_stop() {
    let mut residuals = Vec::new();
    let observer = |event: &Event<'_, f64, f64, 1>| {
        residuals.push(event.residual);
        (event.iter == 4).then_some(Action::StopEarly)
    };

    let solution = solve(
        &CosineModel,
        &OutputIsUpdate,
        [1.0],
        &Config::default(),
        observer,
    )
    .unwrap();

    assert_eq!(solution.status, Status::StoppedByObserver);
    assert_eq!(solution.iters, 4);
    assert_eq!(residuals.len(), 4);
}

#[test]
fn rejects_non_finite_start() {
    let result = solve_unobserved(&CosineModel, &OutputIsUpdate, [f64::NAN], &Config::default());
    assert!(matches!(result, Err(Error::NonFinite { iter: 0, .. })));
}

#[test]
fn reports_non_finite_update() {
    let model = LinearMap {
        slope: f64::INFINITY,
        offset: 0.0,
    };

    let result = solve_unobserved(&model, &Identity2, [1.0, 1.0], &Config::default());
    assert!(matches!(result, Err(Error::NonFinite { iter: 1, .. })));
}

#[test]
fn propagates_problem_error() {
    let result = solve_unobserved(&CosineModel, &RejectingProblem, [0.5], &Config::default());
    assert!(matches!(
        result,
        Err(Error::Problem {
            x: [0.5],
            source: Rejected
        })
    ));
}
