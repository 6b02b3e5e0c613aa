use bemrotor_core::Observer;

use crate::traits::HasResidual;

/// Records the residual reported at each iteration.
///
/// Pass `&mut history` to a solver to keep ownership and inspect the record
/// afterwards.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct History {
    residuals: Vec<f64>,
}

impl History {
    /// Creates an empty history.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the recorded residuals in iteration order.
    #[must_use]
    pub fn residuals(&self) -> &[f64] {
        &self.residuals
    }

    /// Returns the number of recorded iterations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.residuals.len()
    }

    /// Returns true if nothing was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.residuals.is_empty()
    }

    /// Returns the last recorded residual.
    #[must_use]
    pub fn last(&self) -> Option<f64> {
        self.residuals.last().copied()
    }

    fn record<E: HasResidual>(&mut self, event: &E) {
        self.residuals.push(event.residual());
    }
}

impl<E, A> Observer<E, A> for History
where
    E: HasResidual,
{
    fn observe(&mut self, event: &E) -> Option<A> {
        self.record(event);
        None
    }
}

impl<E, A> Observer<E, A> for &mut History
where
    E: HasResidual,
{
    fn observe(&mut self, event: &E) -> Option<A> {
        self.record(event);
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::convert::Infallible;

    use approx::assert_relative_eq;
    use bemrotor_core::{FixedPointProblem, Model};
    use bemrotor_solvers::fixed_point::{self, Config};

    struct Halving;

    impl Model for Halving {
        type Input = f64;
        type Output = f64;
        type Error = Infallible;

        fn call(&self, input: &f64) -> Result<f64, Infallible> {
            Ok(0.5 * input)
        }
    }

    impl FixedPointProblem<1> for Halving {
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

    #[test]
    fn records_fixed_point_residuals() {
        let mut history = History::new();
        let config = Config::new(100, 1.0, 1e-3).unwrap();

        let solution = fixed_point::solve(&Halving, &Halving, [1.0], &config, &mut history)
            .expect("should converge");

        assert_eq!(history.len(), solution.iters);
        assert_relative_eq!(history.residuals()[0], 0.5);
        assert_relative_eq!(history.residuals()[1], 0.25);
        assert!(history.last().is_some_and(|r| r < 1e-3));
    }
}
