use std::convert::Infallible;

use bemrotor_core::{FixedPointProblem, Model};
use bemrotor_solvers::fixed_point;

use super::{MomentumError, MomentumModel, classical::classical_induction};

/// Yawed actuator disc expressed through its local thrust coefficient `C_T'`.
///
/// Velocities are normalized by the freestream speed. `u4` and `v4` are the
/// streamwise and lateral far-wake velocities.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiscSolution {
    pub ctprime: f64,
    pub yaw: f64,
    pub axial: f64,
    pub u4: f64,
    pub v4: f64,
    pub iters: usize,
}

impl DiscSolution {
    /// Thrust coefficient `C_T'·((1 − a) cos γ)²`.
    #[must_use]
    pub fn ct(&self) -> f64 {
        self.ctprime * self.disc_speed().powi(2)
    }

    /// Power coefficient `C_T'·((1 − a) cos γ)³`.
    #[must_use]
    pub fn cp(&self) -> f64 {
        self.ctprime * self.disc_speed().powi(3)
    }

    fn disc_speed(&self) -> f64 {
        (1.0 - self.axial) * self.yaw.cos()
    }
}

/// Closed-form yawed disc that neglects the lateral wake velocity in the
/// pressure balance.
///
/// ```text
/// a  = C_T' cos²γ / (4 + C_T' cos²γ)
/// u4 = (4 − C_T' cos²γ) / (4 + C_T' cos²γ)
/// ```
///
/// In thrust form this is `C_T = 4a(1 − a)` at every yaw angle, so as a
/// [`MomentumModel`] it only covers `C_T ≤ 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LimitedHeck;

impl LimitedHeck {
    /// Solves the disc for local thrust coefficient `ctprime` at `yaw`.
    ///
    /// # Errors
    ///
    /// Returns [`MomentumError::OutOfDomain`] for non-finite input, for
    /// `cos γ ≤ 0`, or when `4 + C_T' cos²γ ≤ 0`.
    pub fn solve(&self, ctprime: f64, yaw: f64) -> Result<DiscSolution, MomentumError> {
        let cos_yaw = check_domain(ctprime, yaw)?;
        let loading = ctprime * cos_yaw * cos_yaw;
        let denominator = 4.0 + loading;
        if denominator <= 0.0 {
            return Err(MomentumError::OutOfDomain { ct: ctprime, yaw });
        }

        Ok(DiscSolution {
            ctprime,
            yaw,
            axial: loading / denominator,
            u4: (4.0 - loading) / denominator,
            v4: -4.0 * loading * yaw.sin() / (denominator * denominator),
            iters: 0,
        })
    }
}

impl MomentumModel for LimitedHeck {
    fn induction(&self, ct: f64, yaw: f64) -> Result<f64, MomentumError> {
        check_domain(ct, yaw)?;
        if ct > 1.0 {
            return Err(MomentumError::OutOfDomain { ct, yaw });
        }
        Ok(classical_induction(ct))
    }
}

/// Yawed actuator disc with the lateral wake velocity retained, solved by
/// relaxed fixed-point iteration over `(a, 1 − u4, v4)`.
///
/// At zero yaw it reduces to classical momentum theory.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Heck {
    config: fixed_point::Config,
}

impl Default for Heck {
    fn default() -> Self {
        // Known-good values, unwrap is safe
        Self {
            config: fixed_point::Config::new(2000, 0.1, 1e-9).unwrap(),
        }
    }
}

impl Heck {
    #[must_use]
    pub fn new(config: fixed_point::Config) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &fixed_point::Config {
        &self.config
    }

    /// Solves the disc for local thrust coefficient `ctprime` at `yaw`,
    /// starting from the [`LimitedHeck`] solution.
    ///
    /// # Errors
    ///
    /// Returns [`MomentumError::OutOfDomain`] if the input is invalid or the
    /// iteration leaves the physical range, and
    /// [`MomentumError::NoConvergence`] if the iteration limit is reached.
    pub fn solve(&self, ctprime: f64, yaw: f64) -> Result<DiscSolution, MomentumError> {
        let start = LimitedHeck.solve(ctprime, yaw)?;
        if ctprime == 0.0 {
            return Ok(start);
        }

        let x0 = [start.axial, 1.0 - start.u4, start.v4];
        let ([axial, deficit, v4], iters) = self.iterate(Loading::Local(ctprime), yaw, x0)?;

        Ok(DiscSolution {
            ctprime,
            yaw,
            axial,
            u4: 1.0 - deficit,
            v4,
            iters,
        })
    }

    fn iterate(
        &self,
        loading: Loading,
        yaw: f64,
        x0: [f64; 3],
    ) -> Result<([f64; 3], usize), MomentumError> {
        let ct = loading.value();
        let equations = DiscEquations { loading, yaw };
        let solution = fixed_point::solve_unobserved(&equations, &WakeState, x0, &self.config)
            .map_err(|_| MomentumError::OutOfDomain { ct, yaw })?;

        if solution.is_converged() {
            Ok((solution.x, solution.iters))
        } else {
            Err(MomentumError::NoConvergence {
                ct,
                iters: solution.iters,
            })
        }
    }
}

impl MomentumModel for Heck {
    /// Solves the disc with `C_T' = C_T / ((1 − a) cos γ)²` updated from the
    /// current induction at each step.
    fn induction(&self, ct: f64, yaw: f64) -> Result<f64, MomentumError> {
        check_domain(ct, yaw)?;
        if ct < 0.0 {
            return Err(MomentumError::OutOfDomain { ct, yaw });
        }
        if ct == 0.0 {
            return Ok(0.0);
        }

        let axial = classical_induction(ct.min(1.0));
        let x0 = [axial, 0.5 * ct / (1.0 - axial), -0.25 * ct * yaw.sin()];
        let ([axial, _, _], _) = self.iterate(Loading::Thrust(ct), yaw, x0)?;
        Ok(axial)
    }
}

fn check_domain(value: f64, yaw: f64) -> Result<f64, MomentumError> {
    let cos_yaw = yaw.cos();
    if !value.is_finite() || !yaw.is_finite() || cos_yaw <= 0.0 {
        return Err(MomentumError::OutOfDomain { ct: value, yaw });
    }
    Ok(cos_yaw)
}

/// Which thrust coefficient is held fixed during the iteration.
#[derive(Debug, Clone, Copy)]
enum Loading {
    /// Local coefficient `C_T'` based on the disc velocity.
    Local(f64),
    /// Rotor thrust coefficient `C_T` based on the freestream.
    Thrust(f64),
}

impl Loading {
    fn value(self) -> f64 {
        match self {
            Self::Local(value) | Self::Thrust(value) => value,
        }
    }
}

/// Momentum, continuity and lateral-force balances of the yawed disc.
///
/// State is `[a, 1 − u4, v4]`; carrying the velocity deficit keeps
/// `1 − u4²` accurate at light loading.
struct DiscEquations {
    loading: Loading,
    yaw: f64,
}

impl Model for DiscEquations {
    type Input = [f64; 3];
    type Output = [f64; 3];
    type Error = Infallible;

    fn call(&self, state: &[f64; 3]) -> Result<[f64; 3], Infallible> {
        let [axial, deficit, v4] = *state;
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        let disc = 1.0 - axial;

        // `ctprime·cos²γ` in either form.
        let loading = match self.loading {
            Loading::Local(ctprime) => ctprime * cos_yaw * cos_yaw,
            Loading::Thrust(ct) => ct / (disc * disc),
        };

        let wake = (deficit * (2.0 - deficit) - v4 * v4).sqrt();
        Ok([
            1.0 - wake / loading.sqrt(),
            0.5 * loading * disc,
            -0.25 * loading * disc * disc * sin_yaw,
        ])
    }
}

/// The model output is the next state.
struct WakeState;

impl FixedPointProblem<3> for WakeState {
    type Input = [f64; 3];
    type Output = [f64; 3];
    type Error = Infallible;

    fn input(&self, x: &[f64; 3]) -> Result<[f64; 3], Infallible> {
        Ok(*x)
    }

    fn update(&self, _input: &[f64; 3], output: &[f64; 3]) -> Result<[f64; 3], Infallible> {
        Ok(*output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn limited_heck_without_yaw() {
        for ctprime in [0.5, 1.0, 2.0, 4.0] {
            let disc = LimitedHeck.solve(ctprime, 0.0).unwrap();
            assert_relative_eq!(disc.axial, ctprime / (4.0 + ctprime), epsilon = 1e-15);
            assert_relative_eq!(disc.u4, 1.0 - 2.0 * disc.axial, epsilon = 1e-15);
            assert_eq!(disc.v4, 0.0);
        }
    }

    #[test]
    fn limited_heck_peaks_at_betz() {
        // C_T' = 2 gives a = 1/3.
        let disc = LimitedHeck.solve(2.0, 0.0).unwrap();
        assert_relative_eq!(disc.axial, 1.0 / 3.0, epsilon = 1e-15);
        assert_relative_eq!(disc.cp(), 16.0 / 27.0, epsilon = 1e-15);
        assert_relative_eq!(disc.ct(), 8.0 / 9.0, epsilon = 1e-15);
    }

    #[test]
    fn limited_heck_in_yaw() {
        let yaw = 0.4_f64;
        let disc = LimitedHeck.solve(2.0, yaw).unwrap();
        let loading = 2.0 * yaw.cos().powi(2);

        assert_relative_eq!(disc.axial, loading / (4.0 + loading), epsilon = 1e-15);
        assert!(disc.v4 < 0.0);
        // Thrust form is independent of yaw.
        assert_relative_eq!(disc.ct(), 4.0 * disc.axial * (1.0 - disc.axial), epsilon = 1e-14);
        assert_relative_eq!(
            LimitedHeck.induction(disc.ct(), yaw).unwrap(),
            disc.axial,
            epsilon = 1e-12
        );
    }

    #[test]
    fn limited_heck_thrust_form_stops_at_unity() {
        assert!(matches!(
            LimitedHeck.induction(1.2, 0.0),
            Err(MomentumError::OutOfDomain { .. })
        ));
    }

    #[test]
    fn heck_matches_limited_heck_without_yaw() {
        let heck = Heck::default().solve(1.0, 0.0).unwrap();
        let limited = LimitedHeck.solve(1.0, 0.0).unwrap();

        assert_relative_eq!(heck.axial, limited.axial, epsilon = 1e-8);
        assert_relative_eq!(heck.u4, limited.u4, epsilon = 1e-8);
        assert_relative_eq!(heck.v4, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn heck_satisfies_its_balances_in_yaw() {
        let (ctprime, yaw) = (2.0, 0.5_f64);
        let disc = Heck::default().solve(ctprime, yaw).unwrap();
        let cos_yaw = yaw.cos();

        let wake = (1.0 - disc.u4 * disc.u4 - disc.v4 * disc.v4).sqrt();
        assert_relative_eq!(disc.axial, 1.0 - wake / (ctprime.sqrt() * cos_yaw), epsilon = 1e-7);
        assert_relative_eq!(
            disc.u4,
            1.0 - 0.5 * ctprime * (1.0 - disc.axial) * cos_yaw * cos_yaw,
            epsilon = 1e-7
        );
        assert!(disc.v4 < 0.0);
        assert!(disc.iters > 0);
    }

    #[test]
    fn heck_thrust_form_is_classical_without_yaw() {
        let heck = Heck::default();
        for ct in [0.1, 0.64, 0.9] {
            let a = heck.induction(ct, 0.0).unwrap();
            assert_relative_eq!(4.0 * a * (1.0 - a), ct, epsilon = 1e-7);
        }
        assert_eq!(heck.induction(0.0, 0.0).unwrap(), 0.0);
    }

    #[test]
    fn heck_thrust_and_local_forms_agree() {
        let heck = Heck::default();
        let (ct, yaw) = (0.5, 0.3_f64);

        let axial = heck.induction(ct, yaw).unwrap();
        let ctprime = ct / ((1.0 - axial) * yaw.cos()).powi(2);
        let disc = heck.solve(ctprime, yaw).unwrap();

        assert_relative_eq!(disc.axial, axial, epsilon = 1e-6);
        assert_relative_eq!(disc.ct(), ct, epsilon = 1e-6);
    }

    #[test]
    fn heck_rejects_invalid_input() {
        let heck = Heck::default();
        assert!(matches!(
            heck.induction(-0.1, 0.0),
            Err(MomentumError::OutOfDomain { .. })
        ));
        assert!(matches!(
            heck.solve(f64::NAN, 0.0),
            Err(MomentumError::OutOfDomain { .. })
        ));
    }
}
