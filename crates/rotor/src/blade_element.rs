//! Blade-element aerodynamics of one annulus.
//!
//! Velocities are normalized by the freestream speed. At azimuth `θ` with
//! axial induction `a`, tangential induction `a'` and yaw `γ`:
//!
//! ```text
//! u_axial      = (1 - a) cos γ
//! u_tangential = λ μ (1 + a') - (1 - a) sin γ cos θ
//! φ = atan2(u_axial, u_tangential),   W² = u_axial² + u_tangential²
//! α = φ - (twist + pitch)
//! C_n = C_l cos φ + C_d sin φ,        C_tan = C_l sin φ - C_d cos φ
//! C_T,local = σ W² C_n,               C_P,local = σ W² C_tan λ μ
//! ```
//!
//! with local solidity `σ = B c / (2π μ)`.

use std::f64::consts::{PI, TAU};

use bemrotor_core::Model;
use uom::si::{angle::radian, f64::Length};

use crate::{Annulus, InductionState, LookupError, OperatingCondition, Polar};

/// Sectional quantities at one azimuth.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElementLoads {
    /// Inflow angle in radians.
    pub phi: f64,
    /// Angle of attack in radians.
    pub alpha: f64,
    /// Relative speed squared, normalized by the freestream speed.
    pub w2: f64,
    pub cl: f64,
    pub cd: f64,
    pub c_normal: f64,
    pub c_tangential: f64,
    pub ct_local: f64,
    pub cp_local: f64,
}

/// Azimuth-averaged sectional quantities of an annulus.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AnnulusLoads {
    pub phi: f64,
    pub alpha: f64,
    pub w2: f64,
    pub cl: f64,
    pub cd: f64,
    /// Mean of `W² C_tan`, the load that drives tangential induction.
    pub tangential_load: f64,
    pub ct_local: f64,
    pub cp_local: f64,
}

impl AnnulusLoads {
    fn accumulate(&mut self, loads: &ElementLoads, weight: f64) {
        self.phi += weight * loads.phi;
        self.alpha += weight * loads.alpha;
        self.w2 += weight * loads.w2;
        self.cl += weight * loads.cl;
        self.cd += weight * loads.cd;
        self.tangential_load += weight * loads.w2 * loads.c_tangential;
        self.ct_local += weight * loads.ct_local;
        self.cp_local += weight * loads.cp_local;
    }
}

/// An annulus paired with its polar and the rotor data it needs.
#[derive(Debug, Clone, Copy)]
pub struct BladeElement<'a> {
    annulus: &'a Annulus,
    polar: &'a Polar,
    blades: usize,
    rotor_radius: Length,
}

impl<'a> BladeElement<'a> {
    #[must_use]
    pub fn new(annulus: &'a Annulus, polar: &'a Polar, blades: usize, rotor_radius: Length) -> Self {
        Self {
            annulus,
            polar,
            blades,
            rotor_radius,
        }
    }

    #[must_use]
    pub fn annulus(&self) -> &'a Annulus {
        self.annulus
    }

    #[must_use]
    pub fn blades(&self) -> usize {
        self.blades
    }

    /// Local solidity `B c / (2π μ)`.
    #[must_use]
    pub fn solidity(&self) -> f64 {
        self.blades as f64 * self.annulus.chord / (2.0 * PI * self.annulus.mu)
    }

    /// Evaluates the section at one azimuth angle (radians).
    ///
    /// # Errors
    ///
    /// Returns a [`LookupError`] if the polar cannot supply coefficients.
    pub fn evaluate(
        &self,
        condition: &OperatingCondition,
        state: InductionState,
        azimuth: f64,
    ) -> Result<ElementLoads, LookupError> {
        let tsr = condition.tsr();
        let yaw = condition.yaw().get::<radian>();
        let mu = self.annulus.mu;

        let u_axial = (1.0 - state.axial) * yaw.cos();
        let u_tangential =
            tsr * mu * (1.0 + state.tangential) - (1.0 - state.axial) * yaw.sin() * azimuth.cos();
        let phi = u_axial.atan2(u_tangential);
        let w2 = u_axial * u_axial + u_tangential * u_tangential;
        let alpha = phi - (self.annulus.twist + condition.pitch().get::<radian>());

        let reynolds = condition
            .inflow()
            .map(|inflow| inflow.reynolds(w2.sqrt(), self.annulus.chord * self.rotor_radius));
        let coefficients = self.polar.lookup(alpha, reynolds)?;

        let (sin_phi, cos_phi) = phi.sin_cos();
        let c_normal = coefficients.cl * cos_phi + coefficients.cd * sin_phi;
        let c_tangential = coefficients.cl * sin_phi - coefficients.cd * cos_phi;
        let sigma = self.solidity();

        Ok(ElementLoads {
            phi,
            alpha,
            w2,
            cl: coefficients.cl,
            cd: coefficients.cd,
            c_normal,
            c_tangential,
            ct_local: sigma * w2 * c_normal,
            cp_local: sigma * w2 * c_tangential * tsr * mu,
        })
    }

    /// Averages the section loads over `n_azimuth` equally spaced azimuths.
    ///
    /// Without yaw the loads do not depend on azimuth and a single point is
    /// evaluated.
    ///
    /// # Errors
    ///
    /// Returns the first [`LookupError`] encountered.
    pub fn evaluate_annulus(
        &self,
        condition: &OperatingCondition,
        state: InductionState,
        n_azimuth: usize,
    ) -> Result<AnnulusLoads, LookupError> {
        let points = if condition.is_yawed() {
            n_azimuth.max(1)
        } else {
            1
        };
        let weight = 1.0 / points as f64;

        let mut loads = AnnulusLoads::default();
        for k in 0..points {
            let azimuth = TAU * k as f64 / points as f64;
            loads.accumulate(&self.evaluate(condition, state, azimuth)?, weight);
        }
        Ok(loads)
    }

    /// Wraps the element as a [`Model`] from induction state to annulus loads.
    #[must_use]
    pub fn model<'c>(
        &self,
        condition: &'c OperatingCondition,
        n_azimuth: usize,
    ) -> ElementModel<'a, 'c> {
        ElementModel {
            element: *self,
            condition,
            n_azimuth,
        }
    }
}

/// A [`BladeElement`] at a fixed operating condition.
#[derive(Debug, Clone, Copy)]
pub struct ElementModel<'a, 'c> {
    element: BladeElement<'a>,
    condition: &'c OperatingCondition,
    n_azimuth: usize,
}

impl Model for ElementModel<'_, '_> {
    type Input = InductionState;
    type Output = AnnulusLoads;
    type Error = LookupError;

    fn call(&self, input: &InductionState) -> Result<AnnulusLoads, LookupError> {
        self.element
            .evaluate_annulus(self.condition, *input, self.n_azimuth)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::{angle::degree, f64::Angle, length::meter};

    use crate::polar::{Extrapolate, PolarTable};

    fn flat_polar(cd: f64) -> Polar {
        let alpha = vec![-PI, PI];
        let cl = alpha.iter().map(|a| TAU * a).collect();
        Polar::single(PolarTable::new(alpha, cl, vec![cd; 2], Extrapolate::Error).unwrap())
    }

    fn annulus() -> Annulus {
        Annulus {
            mu: 0.5,
            width: 0.1,
            chord: 0.05,
            twist: 0.02,
            airfoil: "flat".into(),
        }
    }

    fn condition(yaw_deg: f64) -> OperatingCondition {
        OperatingCondition::new(6.0, Angle::new::<degree>(0.0), Angle::new::<degree>(yaw_deg))
            .unwrap()
    }

    #[test]
    fn velocity_triangle_without_induction() {
        let polar = flat_polar(0.0);
        let annulus = annulus();
        let element = BladeElement::new(&annulus, &polar, 3, Length::new::<meter>(40.0));

        let loads = element
            .evaluate(&condition(0.0), InductionState::default(), 0.0)
            .unwrap();

        let phi = (1.0_f64 / 3.0).atan();
        assert_relative_eq!(loads.phi, phi, epsilon = 1e-14);
        assert_relative_eq!(loads.w2, 10.0, epsilon = 1e-12);
        assert_relative_eq!(loads.alpha, phi - 0.02, epsilon = 1e-14);

        let sigma = 3.0 * 0.05 / PI;
        let cl = TAU * (phi - 0.02);
        assert_relative_eq!(loads.ct_local, sigma * 10.0 * cl * phi.cos(), epsilon = 1e-12);
        assert_relative_eq!(
            loads.cp_local,
            sigma * 10.0 * cl * phi.sin() * 3.0,
            epsilon = 1e-12
        );
    }

    #[test]
    fn drag_reduces_power_and_adds_thrust() {
        let annulus = annulus();
        let clean = flat_polar(0.0);
        let draggy = flat_polar(0.05);
        let radius = Length::new::<meter>(40.0);
        let state = InductionState::new(0.2, 0.01);

        let clean = BladeElement::new(&annulus, &clean, 3, radius)
            .evaluate(&condition(0.0), state, 0.0)
            .unwrap();
        let draggy = BladeElement::new(&annulus, &draggy, 3, radius)
            .evaluate(&condition(0.0), state, 0.0)
            .unwrap();

        assert!(draggy.ct_local > clean.ct_local);
        assert!(draggy.cp_local < clean.cp_local);
    }

    #[test]
    fn azimuth_average_matches_single_point_without_yaw() {
        let polar = flat_polar(0.01);
        let annulus = annulus();
        let element = BladeElement::new(&annulus, &polar, 3, Length::new::<meter>(40.0));
        let state = InductionState::new(0.3, 0.02);

        let point = element.evaluate(&condition(0.0), state, 1.0).unwrap();
        let averaged = element.evaluate_annulus(&condition(0.0), state, 36).unwrap();

        assert_relative_eq!(averaged.ct_local, point.ct_local);
        assert_relative_eq!(averaged.tangential_load, point.w2 * point.c_tangential);
    }

    #[test]
    fn yaw_reduces_thrust() {
        let polar = flat_polar(0.01);
        let annulus = annulus();
        let element = BladeElement::new(&annulus, &polar, 3, Length::new::<meter>(40.0));
        let state = InductionState::new(0.25, 0.0);

        let aligned = element.evaluate_annulus(&condition(0.0), state, 36).unwrap();
        let yawed = element.evaluate_annulus(&condition(30.0), state, 36).unwrap();

        assert!(yawed.ct_local < aligned.ct_local);
    }
}
