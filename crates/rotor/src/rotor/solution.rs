use ndarray::Array1;
use uom::si::angle::radian;

use crate::{AnnulusLoads, AnnulusSolution, InductionState, OperatingCondition};

/// Converged annulus together with its radial position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnnulusResult {
    pub mu: f64,
    pub width: f64,
    pub state: InductionState,
    pub loads: AnnulusLoads,
    pub tip_loss: f64,
    pub iters: usize,
}

impl AnnulusResult {
    pub(super) fn new(mu: f64, width: f64, solution: AnnulusSolution) -> Self {
        Self {
            mu,
            width,
            state: solution.state,
            loads: solution.loads,
            tip_loss: solution.tip_loss,
            iters: solution.iters,
        }
    }
}

/// Rotor performance at one operating condition.
#[derive(Debug, Clone, PartialEq)]
pub struct RotorSolution {
    pub condition: OperatingCondition,
    /// Annuli from root to tip.
    pub annuli: Vec<AnnulusResult>,
    /// Thrust coefficient.
    pub ct: f64,
    /// Power coefficient.
    pub cp: f64,
    /// Torque coefficient, `C_P / λ`.
    pub cq: f64,
    /// Area-weighted mean axial induction.
    pub a: f64,
}

impl RotorSolution {
    pub(super) fn aggregate(
        condition: OperatingCondition,
        annuli: Vec<AnnulusResult>,
        weights: &Array1<f64>,
    ) -> Self {
        let weighted = |f: fn(&AnnulusResult) -> f64| -> f64 {
            annuli.iter().zip(weights).map(|(r, w)| w * f(r)).sum()
        };

        let ct = weighted(|r| r.loads.ct_local);
        let cp = weighted(|r| r.loads.cp_local);
        let a = weighted(|r| r.state.axial) / weights.sum();

        Self {
            condition,
            ct,
            cp,
            cq: cp / condition.tsr(),
            a,
            annuli,
        }
    }

    fn column(&self, f: impl Fn(&AnnulusResult) -> f64) -> Array1<f64> {
        self.annuli.iter().map(f).collect()
    }

    /// Normalized annulus radii.
    #[must_use]
    pub fn mu(&self) -> Array1<f64> {
        self.column(|r| r.mu)
    }

    #[must_use]
    pub fn axial_induction(&self) -> Array1<f64> {
        self.column(|r| r.state.axial)
    }

    #[must_use]
    pub fn tangential_induction(&self) -> Array1<f64> {
        self.column(|r| r.state.tangential)
    }

    #[must_use]
    pub fn ct_local(&self) -> Array1<f64> {
        self.column(|r| r.loads.ct_local)
    }

    #[must_use]
    pub fn cp_local(&self) -> Array1<f64> {
        self.column(|r| r.loads.cp_local)
    }

    /// Azimuth-averaged angle of attack in radians.
    #[must_use]
    pub fn alpha(&self) -> Array1<f64> {
        self.column(|r| r.loads.alpha)
    }

    /// Azimuth-averaged inflow angle in radians.
    #[must_use]
    pub fn phi(&self) -> Array1<f64> {
        self.column(|r| r.loads.phi)
    }

    /// Rotor-effective wind speed `(1 − a) cos γ`, as a fraction of the
    /// freestream speed.
    #[must_use]
    pub fn effective_wind_speed(&self) -> f64 {
        (1.0 - self.a) * self.cos_yaw()
    }

    /// Thrust coefficient based on the effective wind speed, `C_T / U²`.
    #[must_use]
    pub fn ctprime(&self) -> f64 {
        self.ct / self.effective_wind_speed().powi(2)
    }

    /// Local thrust coefficient of each annulus based on its own disc speed.
    #[must_use]
    pub fn ctprime_local(&self) -> Array1<f64> {
        let cos_yaw = self.cos_yaw();
        self.column(|r| r.loads.ct_local / ((1.0 - r.state.axial) * cos_yaw).powi(2))
    }

    fn cos_yaw(&self) -> f64 {
        self.condition.yaw().get::<radian>().cos()
    }

    /// Iterations summed over all annuli.
    #[must_use]
    pub fn total_iters(&self) -> usize {
        self.annuli.iter().map(|r| r.iters).sum()
    }

    pub(super) fn states(&self) -> impl Iterator<Item = InductionState> + '_ {
        self.annuli.iter().map(|r| r.state)
    }
}
