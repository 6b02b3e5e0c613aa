use bemrotor_core::FixedPointProblem;
use uom::si::angle::radian;

use crate::{
    AnnulusLoads, BladeElement, InductionState, MomentumError, MomentumModel,
    OperatingCondition, TangentialInduction, TipLoss,
};

/// Maps annulus loads back to induction through momentum theory.
pub(super) struct InductionProblem<'a, M: ?Sized> {
    momentum: &'a M,
    tangential: TangentialInduction,
    tip_loss: TipLoss,
    blades: usize,
    mu: f64,
    solidity: f64,
    tsr: f64,
    yaw: f64,
}

impl<'a, M: MomentumModel + ?Sized> InductionProblem<'a, M> {
    pub(super) fn new(
        momentum: &'a M,
        tangential: TangentialInduction,
        tip_loss: TipLoss,
        element: &BladeElement<'_>,
        condition: &OperatingCondition,
    ) -> Self {
        Self {
            momentum,
            tangential,
            tip_loss,
            blades: element.blades(),
            mu: element.annulus().mu,
            solidity: element.solidity(),
            tsr: condition.tsr(),
            yaw: condition.yaw().get::<radian>(),
        }
    }

    pub(super) fn tip_loss_factor(&self, loads: &AnnulusLoads) -> f64 {
        self.tip_loss.factor(self.blades, self.mu, loads.phi)
    }
}

impl<M: MomentumModel + ?Sized> FixedPointProblem<2> for InductionProblem<'_, M> {
    type Input = InductionState;
    type Output = AnnulusLoads;
    type Error = MomentumError;

    fn input(&self, x: &[f64; 2]) -> Result<InductionState, MomentumError> {
        Ok(InductionState::from(*x))
    }

    fn update(
        &self,
        state: &InductionState,
        loads: &AnnulusLoads,
    ) -> Result<[f64; 2], MomentumError> {
        let factor = self.tip_loss_factor(loads);
        let axial = self.momentum.induction(loads.ct_local / factor, self.yaw)?;
        let tangential = self.tangential.induction(
            self.solidity,
            loads.tangential_load,
            self.tsr,
            self.mu,
            state.axial,
            self.yaw,
        )?;
        Ok([axial, tangential])
    }
}
