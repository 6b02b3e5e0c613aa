use std::fmt;

/// Axial and tangential induction factors of one annulus.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct InductionState {
    pub axial: f64,
    pub tangential: f64,
}

impl InductionState {
    #[must_use]
    pub fn new(axial: f64, tangential: f64) -> Self {
        Self { axial, tangential }
    }

    pub(crate) fn as_array(self) -> [f64; 2] {
        [self.axial, self.tangential]
    }
}

impl From<[f64; 2]> for InductionState {
    fn from([axial, tangential]: [f64; 2]) -> Self {
        Self { axial, tangential }
    }
}

impl fmt::Display for InductionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "a = {:.6}, a' = {:.6}", self.axial, self.tangential)
    }
}
