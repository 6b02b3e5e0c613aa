use serde::{Deserialize, Serialize};

/// Behavior outside the tabulated angle-of-attack range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Extrapolate {
    /// Continue the end segments linearly.
    Enable,
    /// Hold the value at the nearest end of the table.
    Clamp,
    /// Fail with [`LookupError::AngleOutOfRange`](crate::LookupError::AngleOutOfRange).
    #[default]
    Error,
}

impl From<Extrapolate> for ninterp::interpolator::Extrapolate<f64> {
    fn from(value: Extrapolate) -> Self {
        match value {
            Extrapolate::Enable => ninterp::interpolator::Extrapolate::Enable,
            Extrapolate::Clamp => ninterp::interpolator::Extrapolate::Clamp,
            Extrapolate::Error => ninterp::interpolator::Extrapolate::Error,
        }
    }
}

/// Behavior for Reynolds numbers outside the tabulated range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReynoldsPolicy {
    /// Use the nearest table.
    #[default]
    Clamp,
    /// Fail with [`LookupError::ReynoldsOutOfRange`](crate::LookupError::ReynoldsOutOfRange).
    Error,
}
