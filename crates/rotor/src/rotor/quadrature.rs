use ndarray::Array1;
use serde::{Deserialize, Serialize};

use crate::RotorGeometry;

/// Radial integration rule for `∫ f(μ) 2μ dμ` over the span of the annuli.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Quadrature {
    /// Trapezoidal rule through the annulus centers, extended to the inner
    /// and outer edges with `f` held at its end values.
    #[default]
    Trapezoidal,
    /// Midpoint rule using each annulus width.
    AnnulusWidth,
}

impl Quadrature {
    /// Returns weights `w` such that `Σ w_i f_i ≈ ∫ f(μ) 2μ dμ`.
    ///
    /// Both rules integrate a constant `f` exactly over the full span, so the
    /// weights sum to `outer² − inner²`.
    #[must_use]
    pub fn weights(self, geometry: &RotorGeometry) -> Array1<f64> {
        match self {
            Self::AnnulusWidth => geometry
                .annuli()
                .iter()
                .map(|annulus| 2.0 * annulus.mu * annulus.width)
                .collect(),
            Self::Trapezoidal => trapezoid_weights(geometry),
        }
    }
}

/// Trapezoid weights on the nodes `inner, μ_0, …, μ_{n-1}, outer`.
///
/// The integrand `2μ` is linear, so each panel contributes `μ_i·h` to both of
/// its interior ends; the end panels fold into the first and last annulus.
fn trapezoid_weights(geometry: &RotorGeometry) -> Array1<f64> {
    let mu = geometry.mu();
    let [inner, outer] = geometry.span();
    let last = mu.len() - 1;

    let mut weights = Array1::zeros(mu.len());
    for i in 0..last {
        let h = mu[i + 1] - mu[i];
        weights[i] += mu[i] * h;
        weights[i + 1] += mu[i + 1] * h;
    }
    weights[0] += mu[0] * mu[0] - inner * inner;
    weights[last] += outer * outer - mu[last] * mu[last];
    weights
}
