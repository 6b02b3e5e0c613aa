//! Rotor geometry in radius-normalized annuli.

mod blade;

pub use blade::{BladeDefinition, BladeStation};

use ndarray::Array1;
use serde::{Deserialize, Serialize};
use uom::si::{f64::Length, length::meter};

use crate::ConfigurationError;

/// Largest gap or overlap allowed between neighbouring annuli.
const EDGE_TOLERANCE: f64 = 1e-9;

/// One radial strip of the rotor disc.
///
/// `mu` is the center radius and `width` the radial extent, both divided by
/// the rotor radius. `chord` is likewise normalized and `twist` is in radians.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annulus {
    pub mu: f64,
    pub width: f64,
    pub chord: f64,
    pub twist: f64,
    pub airfoil: String,
}

impl Annulus {
    /// Returns the inner and outer edges `mu ∓ width / 2`.
    #[must_use]
    pub fn edges(&self) -> [f64; 2] {
        [self.mu - 0.5 * self.width, self.mu + 0.5 * self.width]
    }
}

/// A validated, immutable set of annuli covering part of the rotor disc.
#[derive(Debug, Clone, PartialEq)]
pub struct RotorGeometry {
    radius: Length,
    blades: usize,
    annuli: Vec<Annulus>,
}

impl RotorGeometry {
    /// Validates annuli ordered from root to tip.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigurationError`] if there are fewer than two annuli or
    /// no blades, the radius is not positive, centers are not strictly
    /// increasing, neighbouring edges leave gaps or overlaps, the annuli leave
    /// the unit disc, or an annulus has a non-positive width or chord.
    pub fn new(
        radius: Length,
        blades: usize,
        annuli: Vec<Annulus>,
    ) -> Result<Self, ConfigurationError> {
        let radius_m = radius.get::<meter>();
        if !radius_m.is_finite() || radius_m <= 0.0 {
            return Err(ConfigurationError::InvalidRadius);
        }
        if blades == 0 {
            return Err(ConfigurationError::NoBlades);
        }
        if annuli.len() < 2 {
            return Err(ConfigurationError::TooFewAnnuli {
                count: annuli.len(),
            });
        }

        for (index, annulus) in annuli.iter().enumerate() {
            check_annulus(index, annulus)?;
        }

        for (index, pair) in annuli.windows(2).enumerate() {
            let (inner, outer) = (&pair[0], &pair[1]);
            if outer.mu <= inner.mu {
                return Err(ConfigurationError::NonIncreasingRadius {
                    index: index + 1,
                    mu: outer.mu,
                    previous: inner.mu,
                });
            }
            let mismatch = outer.edges()[0] - inner.edges()[1];
            if mismatch.abs() > EDGE_TOLERANCE {
                return Err(ConfigurationError::AnnulusEdges { index, mismatch });
            }
        }

        let inner = annuli[0].edges()[0];
        let outer = annuli[annuli.len() - 1].edges()[1];
        if inner < -EDGE_TOLERANCE || outer > 1.0 + EDGE_TOLERANCE {
            return Err(ConfigurationError::OutsideDisc { inner, outer });
        }

        Ok(Self {
            radius,
            blades,
            annuli,
        })
    }

    /// Builds `count` equal-width annuli spanning hub to tip of a blade.
    ///
    /// Chord and twist are interpolated linearly between stations (held
    /// constant beyond the first and last station). Each annulus takes the
    /// airfoil of the nearest station.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigurationError`] if the blade definition is invalid or
    /// `count` is less than two.
    pub fn discretize(blade: &BladeDefinition, count: usize) -> Result<Self, ConfigurationError> {
        blade.annuli(count)
    }

    #[must_use]
    pub fn radius(&self) -> Length {
        self.radius
    }

    #[must_use]
    pub fn blades(&self) -> usize {
        self.blades
    }

    #[must_use]
    pub fn annuli(&self) -> &[Annulus] {
        &self.annuli
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.annuli.len()
    }

    /// Always false; a valid geometry holds at least two annuli.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.annuli.is_empty()
    }

    /// Returns the normalized annulus centers.
    #[must_use]
    pub fn mu(&self) -> Array1<f64> {
        self.annuli.iter().map(|annulus| annulus.mu).collect()
    }

    /// Returns the normalized radial span `[inner, outer]` covered by annuli.
    #[must_use]
    pub fn span(&self) -> [f64; 2] {
        [
            self.annuli[0].edges()[0],
            self.annuli[self.annuli.len() - 1].edges()[1],
        ]
    }
}

fn check_annulus(index: usize, annulus: &Annulus) -> Result<(), ConfigurationError> {
    let reason = if !annulus.mu.is_finite() || annulus.mu <= 0.0 || annulus.mu > 1.0 {
        "center radius must lie in (0, 1]"
    } else if !annulus.width.is_finite() || annulus.width <= 0.0 {
        "width must be finite and positive"
    } else if !annulus.chord.is_finite() || annulus.chord <= 0.0 {
        "chord must be finite and positive"
    } else if !annulus.twist.is_finite() {
        "twist must be finite"
    } else if annulus.airfoil.is_empty() {
        "airfoil identifier is empty"
    } else {
        return Ok(());
    };
    Err(ConfigurationError::InvalidAnnulus { index, reason })
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    fn annulus(mu: f64, width: f64) -> Annulus {
        Annulus {
            mu,
            width,
            chord: 0.05,
            twist: 0.0,
            airfoil: "foil".into(),
        }
    }

    fn radius() -> Length {
        Length::new::<meter>(50.0)
    }

    #[test]
    fn accepts_contiguous_annuli() {
        let geometry = RotorGeometry::new(
            radius(),
            3,
            vec![annulus(0.3, 0.2), annulus(0.55, 0.3), annulus(0.85, 0.3)],
        )
        .unwrap();

        assert_eq!(geometry.len(), 3);
        let [inner, outer] = geometry.span();
        assert_relative_eq!(inner, 0.2);
        assert_relative_eq!(outer, 1.0);
    }

    #[test]
    fn rejects_gaps_and_overlaps() {
        let gap = RotorGeometry::new(radius(), 3, vec![annulus(0.3, 0.2), annulus(0.6, 0.2)]);
        assert!(matches!(
            gap,
            Err(ConfigurationError::AnnulusEdges { index: 0, .. })
        ));

        let overlap = RotorGeometry::new(radius(), 3, vec![annulus(0.3, 0.2), annulus(0.45, 0.2)]);
        assert!(matches!(
            overlap,
            Err(ConfigurationError::AnnulusEdges { index: 0, .. })
        ));
    }

    #[test]
    fn rejects_unordered_annuli() {
        let result = RotorGeometry::new(radius(), 3, vec![annulus(0.6, 0.2), annulus(0.4, 0.2)]);
        assert!(matches!(
            result,
            Err(ConfigurationError::NonIncreasingRadius { index: 1, .. })
        ));
    }

    #[test]
    fn rejects_annuli_beyond_the_tip() {
        let result = RotorGeometry::new(radius(), 3, vec![annulus(0.8, 0.2), annulus(1.0, 0.2)]);
        assert!(matches!(
            result,
            Err(ConfigurationError::OutsideDisc { .. })
        ));
    }

    #[test]
    fn rejects_degenerate_inputs() {
        let single = RotorGeometry::new(radius(), 3, vec![annulus(0.5, 0.2)]);
        assert_eq!(
            single.unwrap_err(),
            ConfigurationError::TooFewAnnuli { count: 1 }
        );

        let bladeless = RotorGeometry::new(radius(), 0, vec![annulus(0.3, 0.2), annulus(0.5, 0.2)]);
        assert_eq!(bladeless.unwrap_err(), ConfigurationError::NoBlades);

        let mut flat = annulus(0.5, 0.2);
        flat.chord = 0.0;
        let result = RotorGeometry::new(radius(), 3, vec![annulus(0.3, 0.2), flat]);
        assert!(matches!(
            result,
            Err(ConfigurationError::InvalidAnnulus { index: 1, .. })
        ));

        let result = RotorGeometry::new(
            Length::new::<meter>(0.0),
            3,
            vec![annulus(0.3, 0.2), annulus(0.5, 0.2)],
        );
        assert_eq!(result.unwrap_err(), ConfigurationError::InvalidRadius);
    }
}
