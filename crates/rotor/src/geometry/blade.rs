use ndarray::Array1;
use ninterp::{
    interpolator::Extrapolate,
    prelude::{Interp1DOwned, Interpolator},
    strategy::Linear,
};
use serde::{Deserialize, Serialize};
use uom::si::{
    angle::radian,
    f64::{Angle, Length},
    length::meter,
};

use crate::ConfigurationError;

use super::{Annulus, RotorGeometry};

/// Spanwise blade layout in dimensional units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BladeDefinition {
    /// Tip radius.
    pub radius: Length,
    /// Radius where the aerodynamic blade starts.
    pub hub_radius: Length,
    pub blades: usize,
    /// Stations ordered from root to tip.
    pub stations: Vec<BladeStation>,
}

/// Blade section properties at one radius.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BladeStation {
    pub radius: Length,
    pub chord: Length,
    pub twist: Angle,
    pub airfoil: String,
}

impl BladeDefinition {
    pub(super) fn annuli(&self, count: usize) -> Result<RotorGeometry, ConfigurationError> {
        let tip = self.radius.get::<meter>();
        let hub = self.hub_radius.get::<meter>();
        if !tip.is_finite() || tip <= 0.0 {
            return Err(ConfigurationError::InvalidRadius);
        }
        if !hub.is_finite() || hub < 0.0 || hub >= tip {
            return Err(invalid("hub radius must lie in [0, tip radius)"));
        }
        if count < 2 {
            return Err(ConfigurationError::TooFewAnnuli { count });
        }
        if self.stations.len() < 2 {
            return Err(invalid("at least two stations are required"));
        }

        let mut mu = Vec::with_capacity(self.stations.len());
        let mut chord = Vec::with_capacity(self.stations.len());
        let mut twist = Vec::with_capacity(self.stations.len());
        for station in &self.stations {
            let r = station.radius.get::<meter>() / tip;
            if !r.is_finite() || mu.last().is_some_and(|&previous| r <= previous) {
                return Err(invalid("station radii must be finite and strictly increasing"));
            }
            mu.push(r);
            chord.push(station.chord.get::<meter>() / tip);
            twist.push(station.twist.get::<radian>());
        }

        let chord_at = Interp1DOwned::new(
            Array1::from(mu.clone()),
            Array1::from(chord),
            Linear,
            Extrapolate::Clamp,
        )?;
        let twist_at = Interp1DOwned::new(
            Array1::from(mu.clone()),
            Array1::from(twist),
            Linear,
            Extrapolate::Clamp,
        )?;

        let mu_hub = hub / tip;
        let width = (1.0 - mu_hub) / count as f64;
        let annuli = (0..count)
            .map(|i| {
                let center = mu_hub + (i as f64 + 0.5) * width;
                Ok(Annulus {
                    mu: center,
                    width,
                    chord: chord_at.interpolate(&[center]).map_err(|_| interp_failed())?,
                    twist: twist_at.interpolate(&[center]).map_err(|_| interp_failed())?,
                    airfoil: self.nearest_airfoil(&mu, center).to_owned(),
                })
            })
            .collect::<Result<Vec<_>, ConfigurationError>>()?;

        RotorGeometry::new(self.radius, self.blades, annuli)
    }

    fn nearest_airfoil(&self, mu: &[f64], center: f64) -> &str {
        let nearest = mu
            .iter()
            .enumerate()
            .min_by(|(_, a), (_, b)| (*a - center).abs().total_cmp(&(*b - center).abs()))
            .map_or(0, |(index, _)| index);
        &self.stations[nearest].airfoil
    }
}

fn invalid(reason: &'static str) -> ConfigurationError {
    ConfigurationError::InvalidBlade { reason }
}

fn interp_failed() -> ConfigurationError {
    invalid("blade properties could not be interpolated")
}
