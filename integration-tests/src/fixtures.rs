use std::{
    collections::BTreeMap,
    f64::consts::{PI, TAU},
};

use bemrotor::{
    AirfoilLibrary, Annulus, BladeDefinition, ConfigurationError, Polar, PolarData, PolarTable,
    RotorGeometry,
    polar::{Extrapolate, ReynoldsPolicy},
};
use serde::Deserialize;
use uom::si::{f64::Length, length::meter};

/// A rotor and its polars as written in a TOML file.
#[derive(Debug, Deserialize)]
pub struct RotorConfig {
    pub blade: BladeDefinition,
    pub annuli: usize,
    pub polars: BTreeMap<String, PolarConfig>,
}

/// One airfoil's polar tables and lookup policies.
#[derive(Debug, Deserialize)]
pub struct PolarConfig {
    #[serde(default)]
    pub extrapolate: Extrapolate,
    #[serde(default)]
    pub reynolds_policy: ReynoldsPolicy,
    #[serde(default)]
    pub reference_reynolds: Option<f64>,
    pub tables: Vec<PolarData>,
}

impl PolarConfig {
    /// Validates the tables into a [`Polar`].
    ///
    /// # Errors
    ///
    /// Returns the first validation failure.
    pub fn build(&self) -> Result<Polar, ConfigurationError> {
        let polar = Polar::from_data(&self.tables, self.extrapolate, self.reynolds_policy)?;
        match self.reference_reynolds {
            Some(reynolds) => polar.with_reference_reynolds(reynolds),
            None => Ok(polar),
        }
    }
}

impl RotorConfig {
    /// Parses a rotor definition from TOML.
    ///
    /// # Errors
    ///
    /// Returns the parser error for malformed input.
    pub fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Builds the discretized geometry and the airfoil library.
    ///
    /// # Errors
    ///
    /// Returns the first validation failure.
    pub fn build(&self) -> Result<(RotorGeometry, AirfoilLibrary), ConfigurationError> {
        let geometry = RotorGeometry::discretize(&self.blade, self.annuli)?;
        let library = self
            .polars
            .iter()
            .map(|(id, polar)| Ok((id.as_str(), polar.build()?)))
            .collect::<Result<AirfoilLibrary, ConfigurationError>>()?;
        Ok((geometry, library))
    }
}

/// The rotor definition in `tests/data/rotor.toml`.
pub const ROTOR_TOML: &str = include_str!("../tests/data/rotor.toml");

/// Thin-airfoil polar `C_l = 2πα`, `C_d = 0`.
#[must_use]
pub fn flat_polar() -> Polar {
    let alpha = vec![-PI, PI];
    let cl = alpha.iter().map(|a| TAU * a).collect();
    let table = PolarTable::new(alpha, cl, vec![0.0; 2], Extrapolate::Enable)
        .unwrap_or_else(|error| panic!("flat polar is valid: {error}"));
    Polar::single(table)
}

/// Polar whose lift jumps from zero to three at zero angle of attack.
#[must_use]
pub fn step_polar() -> Polar {
    let table = PolarTable::new(
        vec![-PI, 0.0, 1e-6, PI],
        vec![0.0, 0.0, 3.0, 3.0],
        vec![0.0; 4],
        Extrapolate::Clamp,
    )
    .unwrap_or_else(|error| panic!("step polar is valid: {error}"));
    Polar::single(table)
}

/// Untwisted annuli covering the disc whose chord makes every annulus reach
/// `a = 1/3` on a flat polar at tip-speed ratio `tsr` without swirl.
///
/// At `a = 1/3` momentum gives `C_T = 8/9`, so each chord solves
/// `σ W² 2πφ cos φ = 8/9` with `tan φ = (2/3) / (λμ)`.
#[must_use]
pub fn betz_geometry(tsr: f64, count: usize, blades: usize) -> RotorGeometry {
    let width = 1.0 / count as f64;
    let annuli = (0..count)
        .map(|i| {
            let mu = (i as f64 + 0.5) * width;
            let axial: f64 = 2.0 / 3.0;
            let tangential = tsr * mu;
            let phi = axial.atan2(tangential);
            let w2 = axial * axial + tangential * tangential;
            let solidity = (8.0 / 9.0) / (w2 * TAU * phi * phi.cos());
            Annulus {
                mu,
                width,
                chord: solidity * TAU * mu / blades as f64,
                twist: 0.0,
                airfoil: "flat".into(),
            }
        })
        .collect();

    RotorGeometry::new(Length::new::<meter>(50.0), blades, annuli)
        .unwrap_or_else(|error| panic!("betz geometry is valid: {error}"))
}
