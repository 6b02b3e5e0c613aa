use std::fmt;

use ndarray::Array1;
use ninterp::{
    prelude::{Interp1DOwned, Interpolator},
    strategy::Linear,
};
use serde::{Deserialize, Serialize};

use crate::{ConfigurationError, LookupError};

use super::{Coefficients, Extrapolate};

/// Raw polar columns as read from a configuration file.
///
/// Angles are in radians. The Reynolds number may be omitted for a polar with
/// a single table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolarData {
    #[serde(default)]
    pub reynolds: Option<f64>,
    pub alpha: Vec<f64>,
    pub cl: Vec<f64>,
    pub cd: Vec<f64>,
}

/// One validated lift/drag table, piecewise linear in angle of attack.
pub struct PolarTable {
    reynolds: Option<f64>,
    alpha_range: [f64; 2],
    extrapolate: Extrapolate,
    cl: Interp1DOwned<f64, Linear>,
    cd: Interp1DOwned<f64, Linear>,
}

impl PolarTable {
    /// Builds a table from angle of attack, lift and drag columns.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigurationError`] if the columns differ in length, hold
    /// fewer than two points or non-finite values, or if the angles are not
    /// strictly increasing.
    pub fn new(
        alpha: Vec<f64>,
        cl: Vec<f64>,
        cd: Vec<f64>,
        extrapolate: Extrapolate,
    ) -> Result<Self, ConfigurationError> {
        if alpha.len() != cl.len() || alpha.len() != cd.len() {
            return Err(ConfigurationError::PolarLengthMismatch {
                alpha: alpha.len(),
                cl: cl.len(),
                cd: cd.len(),
            });
        }
        if alpha.len() < 2 {
            return Err(ConfigurationError::PolarTooShort { len: alpha.len() });
        }
        if let Some(index) = alpha
            .iter()
            .enumerate()
            .position(|(i, a)| !a.is_finite() || (i > 0 && *a <= alpha[i - 1]))
        {
            return Err(ConfigurationError::PolarNotIncreasing { index });
        }
        if let Some(index) = cl
            .iter()
            .zip(&cd)
            .position(|(l, d)| !l.is_finite() || !d.is_finite())
        {
            return Err(ConfigurationError::PolarNonFinite { index });
        }

        let alpha_range = [alpha[0], alpha[alpha.len() - 1]];
        let alpha = Array1::from(alpha);
        let cl = Interp1DOwned::new(alpha.clone(), Array1::from(cl), Linear, extrapolate.into())?;
        let cd = Interp1DOwned::new(alpha, Array1::from(cd), Linear, extrapolate.into())?;

        Ok(Self {
            reynolds: None,
            alpha_range,
            extrapolate,
            cl,
            cd,
        })
    }

    /// Validates raw polar data into a table.
    ///
    /// # Errors
    ///
    /// Fails as [`PolarTable::new`], or if the Reynolds number is present but
    /// not finite and positive.
    pub fn from_data(data: &PolarData, extrapolate: Extrapolate) -> Result<Self, ConfigurationError> {
        let table = Self::new(
            data.alpha.clone(),
            data.cl.clone(),
            data.cd.clone(),
            extrapolate,
        )?;
        match data.reynolds {
            Some(reynolds) => table.with_reynolds(reynolds),
            None => Ok(table),
        }
    }

    /// Tags the table with the Reynolds number it was measured at.
    ///
    /// # Errors
    ///
    /// Returns an error if `reynolds` is not finite and positive.
    pub fn with_reynolds(mut self, reynolds: f64) -> Result<Self, ConfigurationError> {
        if !reynolds.is_finite() || reynolds <= 0.0 {
            return Err(ConfigurationError::InvalidReynolds { value: reynolds });
        }
        self.reynolds = Some(reynolds);
        Ok(self)
    }

    #[must_use]
    pub fn reynolds(&self) -> Option<f64> {
        self.reynolds
    }

    /// Returns the tabulated angle-of-attack range `[min, max]` in radians.
    #[must_use]
    pub fn alpha_range(&self) -> [f64; 2] {
        self.alpha_range
    }

    #[must_use]
    pub fn extrapolate(&self) -> Extrapolate {
        self.extrapolate
    }

    /// Interpolates lift and drag at `alpha` radians.
    ///
    /// # Errors
    ///
    /// Returns a [`LookupError`] if `alpha` is not finite, or if it lies
    /// outside the table under [`Extrapolate::Error`].
    pub fn lookup(&self, alpha: f64) -> Result<Coefficients, LookupError> {
        if !alpha.is_finite() {
            return Err(LookupError::NonFiniteAngle { alpha });
        }
        let [min, max] = self.alpha_range;
        if self.extrapolate == Extrapolate::Error && !(min..=max).contains(&alpha) {
            return Err(LookupError::AngleOutOfRange { alpha, min, max });
        }

        Ok(Coefficients {
            cl: self.cl.interpolate(&[alpha])?,
            cd: self.cd.interpolate(&[alpha])?,
        })
    }
}

impl fmt::Debug for PolarTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PolarTable")
            .field("reynolds", &self.reynolds)
            .field("alpha_range", &self.alpha_range)
            .field("extrapolate", &self.extrapolate)
            .finish_non_exhaustive()
    }
}
