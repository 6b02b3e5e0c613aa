//! Tabulated airfoil lift and drag.
//!
//! A [`Polar`] holds one or more [`PolarTable`]s, each measured at a Reynolds
//! number. Lookups are piecewise linear in angle of attack within a table and
//! linear in Reynolds number between the two tables that bracket it.

mod extrapolate;
mod library;
mod table;

pub use extrapolate::{Extrapolate, ReynoldsPolicy};
pub use library::AirfoilLibrary;
pub use table::{PolarData, PolarTable};

use crate::{ConfigurationError, LookupError};

/// Lift and drag coefficients at one angle of attack.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coefficients {
    pub cl: f64,
    pub cd: f64,
}

impl Coefficients {
    fn lerp(self, other: Self, weight: f64) -> Self {
        Self {
            cl: self.cl + weight * (other.cl - self.cl),
            cd: self.cd + weight * (other.cd - self.cd),
        }
    }
}

/// Lift and drag for one airfoil, possibly over several Reynolds numbers.
#[derive(Debug)]
pub struct Polar {
    tables: Vec<PolarTable>,
    reynolds_policy: ReynoldsPolicy,
    reference_reynolds: Option<f64>,
}

impl Polar {
    /// Wraps a single table, used at every Reynolds number.
    #[must_use]
    pub fn single(table: PolarTable) -> Self {
        Self {
            tables: vec![table],
            reynolds_policy: ReynoldsPolicy::default(),
            reference_reynolds: None,
        }
    }

    /// Builds a polar from tables measured at different Reynolds numbers.
    ///
    /// Tables are sorted by Reynolds number. A single table needs no
    /// Reynolds number.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigurationError`] if there are no tables, or if several
    /// tables are given and any lacks a Reynolds number or two share one.
    pub fn new(
        mut tables: Vec<PolarTable>,
        reynolds_policy: ReynoldsPolicy,
    ) -> Result<Self, ConfigurationError> {
        if tables.is_empty() {
            return Err(ConfigurationError::EmptyPolar);
        }
        if tables.len() > 1 {
            if tables.iter().any(|table| table.reynolds().is_none()) {
                return Err(ConfigurationError::MissingReynolds);
            }
            tables.sort_by(|a, b| reynolds_of(a).total_cmp(&reynolds_of(b)));
            if let Some(pair) = tables
                .windows(2)
                .find(|pair| reynolds_of(&pair[0]) == reynolds_of(&pair[1]))
            {
                return Err(ConfigurationError::DuplicateReynolds {
                    value: reynolds_of(&pair[0]),
                });
            }
        }

        Ok(Self {
            tables,
            reynolds_policy,
            reference_reynolds: None,
        })
    }

    /// Builds a polar straight from raw data.
    ///
    /// # Errors
    ///
    /// Fails if any table is invalid or the set of tables is inconsistent.
    pub fn from_data(
        data: &[PolarData],
        extrapolate: Extrapolate,
        reynolds_policy: ReynoldsPolicy,
    ) -> Result<Self, ConfigurationError> {
        let tables = data
            .iter()
            .map(|table| PolarTable::from_data(table, extrapolate))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(tables, reynolds_policy)
    }

    /// Sets the Reynolds number used when a lookup supplies none.
    ///
    /// # Errors
    ///
    /// Returns an error if `reynolds` is not finite and positive.
    pub fn with_reference_reynolds(mut self, reynolds: f64) -> Result<Self, ConfigurationError> {
        if !reynolds.is_finite() || reynolds <= 0.0 {
            return Err(ConfigurationError::InvalidReynolds { value: reynolds });
        }
        self.reference_reynolds = Some(reynolds);
        Ok(self)
    }

    #[must_use]
    pub fn tables(&self) -> &[PolarTable] {
        &self.tables
    }

    /// Evaluates lift and drag at `alpha` radians.
    ///
    /// With several tables the Reynolds number comes from `reynolds`, falling
    /// back to the reference Reynolds number.
    ///
    /// # Errors
    ///
    /// Returns a [`LookupError`] if the angle is out of range under the
    /// table's extrapolation policy, if no Reynolds number is available for a
    /// multi-table polar, or if it is outside the tables under
    /// [`ReynoldsPolicy::Error`].
    pub fn lookup(&self, alpha: f64, reynolds: Option<f64>) -> Result<Coefficients, LookupError> {
        let [first, .., last] = self.tables.as_slice() else {
            return self.tables[0].lookup(alpha);
        };

        let re = reynolds
            .or(self.reference_reynolds)
            .ok_or(LookupError::MissingReynolds)?;
        let (min, max) = (reynolds_of(first), reynolds_of(last));

        if !(re > min && re < max) {
            if self.reynolds_policy == ReynoldsPolicy::Error && !(min..=max).contains(&re) {
                return Err(LookupError::ReynoldsOutOfRange {
                    reynolds: re,
                    min,
                    max,
                });
            }
            let nearest = if re >= max { last } else { first };
            return nearest.lookup(alpha);
        }

        let upper = self
            .tables
            .iter()
            .position(|table| reynolds_of(table) >= re)
            .unwrap_or(self.tables.len() - 1);
        let (low, high) = (&self.tables[upper - 1], &self.tables[upper]);
        let weight = (re - reynolds_of(low)) / (reynolds_of(high) - reynolds_of(low));

        Ok(low.lookup(alpha)?.lerp(high.lookup(alpha)?, weight))
    }
}

fn reynolds_of(table: &PolarTable) -> f64 {
    table.reynolds().unwrap_or(f64::NAN)
}
