use std::collections::BTreeMap;

use crate::LookupError;

use super::{Coefficients, Polar};

/// Polars keyed by airfoil identifier.
#[derive(Debug, Default)]
pub struct AirfoilLibrary {
    polars: BTreeMap<String, Polar>,
}

impl AirfoilLibrary {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `polar` under `id`, returning any polar it replaces.
    pub fn insert(&mut self, id: impl Into<String>, polar: Polar) -> Option<Polar> {
        self.polars.insert(id.into(), polar)
    }

    /// Returns the polar registered under `id`.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::UnknownAirfoil`] if nothing is registered.
    pub fn get(&self, id: &str) -> Result<&Polar, LookupError> {
        self.polars
            .get(id)
            .ok_or_else(|| LookupError::UnknownAirfoil { id: id.to_owned() })
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.polars.contains_key(id)
    }

    /// Looks up lift and drag for airfoil `id`.
    ///
    /// # Errors
    ///
    /// Fails for unknown airfoils and for any error of [`Polar::lookup`].
    pub fn lookup(
        &self,
        id: &str,
        alpha: f64,
        reynolds: Option<f64>,
    ) -> Result<Coefficients, LookupError> {
        self.get(id)?.lookup(alpha, reynolds)
    }

    /// Iterates over registered identifiers in sorted order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.polars.keys().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.polars.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.polars.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, Polar)> for AirfoilLibrary {
    fn from_iter<T: IntoIterator<Item = (S, Polar)>>(iter: T) -> Self {
        Self {
            polars: iter.into_iter().map(|(id, polar)| (id.into(), polar)).collect(),
        }
    }
}
