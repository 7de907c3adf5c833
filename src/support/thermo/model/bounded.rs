//! Support-window guard for property lookups.
//!
//! Interpolators fitted over scattered tabular data return smooth numbers
//! well outside the cloud of points they were trained on. [`Bounded`] wraps
//! any [`PropertyLookup`] and rejects queries outside a rectangular
//! `(s, h)` window with [`PropertyError::OutOfDomain`], so extrapolated values
//! never reach a solver.

use uom::si::{
    available_energy::joule_per_kilogram, specific_heat_capacity::joule_per_kilogram_kelvin,
};

use crate::support::thermo::{EquilibriumProperties, PropertyError, PropertyLookup};
use crate::support::units::{SpecificEnthalpy, SpecificEntropy};

/// A [`PropertyLookup`] restricted to a closed `(s, h)` window.
#[derive(Debug, Clone)]
pub struct Bounded<L> {
    inner: L,
    entropy: (SpecificEntropy, SpecificEntropy),
    enthalpy: (SpecificEnthalpy, SpecificEnthalpy),
}

impl<L: PropertyLookup> Bounded<L> {
    /// Wraps `inner`, accepting only `s_min ≤ s ≤ s_max` and `h_min ≤ h ≤ h_max`.
    ///
    /// # Errors
    ///
    /// Returns [`PropertyError::InvalidState`] if either range is empty or not a number.
    pub fn new(
        inner: L,
        entropy: (SpecificEntropy, SpecificEntropy),
        enthalpy: (SpecificEnthalpy, SpecificEnthalpy),
    ) -> Result<Self, PropertyError> {
        // `!(a <= b)` also rejects NaN bounds.
        if !(entropy.0 <= entropy.1) || !(enthalpy.0 <= enthalpy.1) {
            return Err(PropertyError::InvalidState {
                context: format!("empty support window: s={entropy:?}, h={enthalpy:?}"),
            });
        }

        Ok(Self {
            inner,
            entropy,
            enthalpy,
        })
    }

    /// Returns the wrapped lookup.
    pub fn inner(&self) -> &L {
        &self.inner
    }

    /// Returns `true` if `(s, h)` lies inside the support window.
    pub fn contains(&self, entropy: SpecificEntropy, enthalpy: SpecificEnthalpy) -> bool {
        (self.entropy.0..=self.entropy.1).contains(&entropy)
            && (self.enthalpy.0..=self.enthalpy.1).contains(&enthalpy)
    }
}

impl<L: PropertyLookup> PropertyLookup for Bounded<L> {
    fn lookup(
        &self,
        entropy: SpecificEntropy,
        enthalpy: SpecificEnthalpy,
    ) -> Result<EquilibriumProperties, PropertyError> {
        if !self.contains(entropy, enthalpy) {
            return Err(PropertyError::OutOfDomain {
                context: format!(
                    "(s, h) = ({} J/kg·K, {} J/kg) is outside the fitted support",
                    entropy.get::<joule_per_kilogram_kelvin>(),
                    enthalpy.get::<joule_per_kilogram>(),
                ),
            });
        }

        self.inner.lookup(entropy, enthalpy)
    }
}
