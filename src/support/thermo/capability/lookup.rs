use uom::si::f64::{MassDensity, Pressure, ThermodynamicTemperature, Velocity};

use crate::support::thermo::PropertyError;
use crate::support::units::{SpecificEnthalpy, SpecificEntropy};

/// Equilibrium properties returned by a [`PropertyLookup`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EquilibriumProperties {
    pub density: MassDensity,
    pub sound_speed: Velocity,
    pub pressure: Pressure,
    pub temperature: ThermodynamicTemperature,
}

/// Equilibrium property lookup keyed by entropy and enthalpy.
///
/// This is the only way the nozzle solvers learn about the gas. Real-gas
/// data is usually supplied by a scattered-data interpolator fitted over a
/// reference table; any transform applied during fitting (such as working
/// in log space) is internal to the implementation, which is always called
/// with natural values.
///
/// Implementations must be deterministic and free of side effects.
/// Queries outside the fitted support should return
/// [`PropertyError::OutOfDomain`] instead of extrapolating.
pub trait PropertyLookup {
    /// Returns density, speed of sound, pressure, and temperature at `(s, h)`.
    ///
    /// # Errors
    ///
    /// Returns [`PropertyError`] if the properties cannot be evaluated.
    fn lookup(
        &self,
        entropy: SpecificEntropy,
        enthalpy: SpecificEnthalpy,
    ) -> Result<EquilibriumProperties, PropertyError>;
}

impl<L: PropertyLookup + ?Sized> PropertyLookup for &L {
    fn lookup(
        &self,
        entropy: SpecificEntropy,
        enthalpy: SpecificEnthalpy,
    ) -> Result<EquilibriumProperties, PropertyError> {
        (**self).lookup(entropy, enthalpy)
    }
}

/// Maps stagnation conditions to reservoir enthalpy and entropy.
pub trait ReservoirLookup {
    /// Returns `(h0, s0)` for a reservoir at `(p0, T0)`.
    ///
    /// # Errors
    ///
    /// Returns [`PropertyError`] if the reservoir state cannot be evaluated.
    fn reservoir(
        &self,
        pressure: Pressure,
        temperature: ThermodynamicTemperature,
    ) -> Result<(SpecificEnthalpy, SpecificEntropy), PropertyError>;
}
