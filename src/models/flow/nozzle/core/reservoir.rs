use uom::{
    ConstZero,
    si::{
        available_energy::joule_per_kilogram,
        f64::{Pressure, ThermodynamicTemperature, Velocity},
        velocity::meter_per_second,
    },
};

use crate::support::{
    thermo::{PropertyError, ReservoirLookup},
    units::{SpecificEnthalpy, SpecificEntropy},
};

/// Stagnation pressure and temperature of the gas entering the nozzle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stagnation {
    pub pressure: Pressure,
    pub temperature: ThermodynamicTemperature,
}

/// Stagnation enthalpy `h0` and entropy `s0` of the flow.
///
/// Both are conserved along an adiabatic, isentropic nozzle, so every
/// station shares `s0` and satisfies `h + u²/2 = h0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reservoir {
    pub enthalpy: SpecificEnthalpy,
    pub entropy: SpecificEntropy,
}

impl Reservoir {
    /// Creates a reservoir from stagnation enthalpy and entropy.
    #[must_use]
    pub fn new(enthalpy: SpecificEnthalpy, entropy: SpecificEntropy) -> Self {
        Self { enthalpy, entropy }
    }

    /// Creates a reservoir from stagnation pressure and temperature.
    ///
    /// # Errors
    ///
    /// Returns [`PropertyError`] if the lookup cannot evaluate the state.
    pub fn from_stagnation(
        lookup: &impl ReservoirLookup,
        stagnation: Stagnation,
    ) -> Result<Self, PropertyError> {
        let (enthalpy, entropy) = lookup.reservoir(stagnation.pressure, stagnation.temperature)?;
        Ok(Self { enthalpy, entropy })
    }

    /// Returns the flow velocity `u = √(2·(h0 − h))` at static enthalpy `h`.
    ///
    /// Enthalpies above `h0` yield zero velocity.
    #[must_use]
    pub fn velocity(&self, enthalpy: SpecificEnthalpy) -> Velocity {
        let dh = self.enthalpy - enthalpy;
        if dh <= SpecificEnthalpy::ZERO {
            return Velocity::ZERO;
        }
        Velocity::new::<meter_per_second>((2.0 * dh.get::<joule_per_kilogram>()).sqrt())
    }
}
