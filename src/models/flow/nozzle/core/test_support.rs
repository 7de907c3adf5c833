use std::cell::Cell;

use uom::si::{
    area::square_meter,
    available_energy::joule_per_kilogram,
    f64::{
        Area, MassDensity, Pressure, SpecificHeatCapacity, ThermodynamicTemperature, Velocity,
    },
    mass_density::kilogram_per_cubic_meter,
    pressure::{atmosphere, pascal},
    ratio::ratio,
    specific_heat_capacity::joule_per_kilogram_kelvin,
    thermodynamic_temperature::kelvin,
    velocity::meter_per_second,
};

use crate::support::{
    thermo::{
        EquilibriumProperties, PropertyError, PropertyLookup,
        model::{
            Bounded, PerfectGas,
            perfect_gas::{PerfectGasFluid, PerfectGasParameters, PerfectGasReference},
        },
    },
    units::{SpecificEnthalpy, SpecificEntropy, SpecificGasConstant},
};

use super::{AreaProfile, ChokedFlow, Reservoir, Stagnation, ThroatConfig, solve_throat};

/// Air-like gas with `h = cp·T`, so `h0 = 3 MJ/kg` and `s0 = 9 kJ/kg·K`
/// describe a reservoir near 2985 K and 1.5 atm.
#[derive(Debug, Clone, Copy, Default)]
pub(super) struct SyntheticGas;

impl PerfectGasFluid for SyntheticGas {
    fn parameters() -> PerfectGasParameters {
        let cp = SpecificHeatCapacity::new::<joule_per_kilogram_kelvin>(1005.0);
        PerfectGasParameters::new(
            SpecificGasConstant::new::<joule_per_kilogram_kelvin>(287.053),
            cp,
        )
        .with_reference(PerfectGasReference::sensible(
            cp,
            ThermodynamicTemperature::new::<kelvin>(298.15),
            Pressure::new::<atmosphere>(1.0),
            SpecificEntropy::new::<joule_per_kilogram_kelvin>(6800.0),
        ))
    }
}

pub(super) fn synthetic_gas() -> PerfectGas<SyntheticGas> {
    PerfectGas::new().unwrap()
}

pub(super) fn reservoir() -> Reservoir {
    Reservoir::new(
        SpecificEnthalpy::new::<joule_per_kilogram>(3.0e6),
        SpecificEntropy::new::<joule_per_kilogram_kelvin>(9000.0),
    )
}

pub(super) fn stagnation() -> Stagnation {
    Stagnation {
        pressure: Pressure::new::<atmosphere>(1.5),
        temperature: ThermodynamicTemperature::new::<kelvin>(2500.0),
    }
}

/// `A(x) = 1 + x²` on 41 evenly spaced stations over `[-1, 1]`.
pub(super) fn quadratic_profile() -> AreaProfile {
    let x: Vec<f64> = (0..41).map(|i| -1.0 + f64::from(i) / 20.0).collect();
    let area: Vec<f64> = x.iter().map(|x| 1.0 + x * x).collect();
    AreaProfile::from_si(&x, &area).unwrap()
}

/// Closed-form sonic enthalpy `h* = 2·h0/(γ+1)` in J/kg.
pub(super) fn sonic_enthalpy(gas: &PerfectGas<SyntheticGas>, reservoir: &Reservoir) -> f64 {
    let gamma = gas.gamma().get::<ratio>();
    2.0 * reservoir.enthalpy.get::<joule_per_kilogram>() / (gamma + 1.0)
}

/// Restricts the gas to `0.6·h0 ≤ h ≤ h0`, cutting off the far supersonic branch.
pub(super) fn bounded_gas(gas: PerfectGas<SyntheticGas>) -> Bounded<PerfectGas<SyntheticGas>> {
    let h0 = reservoir().enthalpy;
    Bounded::new(
        gas,
        (
            SpecificEntropy::new::<joule_per_kilogram_kelvin>(8000.0),
            SpecificEntropy::new::<joule_per_kilogram_kelvin>(10000.0),
        ),
        (h0 * 0.6, h0),
    )
    .unwrap()
}

/// Restricts the gas to `0.5·h0 ≤ h ≤ 0.97·h0`, cutting off the slow end of
/// the subsonic branch.
pub(super) fn subsonic_bounded_gas(
    gas: PerfectGas<SyntheticGas>,
) -> Bounded<PerfectGas<SyntheticGas>> {
    let h0 = reservoir().enthalpy;
    Bounded::new(
        gas,
        (
            SpecificEntropy::new::<joule_per_kilogram_kelvin>(8000.0),
            SpecificEntropy::new::<joule_per_kilogram_kelvin>(10000.0),
        ),
        (h0 * 0.5, h0 * 0.97),
    )
    .unwrap()
}

/// Solves the throat for [`reservoir`] and chokes a unit throat area.
pub(super) fn choked(lookup: &impl PropertyLookup) -> ChokedFlow {
    let reservoir = reservoir();
    let throat = solve_throat(&reservoir, lookup, &ThroatConfig::default())
        .unwrap()
        .throat;
    ChokedFlow::new(reservoir, throat, Area::new::<square_meter>(1.0))
}

/// A lookup whose speed of sound no expansion can reach.
pub(super) struct InconsistentLookup;

impl PropertyLookup for InconsistentLookup {
    fn lookup(
        &self,
        _entropy: SpecificEntropy,
        _enthalpy: SpecificEnthalpy,
    ) -> Result<EquilibriumProperties, PropertyError> {
        Ok(EquilibriumProperties {
            density: MassDensity::new::<kilogram_per_cubic_meter>(1.0),
            sound_speed: Velocity::new::<meter_per_second>(1.0e5),
            pressure: Pressure::new::<pascal>(1.0e5),
            temperature: ThermodynamicTemperature::new::<kelvin>(1000.0),
        })
    }
}

/// A lookup whose speed of sound drops from 2000 to 1000 m/s at 2 MJ/kg.
///
/// The sonic residual changes sign across the step without passing through
/// zero.
pub(super) struct JumpLookup;

impl PropertyLookup for JumpLookup {
    fn lookup(
        &self,
        _entropy: SpecificEntropy,
        enthalpy: SpecificEnthalpy,
    ) -> Result<EquilibriumProperties, PropertyError> {
        let sound_speed = if enthalpy.get::<joule_per_kilogram>() > 2.0e6 {
            2000.0
        } else {
            1000.0
        };
        Ok(EquilibriumProperties {
            density: MassDensity::new::<kilogram_per_cubic_meter>(1.0),
            sound_speed: Velocity::new::<meter_per_second>(sound_speed),
            pressure: Pressure::new::<pascal>(1.0e5),
            temperature: ThermodynamicTemperature::new::<kelvin>(1000.0),
        })
    }
}

/// Reports zero density from the wrapped lookup.
pub(super) struct ZeroDensity<L>(pub(super) L);

impl<L: PropertyLookup> PropertyLookup for ZeroDensity<L> {
    fn lookup(
        &self,
        entropy: SpecificEntropy,
        enthalpy: SpecificEnthalpy,
    ) -> Result<EquilibriumProperties, PropertyError> {
        let mut properties = self.0.lookup(entropy, enthalpy)?;
        properties.density = MassDensity::new::<kilogram_per_cubic_meter>(0.0);
        Ok(properties)
    }
}

/// Scales the wrapped density by `1 + amplitude·sin(h / 500 J/kg)`.
///
/// Stands in for tabulated data with interpolation error: smooth, but the
/// implied area is no longer monotonic on a branch.
pub(super) struct NoisyDensity<L> {
    inner: L,
    amplitude: f64,
}

impl<L> NoisyDensity<L> {
    pub(super) fn new(inner: L, amplitude: f64) -> Self {
        Self { inner, amplitude }
    }
}

impl<L: PropertyLookup> PropertyLookup for NoisyDensity<L> {
    fn lookup(
        &self,
        entropy: SpecificEntropy,
        enthalpy: SpecificEnthalpy,
    ) -> Result<EquilibriumProperties, PropertyError> {
        let mut properties = self.inner.lookup(entropy, enthalpy)?;
        let phase = enthalpy.get::<joule_per_kilogram>() / 500.0;
        properties.density = properties.density * (1.0 + self.amplitude * phase.sin());
        Ok(properties)
    }
}

/// Counts calls to the wrapped lookup.
pub(super) struct CountingLookup<L> {
    inner: L,
    calls: Cell<usize>,
}

impl<L> CountingLookup<L> {
    pub(super) fn new(inner: L) -> Self {
        Self {
            inner,
            calls: Cell::new(0),
        }
    }

    pub(super) fn calls(&self) -> usize {
        self.calls.get()
    }
}

impl<L: PropertyLookup> PropertyLookup for CountingLookup<L> {
    fn lookup(
        &self,
        entropy: SpecificEntropy,
        enthalpy: SpecificEnthalpy,
    ) -> Result<EquilibriumProperties, PropertyError> {
        self.calls.set(self.calls.get() + 1);
        self.inner.lookup(entropy, enthalpy)
    }
}
