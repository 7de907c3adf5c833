//! Quasi-one-dimensional nozzle models.
//!
//! This module provides [`twine_core::Model`] implementations for choked
//! converging-diverging nozzles. The computational core is in the internal
//! `core` module; its solvers and types are re-exported here.
//!
//! - [`IndirectNozzle`] solves a real gas described by a [`PropertyLookup`].
//! - [`FrozenNozzle`] solves a calorically perfect gas in closed form.

mod core;

pub use self::core::{
    AreaProfile, Branch, ChokedFlow, ConfigError, FlowState, FrozenConfig, FrozenError,
    InversionConfig, InversionError, NozzleConfig, NozzleError, NozzleSolution, ProfileError,
    Reservoir, SearchStrategy, SkippedStation, Stagnation, StationResult, ThroatConfig, ThroatError,
    ThroatIteration, ThroatQuantities, ThroatSolution, Walk, WalkDiagnostics, invert, solve_frozen,
    solve_indirect, solve_throat, walk,
};

use twine_core::Model;

use crate::support::thermo::{PropertyLookup, model::PerfectGas};

/// Equilibrium real-gas nozzle solved by the indirect method.
///
/// The model input is the [`Reservoir`]; the profile, lookup, and solver
/// configuration are fixed at construction.
#[derive(Debug, Clone)]
pub struct IndirectNozzle<L> {
    profile: AreaProfile,
    lookup: L,
    config: NozzleConfig,
}

impl<L: PropertyLookup> IndirectNozzle<L> {
    /// Creates a nozzle model with the default solver configuration.
    pub fn new(profile: AreaProfile, lookup: L) -> Self {
        Self::with_config(profile, lookup, NozzleConfig::default())
    }

    /// Creates a nozzle model with an explicit solver configuration.
    pub fn with_config(profile: AreaProfile, lookup: L, config: NozzleConfig) -> Self {
        Self {
            profile,
            lookup,
            config,
        }
    }

    pub fn profile(&self) -> &AreaProfile {
        &self.profile
    }

    pub fn lookup(&self) -> &L {
        &self.lookup
    }
}

impl<L: PropertyLookup> Model for IndirectNozzle<L> {
    type Input = Reservoir;
    type Output = NozzleSolution;
    type Error = NozzleError;

    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
        solve_indirect(&self.profile, input, &self.lookup, &self.config)
    }
}

/// Frozen perfect-gas nozzle solved from the area-Mach relation.
///
/// The model input is the [`Stagnation`] pressure and temperature.
#[derive(Debug, Clone)]
pub struct FrozenNozzle<Fluid> {
    profile: AreaProfile,
    gas: PerfectGas<Fluid>,
    config: FrozenConfig,
}

impl<Fluid: Default> FrozenNozzle<Fluid> {
    /// Creates a frozen nozzle model with the default Newton settings.
    pub fn new(profile: AreaProfile, gas: PerfectGas<Fluid>) -> Self {
        Self {
            profile,
            gas,
            config: FrozenConfig::default(),
        }
    }

    /// Returns a copy of this model using `config`.
    #[must_use]
    pub fn with_config(self, config: FrozenConfig) -> Self {
        Self { config, ..self }
    }
}

impl<Fluid: Default> Model for FrozenNozzle<Fluid> {
    type Input = Stagnation;
    type Output = Vec<StationResult>;
    type Error = FrozenError;

    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
        solve_frozen(&self.profile, *input, &self.gas, &self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::{
        f64::{Pressure, ThermodynamicTemperature},
        pressure::megapascal,
        ratio::ratio,
        thermodynamic_temperature::kelvin,
    };

    use crate::support::thermo::{fluid::Air, model::PerfectGas};

    fn profile() -> AreaProfile {
        let x: Vec<f64> = (0..21).map(|i| f64::from(i) * 0.05).collect();
        let area_at = |x: f64| 1.0e-3 * (1.0 + 4.0 * (x - 0.4).powi(2));
        let area: Vec<f64> = x.iter().copied().map(area_at).collect();
        AreaProfile::from_si(&x, &area).unwrap()
    }

    fn stagnation() -> Stagnation {
        Stagnation {
            pressure: Pressure::new::<megapascal>(2.0),
            temperature: ThermodynamicTemperature::new::<kelvin>(1800.0),
        }
    }

    #[test]
    fn models_agree_for_perfect_air() {
        let gas = PerfectGas::<Air>::new().unwrap();
        let reservoir = Reservoir::from_stagnation(&gas, stagnation()).unwrap();

        let indirect = IndirectNozzle::new(profile(), gas);
        let frozen = FrozenNozzle::new(profile(), gas);

        let solution = indirect.call(&reservoir).unwrap();
        let baseline = frozen.call(&stagnation()).unwrap();

        assert_eq!(solution.throat_index, 8);
        assert_eq!(solution.stations.len(), baseline.len());
        for (station, reference) in solution.stations.iter().zip(&baseline) {
            if (station.area / indirect.profile().throat().1).get::<ratio>() < 1.1 {
                continue;
            }
            assert_relative_eq!(
                station.mach.get::<ratio>(),
                reference.mach.get::<ratio>(),
                max_relative = 1e-6
            );
        }
    }

    #[test]
    fn frozen_config_is_applied() {
        let gas = PerfectGas::<Air>::new().unwrap();
        let frozen = FrozenNozzle::new(profile(), gas).with_config(FrozenConfig {
            max_iters: 0,
            ..FrozenConfig::default()
        });
        assert!(matches!(
            frozen.call(&stagnation()),
            Err(FrozenError::Config(_))
        ));
    }
}
