//! Calorically perfect gas model.
//!
//! `PerfectGas` is an ideal gas equation of state with constant heat
//! capacities. In nozzle work it plays two roles: it is the gas behind the
//! frozen-flow solution, and it is a smooth synthetic [`PropertyLookup`] for
//! exercising the real-gas solvers against a known closed form.
//!
//! # Assumptions
//!
//! - Ideal gas equation of state: `p = ρ·R·T`
//! - Calorically perfect: `cp`, `cv`, and `γ = cp/cv` are constant
//! - Speed of sound: `a = √(γ·R·T)`
//!
//! # Reference State
//!
//! Enthalpy and entropy are reported relative to a configurable reference state
//! (`T_ref`, `p_ref`, `h_ref`, `s_ref`).

use std::marker::PhantomData;

use thiserror::Error;
use uom::{
    ConstZero,
    si::{
        f64::{
            MassDensity, Pressure, Ratio, SpecificHeatCapacity, ThermodynamicTemperature, Velocity,
        },
        pressure::{atmosphere, pascal},
        ratio::ratio,
        specific_heat_capacity::joule_per_kilogram_kelvin,
        thermodynamic_temperature::{degree_celsius, kelvin},
        velocity::meter_per_second,
    },
};

use crate::support::units::{
    SpecificEnthalpy, SpecificEntropy, SpecificGasConstant, TemperatureDifference,
};
use crate::support::{
    constraint::{Constraint, StrictlyPositive},
    thermo::{
        EquilibriumProperties, PropertyError, PropertyLookup, ReservoirLookup, State,
        capability::{HasEnthalpy, HasEntropy, HasPressure, HasSoundSpeed, StateFrom, ThermoModel},
    },
};

use super::ideal_gas_eos;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum PerfectGasParametersError {
    #[error("invalid gas constant R: {r:?}")]
    GasConstant { r: SpecificGasConstant },
    #[error("invalid cp: {cp:?}")]
    Cp { cp: SpecificHeatCapacity },
    #[error("invalid reference temperature: {t_ref:?}")]
    ReferenceTemperature { t_ref: ThermodynamicTemperature },
    #[error("invalid reference pressure: {p_ref:?}")]
    ReferencePressure { p_ref: Pressure },
    #[error("non-physical heat capacities: cv = cp - R must be > 0; cp={cp:?}, R={r:?}, cv={cv:?}")]
    NonPhysicalCv {
        r: SpecificGasConstant,
        cp: SpecificHeatCapacity,
        cv: SpecificHeatCapacity,
    },
}

/// Reference values used to define enthalpy/entropy offsets for a [`PerfectGas`] model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PerfectGasReference {
    pub temperature: ThermodynamicTemperature,
    pub pressure: Pressure,
    pub enthalpy: SpecificEnthalpy,
    pub entropy: SpecificEntropy,
}

impl PerfectGasReference {
    /// Returns a standard reference: 0°C, 1 atm, `h_ref = 0`, `s_ref = 0`.
    #[must_use]
    pub fn standard() -> Self {
        Self {
            temperature: ThermodynamicTemperature::new::<degree_celsius>(0.0),
            pressure: Pressure::new::<atmosphere>(1.0),
            enthalpy: SpecificEnthalpy::ZERO,
            entropy: SpecificEntropy::ZERO,
        }
    }

    /// Returns a reference at `temperature` and `pressure` where enthalpy is
    /// sensible enthalpy from absolute zero, `h = cp·T`.
    ///
    /// Use this when comparing against tables that report `h` on that basis.
    #[must_use]
    pub fn sensible(
        cp: SpecificHeatCapacity,
        temperature: ThermodynamicTemperature,
        pressure: Pressure,
        entropy: SpecificEntropy,
    ) -> Self {
        let absolute_zero = ThermodynamicTemperature::new::<kelvin>(0.0);
        Self {
            temperature,
            pressure,
            enthalpy: cp * temperature.minus(absolute_zero),
            entropy,
        }
    }
}

/// Constant parameters for the [`PerfectGas`] model.
///
/// These values are typically provided by a fluid's [`PerfectGasFluid`] implementation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PerfectGasParameters {
    pub gas_constant: SpecificGasConstant,
    pub cp: SpecificHeatCapacity,
    pub reference: PerfectGasReference,
}

impl PerfectGasParameters {
    #[must_use]
    pub fn new(gas_constant: SpecificGasConstant, cp: SpecificHeatCapacity) -> Self {
        Self {
            gas_constant,
            cp,
            reference: PerfectGasReference::standard(),
        }
    }

    #[must_use]
    pub fn with_reference(mut self, reference: PerfectGasReference) -> Self {
        self.reference = reference;
        self
    }
}

/// Fluid constants required by the [`PerfectGas`] model.
pub trait PerfectGasFluid {
    /// Returns the constant parameters for use with [`PerfectGas`].
    fn parameters() -> PerfectGasParameters;
}

/// Perfect gas model (constant `cp`/`cv`) using the ideal gas equation of state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PerfectGas<Fluid> {
    r: SpecificGasConstant,
    cp: SpecificHeatCapacity,
    cv: SpecificHeatCapacity,
    t_ref: ThermodynamicTemperature,
    p_ref: Pressure,
    h_ref: SpecificEnthalpy,
    s_ref: SpecificEntropy,
    _marker: PhantomData<Fluid>,
}

impl<Fluid> ThermoModel for PerfectGas<Fluid> {
    type Fluid = Fluid;
}

impl<Fluid: PerfectGasFluid> PerfectGas<Fluid> {
    /// Creates a perfect gas model using constants defined by `Fluid`.
    ///
    /// # Errors
    ///
    /// Returns [`PerfectGasParametersError`] if any required constant is
    /// invalid or if `cv = cp - R` is non-physical.
    pub fn new() -> Result<Self, PerfectGasParametersError> {
        let parameters = Fluid::parameters();

        let gas_constant = parameters.gas_constant;
        if StrictlyPositive::check(&gas_constant.get::<joule_per_kilogram_kelvin>()).is_err() {
            return Err(PerfectGasParametersError::GasConstant { r: gas_constant });
        }

        let cp = parameters.cp;
        if StrictlyPositive::check(&cp.get::<joule_per_kilogram_kelvin>()).is_err() {
            return Err(PerfectGasParametersError::Cp { cp });
        }

        let reference_temperature = parameters.reference.temperature;
        if StrictlyPositive::check(&reference_temperature.get::<kelvin>()).is_err() {
            return Err(PerfectGasParametersError::ReferenceTemperature {
                t_ref: reference_temperature,
            });
        }

        let reference_pressure = parameters.reference.pressure;
        if StrictlyPositive::check(&reference_pressure.get::<pascal>()).is_err() {
            return Err(PerfectGasParametersError::ReferencePressure {
                p_ref: reference_pressure,
            });
        }

        let cv = cp - gas_constant;
        if StrictlyPositive::check(&cv.get::<joule_per_kilogram_kelvin>()).is_err() {
            return Err(PerfectGasParametersError::NonPhysicalCv {
                r: gas_constant,
                cp,
                cv,
            });
        }

        Ok(Self {
            r: gas_constant,
            cp,
            cv,
            t_ref: reference_temperature,
            p_ref: reference_pressure,
            h_ref: parameters.reference.enthalpy,
            s_ref: parameters.reference.entropy,
            _marker: PhantomData,
        })
    }

    /// Creates a state at the reference temperature and pressure.
    #[must_use]
    pub fn reference_state(&self, fluid: Fluid) -> State<Fluid> {
        let temperature = self.t_ref;
        let density = ideal_gas_eos::density(temperature, self.p_ref, self.r);

        State {
            temperature,
            density,
            fluid,
        }
    }
}

impl<Fluid> PerfectGas<Fluid> {
    /// Returns the heat capacity ratio `γ = cp/cv`.
    #[must_use]
    pub fn gamma(&self) -> Ratio {
        self.cp / self.cv
    }

    /// Returns the specific gas constant `R`.
    #[must_use]
    pub fn gas_constant(&self) -> SpecificGasConstant {
        self.r
    }

    /// Returns the constant specific heat at constant pressure.
    #[must_use]
    pub fn cp(&self) -> SpecificHeatCapacity {
        self.cp
    }

    /// Returns the density at the reference temperature and pressure.
    ///
    /// Useful for checking a model's unit convention against a tabulated value.
    #[must_use]
    pub fn reference_density(&self) -> MassDensity {
        ideal_gas_eos::density(self.t_ref, self.p_ref, self.r)
    }
}

fn check_temperature(temperature: ThermodynamicTemperature) -> Result<(), PropertyError> {
    let t = temperature.get::<kelvin>();
    if t > 0.0 && t.is_finite() {
        Ok(())
    } else {
        Err(PropertyError::OutOfDomain {
            context: format!("perfect gas requires a positive temperature, got {t} K"),
        })
    }
}

impl<Fluid> HasPressure for PerfectGas<Fluid> {
    /// Computes pressure with `P = ρ·R·T`.
    fn pressure(&self, state: &State<Fluid>) -> Result<Pressure, PropertyError> {
        Ok(ideal_gas_eos::pressure(
            state.temperature,
            state.density,
            self.r,
        ))
    }
}

impl<Fluid> HasEnthalpy for PerfectGas<Fluid> {
    /// Computes enthalpy with `h = h₀ + cp·(T − T₀)`.
    fn enthalpy(&self, state: &State<Fluid>) -> Result<SpecificEnthalpy, PropertyError> {
        Ok(self.h_ref + self.cp * state.temperature.minus(self.t_ref))
    }
}

impl<Fluid> HasEntropy for PerfectGas<Fluid> {
    /// Computes entropy with `s = s₀ + cp·ln(T⁄T₀) − R·ln(p⁄p₀)`.
    fn entropy(&self, state: &State<Fluid>) -> Result<SpecificEntropy, PropertyError> {
        check_temperature(state.temperature)?;
        let p = self.pressure(state)?;

        Ok(self.s_ref + self.cp * (state.temperature / self.t_ref).ln()
            - self.r * (p / self.p_ref).ln())
    }
}

impl<Fluid> HasSoundSpeed for PerfectGas<Fluid> {
    /// Computes the speed of sound with `a = √(γ·R·T)`.
    fn sound_speed(&self, state: &State<Fluid>) -> Result<Velocity, PropertyError> {
        check_temperature(state.temperature)?;

        let gamma = self.gamma().get::<ratio>();
        let r = self.r.get::<joule_per_kilogram_kelvin>();
        let t = state.temperature.get::<kelvin>();

        Ok(Velocity::new::<meter_per_second>((gamma * r * t).sqrt()))
    }
}

impl<Fluid> StateFrom<(Fluid, ThermodynamicTemperature, Pressure)> for PerfectGas<Fluid> {
    type Error = PropertyError;

    fn state_from(
        &self,
        (fluid, temperature, pressure): (Fluid, ThermodynamicTemperature, Pressure),
    ) -> Result<State<Fluid>, Self::Error> {
        check_temperature(temperature)?;
        let density = ideal_gas_eos::density(temperature, pressure, self.r);

        Ok(State {
            temperature,
            density,
            fluid,
        })
    }
}

impl<Fluid> StateFrom<(Fluid, SpecificEnthalpy, SpecificEntropy)> for PerfectGas<Fluid> {
    type Error = PropertyError;

    fn state_from(
        &self,
        (fluid, enthalpy, entropy): (Fluid, SpecificEnthalpy, SpecificEntropy),
    ) -> Result<State<Fluid>, Self::Error> {
        let r = self.r;
        let cp = self.cp;
        let t_ref = self.t_ref;

        let temperature = t_ref + (enthalpy - self.h_ref) / cp;
        check_temperature(temperature)?;

        let exponent = (cp * (temperature / t_ref).ln() + self.s_ref - entropy) / r;
        let pressure = self.p_ref * exponent.get::<ratio>().exp();
        let density = ideal_gas_eos::density(temperature, pressure, r);

        Ok(State {
            temperature,
            density,
            fluid,
        })
    }
}

impl<Fluid: Default> PropertyLookup for PerfectGas<Fluid> {
    fn lookup(
        &self,
        entropy: SpecificEntropy,
        enthalpy: SpecificEnthalpy,
    ) -> Result<EquilibriumProperties, PropertyError> {
        let state: State<Fluid> = self.state_from((enthalpy, entropy))?;

        Ok(EquilibriumProperties {
            density: state.density,
            sound_speed: self.sound_speed(&state)?,
            pressure: self.pressure(&state)?,
            temperature: state.temperature,
        })
    }
}

impl<Fluid: Default> ReservoirLookup for PerfectGas<Fluid> {
    fn reservoir(
        &self,
        pressure: Pressure,
        temperature: ThermodynamicTemperature,
    ) -> Result<(SpecificEnthalpy, SpecificEntropy), PropertyError> {
        if !(pressure > Pressure::ZERO) {
            return Err(PropertyError::OutOfDomain {
                context: format!("reservoir pressure must be positive, got {pressure:?}"),
            });
        }

        let state: State<Fluid> = self.state_from((temperature, pressure))?;
        Ok((self.enthalpy(&state)?, self.entropy(&state)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::{
        available_energy::joule_per_kilogram, mass_density::kilogram_per_cubic_meter,
        pressure::megapascal,
    };

    use crate::support::thermo::fluid::Air;

    #[derive(Debug, Clone, Copy, Default)]
    struct HotGas;

    impl PerfectGasFluid for HotGas {
        fn parameters() -> PerfectGasParameters {
            let cp = SpecificHeatCapacity::new::<joule_per_kilogram_kelvin>(1500.0);
            PerfectGasParameters::new(
                SpecificGasConstant::new::<joule_per_kilogram_kelvin>(311.06),
                cp,
            )
            .with_reference(PerfectGasReference::sensible(
                cp,
                ThermodynamicTemperature::new::<kelvin>(298.15),
                Pressure::new::<atmosphere>(1.0),
                SpecificEntropy::new::<joule_per_kilogram_kelvin>(7000.0),
            ))
        }
    }

    #[derive(Debug, Clone, Copy, Default)]
    struct BrokenGas;

    impl PerfectGasFluid for BrokenGas {
        fn parameters() -> PerfectGasParameters {
            PerfectGasParameters::new(
                SpecificGasConstant::new::<joule_per_kilogram_kelvin>(400.0),
                SpecificHeatCapacity::new::<joule_per_kilogram_kelvin>(300.0),
            )
        }
    }

    #[test]
    fn air_reference_density_matches_tables() {
        // Mass-specific convention check: 1.2922 kg/m³ at 0 °C and 1 atm.
        let thermo = PerfectGas::<Air>::new().unwrap();
        assert_relative_eq!(
            thermo.reference_density().get::<kilogram_per_cubic_meter>(),
            1.2922,
            max_relative = 1e-4
        );
    }

    #[test]
    fn air_sound_speed() -> Result<(), PropertyError> {
        let thermo = PerfectGas::<Air>::new().unwrap();
        let state = thermo
            .reference_state(Air)
            .with_temperature(ThermodynamicTemperature::new::<kelvin>(300.0));

        let gamma = 1005.0 / (1005.0 - 287.053);
        assert_relative_eq!(
            thermo.sound_speed(&state)?.get::<meter_per_second>(),
            (gamma * 287.053 * 300.0_f64).sqrt()
        );
        Ok(())
    }

    #[test]
    fn sensible_reference_gives_h_equal_cp_t() -> Result<(), PropertyError> {
        let thermo = PerfectGas::<HotGas>::new().unwrap();
        let t = ThermodynamicTemperature::new::<kelvin>(2000.0);
        let state: State<HotGas> = thermo.state_from((t, Pressure::new::<megapascal>(1.0)))?;

        assert_relative_eq!(
            thermo.enthalpy(&state)?.get::<joule_per_kilogram>(),
            1500.0 * 2000.0,
            max_relative = 1e-12
        );
        Ok(())
    }

    #[test]
    fn lookup_recovers_reservoir_state() -> Result<(), PropertyError> {
        let thermo = PerfectGas::<HotGas>::new().unwrap();
        let p0 = Pressure::new::<megapascal>(5.0);
        let t0 = ThermodynamicTemperature::new::<kelvin>(4500.0);

        let (h0, s0) = thermo.reservoir(p0, t0)?;
        let props = thermo.lookup(s0, h0)?;

        assert_relative_eq!(props.temperature.get::<kelvin>(), 4500.0, epsilon = 1e-9);
        assert_relative_eq!(
            props.pressure.get::<megapascal>(),
            5.0,
            max_relative = 1e-10
        );
        assert_relative_eq!(
            props.density.get::<kilogram_per_cubic_meter>(),
            5.0e6 / (311.06 * 4500.0),
            max_relative = 1e-10
        );
        Ok(())
    }

    #[test]
    fn isentropic_expansion_lowers_pressure() -> Result<(), PropertyError> {
        let thermo = PerfectGas::<HotGas>::new().unwrap();
        let (h0, s0) = thermo.reservoir(
            Pressure::new::<megapascal>(5.0),
            ThermodynamicTemperature::new::<kelvin>(4500.0),
        )?;

        let upstream = thermo.lookup(s0, h0)?;
        let downstream = thermo.lookup(s0, 0.5 * h0)?;

        assert!(downstream.pressure < upstream.pressure);
        assert!(downstream.density < upstream.density);
        assert!(downstream.sound_speed < upstream.sound_speed);
        Ok(())
    }

    #[test]
    fn non_positive_temperature_is_out_of_domain() {
        let thermo = PerfectGas::<HotGas>::new().unwrap();
        let s = SpecificEntropy::new::<joule_per_kilogram_kelvin>(7000.0);
        let h = SpecificEnthalpy::new::<joule_per_kilogram>(-10.0);

        let err = thermo.lookup(s, h).unwrap_err();
        assert!(err.is_out_of_domain(), "unexpected error: {err}");
    }

    #[test]
    fn rejects_non_physical_cv() {
        assert!(matches!(
            PerfectGas::<BrokenGas>::new(),
            Err(PerfectGasParametersError::NonPhysicalCv { .. })
        ));
    }
}
