//! Extensions to [`uom`].
//!
//! This crate uses [`uom`] for all physical units (e.g., enthalpy, pressure, area).
//! This module provides quantities that are useful for flow modeling but
//! aren't included in [`uom`], such as [`SpecificEnthalpy`] and [`MassFlux`].
//!
//! ## Temperature differences
//!
//! The [`TemperatureDifference`] trait provides a [`minus`](TemperatureDifference::minus) method
//! for subtracting one absolute temperature from another to get a temperature interval:
//!
//! ```
//! use uom::si::f64::ThermodynamicTemperature;
//! use uom::si::thermodynamic_temperature::kelvin;
//! use twine_nozzle::support::units::TemperatureDifference;
//!
//! let t_reservoir = ThermodynamicTemperature::new::<kelvin>(3000.0);
//! let t_throat = ThermodynamicTemperature::new::<kelvin>(2500.0);
//! let delta_t = t_reservoir.minus(t_throat);
//! // delta_t is a TemperatureInterval, not a ThermodynamicTemperature
//! ```

mod quantities;
mod temperature_difference;

pub use quantities::{MassFlux, SpecificEnthalpy, SpecificEntropy, SpecificGasConstant};
pub use temperature_difference::TemperatureDifference;
