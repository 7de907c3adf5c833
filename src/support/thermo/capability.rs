//! Capability traits used to query and construct thermodynamic states.
//!
//! The state-based traits ([`HasPressure`], [`StateFrom`], ...) describe what
//! an idealized model can compute. The nozzle solvers only consume the two
//! lookup capabilities, [`PropertyLookup`] and [`ReservoirLookup`].

mod base;
mod lookup;
mod properties;
mod state_from;

pub use base::ThermoModel;
pub use lookup::{EquilibriumProperties, PropertyLookup, ReservoirLookup};
pub use properties::*;
pub use state_from::StateFrom;
