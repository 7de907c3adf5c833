//! Thermodynamic property modeling for nozzle flow.
//!
//! Two layers live here:
//!
//! - State-based capability traits ([`capability::HasPressure`],
//!   [`capability::StateFrom`], ...) used to build idealized models such as
//!   [`model::PerfectGas`].
//! - The nozzle-facing lookups [`PropertyLookup`] and [`ReservoirLookup`],
//!   which are the seam where tabulated real-gas data (typically a fitted
//!   scattered-data interpolator) plugs into the solvers.
//!
//! # Conventions
//!
//! Enthalpy and entropy are mass-specific (J/kg and J/kg·K) and every
//! quantity is carried as a [`uom`] SI value. Tabulated molar data must be
//! divided by the molar mass before it is wrapped in a lookup.

mod error;
mod state;

pub mod capability;
pub mod fluid;
pub mod model;

pub use capability::{EquilibriumProperties, PropertyLookup, ReservoirLookup};
pub use error::PropertyError;
pub use state::State;
