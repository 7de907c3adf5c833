//! Canonical fluid identifiers.
//!
//! A fluid type names a substance, and each model defines how that name is
//! interpreted, e.g. the constants a [`PerfectGas`](super::model::PerfectGas)
//! reads through [`PerfectGasFluid`](super::model::perfect_gas::PerfectGasFluid).

mod air;

pub use air::Air;
