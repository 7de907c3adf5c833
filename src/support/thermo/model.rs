//! Thermodynamic property models.

pub mod bounded;
pub mod perfect_gas;

pub(crate) mod ideal_gas_eos;

pub use bounded::Bounded;
pub use perfect_gas::PerfectGas;
