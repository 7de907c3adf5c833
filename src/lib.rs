//! # Twine Nozzle
//!
//! Quasi-one-dimensional real-gas nozzle models for
//! [Twine](https://github.com/isentropic-dev/twine).
//!
//! Given an area profile and a reservoir state, the indirect method solves a
//! choked converging-diverging nozzle in equilibrium flow using only an
//! entropy-enthalpy property lookup. A frozen perfect-gas solution is
//! provided as a baseline.
//!
//! ## Crate layout
//!
//! - [`models`]: Nozzle [`twine_core::Model`] implementations and solvers.
//! - [`support`]: Units, numeric constraints, and thermodynamic property
//!   lookups used by the models.
//!
//! Modules in [`support`] are part of the public API because they're useful,
//! but their APIs are not stable. Breaking changes may occur as needed.

pub mod models;
pub mod support;
