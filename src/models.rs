//! Public Twine models.
//!
//! Models are the primary public interface of this crate.
//!
//! # Organization
//!
//! Models are organized into domain-specific submodules (currently `flow`).
//! This organization may evolve as more models are added.
//!
//! # Model structure
//!
//! Each model lives in its own module and contains an internal `core` submodule
//! where the computation and domain logic live. The [`twine_core::Model`]
//! implementations are thin adapters that delegate to the core solvers, and a
//! single core may back several adapters.

pub mod flow;
