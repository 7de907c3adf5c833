//! Compressible flow models.

pub mod nozzle;
