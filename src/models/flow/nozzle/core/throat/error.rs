use thiserror::Error;
use twine_solvers::equation::bisection;
use uom::si::f64::Velocity;

use crate::models::flow::nozzle::core::ConfigError;
use crate::support::units::{MassFlux, SpecificEnthalpy};

/// Errors that can occur while locating the sonic throat state.
///
/// Any of these prevents the nozzle from being solved, since every station
/// depends on the throat mass flux.
#[derive(Debug, Error)]
pub enum ThroatError {
    /// The throat configuration is invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The reservoir enthalpy is not a positive, finite value.
    #[error("invalid reservoir enthalpy: {enthalpy:?}")]
    InvalidReservoir { enthalpy: SpecificEnthalpy },

    /// The sonic residual `u − a` never changed sign between the reservoir
    /// enthalpy and the search floor.
    #[error("no sonic point found between h0 and {floor:?} ({samples} samples)")]
    NoSignChange {
        floor: SpecificEnthalpy,
        samples: usize,
    },

    /// The bisection solver encountered an error.
    #[error("bisection solver error")]
    Bisection(#[from] bisection::Error),

    /// The solver reached the maximum number of iterations without converging.
    #[error("failed to converge after {iters} iterations (residual: {residual:?})")]
    MaxIters { residual: Velocity, iters: usize },

    /// The converged state does not satisfy `|u − a|` within tolerance.
    #[error("throat state at {enthalpy:?} is not sonic (residual: {residual:?})")]
    NotSonic {
        enthalpy: SpecificEnthalpy,
        residual: Velocity,
    },

    /// The sonic mass flux `ρ*·a*` is not a positive, finite value.
    #[error("invalid sonic mass flux: {mass_flux:?}")]
    InvalidMassFlux { mass_flux: MassFlux },
}
