use thiserror::Error;
use twine_solvers::equation::bisection;
use uom::si::f64::Area;

use crate::models::flow::nozzle::core::ConfigError;
use crate::support::thermo::PropertyError;

/// Errors that can occur while inverting area to enthalpy at one station.
///
/// These are local to a station. The profile walker records them and moves on.
#[derive(Debug, Error)]
pub enum InversionError {
    /// The inversion configuration is invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The target area is not a positive, finite value.
    #[error("invalid target area: {area:?}")]
    InvalidTarget { area: Area },

    /// No enthalpy on the branch reproduces the target area within tolerance.
    ///
    /// `best_relative_miss` is the smallest `|A(h) − A|/A` seen, if any
    /// candidate could be evaluated.
    #[error("no state matches the target area (best relative miss: {best_relative_miss:?})")]
    NotFound { best_relative_miss: Option<f64> },

    /// The property lookup failed, typically outside its fitted support.
    #[error("property lookup failed")]
    PropertyLookup(#[from] PropertyError),

    /// The bisection solver encountered an error.
    #[error("bisection solver error")]
    Bisection(#[from] bisection::Error),

    /// The solver reached the maximum number of iterations without converging.
    #[error("failed to converge after {iters} iterations (residual: {residual:?})")]
    MaxIters { residual: Area, iters: usize },
}

impl InversionError {
    /// Returns `true` if the station failed because the lookup was queried
    /// outside its support.
    #[must_use]
    pub fn is_out_of_range(&self) -> bool {
        matches!(self, Self::PropertyLookup(error) if error.is_out_of_domain())
    }
}
