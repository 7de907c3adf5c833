//! Quasi-one-dimensional nozzle flow by the indirect method.
//!
//! The indirect method never integrates along the nozzle. With adiabatic,
//! isentropic flow every station shares the reservoir entropy `s0` and
//! stagnation enthalpy `h0`, so a station is fully described by its static
//! enthalpy `h`. The solve has three steps:
//!
//! 1. [`solve_throat`] finds the sonic enthalpy `h*` and the mass flux
//!    `F* = ρ*·a*`, which fixes the mass flow through the throat area.
//! 2. [`invert`] maps a station area back to the enthalpy whose implied area
//!    `m_dot / (ρ·u)` matches it, on the subsonic or supersonic branch.
//! 3. [`walk`] applies the inversion to every station of an [`AreaProfile`],
//!    skipping stations that cannot be resolved.
//!
//! All gas behavior enters through a [`PropertyLookup`]. [`solve_frozen`]
//! provides the closed-form perfect-gas baseline for comparison.

mod choked;
mod config;
mod frozen;
mod invert;
mod profile;
mod reservoir;
mod results;
mod throat;
mod walk;

#[cfg(test)]
mod test_support;

pub use choked::ChokedFlow;
pub use config::{
    ConfigError, FrozenConfig, InversionConfig, NozzleConfig, SearchStrategy, ThroatConfig,
};
pub use frozen::{FrozenError, solve_frozen};
pub use invert::{InversionError, invert};
pub use profile::{AreaProfile, Branch, ProfileError};
pub use reservoir::{Reservoir, Stagnation};
pub use results::{
    FlowState, NozzleSolution, SkippedStation, StationResult, ThroatIteration, ThroatQuantities,
    WalkDiagnostics,
};
pub use throat::{ThroatError, ThroatSolution, solve_throat};
pub use walk::{Walk, walk};

use thiserror::Error;
use uom::si::{
    area::square_meter, available_energy::joule_per_kilogram, mass_rate::kilogram_per_second,
};

use crate::support::thermo::PropertyLookup;

/// Errors that abort an indirect-method solve.
///
/// Station-level failures do not abort the solve; they are reported in
/// [`WalkDiagnostics::skipped`].
#[derive(Debug, Error)]
pub enum NozzleError {
    /// The inversion configuration is invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The throat state could not be determined.
    #[error("throat solve failed")]
    Throat(#[from] ThroatError),
}

/// Solves a nozzle profile by the indirect method.
///
/// The throat is solved first; if it fails, no station is evaluated.
///
/// # Errors
///
/// Returns [`NozzleError`] if the configuration is invalid or the throat
/// state cannot be determined.
pub fn solve_indirect(
    profile: &AreaProfile,
    reservoir: &Reservoir,
    lookup: &impl PropertyLookup,
    config: &NozzleConfig,
) -> Result<NozzleSolution, NozzleError> {
    // Validated before the throat solve; the walk relies on it.
    let inversion = &config.inversion;
    inversion.validate()?;

    let ThroatSolution { throat, trace } = solve_throat(reservoir, lookup, &config.throat)?;

    let throat_index = profile.throat_index();
    let (_, throat_area) = profile.throat();
    let choked = ChokedFlow::new(*reservoir, throat, throat_area);

    let Walk { stations, skipped } = walk::walk_stations(profile, &choked, lookup, inversion);

    tracing::info!(
        h0 = reservoir.enthalpy.get::<joule_per_kilogram>(),
        throat_area = throat_area.get::<square_meter>(),
        mass_flow = choked.mass_flow().get::<kilogram_per_second>(),
        converged = stations.len(),
        skipped = skipped.len(),
        "indirect nozzle solve complete"
    );

    Ok(NozzleSolution {
        choked,
        throat_index,
        stations,
        diagnostics: WalkDiagnostics {
            throat_trace: trace,
            skipped,
        },
    })
}
