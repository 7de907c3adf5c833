use uom::si::{
    area::square_meter, available_energy::joule_per_kilogram, length::meter, ratio::ratio,
};

use crate::support::{thermo::PropertyLookup, units::SpecificEnthalpy};

use super::{
    AreaProfile, Branch, ChokedFlow, ConfigError, InversionConfig, SkippedStation, StationResult,
    invert::invert_station,
};

/// Converged and skipped stations from one pass over a profile.
#[derive(Debug, Default)]
pub struct Walk {
    pub stations: Vec<StationResult>,
    pub skipped: Vec<SkippedStation>,
}

/// Inverts every station of `profile` in order.
///
/// Stations before the throat index use the subsonic branch, the rest the
/// supersonic branch. Each branch seeds its search with the enthalpy of the
/// previous converged station on the same branch. A station that fails is
/// recorded in [`Walk::skipped`] and the walk continues.
///
/// # Errors
///
/// Returns [`ConfigError`] if the inversion configuration is invalid.
pub fn walk(
    profile: &AreaProfile,
    choked: &ChokedFlow,
    lookup: &impl PropertyLookup,
    config: &InversionConfig,
) -> Result<Walk, ConfigError> {
    config.validate()?;
    Ok(walk_stations(profile, choked, lookup, config))
}

/// Walks `profile` with a configuration that has already been validated.
pub(super) fn walk_stations(
    profile: &AreaProfile,
    choked: &ChokedFlow,
    lookup: &impl PropertyLookup,
    config: &InversionConfig,
) -> Walk {
    let mut walk = Walk::default();
    let mut subsonic_hint: Option<SpecificEnthalpy> = None;
    let mut supersonic_hint: Option<SpecificEnthalpy> = None;

    for (index, x, area) in profile.stations() {
        let branch = profile.branch(index);
        let hint = match branch {
            Branch::Subsonic => &mut subsonic_hint,
            Branch::Supersonic => &mut supersonic_hint,
        };

        match invert_station(area, branch, choked, lookup, *hint, config) {
            Ok(state) => {
                tracing::debug!(
                    index,
                    x = x.get::<meter>(),
                    h = state.enthalpy.get::<joule_per_kilogram>(),
                    mach = state.mach.get::<ratio>(),
                    "station converged"
                );
                *hint = Some(state.enthalpy);
                walk.stations
                    .push(StationResult::new(index, x, area, branch, &state));
            }
            Err(error) => {
                tracing::warn!(
                    index,
                    x = x.get::<meter>(),
                    area = area.get::<square_meter>(),
                    ?branch,
                    %error,
                    "station skipped"
                );
                walk.skipped.push(SkippedStation {
                    index,
                    x,
                    area,
                    branch,
                    error,
                });
            }
        }
    }

    walk
}
