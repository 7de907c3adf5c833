//! Frozen-flow reference solution.
//!
//! For a calorically perfect gas the area-Mach relation has a closed form:
//!
//! ```text
//! A/A* = (1/M) · [(2/(γ+1)) · (1 + (γ−1)/2 · M²)]^((γ+1)/(2(γ−1)))
//! ```
//!
//! Each station is solved for `M` by Newton's method on the branch given by
//! the profile, and the static state follows from the isentropic relations.
//! The result is the classical baseline the indirect method reduces to when
//! the lookup is itself a perfect gas.

use thiserror::Error;
use uom::si::{
    f64::{MassDensity, Pressure, Ratio, ThermodynamicTemperature, Velocity},
    mass_density::kilogram_per_cubic_meter,
    pressure::pascal,
    ratio::ratio,
    specific_heat_capacity::joule_per_kilogram_kelvin,
    thermodynamic_temperature::kelvin,
    velocity::meter_per_second,
};

use crate::support::thermo::{PropertyError, State, capability::HasEnthalpy, model::PerfectGas};

use super::{AreaProfile, Branch, ConfigError, FrozenConfig, Stagnation, StationResult};

/// Errors that can occur during a frozen-flow solve.
#[derive(Debug, Error)]
pub enum FrozenError {
    /// The frozen configuration is invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Stagnation pressure or temperature is not a positive, finite value.
    #[error("invalid stagnation state: {stagnation:?}")]
    InvalidStagnation { stagnation: Stagnation },

    /// Newton iteration on the area-Mach relation did not converge.
    #[error("area-Mach solve did not converge at station {index} (A/A* = {area_ratio})")]
    NotConverged { index: usize, area_ratio: f64 },

    /// Static enthalpy could not be evaluated.
    #[error(transparent)]
    Property(#[from] PropertyError),
}

/// Solves every station of `profile` as frozen perfect-gas flow.
///
/// Returns one [`StationResult`] per station, in profile order.
///
/// # Errors
///
/// Returns [`FrozenError`] if the inputs are invalid or any station fails
/// to converge.
pub fn solve_frozen<Fluid: Default>(
    profile: &AreaProfile,
    stagnation: Stagnation,
    gas: &PerfectGas<Fluid>,
    config: &FrozenConfig,
) -> Result<Vec<StationResult>, FrozenError> {
    config.validate()?;

    let p0 = stagnation.pressure.get::<pascal>();
    let t0 = stagnation.temperature.get::<kelvin>();
    if !(p0 > 0.0 && p0.is_finite() && t0 > 0.0 && t0.is_finite()) {
        return Err(FrozenError::InvalidStagnation { stagnation });
    }

    let gamma = gas.gamma().get::<ratio>();
    let r = gas.gas_constant().get::<joule_per_kilogram_kelvin>();
    let k = 0.5 * (gamma - 1.0);
    let (_, throat_area) = profile.throat();

    let FrozenConfig {
        max_iters,
        mach_tol,
    } = *config;

    let mut stations = Vec::with_capacity(profile.len());
    for (index, x, area) in profile.stations() {
        let branch = profile.branch(index);
        let area_ratio = (area / throat_area).get::<ratio>();
        let mach = mach_from_area_ratio(area_ratio, gamma, branch, max_iters, mach_tol)
            .ok_or(FrozenError::NotConverged { index, area_ratio })?;

        let t = t0 / (1.0 + k * mach * mach);
        let p = p0 * (t / t0).powf(gamma / (gamma - 1.0));
        let rho = p / (r * t);
        let a = (gamma * r * t).sqrt();

        let temperature = ThermodynamicTemperature::new::<kelvin>(t);
        let density = MassDensity::new::<kilogram_per_cubic_meter>(rho);
        let enthalpy = gas.enthalpy(&State::new(temperature, density, Fluid::default()))?;

        stations.push(StationResult {
            index,
            x,
            area,
            branch,
            enthalpy,
            velocity: Velocity::new::<meter_per_second>(mach * a),
            density,
            pressure: Pressure::new::<pascal>(p),
            temperature,
            sound_speed: Velocity::new::<meter_per_second>(a),
            mach: Ratio::new::<ratio>(mach),
        });
    }

    Ok(stations)
}

/// Solves the perfect-gas area-Mach relation for `M` on `branch`.
///
/// Area ratios at or below one map to the sonic state. Returns `None` if
/// Newton's method does not settle within `max_iters` steps.
pub(super) fn mach_from_area_ratio(
    area_ratio: f64,
    gamma: f64,
    branch: Branch,
    max_iters: usize,
    tol: f64,
) -> Option<f64> {
    if area_ratio <= 1.0 {
        return Some(1.0);
    }

    let k = 0.5 * (gamma - 1.0);
    let exponent = (gamma + 1.0) / (2.0 * (gamma - 1.0));
    let ratio_at = |m: f64| ((1.0 + k * m * m) / (1.0 + k)).powf(exponent) / m;

    let mut m = match branch {
        Branch::Subsonic => 0.5,
        Branch::Supersonic => 2.0,
    };

    for _ in 0..max_iters {
        let f = ratio_at(m);
        let slope = f * (m * m - 1.0) / (m * (1.0 + k * m * m));
        let step = m - (f - area_ratio) / slope;

        // Keep iterates on the requested branch.
        let next = match branch {
            Branch::Subsonic if step <= 0.0 => 0.5 * m,
            Branch::Subsonic if step >= 1.0 || step.is_nan() => 0.5 * (m + 1.0),
            Branch::Supersonic if step <= 1.0 || step.is_nan() => 0.5 * (m + 1.0),
            _ => step,
        };

        if (next - m).abs() <= tol * m.max(1.0) {
            return Some(next);
        }
        m = next;
    }

    None
}
