//! Sonic throat solver.
//!
//! Finds the static enthalpy `h*` on the reservoir isentrope where the flow
//! velocity `u = √(2·(h0 − h))` equals the equilibrium speed of sound. The
//! sonic mass flux `F* = ρ*·a*` fixes the choked mass flow for the whole
//! nozzle.

mod error;
mod problem;

pub use error::ThroatError;

use twine_solvers::equation::bisection;
use uom::si::{available_energy::joule_per_kilogram, f64::Velocity, velocity::meter_per_second};

use crate::support::{
    thermo::PropertyLookup,
    units::{MassFlux, SpecificEnthalpy},
};

use super::{Reservoir, ThroatConfig, ThroatIteration, ThroatQuantities};

use problem::{SonicModel, SonicProblem, SonicSample};

/// Result of a throat solve.
#[derive(Debug, Clone, PartialEq)]
pub struct ThroatSolution {
    pub throat: ThroatQuantities,

    /// Sonic residual evaluations made by the bisection, in order.
    pub trace: Vec<ThroatIteration>,
}

/// Locates the sonic throat state for a reservoir.
///
/// The residual `g(h) = u(h) − a(s0, h)` is sampled on a uniform grid
/// descending from `h0` to `floor·h0` until it changes sign, then the
/// bracketed root is refined by bisection. Samples where the lookup fails
/// are skipped during bracketing; during bisection they are treated as lying
/// on the supersonic side.
///
/// # Errors
///
/// Returns [`ThroatError`] if the configuration or reservoir is invalid, no
/// sign change is found, the bisection does not converge, or the converged
/// state is not sonic within tolerance.
pub fn solve_throat(
    reservoir: &Reservoir,
    lookup: &impl PropertyLookup,
    config: &ThroatConfig,
) -> Result<ThroatSolution, ThroatError> {
    config.validate()?;

    let h0 = reservoir.enthalpy.get::<joule_per_kilogram>();
    if !(h0 > 0.0 && h0.is_finite()) {
        return Err(ThroatError::InvalidReservoir {
            enthalpy: reservoir.enthalpy,
        });
    }

    let bracket = bracket(reservoir, lookup, h0, config)?;
    tracing::debug!(
        lower = bracket[0],
        upper = bracket[1],
        "bracketed sonic point"
    );

    let model = SonicModel::new(reservoir, lookup);
    let solution = bisection::solve(
        &model,
        &SonicProblem,
        bracket,
        &config.bisection(),
        |event: &bisection::Event<'_, _, _>| {
            // A failed lookup means the trial enthalpy is outside the data.
            // The floor end of the bracket is supersonic, so steer toward `h0`.
            if event.result().is_err() {
                return Some(bisection::Action::assume_positive());
            }
            None
        },
    )?;

    if solution.status != bisection::Status::Converged {
        return Err(ThroatError::MaxIters {
            residual: Velocity::new::<meter_per_second>(solution.residual),
            iters: solution.iters,
        });
    }

    let SonicSample {
        iteration,
        properties,
    } = solution.snapshot.output;

    let residual = iteration.residual.abs();
    if residual > config.velocity_tol || residual.value.is_nan() {
        return Err(ThroatError::NotSonic {
            enthalpy: iteration.enthalpy,
            residual: iteration.residual,
        });
    }

    let mass_flux: MassFlux = properties.density * properties.sound_speed;
    if !mass_flux.value.is_finite() || mass_flux.value <= 0.0 {
        return Err(ThroatError::InvalidMassFlux { mass_flux });
    }

    let throat = ThroatQuantities {
        enthalpy: iteration.enthalpy,
        velocity: iteration.velocity,
        density: properties.density,
        sound_speed: properties.sound_speed,
        pressure: properties.pressure,
        temperature: properties.temperature,
        mass_flux,
    };

    let trace = model.into_trace();
    tracing::debug!(
        h_star = throat.enthalpy.get::<joule_per_kilogram>(),
        a_star = throat.sound_speed.get::<meter_per_second>(),
        evaluations = trace.len(),
        "throat converged"
    );

    Ok(ThroatSolution { throat, trace })
}

/// Scans downward from `h0` for the first sign change of `u − a`.
///
/// Returns `[h_low, h_high]` with `g(h_low) ≥ 0 > g(h_high)`.
fn bracket(
    reservoir: &Reservoir,
    lookup: &impl PropertyLookup,
    h0: f64,
    config: &ThroatConfig,
) -> Result<[f64; 2], ThroatError> {
    let floor = config.floor * h0;
    let samples = config.bracket_samples;
    #[allow(clippy::cast_precision_loss)]
    let step = (h0 - floor) / (samples - 1) as f64;

    let mut above: Option<(f64, f64)> = None;
    for k in 0..samples {
        #[allow(clippy::cast_precision_loss)]
        let h = if k + 1 == samples {
            floor
        } else {
            h0 - step * k as f64
        };

        let enthalpy = SpecificEnthalpy::new::<joule_per_kilogram>(h);
        let Ok(sample) = SonicSample::evaluate(reservoir, lookup, enthalpy) else {
            continue;
        };
        let g = sample.residual();

        if let Some((h_above, g_above)) = above {
            if g_above < 0.0 && g >= 0.0 {
                return Ok([h, h_above]);
            }
        }
        above = Some((h, g));
    }

    Err(ThroatError::NoSignChange {
        floor: SpecificEnthalpy::new::<joule_per_kilogram>(floor),
        samples,
    })
}
