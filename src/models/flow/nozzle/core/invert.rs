//! Area-to-enthalpy inversion.
//!
//! Given a station area, finds the static enthalpy on the reservoir
//! isentrope whose implied area `m_dot / (ρ·u)` matches it. The relation is
//! double-valued, so the caller selects the subsonic (`h* < h < h0`) or
//! supersonic (`floor·h0 ≤ h ≤ h*`) branch. Within a branch the implied area
//! grows monotonically away from the throat.

mod error;
mod problem;

pub use error::InversionError;

use twine_solvers::equation::bisection;
use uom::{
    ConstZero,
    si::{area::square_meter, available_energy::joule_per_kilogram, f64::Area, ratio::ratio},
};

use crate::support::{thermo::PropertyLookup, units::SpecificEnthalpy};

use super::{Branch, ChokedFlow, FlowState, InversionConfig, SearchStrategy};

use problem::{AreaModel, AreaProblem};

/// Fraction of `h0 − h*` kept clear of the reservoir, where `u = 0` and the
/// implied area is unbounded.
const RESERVOIR_CLEARANCE: f64 = 1e-9;

/// Finds the flow state whose implied area matches `target` on `branch`.
///
/// A `hint` (typically the enthalpy of the previous station on the same
/// branch) narrows the bisection bracket when it lies inside the branch.
/// It never changes which root is found.
///
/// A state is accepted only if `|A(h) − A| ≤ area_tol·A`.
///
/// # Errors
///
/// Returns [`InversionError`] if the target is invalid, the lookup fails
/// where the root must lie, the search does not converge, or no state
/// matches within tolerance.
pub fn invert(
    target: Area,
    branch: Branch,
    choked: &ChokedFlow,
    lookup: &impl PropertyLookup,
    hint: Option<SpecificEnthalpy>,
    config: &InversionConfig,
) -> Result<FlowState, InversionError> {
    config.validate()?;
    invert_station(target, branch, choked, lookup, hint, config)
}

/// Inverts one station with a configuration that has already been validated.
pub(super) fn invert_station(
    target: Area,
    branch: Branch,
    choked: &ChokedFlow,
    lookup: &impl PropertyLookup,
    hint: Option<SpecificEnthalpy>,
    config: &InversionConfig,
) -> Result<FlowState, InversionError> {
    if !(target > Area::ZERO) || !target.get::<square_meter>().is_finite() {
        return Err(InversionError::InvalidTarget { area: target });
    }

    match config.strategy {
        SearchStrategy::Bisection => bisect(target, branch, choked, lookup, hint, config),
        SearchStrategy::Scan { samples } => scan(target, branch, choked, lookup, samples, config),
    }
}

/// Returns the branch's enthalpy range as `(throat end, far end)` in J/kg.
fn branch_range(branch: Branch, choked: &ChokedFlow, floor: f64) -> (f64, f64) {
    let h0 = choked.reservoir.enthalpy.get::<joule_per_kilogram>();
    let h_star = choked.throat.enthalpy.get::<joule_per_kilogram>();

    match branch {
        Branch::Subsonic => (h_star, h_star + (h0 - h_star) * (1.0 - RESERVOIR_CLEARANCE)),
        Branch::Supersonic => (h_star, (floor * h0).min(h_star)),
    }
}

fn enthalpy(h: f64) -> SpecificEnthalpy {
    SpecificEnthalpy::new::<joule_per_kilogram>(h)
}

fn relative_miss(state: &FlowState, target: Area) -> f64 {
    ((state.area - target) / target).get::<ratio>().abs()
}

fn accept(state: FlowState, target: Area, tol: f64) -> Result<FlowState, InversionError> {
    let miss = relative_miss(&state, target);
    if miss <= tol {
        Ok(state)
    } else {
        Err(InversionError::NotFound {
            best_relative_miss: Some(miss),
        })
    }
}

fn bisect(
    target: Area,
    branch: Branch,
    choked: &ChokedFlow,
    lookup: &impl PropertyLookup,
    hint: Option<SpecificEnthalpy>,
    config: &InversionConfig,
) -> Result<FlowState, InversionError> {
    let (near, far) = branch_range(branch, choked, config.floor);

    // The implied area is smallest at the throat, so a target at or below it
    // has no interior root and can only match the sonic state itself.
    let throat = choked.state_at(lookup, enthalpy(near))?;
    if throat.area >= target {
        return accept(throat, target, config.area_tol);
    }

    let far = match choked.state_at(lookup, enthalpy(far)) {
        Ok(state) => state,
        Err(error) => {
            let edge = support_edge(choked, lookup, throat, far, config);
            if edge.area <= target {
                // The root lies beyond the data; report why it was unreachable.
                return accept(edge, target, config.area_tol)
                    .map_err(|_| InversionError::PropertyLookup(error));
            }
            edge
        }
    };
    if far.area <= target {
        return accept(far, target, config.area_tol);
    }

    let far_h = far.enthalpy.get::<joule_per_kilogram>();
    let mut bracket = [near, far_h];
    if let Some(hint) = hint.map(|h| h.get::<joule_per_kilogram>()) {
        if (hint - near) * (hint - far_h) < 0.0 {
            if let Ok(state) = choked.state_at(lookup, enthalpy(hint)) {
                bracket = if state.area < target {
                    [hint, far_h]
                } else {
                    [near, hint]
                };
            }
        }
    }

    let model = AreaModel::new(choked, lookup);
    let problem = AreaProblem::new(target);

    let solution = bisection::solve(
        &model,
        &problem,
        bracket,
        &config.bisection(target),
        |event: &bisection::Event<'_, _, _>| {
            // Lookup failures come from leaving the data, which happens on
            // the far side of the root where the implied area is large.
            if event.result().is_err() {
                return Some(bisection::Action::assume_positive());
            }
            None
        },
    )?;

    if solution.status != bisection::Status::Converged {
        return Err(InversionError::MaxIters {
            residual: Area::new::<square_meter>(solution.residual),
            iters: solution.iters,
        });
    }

    accept(solution.snapshot.output, target, config.area_tol)
}

/// Locates the last enthalpy between the throat and `invalid` where the
/// lookup still succeeds, and returns the state there.
fn support_edge(
    choked: &ChokedFlow,
    lookup: &impl PropertyLookup,
    throat: FlowState,
    invalid: f64,
    config: &InversionConfig,
) -> FlowState {
    let tol = config.enthalpy_tol.get::<joule_per_kilogram>();
    let mut edge = throat;
    let mut valid = throat.enthalpy.get::<joule_per_kilogram>();
    let mut invalid = invalid;

    for _ in 0..config.max_iters {
        if (valid - invalid).abs() <= tol {
            break;
        }
        let mid = 0.5 * (valid + invalid);
        match choked.state_at(lookup, enthalpy(mid)) {
            Ok(state) => {
                valid = mid;
                edge = state;
            }
            Err(_) => invalid = mid,
        }
    }

    edge
}

fn scan(
    target: Area,
    branch: Branch,
    choked: &ChokedFlow,
    lookup: &impl PropertyLookup,
    samples: usize,
    config: &InversionConfig,
) -> Result<FlowState, InversionError> {
    let (near, far) = branch_range(branch, choked, config.floor);

    // Walk from the reservoir side so the first match is the one a flow
    // expanding from rest would reach first.
    let (start, end) = match branch {
        Branch::Subsonic => (far, near),
        Branch::Supersonic => (near, far),
    };

    let mut best: Option<f64> = None;
    let mut first_error = None;

    for k in 0..samples {
        #[allow(clippy::cast_precision_loss)]
        let h = start + (end - start) * k as f64 / (samples - 1) as f64;

        match choked.state_at(lookup, enthalpy(h)) {
            Ok(state) => {
                let miss = relative_miss(&state, target);
                if miss <= config.area_tol {
                    return Ok(state);
                }
                best = Some(best.map_or(miss, |b| b.min(miss)));
            }
            Err(error) => {
                if first_error.is_none() {
                    first_error = Some(error);
                }
            }
        }
    }

    match (best, first_error) {
        (None, Some(error)) => Err(InversionError::PropertyLookup(error)),
        (best_relative_miss, _) => Err(InversionError::NotFound { best_relative_miss }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    use crate::models::flow::nozzle::core::{
        frozen::mach_from_area_ratio,
        test_support::{NoisyDensity, bounded_gas, choked, subsonic_bounded_gas, synthetic_gas},
    };

    fn area(a: f64) -> Area {
        Area::new::<square_meter>(a)
    }

    fn mach(state: &FlowState) -> f64 {
        state.mach.get::<ratio>()
    }

    #[test]
    fn subsonic_and_supersonic_roots_match_area_mach_relation() {
        let gas = synthetic_gas();
        let choked = choked(&gas);
        let gamma = gas.gamma().get::<ratio>();
        let config = InversionConfig::default();

        let sub = invert(area(2.0), Branch::Subsonic, &choked, &gas, None, &config).unwrap();
        let sup = invert(area(2.0), Branch::Supersonic, &choked, &gas, None, &config).unwrap();

        assert!(mach(&sub) < 1.0);
        assert!(mach(&sup) > 1.0);
        assert!(sup.enthalpy < sub.enthalpy);

        let expected_sub = mach_from_area_ratio(2.0, gamma, Branch::Subsonic, 100, 1e-12).unwrap();
        let expected_sup =
            mach_from_area_ratio(2.0, gamma, Branch::Supersonic, 100, 1e-12).unwrap();
        assert_relative_eq!(mach(&sub), expected_sub, max_relative = 1e-6);
        assert_relative_eq!(mach(&sup), expected_sup, max_relative = 1e-6);
        assert_relative_eq!(sub.area.get::<square_meter>(), 2.0, max_relative = 1e-6);
    }

    #[test]
    fn hint_does_not_change_the_root() {
        let gas = synthetic_gas();
        let choked = choked(&gas);
        let config = InversionConfig::default();

        let plain = invert(area(1.5), Branch::Supersonic, &choked, &gas, None, &config).unwrap();

        for hint in [0.55e6, 2.0e6, 2.4e6, 2.9e6] {
            let hinted = invert(
                area(1.5),
                Branch::Supersonic,
                &choked,
                &gas,
                Some(enthalpy(hint)),
                &config,
            )
            .unwrap();
            assert_relative_eq!(
                hinted.enthalpy.get::<joule_per_kilogram>(),
                plain.enthalpy.get::<joule_per_kilogram>(),
                max_relative = 1e-7
            );
        }
    }

    #[test]
    fn areas_below_throat_are_not_found() {
        let gas = synthetic_gas();
        let choked = choked(&gas);
        let config = InversionConfig::default();

        let result = invert(area(0.5), Branch::Subsonic, &choked, &gas, None, &config);
        assert!(matches!(
            result,
            Err(InversionError::NotFound {
                best_relative_miss: Some(miss),
            }) if miss > 0.9
        ));

        // Within tolerance of the throat area, the sonic state is accepted.
        let near = invert(
            area(0.995),
            Branch::Supersonic,
            &choked,
            &gas,
            None,
            &config,
        )
        .unwrap();
        assert_relative_eq!(mach(&near), 1.0, epsilon = 1e-6);
    }

    #[test]
    fn scan_agrees_with_bisection_within_tolerance() {
        let gas = synthetic_gas();
        let choked = choked(&gas);
        let bisection = InversionConfig::default();
        let scan = InversionConfig {
            strategy: SearchStrategy::Scan { samples: 2000 },
            ..bisection
        };

        for (target, branch) in [
            (1.8, Branch::Subsonic),
            (1.1, Branch::Subsonic),
            (1.3, Branch::Supersonic),
            (1.9, Branch::Supersonic),
        ] {
            let exact = invert(area(target), branch, &choked, &gas, None, &bisection).unwrap();
            let scanned = invert(area(target), branch, &choked, &gas, None, &scan).unwrap();

            assert!(relative_miss(&scanned, area(target)) <= scan.area_tol);
            assert_eq!(mach(&scanned) < 1.0, mach(&exact) < 1.0);
        }
    }

    #[test]
    fn out_of_support_roots_report_lookup_failure() {
        let gas = bounded_gas(synthetic_gas());
        let choked = choked(&gas);
        let config = InversionConfig::default();

        // Within the window: the root is found next to the support edge.
        let inside = invert(area(1.4), Branch::Supersonic, &choked, &gas, None, &config);
        assert!(inside.is_ok());

        let beyond = invert(area(1.9), Branch::Supersonic, &choked, &gas, None, &config);
        assert!(beyond.unwrap_err().is_out_of_range());

        let scan = InversionConfig {
            strategy: SearchStrategy::Scan { samples: 500 },
            ..config
        };
        let scanned = invert(area(1.9), Branch::Supersonic, &choked, &gas, None, &scan);
        assert!(matches!(
            scanned,
            Err(InversionError::NotFound {
                best_relative_miss: Some(_)
            })
        ));
    }

    #[test]
    fn subsonic_roots_beyond_the_data_report_lookup_failure() {
        let gas = subsonic_bounded_gas(synthetic_gas());
        let choked = choked(&gas);
        let config = InversionConfig::default();

        // The data stops short of the reservoir, near `A = 1.6`.
        let inside = invert(area(1.5), Branch::Subsonic, &choked, &gas, None, &config).unwrap();
        assert!(mach(&inside) < 1.0);
        assert_relative_eq!(inside.area.get::<square_meter>(), 1.5, max_relative = 1e-6);

        let beyond = invert(area(1.9), Branch::Subsonic, &choked, &gas, None, &config);
        assert!(beyond.unwrap_err().is_out_of_range());
    }

    #[test]
    fn noisy_data_is_accepted_only_within_tolerance() {
        let clean = synthetic_gas();
        let gamma = clean.gamma().get::<ratio>();
        let gas = NoisyDensity::new(clean, 2e-3);
        let choked = choked(&gas);
        let config = InversionConfig::default();

        let found = invert(area(1.5), Branch::Subsonic, &choked, &gas, None, &config).unwrap();
        assert!(relative_miss(&found, area(1.5)) <= config.area_tol);
        let expected = mach_from_area_ratio(1.5, gamma, Branch::Subsonic, 100, 1e-12).unwrap();
        assert_relative_eq!(mach(&found), expected, max_relative = 1e-2);

        // A coarse scan lands within a percent but never within a part per billion.
        let scan = InversionConfig {
            strategy: SearchStrategy::Scan { samples: 400 },
            ..config
        };
        let scanned = invert(area(1.5), Branch::Subsonic, &choked, &gas, None, &scan).unwrap();
        assert!(relative_miss(&scanned, area(1.5)) <= scan.area_tol);

        let tight = InversionConfig {
            area_tol: 1e-9,
            ..scan
        };
        let result = invert(area(1.5), Branch::Subsonic, &choked, &gas, None, &tight);
        assert!(matches!(
            result,
            Err(InversionError::NotFound {
                best_relative_miss: Some(miss),
            }) if miss > 1e-9 && miss < 1e-2
        ));
    }

    #[test]
    fn rejects_invalid_targets() {
        let gas = synthetic_gas();
        let choked = choked(&gas);
        let config = InversionConfig::default();

        for target in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let result = invert(area(target), Branch::Subsonic, &choked, &gas, None, &config);
            assert!(matches!(result, Err(InversionError::InvalidTarget { .. })));
        }
    }
}
