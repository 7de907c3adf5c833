//! Solver configuration for the nozzle models.

use thiserror::Error;
use twine_solvers::equation::bisection;
use uom::si::{
    area::square_meter,
    available_energy::joule_per_kilogram,
    f64::{Area, Velocity},
    velocity::meter_per_second,
};

use crate::support::{
    constraint::{Constraint, ConstraintError, StrictlyPositive, UnitIntervalOpen},
    units::SpecificEnthalpy,
};

/// A configuration value violates its constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("invalid configuration value for `{field}`")]
pub struct ConfigError {
    /// Name of the offending field.
    pub field: &'static str,

    /// The violated constraint.
    #[source]
    pub source: ConstraintError,
}

fn check<T, C: Constraint<T>>(field: &'static str, value: &T) -> Result<(), ConfigError> {
    C::check(value).map_err(|source| ConfigError { field, source })
}

fn check_samples(field: &'static str, samples: usize) -> Result<(), ConfigError> {
    if samples < 2 {
        return Err(ConfigError {
            field,
            source: ConstraintError::BelowMinimum,
        });
    }
    Ok(())
}

/// Configuration for locating the sonic throat state.
#[derive(Debug, Clone, Copy)]
pub struct ThroatConfig {
    /// Maximum iteration count for the bisection solve.
    pub max_iters: usize,

    /// Number of enthalpies sampled between `h0` and the floor when
    /// bracketing the sonic point.
    pub bracket_samples: usize,

    /// Lowest enthalpy searched, as a fraction of the reservoir enthalpy.
    pub floor: f64,

    /// Absolute tolerance on the enthalpy search variable.
    pub enthalpy_tol: SpecificEnthalpy,

    /// Absolute tolerance on the sonic residual `u − a`.
    pub velocity_tol: Velocity,
}

impl Default for ThroatConfig {
    fn default() -> Self {
        Self {
            max_iters: 100,
            bracket_samples: 200,
            floor: 1e-3,
            enthalpy_tol: SpecificEnthalpy::new::<joule_per_kilogram>(1e-6),
            velocity_tol: Velocity::new::<meter_per_second>(1e-6),
        }
    }
}

impl ThroatConfig {
    /// Checks every field against its constraint.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] naming the first invalid field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check::<_, StrictlyPositive>("max_iters", &self.max_iters)?;
        check_samples("bracket_samples", self.bracket_samples)?;
        check::<_, UnitIntervalOpen>("floor", &self.floor)?;
        check::<_, StrictlyPositive>("enthalpy_tol", &self.enthalpy_tol)?;
        check::<_, StrictlyPositive>("velocity_tol", &self.velocity_tol)
    }

    /// Converts this configuration into a bisection solver configuration.
    pub(super) fn bisection(&self) -> bisection::Config {
        bisection::Config {
            max_iters: self.max_iters,
            x_abs_tol: self.enthalpy_tol.get::<joule_per_kilogram>(),
            x_rel_tol: 0.0,
            residual_tol: self.velocity_tol.get::<meter_per_second>(),
        }
    }
}

/// How the area-enthalpy inverter searches a branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchStrategy {
    /// Bisection on the area residual, bracketed by the sonic enthalpy.
    #[default]
    Bisection,

    /// Walk a uniform sequence of `samples` enthalpies from the reservoir
    /// side of the branch and accept the first within tolerance.
    Scan { samples: usize },
}

/// Configuration for inverting the area-enthalpy relation at a station.
#[derive(Debug, Clone, Copy)]
pub struct InversionConfig {
    /// Search strategy.
    pub strategy: SearchStrategy,

    /// Relative area tolerance `τ` for accepting a station:
    /// `|A(h) − A| ≤ τ·A`.
    ///
    /// Tabulated properties carry interpolation noise, so values much tighter
    /// than about 1% may fail to resolve stations near the throat.
    pub area_tol: f64,

    /// Lowest enthalpy searched on the supersonic branch, as a fraction of
    /// the reservoir enthalpy.
    pub floor: f64,

    /// Maximum iteration count for bisection and for locating the edge of
    /// the lookup's support.
    pub max_iters: usize,

    /// Absolute tolerance on the enthalpy search variable.
    pub enthalpy_tol: SpecificEnthalpy,
}

impl Default for InversionConfig {
    fn default() -> Self {
        Self {
            strategy: SearchStrategy::default(),
            area_tol: 0.01,
            floor: 0.01,
            max_iters: 100,
            enthalpy_tol: SpecificEnthalpy::new::<joule_per_kilogram>(1e-6),
        }
    }
}

impl InversionConfig {
    /// Checks every field against its constraint.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] naming the first invalid field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let SearchStrategy::Scan { samples } = self.strategy {
            check_samples("strategy.samples", samples)?;
        }
        check::<_, UnitIntervalOpen>("area_tol", &self.area_tol)?;
        check::<_, UnitIntervalOpen>("floor", &self.floor)?;
        check::<_, StrictlyPositive>("max_iters", &self.max_iters)?;
        check::<_, StrictlyPositive>("enthalpy_tol", &self.enthalpy_tol)
    }

    /// Converts this configuration into a bisection solver configuration.
    ///
    /// The residual tolerance is far tighter than `area_tol` so converged
    /// points sit on the root rather than on the edge of the acceptance band.
    pub(super) fn bisection(&self, target: Area) -> bisection::Config {
        bisection::Config {
            max_iters: self.max_iters,
            x_abs_tol: self.enthalpy_tol.get::<joule_per_kilogram>(),
            x_rel_tol: 0.0,
            residual_tol: 1e-9 * target.get::<square_meter>(),
        }
    }
}

/// Configuration for the frozen-flow area-Mach solve.
#[derive(Debug, Clone, Copy)]
pub struct FrozenConfig {
    /// Maximum Newton iterations per station.
    pub max_iters: usize,

    /// Convergence tolerance on the Mach number step, relative to `max(1, M)`.
    pub mach_tol: f64,
}

impl Default for FrozenConfig {
    fn default() -> Self {
        Self {
            max_iters: 100,
            mach_tol: 1e-12,
        }
    }
}

impl FrozenConfig {
    /// Checks every field against its constraint.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] naming the first invalid field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check::<_, StrictlyPositive>("max_iters", &self.max_iters)?;
        check::<_, StrictlyPositive>("mach_tol", &self.mach_tol)
    }
}

/// Configuration for a complete indirect-method nozzle solve.
#[derive(Debug, Clone, Copy, Default)]
pub struct NozzleConfig {
    pub throat: ThroatConfig,
    pub inversion: InversionConfig,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(ThroatConfig::default().validate().is_ok());
        assert!(InversionConfig::default().validate().is_ok());
        assert!(FrozenConfig::default().validate().is_ok());
    }

    #[test]
    fn reports_the_offending_field() {
        let config = InversionConfig {
            area_tol: 0.0,
            ..InversionConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError {
                field: "area_tol",
                source: ConstraintError::BelowMinimum,
            })
        );

        let config = InversionConfig {
            strategy: SearchStrategy::Scan { samples: 1 },
            ..InversionConfig::default()
        };
        assert_eq!(config.validate().unwrap_err().field, "strategy.samples");

        let config = ThroatConfig {
            velocity_tol: Velocity::new::<meter_per_second>(-1.0),
            ..ThroatConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError {
                field: "velocity_tol",
                source: ConstraintError::Negative,
            })
        );
    }
}
