use std::cmp::Ordering;

use super::{Constrained, Constraint, ConstraintError};

/// Marker type enforcing that a value lies in the open unit interval: `0 < x < 1`.
///
/// Used for relative tolerances and for enthalpy fractions of the reservoir value.
///
/// # Examples
///
/// ```
/// use twine_nozzle::support::constraint::UnitIntervalOpen;
///
/// let tol = UnitIntervalOpen::new(0.05).unwrap();
/// assert_eq!(tol.as_ref(), &0.05);
///
/// assert!(UnitIntervalOpen::new(0.0).is_err());
/// assert!(UnitIntervalOpen::new(1.0).is_err());
/// assert!(UnitIntervalOpen::new(f64::NAN).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct UnitIntervalOpen;

impl UnitIntervalOpen {
    /// Constructs `Constrained<f64, UnitIntervalOpen>` if `0 < value < 1`.
    ///
    /// # Errors
    ///
    /// - [`ConstraintError::BelowMinimum`] if less than or equal to zero.
    /// - [`ConstraintError::AboveMaximum`] if greater than or equal to one.
    /// - [`ConstraintError::NotANumber`] if the value is `NaN`.
    pub fn new(value: f64) -> Result<Constrained<f64, UnitIntervalOpen>, ConstraintError> {
        Constrained::<f64, UnitIntervalOpen>::new(value)
    }
}

impl Constraint<f64> for UnitIntervalOpen {
    fn check(value: &f64) -> Result<(), ConstraintError> {
        match (value.partial_cmp(&0.0), value.partial_cmp(&1.0)) {
            (None, _) | (_, None) => Err(ConstraintError::NotANumber),
            (Some(Ordering::Less | Ordering::Equal), _) => Err(ConstraintError::BelowMinimum),
            (_, Some(Ordering::Greater | Ordering::Equal)) => Err(ConstraintError::AboveMaximum),
            _ => Ok(()),
        }
    }
}
