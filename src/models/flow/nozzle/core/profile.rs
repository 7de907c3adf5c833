use thiserror::Error;
use uom::si::{
    area::square_meter,
    f64::{Area, Length},
    length::meter,
};

use crate::support::constraint::{Constraint, ConstraintError, StrictlyPositive};

/// Which side of the throat a station sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Branch {
    /// Upstream of the throat, where `M < 1`.
    Subsonic,

    /// At or downstream of the throat, where `M ≥ 1`.
    Supersonic,
}

/// Errors from constructing an [`AreaProfile`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProfileError {
    /// The profile has no stations.
    #[error("area profile must contain at least one station")]
    Empty,

    /// Position and area columns differ in length.
    #[error("position and area columns differ in length: {positions} vs {areas}")]
    LengthMismatch { positions: usize, areas: usize },

    /// A station area is zero, negative, or not a number.
    #[error("invalid area at station {index}: {area:?}")]
    InvalidArea {
        index: usize,
        area: Area,
        #[source]
        source: ConstraintError,
    },

    /// A station position is not finite.
    #[error("invalid position at station {index}: {x:?}")]
    InvalidPosition { index: usize, x: Length },
}

/// Cross-sectional area sampled at ordered axial stations.
///
/// Stations are kept in the order given and are not required to be sorted
/// or uniformly spaced. The throat is the station with the smallest area.
/// When several stations tie for the minimum, the first of them is the throat.
#[derive(Debug, Clone, PartialEq)]
pub struct AreaProfile {
    positions: Vec<Length>,
    areas: Vec<Area>,
    throat_index: usize,
}

impl AreaProfile {
    /// Creates a profile from `(x, A)` stations.
    ///
    /// # Errors
    ///
    /// Returns a [`ProfileError`] if there are no stations, an area is not
    /// strictly positive, or a position is not finite.
    pub fn new(stations: impl IntoIterator<Item = (Length, Area)>) -> Result<Self, ProfileError> {
        let (positions, areas): (Vec<_>, Vec<_>) = stations.into_iter().unzip();

        if areas.is_empty() {
            return Err(ProfileError::Empty);
        }

        for (index, (&x, &area)) in positions.iter().zip(&areas).enumerate() {
            if !x.get::<meter>().is_finite() {
                return Err(ProfileError::InvalidPosition { index, x });
            }
            StrictlyPositive::check(&area).map_err(|source| ProfileError::InvalidArea {
                index,
                area,
                source,
            })?;
            if !area.get::<square_meter>().is_finite() {
                return Err(ProfileError::InvalidArea {
                    index,
                    area,
                    source: ConstraintError::AboveMaximum,
                });
            }
        }

        let mut throat_index = 0;
        for (i, area) in areas.iter().enumerate() {
            if *area < areas[throat_index] {
                throat_index = i;
            }
        }

        Ok(Self {
            positions,
            areas,
            throat_index,
        })
    }

    /// Creates a profile from parallel columns of positions (m) and areas (m²).
    ///
    /// # Errors
    ///
    /// Returns [`ProfileError::LengthMismatch`] if the columns differ in length,
    /// or any error from [`AreaProfile::new`].
    pub fn from_si(x: &[f64], area: &[f64]) -> Result<Self, ProfileError> {
        if x.len() != area.len() {
            return Err(ProfileError::LengthMismatch {
                positions: x.len(),
                areas: area.len(),
            });
        }

        let positions = x.iter().map(|&x| Length::new::<meter>(x));
        let areas = area.iter().map(|&area| Area::new::<square_meter>(area));
        Self::new(positions.zip(areas))
    }

    /// Returns the number of stations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.areas.len()
    }

    /// Always `false`; a profile holds at least one station.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.areas.is_empty()
    }

    /// Returns the index of the throat station.
    #[must_use]
    pub fn throat_index(&self) -> usize {
        self.throat_index
    }

    /// Returns the throat position and area.
    #[must_use]
    pub fn throat(&self) -> (Length, Area) {
        (
            self.positions[self.throat_index],
            self.areas[self.throat_index],
        )
    }

    /// Returns the branch a station index belongs to.
    ///
    /// The throat station itself is assigned to the supersonic branch.
    #[must_use]
    pub fn branch(&self, index: usize) -> Branch {
        if index < self.throat_index {
            Branch::Subsonic
        } else {
            Branch::Supersonic
        }
    }

    /// Iterates over `(index, x, A)` for every station in order.
    pub fn stations(&self) -> impl Iterator<Item = (usize, Length, Area)> + '_ {
        self.positions
            .iter()
            .zip(&self.areas)
            .enumerate()
            .map(|(i, (&x, &area))| (i, x, area))
    }
}
