use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::CoordinateOutOfRange;

/// A point on the S-JTSK grid, in metres.
///
/// The pair is kept in the order the conversion service receives it:
/// `easting` goes into its `yjtsk` field and `northing` into `xjtsk`.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ProjectedCoordinate {
    easting: f64,
    northing: f64,
}

impl ProjectedCoordinate {
    /// Construct the grid point.
    ///
    /// # Errors
    /// Either value is NaN or infinite.
    pub fn new(easting: f64, northing: f64) -> Result<Self, CoordinateOutOfRange> {
        if !easting.is_finite() || !northing.is_finite() {
            return Err(CoordinateOutOfRange::NotFinite);
        }

        Ok(Self { easting, northing })
    }

    /// The first (Y) value
    pub const fn easting(self) -> f64 {
        self.easting
    }

    /// The second (X) value
    pub const fn northing(self) -> f64 {
        self.northing
    }
}

/// `[easting, northing]` in the given order, no axes swapping
impl TryFrom<[f64; 2]> for ProjectedCoordinate {
    type Error = CoordinateOutOfRange;

    fn try_from(value: [f64; 2]) -> Result<Self, Self::Error> {
        let [easting, northing] = value;
        Self::new(easting, northing)
    }
}

/// The leading `[easting, northing]` of a point; a third (height) value is ignored
impl TryFrom<&[f64]> for ProjectedCoordinate {
    type Error = CoordinateOutOfRange;

    fn try_from(value: &[f64]) -> Result<Self, Self::Error> {
        match value {
            [easting, northing, ..] => Self::new(*easting, *northing),
            _ => Err(CoordinateOutOfRange::Incomplete),
        }
    }
}

impl fmt::Display for ProjectedCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            write!(f, "Y: {}, X: {}", self.easting, self.northing)
        } else {
            write!(f, "({},{})", self.easting, self.northing)
        }
    }
}
