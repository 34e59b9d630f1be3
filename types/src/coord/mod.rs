use std::{error::Error, fmt};

use crate::{
    angle::{Axis, Hemisphere, ParseAngleError},
    enum_trivial_from_impl,
};

pub use self::{geo::GeoPosition, projected::ProjectedCoordinate};

mod geo;
mod projected;

/// The coordinate value cannot represent a position
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum CoordinateOutOfRange {
    /// |lat| > 90
    Latitude,
    /// |lon| > 180
    Longitude,
    /// NaN or infinity
    NotFinite,
    /// Less than two values for the pair
    Incomplete,
}

impl fmt::Display for CoordinateOutOfRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            Self::Latitude => "Latitude not in range [-90..90]",
            Self::Longitude => "Longitude not in range [-180..180]",
            Self::NotFinite => "Coordinate is not a finite number",
            Self::Incomplete => "Coordinate pair is incomplete",
        };

        write!(f, "{msg}")
    }
}

impl Error for CoordinateOutOfRange {}

#[derive(Debug, Clone, PartialEq, Eq)]
/// A pair of DMS strings cannot be turned into a geographic position
pub enum ParseCoordinateError {
    /// Either of the angles is malformed
    Angle(ParseAngleError),
    /// A longitude direction was given for the latitude or vice versa
    WrongAxis {
        /// The coordinate being parsed
        expected: Axis,
        /// The direction found in the string
        found: Hemisphere,
    },
    /// The angle is valid but too big for the coordinate
    Range(CoordinateOutOfRange),
}

enum_trivial_from_impl!(ParseAngleError => ParseCoordinateError:Angle);
enum_trivial_from_impl!(CoordinateOutOfRange => ParseCoordinateError:Range);

impl fmt::Display for ParseCoordinateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Coordinate parsing failed: ")?;
        match self {
            Self::Angle(inner) => write!(f, "{inner}"),
            Self::WrongAxis { expected, found } => {
                write!(f, "direction {found} cannot be used for the {expected}")
            }
            Self::Range(inner) => write!(f, "{inner}"),
        }
    }
}

impl Error for ParseCoordinateError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Angle(inner) => Some(inner),
            Self::WrongAxis { .. } => None,
            Self::Range(inner) => Some(inner),
        }
    }
}
