use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::angle::{Axis, DecimalDegree, DmsAngle};

use super::{CoordinateOutOfRange, ParseCoordinateError};

const MAX_LATITUDE: f64 = 90.0;
const MAX_LONGITUDE: f64 = 180.0;

/// The point on the WGS84 ellipsoid, represented as the pair (latitude, longitude)
/// of signed decimal degrees.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GeoPosition {
    latitude: DecimalDegree,
    longitude: DecimalDegree,
}

impl GeoPosition {
    /// Construct a position from the signed degrees.
    ///
    /// # Errors
    /// - any of the values is not finite;
    /// - latitude is out of `-90..=90` or longitude is out of `-180..=180`.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, CoordinateOutOfRange> {
        if !latitude.is_finite() || !longitude.is_finite() {
            return Err(CoordinateOutOfRange::NotFinite);
        }

        if latitude.abs() > MAX_LATITUDE {
            return Err(CoordinateOutOfRange::Latitude);
        }

        if longitude.abs() > MAX_LONGITUDE {
            return Err(CoordinateOutOfRange::Longitude);
        }

        Ok(Self {
            latitude: latitude.into(),
            longitude: longitude.into(),
        })
    }

    /// Parse the pair of `D°M'S"H` strings.
    /// The latitude has to be marked with `N` or `S`, the longitude with `E` or `W`.
    ///
    /// ```
    /// # use train_radar_types::GeoPosition;
    /// let pos = GeoPosition::from_dms("50°5'10.5\"N", "14°25'0\"E").unwrap();
    /// assert!(pos.latitude().value() > 50.0);
    /// ```
    ///
    /// # Errors
    /// Any of the strings cannot be parsed, or they are given in the wrong order.
    pub fn from_dms(latitude: &str, longitude: &str) -> Result<Self, ParseCoordinateError> {
        let lat: DmsAngle = latitude.parse()?;
        let lon: DmsAngle = longitude.parse()?;
        Self::try_from((lat, lon))
    }

    /// North is positive
    pub const fn latitude(self) -> DecimalDegree {
        self.latitude
    }

    /// East is positive
    pub const fn longitude(self) -> DecimalDegree {
        self.longitude
    }

    /// The plain numbers in the (lat, lon) order
    pub const fn lat_lon(self) -> (f64, f64) {
        (self.latitude.value(), self.longitude.value())
    }
}

fn check_axis(angle: DmsAngle, expected: Axis) -> Result<DecimalDegree, ParseCoordinateError> {
    let found = angle.hemisphere();
    if found.axis() == expected {
        Ok(angle.to_decimal())
    } else {
        Err(ParseCoordinateError::WrongAxis { expected, found })
    }
}

impl TryFrom<(DmsAngle, DmsAngle)> for GeoPosition {
    type Error = ParseCoordinateError;

    fn try_from(value: (DmsAngle, DmsAngle)) -> Result<Self, Self::Error> {
        let (lat, lon) = value;
        let lat = check_axis(lat, Axis::Latitude)?;
        let lon = check_axis(lon, Axis::Longitude)?;
        Ok(Self::new(lat.value(), lon.value())?)
    }
}

fn fmt_with_direction(
    f: &mut fmt::Formatter<'_>,
    angle: DecimalDegree,
    positive: char,
    negative: char,
) -> fmt::Result {
    let value = angle.value();
    if value == 0.0 {
        write!(f, "{}", DecimalDegree::from(0.0))
    } else {
        let direction = if value > 0.0 { positive } else { negative };
        write!(f, "{}{}", DecimalDegree::from(angle.magnitude()), direction)
    }
}

impl fmt::Display for GeoPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            write!(f, "Lat: ")?;
            fmt_with_direction(f, self.latitude, 'N', 'S')?;
            write!(f, ", Long: ")?;
            fmt_with_direction(f, self.longitude, 'E', 'W')
        } else {
            write!(f, "({},{})", self.latitude, self.longitude)
        }
    }
}
