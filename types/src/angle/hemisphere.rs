use std::{error::Error, fmt};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The cardinal direction written after a DMS angle.
///
/// Southern and western angles are negative in the decimal form.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Hemisphere {
    /// `N`
    North,
    /// `S`
    South,
    /// `E`
    East,
    /// `W`
    West,
}

/// Which coordinate of a geographic position the hemisphere belongs to
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Axis {
    /// North-South
    Latitude,
    /// East-West
    Longitude,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Latitude => write!(f, "latitude"),
            Self::Longitude => write!(f, "longitude"),
        }
    }
}

impl Hemisphere {
    /// The letter used in the notation
    pub const fn letter(self) -> char {
        match self {
            Self::North => 'N',
            Self::South => 'S',
            Self::East => 'E',
            Self::West => 'W',
        }
    }

    /// The coordinate the hemisphere applies to
    pub const fn axis(self) -> Axis {
        match self {
            Self::North | Self::South => Axis::Latitude,
            Self::East | Self::West => Axis::Longitude,
        }
    }

    /// South and west flip the sign of the decimal value
    pub const fn is_negative(self) -> bool {
        matches!(self, Self::South | Self::West)
    }
}

/// The character does not denote a hemisphere
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ParseHemisphereError {
    failed: char,
}

impl fmt::Display for ParseHemisphereError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Cannot parse Hemisphere from {:?}", self.failed)
    }
}

impl Error for ParseHemisphereError {}

impl TryFrom<char> for Hemisphere {
    type Error = ParseHemisphereError;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c {
            'N' => Ok(Self::North),
            'S' => Ok(Self::South),
            'E' => Ok(Self::East),
            'W' => Ok(Self::West),
            _ => Err(ParseHemisphereError { failed: c }),
        }
    }
}

impl fmt::Display for Hemisphere {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}
