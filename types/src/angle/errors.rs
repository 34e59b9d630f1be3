use std::{
    error::Error,
    fmt,
    num::{ParseFloatError, ParseIntError},
};

use crate::enum_trivial_from_impl;

use super::hemisphere::ParseHemisphereError;

/// Some part of a DMS angle does not fit its allowed range
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum OutOfRange {
    /// deg > 360
    Degrees,
    /// min >= 60
    ArcMinutes,
    /// sec >= 60, negative or not a number
    ArcSeconds,
}

impl fmt::Display for OutOfRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            Self::Degrees => "Too big value for degrees part of an angle (max is 360)",
            Self::ArcMinutes => "Angle's arc minute value not in range [0..60)",
            Self::ArcSeconds => "Angle's arc second value not in range [0..60)",
        };

        write!(f, "{msg}")
    }
}

impl Error for OutOfRange {}

/// The string cannot be interpreted as a `D°M'S"H` angle
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseAngleError {
    /// The value matched the notation, but some part is out of range
    Range(OutOfRange),
    /// Seconds are not a valid decimal number
    Float(ParseFloatError),
    /// Degrees or minutes overflow their integer type
    Int(ParseIntError),
    /// The trailing letter is not one of `N`, `S`, `E`, `W`
    Hemisphere(ParseHemisphereError),
    /// The string does not follow the notation at all
    DmsNotation,
}

enum_trivial_from_impl!(OutOfRange => ParseAngleError:Range);
enum_trivial_from_impl!(ParseFloatError => ParseAngleError:Float);
enum_trivial_from_impl!(ParseIntError => ParseAngleError:Int);
enum_trivial_from_impl!(ParseHemisphereError => ParseAngleError:Hemisphere);

impl fmt::Display for ParseAngleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Cannot parse angle: ")?;
        match self {
            Self::Range(inner) => write!(f, "{inner}"),
            Self::Float(inner) => write!(f, "{inner}"),
            Self::Int(inner) => write!(f, "{inner}"),
            Self::Hemisphere(inner) => write!(f, "{inner}"),
            Self::DmsNotation => write!(f, "not a Degree-Minute-Second notation"),
        }
    }
}

impl Error for ParseAngleError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Range(inner) => Some(inner),
            Self::Float(inner) => Some(inner),
            Self::Int(inner) => Some(inner),
            Self::Hemisphere(inner) => Some(inner),
            Self::DmsNotation => None,
        }
    }
}
