//! The `D°M'S"H` notation as returned by the S-JTSK conversion service,
//! e.g. `50°5'10.5"N` or `14°25'3.217"E`.
//!
//! Unlike the general purpose notations, every part is mandatory here:
//! degrees and minutes are whole numbers, seconds can have a decimal fraction
//! and the hemisphere letter is always at the end.

use std::{fmt, str::FromStr};

use lazy_static::lazy_static;
use regex::Regex;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::{
    errors::{OutOfRange, ParseAngleError},
    hemisphere::Hemisphere,
    ARC_MINUTE_SIGN, ARC_SECOND_SIGN, DEGREE_SIGN, MAX_DEGREE, MINUTES_IN_DEGREE,
    SECONDS_IN_MINUTE,
};

/// Construct regular expression to parse the Degree-Minute-Second representation of an angle
fn parse_dms_re() -> String {
    format!(
        r"(?x)                                  # enables verbose mode (to allow these comments)
        ^                                           # match the whole line from the start
        (?P<deg>\d+)                                # mandatory degree VALUE - requires more validation!
        {}                                          # degree sign
        (?P<min>\d+)                                # mandatory minutes VALUE - requires more validation!
        {}                                          # arcminute sign
        (?P<sec>\d+(?:\.\d+)?)                      # mandatory seconds VALUE with the optional decimal fraction
        {}                                          # arcsecond sign
        (?P<hem>[A-Za-z])                           # hemisphere letter - requires more validation!
        $                                           # match the whole line till the end
        ",
        DEGREE_SIGN, ARC_MINUTE_SIGN, ARC_SECOND_SIGN,
    )
}

lazy_static! {
    static ref RE_DMS: Regex = Regex::new(&parse_dms_re()).expect("DMS regex is valid");
}

/// An angle with the hemisphere it points to.
///
/// The parts are kept exactly as they were written,
/// the conversion into the decimal form happens on demand.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DmsAngle {
    degrees: u16,
    minutes: u8,
    seconds: f64,
    hemisphere: Hemisphere,
}

impl DmsAngle {
    /// Degree, minute, second and the direction.
    ///
    /// # Errors
    /// When some part of the angle is out of scope
    /// (e.g. minutes >= 60 or degree > 360), the `OutOfRange` returned.
    pub fn new(
        degrees: u16,
        minutes: u8,
        seconds: f64,
        hemisphere: Hemisphere,
    ) -> Result<Self, OutOfRange> {
        if degrees > MAX_DEGREE {
            return Err(OutOfRange::Degrees);
        }

        if minutes >= MINUTES_IN_DEGREE {
            return Err(OutOfRange::ArcMinutes);
        }

        // NaN is not in any range
        let valid_seconds = 0.0..f64::from(SECONDS_IN_MINUTE);
        if !valid_seconds.contains(&seconds) {
            return Err(OutOfRange::ArcSeconds);
        }

        Ok(Self {
            degrees,
            minutes,
            seconds,
            hemisphere,
        })
    }

    /// The whole number of degrees
    pub const fn degrees(self) -> u16 {
        self.degrees
    }

    /// The arc minutes component
    pub const fn minutes(self) -> u8 {
        self.minutes
    }

    /// The arc seconds component with its fraction
    pub const fn seconds(self) -> f64 {
        self.seconds
    }

    /// The direction letter
    pub const fn hemisphere(self) -> Hemisphere {
        self.hemisphere
    }

    /// The signed decimal value: `D + M/60 + S/3600`, negated for the south and the west.
    pub fn to_decimal(self) -> DecimalDegree {
        let min_in_deg = f64::from(MINUTES_IN_DEGREE);
        let sec_in_deg = min_in_deg * f64::from(SECONDS_IN_MINUTE);

        let magnitude =
            f64::from(self.degrees) + f64::from(self.minutes) / min_in_deg + self.seconds / sec_in_deg;

        if self.hemisphere.is_negative() {
            DecimalDegree(-magnitude)
        } else {
            DecimalDegree(magnitude)
        }
    }
}

impl FromStr for DmsAngle {
    type Err = ParseAngleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let caps = RE_DMS
            .captures(s.trim())
            .ok_or(ParseAngleError::DmsNotation)?;

        // the groups are mandatory, so every successful match has all of them
        let part = |name: &str| caps.name(name).map_or("", |m| m.as_str());

        let degrees = part("deg").parse()?;
        let minutes = part("min").parse()?;
        let seconds = part("sec").parse()?;
        let letter = part("hem")
            .chars()
            .next()
            .ok_or(ParseAngleError::DmsNotation)?;
        let hemisphere = Hemisphere::try_from(letter)?;

        Ok(Self::new(degrees, minutes, seconds, hemisphere)?)
    }
}

impl fmt::Display for DmsAngle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}{}{}{}{}{}",
            self.degrees,
            DEGREE_SIGN,
            self.minutes,
            ARC_MINUTE_SIGN,
            self.seconds,
            ARC_SECOND_SIGN,
            self.hemisphere
        )
    }
}

/// An angle expressed as a single signed number of degrees
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DecimalDegree(f64);

impl DecimalDegree {
    /// The signed value
    pub const fn value(self) -> f64 {
        self.0
    }

    /// The value without the sign
    pub fn magnitude(self) -> f64 {
        self.0.abs()
    }
}

impl From<f64> for DecimalDegree {
    fn from(value: f64) -> Self {
        Self(value)
    }
}

impl From<DecimalDegree> for f64 {
    fn from(value: DecimalDegree) -> Self {
        value.0
    }
}

impl From<DmsAngle> for DecimalDegree {
    fn from(angle: DmsAngle) -> Self {
        angle.to_decimal()
    }
}

impl fmt::Display for DecimalDegree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6}{}", self.0, DEGREE_SIGN)
    }
}

/// Parse the `D°M'S"H` string straight into the signed decimal degrees.
///
/// ```
/// # use train_radar_types::parse_dms;
/// let lon = parse_dms("14°30'0\"W").unwrap();
/// assert!((lon.value() + 14.5).abs() < 1e-12);
/// ```
///
/// # Errors
/// The string does not follow the notation, or some of its parts are out of range.
pub fn parse_dms(s: &str) -> Result<DecimalDegree, ParseAngleError> {
    s.parse::<DmsAngle>().map(DmsAngle::to_decimal)
}
