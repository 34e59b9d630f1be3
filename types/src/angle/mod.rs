//! Angles written in the Degree-Minute-Second notation and their signed decimal form

mod dms;
mod errors;
mod hemisphere;

pub use self::{
    dms::{parse_dms, DecimalDegree, DmsAngle},
    errors::{OutOfRange, ParseAngleError},
    hemisphere::{Axis, Hemisphere, ParseHemisphereError},
};

pub(crate) const MAX_DEGREE: u16 = 360;
pub(crate) const MINUTES_IN_DEGREE: u8 = 60;
pub(crate) const SECONDS_IN_MINUTE: u8 = 60;

pub(crate) const DEGREE_SIGN: char = '°';
pub(crate) const ARC_MINUTE_SIGN: char = '\'';
pub(crate) const ARC_SECOND_SIGN: char = '"';
