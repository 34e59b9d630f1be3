//! Error types of the feed and the coordinate conversion

use thiserror::Error;
use train_radar_types::ParseCoordinateError;

/// The projected position could not be turned into a geographic one
#[derive(Error, Debug)]
pub enum ConversionError {
    /// The conversion service could not be reached, timed out or answered with a failure status
    #[error("Conversion service request failed: {0}")]
    Network(#[from] reqwest::Error),

    /// The answer does not contain the coordinates where they are expected
    #[error("Unexpected conversion service response: {0}")]
    MalformedResponse(String),

    /// The coordinates were found but are not valid DMS angles
    #[error("{0}")]
    Parse(#[from] ParseCoordinateError),
}

/// The list of the running trains could not be loaded
#[derive(Error, Debug)]
pub enum FeedError {
    /// The tracking endpoint could not be reached or answered with a failure status
    #[error("Train feed request failed: {0}")]
    Network(#[from] reqwest::Error),

    /// The body is not the expected JSON envelope
    #[error("Train feed is not valid JSON: {0}")]
    Decode(#[from] serde_json::Error),

    /// The envelope came with `success: false`
    #[error("Train data are not available")]
    Unavailable,
}

/// The settings cannot be used
#[derive(Error, Debug)]
pub enum ConfigError {
    /// An endpoint address does not parse
    #[error("{name} is not a valid url: {reason}")]
    InvalidUrl {
        /// Which endpoint
        name: &'static str,
        /// The parser message
        reason: String,
    },

    /// The HTTP client could not be set up
    #[error("HTTP client cannot be built: {0}")]
    Client(#[from] reqwest::Error),
}
