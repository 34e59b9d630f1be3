//! Turning the S-JTSK grid positions of the feed into WGS84 latitude and longitude.
//!
//! The only implementation at the moment posts the grid pair to the public
//! conversion form and scrapes the answer; callers depend on [`Projection`]
//! so a local projection formula can replace it.

use async_trait::async_trait;
use reqwest::Url;
use train_radar_types::{GeoPosition, ParseCoordinateError, ProjectedCoordinate};

use crate::{
    config::Config,
    error::{ConfigError, ConversionError},
};

pub use self::markup::extract_dms_pair;

mod markup;

/// The `zbpv` value sent with every request unless configured otherwise
pub const DEFAULT_MODE: u8 = 1;

/// Grid to geographic conversion
#[async_trait]
pub trait Projection: Send + Sync {
    /// Convert a single position.
    ///
    /// # Errors
    /// The position cannot be converted; there is never a fallback value.
    async fn convert(&self, coordinate: ProjectedCoordinate)
        -> Result<GeoPosition, ConversionError>;
}

/// The estudanky.eu S-JTSK form.
///
/// Every call is exactly one POST request: no caching, no retries.
#[derive(Debug, Clone)]
pub struct RemoteConverter {
    http: reqwest::Client,
    url: Url,
    mode: u8,
}

impl RemoteConverter {
    /// Use the given client for the service at `url`
    pub fn new(http: reqwest::Client, url: Url) -> Self {
        Self {
            http,
            url,
            mode: DEFAULT_MODE,
        }
    }

    /// The converter for the configured endpoint.
    ///
    /// # Errors
    /// The HTTP client cannot be built.
    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        Ok(Self::new(config.http_client()?, config.converter_url.clone()))
    }

    /// Replace the `zbpv` value sent by [`Projection::convert`]
    pub fn with_mode(mut self, mode: u8) -> Self {
        self.mode = mode;
        self
    }

    /// The service address
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Convert the raw pair with an explicit `zbpv` value.
    ///
    /// # Errors
    /// - `Parse` if any of the numbers is not finite, or the answer does not hold valid angles;
    /// - `Network` if the request fails;
    /// - `MalformedResponse` if the answer has an unexpected layout.
    pub async fn convert_coordinates(
        &self,
        easting: f64,
        northing: f64,
        mode: u8,
    ) -> Result<GeoPosition, ConversionError> {
        let coordinate =
            ProjectedCoordinate::new(easting, northing).map_err(ParseCoordinateError::from)?;
        self.convert_with_mode(coordinate, mode).await
    }

    async fn convert_with_mode(
        &self,
        coordinate: ProjectedCoordinate,
        mode: u8,
    ) -> Result<GeoPosition, ConversionError> {
        tracing::debug!(%coordinate, mode, url = %self.url, "Converting S-JTSK position");

        let page = self.request(coordinate, mode).await?;
        let (lat, lon) = extract_dms_pair(&page)?;
        let position = GeoPosition::from_dms(&lat, &lon)?;

        tracing::debug!(%coordinate, %position, "Converted");
        Ok(position)
    }

    async fn request(
        &self,
        coordinate: ProjectedCoordinate,
        mode: u8,
    ) -> Result<String, reqwest::Error> {
        let form = [
            ("yjtsk", coordinate.easting().to_string()),
            ("xjtsk", coordinate.northing().to_string()),
            ("zbpv", mode.to_string()),
            ("jtsk", String::new()),
        ];

        self.http
            .post(self.url.clone())
            .form(&form)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await
    }
}

#[async_trait]
impl Projection for RemoteConverter {
    async fn convert(
        &self,
        coordinate: ProjectedCoordinate,
    ) -> Result<GeoPosition, ConversionError> {
        self.convert_with_mode(coordinate, self.mode).await
    }
}
