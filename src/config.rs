//! Endpoints and timings shared by the feed client and the converter

use std::time::Duration;

use reqwest::Url;

use crate::error::ConfigError;

/// The live positions of the passenger trains published by Správa železnic
pub const DEFAULT_FEED_URL: &str =
    r"https://mapy.spravazeleznic.cz/serverside/request2.php?module=Layers\OsVlaky&&action=load";

/// The S-JTSK to WGS84 form at estudanky.eu
pub const DEFAULT_CONVERTER_URL: &str = "https://www.estudanky.eu/prevody/jtsk.php";

/// How often the detail view is reloaded
pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(30);

/// Upper bound for every single HTTP request
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone)]
/// Runtime settings
pub struct Config {
    /// Where the train list is loaded from
    pub feed_url: Url,
    /// Where the S-JTSK coordinates are posted to
    pub converter_url: Url,
    /// Period of the detail view reloading
    pub refresh_interval: Duration,
    /// Timeout of a single request
    pub request_timeout: Duration,
    /// Sent with every request
    pub user_agent: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            feed_url: Url::parse(DEFAULT_FEED_URL).expect("Default feed url is valid"),
            converter_url: Url::parse(DEFAULT_CONVERTER_URL)
                .expect("Default converter url is valid"),
            refresh_interval: DEFAULT_REFRESH_INTERVAL,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            user_agent: USER_AGENT.to_owned(),
        }
    }
}

fn parse_url(name: &'static str, value: &str) -> Result<Url, ConfigError> {
    Url::parse(value).map_err(|e| ConfigError::InvalidUrl {
        name,
        reason: e.to_string(),
    })
}

impl Config {
    /// Replace the train feed address.
    ///
    /// # Errors
    /// The value is not an absolute URL.
    pub fn with_feed_url(mut self, url: &str) -> Result<Self, ConfigError> {
        self.feed_url = parse_url("feed url", url)?;
        Ok(self)
    }

    /// Replace the conversion service address.
    ///
    /// # Errors
    /// The value is not an absolute URL.
    pub fn with_converter_url(mut self, url: &str) -> Result<Self, ConfigError> {
        self.converter_url = parse_url("converter url", url)?;
        Ok(self)
    }

    /// Replace the detail view refresh period
    pub fn with_refresh_interval(mut self, interval: Duration) -> Self {
        self.refresh_interval = interval;
        self
    }

    /// Replace the per-request timeout
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// The client shared by the feed and the converter.
    ///
    /// # Errors
    /// The TLS backend cannot be initialized.
    pub fn http_client(&self) -> Result<reqwest::Client, ConfigError> {
        let client = reqwest::Client::builder()
            .timeout(self.request_timeout)
            .user_agent(self.user_agent.clone())
            .build()?;
        Ok(client)
    }

    /// Write the effective settings into the log
    pub fn log(&self) {
        tracing::info!(url = %self.feed_url, "Train feed");
        tracing::info!(url = %self.converter_url, "Coordinate converter");
        tracing::debug!(
            refresh = ?self.refresh_interval,
            timeout = ?self.request_timeout,
            user_agent = %self.user_agent,
            "Timings"
        );
    }
}
