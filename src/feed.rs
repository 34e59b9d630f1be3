//! The list of the running trains from the Správa železnic map endpoint.

use async_trait::async_trait;
use reqwest::Url;
use serde::{Deserialize, Serialize};

use crate::{
    config::Config,
    error::{ConfigError, FeedError},
    train::Train,
};

/// The JSON wrapper of the train list
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    /// `false` when the endpoint has no data to offer
    #[serde(default)]
    pub success: bool,
    /// The trains, in the order of the endpoint
    #[serde(default)]
    pub result: Vec<Train>,
}

impl Envelope {
    /// The trains of a successful answer.
    ///
    /// # Errors
    /// The endpoint reported no success.
    pub fn into_trains(self) -> Result<Vec<Train>, FeedError> {
        if self.success {
            Ok(self.result)
        } else {
            Err(FeedError::Unavailable)
        }
    }
}

/// Anything that can list the running trains
#[async_trait]
pub trait TrainSource: Send + Sync {
    /// The current snapshot of all the trains.
    ///
    /// # Errors
    /// The list is not available right now.
    async fn trains(&self) -> Result<Vec<Train>, FeedError>;

    /// The train with the given identifier, if it is running.
    ///
    /// # Errors
    /// The list is not available right now.
    async fn find_train(&self, id: &str) -> Result<Option<Train>, FeedError> {
        let trains = self.trains().await?;
        Ok(trains.into_iter().find(|t| t.id == id))
    }
}

/// HTTP client of the train feed
#[derive(Debug, Clone)]
pub struct FeedClient {
    http: reqwest::Client,
    url: Url,
}

impl FeedClient {
    /// Use the given client for the feed at `url`
    pub fn new(http: reqwest::Client, url: Url) -> Self {
        Self { http, url }
    }

    /// The client for the configured endpoint.
    ///
    /// # Errors
    /// The HTTP client cannot be built.
    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        Ok(Self::new(config.http_client()?, config.feed_url.clone()))
    }

    /// Load and decode the feed.
    ///
    /// # Errors
    /// - `Network` on transport failures and non-success statuses;
    /// - `Decode` if the body is not the expected JSON;
    /// - `Unavailable` if the endpoint reports `success: false`.
    pub async fn fetch_trains(&self) -> Result<Vec<Train>, FeedError> {
        tracing::debug!(url = %self.url, "Loading the train feed");

        let body = self
            .http
            .get(self.url.clone())
            .send()
            .await?
            .error_for_status()?
            .bytes()
            .await?;

        let envelope: Envelope = serde_json::from_slice(&body)?;
        let trains = envelope.into_trains()?;

        tracing::debug!(count = trains.len(), "Train feed loaded");
        Ok(trains)
    }
}

#[async_trait]
impl TrainSource for FeedClient {
    async fn trains(&self) -> Result<Vec<Train>, FeedError> {
        self.fetch_trains().await
    }
}
