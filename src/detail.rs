//! The single train view: the last known record of the train and its last
//! known position, both updated on every refresh cycle.

use std::fmt;

use train_radar_types::{GeoPosition, ParseCoordinateError};

use crate::{
    convert::Projection,
    error::{ConversionError, FeedError},
    feed::TrainSource,
    train::Train,
};

/// Zoom level of the map link
pub const MAP_ZOOM: u8 = 13;

/// OpenStreetMap centred on the position with a marker on it
pub fn osm_url(position: GeoPosition, zoom: u8) -> String {
    let (lat, lon) = position.lat_lon();
    format!(
        "https://www.openstreetmap.org/?mlat={lat:.6}&mlon={lon:.6}#map={zoom}/{lat:.6}/{lon:.6}"
    )
}

/// What a single refresh cycle achieved
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// Both the train record and its position are fresh
    Updated,
    /// The record is fresh, the position is the one from an earlier cycle (if any)
    PositionUnknown,
    /// The train is not in the feed
    NotFound,
}

/// State of the view of one train
#[derive(Debug, Clone)]
pub struct DetailView {
    train_id: String,
    train: Option<Train>,
    position: Option<GeoPosition>,
}

impl DetailView {
    /// Nothing is known before the first refresh
    pub fn new(train_id: impl Into<String>) -> Self {
        Self {
            train_id: train_id.into(),
            train: None,
            position: None,
        }
    }

    /// The train being watched
    pub fn train_id(&self) -> &str {
        &self.train_id
    }

    /// The last loaded record
    pub fn train(&self) -> Option<&Train> {
        self.train.as_ref()
    }

    /// The last successfully converted position
    pub fn position(&self) -> Option<GeoPosition> {
        self.position
    }

    /// The map link for the last known position
    pub fn map_url(&self) -> Option<String> {
        self.position.map(|p| osm_url(p, MAP_ZOOM))
    }

    /// Reload the train and convert its position.
    ///
    /// A failed conversion is not an error: the cycle just leaves the previous position in place.
    ///
    /// # Errors
    /// The feed cannot be loaded; the state stays as it was.
    pub async fn refresh<S, P>(
        &mut self,
        source: &S,
        projection: &P,
    ) -> Result<RefreshOutcome, FeedError>
    where
        S: TrainSource + ?Sized,
        P: Projection + ?Sized,
    {
        let Some(train) = source.find_train(&self.train_id).await? else {
            tracing::info!(id = %self.train_id, "Train is not running");
            self.train = None;
            self.position = None;
            return Ok(RefreshOutcome::NotFound);
        };

        let converted = match train.projected() {
            Ok(coordinate) => projection.convert(coordinate).await,
            Err(err) => Err(ConversionError::Parse(ParseCoordinateError::from(err))),
        };
        self.train = Some(train);

        match converted {
            Ok(position) => {
                tracing::debug!(id = %self.train_id, %position, "Train position updated");
                self.position = Some(position);
                Ok(RefreshOutcome::Updated)
            }
            Err(err) => {
                tracing::warn!(id = %self.train_id, error = %err, "Position unknown for this cycle");
                Ok(RefreshOutcome::PositionUnknown)
            }
        }
    }
}

impl fmt::Display for DetailView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(train) = &self.train else {
            return write!(f, "Train {} not found.", self.train_id);
        };

        let p = &train.properties;
        let field = |value: &Option<String>| value.clone().unwrap_or_default();

        writeln!(f, "{}", train.heading())?;
        writeln!(f, "From: {}", train.origin())?;
        writeln!(f, "To: {}", train.destination())?;
        writeln!(f, "Departure: {}", field(&p.departure))?;
        writeln!(f, "Arrival: {}", field(&p.arrival))?;
        writeln!(f, "Delay: {} [{}]", train.delay_label(), train.delay_class())?;
        writeln!(f, "Train name: {}", field(&p.name))?;
        writeln!(f, "Train number: {}", field(&p.number))?;

        match self.position {
            Some(position) => {
                writeln!(f, "Position: {position:#}")?;
                write!(f, "Map: {}", osm_url(position, MAP_ZOOM))
            }
            None => write!(f, "Position: unknown"),
        }
    }
}
