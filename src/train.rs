//! A running train as published in the feed: its descriptive properties,
//! the delay reported for it and its position on the S-JTSK grid.

use std::fmt;

use serde::{de::IgnoredAny, Deserialize, Deserializer, Serialize};
use train_radar_types::{CoordinateOutOfRange, ProjectedCoordinate};

/// Shown instead of an empty delay text
pub const ON_TIME_LABEL: &str = "on time";

/// The feed mixes strings, numbers and nulls for the same fields
fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Text {
        Str(String),
        Int(i64),
        Float(f64),
        Bool(bool),
    }

    let text = Option::<Text>::deserialize(deserializer)?;
    Ok(text.map(|t| match t {
        Text::Str(s) => s,
        Text::Int(i) => i.to_string(),
        Text::Float(f) => f.to_string(),
        Text::Bool(b) => b.to_string(),
    }))
}

fn lenient_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    lenient_text(deserializer).map(Option::unwrap_or_default)
}

/// Descriptive fields of a train. Their names are the feed's abbreviations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainProperties {
    /// Origin station
    #[serde(rename = "fn", default, deserialize_with = "lenient_text")]
    pub from: Option<String>,
    /// Destination station
    #[serde(rename = "ln", default, deserialize_with = "lenient_text")]
    pub to: Option<String>,
    /// The train's own name, e.g. `Pendolino`
    #[serde(rename = "na", default, deserialize_with = "lenient_text")]
    pub name: Option<String>,
    /// Category, e.g. `Os`, `R`, `EC`
    #[serde(rename = "tt", default, deserialize_with = "lenient_text")]
    pub kind: Option<String>,
    /// Train number
    #[serde(rename = "tn", default, deserialize_with = "lenient_text")]
    pub number: Option<String>,
    /// Delay as a text like `5 min`
    #[serde(rename = "pde", default, deserialize_with = "lenient_text")]
    pub delay: Option<String>,
    /// Departure time
    #[serde(rename = "cp", default, deserialize_with = "lenient_text")]
    pub departure: Option<String>,
    /// Arrival time
    #[serde(rename = "cr", default, deserialize_with = "lenient_text")]
    pub arrival: Option<String>,
}

/// `null` entries become NaN, so they are rejected when the pair is used
fn lenient_coordinates<'de, D>(deserializer: D) -> Result<Vec<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let values = Option::<Vec<Option<f64>>>::deserialize(deserializer)?;
    Ok(values
        .unwrap_or_default()
        .into_iter()
        .map(|v| v.unwrap_or(f64::NAN))
        .collect())
}

/// A record without a usable point still belongs to the list
fn lenient_geometry<'de, D>(deserializer: D) -> Result<Option<Geometry>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Shape {
        Point(Geometry),
        Other(IgnoredAny),
    }

    Ok(match Shape::deserialize(deserializer)? {
        Shape::Point(geometry) => Some(geometry),
        Shape::Other(_) => None,
    })
}

/// The GeoJSON-like point of the train
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Geometry {
    /// The values as published, `[Y, X]` of S-JTSK, sometimes followed by a height
    #[serde(default, deserialize_with = "lenient_coordinates")]
    pub coordinates: Vec<f64>,
}

/// One entry of the feed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Train {
    /// Opaque identifier, compared as text
    #[serde(deserialize_with = "lenient_id")]
    pub id: String,
    /// Descriptive fields
    #[serde(default)]
    pub properties: TrainProperties,
    /// Position on the grid, if the feed has one
    #[serde(default, deserialize_with = "lenient_geometry")]
    pub geometry: Option<Geometry>,
}

/// How bad the delay is
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum DelayClass {
    /// No delay
    OnTime,
    /// Up to 10 minutes
    Slight,
    /// 11 to 30 minutes
    Moderate,
    /// More than 30 minutes
    Severe,
    /// Negative values
    Unknown,
}

impl DelayClass {
    /// Classify the delay in minutes
    pub const fn from_minutes(minutes: i32) -> Self {
        match minutes {
            0 => Self::OnTime,
            1..=10 => Self::Slight,
            11..=30 => Self::Moderate,
            31..=i32::MAX => Self::Severe,
            _ => Self::Unknown,
        }
    }
}

impl fmt::Display for DelayClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::OnTime => "on-time",
            Self::Slight => "slight",
            Self::Moderate => "moderate",
            Self::Severe => "severe",
            Self::Unknown => "unknown",
        };
        write!(f, "{label}")
    }
}

/// The leading integer of the text, like `5` in `5min`
fn leading_int(s: &str) -> Option<i32> {
    let s = s.trim_start();
    let sign_len = usize::from(s.starts_with(['-', '+']));
    let digits_len = s[sign_len..]
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(s.len() - sign_len);

    s[..sign_len + digits_len].parse().ok()
}

/// Minutes of delay in the `"<n> min"` text.
///
/// Anything that does not mention minutes, or has no number in front, counts as no delay.
pub fn parse_delay(text: Option<&str>) -> i32 {
    let Some(text) = text.filter(|t| t.contains("min")) else {
        return 0;
    };

    text.split(' ').next().and_then(leading_int).unwrap_or(0)
}

fn text(field: &Option<String>) -> &str {
    field.as_deref().unwrap_or("")
}

fn contains_lowercase(field: &Option<String>, needle: &str) -> bool {
    text(field).to_lowercase().contains(needle)
}

impl Train {
    /// Delay in minutes
    pub fn delay_minutes(&self) -> i32 {
        parse_delay(self.properties.delay.as_deref())
    }

    /// Delay category
    pub fn delay_class(&self) -> DelayClass {
        DelayClass::from_minutes(self.delay_minutes())
    }

    /// The delay text as published, or [`ON_TIME_LABEL`]
    pub fn delay_label(&self) -> &str {
        match self.properties.delay.as_deref() {
            Some(d) if !d.is_empty() => d,
            _ => ON_TIME_LABEL,
        }
    }

    /// Name, category and number, e.g. `Pendolino SC 512`
    pub fn title(&self) -> String {
        let p = &self.properties;
        format!("{} {} {}", text(&p.name), text(&p.kind), text(&p.number))
    }

    /// The train's name if it has one, otherwise the category and the number
    pub fn heading(&self) -> String {
        let p = &self.properties;
        match p.name.as_deref() {
            Some(name) if !name.is_empty() => name.to_owned(),
            _ => format!("{} {}", text(&p.kind), text(&p.number)),
        }
    }

    /// Origin station or the empty string
    pub fn origin(&self) -> &str {
        text(&self.properties.from)
    }

    /// Destination station or the empty string
    pub fn destination(&self) -> &str {
        text(&self.properties.to)
    }

    /// Case-insensitive search over the stations, the name, the number
    /// and the `"<category> <number>"` combination (e.g. `os 2104`).
    pub fn matches(&self, term: &str) -> bool {
        let needle = term.to_lowercase();
        let p = &self.properties;

        let kind_and_number = format!("{} {}", text(&p.kind), text(&p.number)).to_lowercase();

        contains_lowercase(&p.from, &needle)
            || contains_lowercase(&p.to, &needle)
            || contains_lowercase(&p.name, &needle)
            || contains_lowercase(&p.number, &needle)
            || kind_and_number.contains(&needle)
    }

    /// The grid position for the conversion service.
    ///
    /// The feed's first coordinate goes in as the easting (`yjtsk`)
    /// and the second as the northing (`xjtsk`), exactly as published.
    ///
    /// # Errors
    /// The feed carries no point for the train, or a non-finite coordinate.
    pub fn projected(&self) -> Result<ProjectedCoordinate, CoordinateOutOfRange> {
        let coordinates = self
            .geometry
            .as_ref()
            .map_or(&[][..], |g| g.coordinates.as_slice());
        ProjectedCoordinate::try_from(coordinates)
    }
}

/// Trains matching the search term, in the feed order
pub fn filter_trains<'a>(trains: &'a [Train], term: &str) -> Vec<&'a Train> {
    trains.iter().filter(|t| t.matches(term)).collect()
}

/// A line of the train list
#[derive(Debug)]
pub struct TrainRow<'a>(pub &'a Train);

impl fmt::Display for TrainRow<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let train = self.0;
        write!(
            f,
            "{}\n    From: {} -> To: {}    [{}] {}",
            train.title(),
            train.origin(),
            train.destination(),
            train.delay_class(),
            train.delay_label()
        )
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn train(id: &str, kind: &str, number: &str, from: &str, to: &str) -> Train {
        Train {
            id: id.to_owned(),
            properties: TrainProperties {
                from: Some(from.to_owned()),
                to: Some(to.to_owned()),
                name: None,
                kind: Some(kind.to_owned()),
                number: Some(number.to_owned()),
                delay: None,
                departure: None,
                arrival: None,
            },
            geometry: Some(Geometry {
                coordinates: vec![-742_600.0, -1_043_170.0],
            }),
        }
    }

    #[test]
    fn delay_text() {
        assert_eq!(parse_delay(None), 0);
        assert_eq!(parse_delay(Some("")), 0);
        assert_eq!(parse_delay(Some("5 min")), 5);
        assert_eq!(parse_delay(Some("125 min")), 125);
        assert_eq!(parse_delay(Some("-2 min")), -2);
        assert_eq!(parse_delay(Some("zpoždění")), 0);
        assert_eq!(parse_delay(Some("? min")), 0);
        assert_eq!(parse_delay(Some("15")), 0);
        assert_eq!(parse_delay(Some("5min")), 5);
        assert_eq!(parse_delay(Some("+7 min")), 7);
    }

    #[test]
    fn delay_classes() {
        assert_eq!(DelayClass::from_minutes(0), DelayClass::OnTime);
        assert_eq!(DelayClass::from_minutes(1), DelayClass::Slight);
        assert_eq!(DelayClass::from_minutes(10), DelayClass::Slight);
        assert_eq!(DelayClass::from_minutes(11), DelayClass::Moderate);
        assert_eq!(DelayClass::from_minutes(30), DelayClass::Moderate);
        assert_eq!(DelayClass::from_minutes(31), DelayClass::Severe);
        assert_eq!(DelayClass::from_minutes(-3), DelayClass::Unknown);
    }

    #[test]
    fn label() {
        let mut t = train("1", "Os", "2104", "Praha hl.n.", "Beroun");
        assert_eq!(t.delay_label(), ON_TIME_LABEL);
        assert_eq!(t.delay_class(), DelayClass::OnTime);

        t.properties.delay = Some("12 min".into());
        assert_eq!(t.delay_label(), "12 min");
        assert_eq!(t.delay_class(), DelayClass::Moderate);
    }

    #[test]
    fn titles() {
        let mut t = train("1", "SC", "512", "Praha hl.n.", "Ostrava hl.n.");
        assert_eq!(t.title(), " SC 512");
        assert_eq!(t.heading(), "SC 512");

        t.properties.name = Some("Pendolino".into());
        assert_eq!(t.title(), "Pendolino SC 512");
        assert_eq!(t.heading(), "Pendolino");
    }

    #[test]
    fn search() {
        let trains = vec![
            train("1", "Os", "2104", "Praha hl.n.", "Beroun"),
            train("2", "R", "680", "Brno hl.n.", "Jihlava"),
            train("3", "Os", "4711", "Kolín", "Praha-Vršovice"),
        ];

        let ids = |term| {
            filter_trains(&trains, term)
                .into_iter()
                .map(|t| t.id.as_str())
                .collect::<Vec<_>>()
        };

        assert_eq!(ids(""), ["1", "2", "3"]);
        assert_eq!(ids("praha"), ["1", "3"]);
        assert_eq!(ids("BERO"), ["1"]);
        assert_eq!(ids("os 2104"), ["1"]);
        assert_eq!(ids("r 68"), ["2"]);
        assert_eq!(ids("680"), ["2"]);
        assert!(ids("Plzeň").is_empty());
    }

    #[test]
    fn search_ignores_missing_fields() {
        let mut t = train("1", "Os", "2104", "Praha", "Beroun");
        t.properties.from = None;
        t.properties.name = None;
        assert!(t.matches("beroun"));
        assert!(!t.matches("praha"));
    }

    #[test]
    fn axis_order_is_kept() {
        let t = train("1", "Os", "1", "A", "B");
        let c = t.projected().unwrap();
        assert!((c.easting() + 742_600.0).abs() < f64::EPSILON);
        assert!((c.northing() + 1_043_170.0).abs() < f64::EPSILON);
    }

    #[test]
    fn row() {
        let mut t = train("1", "R", "680", "Brno hl.n.", "Jihlava");
        t.properties.delay = Some("45 min".into());
        assert_eq!(
            TrainRow(&t).to_string(),
            " R 680\n    From: Brno hl.n. -> To: Jihlava    [severe] 45 min"
        );
    }

    #[test]
    fn lenient_fields() {
        let json = r#"{
            "id": 1234,
            "properties": {"fn": "Praha", "ln": null, "tn": 2104, "tt": "Os", "pde": "3 min"},
            "geometry": {"type": "Point", "coordinates": [-742600.5, -1043170.25]}
        }"#;
        let t: Train = serde_json::from_str(json).unwrap();
        assert_eq!(t.id, "1234");
        assert_eq!(t.properties.number.as_deref(), Some("2104"));
        assert_eq!(t.properties.to, None);
        assert_eq!(t.properties.name, None);
        assert_eq!(t.delay_minutes(), 3);
    }

    #[test]
    fn records_without_a_point() {
        let json = r#"[
            {"id": "1", "properties": {"tt": "Os", "tn": "2104"}, "geometry": null},
            {"id": "2", "properties": {"tt": "R", "tn": "680"}},
            {"id": "3", "properties": {"tt": "Sp", "tn": "1790"},
             "geometry": {"type": "Point", "coordinates": [-598000, -1160000, 245.5]}},
            {"id": "4", "properties": {"tt": "Os", "tn": "5003"},
             "geometry": {"type": "Point", "coordinates": [-598000]}},
            {"id": "5", "properties": {"tt": "Os", "tn": "5005"},
             "geometry": {"type": "Point", "coordinates": [null, -1160000]}},
            {"id": "6", "properties": {"tt": "Os", "tn": "5007"}, "geometry": "unknown"}
        ]"#;
        let trains: Vec<Train> = serde_json::from_str(json).unwrap();
        assert_eq!(trains.len(), 6);

        assert_eq!(trains[0].geometry, None);
        assert_eq!(trains[0].projected(), Err(CoordinateOutOfRange::Incomplete));
        assert_eq!(trains[1].projected(), Err(CoordinateOutOfRange::Incomplete));

        let c = trains[2].projected().unwrap();
        assert!((c.easting() + 598_000.0).abs() < f64::EPSILON);
        assert!((c.northing() + 1_160_000.0).abs() < f64::EPSILON);

        assert_eq!(trains[3].projected(), Err(CoordinateOutOfRange::Incomplete));
        assert_eq!(trains[4].projected(), Err(CoordinateOutOfRange::NotFinite));
        assert_eq!(trains[5].geometry, None);

        assert_eq!(filter_trains(&trains, "os").len(), 4);
    }
}
