use serde::{Deserialize, Serialize};

/// Severity of a user-facing status notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Success,
    Error,
    Info,
    Warning,
}

/// Transient status message produced by a completed search attempt.
/// Overwritten by the next search, dismissible by the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub message: String,
    pub severity: Severity,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            severity: Severity::Success,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            severity: Severity::Error,
        }
    }
}

/// Candidate location produced by the geocoding search.
///
/// Identity for dedup is the (name, country, state) tuple.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationCandidate {
    pub name: String,
    pub country: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
}

impl std::fmt::Display for LocationCandidate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.state {
            Some(state) => write!(f, "{}, {}, {}", self.name, state, self.country),
            None => write!(f, "{}, {}", self.name, self.country),
        }
    }
}

/// Raw geocoding entry. Coordinates are returned by the endpoint but only
/// name/country/state are consumed downstream.
#[derive(Debug, Clone, Deserialize)]
pub struct GeoEntry {
    pub name: String,
    pub country: String,
    #[serde(default)]
    pub state: Option<String>,
    pub lat: f64,
    pub lon: f64,
}

impl From<GeoEntry> for LocationCandidate {
    fn from(entry: GeoEntry) -> Self {
        Self {
            name: entry.name,
            country: entry.country,
            state: entry.state,
        }
    }
}

/// Current conditions payload from the weather endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct CurrentConditions {
    pub name: String,
    pub main: MainReadings,
    pub weather: Vec<ConditionTag>,
    pub wind: Wind,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MainReadings {
    pub temp: f64,
    pub feels_like: f64,
    pub humidity: u8,
}

/// Condition descriptor shared by the current and forecast payloads
#[derive(Debug, Clone, Deserialize)]
pub struct ConditionTag {
    pub main: String,
    pub description: String,
    pub icon: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Wind {
    pub speed: f64,
}

/// Forecast payload: an ordered 3-hourly series spanning several days
#[derive(Debug, Clone, Deserialize)]
pub struct ForecastResponse {
    pub list: Vec<ForecastEntry>,
    pub city: ForecastCity,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ForecastEntry {
    /// Unix timestamp (seconds)
    pub dt: i64,
    pub main: ForecastReadings,
    pub weather: Vec<ConditionTag>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ForecastReadings {
    pub temp: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ForecastCity {
    pub name: String,
}

/// Snapshot of current conditions for the result panel
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurrentSnapshot {
    pub place: String,
    pub temperature: f64,
    pub feels_like: f64,
    pub humidity: u8,
    pub wind_speed: f64,
    pub description: String,
    pub icon: String,
}

impl From<CurrentConditions> for CurrentSnapshot {
    fn from(conditions: CurrentConditions) -> Self {
        let (description, icon) = conditions
            .weather
            .into_iter()
            .next()
            .map(|tag| (tag.description, tag.icon))
            .unwrap_or_default();

        Self {
            place: conditions.name,
            temperature: conditions.main.temp,
            feels_like: conditions.main.feels_like,
            humidity: conditions.main.humidity,
            wind_speed: conditions.wind.speed,
            description,
            icon,
        }
    }
}

/// One card of the daily forecast strip
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailySummary {
    /// Long weekday name, e.g. "Saturday"
    pub day: String,
    pub temperature: f64,
    pub description: String,
    pub icon: String,
}

/// Coarse display glyph for a provider icon code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Glyph {
    Sun,
    Cloud,
    Rain,
    Snow,
}

impl Glyph {
    /// Map an icon code ("01d".."13n") to a display glyph.
    /// Codes without a dedicated glyph render as a cloud.
    pub fn from_icon(code: &str) -> Self {
        match code.trim_end_matches(['d', 'n']) {
            "01" => Self::Sun,
            "02" | "03" | "04" => Self::Cloud,
            "09" | "10" => Self::Rain,
            "13" => Self::Snow,
            _ => Self::Cloud,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Sun => "☀",
            Self::Cloud => "☁",
            Self::Rain => "☂",
            Self::Snow => "❄",
        }
    }
}

/// Weather retrieval errors
#[derive(Debug, thiserror::Error)]
pub enum WeatherError {
    /// The service answered with a non-2xx status; `message` is the error
    /// body's message when one was present.
    #[error("Weather API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid endpoint URL: {0}")]
    Url(#[from] url::ParseError),
}

impl WeatherError {
    /// Message for the user-facing notification on a failed search.
    ///
    /// The API-provided message wins when present; transport and other
    /// failures collapse to a generic message.
    pub fn notification_message(&self) -> String {
        match self {
            Self::Api { message, .. } if !message.is_empty() => message.clone(),
            Self::Api { .. } | Self::Network(_) => {
                "An error occurred while fetching weather data".to_string()
            }
            Self::Url(_) => "An unexpected error occurred".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_candidate_display_with_state() {
        let candidate = LocationCandidate {
            name: "Portland".to_string(),
            country: "US".to_string(),
            state: Some("Oregon".to_string()),
        };
        assert_eq!(candidate.to_string(), "Portland, Oregon, US");
    }

    #[test]
    fn test_candidate_display_without_state() {
        let candidate = LocationCandidate {
            name: "London".to_string(),
            country: "GB".to_string(),
            state: None,
        };
        assert_eq!(candidate.to_string(), "London, GB");
    }

    #[test]
    fn test_current_conditions_deserialization() {
        let conditions: CurrentConditions = serde_json::from_str(
            r#"{
                "name": "Paris",
                "main": {"temp": 18.3, "feels_like": 17.9, "humidity": 62},
                "weather": [{"main": "Clouds", "description": "scattered clouds", "icon": "03d"}],
                "wind": {"speed": 4.1}
            }"#,
        )
        .unwrap();

        let snapshot = CurrentSnapshot::from(conditions);
        assert_eq!(snapshot.place, "Paris");
        assert_eq!(snapshot.temperature, 18.3);
        assert_eq!(snapshot.humidity, 62);
        assert_eq!(snapshot.description, "scattered clouds");
        assert_eq!(snapshot.icon, "03d");
    }

    #[test]
    fn test_snapshot_from_conditions_without_tags() {
        let conditions = CurrentConditions {
            name: "Nowhere".to_string(),
            main: MainReadings {
                temp: 1.0,
                feels_like: -2.0,
                humidity: 80,
            },
            weather: Vec::new(),
            wind: Wind { speed: 0.5 },
        };
        let snapshot = CurrentSnapshot::from(conditions);
        assert!(snapshot.description.is_empty());
        assert!(snapshot.icon.is_empty());
    }

    #[test]
    fn test_geo_entry_without_state() {
        let entry: GeoEntry = serde_json::from_str(
            r#"{"name": "London", "country": "GB", "lat": 51.5, "lon": -0.12}"#,
        )
        .unwrap();
        assert!(entry.state.is_none());
        let candidate = LocationCandidate::from(entry);
        assert_eq!(candidate.name, "London");
    }

    #[test]
    fn test_notification_constructors() {
        let ok = Notification::success("done");
        assert_eq!(ok.severity, Severity::Success);
        let bad = Notification::error("boom");
        assert_eq!(bad.severity, Severity::Error);
    }

    #[test]
    fn test_severity_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&Severity::Warning).unwrap(),
            "\"warning\""
        );
    }

    #[test]
    fn test_glyph_mapping() {
        assert_eq!(Glyph::from_icon("01d"), Glyph::Sun);
        assert_eq!(Glyph::from_icon("01n"), Glyph::Sun);
        assert_eq!(Glyph::from_icon("04n"), Glyph::Cloud);
        assert_eq!(Glyph::from_icon("09d"), Glyph::Rain);
        assert_eq!(Glyph::from_icon("10n"), Glyph::Rain);
        assert_eq!(Glyph::from_icon("13d"), Glyph::Snow);
        // Thunder and mist have no dedicated glyph
        assert_eq!(Glyph::from_icon("11d"), Glyph::Cloud);
        assert_eq!(Glyph::from_icon("50n"), Glyph::Cloud);
    }

    #[test]
    fn test_api_error_message_used_when_present() {
        let err = WeatherError::Api {
            status: 404,
            message: "city not found".to_string(),
        };
        assert_eq!(err.notification_message(), "city not found");
    }

    #[test]
    fn test_api_error_without_message_is_generic() {
        let err = WeatherError::Api {
            status: 500,
            message: String::new(),
        };
        assert_eq!(
            err.notification_message(),
            "An error occurred while fetching weather data"
        );
    }

    #[test]
    fn test_url_error_is_unexpected() {
        let parse_err = url::Url::parse("::not a url::").unwrap_err();
        let err = WeatherError::from(parse_err);
        assert_eq!(err.notification_message(), "An unexpected error occurred");
    }
}
