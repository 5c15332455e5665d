//! Session-scoped weather state: the record a UI surface reads.

use crate::forecast;
use crate::provider::WeatherProvider;
use crate::types::{CurrentSnapshot, DailySummary, ForecastEntry, Notification};

/// Mutable state owned by one UI session.
///
/// Only [`fetch_weather`](Self::fetch_weather) and
/// [`reset_notification`](Self::reset_notification) mutate it; the surface
/// reads through the accessors. There is no shared or global state.
pub struct WeatherSession {
    provider: WeatherProvider,
    weather: Option<CurrentSnapshot>,
    forecast: Vec<ForecastEntry>,
    loading: bool,
    notification: Option<Notification>,
}

impl WeatherSession {
    pub fn new(provider: WeatherProvider) -> Self {
        Self {
            provider,
            weather: None,
            forecast: Vec::new(),
            loading: false,
            notification: None,
        }
    }

    /// Run a search: fetch current conditions and forecast as a pair, then
    /// update the session.
    ///
    /// The update is all-or-nothing. On failure the previous snapshot and
    /// series are kept (stale data stays visible) and only the notification
    /// changes; on success both are replaced together.
    pub async fn fetch_weather(&mut self, query: &str) {
        self.loading = true;
        self.notification = None;

        match self.provider.fetch(query).await {
            Ok((current, forecast)) => {
                self.weather = Some(CurrentSnapshot::from(current));
                self.forecast = forecast.list;
                self.notification = Some(Notification::success(format!(
                    "Weather data fetched for {}",
                    query
                )));
            }
            Err(err) => {
                tracing::warn!("Weather fetch for {:?} failed: {}", query, err);
                self.notification = Some(Notification::error(err.notification_message()));
            }
        }

        self.loading = false;
    }

    /// Dismiss the current notification.
    pub fn reset_notification(&mut self) {
        self.notification = None;
    }

    /// Snapshot of current conditions, if any search has succeeded.
    pub fn weather(&self) -> Option<&CurrentSnapshot> {
        self.weather.as_ref()
    }

    /// Display-ready daily strip derived from the raw forecast series.
    pub fn daily_summaries(&self) -> Vec<DailySummary> {
        forecast::daily_summaries(&self.forecast)
    }

    /// True while a search is running.
    pub fn loading(&self) -> bool {
        self.loading
    }

    /// Status of the most recent search since the last reset.
    pub fn notification(&self) -> Option<&Notification> {
        self.notification.as_ref()
    }
}
