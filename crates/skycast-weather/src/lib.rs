//! Weather lookup core for skycast
//!
//! Provides geocoded search suggestions, paired current-conditions +
//! forecast retrieval, calendar-day aggregation and the per-session state
//! record the UI surface reads.

pub mod forecast;
pub mod geocode;
pub mod provider;
pub mod session;
pub mod suggest;
pub mod types;

pub use forecast::{daily_summaries, FORECAST_DAYS};
pub use geocode::GeocodeClient;
pub use provider::WeatherProvider;
pub use session::WeatherSession;
pub use suggest::Suggester;
pub use types::*;
