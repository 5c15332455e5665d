//! Calendar-day aggregation of the 3-hourly forecast series.

use chrono::{DateTime, NaiveDate};

use crate::types::{DailySummary, ForecastEntry};

/// Maximum number of days in the forecast strip.
pub const FORECAST_DAYS: usize = 5;

/// Reduce a 3-hourly series to one summary per calendar day.
///
/// The first entry seen for a day supplies that day's temperature,
/// description and icon; later entries for the same day are ignored. Days
/// keep the order in which they first appear and at most [`FORECAST_DAYS`]
/// are returned. Dates are bucketed in UTC so the result does not depend on
/// the host timezone.
pub fn daily_summaries(entries: &[ForecastEntry]) -> Vec<DailySummary> {
    let mut seen_days: Vec<NaiveDate> = Vec::new();
    let mut summaries = Vec::new();

    for entry in entries {
        let Some(timestamp) = DateTime::from_timestamp(entry.dt, 0) else {
            tracing::warn!("Skipping forecast entry with out-of-range timestamp {}", entry.dt);
            continue;
        };

        let day = timestamp.date_naive();
        if seen_days.contains(&day) {
            continue;
        }
        seen_days.push(day);

        let (description, icon) = entry
            .weather
            .first()
            .map(|tag| (tag.description.clone(), tag.icon.clone()))
            .unwrap_or_default();

        summaries.push(DailySummary {
            day: timestamp.format("%A").to_string(),
            temperature: entry.main.temp,
            description,
            icon,
        });

        if summaries.len() == FORECAST_DAYS {
            break;
        }
    }

    summaries
}
