//! Forward geocoding: resolve partial city text to location candidates.
//! Backs the search box suggestion list.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use url::Url;

use crate::provider::check_status;
use crate::types::{GeoEntry, LocationCandidate, WeatherError};

/// Minimum input length before a remote lookup is attempted.
/// Shorter input means "no suggestions", not an error.
pub const MIN_QUERY_CHARS: usize = 2;

const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Client for the geocoding endpoint.
#[derive(Debug, Clone)]
pub struct GeocodeClient {
    client: Arc<Client>,
    base_url: String,
    api_key: String,
}

impl GeocodeClient {
    /// Create a new geocoding client.
    ///
    /// `base_url` must be a valid http(s) URL; it is checked here so a
    /// malformed configuration fails at startup rather than on first use.
    pub fn new(base_url: &str, api_key: impl Into<String>) -> Result<Self, WeatherError> {
        Url::parse(base_url)?;

        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client: Arc::new(client),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        })
    }

    /// Search for locations matching a free-text query.
    ///
    /// Inputs shorter than [`MIN_QUERY_CHARS`] (after trimming) return an
    /// empty list without touching the network. Results are deduplicated by
    /// (name, country, state) keeping first-seen order, capped at `limit`.
    pub async fn search(
        &self,
        query: &str,
        limit: usize,
    ) -> Result<Vec<LocationCandidate>, WeatherError> {
        let query = query.trim();
        if query.chars().count() < MIN_QUERY_CHARS {
            return Ok(Vec::new());
        }

        tracing::debug!("Geocoding lookup for {:?}", query);

        let url = format!("{}/direct", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[
                ("q", query),
                ("limit", &limit.to_string()),
                ("appid", &self.api_key),
            ])
            .send()
            .await?;
        let response = check_status(response).await?;

        let entries: Vec<GeoEntry> = response.json().await?;
        let candidates = dedup_candidates(entries, limit);

        tracing::debug!("Geocoding returned {} candidates", candidates.len());
        Ok(candidates)
    }
}

/// Collapse duplicate (name, country, state) entries, first occurrence wins.
fn dedup_candidates(entries: Vec<GeoEntry>, limit: usize) -> Vec<LocationCandidate> {
    let mut seen = HashSet::new();
    let mut candidates = Vec::new();

    for entry in entries {
        let candidate = LocationCandidate::from(entry);
        let key = (
            candidate.name.clone(),
            candidate.country.clone(),
            candidate.state.clone(),
        );
        if seen.insert(key) {
            candidates.push(candidate);
            if candidates.len() == limit {
                break;
            }
        }
    }

    candidates
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, country: &str, state: Option<&str>) -> GeoEntry {
        GeoEntry {
            name: name.to_string(),
            country: country.to_string(),
            state: state.map(str::to_string),
            lat: 0.0,
            lon: 0.0,
        }
    }

    #[test]
    fn test_dedup_keeps_first_seen_order() {
        let entries = vec![
            entry("London", "GB", Some("England")),
            entry("London", "CA", Some("Ontario")),
            entry("London", "GB", Some("England")),
            entry("London", "US", Some("Kentucky")),
        ];

        let candidates = dedup_candidates(entries, 5);
        assert_eq!(candidates.len(), 3);
        assert_eq!(candidates[0].country, "GB");
        assert_eq!(candidates[1].country, "CA");
        assert_eq!(candidates[2].country, "US");
    }

    #[test]
    fn test_dedup_distinguishes_missing_state() {
        let entries = vec![
            entry("Springfield", "US", Some("Illinois")),
            entry("Springfield", "US", None),
        ];

        let candidates = dedup_candidates(entries, 5);
        assert_eq!(candidates.len(), 2);
    }

    #[test]
    fn test_dedup_respects_limit() {
        let entries = (0..10)
            .map(|i| entry(&format!("City{}", i), "US", None))
            .collect();

        let candidates = dedup_candidates(entries, 5);
        assert_eq!(candidates.len(), 5);
        assert_eq!(candidates[4].name, "City4");
    }

    #[tokio::test]
    async fn test_short_input_skips_network() {
        // Port 9 is the discard port; an actual request would error out.
        let client = GeocodeClient::new("http://127.0.0.1:9", "key").unwrap();

        assert!(client.search("", 5).await.unwrap().is_empty());
        assert!(client.search("L", 5).await.unwrap().is_empty());
        assert!(client.search("  L  ", 5).await.unwrap().is_empty());
    }

    #[test]
    fn test_rejects_malformed_base_url() {
        assert!(GeocodeClient::new("not a url", "key").is_err());
    }
}
