//! Debounced location suggestions for the search box.
//!
//! Every input event replaces the pending request: only the last value
//! after a quiet window reaches the network, and a response that arrives
//! after a newer input has been issued is discarded instead of overwriting
//! the newer list.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

use crate::geocode::{GeocodeClient, MIN_QUERY_CHARS};
use crate::types::LocationCandidate;

/// Default quiet window before a keystroke turns into a geocoding request.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// Suggestions shown at most, unless configured otherwise.
pub const MAX_SUGGESTIONS: usize = 5;

/// Debounced suggestion source.
///
/// Suggestions are best-effort: failures clear the list and are logged,
/// never surfaced to the user.
pub struct Suggester {
    geocoder: Arc<GeocodeClient>,
    debounce: Duration,
    limit: usize,
    pending: Mutex<CancellationToken>,
    in_flight: Arc<AtomicUsize>,
    results: Arc<watch::Sender<Vec<LocationCandidate>>>,
}

impl Suggester {
    pub fn new(geocoder: GeocodeClient, debounce: Duration, limit: usize) -> Self {
        let (results, _) = watch::channel(Vec::new());
        Self {
            geocoder: Arc::new(geocoder),
            debounce,
            limit,
            pending: Mutex::new(CancellationToken::new()),
            in_flight: Arc::new(AtomicUsize::new(0)),
            results: Arc::new(results),
        }
    }

    /// Feed the current value of the search box.
    ///
    /// Cancels any request still waiting out the quiet window. Input below
    /// the minimum length clears the published list without a lookup.
    pub fn input(&self, text: &str) {
        let token = CancellationToken::new();
        {
            let mut pending = self.pending.lock();
            pending.cancel();
            *pending = token.clone();
        }

        let query = text.trim().to_string();
        if query.chars().count() < MIN_QUERY_CHARS {
            self.results.send_replace(Vec::new());
            return;
        }

        let geocoder = Arc::clone(&self.geocoder);
        let in_flight = Arc::clone(&self.in_flight);
        let results = Arc::clone(&self.results);
        let debounce = self.debounce;
        let limit = self.limit;

        tokio::spawn(async move {
            tokio::select! {
                () = token.cancelled() => return,
                () = tokio::time::sleep(debounce) => {}
            }

            in_flight.fetch_add(1, Ordering::SeqCst);
            let candidates = match geocoder.search(&query, limit).await {
                Ok(found) => found,
                Err(err) => {
                    tracing::debug!("Suggestion lookup for {:?} failed: {}", query, err);
                    Vec::new()
                }
            };

            // A newer input may have arrived while this request was in
            // flight; its result owns the list now.
            if !token.is_cancelled() {
                results.send_replace(candidates);
            }
            in_flight.fetch_sub(1, Ordering::SeqCst);
        });
    }

    /// Watch the suggestion list as it converges.
    pub fn subscribe(&self) -> watch::Receiver<Vec<LocationCandidate>> {
        self.results.subscribe()
    }

    /// Current suggestion list.
    pub fn suggestions(&self) -> Vec<LocationCandidate> {
        self.results.borrow().clone()
    }

    /// True while at least one lookup is in flight.
    pub fn is_loading(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst) > 0
    }
}
