//! skycast terminal surface: search prompt with live suggestions, a result
//! panel, the 5-day forecast strip and a dismissible notification line.

use std::io::Write;
use std::time::Duration;

use anyhow::Result;
use tokio::io::{AsyncBufReadExt, BufReader};

use skycast_core::Config;
use skycast_weather::{GeocodeClient, Glyph, Suggester, WeatherProvider, WeatherSession};

#[tokio::main]
async fn main() -> Result<()> {
    skycast_core::init()?;

    let (config, _warnings) = match Config::load_validated() {
        Ok(loaded) => loaded,
        Err(err) => {
            tracing::error!("Configuration error: {}", err);
            eprintln!("{}", err.user_message());
            eprintln!("  ({})", err);
            std::process::exit(2);
        }
    };

    let provider = WeatherProvider::new(&config.weather.base_url, config.weather.api_key.clone())?;
    let geocoder =
        GeocodeClient::new(&config.weather.geocoding_url, config.weather.api_key.clone())?;
    let suggester = Suggester::new(
        geocoder,
        Duration::from_millis(config.search.debounce_ms),
        config.search.max_suggestions,
    );
    let mut session = WeatherSession::new(provider);

    tracing::info!("skycast started");

    println!("skycast - city weather lookup");
    println!("Type a city name to search. End the line with '?' to list");
    println!("matching locations first. Empty line dismisses the status");
    println!("message, 'quit' exits.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    prompt()?;
    while let Some(line) = lines.next_line().await? {
        let input = line.trim();

        match input {
            "" => {
                session.reset_notification();
            }
            "quit" | "exit" => break,
            partial if partial.ends_with('?') => {
                show_suggestions(&suggester, partial.trim_end_matches('?'), &config).await;
            }
            query => {
                session.fetch_weather(query).await;
                render(&session);
            }
        }

        prompt()?;
    }

    tracing::info!("skycast shutting down");
    Ok(())
}

fn prompt() -> Result<()> {
    print!("> ");
    std::io::stdout().flush()?;
    Ok(())
}

/// Run a partial query through the debounced suggester and print the list
/// once it has converged.
async fn show_suggestions(suggester: &Suggester, partial: &str, config: &Config) {
    let mut rx = suggester.subscribe();
    rx.mark_unchanged();

    suggester.input(partial);

    // Wait out the quiet window plus one request round trip.
    let wait = Duration::from_millis(config.search.debounce_ms) + Duration::from_secs(10);
    let converged = tokio::time::timeout(wait, rx.changed()).await.is_ok();

    let suggestions = suggester.suggestions();
    if !converged || suggestions.is_empty() {
        println!("  (no matches)");
        return;
    }
    for candidate in suggestions {
        println!("  {}", candidate);
    }
}

fn render(session: &WeatherSession) {
    if let Some(notification) = session.notification() {
        println!("[{:?}] {}", notification.severity, notification.message);
    }

    let Some(snapshot) = session.weather() else {
        return;
    };

    println!();
    println!("{}  {}", snapshot.place, snapshot.description);
    println!(
        "  {:.1}°C (feels like {:.1}°C)   humidity {}%   wind {:.1} m/s",
        snapshot.temperature, snapshot.feels_like, snapshot.humidity, snapshot.wind_speed
    );

    let summaries = session.daily_summaries();
    if summaries.is_empty() {
        return;
    }

    println!();
    for day in summaries {
        println!(
            "  {} {:<9} {:>6.1}°C  {}",
            Glyph::from_icon(&day.icon).symbol(),
            day.day,
            day.temperature,
            day.description
        );
    }
    println!();
}
