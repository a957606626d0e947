//! worldwise - visit form driver
//!
//! Composition root: wires the HTTP adapters into the form controller and
//! runs one form session for the location given on the command line.
//!
//! Usage: `worldwise <location> [notes]` where `<location>` is a URL or query
//! string carrying `lat` and `lng`. When notes are given and the point
//! resolves to a city, the visit is submitted.

use std::sync::Arc;
use tracing_subscriber::fmt::format::FmtSpan;
use worldwise::adapters::inbound::UrlPosition;
use worldwise::adapters::outbound::{BigDataCloudGeocoder, HttpCityStore, TracingNavigator};
use worldwise::{load_config, FormController, RenderState, SubmitOutcome};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration from environment
    let cfg = load_config()?;

    // Setup logging
    let log_level = if cfg.debug {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_span_events(FmtSpan::CLOSE)
        .init();

    let mut args = std::env::args().skip(1);
    let location = args.next().unwrap_or_default();
    let notes = args.next();

    // ===== COMPOSITION ROOT =====

    let geocoder = Arc::new(BigDataCloudGeocoder::new(
        cfg.geocode_url.clone(),
        cfg.http_timeout(),
    )?);
    let store = Arc::new(HttpCityStore::new(cfg.cities_url.clone(), cfg.http_timeout())?);
    let navigator = Arc::new(TracingNavigator::new());

    tracing::info!(
        "starting worldwise geocoder={} cities={}",
        cfg.geocode_url,
        cfg.cities_url
    );

    let controller = FormController::new(geocoder, store, navigator.clone());

    controller
        .set_coordinate(UrlPosition::parse(&location))
        .await;

    match controller.render() {
        RenderState::Loading => tracing::info!("still loading"),
        RenderState::Error { message } => tracing::warn!("{}", message),
        RenderState::Prompt { message } => tracing::info!("{}", message),
        RenderState::Form(view) => {
            tracing::info!(
                "{} {} ({}) on {}",
                view.flag,
                view.city_name,
                view.country,
                view.date
            );

            if let Some(notes) = notes {
                controller.set_notes(notes);
                if let SubmitOutcome::Submitted(record) = controller.submit().await? {
                    tracing::info!(
                        "submitted {} -> {}",
                        record.city_name,
                        navigator.current().unwrap_or_default()
                    );
                }
            }
        }
    }

    Ok(())
}
