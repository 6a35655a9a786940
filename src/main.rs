mod analyzer;
mod api;
mod config;
mod demo;
mod filter;
mod model;
mod normalizer;
mod state;
mod utils;

use std::sync::Arc;

use futures::future::join_all;
use serde_json::Value;
use tracing::{error, info, warn};

use analyzer::{
    BadgePolicy, DEFAULT_AIRLINE_LIMIT, DEFAULT_HISTOGRAM_BUCKETS, derive_average_price_by_airline,
    derive_average_price_by_stops, derive_departure_hour_buckets, derive_price_buckets,
    derive_price_stats, rank_offers,
};
use api::{AmadeusClient, FlightApi, TokenCache};
use config::{AppConfig, FilterConfig, load_config};
use demo::demo_flights;
use filter::filter_offers;
use model::{FiltersState, FlightOffer, SearchParams, SortKey};
use normalizer::normalize_offers;
use state::SearchStore;
use utils::format_duration;

#[tokio::main]
async fn main() {
    // Initialize logging
    tracing_subscriber::fmt::init();

    // Set panic hook to log details about any panic
    std::panic::set_hook(Box::new(|panic_info| {
        eprintln!("😱 Panic occurred: {panic_info:?}");
    }));

    // Load configuration from file
    let config: AppConfig = match load_config("config.json") {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("Config load error: {}", e);
            return;
        }
    };

    let config = Arc::new(config);
    let client = Arc::new(AmadeusClient::new(
        &config.amadeus,
        config.currency.clone(),
        config.max_results,
        TokenCache::default(),
    ));

    info!("🚀 FareScout started!");
    info!("Searches to process: {}", config.searches.len());

    // Process all configured searches concurrently
    let tasks: Vec<_> = config
        .searches
        .iter()
        .map(|search| process_search(search.clone(), client.clone(), config.clone()))
        .collect();
    join_all(tasks).await;

    info!("All searches processed.");
}

/// Runs one search end to end: validation, location resolution, fetch,
/// normalization, demo fallback, filtering, analytics and the report.
async fn process_search(search: SearchParams, client: Arc<AmadeusClient>, config: Arc<AppConfig>) {
    // Reject bad input before touching the network or the pipeline
    if let Err(e) = search.validate() {
        warn!("Skipping search {}: {}", search.key(), e);
        return;
    }

    let mut store = SearchStore::new(search.clone());
    let search = resolve_route(search, client.as_ref()).await;
    store.set_search(search.clone());
    info!("Processing search: {}", search.key());

    info!("Fetching offers...");
    let offers = match client.search_offers(&search).await {
        Ok(payload) => normalize_offers(&payload),
        Err(e) => {
            warn!("Offer search failed: {:?}", e);
            Vec::new()
        }
    };

    // A failed or empty search never blanks the view; the demo catalog
    // steps in with a visible advisory.
    if offers.is_empty() {
        store.set_banner("Live search unavailable. Loaded demo flights instead.");
        store.set_raw_offers(demo_flights());
    } else {
        store.set_raw_offers(offers);
    }
    store.set_last_search_key(Some(search.key()));

    apply_filter_config(&mut store, &config.filters);

    let filtered = filter_offers(store.raw_offers(), store.filters());
    render_report(&store, &filtered);

    // An over-tight preset never leaves the report blank: fall back to the
    // unconstrained view, as the UI reset button would.
    if filtered.is_empty() {
        warn!("No flights match the configured filters. Resetting filters.");
        store.reset_filters();
        let filtered = filter_offers(store.raw_offers(), store.filters());
        render_report(&store, &filtered);
    }

    info!(
        "Finished search: {}",
        store.last_search_key().unwrap_or_default()
    );
}

/// Seeds the store's filter state from the config presets through the
/// regular setter operations.
fn apply_filter_config(store: &mut SearchStore, filters: &FilterConfig) {
    if filters.max_stops.is_some() {
        store.set_max_stops(filters.max_stops);
    }
    for code in &filters.airlines {
        store.toggle_airline(code);
    }
    if filters.price_min.is_some() || filters.price_max.is_some() {
        let (default_min, default_max) = FiltersState::default().price_range;
        store.set_price_range(
            filters.price_min.unwrap_or(default_min),
            filters.price_max.unwrap_or(default_max),
        );
    }
}

/// Swaps free-text origin/destination inputs for IATA codes via the
/// location lookup. Unresolvable inputs stay as typed; the offer search
/// then fails and the demo fallback covers the view.
async fn resolve_route(mut search: SearchParams, client: &AmadeusClient) -> SearchParams {
    if !looks_like_iata(&search.origin) {
        if let Some(code) = resolve_location(client, &search.origin).await {
            info!("Resolved origin '{}' to {}", search.origin, code);
            search.origin = code;
        }
    }
    if !looks_like_iata(&search.destination) {
        if let Some(code) = resolve_location(client, &search.destination).await {
            info!("Resolved destination '{}' to {}", search.destination, code);
            search.destination = code;
        }
    }
    search
}

fn looks_like_iata(code: &str) -> bool {
    code.len() == 3 && code.chars().all(|c| c.is_ascii_alphabetic())
}

async fn resolve_location(client: &AmadeusClient, query: &str) -> Option<String> {
    match client.search_locations(query).await {
        Ok(payload) => payload
            .pointer("/data/0/iataCode")
            .and_then(Value::as_str)
            .map(str::to_string),
        Err(e) => {
            warn!("Location lookup failed for '{}': {:?}", query, e);
            None
        }
    }
}

/// Renders the filtered result set: ranked offers with badges, then the
/// four derived graph views and the summary stats.
fn render_report(store: &SearchStore, filtered: &[FlightOffer]) {
    if let Some(banner) = store.banner() {
        warn!("{}", banner);
    }

    info!(
        "Results for {}: {} of {} offers match filters",
        store.search().key(),
        filtered.len(),
        store.raw_offers().len()
    );

    if let Some(stats) = derive_price_stats(filtered) {
        info!(
            "Prices: min {:.0} | median {:.0} | max {:.0}",
            stats.min, stats.median, stats.max
        );
    }

    let ranked = rank_offers(filtered, SortKey::Cheapest, &BadgePolicy::default());
    for entry in ranked.iter().take(20) {
        let offer = &entry.offer;
        let mut badges = String::new();
        if entry.is_cheapest {
            badges.push_str(" [cheapest]");
        }
        if entry.is_best {
            badges.push_str(" [best]");
        }
        info!(
            "  {} | {:.2} {} | {} | {} stops | {}{}",
            offer.id,
            offer.price_total,
            offer.currency,
            format_duration(offer.duration_minutes),
            offer.stops,
            offer.airline_codes.join("/"),
            badges
        );
    }

    info!("Price histogram:");
    for bucket in derive_price_buckets(filtered, DEFAULT_HISTOGRAM_BUCKETS) {
        info!("  {:>11} | {}", bucket.label, "#".repeat(bucket.count));
    }

    info!("Average price by stops:");
    for bucket in derive_average_price_by_stops(filtered) {
        info!(
            "  {:<8} avg {:.0} ({} offers)",
            bucket.label, bucket.avg, bucket.count
        );
    }

    info!("Average price by airline:");
    for bucket in derive_average_price_by_airline(filtered, DEFAULT_AIRLINE_LIMIT) {
        info!(
            "  {:<4} avg {:.0} ({} offers)",
            bucket.label, bucket.avg, bucket.count
        );
    }

    info!("Departure windows:");
    for bucket in derive_departure_hour_buckets(filtered) {
        info!(
            "  {} avg {:.0} | cheapest {:.0}",
            bucket.label, bucket.avg, bucket.min
        );
    }
}
