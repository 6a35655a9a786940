// Analyzer module: aggregates submodules for different aspects of analysis.

pub mod graph_data;
pub mod ranking;

// Re-export the derivation entry points for ease of use.
pub use graph_data::{
    DEFAULT_AIRLINE_LIMIT, DEFAULT_HISTOGRAM_BUCKETS, derive_average_price_by_airline,
    derive_average_price_by_stops, derive_departure_hour_buckets, derive_price_buckets,
    derive_price_stats,
};
pub use ranking::{BadgePolicy, RankedOffer, rank_offers, sort_offers};
