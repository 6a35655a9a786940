use serde_json::Value;

use crate::model::{ApiError, SearchParams};

/// Seam over the flight-data provider. Implementations return the raw
/// payload untouched; normalization happens on the caller's side.
#[async_trait::async_trait]
pub trait FlightApi: Send + Sync {
    async fn search_offers(&self, params: &SearchParams) -> Result<Value, ApiError>;
    async fn search_locations(&self, keyword: &str) -> Result<Value, ApiError>;
}
