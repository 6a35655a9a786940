use serde::Deserialize;
use std::fs;

use crate::model::SearchParams;

/// Optional filter presets applied to every search's result set.
#[derive(Debug, Default, Deserialize)]
pub struct FilterConfig {
    pub max_stops: Option<u32>,
    #[serde(default)]
    pub airlines: Vec<String>,
    pub price_min: Option<f64>,
    pub price_max: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct AmadeusConfig {
    pub client_id: String,
    pub client_secret: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

fn default_base_url() -> String {
    "https://test.api.amadeus.com".to_string()
}

fn default_currency() -> String {
    "USD".to_string()
}

fn default_max_results() -> u32 {
    50
}

#[derive(Debug, Deserialize)]
pub struct AppConfig {
    pub amadeus: AmadeusConfig,
    #[serde(default = "default_currency")]
    pub currency: String,
    /// Cap forwarded to the provider's `max` parameter.
    #[serde(default = "default_max_results")]
    pub max_results: u32,
    #[serde(default)]
    pub filters: FilterConfig,
    pub searches: Vec<SearchParams>,
}

pub fn load_config(path: &str) -> Result<AppConfig, Box<dyn std::error::Error>> {
    let content = fs::read_to_string(path)?;
    let config: AppConfig = serde_json::from_str(&content)?;
    Ok(config)
}
