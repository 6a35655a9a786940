use chrono::{DateTime, Duration, Utc};
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use tokio::sync::Mutex;
use tracing::debug;

use crate::api::traits::FlightApi;
use crate::config::AmadeusConfig;
use crate::model::{ApiError, SearchParams};

/// Margin subtracted from the provider's expiry so a token is never used
/// right at its deadline.
const TOKEN_EXPIRY_MARGIN_SECS: i64 = 60;

/// An OAuth token together with the instant it stops being trustworthy.
/// Owned by whoever constructs the client; there is no process-wide cache.
#[derive(Debug, Default)]
pub struct TokenCache {
    token: Option<String>,
    expires_at: Option<DateTime<Utc>>,
}

impl TokenCache {
    fn current(&self, now: DateTime<Utc>) -> Option<String> {
        match (&self.token, self.expires_at) {
            (Some(token), Some(expires_at)) if expires_at > now => Some(token.clone()),
            _ => None,
        }
    }

    fn store(&mut self, token: String, expires_at: DateTime<Utc>) {
        self.token = Some(token);
        self.expires_at = Some(expires_at);
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: i64,
}

pub struct AmadeusClient {
    client: Client,
    base_url: String,
    client_id: String,
    client_secret: String,
    currency: String,
    max_results: u32,
    token_cache: Mutex<TokenCache>,
}

impl AmadeusClient {
    pub fn new(
        config: &AmadeusConfig,
        currency: String,
        max_results: u32,
        token_cache: TokenCache,
    ) -> Self {
        let client = Client::builder()
            .user_agent("FareScout/0.1")
            .build()
            .unwrap();

        Self {
            client,
            base_url: config.base_url.clone(),
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
            currency,
            max_results,
            token_cache,
        }
    }

    /// Idempotent get-or-refresh: hands back the cached token while it is
    /// still fresh, otherwise performs the client-credentials exchange.
    async fn get_or_refresh_token(&self) -> Result<String, ApiError> {
        let now = Utc::now();
        let mut cache = self.token_cache.lock().await;
        if let Some(token) = cache.current(now) {
            return Ok(token);
        }

        debug!("Refreshing Amadeus access token...");
        let form = [
            ("grant_type", "client_credentials"),
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.as_str()),
        ];
        let response = self
            .client
            .post(format!("{}/v1/security/oauth2/token", self.base_url))
            .form(&form)
            .send()
            .await
            .map_err(|e| ApiError::Http(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Token {
                status: status.as_u16(),
                body,
            });
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| ApiError::Http(e.to_string()))?;
        let expires_at =
            now + Duration::seconds((token.expires_in - TOKEN_EXPIRY_MARGIN_SECS).max(0));
        cache.store(token.access_token.clone(), expires_at);
        Ok(token.access_token)
    }

    async fn get_json(&self, path: &str, query: &[(String, String)]) -> Result<Value, ApiError> {
        let token = self.get_or_refresh_token().await?;
        let response = self
            .client
            .get(format!("{}{}", self.base_url, path))
            .query(query)
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| ApiError::Http(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::InvalidResponse(status.as_u16()));
        }

        response
            .json()
            .await
            .map_err(|e| ApiError::Http(e.to_string()))
    }
}

#[async_trait::async_trait]
impl FlightApi for AmadeusClient {
    async fn search_offers(&self, params: &SearchParams) -> Result<Value, ApiError> {
        let mut query = vec![
            ("originLocationCode".to_string(), params.origin.clone()),
            (
                "destinationLocationCode".to_string(),
                params.destination.clone(),
            ),
            ("departureDate".to_string(), params.depart_date.to_string()),
            ("adults".to_string(), params.adults.to_string()),
            ("travelClass".to_string(), params.cabin.as_str().to_string()),
            ("currencyCode".to_string(), self.currency.clone()),
            ("max".to_string(), self.max_results.to_string()),
        ];
        if let Some(return_date) = params.return_date {
            query.push(("returnDate".to_string(), return_date.to_string()));
        }

        self.get_json("/v2/shopping/flight-offers", &query).await
    }

    async fn search_locations(&self, keyword: &str) -> Result<Value, ApiError> {
        let query = vec![
            ("keyword".to_string(), keyword.to_string()),
            ("subType".to_string(), "CITY,AIRPORT".to_string()),
        ];
        self.get_json("/v1/reference-data/locations", &query).await
    }
}
