// Core structs: FlightOffer, SearchParams, FiltersState, derived buckets
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One physical flight within an itinerary.
///
/// Instants are kept in their serialized RFC 3339 form; an absent instant is
/// an empty string, never a null.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightSegment {
    pub from: String,
    pub to: String,
    pub depart_at: String,
    pub arrive_at: String,
    pub airline: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flight_number: Option<String>,
    pub duration_minutes: u32,
}

/// One priced itinerary option, canonical across live and demo data.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightOffer {
    pub id: String,
    pub price_total: f64,
    pub currency: String,
    pub airline_codes: Vec<String>,
    pub stops: u32,
    pub duration_minutes: u32,
    pub depart_at: String,
    pub arrive_at: String,
    pub segments: Vec<FlightSegment>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CabinClass {
    #[default]
    Economy,
    PremiumEconomy,
    Business,
    First,
}

impl CabinClass {
    /// Wire value expected by the provider's travelClass parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            CabinClass::Economy => "ECONOMY",
            CabinClass::PremiumEconomy => "PREMIUM_ECONOMY",
            CabinClass::Business => "BUSINESS",
            CabinClass::First => "FIRST",
        }
    }
}

fn default_adults() -> u32 {
    1
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchParams {
    pub origin: String,
    pub destination: String,
    pub depart_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_date: Option<NaiveDate>,
    #[serde(default = "default_adults")]
    pub adults: u32,
    #[serde(default)]
    pub cabin: CabinClass,
}

impl SearchParams {
    /// Rejects bad input before any network or pipeline work happens.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.origin.trim().is_empty() || self.destination.trim().is_empty() {
            return Err(ValidationError::MissingRoute);
        }
        if let Some(return_date) = self.return_date {
            if return_date < self.depart_date {
                return Err(ValidationError::ReturnBeforeDepart);
            }
        }
        Ok(())
    }

    pub fn key(&self) -> String {
        format!("{}-{}-{}", self.origin, self.destination, self.depart_date)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FiltersState {
    /// None = any number of stops.
    pub max_stops: Option<u32>,
    /// Empty = no airline constraint.
    pub airlines: Vec<String>,
    /// Inclusive min/max on the total price.
    pub price_range: (f64, f64),
}

impl Default for FiltersState {
    fn default() -> Self {
        Self {
            max_stops: None,
            airlines: Vec::new(),
            price_range: (0.0, 999_999.0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SortKey {
    #[default]
    Cheapest,
    Fastest,
    LeastStops,
}

/// One bar of the price histogram.
#[derive(Debug, Clone, Serialize)]
pub struct PriceBucket {
    pub label: String,
    pub count: usize,
    pub from: f64,
    pub to: f64,
}

/// Average price for a fixed stop-count group (0, 1, 2+).
#[derive(Debug, Clone, Serialize)]
pub struct StopBucket {
    pub stops: u32,
    pub label: String,
    pub avg: f64,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct AirlineBucket {
    pub airline: String,
    pub label: String,
    pub avg: f64,
    pub count: usize,
}

/// Three-hour departure window keyed by its starting UTC hour.
#[derive(Debug, Clone, Serialize)]
pub struct DepartureBucket {
    pub label: String,
    pub bucket: u32,
    pub avg: f64,
    pub min: f64,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct PriceStats {
    pub min: f64,
    pub max: f64,
    pub median: f64,
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("http error: {0}")]
    Http(String),
    #[error("token error {status}: {body}")]
    Token { status: u16, body: String },
    #[error("unexpected response status {0}")]
    InvalidResponse(u16),
}

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("origin and destination are required")]
    MissingRoute,
    #[error("return date must be on or after depart date")]
    ReturnBeforeDepart,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> SearchParams {
        SearchParams {
            origin: "DAC".into(),
            destination: "DXB".into(),
            depart_date: NaiveDate::from_ymd_opt(2024, 8, 20).unwrap(),
            return_date: None,
            adults: 1,
            cabin: CabinClass::Economy,
        }
    }

    #[test]
    fn accepts_valid_roundtrip() {
        let mut p = params();
        p.return_date = NaiveDate::from_ymd_opt(2024, 8, 30);
        assert!(p.validate().is_ok());
    }

    #[test]
    fn rejects_return_before_depart() {
        let mut p = params();
        p.return_date = NaiveDate::from_ymd_opt(2024, 8, 10);
        assert!(matches!(
            p.validate(),
            Err(ValidationError::ReturnBeforeDepart)
        ));
    }

    #[test]
    fn rejects_empty_route() {
        let mut p = params();
        p.destination = " ".into();
        assert!(matches!(p.validate(), Err(ValidationError::MissingRoute)));
    }

    #[test]
    fn cabin_serializes_screaming_snake() {
        let json = serde_json::to_string(&CabinClass::PremiumEconomy).unwrap();
        assert_eq!(json, "\"PREMIUM_ECONOMY\"");
    }

    #[test]
    fn offer_serializes_camel_case() {
        let offer = FlightOffer {
            id: "offer-0".into(),
            price_total: 480.0,
            currency: "USD".into(),
            airline_codes: vec!["EK".into()],
            stops: 0,
            duration_minutes: 430,
            depart_at: "2024-08-20T05:40:00Z".into(),
            arrive_at: "2024-08-20T12:50:00Z".into(),
            segments: vec![],
        };
        let value = serde_json::to_value(&offer).unwrap();
        assert_eq!(value["priceTotal"], 480.0);
        assert_eq!(value["airlineCodes"][0], "EK");
        assert_eq!(value["durationMinutes"], 430);
    }
}
