// Provider payload -> canonical offers. Total by construction: every missing
// or malformed field degrades to a default instead of failing the whole set.
use serde_json::Value;

use crate::model::{FlightOffer, FlightSegment};
use crate::utils::parse_iso_duration_minutes;

/// Shape of an incoming provider document, decided before any mapping.
enum RawPayload<'a> {
    Offers(&'a [Value]),
    Empty,
    Unrecognized,
}

fn classify(raw: &Value) -> RawPayload<'_> {
    let items = match raw.get("data") {
        Some(Value::Array(items)) => Some(items),
        _ => match raw {
            Value::Array(items) => Some(items),
            _ => None,
        },
    };
    match items {
        Some(items) if items.is_empty() => RawPayload::Empty,
        Some(items) => RawPayload::Offers(items),
        None => RawPayload::Unrecognized,
    }
}

/// Maps a raw provider document (`{data: [...]}` or a bare array) into
/// canonical offers. Any other shape yields an empty list.
pub fn normalize_offers(raw: &Value) -> Vec<FlightOffer> {
    let items = match classify(raw) {
        RawPayload::Offers(items) => items,
        RawPayload::Empty | RawPayload::Unrecognized => return Vec::new(),
    };

    items
        .iter()
        .enumerate()
        .map(|(idx, offer)| normalize_offer(offer, idx))
        .collect()
}

fn normalize_offer(offer: &Value, idx: usize) -> FlightOffer {
    let itineraries: &[Value] = offer
        .get("itineraries")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[]);

    // Segments across every itinerary, in document order.
    let segments: Vec<&Value> = itineraries
        .iter()
        .filter_map(|it| it.get("segments").and_then(Value::as_array))
        .flatten()
        .collect();

    // Stop count follows the first itinerary; the flattened total is only a
    // fallback when that itinerary carries no segments of its own.
    let first_itin_legs = itineraries
        .first()
        .and_then(|it| it.get("segments"))
        .and_then(Value::as_array)
        .map(Vec::len)
        .unwrap_or(0);
    let leg_count = if first_itin_legs > 0 {
        first_itin_legs
    } else if !segments.is_empty() {
        segments.len()
    } else {
        1
    };
    let stops = (leg_count - 1) as u32;

    let mut airline_codes: Vec<String> = Vec::new();
    for seg in &segments {
        let code = str_at(seg, "/carrierCode");
        if !code.is_empty() && !airline_codes.iter().any(|c| c == code) {
            airline_codes.push(code.to_string());
        }
    }
    if airline_codes.is_empty() {
        airline_codes = offer
            .get("validatingAirlineCodes")
            .and_then(Value::as_array)
            .map(|codes| {
                codes
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();
    }

    let duration_minutes = itineraries
        .first()
        .map(|it| parse_iso_duration_minutes(str_at(it, "/duration")))
        .unwrap_or(0);

    let mapped: Vec<FlightSegment> = segments
        .iter()
        .map(|seg| FlightSegment {
            from: str_at(seg, "/departure/iataCode").to_string(),
            to: str_at(seg, "/arrival/iataCode").to_string(),
            depart_at: str_at(seg, "/departure/at").to_string(),
            arrive_at: str_at(seg, "/arrival/at").to_string(),
            airline: str_at(seg, "/carrierCode").to_string(),
            flight_number: seg
                .get("number")
                .and_then(Value::as_str)
                .map(str::to_string),
            duration_minutes: parse_iso_duration_minutes(str_at(seg, "/duration")),
        })
        .collect();

    let depart_at = mapped
        .first()
        .map(|s| s.depart_at.clone())
        .unwrap_or_default();
    let arrive_at = mapped
        .last()
        .map(|s| s.arrive_at.clone())
        .unwrap_or_default();

    let id = offer
        .get("id")
        .and_then(Value::as_str)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| format!("offer-{idx}"));

    let currency = Some(str_at(offer, "/price/currency"))
        .filter(|c| !c.is_empty())
        .unwrap_or("USD")
        .to_string();

    FlightOffer {
        id,
        price_total: number_or_zero(offer.pointer("/price/total")),
        currency,
        airline_codes,
        stops,
        duration_minutes,
        depart_at,
        arrive_at,
        segments: mapped,
    }
}

fn str_at<'a>(value: &'a Value, pointer: &str) -> &'a str {
    value.pointer(pointer).and_then(Value::as_str).unwrap_or("")
}

/// Numeric coercion in the provider's spirit: totals arrive as strings
/// ("480.00") or numbers, anything else is worth 0.
fn number_or_zero(value: Option<&Value>) -> f64 {
    match value {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(0.0),
        _ => 0.0,
    }
}
