// Deterministic fallback catalog. Two adjustment passes over a fixed seed
// table stand in for live provider data whenever the search comes back
// empty or the proxy is unreachable.
use chrono::{DateTime, Duration, SecondsFormat, Utc};

use crate::model::{FlightOffer, FlightSegment};
use crate::utils::parse_datetime;

const CURRENCY: &str = "USD";
const LAYOVER_PER_STOP: u32 = 60;

struct Seed {
    from: &'static str,
    to: &'static str,
    via: &'static [&'static str],
    stops: u32,
    airline: &'static str,
    depart_at: &'static str,
    /// End-to-end including layovers.
    duration_minutes: u32,
    price: f64,
}

const FALLBACK_CONNECTIONS: [&str; 8] = ["DXB", "DOH", "IST", "DEL", "BKK", "SIN", "KUL", "CMB"];

const SEEDS: [Seed; 16] = [
    Seed { from: "DAC", to: "DXB", via: &[], stops: 0, airline: "EK", depart_at: "2024-08-20T05:40:00Z", duration_minutes: 430, price: 480.0 },
    Seed { from: "DAC", to: "DOH", via: &[], stops: 0, airline: "QR", depart_at: "2024-08-20T07:15:00Z", duration_minutes: 370, price: 450.0 },
    Seed { from: "DAC", to: "IST", via: &["DXB"], stops: 1, airline: "TK", depart_at: "2024-08-20T09:00:00Z", duration_minutes: 620, price: 520.0 },
    Seed { from: "DAC", to: "DEL", via: &[], stops: 0, airline: "AI", depart_at: "2024-08-20T10:10:00Z", duration_minutes: 140, price: 210.0 },
    Seed { from: "DAC", to: "SIN", via: &[], stops: 0, airline: "SQ", depart_at: "2024-08-20T12:20:00Z", duration_minutes: 250, price: 430.0 },
    Seed { from: "DAC", to: "KUL", via: &["CMB"], stops: 1, airline: "UL", depart_at: "2024-08-20T14:00:00Z", duration_minutes: 310, price: 320.0 },
    Seed { from: "DAC", to: "HKG", via: &["BKK"], stops: 1, airline: "CX", depart_at: "2024-08-20T16:30:00Z", duration_minutes: 520, price: 610.0 },
    Seed { from: "DAC", to: "JED", via: &["DOH"], stops: 1, airline: "EK", depart_at: "2024-08-20T18:10:00Z", duration_minutes: 520, price: 540.0 },
    Seed { from: "DAC", to: "FRA", via: &["IST", "VIE"], stops: 2, airline: "TK", depart_at: "2024-08-21T01:40:00Z", duration_minutes: 930, price: 780.0 },
    Seed { from: "DAC", to: "JFK", via: &["DXB"], stops: 1, airline: "EK", depart_at: "2024-08-21T03:10:00Z", duration_minutes: 1180, price: 960.0 },
    Seed { from: "DAC", to: "LHR", via: &["DOH"], stops: 1, airline: "QR", depart_at: "2024-08-21T05:30:00Z", duration_minutes: 980, price: 880.0 },
    Seed { from: "DAC", to: "BOM", via: &[], stops: 0, airline: "AI", depart_at: "2024-08-21T07:00:00Z", duration_minutes: 170, price: 190.0 },
    Seed { from: "DAC", to: "BKK", via: &[], stops: 0, airline: "BG", depart_at: "2024-08-21T09:30:00Z", duration_minutes: 145, price: 240.0 },
    Seed { from: "DAC", to: "MEL", via: &["SIN", "KUL"], stops: 2, airline: "SQ", depart_at: "2024-08-21T08:45:00Z", duration_minutes: 1150, price: 1200.0 },
    Seed { from: "DAC", to: "CDG", via: &["IST"], stops: 1, airline: "TK", depart_at: "2024-08-21T10:15:00Z", duration_minutes: 950, price: 820.0 },
    Seed { from: "DAC", to: "YYZ", via: &["DOH", "LHR"], stops: 2, airline: "QR", depart_at: "2024-08-21T12:05:00Z", duration_minutes: 1180, price: 1050.0 },
];

/// Per-seed tweak applied by a generation pass.
#[derive(Debug, Clone, Copy, Default)]
struct Adjustments {
    price_delta: f64,
    depart_shift_minutes: i64,
    duration_delta_minutes: i64,
    extra_stop: bool,
}

/// Stable, realistic catalog: every call returns the identical 2x16 offers.
pub fn demo_flights() -> Vec<FlightOffer> {
    let first_pass = generate_variant("A", |idx| Adjustments {
        price_delta: ((idx % 4) * 5) as f64,
        depart_shift_minutes: (idx * 20) as i64,
        duration_delta_minutes: ((idx % 3) * 10) as i64,
        extra_stop: false,
    });

    let second_pass = generate_variant("B", |idx| Adjustments {
        price_delta: (40 + idx * 3) as f64,
        depart_shift_minutes: (24 * 60 + idx * 15) as i64,
        duration_delta_minutes: 30,
        extra_stop: idx % 5 == 0,
    });

    first_pass.into_iter().chain(second_pass).collect()
}

fn generate_variant(variant: &str, adjuster: impl Fn(usize) -> Adjustments) -> Vec<FlightOffer> {
    SEEDS
        .iter()
        .enumerate()
        .map(|(idx, seed)| build_offer(seed, idx, variant, adjuster(idx)))
        .collect()
}

/// Pads the seed's declared connections from the fallback list, cycling from
/// the seed's own index, until the path has one airport per stop.
fn fill_connections(via: &[&'static str], stops: u32, seed_index: usize) -> Vec<&'static str> {
    let mut connectors: Vec<&'static str> = via.to_vec();
    let mut cursor = seed_index;
    while connectors.len() < stops as usize {
        connectors.push(FALLBACK_CONNECTIONS[cursor % FALLBACK_CONNECTIONS.len()]);
        cursor += 1;
    }
    connectors.truncate(stops as usize);
    connectors
}

fn build_offer(seed: &Seed, idx: usize, variant: &str, adjustments: Adjustments) -> FlightOffer {
    let stops = if adjustments.extra_stop && seed.stops < 2 {
        seed.stops + 1
    } else {
        seed.stops
    };
    let via = fill_connections(seed.via, stops, idx);

    let total_layover = stops * LAYOVER_PER_STOP;
    // Floor of 90 flyable minutes per leg keeps every leg viable even after
    // a negative-leaning duration adjustment.
    let total_duration = (seed.duration_minutes as i64 + adjustments.duration_delta_minutes)
        .max(((stops + 1) * 90 + total_layover) as i64) as u32;
    let flight_budget = total_duration - total_layover;
    let leg_count = stops + 1;
    let base_leg = (flight_budget / leg_count).max(70);
    let mut remainder = flight_budget as i64 - (base_leg * leg_count) as i64;

    let mut path: Vec<&str> = Vec::with_capacity(leg_count as usize + 1);
    path.push(seed.from);
    path.extend(via);
    path.push(seed.to);

    let base_depart = parse_datetime(seed.depart_at)
        .expect("seed departure instants are valid RFC 3339")
        + Duration::minutes(adjustments.depart_shift_minutes);

    let mut segments: Vec<FlightSegment> = Vec::with_capacity(leg_count as usize);
    let mut depart_cursor = base_depart;
    for i in 0..leg_count as usize {
        let leg_duration = base_leg + if remainder > 0 { 1 } else { 0 };
        if remainder > 0 {
            remainder -= 1;
        }

        let arrive = depart_cursor + Duration::minutes(leg_duration as i64);
        segments.push(FlightSegment {
            from: path[i].to_string(),
            to: path[i + 1].to_string(),
            depart_at: to_iso(depart_cursor),
            arrive_at: to_iso(arrive),
            airline: seed.airline.to_string(),
            flight_number: None,
            duration_minutes: leg_duration,
        });

        if i + 1 < leg_count as usize {
            depart_cursor = arrive + Duration::minutes(LAYOVER_PER_STOP as i64);
        }
    }

    let depart_at = segments[0].depart_at.clone();
    let arrive_at = segments[segments.len() - 1].arrive_at.clone();

    FlightOffer {
        id: format!("demo-{}-{}", variant, idx + 1),
        price_total: seed.price + adjustments.price_delta,
        currency: CURRENCY.to_string(),
        airline_codes: vec![seed.airline.to_string()],
        stops,
        duration_minutes: flight_budget + total_layover,
        depart_at,
        arrive_at,
        segments,
    }
}

fn to_iso(instant: DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Secs, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::parse_datetime;

    #[test]
    fn catalog_is_deterministic() {
        let first = serde_json::to_string(&demo_flights()).unwrap();
        let second = serde_json::to_string(&demo_flights()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn catalog_size_is_twice_seed_count() {
        assert_eq!(demo_flights().len(), 2 * SEEDS.len());
    }

    #[test]
    fn ids_are_unique_across_passes() {
        let offers = demo_flights();
        let mut ids: Vec<&str> = offers.iter().map(|o| o.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), offers.len());
        assert!(offers.iter().any(|o| o.id == "demo-A-1"));
        assert!(offers.iter().any(|o| o.id == "demo-B-16"));
    }

    #[test]
    fn every_offer_satisfies_segment_invariants() {
        for offer in demo_flights() {
            assert_eq!(offer.stops + 1, offer.segments.len() as u32, "{}", offer.id);
            assert_eq!(offer.segments[0].from, "DAC");

            let mut leg_sum = 0;
            for pair in offer.segments.windows(2) {
                assert_eq!(pair[0].to, pair[1].from, "{} path must chain", offer.id);
            }
            for seg in &offer.segments {
                let depart = parse_datetime(&seg.depart_at).unwrap();
                let arrive = parse_datetime(&seg.arrive_at).unwrap();
                assert!(depart < arrive, "{} legs move forward in time", offer.id);
                assert!(seg.duration_minutes >= 70, "{} legs get viable time", offer.id);
                assert_eq!(
                    (arrive - depart).num_minutes(),
                    seg.duration_minutes as i64
                );
                leg_sum += seg.duration_minutes;
            }

            // Offer duration = flyable time + one hour per intermediate stop.
            assert_eq!(
                offer.duration_minutes,
                leg_sum + offer.stops * LAYOVER_PER_STOP,
                "{}",
                offer.id
            );
        }
    }

    #[test]
    fn second_pass_injects_extra_stop_on_every_fifth_seed() {
        let offers = demo_flights();
        let b1 = offers.iter().find(|o| o.id == "demo-B-1").unwrap();
        assert_eq!(b1.stops, SEEDS[0].stops + 1);

        // Seed 16 also hits the 5th-seed rule but is already at the cap.
        let b16 = offers.iter().find(|o| o.id == "demo-B-16").unwrap();
        assert_eq!(b16.stops, 2);
    }

    #[test]
    fn second_pass_shifts_departures_a_day_forward() {
        let offers = demo_flights();
        let a2 = offers.iter().find(|o| o.id == "demo-A-2").unwrap();
        let b2 = offers.iter().find(|o| o.id == "demo-B-2").unwrap();
        let a_depart = parse_datetime(&a2.depart_at).unwrap();
        let b_depart = parse_datetime(&b2.depart_at).unwrap();
        // A: idx*20 = 20min shift; B: 24h + idx*15 = 24h15m.
        assert_eq!((b_depart - a_depart).num_minutes(), 24 * 60 + 15 - 20);
    }

    #[test]
    fn prices_follow_the_pass_deltas() {
        let offers = demo_flights();
        let a1 = offers.iter().find(|o| o.id == "demo-A-1").unwrap();
        let b1 = offers.iter().find(|o| o.id == "demo-B-1").unwrap();
        assert_eq!(a1.price_total, SEEDS[0].price);
        assert_eq!(b1.price_total, SEEDS[0].price + 40.0);
    }
}
