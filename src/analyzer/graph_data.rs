use chrono::Timelike;
use std::collections::HashMap;

use crate::model::{
    AirlineBucket, DepartureBucket, FlightOffer, PriceBucket, PriceStats, StopBucket,
};
use crate::utils::parse_datetime;

pub const DEFAULT_HISTOGRAM_BUCKETS: usize = 10;
pub const DEFAULT_AIRLINE_LIMIT: usize = 8;

/// Equal-width price histogram over `[min, max]`.
///
/// A single distinct price collapses to one bucket spanning itself; an offer
/// priced exactly at the maximum lands in the last bucket rather than out of
/// bounds.
pub fn derive_price_buckets(offers: &[FlightOffer], buckets: usize) -> Vec<PriceBucket> {
    if offers.is_empty() || buckets == 0 {
        return Vec::new();
    }

    let prices: Vec<f64> = offers.iter().map(|o| o.price_total).collect();
    let min = prices.iter().copied().fold(f64::INFINITY, f64::min);
    let max = prices.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    if min == max {
        return vec![PriceBucket {
            label: trim_number(min),
            count: offers.len(),
            from: min,
            to: max,
        }];
    }

    let step = (max - min) / buckets as f64;
    let mut counts = vec![0usize; buckets];
    for price in &prices {
        let idx = (((price - min) / step).floor() as usize).min(buckets - 1);
        counts[idx] += 1;
    }

    (0..buckets)
        .map(|i| {
            let from = min + step * i as f64;
            let to = if i == buckets - 1 {
                max
            } else {
                min + step * (i + 1) as f64
            };
            PriceBucket {
                label: format!("{}–{}", from.round() as i64, to.round() as i64),
                count: counts[i],
                from,
                to,
            }
        })
        .collect()
}

/// Average price per stop group. Groups are fixed at 0 / 1 / 2+, and an
/// empty group reports an average of 0 rather than NaN.
pub fn derive_average_price_by_stops(offers: &[FlightOffer]) -> Vec<StopBucket> {
    let mut groups = [(0.0f64, 0usize); 3];
    for offer in offers {
        let bucket = offer.stops.min(2) as usize;
        groups[bucket].0 += offer.price_total;
        groups[bucket].1 += 1;
    }

    groups
        .iter()
        .enumerate()
        .map(|(stops, (total, count))| StopBucket {
            stops: stops as u32,
            label: if stops == 0 {
                "Non-stop".to_string()
            } else {
                format!("{stops} stops")
            },
            avg: if *count == 0 {
                0.0
            } else {
                (total / *count as f64).round()
            },
            count: *count,
        })
        .collect()
}

/// Average price per airline code. An offer carrying several codes counts
/// toward each of them. Busiest airlines first, cheaper average breaking
/// ties, truncated to `max_items`.
pub fn derive_average_price_by_airline(
    offers: &[FlightOffer],
    max_items: usize,
) -> Vec<AirlineBucket> {
    let mut groups: HashMap<&str, (f64, usize)> = HashMap::new();
    for offer in offers {
        for code in &offer.airline_codes {
            let entry = groups.entry(code).or_insert((0.0, 0));
            entry.0 += offer.price_total;
            entry.1 += 1;
        }
    }

    let mut entries: Vec<AirlineBucket> = groups
        .into_iter()
        .map(|(code, (total, count))| AirlineBucket {
            airline: code.to_string(),
            label: code.to_string(),
            avg: if count == 0 {
                0.0
            } else {
                (total / count as f64).round()
            },
            count,
        })
        .collect();

    entries.sort_by(|a, b| {
        b.count
            .cmp(&a.count)
            .then(a.avg.total_cmp(&b.avg))
            .then_with(|| a.airline.cmp(&b.airline))
    });
    entries.truncate(max_items);
    entries
}

/// Three-hour departure windows by UTC hour, with running average and
/// minimum price per window. Offers without a parseable departure instant
/// are skipped.
pub fn derive_departure_hour_buckets(offers: &[FlightOffer]) -> Vec<DepartureBucket> {
    let mut groups: HashMap<u32, (f64, usize, f64)> = HashMap::new();
    for offer in offers {
        let Some(depart) = parse_datetime(&offer.depart_at) else {
            continue;
        };
        let bucket_start = depart.hour() / 3 * 3;
        let entry = groups
            .entry(bucket_start)
            .or_insert((0.0, 0, offer.price_total));
        entry.0 += offer.price_total;
        entry.1 += 1;
        entry.2 = entry.2.min(offer.price_total);
    }

    let mut entries: Vec<DepartureBucket> = groups
        .into_iter()
        .map(|(start, (total, count, min))| {
            // End hour wraps mod 24, so the late bucket reads 21:00–00:00.
            let end = (start + 3) % 24;
            DepartureBucket {
                label: format!("{start:02}:00–{end:02}:00"),
                bucket: start,
                avg: if count == 0 {
                    0.0
                } else {
                    (total / count as f64).round()
                },
                min,
            }
        })
        .collect();

    entries.sort_by_key(|b| b.bucket);
    entries
}

/// Min / median / max over the set's prices; None for an empty set.
pub fn derive_price_stats(offers: &[FlightOffer]) -> Option<PriceStats> {
    if offers.is_empty() {
        return None;
    }

    let mut prices: Vec<f64> = offers.iter().map(|o| o.price_total).collect();
    prices.sort_by(f64::total_cmp);
    let min = prices[0];
    let max = prices[prices.len() - 1];
    let mid = prices.len() / 2;
    let median = if prices.len() % 2 == 0 {
        ((prices[mid - 1] + prices[mid]) / 2.0).round()
    } else {
        prices[mid]
    };

    Some(PriceStats { min, max, median })
}

/// JS-style number rendering for the degenerate single-price label.
fn trim_number(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}
