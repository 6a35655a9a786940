use crate::model::{FlightOffer, SortKey};

/// Thresholds for the "best" badge, relative to the filtered set's minimum
/// price and duration. Both bounds must hold at once.
#[derive(Debug, Clone, Copy)]
pub struct BadgePolicy {
    pub price_factor: f64,
    pub duration_factor: f64,
}

impl Default for BadgePolicy {
    fn default() -> Self {
        Self {
            price_factor: 1.2,
            duration_factor: 1.2,
        }
    }
}

#[derive(Debug, Clone)]
pub struct RankedOffer {
    pub offer: FlightOffer,
    pub is_cheapest: bool,
    pub is_best: bool,
}

/// Stable ordering by the chosen key. Least-stops ties fall back to price.
pub fn sort_offers(offers: &[FlightOffer], key: SortKey) -> Vec<FlightOffer> {
    let mut sorted = offers.to_vec();
    match key {
        SortKey::Fastest => sorted.sort_by_key(|o| o.duration_minutes),
        SortKey::LeastStops => sorted.sort_by(|a, b| {
            a.stops
                .cmp(&b.stops)
                .then(a.price_total.total_cmp(&b.price_total))
        }),
        SortKey::Cheapest => sorted.sort_by(|a, b| a.price_total.total_cmp(&b.price_total)),
    }
    sorted
}

/// Orders the filtered set and attaches badge classification computed over
/// that same set.
pub fn rank_offers(offers: &[FlightOffer], key: SortKey, policy: &BadgePolicy) -> Vec<RankedOffer> {
    let min_price = offers
        .iter()
        .map(|o| o.price_total)
        .fold(f64::INFINITY, f64::min);
    let min_duration = offers.iter().map(|o| o.duration_minutes).min().unwrap_or(0);

    sort_offers(offers, key)
        .into_iter()
        .map(|offer| {
            let is_cheapest = offer.price_total == min_price;
            let is_best = offer.price_total <= min_price * policy.price_factor
                && offer.duration_minutes as f64 <= min_duration as f64 * policy.duration_factor;
            RankedOffer {
                offer,
                is_cheapest,
                is_best,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn offer(id: &str, price: f64, duration: u32, stops: u32) -> FlightOffer {
        FlightOffer {
            id: id.into(),
            price_total: price,
            currency: "USD".into(),
            airline_codes: vec!["EK".into()],
            stops,
            duration_minutes: duration,
            depart_at: String::new(),
            arrive_at: String::new(),
            segments: vec![],
        }
    }

    #[test]
    fn cheapest_puts_minimum_price_first() {
        let offers = vec![
            offer("a", 480.0, 430, 0),
            offer("b", 210.0, 140, 0),
            offer("c", 960.0, 1180, 1),
        ];
        let sorted = sort_offers(&offers, SortKey::Cheapest);
        assert_eq!(sorted[0].id, "b");
        assert_eq!(sorted[0].price_total, 210.0);
    }

    #[test]
    fn fastest_orders_by_duration() {
        let offers = vec![
            offer("a", 480.0, 430, 0),
            offer("b", 210.0, 140, 0),
            offer("c", 960.0, 1180, 1),
        ];
        let sorted = sort_offers(&offers, SortKey::Fastest);
        let durations: Vec<u32> = sorted.iter().map(|o| o.duration_minutes).collect();
        assert_eq!(durations, vec![140, 430, 1180]);
    }

    #[test]
    fn least_stops_breaks_ties_by_price() {
        let offers = vec![
            offer("pricey", 600.0, 300, 0),
            offer("layover", 100.0, 500, 1),
            offer("cheap", 200.0, 300, 0),
        ];
        let sorted = sort_offers(&offers, SortKey::LeastStops);
        let ids: Vec<&str> = sorted.iter().map(|o| o.id.as_str()).collect();
        assert_eq!(ids, vec!["cheap", "pricey", "layover"]);
    }

    #[test]
    fn cheapest_badge_marks_the_set_minimum() {
        let offers = vec![offer("a", 480.0, 430, 0), offer("b", 210.0, 140, 0)];
        let ranked = rank_offers(&offers, SortKey::Cheapest, &BadgePolicy::default());
        assert!(ranked[0].is_cheapest);
        assert!(!ranked[1].is_cheapest);
    }

    #[test]
    fn best_badge_needs_both_bounds() {
        let offers = vec![
            offer("balanced", 100.0, 100, 0),
            // Within price bound but far too slow.
            offer("slow", 110.0, 300, 0),
            // Within duration bound but too expensive.
            offer("pricey", 200.0, 105, 0),
        ];
        let ranked = rank_offers(&offers, SortKey::Cheapest, &BadgePolicy::default());
        let by_id = |id: &str| ranked.iter().find(|r| r.offer.id == id).unwrap();
        assert!(by_id("balanced").is_best);
        assert!(!by_id("slow").is_best);
        assert!(!by_id("pricey").is_best);
    }

    #[test]
    fn looser_policy_widens_the_best_badge() {
        let offers = vec![offer("a", 100.0, 100, 0), offer("b", 190.0, 150, 0)];
        let loose = BadgePolicy {
            price_factor: 2.0,
            duration_factor: 2.0,
        };
        let ranked = rank_offers(&offers, SortKey::Cheapest, &loose);
        assert!(ranked.iter().all(|r| r.is_best));
    }

    #[test]
    fn empty_set_ranks_to_empty() {
        assert!(rank_offers(&[], SortKey::Cheapest, &BadgePolicy::default()).is_empty());
    }
}
