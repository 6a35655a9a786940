// Pure predicate reduction of an offer list. Always recomputed from the full
// unfiltered set; survivors keep their relative order.
use crate::model::{FiltersState, FlightOffer};

pub fn filter_offers(offers: &[FlightOffer], filters: &FiltersState) -> Vec<FlightOffer> {
    offers
        .iter()
        .filter(|offer| passes(offer, filters))
        .cloned()
        .collect()
}

fn passes(offer: &FlightOffer, filters: &FiltersState) -> bool {
    if let Some(max_stops) = filters.max_stops {
        if offer.stops > max_stops {
            return false;
        }
    }

    if !filters.airlines.is_empty() {
        let has = offer
            .airline_codes
            .iter()
            .any(|code| filters.airlines.contains(code));
        if !has {
            return false;
        }
    }

    let (min_price, max_price) = filters.price_range;
    offer.price_total >= min_price && offer.price_total <= max_price
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::demo::demo_flights;

    #[test]
    fn default_filters_keep_everything_in_order() {
        let offers = demo_flights();
        let filtered = filter_offers(&offers, &FiltersState::default());
        assert_eq!(filtered.len(), offers.len());
        let ids: Vec<&str> = filtered.iter().map(|o| o.id.as_str()).collect();
        let expected: Vec<&str> = offers.iter().map(|o| o.id.as_str()).collect();
        assert_eq!(ids, expected);
    }

    #[test]
    fn max_stops_bounds_every_survivor() {
        let offers = demo_flights();
        let filters = FiltersState {
            max_stops: Some(0),
            ..FiltersState::default()
        };
        let filtered = filter_offers(&offers, &filters);
        assert!(!filtered.is_empty());
        assert!(filtered.iter().all(|o| o.stops == 0));
    }

    #[test]
    fn airline_filter_requires_intersection() {
        let offers = demo_flights();
        let filters = FiltersState {
            airlines: vec!["QR".into(), "EK".into()],
            ..FiltersState::default()
        };
        let filtered = filter_offers(&offers, &filters);
        assert!(!filtered.is_empty());
        assert!(filtered
            .iter()
            .all(|o| o.airline_codes.iter().any(|c| c == "QR" || c == "EK")));
    }

    #[test]
    fn price_range_is_inclusive_on_both_ends() {
        let offers = demo_flights();
        let exact = offers[0].price_total;
        let filters = FiltersState {
            price_range: (exact, exact),
            ..FiltersState::default()
        };
        let filtered = filter_offers(&offers, &filters);
        assert!(filtered.iter().any(|o| o.id == offers[0].id));
        assert!(filtered.iter().all(|o| o.price_total == exact));
    }

    #[test]
    fn tightening_a_bound_never_grows_the_result() {
        let offers = demo_flights();
        let loose = FiltersState::default();
        let tighter_stops = FiltersState {
            max_stops: Some(1),
            ..FiltersState::default()
        };
        let tighter_price = FiltersState {
            price_range: (0.0, 500.0),
            ..FiltersState::default()
        };
        let base = filter_offers(&offers, &loose).len();
        assert!(filter_offers(&offers, &tighter_stops).len() <= base);
        assert!(filter_offers(&offers, &tighter_price).len() <= base);
    }
}
