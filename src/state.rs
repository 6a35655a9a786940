// Search/filter state container. Offers are written once per search and held
// read-only; filters mutate independently through the setters below and the
// views re-derive from scratch on every change.
use crate::model::{FiltersState, FlightOffer, SearchParams};

#[derive(Debug)]
pub struct SearchStore {
    search: SearchParams,
    filters: FiltersState,
    raw_offers: Vec<FlightOffer>,
    last_search_key: Option<String>,
    banner: Option<String>,
}

impl SearchStore {
    pub fn new(search: SearchParams) -> Self {
        Self {
            search,
            filters: FiltersState::default(),
            raw_offers: Vec::new(),
            last_search_key: None,
            banner: None,
        }
    }

    pub fn search(&self) -> &SearchParams {
        &self.search
    }

    pub fn filters(&self) -> &FiltersState {
        &self.filters
    }

    pub fn raw_offers(&self) -> &[FlightOffer] {
        &self.raw_offers
    }

    pub fn last_search_key(&self) -> Option<&str> {
        self.last_search_key.as_deref()
    }

    /// Non-blocking advisory shown alongside results (e.g. the demo-data
    /// notice); never a hard failure of the view.
    pub fn banner(&self) -> Option<&str> {
        self.banner.as_deref()
    }

    pub fn set_search(&mut self, search: SearchParams) {
        self.search = search;
    }

    pub fn set_raw_offers(&mut self, offers: Vec<FlightOffer>) {
        self.raw_offers = offers;
    }

    pub fn set_last_search_key(&mut self, key: Option<String>) {
        self.last_search_key = key;
    }

    pub fn set_banner(&mut self, message: impl Into<String>) {
        self.banner = Some(message.into());
    }

    pub fn set_max_stops(&mut self, max_stops: Option<u32>) {
        self.filters.max_stops = max_stops;
    }

    /// Adds the code to the airline constraint, or removes it when already
    /// selected.
    pub fn toggle_airline(&mut self, code: &str) {
        if let Some(pos) = self.filters.airlines.iter().position(|c| c == code) {
            self.filters.airlines.remove(pos);
        } else {
            self.filters.airlines.push(code.to_string());
        }
    }

    /// Keeps the pair ordered regardless of argument order.
    pub fn set_price_range(&mut self, a: f64, b: f64) {
        self.filters.price_range = (a.min(b), a.max(b));
    }

    pub fn reset_filters(&mut self) {
        self.filters = FiltersState::default();
    }
}
