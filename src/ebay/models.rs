//! Typed listing records produced by the Finding API adapter.

use rust_decimal::Decimal;

/// One auction listing as returned by a search.
#[derive(Debug, Clone, PartialEq)]
pub struct Listing {
    /// Marketplace item id
    pub item_id: String,
    /// Listing title, any script
    pub title: String,
    /// Link to the listing page
    pub url: String,
    /// Current bid price
    pub current_price: Decimal,
    /// Shipping cost; `None` means free shipping
    pub shipping_cost: Option<Decimal>,
    /// Number of bids placed so far
    pub bid_count: u32,
    /// Remaining time as an ISO-8601 duration, e.g. `P0DT1H2M3S`
    pub time_left: String,
}

/// Listings returned for one search, in the order the marketplace sent them.
#[derive(Debug, Clone)]
pub struct SearchResults {
    /// Keywords searched
    pub keywords: String,
    /// Count reported by the marketplace
    pub total_count: u32,
    /// Listings in response order
    pub listings: Vec<Listing>,
}

impl SearchResults {
    pub fn new(keywords: impl Into<String>) -> Self {
        Self { keywords: keywords.into(), total_count: 0, listings: Vec::new() }
    }

    pub fn count(&self) -> usize {
        self.listings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listings.is_empty()
    }
}
