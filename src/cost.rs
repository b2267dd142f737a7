//! Landed cost of a listing: what the buyer pays including shipping.

use crate::ebay::Listing;
use rust_decimal::Decimal;

/// A listing with its landed cost worked out.
#[derive(Debug, Clone, PartialEq)]
pub struct EvaluatedListing {
    pub listing: Listing,
    /// `current_price + shipping_cost`, or just `current_price` when shipping is free
    pub landed_cost: Decimal,
    /// True when the listing reported no shipping cost
    pub free_shipping: bool,
}

impl EvaluatedListing {
    pub fn evaluate(listing: Listing) -> Self {
        let landed_cost = match listing.shipping_cost {
            Some(shipping) => listing.current_price + shipping,
            None => listing.current_price,
        };
        let free_shipping = listing.shipping_cost.is_none();

        Self { listing, landed_cost, free_shipping }
    }
}

impl From<Listing> for EvaluatedListing {
    fn from(listing: Listing) -> Self {
        Self::evaluate(listing)
    }
}
