//! Price ceiling on landed cost.

use super::Filter;
use crate::cost::EvaluatedListing;
use rust_decimal::Decimal;

/// Accepts listings whose landed cost is strictly below the ceiling.
///
/// A listing costing exactly the ceiling is rejected, so the buyer never pays
/// the ceiling or more.
pub struct CeilingFilter {
    max: Decimal,
}

impl CeilingFilter {
    pub fn new(max: Decimal) -> Self {
        Self { max }
    }

    pub fn max(&self) -> Decimal {
        self.max
    }
}

impl Filter for CeilingFilter {
    fn matches(&self, listing: &EvaluatedListing) -> bool {
        listing.landed_cost < self.max
    }

    fn description(&self) -> String {
        format!("Landed cost < {}", self.max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ebay::Listing;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn make_listing(price: &str, shipping: Option<&str>) -> EvaluatedListing {
        EvaluatedListing::evaluate(Listing {
            item_id: "1".to_string(),
            title: "Test".to_string(),
            url: "https://www.ebay.co.uk/itm/1".to_string(),
            current_price: dec(price),
            shipping_cost: shipping.map(dec),
            bid_count: 0,
            time_left: "PT1H".to_string(),
        })
    }

    #[test]
    fn test_below_ceiling_free_shipping() {
        let filter = CeilingFilter::new(dec("10"));
        assert!(filter.matches(&make_listing("8.00", None)));
    }

    #[test]
    fn test_shipping_pushes_over_ceiling() {
        let filter = CeilingFilter::new(dec("10"));
        assert!(!filter.matches(&make_listing("9.50", Some("1.00"))));
    }

    #[test]
    fn test_exactly_at_ceiling_rejected() {
        let filter = CeilingFilter::new(dec("10"));
        assert!(!filter.matches(&make_listing("10.00", None)));
        assert!(!filter.matches(&make_listing("9.00", Some("1.00"))));
    }

    #[test]
    fn test_just_below_ceiling() {
        let filter = CeilingFilter::new(dec("10"));
        assert!(filter.matches(&make_listing("8.99", Some("1.00"))));
    }

    #[test]
    fn test_zero_ceiling_rejects_everything() {
        let filter = CeilingFilter::new(Decimal::ZERO);
        assert!(!filter.matches(&make_listing("0", None)));
    }

    #[test]
    fn test_description() {
        let filter = CeilingFilter::new(dec("5.00"));
        assert_eq!(filter.description(), "Landed cost < 5.00");
        assert_eq!(filter.max(), dec("5.00"));
    }
}
