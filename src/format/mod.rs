//! Display rows for accepted listings.

pub mod money;
pub mod time_left;

use crate::cost::EvaluatedListing;
use crate::error::{Result, WatchError};
use crate::filters::{CeilingFilter, Filter};
use rust_decimal::Decimal;
use tracing::trace;

pub use money::{CurrencyFormat, Grouping};
pub use time_left::TimeLeft;

/// One formatted line of a report table, fields in display order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub landed_cost: String,
    pub free_shipping: bool,
    pub time_left: String,
    pub bid_count: u32,
    pub url: String,
    pub title: String,
}

/// Turns evaluated listings into report rows.
#[derive(Debug, Clone, Default)]
pub struct RowFormatter {
    currency: CurrencyFormat,
}

impl RowFormatter {
    pub fn new(currency: CurrencyFormat) -> Self {
        Self { currency }
    }

    pub fn currency(&self) -> &CurrencyFormat {
        &self.currency
    }

    /// Formats a listing unconditionally.
    ///
    /// Fails when the remaining time is not a usable ISO-8601 duration.
    pub fn format_row(&self, listing: &EvaluatedListing) -> Result<Row> {
        let time_left: TimeLeft = listing
            .listing
            .time_left
            .parse()
            .map_err(|reason| WatchError::formatting(&listing.listing.title, reason))?;

        Ok(Row {
            landed_cost: self.currency.format(listing.landed_cost),
            free_shipping: listing.free_shipping,
            time_left: time_left.to_string(),
            bid_count: listing.listing.bid_count,
            url: listing.listing.url.clone(),
            title: listing.listing.title.clone(),
        })
    }

    /// Returns a row when the listing's landed cost is strictly below `max_price`.
    pub fn accept(&self, listing: &EvaluatedListing, max_price: Decimal) -> Result<Option<Row>> {
        let ceiling = CeilingFilter::new(max_price);
        if !ceiling.matches(listing) {
            trace!("Skipping \"{}\": fails {}", listing.listing.title, ceiling.description());
            return Ok(None);
        }
        self.format_row(listing).map(Some)
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

    fn make_listing(price: &str, shipping: Option<&str>, time_left: &str) -> EvaluatedListing {
        EvaluatedListing::evaluate(Listing {
            item_id: "2001".to_string(),
            title: "Tasse à café – 咖啡杯".to_string(),
            url: "https://www.ebay.co.uk/itm/2001".to_string(),
            current_price: dec(price),
            shipping_cost: shipping.map(dec),
            bid_count: 3,
            time_left: time_left.to_string(),
        })
    }

    #[test]
    fn test_format_row_fields() {
        let formatter = RowFormatter::default();
        let row = formatter.format_row(&make_listing("8", None, "P1DT2H3M4S")).unwrap();

        assert_eq!(row.landed_cost, "£8.00");
        assert!(row.free_shipping);
        assert_eq!(row.time_left, "1 day, 2:03:04");
        assert_eq!(row.bid_count, 3);
        assert_eq!(row.url, "https://www.ebay.co.uk/itm/2001");
        assert_eq!(row.title, "Tasse à café – 咖啡杯");
    }

    #[test]
    fn test_accept_includes_below_ceiling() {
        let formatter = RowFormatter::default();
        let row = formatter.accept(&make_listing("8.00", None, "PT1H"), dec("10")).unwrap();
        assert_eq!(row.unwrap().landed_cost, "£8.00");
    }

    #[test]
    fn test_accept_excludes_at_or_above_ceiling() {
        let formatter = RowFormatter::default();
        let over = formatter.accept(&make_listing("9.50", Some("1.00"), "PT1H"), dec("10"));
        assert!(over.unwrap().is_none());

        let equal = formatter.accept(&make_listing("9.00", Some("1.00"), "PT1H"), dec("10"));
        assert!(equal.unwrap().is_none());
    }

    #[test]
    fn test_excluded_listing_is_not_formatted() {
        let formatter = RowFormatter::default();
        let result = formatter.accept(&make_listing("50", None, "garbage"), dec("10"));
        assert!(result.unwrap().is_none());
    }

    #[test]
    fn test_bad_duration_fails_loudly() {
        let formatter = RowFormatter::default();
        let err = formatter.accept(&make_listing("1", None, "tomorrow"), dec("10")).unwrap_err();
        assert!(matches!(err, WatchError::FormattingFailure { .. }));
        assert!(err.to_string().contains("Tasse à café"));
    }

    #[test]
    fn test_oversized_duration_fails_loudly() {
        let formatter = RowFormatter::default();
        let err = formatter
            .accept(&make_listing("1", None, "P99999999999999W"), dec("10"))
            .unwrap_err();
        assert!(matches!(err, WatchError::FormattingFailure { .. }));
        assert!(err.to_string().contains("too large"));
    }

    #[test]
    fn test_uses_configured_currency() {
        let formatter = RowFormatter::new(CurrencyFormat::new("EUR", ',', Grouping::Period));
        let row = formatter.format_row(&make_listing("1234.5", Some("0.25"), "PT1M")).unwrap();
        assert_eq!(row.landed_cost, "€1.234,75");
        assert!(!row.free_shipping);
        assert_eq!(formatter.currency().currency_code, "EUR");
    }
}
