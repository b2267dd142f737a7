//! Mapping of Finding API JSON responses into typed listings.
//!
//! The JSON flavour of the Finding API wraps every value in an array, so the
//! raw shapes below mirror that and are then validated field by field. Any
//! required field that is missing or unparsable fails the whole response.

use crate::ebay::models::{Listing, SearchResults};
use crate::error::{Result, WatchError};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::str::FromStr;
use tracing::{debug, trace, warn};

#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(rename = "findItemsAdvancedResponse", default)]
    response: Vec<RawResponse>,
    #[serde(rename = "errorMessage", default)]
    error_message: Vec<RawErrorMessage>,
}

#[derive(Debug, Deserialize)]
struct RawResponse {
    #[serde(default)]
    ack: Vec<String>,
    #[serde(rename = "errorMessage", default)]
    error_message: Vec<RawErrorMessage>,
    #[serde(rename = "searchResult", default)]
    search_result: Vec<RawSearchResult>,
}

#[derive(Debug, Deserialize)]
struct RawErrorMessage {
    #[serde(default)]
    error: Vec<RawError>,
}

#[derive(Debug, Deserialize)]
struct RawError {
    #[serde(rename = "errorId", default)]
    error_id: Vec<String>,
    #[serde(default)]
    message: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct RawSearchResult {
    #[serde(rename = "@count")]
    count: Option<String>,
    #[serde(default)]
    item: Vec<RawItem>,
}

#[derive(Debug, Deserialize)]
struct RawItem {
    #[serde(rename = "itemId", default)]
    item_id: Vec<String>,
    #[serde(default)]
    title: Vec<String>,
    #[serde(rename = "viewItemURL", default)]
    view_item_url: Vec<String>,
    #[serde(rename = "sellingStatus", default)]
    selling_status: Vec<RawSellingStatus>,
    #[serde(rename = "shippingInfo", default)]
    shipping_info: Vec<RawShippingInfo>,
}

#[derive(Debug, Deserialize)]
struct RawSellingStatus {
    #[serde(rename = "currentPrice", default)]
    current_price: Vec<RawAmount>,
    #[serde(rename = "bidCount", default)]
    bid_count: Vec<String>,
    #[serde(rename = "timeLeft", default)]
    time_left: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct RawShippingInfo {
    #[serde(rename = "shippingServiceCost", default)]
    shipping_service_cost: Vec<RawAmount>,
}

#[derive(Debug, Deserialize)]
struct RawAmount {
    #[serde(rename = "__value__")]
    value: String,
}

/// Parses a `findItemsAdvanced` JSON body.
pub fn parse_find_response(body: &str, keywords: &str) -> Result<SearchResults> {
    let envelope: Envelope = serde_json::from_str(body)
        .map_err(|e| WatchError::adapter(format!("Invalid response JSON: {}", e)))?;

    let Some(response) = envelope.response.first() else {
        let reason = describe_errors(&envelope.error_message)
            .unwrap_or_else(|| "response has no findItemsAdvancedResponse".to_string());
        return Err(WatchError::adapter(reason));
    };

    let ack = response.ack.first().map(String::as_str).unwrap_or("Failure");
    match ack {
        "Success" => {}
        "Warning" => {
            if let Some(warning) = describe_errors(&response.error_message) {
                warn!("Search for \"{}\" returned a warning: {}", keywords, warning);
            }
        }
        other => {
            let reason = describe_errors(&response.error_message)
                .unwrap_or_else(|| format!("ack was {}", other));
            return Err(WatchError::adapter(reason));
        }
    }

    let mut results = SearchResults::new(keywords);
    let Some(search_result) = response.search_result.first() else {
        return Err(WatchError::adapter("response has no searchResult"));
    };

    results.total_count = match &search_result.count {
        Some(count) => count
            .parse()
            .map_err(|_| WatchError::adapter(format!("Invalid result count \"{}\"", count)))?,
        None => search_result.item.len() as u32,
    };

    for (idx, item) in search_result.item.iter().enumerate() {
        let listing = map_item(item).map_err(|reason| {
            WatchError::adapter(format!("Item {} of \"{}\": {}", idx + 1, keywords, reason))
        })?;
        trace!("Mapped listing {} - {}", listing.item_id, listing.title);
        results.listings.push(listing);
    }

    if results.total_count as usize != results.count() {
        debug!(
            "Reported count {} differs from {} items received",
            results.total_count,
            results.count()
        );
    }

    Ok(results)
}

fn map_item(item: &RawItem) -> std::result::Result<Listing, String> {
    let selling = first(&item.selling_status, "sellingStatus")?;

    let current_price = parse_amount(&first(&selling.current_price, "currentPrice")?.value)
        .ok_or("currentPrice is not a number")?;

    let shipping_cost = match item.shipping_info.first() {
        Some(info) => match info.shipping_service_cost.first() {
            Some(cost) => {
                Some(parse_amount(&cost.value).ok_or("shippingServiceCost is not a number")?)
            }
            None => None,
        },
        None => None,
    };

    let bid_count = first(&selling.bid_count, "bidCount")?
        .parse::<u32>()
        .map_err(|_| "bidCount is not a non-negative integer".to_string())?;

    Ok(Listing {
        item_id: first(&item.item_id, "itemId")?.clone(),
        title: first(&item.title, "title")?.clone(),
        url: first(&item.view_item_url, "viewItemURL")?.clone(),
        current_price,
        shipping_cost,
        bid_count,
        time_left: first(&selling.time_left, "timeLeft")?.clone(),
    })
}

fn first<'a, T>(values: &'a [T], field: &str) -> std::result::Result<&'a T, String> {
    values.first().ok_or_else(|| format!("missing {}", field))
}

fn parse_amount(value: &str) -> Option<Decimal> {
    Decimal::from_str(value.trim()).ok()
}

fn describe_errors(messages: &[RawErrorMessage]) -> Option<String> {
    let parts: Vec<String> = messages
        .iter()
        .flat_map(|m| m.error.iter())
        .map(|e| {
            let text = e.message.first().map(String::as_str).unwrap_or("unknown error");
            match e.error_id.first() {
                Some(id) => format!("{} (error {})", text, id),
                None => text.to_string(),
            }
        })
        .collect();

    if parts.is_empty() {
        None
    } else {
        Some(parts.join("; "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item_json(id: &str, price: &str, shipping: Option<&str>) -> String {
        let shipping_info = match shipping {
            Some(cost) => format!(
                r#"[{{"shippingServiceCost":[{{"@currencyId":"GBP","__value__":"{}"}}],"shippingType":["Flat"]}}]"#,
                cost
            ),
            None => r#"[{"shippingType":["Calculated"]}]"#.to_string(),
        };
        format!(
            r#"{{"itemId":["{id}"],"title":["Item {id}"],"viewItemURL":["https://www.ebay.co.uk/itm/{id}"],
               "shippingInfo":{shipping_info},
               "sellingStatus":[{{"currentPrice":[{{"@currencyId":"GBP","__value__":"{price}"}}],
               "bidCount":["2"],"timeLeft":["P0DT3H1M0S"]}}]}}"#
        )
    }

    fn response_json(items: &[String]) -> String {
        format!(
            r#"{{"findItemsAdvancedResponse":[{{"ack":["Success"],"version":["1.13.0"],
               "searchResult":[{{"@count":"{}","item":[{}]}}]}}]}}"#,
            items.len(),
            items.join(",")
        )
    }

    #[test]
    fn test_parse_two_items() {
        let body = response_json(&[item_json("1", "8.0", None), item_json("2", "9.50", Some("1.00"))]);
        let results = parse_find_response(&body, "mug").unwrap();

        assert_eq!(results.keywords, "mug");
        assert_eq!(results.total_count, 2);
        assert_eq!(results.count(), 2);

        let first = &results.listings[0];
        assert_eq!(first.item_id, "1");
        assert_eq!(first.title, "Item 1");
        assert_eq!(first.url, "https://www.ebay.co.uk/itm/1");
        assert_eq!(first.current_price, Decimal::new(80, 1));
        assert!(first.shipping_cost.is_none());
        assert_eq!(first.bid_count, 2);
        assert_eq!(first.time_left, "P0DT3H1M0S");

        let second = &results.listings[1];
        assert_eq!(second.shipping_cost, Some(Decimal::new(100, 2)));
    }

    #[test]
    fn test_single_item_is_a_sequence() {
        let body = response_json(&[item_json("42", "3.00", None)]);
        let results = parse_find_response(&body, "lamp").unwrap();
        assert_eq!(results.count(), 1);
        assert_eq!(results.listings[0].item_id, "42");
    }

    #[test]
    fn test_zero_items() {
        let body = r#"{"findItemsAdvancedResponse":[{"ack":["Success"],"searchResult":[{"@count":"0"}]}]}"#;
        let results = parse_find_response(body, "nothing").unwrap();
        assert!(results.is_empty());
        assert_eq!(results.total_count, 0);
    }

    #[test]
    fn test_missing_required_field() {
        let item = item_json("7", "1.00", None).replace(r#""bidCount":["2"],"#, "");
        let body = response_json(&[item]);
        let err = parse_find_response(&body, "mug").unwrap_err();
        assert!(matches!(err, WatchError::AdapterFailure(_)));
        assert!(err.to_string().contains("missing bidCount"));
    }

    #[test]
    fn test_unparsable_price() {
        let body = response_json(&[item_json("7", "cheap", None)]);
        let err = parse_find_response(&body, "mug").unwrap_err();
        assert!(err.to_string().contains("currentPrice is not a number"));
    }

    #[test]
    fn test_failure_ack_reports_message() {
        let body = r#"{"findItemsAdvancedResponse":[{"ack":["Failure"],
            "errorMessage":[{"error":[{"errorId":["11"],"message":["Invalid keywords"]}]}]}]}"#;
        let err = parse_find_response(body, "x").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("Invalid keywords"));
        assert!(msg.contains("error 11"));
    }

    #[test]
    fn test_warning_ack_still_parses() {
        let body = r#"{"findItemsAdvancedResponse":[{"ack":["Warning"],
            "errorMessage":[{"error":[{"message":["Keyword ignored"]}]}],
            "searchResult":[{"@count":"0"}]}]}"#;
        assert!(parse_find_response(body, "x").unwrap().is_empty());
    }

    #[test]
    fn test_root_level_error() {
        let body = r#"{"errorMessage":[{"error":[{"errorId":["10001"],"message":["Authentication failed"]}]}]}"#;
        let err = parse_find_response(body, "x").unwrap_err();
        assert!(err.to_string().contains("Authentication failed"));
    }

    #[test]
    fn test_not_json() {
        let err = parse_find_response("<html>oops</html>", "x").unwrap_err();
        assert!(err.to_string().contains("Invalid response JSON"));
    }

    #[test]
    fn test_non_ascii_title_preserved() {
        let item = item_json("5", "2.00", None).replace("Item 5", "Théière «Ø» ☕");
        let results = parse_find_response(&response_json(&[item]), "tea").unwrap();
        assert_eq!(results.listings[0].title, "Théière «Ø» ☕");
    }
}
