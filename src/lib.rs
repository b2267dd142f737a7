//! ebay-watch - Watches eBay auctions for wanted items under a price ceiling
//!
//! Reads a list of search directives, queries the eBay Finding API for each,
//! keeps listings whose landed cost is under the ceiling, and publishes the
//! result as an HTML report served at `/`.

pub mod commands;
pub mod config;
pub mod cost;
pub mod directive;
pub mod ebay;
pub mod error;
pub mod filters;
pub mod format;
pub mod pipeline;
pub mod publish;
pub mod report;
pub mod server;

pub use config::Config;
pub use cost::EvaluatedListing;
pub use directive::SearchDirective;
pub use ebay::{Listing, Site};
pub use error::{Result, WatchError};
pub use format::{CurrencyFormat, Row, RowFormatter};
pub use report::Report;
