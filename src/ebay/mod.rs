//! eBay Finding API adapter: HTTP client, response mapping and site table.

pub mod client;
pub mod models;
pub mod parser;
pub mod sites;

pub use client::{EbayClient, EbaySearch, FindRequest};
pub use models::{Listing, SearchResults};
pub use sites::Site;
