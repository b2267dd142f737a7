//! HTTP client for the eBay Finding API.

use crate::config::Config;
use crate::directive::SearchDirective;
use crate::ebay::models::SearchResults;
use crate::ebay::parser::parse_find_response;
use crate::ebay::sites::Site;
use crate::error::{Result, WatchError};
use anyhow::Context;
use async_trait::async_trait;
use rand::Rng;
use rust_decimal::Decimal;
use std::time::Duration;
use tracing::{debug, info, warn};
use wreq::Client;

const FINDING_ENDPOINT: &str = "https://svcs.ebay.com/services/search/FindingService/v1";
const SERVICE_VERSION: &str = "1.13.0";

/// One auction search: keywords, ceiling and the site whose sellers are searched.
///
/// Listing type (auction), seller location (the site's country) and sort order
/// (soonest ending first) are fixed.
#[derive(Debug, Clone, PartialEq)]
pub struct FindRequest {
    pub keywords: String,
    pub max_price: Decimal,
    pub site: Site,
}

impl FindRequest {
    pub fn for_directive(directive: &SearchDirective, site: Site) -> Self {
        Self { keywords: directive.keywords().to_string(), max_price: directive.max_price(), site }
    }

    /// Query parameters in the order they are sent.
    pub fn query_params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("OPERATION-NAME", "findItemsAdvanced".to_string()),
            ("SERVICE-VERSION", SERVICE_VERSION.to_string()),
            ("RESPONSE-DATA-FORMAT", "JSON".to_string()),
            ("REST-PAYLOAD", String::new()),
            ("GLOBAL-ID", self.site.global_id().to_string()),
            ("keywords", self.keywords.clone()),
            ("itemFilter(0).name", "ListingType".to_string()),
            ("itemFilter(0).value", "Auction".to_string()),
            ("itemFilter(1).name", "LocatedIn".to_string()),
            ("itemFilter(1).value", self.site.located_in().to_string()),
            ("itemFilter(2).name", "MaxPrice".to_string()),
            ("itemFilter(2).value", self.max_price.to_string()),
            ("sortOrder", "EndTimeSoonest".to_string()),
        ]
    }
}

/// Trait for marketplace searches - enables mocking for tests.
#[async_trait]
pub trait EbaySearch: Send + Sync {
    /// Runs one search and returns its listings in marketplace order.
    async fn find_items(&self, request: &FindRequest) -> Result<SearchResults>;

    /// Returns the configured site.
    fn site(&self) -> Site;
}

/// Finding API client.
pub struct EbayClient {
    client: Client,
    site: Site,
    app_id: String,
    endpoint: String,
    delay_ms: u64,
    delay_jitter_ms: u64,
}

impl EbayClient {
    /// Creates a client from configuration. Fails when no application id is set.
    pub fn new(config: &Config) -> Result<Self> {
        let app_id = config
            .app_id
            .clone()
            .filter(|id| !id.trim().is_empty())
            .ok_or_else(|| WatchError::adapter("No eBay application id configured (EBAY_APP_ID)"))?;

        let client = Client::builder()
            .gzip(true)
            .brotli(true)
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| WatchError::adapter(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            site: config.site,
            app_id,
            endpoint: config.endpoint.clone().unwrap_or_else(|| FINDING_ENDPOINT.to_string()),
            delay_ms: config.delay_ms,
            delay_jitter_ms: config.delay_jitter_ms,
        })
    }

    fn url(&self, request: &FindRequest) -> String {
        let mut url = format!(
            "{}?SECURITY-APPNAME={}",
            self.endpoint,
            urlencoding::encode(&self.app_id)
        );
        for (key, value) in request.query_params() {
            url.push('&');
            url.push_str(&urlencoding::encode(key));
            url.push('=');
            url.push_str(&urlencoding::encode(&value));
        }
        url
    }

    async fn get(&self, url: &str) -> anyhow::Result<String> {
        self.delay().await;

        let response = self
            .client
            .get(url)
            .header("Accept", "application/json")
            .send()
            .await
            .context("Failed to send request")?;

        let status = response.status();
        debug!("Response status: {}", status);

        if status == 429 {
            warn!("Rate limited (429). The daily call allowance may be exhausted.");
            anyhow::bail!("Rate limited by eBay (status 429)");
        }

        if !status.is_success() {
            anyhow::bail!("Request failed with status: {}", status);
        }

        response.text().await.context("Failed to read response body")
    }

    /// Pauses between queries, with random jitter.
    async fn delay(&self) {
        if self.delay_ms == 0 && self.delay_jitter_ms == 0 {
            return;
        }

        let jitter = if self.delay_jitter_ms > 0 {
            rand::rng().random_range(0..=self.delay_jitter_ms)
        } else {
            0
        };

        let total_delay = self.delay_ms + jitter;
        debug!("Delaying {}ms", total_delay);
        tokio::time::sleep(Duration::from_millis(total_delay)).await;
    }
}

#[async_trait]
impl EbaySearch for EbayClient {
    async fn find_items(&self, request: &FindRequest) -> Result<SearchResults> {
        info!("Searching {}: \"{}\" under {}", self.site, request.keywords, request.max_price);
        debug!("GET {} (GLOBAL-ID {})", self.endpoint, self.site.global_id());

        let body = self
            .get(&self.url(request))
            .await
            .map_err(|e| WatchError::adapter(format!("{:#}", e)))?;

        let results = parse_find_response(&body, &request.keywords)?;
        debug!(
            "\"{}\": {} listings (reported count {})",
            request.keywords,
            results.count(),
            results.total_count
        );
        Ok(results)
    }

    fn site(&self) -> Site {
        self.site
    }
}
