//! eBay sites with their global ids, seller locations and currency formats.

use crate::format::{CurrencyFormat, Grouping};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Supported eBay sites.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Site {
    #[default]
    Uk,
    Us,
    De,
    Fr,
    It,
    Es,
    Ie,
    Au,
    Ca,
}

impl Site {
    /// Finding API global id, sent as `GLOBAL-ID`.
    pub fn global_id(&self) -> &'static str {
        match self {
            Site::Uk => "EBAY-GB",
            Site::Us => "EBAY-US",
            Site::De => "EBAY-DE",
            Site::Fr => "EBAY-FR",
            Site::It => "EBAY-IT",
            Site::Es => "EBAY-ES",
            Site::Ie => "EBAY-IE",
            Site::Au => "EBAY-AU",
            Site::Ca => "EBAY-ENCA",
        }
    }

    /// Country code for the `LocatedIn` item filter.
    pub fn located_in(&self) -> &'static str {
        match self {
            Site::Uk => "GB",
            Site::Us => "US",
            Site::De => "DE",
            Site::Fr => "FR",
            Site::It => "IT",
            Site::Es => "ES",
            Site::Ie => "IE",
            Site::Au => "AU",
            Site::Ca => "CA",
        }
    }

    /// Currency code prices are reported in.
    pub fn currency(&self) -> &'static str {
        match self {
            Site::Uk => "GBP",
            Site::Us => "USD",
            Site::De | Site::Fr | Site::It | Site::Es | Site::Ie => "EUR",
            Site::Au => "AUD",
            Site::Ca => "CAD",
        }
    }

    /// Returns whether this site uses comma as decimal separator.
    pub fn uses_comma_decimal(&self) -> bool {
        matches!(self, Site::De | Site::Fr | Site::It | Site::Es)
    }

    /// Default money display for this site.
    pub fn currency_format(&self) -> CurrencyFormat {
        if self.uses_comma_decimal() {
            CurrencyFormat::new(self.currency(), ',', Grouping::None)
        } else {
            CurrencyFormat::new(self.currency(), '.', Grouping::None)
        }
    }

    /// Returns all supported sites.
    pub fn all() -> &'static [Site] {
        &[Site::Uk, Site::Us, Site::De, Site::Fr, Site::It, Site::Es, Site::Ie, Site::Au, Site::Ca]
    }
}

impl fmt::Display for Site {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let code = match self {
            Site::Uk => "uk",
            Site::Us => "us",
            Site::De => "de",
            Site::Fr => "fr",
            Site::It => "it",
            Site::Es => "es",
            Site::Ie => "ie",
            Site::Au => "au",
            Site::Ca => "ca",
        };
        write!(f, "{}", code)
    }
}

impl FromStr for Site {
    type Err = SiteParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "uk" | "gb" | "ebay-gb" => Ok(Site::Uk),
            "us" | "ebay-us" => Ok(Site::Us),
            "de" | "ebay-de" => Ok(Site::De),
            "fr" | "ebay-fr" => Ok(Site::Fr),
            "it" | "ebay-it" => Ok(Site::It),
            "es" | "ebay-es" => Ok(Site::Es),
            "ie" | "ebay-ie" => Ok(Site::Ie),
            "au" | "ebay-au" => Ok(Site::Au),
            "ca" | "ebay-enca" => Ok(Site::Ca),
            _ => Err(SiteParseError(s.to_string())),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SiteParseError(String);

impl fmt::Display for SiteParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown site '{}'. Valid sites: uk, us, de, fr, it, es, ie, au, ca", self.0)
    }
}

impl std::error::Error for SiteParseError {}
