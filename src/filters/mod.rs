//! Acceptance rules for evaluated listings.

pub mod ceiling;

use crate::cost::EvaluatedListing;

pub use ceiling::CeilingFilter;

/// Trait for deciding whether a listing belongs in the report.
pub trait Filter: Send + Sync {
    /// Returns true if the listing passes the filter.
    fn matches(&self, listing: &EvaluatedListing) -> bool;

    /// Returns a description of this filter.
    fn description(&self) -> String;
}
