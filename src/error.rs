//! Error taxonomy for the watch pipeline.

use thiserror::Error;

/// Errors raised by the directive parser, the marketplace adapter, row
/// formatting and report storage.
#[derive(Error, Debug)]
pub enum WatchError {
    /// A line of the search file is not `<price> <keywords>`.
    #[error("Malformed directive on line {line}: {reason}")]
    MalformedDirective { line: usize, reason: String },

    /// The marketplace request failed or its response could not be mapped.
    #[error("Search adapter failed: {0}")]
    AdapterFailure(String),

    /// A listing's fields could not be rendered into a report row.
    #[error("Cannot format listing \"{title}\": {reason}")]
    FormattingFailure { title: String, reason: String },

    /// Report artifact could not be read or written.
    #[error("Report storage error: {0}")]
    Io(#[from] std::io::Error),
}

impl WatchError {
    pub fn malformed(line: usize, reason: impl Into<String>) -> Self {
        Self::MalformedDirective { line, reason: reason.into() }
    }

    pub fn adapter(reason: impl Into<String>) -> Self {
        Self::AdapterFailure(reason.into())
    }

    pub fn formatting(title: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::FormattingFailure { title: title.into(), reason: reason.into() }
    }
}

pub type Result<T> = std::result::Result<T, WatchError>;
