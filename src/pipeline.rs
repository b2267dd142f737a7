//! One watch run: query every directive in order, keep what is under the
//! ceiling, and assemble the report.

use crate::cost::EvaluatedListing;
use crate::directive::SearchDirective;
use crate::ebay::{EbaySearch, FindRequest, Listing};
use crate::error::Result;
use crate::format::{Row, RowFormatter};
use crate::report::{assemble, Report, ReportSection, RunSummary};
use chrono::{DateTime, Local};
use std::time::Instant;
use tracing::{debug, info};

/// Source of the report's generation timestamp.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Local>;
}

/// Wall clock.
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// Always returns the same instant.
pub struct FixedClock(pub DateTime<Local>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Local> {
        self.0
    }
}

/// Evaluates listings in order and formats those under `directive`'s ceiling.
pub fn select_rows(
    directive: &SearchDirective,
    listings: Vec<Listing>,
    formatter: &RowFormatter,
) -> Result<Vec<Row>> {
    let mut rows = Vec::new();
    for listing in listings {
        let evaluated = EvaluatedListing::evaluate(listing);
        if let Some(row) = formatter.accept(&evaluated, directive.max_price())? {
            rows.push(row);
        }
    }
    Ok(rows)
}

/// Runs every directive sequentially. Any error aborts the run.
pub async fn run(
    client: &impl EbaySearch,
    directives: &[SearchDirective],
    formatter: &RowFormatter,
    clock: &impl Clock,
) -> Result<Report> {
    let start = Instant::now();
    let mut sections = Vec::with_capacity(directives.len());

    for directive in directives {
        let request = FindRequest::for_directive(directive, client.site());
        let results = client.find_items(&request).await?;
        let received = results.count();

        let rows = select_rows(directive, results.listings, formatter)?;
        debug!(
            "\"{}\": {} of {} listings under {}",
            directive.keywords(),
            rows.len(),
            received,
            directive.max_price()
        );

        sections.push(ReportSection::new(directive.clone(), rows));
    }

    let summary = RunSummary {
        directive_count: directives.len(),
        elapsed: start.elapsed(),
        generated_at: clock.now(),
    };
    info!(
        "Processed {} searches in {:.3}s",
        summary.directive_count,
        summary.elapsed.as_secs_f64()
    );

    Ok(assemble(&sections, summary, formatter.currency()))
}
