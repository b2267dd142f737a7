//! Report assembly: per-directive sections plus a run summary, as renderable blocks.

pub mod html;

use crate::directive::SearchDirective;
use crate::format::{CurrencyFormat, Row};
use chrono::{DateTime, Local};
use std::time::Duration;

/// Accepted rows for one directive, in marketplace order.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportSection {
    pub directive: SearchDirective,
    pub rows: Vec<Row>,
}

impl ReportSection {
    pub fn new(directive: SearchDirective, rows: Vec<Row>) -> Self {
        Self { directive, rows }
    }
}

/// Run metadata shown at the foot of the report.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub directive_count: usize,
    pub elapsed: Duration,
    pub generated_at: DateTime<Local>,
}

/// One renderable unit of the report.
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Header { keywords: String, ceiling: String },
    TableOpen,
    Row(Row),
    TableClose,
    Summary(RunSummary),
}

impl Block {
    pub fn render(&self) -> String {
        match self {
            Block::Header { keywords, ceiling } => html::header(keywords, ceiling),
            Block::TableOpen => html::TABLE_OPEN.to_string(),
            Block::Row(row) => html::row(row),
            Block::TableClose => html::TABLE_CLOSE.to_string(),
            Block::Summary(summary) => html::summary(summary),
        }
    }
}

/// The assembled report.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    blocks: Vec<Block>,
}

impl Report {
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Rendered blocks, one per line.
    pub fn render_body(&self) -> String {
        let mut body = String::new();
        for block in &self.blocks {
            body.push_str(&block.render());
            body.push('\n');
        }
        body
    }

    /// Complete HTML document served at `/`.
    pub fn render_document(&self) -> String {
        html::document("eBay watch list", &self.render_body())
    }
}

/// Builds the report: a header and table for every section, including empty
/// ones, followed by the run summary.
pub fn assemble(
    sections: &[ReportSection],
    summary: RunSummary,
    currency: &CurrencyFormat,
) -> Report {
    let mut blocks = Vec::with_capacity(sections.iter().map(|s| s.rows.len() + 3).sum::<usize>() + 1);

    for section in sections {
        blocks.push(Block::Header {
            keywords: section.directive.keywords().to_string(),
            ceiling: currency.format_exact(section.directive.max_price()),
        });
        blocks.push(Block::TableOpen);
        blocks.extend(section.rows.iter().cloned().map(Block::Row));
        blocks.push(Block::TableClose);
    }

    blocks.push(Block::Summary(summary));
    Report { blocks }
}
