//! HTML fragments for the report. All interpolated text is escaped.

use super::RunSummary;
use crate::format::Row;

pub const TABLE_OPEN: &str = "<table>";
pub const TABLE_CLOSE: &str = "</table>";

const TIMESTAMP_FORMAT: &str = "%A, %d. %B %Y %H:%M";

/// Escapes text for use in element content and quoted attribute values.
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

pub fn header(keywords: &str, ceiling: &str) -> String {
    format!(
        "<p class=\"search\">Search string: <b>&quot;{}&quot;</b> ------ Price: {}</p>",
        escape(keywords),
        escape(ceiling)
    )
}

pub fn row(row: &Row) -> String {
    let free = if row.free_shipping { "<span title=\"Free shipping\">f</span>" } else { "" };
    format!(
        "<tr>\
         <td align=\"right\" style=\"width:60px\">{}{}</td>\
         <td align=\"right\" style=\"width:120px\">{}</td>\
         <td align=\"right\" style=\"width:15px\">{}</td>\
         <td><a href=\"{}\" target=\"_blank\">{}</a></td>\
         </tr>",
        escape(&row.landed_cost),
        free,
        escape(&row.time_left),
        row.bid_count,
        escape(&row.url),
        escape(&row.title)
    )
}

pub fn summary(summary: &RunSummary) -> String {
    format!(
        "<p><small>Results generated for {} searches in {:.3} seconds. Last generated at {}</small></p>",
        summary.directive_count,
        summary.elapsed.as_secs_f64(),
        summary.generated_at.format(TIMESTAMP_FORMAT)
    )
}

/// Wraps a rendered body in a complete UTF-8 document.
pub fn document(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{}</title>\n</head>\n<body>\n{}</body>\n</html>\n",
        escape(title),
        body
    )
}
