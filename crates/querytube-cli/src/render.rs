//! Plain-text and JSON rendering of search responses.

use chrono::NaiveDate;
use querytube_core::constants::DESCRIPTION_PREVIEW_CHARS;
use querytube_core::models::{SearchResponse, SearchStatus};
use querytube_core::RankedHit;

pub const UNTITLED: &str = "Untitled Video";
pub const NO_DESCRIPTION: &str = "No description available.";
pub const UNKNOWN_DATE: &str = "N/A";

pub const STATUS_SEARCHING: &str = "Searching...";
pub const STATUS_AWAITING_INPUT: &str = "Waiting for input...";
pub const STATUS_NO_RESULTS: &str = "No results found.";

/// One-line status shown after a request.
pub fn status_line(response: &SearchResponse) -> String {
    match response.status {
        SearchStatus::AwaitingInput => STATUS_AWAITING_INPUT.to_string(),
        SearchStatus::NoResults => STATUS_NO_RESULTS.to_string(),
        SearchStatus::Ranked => format!("Displaying Top {} Results.", response.hits.len()),
        SearchStatus::Failed => format!(
            "Search failed: {}",
            response.error.as_deref().unwrap_or("unknown error")
        ),
    }
}

pub fn format_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format("%b %d, %Y").to_string())
        .unwrap_or_else(|| UNKNOWN_DATE.to_string())
}

/// First [`DESCRIPTION_PREVIEW_CHARS`] characters, with `...` appended when
/// anything was cut.
pub fn truncate_description(description: &str) -> String {
    let description = description.trim();
    if description.is_empty() {
        return NO_DESCRIPTION.to_string();
    }
    match description.char_indices().nth(DESCRIPTION_PREVIEW_CHARS) {
        Some((cut, _)) => format!("{}...", &description[..cut]),
        None => description.to_string(),
    }
}

/// A result card.
pub fn render_hit(rank: usize, hit: &RankedHit) -> String {
    let record = &hit.record;
    let title = match record.title.trim() {
        "" => UNTITLED,
        t => t,
    };

    format!(
        "{rank}. {title}  (score {:.3})\n   Published: {}\n   {}\n   Watch: {}\n   Embed: {}\n",
        hit.score,
        format_date(record.published_date),
        truncate_description(&record.description),
        record.watch_url(),
        record.embed_url(),
    )
}

/// Full text rendering: heading, cards, then the status line.
pub fn render_text(response: &SearchResponse) -> String {
    let mut out = String::new();
    if !response.hits.is_empty() {
        out.push_str(&format!("Top results for \"{}\"\n\n", response.query));
        for (i, hit) in response.hits.iter().enumerate() {
            out.push_str(&render_hit(i + 1, hit));
            out.push('\n');
        }
    }
    out.push_str(&status_line(response));
    out.push('\n');
    out
}

pub fn render_json(response: &SearchResponse) -> serde_json::Result<String> {
    serde_json::to_string_pretty(response)
}
