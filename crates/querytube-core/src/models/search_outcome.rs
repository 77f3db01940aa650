use serde::{Deserialize, Serialize};

use super::RankedHit;

/// Result of a single search call.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    /// The query was blank. Nothing was computed.
    EmptyQuery,
    /// The query was encoded but no corpus row could be ranked.
    NoResults,
    /// Hits in descending score order.
    Ranked(Vec<RankedHit>),
}

impl SearchOutcome {
    /// Hits for a ranked outcome, empty otherwise.
    pub fn hits(&self) -> &[RankedHit] {
        match self {
            SearchOutcome::Ranked(hits) => hits,
            _ => &[],
        }
    }

    pub fn status(&self) -> SearchStatus {
        match self {
            SearchOutcome::EmptyQuery => SearchStatus::AwaitingInput,
            SearchOutcome::NoResults => SearchStatus::NoResults,
            SearchOutcome::Ranked(_) => SearchStatus::Ranked,
        }
    }
}

/// Progress notifications emitted around the blocking part of a search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchPhase {
    /// Emitted once, before encoding and ranking start.
    Searching,
    /// Emitted once, after the computation finished or failed.
    Done,
}

/// Response status, as seen by a presenter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchStatus {
    AwaitingInput,
    NoResults,
    Ranked,
    Failed,
}

/// A search result with per-request errors captured instead of propagated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    pub query: String,
    pub status: SearchStatus,
    pub hits: Vec<RankedHit>,
    pub error: Option<String>,
}

impl SearchResponse {
    pub fn from_outcome(query: &str, outcome: SearchOutcome) -> Self {
        let status = outcome.status();
        let hits = match outcome {
            SearchOutcome::Ranked(hits) => hits,
            _ => Vec::new(),
        };
        Self {
            query: query.to_string(),
            status,
            hits,
            error: None,
        }
    }

    pub fn failed(query: &str, error: impl std::fmt::Display) -> Self {
        Self {
            query: query.to_string(),
            status: SearchStatus::Failed,
            hits: Vec::new(),
            error: Some(error.to_string()),
        }
    }
}
