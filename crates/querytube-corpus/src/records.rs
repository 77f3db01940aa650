//! CSV record loading.

use std::path::Path;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use querytube_core::errors::{CorpusError, QueryTubeResult};
use querytube_core::CorpusRecord;
use serde::Deserialize;

/// Columns that must be present. `id` is accepted in place of `video_id`.
const ID_COLUMNS: [&str; 2] = ["video_id", "id"];
const TITLE_COLUMN: &str = "title";

/// One CSV row as written by the asset pipeline. Extra columns are ignored.
#[derive(Debug, Deserialize)]
struct RawRecord {
    #[serde(default, alias = "id")]
    video_id: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    published_date: String,
}

impl From<RawRecord> for CorpusRecord {
    fn from(raw: RawRecord) -> Self {
        CorpusRecord {
            published_date: parse_published_date(&raw.published_date),
            external_id: raw.video_id,
            title: raw.title,
            description: raw.description,
        }
    }
}

/// Read every record from a CSV file, in file order.
///
/// # Errors
/// `AssetMissing` if the file does not exist, `MalformedRecords` for
/// unreadable files, missing columns, or rows with the wrong field count.
pub fn read_records(path: &Path) -> QueryTubeResult<Vec<CorpusRecord>> {
    if !path.exists() {
        return Err(CorpusError::AssetMissing {
            path: path.display().to_string(),
        }
        .into());
    }

    let malformed = |reason: String| CorpusError::MalformedRecords {
        path: path.display().to_string(),
        reason,
    };

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .map_err(|e| malformed(e.to_string()))?;

    let headers = reader.headers().map_err(|e| malformed(e.to_string()))?.clone();
    let has = |name: &str| headers.iter().any(|h| h.trim() == name);
    if !ID_COLUMNS.iter().any(|c| has(c)) {
        return Err(malformed("missing column `video_id`".to_string()).into());
    }
    if !has(TITLE_COLUMN) {
        return Err(malformed(format!("missing column `{TITLE_COLUMN}`")).into());
    }

    let mut records = Vec::new();
    for row in reader.deserialize::<RawRecord>() {
        let raw = row.map_err(|e| malformed(e.to_string()))?;
        records.push(CorpusRecord::from(raw));
    }
    Ok(records)
}

/// Parse a publish date as written by common exporters.
///
/// Accepts RFC 3339 (`2019-07-04T15:00:00Z`), pandas' datetime form
/// (`2019-07-04 15:00:00+00:00`), a naive timestamp, or a bare date.
/// Blank, `N/A`, `nan` and anything unparseable yield `None`.
pub fn parse_published_date(raw: &str) -> Option<NaiveDate> {
    let s = raw.trim();
    if s.is_empty() || s.eq_ignore_ascii_case("n/a") || s.eq_ignore_ascii_case("nan") {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }
    if let Ok(dt) = DateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%:z") {
        return Some(dt.date_naive());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S") {
        return Some(dt.date());
    }
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(d);
    }
    s.get(..10)
        .and_then(|prefix| NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok())
}
