//! Positional record decoding, filtering, and normalization.
//!
//! Manifest records carry no field names; position within the array is the
//! only schema. [`decode_records`] validates that shape into typed
//! [`LibraryRecord`]s, dropping records outside the accepted type-code set,
//! and [`normalize`] turns a record into a catalog [`Document`].

use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use docshelf_shared::{Document, DocshelfError, Result};

// Field positions within a manifest record array.
const IDX_TITLE: usize = 0;
const IDX_ID: usize = 1;
const IDX_TYPE_CODE: usize = 2;
const IDX_DATE: usize = 3;
const IDX_HREF: usize = 9;

/// Top-level manifest shape. Only the `documents` array is relevant.
#[derive(Deserialize)]
struct Library {
    documents: Vec<Value>,
}

/// A typed view of one positional manifest record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibraryRecord {
    pub title: String,
    pub id: String,
    pub type_code: u32,
    /// Revision date, `YYYY-MM-DD`.
    pub date: String,
    /// Href relative to the library's navigation root.
    pub relative_href: String,
}

// ---------------------------------------------------------------------------
// Decoding
// ---------------------------------------------------------------------------

/// Decode manifest bytes into typed records, keeping only accepted type codes.
///
/// Entries that are not positional arrays are skipped silently. Everything
/// else decodes strictly: a malformed field in a kept record fails the whole
/// build, with the error naming the record index and field position. Output
/// order is input order restricted to kept records.
pub fn decode_records(bytes: &[u8], accepted_type_codes: &[u32]) -> Result<Vec<LibraryRecord>> {
    let library: Library = serde_json::from_slice(bytes)
        .map_err(|e| DocshelfError::parse(format!("malformed manifest: {e}")))?;

    let mut records = Vec::new();

    for (index, entry) in library.documents.iter().enumerate() {
        let Some(fields) = entry.as_array() else {
            debug!(index, "manifest entry is not a positional array, skipping");
            continue;
        };

        let type_code = field_u32(fields, IDX_TYPE_CODE, index)?;
        if !accepted_type_codes.contains(&type_code) {
            continue;
        }

        records.push(LibraryRecord {
            title: field_str(fields, IDX_TITLE, index)?.to_string(),
            id: field_str(fields, IDX_ID, index)?.to_string(),
            type_code,
            date: field_str(fields, IDX_DATE, index)?.to_string(),
            relative_href: field_str(fields, IDX_HREF, index)?.to_string(),
        });
    }

    Ok(records)
}

fn field_str<'a>(fields: &'a [Value], field: usize, record: usize) -> Result<&'a str> {
    fields.get(field).and_then(Value::as_str).ok_or_else(|| {
        DocshelfError::parse(format!("record {record}: expected string at field {field}"))
    })
}

fn field_u32(fields: &[Value], field: usize, record: usize) -> Result<u32> {
    fields
        .get(field)
        .and_then(Value::as_u64)
        .and_then(|n| u32::try_from(n).ok())
        .ok_or_else(|| {
            DocshelfError::parse(format!("record {record}: expected numeric code at field {field}"))
        })
}

// ---------------------------------------------------------------------------
// Normalization
// ---------------------------------------------------------------------------

/// Convert a manifest `YYYY-MM-DD` date to Unix epoch seconds at UTC midnight.
pub fn date_to_epoch(date: &str) -> Result<i64> {
    let mut parts = date.splitn(3, '-');
    let (Some(year), Some(month), Some(day)) = (parts.next(), parts.next(), parts.next()) else {
        return Err(DocshelfError::parse(format!(
            "invalid date {date:?}: expected YYYY-MM-DD"
        )));
    };

    let year: i32 = year
        .parse()
        .map_err(|e| DocshelfError::parse(format!("invalid year in {date:?}: {e}")))?;
    let month: u32 = month
        .parse()
        .map_err(|e| DocshelfError::parse(format!("invalid month in {date:?}: {e}")))?;
    let day: u32 = day
        .parse()
        .map_err(|e| DocshelfError::parse(format!("invalid day in {date:?}: {e}")))?;

    let calendar = chrono::NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| DocshelfError::parse(format!("invalid calendar date {date:?}")))?;

    Ok(calendar.and_time(chrono::NaiveTime::MIN).and_utc().timestamp())
}

/// Build the absolute document URL from the configured base and a manifest
/// href. Leading parent-directory segments are dropped; manifest hrefs are
/// relative to the navigation root, not to each other.
pub fn canonical_url(base_url: &str, relative_href: &str) -> String {
    let mut href = relative_href;
    while let Some(rest) = href.strip_prefix("../") {
        href = rest;
    }
    format!("{base_url}{href}")
}

/// Normalize a decoded record into a catalog document.
///
/// `pdf_url` is left empty; scraping it requires I/O and happens in the
/// pipeline. `current` starts at the unprocessed sentinel 0.
pub fn normalize(record: &LibraryRecord, base_url: &str) -> Result<Document> {
    Ok(Document {
        title: record.title.clone(),
        id: record.id.clone(),
        latest: date_to_epoch(&record.date)?,
        current: 0,
        url: canonical_url(base_url, &record.relative_href),
        pdf_url: String::new(),
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
