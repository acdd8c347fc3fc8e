//! Core domain types for Docshelf catalogs.

use serde::{Deserialize, Serialize};

/// A normalized catalog entry derived from an accepted library record.
///
/// Serialized field names match the on-disk catalog format exactly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Display title.
    #[serde(rename = "Title")]
    pub title: String,
    /// Upstream identifier, taken verbatim from the manifest.
    #[serde(rename = "Id")]
    pub id: String,
    /// Upstream revision date as Unix epoch seconds (UTC midnight).
    #[serde(rename = "Latest")]
    pub latest: i64,
    /// Local revision marker. Stays 0 until the document is mirrored.
    #[serde(rename = "Current")]
    pub current: i64,
    /// Absolute URL of the document's landing page.
    #[serde(rename = "URL")]
    pub url: String,
    /// Direct PDF link scraped from the page metadata. Empty when absent.
    #[serde(rename = "PdfURL")]
    pub pdf_url: String,
}
