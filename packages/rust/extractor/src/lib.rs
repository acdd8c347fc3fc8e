//! PDF link extraction from document pages.
//!
//! Each library document page carries zero or more `meta` elements, one of
//! which may hold the direct PDF link in its `contents` attribute. The
//! extractor fetches the page and scans the parsed tree for that attribute.
//!
//! Extraction is strictly best-effort: a page that cannot be fetched or
//! carries no link yields an empty string, never a build failure.

use std::time::Duration;

use reqwest::Client;
use scraper::{Html, Selector};
use tracing::{debug, instrument};

use docshelf_shared::{DocshelfError, Result};

/// Attribute on `meta` elements that carries the PDF link.
const LINK_ATTR: &str = "contents";

/// User-Agent string for page requests.
const USER_AGENT: &str = concat!("Docshelf/", env!("CARGO_PKG_VERSION"));

/// Scrapes document pages for their PDF link.
///
/// Holds one HTTP client for the lifetime of a build, so page fetches reuse
/// pooled connections.
pub struct LinkExtractor {
    client: Client,
}

impl LinkExtractor {
    /// Create a new extractor. Without `timeout_secs` page requests never
    /// time out.
    pub fn new(timeout_secs: Option<u64>) -> Result<Self> {
        let mut builder = Client::builder()
            .user_agent(USER_AGENT)
            .redirect(reqwest::redirect::Policy::limited(5));

        if let Some(secs) = timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        let client = builder
            .build()
            .map_err(|e| DocshelfError::Network(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { client })
    }

    /// Fetch `url` and return the PDF link from its metadata, or an empty
    /// string when the page cannot be fetched or carries no link.
    ///
    /// The body is parsed whatever the response status; an error page simply
    /// has no matching element.
    #[instrument(skip(self))]
    pub async fn extract_link(&self, url: &str) -> String {
        let response = match self.client.get(url).send().await {
            Ok(response) => response,
            Err(e) => {
                debug!(%url, error = %e, "page fetch failed, no PDF link");
                return String::new();
            }
        };

        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                debug!(%url, error = %e, "page body read failed, no PDF link");
                return String::new();
            }
        };

        extract_from_html(&body).unwrap_or_default()
    }
}

/// Scan `meta` elements in document order for the link attribute.
///
/// When several elements carry the attribute, the last one in document order
/// wins.
pub fn extract_from_html(html: &str) -> Option<String> {
    let doc = Html::parse_document(html);
    let meta_sel = Selector::parse("meta").unwrap();

    doc.select(&meta_sel)
        .filter_map(|el| el.value().attr(LINK_ATTR))
        .last()
        .map(str::to_string)
}
