//! Manifest retrieval strategies.
//!
//! A build loads the manifest either over HTTP from the configured URL or
//! from a file on disk. The two strategies are mutually exclusive for a
//! given build, which the enum encodes directly.

use std::path::PathBuf;
use std::time::Duration;

use reqwest::Client;
use tracing::{info, instrument};
use url::Url;

use docshelf_shared::{DocshelfError, Result};

/// Maximum number of redirects to follow when fetching the manifest.
const MAX_REDIRECTS: usize = 3;

/// User-Agent string for manifest requests.
const USER_AGENT: &str = concat!("Docshelf/", env!("CARGO_PKG_VERSION"));

/// Where the manifest bytes come from for a single build.
#[derive(Debug, Clone)]
pub enum ManifestSource {
    /// Fetch from the library's manifest endpoint.
    Remote { url: Url },
    /// Read a previously downloaded manifest from disk.
    Local { path: PathBuf },
}

impl ManifestSource {
    /// Load the raw manifest bytes.
    ///
    /// A non-200 response or transport failure on the remote path, or any
    /// read failure on the local path, is fatal to the build.
    #[instrument(skip_all)]
    pub async fn load(&self, client: &Client) -> Result<Vec<u8>> {
        match self {
            Self::Remote { url } => {
                info!(%url, "fetching manifest");

                let response = client
                    .get(url.as_str())
                    .send()
                    .await
                    .map_err(|e| DocshelfError::Network(format!("{url}: {e}")))?;

                let status = response.status();
                if status != reqwest::StatusCode::OK {
                    return Err(DocshelfError::Network(format!("{url}: HTTP {status}")));
                }

                let bytes = response
                    .bytes()
                    .await
                    .map_err(|e| DocshelfError::Network(format!("{url}: body read failed: {e}")))?;

                info!(len = bytes.len(), "manifest fetched");
                Ok(bytes.to_vec())
            }
            Self::Local { path } => {
                info!(path = %path.display(), "reading manifest from file");
                std::fs::read(path).map_err(|e| DocshelfError::io(path, e))
            }
        }
    }
}

/// Build a reqwest client with appropriate settings.
///
/// Without `timeout_secs` the client never times out; a hung fetch blocks
/// the build until the connection drops.
pub fn http_client(timeout_secs: Option<u64>) -> Result<Client> {
    let mut builder = Client::builder()
        .user_agent(USER_AGENT)
        .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS));

    if let Some(secs) = timeout_secs {
        builder = builder.timeout(Duration::from_secs(secs));
    }

    builder
        .build()
        .map_err(|e| DocshelfError::Network(format!("failed to build HTTP client: {e}")))
}
