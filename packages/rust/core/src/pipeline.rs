//! End-to-end catalog build: workspace → manifest → documents → catalog file.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use tracing::{info, instrument, warn};

use docshelf_extractor::LinkExtractor;
use docshelf_manifest::{ManifestSource, decode_records, http_client, normalize};
use docshelf_shared::{AppConfig, Document, Result};

use crate::workspace::Workspace;
use crate::writer;

/// Configuration for a single catalog build run.
#[derive(Debug, Clone)]
pub struct BuildConfig {
    /// Directory tree to create for this build.
    pub target_path: PathBuf,
    /// Where the manifest bytes come from.
    pub source: ManifestSource,
    /// Library and fetch settings.
    pub app: AppConfig,
}

/// Result of a completed build.
#[derive(Debug)]
pub struct BuildResult {
    /// Root of the created workspace tree.
    pub workspace_path: PathBuf,
    /// Path of the written catalog file.
    pub catalog_path: PathBuf,
    /// Number of documents in the catalog.
    pub document_count: usize,
    /// Total elapsed time.
    pub elapsed: Duration,
}

/// Progress callback for reporting build status.
pub trait ProgressReporter: Send + Sync {
    /// Called when entering a new phase.
    fn phase(&self, name: &str);
    /// Called before each document page is fetched.
    fn document_fetched(&self, url: &str, current: usize, total: usize);
    /// Called when the build completes.
    fn done(&self, result: &BuildResult);
}

/// No-op progress reporter for headless/test usage.
pub struct SilentProgress;

impl ProgressReporter for SilentProgress {
    fn phase(&self, _name: &str) {}
    fn document_fetched(&self, _url: &str, _current: usize, _total: usize) {}
    fn done(&self, _result: &BuildResult) {}
}

/// Run the full catalog build.
///
/// The workspace is created first; any later failure rolls it back before
/// the error is returned, so a failed build leaves no directory behind. A
/// pre-existing target fails with `AlreadyExists` and triggers no rollback,
/// since nothing was created.
#[instrument(skip_all, fields(target = %config.target_path.display()))]
pub async fn build_catalog(
    config: &BuildConfig,
    progress: &dyn ProgressReporter,
) -> Result<BuildResult> {
    let start = Instant::now();

    progress.phase("Creating workspace");
    let workspace = Workspace::create(&config.target_path)?;

    match run_build(config, &workspace, progress).await {
        Ok((catalog_path, document_count)) => {
            let result = BuildResult {
                workspace_path: workspace.working_path().to_path_buf(),
                catalog_path,
                document_count,
                elapsed: start.elapsed(),
            };

            info!(
                documents = result.document_count,
                elapsed_ms = result.elapsed.as_millis(),
                "catalog build complete"
            );

            progress.done(&result);
            Ok(result)
        }
        Err(err) => {
            warn!(error = %err, "build failed, rolling back workspace");
            if let Err(cleanup) = workspace.rollback() {
                warn!(error = %cleanup, "workspace rollback failed");
            }
            Err(err)
        }
    }
}

/// The fallible stages between workspace creation and completion.
async fn run_build(
    config: &BuildConfig,
    workspace: &Workspace,
    progress: &dyn ProgressReporter,
) -> Result<(PathBuf, usize)> {
    progress.phase("Loading manifest");
    let client = http_client(config.app.fetch.timeout_secs)?;
    let bytes = config.source.load(&client).await?;

    progress.phase("Decoding manifest");
    let records = decode_records(&bytes, &config.app.library.accepted_type_codes)?;
    info!(records = records.len(), "manifest decoded");

    // One extractor (and one pooled client) across all page fetches, which
    // run strictly one at a time in manifest order.
    let extractor = LinkExtractor::new(config.app.fetch.timeout_secs)?;
    let total = records.len();
    let mut documents: Vec<Document> = Vec::with_capacity(total);

    for (i, record) in records.iter().enumerate() {
        let mut doc = normalize(record, &config.app.library.base_url)?;
        progress.document_fetched(&doc.url, i + 1, total);
        doc.pdf_url = extractor.extract_link(&doc.url).await;
        documents.push(doc);
    }

    progress.phase("Writing catalog");
    let catalog_path = writer::write_catalog(workspace.metadata_path(), &documents)?;

    Ok((catalog_path, documents.len()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use docshelf_shared::DocshelfError;
    use url::Url;

    fn temp_target() -> PathBuf {
        std::env::temp_dir().join(format!("ds-pipeline-test-{}", uuid::Uuid::now_v7()))
    }

    fn app_config(server_uri: &str) -> AppConfig {
        let mut app = AppConfig::default();
        app.library.base_url = format!("{server_uri}/navigation/");
        app
    }

    fn build_config(server_uri: &str, target: PathBuf) -> BuildConfig {
        let url = Url::parse(&format!("{server_uri}/navigation/library.json")).unwrap();
        BuildConfig {
            target_path: target,
            source: ManifestSource::Remote { url },
            app: app_config(server_uri),
        }
    }

    const MANIFEST: &str = r#"{
        "documents": [
            ["App Guide", "TP40007072", 3, "2014-06-02", 0, 0, 0, 0, 0, "../documentation/guide.html"],
            ["Sample Code", "TP40001234", 5, "2013-01-15", 0, 0, 0, 0, 0, "../samplecode/sample.html"],
            ["UIKit Reference", "TP40006821", 10, "2014-03-10", 0, 0, 0, 0, 0, "../documentation/uikit.html"]
        ]
    }"#;

    async fn mount_manifest(server: &wiremock::MockServer) {
        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .and(wiremock::matchers::path("/navigation/library.json"))
            .respond_with(wiremock::ResponseTemplate::new(200).set_body_string(MANIFEST))
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn build_writes_catalog_end_to_end() {
        let server = wiremock::MockServer::start().await;
        mount_manifest(&server).await;

        let guide = r#"<html><head><meta contents="guide.pdf"></head></html>"#;
        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .and(wiremock::matchers::path("/navigation/documentation/guide.html"))
            .respond_with(wiremock::ResponseTemplate::new(200).set_body_string(guide))
            .mount(&server)
            .await;
        // uikit.html is not mounted: its PDF link degrades to empty.

        let target = temp_target();
        let config = build_config(&server.uri(), target.clone());
        let result = build_catalog(&config, &SilentProgress).await.unwrap();

        assert_eq!(result.document_count, 2);
        assert!(result.catalog_path.exists());

        let documents = writer::read_catalog(target.join(".docshelf").as_path()).unwrap();
        assert_eq!(documents.len(), 2);

        // Manifest order restricted to accepted type codes.
        assert_eq!(documents[0].id, "TP40007072");
        assert_eq!(documents[1].id, "TP40006821");

        assert_eq!(documents[0].latest, 1_401_667_200);
        assert_eq!(documents[0].current, 0);
        assert_eq!(
            documents[0].url,
            format!("{}/navigation/documentation/guide.html", server.uri())
        );
        assert_eq!(documents[0].pdf_url, "guide.pdf");

        // The missing page still produced a document, with an empty link.
        assert!(documents[1].pdf_url.is_empty());

        let _ = std::fs::remove_dir_all(&target);
    }

    #[tokio::test]
    async fn manifest_failure_rolls_back_workspace() {
        let server = wiremock::MockServer::start().await;

        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .and(wiremock::matchers::path("/navigation/library.json"))
            .respond_with(wiremock::ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let target = temp_target();
        let config = build_config(&server.uri(), target.clone());
        let err = build_catalog(&config, &SilentProgress).await.unwrap_err();

        assert!(matches!(err, DocshelfError::Network(_)));
        assert!(!target.exists(), "workspace should have been rolled back");
    }

    #[tokio::test]
    async fn malformed_record_date_rolls_back_workspace() {
        let server = wiremock::MockServer::start().await;

        let manifest = r#"{
            "documents": [
                ["App Guide", "TP40007072", 3, "not-a-date", 0, 0, 0, 0, 0, "../doc.html"]
            ]
        }"#;
        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .and(wiremock::matchers::path("/navigation/library.json"))
            .respond_with(wiremock::ResponseTemplate::new(200).set_body_string(manifest))
            .mount(&server)
            .await;

        let target = temp_target();
        let config = build_config(&server.uri(), target.clone());
        let err = build_catalog(&config, &SilentProgress).await.unwrap_err();

        assert!(matches!(err, DocshelfError::Parse { .. }));
        assert!(!target.exists());
    }

    #[tokio::test]
    async fn existing_target_fails_without_touching_it() {
        let server = wiremock::MockServer::start().await;
        mount_manifest(&server).await;

        let target = temp_target();
        std::fs::create_dir_all(&target).unwrap();
        std::fs::write(target.join("keep.txt"), "precious").unwrap();

        let config = build_config(&server.uri(), target.clone());
        let err = build_catalog(&config, &SilentProgress).await.unwrap_err();

        assert!(matches!(err, DocshelfError::AlreadyExists { .. }));
        assert_eq!(
            std::fs::read_to_string(target.join("keep.txt")).unwrap(),
            "precious"
        );

        let _ = std::fs::remove_dir_all(&target);
    }

    #[tokio::test]
    async fn local_manifest_builds_catalog() {
        let server = wiremock::MockServer::start().await;

        let dir = temp_target();
        std::fs::create_dir_all(&dir).unwrap();
        let manifest_path = dir.join("library.json");
        std::fs::write(&manifest_path, MANIFEST).unwrap();

        let target = dir.join("shelf");
        let config = BuildConfig {
            target_path: target.clone(),
            source: ManifestSource::Local {
                path: manifest_path,
            },
            app: app_config(&server.uri()),
        };

        let result = build_catalog(&config, &SilentProgress).await.unwrap();
        assert_eq!(result.document_count, 2);

        let _ = std::fs::remove_dir_all(&dir);
    }
}
