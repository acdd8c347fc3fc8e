//! Build workspace lifecycle.
//!
//! A build runs inside a dedicated directory tree that must not exist
//! beforehand. On any fatal error the partially built tree is rolled back,
//! so a failed run leaves nothing behind. All I/O takes explicit paths;
//! the process working directory is never changed.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use docshelf_shared::{DocshelfError, Result};

/// Name of the metadata directory created inside the workspace.
pub const METADATA_DIR: &str = ".docshelf";

/// A created build workspace. Paths are absolute.
#[derive(Debug)]
pub struct Workspace {
    original_path: PathBuf,
    working_path: PathBuf,
    metadata_path: PathBuf,
}

impl Workspace {
    /// Create the workspace tree at `target`.
    ///
    /// Relative targets resolve against the current working directory.
    /// Creation is exclusive: an existing directory at the target is an
    /// [`DocshelfError::AlreadyExists`] error and nothing is created.
    pub fn create(target: &Path) -> Result<Self> {
        let original_path =
            std::env::current_dir().map_err(|e| DocshelfError::io(PathBuf::from("."), e))?;
        let working_path = resolve_target(&original_path, target);

        std::fs::create_dir(&working_path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::AlreadyExists {
                DocshelfError::AlreadyExists {
                    path: working_path.clone(),
                }
            } else {
                DocshelfError::io(&working_path, e)
            }
        })?;

        let metadata_path = working_path.join(METADATA_DIR);
        std::fs::create_dir(&metadata_path).map_err(|e| DocshelfError::io(&metadata_path, e))?;

        info!(path = %working_path.display(), "workspace created");

        Ok(Self {
            original_path,
            working_path,
            metadata_path,
        })
    }

    /// Directory the process was in when the workspace was created.
    pub fn original_path(&self) -> &Path {
        &self.original_path
    }

    /// Root of the created workspace tree.
    pub fn working_path(&self) -> &Path {
        &self.working_path
    }

    /// Metadata directory inside the workspace, where the catalog lives.
    pub fn metadata_path(&self) -> &Path {
        &self.metadata_path
    }

    /// Roll back a partially built workspace after a fatal error.
    ///
    /// Removal is a single attempt per directory, innermost first, and is
    /// not recursive: any file already written into the tree makes the
    /// rollback fail. Consumes the workspace; an aborted build cannot be
    /// resumed.
    pub fn rollback(self) -> Result<()> {
        debug!(path = %self.working_path.display(), "rolling back workspace");

        std::fs::remove_dir(&self.metadata_path)
            .map_err(|e| DocshelfError::io(&self.metadata_path, e))?;
        std::fs::remove_dir(&self.working_path)
            .map_err(|e| DocshelfError::io(&self.working_path, e))?;

        info!(path = %self.working_path.display(), "workspace rolled back");
        Ok(())
    }
}

/// Resolve the workspace target: absolute paths as given, relative paths
/// against the original directory.
fn resolve_target(original: &Path, target: &Path) -> PathBuf {
    if target.is_absolute() {
        target.to_path_buf()
    } else {
        original.join(target)
    }
}
