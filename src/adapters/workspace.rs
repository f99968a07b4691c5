use crate::core::{Presence, Workspace};
use crate::utils::error::{Result, ScaffoldError};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Workspace backed by the local filesystem.
#[derive(Debug, Clone)]
pub struct LocalWorkspace {
    root: PathBuf,
}

impl LocalWorkspace {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn full_path(&self, path: &Path) -> PathBuf {
        self.root.join(path)
    }

    async fn ensure_parent(full_path: &Path) -> Result<()> {
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| ScaffoldError::path(parent, e))?;
        }
        Ok(())
    }
}

impl Workspace for LocalWorkspace {
    fn root(&self) -> &Path {
        &self.root
    }

    async fn ensure_dir(&self, path: &Path) -> Result<Presence> {
        let full_path = self.full_path(path);

        match fs::metadata(&full_path).await {
            Ok(metadata) if metadata.is_dir() => return Ok(Presence::AlreadyPresent),
            Ok(_) => {
                let source = std::io::Error::new(
                    ErrorKind::AlreadyExists,
                    "path exists and is not a directory",
                );
                return Err(ScaffoldError::path(full_path, source));
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => return Err(ScaffoldError::path(full_path, e)),
        }

        fs::create_dir_all(&full_path)
            .await
            .map_err(|e| ScaffoldError::path(&full_path, e))?;
        Ok(Presence::Created)
    }

    async fn touch(&self, path: &Path) -> Result<Presence> {
        let full_path = self.full_path(path);
        Self::ensure_parent(&full_path).await?;

        match fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&full_path)
            .await
        {
            Ok(_) => Ok(Presence::Created),
            Err(e) if e.kind() == ErrorKind::AlreadyExists => Ok(Presence::AlreadyPresent),
            Err(e) => Err(ScaffoldError::path(full_path, e)),
        }
    }

    async fn write_file(&self, path: &Path, contents: &str) -> Result<()> {
        let full_path = self.full_path(path);
        Self::ensure_parent(&full_path).await?;

        fs::write(&full_path, contents)
            .await
            .map_err(|e| ScaffoldError::path(full_path, e))
    }
}
