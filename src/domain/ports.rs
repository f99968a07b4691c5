use crate::domain::model::{CommandStatus, Invocation, Presence};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// Filesystem rooted at the project directory. Paths are relative to `root()`.
pub trait Workspace: Send + Sync {
    fn root(&self) -> &Path;

    /// Create the directory (and parents) unless it already exists.
    fn ensure_dir(&self, path: &Path)
        -> impl std::future::Future<Output = Result<Presence>> + Send;

    /// Create an empty file unless it already exists. Existing content is never touched.
    fn touch(&self, path: &Path) -> impl std::future::Future<Output = Result<Presence>> + Send;

    /// Write the file, replacing any previous content.
    fn write_file(
        &self,
        path: &Path,
        contents: &str,
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

/// Runs external commands to completion.
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Run the command and report its exit status. Only failure to launch is an error.
    async fn run(&self, invocation: &Invocation) -> Result<CommandStatus>;
}

/// Resolves executables on the search path.
pub trait ToolLocator: Send + Sync {
    fn locate(&self, tool: &str) -> Option<PathBuf>;
}
