use crate::core::ToolLocator;
use std::path::PathBuf;

/// Looks tools up on `PATH`.
#[derive(Debug, Clone, Default)]
pub struct PathToolLocator;

impl PathToolLocator {
    pub fn new() -> Self {
        Self
    }
}

impl ToolLocator for PathToolLocator {
    fn locate(&self, tool: &str) -> Option<PathBuf> {
        which::which(tool).ok()
    }
}
