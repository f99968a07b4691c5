use crate::domain::model::{Module, ProjectName};
use std::path::{Path, PathBuf};

/// Shared, test, script and asset directories created next to the modules.
pub const AUXILIARY_DIRECTORIES: [&str; 6] = [
    "src/shared/utils",
    "src/shared/types",
    "tests/unit",
    "tests/integration",
    "scripts",
    "assets",
];

/// Empty files touched when absent.
pub const PLACEHOLDER_FILES: [&str; 8] = [
    "src/index.ts",
    "Dockerfile",
    "kubernetes-config.yaml",
    "package.json",
    "README.md",
    "src/modules/database/schema.sql",
    "src/modules/database/seed.sql",
    ".gitignore",
];

pub const TSCONFIG: &str = "tsconfig.json";
pub const SERVER_ENTRY: &str = "src/modules/backend/server.ts";
pub const ENV_FILE: &str = ".env";
pub const SAMPLE_ENV_FILE: &str = "sample.env";
pub const DOCKERFILE: &str = "Dockerfile";
pub const KUBERNETES_CONFIG: &str = "kubernetes-config.yaml";
pub const README: &str = "README.md";

/// Where a project lives on disk and which paths make it up.
/// All paths other than `root` are relative to the project root.
#[derive(Debug, Clone)]
pub struct ProjectLayout {
    name: ProjectName,
    root: PathBuf,
}

impl ProjectLayout {
    pub fn new(base_dir: impl AsRef<Path>, name: ProjectName) -> Self {
        let root = base_dir.as_ref().join(name.as_str());
        Self { name, root }
    }

    /// Layout for a project whose root directory is already known.
    pub fn at_root(root: impl Into<PathBuf>, name: ProjectName) -> Self {
        Self {
            name,
            root: root.into(),
        }
    }

    pub fn name(&self) -> &ProjectName {
        &self.name
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn module_directories(&self) -> Vec<PathBuf> {
        Module::ALL.iter().map(Module::dir).collect()
    }

    pub fn auxiliary_directories(&self) -> Vec<PathBuf> {
        AUXILIARY_DIRECTORIES.iter().map(PathBuf::from).collect()
    }

    pub fn placeholder_files(&self) -> Vec<PathBuf> {
        PLACEHOLDER_FILES.iter().map(PathBuf::from).collect()
    }

    /// Frontend module path as passed to the frontend generator.
    pub fn frontend_dir(&self) -> PathBuf {
        Module::Frontend.dir()
    }
}
