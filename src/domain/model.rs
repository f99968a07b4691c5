use std::fmt;
use std::path::{Path, PathBuf};

pub const DEFAULT_PROJECT_NAME: &str = "modular-monolith";

/// Name of the generated project. Used verbatim in paths, manifests and templates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectName(String);

impl ProjectName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for ProjectName {
    fn default() -> Self {
        Self(DEFAULT_PROJECT_NAME.to_string())
    }
}

impl fmt::Display for ProjectName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The fixed modules of a modular monolith, in creation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Module {
    Authentication,
    Backend,
    Database,
    Deployment,
    Frontend,
}

impl Module {
    pub const ALL: [Module; 5] = [
        Module::Authentication,
        Module::Backend,
        Module::Database,
        Module::Deployment,
        Module::Frontend,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Module::Authentication => "authentication",
            Module::Backend => "backend",
            Module::Database => "database",
            Module::Deployment => "deployment",
            Module::Frontend => "frontend",
        }
    }

    /// Path of the module directory relative to the project root.
    pub fn dir(&self) -> PathBuf {
        Path::new("src").join("modules").join(self.as_str())
    }
}

impl fmt::Display for Module {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Steps of a scaffolding run, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Prerequisites,
    ModuleDirectories,
    AuxiliaryDirectories,
    GitInit,
    PlaceholderFiles,
    ManifestInit,
    DependencyInstall,
    CompilerConfig,
    Templates,
    Frontend,
    InitialCommit,
    BranchCreation,
}

impl Step {
    pub fn description(&self) -> &'static str {
        match self {
            Step::Prerequisites => "prerequisite check",
            Step::ModuleDirectories => "module directories",
            Step::AuxiliaryDirectories => "auxiliary directories",
            Step::GitInit => "git repository init",
            Step::PlaceholderFiles => "placeholder files",
            Step::ManifestInit => "package manifest init",
            Step::DependencyInstall => "dependency installation",
            Step::CompilerConfig => "compiler configuration",
            Step::Templates => "template emission",
            Step::Frontend => "frontend scaffolding",
            Step::InitialCommit => "initial commit",
            Step::BranchCreation => "branch creation",
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// Outcome of an idempotent filesystem operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    Created,
    AlreadyPresent,
}

/// Exit status of an external command. `code` is `None` when the process was killed by a signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandStatus {
    code: Option<i32>,
}

impl CommandStatus {
    pub const SUCCESS: CommandStatus = CommandStatus { code: Some(0) };

    pub fn from_code(code: i32) -> Self {
        Self { code: Some(code) }
    }

    pub fn signaled() -> Self {
        Self { code: None }
    }

    pub fn code(&self) -> Option<i32> {
        self.code
    }

    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

impl From<std::process::ExitStatus> for CommandStatus {
    fn from(status: std::process::ExitStatus) -> Self {
        Self {
            code: status.code(),
        }
    }
}

impl fmt::Display for CommandStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.code {
            Some(code) => write!(f, "exit code {}", code),
            None => f.write_str("termination by signal"),
        }
    }
}

/// An external command to run: program, arguments and working directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
    pub cwd: PathBuf,
}

impl Invocation {
    pub fn new(program: impl Into<String>, cwd: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: cwd.into(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn command_line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.command_line())
    }
}

/// Summary of a completed scaffolding run.
#[derive(Debug, Clone)]
pub struct ScaffoldReport {
    pub project_root: PathBuf,
    pub created: Vec<PathBuf>,
    pub already_present: Vec<PathBuf>,
    pub overwritten: Vec<PathBuf>,
    pub committed: bool,
    pub branch: String,
    pub started_at: chrono::DateTime<chrono::Utc>,
    pub finished_at: chrono::DateTime<chrono::Utc>,
}

impl ScaffoldReport {
    pub fn begin(project_root: &Path, branch: &str) -> Self {
        let now = chrono::Utc::now();
        Self {
            project_root: project_root.to_path_buf(),
            created: Vec::new(),
            already_present: Vec::new(),
            overwritten: Vec::new(),
            committed: false,
            branch: branch.to_string(),
            started_at: now,
            finished_at: now,
        }
    }

    pub fn record(&mut self, path: &Path, presence: Presence) {
        match presence {
            Presence::Created => self.created.push(path.to_path_buf()),
            Presence::AlreadyPresent => self.already_present.push(path.to_path_buf()),
        }
    }

    pub fn finish(&mut self) {
        self.finished_at = chrono::Utc::now();
    }

    pub fn elapsed(&self) -> chrono::Duration {
        self.finished_at - self.started_at
    }
}
