use crate::domain::model::{CommandStatus, Step};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScaffoldError {
    #[error("Required tool `{tool}` was not found on PATH")]
    MissingPrerequisite { tool: String },

    #[error("`{command}` failed with {status}")]
    CommandFailed {
        command: String,
        status: CommandStatus,
    },

    #[error("Failed to launch `{command}`: {source}")]
    SpawnError {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error on {path}: {source}")]
    PathError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field} ({value:?}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Step '{step}' failed: {source}")]
    StepFailed {
        step: Step,
        #[source]
        source: Box<ScaffoldError>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Prerequisite,
    Command,
    Filesystem,
    Configuration,
}

impl ScaffoldError {
    pub fn path(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ScaffoldError::PathError {
            path: path.into(),
            source,
        }
    }

    /// Attach the step that produced this error. Already-attributed errors are left alone.
    pub fn in_step(self, step: Step) -> Self {
        match self {
            ScaffoldError::StepFailed { .. } => self,
            other => ScaffoldError::StepFailed {
                step,
                source: Box::new(other),
            },
        }
    }

    pub fn step(&self) -> Option<Step> {
        match self {
            ScaffoldError::StepFailed { step, .. } => Some(*step),
            _ => None,
        }
    }

    /// The error without its step wrapper.
    pub fn root_cause(&self) -> &ScaffoldError {
        match self {
            ScaffoldError::StepFailed { source, .. } => source.root_cause(),
            other => other,
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self.root_cause() {
            ScaffoldError::MissingPrerequisite { .. } => ErrorCategory::Prerequisite,
            ScaffoldError::CommandFailed { .. } | ScaffoldError::SpawnError { .. } => {
                ErrorCategory::Command
            }
            ScaffoldError::ConfigError { .. } | ScaffoldError::InvalidConfigValueError { .. } => {
                ErrorCategory::Configuration
            }
            _ => ErrorCategory::Filesystem,
        }
    }

    /// The failing command's own exit code when it has one, 2 for bad configuration, 1 otherwise.
    pub fn exit_code(&self) -> i32 {
        match self.root_cause() {
            ScaffoldError::CommandFailed { status, .. } => {
                status.code().filter(|code| *code != 0).unwrap_or(1)
            }
            ScaffoldError::ConfigError { .. } | ScaffoldError::InvalidConfigValueError { .. } => 2,
            _ => 1,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        let detail = match self.root_cause() {
            ScaffoldError::MissingPrerequisite { tool } => {
                format!("`{}` is required but could not be found", tool)
            }
            ScaffoldError::CommandFailed { command, status } => {
                format!("command `{}` failed ({})", command, status)
            }
            ScaffoldError::SpawnError { command, .. } => {
                format!("command `{}` could not be started", command)
            }
            ScaffoldError::PathError { path, source } => {
                format!("could not access {}: {}", path.display(), source)
            }
            other => other.to_string(),
        };

        match self.step() {
            Some(step) => format!("Scaffolding stopped during {}: {}", step, detail),
            None => format!("Scaffolding stopped: {}", detail),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Prerequisite => "Install the missing tool and make sure it is on PATH",
            ErrorCategory::Command => {
                "Check the command output above; created files are kept, fix the cause and re-run"
            }
            ErrorCategory::Filesystem => "Check permissions and free space in the target directory",
            ErrorCategory::Configuration => "Fix the settings file and try again",
        }
    }
}

pub type Result<T> = std::result::Result<T, ScaffoldError>;
