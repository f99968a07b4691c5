pub mod toml_config;

#[cfg(feature = "cli")]
use clap::Parser;

#[cfg(feature = "cli")]
use crate::domain::model::DEFAULT_PROJECT_NAME;

#[derive(Debug, Clone)]
#[cfg_attr(feature = "cli", derive(Parser))]
#[cfg_attr(feature = "cli", command(name = "monolith-scaffold", version))]
#[cfg_attr(
    feature = "cli",
    command(about = "Scaffold a modular-monolith TypeScript project")
)]
pub struct CliConfig {
    /// Name of the project directory, package and deployment
    #[cfg_attr(feature = "cli", arg(default_value = DEFAULT_PROJECT_NAME))]
    pub project_name: String,

    /// Directory in which the project directory is created
    #[cfg_attr(feature = "cli", arg(long, default_value = "."))]
    pub base_dir: String,

    /// TOML file overriding toolchain, git and logging settings
    #[cfg_attr(feature = "cli", arg(long))]
    pub config: Option<String>,

    /// Append the run log to this file instead of the configured one
    #[cfg_attr(feature = "cli", arg(long))]
    pub log_file: Option<String>,

    #[cfg_attr(feature = "cli", arg(long, help = "Enable verbose output"))]
    pub verbose: bool,
}
