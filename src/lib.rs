pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use crate::adapters::{LocalWorkspace, PathToolLocator, SystemRunner};
pub use crate::config::{toml_config::ScaffoldSettings, CliConfig};
pub use crate::core::{scaffolder::Scaffolder, ProjectLayout, ProjectName, ScaffoldReport};
pub use crate::utils::error::{Result, ScaffoldError};
