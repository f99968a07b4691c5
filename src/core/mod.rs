pub mod scaffolder;
pub mod templates;

pub use crate::domain::layout::ProjectLayout;
pub use crate::domain::model::{
    CommandStatus, Invocation, Module, Presence, ProjectName, ScaffoldReport, Step,
};
pub use crate::domain::ports::{CommandRunner, ToolLocator, Workspace};
pub use crate::utils::error::Result;
