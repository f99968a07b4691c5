use crate::core::{CommandRunner, CommandStatus, Invocation};
use crate::utils::error::{Result, ScaffoldError};
use async_trait::async_trait;
use std::process::Stdio;
use tokio::process::Command;

/// Runs commands as child processes sharing this process's terminal.
#[derive(Debug, Clone, Default)]
pub struct SystemRunner;

impl SystemRunner {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl CommandRunner for SystemRunner {
    async fn run(&self, invocation: &Invocation) -> Result<CommandStatus> {
        tracing::debug!(
            "Running `{}` in {}",
            invocation,
            invocation.cwd.display()
        );

        let status = Command::new(&invocation.program)
            .args(&invocation.args)
            .current_dir(&invocation.cwd)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .await
            .map_err(|e| ScaffoldError::SpawnError {
                command: invocation.command_line(),
                source: e,
            })?;

        Ok(CommandStatus::from(status))
    }
}
