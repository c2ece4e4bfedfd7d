//! Subprocess-backed toolchain
//!
//! Spawns the configured argv vectors as child processes inside the working
//! area and captures their output.

use std::collections::HashMap;
use std::path::Path;
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, instrument};

use crate::config::ToolchainConfig;
use crate::toolchain::Toolchain;
use crate::types::ToolOutput;

/// Toolchain implementation that shells out to the configured commands.
#[derive(Debug, Clone)]
pub struct CommandToolchain {
    init: Vec<String>,
    run: Vec<String>,
    env: HashMap<String, String>,
}

impl CommandToolchain {
    /// Create a toolchain from its configuration
    pub fn new(config: &ToolchainConfig) -> Self {
        Self {
            init: config.init.clone(),
            run: config.run.clone(),
            env: config.env.clone(),
        }
    }

    async fn run_command(&self, argv: &[String], dir: &Path) -> std::io::Result<ToolOutput> {
        let (program, args) = argv.split_first().ok_or_else(|| {
            std::io::Error::new(std::io::ErrorKind::InvalidInput, "empty command arguments")
        })?;

        let mut command = Command::new(program);
        command
            .args(args)
            .current_dir(dir)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            // The runner enforces its deadline by dropping this future; the
            // child must die with it.
            .kill_on_drop(true);

        for (key, value) in &self.env {
            command.env(key, value);
        }

        debug!(?argv, dir = %dir.display(), "running toolchain command");

        let output = command.output().await?;

        Ok(ToolOutput {
            exit_code: output.status.code(),
            signal: signal_of(&output.status),
            stdout: output.stdout,
            stderr: output.stderr,
        })
    }
}

#[async_trait]
impl Toolchain for CommandToolchain {
    #[instrument(skip(self))]
    async fn init_project(&self, dir: &Path) -> std::io::Result<ToolOutput> {
        self.run_command(&self.init, dir).await
    }

    #[instrument(skip(self))]
    async fn build_and_run(&self, dir: &Path) -> std::io::Result<ToolOutput> {
        self.run_command(&self.run, dir).await
    }
}

#[cfg(unix)]
fn signal_of(status: &std::process::ExitStatus) -> Option<i32> {
    use std::os::unix::process::ExitStatusExt;
    status.signal()
}

#[cfg(not(unix))]
fn signal_of(_status: &std::process::ExitStatus) -> Option<i32> {
    None
}
