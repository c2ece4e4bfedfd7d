//! Execution runner
//!
//! The core pipeline: stage submitted source into a working area, run the
//! toolchain's init subcommand, run its build-and-run subcommand under the
//! same wall-clock deadline, classify the outcome, and assemble the output.

use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tokio::time::Instant;
use tracing::{debug, instrument};

pub use crate::runner::output::STDERR_SEPARATOR;
use crate::runner::output::assemble;
use crate::runner::stage::WorkArea;

mod output;
mod stage;

use crate::config::Config;
use crate::toolchain::{CommandToolchain, Toolchain};
use crate::types::ToolOutput;

/// Errors that occur during a run
///
/// Every failure is recovered locally and surfaced as one of these variants;
/// none are fatal to the hosting service. No step is retried.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("failed to create working area: {0}")]
    Workspace(#[source] std::io::Error),

    #[error("failed to write source file: {0}")]
    WriteSource(#[source] std::io::Error),

    #[error("failed to initialize module: {0}")]
    Init(String),

    #[error("compilation error:\n{0}")]
    Compile(String),

    #[error("runtime error: {0}")]
    Runtime(String),

    #[error("execution timed out after {0:?}")]
    DeadlineExceeded(Duration),
}

impl RunError {
    /// Stable taxonomy name, for logging
    pub fn kind(&self) -> &'static str {
        match self {
            RunError::Workspace(_) | RunError::WriteSource(_) => "staging",
            RunError::Init(_) => "toolchain_init",
            RunError::Compile(_) => "compile",
            RunError::Runtime(_) => "runtime",
            RunError::DeadlineExceeded(_) => "deadline",
        }
    }
}

/// High-level runner for staged code execution
#[derive(Clone)]
pub struct Runner {
    config: Config,
    toolchain: Arc<dyn Toolchain>,
}

impl Runner {
    /// Create a runner backed by the configured subprocess toolchain
    pub fn new(config: Config) -> Self {
        let toolchain = Arc::new(CommandToolchain::new(&config.toolchain));
        Self { config, toolchain }
    }

    /// Create a runner with an injected toolchain implementation
    pub fn with_toolchain(config: Config, toolchain: Arc<dyn Toolchain>) -> Self {
        Self { config, toolchain }
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Stage `source`, initialize a buildable unit, build-and-run it, and
    /// return the trimmed combined output.
    ///
    /// The init and run steps share one absolute deadline. When it elapses the
    /// in-flight process is killed and [`RunError::DeadlineExceeded`] is
    /// returned. The working area is removed on every exit path.
    ///
    /// The runner holds no cross-request state; concurrent calls each get
    /// their own working area and never interfere.
    #[instrument(skip(self, source))]
    pub async fn run(&self, source: &str) -> Result<String, RunError> {
        let area = WorkArea::stage(source, &self.config.toolchain.source_name).await?;

        // One budget for both toolchain steps combined.
        let timeout = self.config.timeout();
        let deadline = Instant::now() + timeout;

        let init = self
            .bounded(deadline, self.toolchain.init_project(area.path()))
            .await?
            .map_err(|e| RunError::Init(e.to_string()))?;
        if !init.is_success() {
            debug!(exit = ?init.exit_code, "module initialization failed");
            return Err(RunError::Init(init.exit_description()));
        }

        let run = self
            .bounded(deadline, self.toolchain.build_and_run(area.path()))
            .await?
            .map_err(|e| RunError::Runtime(e.to_string()))?;

        let output = classify(run)?;

        debug!(len = output.len(), "run complete");
        Ok(output)
        // `area` dropped here: working area removed regardless of outcome
    }

    /// Await `fut` against the shared deadline.
    ///
    /// On expiry the future is dropped, which kills any subprocess it spawned
    /// (the toolchain contract requires kill-on-drop semantics).
    async fn bounded<T>(
        &self,
        deadline: Instant,
        fut: impl Future<Output = T>,
    ) -> Result<T, RunError> {
        tokio::time::timeout_at(deadline, fut)
            .await
            .map_err(|_| RunError::DeadlineExceeded(self.config.timeout()))
    }
}

/// Classify a build-and-run outcome and assemble output on success.
///
/// Non-empty stderr on a non-zero exit is presumed to be a build diagnostic.
/// The heuristic can misclassify a runtime panic that also prints to stderr;
/// that behavior is deliberate and matches what callers expect to see.
fn classify(run: ToolOutput) -> Result<String, RunError> {
    if !run.is_success() {
        if !run.stderr.is_empty() {
            return Err(RunError::Compile(run.stderr_text().into_owned()));
        }
        return Err(RunError::Runtime(run.exit_description()));
    }

    Ok(assemble(&run.stdout_text(), &run.stderr_text()))
}
