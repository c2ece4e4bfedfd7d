//! External toolchain abstraction
//!
//! The runner treats the compiler/runtime as an opaque, swappable dependency:
//! given a staged working directory, run a subcommand and report the exit plus
//! both output streams. Tests substitute scripted fakes for the real thing.

use std::path::Path;

use async_trait::async_trait;

pub use crate::toolchain::command::CommandToolchain;
use crate::types::ToolOutput;

mod command;

/// A toolchain that can initialize and build-and-run a staged working area.
///
/// Both methods run to completion and capture output; cancellation is the
/// caller's job (the runner wraps each call in its shared deadline, and
/// implementations must ensure a dropped future does not leave a process
/// behind).
#[async_trait]
pub trait Toolchain: Send + Sync {
    /// Prepare a buildable unit in `dir` (e.g. `go mod init playground`)
    async fn init_project(&self, dir: &Path) -> std::io::Result<ToolOutput>;

    /// Build and run the staged source in `dir` (e.g. `go run main.go`)
    async fn build_and_run(&self, dir: &Path) -> std::io::Result<ToolOutput>;
}
