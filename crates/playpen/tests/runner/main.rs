//! Integration tests for the playpen runner
//!
//! Most tests drive the runner through a scripted fake toolchain, so no real
//! compiler is needed. Tests that require an installed Go toolchain are
//! feature-gated. Run them with:
//!    cargo test -p playpen --features toolchain-tests

use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use playpen::{Config, ToolOutput, Toolchain};

#[cfg(feature = "toolchain-tests")]
mod real_toolchain;

/// A scripted toolchain that records the directories it was invoked in.
///
/// `init` and `run` are templates for the outputs to report. When `echo_source`
/// is set, the run step instead reads the staged source file and reports it as
/// stdout, which lets tests observe exactly which working area a run saw.
pub struct FakeToolchain {
    pub init: ToolOutput,
    pub run: ToolOutput,
    pub run_delay: Option<Duration>,
    pub echo_source: bool,
    pub seen_dirs: Mutex<Vec<PathBuf>>,
}

impl FakeToolchain {
    pub fn succeeding(stdout: &str, stderr: &str) -> Self {
        Self {
            init: ok_exit(),
            run: ToolOutput {
                exit_code: Some(0),
                signal: None,
                stdout: stdout.as_bytes().to_vec(),
                stderr: stderr.as_bytes().to_vec(),
            },
            run_delay: None,
            echo_source: false,
            seen_dirs: Mutex::new(Vec::new()),
        }
    }

    pub fn failing_run(exit_code: i32, stderr: &str) -> Self {
        let mut fake = Self::succeeding("", "");
        fake.run = ToolOutput {
            exit_code: Some(exit_code),
            signal: None,
            stdout: Vec::new(),
            stderr: stderr.as_bytes().to_vec(),
        };
        fake
    }
}

#[async_trait]
impl Toolchain for FakeToolchain {
    async fn init_project(&self, dir: &Path) -> std::io::Result<ToolOutput> {
        self.seen_dirs.lock().unwrap().push(dir.to_path_buf());
        Ok(self.init.clone())
    }

    async fn build_and_run(&self, dir: &Path) -> std::io::Result<ToolOutput> {
        if let Some(delay) = self.run_delay {
            tokio::time::sleep(delay).await;
        }
        if self.echo_source {
            let source_name = &test_config().toolchain.source_name;
            let staged = tokio::fs::read(dir.join(source_name)).await?;
            return Ok(ToolOutput {
                exit_code: Some(0),
                signal: None,
                stdout: staged,
                stderr: Vec::new(),
            });
        }
        Ok(self.run.clone())
    }
}

pub fn ok_exit() -> ToolOutput {
    ToolOutput {
        exit_code: Some(0),
        signal: None,
        stdout: Vec::new(),
        stderr: Vec::new(),
    }
}

/// Default config with a short deadline so timeout tests stay fast.
pub fn test_config() -> Config {
    Config::parse_toml(
        r#"
timeout_secs = 0.5

[toolchain]
source_name = "main.go"
init = ["go", "mod", "init", "playground"]
run = ["go", "run", "main.go"]
"#,
    )
    .expect("test config should parse")
}
