use std::borrow::Cow;

/// Outcome of a single toolchain subcommand.
///
/// This is the opaque contract between the runner and a [`Toolchain`]: a
/// process exit plus the two captured output streams. How the process was
/// produced (real subprocess, scripted fake) is invisible to the runner.
///
/// [`Toolchain`]: crate::toolchain::Toolchain
#[derive(Debug, Clone, Default)]
pub struct ToolOutput {
    /// Exit code if the process exited normally
    pub exit_code: Option<i32>,

    /// Signal number if the process was killed by a signal
    pub signal: Option<i32>,

    /// Captured standard output
    pub stdout: Vec<u8>,

    /// Captured standard error
    pub stderr: Vec<u8>,
}

impl ToolOutput {
    /// Check if the subcommand exited with code 0
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.exit_code == Some(0)
    }

    /// Standard output as text (lossy)
    pub fn stdout_text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.stdout)
    }

    /// Standard error as text (lossy)
    pub fn stderr_text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.stderr)
    }

    /// Human-readable description of how the process ended
    pub fn exit_description(&self) -> String {
        match (self.exit_code, self.signal) {
            (Some(code), _) => format!("exit status {code}"),
            (None, Some(sig)) => format!("terminated by signal {sig}"),
            (None, None) => "terminated without exit status".to_string(),
        }
    }
}
