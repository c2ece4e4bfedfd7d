//! Output assembly for successful runs
//!
//! On a zero exit, stderr content is still worth showing (warnings, log
//! lines), so it is appended to stdout behind a separator line. The combined
//! text is trimmed of leading and trailing whitespace; interior formatting is
//! preserved.

/// Separator line inserted between stdout and stderr on the success path.
pub const STDERR_SEPARATOR: &str = "--- stderr ---";

/// Combine captured stdout and stderr into the final output text.
///
/// The separator is only inserted when stdout is non-empty; a run that wrote
/// to stderr alone yields just the stderr text. An empty result is valid and
/// returned as the empty string.
pub fn assemble(stdout: &str, stderr: &str) -> String {
    let mut output = stdout.to_string();
    if !stderr.is_empty() {
        if !output.is_empty() {
            output.push('\n');
            output.push_str(STDERR_SEPARATOR);
            output.push('\n');
        }
        output.push_str(stderr);
    }
    output.trim().to_string()
}
