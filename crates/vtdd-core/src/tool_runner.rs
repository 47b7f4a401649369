//! Blocking invocation of external command-line tools (`gh`, `git`).
//!
//! Each call is a single attempt that runs to completion: no retries, no
//! timeouts. Callers decide whether a failure is fatal.

use std::path::Path;
use std::process::{Command, Stdio};

use crate::error::{Result, VtddError};

/// Run `program args...` in `cwd` and return its trimmed stdout.
///
/// A program missing from PATH is `ToolNotFound`; a non-zero exit is
/// `ToolFailed` carrying the first 500 chars of stderr (or stdout).
pub fn run_tool(program: &str, args: &[&str], cwd: &Path) -> Result<String> {
    let exe = which::which(program).map_err(|_| VtddError::ToolNotFound(program.to_string()))?;

    tracing::debug!(program, ?args, cwd = %cwd.display(), "running external tool");

    let output = Command::new(exe)
        .args(args)
        .current_dir(cwd)
        .stdin(Stdio::null())
        .output()
        .map_err(|e| VtddError::ToolFailed {
            tool: program.to_string(),
            message: e.to_string(),
        })?;

    let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        let source = if stderr.trim().is_empty() { stdout.as_str() } else { stderr.trim() };
        let hint: String = source.chars().take(500).collect();
        let code = output
            .status
            .code()
            .map_or_else(|| "signal".to_string(), |c| c.to_string());
        return Err(VtddError::ToolFailed {
            tool: program.to_string(),
            message: format!("exit {code}: {hint}"),
        });
    }

    Ok(stdout)
}

/// `git checkout -b <branch>`.
pub fn create_branch(root: &Path, branch: &str) -> Result<()> {
    run_tool("git", &["checkout", "-b", branch], root)?;
    Ok(())
}
