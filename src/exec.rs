// Bounded shell execution
//
// Commands run under the platform shell with captured output and a hard
// timeout. The child is killed when the caller gives up on it.

use std::process::Stdio;
use std::time::Duration;
use thiserror::Error;
use tokio::process::Command;
use tokio::time::timeout;
use tracing::debug;

/// Upper bound for one shell command unless configured otherwise.
pub const DEFAULT_EXEC_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Error)]
pub enum ExecError {
    #[error("failed to launch shell: {0}")]
    Launch(std::io::Error),

    #[error("failed to capture command output: {0}")]
    Capture(std::io::Error),

    #[error("command timed out after {} seconds", .0.as_secs())]
    Timeout(Duration),
}

/// Captured result of a finished shell command.
///
/// A non-zero `returncode` is not an error at this layer; the caller
/// decides what exit codes mean.
#[derive(Debug, Clone, PartialEq)]
pub struct ShellOutput {
    pub stdout: String,
    pub stderr: String,
    /// Child exit code; -1 when the child was terminated by a signal
    pub returncode: i32,
}

/// Run `command` under the platform shell, bounded by `timeout_after`.
pub async fn run_shell(command: &str, timeout_after: Duration) -> Result<ShellOutput, ExecError> {
    debug!(command, timeout_secs = timeout_after.as_secs(), "running shell command");

    let child = shell_command(command)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()
        .map_err(ExecError::Launch)?;

    let output = timeout(timeout_after, child.wait_with_output())
        .await
        .map_err(|_| ExecError::Timeout(timeout_after))?
        .map_err(ExecError::Capture)?;

    Ok(ShellOutput {
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        returncode: output.status.code().unwrap_or(-1),
    })
}

#[cfg(target_family = "unix")]
fn shell_command(command: &str) -> Command {
    let mut cmd = Command::new("sh");
    cmd.arg("-c").arg(command);
    cmd
}

#[cfg(target_family = "windows")]
fn shell_command(command: &str) -> Command {
    let mut cmd = Command::new("cmd");
    cmd.arg("/C").arg(command);
    cmd
}
