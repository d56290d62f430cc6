//! External query-tool invocation.

use std::process::Stdio;
use std::time::Duration;

use tokio::process::Command;
use xcast_common::error::{XcastError, XcastResult};

/// Timeout for non-interactive query tools.
pub(crate) const QUERY_TIMEOUT: Duration = Duration::from_secs(5);

/// Timeout for the interactive area picker, which waits on the user.
pub(crate) const PICK_TIMEOUT: Duration = Duration::from_secs(60);

/// Run an external tool and capture its stdout as UTF-8.
///
/// Fails if the tool cannot be spawned, exits non-zero, produces non-UTF-8
/// output, or does not finish within `timeout`. A timed-out child is killed
/// when the in-flight future is dropped (`kill_on_drop`).
pub(crate) async fn run_tool(
    program: &str,
    args: &[&str],
    timeout: Duration,
) -> XcastResult<String> {
    let child = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .kill_on_drop(true)
        .spawn()
        .map_err(|e| XcastError::discovery(format!("Failed to run {program}: {e}")))?;

    let output = match tokio::time::timeout(timeout, child.wait_with_output()).await {
        Ok(result) => {
            result.map_err(|e| XcastError::discovery(format!("Failed to wait on {program}: {e}")))?
        }
        Err(_) => {
            return Err(XcastError::discovery(format!(
                "{program} did not finish within {}s",
                timeout.as_secs()
            )));
        }
    };

    if !output.status.success() {
        return Err(XcastError::discovery(format!(
            "{program} exited with status {}",
            output.status
        )));
    }

    String::from_utf8(output.stdout)
        .map_err(|e| XcastError::discovery(format!("{program} produced invalid UTF-8: {e}")))
}

/// Check whether a binary resolves on PATH.
pub(crate) fn command_exists(binary: &str) -> bool {
    std::process::Command::new("sh")
        .arg("-c")
        .arg(format!("command -v {binary} >/dev/null 2>&1"))
        .status()
        .map(|status| status.success())
        .unwrap_or(false)
}
