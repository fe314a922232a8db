//! Shared runner for device control utilities

use std::process::Stdio;

use tokio::process::Command;

use crate::application::ports::DeviceError;

/// Run `program` with `args` and return its trimmed stdout.
///
/// A missing binary is reported as [`DeviceError::Unavailable`].
pub(super) async fn run_tool(program: &str, args: &[&str]) -> Result<String, DeviceError> {
    let output = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .output()
        .await
        .map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                DeviceError::Unavailable(format!("{} not found in PATH", program))
            } else {
                DeviceError::CommandFailed(format!("{}: {}", program, e))
            }
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(DeviceError::CommandFailed(format!(
            "{} exited with status {}: {}",
            program,
            output.status,
            stderr.trim()
        )));
    }

    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}

/// Non-empty trimmed lines
pub(super) fn lines(output: &str) -> Vec<String> {
    output
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect()
}
