//! Platform tool detection

use std::process::Stdio;

use tokio::process::Command;

/// Check if a tool binary is available using `which`
pub async fn is_command_available(tool: &str) -> bool {
    Command::new("which")
        .arg(tool)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .await
        .map(|s| s.success())
        .unwrap_or(false)
}
