//! PulseAudio / PipeWire device control via `pactl`

use async_trait::async_trait;

use crate::application::ports::{AudioDeviceControl, DeviceError};

use super::tool::{lines, run_tool};

const PROGRAM: &str = "pactl";

/// Switches the default sink with `pactl`
pub struct PactlDeviceControl;

impl PactlDeviceControl {
    pub fn new() -> Self {
        Self
    }
}

impl Default for PactlDeviceControl {
    fn default() -> Self {
        Self::new()
    }
}

/// Sink names from `pactl list short sinks` (second tab-separated column)
fn parse_short_sinks(output: &str) -> Vec<String> {
    lines(output)
        .iter()
        .filter_map(|line| line.split('\t').nth(1))
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty())
        .collect()
}

#[async_trait]
impl AudioDeviceControl for PactlDeviceControl {
    fn name(&self) -> String {
        PROGRAM.to_string()
    }

    async fn list_devices(&self) -> Result<Vec<String>, DeviceError> {
        let output = run_tool(PROGRAM, &["list", "short", "sinks"]).await?;
        Ok(parse_short_sinks(&output))
    }

    async fn current_device(&self) -> Result<String, DeviceError> {
        let sink = run_tool(PROGRAM, &["get-default-sink"]).await?;
        if sink.is_empty() {
            return Err(DeviceError::CommandFailed(
                "pactl reported no default sink".to_string(),
            ));
        }
        Ok(sink)
    }

    async fn set_device(&self, name: &str) -> Result<(), DeviceError> {
        if !self.list_devices().await?.iter().any(|d| d == name) {
            return Err(DeviceError::NotFound(name.to_string()));
        }
        run_tool(PROGRAM, &["set-default-sink", name]).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_short_sink_listing() {
        let output = "\
47\talsa_output.pci-0000_00_1f.3.analog-stereo\tPipeWire\ts32le 2ch 48000Hz\tSUSPENDED
52\tbluez_output.AA_BB_CC.1\tPipeWire\ts16le 2ch 48000Hz\tRUNNING
";
        assert_eq!(
            parse_short_sinks(output),
            vec![
                "alsa_output.pci-0000_00_1f.3.analog-stereo",
                "bluez_output.AA_BB_CC.1"
            ]
        );
    }

    #[test]
    fn ignores_malformed_lines() {
        assert!(parse_short_sinks("garbage\n\n").is_empty());
    }
}
