//! PulseAudio monitor-source discovery via `pactl`.

use crate::tool::{run_tool, QUERY_TIMEOUT};

/// Find the default system-audio loopback source.
///
/// Scans `pactl list sources` for the first monitor source whose state is
/// RUNNING or IDLE. Returns `None` when no such source exists or `pactl`
/// is unavailable; whether that is fatal depends on whether the caller
/// actually requested system audio.
pub async fn default_monitor_source() -> Option<String> {
    match run_tool("pactl", &["list", "sources"], QUERY_TIMEOUT).await {
        Ok(output) => parse_monitor_source(&output),
        Err(e) => {
            tracing::warn!(error = %e, "pactl query failed");
            None
        }
    }
}

fn parse_monitor_source(output: &str) -> Option<String> {
    for block in output.split("Source #") {
        if !block.contains("monitor") {
            continue;
        }
        if !block.contains("State: RUNNING") && !block.contains("State: IDLE") {
            continue;
        }
        for line in block.lines() {
            if let Some(name) = line.trim().strip_prefix("Name:") {
                return Some(name.trim().to_string());
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    const SOURCES: &str = "\
Source #0
	State: SUSPENDED
	Name: alsa_output.pci-0000_00_1f.3.analog-stereo.monitor
	Description: Monitor of Built-in Audio Analog Stereo

Source #1
	State: RUNNING
	Name: alsa_input.pci-0000_00_1f.3.analog-stereo
	Description: Built-in Audio Analog Stereo

Source #2
	State: IDLE
	Name: alsa_output.usb-dock.analog-stereo.monitor
	Description: Monitor of Dock Audio
";

    #[test]
    fn picks_the_first_running_or_idle_monitor() {
        assert_eq!(
            parse_monitor_source(SOURCES),
            Some("alsa_output.usb-dock.analog-stereo.monitor".to_string())
        );
    }

    #[test]
    fn suspended_monitors_are_skipped() {
        let only_suspended = "\
Source #0
	State: SUSPENDED
	Name: alsa_output.pci-0000_00_1f.3.analog-stereo.monitor
";
        assert_eq!(parse_monitor_source(only_suspended), None);
    }

    #[test]
    fn plain_inputs_are_not_monitors() {
        let mic_only = "\
Source #1
	State: RUNNING
	Name: alsa_input.pci-0000_00_1f.3.analog-stereo
";
        assert_eq!(parse_monitor_source(mic_only), None);
    }
}
