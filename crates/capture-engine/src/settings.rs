//! Recording settings supplied by the caller.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use xcast_common::error::{XcastError, XcastResult};
use xcast_platform_x11::ScreenInfo;

/// What region of the desktop to capture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CaptureMode {
    /// The entire selected screen.
    Screen,
    /// The region occupied by a window, matched by title substring.
    Window,
    /// A manually specified rectangle.
    Area,
}

/// Output container format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Mp4,
    Webm,
}

impl OutputFormat {
    /// File extension for this container.
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Mp4 => "mp4",
            OutputFormat::Webm => "webm",
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = XcastError;

    fn from_str(s: &str) -> XcastResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mp4" => Ok(OutputFormat::Mp4),
            "webm" => Ok(OutputFormat::Webm),
            other => Err(XcastError::config(format!(
                "Unknown output format '{other}' (expected mp4 or webm)"
            ))),
        }
    }
}

/// A validated recording request.
///
/// Constructed fresh per recording and immutable once handed to command
/// synthesis. Exactly one of `screen`, `window_title`, `area` is consulted,
/// selected by `mode`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaptureSettings {
    pub mode: CaptureMode,

    pub format: OutputFormat,

    /// Output file stem; the container extension is appended.
    pub filename: String,

    /// Directory the recording is written into (created if missing).
    pub output_dir: PathBuf,

    /// Seconds to wait before launching the capture process.
    pub delay_secs: u64,

    /// Hard recording cutoff in seconds; 0 = record until stopped.
    pub duration_secs: u64,

    /// Target frame rate.
    pub fps: u32,

    /// X11 display to capture from (e.g. `":0.0"`).
    pub display: String,

    /// Screen to capture in `Screen` mode.
    pub screen: Option<ScreenInfo>,

    /// `"X,Y WxH"` rectangle for `Area` mode.
    pub area: Option<String>,

    /// Title substring for `Window` mode.
    pub window_title: Option<String>,

    /// Capture microphone audio.
    pub record_mic: bool,

    /// Capture system (loopback) audio.
    pub record_system: bool,
}

impl CaptureSettings {
    /// Final output file path: `{output_dir}/{filename}.{ext}`.
    pub fn output_path(&self) -> PathBuf {
        self.output_dir
            .join(format!("{}.{}", self.filename, self.format.extension()))
    }
}

impl Default for CaptureSettings {
    fn default() -> Self {
        Self {
            mode: CaptureMode::Screen,
            format: OutputFormat::Mp4,
            filename: "recording".to_string(),
            output_dir: PathBuf::from("recordings"),
            delay_secs: 0,
            duration_secs: 0,
            fps: 25,
            display: ":0.0".to_string(),
            screen: None,
            area: None,
            window_title: None,
            record_mic: false,
            record_system: false,
        }
    }
}
