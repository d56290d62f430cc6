//! xcast Capture Engine
//!
//! Translates a validated [`CaptureSettings`](settings::CaptureSettings)
//! into an ffmpeg invocation and manages the lifetime of the capture
//! process.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │              RecordingSession                │
//! │                                              │
//! │  settings ──► resolve_geometry ──► bounds    │
//! │      │              │            (xrandr)    │
//! │      ▼              ▼                        │
//! │  build_capture_command ──► ffmpeg argv       │
//! │      │                                       │
//! │      ▼                                       │
//! │  spawn ffmpeg ──► Idle ⇄ Recording           │
//! └──────────────────────────────────────────────┘
//! ```

pub mod command;
pub mod session;
pub mod settings;

pub use command::*;
pub use session::*;
pub use settings::*;
