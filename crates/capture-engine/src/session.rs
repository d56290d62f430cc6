//! Recording session lifecycle.

use std::process::Stdio;
use std::time::Duration;

use tokio::process::{Child, Command};
use xcast_common::error::{XcastError, XcastResult};
use xcast_platform_x11::{audio, display};

use crate::command::{build_capture_command, resolve_geometry};
use crate::settings::CaptureSettings;

/// State of a recording session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No capture process running.
    Idle,
    /// Capture process running.
    Recording,
}

/// A recording session wrapping a single external capture process.
///
/// Owned by the caller; at most one child process per session, enforced by
/// the `Idle`/`Recording` state machine. Starting while already recording
/// fails with [`XcastError::AlreadyRecording`] — callers wanting replace
/// semantics stop the session first.
pub struct RecordingSession {
    settings: CaptureSettings,
    state: SessionState,
    child: Option<Child>,
}

impl RecordingSession {
    /// Create a new idle session with the given settings.
    pub fn new(settings: CaptureSettings) -> Self {
        Self {
            settings,
            state: SessionState::Idle,
            child: None,
        }
    }

    /// Current session state.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// The settings this session records with.
    pub fn settings(&self) -> &CaptureSettings {
        &self.settings
    }

    /// Start recording.
    ///
    /// Validates the settings, waits out the configured start delay
    /// (an async suspension, not a blocking sleep), resolves the capture
    /// geometry against the live display bounds, and spawns ffmpeg with
    /// inherited stdout/stderr for diagnostics. On any failure the session
    /// stays `Idle`.
    pub async fn start(&mut self) -> XcastResult<()> {
        if self.state != SessionState::Idle {
            return Err(XcastError::AlreadyRecording);
        }

        if self.settings.filename.trim().is_empty() {
            return Err(XcastError::config("Filename cannot be empty"));
        }
        std::fs::create_dir_all(&self.settings.output_dir)?;

        if self.settings.delay_secs > 0 {
            tracing::info!(secs = self.settings.delay_secs, "Delaying capture start");
            tokio::time::sleep(Duration::from_secs(self.settings.delay_secs)).await;
        }

        let bounds = display::screen_bounds().await?;
        tracing::info!(
            width = bounds.width,
            height = bounds.height,
            "Detected display bounds"
        );

        let geometry = resolve_geometry(&self.settings, &bounds).await?;

        // The monitor source is load-bearing only when system audio was
        // actually requested; don't touch pactl otherwise.
        let monitor_source = if self.settings.record_system {
            audio::default_monitor_source().await
        } else {
            None
        };

        let args = build_capture_command(&self.settings, &geometry, monitor_source.as_deref())?;
        tracing::debug!(args = ?args, "Launching capture process");

        let child = Command::new("ffmpeg")
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|e| {
                XcastError::process(format!(
                    "Failed to start ffmpeg (is it installed and on PATH?): {e}"
                ))
            })?;

        tracing::info!(
            pid = child.id(),
            output = %self.settings.output_path().display(),
            "Recording started"
        );

        self.child = Some(child);
        self.state = SessionState::Recording;
        Ok(())
    }

    /// Stop recording.
    ///
    /// No-op when idle. Sends SIGTERM so ffmpeg flushes and finalizes the
    /// container (SIGKILL would leave a truncated file); with `wait` the
    /// call returns only after the process has exited. The session always
    /// ends up `Idle` with the handle cleared, even if the process already
    /// exited on its own (e.g. after the duration cutoff).
    pub async fn stop(&mut self, wait: bool) -> XcastResult<()> {
        let Some(mut child) = self.child.take() else {
            self.state = SessionState::Idle;
            return Ok(());
        };

        if let Some(pid) = child.id() {
            tracing::info!(pid, "Stopping capture process");
            unsafe {
                libc::kill(pid as libc::pid_t, libc::SIGTERM);
            }
        }

        if wait {
            match child.wait().await {
                Ok(status) => tracing::info!(%status, "Capture process exited"),
                Err(e) => tracing::warn!(error = %e, "Failed to wait on capture process"),
            }
        }

        self.state = SessionState::Idle;
        Ok(())
    }

    /// Whether the capture process is still running (best effort).
    pub fn is_running(&mut self) -> bool {
        match self.child.as_mut() {
            Some(child) => matches!(child.try_wait(), Ok(None)),
            None => false,
        }
    }
}
