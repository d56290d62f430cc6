//! Start a recording session.

use std::path::PathBuf;
use std::time::Duration;

use xcast_capture_engine::{CaptureMode, CaptureSettings, OutputFormat, RecordingSession};
use xcast_common::config::AppConfig;
use xcast_platform_x11::{display, window};

pub struct RecordArgs {
    pub mode: String,
    pub screen: usize,
    pub window: Option<String>,
    pub area: Option<String>,
    pub format: String,
    pub filename: Option<String>,
    pub output: Option<PathBuf>,
    pub fps: Option<u32>,
    pub delay: u64,
    pub duration: u64,
    pub mic: bool,
    pub system_audio: bool,
    pub display: Option<String>,
}

pub async fn run(args: RecordArgs) -> anyhow::Result<()> {
    let config = AppConfig::load();

    let mode = match args.mode.as_str() {
        "screen" => CaptureMode::Screen,
        "window" => CaptureMode::Window,
        "area" => CaptureMode::Area,
        other => anyhow::bail!("Unknown capture mode '{other}' (expected screen, window, or area)"),
    };

    let format: OutputFormat = args.format.parse()?;

    // Screen mode picks its descriptor up front so the index error surfaces
    // before any delay elapses.
    let screen = if mode == CaptureMode::Screen {
        let screens = display::list_screens().await;
        let selected = screens.get(args.screen).cloned().ok_or_else(|| {
            anyhow::anyhow!(
                "Screen index {} out of range ({} screen(s) detected)",
                args.screen,
                screens.len()
            )
        })?;
        Some(selected)
    } else {
        None
    };

    // Area mode without an explicit rectangle falls back to an interactive
    // pick.
    let area = match (mode, args.area) {
        (CaptureMode::Area, None) => {
            println!("Select an area with the pointer...");
            let picked = window::select_area().await;
            if picked.is_empty() {
                anyhow::bail!("Area selection cancelled");
            }
            Some(picked)
        }
        (_, area) => area,
    };

    let filename = args.filename.unwrap_or_else(|| {
        format!(
            "recording-{}",
            chrono::Local::now().format("%Y%m%d-%H%M%S")
        )
    });

    let settings = CaptureSettings {
        mode,
        format,
        filename,
        output_dir: args.output.unwrap_or(config.recordings_dir),
        delay_secs: args.delay,
        duration_secs: args.duration,
        fps: args.fps.unwrap_or(config.recording.fps),
        display: args.display.unwrap_or(config.recording.display),
        screen,
        area,
        window_title: args.window,
        record_mic: args.mic || config.recording.record_mic,
        record_system: args.system_audio || config.recording.record_system,
    };

    let mut session = RecordingSession::new(settings);
    session.start().await?;

    if args.duration > 0 {
        println!("Recording for {}s (Ctrl+C to stop early)...", args.duration);
        tokio::select! {
            _ = tokio::time::sleep(Duration::from_secs(args.duration)) => {}
            _ = tokio::signal::ctrl_c() => {
                println!();
            }
        }
    } else {
        println!("Recording... press Ctrl+C to stop.");
        tokio::signal::ctrl_c().await?;
        println!();
    }

    session.stop(true).await?;
    println!(
        "Recording saved to: {}",
        session.settings().output_path().display()
    );

    Ok(())
}
