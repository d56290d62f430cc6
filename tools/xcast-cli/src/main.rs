//! xcast CLI — record an X11 screen, window, or region to video.
//!
//! Usage:
//!   xcast record [OPTIONS]    Start a recording
//!   xcast screens             List connected screens
//!   xcast windows             List open windows
//!   xcast pick-area           Interactively select a capture area
//!   xcast check               Check external tool availability

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "xcast",
    about = "Record an X11 screen, window, or region to video via ffmpeg",
    version,
    author
)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start a recording
    Record {
        /// Capture mode: screen, window, or area
        #[arg(long, default_value = "screen")]
        mode: String,

        /// Zero-based screen index (screen mode)
        #[arg(long, default_value = "0")]
        screen: usize,

        /// Window title substring (window mode)
        #[arg(long)]
        window: Option<String>,

        /// Capture rectangle as "X,Y WxH" (area mode); omit for an
        /// interactive pick
        #[arg(long)]
        area: Option<String>,

        /// Output container format: mp4 or webm
        #[arg(long, default_value = "mp4")]
        format: String,

        /// Output file name without extension (default: timestamped)
        #[arg(short, long)]
        filename: Option<String>,

        /// Output directory
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Frames per second
        #[arg(long)]
        fps: Option<u32>,

        /// Seconds to wait before capture starts
        #[arg(long, default_value = "0")]
        delay: u64,

        /// Maximum recording length in seconds (0 = until stopped)
        #[arg(long, default_value = "0")]
        duration: u64,

        /// Record microphone audio
        #[arg(long)]
        mic: bool,

        /// Record system (loopback) audio
        #[arg(long)]
        system_audio: bool,

        /// X11 display to capture (e.g. ":0.0")
        #[arg(long)]
        display: Option<String>,
    },

    /// List connected screens
    Screens,

    /// List open windows
    Windows,

    /// Interactively select a capture area and print it
    PickArea,

    /// Check external tool availability
    Check,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    xcast_common::logging::init_logging(&xcast_common::config::LoggingConfig {
        level: log_level.to_string(),
        json: false,
        file: None,
    });

    match cli.command {
        Commands::Record {
            mode,
            screen,
            window,
            area,
            format,
            filename,
            output,
            fps,
            delay,
            duration,
            mic,
            system_audio,
            display,
        } => {
            commands::record::run(commands::record::RecordArgs {
                mode,
                screen,
                window,
                area,
                format,
                filename,
                output,
                fps,
                delay,
                duration,
                mic,
                system_audio,
                display,
            })
            .await
        }
        Commands::Screens => commands::screens::run().await,
        Commands::Windows => commands::windows::run().await,
        Commands::PickArea => commands::pick_area::run().await,
        Commands::Check => commands::check::run().await,
    }
}
