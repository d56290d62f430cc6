//! Geometry resolution and ffmpeg argument synthesis.

use xcast_common::error::{XcastError, XcastResult};
use xcast_platform_x11::window;
use xcast_platform_x11::{DisplayBounds, Geometry};

use crate::settings::{CaptureMode, CaptureSettings, OutputFormat};

/// Resolve the capture rectangle for the selected mode.
///
/// `Screen` geometry is trusted as-is from discovery; `Window` and `Area`
/// rectangles are validated against the display bounds before launch.
pub async fn resolve_geometry(
    settings: &CaptureSettings,
    bounds: &DisplayBounds,
) -> XcastResult<Geometry> {
    match settings.mode {
        CaptureMode::Screen => {
            let screen = settings
                .screen
                .as_ref()
                .ok_or_else(|| XcastError::config("No screen selected for screen capture"))?;
            Ok(screen.geometry())
        }
        CaptureMode::Window => {
            let title = settings
                .window_title
                .as_deref()
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .ok_or_else(|| XcastError::config("No window title given for window capture"))?;

            let geometry = window::window_geometry(title).await.ok_or_else(|| {
                XcastError::discovery(format!("Could not locate geometry for window '{title}'"))
            })?;
            check_bounds(geometry, bounds)
        }
        CaptureMode::Area => {
            let area = settings
                .area
                .as_deref()
                .map(str::trim)
                .filter(|a| !a.is_empty())
                .ok_or_else(|| XcastError::config("No area given for area capture"))?;

            let geometry = Geometry::parse_area(area)?;
            check_bounds(geometry, bounds)
        }
    }
}

fn check_bounds(geometry: Geometry, bounds: &DisplayBounds) -> XcastResult<Geometry> {
    if !geometry.fits_within(bounds) {
        return Err(XcastError::OutOfBounds {
            x: geometry.x,
            y: geometry.y,
            width: geometry.width,
            height: geometry.height,
            max_width: bounds.width,
            max_height: bounds.height,
        });
    }
    Ok(geometry)
}

/// Build the ordered ffmpeg argument vector for a capture.
///
/// Pure construction; the caller spawns the process. `monitor_source` must
/// be supplied when system audio is requested.
///
/// Argument layout: overwrite flag and video input first, then audio inputs
/// in a fixed order (mic before system), then stream mapping, per-format
/// codec arguments, the optional duration cutoff, and finally the output
/// path.
pub fn build_capture_command(
    settings: &CaptureSettings,
    geometry: &Geometry,
    monitor_source: Option<&str>,
) -> XcastResult<Vec<String>> {
    let mut args = vec![
        "-y".to_string(),
        "-video_size".to_string(),
        geometry.size_arg(),
        "-framerate".to_string(),
        settings.fps.to_string(),
        "-f".to_string(),
        "x11grab".to_string(),
        "-i".to_string(),
        format!("{}+{}", settings.display, geometry.position_arg()),
    ];

    // Input stream 0 is video; audio inputs take 1..=2 in append order.
    let mut audio_streams: Vec<usize> = Vec::new();

    if settings.record_mic {
        args.extend(["-f", "pulse", "-i", "default"].map(String::from));
        audio_streams.push(audio_streams.len() + 1);
    }

    if settings.record_system {
        let source = monitor_source
            .ok_or_else(|| XcastError::discovery("No system audio (monitor) source found"))?;
        args.extend([
            "-f".to_string(),
            "pulse".to_string(),
            "-i".to_string(),
            source.to_string(),
        ]);
        audio_streams.push(audio_streams.len() + 1);
    }

    match audio_streams.as_slice() {
        [mic, system] => {
            args.push("-filter_complex".to_string());
            args.push(format!(
                "[{mic}:a][{system}:a]amix=inputs=2:duration=first[aout]"
            ));
            args.extend(["-map", "0:v", "-map", "[aout]"].map(String::from));
        }
        [single] => {
            args.extend([
                "-map".to_string(),
                "0:v".to_string(),
                "-map".to_string(),
                format!("{single}:a"),
            ]);
        }
        _ => {
            args.extend(["-map", "0:v"].map(String::from));
        }
    }

    if settings.format == OutputFormat::Mp4 {
        args.extend(["-c:v", "libx264", "-preset", "ultrafast"].map(String::from));
    }

    if settings.duration_secs > 0 {
        args.push("-t".to_string());
        args.push(settings.duration_secs.to_string());
    }

    args.push(settings.output_path().display().to_string());

    Ok(args)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::path::PathBuf;

    fn area_settings(area: &str) -> CaptureSettings {
        CaptureSettings {
            mode: CaptureMode::Area,
            area: Some(area.to_string()),
            filename: "capture".to_string(),
            output_dir: PathBuf::from("/tmp/out"),
            ..Default::default()
        }
    }

    fn bounds() -> DisplayBounds {
        DisplayBounds {
            width: 1920,
            height: 1080,
        }
    }

    fn arg_pair(args: &[String], flag: &str) -> Option<String> {
        args.iter()
            .position(|a| a == flag)
            .and_then(|idx| args.get(idx + 1))
            .cloned()
    }

    #[test]
    fn no_audio_maps_video_only() {
        let settings = area_settings("0,0 640x480");
        let geometry = Geometry::new(0, 0, 640, 480);
        let args = build_capture_command(&settings, &geometry, None).unwrap();

        assert!(!args.iter().any(|a| a == "pulse"));
        assert!(!args.iter().any(|a| a == "-filter_complex"));
        assert_eq!(arg_pair(&args, "-map"), Some("0:v".to_string()));
        assert_eq!(args.iter().filter(|a| *a == "-map").count(), 1);
    }

    #[test]
    fn both_audio_sources_are_mixed_once() {
        let mut settings = area_settings("0,0 640x480");
        settings.record_mic = true;
        settings.record_system = true;
        let geometry = Geometry::new(0, 0, 640, 480);
        let args = build_capture_command(&settings, &geometry, Some("monitor.source")).unwrap();

        let filters: Vec<&String> = args.iter().filter(|a| a.contains("amix")).collect();
        assert_eq!(filters.len(), 1);
        assert_eq!(
            filters[0],
            "[1:a][2:a]amix=inputs=2:duration=first[aout]"
        );

        let maps: Vec<&String> = args
            .iter()
            .enumerate()
            .filter(|(_, a)| *a == "-map")
            .map(|(idx, _)| &args[idx + 1])
            .collect();
        assert_eq!(maps, vec!["0:v", "[aout]"]);
    }

    #[test]
    fn single_audio_source_maps_its_stream_directly() {
        let mut settings = area_settings("0,0 640x480");
        settings.record_system = true;
        let geometry = Geometry::new(0, 0, 640, 480);
        let args = build_capture_command(&settings, &geometry, Some("monitor.source")).unwrap();

        assert!(!args.iter().any(|a| a.contains("amix")));
        assert_eq!(arg_pair(&args, "-i"), Some(":0.0+0,0".to_string()));
        assert!(args.windows(2).any(|w| w[0] == "-map" && w[1] == "1:a"));
        assert!(args.iter().any(|a| a == "monitor.source"));
    }

    #[test]
    fn system_audio_without_a_source_is_a_discovery_error() {
        let mut settings = area_settings("0,0 640x480");
        settings.record_system = true;
        let geometry = Geometry::new(0, 0, 640, 480);
        let err = build_capture_command(&settings, &geometry, None).unwrap_err();
        assert!(matches!(err, XcastError::Discovery { .. }));
    }

    #[test]
    fn mp4_selects_codec_and_preset() {
        let settings = area_settings("0,0 640x480");
        let geometry = Geometry::new(0, 0, 640, 480);
        let args = build_capture_command(&settings, &geometry, None).unwrap();

        assert_eq!(arg_pair(&args, "-c:v"), Some("libx264".to_string()));
        assert_eq!(arg_pair(&args, "-preset"), Some("ultrafast".to_string()));
    }

    #[test]
    fn webm_uses_encoder_defaults() {
        let mut settings = area_settings("0,0 640x480");
        settings.format = OutputFormat::Webm;
        let geometry = Geometry::new(0, 0, 640, 480);
        let args = build_capture_command(&settings, &geometry, None).unwrap();

        assert!(!args.iter().any(|a| a == "-c:v"));
        assert!(args.last().unwrap().ends_with("capture.webm"));
    }

    #[test]
    fn duration_cutoff_is_only_passed_when_set() {
        let mut settings = area_settings("0,0 640x480");
        let geometry = Geometry::new(0, 0, 640, 480);

        let args = build_capture_command(&settings, &geometry, None).unwrap();
        assert!(!args.iter().any(|a| a == "-t"));

        settings.duration_secs = 90;
        let args = build_capture_command(&settings, &geometry, None).unwrap();
        assert_eq!(arg_pair(&args, "-t"), Some("90".to_string()));
    }

    #[tokio::test]
    async fn manual_area_end_to_end() {
        let mut settings = area_settings("0,0 640x480");
        settings.fps = 30;

        let geometry = resolve_geometry(&settings, &bounds()).await.unwrap();
        let args = build_capture_command(&settings, &geometry, None).unwrap();

        assert_eq!(arg_pair(&args, "-video_size"), Some("640x480".to_string()));
        assert_eq!(arg_pair(&args, "-framerate"), Some("30".to_string()));
        assert!(!args.iter().any(|a| a == "-t"));
        assert_eq!(args.last().unwrap(), "/tmp/out/capture.mp4");
    }

    #[tokio::test]
    async fn screen_mode_trusts_the_descriptor() {
        let settings = CaptureSettings {
            mode: CaptureMode::Screen,
            screen: Some(xcast_platform_x11::ScreenInfo {
                name: "HDMI-1".to_string(),
                x: 1920,
                y: 0,
                width: 2560,
                height: 1440,
            }),
            ..Default::default()
        };

        // Well outside the 1920x1080 bounds; screen mode does not re-check.
        let geometry = resolve_geometry(&settings, &bounds()).await.unwrap();
        assert_eq!(geometry, Geometry::new(1920, 0, 2560, 1440));
    }

    #[tokio::test]
    async fn out_of_bounds_area_is_rejected() {
        let settings = area_settings("1000,0 1000x500");
        let err = resolve_geometry(&settings, &bounds()).await.unwrap_err();
        assert!(matches!(err, XcastError::OutOfBounds { .. }));
    }

    #[tokio::test]
    async fn malformed_area_is_a_config_error() {
        let settings = area_settings("100,100");
        let err = resolve_geometry(&settings, &bounds()).await.unwrap_err();
        assert!(matches!(err, XcastError::Config { .. }));
    }

    proptest! {
        #[test]
        fn bounds_check_accepts_exactly_the_contained_rectangles(
            x in 0i32..2000,
            y in 0i32..1200,
            width in 1u32..2000,
            height in 1u32..1200,
        ) {
            let geometry = Geometry::new(x, y, width, height);
            let result = check_bounds(geometry, &bounds());

            let contained =
                x as i64 + width as i64 <= 1920 && y as i64 + height as i64 <= 1080;
            if contained {
                prop_assert_eq!(result.unwrap(), geometry);
            } else {
                let is_out_of_bounds = matches!(result, Err(XcastError::OutOfBounds { .. }));
                prop_assert!(is_out_of_bounds);
            }
        }
    }
}
