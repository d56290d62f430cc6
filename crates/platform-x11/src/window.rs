//! Window listing, window geometry lookup, and interactive area selection.

use crate::geometry::Geometry;
use crate::tool::{run_tool, PICK_TIMEOUT, QUERY_TIMEOUT};

/// Sentinel title returned when the window list cannot be obtained.
pub const NO_WINDOWS_SENTINEL: &str = "no windows available";

/// List the titles of all managed windows.
///
/// Advisory: on any failure (`wmctrl` missing, timeout) the single
/// [`NO_WINDOWS_SENTINEL`] entry is returned instead of an error.
pub async fn list_windows() -> Vec<String> {
    match run_tool("wmctrl", &["-l"], QUERY_TIMEOUT).await {
        Ok(output) => {
            let windows = parse_window_titles(&output);
            if windows.is_empty() {
                vec![NO_WINDOWS_SENTINEL.to_string()]
            } else {
                windows
            }
        }
        Err(e) => {
            tracing::warn!(error = %e, "wmctrl query failed");
            vec![NO_WINDOWS_SENTINEL.to_string()]
        }
    }
}

/// Interactively select a rectangle with the pointer.
///
/// Returns the selection as an `"X,Y WxH"` string, or an empty string when
/// the pick is cancelled or `slop` is unavailable.
pub async fn select_area() -> String {
    match run_tool("slop", &["--format", "%x,%y %wx%h"], PICK_TIMEOUT).await {
        Ok(output) => output.trim().to_string(),
        Err(e) => {
            tracing::debug!(error = %e, "Area selection cancelled or failed");
            String::new()
        }
    }
}

/// Look up the absolute geometry of a window by case-insensitive title
/// substring.
///
/// Returns `None` when no window matches or its geometry cannot be parsed;
/// the recording path treats that as a hard error.
pub async fn window_geometry(title: &str) -> Option<Geometry> {
    let list = match run_tool("wmctrl", &["-l"], QUERY_TIMEOUT).await {
        Ok(list) => list,
        Err(e) => {
            tracing::warn!(error = %e, "wmctrl query failed");
            return None;
        }
    };

    let window_id = find_window_id(&list, title)?;

    let info = match run_tool("xwininfo", &["-id", &window_id], QUERY_TIMEOUT).await {
        Ok(info) => info,
        Err(e) => {
            tracing::warn!(error = %e, window_id, "xwininfo query failed");
            return None;
        }
    };

    parse_window_info(&info)
}

/// Extract window titles from `wmctrl -l` output.
///
/// Each line is `<id> <desktop> <host> <title...>`; the title is everything
/// after the third whitespace-delimited field. Lines without a title are
/// dropped.
fn parse_window_titles(output: &str) -> Vec<String> {
    output
        .lines()
        .filter_map(window_title_field)
        .map(str::to_string)
        .collect()
}

fn window_title_field(line: &str) -> Option<&str> {
    let mut rest = line.trim();
    for _ in 0..3 {
        let idx = rest.find(char::is_whitespace)?;
        rest = rest[idx..].trim_start();
    }
    if rest.is_empty() {
        None
    } else {
        Some(rest)
    }
}

fn find_window_id(list: &str, title: &str) -> Option<String> {
    let needle = title.to_lowercase();
    list.lines()
        .find(|line| line.to_lowercase().contains(&needle))
        .and_then(|line| line.split_whitespace().next())
        .map(str::to_string)
}

/// Parse the absolute position and size fields of `xwininfo` output.
fn parse_window_info(output: &str) -> Option<Geometry> {
    let mut x = None;
    let mut y = None;
    let mut width = None;
    let mut height = None;

    for line in output.lines() {
        let trimmed = line.trim();
        if trimmed.starts_with("Absolute upper-left X:") {
            x = field_value::<i32>(trimmed);
        } else if trimmed.starts_with("Absolute upper-left Y:") {
            y = field_value::<i32>(trimmed);
        } else if trimmed.starts_with("Width:") {
            width = field_value::<u32>(trimmed);
        } else if trimmed.starts_with("Height:") {
            height = field_value::<u32>(trimmed);
        }
    }

    Some(Geometry::new(x?, y?, width?, height?))
}

fn field_value<T: std::str::FromStr>(line: &str) -> Option<T> {
    line.split(':').nth(1)?.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    const WINDOW_LIST: &str = "\
0x03a00003  0 workstation Mozilla Firefox
0x04c00012  1 workstation Terminal — vim src/main.rs
0x05200007 -1 workstation xfce4-panel
";

    const WINDOW_INFO: &str = "\
xwininfo: Window id: 0x4c00012 \"Terminal\"

  Absolute upper-left X:  640
  Absolute upper-left Y:  128
  Relative upper-left X:  0
  Relative upper-left Y:  0
  Width: 1280
  Height: 720
  Depth: 24
  -geometry 1280x720+640+128
";

    #[test]
    fn titles_are_the_fourth_field_onward() {
        let titles = parse_window_titles(WINDOW_LIST);
        assert_eq!(
            titles,
            vec![
                "Mozilla Firefox",
                "Terminal — vim src/main.rs",
                "xfce4-panel"
            ]
        );
    }

    #[test]
    fn short_lines_are_dropped() {
        assert!(parse_window_titles("0x03a00003  0 workstation\n").is_empty());
    }

    #[test]
    fn window_id_matches_case_insensitively() {
        assert_eq!(
            find_window_id(WINDOW_LIST, "firefox"),
            Some("0x03a00003".to_string())
        );
        assert_eq!(find_window_id(WINDOW_LIST, "emacs"), None);
    }

    #[test]
    fn window_info_uses_absolute_fields() {
        let geometry = parse_window_info(WINDOW_INFO).unwrap();
        assert_eq!(geometry, Geometry::new(640, 128, 1280, 720));
    }

    #[test]
    fn incomplete_window_info_is_none() {
        assert!(parse_window_info("  Width: 1280\n  Height: 720\n").is_none());
    }
}
