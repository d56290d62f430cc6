//! Display enumeration and union bounds via `xrandr`.

use serde::{Deserialize, Serialize};
use xcast_common::error::{XcastError, XcastResult};

use crate::geometry::{DisplayBounds, Geometry};
use crate::tool::{run_tool, QUERY_TIMEOUT};

/// Information about a connected output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScreenInfo {
    /// Output name/identifier (e.g. `"eDP-1"`).
    pub name: String,

    /// Position in the virtual desktop (pixels).
    pub x: i32,
    pub y: i32,

    /// Resolution in pixels.
    pub width: u32,
    pub height: u32,
}

impl ScreenInfo {
    /// The rectangle this output occupies.
    pub fn geometry(&self) -> Geometry {
        Geometry::new(self.x, self.y, self.width, self.height)
    }

    /// Synthetic descriptor used when enumeration fails.
    fn fallback() -> Self {
        Self {
            name: "default".to_string(),
            x: 0,
            y: 0,
            width: 1920,
            height: 1080,
        }
    }
}

/// Enumerate connected outputs.
///
/// Produced fresh on each call (outputs can be hot-plugged). Never fails:
/// when `xrandr` is missing or its output is unparsable, a single synthetic
/// "default" 1920x1080 screen is returned so the caller can still attempt a
/// recording.
pub async fn list_screens() -> Vec<ScreenInfo> {
    match run_tool("xrandr", &["--query"], QUERY_TIMEOUT).await {
        Ok(output) => {
            let screens = parse_screens(&output);
            if screens.is_empty() {
                tracing::warn!("No connected outputs parsed from xrandr; using fallback screen");
                vec![ScreenInfo::fallback()]
            } else {
                screens
            }
        }
        Err(e) => {
            tracing::warn!(error = %e, "xrandr query failed; using fallback screen");
            vec![ScreenInfo::fallback()]
        }
    }
}

/// Determine the union rectangle spanning all outputs.
///
/// Unlike [`list_screens`] this does not fall back: bounds validate window
/// and area captures before launch, so an undeterminable layout is a hard
/// discovery error.
pub async fn screen_bounds() -> XcastResult<DisplayBounds> {
    let output = run_tool("xrandr", &["--query"], QUERY_TIMEOUT)
        .await
        .map_err(|e| XcastError::discovery(format!("Failed to determine screen bounds: {e}")))?;
    parse_bounds(&output)
}

fn parse_screens(output: &str) -> Vec<ScreenInfo> {
    let mut screens = Vec::new();

    for line in output.lines() {
        if !line.contains(" connected") {
            continue;
        }
        let mut parts = line.split_whitespace();
        let Some(name) = parts.next() else {
            continue;
        };
        for token in parts {
            if let Some((width, height, x, y)) = parse_geometry_token(token) {
                screens.push(ScreenInfo {
                    name: name.to_string(),
                    x,
                    y,
                    width,
                    height,
                });
                break;
            }
        }
    }

    screens
}

fn parse_bounds(output: &str) -> XcastResult<DisplayBounds> {
    let mut max_width: i64 = 0;
    let mut max_height: i64 = 0;

    for token in output.split_whitespace() {
        let Some((width, height, x, y)) = parse_geometry_token(token) else {
            continue;
        };
        max_width = max_width.max(x as i64 + width as i64);
        max_height = max_height.max(y as i64 + height as i64);
    }

    if max_width <= 0 || max_height <= 0 {
        return Err(XcastError::discovery(
            "Could not parse screen layout from xrandr",
        ));
    }

    Ok(DisplayBounds {
        width: max_width as u32,
        height: max_height as u32,
    })
}

/// Parse an xrandr `WxH+X+Y` geometry token.
fn parse_geometry_token(token: &str) -> Option<(u32, u32, i32, i32)> {
    let mut pieces = token.split('+');
    let size = pieces.next()?;
    let x = pieces.next()?.parse().ok()?;
    let y = pieces.next()?.parse().ok()?;
    if pieces.next().is_some() {
        return None;
    }

    let (w, h) = size.split_once('x')?;
    Some((w.parse().ok()?, h.parse().ok()?, x, y))
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_SCREEN_QUERY: &str = "\
Screen 0: minimum 320 x 200, current 4480 x 1440, maximum 16384 x 16384
eDP-1 connected primary 1920x1080+0+360 (normal left inverted right x axis y axis) 344mm x 194mm
   1920x1080     60.01*+  59.97
HDMI-1 connected 2560x1440+1920+0 (normal left inverted right x axis y axis) 597mm x 336mm
   2560x1440     59.95*+
DP-1 disconnected (normal left inverted right x axis y axis)
";

    #[test]
    fn parses_connected_outputs_with_geometry() {
        let screens = parse_screens(TWO_SCREEN_QUERY);
        assert_eq!(screens.len(), 2);

        assert_eq!(screens[0].name, "eDP-1");
        assert_eq!(
            screens[0].geometry(),
            Geometry::new(0, 360, 1920, 1080)
        );

        assert_eq!(screens[1].name, "HDMI-1");
        assert_eq!(
            screens[1].geometry(),
            Geometry::new(1920, 0, 2560, 1440)
        );
    }

    #[test]
    fn bounds_cover_every_geometry_token() {
        let bounds = parse_bounds(TWO_SCREEN_QUERY).unwrap();
        assert_eq!(bounds.width, 4480);
        assert_eq!(bounds.height, 1440);
    }

    #[test]
    fn bounds_fail_without_geometry_tokens() {
        let err = parse_bounds("HDMI-1 disconnected (normal left inverted)").unwrap_err();
        assert!(matches!(err, XcastError::Discovery { .. }));
    }

    #[test]
    fn disconnected_outputs_are_skipped() {
        let screens = parse_screens("DP-1 disconnected (normal left inverted right)\n");
        assert!(screens.is_empty());
    }

    #[test]
    fn geometry_token_requires_exactly_three_pieces() {
        assert!(parse_geometry_token("1920x1080+0").is_none());
        assert!(parse_geometry_token("1920x1080+0+0+0").is_none());
        assert!(parse_geometry_token("344mm").is_none());
        assert_eq!(
            parse_geometry_token("1920x1080+0+360"),
            Some((1920, 1080, 0, 360))
        );
    }
}
