//! Capture geometry model and parsing.

use serde::{Deserialize, Serialize};
use xcast_common::error::{XcastError, XcastResult};

/// A position + size rectangle describing what region of the desktop is
/// captured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Geometry {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

/// The union rectangle spanning all connected outputs, as maximum extents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayBounds {
    pub width: u32,
    pub height: u32,
}

impl Geometry {
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Parse an `"X,Y WxH"` area string (e.g. `"100,100 1280x720"`).
    pub fn parse_area(s: &str) -> XcastResult<Self> {
        let invalid = || {
            XcastError::config(format!(
                "Invalid area format '{s}'. Use 'X,Y WxH' (e.g. 100,100 1280x720)"
            ))
        };

        let mut tokens = s.split_whitespace();
        let pos = tokens.next().ok_or_else(invalid)?;
        let size = tokens.next().ok_or_else(invalid)?;
        if tokens.next().is_some() {
            return Err(invalid());
        }

        let (x, y) = pos.split_once(',').ok_or_else(invalid)?;
        let (w, h) = size.split_once('x').ok_or_else(invalid)?;

        Ok(Self {
            x: x.trim().parse().map_err(|_| invalid())?,
            y: y.trim().parse().map_err(|_| invalid())?,
            width: w.trim().parse().map_err(|_| invalid())?,
            height: h.trim().parse().map_err(|_| invalid())?,
        })
    }

    /// ffmpeg-style size token, e.g. `"1280x720"`.
    pub fn size_arg(&self) -> String {
        format!("{}x{}", self.width, self.height)
    }

    /// x11grab position token, e.g. `"100,100"`.
    pub fn position_arg(&self) -> String {
        format!("{},{}", self.x, self.y)
    }

    /// Whether the rectangle lies fully within `bounds`.
    pub fn fits_within(&self, bounds: &DisplayBounds) -> bool {
        self.x as i64 + self.width as i64 <= bounds.width as i64
            && self.y as i64 + self.height as i64 <= bounds.height as i64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_position_and_size() {
        let g = Geometry::parse_area("100,100 1280x720").unwrap();
        assert_eq!(g, Geometry::new(100, 100, 1280, 720));
    }

    #[test]
    fn missing_size_is_a_config_error() {
        let err = Geometry::parse_area("100,100").unwrap_err();
        assert!(matches!(err, XcastError::Config { .. }));
    }

    #[test]
    fn garbage_tokens_are_rejected() {
        assert!(Geometry::parse_area("").is_err());
        assert!(Geometry::parse_area("100x100 0,0").is_err());
        assert!(Geometry::parse_area("a,b cxd").is_err());
        assert!(Geometry::parse_area("0,0 640x480 extra").is_err());
    }

    #[test]
    fn bounds_check_is_inclusive_at_the_edge() {
        let bounds = DisplayBounds {
            width: 1920,
            height: 1080,
        };
        assert!(Geometry::new(0, 0, 1920, 1080).fits_within(&bounds));
        assert!(!Geometry::new(1, 0, 1920, 1080).fits_within(&bounds));
        assert!(!Geometry::new(0, 1, 1920, 1080).fits_within(&bounds));
    }
}
