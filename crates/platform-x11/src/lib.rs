//! xcast X11 Platform Integration
//!
//! Shell-out discovery for everything the capture engine needs to know
//! about the desktop:
//! - **Displays:** output enumeration and union bounds via `xrandr`
//! - **Windows:** title listing and geometry lookup via `wmctrl`/`xwininfo`
//! - **Area selection:** interactive region picks via `slop`
//! - **Audio:** PulseAudio monitor-source resolution via `pactl`
//!
//! Every query is stateless and single-attempt, with an explicit timeout so
//! a hung tool cannot hang the caller. Advisory queries (screen list, window
//! list, area pick) degrade to safe fallbacks; load-bearing lookups (bounds,
//! a specific window's geometry) surface typed errors.

pub mod audio;
pub mod display;
pub mod geometry;
pub mod tools_check;
pub mod window;

mod tool;

pub use display::*;
pub use geometry::*;
