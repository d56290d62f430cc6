//! External tool availability checks and user guidance.
//!
//! xcast delegates all capture and discovery work to command-line tools;
//! this module reports which of them resolve on PATH so the CLI can tell
//! the user what to install before a recording fails halfway through.

use crate::tool::command_exists;

/// An external tool xcast may shell out to.
#[derive(Debug, Clone)]
pub struct ToolStatus {
    pub name: String,
    pub description: String,
    pub available: bool,
    pub required: bool,
    pub fix_instructions: Option<String>,
}

/// Check every external tool and report status.
pub fn check_tools() -> Vec<ToolStatus> {
    vec![
        check_tool(
            "ffmpeg",
            "Screen capture and encoding",
            true,
            "ffmpeg",
        ),
        check_tool(
            "xrandr",
            "Display enumeration and bounds",
            true,
            "x11-xserver-utils",
        ),
        check_tool("wmctrl", "Window listing and lookup", false, "wmctrl"),
        check_tool("xwininfo", "Window geometry queries", false, "x11-utils"),
        check_tool("slop", "Interactive area selection", false, "slop"),
        check_tool(
            "pactl",
            "System audio source discovery",
            false,
            "pulseaudio-utils",
        ),
    ]
}

fn check_tool(binary: &str, description: &str, required: bool, package: &str) -> ToolStatus {
    let available = command_exists(binary);

    ToolStatus {
        name: binary.to_string(),
        description: description.to_string(),
        available,
        required,
        fix_instructions: if available {
            None
        } else {
            Some(format!("Install {package}: sudo apt install {package}"))
        },
    }
}

/// Print a user-friendly tool report.
pub fn print_tool_report(tools: &[ToolStatus]) {
    println!("xcast External Tools:");
    println!("{}", "-".repeat(60));

    for tool in tools {
        let status = if tool.available {
            "[OK]"
        } else if tool.required {
            "[MISSING - REQUIRED]"
        } else {
            "[MISSING - OPTIONAL]"
        };

        println!("  {} {}: {}", status, tool.name, tool.description);

        if let Some(ref fix) = tool.fix_instructions {
            println!("    Fix: {fix}");
        }
    }
}
