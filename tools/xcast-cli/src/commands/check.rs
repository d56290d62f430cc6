//! Check external tool availability and desktop readiness.

use xcast_platform_x11::{audio, display, tools_check};

pub async fn run() -> anyhow::Result<()> {
    println!("xcast System Check");
    println!("{}", "=".repeat(50));

    match std::env::var("DISPLAY") {
        Ok(value) => println!("[OK] X11 display: {value}"),
        Err(_) => println!("[WARN] DISPLAY is not set; capture will fail outside an X session"),
    }

    let tools = tools_check::check_tools();
    println!();
    tools_check::print_tool_report(&tools);

    println!();
    match display::screen_bounds().await {
        Ok(bounds) => println!("[OK] Display bounds: {}x{}", bounds.width, bounds.height),
        Err(e) => println!("[WARN] {e}"),
    }

    match audio::default_monitor_source().await {
        Some(source) => println!("[OK] System audio monitor source: {source}"),
        None => {
            println!("[WARN] No running/idle monitor source (system audio capture unavailable)")
        }
    }

    let all_required_ok = tools.iter().filter(|t| t.required).all(|t| t.available);

    println!();
    if all_required_ok {
        println!("All required tools are available. xcast is ready.");
    } else {
        println!("Some required tools are missing. See above for fixes.");
    }

    Ok(())
}
