//! List open windows.

use xcast_platform_x11::window;

pub async fn run() -> anyhow::Result<()> {
    let windows = window::list_windows().await;

    println!("Open windows: {}", windows.len());
    for title in &windows {
        println!("  {title}");
    }

    Ok(())
}
