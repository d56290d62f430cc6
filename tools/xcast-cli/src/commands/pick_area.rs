//! Interactively select a capture area.

use xcast_platform_x11::window;

pub async fn run() -> anyhow::Result<()> {
    let picked = window::select_area().await;
    if picked.is_empty() {
        anyhow::bail!("Area selection cancelled");
    }

    // Printed in the exact form `record --area` accepts.
    println!("{picked}");
    Ok(())
}
