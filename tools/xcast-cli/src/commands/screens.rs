//! List connected screens.

use xcast_platform_x11::display;

pub async fn run() -> anyhow::Result<()> {
    let screens = display::list_screens().await;

    println!("Connected screens: {}", screens.len());
    for (idx, screen) in screens.iter().enumerate() {
        println!(
            "  [{idx}] {} {}x{} at ({},{})",
            screen.name, screen.width, screen.height, screen.x, screen.y
        );
    }

    Ok(())
}
