use anyhow::Context;
use pacman_lite::{app::App, config::GameConfig, logging};
use tracing::info;

/// The main entry point of the application.
///
/// Reads configuration from the environment, opens the window, then runs frames until the
/// player quits.
pub fn main() -> anyhow::Result<()> {
    logging::setup_logging();

    let config = GameConfig::load().context("Could not load configuration")?;
    let mut app = App::new(&config).context("Could not create app")?;

    info!(tick_interval = ?config.tick_interval(), seed = ?config.seed, "Starting game loop");
    while app.run().context("Frame failed")? {}

    info!("Exiting");
    Ok(())
}
