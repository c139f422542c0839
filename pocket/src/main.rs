use anyhow::{Context, Result};

use pocket::logging::init_logging;
use pocket::settings::Settings;
use pocket::App;

#[tokio::main]
async fn main() -> Result<()> {
    let settings = Settings::new().context("failed to load settings")?;
    settings.validate()?;

    // Guard flushes the log file on exit
    let (log_path, _guard) = init_logging()?;
    tracing::info!("Logging to {}", log_path.display());

    App::new(settings).run().await?;

    Ok(())
}
