// src/main.rs

use std::sync::Arc;

use anyhow::Context;
use tokio::sync::Mutex;

use confab::{config, logging, ui, App};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    config::initialize_config().context("failed to initialize configuration")?;
    let _logger = logging::init_logging().context("failed to start logging")?;

    let config = config::get_config();
    log::info!("starting confab against {}", config.endpoint);

    let app = Arc::new(Mutex::new(App::new(&config)));
    ui::run_ui(app)
        .await
        .context("terminal session ended with an error")?;

    Ok(())
}
