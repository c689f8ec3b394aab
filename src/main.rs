use std::sync::Arc;

use log::info;

use cookmate::{server, App, AppConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = AppConfig::load()?;
    info!("Starting COOKMATE");

    // A missing credential is reported in the UI rather than aborting here
    let app = Arc::new(App::from_config(&config.provider));
    server::serve(app, &config.server.bind).await?;

    Ok(())
}
