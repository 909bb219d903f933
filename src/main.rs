use tokio::signal;
use tracing::{error, info};
use yieldscout::app::{App, Config};

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();

    let config = match Config::load_or_default("config.toml") {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load config: {e}");
            std::process::exit(1);
        }
    };

    config.logging.init();
    info!("yieldscout starting");

    tokio::select! {
        result = App::run(config) => {
            if let Err(e) = result {
                error!(error = %e, "Fatal error");
                std::process::exit(1);
            }
        }
        _ = signal::ctrl_c() => {
            info!("Shutdown signal received");
        }
    }

    info!("yieldscout stopped");
}
