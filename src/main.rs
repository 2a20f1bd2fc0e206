use tracing::{debug, error};
use tracing_subscriber::EnvFilter;
use tryon_relay::config::AppConfig;
use tryon_relay::run;
use tryon_relay::state::AppState;

#[cfg(debug_assertions)]
use dotenv::dotenv;

#[tokio::main]
async fn main() {
    #[cfg(debug_assertions)]
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::from_env();
    debug!("config: {:?}", config);

    let state = match AppState::new(config) {
        Ok(state) => state,
        Err(e) => {
            error!("failed to create backend client: {}", e);
            return;
        }
    };

    if let Err(e) = run(state).await {
        error!("failed to start app: {}", e);
    }
}
