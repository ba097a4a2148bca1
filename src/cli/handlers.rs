//! Command handlers. Each returns a process exit code.

use super::commands::ServeArgs;
use crate::config::PageliftConfig;
use crate::server::{self, AppState};
use tracing::error;

pub async fn handle_serve(args: &ServeArgs) -> i32 {
    let config = match PageliftConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Configuration error: {}", e);
            return 1;
        }
    };
    if let Err(e) = config.validate() {
        error!("Configuration error: {}", e);
        return 1;
    }

    let state = match AppState::from_config(&config) {
        Ok(state) => state,
        Err(e) => {
            error!("Failed to initialize services: {}", e);
            return 1;
        }
    };

    match server::serve(state, &args.bind).await {
        Ok(()) => 0,
        Err(e) => {
            error!("Server error: {}", e);
            1
        }
    }
}

pub async fn handle_check() -> i32 {
    let config = match PageliftConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            return 1;
        }
    };
    match config.validate() {
        Ok(()) => {
            println!("Configuration OK");
            println!("  environment:  {}", config.environment);
            println!("  store path:   {}", config.store_path.display());
            println!("  timeout:      {}s", config.request_timeout_secs);
            0
        }
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            1
        }
    }
}
