use mietubl_lookup::config::load_from_env;
use mietubl_lookup::scraper::VendorFetcher;
use mietubl_lookup::search::CompatibilitySearch;
use mietubl_lookup::server::{self, AppState};
use std::sync::Arc;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    // Initialize logging
    tracing_subscriber::fmt::init();

    // Set panic hook to log details about any panic
    std::panic::set_hook(Box::new(|panic_info| {
        error!("Panic occurred: {}", panic_info);
    }));

    let config = match load_from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("Config load error: {}", e);
            return;
        }
    };
    info!("Vendor endpoint: {} (timeout {}s)", config.vendor_url, config.timeout_seconds);

    let fetcher = match VendorFetcher::new(&config) {
        Ok(f) => Arc::new(f),
        Err(e) => {
            error!("Failed to build HTTP client: {}", e);
            return;
        }
    };

    let state = AppState {
        search: Arc::new(CompatibilitySearch::with_default_panel(
            fetcher,
            config.default_panel.clone(),
        )),
    };

    if let Err(e) = server::start(&config, state).await {
        error!("Server error: {}", e);
    }
}
