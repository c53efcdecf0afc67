pub mod handler;
pub mod request;

use crate::config::AppConfig;
use crate::model::{FetchResult, SearchResult};
use crate::search::CompatibilitySearch;
use axum::Router;
use axum::routing::post;
use serde::Serialize;
use std::path::Path;
use std::sync::Arc;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::info;

#[derive(Clone)]
pub struct AppState {
    pub search: Arc<CompatibilitySearch>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ErrorBody {
    pub success: bool,
    pub error: String,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self { success: false, error: error.into() }
    }
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum ApiResponse {
    Search(SearchResult),
    Fetch(FetchResult),
    Error(ErrorBody),
}

/// `/mietubl_api` plus, when configured, static files for everything else.
pub fn router(state: AppState, static_dir: Option<&Path>) -> Router {
    let api = post(handler::handle_api).fallback(handler::method_not_allowed);
    let mut app: Router = Router::new().route("/mietubl_api", api).with_state(state);

    if let Some(dir) = static_dir {
        app = app.fallback_service(ServeDir::new(dir));
    }

    app.layer(TraceLayer::new_for_http())
}

pub async fn start(config: &AppConfig, state: AppState) -> std::io::Result<()> {
    let app = router(state, config.static_dir.as_deref());
    let addr = config.bind_addr();

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Server running at http://{}", addr);
    axum::serve(listener, app).await
}
