// server/handler.rs

use crate::server::request::{ApiAction, ApiRequest};
use crate::server::{AppState, ApiResponse, ErrorBody};
use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use tracing::{info, warn};

/// Handles `POST /mietubl_api`, dispatching on `api_action`.
pub async fn handle_api(State(state): State<AppState>, request: ApiRequest) -> Json<ApiResponse> {
    let action = match ApiAction::try_from(request) {
        Ok(action) => action,
        Err(e) => {
            warn!("Rejected API request: {}", e);
            return Json(ApiResponse::Error(ErrorBody::new(e.to_string())));
        }
    };

    match action {
        ApiAction::Search { model, panel } => {
            info!("Handling search: model={:?} panel={:?}", model, panel);
            let result = state.search.search(&model, panel.as_deref(), None).await;
            Json(ApiResponse::Search(result))
        }
        ApiAction::Fetch { query } => {
            info!("Handling fetch: query={:?}", query);
            let result = state.search.fetch(query.as_deref()).await;
            Json(ApiResponse::Fetch(result))
        }
    }
}

pub async fn method_not_allowed() -> (StatusCode, Json<ErrorBody>) {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(ErrorBody::new("Method not allowed")),
    )
}
