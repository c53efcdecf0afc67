// server/request.rs

use crate::model::ApiError;
use crate::search::MODEL_REQUIRED;
use crate::server::ErrorBody;
use axum::extract::{FromRequest, Request};
use axum::http::StatusCode;
use axum::http::header::CONTENT_TYPE;
use axum::response::{IntoResponse, Response};
use axum::{Form, Json};
use serde::Deserialize;

/// Body of `POST /mietubl_api`, either form-encoded or JSON.
#[derive(Debug, Default, Deserialize)]
pub struct ApiRequest {
    pub api_action: Option<String>,
    pub model: Option<String>,
    pub panel: Option<String>,
    pub query: Option<String>,
}

/// A validated request, ready for dispatch.
#[derive(Debug, PartialEq, Eq)]
pub enum ApiAction {
    Search { model: String, panel: Option<String> },
    Fetch { query: Option<String> },
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

impl TryFrom<ApiRequest> for ApiAction {
    type Error = ApiError;

    fn try_from(req: ApiRequest) -> Result<Self, Self::Error> {
        match req.api_action.as_deref() {
            Some("search") => {
                let model = non_empty(req.model).ok_or_else(|| ApiError::Validation(MODEL_REQUIRED.to_string()))?;
                Ok(ApiAction::Search { model, panel: non_empty(req.panel) })
            }
            Some("fetch") => Ok(ApiAction::Fetch { query: non_empty(req.query) }),
            _ => Err(ApiError::UnknownAction),
        }
    }
}

fn reject(status: StatusCode, message: String) -> Response {
    (status, Json(ErrorBody::new(message))).into_response()
}

#[axum::async_trait]
impl<S> FromRequest<S> for ApiRequest
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_json = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|ct| ct.starts_with("application/json"))
            .unwrap_or(false);

        if is_json {
            let Json(body) = Json::<ApiRequest>::from_request(req, state)
                .await
                .map_err(|e| reject(e.status(), e.body_text()))?;
            Ok(body)
        } else {
            let Form(body) = Form::<ApiRequest>::from_request(req, state)
                .await
                .map_err(|e| reject(e.status(), e.body_text()))?;
            Ok(body)
        }
    }
}
