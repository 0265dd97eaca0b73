//! Proxy endpoint handlers.

use std::sync::Arc;

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use tracing::debug;

use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ProxyQuery {
    pub url: Option<String>,
}

/// `GET /api/proxy?url=...`
pub async fn proxy_page(
    State(state): State<Arc<AppState>>,
    query: Result<Query<ProxyQuery>, QueryRejection>,
) -> Response {
    let target = match query {
        Ok(Query(query)) => query.url,
        Err(rejection) => {
            debug!(error = %rejection, "Unreadable query string");
            None
        }
    };

    let outcome = state.proxy.handle(target.as_deref()).await;
    let status = StatusCode::from_u16(outcome.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let success = outcome.is_success();

    let mut response = (status, Json(outcome.page)).into_response();
    let headers = response.headers_mut();
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        state.allow_origin.clone(),
    );
    if success {
        headers.insert(header::CACHE_CONTROL, state.cache_control.clone());
    }
    response
}

/// `OPTIONS /api/proxy`
pub async fn proxy_preflight(State(state): State<Arc<AppState>>) -> Response {
    (
        StatusCode::OK,
        [
            (
                header::ACCESS_CONTROL_ALLOW_ORIGIN,
                state.allow_origin.clone(),
            ),
            (
                header::ACCESS_CONTROL_ALLOW_METHODS,
                HeaderValue::from_static("GET, OPTIONS"),
            ),
            (
                header::ACCESS_CONTROL_ALLOW_HEADERS,
                HeaderValue::from_static("*"),
            ),
        ],
    )
        .into_response()
}
