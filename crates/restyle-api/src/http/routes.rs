//! HTTP route definitions.

use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

use crate::http::{monitoring, proxy};
use crate::state::AppState;

/// Build the router.
pub fn create_router(state: Arc<AppState>) -> Router {
    let proxy_routes = Router::new()
        .route(
            "/proxy",
            get(proxy::proxy_page).options(proxy::proxy_preflight),
        )
        .with_state(state.clone());

    let monitoring_routes = Router::new()
        .route("/health", get(monitoring::health_check))
        .with_state(state);

    // Liveness probe has no state dependency
    let liveness_route = Router::new().route("/livez", get(monitoring::liveness_probe));

    Router::new()
        .nest("/api", proxy_routes)
        .merge(monitoring_routes)
        .merge(liveness_route)
        .layer(TraceLayer::new_for_http())
}

#[cfg(test)]
#[path = "routes_tests.rs"]
mod tests;
