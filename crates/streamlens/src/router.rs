//! HTTP router configuration

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

use crate::api::{hosts, system, ws};
use crate::openapi::ApiDoc;
use crate::state::AppState;

/// Create the application router
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        // System endpoints
        .route("/health", get(system::health))
        // Host registry
        .route("/v1/hosts", get(hosts::list_hosts).post(hosts::register_host))
        .route(
            "/v1/hosts/{name}",
            get(hosts::get_host).delete(hosts::unregister_host),
        )
        // Catalog operations
        .route(
            "/v1/hosts/{name}/apps",
            get(hosts::get_cached_apps).delete(hosts::invalidate_catalog),
        )
        .route("/v1/hosts/{name}/refresh", post(hosts::refresh_catalog))
        .route("/v1/hosts/{name}/cancel", post(hosts::cancel_fetch))
        // Live events
        .route("/ws/events", get(ws::events_ws))
        // API docs
        .merge(Scalar::with_url("/docs", ApiDoc::openapi()))
        // State
        .with_state(state)
}
