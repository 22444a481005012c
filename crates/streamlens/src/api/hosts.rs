//! Host and catalog API endpoints

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};

use streamlens_api::requests::{AddHostRequest, ListHostsQuery};
use streamlens_api::responses::{
    AppEntryDto, CachedCatalogResponse, CancelResponse, HostListResponse, HostStatusResponse,
    SnapshotResponse,
};
use streamlens_catalog::InventorySnapshot;
use streamlens_core::{
    CancelHostFetch, FetchHostCatalog, GetCachedCatalog, GetHostStatus, HostCatalogStatus,
    HostConfig, CatalogPolicy, InvalidateCatalog, ListHosts, RegisterHost, UnregisterHost,
};

use crate::api::error::{catalog_error, registry_error, AppError};
use crate::state::AppState;

fn status_to_dto(status: HostCatalogStatus) -> HostStatusResponse {
    HostStatusResponse {
        name: status.name,
        display_name: status.display_name,
        state: status.state.to_string(),
        app_count: status.app_count,
        fetched_at: status.fetched_at.map(|dt| dt.to_rfc3339()),
        error: status.last_error.as_ref().map(|f| f.error.to_string()),
        consecutive_failures: status
            .last_error
            .map(|f| f.consecutive_failures)
            .unwrap_or(0),
        tags: status.tags,
    }
}

fn snapshot_to_dto(snapshot: &InventorySnapshot) -> SnapshotResponse {
    SnapshotResponse {
        host: snapshot.host.clone(),
        fetched_at: snapshot.fetched_at.to_rfc3339(),
        apps: snapshot
            .entries()
            .iter()
            .map(|e| AppEntryDto {
                id: e.id.clone(),
                title: e.title.clone(),
                running: e.running,
            })
            .collect(),
    }
}

/// List all registered hosts
#[utoipa::path(
    get,
    path = "/v1/hosts",
    params(("tags" = Option<String>, Query, description = "Comma-separated tag filter")),
    responses((status = 200, description = "Registered hosts", body = HostListResponse))
)]
pub async fn list_hosts(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListHostsQuery>,
) -> Result<impl IntoResponse, AppError> {
    let hosts = state
        .registry
        .ask(ListHosts)
        .await
        .map_err(|e| AppError::internal(format!("failed to list hosts: {e}")))?;

    // Apply tag filtering if specified
    let mut filtered = hosts;
    if let Some(tags_str) = &query.tags {
        let filter_tags: Vec<&str> = tags_str.split(',').collect();
        filtered.retain(|h| {
            filter_tags
                .iter()
                .all(|tag| h.tags.iter().any(|t| t == tag))
        });
    }

    let hosts: Vec<HostStatusResponse> = filtered.into_iter().map(status_to_dto).collect();

    Ok(Json(HostListResponse { hosts }))
}

/// Get status of a specific host
#[utoipa::path(
    get,
    path = "/v1/hosts/{name}",
    params(("name" = String, Path, description = "Host name")),
    responses(
        (status = 200, description = "Host status", body = HostStatusResponse),
        (status = 404, description = "Host not found")
    )
)]
pub async fn get_host(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let status = state
        .registry
        .ask(GetHostStatus { host: name })
        .await
        .map_err(registry_error)?;

    Ok(Json(status_to_dto(status)))
}

/// Register a new host
#[utoipa::path(
    post,
    path = "/v1/hosts",
    request_body = AddHostRequest,
    responses(
        (status = 201, description = "Host registered", body = HostStatusResponse),
        (status = 409, description = "Host already exists")
    )
)]
pub async fn register_host(
    State(state): State<Arc<AppState>>,
    Json(req): Json<AddHostRequest>,
) -> Result<impl IntoResponse, AppError> {
    let name = req.name.clone();
    let config = HostConfig {
        name: req.name,
        addr: req.addr,
        port: req.port.unwrap_or(streamlens_core::DEFAULT_CATALOG_PORT),
        display_name: req.display_name,
        tags: req.tags,
        policy: CatalogPolicy::default(),
    };

    state
        .registry
        .ask(RegisterHost { config })
        .await
        .map_err(registry_error)?;

    let status = state
        .registry
        .ask(GetHostStatus { host: name })
        .await
        .map_err(registry_error)?;

    Ok((StatusCode::CREATED, Json(status_to_dto(status))))
}

/// Unregister a host
#[utoipa::path(
    delete,
    path = "/v1/hosts/{name}",
    params(("name" = String, Path, description = "Host name")),
    responses(
        (status = 204, description = "Host removed"),
        (status = 404, description = "Host not found")
    )
)]
pub async fn unregister_host(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    state
        .registry
        .ask(UnregisterHost { host: name })
        .await
        .map_err(registry_error)?;

    Ok(StatusCode::NO_CONTENT)
}

/// Get the cached catalog snapshot, without any network call
#[utoipa::path(
    get,
    path = "/v1/hosts/{name}/apps",
    params(("name" = String, Path, description = "Host name")),
    responses(
        (status = 200, description = "Cached snapshot, null if nothing cached", body = CachedCatalogResponse),
        (status = 404, description = "Host not found")
    )
)]
pub async fn get_cached_apps(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let cached = state
        .registry
        .ask(GetCachedCatalog { host: name.clone() })
        .await
        .map_err(registry_error)?;

    Ok(Json(CachedCatalogResponse {
        host: name,
        snapshot: cached.snapshot.as_deref().map(snapshot_to_dto),
    }))
}

/// Fetch a fresh catalog snapshot, joining any in-flight fetch
#[utoipa::path(
    post,
    path = "/v1/hosts/{name}/refresh",
    params(("name" = String, Path, description = "Host name")),
    responses(
        (status = 200, description = "Fresh snapshot", body = SnapshotResponse),
        (status = 404, description = "Host not found"),
        (status = 409, description = "Fetch cancelled"),
        (status = 502, description = "Host unreachable or catalog malformed")
    )
)]
pub async fn refresh_catalog(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let handle = state
        .registry
        .ask(FetchHostCatalog { host: name.clone() })
        .await
        .map_err(registry_error)?;

    // Await settlement outside the actors; the registry replied immediately
    let snapshot = handle
        .outcome()
        .await
        .map_err(|e| catalog_error(&name, &e))?;

    Ok(Json(snapshot_to_dto(&snapshot)))
}

/// Cancel the in-flight fetch for a host
#[utoipa::path(
    post,
    path = "/v1/hosts/{name}/cancel",
    params(("name" = String, Path, description = "Host name")),
    responses(
        (status = 200, description = "Cancel result", body = CancelResponse),
        (status = 404, description = "Host not found")
    )
)]
pub async fn cancel_fetch(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let cancelled = state
        .registry
        .ask(CancelHostFetch { host: name.clone() })
        .await
        .map_err(registry_error)?;

    Ok(Json(CancelResponse {
        host: name,
        cancelled,
    }))
}

/// Invalidate the cached catalog snapshot for a host
#[utoipa::path(
    delete,
    path = "/v1/hosts/{name}/apps",
    params(("name" = String, Path, description = "Host name")),
    responses(
        (status = 204, description = "Cache invalidated"),
        (status = 404, description = "Host not found")
    )
)]
pub async fn invalidate_catalog(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    state
        .registry
        .ask(InvalidateCatalog { host: name })
        .await
        .map_err(registry_error)?;

    Ok(StatusCode::NO_CONTENT)
}
