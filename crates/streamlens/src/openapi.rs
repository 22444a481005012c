//! OpenAPI document

use utoipa::OpenApi;

use streamlens_api::events::CatalogEvent;
use streamlens_api::requests::AddHostRequest;
use streamlens_api::responses::{
    AppEntryDto, CachedCatalogResponse, CancelResponse, HealthResponse, HostListResponse,
    HostStatusResponse, SnapshotResponse,
};

use crate::api::error::ApiError;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "streamlens",
        description = "Application catalog inventory for remote streaming hosts"
    ),
    paths(
        crate::api::system::health,
        crate::api::hosts::list_hosts,
        crate::api::hosts::register_host,
        crate::api::hosts::get_host,
        crate::api::hosts::unregister_host,
        crate::api::hosts::get_cached_apps,
        crate::api::hosts::refresh_catalog,
        crate::api::hosts::cancel_fetch,
        crate::api::hosts::invalidate_catalog,
    ),
    components(schemas(
        ApiError,
        AppEntryDto,
        AddHostRequest,
        CachedCatalogResponse,
        CancelResponse,
        CatalogEvent,
        HealthResponse,
        HostListResponse,
        HostStatusResponse,
        SnapshotResponse,
    ))
)]
pub struct ApiDoc;
