use std::sync::Arc;

use axum::{
    Json,
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
};

use sproutstand_core::StorefrontId;
use sproutstand_storefront::{NewStorefront, StorefrontPatch};

use crate::app::errors;
use crate::app::services::AppServices;
use crate::middleware::RequireAuth;

pub async fn create_storefront(
    Extension(services): Extension<Arc<AppServices>>,
    RequireAuth(caller): RequireAuth,
    Json(body): Json<NewStorefront>,
) -> axum::response::Response {
    match services.registry.create(caller.user(), body) {
        Ok(storefront) => (StatusCode::CREATED, Json(storefront)).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn my_storefront(
    Extension(services): Extension<Arc<AppServices>>,
    RequireAuth(caller): RequireAuth,
) -> axum::response::Response {
    match services.registry.mine(caller.user()) {
        Ok(storefront) => Json(storefront).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn get_storefront(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: StorefrontId = match id.parse() {
        Ok(v) => v,
        Err(e) => return errors::domain_error_to_response(e),
    };
    match services.registry.get(id) {
        Ok(storefront) => Json(storefront).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn update_storefront(
    Extension(services): Extension<Arc<AppServices>>,
    RequireAuth(caller): RequireAuth,
    Path(id): Path<String>,
    Json(patch): Json<StorefrontPatch>,
) -> axum::response::Response {
    let id: StorefrontId = match id.parse() {
        Ok(v) => v,
        Err(e) => return errors::domain_error_to_response(e),
    };
    match services.registry.update(caller.user(), id, patch) {
        Ok(storefront) => Json(storefront).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}
