use std::sync::Arc;

use axum::{
    Json,
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::IntoResponse,
};

use sproutstand_catalog::{GuardianAction, NewProduct, ProductPatch};
use sproutstand_core::ProductId;
use sproutstand_infra::ListQuery;

use crate::app::errors;
use crate::app::services::AppServices;
use crate::app::dto::{self, ProductResponse};
use crate::middleware::RequireAuth;

pub async fn list_products(
    Extension(services): Extension<Arc<AppServices>>,
    Query(params): Query<dto::ProductListParams>,
) -> axum::response::Response {
    let query = ListQuery {
        seller_id: params.seller_id,
        status: params.status,
        search: params.search,
    };
    match services.lifecycle.list(query) {
        Ok(products) => {
            let body: Vec<ProductResponse> = products.into_iter().map(Into::into).collect();
            Json(body).into_response()
        }
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn marketplace(
    Extension(services): Extension<Arc<AppServices>>,
    Query(params): Query<dto::MarketplaceParams>,
) -> axum::response::Response {
    match services.lifecycle.marketplace(params.search) {
        Ok(listings) => {
            let body: Vec<ProductResponse> = listings.into_iter().map(Into::into).collect();
            Json(body).into_response()
        }
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn my_products(
    Extension(services): Extension<Arc<AppServices>>,
    RequireAuth(caller): RequireAuth,
) -> axum::response::Response {
    match services.lifecycle.mine(caller.user()) {
        Ok(products) => {
            let body: Vec<ProductResponse> = products.into_iter().map(Into::into).collect();
            Json(body).into_response()
        }
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn get_product(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: ProductId = match id.parse() {
        Ok(v) => v,
        Err(e) => return errors::domain_error_to_response(e),
    };
    match services.lifecycle.get(id) {
        Ok(product) => Json(ProductResponse::from(product)).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn create_product(
    Extension(services): Extension<Arc<AppServices>>,
    RequireAuth(caller): RequireAuth,
    Json(body): Json<NewProduct>,
) -> axum::response::Response {
    match services.lifecycle.create(caller.user(), body) {
        Ok(product) => {
            (StatusCode::CREATED, Json(ProductResponse::from(product))).into_response()
        }
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn update_product(
    Extension(services): Extension<Arc<AppServices>>,
    RequireAuth(caller): RequireAuth,
    Path(id): Path<String>,
    Json(patch): Json<ProductPatch>,
) -> axum::response::Response {
    let id: ProductId = match id.parse() {
        Ok(v) => v,
        Err(e) => return errors::domain_error_to_response(e),
    };
    match services.lifecycle.update(caller.user(), id, patch) {
        Ok(product) => Json(ProductResponse::from(product)).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn delete_product(
    Extension(services): Extension<Arc<AppServices>>,
    RequireAuth(caller): RequireAuth,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: ProductId = match id.parse() {
        Ok(v) => v,
        Err(e) => return errors::domain_error_to_response(e),
    };
    match services.lifecycle.delete(caller.user(), id) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn decide_product(
    Extension(services): Extension<Arc<AppServices>>,
    RequireAuth(caller): RequireAuth,
    Path(id): Path<String>,
    Json(body): Json<dto::DecisionRequest>,
) -> axum::response::Response {
    let id: ProductId = match id.parse() {
        Ok(v) => v,
        Err(e) => return errors::domain_error_to_response(e),
    };
    let action: GuardianAction = match body.action.parse() {
        Ok(v) => v,
        Err(e) => return errors::domain_error_to_response(e),
    };
    match services.lifecycle.decide(caller.user(), id, action) {
        Ok(product) => Json(ProductResponse::from(product)).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}
