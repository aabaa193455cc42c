use std::sync::Arc;

use axum::{Json, Router, extract::Extension, response::IntoResponse, routing::get};

use crate::app::dto::{ProductResponse, UserResponse};
use crate::app::errors;
use crate::app::services::AppServices;
use crate::middleware::RequireAuth;

pub fn router() -> Router {
    Router::new()
        .route("/users", get(users))
        .route("/storefronts", get(storefronts))
        .route("/products", get(products))
        .route("/orders", get(orders))
}

pub async fn users(
    Extension(services): Extension<Arc<AppServices>>,
    RequireAuth(caller): RequireAuth,
) -> axum::response::Response {
    match services.admin.users(caller.user()) {
        Ok(users) => {
            let body: Vec<UserResponse> = users.into_iter().map(Into::into).collect();
            Json(body).into_response()
        }
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn storefronts(
    Extension(services): Extension<Arc<AppServices>>,
    RequireAuth(caller): RequireAuth,
) -> axum::response::Response {
    match services.admin.storefronts(caller.user()) {
        Ok(storefronts) => Json(storefronts).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn products(
    Extension(services): Extension<Arc<AppServices>>,
    RequireAuth(caller): RequireAuth,
) -> axum::response::Response {
    match services.admin.products(caller.user()) {
        Ok(products) => {
            let body: Vec<ProductResponse> = products.into_iter().map(Into::into).collect();
            Json(body).into_response()
        }
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn orders(
    Extension(services): Extension<Arc<AppServices>>,
    RequireAuth(caller): RequireAuth,
) -> axum::response::Response {
    match services.admin.orders(caller.user()) {
        Ok(orders) => Json(orders).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}
