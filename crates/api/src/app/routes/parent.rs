use std::sync::Arc;

use axum::{Json, Router, extract::Extension, response::IntoResponse, routing::get};

use crate::app::dto::{ProductResponse, UserResponse};
use crate::app::errors;
use crate::app::services::AppServices;
use crate::middleware::RequireAuth;

pub fn router() -> Router {
    Router::new()
        .route("/children", get(children))
        .route("/approvals", get(approvals))
        .route("/stats", get(stats))
}

pub async fn children(
    Extension(services): Extension<Arc<AppServices>>,
    RequireAuth(caller): RequireAuth,
) -> axum::response::Response {
    match services.guardian.children(caller.user()) {
        Ok(kids) => {
            let body: Vec<UserResponse> = kids.into_iter().map(Into::into).collect();
            Json(body).into_response()
        }
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn approvals(
    Extension(services): Extension<Arc<AppServices>>,
    RequireAuth(caller): RequireAuth,
) -> axum::response::Response {
    match services.guardian.approvals(caller.user()) {
        Ok(listings) => {
            let body: Vec<ProductResponse> = listings.into_iter().map(Into::into).collect();
            Json(body).into_response()
        }
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn stats(
    Extension(services): Extension<Arc<AppServices>>,
    RequireAuth(caller): RequireAuth,
) -> axum::response::Response {
    match services.guardian.stats(caller.user()) {
        Ok(stats) => Json(stats).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}
