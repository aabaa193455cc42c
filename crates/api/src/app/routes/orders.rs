use std::sync::Arc;

use axum::{Json, extract::Extension, http::StatusCode, response::IntoResponse};

use crate::app::services::AppServices;
use crate::app::{dto, errors};
use crate::middleware::RequireAuth;

pub async fn create_order(
    Extension(services): Extension<Arc<AppServices>>,
    RequireAuth(caller): RequireAuth,
    Json(body): Json<dto::CreateOrderRequest>,
) -> axum::response::Response {
    match services.settlement.create_order(caller.user(), body.items) {
        Ok(order) => (StatusCode::CREATED, Json(order)).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn my_orders(
    Extension(services): Extension<Arc<AppServices>>,
    RequireAuth(caller): RequireAuth,
) -> axum::response::Response {
    match services.settlement.my_orders(caller.user()) {
        Ok(orders) => Json(orders).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}
