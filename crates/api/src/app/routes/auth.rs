use std::sync::Arc;

use axum::{Json, extract::Extension, http::StatusCode, response::IntoResponse};

use sproutstand_identity::{SignupRequest, UserPatch};

use crate::app::services::AppServices;
use crate::app::{dto, errors};
use crate::middleware::RequireAuth;

pub async fn signup(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<SignupRequest>,
) -> axum::response::Response {
    match services.accounts.signup(body) {
        Ok(user) => {
            (StatusCode::CREATED, Json(dto::UserResponse::from(user))).into_response()
        }
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn login(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::LoginRequest>,
) -> axum::response::Response {
    match services.accounts.login(&body.email, &body.password) {
        Ok((token, user)) => Json(dto::TokenResponse::new(token, user)).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn me(RequireAuth(caller): RequireAuth) -> axum::response::Response {
    Json(dto::UserResponse::from(caller.user().clone())).into_response()
}

pub async fn update_me(
    Extension(services): Extension<Arc<AppServices>>,
    RequireAuth(caller): RequireAuth,
    Json(patch): Json<UserPatch>,
) -> axum::response::Response {
    match services.accounts.update_profile(caller.user(), patch) {
        Ok(user) => Json(dto::UserResponse::from(user)).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}
