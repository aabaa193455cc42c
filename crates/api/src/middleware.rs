//! Authentication extractor for route handlers.
//!
//! Protected handlers take `RequireAuth(caller)`; public handlers simply do
//! not. A missing, malformed, expired, or unresolvable bearer token rejects
//! with 401 before the handler runs.

use std::sync::Arc;

use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, StatusCode, request::Parts},
    response::Response,
};
use chrono::Utc;

use crate::app::errors;
use crate::app::services::AppServices;
use crate::context::Caller;

/// Extractor that requires a resolvable bearer token.
pub struct RequireAuth(pub Caller);

#[axum::async_trait]
impl<S> FromRequestParts<S> for RequireAuth
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let services = parts
            .extensions
            .get::<Arc<AppServices>>()
            .ok_or_else(unauthorized)?;

        let token = extract_bearer(&parts.headers).map_err(|_| unauthorized())?;

        let user = services
            .accounts
            .resolve_caller(token, Utc::now())
            .map_err(|_e| unauthorized())?;

        Ok(Self(Caller::new(user)))
    }
}

fn unauthorized() -> Response {
    errors::json_error(StatusCode::UNAUTHORIZED, "unauthorized", "unauthorized")
}

fn extract_bearer(headers: &HeaderMap) -> Result<&str, StatusCode> {
    let header = headers
        .get(axum::http::header::AUTHORIZATION)
        .ok_or(StatusCode::UNAUTHORIZED)?;

    let header = header.to_str().map_err(|_| StatusCode::UNAUTHORIZED)?;

    let header = header
        .strip_prefix("Bearer ")
        .ok_or(StatusCode::UNAUTHORIZED)?;

    let token = header.trim();
    if token.is_empty() {
        return Err(StatusCode::UNAUTHORIZED);
    }

    Ok(token)
}
