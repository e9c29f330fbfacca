//! Principal resolution for Axum handlers.

use axum::extract::{FromRequestParts, OriginalUri};
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use yahub_core::error::CoreError;
use yahub_core::principal::Principal;

use crate::auth::jwt::validate_token;
use crate::error::AppError;
use crate::state::AppState;

/// The principal behind a request plus the path it asked for.
///
/// A request without an `Authorization` header is [`Principal::Anonymous`].
/// A header that is present but not a valid Bearer token is rejected with
/// 401 rather than silently downgraded.
///
/// ```ignore
/// async fn my_handler(viewer: CurrentPrincipal) -> AppResult<Json<()>> {
///     viewer.permit(Action::List, RecordKind::Note)?;
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct CurrentPrincipal {
    pub principal: Principal,
    /// Original path and query, used as the login return path.
    pub next: String,
}

impl FromRequestParts<AppState> for CurrentPrincipal {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let uri = match OriginalUri::from_request_parts(parts, state).await {
            Ok(OriginalUri(uri)) => uri,
            Err(never) => match never {},
        };
        let next = uri
            .path_and_query()
            .map(|pq| pq.as_str().to_string())
            .unwrap_or_else(|| uri.path().to_string());

        let Some(auth_header) = parts.headers.get(AUTHORIZATION) else {
            return Ok(Self {
                principal: Principal::Anonymous,
                next,
            });
        };

        let token = auth_header
            .to_str()
            .ok()
            .and_then(|v| v.strip_prefix("Bearer "))
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized(
                    "Invalid Authorization format. Expected: Bearer <token>".into(),
                ))
            })?;

        let claims = validate_token(token, &state.config.jwt).map_err(|_| {
            AppError::Core(CoreError::Unauthorized("Invalid or expired token".into()))
        })?;

        Ok(Self {
            principal: Principal::user(claims.sub, claims.username),
            next,
        })
    }
}
