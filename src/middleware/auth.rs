use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};

use crate::auth::{self, ADMIN_ROLE};
use crate::error::ApiError;
use crate::AppState;

const UNAUTHORIZED_MESSAGE: &str = "Unauthorized: Admin access required.";

/// Per-request identity established by the admin guard, injected as a request
/// extension for the handler behind it.
#[derive(Clone, Debug)]
pub struct AdminIdentity {
    pub username: String,
}

/// Admin guard for mutating routes: validates the bearer token against the
/// signing secret and expiry, requires the admin role, and short-circuits
/// with a 401 envelope before the handler runs otherwise. Touches no store.
pub async fn require_admin(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = bearer_token(request.headers()).ok_or_else(|| {
        tracing::warn!("admin verification failed: no bearer token");
        ApiError::unauthorized(UNAUTHORIZED_MESSAGE)
    })?;

    let claims = auth::verify_token(&token, &state.config.jwt_secret).map_err(|err| {
        tracing::warn!("admin verification failed: {err}");
        ApiError::unauthorized(UNAUTHORIZED_MESSAGE)
    })?;

    if claims.role != ADMIN_ROLE {
        tracing::warn!("token for {} lacks the admin role", claims.user);
        return Err(ApiError::unauthorized(UNAUTHORIZED_MESSAGE));
    }

    request.extensions_mut().insert(AdminIdentity {
        username: claims.user,
    });
    Ok(next.run(request).await)
}

fn bearer_token(headers: &HeaderMap) -> Option<String> {
    let value = headers.get("authorization")?.to_str().ok()?;
    let token = value.strip_prefix("Bearer ")?.trim();
    if token.is_empty() {
        return None;
    }
    Some(token.to_string())
}
