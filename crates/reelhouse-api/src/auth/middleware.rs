use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use reelhouse_core::AppError;
use std::sync::Arc;

use crate::auth::models::AuthContext;
use crate::error::HttpAppError;
use crate::state::AppState;

/// Reads the bearer token from the request headers.
fn bearer_token(request: &Request) -> Result<&str, AppError> {
    let header = request
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| AppError::Unauthorized("Missing authorization header".to_string()))?;

    header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| AppError::Unauthorized("Invalid authorization header format".to_string()))
}

pub async fn auth_middleware(
    State(state): State<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> Response {
    let claims = match bearer_token(&request).and_then(|token| state.jwt.validate(token)) {
        Ok(claims) => claims,
        Err(err) => {
            tracing::debug!(
                path = %request.uri().path(),
                error = %err,
                "Authentication failed"
            );
            return HttpAppError(err).into_response();
        }
    };

    request.extensions_mut().insert(AuthContext {
        user_id: claims.sub,
    });
    next.run(request).await
}
