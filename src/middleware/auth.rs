use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use tracing::warn;

use crate::auth::{Claims, TokenIssuer};
use crate::error::ApiError;
use crate::models::Role;

/// Caller identity taken from a verified token
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub role: Role,
    pub email: Option<String>,
}

impl From<Claims> for AuthUser {
    fn from(claims: Claims) -> Self {
        Self { role: claims.role, email: claims.email }
    }
}

/// Validates the bearer token and stores an `AuthUser` in the request extensions
pub async fn jwt_auth_middleware(
    State(tokens): State<TokenIssuer>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_jwt_from_headers(&headers).map_err(ApiError::unauthorized)?;

    let claims = tokens.verify(token).map_err(|e| {
        warn!(error = %e, "rejected token");
        ApiError::unauthorized("invalid or expired token")
    })?;

    request.extensions_mut().insert(AuthUser::from(claims));
    Ok(next.run(request).await)
}

pub async fn require_moderator(request: Request, next: Next) -> Result<Response, ApiError> {
    require_role(Role::Moderator, request, next).await
}

pub async fn require_client(request: Request, next: Next) -> Result<Response, ApiError> {
    require_role(Role::Client, request, next).await
}

async fn require_role(required: Role, request: Request, next: Next) -> Result<Response, ApiError> {
    let role = request
        .extensions()
        .get::<AuthUser>()
        .map(|user| user.role)
        .ok_or_else(|| ApiError::unauthorized("Missing Authorization header"))?;

    if role != required {
        return Err(ApiError::forbidden(format!("{required} role required")));
    }
    Ok(next.run(request).await)
}

/// Extract JWT token from Authorization header
fn extract_jwt_from_headers(headers: &HeaderMap) -> Result<&str, &'static str> {
    let auth_header = headers
        .get(axum::http::header::AUTHORIZATION)
        .ok_or("Missing Authorization header")?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| "Invalid Authorization header format")?;

    match auth_str.strip_prefix("Bearer ") {
        Some(token) if !token.trim().is_empty() => Ok(token.trim()),
        Some(_) => Err("Empty JWT token"),
        None => Err("Authorization header must use Bearer token format"),
    }
}
