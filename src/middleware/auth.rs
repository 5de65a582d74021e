//! Bearer-token authentication for the lead endpoints.
//!
//! Tokens come from configuration (`API_TOKEN`) and are checked against the
//! `Authorization: Bearer <token>` header.

use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};

use crate::config::ApiTokens;
use crate::models::AuthErrorResponse;

/// Errors that can occur during token authentication.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthError {
    /// The Authorization header is missing from the request.
    MissingHeader,
    /// The header is present but not in `Bearer <token>` form.
    InvalidFormat,
    /// The token is not one of the configured tokens.
    InvalidToken,
}

impl AuthError {
    fn body(self) -> AuthErrorResponse {
        let (error, message) = match self {
            AuthError::MissingHeader => (
                "Token de autorização é obrigatório",
                "Envie o header Authorization: Bearer {token}",
            ),
            AuthError::InvalidFormat => ("Formato de token inválido", "Use o formato: Bearer {token}"),
            AuthError::InvalidToken => ("Token inválido", "Token fornecido não é válido"),
        };

        AuthErrorResponse {
            error: error.to_string(),
            message: message.to_string(),
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        tracing::warn!("Unauthorized access: {:?}", self);
        (StatusCode::UNAUTHORIZED, Json(self.body())).into_response()
    }
}

/// Checks the Authorization header against the accepted tokens.
pub fn authorize(headers: &HeaderMap, tokens: &ApiTokens) -> Result<(), AuthError> {
    let authorization = headers
        .get(AUTHORIZATION)
        .ok_or(AuthError::MissingHeader)?
        .to_str()
        .map_err(|_| AuthError::InvalidFormat)?;

    let token = authorization
        .strip_prefix("Bearer ")
        .ok_or(AuthError::InvalidFormat)?;

    if !tokens.contains(token) {
        return Err(AuthError::InvalidToken);
    }

    Ok(())
}

/// Axum middleware rejecting requests without a valid bearer token.
pub async fn require_bearer_token(
    State(tokens): State<ApiTokens>,
    req: Request,
    next: Next,
) -> Result<Response, AuthError> {
    authorize(req.headers(), &tokens)?;

    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with(value: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static(value));
        headers
    }

    fn tokens() -> ApiTokens {
        ApiTokens::new(["secret-token"])
    }

    #[test]
    fn test_accepts_configured_token() {
        assert_eq!(authorize(&headers_with("Bearer secret-token"), &tokens()), Ok(()));
    }

    #[test]
    fn test_missing_header() {
        assert_eq!(
            authorize(&HeaderMap::new(), &tokens()),
            Err(AuthError::MissingHeader)
        );
    }

    #[test]
    fn test_wrong_scheme() {
        assert_eq!(
            authorize(&headers_with("Basic c2VjcmV0"), &tokens()),
            Err(AuthError::InvalidFormat)
        );
        assert_eq!(
            authorize(&headers_with("bearer secret-token"), &tokens()),
            Err(AuthError::InvalidFormat)
        );
    }

    #[test]
    fn test_unknown_token() {
        assert_eq!(
            authorize(&headers_with("Bearer other-token"), &tokens()),
            Err(AuthError::InvalidToken)
        );
        assert_eq!(
            authorize(&headers_with("Bearer "), &tokens()),
            Err(AuthError::InvalidToken)
        );
    }

    #[test]
    fn test_error_bodies() {
        let body = AuthError::MissingHeader.body();
        assert_eq!(body.error, "Token de autorização é obrigatório");
        assert_eq!(body.message, "Envie o header Authorization: Bearer {token}");

        let body = AuthError::InvalidToken.body();
        assert_eq!(body.error, "Token inválido");
        assert_eq!(body.message, "Token fornecido não é válido");
    }
}
