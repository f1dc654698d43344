//! JWT authentication module.
//!
//! Handles access token generation and validation, and the axum middleware
//! that guards non-public routes.
//!
//! ```text
//! Authorization: Bearer <jwt>
//!        │
//!        ▼
//! require_auth ── missing / malformed / expired / not "access" ──► 401
//!        │
//!        ▼
//! handler (Claims available as a request extension)
//! ```

use axum::extract::{Request, State};
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::Response;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, TokenData, Validation};
use serde::{Deserialize, Serialize};
use tracing::warn;
use uuid::Uuid;

use crate::error::ApiError;
use crate::AppState;

/// JWT claims structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (operator or service account)
    pub sub: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration (Unix timestamp)
    pub exp: i64,

    /// JWT ID (unique identifier for this token)
    pub jti: String,

    /// Token type, always "access" for tokens this API accepts
    pub token_type: String,
}

/// JWT token manager.
#[derive(Clone)]
pub struct JwtManager {
    secret: String,
    access_lifetime_secs: i64,
}

impl std::fmt::Debug for JwtManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtManager")
            .field("access_lifetime_secs", &self.access_lifetime_secs)
            .finish_non_exhaustive()
    }
}

impl JwtManager {
    /// Create a new JWT manager.
    pub fn new(secret: impl Into<String>, access_lifetime_secs: i64) -> Self {
        JwtManager {
            secret: secret.into(),
            access_lifetime_secs,
        }
    }

    /// Generate an access token for `subject`.
    pub fn generate_access_token(&self, subject: &str) -> Result<String, ApiError> {
        self.generate_token(subject, "access", self.access_lifetime_secs)
    }

    fn generate_token(
        &self,
        subject: &str,
        token_type: &str,
        lifetime_secs: i64,
    ) -> Result<String, ApiError> {
        let now = Utc::now();
        let exp = now + Duration::seconds(lifetime_secs);

        let claims = Claims {
            sub: subject.to_string(),
            iat: now.timestamp(),
            exp: exp.timestamp(),
            jti: Uuid::new_v4().to_string(),
            token_type: token_type.to_string(),
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .map_err(|e| ApiError::internal(format!("Failed to generate token: {}", e)))
    }

    /// Validate and decode a token.
    pub fn validate_token(&self, token: &str) -> Result<Claims, ApiError> {
        let validation = Validation::default();

        let token_data: TokenData<Claims> = decode(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &validation,
        )
        .map_err(|e| ApiError::unauthorized(format!("Invalid token: {}", e)))?;

        Ok(token_data.claims)
    }

    /// Validate that a token is an access token.
    pub fn validate_access_token(&self, token: &str) -> Result<Claims, ApiError> {
        let claims = self.validate_token(token)?;

        if claims.token_type != "access" {
            return Err(ApiError::unauthorized("Expected access token"));
        }

        Ok(claims)
    }
}

/// Extract the bearer token from request headers.
pub fn extract_bearer(headers: &HeaderMap) -> Option<&str> {
    let token = headers
        .get(axum::http::header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")?
        .trim();

    if token.is_empty() {
        None
    } else {
        Some(token)
    }
}

/// Middleware rejecting requests without a valid access token.
pub async fn require_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_bearer(req.headers()).ok_or_else(|| {
        warn!(path = %req.uri().path(), "Missing bearer token");
        ApiError::unauthorized("Missing bearer token")
    })?;

    let claims = state.jwt.validate_access_token(token).map_err(|e| {
        warn!(path = %req.uri().path(), error = %e.message, "Rejected bearer token");
        e
    })?;

    req.extensions_mut().insert(claims);
    Ok(next.run(req).await)
}
