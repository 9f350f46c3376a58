/**
 * Session Tokens
 *
 * Signed, time-limited JWTs carrying user identity and role claims. Every
 * login hands out a pair: a short-lived access token for API calls and a
 * long-lived refresh token that can only be exchanged for a new pair.
 *
 * The signing key, algorithm, issuer and lifetimes all come from
 * [`AppConfig`]; a [`TokenIssuer`] is built once at startup and shared
 * through application state.
 */

use std::fmt;

use chrono::{Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::backend::auth::users::{Role, User};
use crate::shared::AppConfig;

/// Which half of a token pair a token is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    Access,
    Refresh,
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenType::Access => f.write_str("access"),
            TokenType::Refresh => f.write_str("refresh"),
        }
    }
}

/// JWT claims structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Username
    pub sub: String,
    /// User ID
    pub user_id: i64,
    /// Email
    pub email: String,
    /// Role at time of issue
    pub role: Role,
    /// Scopes granted by the role
    #[serde(default)]
    pub scopes: Vec<String>,
    /// Access or refresh
    pub token_type: TokenType,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at time (Unix timestamp)
    pub iat: i64,
    /// Issuer, when one is configured
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,
    /// Unique token ID
    pub jti: String,
}

/// Access and refresh token returned on login and refresh
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    /// Always `"bearer"`
    pub token_type: String,
    /// Access token lifetime in seconds
    pub expires_in: i64,
}

/// Reasons a token could not be issued or accepted
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("token is empty")]
    Empty,
    #[error("token has expired")]
    Expired,
    #[error("token signature is invalid")]
    InvalidSignature,
    #[error("token issuer is invalid")]
    InvalidIssuer,
    #[error("token is missing required claim `{0}`")]
    MissingClaim(String),
    #[error("expected {expected} token, found {found}")]
    WrongType {
        expected: TokenType,
        found: TokenType,
    },
    #[error("malformed token: {0}")]
    Malformed(String),
    #[error("failed to encode token: {0}")]
    Encoding(String),
}

impl From<jsonwebtoken::errors::Error> for TokenError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        match err.kind() {
            ErrorKind::ExpiredSignature => TokenError::Expired,
            ErrorKind::InvalidSignature => TokenError::InvalidSignature,
            ErrorKind::InvalidIssuer => TokenError::InvalidIssuer,
            ErrorKind::MissingRequiredClaim(claim) => TokenError::MissingClaim(claim.clone()),
            _ => TokenError::Malformed(err.to_string()),
        }
    }
}

/// Signs and verifies tokens with the configured key
#[derive(Clone)]
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    algorithm: Algorithm,
    issuer: Option<String>,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

impl fmt::Debug for TokenIssuer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenIssuer")
            .field("algorithm", &self.algorithm)
            .field("issuer", &self.issuer)
            .field("access_ttl", &self.access_ttl)
            .field("refresh_ttl", &self.refresh_ttl)
            .finish_non_exhaustive()
    }
}

impl TokenIssuer {
    /// Build an issuer from validated configuration
    pub fn new(config: &AppConfig) -> Self {
        let secret = config.jwt_secret_key.as_bytes();

        let mut validation = Validation::new(config.jwt_algorithm);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "iat", "sub"]);
        if let Some(issuer) = &config.jwt_issuer {
            validation.set_issuer(&[issuer.as_str()]);
        }

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
            algorithm: config.jwt_algorithm,
            issuer: config.jwt_issuer.clone(),
            access_ttl: config.access_token_ttl,
            refresh_ttl: config.refresh_token_ttl,
        }
    }

    /// Lifetime of access tokens
    pub fn access_ttl(&self) -> Duration {
        self.access_ttl
    }

    /// Issue a single token of the given type for `user`
    pub fn issue(&self, user: &User, token_type: TokenType) -> Result<String, TokenError> {
        let claims = self.claims_for(user, token_type)?;
        self.sign(&claims)
    }

    /// Issue an access/refresh pair for `user`
    pub fn issue_pair(&self, user: &User) -> Result<TokenPair, TokenError> {
        Ok(TokenPair {
            access_token: self.issue(user, TokenType::Access)?,
            refresh_token: self.issue(user, TokenType::Refresh)?,
            token_type: "bearer".to_string(),
            expires_in: self.access_ttl.num_seconds(),
        })
    }

    /// Verify signature, algorithm, expiry and issuer, then return the claims
    pub fn decode(&self, token: &str) -> Result<Claims, TokenError> {
        let token = token.trim();
        if token.is_empty() {
            return Err(TokenError::Empty);
        }

        let data = decode::<Claims>(token, &self.decoding_key, &self.validation)?;
        if data.claims.sub.trim().is_empty() {
            return Err(TokenError::MissingClaim("sub".to_string()));
        }
        Ok(data.claims)
    }

    /// Decode a token that must be an access token
    pub fn decode_access(&self, token: &str) -> Result<Claims, TokenError> {
        self.decode_expecting(token, TokenType::Access)
    }

    /// Decode a token that must be a refresh token
    pub fn decode_refresh(&self, token: &str) -> Result<Claims, TokenError> {
        self.decode_expecting(token, TokenType::Refresh)
    }

    /// Whether `token` decodes cleanly
    pub fn is_valid(&self, token: &str) -> bool {
        self.decode(token).is_ok()
    }

    fn decode_expecting(&self, token: &str, expected: TokenType) -> Result<Claims, TokenError> {
        let claims = self.decode(token)?;
        if claims.token_type != expected {
            return Err(TokenError::WrongType {
                expected,
                found: claims.token_type,
            });
        }
        Ok(claims)
    }

    fn claims_for(&self, user: &User, token_type: TokenType) -> Result<Claims, TokenError> {
        let now = Utc::now();
        let ttl = match token_type {
            TokenType::Access => self.access_ttl,
            TokenType::Refresh => self.refresh_ttl,
        };
        let expires_at = now.checked_add_signed(ttl).ok_or_else(|| {
            tracing::error!("{} token lifetime overflows the clock", token_type);
            TokenError::Encoding(format!("{} token lifetime out of range", token_type))
        })?;
        let role = user.role();

        Ok(Claims {
            sub: user.username.clone(),
            user_id: user.id,
            email: user.email.clone(),
            role,
            scopes: role.scopes(),
            token_type,
            exp: expires_at.timestamp(),
            iat: now.timestamp(),
            iss: self.issuer.clone(),
            jti: uuid::Uuid::new_v4().to_string(),
        })
    }

    fn sign(&self, claims: &Claims) -> Result<String, TokenError> {
        encode(&Header::new(self.algorithm), claims, &self.encoding_key).map_err(|e| {
            tracing::error!("Error encoding token: {}", e);
            TokenError::Encoding(e.to_string())
        })
    }
}
