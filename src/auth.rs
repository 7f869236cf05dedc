//! Bearer-token identification of the calling member.
//!
//! Tokens are issued elsewhere; this module only checks the HS512 signature
//! and expiry and reads the member id from the `nameid` claim.

use actix_web::{dev::Payload, http::header, web, FromRequest, HttpRequest};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use std::future::{ready, Ready};
use thiserror::Error;

use crate::routes::errors::ApiError;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Missing bearer token")]
    MissingToken,

    #[error("Invalid token: {0}")]
    InvalidToken(#[from] jsonwebtoken::errors::Error),

    #[error("Token subject is not a member id: {0}")]
    InvalidSubject(String),

    #[error("Token validation is not configured")]
    NotConfigured,
}

/// Claims carried by member tokens
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Member id, as a string
    pub nameid: String,
    #[serde(default)]
    pub unique_name: Option<String>,
    pub exp: u64,
}

impl Claims {
    pub fn member_id(&self) -> Result<i32, AuthError> {
        self.nameid
            .parse()
            .map_err(|_| AuthError::InvalidSubject(self.nameid.clone()))
    }
}

/// Verifies member tokens against the shared signing key
#[derive(Clone)]
pub struct TokenValidator {
    key: DecodingKey,
    validation: Validation,
}

impl TokenValidator {
    pub fn new(token_key: &str) -> Self {
        Self {
            key: DecodingKey::from_secret(token_key.as_bytes()),
            validation: Validation::new(Algorithm::HS512),
        }
    }

    pub fn validate(&self, token: &str) -> Result<Claims, AuthError> {
        Ok(decode::<Claims>(token, &self.key, &self.validation)?.claims)
    }
}

/// The authenticated member making the request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Requester {
    pub id: i32,
}

impl Requester {
    fn authenticate(req: &HttpRequest) -> Result<Self, AuthError> {
        let validator = req
            .app_data::<web::Data<TokenValidator>>()
            .ok_or(AuthError::NotConfigured)?;

        let token = req
            .headers()
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .ok_or(AuthError::MissingToken)?;

        let claims = validator.validate(token)?;
        Ok(Self {
            id: claims.member_id()?,
        })
    }
}

impl FromRequest for Requester {
    type Error = ApiError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(Self::authenticate(req).map_err(|e| {
            tracing::info!("Rejected request to {}: {}", req.path(), e);
            ApiError::from(e)
        }))
    }
}
