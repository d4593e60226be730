//! Request authentication for protected routes.
//!
//! Routes are guarded by [`api_key_middleware`], which delegates the actual
//! decision to a [`RequestAuthenticator`]. The only strategy shipped today is
//! [`SharedSecretAuthenticator`], a static comparison of the `X-API-Key`
//! header against a configured secret. Stronger schemes plug in by
//! implementing the trait; route wiring does not change.

use crate::error::AppError;
use async_trait::async_trait;
use axum::{
    extract::{Request, State},
    http::{HeaderMap, HeaderName},
    middleware::Next,
    response::Response,
};
use secrecy::{ExposeSecret, Secret};
use std::sync::Arc;
use subtle::ConstantTimeEq;
use thiserror::Error;

/// Header carrying the shared secret.
pub const API_KEY_HEADER: &str = "x-api-key";

/// Why a request was refused.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthFailure {
    #[error("credentials missing")]
    Missing,

    #[error("credentials invalid")]
    Invalid,
}

/// Strategy deciding whether a request may reach a protected handler.
#[async_trait]
pub trait RequestAuthenticator: Send + Sync {
    async fn authenticate(&self, headers: &HeaderMap) -> Result<(), AuthFailure>;
}

/// Compares one header against a static secret in constant time.
pub struct SharedSecretAuthenticator {
    header: HeaderName,
    secret: Secret<String>,
}

impl SharedSecretAuthenticator {
    /// Authenticator reading the standard `X-API-Key` header.
    pub fn new(secret: Secret<String>) -> Self {
        Self::with_header(HeaderName::from_static(API_KEY_HEADER), secret)
    }

    pub fn with_header(header: HeaderName, secret: Secret<String>) -> Self {
        Self { header, secret }
    }
}

#[async_trait]
impl RequestAuthenticator for SharedSecretAuthenticator {
    async fn authenticate(&self, headers: &HeaderMap) -> Result<(), AuthFailure> {
        let presented = headers.get(&self.header).ok_or(AuthFailure::Missing)?;
        let presented = presented.to_str().map_err(|_| AuthFailure::Invalid)?;

        let expected = self.secret.expose_secret().as_bytes();
        if bool::from(presented.as_bytes().ct_eq(expected)) {
            Ok(())
        } else {
            Err(AuthFailure::Invalid)
        }
    }
}

/// Reject the request with 403 unless the authenticator accepts it.
///
/// Runs before the handler, so no downstream work happens for refused
/// requests.
pub async fn api_key_middleware(
    State(authenticator): State<Arc<dyn RequestAuthenticator>>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    match authenticator.authenticate(req.headers()).await {
        Ok(()) => Ok(next.run(req).await),
        Err(failure) => {
            tracing::warn!(
                path = %req.uri().path(),
                reason = %failure,
                "Failed API key authentication attempt"
            );
            Err(AppError::Forbidden(anyhow::anyhow!(
                "Could not validate API key"
            )))
        }
    }
}
