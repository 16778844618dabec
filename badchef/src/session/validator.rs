//! Session validation against the backend.

use async_trait::async_trait;
use reqwest::Method;
use std::sync::Arc;

use crate::client::ClientInner;
use crate::models::Credential;

/// Endpoint that answers 200 for an accepted token.
pub const WHO_AM_I: &str = "users/me";

/// Outcome of one validation round trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Validity {
    Valid,
    Invalid,
}

/// What a guard knows about the session while it runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SessionValidity {
    #[default]
    Unknown,
    Valid,
    Invalid,
}

impl From<Validity> for SessionValidity {
    fn from(v: Validity) -> Self {
        match v {
            Validity::Valid => SessionValidity::Valid,
            Validity::Invalid => SessionValidity::Invalid,
        }
    }
}

/// Decides whether the server still accepts a credential.
#[async_trait]
pub trait SessionValidator: Send + Sync {
    async fn validate(&self, credential: &Credential) -> Validity;
}

/// Validator that asks `GET /users/me`.
///
/// Only a 200 counts as valid. Every other status and every transport
/// failure is `Invalid`, so an unreachable server logs the user out just
/// like an expired token does. No retry.
#[derive(Clone)]
pub struct HttpSessionValidator {
    client: Arc<ClientInner>,
}

impl HttpSessionValidator {
    pub(crate) fn new(client: Arc<ClientInner>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl SessionValidator for HttpSessionValidator {
    async fn validate(&self, credential: &Credential) -> Validity {
        if credential.is_empty() {
            return Validity::Invalid;
        }

        let response = self
            .client
            .executor()
            .send(Method::GET, WHO_AM_I, &[], None, Some(credential))
            .await;

        match response {
            Ok(raw) if raw.status == reqwest::StatusCode::OK => Validity::Valid,
            Ok(raw) => {
                log::warn!("token validation failed: {}", raw.status);
                Validity::Invalid
            }
            Err(e) => {
                log::warn!("token validation failed: {}", e);
                Validity::Invalid
            }
        }
    }
}
