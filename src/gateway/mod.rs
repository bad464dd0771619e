//! Boundary to the storefront backend. The core only ever needs three calls:
//! the unified login endpoint and the two registration endpoints. Everything
//! behind them (password hashing, token minting) belongs to the server.

mod http;

pub use http::{endpoint_url, HttpGateway};

use crate::session::Role;
use async_trait::async_trait;
use secrecy::SecretString;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GatewayError {
    /// The backend answered and refused the request.
    #[error("rejected ({status}): {message}")]
    Rejected { status: u16, message: String },
    #[error("transport failure: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("invalid endpoint: {0}")]
    Endpoint(String),
}

/// Body of a successful login.
///
/// `access_token` may still be absent or empty; callers must treat that as a
/// failed login rather than committing an empty session.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct TokenResponse {
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub expires_in: Option<u64>,
    #[serde(default)]
    pub user_id: Option<String>,
}

impl TokenResponse {
    /// Token usable for a session commit, if any.
    #[must_use]
    pub fn usable_token(&self) -> Option<&str> {
        self.access_token.as_deref().filter(|t| !t.is_empty())
    }
}

/// Buyer account registration payload.
#[derive(Debug)]
pub struct UserRegistration {
    pub username: String,
    pub password: SecretString,
    pub email: String,
    pub phone: Option<String>,
}

/// Merchant account registration payload.
#[derive(Debug)]
pub struct MerchantRegistration {
    pub name: String,
    pub password: SecretString,
    pub contact_person: Option<String>,
    pub phone: Option<String>,
}

/// Backend boundary used by the session store and the registration actions.
#[async_trait]
pub trait AuthGateway: Send + Sync {
    /// Authenticate `username` for the claimed role.
    ///
    /// # Errors
    /// Returns [`GatewayError::Rejected`] when the backend refuses the
    /// credentials and [`GatewayError::Transport`] on network failures.
    async fn login(
        &self,
        username: &str,
        password: &SecretString,
        role: Role,
    ) -> Result<TokenResponse, GatewayError>;

    /// # Errors
    /// Same failure modes as [`AuthGateway::login`].
    async fn register_user(&self, registration: &UserRegistration) -> Result<(), GatewayError>;

    /// # Errors
    /// Same failure modes as [`AuthGateway::login`].
    async fn register_merchant(
        &self,
        registration: &MerchantRegistration,
    ) -> Result<(), GatewayError>;
}
