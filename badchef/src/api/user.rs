//! User API.

use reqwest::Method;
use std::sync::Arc;

use crate::{
    client::{Access, ClientInner},
    error::{Error, Result},
    models::{Credential, LoginRequest, NewUser, TokenResponse, User},
};

/// API for account operations.
pub struct UserApi {
    client: Arc<ClientInner>,
}

impl UserApi {
    pub(crate) fn new(client: Arc<ClientInner>) -> Self {
        Self { client }
    }

    /// Create an account.
    pub async fn signup(&self, username: &str, email: &str, password: &str) -> Result<User> {
        let request = NewUser {
            username: username.trim().to_owned(),
            email: email.trim().to_owned(),
            password: password.to_owned(),
        };
        validate_signup(&request)?;

        self.client
            .send_json(Method::POST, "users/", &request, Access::CredentialExchange)
            .await
    }

    /// Exchange username and password for a token and store it.
    ///
    /// The store is only written on success.
    pub async fn login(&self, username: &str, password: &str) -> Result<Credential> {
        let request = LoginRequest {
            username: username.trim().to_owned(),
            password: password.to_owned(),
        };

        let response: TokenResponse = self
            .client
            .send_json(
                Method::POST,
                "users/token",
                &request,
                Access::CredentialExchange,
            )
            .await?;

        let credential = Credential::new(response.access_token);
        if credential.is_empty() {
            return Err(Error::parse("login response carried an empty token"));
        }

        self.client.store.set(&credential)?;
        log::debug!("logged in as {}", request.username);
        Ok(credential)
    }

    /// Create an account and log straight into it.
    pub async fn register(&self, username: &str, email: &str, password: &str) -> Result<Credential> {
        self.signup(username, email, password).await?;
        self.login(username, password).await
    }

    /// Get the current authenticated user.
    pub async fn me(&self) -> Result<User> {
        self.client
            .get_json("users/me", &[], Access::Authenticated)
            .await
    }
}

fn validate_signup(request: &NewUser) -> Result<()> {
    if request.username.is_empty() {
        return Err(Error::InvalidArgument("Username is required".into()));
    }
    if request.password.is_empty() {
        return Err(Error::InvalidArgument("Password is required".into()));
    }
    if !request.email.contains('@') {
        return Err(Error::InvalidArgument(format!(
            "{:?} is not an email address",
            request.email
        )));
    }
    Ok(())
}
