//! HTTP client and configuration.

mod http;

pub use http::{
    default_base_url, extract_detail, Access, HttpConfig, RawResponse, DEFAULT_USER_AGENT,
    FALLBACK_BASE_URL,
};

use crate::api::{FavoriteApi, RatingApi, RecipeApi, UserApi};
use crate::error::{Error, Result};
use crate::models::Credential;
use crate::session::{self, HttpSessionValidator, Route};
use crate::store::{MemoryTokenStore, TokenStore};
use http::{build_client, HttpExecutor};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;

/// Builder for creating RecipeClient.
pub struct RecipeClientBuilder {
    http_config: HttpConfig,
    store: Option<Arc<dyn TokenStore>>,
}

impl std::fmt::Debug for RecipeClientBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecipeClientBuilder")
            .field("http_config", &self.http_config)
            .field("store", &self.store)
            .finish()
    }
}

impl Default for RecipeClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl RecipeClientBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            http_config: HttpConfig::default(),
            store: None,
        }
    }

    /// Set base URL.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.http_config.base_url = url.into();
        self
    }

    /// Set custom user agent.
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.http_config.user_agent = ua.into();
        self
    }

    /// Set connection timeout.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.http_config.connect_timeout = Some(timeout);
        self
    }

    /// Set read timeout.
    pub fn read_timeout(mut self, timeout: Duration) -> Self {
        self.http_config.read_timeout = Some(timeout);
        self
    }

    /// Set where the session token is kept. Defaults to memory.
    pub fn token_store(mut self, store: Arc<dyn TokenStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Build RecipeClient.
    pub fn build(self) -> Result<RecipeClient> {
        let http_client = build_client(&self.http_config)?;
        let store = self
            .store
            .unwrap_or_else(|| Arc::new(MemoryTokenStore::new()));

        Ok(RecipeClient {
            inner: Arc::new(ClientInner {
                http: http_client,
                config: self.http_config,
                store,
            }),
        })
    }
}

/// Internal client state.
pub(crate) struct ClientInner {
    pub http: reqwest::Client,
    pub config: HttpConfig,
    pub store: Arc<dyn TokenStore>,
}

impl ClientInner {
    /// Read the credential for this request, or fail without sending.
    pub fn require_credential(&self) -> Result<Credential> {
        self.store.get()?.ok_or(Error::AuthRequired)
    }

    /// Create HTTP executor.
    pub fn executor(&self) -> HttpExecutor<'_> {
        HttpExecutor::new(&self.http, &self.config)
    }

    /// Send a request and map its status.
    pub async fn send<B: Serialize + ?Sized>(
        &self,
        method: Method,
        api: &str,
        query: &[(&str, &str)],
        body: Option<&B>,
        access: Access,
    ) -> Result<RawResponse> {
        let body = body.map(serde_json::to_value).transpose()?;
        let credential = match access {
            Access::Authenticated => Some(self.require_credential()?),
            Access::Public | Access::CredentialExchange => None,
        };

        let result = self
            .executor()
            .send(method, api, query, body.as_ref(), credential.as_ref())
            .await?
            .check(access);

        // A 401 on an authenticated call means the stored token is dead.
        if let Err(Error::Expired(detail)) = &result {
            log::warn!("session rejected on {}: {}", api, detail);
            if let Err(e) = session::logout(self.store.as_ref()) {
                log::warn!("could not clear rejected token: {}", e);
            }
        }

        result
    }

    /// GET and decode JSON.
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        api: &str,
        query: &[(&str, &str)],
        access: Access,
    ) -> Result<T> {
        self.send::<()>(Method::GET, api, query, None, access)
            .await?
            .json()
    }

    /// Send a JSON body and decode the JSON response.
    pub async fn send_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        method: Method,
        api: &str,
        body: &B,
        access: Access,
    ) -> Result<T> {
        self.send(method, api, &[], Some(body), access)
            .await?
            .json()
    }
}

/// Client for the recipe platform.
#[derive(Clone)]
pub struct RecipeClient {
    pub(crate) inner: Arc<ClientInner>,
}

impl RecipeClient {
    /// Create a new client builder.
    pub fn builder() -> RecipeClientBuilder {
        RecipeClientBuilder::new()
    }

    /// Get the user API.
    pub fn users(&self) -> UserApi {
        UserApi::new(self.inner.clone())
    }

    /// Get the recipe API.
    pub fn recipes(&self) -> RecipeApi {
        RecipeApi::new(self.inner.clone())
    }

    /// Get the favorites API.
    pub fn favorites(&self) -> FavoriteApi {
        FavoriteApi::new(self.inner.clone())
    }

    /// Get the ratings API.
    pub fn ratings(&self) -> RatingApi {
        RatingApi::new(self.inner.clone())
    }

    /// Session validator backed by this client.
    pub fn validator(&self) -> HttpSessionValidator {
        HttpSessionValidator::new(self.inner.clone())
    }

    /// The token store this client reads credentials from.
    pub fn store(&self) -> &dyn TokenStore {
        self.inner.store.as_ref()
    }

    /// Check if a token is stored. Says nothing about whether it is still valid.
    pub fn is_authenticated(&self) -> bool {
        self.inner.store.is_present()
    }

    /// Drop the stored token and return where to go next.
    pub fn logout(&self) -> Result<Route> {
        session::logout(self.store())
    }

    /// Base URL requests are resolved against.
    pub fn base_url(&self) -> &str {
        &self.inner.config.base_url
    }
}

impl std::fmt::Debug for RecipeClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecipeClient")
            .field("authenticated", &self.is_authenticated())
            .field("base_url", &self.inner.config.base_url)
            .finish()
    }
}
