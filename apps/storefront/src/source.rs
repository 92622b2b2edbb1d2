//! # Product Source & Authentication
//!
//! Where the catalog comes from and who hands out session tokens.
//!
//! ## Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  ProductSource::Remote ──► GET  {base}/products    ──► [ProductRecord]  │
//! │  ProductSource::File   ──► tokio::fs::read(path)   ──► [ProductRecord]  │
//! │                                    │                                    │
//! │                                    ▼                                    │
//! │                         Catalog::ingest (validation)                    │
//! │                                                                         │
//! │  Authenticator::Remote ──► POST {base}/auth/login  ──► { "token": .. }  │
//! │                       └──► POST {base}/users       ──► { "id": .. }     │
//! │  Authenticator::Offline ─► local uuid v4 token, signup accepted locally │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The product list is loaded once per session. There is no retry: a failed
//! load is reported and the shell exits.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use storefront_core::{Catalog, CoreError, ProductRecord};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::state::ConfigState;

/// Product source and login failures.
#[derive(Debug, Error)]
pub enum SourceError {
    /// Transport-level failure (connect, timeout, body read).
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The store answered with a non-success status.
    #[error("{operation} returned HTTP {status}")]
    Status { operation: String, status: u16 },

    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed product feed: {0}")]
    Json(#[from] serde_json::Error),

    /// The feed parsed but failed domain validation.
    #[error(transparent)]
    Feed(#[from] CoreError),
}

impl SourceError {
    /// True for a 401 from the login endpoint.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, SourceError::Status { status: 401, .. })
    }
}

// =============================================================================
// Store API Client
// =============================================================================

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Debug, Deserialize)]
struct LoginResponse {
    token: String,
}

/// Body of `POST /users`. The store requires a full profile, so the parts
/// the shell does not ask for are filled with placeholders.
#[derive(Debug, Serialize)]
struct SignupRequest<'a> {
    email: &'a str,
    username: &'a str,
    password: &'a str,
    name: SignupName<'a>,
    address: SignupAddress,
    phone: &'static str,
}

#[derive(Debug, Serialize)]
struct SignupName<'a> {
    firstname: &'a str,
    lastname: &'static str,
}

#[derive(Debug, Serialize)]
struct SignupAddress {
    city: &'static str,
    street: &'static str,
    number: u32,
    zipcode: &'static str,
    geolocation: Geolocation,
}

#[derive(Debug, Serialize)]
struct Geolocation {
    lat: &'static str,
    long: &'static str,
}

impl<'a> SignupRequest<'a> {
    fn new(username: &'a str, email: &'a str, password: &'a str) -> Self {
        SignupRequest {
            email,
            username,
            password,
            name: SignupName {
                firstname: username,
                lastname: "User",
            },
            address: SignupAddress {
                city: "Test City",
                street: "Test Street",
                number: 123,
                zipcode: "12345",
                geolocation: Geolocation { lat: "0", long: "0" },
            },
            phone: "1234567890",
        }
    }
}

#[derive(Debug, Deserialize)]
struct SignupResponse {
    #[serde(default)]
    id: Option<u64>,
}

/// HTTP client for the demo store API.
#[derive(Debug, Clone)]
pub struct StoreClient {
    client: reqwest::Client,
    base_url: String,
}

impl StoreClient {
    /// Creates a client for `base_url` with a per-request timeout.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, SourceError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(StoreClient {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `GET /products`
    pub async fn fetch_products(&self) -> Result<Vec<ProductRecord>, SourceError> {
        let url = format!("{}/products", self.base_url);
        debug!(%url, "fetching products");

        let resp = self.client.get(&url).send().await?;
        let resp = check_status(resp, "GET /products")?;
        Ok(resp.json().await?)
    }

    /// `POST /auth/login`, returning the bearer token.
    pub async fn login(&self, username: &str, password: &str) -> Result<String, SourceError> {
        let url = format!("{}/auth/login", self.base_url);
        debug!(%url, username, "logging in");

        let resp = self
            .client
            .post(&url)
            .json(&LoginRequest { username, password })
            .send()
            .await?;
        let resp = check_status(resp, "POST /auth/login")?;
        let body: LoginResponse = resp.json().await?;
        Ok(body.token)
    }

    /// `POST /users`, returning the new user id when the store reports one.
    pub async fn signup(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<Option<u64>, SourceError> {
        let url = format!("{}/users", self.base_url);
        debug!(%url, username, "signing up");

        let resp = self
            .client
            .post(&url)
            .json(&SignupRequest::new(username, email, password))
            .send()
            .await?;
        let resp = check_status(resp, "POST /users")?;
        let body: SignupResponse = resp.json().await?;
        Ok(body.id)
    }
}

fn check_status(resp: reqwest::Response, operation: &str) -> Result<reqwest::Response, SourceError> {
    let status = resp.status();
    if status.is_success() {
        Ok(resp)
    } else {
        Err(SourceError::Status {
            operation: operation.to_string(),
            status: status.as_u16(),
        })
    }
}

/// Reads a JSON array of store records from disk.
pub async fn read_products_file(path: &Path) -> Result<Vec<ProductRecord>, SourceError> {
    let bytes = tokio::fs::read(path).await.map_err(|source| SourceError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(serde_json::from_slice(&bytes)?)
}

// =============================================================================
// Product Source
// =============================================================================

/// Where the session's product list is loaded from.
#[derive(Debug, Clone)]
pub enum ProductSource {
    Remote(StoreClient),
    File(PathBuf),
}

impl ProductSource {
    /// Loads and validates the product list.
    pub async fn load(&self) -> Result<Catalog, SourceError> {
        let records = match self {
            ProductSource::Remote(client) => client.fetch_products().await?,
            ProductSource::File(path) => read_products_file(path).await?,
        };
        let catalog = Catalog::ingest(records).map_err(|e| {
            warn!(source = %self.describe(), error = %e, "Product feed rejected");
            e
        })?;
        info!(source = %self.describe(), products = catalog.len(), "Product list loaded");
        Ok(catalog)
    }

    pub fn describe(&self) -> String {
        match self {
            ProductSource::Remote(client) => client.base_url().to_string(),
            ProductSource::File(path) => path.display().to_string(),
        }
    }
}

// =============================================================================
// Authenticator
// =============================================================================

/// Exchanges credentials for a session token.
#[derive(Debug, Clone)]
pub enum Authenticator {
    Remote(StoreClient),
    /// Issues a random token for any non-empty credentials.
    Offline,
}

impl Authenticator {
    pub async fn authenticate(&self, username: &str, password: &str) -> Result<String, SourceError> {
        match self {
            Authenticator::Remote(client) => client.login(username, password).await,
            Authenticator::Offline => Ok(uuid::Uuid::new_v4().to_string()),
        }
    }

    /// Creates an account. Offline there is no user store, so the request
    /// is accepted without an id.
    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<Option<u64>, SourceError> {
        match self {
            Authenticator::Remote(client) => client.signup(username, email, password).await,
            Authenticator::Offline => Ok(None),
        }
    }
}

/// Picks the product source and authenticator for `config`.
///
/// A configured products file means offline mode for both.
pub fn from_config(config: &ConfigState) -> Result<(ProductSource, Authenticator), SourceError> {
    if let Some(path) = &config.products_path {
        return Ok((ProductSource::File(path.clone()), Authenticator::Offline));
    }

    let client = StoreClient::new(
        &config.api_base_url,
        Duration::from_secs(config.request_timeout_secs),
    )?;
    Ok((ProductSource::Remote(client.clone()), Authenticator::Remote(client)))
}
