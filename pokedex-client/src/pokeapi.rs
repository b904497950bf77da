//! PokeAPI implementation of the catalog contract.
//!
//! Uses the PokeAPI v2 REST endpoints for listing, lookup and description
//! fetches.

use crate::catalog::CatalogClient;
use crate::error::{ClientError, ClientResult};
use crate::resources::{DetailResource, FormResource, PageResource, SpeciesResource};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// Public PokeAPI v2 endpoint.
pub const DEFAULT_BASE_URL: &str = "https://pokeapi.co/api/v2";

/// PokeAPI client configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PokeApiConfig {
    /// Base URL of the versioned API (e.g. `https://pokeapi.co/api/v2`).
    pub base_url: String,
    /// Per-request timeout (in seconds).
    pub timeout_secs: u64,
    /// User agent sent with every request.
    pub user_agent: String,
}

impl Default for PokeApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 30,
            user_agent: concat!("pokedex/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// PokeAPI catalog client.
#[derive(Debug, Clone)]
pub struct PokeApiClient {
    config: PokeApiConfig,
    client: Client,
}

impl PokeApiClient {
    /// Creates a new client instance.
    pub fn new(config: PokeApiConfig) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| ClientError::Setup(format!("failed to create HTTP client: {e}")))?;

        Ok(Self { config, client })
    }

    /// Returns the active configuration.
    pub fn config(&self) -> &PokeApiConfig {
        &self.config
    }

    fn base_url(&self) -> &str {
        self.config.base_url.trim_end_matches('/')
    }

    fn endpoint(&self, resource: &str, key: &str) -> String {
        format!(
            "{}/{resource}/{}",
            self.base_url(),
            urlencoding::encode(key)
        )
    }

    /// Issues a GET and decodes the JSON body. A 404 becomes `NotFound(key)`.
    async fn get_json<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
        key: &str,
    ) -> ClientResult<T> {
        let response = request
            .send()
            .await
            .map_err(|e| ClientError::Network(format!("request for {key} failed: {e}")))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(ClientError::NotFound(key.to_string()));
        }
        if !status.is_success() {
            return Err(ClientError::Status {
                status: status.as_u16(),
                url: response.url().to_string(),
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| ClientError::Network(format!("read body for {key} failed: {e}")))?;

        serde_json::from_slice(&bytes)
            .map_err(|e| ClientError::Decode(format!("failed to parse {key}: {e}")))
    }
}

#[async_trait]
impl CatalogClient for PokeApiClient {
    fn provider_name(&self) -> &'static str {
        "PokeAPI"
    }

    async fn list_page(
        &self,
        page_size: usize,
        cursor: Option<&str>,
    ) -> ClientResult<PageResource> {
        let request = match cursor {
            Some(url) => {
                debug!("Listing page at cursor {}", url);
                self.client.get(url)
            }
            None => {
                debug!("Listing first page ({} records)", page_size);
                self.client
                    .get(format!("{}/pokemon", self.base_url()))
                    .query(&[("limit", page_size), ("offset", 0)])
            }
        };

        self.get_json(request, cursor.unwrap_or("pokemon list")).await
    }

    async fn find_by_name(&self, name: &str) -> ClientResult<DetailResource> {
        debug!("Looking up {}", name);
        let request = self.client.get(self.endpoint("pokemon", name));
        self.get_json(request, name).await
    }

    async fn fetch_detail(&self, locator: &str) -> ClientResult<DetailResource> {
        debug!("Fetching detail {}", locator);
        self.get_json(self.client.get(locator), locator).await
    }

    async fn fetch_form(&self, locator: &str) -> ClientResult<FormResource> {
        debug!("Fetching form {}", locator);
        self.get_json(self.client.get(locator), locator).await
    }

    async fn fetch_description(&self, name: &str) -> ClientResult<SpeciesResource> {
        debug!("Fetching species description for {}", name);
        let request = self.client.get(self.endpoint("pokemon-species", name));
        self.get_json(request, name).await
    }
}
