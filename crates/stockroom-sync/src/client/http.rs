//! Blocking HTTP implementation of the catalog transport.
//!
//! Basic auth with the consumer key/secret pair — most shop hosts
//! block query-string credentials.

use reqwest::blocking::{Client, RequestBuilder};
use reqwest::StatusCode;
use serde_json::Value as Json;
use stockroom_core::config::RemoteConfig;
use stockroom_core::errors::{ConfigError, SyncError};

use super::protocol::{BatchResponse, BatchUpdateRequest};
use super::CatalogTransport;

const PRODUCTS_ENDPOINT: &str = "wp-json/wc/v3/products";

/// Live transport against a WooCommerce-style REST API.
pub struct HttpCatalogClient {
    base_url: String,
    consumer_key: String,
    consumer_secret: String,
    client: Client,
}

impl HttpCatalogClient {
    /// Build a client from the remote config. Fails when credentials
    /// are missing rather than producing a client that 401s later.
    pub fn new(remote: &RemoteConfig) -> Result<Self, SyncError> {
        if !remote.is_configured() {
            return Err(SyncError::Config(ConfigError::MissingCredentials));
        }
        let base_url = remote
            .normalized_base_url()
            .ok_or(SyncError::Config(ConfigError::MissingCredentials))?;

        let client = Client::builder()
            .build()
            .map_err(|e| SyncError::Transport {
                message: e.to_string(),
            })?;

        Ok(Self {
            base_url,
            consumer_key: remote.consumer_key.clone().unwrap_or_default(),
            consumer_secret: remote.consumer_secret.clone().unwrap_or_default(),
            client,
        })
    }

    fn url(&self, tail: &str) -> String {
        format!("{}{}{}", self.base_url, PRODUCTS_ENDPOINT, tail)
    }

    fn authed(&self, req: RequestBuilder) -> RequestBuilder {
        req.basic_auth(&self.consumer_key, Some(&self.consumer_secret))
    }

    fn send_json(&self, req: RequestBuilder) -> Result<(StatusCode, String), SyncError> {
        let resp = self
            .authed(req)
            .send()
            .map_err(|e| SyncError::Transport {
                message: e.to_string(),
            })?;
        let status = resp.status();
        let body = resp.text().map_err(|e| SyncError::Transport {
            message: e.to_string(),
        })?;
        Ok((status, body))
    }

    fn parse<T: serde::de::DeserializeOwned>(body: &str) -> Result<T, SyncError> {
        serde_json::from_str(body).map_err(|e| SyncError::InvalidResponse {
            message: e.to_string(),
        })
    }
}

impl CatalogTransport for HttpCatalogClient {
    fn list_products(
        &self,
        page: u32,
        per_page: u32,
        status: Option<&str>,
    ) -> Result<Vec<Json>, SyncError> {
        let mut req = self
            .client
            .get(self.url(""))
            .query(&[("page", page), ("per_page", per_page)]);
        if let Some(status) = status {
            req = req.query(&[("status", status)]);
        }

        let (status_code, body) = self.send_json(req)?;
        if !status_code.is_success() {
            return Err(SyncError::RemoteStatus {
                status: status_code.as_u16(),
                message: body,
            });
        }
        Self::parse(&body)
    }

    fn get_product(&self, remote_id: i64) -> Result<Option<Json>, SyncError> {
        let req = self.client.get(self.url(&format!("/{remote_id}")));
        let (status_code, body) = self.send_json(req)?;
        if status_code == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status_code.is_success() {
            return Err(SyncError::RemoteStatus {
                status: status_code.as_u16(),
                message: body,
            });
        }
        Self::parse(&body).map(Some)
    }

    fn update_batch(&self, items: &[Json]) -> Result<BatchResponse, SyncError> {
        let req = self
            .client
            .post(self.url("/batch"))
            .json(&BatchUpdateRequest { update: items });

        let (status_code, body) = self.send_json(req)?;
        if !status_code.is_success() {
            return Err(SyncError::RemoteStatus {
                status: status_code.as_u16(),
                message: body,
            });
        }
        Self::parse(&body)
    }
}
