//! Remote catalog API configuration.

use serde::{Deserialize, Serialize};

/// Connection settings for the remote catalog (WooCommerce-style REST API).
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct RemoteConfig {
    /// Shop base URL, e.g. `https://shop.example.lt/`.
    pub base_url: Option<String>,
    /// API consumer key (HTTP basic auth user).
    pub consumer_key: Option<String>,
    /// API consumer secret (HTTP basic auth password).
    pub consumer_secret: Option<String>,
    /// Optional product status filter for listings, e.g. `publish`.
    pub status_filter: Option<String>,
}

impl RemoteConfig {
    /// Returns true when all credentials needed for live API calls are set.
    pub fn is_configured(&self) -> bool {
        self.base_url.as_deref().is_some_and(|s| !s.is_empty())
            && self.consumer_key.as_deref().is_some_and(|s| !s.is_empty())
            && self.consumer_secret.as_deref().is_some_and(|s| !s.is_empty())
    }

    /// Base URL guaranteed to end with a trailing slash.
    pub fn normalized_base_url(&self) -> Option<String> {
        let url = self.base_url.as_deref()?.trim();
        if url.is_empty() {
            return None;
        }
        if url.ends_with('/') {
            Some(url.to_string())
        } else {
            Some(format!("{url}/"))
        }
    }
}
