//! Remote catalog access: the transport seam and its HTTP implementation.

pub mod http;
pub mod protocol;

use serde_json::Value as Json;
use stockroom_core::errors::SyncError;

pub use http::HttpCatalogClient;
pub use protocol::{BatchItemError, BatchItemResult, BatchResponse};

/// The seam between the sync runners and the remote system. Runners
/// only ever talk to this trait; tests substitute a scripted fake.
pub trait CatalogTransport {
    /// One page of the product listing. An empty page ends pagination.
    fn list_products(
        &self,
        page: u32,
        per_page: u32,
        status: Option<&str>,
    ) -> Result<Vec<Json>, SyncError>;

    /// Fetch a single product. `Ok(None)` when the id no longer exists.
    fn get_product(&self, remote_id: i64) -> Result<Option<Json>, SyncError>;

    /// Send one bounded batch of partial product updates.
    fn update_batch(&self, items: &[Json]) -> Result<BatchResponse, SyncError>;
}
