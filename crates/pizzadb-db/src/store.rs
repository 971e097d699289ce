//! The persistence seam used by the reconciler.

use std::future::Future;

use pizzadb_core::{NewVendor, StoredVendor, VendorUpdate};
use thiserror::Error;

/// A single failed store operation. Recovered per record by the reconciler.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("store returned HTTP {status}: {body}")]
    UnexpectedStatus { status: u16, body: String },

    #[error("failed to decode {context}: {source}")]
    Decode {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),

    #[error("invalid store URL \"{url}\": {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("stored row {id} is out of range: {reason}")]
    InvalidRow { id: i64, reason: String },

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Point lookup, update, and insert of vendor rows keyed by exact name.
///
/// Every operation is one round-trip. Implementations hold no run state; the
/// store owns the canonical copy of each vendor.
pub trait VendorStore {
    /// Id of the lowest-id row whose name equals `name` exactly, if any.
    ///
    /// Only the id is read, so rows with gaps in other columns still match.
    fn find_id_by_name(
        &self,
        name: &str,
    ) -> impl Future<Output = Result<Option<i64>, StoreError>> + Send;

    /// Apply `update` to every row named `name`.
    fn update_by_name(
        &self,
        name: &str,
        update: &VendorUpdate,
    ) -> impl Future<Output = Result<(), StoreError>> + Send;

    fn insert(&self, vendor: &NewVendor) -> impl Future<Output = Result<(), StoreError>> + Send;

    /// Vendors ordered by name, at most `limit` of them.
    fn list(&self, limit: u32) -> impl Future<Output = Result<Vec<StoredVendor>, StoreError>> + Send;
}
