//! Database operations for the `pizza_places` table.

mod read;
mod types;
mod write;

use pizzadb_core::{NewVendor, StoredVendor, VendorUpdate};
use sqlx::PgPool;

use crate::store::{StoreError, VendorStore};

pub use read::{get_vendor_id_by_name, list_vendors};
pub use types::VendorRow;
pub(crate) use types::to_column_int;
pub use write::{insert_vendor, update_vendor_by_name};

/// [`VendorStore`] backed directly by Postgres.
#[derive(Debug, Clone)]
pub struct PgVendorStore {
    pool: PgPool,
}

impl PgVendorStore {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl VendorStore for PgVendorStore {
    async fn find_id_by_name(&self, name: &str) -> Result<Option<i64>, StoreError> {
        Ok(get_vendor_id_by_name(&self.pool, name).await?)
    }

    async fn update_by_name(&self, name: &str, update: &VendorUpdate) -> Result<(), StoreError> {
        let rows = update_vendor_by_name(&self.pool, name, update).await?;
        tracing::debug!(vendor = %name, rows, "vendor rows updated");
        Ok(())
    }

    async fn insert(&self, vendor: &NewVendor) -> Result<(), StoreError> {
        insert_vendor(&self.pool, vendor).await?;
        Ok(())
    }

    async fn list(&self, limit: u32) -> Result<Vec<StoredVendor>, StoreError> {
        list_vendors(&self.pool, i64::from(limit))
            .await?
            .into_iter()
            .map(StoredVendor::try_from)
            .collect()
    }
}
