//! In-process [`VendorStore`] for dry runs and tests.

use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard, PoisonError};

use pizzadb_core::{NewVendor, StoredVendor, VendorUpdate};

use crate::store::{StoreError, VendorStore};

#[derive(Debug, Default)]
struct Inner {
    rows: Vec<StoredVendor>,
    next_id: i64,
    failing_names: HashSet<String>,
    /// One entry per operation, e.g. `find:Додо Пицца`.
    calls: Vec<String>,
}

/// Vector-backed store with the same read-then-write contract as the real ones.
///
/// Names registered through [`MemoryVendorStore::fail_on`] make every
/// operation on that name return [`StoreError::Unavailable`].
#[derive(Debug, Default)]
pub struct MemoryVendorStore {
    inner: Mutex<Inner>,
}

impl MemoryVendorStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with existing rows.
    #[must_use]
    pub fn with_rows(rows: Vec<StoredVendor>) -> Self {
        let next_id = rows.iter().map(|r| r.id).max().unwrap_or(0);
        Self {
            inner: Mutex::new(Inner {
                rows,
                next_id,
                ..Inner::default()
            }),
        }
    }

    /// Make every operation on `name` fail.
    pub fn fail_on(&self, name: &str) {
        self.lock().failing_names.insert(name.to_string());
    }

    #[must_use]
    pub fn snapshot(&self) -> Vec<StoredVendor> {
        self.lock().rows.clone()
    }

    /// Operations seen so far, in order.
    #[must_use]
    pub fn calls(&self) -> Vec<String> {
        self.lock().calls.clone()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn record(&self, op: &str, name: &str) -> Result<MutexGuard<'_, Inner>, StoreError> {
        let mut inner = self.lock();
        inner.calls.push(format!("{op}:{name}"));
        if inner.failing_names.contains(name) {
            return Err(StoreError::Unavailable(format!("{op} rejected for {name}")));
        }
        Ok(inner)
    }
}

impl VendorStore for MemoryVendorStore {
    async fn find_id_by_name(&self, name: &str) -> Result<Option<i64>, StoreError> {
        let inner = self.record("find", name)?;
        Ok(inner.rows.iter().filter(|r| r.name == name).map(|r| r.id).min())
    }

    async fn update_by_name(&self, name: &str, update: &VendorUpdate) -> Result<(), StoreError> {
        let mut inner = self.record("update", name)?;
        for row in inner.rows.iter_mut().filter(|r| r.name == name) {
            row.price = update.price;
            row.rating = update.rating;
            row.review_count = update.review_count;
            row.address.clone_from(&update.address);
            row.last_updated = update.last_updated;
        }
        Ok(())
    }

    async fn insert(&self, vendor: &NewVendor) -> Result<(), StoreError> {
        let mut inner = self.record("insert", &vendor.name)?;
        inner.next_id += 1;
        let id = inner.next_id;
        inner.rows.push(StoredVendor {
            id,
            name: vendor.name.clone(),
            address: vendor.address.clone(),
            rating: vendor.rating,
            review_count: vendor.review_count,
            map_link: Some(vendor.map_link.clone()),
            price: vendor.price,
            delivery_estimate: vendor.delivery_estimate.clone(),
            website_link: vendor.website_link.clone(),
            last_updated: vendor.last_updated,
        });
        Ok(())
    }

    async fn list(&self, limit: u32) -> Result<Vec<StoredVendor>, StoreError> {
        let mut rows = self.lock().rows.clone();
        rows.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        rows.truncate(usize::try_from(limit).unwrap_or(usize::MAX));
        Ok(rows)
    }
}
