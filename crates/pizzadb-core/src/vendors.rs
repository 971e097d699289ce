//! Vendor and promo records exchanged between collectors, the reconciler, and
//! the store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One pizza vendor as seen by the geo-search provider during a single run.
///
/// `name` is the only identity key. Two records with the same name in one run
/// are both passed to the reconciler; the later one wins at the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VendorRecord {
    pub name: String,
    pub address: Option<String>,
    /// Provider-defined scale.
    pub rating: Option<f64>,
    pub review_count: Option<u32>,
    /// Deterministic map URL derived from `name` and the configured city.
    pub map_link: String,
    /// Whole currency units.
    pub estimated_price: u32,
    pub delivery_estimate: Option<String>,
    pub website_link: Option<String>,
}

impl VendorRecord {
    /// Build the insert payload for a vendor not yet in the store.
    #[must_use]
    pub fn to_new_vendor(&self, last_updated: DateTime<Utc>) -> NewVendor {
        NewVendor {
            name: self.name.clone(),
            address: self.address.clone(),
            rating: self.rating,
            review_count: self.review_count,
            map_link: self.map_link.clone(),
            price: self.estimated_price,
            delivery_estimate: self.delivery_estimate.clone(),
            website_link: self.website_link.clone(),
            last_updated,
        }
    }

    /// Build the in-place update applied to an existing stored vendor.
    #[must_use]
    pub fn to_update(&self, last_updated: DateTime<Utc>) -> VendorUpdate {
        VendorUpdate {
            price: self.estimated_price,
            rating: self.rating,
            review_count: self.review_count,
            address: self.address.clone(),
            last_updated,
        }
    }
}

/// One promotional code collected from the coupon source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromoRecord {
    pub code: String,
    pub description: String,
}

/// A vendor as persisted by the store, including its store-assigned id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredVendor {
    pub id: i64,
    pub name: String,
    pub address: Option<String>,
    pub rating: Option<f64>,
    pub review_count: Option<u32>,
    pub map_link: Option<String>,
    pub price: u32,
    pub delivery_estimate: Option<String>,
    pub website_link: Option<String>,
    pub last_updated: DateTime<Utc>,
}

/// Insert payload for a first sighting of a vendor name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewVendor {
    pub name: String,
    pub address: Option<String>,
    pub rating: Option<f64>,
    pub review_count: Option<u32>,
    pub map_link: String,
    pub price: u32,
    pub delivery_estimate: Option<String>,
    pub website_link: Option<String>,
    pub last_updated: DateTime<Utc>,
}

/// Mutable fields refreshed on every later sighting of a vendor name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VendorUpdate {
    pub price: u32,
    pub rating: Option<f64>,
    pub review_count: Option<u32>,
    pub address: Option<String>,
    pub last_updated: DateTime<Utc>,
}
