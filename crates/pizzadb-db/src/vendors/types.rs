//! Row type for the `pizza_places` table.

use chrono::{DateTime, Utc};
use pizzadb_core::StoredVendor;
use serde::Deserialize;

use crate::store::StoreError;

/// A row from the `pizza_places` table, as read over SQL or PostgREST.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow, Deserialize)]
pub struct VendorRow {
    pub id: i64,
    pub name: String,
    pub address: Option<String>,
    pub rating: Option<f64>,
    pub reviews: Option<i32>,
    pub yandex_link: Option<String>,
    pub price: i32,
    pub delivery_time: Option<String>,
    pub website: Option<String>,
    pub last_updated: DateTime<Utc>,
}

impl TryFrom<VendorRow> for StoredVendor {
    type Error = StoreError;

    fn try_from(row: VendorRow) -> Result<Self, Self::Error> {
        let price = u32::try_from(row.price).map_err(|_| StoreError::InvalidRow {
            id: row.id,
            reason: format!("negative price {}", row.price),
        })?;
        let review_count = row
            .reviews
            .map(|n| {
                u32::try_from(n).map_err(|_| StoreError::InvalidRow {
                    id: row.id,
                    reason: format!("negative review count {n}"),
                })
            })
            .transpose()?;

        Ok(StoredVendor {
            id: row.id,
            name: row.name,
            address: row.address,
            rating: row.rating,
            review_count,
            map_link: row.yandex_link,
            price,
            delivery_estimate: row.delivery_time,
            website_link: row.website,
            last_updated: row.last_updated,
        })
    }
}

/// Clamp a count into the `INTEGER` column range.
pub(crate) fn to_column_int(value: u32) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row() -> VendorRow {
        VendorRow {
            id: 7,
            name: "Додо Пицца".to_string(),
            address: Some("ул. Ленина, 1".to_string()),
            rating: Some(4.5),
            reviews: Some(120),
            yandex_link: Some("https://yandex.ru/maps/?text=x".to_string()),
            price: 349,
            delivery_time: Some("30-45 мин".to_string()),
            website: None,
            last_updated: Utc::now(),
        }
    }

    #[test]
    fn row_maps_column_names_onto_domain_fields() {
        let vendor = StoredVendor::try_from(row()).expect("valid row");
        assert_eq!(vendor.id, 7);
        assert_eq!(vendor.review_count, Some(120));
        assert_eq!(vendor.price, 349);
        assert_eq!(vendor.delivery_estimate.as_deref(), Some("30-45 мин"));
        assert_eq!(vendor.map_link.as_deref(), Some("https://yandex.ru/maps/?text=x"));
    }

    #[test]
    fn negative_price_is_rejected() {
        let mut bad = row();
        bad.price = -1;
        let err = StoredVendor::try_from(bad).unwrap_err();
        assert!(matches!(err, StoreError::InvalidRow { id: 7, .. }));
    }

    #[test]
    fn negative_review_count_is_rejected() {
        let mut bad = row();
        bad.reviews = Some(-3);
        assert!(StoredVendor::try_from(bad).is_err());
    }

    #[test]
    fn to_column_int_saturates() {
        assert_eq!(to_column_int(42), 42);
        assert_eq!(to_column_int(u32::MAX), i32::MAX);
    }

    #[test]
    fn deserializes_postgrest_row() {
        let json = serde_json::json!({
            "id": 1,
            "name": "Папа Джонс",
            "address": null,
            "rating": null,
            "reviews": null,
            "yandex_link": null,
            "price": 399,
            "delivery_time": null,
            "website": null,
            "last_updated": "2025-03-01T12:00:00+00:00"
        });
        let row: VendorRow = serde_json::from_value(json).expect("row");
        assert_eq!(row.price, 399);
        assert!(row.reviews.is_none());
    }
}
