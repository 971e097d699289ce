//! Write operations for the `pizza_places` table.

use pizzadb_core::{NewVendor, VendorUpdate};
use sqlx::PgPool;

use super::types::to_column_int;

/// Refresh the mutable columns of every row named `name`.
///
/// Returns the number of rows touched.
///
/// # Errors
///
/// Returns [`sqlx::Error`] if the query fails.
pub async fn update_vendor_by_name(
    pool: &PgPool,
    name: &str,
    update: &VendorUpdate,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        "UPDATE pizza_places SET \
             price        = $2, \
             rating       = $3, \
             reviews      = $4, \
             address      = $5, \
             last_updated = $6 \
         WHERE name = $1",
    )
    .bind(name)
    .bind(to_column_int(update.price))
    .bind(update.rating)
    .bind(update.review_count.map(to_column_int))
    .bind(update.address.as_deref())
    .bind(update.last_updated)
    .execute(pool)
    .await?;

    Ok(result.rows_affected())
}

/// Insert a first sighting of a vendor and return its new id.
///
/// # Errors
///
/// Returns [`sqlx::Error`] if the insert fails.
pub async fn insert_vendor(pool: &PgPool, vendor: &NewVendor) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>(
        "INSERT INTO pizza_places \
             (name, address, rating, reviews, yandex_link, price, delivery_time, website, last_updated) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) \
         RETURNING id",
    )
    .bind(&vendor.name)
    .bind(vendor.address.as_deref())
    .bind(vendor.rating)
    .bind(vendor.review_count.map(to_column_int))
    .bind(&vendor.map_link)
    .bind(to_column_int(vendor.price))
    .bind(vendor.delivery_estimate.as_deref())
    .bind(vendor.website_link.as_deref())
    .bind(vendor.last_updated)
    .fetch_one(pool)
    .await
}
