//! Read operations for the `pizza_places` table.

use sqlx::PgPool;

use super::types::VendorRow;

/// Id of the lowest-id vendor with exactly this name.
///
/// # Errors
///
/// Returns [`sqlx::Error`] if the query fails.
pub async fn get_vendor_id_by_name(pool: &PgPool, name: &str) -> Result<Option<i64>, sqlx::Error> {
    sqlx::query_scalar::<_, i64>(
        "SELECT id FROM pizza_places \
         WHERE name = $1 \
         ORDER BY id \
         LIMIT 1",
    )
    .bind(name)
    .fetch_optional(pool)
    .await
}

/// List vendors ordered by name.
///
/// # Errors
///
/// Returns [`sqlx::Error`] if the query fails.
pub async fn list_vendors(pool: &PgPool, limit: i64) -> Result<Vec<VendorRow>, sqlx::Error> {
    sqlx::query_as::<_, VendorRow>(
        "SELECT id, name, address, rating, reviews, yandex_link, price, \
                delivery_time, website, last_updated \
         FROM pizza_places \
         ORDER BY name, id \
         LIMIT $1",
    )
    .bind(limit)
    .fetch_all(pool)
    .await
}
