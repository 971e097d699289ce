//! Live integration tests for `PgVendorStore` using `#[sqlx::test]`.
//!
//! Each test gets a fresh, fully-migrated Postgres database spun up by the
//! sqlx test harness. Run with `DATABASE_URL` set and `--ignored`.

use chrono::Utc;
use pizzadb_core::{NewVendor, StoredVendor, VendorUpdate};
use pizzadb_db::{PgVendorStore, VendorStore};

fn new_vendor(name: &str, price: u32) -> NewVendor {
    NewVendor {
        name: name.to_string(),
        address: Some("Коммунистическая ул., 50".to_string()),
        rating: Some(4.5),
        review_count: Some(120),
        map_link: "https://yandex.ru/maps/?text=x".to_string(),
        price,
        delivery_estimate: Some("30-45 мин".to_string()),
        website_link: None,
        last_updated: Utc::now(),
    }
}

async fn only_vendor(store: &PgVendorStore) -> StoredVendor {
    let mut rows = store.list(10).await.expect("list");
    assert_eq!(rows.len(), 1);
    rows.remove(0)
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore = "requires a live Postgres via DATABASE_URL"]
async fn insert_then_find_round_trips(pool: sqlx::PgPool) {
    let store = PgVendorStore::new(pool);
    store.insert(&new_vendor("Додо Пицца", 349)).await.expect("insert");

    let id = store.find_id_by_name("Додо Пицца").await.expect("find");
    assert!(id.is_some());

    let vendor = only_vendor(&store).await;
    assert_eq!(vendor.price, 349);
    assert_eq!(vendor.review_count, Some(120));
    assert_eq!(vendor.delivery_estimate.as_deref(), Some("30-45 мин"));
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore = "requires a live Postgres via DATABASE_URL"]
async fn update_by_name_changes_only_mutable_columns(pool: sqlx::PgPool) {
    let store = PgVendorStore::new(pool);
    store.insert(&new_vendor("Папа Джонс", 399)).await.expect("insert");

    let update = VendorUpdate {
        price: 420,
        rating: Some(3.9),
        review_count: Some(121),
        address: None,
        last_updated: Utc::now(),
    };
    store.update_by_name("Папа Джонс", &update).await.expect("update");

    let vendor = only_vendor(&store).await;
    assert_eq!(vendor.price, 420);
    assert_eq!(vendor.rating, Some(3.9));
    assert!(vendor.address.is_none());
    assert_eq!(vendor.delivery_estimate.as_deref(), Some("30-45 мин"));
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore = "requires a live Postgres via DATABASE_URL"]
async fn list_orders_by_name(pool: sqlx::PgPool) {
    let store = PgVendorStore::new(pool);
    for name in ["Теремок", "Додо Пицца"] {
        store.insert(&new_vendor(name, 300)).await.expect("insert");
    }

    let names: Vec<String> = store
        .list(10)
        .await
        .expect("list")
        .into_iter()
        .map(|v| v.name)
        .collect();
    assert_eq!(names, vec!["Додо Пицца".to_string(), "Теремок".to_string()]);
}
