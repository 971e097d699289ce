//! Integration tests for `RestVendorStore` using wiremock HTTP mocks.

use chrono::{TimeZone, Utc};
use pizzadb_core::{NewVendor, VendorUpdate};
use pizzadb_db::{RestVendorStore, StoreError, VendorStore};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TABLE_PATH: &str = "/rest/v1/pizza_places";

fn test_store(base_url: &str) -> RestVendorStore {
    RestVendorStore::new(reqwest::Client::new(), base_url, "service-key", "pizza_places")
        .expect("store construction should not fail")
}

fn row_json(id: i64, name: &str, price: i32) -> serde_json::Value {
    json!({
        "id": id,
        "name": name,
        "address": "ул. Ленина, 1",
        "rating": 4.5,
        "reviews": 120,
        "yandex_link": "https://yandex.ru/maps/?text=x",
        "price": price,
        "delivery_time": "30-45 мин",
        "website": null,
        "last_updated": "2025-03-01T12:00:00+00:00"
    })
}

#[tokio::test]
async fn find_id_by_name_selects_id_with_exact_filter_and_auth_headers() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(TABLE_PATH))
        .and(query_param("select", "id"))
        .and(query_param("name", "eq.Додо Пицца"))
        .and(query_param("order", "id.asc"))
        .and(query_param("limit", "1"))
        .and(header("apikey", "service-key"))
        .and(header("authorization", "Bearer service-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{ "id": 3 }])))
        .expect(1)
        .mount(&server)
        .await;

    let id = test_store(&server.uri())
        .find_id_by_name("Додо Пицца")
        .await
        .expect("lookup");

    assert_eq!(id, Some(3));
}

#[tokio::test]
async fn legacy_row_without_timestamp_is_still_found_and_updated() {
    let server = MockServer::start().await;
    let mut legacy = row_json(1, "Додо Пицца", 349);
    legacy["last_updated"] = serde_json::Value::Null;
    legacy["reviews"] = json!(-1);
    Mock::given(method("GET"))
        .and(path(TABLE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([legacy])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .and(path(TABLE_PATH))
        .and(query_param("name", "eq.Додо Пицца"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let store = test_store(&server.uri());
    let id = store.find_id_by_name("Додо Пицца").await.expect("lookup");
    assert_eq!(id, Some(1));

    let update = VendorUpdate {
        price: 349,
        rating: Some(4.5),
        review_count: Some(120),
        address: None,
        last_updated: Utc::now(),
    };
    store
        .update_by_name("Додо Пицца", &update)
        .await
        .expect("update");
}

#[tokio::test]
async fn find_id_by_name_returns_none_for_empty_array() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(TABLE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let found = test_store(&server.uri())
        .find_id_by_name("Кафе Уют")
        .await
        .expect("lookup");
    assert!(found.is_none());
}

#[tokio::test]
async fn update_by_name_patches_mutable_columns() {
    let server = MockServer::start().await;
    let when = Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap();
    Mock::given(method("PATCH"))
        .and(path(TABLE_PATH))
        .and(query_param("name", "eq.Папа Джонс"))
        .and(header("prefer", "return=minimal"))
        .and(body_json(json!({
            "price": 399,
            "rating": 4.1,
            "reviews": 15,
            "address": null,
            "last_updated": when.to_rfc3339()
        })))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let update = VendorUpdate {
        price: 399,
        rating: Some(4.1),
        review_count: Some(15),
        address: None,
        last_updated: when,
    };
    test_store(&server.uri())
        .update_by_name("Папа Джонс", &update)
        .await
        .expect("update");
}

#[tokio::test]
async fn insert_posts_single_row_array() {
    let server = MockServer::start().await;
    let when = Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap();
    Mock::given(method("POST"))
        .and(path(TABLE_PATH))
        .and(body_json(json!([{
            "name": "Теремок",
            "address": null,
            "rating": null,
            "reviews": null,
            "yandex_link": "https://yandex.ru/maps/?text=t",
            "price": 250,
            "delivery_time": "30-45 мин",
            "website": "https://teremok.example",
            "last_updated": when.to_rfc3339()
        }])))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    let vendor = NewVendor {
        name: "Теремок".to_string(),
        address: None,
        rating: None,
        review_count: None,
        map_link: "https://yandex.ru/maps/?text=t".to_string(),
        price: 250,
        delivery_estimate: Some("30-45 мин".to_string()),
        website_link: Some("https://teremok.example".to_string()),
        last_updated: when,
    };
    test_store(&server.uri()).insert(&vendor).await.expect("insert");
}

#[tokio::test]
async fn error_status_surfaces_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(401).set_body_string("invalid api key"))
        .mount(&server)
        .await;

    let vendor = NewVendor {
        name: "Додо Пицца".to_string(),
        address: None,
        rating: None,
        review_count: None,
        map_link: "x".to_string(),
        price: 349,
        delivery_estimate: None,
        website_link: None,
        last_updated: Utc::now(),
    };
    let err = test_store(&server.uri()).insert(&vendor).await.unwrap_err();
    match err {
        StoreError::UnexpectedStatus { status, body } => {
            assert_eq!(status, 401);
            assert_eq!(body, "invalid api key");
        }
        other => panic!("expected UnexpectedStatus, got {other:?}"),
    }
}

#[tokio::test]
async fn malformed_lookup_body_is_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{\"message\":\"oops\"}"))
        .mount(&server)
        .await;

    let err = test_store(&server.uri())
        .find_id_by_name("Додо Пицца")
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::Decode { .. }), "got {err:?}");
}

#[tokio::test]
async fn list_requests_ordered_limited_rows() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(TABLE_PATH))
        .and(query_param("order", "name.asc,id.asc"))
        .and(query_param("limit", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            row_json(1, "Додо Пицца", 349),
            row_json(2, "Папа Джонс", 399)
        ])))
        .mount(&server)
        .await;

    let vendors = test_store(&server.uri()).list(2).await.expect("list");
    assert_eq!(vendors.len(), 2);
    assert_eq!(vendors[1].name, "Папа Джонс");
}
