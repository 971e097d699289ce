//! [`VendorStore`] over a PostgREST endpoint (`<store_url>/rest/v1/<table>`).

use pizzadb_core::{NewVendor, PipelineConfig, StoredVendor, VendorUpdate};
use reqwest::{Client, RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::store::{StoreError, VendorStore};
use crate::vendors::VendorRow;

const SELECT_COLUMNS: &str =
    "id,name,address,rating,reviews,yandex_link,price,delivery_time,website,last_updated";

/// Result row of a lookup, which selects `id` only.
#[derive(Debug, Deserialize)]
struct IdRow {
    id: i64,
}

/// Body of a `PATCH`: the mutable columns only.
#[derive(Debug, Serialize)]
struct UpdateBody<'a> {
    price: u32,
    rating: Option<f64>,
    reviews: Option<u32>,
    address: Option<&'a str>,
    last_updated: String,
}

/// Body of a `POST`: one full row without `id`.
#[derive(Debug, Serialize)]
struct InsertBody<'a> {
    name: &'a str,
    address: Option<&'a str>,
    rating: Option<f64>,
    reviews: Option<u32>,
    yandex_link: &'a str,
    price: u32,
    delivery_time: Option<&'a str>,
    website: Option<&'a str>,
    last_updated: String,
}

/// PostgREST-backed vendor store, authenticated with the service key.
pub struct RestVendorStore {
    client: Client,
    table_url: Url,
    key: String,
}

impl RestVendorStore {
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidUrl`] if `store_url` does not parse.
    pub fn new(
        client: Client,
        store_url: &str,
        key: &str,
        table: &str,
    ) -> Result<Self, StoreError> {
        let raw = format!("{}/rest/v1/{table}", store_url.trim_end_matches('/'));
        let table_url = Url::parse(&raw).map_err(|e| StoreError::InvalidUrl {
            url: raw.clone(),
            reason: e.to_string(),
        })?;
        Ok(Self {
            client,
            table_url,
            key: key.to_string(),
        })
    }

    /// # Errors
    ///
    /// Returns [`StoreError::InvalidUrl`] if the configured store URL does not parse.
    pub fn from_config(client: Client, config: &PipelineConfig) -> Result<Self, StoreError> {
        Self::new(client, &config.store_url, &config.store_key, &config.store_table)
    }

    fn url_with(&self, pairs: &[(&str, &str)]) -> Url {
        let mut url = self.table_url.clone();
        {
            let mut query = url.query_pairs_mut();
            for (key, value) in pairs {
                query.append_pair(key, value);
            }
        }
        url
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("apikey", &self.key)
            .bearer_auth(&self.key)
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, StoreError> {
        let response = self.authorized(request).send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(StoreError::UnexpectedStatus {
            status: status.as_u16(),
            body,
        })
    }

    async fn fetch_json<T: DeserializeOwned>(&self, url: Url, context: &str) -> Result<T, StoreError> {
        let response = self.send(self.client.get(url)).await?;
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| StoreError::Decode {
            context: context.to_string(),
            source: e,
        })
    }
}

impl VendorStore for RestVendorStore {
    async fn find_id_by_name(&self, name: &str) -> Result<Option<i64>, StoreError> {
        let filter = format!("eq.{name}");
        let url = self.url_with(&[
            ("select", "id"),
            ("name", filter.as_str()),
            ("order", "id.asc"),
            ("limit", "1"),
        ]);
        let rows: Vec<IdRow> = self.fetch_json(url, "vendor lookup").await?;
        Ok(rows.first().map(|row| row.id))
    }

    async fn update_by_name(&self, name: &str, update: &VendorUpdate) -> Result<(), StoreError> {
        let filter = format!("eq.{name}");
        let url = self.url_with(&[("name", filter.as_str())]);
        let body = UpdateBody {
            price: update.price,
            rating: update.rating,
            reviews: update.review_count,
            address: update.address.as_deref(),
            last_updated: update.last_updated.to_rfc3339(),
        };
        self.send(
            self.client
                .patch(url)
                .header("Prefer", "return=minimal")
                .json(&body),
        )
        .await?;
        Ok(())
    }

    async fn insert(&self, vendor: &NewVendor) -> Result<(), StoreError> {
        let body = [InsertBody {
            name: &vendor.name,
            address: vendor.address.as_deref(),
            rating: vendor.rating,
            reviews: vendor.review_count,
            yandex_link: &vendor.map_link,
            price: vendor.price,
            delivery_time: vendor.delivery_estimate.as_deref(),
            website: vendor.website_link.as_deref(),
            last_updated: vendor.last_updated.to_rfc3339(),
        }];
        self.send(
            self.client
                .post(self.table_url.clone())
                .header("Prefer", "return=minimal")
                .json(&body),
        )
        .await?;
        Ok(())
    }

    async fn list(&self, limit: u32) -> Result<Vec<StoredVendor>, StoreError> {
        let limit = limit.to_string();
        let url = self.url_with(&[
            ("select", SELECT_COLUMNS),
            ("order", "name.asc,id.asc"),
            ("limit", limit.as_str()),
        ]);
        let rows: Vec<VendorRow> = self.fetch_json(url, "vendor list").await?;
        rows.into_iter().map(StoredVendor::try_from).collect()
    }
}
