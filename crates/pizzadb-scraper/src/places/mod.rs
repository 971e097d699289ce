//! HTTP client for the geo-search provider.
//!
//! One GET per run, no retries. The API key travels as a query parameter, so
//! error contexts use the base URL only.

pub mod types;

use pizzadb_core::{PipelineConfig, VendorRecord};
use rand::Rng;
use reqwest::{Client, Url};

use crate::error::ScraperError;
use crate::filter::is_vendor;
use crate::normalize::vendor_record;
use crate::pricing::PriceEstimator;

use types::{GeoFeature, PlaceProperties};

/// Category term sent in the search text, ahead of the city name.
pub const SEARCH_TERM: &str = "пицца";

/// Client for the business search endpoint.
pub struct PlacesClient {
    client: Client,
    api_key: String,
    base_url: Url,
    city: String,
    lang: String,
    results: u32,
}

impl PlacesClient {
    /// Builds a client from the run configuration, sharing `client`.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::InvalidBaseUrl`] if `geo_search_url` does not parse.
    pub fn from_config(client: Client, config: &PipelineConfig) -> Result<Self, ScraperError> {
        let base_url =
            Url::parse(&config.geo_search_url).map_err(|e| ScraperError::InvalidBaseUrl {
                url: config.geo_search_url.clone(),
                reason: e.to_string(),
            })?;

        Ok(Self {
            client,
            api_key: config.geo_api_key.clone(),
            base_url,
            city: config.city.clone(),
            lang: config.geo_search_lang.clone(),
            results: config.geo_search_results,
        })
    }

    #[must_use]
    pub fn city(&self) -> &str {
        &self.city
    }

    /// Builds the search URL with percent-encoded query parameters.
    fn build_url(&self) -> Url {
        let mut url = self.base_url.clone();
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("apikey", &self.api_key);
            pairs.append_pair("text", &format!("{SEARCH_TERM} {}", self.city));
            pairs.append_pair("type", "biz");
            pairs.append_pair("lang", &self.lang);
            pairs.append_pair("results", &self.results.to_string());
        }
        url
    }

    /// Runs the search and returns every well-formed place, in provider order.
    ///
    /// Individual features that fail to deserialize (e.g. no `name`) are
    /// skipped; a body without a `features` array is an error.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::Http`] on network failure.
    /// - [`ScraperError::UnexpectedStatus`] on a non-2xx status.
    /// - [`ScraperError::Deserialize`] if the body is not JSON.
    /// - [`ScraperError::MissingFeatures`] if the results container is absent.
    pub async fn search(&self) -> Result<Vec<PlaceProperties>, ScraperError> {
        let url = self.build_url();
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(reqwest::Error::without_url)?;
        let status = response.status();
        if !status.is_success() {
            return Err(ScraperError::UnexpectedStatus {
                status: status.as_u16(),
                url: self.base_url.to_string(),
            });
        }

        let body = response.text().await.map_err(reqwest::Error::without_url)?;
        let mut value: serde_json::Value =
            serde_json::from_str(&body).map_err(|e| ScraperError::Deserialize {
                context: format!("geo-search response from {}", self.base_url),
                source: e,
            })?;

        let Some(serde_json::Value::Array(features)) =
            value.get_mut("features").map(serde_json::Value::take)
        else {
            return Err(ScraperError::MissingFeatures {
                url: self.base_url.to_string(),
            });
        };

        let places = features
            .into_iter()
            .enumerate()
            .filter_map(|(index, f)| match serde_json::from_value::<GeoFeature>(f) {
                Ok(feature) => Some(feature.properties),
                Err(e) => {
                    tracing::warn!(index, error = %e, "skipping malformed geo-search feature");
                    None
                }
            })
            .collect();

        Ok(places)
    }

    /// Searches, keeps pizza vendors, and prices each one.
    ///
    /// Places failing the vendor filter are dropped without being reported.
    ///
    /// # Errors
    ///
    /// Propagates any [`ScraperError`] from [`PlacesClient::search`].
    pub async fn collect_vendors<R: Rng>(
        &self,
        estimator: &mut PriceEstimator<R>,
    ) -> Result<Vec<VendorRecord>, ScraperError> {
        let places = self.search().await?;
        let found = places.len();

        let vendors: Vec<VendorRecord> = places
            .iter()
            .filter(|place| {
                let keep = is_vendor(&place.name);
                if !keep {
                    tracing::debug!(place = %place.name, "not a pizza vendor; skipping");
                }
                keep
            })
            .map(|place| {
                let price = estimator.estimate(&place.name);
                vendor_record(place, &self.city, price)
            })
            .collect();

        tracing::info!(found, vendors = vendors.len(), "geo-search places collected");
        Ok(vendors)
    }
}
