//! Promo code collection: scrape the coupon listing, or serve a static list.

pub mod parse;

use pizzadb_core::{PipelineConfig, PromoRecord, PromoSource};
use reqwest::Client;

use crate::error::ScraperError;

pub use parse::parse_coupons;

/// Degraded-mode promo list served when scraping is disabled.
pub const STATIC_PROMOS: &[(&str, &str)] = &[
    ("PIZZA20", "Скидка 20% на пиццу при заказе от 800 ₽"),
    ("DODOFREE", "Пицца 25 см в подарок при первом заказе"),
    ("DOSTAVKA", "Бесплатная доставка пиццы от 1000 ₽"),
];

#[must_use]
pub fn static_promos() -> Vec<PromoRecord> {
    STATIC_PROMOS
        .iter()
        .map(|&(code, description)| PromoRecord {
            code: code.to_string(),
            description: description.to_string(),
        })
        .collect()
}

/// Source of promo records for one pipeline run.
pub enum PromoCollector {
    Scrape { client: Client, url: String },
    Static,
}

impl PromoCollector {
    #[must_use]
    pub fn from_config(client: Client, config: &PipelineConfig) -> Self {
        match config.promo_source {
            PromoSource::Scrape => Self::Scrape {
                client,
                url: config.promo_url.clone(),
            },
            PromoSource::Static => Self::Static,
        }
    }

    /// Collect promo records.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError`] if the coupon page cannot be fetched. The static
    /// strategy never fails.
    pub async fn collect(&self) -> Result<Vec<PromoRecord>, ScraperError> {
        match self {
            Self::Scrape { client, url } => scrape_promos(client, url).await,
            Self::Static => Ok(static_promos()),
        }
    }
}

/// Fetch the coupon listing page and extract pizza promo codes.
///
/// # Errors
///
/// - [`ScraperError::Http`] on network failure.
/// - [`ScraperError::UnexpectedStatus`] on a non-2xx status.
pub async fn scrape_promos(client: &Client, url: &str) -> Result<Vec<PromoRecord>, ScraperError> {
    let response = client
        .get(url)
        .header(reqwest::header::ACCEPT, "text/html,application/xhtml+xml")
        .send()
        .await?;
    let status = response.status();
    if !status.is_success() {
        return Err(ScraperError::UnexpectedStatus {
            status: status.as_u16(),
            url: url.to_owned(),
        });
    }

    let html = response.text().await?;
    let promos = parse_coupons(&html);
    tracing::info!(url, promos = promos.len(), "coupon page scraped");
    Ok(promos)
}
