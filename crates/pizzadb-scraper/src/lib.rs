//! Collectors for the pizza vendor catalog: geo-search places and promo codes.

pub mod error;
pub mod filter;
pub mod normalize;
pub mod places;
pub mod pricing;
pub mod promos;

pub use error::ScraperError;
pub use filter::is_vendor;
pub use normalize::{map_link, vendor_record};
pub use places::PlacesClient;
pub use pricing::{brand_price, PriceEstimator};
pub use promos::{parse_coupons, static_promos, PromoCollector};

/// Shared HTTP client for one run.
///
/// No timeout is set unless `timeout_secs` is given, so by default requests
/// wait as long as the transport does.
///
/// # Errors
///
/// Returns [`ScraperError::Http`] if the `reqwest::Client` cannot be built.
pub fn build_http_client(
    timeout_secs: Option<u64>,
    user_agent: &str,
) -> Result<reqwest::Client, ScraperError> {
    let mut builder = reqwest::Client::builder().user_agent(user_agent);
    if let Some(secs) = timeout_secs {
        builder = builder.timeout(std::time::Duration::from_secs(secs));
    }
    Ok(builder.build()?)
}
