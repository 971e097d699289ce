//! `vendors` command handlers.

use clap::Subcommand;
use pizzadb_core::{AppConfig, StoredVendor};
use pizzadb_db::{PgVendorStore, RestVendorStore, VendorStore};

/// Sub-commands available under `vendors`.
#[derive(Debug, Subcommand)]
pub enum VendorsCommands {
    /// List stored vendors ordered by name
    List {
        /// Maximum number of vendors to show
        #[arg(long, default_value = "50")]
        limit: u32,
        /// Read from the Postgres database at DATABASE_URL instead of the REST store
        #[arg(long)]
        postgres: bool,
    },
}

/// # Errors
///
/// Returns an error if configuration is missing or the store query fails.
pub(crate) async fn run_vendors(config: &AppConfig, command: VendorsCommands) -> anyhow::Result<()> {
    match command {
        VendorsCommands::List { limit, postgres } => {
            let vendors = if postgres {
                let pool = pizzadb_db::connect_pool_from_config(config).await?;
                PgVendorStore::new(pool).list(limit).await?
            } else {
                let pipeline = pizzadb_core::load_pipeline_config_from_env()?;
                let http =
                    pizzadb_scraper::build_http_client(pipeline.http_timeout_secs, &pipeline.user_agent)?;
                RestVendorStore::from_config(http, &pipeline)?.list(limit).await?
            };
            print_vendors(&vendors);
            Ok(())
        }
    }
}

fn print_vendors(vendors: &[StoredVendor]) {
    if vendors.is_empty() {
        println!("no vendors stored; run `pizzadb-cli run` first");
        return;
    }

    println!("{:<40}{:>7}{:>8}{:>9}  LAST UPDATED", "NAME", "PRICE", "RATING", "REVIEWS");
    for vendor in vendors {
        println!("{}", format_vendor_row(vendor));
    }
}

fn format_vendor_row(vendor: &StoredVendor) -> String {
    let rating = vendor
        .rating
        .map_or_else(|| "\u{2014}".to_string(), |r| format!("{r:.1}"));
    let reviews = vendor
        .review_count
        .map_or_else(|| "\u{2014}".to_string(), |n| n.to_string());
    format!(
        "{:<40}{:>7}{:>8}{:>9}  {}",
        vendor.name,
        vendor.price,
        rating,
        reviews,
        vendor.last_updated.format("%Y-%m-%d %H:%M"),
    )
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;

    fn vendor(rating: Option<f64>, reviews: Option<u32>) -> StoredVendor {
        StoredVendor {
            id: 1,
            name: "Додо Пицца".to_string(),
            address: None,
            rating,
            review_count: reviews,
            map_link: None,
            price: 349,
            delivery_estimate: None,
            website_link: None,
            last_updated: Utc.with_ymd_and_hms(2025, 3, 1, 12, 30, 0).unwrap(),
        }
    }

    #[test]
    fn row_shows_rating_reviews_and_timestamp() {
        let row = format_vendor_row(&vendor(Some(4.46), Some(120)));
        assert!(row.contains("349"));
        assert!(row.contains("4.5"));
        assert!(row.contains("120"));
        assert!(row.ends_with("2025-03-01 12:30"));
    }

    #[test]
    fn missing_rating_and_reviews_render_as_dash() {
        let row = format_vendor_row(&vendor(None, None));
        assert_eq!(row.matches('\u{2014}').count(), 2);
    }
}
