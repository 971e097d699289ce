//! Run orchestration: places, then promos, then reconciliation.
//!
//! Every external call is awaited before the next one starts. Collector
//! failures become diagnostics; only setup failures end the run early.

use std::env::VarError;

use pizzadb_core::{build_pipeline_config, PipelineConfig};
use pizzadb_db::{RestVendorStore, VendorStore};
use pizzadb_scraper::{build_http_client, PlacesClient, PriceEstimator, PromoCollector};
use rand::Rng;
use reqwest::Client;

use crate::error::PipelineError;
use crate::reconcile::reconcile;
use crate::types::{Diagnostic, RunSummary, Stage};

/// Validate configuration from `lookup`, then run against the REST store.
///
/// No network call happens when validation fails.
///
/// # Errors
///
/// Returns [`PipelineError::Config`] if a required credential is missing or a
/// value is invalid, or any setup error from [`run`].
pub async fn run_from_lookup<F>(lookup: F) -> Result<RunSummary, PipelineError>
where
    F: Fn(&str) -> Result<String, VarError>,
{
    let config = build_pipeline_config(lookup)?;
    run(&config).await
}

/// Run once with a store client built fresh from `config`.
///
/// # Errors
///
/// Returns [`PipelineError`] if the HTTP client, collectors, or store client
/// cannot be constructed.
pub async fn run(config: &PipelineConfig) -> Result<RunSummary, PipelineError> {
    let http = build_http_client(config.http_timeout_secs, &config.user_agent)?;
    let store = RestVendorStore::from_config(http.clone(), config)?;
    run_collectors(config, http, &store).await
}

/// Run once, reconciling into a caller-supplied store.
///
/// # Errors
///
/// Returns [`PipelineError::Setup`] if the HTTP client or place collector
/// cannot be constructed.
pub async fn run_with_store<S>(config: &PipelineConfig, store: &S) -> Result<RunSummary, PipelineError>
where
    S: VendorStore + Sync,
{
    let http = build_http_client(config.http_timeout_secs, &config.user_agent)?;
    run_collectors(config, http, store).await
}

async fn run_collectors<S>(
    config: &PipelineConfig,
    http: Client,
    store: &S,
) -> Result<RunSummary, PipelineError>
where
    S: VendorStore + Sync,
{
    let places = PlacesClient::from_config(http.clone(), config)?;
    let promos = PromoCollector::from_config(http, config);
    let mut estimator = PriceEstimator::from_os_rng();

    Ok(run_with(&places, &promos, store, &mut estimator).await)
}

/// Run once with every collaborator injected.
pub async fn run_with<S, R>(
    places: &PlacesClient,
    promos: &PromoCollector,
    store: &S,
    estimator: &mut PriceEstimator<R>,
) -> RunSummary
where
    S: VendorStore + Sync,
    R: Rng + Send,
{
    tracing::info!(city = %places.city(), "pipeline run started");
    let mut diagnostics = Vec::new();

    let vendors = match places.collect_vendors(estimator).await {
        Ok(vendors) => vendors,
        Err(e) => {
            tracing::warn!(error = %e, "place collection failed; continuing with no vendors");
            diagnostics.push(Diagnostic::new(Stage::Places, e.to_string()));
            Vec::new()
        }
    };

    // Collected for observability only; promos are not persisted.
    let promos_collected = match promos.collect().await {
        Ok(promos) => promos.len(),
        Err(e) => {
            tracing::warn!(error = %e, "promo collection failed; continuing with no promos");
            diagnostics.push(Diagnostic::new(Stage::Promos, e.to_string()));
            0
        }
    };

    let report = reconcile(store, &vendors).await;
    diagnostics.extend(report.diagnostics.iter().cloned());

    let summary = RunSummary {
        updated: vendors.len(),
        promos_collected,
        reconcile: report,
        diagnostics,
    };
    tracing::info!(
        updated = summary.updated,
        promos = summary.promos_collected,
        diagnostics = summary.diagnostics.len(),
        "pipeline run finished"
    );
    summary
}
