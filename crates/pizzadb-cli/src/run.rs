//! `run` command handler.

use pizzadb_core::AppConfig;
use pizzadb_db::{MemoryVendorStore, PgVendorStore};
use pizzadb_pipeline::RunSummary;

/// Where a CLI-triggered run reconciles its vendors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum StoreTarget {
    Rest,
    Postgres,
    DryRun,
}

impl StoreTarget {
    pub(crate) fn from_flags(dry_run: bool, postgres: bool) -> Self {
        if dry_run {
            Self::DryRun
        } else if postgres {
            Self::Postgres
        } else {
            Self::Rest
        }
    }
}

/// Run the pipeline once and print its summary.
///
/// Pipeline credentials are validated before any network call.
///
/// # Errors
///
/// Returns an error on missing or invalid configuration, or if a store or
/// collector cannot be constructed. Collector and per-vendor failures are
/// reported in the summary, not returned.
pub(crate) async fn run_pipeline(app: &AppConfig, target: StoreTarget) -> anyhow::Result<()> {
    let config = pizzadb_core::load_pipeline_config_from_env()?;

    let summary = match target {
        StoreTarget::Rest => pizzadb_pipeline::run(&config).await?,
        StoreTarget::Postgres => {
            let pool = pizzadb_db::connect_pool_from_config(app).await?;
            let store = PgVendorStore::new(pool);
            pizzadb_pipeline::run_with_store(&config, &store).await?
        }
        StoreTarget::DryRun => {
            let store = MemoryVendorStore::new();
            let summary = pizzadb_pipeline::run_with_store(&config, &store).await?;
            let written = store.snapshot();
            println!("dry-run: {} vendor(s) would be written", written.len());
            for vendor in &written {
                println!("  {:<40}{:>6}", vendor.name, vendor.price);
            }
            summary
        }
    };

    for line in summary_lines(&summary) {
        println!("{line}");
    }
    Ok(())
}

pub(crate) fn summary_lines(summary: &RunSummary) -> Vec<String> {
    let mut lines = vec![format!(
        "updated {} vendor(s): {} inserted, {} updated, {} failed; {} promo(s) collected",
        summary.updated,
        summary.reconcile.inserted,
        summary.reconcile.updated,
        summary.reconcile.failed,
        summary.promos_collected,
    )];
    lines.extend(
        summary
            .diagnostics
            .iter()
            .map(|d| format!("warning [{}]: {}", d.stage, d.message)),
    );
    lines
}

#[cfg(test)]
mod tests {
    use pizzadb_pipeline::{Diagnostic, ReconcileReport, Stage};

    use super::*;

    #[test]
    fn store_target_prefers_dry_run() {
        assert_eq!(StoreTarget::from_flags(true, false), StoreTarget::DryRun);
        assert_eq!(StoreTarget::from_flags(false, true), StoreTarget::Postgres);
        assert_eq!(StoreTarget::from_flags(false, false), StoreTarget::Rest);
    }

    #[test]
    fn summary_lines_list_counts_then_diagnostics() {
        let summary = RunSummary {
            updated: 3,
            promos_collected: 2,
            reconcile: ReconcileReport {
                inserted: 1,
                updated: 1,
                failed: 1,
                diagnostics: vec![],
            },
            diagnostics: vec![Diagnostic::new(Stage::Reconcile, "Додо Пицца: store unavailable")],
        };

        let lines = summary_lines(&summary);
        assert_eq!(
            lines[0],
            "updated 3 vendor(s): 1 inserted, 1 updated, 1 failed; 2 promo(s) collected"
        );
        assert_eq!(lines[1], "warning [reconcile]: Додо Пицца: store unavailable");
    }
}
