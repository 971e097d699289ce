//! Upsert-by-name of collected vendor records into a [`VendorStore`].

use chrono::Utc;
use pizzadb_core::VendorRecord;
use pizzadb_db::{StoreError, VendorStore};

use crate::types::{Diagnostic, ReconcileReport, Stage};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    Inserted,
    Updated,
}

/// Merge `vendors` into `store`, one record at a time in input order.
///
/// Each record is one lookup by exact name followed by either an update of the
/// matched rows or an insert. A failure on one record is logged and counted;
/// the remaining records are still processed. Nothing is transactional across
/// the batch.
pub async fn reconcile<S>(store: &S, vendors: &[VendorRecord]) -> ReconcileReport
where
    S: VendorStore + Sync,
{
    let mut report = ReconcileReport::default();

    for vendor in vendors {
        match upsert(store, vendor).await {
            Ok(Outcome::Inserted) => report.inserted += 1,
            Ok(Outcome::Updated) => report.updated += 1,
            Err(e) => {
                tracing::warn!(vendor = %vendor.name, error = %e, "failed to reconcile vendor");
                report.failed += 1;
                report
                    .diagnostics
                    .push(Diagnostic::new(Stage::Reconcile, format!("{}: {e}", vendor.name)));
            }
        }
    }

    tracing::info!(
        inserted = report.inserted,
        updated = report.updated,
        failed = report.failed,
        "reconciliation finished"
    );
    report
}

async fn upsert<S>(store: &S, vendor: &VendorRecord) -> Result<Outcome, StoreError>
where
    S: VendorStore + Sync,
{
    let existing = store.find_id_by_name(&vendor.name).await?;
    let now = Utc::now();

    if let Some(id) = existing {
        tracing::debug!(vendor = %vendor.name, id, "updating existing vendor");
        store
            .update_by_name(&vendor.name, &vendor.to_update(now))
            .await?;
        Ok(Outcome::Updated)
    } else {
        tracing::debug!(vendor = %vendor.name, "inserting new vendor");
        store.insert(&vendor.to_new_vendor(now)).await?;
        Ok(Outcome::Inserted)
    }
}
