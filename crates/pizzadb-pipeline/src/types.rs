use serde::Serialize;

/// Pipeline stage a recovered failure came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Places,
    Promos,
    Reconcile,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Stage::Places => write!(f, "places"),
            Stage::Promos => write!(f, "promos"),
            Stage::Reconcile => write!(f, "reconcile"),
        }
    }
}

/// A failure that was logged and absorbed instead of failing the run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub stage: Stage,
    pub message: String,
}

impl Diagnostic {
    pub fn new(stage: Stage, message: impl Into<String>) -> Self {
        Self {
            stage,
            message: message.into(),
        }
    }
}

/// Per-batch reconciliation outcome.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReconcileReport {
    pub inserted: usize,
    pub updated: usize,
    pub failed: usize,
    pub diagnostics: Vec<Diagnostic>,
}

/// Result of one completed run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    /// Vendor records produced by the place collector. A throughput count,
    /// not the number of rows changed in the store.
    pub updated: usize,
    pub promos_collected: usize,
    pub reconcile: ReconcileReport,
    /// Every recovered failure of the run, collectors first.
    pub diagnostics: Vec<Diagnostic>,
}
