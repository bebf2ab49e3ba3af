/// Resource and PersistentVolume export
pub mod pv;
pub mod resources;
pub mod writer;

pub use pv::PvExporter;
pub use resources::ResourceExporter;

use std::path::PathBuf;
use thiserror::Error;
use tracing::{info, warn};

use crate::k8s::listing::ListingError;

/// A failure that was recorded and skipped during an export run
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to query {target}: {reason}")]
    Query { target: String, reason: String },

    #[error("failed to decode {kind} listing in namespace {namespace}: {source}")]
    Listing {
        kind: String,
        namespace: String,
        #[source]
        source: ListingError,
    },

    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ExportError {
    pub(crate) fn query(target: impl Into<String>, err: &anyhow::Error) -> Self {
        Self::Query {
            target: target.into(),
            reason: format!("{:#}", err),
        }
    }
}

/// Outcome of one export run
#[derive(Debug, Default)]
pub struct ExportReport {
    /// Files written, in write order
    pub written: Vec<PathBuf>,
    /// Listed objects dropped for lacking a namespace
    pub cluster_scoped_skipped: usize,
    /// Failures that were logged and skipped
    pub failures: Vec<ExportError>,
}

impl ExportReport {
    pub(crate) fn record_failure(&mut self, err: ExportError) {
        warn!("{}, skipping", err);
        self.failures.push(err);
    }

    /// Log a one-line summary plus every recorded failure
    pub fn log_summary(&self, what: &str) {
        info!(
            "Exported {} {} file(s), {} failure(s), {} cluster-scoped object(s) skipped",
            self.written.len(),
            what,
            self.failures.len(),
            self.cluster_scoped_skipped
        );
        for failure in &self.failures {
            warn!("  - {}", failure);
        }
    }

    /// Error if any failure was recorded
    pub fn into_result(self) -> anyhow::Result<()> {
        if self.failures.is_empty() {
            Ok(())
        } else {
            anyhow::bail!(
                "export finished with {} failure(s); first: {}",
                self.failures.len(),
                self.failures[0]
            )
        }
    }
}
