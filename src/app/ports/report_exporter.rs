use std::path::Path;

use thiserror::Error;

use sqlrun_domain::{QueryDescriptor, RunReport};

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Write error: {0}")]
    WriteError(String),
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

/// Renders a finished run into a human-facing artifact (HTML page, CSV file).
/// `descriptors` carry the query text and metadata for the scripts that were
/// part of the batch, matched to results by script name.
pub trait ReportExporter: Send + Sync {
    fn export(
        &self,
        report: &RunReport,
        descriptors: &[QueryDescriptor],
        path: &Path,
    ) -> Result<(), ExportError>;
}
