use std::path::Path;

use sqlrun_app::ports::{ExportError, ReportExporter};
use sqlrun_domain::{QueryDescriptor, RunReport};

/// One CSV row per attempted script, suitable for spreadsheet review or
/// ingestion by downstream tooling.
pub struct CsvExporter;

impl CsvExporter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for CsvExporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportExporter for CsvExporter {
    fn export(
        &self,
        report: &RunReport,
        _descriptors: &[QueryDescriptor],
        path: &Path,
    ) -> Result<(), ExportError> {
        let mut writer =
            csv::Writer::from_path(path).map_err(|e| ExportError::WriteError(e.to_string()))?;

        writer
            .write_record([
                "script_name",
                "status",
                "rows_affected",
                "execution_time_ms",
                "error_message",
            ])
            .map_err(|e| ExportError::SerializationError(e.to_string()))?;

        for result in report.results() {
            writer
                .write_record([
                    result.script_name.as_str(),
                    result.status.as_str(),
                    &result.rows_affected.to_string(),
                    &result.execution_time_ms.to_string(),
                    result.error_message.as_deref().unwrap_or(""),
                ])
                .map_err(|e| ExportError::SerializationError(e.to_string()))?;
        }

        writer
            .flush()
            .map_err(|e| ExportError::WriteError(e.to_string()))
    }
}
