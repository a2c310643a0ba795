use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use sqlrun_app::analysis::{analyze, keywords};
use sqlrun_app::ports::{ExportError, ReportExporter};
use sqlrun_domain::{ExecutionResult, QueryDescriptor, RunReport};

/// Renders a run as a Markdown summary: a run header followed by one section
/// per attempted script with the query in a fenced block, execution results,
/// parameters, and the SQL keywords found in the query. Descriptors are
/// matched to results by script name.
pub struct MarkdownExporter;

impl MarkdownExporter {
    pub fn new() -> Self {
        Self
    }

    pub fn render(report: &RunReport, descriptors: &[QueryDescriptor]) -> String {
        let summary = report.summary();
        let mut md = String::new();

        let _ = writeln!(md, "# Run {}\n", report.run_id);
        let _ = writeln!(md, "- **Started:** {}", report.started_at.to_rfc3339());
        let _ = writeln!(
            md,
            "- **Scripts:** {}/{} succeeded",
            summary.succeeded, summary.attempted
        );
        let _ = writeln!(md, "- **Total time:** {} ms", summary.total_execution_time_ms);
        let _ = writeln!(
            md,
            "- **Run:** {}",
            if summary.completed { "completed" } else { "aborted" }
        );

        for result in report.results() {
            let descriptor = descriptors.iter().find(|d| d.name == result.script_name);
            Self::render_script_section(&mut md, result, descriptor);
        }

        md
    }

    fn render_script_section(
        md: &mut String,
        result: &ExecutionResult,
        descriptor: Option<&QueryDescriptor>,
    ) {
        let _ = writeln!(md, "\n## {}\n", result.script_name);
        let _ = writeln!(md, "- **Status:** {}", result.status.as_str());
        let _ = writeln!(md, "- **Rows affected:** {}", result.rows_affected);
        let _ = writeln!(md, "- **Execution time:** {} ms", result.execution_time_ms);
        if let Some(error) = &result.error_message {
            let _ = writeln!(md, "- **Error:** `{}`", error);
        }

        let Some(descriptor) = descriptor else {
            return;
        };

        let _ = writeln!(md, "\n### Query\n\n```sql\n{}\n```", descriptor.query.trim());

        if let Some(description) = &descriptor.description {
            let _ = writeln!(md, "\n### Description\n\n{}", description);
        }

        if let Some(parameters) = &descriptor.parameters {
            let rendered = serde_json::to_string_pretty(parameters).unwrap_or_default();
            let _ = writeln!(md, "\n### Parameters\n\n```json\n{}\n```", rendered);
        }

        let analysis = analyze(&descriptor.query);
        let found = keywords(&descriptor.query);
        md.push('\n');
        if !found.is_empty() {
            let _ = writeln!(md, "- **Keywords:** {}", found.join(", "));
        }
        let _ = writeln!(
            md,
            "- **Complexity:** {} (score {}/100)",
            analysis.complexity.as_str(),
            analysis.performance_score
        );
    }
}

impl Default for MarkdownExporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportExporter for MarkdownExporter {
    fn export(
        &self,
        report: &RunReport,
        descriptors: &[QueryDescriptor],
        path: &Path,
    ) -> Result<(), ExportError> {
        let md = Self::render(report, descriptors);
        fs::write(path, md).map_err(|e| ExportError::WriteError(e.to_string()))
    }
}
