use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use sqlrun_app::analysis::{QueryAnalysis, analyze};
use sqlrun_app::ports::{ExportError, ReportExporter};
use sqlrun_domain::{ExecutionResult, QueryDescriptor, RunReport};

/// Renders a run as a standalone HTML page: one card per attempted script
/// with the query text, execution outcome, metadata, and a complexity
/// estimate. Descriptors are matched to results by script name.
pub struct HtmlExporter;

impl HtmlExporter {
    pub fn new() -> Self {
        Self
    }

    fn escape_html(s: &str) -> String {
        s.replace('&', "&amp;")
            .replace('<', "&lt;")
            .replace('>', "&gt;")
            .replace('"', "&quot;")
    }

    pub fn render(report: &RunReport, descriptors: &[QueryDescriptor]) -> String {
        let summary = report.summary();
        let mut html = String::new();

        html.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
        html.push_str("<title>sqlrun report</title>\n</head>\n");
        html.push_str("<body style=\"font-family: Arial, sans-serif; max-width: 800px; margin: 0 auto;\">\n");

        let _ = writeln!(html, "<h1 style=\"color: #333;\">Run {}</h1>", report.run_id);
        let _ = writeln!(
            html,
            "<p><strong>Started:</strong> {}</p>",
            report.started_at.to_rfc3339()
        );
        let _ = writeln!(
            html,
            "<p><strong>Scripts:</strong> {}/{} succeeded &middot; <strong>Total time:</strong> {} ms &middot; <strong>Run:</strong> {}</p>",
            summary.succeeded,
            summary.attempted,
            summary.total_execution_time_ms,
            if summary.completed { "completed" } else { "aborted" },
        );

        for result in report.results() {
            let descriptor = descriptors.iter().find(|d| d.name == result.script_name);
            Self::render_script_card(&mut html, result, descriptor);
        }

        html.push_str("</body>\n</html>\n");
        html
    }

    fn render_script_card(
        html: &mut String,
        result: &ExecutionResult,
        descriptor: Option<&QueryDescriptor>,
    ) {
        let name = Self::escape_html(&result.script_name);
        let (badge_color, badge_bg) = if result.is_failure() {
            ("#8a1f1f", "#fdecea")
        } else {
            ("#2d5a2d", "#e8f5e8")
        };

        let _ = writeln!(html, "<h2 style=\"color: #333;\">{}</h2>", name);

        if let Some(descriptor) = descriptor {
            let _ = writeln!(
                html,
                "<div style=\"background: #f5f5f5; padding: 15px; border-radius: 5px; margin: 10px 0;\">\n<h3 style=\"color: #666; margin-top: 0;\">Query</h3>\n<pre style=\"background: #fff; padding: 10px; border-left: 4px solid #007acc; overflow-x: auto;\"><code>{}</code></pre>\n</div>",
                Self::escape_html(&descriptor.query)
            );

            if let Some(description) = &descriptor.description {
                let _ = writeln!(
                    html,
                    "<p><strong>Description:</strong> {}</p>",
                    Self::escape_html(description)
                );
            }
        }

        let _ = writeln!(
            html,
            "<div style=\"background: {}; padding: 15px; border-radius: 5px; margin: 10px 0;\">\n<h3 style=\"color: {}; margin-top: 0;\">Execution</h3>",
            badge_bg, badge_color
        );
        let _ = writeln!(
            html,
            "<p><strong>Status:</strong> {}</p>\n<p><strong>Rows affected:</strong> {}</p>\n<p><strong>Execution time:</strong> {} ms</p>",
            result.status.as_str(),
            result.rows_affected,
            result.execution_time_ms
        );
        if let Some(error) = &result.error_message {
            let _ = writeln!(
                html,
                "<p><strong>Error:</strong> <code>{}</code></p>",
                Self::escape_html(error)
            );
        }
        html.push_str("</div>\n");

        if let Some(descriptor) = descriptor {
            Self::render_metadata(html, descriptor, analyze(&descriptor.query));
        }
    }

    fn render_metadata(html: &mut String, descriptor: &QueryDescriptor, analysis: QueryAnalysis) {
        html.push_str(
            "<div style=\"background: #f0f8ff; padding: 15px; border-radius: 5px; margin: 10px 0;\">\n<h3 style=\"color: #1e3a8a; margin-top: 0;\">Metadata</h3>\n",
        );
        let _ = writeln!(
            html,
            "<p><strong>Created at:</strong> {}</p>",
            descriptor.created_at.to_rfc3339()
        );
        let _ = writeln!(
            html,
            "<p><strong>Complexity:</strong> {} (score {}/100)</p>",
            analysis.complexity.as_str(),
            analysis.performance_score
        );
        if !analysis.recommendations.is_empty() {
            html.push_str("<p><strong>Recommendations:</strong></p>\n<ul>\n");
            for recommendation in &analysis.recommendations {
                let _ = writeln!(html, "<li>{}</li>", Self::escape_html(recommendation));
            }
            html.push_str("</ul>\n");
        }
        if let Some(parameters) = &descriptor.parameters {
            let rendered = serde_json::to_string_pretty(parameters).unwrap_or_default();
            let _ = writeln!(
                html,
                "<p><strong>Parameters:</strong></p>\n<pre>{}</pre>",
                Self::escape_html(&rendered)
            );
        }
        html.push_str("</div>\n");
    }
}

impl Default for HtmlExporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportExporter for HtmlExporter {
    fn export(
        &self,
        report: &RunReport,
        descriptors: &[QueryDescriptor],
        path: &Path,
    ) -> Result<(), ExportError> {
        let html = Self::render(report, descriptors);
        fs::write(path, html).map_err(|e| ExportError::WriteError(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_report() -> (RunReport, Vec<QueryDescriptor>) {
        let mut report = RunReport::new();
        report.push(ExecutionResult::success("create_tables", 0, 10));
        report.push(ExecutionResult::failure("bad_script", "syntax error", 2));

        let descriptors = vec![
            QueryDescriptor::named("create_tables", "CREATE TABLE users (id INT)"),
            QueryDescriptor::named("bad_script", "SELEKT * FORM <x>"),
        ];
        (report, descriptors)
    }

    #[test]
    fn render_contains_summary_and_per_script_sections() {
        let (report, descriptors) = sample_report();

        let html = HtmlExporter::render(&report, &descriptors);

        assert!(html.contains(&report.run_id.to_string()));
        assert!(html.contains("1/2 succeeded"));
        assert!(html.contains("aborted"));
        assert!(html.contains("create_tables"));
        assert!(html.contains("syntax error"));
    }

    #[test]
    fn query_text_is_escaped() {
        let (report, descriptors) = sample_report();

        let html = HtmlExporter::render(&report, &descriptors);

        assert!(html.contains("SELEKT * FORM &lt;x&gt;"));
        assert!(!html.contains("FORM <x>"));
    }

    #[test]
    fn metadata_card_lists_recommendations_for_unbounded_select() {
        let mut report = RunReport::new();
        report.push(ExecutionResult::success("query_users", 0, 5));
        let descriptors = vec![QueryDescriptor::named(
            "query_users",
            "SELECT * FROM users",
        )];

        let html = HtmlExporter::render(&report, &descriptors);

        assert!(html.contains("Recommendations"));
        assert!(html.contains("<li>Add a LIMIT clause to bound the result set</li>"));
    }

    #[test]
    fn result_without_descriptor_still_renders_execution_block() {
        let mut report = RunReport::new();
        report.push(ExecutionResult::success("orphan", 1, 1));

        let html = HtmlExporter::render(&report, &[]);

        assert!(html.contains("orphan"));
        assert!(html.contains("Rows affected"));
    }

    #[test]
    fn export_writes_file() {
        let (report, descriptors) = sample_report();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.html");

        HtmlExporter::new()
            .export(&report, &descriptors, &path)
            .unwrap();

        let written = fs::read_to_string(&path).unwrap();
        assert!(written.starts_with("<!DOCTYPE html>"));
    }
}
