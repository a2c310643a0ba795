pub mod report_exporter;
pub mod script_executor;

pub use report_exporter::{ExportError, ReportExporter};
pub use script_executor::{ExecutorError, ScriptExecutor};
