pub mod config;
pub mod executors;
pub mod export;

pub use executors::{MockExecutor, PsqlExecutor};
pub use export::{CsvExporter, HtmlExporter, MarkdownExporter};
