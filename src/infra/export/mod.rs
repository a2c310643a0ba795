pub mod csv;
pub mod html;
pub mod markdown;

pub use csv::CsvExporter;
pub use html::HtmlExporter;
pub use markdown::MarkdownExporter;
