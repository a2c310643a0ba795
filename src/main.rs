use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use color_eyre::eyre::{Result, eyre};
use tracing_subscriber::EnvFilter;

use sqlrun::app::ports::{ReportExporter, ScriptExecutor};
use sqlrun::app::runner;
use sqlrun::domain::{QueryDescriptor, RunReport, RunSummary, ScriptSpec};
use sqlrun::error;
use sqlrun::infra::config::{ProfilesConfig, default_config_path, dsn_from_env, load_scripts};
use sqlrun::infra::{CsvExporter, HtmlExporter, MarkdownExporter, MockExecutor, PsqlExecutor};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// TOML file with [[scripts]] entries; omitted, the built-in demo batch
    /// runs against the mock executor
    #[arg(long)]
    scripts: Option<PathBuf>,

    /// Connection profile name from the profiles config
    #[arg(long, default_value = "default")]
    profile: String,

    /// Profiles config path (defaults to the user config dir)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Use the deterministic mock executor instead of psql
    #[arg(long)]
    mock: bool,

    /// Write an HTML report to this path
    #[arg(long)]
    html: Option<PathBuf>,

    /// Write a Markdown summary to this path
    #[arg(long)]
    md: Option<PathBuf>,

    /// Write a CSV report to this path
    #[arg(long)]
    csv: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    dotenvy::dotenv().ok();
    error::install_hooks()?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let args = Args::parse();

    let scripts = match &args.scripts {
        Some(path) => load_scripts(path)?,
        None => demo_scripts(),
    };

    let executor: Box<dyn ScriptExecutor> = if args.mock || args.scripts.is_none() {
        Box::new(MockExecutor::new())
    } else {
        Box::new(PsqlExecutor::new(resolve_dsn(&args)?))
    };

    let report = runner::run(&scripts, executor.as_ref()).await;
    print_report(&report);

    let descriptors: Vec<QueryDescriptor> =
        scripts.iter().map(QueryDescriptor::from_script).collect();
    if let Some(path) = &args.html {
        HtmlExporter::new().export(&report, &descriptors, path)?;
    }
    if let Some(path) = &args.md {
        MarkdownExporter::new().export(&report, &descriptors, path)?;
    }
    if let Some(path) = &args.csv {
        CsvExporter::new().export(&report, &descriptors, path)?;
    }

    Ok(if report.is_complete(scripts.len()) {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn resolve_dsn(args: &Args) -> Result<String> {
    if let Some(dsn) = dsn_from_env() {
        return Ok(dsn);
    }

    let config_path = match &args.config {
        Some(path) => path.clone(),
        None => default_config_path()?,
    };
    let config = ProfilesConfig::load(&config_path)?;
    config.resolve_dsn(&args.profile).ok_or_else(|| {
        eyre!(
            "No usable connection profile '{}' in {}",
            args.profile,
            config_path.display()
        )
    })
}

fn print_report(report: &RunReport) {
    for result in report.results() {
        let marker = if result.is_failure() { "FAIL" } else { "ok" };
        println!(
            "{:>4}  {}  rows={} time={}ms",
            marker, result.script_name, result.rows_affected, result.execution_time_ms
        );
        if let Some(error) = &result.error_message {
            println!("      {error}");
        }
    }

    println!("{}", summary_line(report.summary()));
    if report.aborted()
        && let Some(last) = report.results().last()
    {
        println!("run aborted at '{}'", last.script_name);
    }
}

/// Counted against attempted scripts, not the full batch: a truncated run is
/// already signalled by the abort line.
fn summary_line(summary: RunSummary) -> String {
    format!(
        "{}/{} scripts succeeded in {} ms",
        summary.succeeded, summary.attempted, summary.total_execution_time_ms
    )
}

/// Built-in demonstration batch: a users table lifecycle executed against the
/// mock executor.
fn demo_scripts() -> Vec<ScriptSpec> {
    vec![
        ScriptSpec::new(
            "create_users_table",
            "CREATE TABLE IF NOT EXISTS users (\n    id SERIAL PRIMARY KEY,\n    name VARCHAR(255) NOT NULL,\n    email VARCHAR(255) UNIQUE NOT NULL,\n    created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP,\n    status VARCHAR(50) DEFAULT 'active'\n)",
        ),
        ScriptSpec::new(
            "insert_sample_users",
            "INSERT INTO users (name, email) VALUES\n('John Doe', 'john@example.com'),\n('Jane Smith', 'jane@example.com'),\n('Bob Johnson', 'bob@example.com'),\n('Alice Brown', 'alice@example.com'),\n('Charlie Wilson', 'charlie@example.com')",
        ),
        ScriptSpec::new(
            "update_user_status",
            "UPDATE users\nSET status = 'premium'\nWHERE email IN ('john@example.com', 'jane@example.com')",
        ),
        ScriptSpec::new(
            "query_active_users",
            "SELECT id, name, email, status, created_at\nFROM users\nWHERE status = 'active'\nORDER BY created_at DESC",
        ),
        ScriptSpec::new(
            "cleanup_inactive_users",
            "DELETE FROM users\nWHERE status = 'inactive'\nAND created_at < NOW() - INTERVAL '30 days'",
        ),
    ]
}
