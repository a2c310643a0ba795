use std::time::Instant;

use tracing::{info, warn};

use sqlrun_domain::{ExecutionResult, RunReport, ScriptSpec};

use crate::ports::ScriptExecutor;

/// Execute scripts strictly in order, stopping at the first failure.
///
/// No error escapes this function: a failed script is captured as the last
/// entry of the returned report and scripts after it are never attempted.
/// Scripts frequently carry data dependencies (a table must exist before it
/// can be inserted into), so there is no parallel variant.
pub async fn run(scripts: &[ScriptSpec], executor: &dyn ScriptExecutor) -> RunReport {
    let mut report = RunReport::new();

    for spec in scripts {
        info!(script = %spec.name, kind = spec.kind().as_str(), "executing script");
        let start = Instant::now();

        match executor.execute(&spec.query).await {
            Ok(rows_affected) => {
                let elapsed_ms = start.elapsed().as_millis() as u64;
                info!(
                    script = %spec.name,
                    rows_affected,
                    elapsed_ms,
                    "script succeeded"
                );
                report.push(ExecutionResult::success(&spec.name, rows_affected, elapsed_ms));
            }
            Err(err) => {
                let elapsed_ms = start.elapsed().as_millis() as u64;
                warn!(script = %spec.name, error = %err, "script failed, aborting run");
                report.push(ExecutionResult::failure(&spec.name, err.to_string(), elapsed_ms));
                break;
            }
        }
    }

    report
}
