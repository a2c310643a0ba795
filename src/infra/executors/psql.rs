use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tokio::io::AsyncReadExt;
use tokio::process::Command;
use tokio::time::timeout;

use sqlrun_app::ports::{ExecutorError, ScriptExecutor};
use sqlrun_domain::StatementKind;

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Driver-less executor delegating to the `psql` client binary. Each call is
/// one `psql -c` invocation, so every script runs in its own implicit
/// transaction; the runner neither begins nor rolls anything back.
pub struct PsqlExecutor {
    dsn: String,
    timeout_secs: u64,
}

impl PsqlExecutor {
    pub fn new(dsn: impl Into<String>) -> Self {
        Self {
            dsn: dsn.into(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    async fn run_psql(&self, query: &str) -> Result<String, ExecutorError> {
        let mut child = Command::new("psql")
            .arg(&self.dsn)
            .arg("-X") // Ignore .psqlrc to avoid unexpected output
            .arg("-v")
            .arg("ON_ERROR_STOP=1") // Exit with non-zero on SQL errors
            .arg("-t") // Tuples only
            .arg("-A") // Unaligned output
            .arg("-c")
            .arg(query)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true) // Ensure child process is killed on timeout/drop
            .spawn()
            .map_err(|e| ExecutorError::CommandNotFound(e.to_string()))?;

        // Read stdout/stderr BEFORE wait() to prevent pipe buffer deadlock
        let mut stdout_handle = child.stdout.take();
        let mut stderr_handle = child.stderr.take();

        let result = timeout(Duration::from_secs(self.timeout_secs), async {
            let (stdout_result, stderr_result) = tokio::join!(
                async {
                    let mut buf = Vec::new();
                    if let Some(ref mut out) = stdout_handle {
                        out.read_to_end(&mut buf).await?;
                    }
                    Ok::<_, std::io::Error>(String::from_utf8_lossy(&buf).into_owned())
                },
                async {
                    let mut buf = Vec::new();
                    if let Some(ref mut err) = stderr_handle {
                        err.read_to_end(&mut buf).await?;
                    }
                    Ok::<_, std::io::Error>(String::from_utf8_lossy(&buf).into_owned())
                }
            );

            let stdout = stdout_result?;
            let stderr = stderr_result?;
            let status = child.wait().await?;

            Ok::<_, std::io::Error>((status, stdout, stderr))
        })
        .await
        .map_err(|_| ExecutorError::Timeout)?
        .map_err(|e| ExecutorError::QueryFailed(e.to_string()))?;

        let (status, stdout, stderr) = result;

        if !status.success() {
            return Err(classify_failure(stderr.trim().to_string()));
        }

        Ok(stdout)
    }
}

fn classify_failure(stderr: String) -> ExecutorError {
    let lower = stderr.to_lowercase();
    if lower.contains("could not connect") || lower.contains("connection refused") {
        ExecutorError::ConnectionFailed(stderr)
    } else {
        ExecutorError::QueryFailed(stderr)
    }
}

/// Extract rows affected from the psql command tag (`INSERT 0 5`,
/// `UPDATE 12`, `DELETE 3`). SELECT and DDL carry no usable tag under
/// `-t -A` and report 0.
fn parse_rows_affected(stdout: &str, kind: StatementKind) -> u64 {
    if !matches!(
        kind,
        StatementKind::Insert | StatementKind::Update | StatementKind::Delete
    ) {
        return 0;
    }

    stdout
        .lines()
        .rev()
        .map(str::trim)
        .find_map(|line| {
            let mut parts = line.split_whitespace();
            let verb = parts.next()?;
            if !matches!(verb, "INSERT" | "UPDATE" | "DELETE") {
                return None;
            }
            line.split_whitespace().next_back()?.parse::<u64>().ok()
        })
        .unwrap_or(0)
}

#[async_trait]
impl ScriptExecutor for PsqlExecutor {
    async fn execute(&self, query: &str) -> Result<u64, ExecutorError> {
        let stdout = self.run_psql(query).await?;
        Ok(parse_rows_affected(&stdout, StatementKind::classify(query)))
    }
}
