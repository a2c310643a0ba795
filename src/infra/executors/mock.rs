use async_trait::async_trait;

use sqlrun_app::ports::{ExecutorError, ScriptExecutor};
use sqlrun_domain::StatementKind;

/// Deterministic executor for demos and tests: rows affected depend only on
/// the statement kind, so repeated runs over the same scripts yield identical
/// reports. Optionally fails on queries containing a configured marker.
#[derive(Debug, Default)]
pub struct MockExecutor {
    fail_on: Option<FailureRule>,
}

#[derive(Debug, Clone)]
struct FailureRule {
    needle: String,
    message: String,
}

impl MockExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail any query containing `needle` with the given error message.
    pub fn failing_on(needle: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            fail_on: Some(FailureRule {
                needle: needle.into(),
                message: message.into(),
            }),
        }
    }

    fn rows_for(kind: StatementKind) -> u64 {
        match kind {
            StatementKind::Insert => 5,
            StatementKind::Update => 12,
            StatementKind::Delete => 3,
            StatementKind::Select | StatementKind::Ddl | StatementKind::Other => 0,
        }
    }
}

#[async_trait]
impl ScriptExecutor for MockExecutor {
    async fn execute(&self, query: &str) -> Result<u64, ExecutorError> {
        if let Some(rule) = &self.fail_on {
            if query.contains(&rule.needle) {
                return Err(ExecutorError::QueryFailed(rule.message.clone()));
            }
        }
        Ok(Self::rows_for(StatementKind::classify(query)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("SELECT * FROM users", 0)]
    #[case("INSERT INTO users (name) VALUES ('a')", 5)]
    #[case("UPDATE users SET status = 'premium'", 12)]
    #[case("DELETE FROM users WHERE status = 'inactive'", 3)]
    #[case("CREATE TABLE users (id INT)", 0)]
    #[tokio::test]
    async fn rows_affected_follow_statement_kind(#[case] query: &str, #[case] expected: u64) {
        let executor = MockExecutor::new();

        assert_eq!(executor.execute(query).await.unwrap(), expected);
    }

    #[tokio::test]
    async fn configured_marker_triggers_failure() {
        let executor = MockExecutor::failing_on("SELEKT", "syntax error");

        let err = executor.execute("SELEKT * FORM x").await.unwrap_err();
        assert!(matches!(err, ExecutorError::QueryFailed(msg) if msg == "syntax error"));

        assert_eq!(executor.execute("SELECT 1").await.unwrap(), 0);
    }

    #[tokio::test]
    async fn repeated_execution_is_pure() {
        let executor = MockExecutor::new();
        let query = "UPDATE users SET status = 'premium'";

        let first = executor.execute(query).await.unwrap();
        let second = executor.execute(query).await.unwrap();

        assert_eq!(first, second);
    }
}
