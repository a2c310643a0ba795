use serde::Serialize;

/// Outcome of one script attempt. Exactly two states; failure is not
/// subdivided by cause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecStatus {
    Success,
    Failure,
}

impl ExecStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Failure => "failure",
        }
    }
}

/// The recorded outcome of attempting one script. Created once, never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExecutionResult {
    pub script_name: String,
    pub status: ExecStatus,
    pub rows_affected: u64,
    pub execution_time_ms: u64,
    pub error_message: Option<String>,
}

impl ExecutionResult {
    pub fn success(
        script_name: impl Into<String>,
        rows_affected: u64,
        execution_time_ms: u64,
    ) -> Self {
        Self {
            script_name: script_name.into(),
            status: ExecStatus::Success,
            rows_affected,
            execution_time_ms,
            error_message: None,
        }
    }

    pub fn failure(
        script_name: impl Into<String>,
        error_message: impl Into<String>,
        execution_time_ms: u64,
    ) -> Self {
        Self {
            script_name: script_name.into(),
            status: ExecStatus::Failure,
            rows_affected: 0,
            execution_time_ms,
            error_message: Some(error_message.into()),
        }
    }

    pub fn is_failure(&self) -> bool {
        self.status == ExecStatus::Failure
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_carries_rows_and_no_error() {
        let result = ExecutionResult::success("insert_data", 5, 12);

        assert_eq!(result.status, ExecStatus::Success);
        assert_eq!(result.rows_affected, 5);
        assert_eq!(result.execution_time_ms, 12);
        assert!(result.error_message.is_none());
        assert!(!result.is_failure());
    }

    #[test]
    fn failure_zeroes_rows_and_carries_message() {
        let result = ExecutionResult::failure("bad_script", "syntax error", 3);

        assert_eq!(result.status, ExecStatus::Failure);
        assert_eq!(result.rows_affected, 0);
        assert_eq!(result.error_message.as_deref(), Some("syntax error"));
        assert!(result.is_failure());
    }
}
