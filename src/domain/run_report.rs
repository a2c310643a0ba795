use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::execution_result::ExecutionResult;

/// Ordered collection of results for one invocation of the runner. One entry
/// per attempted script; a failed script's result is the last entry.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub run_id: Uuid,
    pub started_at: DateTime<Utc>,
    results: Vec<ExecutionResult>,
}

impl RunReport {
    pub fn new() -> Self {
        Self {
            run_id: Uuid::new_v4(),
            started_at: Utc::now(),
            results: Vec::new(),
        }
    }

    pub fn push(&mut self, result: ExecutionResult) {
        self.results.push(result);
    }

    pub fn results(&self) -> &[ExecutionResult] {
        &self.results
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Whether the run stopped early on a failure. Callers inspect the last
    /// entry's status; no error is re-raised past the runner boundary.
    pub fn aborted(&self) -> bool {
        self.results.last().is_some_and(ExecutionResult::is_failure)
    }

    /// True when every script in a batch of `expected` ran and succeeded.
    pub fn is_complete(&self, expected: usize) -> bool {
        self.results.len() == expected && !self.aborted()
    }

    pub fn summary(&self) -> RunSummary {
        let succeeded = self.results.iter().filter(|r| !r.is_failure()).count();
        let total_execution_time_ms = self.results.iter().map(|r| r.execution_time_ms).sum();
        RunSummary {
            attempted: self.results.len(),
            succeeded,
            total_execution_time_ms,
            completed: !self.aborted(),
        }
    }
}

impl Default for RunReport {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub attempted: usize,
    pub succeeded: usize,
    pub total_execution_time_ms: u64,
    pub completed: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_report_is_complete_for_zero_scripts() {
        let report = RunReport::new();

        assert!(report.is_empty());
        assert!(!report.aborted());
        assert!(report.is_complete(0));
    }

    #[test]
    fn report_shorter_than_batch_is_not_complete() {
        let mut report = RunReport::new();
        report.push(ExecutionResult::success("first", 0, 1));

        assert!(!report.is_complete(2));
    }

    mod summary {
        use super::*;

        #[test]
        fn all_success_sums_time_and_counts() {
            let mut report = RunReport::new();
            report.push(ExecutionResult::success("create", 0, 10));
            report.push(ExecutionResult::success("insert", 5, 25));

            let summary = report.summary();

            assert_eq!(
                summary,
                RunSummary {
                    attempted: 2,
                    succeeded: 2,
                    total_execution_time_ms: 35,
                    completed: true,
                }
            );
        }

        #[test]
        fn trailing_failure_marks_run_aborted() {
            let mut report = RunReport::new();
            report.push(ExecutionResult::success("create", 0, 10));
            report.push(ExecutionResult::failure("bad", "syntax error", 2));

            assert!(report.aborted());
            let summary = report.summary();
            assert_eq!(summary.attempted, 2);
            assert_eq!(summary.succeeded, 1);
            assert!(!summary.completed);
        }
    }
}
