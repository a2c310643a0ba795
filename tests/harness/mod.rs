pub mod fixtures;

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use sqlrun::app::ports::{ExecutorError, ScriptExecutor};

/// Pure-function test executor: responses are keyed by exact query text, and
/// every invocation is logged so tests can assert which scripts were (and
/// were not) attempted. Unknown queries succeed with zero rows affected.
pub struct ScriptedExecutor {
    responses: HashMap<String, Result<u64, ExecutorError>>,
    calls: Mutex<Vec<String>>,
}

impl Default for ScriptedExecutor {
    fn default() -> Self {
        Self::new()
    }
}

impl ScriptedExecutor {
    pub fn new() -> Self {
        Self {
            responses: HashMap::new(),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn succeeding_on(mut self, query: impl Into<String>, rows_affected: u64) -> Self {
        self.responses.insert(query.into(), Ok(rows_affected));
        self
    }

    pub fn failing_on(mut self, query: impl Into<String>, message: impl Into<String>) -> Self {
        self.responses
            .insert(query.into(), Err(ExecutorError::QueryFailed(message.into())));
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ScriptExecutor for ScriptedExecutor {
    async fn execute(&self, query: &str) -> Result<u64, ExecutorError> {
        self.calls.lock().unwrap().push(query.to_string());
        self.responses.get(query).cloned().unwrap_or(Ok(0))
    }
}
