pub mod execution_result;
pub mod query_descriptor;
pub mod run_report;
pub mod script;

pub use execution_result::{ExecStatus, ExecutionResult};
pub use query_descriptor::QueryDescriptor;
pub use run_report::{RunReport, RunSummary};
pub use script::{ScriptSpec, StatementKind};
