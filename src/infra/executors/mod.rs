pub mod mock;
pub mod psql;

pub use mock::MockExecutor;
pub use psql::PsqlExecutor;
