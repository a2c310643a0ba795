pub use sqlrun_app as app;
pub use sqlrun_domain as domain;
pub use sqlrun_infra as infra;

pub mod error;
