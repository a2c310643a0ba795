pub mod profiles;
pub mod script_file;

pub use profiles::{ProfileConfig, ProfilesConfig, default_config_path, dsn_from_env};
pub use script_file::{ScriptFileError, load_scripts};
