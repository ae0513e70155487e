pub mod error;
pub mod loader;
pub mod paths;

pub use error::ConfigError;
pub use loader::{
    apply_env_overrides, config_exists, read_config, read_config_with_env, validate_config,
    write_config,
};
pub use paths::{find_local_config, get_global_config_dir, resolve_paths};
