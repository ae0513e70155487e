pub mod assigned;
pub mod clear;
pub mod config;
pub mod current;
pub mod set;
pub mod task;

use crate::config::loader::read_config_with_env;
use crate::config::paths::resolve_paths;
use crate::context::ContextStore;
use crate::types::config::CumConfig;
use crate::types::enums::ContextKind;

/// Load the resolved config (file + env overrides) for a command.
pub(crate) fn load_config() -> anyhow::Result<CumConfig> {
    let paths = resolve_paths();
    Ok(read_config_with_env(&paths.config_path)?)
}

/// Open the context store next to the global config.
pub(crate) fn context_store() -> ContextStore {
    ContextStore::new(resolve_paths().context_path)
}

/// Parse a context kind argument.
pub(crate) fn parse_kind(kind: &str) -> anyhow::Result<ContextKind> {
    kind.parse().map_err(anyhow::Error::msg)
}
