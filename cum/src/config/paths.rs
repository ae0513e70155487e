use std::env;
use std::path::{Path, PathBuf};

use crate::types::{PathConfig, PathConfigType};

pub const LOCAL_CONFIG_FILE: &str = "cum.config.yaml";
const GLOBAL_CONFIG_FILE: &str = "config.yaml";
const CONTEXT_FILE: &str = "context.json";

/// Get the global config directory (~/.config/cum or $XDG_CONFIG_HOME/cum)
pub fn get_global_config_dir() -> PathBuf {
    let base = if let Ok(xdg) = env::var("XDG_CONFIG_HOME") {
        PathBuf::from(xdg)
    } else if let Some(home) = dirs::home_dir() {
        home.join(".config")
    } else {
        PathBuf::from(".config")
    };
    base.join("cum")
}

/// Walk up from start_dir looking for cum.config.yaml
pub fn find_local_config(start_dir: Option<&Path>) -> Option<PathBuf> {
    let start = match start_dir {
        Some(dir) => dir.to_path_buf(),
        None => env::current_dir().ok()?,
    };

    let mut dir = start.as_path();

    loop {
        let config_path = dir.join(LOCAL_CONFIG_FILE);
        if config_path.exists() {
            return Some(config_path);
        }

        match dir.parent() {
            Some(parent) if parent != dir => dir = parent,
            _ => break,
        }
    }

    None
}

/// Resolve config paths.
/// Priority: local config (walk up tree) > global config
pub fn resolve_paths() -> PathConfig {
    resolve_paths_from(None, &get_global_config_dir())
}

fn resolve_paths_from(start_dir: Option<&Path>, global_dir: &Path) -> PathConfig {
    let context_path = global_dir.join(CONTEXT_FILE).to_string_lossy().to_string();

    if let Some(local_config) = find_local_config(start_dir) {
        return PathConfig {
            config_type: PathConfigType::Local,
            config_path: local_config.to_string_lossy().to_string(),
            context_path,
        };
    }

    PathConfig {
        config_type: PathConfigType::Global,
        config_path: global_dir
            .join(GLOBAL_CONFIG_FILE)
            .to_string_lossy()
            .to_string(),
        context_path,
    }
}
