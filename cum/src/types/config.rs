use serde::{Deserialize, Serialize};

use super::enums::ExternalBlockerPolicy;

pub const DEFAULT_BASE_URL: &str = "https://api.clickup.com/api/v2";

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_true() -> bool {
    true
}

/// Options for the `assigned` command
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignedConfig {
    #[serde(default)]
    pub external_blockers: ExternalBlockerPolicy,
    #[serde(default)]
    pub include_closed: bool,
    #[serde(default = "default_true")]
    pub show_legend: bool,
}

impl Default for AssignedConfig {
    fn default() -> Self {
        Self {
            external_blockers: ExternalBlockerPolicy::Ignore,
            include_closed: false,
            show_legend: true,
        }
    }
}

/// Top-level cum configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CumConfig {
    #[serde(default)]
    pub api_token: Option<String>,
    #[serde(default)]
    pub team_id: Option<String>,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default)]
    pub assigned: AssignedConfig,
}

impl Default for CumConfig {
    fn default() -> Self {
        Self {
            api_token: None,
            team_id: None,
            base_url: default_base_url(),
            assigned: AssignedConfig::default(),
        }
    }
}

/// Where the active configuration was found
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PathConfigType {
    Local,
    Global,
}

/// Resolved configuration paths
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathConfig {
    pub config_type: PathConfigType,
    pub config_path: String,
    pub context_path: String,
}
