//! Context store: remembers "current" team, task and assignee ids so
//! commands accept `current` in place of an id.
//!
//! State lives in a small JSON file next to the global config
//! (`~/.config/cum/context.json`). Writes go through a temp file + rename.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::types::enums::ContextKind;

/// Placeholder accepted wherever an id is expected.
pub const CURRENT: &str = "current";

#[derive(Debug, thiserror::Error)]
pub enum ContextError {
    #[error("No current {0} set. Use `cum set {0} <id>` first")]
    NotSet(ContextKind),
    #[error("\"current\" is a placeholder and cannot be stored as a {0} id")]
    ReservedId(ContextKind),
    #[error("{0} id must not be empty")]
    EmptyId(ContextKind),
    #[error("Failed to access context file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Context file {path} is corrupt: {source}")]
    Corrupt {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// A stored context id with the time it was set
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContextEntry {
    pub id: String,
    pub updated_at: String,
}

/// On-disk context file schema
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextFile {
    #[serde(default)]
    pub entries: BTreeMap<ContextKind, ContextEntry>,
}

/// Context store bound to one file.
#[derive(Debug, Clone)]
pub struct ContextStore {
    path: PathBuf,
}

impl ContextStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the context file. A missing file is an empty context.
    pub fn load(&self) -> Result<ContextFile, ContextError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(ContextFile::default());
            }
            Err(source) => return Err(self.io_error(source)),
        };
        if content.trim().is_empty() {
            return Ok(ContextFile::default());
        }
        serde_json::from_str(&content).map_err(|source| ContextError::Corrupt {
            path: self.path.display().to_string(),
            source,
        })
    }

    fn save(&self, file: &ContextFile) -> Result<(), ContextError> {
        atomic_write_json(&self.path, file).map_err(|source| self.io_error(source))
    }

    fn io_error(&self, source: std::io::Error) -> ContextError {
        ContextError::Io {
            path: self.path.display().to_string(),
            source,
        }
    }

    /// Get the stored id for `kind`, if any.
    pub fn get(&self, kind: ContextKind) -> Result<Option<String>, ContextError> {
        Ok(self.load()?.entries.get(&kind).map(|e| e.id.clone()))
    }

    /// Store `id` as the current `kind`.
    pub fn set(&self, kind: ContextKind, id: &str) -> Result<ContextEntry, ContextError> {
        let id = id.trim();
        if id.is_empty() {
            return Err(ContextError::EmptyId(kind));
        }
        if is_current(id) {
            return Err(ContextError::ReservedId(kind));
        }

        let mut file = self.load()?;
        let entry = ContextEntry {
            id: id.to_string(),
            updated_at: Utc::now().to_rfc3339(),
        };
        file.entries.insert(kind, entry.clone());
        self.save(&file)?;
        debug!("Set current {kind} to {id}");
        Ok(entry)
    }

    /// Clear the current `kind`. Returns the id that was removed.
    pub fn clear(&self, kind: ContextKind) -> Result<Option<String>, ContextError> {
        let mut file = self.load()?;
        let removed = file.entries.remove(&kind).map(|e| e.id);
        if removed.is_some() {
            self.save(&file)?;
            debug!("Cleared current {kind}");
        }
        Ok(removed)
    }

    /// Clear every stored id.
    pub fn clear_all(&self) -> Result<usize, ContextError> {
        let file = self.load()?;
        let count = file.entries.len();
        if count > 0 {
            self.save(&ContextFile::default())?;
        }
        Ok(count)
    }

    /// Resolve `value`: "current" maps to the stored id, anything else passes through.
    pub fn resolve(&self, kind: ContextKind, value: &str) -> Result<String, ContextError> {
        if value.trim().is_empty() {
            return Err(ContextError::EmptyId(kind));
        }
        if !is_current(value) {
            return Ok(value.trim().to_string());
        }
        self.get(kind)?.ok_or(ContextError::NotSet(kind))
    }

    /// Resolve an optional value, falling back to the stored id when absent.
    pub fn resolve_or_current(
        &self,
        kind: ContextKind,
        value: Option<&str>,
    ) -> Result<Option<String>, ContextError> {
        match value {
            Some(v) => self.resolve(kind, v).map(Some),
            None => self.get(kind),
        }
    }
}

pub fn is_current(value: &str) -> bool {
    value.trim().eq_ignore_ascii_case(CURRENT)
}

fn atomic_write_json<T: Serialize>(path: &Path, data: &T) -> std::io::Result<()> {
    let tmp_path = path.with_extension("json.tmp");
    let json = serde_json::to_string_pretty(data)?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    fs::write(&tmp_path, json)?;
    fs::rename(&tmp_path, path)
}
