//! Set command - Store a "current" id in the context

use colored::Colorize;

use crate::context::{ContextEntry, ContextStore};
use crate::types::enums::ContextKind;

use super::{context_store, parse_kind};

pub fn run(kind: &str, id: &str) -> anyhow::Result<()> {
    let (kind, entry) = set_in(&context_store(), kind, id)?;

    println!(
        "{} Current {} set to {}",
        "✓".green(),
        kind,
        entry.id.cyan()
    );
    Ok(())
}

fn set_in(
    store: &ContextStore,
    kind: &str,
    id: &str,
) -> anyhow::Result<(ContextKind, ContextEntry)> {
    let kind = parse_kind(kind)?;
    let entry = store.set(kind, id)?;
    Ok((kind, entry))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> (tempfile::TempDir, ContextStore) {
        let tmp = tempfile::tempdir().unwrap();
        let store = ContextStore::new(tmp.path().join("context.json"));
        (tmp, store)
    }

    #[test]
    fn test_set_accepts_aliases() {
        let (_tmp, store) = store();
        let (kind, entry) = set_in(&store, "workspace", "9001").unwrap();
        assert_eq!(kind, ContextKind::Team);
        assert_eq!(entry.id, "9001");
        assert_eq!(store.get(ContextKind::Team).unwrap().as_deref(), Some("9001"));
    }

    #[test]
    fn test_set_rejects_unknown_kind() {
        let (_tmp, store) = store();
        let err = set_in(&store, "folder", "1").unwrap_err();
        assert!(err.to_string().contains("Unknown context kind"));
        assert!(!store.path().exists());
    }

    #[test]
    fn test_set_rejects_placeholder() {
        let (_tmp, store) = store();
        assert!(set_in(&store, "task", "current").is_err());
        assert_eq!(store.get(ContextKind::Task).unwrap(), None);
    }
}
