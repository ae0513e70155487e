//! Clear command - Remove one or all ids from the context

use colored::Colorize;

use crate::context::ContextStore;
use crate::types::enums::ContextKind;

use super::{context_store, parse_kind};

/// What a clear removed
#[derive(Debug, PartialEq, Eq)]
enum Cleared {
    All(usize),
    One(ContextKind, Option<String>),
}

pub fn run(kind: Option<&str>) -> anyhow::Result<()> {
    match clear_in(&context_store(), kind)? {
        Cleared::All(0) => println!("{}", "Context already empty".dimmed()),
        Cleared::All(count) => println!("{} Cleared {} context id(s)", "✓".green(), count),
        Cleared::One(kind, Some(id)) => {
            println!("{} Cleared current {} ({})", "✓".green(), kind, id.dimmed())
        }
        Cleared::One(kind, None) => println!("{}", format!("No current {kind} set").dimmed()),
    }
    Ok(())
}

fn clear_in(store: &ContextStore, kind: Option<&str>) -> anyhow::Result<Cleared> {
    let Some(kind) = kind else {
        return Ok(Cleared::All(store.clear_all()?));
    };
    let kind = parse_kind(kind)?;
    Ok(Cleared::One(kind, store.clear(kind)?))
}
