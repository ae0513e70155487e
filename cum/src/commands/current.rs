//! Current command - Show the ids stored in the context

use colored::Colorize;

use crate::context::ContextStore;
use crate::types::enums::ContextKind;

use super::{context_store, parse_kind};

pub fn run(kind: Option<&str>) -> anyhow::Result<()> {
    let store = context_store();

    match kind {
        Some(kind) => {
            let (kind, id) = lookup(&store, kind)?;
            match id {
                Some(id) => println!("{id}"),
                None => {
                    println!("{}", format!("No current {kind} set").dimmed());
                }
            }
        }
        None => print_all(&store)?,
    }
    Ok(())
}

fn lookup(store: &ContextStore, kind: &str) -> anyhow::Result<(ContextKind, Option<String>)> {
    let kind = parse_kind(kind)?;
    Ok((kind, store.get(kind)?))
}

fn print_all(store: &ContextStore) -> anyhow::Result<()> {
    let file = store.load()?;

    println!("{}", "\nCurrent context\n".bold());
    for kind in ContextKind::ALL {
        match file.entries.get(&kind) {
            Some(entry) => println!(
                "  {} {:<9} {} {}",
                "●".green(),
                kind.to_string(),
                entry.id.cyan(),
                format!("(set {})", entry.updated_at).dimmed()
            ),
            None => println!(
                "  {} {:<9} {}",
                "○".dimmed(),
                kind.to_string(),
                "(not set)".dimmed()
            ),
        }
    }
    println!();
    Ok(())
}
