//! Task command - Show one task with its dependency edges

use colored::Colorize;

use crate::clickup::ClickUpClient;
use crate::types::enums::{ContextKind, DependencyKind};
use crate::types::task::Task;

use super::{context_store, load_config};

pub fn run(task_id: &str, json: bool) -> anyhow::Result<()> {
    let config = load_config()?;
    let task_id = context_store().resolve(ContextKind::Task, task_id)?;
    let client = ClickUpClient::new(&config)?;

    let rt = tokio::runtime::Runtime::new()?;
    let task = rt.block_on(client.get_task(&task_id))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&task)?);
    } else {
        println!("{}", format_task_details(&task));
    }
    Ok(())
}

fn edge_ids(task: &Task, kind: DependencyKind) -> Vec<&str> {
    task.dependencies
        .iter()
        .filter(|d| d.kind() == Some(kind))
        .filter_map(|d| d.referenced_id())
        .collect()
}

fn format_task_details(task: &Task) -> String {
    let mut lines = Vec::new();

    let status = if task.is_closed() {
        task.status_name().green()
    } else {
        task.status_name().yellow()
    };
    lines.push(format!("{} {} [{}]", task.id.cyan().bold(), task.name.bold(), status));

    if let Some(parent) = &task.parent {
        lines.push(format!("  {} {}", "parent:    ".dimmed(), parent));
    }
    if let Some(list) = &task.list {
        lines.push(format!("  {} {} ({})", "list:      ".dimmed(), list.name, list.id));
    }
    if let Some(url) = &task.url {
        lines.push(format!("  {} {}", "url:       ".dimmed(), url));
    }

    let waiting_on = edge_ids(task, DependencyKind::WaitingOn);
    let blocking = edge_ids(task, DependencyKind::Blocking);
    let none = "(none)".dimmed().to_string();

    lines.push(format!(
        "  {} {}",
        "blocked by:".dimmed(),
        if waiting_on.is_empty() {
            none.clone()
        } else {
            waiting_on.join(", ")
        }
    ));
    lines.push(format!(
        "  {} {}",
        "blocks:    ".dimmed(),
        if blocking.is_empty() {
            none
        } else {
            blocking.join(", ")
        }
    ));

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Task {
        serde_json::from_str(
            r#"{
                "id": "86b",
                "name": "Wire up client",
                "status": {"status": "In Progress"},
                "parent": "86a",
                "dependencies": [
                    {"type": 0, "depends_on": "86x", "task_id": "86b"},
                    {"type": 1, "depends_on": "86b", "task_id": "86y"},
                    {"type": 7, "depends_on": "86z"}
                ],
                "url": "https://app.clickup.com/t/86b"
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_edge_ids_by_kind() {
        let task = sample();
        assert_eq!(edge_ids(&task, DependencyKind::WaitingOn), vec!["86x"]);
        assert_eq!(edge_ids(&task, DependencyKind::Blocking), vec!["86y"]);
    }

    #[test]
    fn test_details_contain_fields() {
        let output = format_task_details(&sample());
        assert!(output.contains("86b"));
        assert!(output.contains("Wire up client"));
        assert!(output.contains("in progress"));
        assert!(output.contains("86a"));
        assert!(output.contains("86x"));
        assert!(output.contains("86y"));
        assert!(!output.contains("86z"));
    }

    #[test]
    fn test_details_without_edges() {
        let task: Task = serde_json::from_str(r#"{"id": "1", "name": "Solo"}"#).unwrap();
        let output = format_task_details(&task);
        assert!(output.contains("(none)"));
        assert!(!output.contains("parent"));
    }
}
