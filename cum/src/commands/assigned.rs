//! Assigned command - Rank the tasks assigned to a user by open blockers

use colored::Colorize;
use tracing::debug;

use crate::analyzer::{analyze_with, AnalyzeOptions};
use crate::assigned_renderer::render_full_output;
use crate::clickup::{ClickUpClient, TaskQuery};
use crate::context::ContextStore;
use crate::types::enums::{ContextKind, ExternalBlockerPolicy};

use super::{context_store, load_config};

pub fn run(
    team: Option<&str>,
    assignee: Option<&str>,
    include_closed: bool,
    count_external: bool,
    json: bool,
    no_legend: bool,
) -> anyhow::Result<()> {
    let config = load_config()?;
    let store = context_store();
    let client = ClickUpClient::new(&config)?;

    let team_id = resolve_preferred(&store, ContextKind::Team, team, config.team_id.as_deref())?;
    let assignee_id = resolve_preferred(&store, ContextKind::Assignee, assignee, None)?;

    let options = AnalyzeOptions {
        external_blockers: if count_external {
            ExternalBlockerPolicy::Open
        } else {
            config.assigned.external_blockers
        },
    };

    let query_closed = include_closed || config.assigned.include_closed;

    let rt = tokio::runtime::Runtime::new()?;
    let tasks = rt.block_on(async move {
        let team_id = match team_id {
            Some(id) => id,
            None => {
                let teams = client.get_teams().await?;
                let first = teams
                    .into_iter()
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("No teams visible to this API token"))?;
                debug!("Defaulting to first team {} ({})", first.id, first.name);
                first.id
            }
        };

        let assignee_id = match assignee_id {
            Some(id) => id,
            None => {
                let user = client.get_authorized_user().await?;
                debug!("Defaulting to authorized user {}", user.id);
                user.id.to_string()
            }
        };

        let mut query = TaskQuery::assigned_to(&assignee_id);
        query.include_closed = query_closed;
        let tasks = client.get_team_tasks(&team_id, &query).await?;
        Ok::<_, anyhow::Error>(tasks)
    })?;

    let result = analyze_with(&tasks, options);
    debug!(
        "Analyzed {} task(s): {} ready, {} blocked, {} in cycles",
        result.total(),
        result.ready_count,
        result.blocked_count,
        result.cyclic_count
    );

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    if result.is_empty() {
        println!("{}", "No tasks assigned".yellow());
        return Ok(());
    }

    let show_legend = config.assigned.show_legend && !no_legend;
    println!("{}", render_full_output(&result, show_legend));
    Ok(())
}

/// Pick an id from the flag (with "current" resolved), the context, or the config.
fn resolve_preferred(
    store: &ContextStore,
    kind: ContextKind,
    flag: Option<&str>,
    configured: Option<&str>,
) -> anyhow::Result<Option<String>> {
    if let Some(id) = store.resolve_or_current(kind, flag)? {
        return Ok(Some(id));
    }
    Ok(configured
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_string))
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
    fn test_flag_wins() {
        let (_tmp, store) = store();
        store.set(ContextKind::Team, "ctx").unwrap();
        let id = resolve_preferred(&store, ContextKind::Team, Some("flag"), Some("cfg")).unwrap();
        assert_eq!(id.as_deref(), Some("flag"));
    }

    #[test]
    fn test_current_flag_uses_context() {
        let (_tmp, store) = store();
        store.set(ContextKind::Team, "ctx").unwrap();
        let id =
            resolve_preferred(&store, ContextKind::Team, Some("current"), Some("cfg")).unwrap();
        assert_eq!(id.as_deref(), Some("ctx"));
    }

    #[test]
    fn test_current_flag_without_context_errors() {
        let (_tmp, store) = store();
        let err = resolve_preferred(&store, ContextKind::Assignee, Some("current"), None)
            .unwrap_err();
        assert!(err.to_string().contains("No current assignee set"));
    }

    #[test]
    fn test_context_before_config() {
        let (_tmp, store) = store();
        store.set(ContextKind::Team, "ctx").unwrap();
        let id = resolve_preferred(&store, ContextKind::Team, None, Some("cfg")).unwrap();
        assert_eq!(id.as_deref(), Some("ctx"));
    }

    #[test]
    fn test_config_fallback() {
        let (_tmp, store) = store();
        let id = resolve_preferred(&store, ContextKind::Team, None, Some(" cfg ")).unwrap();
        assert_eq!(id.as_deref(), Some("cfg"));
        let id = resolve_preferred(&store, ContextKind::Team, None, Some("")).unwrap();
        assert_eq!(id, None);
        let id = resolve_preferred(&store, ContextKind::Team, None, None).unwrap();
        assert_eq!(id, None);
    }

    #[test]
    fn test_blank_flag_is_rejected() {
        let (_tmp, store) = store();
        let err = resolve_preferred(&store, ContextKind::Team, Some(" "), Some("cfg")).unwrap_err();
        assert!(err.to_string().contains("team id must not be empty"));
    }
}
