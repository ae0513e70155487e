//! ClickUp REST API v2 client
//!
//! Thin reqwest wrapper over the handful of endpoints the CLI needs.
//! The personal API token is sent verbatim in the `Authorization` header.
//! Pagination, retries and OAuth are not handled.

use reqwest::StatusCode;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::types::config::CumConfig;
use crate::types::task::{Task, Team, User};

// ---------------------------------------------------------------------------
// Internal response envelopes
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct UserResponse {
    user: User,
}

#[derive(Debug, Deserialize)]
struct TeamsResponse {
    #[serde(default)]
    teams: Vec<Team>,
}

#[derive(Debug, Deserialize)]
struct TasksResponse {
    #[serde(default)]
    tasks: Vec<Task>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    err: Option<String>,
    #[serde(rename = "ECODE")]
    ecode: Option<String>,
}

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

/// Custom error type for ClickUp API operations.
#[derive(Debug, thiserror::Error)]
pub enum ClickUpError {
    #[error("No API token configured. Set CLICKUP_API_TOKEN or api_token in the config file")]
    MissingToken,
    #[error("Authentication failed (401). Check CLICKUP_API_TOKEN")]
    AuthFailed,
    #[error("Permission denied (403): {0}")]
    PermissionDenied(String),
    #[error("Resource not found (404): {0}")]
    NotFound(String),
    #[error("Invalid request (400): {0}")]
    BadRequest(String),
    #[error("Rate limited by ClickUp (429). Try again later")]
    RateLimited,
    #[error("ClickUp API error (HTTP {status}): {message}")]
    HttpError { status: u16, message: String },
    #[error("Failed to parse ClickUp response from {path}: {message}")]
    Parse { path: String, message: String },
    #[error(transparent)]
    Request(#[from] reqwest::Error),
}

// ---------------------------------------------------------------------------
// Query options
// ---------------------------------------------------------------------------

/// Filters for the team task search.
#[derive(Debug, Clone, Default)]
pub struct TaskQuery {
    pub assignees: Vec<String>,
    pub include_closed: bool,
    pub subtasks: bool,
}

impl TaskQuery {
    pub fn assigned_to(assignee: &str) -> Self {
        Self {
            assignees: vec![assignee.to_string()],
            include_closed: false,
            subtasks: true,
        }
    }

    fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params: Vec<(&'static str, String)> = self
            .assignees
            .iter()
            .map(|a| ("assignees[]", a.clone()))
            .collect();
        params.push(("subtasks", self.subtasks.to_string()));
        params.push(("include_closed", self.include_closed.to_string()));
        params
    }
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// ClickUp REST API v2 client.
pub struct ClickUpClient {
    client: reqwest::Client,
    base_url: String,
    api_token: String,
}

impl std::fmt::Debug for ClickUpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClickUpClient")
            .field("base_url", &self.base_url)
            .field("api_token", &"[REDACTED]")
            .finish()
    }
}

impl ClickUpClient {
    /// Create a client from a resolved config (env overrides already applied).
    pub fn new(config: &CumConfig) -> Result<Self, ClickUpError> {
        let api_token = config
            .api_token
            .clone()
            .filter(|t| !t.trim().is_empty())
            .ok_or(ClickUpError::MissingToken)?;

        Ok(Self {
            client: reqwest::Client::new(),
            base_url: normalize_base_url(&config.base_url),
            api_token,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn get<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<T, ClickUpError> {
        let url = self.url(path);
        debug!("GET {url}");
        let resp = self
            .client
            .get(&url)
            .header("Authorization", &self.api_token)
            .header("Accept", "application/json")
            .query(params)
            .send()
            .await?;

        let status = resp.status();
        let body = resp.text().await?;
        if !status.is_success() {
            return Err(map_http_error(status, path, &body));
        }

        serde_json::from_str(&body).map_err(|e| ClickUpError::Parse {
            path: path.to_string(),
            message: e.to_string(),
        })
    }

    /// Fetch the user owning the API token.
    pub async fn get_authorized_user(&self) -> Result<User, ClickUpError> {
        let resp: UserResponse = self.get("user", &[]).await?;
        Ok(resp.user)
    }

    /// Fetch the teams (workspaces) visible to the token.
    pub async fn get_teams(&self) -> Result<Vec<Team>, ClickUpError> {
        let resp: TeamsResponse = self.get("team", &[]).await?;
        Ok(resp.teams)
    }

    /// Fetch one page of tasks across a team matching `query`.
    pub async fn get_team_tasks(
        &self,
        team_id: &str,
        query: &TaskQuery,
    ) -> Result<Vec<Task>, ClickUpError> {
        let resp: TasksResponse = self
            .get(&format!("team/{team_id}/task"), &query.to_params())
            .await?;
        debug!("Fetched {} task(s) for team {team_id}", resp.tasks.len());
        Ok(resp.tasks)
    }

    /// Fetch a single task by id.
    pub async fn get_task(&self, task_id: &str) -> Result<Task, ClickUpError> {
        self.get(&format!("task/{task_id}"), &[]).await
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Ensure a scheme and strip the trailing slash.
fn normalize_base_url(base_url: &str) -> String {
    let trimmed = base_url.trim();
    let with_scheme = if trimmed.starts_with("https://") || trimmed.starts_with("http://") {
        trimmed.to_string()
    } else {
        format!("https://{trimmed}")
    };
    with_scheme.trim_end_matches('/').to_string()
}

/// Pull a readable message out of a ClickUp error body (`{"err": ..., "ECODE": ...}`).
fn error_message(body: &str) -> String {
    match serde_json::from_str::<ApiErrorBody>(body) {
        Ok(ApiErrorBody {
            err: Some(err),
            ecode: Some(code),
        }) => format!("{err} ({code})"),
        Ok(ApiErrorBody { err: Some(err), .. }) => err,
        _ => body.trim().to_string(),
    }
}

fn map_http_error(status: StatusCode, path: &str, body: &str) -> ClickUpError {
    warn!(
        "ClickUp API error: HTTP {} on {}: {}",
        status.as_u16(),
        path,
        body
    );
    let message = error_message(body);
    match status {
        StatusCode::UNAUTHORIZED => ClickUpError::AuthFailed,
        StatusCode::FORBIDDEN => ClickUpError::PermissionDenied(message),
        StatusCode::NOT_FOUND => ClickUpError::NotFound(path.to_string()),
        StatusCode::BAD_REQUEST => ClickUpError::BadRequest(message),
        StatusCode::TOO_MANY_REQUESTS => ClickUpError::RateLimited,
        _ => ClickUpError::HttpError {
            status: status.as_u16(),
            message,
        },
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_token(token: Option<&str>, base_url: &str) -> CumConfig {
        CumConfig {
            api_token: token.map(|t| t.to_string()),
            base_url: base_url.to_string(),
            ..CumConfig::default()
        }
    }

    #[test]
    fn test_client_requires_token() {
        let result = ClickUpClient::new(&config_with_token(None, "https://api.clickup.com/api/v2"));
        assert!(matches!(result, Err(ClickUpError::MissingToken)));

        let result =
            ClickUpClient::new(&config_with_token(Some("  "), "https://api.clickup.com/api/v2"));
        assert!(matches!(result, Err(ClickUpError::MissingToken)));
    }

    #[test]
    fn test_client_normalizes_base_url() {
        let client =
            ClickUpClient::new(&config_with_token(Some("pk_1"), "api.clickup.com/api/v2/")).unwrap();
        assert_eq!(client.base_url, "https://api.clickup.com/api/v2");
        assert_eq!(
            client.url("/team/9/task"),
            "https://api.clickup.com/api/v2/team/9/task"
        );
    }

    #[test]
    fn test_client_keeps_http_scheme() {
        let client =
            ClickUpClient::new(&config_with_token(Some("pk_1"), "http://localhost:8080")).unwrap();
        assert_eq!(client.base_url, "http://localhost:8080");
    }

    #[test]
    fn test_debug_redacts_token() {
        let client =
            ClickUpClient::new(&config_with_token(Some("pk_secret"), "https://x.test")).unwrap();
        let debug = format!("{client:?}");
        assert!(!debug.contains("pk_secret"));
        assert!(debug.contains("REDACTED"));
    }

    #[test]
    fn test_task_query_params() {
        let query = TaskQuery::assigned_to("183");
        let params = query.to_params();
        assert!(params.contains(&("assignees[]", "183".to_string())));
        assert!(params.contains(&("subtasks", "true".to_string())));
        assert!(params.contains(&("include_closed", "false".to_string())));
    }

    #[test]
    fn test_error_message_from_clickup_body() {
        let body = r#"{"err":"Team not authorized","ECODE":"OAUTH_027"}"#;
        assert_eq!(error_message(body), "Team not authorized (OAUTH_027)");
        assert_eq!(error_message(r#"{"err":"Oops"}"#), "Oops");
        assert_eq!(error_message("plain text\n"), "plain text");
    }

    #[test]
    fn test_map_http_error() {
        assert!(matches!(
            map_http_error(StatusCode::UNAUTHORIZED, "user", ""),
            ClickUpError::AuthFailed
        ));
        assert!(matches!(
            map_http_error(StatusCode::NOT_FOUND, "task/abc", ""),
            ClickUpError::NotFound(p) if p == "task/abc"
        ));
        assert!(matches!(
            map_http_error(StatusCode::TOO_MANY_REQUESTS, "team", ""),
            ClickUpError::RateLimited
        ));
        assert!(matches!(
            map_http_error(StatusCode::BAD_GATEWAY, "team", "upstream"),
            ClickUpError::HttpError { status: 502, .. }
        ));
    }

    #[test]
    fn test_error_display() {
        let err = ClickUpError::NotFound("task/abc".to_string());
        assert!(err.to_string().contains("404"));
        assert!(err.to_string().contains("task/abc"));
        assert!(ClickUpError::AuthFailed.to_string().contains("401"));
    }

    #[test]
    fn test_tasks_response_parses_api_shape() {
        let body = r##"{
            "tasks": [
                {
                    "id": "86a1",
                    "name": "Write parser",
                    "status": {"status": "in progress", "color": "#4194f6", "type": "custom"},
                    "parent": null,
                    "dependencies": [
                        {"task_id": "86a1", "depends_on": "86a0", "type": 0, "userid": "1"}
                    ],
                    "list": {"id": "900", "name": "Backlog"},
                    "url": "https://app.clickup.com/t/86a1"
                },
                {"id": "86a2", "name": "Sub", "status": {"status": "to do"}, "parent": "86a1"}
            ]
        }"##;
        let resp: TasksResponse = serde_json::from_str(body).unwrap();
        assert_eq!(resp.tasks.len(), 2);
        assert_eq!(resp.tasks[0].dependencies.len(), 1);
        assert_eq!(resp.tasks[1].parent.as_deref(), Some("86a1"));
    }

    #[test]
    fn test_user_response_parses() {
        let body =
            r##"{"user":{"id":183,"username":"Ada","email":"ada@example.com","color":"#000"}}"##;
        let resp: UserResponse = serde_json::from_str(body).unwrap();
        assert_eq!(resp.user.id, 183);
        assert_eq!(resp.user.username.as_deref(), Some("Ada"));
    }
}
