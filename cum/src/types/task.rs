use serde::{Deserialize, Serialize};

use super::enums::DependencyKind;

/// Statuses that mark a task as resolved.
pub const CLOSED_STATUSES: [&str; 3] = ["closed", "complete", "completed"];

/// ClickUp task (subset of what the API returns)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub status: TaskStatusField,
    #[serde(default)]
    pub parent: Option<String>,
    #[serde(default)]
    pub dependencies: Vec<Dependency>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub list: Option<ListRef>,
}

impl Task {
    /// Lowercase, trimmed status name.
    pub fn status_name(&self) -> String {
        self.status.normalized()
    }

    pub fn is_closed(&self) -> bool {
        is_closed_status(&self.status_name())
    }
}

/// Task status as returned by the API: either a bare name or a status object
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TaskStatusField {
    Name(String),
    Object {
        status: String,
        #[serde(default)]
        color: Option<String>,
        #[serde(default, rename = "type")]
        status_type: Option<String>,
    },
}

impl Default for TaskStatusField {
    fn default() -> Self {
        TaskStatusField::Name(String::new())
    }
}

impl TaskStatusField {
    pub fn normalized(&self) -> String {
        match self {
            TaskStatusField::Name(name) => name.trim().to_lowercase(),
            TaskStatusField::Object { status, .. } => status.trim().to_lowercase(),
        }
    }
}

pub fn is_closed_status(normalized: &str) -> bool {
    CLOSED_STATUSES.contains(&normalized)
}

/// A single dependency edge on a task
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dependency {
    #[serde(rename = "type")]
    pub dependency_type: i64,
    #[serde(default)]
    pub depends_on: Option<String>,
    #[serde(default)]
    pub task_id: Option<String>,
}

impl Dependency {
    pub fn kind(&self) -> Option<DependencyKind> {
        DependencyKind::from_tag(self.dependency_type)
    }

    /// The id this edge points at, which depends on its kind.
    pub fn referenced_id(&self) -> Option<&str> {
        match self.kind()? {
            DependencyKind::WaitingOn => self.depends_on.as_deref(),
            DependencyKind::Blocking => self.task_id.as_deref(),
        }
    }
}

/// List reference embedded in a task
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListRef {
    pub id: String,
    #[serde(default)]
    pub name: String,
}

/// Authorized ClickUp user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

/// ClickUp team (workspace)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Team {
    pub id: String,
    #[serde(default)]
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_string_form() {
        let task: Task = serde_json::from_str(r#"{"id":"a","status":"  In Progress "}"#).unwrap();
        assert_eq!(task.status_name(), "in progress");
        assert!(!task.is_closed());
    }

    #[test]
    fn test_status_object_form() {
        let task: Task = serde_json::from_str(
            r##"{"id":"a","status":{"status":"Complete","color":"#6bc950","type":"closed"}}"##,
        )
        .unwrap();
        assert_eq!(task.status_name(), "complete");
        assert!(task.is_closed());
    }

    #[test]
    fn test_closed_statuses() {
        assert!(is_closed_status("closed"));
        assert!(is_closed_status("complete"));
        assert!(is_closed_status("completed"));
        assert!(!is_closed_status("done"));
        assert!(!is_closed_status(""));
    }

    #[test]
    fn test_missing_optional_fields_default() {
        let task: Task = serde_json::from_str(r#"{"id":"abc"}"#).unwrap();
        assert_eq!(task.id, "abc");
        assert!(task.parent.is_none());
        assert!(task.dependencies.is_empty());
        assert_eq!(task.status_name(), "");
    }

    #[test]
    fn test_missing_id_is_rejected() {
        let result: Result<Task, _> = serde_json::from_str(r#"{"name":"no id"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_dependency_referenced_id() {
        let waiting: Dependency = serde_json::from_str(
            r#"{"type":0,"task_id":"self","depends_on":"blocker"}"#,
        )
        .unwrap();
        assert_eq!(waiting.kind(), Some(DependencyKind::WaitingOn));
        assert_eq!(waiting.referenced_id(), Some("blocker"));

        let blocking: Dependency = serde_json::from_str(
            r#"{"type":1,"task_id":"dependent","depends_on":"self"}"#,
        )
        .unwrap();
        assert_eq!(blocking.kind(), Some(DependencyKind::Blocking));
        assert_eq!(blocking.referenced_id(), Some("dependent"));

        let other: Dependency = serde_json::from_str(r#"{"type":7,"depends_on":"x"}"#).unwrap();
        assert_eq!(other.referenced_id(), None);
    }

    #[test]
    fn test_null_parent() {
        let task: Task = serde_json::from_str(r#"{"id":"a","parent":null}"#).unwrap();
        assert!(task.parent.is_none());
    }
}
