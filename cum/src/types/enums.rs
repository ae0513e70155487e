use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Kind of a ClickUp dependency edge, as carried in the `type` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DependencyKind {
    /// The task is blocked by `depends_on`.
    WaitingOn,
    /// The task blocks `task_id`.
    Blocking,
}

impl DependencyKind {
    /// Map the raw integer tag. Unknown tags yield `None` and are ignored.
    pub fn from_tag(tag: i64) -> Option<Self> {
        match tag {
            0 => Some(DependencyKind::WaitingOn),
            1 => Some(DependencyKind::Blocking),
            _ => None,
        }
    }
}

/// What to do with a blocker that is not part of the analyzed task set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExternalBlockerPolicy {
    /// Keep it in `blockers` but do not count it as open.
    #[default]
    Ignore,
    /// Count it as an open blocker, since its state cannot be verified.
    #[serde(alias = "count_as_open")]
    Open,
}

impl fmt::Display for ExternalBlockerPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExternalBlockerPolicy::Ignore => write!(f, "ignore"),
            ExternalBlockerPolicy::Open => write!(f, "open"),
        }
    }
}

impl FromStr for ExternalBlockerPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "ignore" => Ok(ExternalBlockerPolicy::Ignore),
            "open" | "count_as_open" => Ok(ExternalBlockerPolicy::Open),
            _ => Err(format!(
                "Unknown external blocker policy: '{s}'. Expected: ignore, open"
            )),
        }
    }
}

/// Entity kinds that can be stored in the context and referenced as "current"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContextKind {
    Team,
    Task,
    Assignee,
}

impl ContextKind {
    pub const ALL: [ContextKind; 3] = [
        ContextKind::Team,
        ContextKind::Task,
        ContextKind::Assignee,
    ];
}

impl fmt::Display for ContextKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContextKind::Team => write!(f, "team"),
            ContextKind::Task => write!(f, "task"),
            ContextKind::Assignee => write!(f, "assignee"),
        }
    }
}

impl FromStr for ContextKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "team" | "workspace" => Ok(ContextKind::Team),
            "task" => Ok(ContextKind::Task),
            "assignee" | "user" => Ok(ContextKind::Assignee),
            _ => Err(format!(
                "Unknown context kind: '{s}'. Expected: team, task, assignee"
            )),
        }
    }
}

/// Readiness of a ranked task, used for icons and colors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Readiness {
    Ready,
    Blocked,
    Cyclic,
}

impl fmt::Display for Readiness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Readiness::Ready => write!(f, "ready"),
            Readiness::Blocked => write!(f, "blocked"),
            Readiness::Cyclic => write!(f, "cyclic"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dependency_kind_from_tag() {
        assert_eq!(DependencyKind::from_tag(0), Some(DependencyKind::WaitingOn));
        assert_eq!(DependencyKind::from_tag(1), Some(DependencyKind::Blocking));
        assert_eq!(DependencyKind::from_tag(2), None);
        assert_eq!(DependencyKind::from_tag(-1), None);
    }

    #[test]
    fn test_policy_from_str() {
        assert_eq!(
            ExternalBlockerPolicy::from_str("ignore").unwrap(),
            ExternalBlockerPolicy::Ignore
        );
        assert_eq!(
            ExternalBlockerPolicy::from_str("OPEN").unwrap(),
            ExternalBlockerPolicy::Open
        );
        assert!(ExternalBlockerPolicy::from_str("maybe").is_err());
    }

    #[test]
    fn test_policy_default_is_ignore() {
        assert_eq!(
            ExternalBlockerPolicy::default(),
            ExternalBlockerPolicy::Ignore
        );
    }

    #[test]
    fn test_policy_yaml_roundtrip() {
        let policy: ExternalBlockerPolicy = serde_yaml::from_str("open").unwrap();
        assert_eq!(policy, ExternalBlockerPolicy::Open);
        let policy: ExternalBlockerPolicy = serde_yaml::from_str("count_as_open").unwrap();
        assert_eq!(policy, ExternalBlockerPolicy::Open);
    }

    #[test]
    fn test_context_kind_from_str() {
        assert_eq!(ContextKind::from_str("team").unwrap(), ContextKind::Team);
        assert_eq!(
            ContextKind::from_str("Workspace").unwrap(),
            ContextKind::Team
        );
        assert_eq!(ContextKind::from_str("TASK").unwrap(), ContextKind::Task);
        assert_eq!(
            ContextKind::from_str("user").unwrap(),
            ContextKind::Assignee
        );
        assert!(ContextKind::from_str("board").is_err());
        assert!(ContextKind::from_str("list").is_err());
    }

    #[test]
    fn test_context_kind_display_roundtrip() {
        for kind in ContextKind::ALL {
            assert_eq!(ContextKind::from_str(&kind.to_string()).unwrap(), kind);
        }
    }

    #[test]
    fn test_readiness_display() {
        assert_eq!(Readiness::Ready.to_string(), "ready");
        assert_eq!(Readiness::Blocked.to_string(), "blocked");
        assert_eq!(Readiness::Cyclic.to_string(), "cyclic");
    }
}
