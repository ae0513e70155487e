pub mod config;
pub mod enums;
pub mod task;

// Re-export commonly used types for convenience
pub use config::{AssignedConfig, CumConfig, PathConfig, PathConfigType};
pub use enums::{ContextKind, DependencyKind, ExternalBlockerPolicy, Readiness};
pub use task::{Dependency, ListRef, Task, TaskStatusField, Team, User};
