//! Entity model for nexusflow.
//!
//! Three related collections: users, projects, and tasks. Tasks reference
//! their owning project (`project_id`) and an assignee (`assigned_to`);
//! projects carry denormalized task aggregates (`tasks_count`,
//! `completed_tasks_count`, `progress`) maintained by the recalculation
//! engine in `stats`, never written by callers.
//!
//! Records serialize with camelCase field names and kebab-case enum values,
//! matching the persisted collection documents.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::Error;

/// Generate a fresh entity id.
///
/// Ids are 128-bit random UUIDs so collision probability stays
/// cryptographically negligible without any coordination.
pub fn fresh_id() -> String {
    Uuid::new_v4().to_string()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    Manager,
    Developer,
    Designer,
}

impl UserRole {
    pub fn as_str(self) -> &'static str {
        match self {
            UserRole::Admin => "admin",
            UserRole::Manager => "manager",
            UserRole::Developer => "developer",
            UserRole::Designer => "designer",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "admin" => Ok(UserRole::Admin),
            "manager" => Ok(UserRole::Manager),
            "developer" => Ok(UserRole::Developer),
            "designer" => Ok(UserRole::Designer),
            _ => Err(Error::InvalidArgument(format!(
                "invalid role '{}': must be admin, manager, developer, or designer",
                s
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    Active,
    Inactive,
}

impl UserStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            UserStatus::Active => "active",
            UserStatus::Inactive => "inactive",
        }
    }
}

impl fmt::Display for UserStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "active" => Ok(UserStatus::Active),
            "inactive" => Ok(UserStatus::Inactive),
            _ => Err(Error::InvalidArgument(format!(
                "invalid user status '{}': must be active or inactive",
                s
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProjectStatus {
    Active,
    Completed,
    OnHold,
    Pending,
}

impl ProjectStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ProjectStatus::Active => "active",
            ProjectStatus::Completed => "completed",
            ProjectStatus::OnHold => "on-hold",
            ProjectStatus::Pending => "pending",
        }
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProjectStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "active" => Ok(ProjectStatus::Active),
            "completed" => Ok(ProjectStatus::Completed),
            "on-hold" => Ok(ProjectStatus::OnHold),
            "pending" => Ok(ProjectStatus::Pending),
            _ => Err(Error::InvalidArgument(format!(
                "invalid project status '{}': must be active, completed, on-hold, or pending",
                s
            ))),
        }
    }
}

/// Task status. The canonical spelling of the second state is
/// `in-progress`; no other spelling is accepted or produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskStatus {
    Pending,
    InProgress,
    Completed,
    Blocked,
}

impl TaskStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            TaskStatus::Pending => "pending",
            TaskStatus::InProgress => "in-progress",
            TaskStatus::Completed => "completed",
            TaskStatus::Blocked => "blocked",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pending" => Ok(TaskStatus::Pending),
            "in-progress" => Ok(TaskStatus::InProgress),
            "completed" => Ok(TaskStatus::Completed),
            "blocked" => Ok(TaskStatus::Blocked),
            _ => Err(Error::InvalidArgument(format!(
                "invalid task status '{}': must be pending, in-progress, completed, or blocked",
                s
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskPriority {
    Low,
    Medium,
    High,
}

impl TaskPriority {
    pub fn as_str(self) -> &'static str {
        match self {
            TaskPriority::Low => "low",
            TaskPriority::Medium => "medium",
            TaskPriority::High => "high",
        }
    }
}

impl fmt::Display for TaskPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskPriority {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(TaskPriority::Low),
            "medium" => Ok(TaskPriority::Medium),
            "high" => Ok(TaskPriority::High),
            _ => Err(Error::InvalidArgument(format!(
                "invalid priority '{}': must be low, medium, or high",
                s
            ))),
        }
    }
}

/// A person who can own tasks and sit on project teams
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub avatar_url: String,
    pub status: UserStatus,
}

/// A project grouping tasks and team members
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub name: String,
    pub description: String,
    pub status: ProjectStatus,
    /// Completion percentage, 0-100. Derived from the task collection.
    pub progress: u8,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// User ids; membership is a set but display order is preserved.
    pub team_members: Vec<String>,
    /// Derived count of tasks owned by this project.
    pub tasks_count: u32,
    /// Derived count of owned tasks with completed status.
    pub completed_tasks_count: u32,
}

/// A unit of work owned by exactly one project
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub project_id: String,
    pub name: String,
    pub description: String,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    pub assigned_to: String,
    pub due_date: NaiveDate,
    /// Assigned once at creation; immutable afterwards.
    pub created_at: NaiveDate,
}

/// Canonical creation payload for a user
///
/// The store applies the defaults: `status` falls back to active, and an
/// absent `avatar_url` resolves to a placeholder derived from the new id.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub status: Option<UserStatus>,
    pub avatar_url: Option<String>,
}

/// Canonical creation payload for a project
///
/// The derived fields (`progress`, `tasks_count`, `completed_tasks_count`)
/// always start at zero and are not part of the payload.
#[derive(Debug, Clone)]
pub struct NewProject {
    pub name: String,
    pub description: String,
    pub status: ProjectStatus,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub team_members: Vec<String>,
}

/// Canonical creation payload for a task
///
/// `id` and `created_at` are assigned by the store.
#[derive(Debug, Clone)]
pub struct NewTask {
    pub project_id: String,
    pub name: String,
    pub description: String,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    pub assigned_to: String,
    pub due_date: NaiveDate,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn task_status_serializes_with_canonical_spelling() {
        let json = serde_json::to_string(&TaskStatus::InProgress).unwrap();
        assert_eq!(json, "\"in-progress\"");
        assert_eq!(
            serde_json::from_str::<TaskStatus>("\"in-progress\"").unwrap(),
            TaskStatus::InProgress
        );
        // The legacy bare spelling is not accepted.
        assert!(serde_json::from_str::<TaskStatus>("\"progress\"").is_err());
    }

    #[test]
    fn project_status_uses_kebab_case() {
        let json = serde_json::to_string(&ProjectStatus::OnHold).unwrap();
        assert_eq!(json, "\"on-hold\"");
        assert_eq!("on-hold".parse::<ProjectStatus>().unwrap(), ProjectStatus::OnHold);
    }

    #[test]
    fn records_serialize_with_camel_case_fields() {
        let user = User {
            id: "user-1".to_string(),
            name: "Anna Foster".to_string(),
            email: "anna@example.com".to_string(),
            role: UserRole::Designer,
            avatar_url: "https://i.pravatar.cc/150?img=4".to_string(),
            status: UserStatus::Active,
        };
        let value = serde_json::to_value(&user).unwrap();
        assert!(value.get("avatarUrl").is_some());

        let task = Task {
            id: "task-1".to_string(),
            project_id: "proj-1".to_string(),
            name: "Design".to_string(),
            description: String::new(),
            status: TaskStatus::Pending,
            priority: TaskPriority::High,
            assigned_to: "user-1".to_string(),
            due_date: NaiveDate::from_ymd_opt(2024, 2, 28).unwrap(),
            created_at: NaiveDate::from_ymd_opt(2024, 1, 20).unwrap(),
        };
        let value = serde_json::to_value(&task).unwrap();
        assert!(value.get("projectId").is_some());
        assert!(value.get("assignedTo").is_some());
        assert_eq!(value["dueDate"], "2024-02-28");
    }

    #[test]
    fn fresh_ids_are_unique() {
        let a = fresh_id();
        let b = fresh_id();
        assert_ne!(a, b);
        assert_eq!(a.len(), 36);
    }

    #[test]
    fn enum_parsing_rejects_unknown_values() {
        assert!("urgent".parse::<TaskPriority>().is_err());
        assert!("archived".parse::<ProjectStatus>().is_err());
        assert!("owner".parse::<UserRole>().is_err());
    }
}
