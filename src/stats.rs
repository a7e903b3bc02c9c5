//! Derived statistics.
//!
//! Projects cache their task aggregates (`tasks_count`,
//! `completed_tasks_count`, `progress`) instead of recomputing them on every
//! read. This module holds the math that keeps those caches honest, plus the
//! dashboard summary. Everything here is a total function over the current
//! collections; there is no failure path.

use serde::Serialize;

use crate::model::{Project, ProjectStatus, Task, TaskStatus, User, UserStatus};

/// Task aggregates for one project
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProjectTaskStats {
    pub tasks_count: u32,
    pub completed_tasks_count: u32,
    pub progress: u8,
}

/// Compute the aggregates for `project_id` from the flat task collection
pub fn project_task_stats(tasks: &[Task], project_id: &str) -> ProjectTaskStats {
    let mut tasks_count = 0u32;
    let mut completed_tasks_count = 0u32;
    for task in tasks.iter().filter(|task| task.project_id == project_id) {
        tasks_count += 1;
        if task.status == TaskStatus::Completed {
            completed_tasks_count += 1;
        }
    }
    ProjectTaskStats {
        tasks_count,
        completed_tasks_count,
        progress: progress_percent(completed_tasks_count, tasks_count),
    }
}

/// Completion percentage, rounded to the nearest integer with ties away
/// from zero. A project with no tasks reports 0.
pub fn progress_percent(completed: u32, total: u32) -> u8 {
    if total == 0 {
        return 0;
    }
    (f64::from(completed) * 100.0 / f64::from(total)).round() as u8
}

/// Headline numbers for the dashboard
#[derive(Debug, Clone, Copy, Serialize)]
pub struct DashboardSummary {
    /// Projects not yet completed (active, on-hold, or pending)
    pub active_projects: usize,
    /// Tasks still open (pending, in-progress, or blocked)
    pub open_tasks: usize,
    /// Users with active status
    pub active_members: usize,
}

/// Compute the dashboard summary from the current collections
pub fn dashboard_summary(users: &[User], projects: &[Project], tasks: &[Task]) -> DashboardSummary {
    let active_projects = projects
        .iter()
        .filter(|project| {
            matches!(
                project.status,
                ProjectStatus::Active | ProjectStatus::OnHold | ProjectStatus::Pending
            )
        })
        .count();
    let open_tasks = tasks
        .iter()
        .filter(|task| {
            matches!(
                task.status,
                TaskStatus::Pending | TaskStatus::InProgress | TaskStatus::Blocked
            )
        })
        .count();
    let active_members = users
        .iter()
        .filter(|user| user.status == UserStatus::Active)
        .count();
    DashboardSummary {
        active_projects,
        open_tasks,
        active_members,
    }
}
