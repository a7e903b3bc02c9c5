//! The entity store: the owning component for the user, project, and task
//! collections.
//!
//! All mutation goes through this type; nothing else touches the backing
//! storage. Every successful mutation re-serializes the whole affected
//! collection before returning, and every task mutation keeps the owning
//! project's aggregates recalculated. Lookups that miss return `false` or
//! `None`, never an error; the store performs no input validation and
//! trusts its caller.

use chrono::Utc;
use tracing::debug;

use crate::board::{self, BoardColumn};
use crate::error::Result;
use crate::model::{
    fresh_id, NewProject, NewTask, NewUser, Project, Task, User, UserStatus,
};
use crate::seed;
use crate::stats;
use crate::storage::{Storage, PROJECTS_KEY, TASKS_KEY, USERS_KEY};

/// In-memory collections over key-value storage
#[derive(Debug)]
pub struct EntityStore {
    storage: Storage,
    users: Vec<User>,
    projects: Vec<Project>,
    tasks: Vec<Task>,
}

impl EntityStore {
    /// Open the store, loading every collection from storage
    ///
    /// Absent or unreadable collections fall back to the built-in seed
    /// data, which is persisted immediately.
    pub fn open(storage: Storage) -> Result<Self> {
        storage.init()?;
        let users = storage.load_or_seed(USERS_KEY, seed::users)?;
        let projects = storage.load_or_seed(PROJECTS_KEY, seed::projects)?;
        let tasks = storage.load_or_seed(TASKS_KEY, seed::tasks)?;
        Ok(Self {
            storage,
            users,
            projects,
            tasks,
        })
    }

    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    // =========================================================================
    // Lookups
    // =========================================================================

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn user(&self, id: &str) -> Option<&User> {
        self.users.iter().find(|user| user.id == id)
    }

    pub fn project(&self, id: &str) -> Option<&Project> {
        self.projects.iter().find(|project| project.id == id)
    }

    pub fn task(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    /// Tasks owned by `project_id`, in collection order
    pub fn tasks_by_project(&self, project_id: &str) -> Vec<&Task> {
        self.tasks
            .iter()
            .filter(|task| task.project_id == project_id)
            .collect()
    }

    // =========================================================================
    // Users
    // =========================================================================

    /// Create a user with a fresh id, applying the store defaults
    pub fn add_user(&mut self, data: NewUser) -> Result<User> {
        let id = fresh_id();
        let avatar_url = data
            .avatar_url
            .unwrap_or_else(|| default_avatar_url(&id));
        let user = User {
            id,
            name: data.name,
            email: data.email,
            role: data.role,
            avatar_url,
            status: data.status.unwrap_or(UserStatus::Active),
        };
        self.users.push(user.clone());
        self.persist_users()?;
        debug!(id = %user.id, "user added");
        Ok(user)
    }

    /// Replace a user record in place; `false` when the id is unknown
    pub fn update_user(&mut self, updated: User) -> Result<bool> {
        let Some(slot) = self.users.iter_mut().find(|user| user.id == updated.id) else {
            return Ok(false);
        };
        *slot = updated;
        self.persist_users()?;
        Ok(true)
    }

    /// Remove a user; `false` when the collection did not shrink
    ///
    /// References to the removed user (`Task::assigned_to`,
    /// `Project::team_members`) are left in place; reassignment is the
    /// caller's decision.
    pub fn remove_user(&mut self, id: &str) -> Result<bool> {
        let before = self.users.len();
        self.users.retain(|user| user.id != id);
        if self.users.len() == before {
            return Ok(false);
        }
        self.persist_users()?;
        debug!(id, "user removed");
        Ok(true)
    }

    // =========================================================================
    // Projects
    // =========================================================================

    /// Create a project with a fresh id and zeroed aggregates
    pub fn add_project(&mut self, data: NewProject) -> Result<Project> {
        let project = Project {
            id: fresh_id(),
            name: data.name,
            description: data.description,
            status: data.status,
            progress: 0,
            start_date: data.start_date,
            end_date: data.end_date,
            team_members: data.team_members,
            tasks_count: 0,
            completed_tasks_count: 0,
        };
        self.projects.push(project.clone());
        self.persist_projects()?;
        debug!(id = %project.id, "project added");
        Ok(project)
    }

    /// Replace a project record in place; `false` when the id is unknown
    ///
    /// The derived statistics are recomputed from the task collection as
    /// part of the replacement, so aggregate values carried by the caller
    /// never reach storage.
    pub fn update_project(&mut self, updated: Project) -> Result<bool> {
        let aggregates = stats::project_task_stats(&self.tasks, &updated.id);
        let Some(slot) = self
            .projects
            .iter_mut()
            .find(|project| project.id == updated.id)
        else {
            return Ok(false);
        };
        *slot = updated;
        slot.tasks_count = aggregates.tasks_count;
        slot.completed_tasks_count = aggregates.completed_tasks_count;
        slot.progress = aggregates.progress;
        self.persist_projects()?;
        Ok(true)
    }

    /// Remove a project and every task that belongs to it
    ///
    /// The cascade is part of the same operation: owned tasks are filtered
    /// out by the removed project id and both collections are persisted
    /// once. The removed project is never recalculated.
    pub fn remove_project(&mut self, id: &str) -> Result<bool> {
        let before = self.projects.len();
        self.projects.retain(|project| project.id != id);
        if self.projects.len() == before {
            return Ok(false);
        }
        let tasks_before = self.tasks.len();
        self.tasks.retain(|task| task.project_id != id);
        self.persist_projects()?;
        self.persist_tasks()?;
        debug!(
            id,
            cascaded = tasks_before - self.tasks.len(),
            "project removed"
        );
        Ok(true)
    }

    // =========================================================================
    // Tasks
    // =========================================================================

    /// Create a task with a fresh id and today's creation date
    ///
    /// The owning project's aggregates are recalculated before returning.
    pub fn add_task(&mut self, data: NewTask) -> Result<Task> {
        let task = Task {
            id: fresh_id(),
            project_id: data.project_id,
            name: data.name,
            description: data.description,
            status: data.status,
            priority: data.priority,
            assigned_to: data.assigned_to,
            due_date: data.due_date,
            created_at: Utc::now().date_naive(),
        };
        self.tasks.push(task.clone());
        self.persist_tasks()?;
        self.recalculate(&task.project_id)?;
        debug!(id = %task.id, project = %task.project_id, "task added");
        Ok(task)
    }

    /// Replace a task record in place; `false` when the id is unknown
    ///
    /// Recalculates the owning project, and the previous owner too when the
    /// update moved the task to a different project.
    pub fn update_task(&mut self, updated: Task) -> Result<bool> {
        let Some(pos) = self.tasks.iter().position(|task| task.id == updated.id) else {
            return Ok(false);
        };
        let previous_project = self.tasks[pos].project_id.clone();
        let project_id = updated.project_id.clone();
        self.tasks[pos] = updated;
        self.persist_tasks()?;
        if previous_project != project_id {
            self.recalculate(&previous_project)?;
        }
        self.recalculate(&project_id)?;
        Ok(true)
    }

    /// Remove a task; `false` when the collection did not shrink
    ///
    /// Removal does not cascade anywhere, but the owning project's
    /// aggregates are recalculated.
    pub fn remove_task(&mut self, id: &str) -> Result<bool> {
        let Some(pos) = self.tasks.iter().position(|task| task.id == id) else {
            return Ok(false);
        };
        let removed = self.tasks.remove(pos);
        self.persist_tasks()?;
        self.recalculate(&removed.project_id)?;
        debug!(id, "task removed");
        Ok(true)
    }

    // =========================================================================
    // Aggregates and board moves
    // =========================================================================

    /// Recalculate the denormalized statistics of `project_id` from the
    /// task collection
    ///
    /// An absent project is nothing to update, not an error. Calling this
    /// twice with no intervening task mutation leaves the project unchanged
    /// the second time.
    pub fn recalculate(&mut self, project_id: &str) -> Result<()> {
        let aggregates = stats::project_task_stats(&self.tasks, project_id);
        let Some(project) = self
            .projects
            .iter_mut()
            .find(|project| project.id == project_id)
        else {
            return Ok(());
        };
        project.tasks_count = aggregates.tasks_count;
        project.completed_tasks_count = aggregates.completed_tasks_count;
        project.progress = aggregates.progress;
        self.persist_projects()?;
        Ok(())
    }

    /// Apply a board move; `false` when the move was a no-op
    ///
    /// A move that changes the dragged task's status recalculates its
    /// project, exactly like any other status-changing update.
    pub fn move_task(
        &mut self,
        dragged_task_id: &str,
        source: BoardColumn,
        dest: Option<BoardColumn>,
        dest_index: usize,
    ) -> Result<bool> {
        let Some(reordered) = board::reorder(&self.tasks, dragged_task_id, source, dest, dest_index)
        else {
            return Ok(false);
        };
        let status_changed = dest.map(|dest| dest.status() != source.status()).unwrap_or(false);
        let project_id = self
            .task(dragged_task_id)
            .map(|task| task.project_id.clone());
        self.tasks = reordered;
        self.persist_tasks()?;
        if status_changed {
            if let Some(project_id) = project_id {
                self.recalculate(&project_id)?;
            }
        }
        Ok(true)
    }

    // =========================================================================
    // Persistence
    // =========================================================================

    fn persist_users(&self) -> Result<()> {
        self.storage.write_json(USERS_KEY, &self.users)
    }

    fn persist_projects(&self) -> Result<()> {
        self.storage.write_json(PROJECTS_KEY, &self.projects)
    }

    fn persist_tasks(&self) -> Result<()> {
        self.storage.write_json(TASKS_KEY, &self.tasks)
    }
}

fn default_avatar_url(id: &str) -> String {
    format!("https://i.pravatar.cc/150?u={id}")
}
