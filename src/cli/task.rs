//! nexusflow task command implementations.

use std::path::PathBuf;

use crate::error::{Error, Result};
use crate::model::{NewTask, Task, TaskPriority, TaskStatus};
use crate::output::{emit_success, HumanOutput, OutputOptions};

pub struct NewOptions {
    pub name: String,
    pub project: String,
    pub assigned_to: String,
    pub description: String,
    pub status: String,
    pub priority: String,
    pub due: String,
    pub data_dir: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

pub struct ListOptions {
    pub project: Option<String>,
    pub status: Option<String>,
    pub priority: Option<String>,
    pub assignee: Option<String>,
    pub data_dir: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

pub struct ShowOptions {
    pub id: String,
    pub data_dir: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

pub struct EditOptions {
    pub id: String,
    pub name: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
    pub priority: Option<String>,
    pub project: Option<String>,
    pub assigned_to: Option<String>,
    pub due: Option<String>,
    pub data_dir: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

pub struct StatusOptions {
    pub id: String,
    pub status: String,
    pub data_dir: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

pub struct RmOptions {
    pub id: String,
    pub data_dir: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

#[derive(serde::Serialize)]
struct TaskCreateOutput {
    task: Task,
    project_progress: u8,
}

#[derive(serde::Serialize)]
struct TaskListOutput {
    total: usize,
    tasks: Vec<Task>,
}

#[derive(serde::Serialize)]
struct TaskShowOutput {
    task: Task,
}

#[derive(serde::Serialize)]
struct TaskChangeOutput {
    id: String,
    changed: bool,
}

pub fn run_new(options: NewOptions) -> Result<()> {
    let mut ctx = super::load_context(options.data_dir)?;

    let name = options.name.trim();
    if name.is_empty() {
        return Err(Error::InvalidArgument(
            "task name cannot be empty".to_string(),
        ));
    }
    if ctx.store.project(&options.project).is_none() {
        return Err(Error::ProjectNotFound(options.project));
    }
    if ctx.store.user(&options.assigned_to).is_none() {
        return Err(Error::UserNotFound(options.assigned_to));
    }
    let status: TaskStatus = options.status.parse()?;
    let priority: TaskPriority = options.priority.parse()?;
    let due_date = super::parse_date("due date", &options.due)?;

    let task = ctx.store.add_task(NewTask {
        project_id: options.project,
        name: name.to_string(),
        description: options.description,
        status,
        priority,
        assigned_to: options.assigned_to,
        due_date,
    })?;
    let project_progress = ctx
        .store
        .project(&task.project_id)
        .map(|project| project.progress)
        .unwrap_or(0);

    let mut human = HumanOutput::new("Task created");
    human.push_summary("ID", task.id.clone());
    human.push_summary("Project", task.project_id.clone());
    human.push_summary("Status", task.status.to_string());
    human.push_summary("Priority", task.priority.to_string());
    human.push_summary("Project progress", format!("{project_progress}%"));

    emit_success(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        "task new",
        &TaskCreateOutput {
            task,
            project_progress,
        },
        Some(&human),
    )
}

pub fn run_list(options: ListOptions) -> Result<()> {
    let ctx = super::load_context(options.data_dir)?;

    let status = options
        .status
        .as_deref()
        .map(str::parse::<TaskStatus>)
        .transpose()?;
    let priority = options
        .priority
        .as_deref()
        .map(str::parse::<TaskPriority>)
        .transpose()?;

    let tasks: Vec<Task> = ctx
        .store
        .tasks()
        .iter()
        .filter(|task| {
            options
                .project
                .as_deref()
                .map(|project| task.project_id == project)
                .unwrap_or(true)
                && status.map(|status| task.status == status).unwrap_or(true)
                && priority
                    .map(|priority| task.priority == priority)
                    .unwrap_or(true)
                && options
                    .assignee
                    .as_deref()
                    .map(|assignee| task.assigned_to == assignee)
                    .unwrap_or(true)
        })
        .cloned()
        .collect();

    let mut human = HumanOutput::new("Tasks");
    human.push_summary("Total", tasks.len().to_string());
    for task in &tasks {
        human.push_detail(format!(
            "{} {} [{}] {} due {}",
            task.id, task.name, task.status, task.priority, task.due_date
        ));
    }

    emit_success(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        "task list",
        &TaskListOutput {
            total: tasks.len(),
            tasks,
        },
        Some(&human),
    )
}

pub fn run_show(options: ShowOptions) -> Result<()> {
    let ctx = super::load_context(options.data_dir)?;

    let task = ctx
        .store
        .task(&options.id)
        .cloned()
        .ok_or_else(|| Error::TaskNotFound(options.id.clone()))?;

    let mut human = HumanOutput::new(format!("Task {}", task.name));
    human.push_summary("ID", task.id.clone());
    human.push_summary("Project", task.project_id.clone());
    human.push_summary("Status", task.status.to_string());
    human.push_summary("Priority", task.priority.to_string());
    human.push_summary("Assigned to", task.assigned_to.clone());
    human.push_summary("Due", task.due_date.to_string());
    human.push_summary("Created", task.created_at.to_string());
    if !task.description.is_empty() {
        human.push_detail(task.description.clone());
    }

    emit_success(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        "task show",
        &TaskShowOutput { task },
        Some(&human),
    )
}

pub fn run_edit(options: EditOptions) -> Result<()> {
    let mut ctx = super::load_context(options.data_dir)?;

    let mut task = ctx
        .store
        .task(&options.id)
        .cloned()
        .ok_or_else(|| Error::TaskNotFound(options.id.clone()))?;

    if let Some(name) = options.name {
        let name = name.trim().to_string();
        if name.is_empty() {
            return Err(Error::InvalidArgument(
                "task name cannot be empty".to_string(),
            ));
        }
        task.name = name;
    }
    if let Some(description) = options.description {
        task.description = description;
    }
    if let Some(status) = options.status {
        task.status = status.parse()?;
    }
    if let Some(priority) = options.priority {
        task.priority = priority.parse()?;
    }
    if let Some(project) = options.project {
        if ctx.store.project(&project).is_none() {
            return Err(Error::ProjectNotFound(project));
        }
        task.project_id = project;
    }
    if let Some(assigned_to) = options.assigned_to {
        if ctx.store.user(&assigned_to).is_none() {
            return Err(Error::UserNotFound(assigned_to));
        }
        task.assigned_to = assigned_to;
    }
    if let Some(due) = options.due {
        task.due_date = super::parse_date("due date", &due)?;
    }

    let changed = ctx.store.update_task(task)?;

    let mut human = HumanOutput::new("Task updated");
    human.push_summary("ID", options.id.clone());
    human.push_summary("Changed", changed.to_string());

    emit_success(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        "task edit",
        &TaskChangeOutput {
            id: options.id,
            changed,
        },
        Some(&human),
    )
}

pub fn run_status(options: StatusOptions) -> Result<()> {
    let mut ctx = super::load_context(options.data_dir)?;

    let mut task = ctx
        .store
        .task(&options.id)
        .cloned()
        .ok_or_else(|| Error::TaskNotFound(options.id.clone()))?;
    task.status = options.status.parse()?;
    let project_id = task.project_id.clone();

    let changed = ctx.store.update_task(task)?;
    let progress = ctx
        .store
        .project(&project_id)
        .map(|project| project.progress);

    let mut human = HumanOutput::new("Task status updated");
    human.push_summary("ID", options.id.clone());
    human.push_summary("Status", options.status.trim().to_lowercase());
    if let Some(progress) = progress {
        human.push_summary("Project progress", format!("{progress}%"));
    }

    emit_success(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        "task status",
        &TaskChangeOutput {
            id: options.id,
            changed,
        },
        Some(&human),
    )
}

pub fn run_rm(options: RmOptions) -> Result<()> {
    let mut ctx = super::load_context(options.data_dir)?;

    let removed = ctx.store.remove_task(&options.id)?;
    if !removed {
        return Err(Error::TaskNotFound(options.id));
    }

    let mut human = HumanOutput::new("Task removed");
    human.push_summary("ID", options.id.clone());

    emit_success(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        "task rm",
        &TaskChangeOutput {
            id: options.id,
            changed: removed,
        },
        Some(&human),
    )
}
