//! nexusflow project command implementations.

use std::path::PathBuf;

use crate::error::{Error, Result};
use crate::model::{NewProject, Project, ProjectStatus, Task};
use crate::output::{emit_success, HumanOutput, OutputOptions};

pub struct NewOptions {
    pub name: String,
    pub description: String,
    pub status: String,
    pub start: String,
    pub end: String,
    pub members: Vec<String>,
    pub data_dir: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

pub struct ListOptions {
    pub status: Option<String>,
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
    pub start: Option<String>,
    pub end: Option<String>,
    pub members: Option<Vec<String>>,
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
struct ProjectCreateOutput {
    project: Project,
}

#[derive(serde::Serialize)]
struct ProjectListOutput {
    total: usize,
    projects: Vec<Project>,
}

#[derive(serde::Serialize)]
struct ProjectShowOutput {
    project: Project,
    tasks: Vec<Task>,
}

#[derive(serde::Serialize)]
struct ProjectChangeOutput {
    id: String,
    changed: bool,
}

#[derive(serde::Serialize)]
struct ProjectRemoveOutput {
    id: String,
    removed: bool,
    cascaded_tasks: usize,
}

pub fn run_new(options: NewOptions) -> Result<()> {
    let mut ctx = super::load_context(options.data_dir)?;

    let name = options.name.trim();
    if name.is_empty() {
        return Err(Error::InvalidArgument(
            "project name cannot be empty".to_string(),
        ));
    }
    let status: ProjectStatus = options.status.parse()?;
    let start_date = super::parse_date("start date", &options.start)?;
    let end_date = super::parse_date("end date", &options.end)?;

    let mut human = HumanOutput::new("Project created");
    for member in &options.members {
        if ctx.store.user(member).is_none() {
            human.push_warning(format!("team member {member} is not a known user"));
        }
    }

    let project = ctx.store.add_project(NewProject {
        name: name.to_string(),
        description: options.description,
        status,
        start_date,
        end_date,
        team_members: options.members,
    })?;

    human.push_summary("ID", project.id.clone());
    human.push_summary("Name", project.name.clone());
    human.push_summary("Status", project.status.to_string());
    human.push_summary("Team", project.team_members.len().to_string());

    emit_success(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        "project new",
        &ProjectCreateOutput { project },
        Some(&human),
    )
}

pub fn run_list(options: ListOptions) -> Result<()> {
    let ctx = super::load_context(options.data_dir)?;

    let status = options
        .status
        .as_deref()
        .map(str::parse::<ProjectStatus>)
        .transpose()?;
    let projects: Vec<Project> = ctx
        .store
        .projects()
        .iter()
        .filter(|project| status.map(|status| project.status == status).unwrap_or(true))
        .cloned()
        .collect();

    let mut human = HumanOutput::new("Projects");
    human.push_summary("Total", projects.len().to_string());
    for project in &projects {
        human.push_detail(format!(
            "{} {} [{}] {}%",
            project.id, project.name, project.status, project.progress
        ));
    }

    emit_success(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        "project list",
        &ProjectListOutput {
            total: projects.len(),
            projects,
        },
        Some(&human),
    )
}

pub fn run_show(options: ShowOptions) -> Result<()> {
    let ctx = super::load_context(options.data_dir)?;

    let project = ctx
        .store
        .project(&options.id)
        .cloned()
        .ok_or_else(|| Error::ProjectNotFound(options.id.clone()))?;
    let tasks: Vec<Task> = ctx
        .store
        .tasks_by_project(&project.id)
        .into_iter()
        .cloned()
        .collect();

    let mut human = HumanOutput::new(format!("Project {}", project.name));
    human.push_summary("ID", project.id.clone());
    human.push_summary("Status", project.status.to_string());
    human.push_summary(
        "Progress",
        format!(
            "{}% ({}/{} tasks completed)",
            project.progress, project.completed_tasks_count, project.tasks_count
        ),
    );
    human.push_summary(
        "Dates",
        format!("{} .. {}", project.start_date, project.end_date),
    );
    human.push_summary("Team", project.team_members.join(", "));
    for task in &tasks {
        human.push_detail(format!("{} {} [{}]", task.id, task.name, task.status));
    }

    emit_success(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        "project show",
        &ProjectShowOutput { project, tasks },
        Some(&human),
    )
}

pub fn run_edit(options: EditOptions) -> Result<()> {
    let mut ctx = super::load_context(options.data_dir)?;

    let mut project = ctx
        .store
        .project(&options.id)
        .cloned()
        .ok_or_else(|| Error::ProjectNotFound(options.id.clone()))?;

    if let Some(name) = options.name {
        let name = name.trim().to_string();
        if name.is_empty() {
            return Err(Error::InvalidArgument(
                "project name cannot be empty".to_string(),
            ));
        }
        project.name = name;
    }
    if let Some(description) = options.description {
        project.description = description;
    }
    if let Some(status) = options.status {
        project.status = status.parse()?;
    }
    if let Some(start) = options.start {
        project.start_date = super::parse_date("start date", &start)?;
    }
    if let Some(end) = options.end {
        project.end_date = super::parse_date("end date", &end)?;
    }
    if let Some(members) = options.members {
        project.team_members = members;
    }

    let changed = ctx.store.update_project(project)?;

    let mut human = HumanOutput::new("Project updated");
    human.push_summary("ID", options.id.clone());
    human.push_summary("Changed", changed.to_string());

    emit_success(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        "project edit",
        &ProjectChangeOutput {
            id: options.id,
            changed,
        },
        Some(&human),
    )
}

pub fn run_rm(options: RmOptions) -> Result<()> {
    let mut ctx = super::load_context(options.data_dir)?;

    let owned = ctx.store.tasks_by_project(&options.id).len();
    let removed = ctx.store.remove_project(&options.id)?;
    if !removed {
        return Err(Error::ProjectNotFound(options.id));
    }

    let mut human = HumanOutput::new("Project removed");
    human.push_summary("ID", options.id.clone());
    human.push_summary("Cascaded tasks", owned.to_string());

    emit_success(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        "project rm",
        &ProjectRemoveOutput {
            id: options.id,
            removed,
            cascaded_tasks: owned,
        },
        Some(&human),
    )
}
