//! nexusflow user command implementations.

use std::path::PathBuf;

use crate::error::{Error, Result};
use crate::model::{NewUser, User, UserRole, UserStatus};
use crate::output::{emit_success, HumanOutput, OutputOptions};

pub struct NewOptions {
    pub name: String,
    pub email: String,
    pub role: String,
    pub status: Option<String>,
    pub avatar_url: Option<String>,
    pub data_dir: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

pub struct ListOptions {
    pub role: Option<String>,
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
    pub email: Option<String>,
    pub role: Option<String>,
    pub status: Option<String>,
    pub avatar_url: Option<String>,
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
struct UserCreateOutput {
    user: User,
}

#[derive(serde::Serialize)]
struct UserListOutput {
    total: usize,
    users: Vec<User>,
}

#[derive(serde::Serialize)]
struct UserShowOutput {
    user: User,
}

#[derive(serde::Serialize)]
struct UserChangeOutput {
    id: String,
    changed: bool,
}

pub fn run_new(options: NewOptions) -> Result<()> {
    let mut ctx = super::load_context(options.data_dir)?;

    let name = options.name.trim();
    if name.is_empty() {
        return Err(Error::InvalidArgument(
            "user name cannot be empty".to_string(),
        ));
    }
    let email = options.email.trim();
    if email.is_empty() {
        return Err(Error::InvalidArgument(
            "email cannot be empty".to_string(),
        ));
    }
    let role: UserRole = options.role.parse()?;
    let status = options
        .status
        .as_deref()
        .map(str::parse::<UserStatus>)
        .transpose()?;

    let user = ctx.store.add_user(NewUser {
        name: name.to_string(),
        email: email.to_string(),
        role,
        status,
        avatar_url: options.avatar_url,
    })?;

    let mut human = HumanOutput::new("User created");
    human.push_summary("ID", user.id.clone());
    human.push_summary("Name", user.name.clone());
    human.push_summary("Role", user.role.to_string());
    human.push_summary("Status", user.status.to_string());

    emit_success(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        "user new",
        &UserCreateOutput { user },
        Some(&human),
    )
}

pub fn run_list(options: ListOptions) -> Result<()> {
    let ctx = super::load_context(options.data_dir)?;

    let role = options
        .role
        .as_deref()
        .map(str::parse::<UserRole>)
        .transpose()?;
    let status = options
        .status
        .as_deref()
        .map(str::parse::<UserStatus>)
        .transpose()?;

    let users: Vec<User> = ctx
        .store
        .users()
        .iter()
        .filter(|user| {
            role.map(|role| user.role == role).unwrap_or(true)
                && status.map(|status| user.status == status).unwrap_or(true)
        })
        .cloned()
        .collect();

    let mut human = HumanOutput::new("Users");
    human.push_summary("Total", users.len().to_string());
    for user in &users {
        human.push_detail(format!(
            "{} {} <{}> [{}] {}",
            user.id, user.name, user.email, user.role, user.status
        ));
    }

    emit_success(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        "user list",
        &UserListOutput {
            total: users.len(),
            users,
        },
        Some(&human),
    )
}

pub fn run_show(options: ShowOptions) -> Result<()> {
    let ctx = super::load_context(options.data_dir)?;

    let user = ctx
        .store
        .user(&options.id)
        .cloned()
        .ok_or_else(|| Error::UserNotFound(options.id.clone()))?;

    let assigned = ctx
        .store
        .tasks()
        .iter()
        .filter(|task| task.assigned_to == user.id)
        .count();

    let mut human = HumanOutput::new(format!("User {}", user.name));
    human.push_summary("ID", user.id.clone());
    human.push_summary("Email", user.email.clone());
    human.push_summary("Role", user.role.to_string());
    human.push_summary("Status", user.status.to_string());
    human.push_summary("Assigned tasks", assigned.to_string());

    emit_success(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        "user show",
        &UserShowOutput { user },
        Some(&human),
    )
}

pub fn run_edit(options: EditOptions) -> Result<()> {
    let mut ctx = super::load_context(options.data_dir)?;

    let mut user = ctx
        .store
        .user(&options.id)
        .cloned()
        .ok_or_else(|| Error::UserNotFound(options.id.clone()))?;

    if let Some(name) = options.name {
        let name = name.trim().to_string();
        if name.is_empty() {
            return Err(Error::InvalidArgument(
                "user name cannot be empty".to_string(),
            ));
        }
        user.name = name;
    }
    if let Some(email) = options.email {
        user.email = email;
    }
    if let Some(role) = options.role {
        user.role = role.parse()?;
    }
    if let Some(status) = options.status {
        user.status = status.parse()?;
    }
    if let Some(avatar_url) = options.avatar_url {
        user.avatar_url = avatar_url;
    }

    let changed = ctx.store.update_user(user)?;

    let mut human = HumanOutput::new("User updated");
    human.push_summary("ID", options.id.clone());
    human.push_summary("Changed", changed.to_string());

    emit_success(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        "user edit",
        &UserChangeOutput {
            id: options.id,
            changed,
        },
        Some(&human),
    )
}

pub fn run_rm(options: RmOptions) -> Result<()> {
    let mut ctx = super::load_context(options.data_dir)?;

    let assigned = ctx
        .store
        .tasks()
        .iter()
        .filter(|task| task.assigned_to == options.id)
        .count();
    let memberships = ctx
        .store
        .projects()
        .iter()
        .filter(|project| project.team_members.iter().any(|id| id == &options.id))
        .count();

    let removed = ctx.store.remove_user(&options.id)?;
    if !removed {
        return Err(Error::UserNotFound(options.id));
    }

    let mut human = HumanOutput::new("User removed");
    human.push_summary("ID", options.id.clone());
    if assigned > 0 {
        human.push_warning(format!(
            "{assigned} task(s) still reference the removed user; reassign them with nexusflow task edit --assign"
        ));
    }
    if memberships > 0 {
        human.push_warning(format!(
            "{memberships} project team(s) still list the removed user"
        ));
    }

    emit_success(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        "user rm",
        &UserChangeOutput {
            id: options.id,
            changed: removed,
        },
        Some(&human),
    )
}
