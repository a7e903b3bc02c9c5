//! Command-line interface for nexusflow
//!
//! This module defines the CLI structure using clap derive macros.
//! Each command family is implemented in its own submodule. The CLI is the
//! view layer: it validates input, issues mutations to the entity store,
//! and renders the returned state. It never touches the persistence layer
//! directly and never computes aggregates itself.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use clap::{Parser, Subcommand};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::storage::Storage;
use crate::store::EntityStore;

mod board;
mod dashboard;
mod init;
mod project;
mod task;
mod user;

/// nexusflow - local-first project, task, and user management
///
/// Projects, tasks, and users live in plain JSON files under a local data
/// directory; per-project progress is derived from the task collection.
#[derive(Parser, Debug)]
#[command(name = "nexusflow")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Data directory (defaults to the per-user data dir)
    #[arg(long, global = true, env = "NEXUSFLOW_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize the data directory with the built-in seed data
    Init,

    /// Show headline statistics across all collections
    Dashboard,

    /// Project management
    #[command(subcommand)]
    Project(ProjectCommands),

    /// Task management
    #[command(subcommand)]
    Task(TaskCommands),

    /// User management
    #[command(subcommand)]
    User(UserCommands),

    /// Status board
    #[command(subcommand)]
    Board(BoardCommands),
}

/// Project subcommands
#[derive(Subcommand, Debug)]
pub enum ProjectCommands {
    /// Create a project
    New {
        /// Project name
        name: String,

        /// Project description
        #[arg(long, default_value = "")]
        description: String,

        /// Status: active, completed, on-hold, pending
        #[arg(long, default_value = "active")]
        status: String,

        /// Start date (YYYY-MM-DD)
        #[arg(long)]
        start: String,

        /// End date (YYYY-MM-DD)
        #[arg(long)]
        end: String,

        /// Team member user id (repeatable)
        #[arg(long = "member")]
        members: Vec<String>,
    },

    /// List projects
    List {
        /// Filter by status
        #[arg(long)]
        status: Option<String>,
    },

    /// Show a project and its tasks
    Show {
        /// Project id
        id: String,
    },

    /// Edit project fields
    Edit {
        /// Project id
        id: String,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        description: Option<String>,

        /// Status: active, completed, on-hold, pending
        #[arg(long)]
        status: Option<String>,

        /// Start date (YYYY-MM-DD)
        #[arg(long)]
        start: Option<String>,

        /// End date (YYYY-MM-DD)
        #[arg(long)]
        end: Option<String>,

        /// Replace the team member list (repeatable)
        #[arg(long = "member")]
        members: Option<Vec<String>>,
    },

    /// Remove a project and all of its tasks
    Rm {
        /// Project id
        id: String,
    },
}

/// Task subcommands
#[derive(Subcommand, Debug)]
pub enum TaskCommands {
    /// Create a task
    New {
        /// Task name
        name: String,

        /// Owning project id
        #[arg(long)]
        project: String,

        /// Assignee user id
        #[arg(long = "assign")]
        assigned_to: String,

        /// Task description
        #[arg(long, default_value = "")]
        description: String,

        /// Status: pending, in-progress, completed, blocked
        #[arg(long, default_value = "pending")]
        status: String,

        /// Priority: low, medium, high
        #[arg(long, default_value = "medium")]
        priority: String,

        /// Due date (YYYY-MM-DD)
        #[arg(long)]
        due: String,
    },

    /// List tasks
    List {
        /// Filter by owning project id
        #[arg(long)]
        project: Option<String>,

        /// Filter by status
        #[arg(long)]
        status: Option<String>,

        /// Filter by priority
        #[arg(long)]
        priority: Option<String>,

        /// Filter by assignee user id
        #[arg(long)]
        assignee: Option<String>,
    },

    /// Show a task
    Show {
        /// Task id
        id: String,
    },

    /// Edit task fields
    Edit {
        /// Task id
        id: String,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        description: Option<String>,

        /// Status: pending, in-progress, completed, blocked
        #[arg(long)]
        status: Option<String>,

        /// Priority: low, medium, high
        #[arg(long)]
        priority: Option<String>,

        /// Move the task to another project
        #[arg(long)]
        project: Option<String>,

        /// Reassign to another user
        #[arg(long = "assign")]
        assigned_to: Option<String>,

        /// Due date (YYYY-MM-DD)
        #[arg(long)]
        due: Option<String>,
    },

    /// Set a task's status
    Status {
        /// Task id
        id: String,

        /// New status: pending, in-progress, completed, blocked
        status: String,
    },

    /// Remove a task
    Rm {
        /// Task id
        id: String,
    },
}

/// User subcommands
#[derive(Subcommand, Debug)]
pub enum UserCommands {
    /// Create a user
    New {
        /// User name
        name: String,

        /// Email address
        #[arg(long)]
        email: String,

        /// Role: admin, manager, developer, designer
        #[arg(long)]
        role: String,

        /// Status: active, inactive (default: active)
        #[arg(long)]
        status: Option<String>,

        /// Avatar URL (default: placeholder derived from the id)
        #[arg(long = "avatar")]
        avatar_url: Option<String>,
    },

    /// List users
    List {
        /// Filter by role
        #[arg(long)]
        role: Option<String>,

        /// Filter by status
        #[arg(long)]
        status: Option<String>,
    },

    /// Show a user
    Show {
        /// User id
        id: String,
    },

    /// Edit user fields
    Edit {
        /// User id
        id: String,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        email: Option<String>,

        /// Role: admin, manager, developer, designer
        #[arg(long)]
        role: Option<String>,

        /// Status: active, inactive
        #[arg(long)]
        status: Option<String>,

        /// Avatar URL
        #[arg(long = "avatar")]
        avatar_url: Option<String>,
    },

    /// Remove a user
    Rm {
        /// User id
        id: String,
    },
}

/// Board subcommands
#[derive(Subcommand, Debug)]
pub enum BoardCommands {
    /// Show the board, tasks grouped into status columns
    Show,

    /// Move a task to a column position
    Move {
        /// Task id
        id: String,

        /// Destination column: todo, in-progress, done (blocked when enabled)
        #[arg(long)]
        to: String,

        /// Position within the destination column (default: end)
        #[arg(long)]
        index: Option<usize>,
    },
}

/// Loaded store plus the configuration it was resolved from
pub(crate) struct StoreContext {
    pub config: Config,
    pub store: EntityStore,
}

/// Resolve the data directory: flag/env, then config, then the default
pub(crate) fn resolve_data_dir(data_dir: Option<PathBuf>, config: &Config) -> Result<PathBuf> {
    if let Some(dir) = data_dir {
        return Ok(dir);
    }
    if let Some(dir) = config.storage.dir.clone() {
        return Ok(dir);
    }
    Storage::default_root()
}

/// Load configuration from the working directory and open the store
pub(crate) fn load_context(data_dir: Option<PathBuf>) -> Result<StoreContext> {
    let config = Config::load_from_dir(Path::new("."));
    let root = resolve_data_dir(data_dir, &config)?;
    let store = EntityStore::open(Storage::new(root))?;
    Ok(StoreContext { config, store })
}

/// Parse a YYYY-MM-DD calendar date argument
pub(crate) fn parse_date(field: &str, value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| {
        Error::InvalidArgument(format!("invalid {field} '{value}': expected YYYY-MM-DD"))
    })
}

impl Cli {
    /// Execute the CLI command
    pub fn run(self) -> Result<()> {
        let json = self.json;
        let quiet = self.quiet;
        match self.command {
            Commands::Init => init::run(init::InitOptions {
                data_dir: self.data_dir,
                json,
                quiet,
            }),
            Commands::Dashboard => dashboard::run(dashboard::DashboardOptions {
                data_dir: self.data_dir,
                json,
                quiet,
            }),
            Commands::Project(cmd) => match cmd {
                ProjectCommands::New {
                    name,
                    description,
                    status,
                    start,
                    end,
                    members,
                } => project::run_new(project::NewOptions {
                    name,
                    description,
                    status,
                    start,
                    end,
                    members,
                    data_dir: self.data_dir,
                    json,
                    quiet,
                }),
                ProjectCommands::List { status } => project::run_list(project::ListOptions {
                    status,
                    data_dir: self.data_dir,
                    json,
                    quiet,
                }),
                ProjectCommands::Show { id } => project::run_show(project::ShowOptions {
                    id,
                    data_dir: self.data_dir,
                    json,
                    quiet,
                }),
                ProjectCommands::Edit {
                    id,
                    name,
                    description,
                    status,
                    start,
                    end,
                    members,
                } => project::run_edit(project::EditOptions {
                    id,
                    name,
                    description,
                    status,
                    start,
                    end,
                    members,
                    data_dir: self.data_dir,
                    json,
                    quiet,
                }),
                ProjectCommands::Rm { id } => project::run_rm(project::RmOptions {
                    id,
                    data_dir: self.data_dir,
                    json,
                    quiet,
                }),
            },
            Commands::Task(cmd) => match cmd {
                TaskCommands::New {
                    name,
                    project,
                    assigned_to,
                    description,
                    status,
                    priority,
                    due,
                } => task::run_new(task::NewOptions {
                    name,
                    project,
                    assigned_to,
                    description,
                    status,
                    priority,
                    due,
                    data_dir: self.data_dir,
                    json,
                    quiet,
                }),
                TaskCommands::List {
                    project,
                    status,
                    priority,
                    assignee,
                } => task::run_list(task::ListOptions {
                    project,
                    status,
                    priority,
                    assignee,
                    data_dir: self.data_dir,
                    json,
                    quiet,
                }),
                TaskCommands::Show { id } => task::run_show(task::ShowOptions {
                    id,
                    data_dir: self.data_dir,
                    json,
                    quiet,
                }),
                TaskCommands::Edit {
                    id,
                    name,
                    description,
                    status,
                    priority,
                    project,
                    assigned_to,
                    due,
                } => task::run_edit(task::EditOptions {
                    id,
                    name,
                    description,
                    status,
                    priority,
                    project,
                    assigned_to,
                    due,
                    data_dir: self.data_dir,
                    json,
                    quiet,
                }),
                TaskCommands::Status { id, status } => task::run_status(task::StatusOptions {
                    id,
                    status,
                    data_dir: self.data_dir,
                    json,
                    quiet,
                }),
                TaskCommands::Rm { id } => task::run_rm(task::RmOptions {
                    id,
                    data_dir: self.data_dir,
                    json,
                    quiet,
                }),
            },
            Commands::User(cmd) => match cmd {
                UserCommands::New {
                    name,
                    email,
                    role,
                    status,
                    avatar_url,
                } => user::run_new(user::NewOptions {
                    name,
                    email,
                    role,
                    status,
                    avatar_url,
                    data_dir: self.data_dir,
                    json,
                    quiet,
                }),
                UserCommands::List { role, status } => user::run_list(user::ListOptions {
                    role,
                    status,
                    data_dir: self.data_dir,
                    json,
                    quiet,
                }),
                UserCommands::Show { id } => user::run_show(user::ShowOptions {
                    id,
                    data_dir: self.data_dir,
                    json,
                    quiet,
                }),
                UserCommands::Edit {
                    id,
                    name,
                    email,
                    role,
                    status,
                    avatar_url,
                } => user::run_edit(user::EditOptions {
                    id,
                    name,
                    email,
                    role,
                    status,
                    avatar_url,
                    data_dir: self.data_dir,
                    json,
                    quiet,
                }),
                UserCommands::Rm { id } => user::run_rm(user::RmOptions {
                    id,
                    data_dir: self.data_dir,
                    json,
                    quiet,
                }),
            },
            Commands::Board(cmd) => match cmd {
                BoardCommands::Show => board::run_show(board::ShowOptions {
                    data_dir: self.data_dir,
                    json,
                    quiet,
                }),
                BoardCommands::Move { id, to, index } => board::run_move(board::MoveOptions {
                    id,
                    to,
                    index,
                    data_dir: self.data_dir,
                    json,
                    quiet,
                }),
            },
        }
    }
}
