//! nexusflow init command implementation.

use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::error::Result;
use crate::output::{emit_success, HumanOutput, OutputOptions};
use crate::storage::{Storage, USERS_KEY};
use crate::store::EntityStore;

pub struct InitOptions {
    pub data_dir: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

#[derive(serde::Serialize)]
struct InitOutput {
    data_dir: String,
    seeded: bool,
    users: usize,
    projects: usize,
    tasks: usize,
}

pub fn run(options: InitOptions) -> Result<()> {
    let config = Config::load_from_dir(Path::new("."));
    let root = super::resolve_data_dir(options.data_dir, &config)?;
    let storage = Storage::new(root);
    let seeded = storage.get(USERS_KEY).is_none();

    let store = EntityStore::open(storage)?;

    let output = InitOutput {
        data_dir: store.storage().root().display().to_string(),
        seeded,
        users: store.users().len(),
        projects: store.projects().len(),
        tasks: store.tasks().len(),
    };

    let mut human = HumanOutput::new(if seeded {
        "Data directory initialized with seed data"
    } else {
        "Data directory already initialized"
    });
    human.push_summary("Data dir", output.data_dir.clone());
    human.push_summary("Users", output.users.to_string());
    human.push_summary("Projects", output.projects.to_string());
    human.push_summary("Tasks", output.tasks.to_string());
    if seeded {
        human.push_next_step("nexusflow dashboard");
    }

    emit_success(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        "init",
        &output,
        Some(&human),
    )
}
