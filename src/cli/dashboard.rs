//! nexusflow dashboard command implementation.

use std::path::PathBuf;

use crate::error::Result;
use crate::output::{emit_success, HumanOutput, OutputOptions};
use crate::stats::{self, DashboardSummary};

pub struct DashboardOptions {
    pub data_dir: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

#[derive(serde::Serialize)]
struct DashboardOutput {
    #[serde(flatten)]
    summary: DashboardSummary,
    projects_total: usize,
    tasks_total: usize,
    users_total: usize,
}

pub fn run(options: DashboardOptions) -> Result<()> {
    let ctx = super::load_context(options.data_dir)?;
    let store = &ctx.store;

    let summary = stats::dashboard_summary(store.users(), store.projects(), store.tasks());
    let output = DashboardOutput {
        summary,
        projects_total: store.projects().len(),
        tasks_total: store.tasks().len(),
        users_total: store.users().len(),
    };

    let mut human = HumanOutput::new("Dashboard");
    human.push_summary("Active projects", summary.active_projects.to_string());
    human.push_summary("Open tasks", summary.open_tasks.to_string());
    human.push_summary("Team members", summary.active_members.to_string());
    for project in store.projects() {
        human.push_detail(format!(
            "{} [{}] {}% ({}/{} tasks completed)",
            project.name,
            project.status,
            project.progress,
            project.completed_tasks_count,
            project.tasks_count
        ));
    }

    emit_success(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        "dashboard",
        &output,
        Some(&human),
    )
}
