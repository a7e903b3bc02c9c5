//! nexusflow board command implementations.

use std::path::PathBuf;

use crate::board::{partition, BoardColumn, ColumnView, ALL_COLUMNS, DEFAULT_COLUMNS};
use crate::error::{Error, Result};
use crate::output::{emit_success, HumanOutput, OutputOptions};

pub struct ShowOptions {
    pub data_dir: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

pub struct MoveOptions {
    pub id: String,
    pub to: String,
    pub index: Option<usize>,
    pub data_dir: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

#[derive(serde::Serialize)]
struct BoardShowOutput {
    columns: Vec<ColumnView>,
}

#[derive(serde::Serialize)]
struct BoardMoveOutput {
    id: String,
    column: BoardColumn,
    index: usize,
    moved: bool,
}

fn visible_columns(show_blocked: bool) -> &'static [BoardColumn] {
    if show_blocked {
        &ALL_COLUMNS
    } else {
        &DEFAULT_COLUMNS
    }
}

pub fn run_show(options: ShowOptions) -> Result<()> {
    let ctx = super::load_context(options.data_dir)?;

    let columns = partition(
        ctx.store.tasks(),
        visible_columns(ctx.config.board.show_blocked),
    );

    let mut human = HumanOutput::new("Board");
    for view in &columns {
        human.push_summary(view.column.to_string(), view.tasks.len().to_string());
    }
    for view in &columns {
        for (index, task) in view.tasks.iter().enumerate() {
            human.push_detail(format!(
                "{} #{index} {} {}",
                view.column, task.id, task.name
            ));
        }
    }

    emit_success(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        "board show",
        &BoardShowOutput { columns },
        Some(&human),
    )
}

pub fn run_move(options: MoveOptions) -> Result<()> {
    let mut ctx = super::load_context(options.data_dir)?;

    let dest: BoardColumn = options.to.parse()?;
    if dest == BoardColumn::Blocked && !ctx.config.board.show_blocked {
        return Err(Error::InvalidArgument(
            "the blocked column is not enabled; set board.show_blocked in .nexusflow.toml"
                .to_string(),
        ));
    }

    let task = ctx
        .store
        .task(&options.id)
        .ok_or_else(|| Error::TaskNotFound(options.id.clone()))?;
    let source = BoardColumn::for_status(task.status);

    // Default to the end of the destination column, not counting the
    // dragged task itself.
    let dest_index = match options.index {
        Some(index) => index,
        None => ctx
            .store
            .tasks()
            .iter()
            .filter(|task| task.status == dest.status() && task.id != options.id)
            .count(),
    };

    let moved = ctx
        .store
        .move_task(&options.id, source, Some(dest), dest_index)?;

    let mut human = HumanOutput::new(if moved { "Task moved" } else { "Nothing to move" });
    human.push_summary("ID", options.id.clone());
    human.push_summary("Column", dest.to_string());
    human.push_summary("Index", dest_index.to_string());
    if moved && source != dest {
        human.push_summary("Status", dest.status().to_string());
    }

    emit_success(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        "board move",
        &BoardMoveOutput {
            id: options.id,
            column: dest,
            index: dest_index,
            moved,
        },
        Some(&human),
    )
}
