//! Status board: the task collection grouped into columns, with move
//! support.
//!
//! Tasks are stored as one flat collection; the board derives each column's
//! order from the flat order. A move removes the dragged task from its
//! source column, reassigns its status to the destination column's status,
//! and splices it into the destination column at the requested index. Every
//! untouched task keeps its relative order, and no task is ever dropped or
//! duplicated.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::Error;
use crate::model::{Task, TaskStatus};

/// Columns shown on the reference board, in display order
pub const DEFAULT_COLUMNS: [BoardColumn; 3] = [
    BoardColumn::Todo,
    BoardColumn::InProgress,
    BoardColumn::Done,
];

/// Every column, including the optional blocked column
pub const ALL_COLUMNS: [BoardColumn; 4] = [
    BoardColumn::Todo,
    BoardColumn::InProgress,
    BoardColumn::Done,
    BoardColumn::Blocked,
];

/// A board column and its task-status mapping
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum BoardColumn {
    Todo,
    InProgress,
    Done,
    Blocked,
}

impl BoardColumn {
    /// The task status this column maps to
    pub fn status(self) -> TaskStatus {
        match self {
            BoardColumn::Todo => TaskStatus::Pending,
            BoardColumn::InProgress => TaskStatus::InProgress,
            BoardColumn::Done => TaskStatus::Completed,
            BoardColumn::Blocked => TaskStatus::Blocked,
        }
    }

    /// The column a task with `status` currently sits in
    pub fn for_status(status: TaskStatus) -> Self {
        match status {
            TaskStatus::Pending => BoardColumn::Todo,
            TaskStatus::InProgress => BoardColumn::InProgress,
            TaskStatus::Completed => BoardColumn::Done,
            TaskStatus::Blocked => BoardColumn::Blocked,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            BoardColumn::Todo => "todo",
            BoardColumn::InProgress => "in-progress",
            BoardColumn::Done => "done",
            BoardColumn::Blocked => "blocked",
        }
    }
}

impl fmt::Display for BoardColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BoardColumn {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "todo" => Ok(BoardColumn::Todo),
            "in-progress" => Ok(BoardColumn::InProgress),
            "done" => Ok(BoardColumn::Done),
            "blocked" => Ok(BoardColumn::Blocked),
            _ => Err(Error::InvalidArgument(format!(
                "invalid column '{}': must be todo, in-progress, done, or blocked",
                s
            ))),
        }
    }
}

/// One rendered column: the tasks with its status, in flat-collection order
#[derive(Debug, Clone, Serialize)]
pub struct ColumnView {
    pub column: BoardColumn,
    pub status: TaskStatus,
    pub tasks: Vec<Task>,
}

/// Partition the flat collection into the given columns
pub fn partition(tasks: &[Task], columns: &[BoardColumn]) -> Vec<ColumnView> {
    columns
        .iter()
        .map(|&column| {
            let status = column.status();
            ColumnView {
                column,
                status,
                tasks: tasks
                    .iter()
                    .filter(|task| task.status == status)
                    .cloned()
                    .collect(),
            }
        })
        .collect()
}

/// Apply a move of `dragged_task_id` from `source` to `dest`, landing at
/// `dest_index` within the destination column (the index is relative to the
/// column's members after the dragged task is removed; past-the-end indexes
/// append).
///
/// Returns `None` when the move is a no-op and the collection must stay
/// unchanged:
/// - `dest` is absent (the drop landed outside any column);
/// - the dragged id is not in the collection (stale drag);
/// - the dragged task is not actually a member of `source` (stale column);
/// - source and destination are the same column and the index matches the
///   task's current position.
///
/// Otherwise the returned collection holds exactly the same task ids, with
/// exactly the dragged task's status changed iff `source != dest`.
pub fn reorder(
    tasks: &[Task],
    dragged_task_id: &str,
    source: BoardColumn,
    dest: Option<BoardColumn>,
    dest_index: usize,
) -> Option<Vec<Task>> {
    let dest = dest?;
    let dragged_idx = tasks.iter().position(|task| task.id == dragged_task_id)?;

    let source_status = source.status();
    if tasks[dragged_idx].status != source_status {
        // Stale drag: the task already left the source column.
        return None;
    }

    let index_in_source = tasks[..dragged_idx]
        .iter()
        .filter(|task| task.status == source_status)
        .count();
    if source == dest && index_in_source == dest_index {
        // Dropped back where it started.
        return None;
    }

    let dest_status = dest.status();
    let mut dragged = tasks[dragged_idx].clone();
    dragged.status = dest_status;

    // Re-flatten: walk the old order, skip the dragged task, and splice it
    // back in just before the dest_index-th remaining member of the
    // destination column. An index at or past the end of the column appends
    // to the end of the collection, which keeps it last within its column.
    let mut reordered = Vec::with_capacity(tasks.len());
    let mut dest_seen = 0usize;
    let mut placed = false;
    for (idx, task) in tasks.iter().enumerate() {
        if idx == dragged_idx {
            continue;
        }
        if task.status == dest_status {
            if dest_seen == dest_index {
                reordered.push(dragged.clone());
                placed = true;
            }
            dest_seen += 1;
        }
        reordered.push(task.clone());
    }
    if !placed {
        reordered.push(dragged);
    }

    Some(reordered)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    use chrono::NaiveDate;

    use crate::model::TaskPriority;

    fn task(id: &str, status: TaskStatus) -> Task {
        Task {
            id: id.to_string(),
            project_id: "proj-1".to_string(),
            name: id.to_string(),
            description: String::new(),
            status,
            priority: TaskPriority::Medium,
            assigned_to: "user-1".to_string(),
            due_date: NaiveDate::from_ymd_opt(2024, 6, 30).unwrap(),
            created_at: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        }
    }

    fn board() -> Vec<Task> {
        vec![
            task("a", TaskStatus::Pending),
            task("b", TaskStatus::InProgress),
            task("c", TaskStatus::Pending),
            task("d", TaskStatus::Completed),
            task("e", TaskStatus::Pending),
        ]
    }

    fn ids(tasks: &[Task]) -> Vec<&str> {
        tasks.iter().map(|task| task.id.as_str()).collect()
    }

    fn column_ids(tasks: &[Task], column: BoardColumn) -> Vec<&str> {
        tasks
            .iter()
            .filter(|task| task.status == column.status())
            .map(|task| task.id.as_str())
            .collect()
    }

    #[test]
    fn move_between_columns_changes_only_the_dragged_status() {
        let tasks = board();
        let moved = reorder(&tasks, "c", BoardColumn::Todo, Some(BoardColumn::Done), 0)
            .expect("move applies");

        // Same id multiset, one status changed.
        let mut before: BTreeMap<&str, usize> = BTreeMap::new();
        let mut after: BTreeMap<&str, usize> = BTreeMap::new();
        for task in &tasks {
            *before.entry(task.id.as_str()).or_default() += 1;
        }
        for task in &moved {
            *after.entry(task.id.as_str()).or_default() += 1;
        }
        assert_eq!(before, after);

        let changed: Vec<&str> = tasks
            .iter()
            .filter_map(|old| {
                let new = moved.iter().find(|new| new.id == old.id).unwrap();
                (new.status != old.status).then_some(old.id.as_str())
            })
            .collect();
        assert_eq!(changed, vec!["c"]);

        assert_eq!(column_ids(&moved, BoardColumn::Done), vec!["c", "d"]);
        assert_eq!(column_ids(&moved, BoardColumn::Todo), vec!["a", "e"]);
    }

    #[test]
    fn move_within_a_column_reorders_without_status_change() {
        let tasks = board();
        // Todo column is [a, c, e]; move a to index 2 -> [c, e, a].
        let moved = reorder(&tasks, "a", BoardColumn::Todo, Some(BoardColumn::Todo), 2)
            .expect("move applies");

        assert_eq!(column_ids(&moved, BoardColumn::Todo), vec!["c", "e", "a"]);
        // Other columns untouched, statuses all unchanged.
        assert_eq!(column_ids(&moved, BoardColumn::InProgress), vec!["b"]);
        assert_eq!(column_ids(&moved, BoardColumn::Done), vec!["d"]);
        let a = moved.iter().find(|task| task.id == "a").unwrap();
        assert_eq!(a.status, TaskStatus::Pending);
    }

    #[test]
    fn untouched_tasks_keep_their_relative_order() {
        let tasks = board();
        let moved = reorder(&tasks, "e", BoardColumn::Todo, Some(BoardColumn::InProgress), 1)
            .expect("move applies");

        let rest: Vec<&str> = ids(&moved)
            .into_iter()
            .filter(|id| *id != "e")
            .collect();
        assert_eq!(rest, vec!["a", "b", "c", "d"]);
        assert_eq!(column_ids(&moved, BoardColumn::InProgress), vec!["b", "e"]);
    }

    #[test]
    fn drop_outside_any_column_is_a_no_op() {
        let tasks = board();
        assert!(reorder(&tasks, "a", BoardColumn::Todo, None, 0).is_none());
    }

    #[test]
    fn drop_on_the_same_position_is_a_no_op() {
        let tasks = board();
        // c is the second task of the todo column (index 1).
        assert!(reorder(&tasks, "c", BoardColumn::Todo, Some(BoardColumn::Todo), 1).is_none());
    }

    #[test]
    fn stale_dragged_id_is_tolerated() {
        let tasks = board();
        assert!(reorder(&tasks, "ghost", BoardColumn::Todo, Some(BoardColumn::Done), 0).is_none());
    }

    #[test]
    fn stale_source_column_is_tolerated() {
        let tasks = board();
        // d is completed, not in the todo column.
        assert!(reorder(&tasks, "d", BoardColumn::Todo, Some(BoardColumn::Done), 0).is_none());
    }

    #[test]
    fn past_the_end_index_appends_to_the_column() {
        let tasks = board();
        let moved = reorder(&tasks, "b", BoardColumn::InProgress, Some(BoardColumn::Todo), 99)
            .expect("move applies");
        assert_eq!(column_ids(&moved, BoardColumn::Todo), vec!["a", "c", "e", "b"]);
    }

    #[test]
    fn move_into_an_empty_column() {
        let tasks = vec![task("a", TaskStatus::Pending)];
        let moved = reorder(&tasks, "a", BoardColumn::Todo, Some(BoardColumn::Blocked), 0)
            .expect("move applies");
        assert_eq!(column_ids(&moved, BoardColumn::Blocked), vec!["a"]);
        assert_eq!(moved.len(), 1);
    }

    #[test]
    fn partition_groups_by_status_in_flat_order() {
        let tasks = board();
        let views = partition(&tasks, &DEFAULT_COLUMNS);
        assert_eq!(views.len(), 3);
        assert_eq!(ids(&views[0].tasks), vec!["a", "c", "e"]);
        assert_eq!(ids(&views[1].tasks), vec!["b"]);
        assert_eq!(ids(&views[2].tasks), vec!["d"]);
    }
}
