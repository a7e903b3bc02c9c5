mod support;

use serde_json::Value;

use support::TestWorkspace;

fn board_columns(ws: &TestWorkspace) -> Value {
    let output = ws
        .cmd()
        .args(["board", "show", "--json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let value: Value = serde_json::from_slice(&output).expect("board show json");
    value["data"]["columns"].clone()
}

fn column_task_ids(columns: &Value, name: &str) -> Vec<String> {
    columns
        .as_array()
        .expect("columns array")
        .iter()
        .find(|column| column["column"].as_str() == Some(name))
        .and_then(|column| column["tasks"].as_array())
        .map(|tasks| {
            tasks
                .iter()
                .map(|task| task["id"].as_str().unwrap_or_default().to_string())
                .collect()
        })
        .unwrap_or_default()
}

#[test]
fn board_show_partitions_the_seed_tasks() {
    let ws = TestWorkspace::init();
    let columns = board_columns(&ws);

    assert_eq!(columns.as_array().map(|cols| cols.len()), Some(3));
    assert_eq!(column_task_ids(&columns, "todo"), vec!["task-3"]);
    assert_eq!(
        column_task_ids(&columns, "in-progress"),
        vec!["task-2", "task-4"]
    );
    assert_eq!(
        column_task_ids(&columns, "done"),
        vec!["task-1", "task-5", "task-6"]
    );
}

#[test]
fn board_move_changes_status_and_project_progress() -> Result<(), Box<dyn std::error::Error>> {
    let ws = TestWorkspace::init();

    // task-3 is the only pending task of proj-1 (1/3 completed -> 33%).
    let output = ws
        .cmd()
        .args(["board", "move", "task-3", "--to", "done", "--json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let value: Value = serde_json::from_slice(&output)?;
    assert_eq!(value["data"]["moved"].as_bool(), Some(true));

    let task = ws
        .cmd()
        .args(["task", "show", "task-3", "--json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let value: Value = serde_json::from_slice(&task)?;
    assert_eq!(value["data"]["task"]["status"], "completed");

    let project = ws
        .cmd()
        .args(["project", "show", "proj-1", "--json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let value: Value = serde_json::from_slice(&project)?;
    assert_eq!(value["data"]["project"]["completedTasksCount"].as_u64(), Some(2));
    assert_eq!(value["data"]["project"]["progress"].as_u64(), Some(67));

    Ok(())
}

#[test]
fn board_move_at_an_index_reorders_within_the_column() {
    let ws = TestWorkspace::init();

    // Done column starts as [task-1, task-5, task-6].
    ws.cmd()
        .args([
            "board", "move", "task-6", "--to", "done", "--index", "0",
        ])
        .assert()
        .success();

    let columns = board_columns(&ws);
    assert_eq!(
        column_task_ids(&columns, "done"),
        vec!["task-6", "task-1", "task-5"]
    );
    // No task was dropped or duplicated anywhere.
    let total: usize = ["todo", "in-progress", "done"]
        .iter()
        .map(|name| column_task_ids(&columns, name).len())
        .sum();
    assert_eq!(total, 6);
}

#[test]
fn board_move_to_the_same_position_moves_nothing() -> Result<(), Box<dyn std::error::Error>> {
    let ws = TestWorkspace::init();

    // task-2 already heads the in-progress column.
    let output = ws
        .cmd()
        .args([
            "board",
            "move",
            "task-2",
            "--to",
            "in-progress",
            "--index",
            "0",
            "--json",
        ])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let value: Value = serde_json::from_slice(&output)?;
    assert_eq!(value["data"]["moved"].as_bool(), Some(false));

    Ok(())
}

#[test]
fn blocked_column_requires_opt_in() {
    let ws = TestWorkspace::init();
    ws.cmd()
        .args(["board", "move", "task-3", "--to", "blocked"])
        .assert()
        .failure()
        .code(2);

    ws.write_config("[board]\nshow_blocked = true\n")
        .expect("write config");
    ws.cmd()
        .args(["board", "move", "task-3", "--to", "blocked"])
        .assert()
        .success();

    let columns = board_columns(&ws);
    assert_eq!(columns.as_array().map(|cols| cols.len()), Some(4));
    assert_eq!(column_task_ids(&columns, "blocked"), vec!["task-3"]);
}

#[test]
fn board_move_of_unknown_task_fails_with_user_error() {
    let ws = TestWorkspace::init();
    ws.cmd()
        .args(["board", "move", "no-such-task", "--to", "done"])
        .assert()
        .failure()
        .code(2);
}
