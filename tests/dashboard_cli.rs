mod support;

use serde_json::Value;

use support::TestWorkspace;

fn dashboard(ws: &TestWorkspace) -> Value {
    let output = ws
        .cmd()
        .args(["dashboard", "--json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    serde_json::from_slice(&output).expect("dashboard json")
}

#[test]
fn dashboard_reports_seed_counts() {
    let ws = TestWorkspace::init();
    let value = dashboard(&ws);

    // Seed data: proj-1 active, proj-2 on-hold, proj-3 pending, proj-4
    // completed; three tasks still open; five active users.
    assert_eq!(value["data"]["active_projects"].as_u64(), Some(3));
    assert_eq!(value["data"]["open_tasks"].as_u64(), Some(3));
    assert_eq!(value["data"]["active_members"].as_u64(), Some(5));
    assert_eq!(value["data"]["projects_total"].as_u64(), Some(4));
    assert_eq!(value["data"]["tasks_total"].as_u64(), Some(6));
}

#[test]
fn dashboard_tracks_mutations() {
    let ws = TestWorkspace::init();

    ws.cmd()
        .args(["task", "status", "task-3", "completed"])
        .assert()
        .success();
    ws.cmd()
        .args(["user", "edit", "user-5", "--status", "inactive"])
        .assert()
        .success();

    let value = dashboard(&ws);
    assert_eq!(value["data"]["open_tasks"].as_u64(), Some(2));
    assert_eq!(value["data"]["active_members"].as_u64(), Some(4));
}

#[test]
fn dashboard_envelope_has_the_schema_header() {
    let ws = TestWorkspace::init();
    let value = dashboard(&ws);
    assert_eq!(value["schema_version"], "nexusflow.v1");
    assert_eq!(value["command"], "dashboard");
    assert_eq!(value["status"], "success");
}
