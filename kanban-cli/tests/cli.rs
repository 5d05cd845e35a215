//! End-to-end tests for the `kanban` binary

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use tempfile::TempDir;

fn kanban(temp: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("kanban").unwrap();
    cmd.current_dir(temp.path())
        .env_remove("RUST_LOG")
        .env_remove("KANBAN_DATABASE")
        .env_remove("KANBAN_ACTOR")
        .arg("--database")
        .arg(temp.path().join("kanban.db"));
    cmd
}

fn json(temp: &TempDir, args: &[&str]) -> Value {
    let output = kanban(temp).args(args).output().unwrap();
    assert!(
        output.status.success(),
        "kanban {args:?} failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).unwrap()
}

#[test]
fn test_board_task_move_round_trip() {
    let temp = TempDir::new().unwrap();

    let board = json(&temp, &["board", "create", "Sprint 1"]);
    let board_id = board["id"].as_str().unwrap();
    let todo = board["columns"][0]["id"].as_str().unwrap();
    let doing = board["columns"][1]["id"].as_str().unwrap();

    let first = json(&temp, &["task", "add", board_id, "First", "--column", todo]);
    json(&temp, &["task", "add", board_id, "Second", "--column", todo, "--priority", "high"]);

    let moved = json(
        &temp,
        &["task", "move", first["id"].as_str().unwrap(), doing, "0"],
    );
    assert_eq!(moved["columnId"], doing);
    assert_eq!(moved["position"], 0);

    let remaining = json(&temp, &["task", "list", board_id, "--column", todo]);
    assert_eq!(remaining["count"], 1);
    assert_eq!(remaining["tasks"][0]["title"], "Second");
    assert_eq!(remaining["tasks"][0]["position"], 0);
    assert_eq!(remaining["tasks"][0]["priority"], "HIGH");

    let feed = json(&temp, &["activity", "list", board_id, "--limit", "1"]);
    assert_eq!(feed["activities"][0]["type"], "TASK_MOVED");
}

#[test]
fn test_out_of_range_move_fails_with_exit_code_one() {
    let temp = TempDir::new().unwrap();
    let board = json(&temp, &["board", "create", "Sprint 1"]);
    let board_id = board["id"].as_str().unwrap();
    let todo = board["columns"][0]["id"].as_str().unwrap();
    let task = json(&temp, &["task", "add", board_id, "Only", "--column", todo]);

    kanban(&temp)
        .args(["task", "move", task["id"].as_str().unwrap(), todo, "3"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("out of range"));
}

#[test]
fn test_actor_flag_is_recorded() {
    let temp = TempDir::new().unwrap();
    let board = json(&temp, &["--actor", "alice", "board", "create", "Shared"]);
    assert_eq!(board["creatorId"], "alice");
}

#[test]
fn test_unknown_board_fails() {
    let temp = TempDir::new().unwrap();
    kanban(&temp)
        .args(["board", "get", "missing"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("board not found"));
}
