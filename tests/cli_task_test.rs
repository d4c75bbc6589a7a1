//! Integration tests for task commands via the CLI.
//!
//! Covers create/show/update/delete, moves within and across sections, and
//! the lenient no-op behavior on ghost ids and out-of-range indices.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn vilo_in(dir: &TempDir) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_vilo"));
    cmd.env("VILO_DATA_DIR", dir.path());
    cmd
}

fn run_json(dir: &TempDir, args: &[&str]) -> serde_json::Value {
    let out = vilo_in(dir).args(args).output().unwrap();
    assert!(out.status.success(), "command failed: {args:?}");
    serde_json::from_slice(&out.stdout).unwrap()
}

/// One board with two sections; returns (board, todo, done).
fn board_with_sections(dir: &TempDir) -> (i64, i64, i64) {
    let board = run_json(dir, &["board", "create", "Web"])["id"]
        .as_i64()
        .unwrap();
    let todo = run_json(dir, &["section", "create", &board.to_string(), "Todo"])["id"]
        .as_i64()
        .unwrap();
    let done = run_json(dir, &["section", "create", &board.to_string(), "Done"])["id"]
        .as_i64()
        .unwrap();
    (board, todo, done)
}

fn create_task(dir: &TempDir, section: i64, name: &str) -> i64 {
    run_json(dir, &["task", "create", &section.to_string(), name])["id"]
        .as_i64()
        .expect("task id")
}

/// Task names of one section, in display order.
fn task_names(dir: &TempDir, board: i64, section: i64) -> Vec<String> {
    let view = run_json(dir, &["show", &board.to_string()]);
    view["sections"]
        .as_array()
        .unwrap()
        .iter()
        .find(|s| s["id"].as_i64() == Some(section))
        .expect("section in view")["tasks"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["name"].as_str().unwrap().to_string())
        .collect()
}

// === Create / show ===

#[test]
fn test_task_create_json() {
    let temp = TempDir::new().unwrap();
    let (_, todo, _) = board_with_sections(&temp);

    vilo_in(&temp)
        .args(["task", "create", &todo.to_string(), "Ship the beta"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"entity\":\"task\""))
        .stdout(predicate::str::contains("\"created\":true"));
}

#[test]
fn test_task_create_in_ghost_section_is_noop() {
    let temp = TempDir::new().unwrap();
    board_with_sections(&temp);

    vilo_in(&temp)
        .args(["task", "create", "999999", "Nowhere"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"created\":false"));
}

#[test]
fn test_task_show_starts_empty() {
    let temp = TempDir::new().unwrap();
    let (_, todo, _) = board_with_sections(&temp);
    let task = create_task(&temp, todo, "Fresh");

    let shown = run_json(&temp, &["task", "show", &task.to_string()]);
    assert_eq!(shown["name"], "Fresh");
    assert_eq!(shown["description"], "");
    assert_eq!(shown["progress_percent"], 0);
    assert!(shown["checklist"].as_array().unwrap().is_empty());
}

#[test]
fn test_task_show_unknown_fails() {
    let temp = TempDir::new().unwrap();

    vilo_in(&temp)
        .args(["task", "show", "999999"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

// === Update ===

#[test]
fn test_task_update_name_and_description() {
    let temp = TempDir::new().unwrap();
    let (_, todo, _) = board_with_sections(&temp);
    let task = create_task(&temp, todo, "Draft");

    vilo_in(&temp)
        .args([
            "task",
            "update",
            &task.to_string(),
            "-n",
            "Final",
            "-d",
            "With all the details",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"changed\":true"));

    let shown = run_json(&temp, &["task", "show", &task.to_string()]);
    assert_eq!(shown["name"], "Final");
    assert_eq!(shown["description"], "With all the details");
}

#[test]
fn test_task_update_ghost_is_noop() {
    let temp = TempDir::new().unwrap();

    vilo_in(&temp)
        .args(["task", "update", "999999", "-n", "Ghost"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"changed\":false"));
}

// === Delete ===

#[test]
fn test_task_delete_with_yes_flag() {
    let temp = TempDir::new().unwrap();
    let (board, todo, _) = board_with_sections(&temp);
    let task = create_task(&temp, todo, "Doomed");

    vilo_in(&temp)
        .args([
            "task",
            "delete",
            &todo.to_string(),
            &task.to_string(),
            "--yes",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"changed\":true"));

    assert!(task_names(&temp, board, todo).is_empty());
}

#[test]
fn test_task_delete_declined_keeps_task() {
    let temp = TempDir::new().unwrap();
    let (board, todo, _) = board_with_sections(&temp);
    let task = create_task(&temp, todo, "Survivor");

    vilo_in(&temp)
        .args(["task", "delete", &todo.to_string(), &task.to_string()])
        .write_stdin("\n") // just enter = default No
        .assert()
        .success()
        .stdout(predicate::str::contains("\"cancelled\":true"));

    assert_eq!(task_names(&temp, board, todo), ["Survivor"]);
}

#[test]
fn test_task_delete_ghost_ids_is_noop() {
    let temp = TempDir::new().unwrap();
    let (board, todo, _) = board_with_sections(&temp);
    create_task(&temp, todo, "Still here");

    // Ghost section and ghost task: document unchanged, exit 0.
    vilo_in(&temp)
        .args(["task", "delete", "888888", "999999", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"changed\":false"));

    vilo_in(&temp)
        .args(["task", "delete", &todo.to_string(), "999999", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"changed\":false"));

    assert_eq!(task_names(&temp, board, todo), ["Still here"]);
}

// === Move ===

#[test]
fn test_task_move_within_section() {
    let temp = TempDir::new().unwrap();
    let (board, todo, _) = board_with_sections(&temp);
    create_task(&temp, todo, "one");
    create_task(&temp, todo, "two");
    create_task(&temp, todo, "three");

    // Remove "one" at 0, reinsert at 2 (positions count after removal).
    vilo_in(&temp)
        .args([
            "task",
            "move",
            &todo.to_string(),
            "0",
            &todo.to_string(),
            "2",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"changed\":true"));

    assert_eq!(task_names(&temp, board, todo), ["two", "three", "one"]);
}

#[test]
fn test_task_move_across_sections() {
    let temp = TempDir::new().unwrap();
    let (board, todo, done) = board_with_sections(&temp);
    create_task(&temp, todo, "one");
    create_task(&temp, todo, "two");

    run_json(
        &temp,
        &[
            "task",
            "move",
            &todo.to_string(),
            "1",
            &done.to_string(),
            "0",
        ],
    );

    assert_eq!(task_names(&temp, board, todo), ["one"]);
    assert_eq!(task_names(&temp, board, done), ["two"]);
}

#[test]
fn test_task_move_carries_checklist() {
    let temp = TempDir::new().unwrap();
    let (_, todo, done) = board_with_sections(&temp);
    let task = create_task(&temp, todo, "Packed");
    run_json(&temp, &["check", "add", &task.to_string(), "don't lose me"]);

    run_json(
        &temp,
        &[
            "task",
            "move",
            &todo.to_string(),
            "0",
            &done.to_string(),
            "0",
        ],
    );

    let shown = run_json(&temp, &["task", "show", &task.to_string()]);
    assert_eq!(shown["checklist"][0]["text"], "don't lose me");
}

#[test]
fn test_task_move_out_of_range_is_noop() {
    let temp = TempDir::new().unwrap();
    let (board, todo, done) = board_with_sections(&temp);
    create_task(&temp, todo, "only");

    vilo_in(&temp)
        .args([
            "task",
            "move",
            &todo.to_string(),
            "3",
            &done.to_string(),
            "0",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"changed\":false"));

    vilo_in(&temp)
        .args([
            "task",
            "move",
            &todo.to_string(),
            "0",
            &done.to_string(),
            "1",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"changed\":false"));

    assert_eq!(task_names(&temp, board, todo), ["only"]);
}
