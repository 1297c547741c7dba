//! Integration tests for the visitor-counter binary.

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;
use tempfile::TempDir;
use visitor_counter::core::VisitorCounter;

fn counter_cmd(db: &Path) -> Command {
    let mut cmd = Command::cargo_bin("visitor-counter").unwrap();
    cmd.env_remove("COUNTER_DB")
        .env_remove("RUST_LOG")
        .arg("--db")
        .arg(db);
    cmd
}

#[test]
fn test_count_on_fresh_store() {
    let temp = TempDir::new().unwrap();
    let db = temp.path().join("counter.db");

    counter_cmd(&db)
        .arg("count")
        .assert()
        .success()
        .stdout("0\n");

    assert!(db.exists());
}

#[test]
fn test_count_does_not_record_a_visit() {
    let temp = TempDir::new().unwrap();
    let db = temp.path().join("counter.db");

    let mut counter = VisitorCounter::open_at(&db).unwrap();
    for _ in 0..3 {
        counter.increment().unwrap();
    }
    drop(counter);

    for _ in 0..2 {
        counter_cmd(&db).arg("count").assert().success().stdout("3\n");
    }
}

#[test]
fn test_reset_command() {
    let temp = TempDir::new().unwrap();
    let db = temp.path().join("counter.db");

    let mut counter = VisitorCounter::open_at(&db).unwrap();
    counter.increment().unwrap();
    drop(counter);

    counter_cmd(&db).arg("reset").assert().success().stdout("0\n");
    counter_cmd(&db).arg("reset").assert().success().stdout("0\n");

    let counter = VisitorCounter::open_at(&db).unwrap();
    assert_eq!(counter.current().unwrap(), 0);
}

#[test]
fn test_db_from_environment() {
    let temp = TempDir::new().unwrap();
    let db = temp.path().join("from_env.db");

    Command::cargo_bin("visitor-counter")
        .unwrap()
        .env("COUNTER_DB", &db)
        .arg("count")
        .assert()
        .success()
        .stdout("0\n");

    assert!(db.exists());
}

#[test]
fn test_inaccessible_store_fails_cleanly() {
    let temp = TempDir::new().unwrap();
    let blocker = temp.path().join("blocker");
    std::fs::write(&blocker, b"not a directory").unwrap();

    counter_cmd(&blocker.join("counter.db"))
        .arg("count")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Error:"));
}

#[test]
fn test_unknown_command() {
    let temp = TempDir::new().unwrap();

    counter_cmd(&temp.path().join("counter.db"))
        .arg("explode")
        .assert()
        .failure();
}
