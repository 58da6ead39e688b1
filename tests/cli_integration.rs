use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn memopad(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("memopad").unwrap();
    cmd.env("MEMOPAD_HOME", home)
        .env("NO_COLOR", "1")
        .env_remove("MEMOPAD_LOG");
    cmd
}

#[test]
fn test_create_list_and_home_screen() {
    let temp = TempDir::new().unwrap();

    memopad(temp.path())
        .args(["new", "first", "memo"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Memo created"))
        .stdout(predicate::str::contains("Set as the default memo."));

    memopad(temp.path())
        .args(["new", "second"])
        .assert()
        .success();

    memopad(temp.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("1. second"))
        .stdout(predicate::str::contains("2. first memo"));

    // No command: default memo in full, then the list.
    memopad(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("--------------------------------\nfirst memo"));

    let autosave = fs::read_to_string(temp.path().join("auto_save.md")).unwrap();
    assert!(autosave.starts_with("MEMO_START\nsecond\n["));
    assert!(temp.path().join("prefs.json").exists());
}

#[test]
fn test_piped_input_creates_memo() {
    let temp = TempDir::new().unwrap();

    memopad(temp.path())
        .arg("new")
        .write_stdin("# Title\n\n- item\n")
        .assert()
        .success();

    memopad(temp.path())
        .args(["view", "1"])
        .assert()
        .success()
        // Blank lines inside a memo do not survive the auto-save file.
        .stdout(predicate::str::contains("# Title\n- item"));
}

#[test]
fn test_delete_restore_purge_cycle() {
    let temp = TempDir::new().unwrap();
    for text in ["keeper", "doomed"] {
        memopad(temp.path()).args(["new", text]).assert().success();
    }

    // "keeper" is the default memo and cannot be deleted.
    memopad(temp.path())
        .args(["delete", "1", "2"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error: The default memo cannot be deleted"));

    memopad(temp.path())
        .args(["delete", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Memo deleted (1): doomed"));

    memopad(temp.path())
        .arg("trash")
        .assert()
        .success()
        .stdout(predicate::str::contains("d1. doomed"))
        .stdout(predicate::str::contains("30d left").or(predicate::str::contains("29d left")));

    memopad(temp.path())
        .args(["restore", "d1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Memo restored (d1): doomed"));

    memopad(temp.path()).args(["delete", "1"]).assert().success();
    memopad(temp.path())
        .arg("purge")
        .assert()
        .success()
        .stdout(predicate::str::contains("Purged: d1 doomed"));

    memopad(temp.path())
        .arg("trash")
        .assert()
        .success()
        .stdout(predicate::str::contains("Trash is empty."));
}

#[test]
fn test_expired_trash_is_swept_at_launch() {
    let temp = TempDir::new().unwrap();
    fs::write(
        temp.path().join("auto_save.md"),
        "MEMO_START\nancient\n[2020-01-01 09:00:00]\nDELETED:true\nDELETED_AT:1577869200000\nMEMO_END\n\n\
         MEMO_START\nalive\n[2020-01-01 09:00:00]\nDELETED:false\nMEMO_END\n\n",
    )
    .unwrap();

    memopad(temp.path())
        .arg("trash")
        .assert()
        .success()
        .stdout(predicate::str::contains("Trash is empty."));

    let autosave = fs::read_to_string(temp.path().join("auto_save.md")).unwrap();
    assert!(!autosave.contains("ancient"));
    assert!(autosave.contains("alive"));
}

#[test]
fn test_edit_and_default_commands() {
    let temp = TempDir::new().unwrap();
    for text in ["one", "two"] {
        memopad(temp.path()).args(["new", text]).assert().success();
    }

    memopad(temp.path())
        .args(["edit", "1", "two,", "edited"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Memo updated (1): two, edited"));

    memopad(temp.path())
        .args(["default", "set", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Default memo set (1): two, edited"));

    memopad(temp.path())
        .arg("default")
        .assert()
        .success()
        .stdout(predicate::str::contains("two, edited"));

    memopad(temp.path())
        .args(["default", "clear"])
        .assert()
        .success();

    memopad(temp.path())
        .arg("default")
        .assert()
        .success()
        .stdout(predicate::str::contains("No default memo is set."));
}

#[test]
fn test_export_import_round_trip() {
    let temp = TempDir::new().unwrap();
    let home = temp.path().join("home");
    let other = temp.path().join("other");
    let export = temp.path().join("memo.md");

    for text in ["alpha", "beta"] {
        memopad(&home).args(["new", text]).assert().success();
    }
    memopad(&home)
        .arg("export")
        .arg(&export)
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported 2 memo(s)"));

    memopad(&other).args(["new", "replaced"]).assert().success();
    memopad(&other)
        .arg("import")
        .arg(&export)
        .assert()
        .success()
        .stdout(predicate::str::contains("Imported 2 memo(s)"));

    memopad(&other)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("1. beta"))
        .stdout(predicate::str::contains("2. alpha"))
        .stdout(predicate::str::contains("replaced").not());
}

#[test]
fn test_export_uses_configured_file_name() {
    let temp = TempDir::new().unwrap();
    let work = temp.path().join("work");
    fs::create_dir_all(&work).unwrap();

    memopad(temp.path()).args(["new", "hello"]).assert().success();
    memopad(temp.path())
        .args(["config", "export_file_name", "notes.md"])
        .assert()
        .success()
        .stdout(predicate::str::contains("export_file_name set to notes.md"));

    memopad(temp.path())
        .current_dir(&work)
        .arg("export")
        .assert()
        .success();
    assert!(work.join("notes.md").exists());
}

#[test]
fn test_bad_input_reports_error() {
    let temp = TempDir::new().unwrap();

    memopad(temp.path())
        .args(["view", "7"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error: Api Error: Index 7 not found"));

    memopad(temp.path())
        .args(["delete", "x"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid index format"));
}

#[test]
fn test_verbose_logs_to_stderr() {
    let temp = TempDir::new().unwrap();

    memopad(temp.path())
        .args(["--verbose", "new", "logged"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Auto-saved memos"));
}
