#![cfg(unix)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::Path;
use std::process::Command;

const DAYNOTE_ENV_VARS: [&str; 6] = [
    "DAYNOTE_OUTPUT",
    "DAYNOTE_TIMEOUT_SECS",
    "DAYNOTE_BODY_FORMAT",
    "DAYNOTE_OSASCRIPT",
    "DAYNOTE_LOG_LEVEL",
    "DAYNOTE_LOG_DIR",
];

const FAKE_OSASCRIPT: &str = r#"#!/bin/sh
case "$2" in
  *"count notes"*) echo 2 ;;
  *"note 1"*"noteTitle"*) printf 'Written today|||%s|||END_DATE|||\n' "$(date '+%Y-%m-%d %H:%M:%S')" ;;
  *"note 2"*"noteTitle"*) echo 'Ancient|||2001-1-1 0:0:0|||END_DATE|||' ;;
  *"note 1"*"body of"*) echo '<div>fresh body</div>' ;;
  *) echo "unexpected script" >&2; exit 1 ;;
esac
"#;

fn write_fake_osascript(dir: &Path) -> std::path::PathBuf {
    let path = dir.join("fake-osascript");
    fs::write(&path, FAKE_OSASCRIPT).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    path
}

/// `daynote` with every `DAYNOTE_*` override removed from the environment.
fn daynote() -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_daynote"));
    for name in DAYNOTE_ENV_VARS {
        command.env_remove(name);
    }
    command
}

#[test]
fn exports_todays_note_through_osascript_program() {
    let dir = tempfile::tempdir().unwrap();
    let fake = write_fake_osascript(dir.path());
    let output = dir.path().join("report.txt");

    let day_before = chrono::Local::now().date_naive();
    let run = daynote()
        .arg("--osascript")
        .arg(&fake)
        .arg("--output")
        .arg(&output)
        .output()
        .unwrap();
    if chrono::Local::now().date_naive() != day_before {
        // Crossed midnight: the stamped day may differ from the filtered day.
        return;
    }

    assert!(run.status.success(), "stderr: {}", String::from_utf8_lossy(&run.stderr));
    let stdout = String::from_utf8_lossy(&run.stdout);
    assert!(stdout.contains("Found 2 total notes"));
    assert!(stdout.contains("  Found note from today: Written today"));
    assert!(stdout.contains("Successfully exported 1 note(s)"));

    let report = fs::read_to_string(&output).unwrap();
    assert!(report.starts_with("=== Note 1 ===\nModified: "));
    assert!(report.contains("Title: Written today\n---\n<div>fresh body</div>\n\n\n"));
    assert!(!report.contains("Ancient"));
}

#[test]
fn unreachable_notes_app_still_writes_placeholder() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("report.txt");

    let run = daynote()
        .arg("--osascript")
        .arg(dir.path().join("missing-osascript"))
        .arg("--output")
        .arg(&output)
        .output()
        .unwrap();

    assert!(run.status.success());
    assert_eq!(fs::read_to_string(&output).unwrap(), "No notes found from today\n");
    assert!(String::from_utf8_lossy(&run.stderr).contains("failed to execute"));
}

#[test]
fn unwritable_report_exits_non_zero() {
    let dir = tempfile::tempdir().unwrap();

    let run = daynote()
        .arg("--osascript")
        .arg(dir.path().join("missing-osascript"))
        .arg("--output")
        .arg(dir.path().join("no-such-dir").join("report.txt"))
        .output()
        .unwrap();

    assert!(!run.status.success());
    assert!(String::from_utf8_lossy(&run.stderr).contains("failed to write report"));
}
