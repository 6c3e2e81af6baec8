mod common;

use chrono::NaiveDate;
use common::ScriptedBridge;
use daynote_core::{
    export_notes, run_export, AppleNotesReader, ExportConfig, ExportError, NoteRecord,
    ProgressEvent, EMPTY_REPORT,
};
use std::fs;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()
}

fn config_in(dir: &tempfile::TempDir) -> ExportConfig {
    ExportConfig {
        output_path: dir.path().join("todays_notes.txt"),
        ..ExportConfig::default()
    }
}

#[test]
fn zero_notes_writes_placeholder_line() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(&dir);
    let bridge = ScriptedBridge::new().with_count(0);
    let reader = AppleNotesReader::new(&bridge);

    let outcome = run_export(&config, &reader, today(), |_| {}).unwrap();

    assert_eq!(outcome.exported(), 0);
    assert_eq!(
        fs::read_to_string(&config.output_path).unwrap(),
        "No notes found from today\n"
    );
}

#[test]
fn failed_count_is_treated_as_zero_notes() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(&dir);
    let bridge = ScriptedBridge::new().with_failing_count();
    let reader = AppleNotesReader::new(&bridge);

    let outcome = run_export(&config, &reader, today(), |_| {}).unwrap();

    assert_eq!(outcome.summary.total, 0);
    assert_eq!(fs::read_to_string(&config.output_path).unwrap(), EMPTY_REPORT);
    assert_eq!(bridge.calls().len(), 1);
}

#[test]
fn todays_notes_are_exported_in_chronological_blocks() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(&dir);
    let bridge = ScriptedBridge::new()
        .with_count(3)
        .with_note(1, "Review", "2026-10-18 10:0:0", "<div>PR review</div>")
        .with_note(2, "Standup", "2026-10-18 9:0:0", "<div>blockers: none</div>")
        .with_note(3, "Old idea", "2026-10-17 18:45:10", "<div>skip me</div>");
    let reader = AppleNotesReader::new(&bridge);

    let outcome = run_export(&config, &reader, today(), |_| {}).unwrap();

    assert_eq!(outcome.exported(), 2);
    assert_eq!(outcome.report_path, config.output_path);
    let report = fs::read_to_string(&config.output_path).unwrap();
    assert_eq!(
        report,
        "=== Note 1 ===\n\
         Modified: 2026-10-18 09:00:00\n\
         Title: Standup\n\
         ---\n\
         <div>blockers: none</div>\n\n\n\
         === Note 2 ===\n\
         Modified: 2026-10-18 10:00:00\n\
         Title: Review\n\
         ---\n\
         <div>PR review</div>\n\n\n"
    );
}

#[test]
fn progress_events_follow_run_order() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(&dir);
    let bridge = ScriptedBridge::new()
        .with_count(2)
        .with_note(1, "Morning", "2026-10-18 7:30:0", "")
        .with_note(2, "Evening", "2026-10-18 19:0:0", "");
    let reader = AppleNotesReader::new(&bridge);

    let mut events = Vec::new();
    run_export(&config, &reader, today(), |event| {
        events.push(match event {
            ProgressEvent::Counted { total } => format!("counted:{total}"),
            ProgressEvent::Matched { note } => format!("matched:{}", note.title),
            ProgressEvent::Exporting { notes, .. } => format!("exporting:{notes}"),
        });
    })
    .unwrap();

    assert_eq!(
        events,
        vec!["counted:2", "matched:Morning", "matched:Evening", "exporting:2"]
    );
}

#[test]
fn export_overwrites_previous_report() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("todays_notes.txt");
    fs::write(&path, "stale report from yesterday\nwith more lines than today\n").unwrap();

    export_notes(&[], &path).unwrap();

    assert_eq!(fs::read_to_string(&path).unwrap(), EMPTY_REPORT);
}

#[test]
fn re_export_is_byte_identical() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("todays_notes.txt");
    let modified_at = today().and_hms_opt(16, 4, 9).unwrap();
    let notes = vec![
        NoteRecord::new("Résumé draft", "<h1>Ünïcödé ✓</h1>", modified_at),
        NoteRecord::new("Same second", "body", modified_at),
    ];

    export_notes(&notes, &path).unwrap();
    let first = fs::read(&path).unwrap();
    export_notes(&notes, &path).unwrap();
    let second = fs::read(&path).unwrap();

    assert_eq!(first, second);
    assert!(String::from_utf8(first).unwrap().contains("Ünïcödé ✓"));
}

#[test]
fn unwritable_target_is_an_export_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing-dir").join("todays_notes.txt");

    let err = export_notes(&[], &path).unwrap_err();

    match err {
        ExportError::Write { path: failed, .. } => assert_eq!(failed, path),
    }
}
