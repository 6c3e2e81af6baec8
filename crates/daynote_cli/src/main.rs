//! `daynote` command entry point.
//!
//! # Responsibility
//! - Parse flags, start logging, and run one export against Notes.app.
//! - Print human progress on stdout; diagnostics go to stderr via logging.
//!
//! # Invariants
//! - "today" is read from the local clock exactly once per run.
//! - Only a failed report write (or invalid setup) exits non-zero.

mod args;

use args::Args;
use chrono::Local;
use clap::Parser;
use daynote_core::{init_logging, run_export, ExportOutcome, ProgressEvent};
use log::info;
use std::process::ExitCode;

fn main() -> ExitCode {
    let args = Args::parse();

    let log_dir = match args.resolved_log_dir() {
        Ok(log_dir) => log_dir,
        Err(err) => {
            eprintln!("daynote: cannot resolve log directory: {err}");
            return ExitCode::FAILURE;
        }
    };
    if let Err(err) = init_logging(&args.effective_log_level(), log_dir.as_deref()) {
        eprintln!("daynote: {err}");
        return ExitCode::FAILURE;
    }

    let config = args.export_config();
    if let Err(err) = config.validate() {
        eprintln!("daynote: {err}");
        return ExitCode::FAILURE;
    }

    let today = Local::now().date_naive();
    info!(
        "event=run_start module=cli status=ok today={} output={} body_format={} timeout_secs={}",
        today,
        config.output_path.display(),
        config.body_format.as_str(),
        config.timeout.as_secs()
    );

    println!("Fetching notes from Apple Notes...");
    let reader = config.notes_reader();
    match run_export(&config, &reader, today, print_progress) {
        Ok(outcome) => {
            print_outcome(&outcome);
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("daynote: {err}");
            ExitCode::FAILURE
        }
    }
}

fn print_progress(event: ProgressEvent<'_>) {
    match event {
        ProgressEvent::Counted { total: 0 } => println!("No notes found in Apple Notes"),
        ProgressEvent::Counted { total } => {
            println!("Found {total} total notes. Checking for today's notes...")
        }
        ProgressEvent::Matched { note } => println!("  Found note from today: {}", note.title),
        ProgressEvent::Exporting { notes: 0, .. } => {}
        ProgressEvent::Exporting { notes, .. } => {
            println!("\nExporting {notes} note(s) from today...")
        }
    }
}

fn print_outcome(outcome: &ExportOutcome) {
    if outcome.exported() == 0 {
        println!("No notes found from today");
        return;
    }
    println!(
        "Successfully exported {} note(s) to {}",
        outcome.exported(),
        outcome.report_path.display()
    );
    let skipped = outcome.summary.unreadable + outcome.summary.unparseable;
    if skipped > 0 {
        println!("Skipped {skipped} note(s) that could not be read");
    }
}
