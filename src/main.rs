//! Headtrim CLI
//!
//! Batch-trims a fixed duration from the start of every MP4 file in a folder
//! using FFmpeg stream copy.
//!
//! # Usage
//!
//! ```bash
//! headtrim ./videos --trim-seconds 2
//! headtrim ./videos --recursive --preserve-structure --output ./trimmed
//! headtrim ./videos --overwrite --json
//! ```

use anyhow::{bail, Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;
use tracing::info;
use tracing_subscriber::EnvFilter;

use headtrim::cli::Cli;
use headtrim::engine::{Engine, EngineEvent, JobStatus, RunRequest};
use headtrim::planner::{self, RunSettings};
use headtrim::{discover, toolchain, TrimError};

/// Main entry point for the headtrim CLI application
fn main() -> Result<()> {
    // Logs go to stderr; stdout is reserved for progress (and JSON events).
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    run(cli)
}

/// Wire the pipeline: locate toolchain, discover, plan, then run the engine
/// on a worker thread while this thread renders events.
fn run(cli: Cli) -> Result<()> {
    let bundled_dir = match cli.bin_dir {
        Some(dir) => dir,
        None => default_bundled_dir()?,
    };
    let toolchain = toolchain::locate(&bundled_dir).ok_or(TrimError::ToolchainNotFound)?;

    let settings = RunSettings {
        trim_seconds: cli.trim_seconds,
        overwrite: cli.overwrite,
        recursive: cli.recursive,
        preserve_structure: cli.preserve_structure,
    };

    let files = discover::discover(&cli.source, settings.recursive)?;
    info!("Found {} MP4 file(s)", files.len());

    let output_root = cli
        .output
        .unwrap_or_else(|| cli.source.join("trimmed"));
    let jobs = planner::plan(&files, &cli.source, &output_root, &settings);
    let labels: Vec<String> = jobs.iter().map(|j| j.display_label.clone()).collect();

    let request = RunRequest::new(jobs, settings.trim_seconds, settings.overwrite, toolchain)?;
    let engine = Engine::new(request);

    let (sink, events) = mpsc::channel();
    let worker = thread::spawn(move || engine.run(&sink));

    let mut done = 0usize;
    let mut skipped = 0usize;
    let mut failed = 0usize;
    let mut canceled = 0usize;

    for event in events {
        if cli.json {
            println!("{}", serde_json::to_string(&event)?);
        } else {
            render(&event, &labels);
        }
        if let EngineEvent::Job { status, .. } = &event {
            match status {
                JobStatus::Done => done += 1,
                JobStatus::Skipped => skipped += 1,
                JobStatus::Failed => failed += 1,
                JobStatus::Canceled => canceled += 1,
                JobStatus::Pending | JobStatus::Processing => {}
            }
        }
    }

    if worker.join().is_err() {
        bail!("worker thread panicked");
    }

    if !cli.json {
        println!(
            "Done: {}, Skipped: {}, Failed: {}, Canceled: {}",
            done, skipped, failed, canceled
        );
    }
    if failed > 0 {
        bail!("{} job(s) failed", failed);
    }
    Ok(())
}

/// Render one event in human-readable form
fn render(event: &EngineEvent, labels: &[String]) {
    match event {
        EngineEvent::Job {
            index,
            status,
            message,
        } => {
            let label = labels
                .get(*index)
                .map(String::as_str)
                .unwrap_or("<unknown>");
            if message.is_empty() {
                println!("[{}/{}] {} - {}", index + 1, labels.len(), label, status);
            } else {
                println!(
                    "[{}/{}] {} - {}: {}",
                    index + 1,
                    labels.len(),
                    label,
                    status,
                    message
                );
            }
        }
        EngineEvent::Log { message } => info!("{}", message),
        EngineEvent::Overall { .. } => {}
        EngineEvent::Finished => info!("Processing complete"),
    }
}

/// Default bundled toolchain location: a `bin` directory next to the executable
fn default_bundled_dir() -> Result<PathBuf> {
    let exe = std::env::current_exe().context("could not determine executable path")?;
    Ok(exe
        .parent()
        .map(|dir| dir.join("bin"))
        .unwrap_or_else(|| PathBuf::from("bin")))
}
