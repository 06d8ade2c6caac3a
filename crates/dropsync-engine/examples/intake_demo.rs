//! Drives a small intake session end to end: admits a mixed batch, streams
//! the intake events, then prints the derived view and storage usage.
//!
//! Run with `cargo run --example intake_demo`.

use std::sync::Arc;

use dropsync_core::models::{IncomingFile, MediaCategory, SortKey};
use dropsync_core::human_size;
use dropsync_engine::{init_telemetry, AppState, ChannelObserver, IntakeEvent, SimulatedTransfer};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_telemetry()?;

    let (observer, mut events) = ChannelObserver::new();
    let state = AppState::from_env(
        Arc::new(SimulatedTransfer::default()),
        Arc::new(observer),
    );

    let printer = tokio::spawn(async move {
        while let Some(event) = events.recv().await {
            match event {
                IntakeEvent::BatchQueued { count } => {
                    println!("{} file(s) added to upload queue", count)
                }
                IntakeEvent::FileRejected { name, errors } => {
                    println!("{}: {}", name, errors.join(", "))
                }
                IntakeEvent::QuotaExceeded { message } => println!("{}", message),
                IntakeEvent::StatusChanged { record } => {
                    println!("{} -> {}", record.name, record.status)
                }
                IntakeEvent::ProgressUpdated { file_id, percent } => {
                    println!("  {} {:>5.1}%", file_id, percent)
                }
            }
        }
    });

    let batch = vec![
        IncomingFile::new("report.pdf", 2 * 1024 * 1024, "application/pdf"),
        IncomingFile::new("holiday.png", 512 * 1024, "image/png"),
        IncomingFile::new("backup.tar", 3 * 1024 * 1024, "application/x-tar"),
    ];
    let report = state.upload(batch).await?;
    println!(
        "queued={} rejected={} completed={}",
        report.queued,
        report.rejected.len(),
        report.outcomes.len()
    );

    state.toggle_category(MediaCategory::Document).await;
    state.set_sort(SortKey::Name).await;
    let view = state.current_view().await;
    println!("view: {} of {} file(s)", view.matched, view.total);
    for file in &view.files {
        println!("  {} ({})", file.name, human_size(file.size));
    }

    let usage = state.usage().await;
    println!("storage: {}", usage.label());

    drop(state);
    printer.abort();
    Ok(())
}
