//! Intake notification surface.
//!
//! The engine reports admission and upload outcomes through the
//! [`IntakeObserver`] trait so presentation layers (toasts, progress bars,
//! status badges) can react without the engine depending on them. All
//! methods default to no-ops; implementers override what they consume.

use async_trait::async_trait;
use serde::Serialize;
use tokio::sync::mpsc;
use uuid::Uuid;

use dropsync_core::models::FileRecord;
use dropsync_core::{AppError, ErrorMetadata};

/// Observer for intake lifecycle notifications.
#[async_trait]
pub trait IntakeObserver: Send + Sync {
    /// A batch passed admission; `count` files were queued for upload.
    async fn batch_queued(&self, count: usize) {
        let _ = count;
    }

    /// A candidate failed validation and was discarded.
    async fn file_rejected(&self, name: &str, errors: &[String]) {
        let _ = (name, errors);
    }

    /// The whole batch was rejected by the aggregate quota gate.
    async fn quota_exceeded(&self, error: &AppError) {
        let _ = error;
    }

    /// A stored record changed status (uploading, completed, failed).
    async fn status_changed(&self, record: &FileRecord) {
        let _ = record;
    }

    /// Progress for an uploading record, in [0,100].
    async fn progress_updated(&self, file_id: Uuid, percent: f32) {
        let _ = (file_id, percent);
    }
}

/// No-op implementation for embedders that poll the store instead.
pub struct NoOpObserver;

#[async_trait]
impl IntakeObserver for NoOpObserver {}

/// Intake notification as a value, for channel-based consumers.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum IntakeEvent {
    BatchQueued { count: usize },
    FileRejected { name: String, errors: Vec<String> },
    QuotaExceeded { message: String },
    StatusChanged { record: FileRecord },
    ProgressUpdated { file_id: Uuid, percent: f32 },
}

/// Observer that forwards every notification into an unbounded channel.
///
/// Dropped receivers make sends fail silently; a presentation layer that went
/// away must not stall the intake loop.
pub struct ChannelObserver {
    tx: mpsc::UnboundedSender<IntakeEvent>,
}

impl ChannelObserver {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<IntakeEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

#[async_trait]
impl IntakeObserver for ChannelObserver {
    async fn batch_queued(&self, count: usize) {
        let _ = self.tx.send(IntakeEvent::BatchQueued { count });
    }

    async fn file_rejected(&self, name: &str, errors: &[String]) {
        let _ = self.tx.send(IntakeEvent::FileRejected {
            name: name.to_string(),
            errors: errors.to_vec(),
        });
    }

    async fn quota_exceeded(&self, error: &AppError) {
        let _ = self.tx.send(IntakeEvent::QuotaExceeded {
            message: error.user_message(),
        });
    }

    async fn status_changed(&self, record: &FileRecord) {
        let _ = self.tx.send(IntakeEvent::StatusChanged {
            record: record.clone(),
        });
    }

    async fn progress_updated(&self, file_id: Uuid, percent: f32) {
        let _ = self.tx.send(IntakeEvent::ProgressUpdated { file_id, percent });
    }
}
