//! Batch intake orchestration.
//!
//! `admit` runs the full pipeline for one batch: aggregate quota gate, then
//! per-file validation, then the sequential upload loop. Admitted files are
//! processed strictly one at a time in batch order; upload N+1 does not start
//! until upload N reached a terminal status.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use uuid::Uuid;

use dropsync_core::models::{FileRecord, FileStatus, IncomingFile};
use dropsync_core::{AppError, IntakeConfig, StorageQuota, UploadPolicy};

use crate::events::IntakeObserver;
use crate::simulator::{ProgressSink, TransferSimulator};
use crate::store::CollectionStore;

/// A candidate that failed validation, with every violated rule rendered.
#[derive(Debug, Clone, Serialize)]
pub struct RejectedFile {
    pub name: String,
    pub errors: Vec<String>,
}

/// Terminal outcome of one admitted file.
#[derive(Debug, Clone, Serialize)]
pub struct UploadOutcome {
    pub file_id: Uuid,
    pub name: String,
    pub status: FileStatus,
}

/// Result of one admission batch.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AdmissionReport {
    /// Number of files that passed validation and were queued.
    pub queued: usize,
    pub rejected: Vec<RejectedFile>,
    pub outcomes: Vec<UploadOutcome>,
}

/// Sequences admitted files through the transfer simulator and keeps the
/// store and observers in sync. The only writer of status and progress
/// during the uploading phase.
pub struct IntakeService {
    store: Arc<CollectionStore>,
    simulator: Arc<dyn TransferSimulator>,
    observer: Arc<dyn IntakeObserver>,
    policy: UploadPolicy,
    quota: StorageQuota,
}

impl IntakeService {
    pub fn new(
        store: Arc<CollectionStore>,
        config: &IntakeConfig,
        simulator: Arc<dyn TransferSimulator>,
        observer: Arc<dyn IntakeObserver>,
    ) -> Self {
        Self {
            store,
            simulator,
            observer,
            policy: UploadPolicy::new(config.max_file_size_bytes, config.allowed_types.clone()),
            quota: StorageQuota::new(config.max_total_size_bytes),
        }
    }

    pub fn quota(&self) -> StorageQuota {
        self.quota
    }

    /// Admit a batch of candidates into the target folder and drive every
    /// admitted file to a terminal status.
    ///
    /// Quota rejection aborts the whole batch before any admission; per-file
    /// validation and upload failures are isolated to the file.
    #[tracing::instrument(skip(self, batch), fields(batch_len = batch.len(), folder_id = %target_folder))]
    pub async fn admit(
        &self,
        batch: Vec<IncomingFile>,
        target_folder: Uuid,
    ) -> Result<AdmissionReport, AppError> {
        if self.store.folder(target_folder).await.is_none() {
            return Err(AppError::FolderNotFound(target_folder));
        }

        let existing_total = self.store.total_bytes().await;
        let incoming_total: u64 = batch.iter().map(|f| f.size).sum();
        if !self.quota.admits(existing_total, incoming_total) {
            let err = AppError::QuotaExceeded {
                used: existing_total,
                incoming: incoming_total,
                limit: self.quota.limit_bytes(),
            };
            tracing::warn!(
                used = existing_total,
                incoming = incoming_total,
                limit = self.quota.limit_bytes(),
                "Batch rejected by quota gate"
            );
            self.observer.quota_exceeded(&err).await;
            return Err(err);
        }

        let mut report = AdmissionReport::default();
        let mut admitted = Vec::new();
        for file in &batch {
            let issues = self.policy.check(file);
            if issues.is_empty() {
                admitted.push(FileRecord::admitted(file, target_folder));
            } else {
                let errors: Vec<String> = issues.iter().map(|i| i.to_string()).collect();
                tracing::debug!(
                    file_name = %file.name,
                    file_size = file.size,
                    content_type = %file.content_type,
                    errors = ?errors,
                    "Candidate rejected by validation"
                );
                self.observer.file_rejected(&file.name, &errors).await;
                report.rejected.push(RejectedFile {
                    name: file.name.clone(),
                    errors,
                });
            }
        }

        if admitted.is_empty() {
            return Ok(report);
        }

        report.queued = admitted.len();
        let ids: Vec<Uuid> = admitted.iter().map(|r| r.id).collect();
        self.store.enqueue(&ids).await;
        self.observer.batch_queued(admitted.len()).await;
        tracing::info!(queued = admitted.len(), "Batch admitted to upload queue");

        for record in admitted {
            if let Some(outcome) = self.process_one(record).await {
                report.outcomes.push(outcome);
            }
        }

        self.store.clear_pending(&ids).await;
        Ok(report)
    }

    /// Drive one admitted record to a terminal status. Returns None when the
    /// record was removed by the user while its upload was in flight.
    async fn process_one(&self, mut record: FileRecord) -> Option<UploadOutcome> {
        let id = record.id;
        let name = record.name.clone();

        record.status = FileStatus::Uploading;
        if let Err(e) = self.store.add(record).await {
            tracing::error!(error = %e, file_id = %id, "Failed to insert admitted record");
            return None;
        }
        self.observer.progress_updated(id, 0.0).await;
        if let Some(stored) = self.store.get(id).await {
            self.observer.status_changed(&stored).await;
        }

        let result = self.simulator.run(id, self).await;

        let status = match result {
            Ok(()) => {
                self.observer.progress_updated(id, 100.0).await;
                FileStatus::Completed
            }
            Err(ref e) => {
                tracing::error!(error = %e, file_id = %id, file_name = %name, "Upload failed");
                FileStatus::Failed
            }
        };
        let url = match status {
            FileStatus::Completed => Some(format!("blob:{}", id)),
            _ => None,
        };

        match self.store.update_status(id, status, url).await {
            Ok(updated) => {
                if status == FileStatus::Completed {
                    tracing::info!(file_id = %id, file_name = %name, "Upload completed");
                }
                self.observer.status_changed(&updated).await;
                Some(UploadOutcome {
                    file_id: id,
                    name,
                    status,
                })
            }
            Err(AppError::FileNotFound(_)) => {
                // The user removed the record mid-upload; the simulator ran
                // on as an orphan and its result has nowhere to land.
                tracing::debug!(file_id = %id, "Record removed mid-upload, dropping outcome");
                None
            }
            Err(e) => {
                tracing::error!(error = %e, file_id = %id, "Failed to update record status");
                None
            }
        }
    }
}

#[async_trait]
impl ProgressSink for IntakeService {
    async fn update(&self, file_id: Uuid, percent: f32) {
        self.store.set_progress(file_id, percent).await;
        self.observer.progress_updated(file_id, percent).await;
    }
}
