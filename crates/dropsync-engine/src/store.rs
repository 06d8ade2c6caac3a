//! In-memory collection store.
//!
//! The store is the single owner of file records, folders, the per-file
//! progress map, and the pending-queue bookkeeping. Every operation takes the
//! write lock exactly once, so each mutation is atomic with respect to
//! readers: no caller ever observes a half-updated record.

use std::collections::HashMap;

use tokio::sync::RwLock;
use uuid::Uuid;

use dropsync_core::models::{FileRecord, FileStatus, Folder};
use dropsync_core::AppError;

struct StoreState {
    files: Vec<FileRecord>,
    folders: Vec<Folder>,
    progress: HashMap<Uuid, f32>,
    pending: Vec<Uuid>,
}

/// Authoritative in-memory collection of files and folders.
pub struct CollectionStore {
    state: RwLock<StoreState>,
    root_id: Uuid,
}

impl CollectionStore {
    /// Create a store seeded with the default folder set: a root folder plus
    /// Documents, Images, and Videos underneath it.
    pub fn new() -> Self {
        let root = Folder::new("My Files", None);
        let root_id = root.id;
        let folders = vec![
            root,
            Folder::new("Documents", Some(root_id)),
            Folder::new("Images", Some(root_id)),
            Folder::new("Videos", Some(root_id)),
        ];

        Self {
            state: RwLock::new(StoreState {
                files: Vec::new(),
                folders,
                progress: HashMap::new(),
                pending: Vec::new(),
            }),
            root_id,
        }
    }

    pub fn root_folder_id(&self) -> Uuid {
        self.root_id
    }

    /// Insert an admitted record. Records carrying validation errors are a
    /// caller bug and are refused; they must never reach the store.
    pub async fn add(&self, record: FileRecord) -> Result<(), AppError> {
        let mut state = self.state.write().await;
        if !record.errors.is_empty() {
            return Err(AppError::InvalidRecord(format!(
                "record {} has validation errors",
                record.name
            )));
        }
        let Some(folder) = state.folders.iter_mut().find(|f| f.id == record.folder_id) else {
            return Err(AppError::FolderNotFound(record.folder_id));
        };
        folder.file_count += 1;
        if record.status == FileStatus::Uploading {
            state.progress.insert(record.id, 0.0);
        }
        state.files.push(record);
        Ok(())
    }

    /// Replace a record's status (and url) wholesale. Terminal states drop
    /// the progress entry; completion is only valid together with a url.
    pub async fn update_status(
        &self,
        id: Uuid,
        status: FileStatus,
        url: Option<String>,
    ) -> Result<FileRecord, AppError> {
        let mut state = self.state.write().await;
        let Some(idx) = state.files.iter().position(|f| f.id == id) else {
            return Err(AppError::FileNotFound(id));
        };

        let mut updated = state.files[idx].clone();
        updated.status = status;
        updated.url = url;
        state.files[idx] = updated.clone();

        if status.is_terminal() {
            state.progress.remove(&id);
        }
        Ok(updated)
    }

    /// Record a progress value for an uploading file. Updates targeting a
    /// removed or non-uploading record are silently inert.
    pub async fn set_progress(&self, id: Uuid, percent: f32) {
        let mut state = self.state.write().await;
        let uploading = state
            .files
            .iter()
            .any(|f| f.id == id && f.status == FileStatus::Uploading);
        if uploading {
            state.progress.insert(id, percent.clamp(0.0, 100.0));
        }
    }

    pub async fn progress(&self, id: Uuid) -> Option<f32> {
        self.state.read().await.progress.get(&id).copied()
    }

    /// Remove a record along with its progress entry and any pending-queue
    /// slot, returning the removed record.
    pub async fn remove(&self, id: Uuid) -> Result<FileRecord, AppError> {
        let mut state = self.state.write().await;
        let Some(idx) = state.files.iter().position(|f| f.id == id) else {
            return Err(AppError::FileNotFound(id));
        };
        let record = state.files.remove(idx);
        state.progress.remove(&id);
        state.pending.retain(|p| *p != id);
        if let Some(folder) = state.folders.iter_mut().find(|f| f.id == record.folder_id) {
            folder.file_count -= 1;
        }
        Ok(record)
    }

    /// Drop all files, progress entries, and pending-queue state in one
    /// atomic step. Folders survive with their counts reset.
    pub async fn clear(&self) {
        let mut state = self.state.write().await;
        state.files.clear();
        state.progress.clear();
        state.pending.clear();
        for folder in &mut state.folders {
            folder.file_count = 0;
        }
    }

    /// Move a record to another folder, keeping both folder counts cached.
    pub async fn move_file(&self, id: Uuid, folder_id: Uuid) -> Result<(), AppError> {
        let mut state = self.state.write().await;
        if !state.folders.iter().any(|f| f.id == folder_id) {
            return Err(AppError::FolderNotFound(folder_id));
        }
        let Some(idx) = state.files.iter().position(|f| f.id == id) else {
            return Err(AppError::FileNotFound(id));
        };

        let mut updated = state.files[idx].clone();
        let previous = updated.folder_id;
        if previous == folder_id {
            return Ok(());
        }
        updated.folder_id = folder_id;
        state.files[idx] = updated;

        if let Some(folder) = state.folders.iter_mut().find(|f| f.id == previous) {
            folder.file_count -= 1;
        }
        if let Some(folder) = state.folders.iter_mut().find(|f| f.id == folder_id) {
            folder.file_count += 1;
        }
        Ok(())
    }

    pub async fn get(&self, id: Uuid) -> Option<FileRecord> {
        self.state
            .read()
            .await
            .files
            .iter()
            .find(|f| f.id == id)
            .cloned()
    }

    /// All records in a folder, in insertion order.
    pub async fn list_by_folder(&self, folder_id: Uuid) -> Vec<FileRecord> {
        self.state
            .read()
            .await
            .files
            .iter()
            .filter(|f| f.folder_id == folder_id)
            .cloned()
            .collect()
    }

    /// Snapshot of every record, in insertion order.
    pub async fn files(&self) -> Vec<FileRecord> {
        self.state.read().await.files.clone()
    }

    pub async fn folders(&self) -> Vec<Folder> {
        self.state.read().await.folders.clone()
    }

    pub async fn folder(&self, id: Uuid) -> Option<Folder> {
        self.state
            .read()
            .await
            .folders
            .iter()
            .find(|f| f.id == id)
            .cloned()
    }

    pub async fn folder_by_name(&self, name: &str) -> Option<Folder> {
        self.state
            .read()
            .await
            .folders
            .iter()
            .find(|f| f.name == name)
            .cloned()
    }

    /// Total byte size of every stored record.
    pub async fn total_bytes(&self) -> u64 {
        self.state.read().await.files.iter().map(|f| f.size).sum()
    }

    pub async fn folder_total_bytes(&self, folder_id: Uuid) -> u64 {
        self.state
            .read()
            .await
            .files
            .iter()
            .filter(|f| f.folder_id == folder_id)
            .map(|f| f.size)
            .sum()
    }

    pub async fn enqueue(&self, ids: &[Uuid]) {
        self.state.write().await.pending.extend_from_slice(ids);
    }

    pub async fn clear_pending(&self, ids: &[Uuid]) {
        self.state
            .write()
            .await
            .pending
            .retain(|p| !ids.contains(p));
    }

    pub async fn pending(&self) -> Vec<Uuid> {
        self.state.read().await.pending.clone()
    }

    pub async fn len(&self) -> usize {
        self.state.read().await.files.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.state.read().await.files.is_empty()
    }
}

impl Default for CollectionStore {
    fn default() -> Self {
        Self::new()
    }
}
