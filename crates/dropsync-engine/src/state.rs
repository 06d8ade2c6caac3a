//! Application state facade.
//!
//! `AppState` is the single controller owning the collection store, the
//! intake service, the current folder, and the live query. Every mutation
//! goes through a method here, never through direct field writes, so the
//! store's invariants stay centrally enforced.

use std::sync::Arc;

use tokio::sync::RwLock;
use uuid::Uuid;

use dropsync_core::models::{
    FileQuery, FileRecord, Folder, IncomingFile, MediaCategory, SizeBucket, SortKey,
};
use dropsync_core::{AppError, IntakeConfig, StorageUsage};

use crate::events::IntakeObserver;
use crate::intake::{AdmissionReport, IntakeService};
use crate::query;
use crate::query::FolderView;
use crate::simulator::TransferSimulator;
use crate::store::CollectionStore;

pub struct AppState {
    store: Arc<CollectionStore>,
    intake: IntakeService,
    current_folder: RwLock<Uuid>,
    query: RwLock<FileQuery>,
}

impl AppState {
    pub fn new(
        config: IntakeConfig,
        simulator: Arc<dyn TransferSimulator>,
        observer: Arc<dyn IntakeObserver>,
    ) -> Self {
        let store = Arc::new(CollectionStore::new());
        let intake = IntakeService::new(store.clone(), &config, simulator, observer);
        let root = store.root_folder_id();

        Self {
            store,
            intake,
            current_folder: RwLock::new(root),
            query: RwLock::new(FileQuery::default()),
        }
    }

    /// Like [`AppState::new`], with configuration loaded from the environment.
    pub fn from_env(
        simulator: Arc<dyn TransferSimulator>,
        observer: Arc<dyn IntakeObserver>,
    ) -> Self {
        Self::new(IntakeConfig::from_env(), simulator, observer)
    }

    pub fn store(&self) -> &Arc<CollectionStore> {
        &self.store
    }

    /// Upload a batch into the current folder.
    pub async fn upload(&self, batch: Vec<IncomingFile>) -> Result<AdmissionReport, AppError> {
        let target = *self.current_folder.read().await;
        self.intake.admit(batch, target).await
    }

    pub async fn current_folder(&self) -> Uuid {
        *self.current_folder.read().await
    }

    pub async fn set_current_folder(&self, folder_id: Uuid) -> Result<(), AppError> {
        if self.store.folder(folder_id).await.is_none() {
            return Err(AppError::FolderNotFound(folder_id));
        }
        *self.current_folder.write().await = folder_id;
        Ok(())
    }

    pub async fn folders(&self) -> Vec<Folder> {
        self.store.folders().await
    }

    pub async fn remove_file(&self, id: Uuid) -> Result<FileRecord, AppError> {
        self.store.remove(id).await
    }

    pub async fn clear_all(&self) {
        self.store.clear().await;
    }

    // ----- Query state -----

    pub async fn query(&self) -> FileQuery {
        self.query.read().await.clone()
    }

    pub async fn set_search(&self, term: impl Into<String>) {
        self.query.write().await.search = term.into();
    }

    pub async fn toggle_category(&self, category: MediaCategory) {
        self.query.write().await.toggle_category(category);
    }

    pub async fn set_size_bucket(&self, bucket: SizeBucket) {
        self.query.write().await.size_bucket = bucket;
    }

    pub async fn set_sort(&self, sort: SortKey) {
        self.query.write().await.sort = sort;
    }

    pub async fn clear_filters(&self) {
        self.query.write().await.clear();
    }

    pub async fn active_filter_count(&self) -> usize {
        self.query.read().await.active_filter_count()
    }

    // ----- Derived views -----

    /// The current folder's records filtered and sorted by the live query.
    pub async fn current_view(&self) -> FolderView {
        let folder = *self.current_folder.read().await;
        let files = self.store.list_by_folder(folder).await;
        let query = self.query.read().await.clone();
        query::folder_view(&files, &query)
    }

    /// Categories present in the current folder, for filter controls.
    pub async fn available_categories(&self) -> Vec<MediaCategory> {
        let folder = *self.current_folder.read().await;
        let files = self.store.list_by_folder(folder).await;
        query::available_categories(&files)
    }

    /// Aggregate storage usage against the quota cap.
    pub async fn usage(&self) -> StorageUsage {
        self.intake.quota().usage(self.store.total_bytes().await)
    }
}
