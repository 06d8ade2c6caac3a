use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::path::Path;
use std::str::FromStr;
use uuid::Uuid;

use super::category::MediaCategory;

/// Lifecycle status of a file record.
///
/// Created as `Pending` at admission, moved to `Uploading` when the intake
/// loop begins processing the record, and finishes in one of the two terminal
/// states. No other transitions exist.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum FileStatus {
    Pending,
    Uploading,
    Completed,
    Failed,
}

impl FileStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, FileStatus::Completed | FileStatus::Failed)
    }
}

impl Display for FileStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            FileStatus::Pending => write!(f, "pending"),
            FileStatus::Uploading => write!(f, "uploading"),
            FileStatus::Completed => write!(f, "completed"),
            FileStatus::Failed => write!(f, "failed"),
        }
    }
}

impl FromStr for FileStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(FileStatus::Pending),
            "uploading" => Ok(FileStatus::Uploading),
            "completed" => Ok(FileStatus::Completed),
            "failed" => Ok(FileStatus::Failed),
            _ => Err(anyhow::anyhow!("Invalid file status: {}", s)),
        }
    }
}

/// Raw candidate file as handed over by drag-and-drop or a file picker.
///
/// Only the declared metadata crosses the boundary; file bytes never enter
/// the system.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncomingFile {
    pub name: String,
    pub size: u64,
    pub content_type: String,
}

impl IncomingFile {
    pub fn new(name: impl Into<String>, size: u64, content_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            size,
            content_type: content_type.into(),
        }
    }

    /// Lowercased filename extension, if any.
    pub fn extension(&self) -> Option<String> {
        extension_of(&self.name)
    }
}

/// One user file in the collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileRecord {
    pub id: Uuid,
    pub name: String,
    pub size: u64,
    pub content_type: String,
    pub uploaded_at: DateTime<Utc>,
    pub folder_id: Uuid,
    pub status: FileStatus,
    /// Validation messages; non-empty records are reported and discarded,
    /// never stored.
    pub errors: Vec<String>,
    /// Object-reference URL, present only once the upload completed.
    pub url: Option<String>,
}

impl FileRecord {
    /// Build the record for an admitted candidate: fresh id, pending status,
    /// admission timestamp.
    pub fn admitted(file: &IncomingFile, folder_id: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: file.name.clone(),
            size: file.size,
            content_type: file.content_type.clone(),
            uploaded_at: Utc::now(),
            folder_id,
            status: FileStatus::Pending,
            errors: Vec::new(),
            url: None,
        }
    }

    /// Derived media category, if the file's type or extension is recognized.
    pub fn category(&self) -> Option<MediaCategory> {
        MediaCategory::derive(&self.name, &self.content_type)
    }

    /// Lowercased filename extension, if any.
    pub fn extension(&self) -> Option<String> {
        extension_of(&self.name)
    }
}

fn extension_of(name: &str) -> Option<String> {
    Path::new(name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
}
