//! Domain models

pub mod category;
pub mod file;
pub mod folder;
pub mod query;

pub use category::MediaCategory;
pub use file::{FileRecord, FileStatus, IncomingFile};
pub use folder::Folder;
pub use query::{FileQuery, SizeBucket, SortKey};
