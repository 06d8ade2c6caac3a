use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use super::category::MediaCategory;
use super::file::FileRecord;

const MIB: u64 = 1024 * 1024;

/// Guard against oversized search input reaching the per-render filter pass.
const MAX_SEARCH_TERM_LEN: usize = 1024;

/// Size bucket filter over file byte sizes.
///
/// Buckets are half-open: small `< 1 MiB`, medium `1..10 MiB`, large `>= 10 MiB`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SizeBucket {
    #[default]
    All,
    Small,
    Medium,
    Large,
}

impl SizeBucket {
    pub fn contains(&self, size: u64) -> bool {
        match self {
            SizeBucket::All => true,
            SizeBucket::Small => size < MIB,
            SizeBucket::Medium => (MIB..10 * MIB).contains(&size),
            SizeBucket::Large => size >= 10 * MIB,
        }
    }

    /// Human-readable label for filter controls.
    pub fn label(&self) -> &'static str {
        match self {
            SizeBucket::All => "All Sizes",
            SizeBucket::Small => "Small (< 1MB)",
            SizeBucket::Medium => "Medium (1-10MB)",
            SizeBucket::Large => "Large (> 10MB)",
        }
    }
}

impl Display for SizeBucket {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            SizeBucket::All => write!(f, "all"),
            SizeBucket::Small => write!(f, "small"),
            SizeBucket::Medium => write!(f, "medium"),
            SizeBucket::Large => write!(f, "large"),
        }
    }
}

impl FromStr for SizeBucket {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "all" => Ok(SizeBucket::All),
            "small" => Ok(SizeBucket::Small),
            "medium" => Ok(SizeBucket::Medium),
            "large" => Ok(SizeBucket::Large),
            _ => Err(anyhow::anyhow!("Invalid size bucket: {}", s)),
        }
    }
}

/// Sort key for the derived file view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    /// Upload date, most recent first.
    #[default]
    Date,
    /// Name, ascending.
    Name,
    /// Byte size, largest first.
    Size,
}

impl Display for SortKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            SortKey::Date => write!(f, "date"),
            SortKey::Name => write!(f, "name"),
            SortKey::Size => write!(f, "size"),
        }
    }
}

impl FromStr for SortKey {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "date" => Ok(SortKey::Date),
            "name" => Ok(SortKey::Name),
            "size" => Ok(SortKey::Size),
            _ => Err(anyhow::anyhow!("Invalid sort key: {}", s)),
        }
    }
}

/// Ephemeral query state driving the derived file view. Not persisted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileQuery {
    /// Case-insensitive substring match on the file name; empty matches all.
    pub search: String,
    /// Selected category filters; empty means no category filtering.
    pub categories: Vec<MediaCategory>,
    pub size_bucket: SizeBucket,
    pub sort: SortKey,
}

impl FileQuery {
    /// The filter predicate: a record passes iff every active filter holds.
    pub fn matches(&self, record: &FileRecord) -> bool {
        let matches_search = self.search.is_empty()
            || record
                .name
                .to_lowercase()
                .contains(&self.search.to_lowercase());

        let matches_category = self.categories.is_empty()
            || record
                .category()
                .is_some_and(|c| self.categories.contains(&c));

        matches_search && matches_category && self.size_bucket.contains(record.size)
    }

    /// Add the category to the filter set, or remove it if already selected.
    pub fn toggle_category(&mut self, category: MediaCategory) {
        if let Some(pos) = self.categories.iter().position(|c| *c == category) {
            self.categories.remove(pos);
        } else {
            self.categories.push(category);
        }
    }

    /// Number of active filters (search, categories, size bucket).
    pub fn active_filter_count(&self) -> usize {
        let mut count = 0;
        if !self.search.is_empty() {
            count += 1;
        }
        if !self.categories.is_empty() {
            count += 1;
        }
        if self.size_bucket != SizeBucket::All {
            count += 1;
        }
        count
    }

    /// Reset every filter and the sort key to their defaults.
    pub fn clear(&mut self) {
        *self = FileQuery::default();
    }

    /// Validate query parameters
    pub fn validate(&self) -> Result<(), String> {
        if self.search.len() > MAX_SEARCH_TERM_LEN {
            return Err(format!(
                "Search term must not exceed {} characters",
                MAX_SEARCH_TERM_LEN
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::file::IncomingFile;
    use uuid::Uuid;

    fn record(name: &str, size: u64, content_type: &str) -> FileRecord {
        FileRecord::admitted(&IncomingFile::new(name, size, content_type), Uuid::new_v4())
    }

    #[test]
    fn test_size_bucket_ranges_are_half_open() {
        assert!(SizeBucket::Small.contains(MIB - 1));
        assert!(!SizeBucket::Small.contains(MIB));
        assert!(SizeBucket::Medium.contains(MIB));
        assert!(SizeBucket::Medium.contains(10 * MIB - 1));
        assert!(!SizeBucket::Medium.contains(10 * MIB));
        assert!(SizeBucket::Large.contains(10 * MIB));
        assert!(SizeBucket::All.contains(0));
        assert!(SizeBucket::All.contains(u64::MAX));
    }

    #[test]
    fn test_size_bucket_labels() {
        assert_eq!(SizeBucket::All.label(), "All Sizes");
        assert_eq!(SizeBucket::Small.label(), "Small (< 1MB)");
        assert_eq!(SizeBucket::Medium.label(), "Medium (1-10MB)");
        assert_eq!(SizeBucket::Large.label(), "Large (> 10MB)");
    }

    #[test]
    fn test_size_bucket_round_trip() {
        for bucket in [
            SizeBucket::All,
            SizeBucket::Small,
            SizeBucket::Medium,
            SizeBucket::Large,
        ] {
            assert_eq!(bucket.to_string().parse::<SizeBucket>().unwrap(), bucket);
        }
    }

    #[test]
    fn test_sort_key_round_trip() {
        for key in [SortKey::Date, SortKey::Name, SortKey::Size] {
            assert_eq!(key.to_string().parse::<SortKey>().unwrap(), key);
        }
        assert!("owner".parse::<SortKey>().is_err());
    }

    #[test]
    fn test_empty_query_matches_everything() {
        let query = FileQuery::default();
        assert!(query.matches(&record("a.jpg", 10, "image/jpeg")));
        assert!(query.matches(&record("data.bin", 10, "application/octet-stream")));
    }

    #[test]
    fn test_search_is_case_insensitive_substring() {
        let query = FileQuery {
            search: "IMG".to_string(),
            ..Default::default()
        };
        assert!(query.matches(&record("img_001.png", 10, "image/png")));
        assert!(query.matches(&record("holiday-IMG.png", 10, "image/png")));
        assert!(!query.matches(&record("photo.png", 10, "image/png")));
    }

    #[test]
    fn test_category_filter_requires_membership() {
        let query = FileQuery {
            categories: vec![MediaCategory::Image, MediaCategory::Audio],
            ..Default::default()
        };
        assert!(query.matches(&record("a.png", 10, "image/png")));
        assert!(query.matches(&record("a.mp3", 10, "audio/mpeg")));
        assert!(!query.matches(&record("a.mp4", 10, "video/mp4")));
        // Files with no derivable category never pass a non-empty filter set
        assert!(!query.matches(&record("a.bin", 10, "application/octet-stream")));
    }

    #[test]
    fn test_toggle_category() {
        let mut query = FileQuery::default();
        query.toggle_category(MediaCategory::Image);
        assert_eq!(query.categories, vec![MediaCategory::Image]);
        query.toggle_category(MediaCategory::Video);
        assert_eq!(
            query.categories,
            vec![MediaCategory::Image, MediaCategory::Video]
        );
        query.toggle_category(MediaCategory::Image);
        assert_eq!(query.categories, vec![MediaCategory::Video]);
    }

    #[test]
    fn test_active_filter_count_and_clear() {
        let mut query = FileQuery {
            search: "img".to_string(),
            categories: vec![MediaCategory::Image],
            size_bucket: SizeBucket::Small,
            sort: SortKey::Name,
        };
        assert_eq!(query.active_filter_count(), 3);

        query.clear();
        assert_eq!(query.active_filter_count(), 0);
        assert_eq!(query.sort, SortKey::Date);
        assert_eq!(query.size_bucket, SizeBucket::All);
    }

    #[test]
    fn test_validate_rejects_oversized_search() {
        let query = FileQuery {
            search: "x".repeat(MAX_SEARCH_TERM_LEN + 1),
            ..Default::default()
        };
        assert!(query.validate().is_err());
        assert!(FileQuery::default().validate().is_ok());
    }
}
