//! Derived views over the file collection.
//!
//! Pure functions: they take a snapshot of records and a query, and never
//! touch the store. Filtering is applied before sorting; the sort is stable,
//! so filtering never reorders and sorting never changes membership.

use serde::Serialize;

use dropsync_core::models::{FileQuery, FileRecord, MediaCategory, SortKey};

/// Filter then stable-sort a folder's records according to the query.
pub fn view(files: &[FileRecord], query: &FileQuery) -> Vec<FileRecord> {
    let mut filtered: Vec<FileRecord> = files
        .iter()
        .filter(|f| query.matches(f))
        .cloned()
        .collect();

    match query.sort {
        SortKey::Name => {
            filtered.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
        }
        SortKey::Size => filtered.sort_by(|a, b| b.size.cmp(&a.size)),
        SortKey::Date => filtered.sort_by(|a, b| b.uploaded_at.cmp(&a.uploaded_at)),
    }

    filtered
}

/// Distinct categories present among the records, in first-appearance order.
/// Drives which category-filter options are offered.
pub fn available_categories(files: &[FileRecord]) -> Vec<MediaCategory> {
    let mut categories = Vec::new();
    for file in files {
        if let Some(category) = file.category() {
            if !categories.contains(&category) {
                categories.push(category);
            }
        }
    }
    categories
}

/// Per-folder readout: the derived view plus the folder-level aggregates the
/// presentation layer renders next to it.
#[derive(Debug, Clone, Serialize)]
pub struct FolderView {
    pub files: Vec<FileRecord>,
    /// Number of records that passed the filters (`files.len()`).
    pub matched: usize,
    /// Number of records in the folder before filtering.
    pub total: usize,
    /// Byte total of the folder before filtering.
    pub total_bytes: u64,
    pub available_categories: Vec<MediaCategory>,
}

/// Build the folder readout from an unfiltered folder snapshot.
pub fn folder_view(files: &[FileRecord], query: &FileQuery) -> FolderView {
    let filtered = view(files, query);
    FolderView {
        matched: filtered.len(),
        total: files.len(),
        total_bytes: files.iter().map(|f| f.size).sum(),
        available_categories: available_categories(files),
        files: filtered,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use dropsync_core::models::{IncomingFile, SizeBucket};
    use uuid::Uuid;

    const MIB: u64 = 1024 * 1024;

    fn record(name: &str, size: u64, content_type: &str, age_minutes: i64) -> FileRecord {
        let mut record = FileRecord::admitted(
            &IncomingFile::new(name, size, content_type),
            Uuid::new_v4(),
        );
        record.uploaded_at = Utc::now() - Duration::minutes(age_minutes);
        record
    }

    fn sample_folder() -> Vec<FileRecord> {
        vec![
            record("img_beach.png", 512 * 1024, "image/png", 50),
            record("img_aurora.jpg", 256 * 1024, "image/jpeg", 40),
            record("img_large.png", 5 * MIB, "image/png", 30),
            record("holiday.mp4", 8 * MIB, "video/mp4", 20),
            record("notes_img.txt", 1024, "text/plain", 10),
        ]
    }

    #[test]
    fn test_default_query_sorts_by_date_descending() {
        let files = sample_folder();
        let result = view(&files, &FileQuery::default());
        assert_eq!(result.len(), files.len());
        assert!(result
            .windows(2)
            .all(|w| w[0].uploaded_at >= w[1].uploaded_at));
        assert_eq!(result[0].name, "notes_img.txt");
    }

    #[test]
    fn test_sort_by_name_ascending_case_folded() {
        let files = vec![
            record("Zebra.png", 1, "image/png", 0),
            record("apple.png", 1, "image/png", 0),
            record("Mango.png", 1, "image/png", 0),
        ];
        let query = FileQuery {
            sort: SortKey::Name,
            ..Default::default()
        };
        let view = view(&files, &query);
        let names: Vec<&str> = view.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["apple.png", "Mango.png", "Zebra.png"]);
    }

    #[test]
    fn test_sort_by_size_descending() {
        let files = sample_folder();
        let query = FileQuery {
            sort: SortKey::Size,
            ..Default::default()
        };
        let result = view(&files, &query);
        assert!(result.windows(2).all(|w| w[0].size >= w[1].size));
    }

    #[test]
    fn test_filtering_never_reorders_and_sorting_keeps_membership() {
        let files = sample_folder();
        let query = FileQuery {
            categories: vec![MediaCategory::Image],
            ..Default::default()
        };
        let result = view(&files, &query);

        // Subset of the input
        assert!(result
            .iter()
            .all(|r| files.iter().any(|f| f.id == r.id)));
        // Membership is exactly the filter predicate
        let expected: Vec<Uuid> = files
            .iter()
            .filter(|f| query.matches(f))
            .map(|f| f.id)
            .collect();
        let mut got: Vec<Uuid> = result.iter().map(|f| f.id).collect();
        got.sort();
        let mut expected_sorted = expected;
        expected_sorted.sort();
        assert_eq!(got, expected_sorted);
    }

    #[test]
    fn test_view_is_idempotent() {
        let files = sample_folder();
        let query = FileQuery {
            search: "img".to_string(),
            sort: SortKey::Name,
            ..Default::default()
        };
        let first: Vec<Uuid> = view(&files, &query).iter().map(|f| f.id).collect();
        let second: Vec<Uuid> = view(&files, &query).iter().map(|f| f.id).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_composed_query_small_images_named_img_by_name() {
        let files = sample_folder();
        let query = FileQuery {
            search: "img".to_string(),
            categories: vec![MediaCategory::Image],
            size_bucket: SizeBucket::Small,
            sort: SortKey::Name,
        };
        let result = view(&files, &query);
        let names: Vec<&str> = result.iter().map(|f| f.name.as_str()).collect();
        // notes_img.txt is excluded by category, img_large.png by size
        assert_eq!(names, vec!["img_aurora.jpg", "img_beach.png"]);
    }

    #[test]
    fn test_available_categories_distinct_in_first_appearance_order() {
        let files = sample_folder();
        assert_eq!(
            available_categories(&files),
            vec![
                MediaCategory::Image,
                MediaCategory::Video,
                MediaCategory::Document
            ]
        );
    }

    #[test]
    fn test_available_categories_skips_unrecognized() {
        let files = vec![record("data.bin", 1, "application/octet-stream", 0)];
        assert!(available_categories(&files).is_empty());
    }

    #[test]
    fn test_folder_view_aggregates() {
        let files = sample_folder();
        let query = FileQuery {
            categories: vec![MediaCategory::Image],
            ..Default::default()
        };
        let readout = folder_view(&files, &query);

        assert_eq!(readout.total, 5);
        assert_eq!(readout.matched, 3);
        assert_eq!(readout.files.len(), 3);
        assert_eq!(
            readout.total_bytes,
            files.iter().map(|f| f.size).sum::<u64>()
        );
        // Aggregates are over the folder, not the filtered view
        assert_eq!(readout.available_categories.len(), 3);
    }

    #[test]
    fn test_stable_sort_preserves_insertion_order_on_ties() {
        let mut files = vec![
            record("b.png", 100, "image/png", 0),
            record("a.png", 100, "image/png", 0),
            record("c.png", 100, "image/png", 0),
        ];
        // Identical sizes: size sort must keep insertion order
        let ts = Utc::now();
        for f in &mut files {
            f.uploaded_at = ts;
        }
        let query = FileQuery {
            sort: SortKey::Size,
            ..Default::default()
        };
        let view = view(&files, &query);
        let names: Vec<&str> = view.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["b.png", "a.png", "c.png"]);
    }
}
