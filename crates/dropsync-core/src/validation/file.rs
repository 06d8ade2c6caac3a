//! Per-file admission policy.
//!
//! A candidate is checked against every rule independently and all violated
//! rules are returned, so the user sees the complete list in one report.

use crate::models::file::IncomingFile;

/// Admission validation errors for candidate files
#[derive(Debug, Clone, thiserror::Error)]
pub enum ValidationIssue {
    #[error("File size exceeds {} limit", crate::units::human_size(*.max))]
    FileTooLarge { size: u64, max: u64 },

    #[error("File type not supported")]
    UnsupportedType {
        content_type: String,
        extension: Option<String>,
    },
}

/// One whitelist entry: a MIME pattern plus the extensions that stand in for
/// it when the declared type is missing or generic.
///
/// A pattern ending in `/*` matches any subtype of its major type; anything
/// else matches exactly. Matching is case-insensitive.
#[derive(Debug, Clone)]
pub struct TypeRule {
    pub mime_pattern: &'static str,
    pub extensions: &'static [&'static str],
}

impl TypeRule {
    fn matches_mime(&self, content_type: &str) -> bool {
        match self.mime_pattern.strip_suffix("/*") {
            Some(major) => content_type
                .strip_prefix(major)
                .is_some_and(|rest| rest.starts_with('/')),
            None => content_type == self.mime_pattern,
        }
    }

    fn matches_extension(&self, extension: &str) -> bool {
        self.extensions.contains(&extension)
    }
}

/// The default whitelist: images, PDF, plain-text formats, Word documents,
/// video, and audio.
pub fn default_type_rules() -> Vec<TypeRule> {
    vec![
        TypeRule {
            mime_pattern: "image/*",
            extensions: &["jpg", "jpeg", "png", "gif", "webp", "svg"],
        },
        TypeRule {
            mime_pattern: "application/pdf",
            extensions: &["pdf"],
        },
        TypeRule {
            mime_pattern: "text/*",
            extensions: &["txt", "md", "csv"],
        },
        TypeRule {
            mime_pattern: "application/msword",
            extensions: &["doc"],
        },
        TypeRule {
            mime_pattern: "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
            extensions: &["docx"],
        },
        TypeRule {
            mime_pattern: "video/*",
            extensions: &["mp4", "avi", "mov", "wmv", "flv"],
        },
        TypeRule {
            mime_pattern: "audio/*",
            extensions: &["mp3", "wav", "flac", "aac"],
        },
    ]
}

/// Candidate file admission policy
///
/// Size and type are checked independently; a candidate can violate both and
/// gets both messages back.
#[derive(Debug, Clone)]
pub struct UploadPolicy {
    max_file_size: u64,
    rules: Vec<TypeRule>,
}

impl UploadPolicy {
    pub fn new(max_file_size: u64, rules: Vec<TypeRule>) -> Self {
        Self {
            max_file_size,
            rules,
        }
    }

    pub fn max_file_size(&self) -> u64 {
        self.max_file_size
    }

    /// Check a candidate against the policy, returning every violated rule.
    /// An empty result means the candidate is admissible.
    pub fn check(&self, file: &IncomingFile) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();

        if file.size > self.max_file_size {
            issues.push(ValidationIssue::FileTooLarge {
                size: file.size,
                max: self.max_file_size,
            });
        }

        let content_type = file.content_type.to_lowercase();
        let extension = file.extension();
        let recognized = self.rules.iter().any(|rule| {
            rule.matches_mime(&content_type)
                || extension
                    .as_deref()
                    .is_some_and(|ext| rule.matches_extension(ext))
        });
        if !recognized {
            issues.push(ValidationIssue::UnsupportedType {
                content_type: file.content_type.clone(),
                extension,
            });
        }

        issues
    }

    /// Convenience wrapper: true iff `check` returns no issues.
    pub fn is_admissible(&self, file: &IncomingFile) -> bool {
        self.check(file).is_empty()
    }
}
