use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

/// Extensions that map to the document category when the declared MIME type
/// does not already decide the category.
const DOCUMENT_EXTENSIONS: [&str; 5] = ["pdf", "doc", "docx", "txt", "md"];

/// Media category enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaCategory {
    Image,
    Video,
    Audio,
    Document,
}

impl MediaCategory {
    /// Derive the category of a file from its declared MIME type, falling
    /// back to the extension for document formats. Returns `None` when
    /// neither is recognized.
    pub fn derive(name: &str, content_type: &str) -> Option<MediaCategory> {
        let major = content_type
            .split('/')
            .next()
            .unwrap_or_default()
            .to_lowercase();
        match major.as_str() {
            "image" => return Some(MediaCategory::Image),
            "video" => return Some(MediaCategory::Video),
            "audio" => return Some(MediaCategory::Audio),
            _ => {}
        }

        let extension = std::path::Path::new(name)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())?;
        if DOCUMENT_EXTENSIONS.contains(&extension.as_str()) {
            Some(MediaCategory::Document)
        } else {
            None
        }
    }
}

impl Display for MediaCategory {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            MediaCategory::Image => write!(f, "image"),
            MediaCategory::Video => write!(f, "video"),
            MediaCategory::Audio => write!(f, "audio"),
            MediaCategory::Document => write!(f, "document"),
        }
    }
}

impl FromStr for MediaCategory {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "image" => Ok(MediaCategory::Image),
            "video" => Ok(MediaCategory::Video),
            "audio" => Ok(MediaCategory::Audio),
            "document" => Ok(MediaCategory::Document),
            _ => Err(anyhow::anyhow!("Invalid media category: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derive_from_mime_major_type() {
        assert_eq!(
            MediaCategory::derive("photo.jpg", "image/jpeg"),
            Some(MediaCategory::Image)
        );
        assert_eq!(
            MediaCategory::derive("clip.mp4", "video/mp4"),
            Some(MediaCategory::Video)
        );
        assert_eq!(
            MediaCategory::derive("song.mp3", "audio/mpeg"),
            Some(MediaCategory::Audio)
        );
    }

    #[test]
    fn test_derive_document_from_extension() {
        assert_eq!(
            MediaCategory::derive("report.pdf", "application/pdf"),
            Some(MediaCategory::Document)
        );
        assert_eq!(
            MediaCategory::derive("notes.MD", "application/octet-stream"),
            Some(MediaCategory::Document)
        );
        assert_eq!(
            MediaCategory::derive(
                "letter.docx",
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            ),
            Some(MediaCategory::Document)
        );
    }

    #[test]
    fn test_mime_wins_over_extension() {
        // A picture named like a document is still an image
        assert_eq!(
            MediaCategory::derive("scan.pdf.png", "image/png"),
            Some(MediaCategory::Image)
        );
    }

    #[test]
    fn test_derive_unrecognized() {
        assert_eq!(MediaCategory::derive("data.bin", "application/octet-stream"), None);
        assert_eq!(MediaCategory::derive("noextension", "application/x-thing"), None);
    }

    #[test]
    fn test_display_round_trip() {
        for category in [
            MediaCategory::Image,
            MediaCategory::Video,
            MediaCategory::Audio,
            MediaCategory::Document,
        ] {
            assert_eq!(
                category.to_string().parse::<MediaCategory>().unwrap(),
                category
            );
        }
        assert!("archive".parse::<MediaCategory>().is_err());
    }
}
