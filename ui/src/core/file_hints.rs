//! Advisory checks for a picked report file.
//!
//! The analysis service is the authority on what it accepts; these hints only
//! warn the user before an upload that is likely to be rejected. They never
//! block submission.

use api::ReportFile;

/// Extensions the analysis service understands.
pub const ACCEPTED_EXTENSIONS: &[&str] = &["pdf", "jpg", "jpeg", "png"];

/// Value for the file input's `accept` attribute.
pub const ACCEPT_ATTRIBUTE: &str = ".pdf,.jpg,.jpeg,.png";

/// Upload size the service is configured for.
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileAdvisory {
    UnsupportedType { extension: Option<String> },
    TooLarge { bytes: usize },
    Empty,
}

impl FileAdvisory {
    /// Localized sentence for the active language.
    pub fn message(&self) -> String {
        match self {
            Self::UnsupportedType {
                extension: Some(ext),
            } => crate::t!("advisory-unsupported-type", ext = ext.clone()),
            Self::UnsupportedType { extension: None } => crate::t!("advisory-no-extension"),
            Self::TooLarge { bytes } => crate::t!(
                "advisory-too-large",
                size = super::format::format_file_size(*bytes)
            ),
            Self::Empty => crate::t!("advisory-empty"),
        }
    }
}

/// Collect every advisory that applies to `file`, most severe first.
pub fn advise(file: &ReportFile) -> Vec<FileAdvisory> {
    let mut advisories = Vec::new();

    if file.size() == 0 {
        advisories.push(FileAdvisory::Empty);
    } else if file.size() > MAX_UPLOAD_BYTES {
        advisories.push(FileAdvisory::TooLarge { bytes: file.size() });
    }

    let extension = file.extension();
    let supported = extension
        .as_deref()
        .map(|ext| ACCEPTED_EXTENSIONS.contains(&ext))
        .unwrap_or(false);
    if !supported {
        advisories.push(FileAdvisory::UnsupportedType { extension });
    }

    advisories
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pdf_within_limit_is_clean() {
        let file = ReportFile::from_name("labs.pdf", vec![1; 2048]);
        assert!(advise(&file).is_empty());
    }

    #[test]
    fn oversized_image_is_flagged() {
        let file = ReportFile::from_name("scan.PNG", vec![0; MAX_UPLOAD_BYTES + 1]);
        assert_eq!(
            advise(&file),
            vec![FileAdvisory::TooLarge {
                bytes: MAX_UPLOAD_BYTES + 1
            }]
        );
    }

    #[test]
    fn unsupported_and_empty_stack() {
        crate::i18n::init();
        let file = ReportFile::from_name("notes.docx", Vec::new());
        let advisories = advise(&file);
        assert_eq!(advisories[0], FileAdvisory::Empty);
        assert_eq!(
            advisories[1],
            FileAdvisory::UnsupportedType {
                extension: Some("docx".into())
            }
        );
        assert!(advisories[1].message().contains("docx"));
    }

    #[test]
    fn messages_come_from_the_translation_files() {
        crate::i18n::init();
        crate::i18n::set_language("en-US").unwrap();

        let too_large = FileAdvisory::TooLarge {
            bytes: MAX_UPLOAD_BYTES + 1,
        }
        .message();
        assert!(too_large.contains("10.0 MB"), "{too_large}");
        assert!(too_large.ends_with("may exceed the 10 MB limit."), "{too_large}");
        assert_eq!(FileAdvisory::Empty.message(), "This file is empty.");
        assert_eq!(
            FileAdvisory::UnsupportedType { extension: None }.message(),
            "Files without an extension may not be accepted. Use PDF, JPG or PNG."
        );
    }
}
