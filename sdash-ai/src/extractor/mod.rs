//! File-to-text extraction
//!
//! Turns an uploaded file (bytes plus declared extension) into an ordered list
//! of text fragments for batch classification. Size and extension are checked
//! before any parsing; a successful extraction always yields at least one
//! fragment.

mod docx;
mod json;
mod pdf;
mod spreadsheet;
mod text;

pub use pdf::PageText;
pub use spreadsheet::SheetRow;

use sdash_common::{MAX_FILE_SIZE_BYTES, SUPPORTED_EXTENSIONS};
use std::fmt;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Formats the extractor understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileFormat {
    Txt,
    Csv,
    Json,
    Pdf,
    Docx,
    Xlsx,
    Xls,
}

impl FileFormat {
    pub const ALL: [FileFormat; 7] = [
        FileFormat::Txt,
        FileFormat::Csv,
        FileFormat::Json,
        FileFormat::Pdf,
        FileFormat::Docx,
        FileFormat::Xlsx,
        FileFormat::Xls,
    ];

    /// Look up a format by extension; case-insensitive, leading dot optional
    pub fn from_extension(extension: &str) -> Option<Self> {
        let normalized = extension.trim_start_matches('.').to_lowercase();
        match normalized.as_str() {
            "txt" => Some(FileFormat::Txt),
            "csv" => Some(FileFormat::Csv),
            "json" => Some(FileFormat::Json),
            "pdf" => Some(FileFormat::Pdf),
            "docx" => Some(FileFormat::Docx),
            "xlsx" => Some(FileFormat::Xlsx),
            "xls" => Some(FileFormat::Xls),
            _ => None,
        }
    }

    /// Canonical extension with leading dot
    pub fn extension(&self) -> &'static str {
        match self {
            FileFormat::Txt => ".txt",
            FileFormat::Csv => ".csv",
            FileFormat::Json => ".json",
            FileFormat::Pdf => ".pdf",
            FileFormat::Docx => ".docx",
            FileFormat::Xlsx => ".xlsx",
            FileFormat::Xls => ".xls",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            FileFormat::Txt => "text",
            FileFormat::Csv => "CSV",
            FileFormat::Json => "JSON",
            FileFormat::Pdf => "PDF",
            FileFormat::Docx => "Word",
            FileFormat::Xlsx | FileFormat::Xls => "Excel",
        }
    }
}

impl fmt::Display for FileFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Extraction failure; terminal for the file, no partial fragments
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("Unsupported file format: {extension}. Supported formats: {}", SUPPORTED_EXTENSIONS.join(", "))]
    UnsupportedFormat { extension: String },

    #[error("File is too large ({size} bytes). Maximum size is {max} bytes")]
    FileTooLarge { size: u64, max: u64 },

    #[error("No text content found in the {format} file")]
    EmptyContent { format: FileFormat },

    #[error("Failed to parse {format} file: {message}")]
    MalformedInput { format: FileFormat, message: String },
}

impl ExtractError {
    pub(crate) fn malformed(format: FileFormat, message: impl fmt::Display) -> Self {
        ExtractError::MalformedInput {
            format,
            message: message.to_string(),
        }
    }
}

/// Extension of a file name with leading dot, lowercased; empty when there is none
pub fn extension_of(file_name: &str) -> String {
    match file_name.rsplit_once('.') {
        Some((_, ext)) => format!(".{}", ext.to_lowercase()),
        None => String::new(),
    }
}

/// Stateless extractor holding the upload size limit
#[derive(Debug, Clone, Copy)]
pub struct FileExtractor {
    max_file_size: u64,
}

impl Default for FileExtractor {
    fn default() -> Self {
        Self::new(MAX_FILE_SIZE_BYTES)
    }
}

impl FileExtractor {
    pub fn new(max_file_size: u64) -> Self {
        Self { max_file_size }
    }

    pub fn max_file_size(&self) -> u64 {
        self.max_file_size
    }

    /// Extract fragments from a file given its name
    pub fn extract_named(&self, file_name: &str, bytes: &[u8]) -> Result<Vec<String>, ExtractError> {
        let result = self.extract(bytes, &extension_of(file_name));
        match &result {
            Ok(fragments) => info!("Extracted {} fragments from {}", fragments.len(), file_name),
            Err(e) => warn!("Rejected {}: {}", file_name, e),
        }
        result
    }

    /// Extract fragments from bytes with a declared extension
    pub fn extract(&self, bytes: &[u8], extension: &str) -> Result<Vec<String>, ExtractError> {
        let size = bytes.len() as u64;
        if size > self.max_file_size {
            return Err(ExtractError::FileTooLarge {
                size,
                max: self.max_file_size,
            });
        }

        let format = FileFormat::from_extension(extension).ok_or_else(|| {
            ExtractError::UnsupportedFormat {
                extension: display_extension(extension),
            }
        })?;

        debug!("Extracting {} bytes as {}", size, format.extension());

        let fragments = match format {
            FileFormat::Txt => text::lines(&decode_text(bytes)),
            FileFormat::Csv => text::first_column(&decode_text(bytes)),
            FileFormat::Json => json::fragments(&decode_text(bytes))?,
            FileFormat::Pdf => pdf::fragments(bytes)?,
            FileFormat::Docx => docx::fragments(bytes)?,
            FileFormat::Xlsx | FileFormat::Xls => spreadsheet::fragments(bytes, format)?,
        };

        if fragments.is_empty() {
            return Err(ExtractError::EmptyContent { format });
        }
        Ok(fragments)
    }
}

fn display_extension(extension: &str) -> String {
    let trimmed = extension.trim_start_matches('.');
    if trimmed.is_empty() {
        "(none)".to_string()
    } else {
        format!(".{}", trimmed.to_lowercase())
    }
}

/// UTF-8 with invalid sequences replaced and any leading BOM removed
fn decode_text(bytes: &[u8]) -> String {
    let text = String::from_utf8_lossy(bytes);
    text.strip_prefix('\u{feff}').unwrap_or(&text).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_extension_is_case_insensitive() {
        assert_eq!(FileFormat::from_extension("txt"), Some(FileFormat::Txt));
        assert_eq!(FileFormat::from_extension(".TXT"), Some(FileFormat::Txt));
        assert_eq!(FileFormat::from_extension(".Xls"), Some(FileFormat::Xls));
        assert_eq!(FileFormat::from_extension("xyz"), None);
        assert_eq!(FileFormat::from_extension("tx"), None);
    }

    #[test]
    fn test_all_formats_match_supported_extensions() {
        let extensions: Vec<&str> = FileFormat::ALL.iter().map(|f| f.extension()).collect();
        assert_eq!(extensions, SUPPORTED_EXTENSIONS.to_vec());
    }

    #[test]
    fn test_extension_of() {
        assert_eq!(extension_of("reviews.TXT"), ".txt");
        assert_eq!(extension_of("archive.tar.gz"), ".gz");
        assert_eq!(extension_of("README"), "");
    }

    #[test]
    fn test_size_checked_before_format() {
        let extractor = FileExtractor::new(4);
        let err = extractor.extract(b"hello", ".xyz").unwrap_err();
        assert!(matches!(err, ExtractError::FileTooLarge { size: 5, max: 4 }));
    }

    #[test]
    fn test_size_limit_is_inclusive() {
        let extractor = FileExtractor::new(5);
        assert_eq!(extractor.extract(b"hello", "txt").unwrap(), vec!["hello"]);
    }

    #[test]
    fn test_unsupported_format_names_extension() {
        let err = FileExtractor::default()
            .extract_named("data.xyz", b"whatever")
            .unwrap_err();
        match &err {
            ExtractError::UnsupportedFormat { extension } => assert_eq!(extension, ".xyz"),
            other => panic!("unexpected error: {:?}", other),
        }
        let message = err.to_string();
        assert!(message.contains(".xyz"));
        assert!(message.contains(".docx"));
    }

    #[test]
    fn test_missing_extension_is_unsupported() {
        let err = FileExtractor::default().extract_named("README", b"text").unwrap_err();
        assert!(err.to_string().contains("(none)"));
    }

    #[test]
    fn test_blank_text_file_is_empty_content() {
        let err = FileExtractor::default().extract(b" \n\n\t\n", "txt").unwrap_err();
        assert!(matches!(err, ExtractError::EmptyContent { format: FileFormat::Txt }));
    }

    #[test]
    fn test_bom_is_stripped() {
        let bytes = b"\xEF\xBB\xBFfirst line\nsecond line";
        let fragments = FileExtractor::default().extract(bytes, "txt").unwrap();
        assert_eq!(fragments, vec!["first line", "second line"]);
    }

    #[test]
    fn test_invalid_utf8_is_replaced() {
        let fragments = FileExtractor::default().extract(b"caf\xFF ok", "txt").unwrap();
        assert_eq!(fragments, vec!["caf\u{fffd} ok"]);
    }
}
