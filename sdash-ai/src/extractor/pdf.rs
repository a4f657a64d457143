//! PDF text via lopdf

use super::{ExtractError, FileFormat};
use lopdf::Document;
use regex::Regex;
use std::sync::OnceLock;
use tracing::debug;

/// Shortest sentence kept, in characters after trimming
const MIN_SENTENCE_CHARS: usize = 10;

/// Text of one page, whitespace collapsed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageText {
    /// 1-based page number
    pub number: u32,
    pub text: String,
}

fn sentence_end() -> &'static Regex {
    static SENTENCE_END: OnceLock<Regex> = OnceLock::new();
    SENTENCE_END.get_or_init(|| Regex::new(r"[.!?]+").expect("sentence pattern is valid"))
}

/// Read every page in page order
pub(super) fn read_pages(bytes: &[u8]) -> Result<Vec<PageText>, ExtractError> {
    let doc = Document::load_mem(bytes)
        .map_err(|e| ExtractError::malformed(FileFormat::Pdf, format!("failed to load PDF: {}", e)))?;

    let mut pages = Vec::new();
    // get_pages is keyed by page number, so iteration is already in order
    for number in doc.get_pages().keys() {
        match doc.extract_text(&[*number]) {
            Ok(raw) => {
                let text = raw.split_whitespace().collect::<Vec<_>>().join(" ");
                if !text.is_empty() {
                    pages.push(PageText {
                        number: *number,
                        text,
                    });
                }
            }
            Err(e) => debug!("No text on PDF page {}: {}", number, e),
        }
    }
    Ok(pages)
}

/// Split joined page text into sentence fragments
pub(super) fn sentences(pages: &[PageText]) -> Vec<String> {
    let joined = pages
        .iter()
        .map(|page| page.text.as_str())
        .collect::<Vec<_>>()
        .join(" ");

    sentence_end()
        .split(&joined)
        .map(str::trim)
        .filter(|s| s.chars().count() >= MIN_SENTENCE_CHARS)
        .map(str::to_string)
        .collect()
}

pub(super) fn fragments(bytes: &[u8]) -> Result<Vec<String>, ExtractError> {
    let pages = read_pages(bytes)?;
    debug!("PDF has {} pages with text", pages.len());
    Ok(sentences(&pages))
}
