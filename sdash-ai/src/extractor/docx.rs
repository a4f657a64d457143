//! Word documents: paragraphs from `word/document.xml`

use super::{ExtractError, FileFormat};
use regex::Regex;
use std::io::{Cursor, Read};
use std::sync::OnceLock;

const DOCUMENT_PART: &str = "word/document.xml";

/// Shortest paragraph kept, in characters after trimming
const MIN_PARAGRAPH_CHARS: usize = 10;

fn paragraph_break() -> &'static Regex {
    static PARAGRAPH_BREAK: OnceLock<Regex> = OnceLock::new();
    PARAGRAPH_BREAK.get_or_init(|| Regex::new(r"\n\s*\n").expect("paragraph pattern is valid"))
}

pub(super) fn fragments(bytes: &[u8]) -> Result<Vec<String>, ExtractError> {
    let xml = read_document_xml(bytes)?;
    let text = document_text(&xml);
    let whole = text.trim();
    if whole.is_empty() {
        return Err(ExtractError::EmptyContent {
            format: FileFormat::Docx,
        });
    }

    let paragraphs: Vec<String> = paragraph_break()
        .split(whole)
        .map(str::trim)
        .filter(|p| p.chars().count() >= MIN_PARAGRAPH_CHARS)
        .map(str::to_string)
        .collect();

    if paragraphs.is_empty() {
        Ok(vec![whole.to_string()])
    } else {
        Ok(paragraphs)
    }
}

fn read_document_xml(bytes: &[u8]) -> Result<String, ExtractError> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).map_err(|e| {
        ExtractError::malformed(FileFormat::Docx, format!("not a valid .docx archive: {}", e))
    })?;

    let mut part = archive.by_name(DOCUMENT_PART).map_err(|_| {
        ExtractError::malformed(FileFormat::Docx, format!("archive has no {}", DOCUMENT_PART))
    })?;

    let mut xml = String::new();
    part.read_to_string(&mut xml).map_err(|e| {
        ExtractError::malformed(FileFormat::Docx, format!("failed to read {}: {}", DOCUMENT_PART, e))
    })?;
    Ok(xml)
}

/// Raw text of a WordprocessingML body
///
/// Each paragraph is followed by a blank line. Tab and break elements become
/// `\t` and `\n`; tab stop definitions under `<w:tabs>` are ignored.
fn document_text(xml: &str) -> String {
    let mut out = String::new();
    let mut rest = xml;
    let mut in_text = false;
    let mut in_tab_stops = false;

    while let Some(open) = rest.find('<') {
        if in_text {
            out.push_str(&decode_entities(&rest[..open]));
        }
        let Some(len) = rest[open..].find('>') else {
            break;
        };
        let tag = &rest[open + 1..open + len];
        rest = &rest[open + len + 1..];

        let closing = tag.starts_with('/');
        let self_closing = tag.ends_with('/');
        let name = tag
            .trim_start_matches('/')
            .split(|c: char| c.is_whitespace() || c == '/')
            .next()
            .unwrap_or_default();

        match (name, closing) {
            ("w:t", false) => in_text = !self_closing,
            ("w:t", true) => in_text = false,
            ("w:tabs", false) => in_tab_stops = !self_closing,
            ("w:tabs", true) => in_tab_stops = false,
            ("w:tab", false) if !in_tab_stops => out.push('\t'),
            ("w:br" | "w:cr", false) => out.push('\n'),
            ("w:p", true) => out.push_str("\n\n"),
            ("w:p", false) if self_closing => out.push_str("\n\n"),
            _ => {}
        }
    }
    out
}

/// Decode the predefined XML entities and numeric character references
fn decode_entities(raw: &str) -> String {
    if !raw.contains('&') {
        return raw.to_string();
    }

    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        rest = &rest[amp..];
        let Some(semi) = rest.find(';') else {
            break;
        };
        let entity = &rest[1..semi];
        let decoded = match entity {
            "lt" => Some('<'),
            "gt" => Some('>'),
            "amp" => Some('&'),
            "quot" => Some('"'),
            "apos" => Some('\''),
            _ => entity
                .strip_prefix("#x")
                .and_then(|hex| u32::from_str_radix(hex, 16).ok())
                .or_else(|| entity.strip_prefix('#').and_then(|dec| dec.parse().ok()))
                .and_then(char::from_u32),
        };
        match decoded {
            Some(c) => {
                out.push(c);
                rest = &rest[semi + 1..];
            }
            None => {
                out.push('&');
                rest = &rest[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(paragraphs: &str) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{}</w:body></w:document>"#,
            paragraphs
        )
    }

    #[test]
    fn test_runs_join_within_paragraph() {
        let xml = body(
            r#"<w:p><w:r><w:t>Great </w:t></w:r><w:r><w:rPr><w:b/></w:rPr><w:t xml:space="preserve">product</w:t></w:r></w:p><w:p><w:r><w:t>Second</w:t></w:r></w:p>"#,
        );
        assert_eq!(document_text(&xml), "Great product\n\nSecond\n\n");
    }

    #[test]
    fn test_tables_do_not_look_like_text_runs() {
        let xml = body(
            r#"<w:tbl><w:tblPr/><w:tr><w:tc><w:p><w:r><w:t>cell</w:t></w:r></w:p></w:tc></w:tr></w:tbl>"#,
        );
        assert_eq!(document_text(&xml), "cell\n\n");
    }

    #[test]
    fn test_tabs_and_breaks() {
        let xml = body(
            r#"<w:p><w:pPr><w:tabs><w:tab w:val="left" w:pos="720"/></w:tabs></w:pPr><w:r><w:t>a</w:t><w:tab/><w:t>b</w:t><w:br/><w:t>c</w:t></w:r></w:p>"#,
        );
        assert_eq!(document_text(&xml), "a\tb\nc\n\n");
    }

    #[test]
    fn test_entities_decoded() {
        assert_eq!(
            decode_entities("Fish &amp; chips &lt;3 &#233;t&#xE9; &bogus; &"),
            "Fish & chips <3 été &bogus; &"
        );
    }

    #[test]
    fn test_not_a_zip_is_malformed() {
        let err = fragments(b"PK but not really").unwrap_err();
        assert!(matches!(
            err,
            ExtractError::MalformedInput {
                format: FileFormat::Docx,
                ..
            }
        ));
    }
}
