//! Text extraction from various file formats
//!
//! Extraction is best effort. Formats that cannot be read reliably produce a
//! short placeholder naming the file, worded so the scorer's low-quality
//! check recognizes it.

use crate::error::{Result, ResumeMatcherError};
use log::{debug, warn};
use pulldown_cmark::{html, Parser};
use quick_xml::events::Event;
use quick_xml::Reader;
use regex::Regex;
use std::io::{Cursor, Read};
use std::panic::catch_unwind;
use std::path::Path;
use tokio::fs;
use zip::ZipArchive;

/// PDF or DOCX text this short or shorter is treated as a failed extraction.
const MIN_DOCUMENT_CHARS: usize = 100;

/// Main body part of a DOCX package.
const DOCX_BODY_PART: &str = "word/document.xml";

pub trait TextExtractor {
    fn extract(&self, path: &Path) -> impl std::future::Future<Output = Result<String>> + Send;
}

/// File stem with underscores turned into spaces, for placeholder text.
fn display_name(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().replace('_', " "))
        .unwrap_or_default()
}

pub fn low_content_placeholder(path: &Path) -> String {
    format!(
        "Resume: {}\nNote: PDF text extraction yielded low content.",
        display_name(path)
    )
}

pub fn docx_placeholder(path: &Path) -> String {
    format!(
        "Resume: {}\nNote: DOCX text extraction yielded low content.",
        display_name(path)
    )
}

pub fn legacy_doc_placeholder(path: &Path) -> String {
    format!(
        "Resume: {}\nNote: Legacy .doc format not fully supported. Convert to PDF/DOCX/TXT.",
        display_name(path)
    )
}

/// Trimmed text when it is long enough to score, `None` otherwise.
fn substantial(text: &str) -> Option<String> {
    let text = text.trim();
    (text.chars().count() > MIN_DOCUMENT_CHARS).then(|| text.to_string())
}

/// Raw text of a PDF. Parser panics are reported as errors.
pub fn pdf_text(bytes: &[u8]) -> Result<String> {
    match catch_unwind(|| pdf_extract::extract_text_from_mem(bytes)) {
        Ok(Ok(text)) => Ok(text),
        Ok(Err(e)) => Err(ResumeMatcherError::PdfExtraction(e.to_string())),
        Err(_) => Err(ResumeMatcherError::PdfExtraction(
            "parser panicked".to_string(),
        )),
    }
}

fn docx_error(err: impl std::fmt::Display) -> ResumeMatcherError {
    ResumeMatcherError::DocxExtraction(err.to_string())
}

/// Paragraph text of a DOCX package, one non-empty paragraph per line.
pub fn docx_text(bytes: &[u8]) -> Result<String> {
    let mut archive = ZipArchive::new(Cursor::new(bytes)).map_err(docx_error)?;
    let mut xml = String::new();
    archive
        .by_name(DOCX_BODY_PART)
        .map_err(docx_error)?
        .read_to_string(&mut xml)?;

    let mut reader = Reader::from_str(&xml);
    let mut paragraphs = Vec::new();
    let mut current = String::new();
    let mut in_text = false;

    loop {
        match reader.read_event().map_err(docx_error)? {
            Event::Start(e) if e.name().as_ref() == b"w:t" => in_text = true,
            Event::End(e) => match e.name().as_ref() {
                b"w:t" => in_text = false,
                b"w:p" => paragraphs.push(std::mem::take(&mut current)),
                _ => {}
            },
            Event::Empty(e) if e.name().as_ref() == b"w:tab" => current.push('\t'),
            Event::Text(e) if in_text => current.push_str(&e.unescape().map_err(docx_error)?),
            Event::Eof => break,
            _ => {}
        }
    }

    let lines: Vec<&str> = paragraphs
        .iter()
        .map(String::as_str)
        .filter(|p| !p.is_empty())
        .collect();
    Ok(lines.join("\n").trim().to_string())
}

pub struct PdfExtractor;

impl TextExtractor for PdfExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let bytes = fs::read(path).await?;

        match pdf_text(&bytes) {
            Ok(text) => match substantial(&text) {
                Some(text) => {
                    debug!("Extracted {} chars from PDF", text.len());
                    Ok(text)
                }
                None => {
                    warn!("PDF '{}' yielded too little text", path.display());
                    Ok(low_content_placeholder(path))
                }
            },
            Err(e) => {
                warn!("Failed to read PDF '{}': {}", path.display(), e);
                Ok(low_content_placeholder(path))
            }
        }
    }
}

pub struct DocxExtractor;

impl TextExtractor for DocxExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let bytes = fs::read(path).await?;

        match docx_text(&bytes) {
            Ok(text) => match substantial(&text) {
                Some(text) => {
                    debug!("Extracted {} chars from DOCX", text.len());
                    Ok(text)
                }
                None => {
                    warn!("DOCX '{}' yielded too little text", path.display());
                    Ok(docx_placeholder(path))
                }
            },
            Err(e) => {
                warn!("Failed to read DOCX '{}': {}", path.display(), e);
                Ok(docx_placeholder(path))
            }
        }
    }
}

pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let bytes = fs::read(path).await?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

pub struct MarkdownExtractor;

impl TextExtractor for MarkdownExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let markdown_content = fs::read_to_string(path).await?;

        let parser = Parser::new(&markdown_content);
        let mut html_output = String::new();
        html::push_html(&mut html_output, parser);

        self.html_to_text(&html_output)
    }
}

impl MarkdownExtractor {
    fn html_to_text(&self, html: &str) -> Result<String> {
        let text = html
            .replace("<br>", "\n")
            .replace("</p>", "\n\n")
            .replace("</li>", "\n")
            .replace("&nbsp;", " ")
            .replace("&amp;", "&")
            .replace("&lt;", "<")
            .replace("&gt;", ">")
            .replace("&quot;", "\"")
            .replace("&#39;", "'");

        let tags = Regex::new(r"<[^>]*>")?;
        let clean_text = tags.replace_all(&text, "");

        let lines: Vec<&str> = clean_text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();

        Ok(lines.join("\n"))
    }
}

pub struct LegacyDocExtractor;

impl TextExtractor for LegacyDocExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        warn!("Legacy .doc file '{}' cannot be parsed", path.display());
        Ok(legacy_doc_placeholder(path))
    }
}
