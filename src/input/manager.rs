//! Input manager: routes a file to the extractor for its type

use crate::error::{Result, ResumeMatcherError};
use crate::input::file_detector::FileType;
use crate::input::text_extractor::{
    DocxExtractor, LegacyDocExtractor, MarkdownExtractor, PdfExtractor, PlainTextExtractor,
    TextExtractor,
};
use log::info;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

pub struct InputManager {
    cache: HashMap<PathBuf, String>,
    enable_cache: bool,
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}

impl InputManager {
    pub fn new() -> Self {
        Self {
            cache: HashMap::new(),
            enable_cache: true,
        }
    }

    pub fn with_cache(mut self, enable: bool) -> Self {
        self.enable_cache = enable;
        self
    }

    /// Extract text from a resume or job description file. Unreadable PDF and
    /// DOCX files and legacy .doc files yield placeholder text rather than an error.
    pub async fn extract_text(&mut self, path: &Path) -> Result<String> {
        if self.enable_cache {
            if let Some(cached_text) = self.cache.get(path) {
                info!("Using cached text for: {}", path.display());
                return Ok(cached_text.clone());
            }
        }

        if !path.exists() {
            return Err(ResumeMatcherError::InvalidInput(format!(
                "File does not exist: {}",
                path.display()
            )));
        }

        let text = match Self::detect_file_type(path)? {
            FileType::Pdf => {
                info!("Extracting text from PDF: {}", path.display());
                PdfExtractor.extract(path).await?
            }
            FileType::Text => {
                info!("Reading plain text file: {}", path.display());
                PlainTextExtractor.extract(path).await?
            }
            FileType::Markdown => {
                info!("Processing markdown file: {}", path.display());
                MarkdownExtractor.extract(path).await?
            }
            FileType::Docx => {
                info!("Extracting text from DOCX: {}", path.display());
                DocxExtractor.extract(path).await?
            }
            FileType::LegacyDoc => LegacyDocExtractor.extract(path).await?,
            FileType::Unknown => {
                return Err(ResumeMatcherError::UnsupportedFormat(format!(
                    "Unsupported file type for: {}",
                    path.display()
                )));
            }
        };

        if self.enable_cache {
            self.cache.insert(path.to_path_buf(), text.clone());
        }

        Ok(text)
    }

    pub fn detect_file_type(path: &Path) -> Result<FileType> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .ok_or_else(|| {
                ResumeMatcherError::InvalidInput(format!(
                    "File has no extension: {}",
                    path.display()
                ))
            })?;

        Ok(FileType::from_extension(extension))
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_cache_and_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("resume.txt");
        std::fs::write(&path, "Python developer").unwrap();

        let mut manager = InputManager::new();
        assert_eq!(manager.extract_text(&path).await.unwrap(), "Python developer");
        assert_eq!(manager.cache_size(), 1);

        std::fs::write(&path, "changed").unwrap();
        assert_eq!(manager.extract_text(&path).await.unwrap(), "Python developer");

        manager.clear_cache();
        assert_eq!(manager.extract_text(&path).await.unwrap(), "changed");

        let missing = dir.path().join("missing.txt");
        assert!(matches!(
            manager.extract_text(&missing).await,
            Err(ResumeMatcherError::InvalidInput(_))
        ));
    }

    #[tokio::test]
    async fn test_broken_docx_is_routed_to_placeholder() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("jane_doe.docx");
        std::fs::write(&path, "not a zip archive").unwrap();

        let mut manager = InputManager::new();
        let text = manager.extract_text(&path).await.unwrap();
        assert_eq!(text, "Resume: jane doe\nNote: DOCX text extraction yielded low content.");
    }

    #[tokio::test]
    async fn test_legacy_doc_and_unknown_types() {
        let dir = tempfile::tempdir().unwrap();
        let doc = dir.path().join("old_cv.doc");
        let odt = dir.path().join("cv.odt");
        std::fs::write(&doc, [0xd0, 0xcf, 0x11, 0xe0]).unwrap();
        std::fs::write(&odt, "x").unwrap();

        let mut manager = InputManager::new().with_cache(false);
        let text = manager.extract_text(&doc).await.unwrap();
        assert!(text.contains("Legacy .doc format not fully supported"));
        assert_eq!(manager.cache_size(), 0);

        assert!(matches!(
            manager.extract_text(&odt).await,
            Err(ResumeMatcherError::UnsupportedFormat(_))
        ));
    }
}
