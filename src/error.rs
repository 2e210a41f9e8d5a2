//! Error handling for the resume matcher

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ResumeMatcherError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PDF extraction error: {0}")]
    PdfExtraction(String),

    #[error("DOCX extraction error: {0}")]
    DocxExtraction(String),

    #[error("Text processing error: {0}")]
    TextProcessing(String),

    #[error("Similarity computation error: {0}")]
    Similarity(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Skill catalog error: {0}")]
    Catalog(String),

    #[error("File format not supported: {0}")]
    UnsupportedFormat(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Analysis failed: {0}")]
    AnalysisFailed(String),

    #[error("Output formatting error: {0}")]
    OutputFormatting(String),
}

pub type Result<T> = std::result::Result<T, ResumeMatcherError>;

/// Regex compilation failures surface as text processing errors
impl From<regex::Error> for ResumeMatcherError {
    fn from(err: regex::Error) -> Self {
        ResumeMatcherError::TextProcessing(err.to_string())
    }
}
