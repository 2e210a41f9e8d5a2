//! CLI interface for the resume matcher

use crate::config::{OutputFormat, SimilarityBackend};
use clap::{Parser, Subcommand};
use std::path::Path;
use std::path::PathBuf;

/// Extensions accepted for resumes.
pub const RESUME_EXTENSIONS: &[&str] = &["pdf", "docx", "txt", "md", "markdown", "doc"];

/// Extensions accepted for job descriptions.
pub const JOB_EXTENSIONS: &[&str] = &["txt", "md", "markdown"];

#[derive(Parser)]
#[command(name = "resume-matcher")]
#[command(about = "Score how well a resume matches a job description")]
#[command(long_about = "Deterministic resume scoring: role-weighted skill matching, experience and \
                        education bonuses, and TF-IDF similarity blended into a single percentage")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Score a resume against a job description
    Score {
        /// Path to resume file (PDF, DOCX, TXT, MD, DOC)
        #[arg(short, long)]
        resume: PathBuf,

        /// Path to job description file (TXT, MD)
        #[arg(short, long)]
        job: PathBuf,

        /// Output format: console, json, markdown
        #[arg(short, long)]
        output: Option<String>,

        /// Save output to file
        #[arg(short, long)]
        save: Option<PathBuf>,

        /// Include the score breakdown
        #[arg(short, long)]
        detailed: bool,

        /// Similarity backend: tfidf, jaccard
        #[arg(long)]
        similarity: Option<String>,
    },

    /// List the skill dictionary
    Skills,

    /// List role profiles and their skill weights
    Roles,

    /// Show or manage configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Reset configuration to defaults
    Reset,

    /// Print the configuration file location
    Path,
}

/// Parse and validate output format
pub fn parse_output_format(format: &str) -> Result<OutputFormat, String> {
    match format.to_lowercase().as_str() {
        "console" => Ok(OutputFormat::Console),
        "json" => Ok(OutputFormat::Json),
        "markdown" | "md" => Ok(OutputFormat::Markdown),
        _ => Err(format!(
            "Invalid output format: {}. Supported: console, json, markdown",
            format
        )),
    }
}

pub fn parse_similarity_backend(backend: &str) -> Result<SimilarityBackend, String> {
    match backend.to_lowercase().as_str() {
        "tfidf" | "tf-idf" => Ok(SimilarityBackend::Tfidf),
        "jaccard" => Ok(SimilarityBackend::Jaccard),
        _ => Err(format!(
            "Invalid similarity backend: {}. Supported: tfidf, jaccard",
            backend
        )),
    }
}

/// Validate file extension
pub fn validate_file_extension(path: &Path, allowed_extensions: &[&str]) -> Result<(), String> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) => {
            if allowed_extensions.contains(&ext.to_lowercase().as_str()) {
                Ok(())
            } else {
                Err(format!(
                    "Unsupported file extension: .{}. Allowed: {}",
                    ext,
                    allowed_extensions.join(", ")
                ))
            }
        }
        None => Err("File has no extension".to_string()),
    }
}
