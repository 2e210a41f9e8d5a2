//! Resume matcher library
//!
//! Scores a resume against a job description with a deterministic
//! skill-matching and lexical-similarity pipeline.

pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod output;
pub mod processing;

pub use config::Config;
pub use error::{Result, ResumeMatcherError};
pub use processing::analyzer::{AnalysisInput, AnalysisResult, ScoringEngine};
pub use processing::skills::SkillCatalog;
