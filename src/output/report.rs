//! Report structures wrapping an analysis result with run metadata

use crate::processing::analyzer::{AnalysisResult, ScoreBreakdown};
use crate::processing::text_processor::TextProcessor;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreReport {
    pub result: AnalysisResult,

    /// Intermediate values, present for detailed runs
    pub breakdown: Option<ScoreBreakdown>,

    pub metadata: ReportMetadata,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub generated_at: DateTime<Utc>,
    pub resume_file: String,
    pub job_file: String,
    pub version: String,
    pub similarity_backend: String,
    pub resume_word_count: usize,
}

impl ReportMetadata {
    pub fn new(
        resume_file: impl Into<String>,
        job_file: impl Into<String>,
        similarity_backend: impl Into<String>,
        resume_text: &str,
    ) -> Self {
        Self {
            generated_at: Utc::now(),
            resume_file: resume_file.into(),
            job_file: job_file.into(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            similarity_backend: similarity_backend.into(),
            resume_word_count: TextProcessor::word_count(resume_text),
        }
    }
}

impl ScoreReport {
    pub fn new(result: AnalysisResult, metadata: ReportMetadata) -> Self {
        Self {
            result,
            breakdown: None,
            metadata,
        }
    }

    pub fn with_breakdown(
        result: AnalysisResult,
        breakdown: Option<ScoreBreakdown>,
        metadata: ReportMetadata,
    ) -> Self {
        Self {
            result,
            breakdown,
            metadata,
        }
    }

    /// One-line reading of the score.
    pub fn verdict(&self) -> &'static str {
        if self.result.is_degraded() {
            return "Analysis incomplete; score is a placeholder";
        }
        match self.result.overall_score {
            80..=100 => "Strong match for this role",
            65..=79 => "Good match with a few gaps",
            50..=64 => "Partial match; notable gaps to address",
            _ => "Weak match for this role",
        }
    }

    /// Share of the job's required skills found in the resume, or `None`
    /// when the job names no catalog skills.
    pub fn skill_coverage(&self) -> Option<f64> {
        let matched = self.result.matched_skills.len();
        let total = matched + self.result.missing_skills.len();
        (total > 0).then(|| matched as f64 / total as f64)
    }
}
