//! Final score blending, low-quality detection and domain caps

use crate::config::ScoringConfig;
use crate::error::{Result, ResumeMatcherError};
use crate::processing::phrase::{any_found_in, Phrase};
use crate::processing::text_processor::diversity_ratio;
use aho_corasick::AhoCorasick;
use log::debug;
use serde::{Deserialize, Serialize};

/// Text that extraction collaborators emit instead of real resume content.
pub const PLACEHOLDER_MARKERS: &[&str] = &[
    "note: pdf parsing limited",
    "skills: general professional skills",
    "educational background.",
    "experience: work history",
    "text extraction yielded low content",
    "legacy .doc format not fully supported",
];

/// Flags resumes too short or placeholder-like to trust.
pub struct QualityDetector {
    markers: AhoCorasick,
    min_chars: usize,
}

impl QualityDetector {
    pub fn new(min_chars: usize) -> Result<Self> {
        let markers = AhoCorasick::builder()
            .ascii_case_insensitive(true)
            .build(PLACEHOLDER_MARKERS)
            .map_err(|e| {
                ResumeMatcherError::TextProcessing(format!("Failed to build marker matcher: {}", e))
            })?;
        Ok(Self { markers, min_chars })
    }

    pub fn is_low_quality(&self, resume_text: &str) -> bool {
        resume_text.trim().chars().count() < self.min_chars || self.markers.is_match(resume_text)
    }
}

/// Inputs to the blend, gathered from the earlier pipeline stages.
#[derive(Debug, Clone, Copy)]
pub struct BlendInputs<'a> {
    pub base: i64,
    pub bonus: u32,
    pub similarity: u8,
    pub resume_text: &'a str,
    pub is_low_quality: bool,
    pub job_text: &'a str,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BlendOutcome {
    pub overall_score: u8,
    pub skill_score: i64,
    pub uniqueness_factor: u8,
    pub containerization_capped: bool,
}

pub struct ScoreBlender {
    config: ScoringConfig,
    containerization: Vec<Phrase>,
}

impl ScoreBlender {
    pub fn new(config: ScoringConfig) -> Result<Self> {
        Ok(Self {
            config,
            containerization: vec![Phrase::new("docker")?, Phrase::new("kubernetes")?],
        })
    }

    /// Content diversity bucket: >0.7 → 8, >0.5 → 5, >0.3 → 2, else 0.
    pub fn uniqueness_factor(resume_text: &str) -> u8 {
        match diversity_ratio(resume_text) {
            r if r > 0.7 => 8,
            r if r > 0.5 => 5,
            r if r > 0.3 => 2,
            _ => 0,
        }
    }

    pub fn blend(&self, inputs: &BlendInputs<'_>) -> Result<BlendOutcome> {
        let cfg = &self.config;
        if cfg.skill_score_floor > cfg.skill_score_ceiling {
            return Err(ResumeMatcherError::AnalysisFailed(format!(
                "skill score floor {} exceeds ceiling {}",
                cfg.skill_score_floor, cfg.skill_score_ceiling
            )));
        }

        let (skill_score, uniqueness_factor) = if inputs.is_low_quality {
            (cfg.low_quality_neutral_score, 0)
        } else {
            let raw = inputs.base + i64::from(inputs.bonus);
            (
                raw.clamp(cfg.skill_score_floor, cfg.skill_score_ceiling),
                Self::uniqueness_factor(inputs.resume_text),
            )
        };

        let blended = cfg.skill_weight * skill_score as f64
            + cfg.similarity_weight * f64::from(inputs.similarity)
            + cfg.uniqueness_weight * f64::from(uniqueness_factor) * 10.0;

        if !blended.is_finite() {
            return Err(ResumeMatcherError::AnalysisFailed(format!(
                "blended score is not finite ({})",
                blended
            )));
        }

        let mut overall = blended.round().clamp(0.0, 100.0) as u8;

        let requires_containers = any_found_in(&self.containerization, inputs.job_text);
        let has_containers = any_found_in(&self.containerization, inputs.resume_text);
        let cap_applies = requires_containers && !has_containers && !inputs.is_low_quality;
        let containerization_capped = cap_applies && overall > cfg.containerization_cap;
        if cap_applies {
            overall = overall.min(cfg.containerization_cap);
        }

        debug!(
            "Blend: skill {} similarity {} uniqueness {} -> {} (capped: {})",
            skill_score, inputs.similarity, uniqueness_factor, overall, containerization_capped
        );

        Ok(BlendOutcome {
            overall_score: overall,
            skill_score,
            uniqueness_factor,
            containerization_capped,
        })
    }
}
