//! Scoring engine: runs the full pipeline and always returns a well-formed
//! result

use crate::config::Config;
use crate::error::{Result, ResumeMatcherError};
use crate::processing::blender::{BlendInputs, QualityDetector, ScoreBlender};
use crate::processing::bonus::{BonusBreakdown, BonusScorer};
use crate::processing::recommendations::{
    generate_recommendations, Priority, Recommendation, RecommendationSignals,
};
use crate::processing::role_classifier::RoleClassifier;
use crate::processing::similarity::{scorer_from_config, SimilarityScorer};
use crate::processing::skill_matcher::SkillMatcher;
use crate::processing::skills::SkillCatalog;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::panic::{catch_unwind, AssertUnwindSafe};

/// Score reported when the pipeline fails. It is a fixed midpoint, always
/// paired with `low_confidence` and an "Error Recovery" recommendation.
pub const DEGRADED_SCORE: u8 = 50;

/// Resume and job description text, both non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisInput {
    resume_text: String,
    job_description: String,
}

impl AnalysisInput {
    pub fn new(resume_text: impl Into<String>, job_description: impl Into<String>) -> Result<Self> {
        let resume_text = resume_text.into();
        let job_description = job_description.into();

        if resume_text.trim().is_empty() {
            return Err(ResumeMatcherError::InvalidInput("resume text is empty".to_string()));
        }
        if job_description.trim().is_empty() {
            return Err(ResumeMatcherError::InvalidInput(
                "job description is empty".to_string(),
            ));
        }

        Ok(Self {
            resume_text,
            job_description,
        })
    }

    pub fn resume_text(&self) -> &str {
        &self.resume_text
    }

    pub fn job_description(&self) -> &str {
        &self.job_description
    }
}

/// The result handed back to callers. Serializes to exactly these fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub overall_score: u8,
    pub matched_skills: Vec<String>,
    pub missing_skills: Vec<String>,
    pub recommendations: Vec<Recommendation>,
    pub experience_years: u32,
    pub low_confidence: bool,
}

impl AnalysisResult {
    /// Deterministic fallback for a failed analysis.
    pub fn degraded() -> Self {
        Self {
            overall_score: DEGRADED_SCORE,
            matched_skills: Vec::new(),
            missing_skills: Vec::new(),
            recommendations: vec![Recommendation {
                title: "Error Recovery".to_string(),
                description: "The analysis could not be completed; this score is a placeholder. \
                              Please try again with a different format."
                    .to_string(),
                impact: 10,
                priority: Priority::High,
            }],
            experience_years: 1,
            low_confidence: true,
        }
    }

    pub fn is_degraded(&self) -> bool {
        self.recommendations
            .iter()
            .any(|r| r.title == "Error Recovery")
    }
}

/// Intermediate values behind a result, for diagnostics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub detected_role: String,
    pub weighted_score: f64,
    pub total_weight: f64,
    pub base_score: i64,
    pub bonus: BonusBreakdown,
    pub similarity: u8,
    pub similarity_backend: String,
    pub uniqueness_factor: u8,
    pub skill_score: i64,
    pub containerization_capped: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetailedAnalysis {
    pub result: AnalysisResult,
    pub breakdown: ScoreBreakdown,
}

/// Immutable after construction; one engine can serve concurrent callers.
pub struct ScoringEngine {
    roles: RoleClassifier,
    matcher: SkillMatcher,
    bonus: BonusScorer,
    similarity: Box<dyn SimilarityScorer>,
    quality: QualityDetector,
    blender: ScoreBlender,
}

impl ScoringEngine {
    pub fn new(catalog: &SkillCatalog, config: &Config) -> Result<Self> {
        catalog.validate()?;

        Ok(Self {
            roles: RoleClassifier::new(catalog)?,
            matcher: SkillMatcher::new(catalog)?,
            bonus: BonusScorer::new()?,
            similarity: scorer_from_config(&config.similarity),
            quality: QualityDetector::new(config.scoring.low_quality_min_chars)?,
            blender: ScoreBlender::new(config.scoring.clone())?,
        })
    }

    /// Engine with the built-in catalog and default configuration.
    pub fn with_defaults() -> Result<Self> {
        Self::new(&SkillCatalog::default(), &Config::default())
    }

    /// Swap the similarity backend.
    pub fn with_similarity(mut self, similarity: Box<dyn SimilarityScorer>) -> Self {
        self.similarity = similarity;
        self
    }

    pub fn similarity_backend(&self) -> &'static str {
        self.similarity.name()
    }

    /// Score a resume against a job description. Never fails: any error or
    /// panic inside the pipeline yields [`AnalysisResult::degraded`].
    pub fn analyze(&self, input: &AnalysisInput) -> AnalysisResult {
        self.analyze_with_breakdown(input).0
    }

    /// Guarded variant of [`analyze_detailed`](Self::analyze_detailed). A
    /// degraded result comes back without a breakdown.
    pub fn analyze_with_breakdown(
        &self,
        input: &AnalysisInput,
    ) -> (AnalysisResult, Option<ScoreBreakdown>) {
        match catch_unwind(AssertUnwindSafe(|| self.analyze_detailed(input))) {
            Ok(Ok(detailed)) => (detailed.result, Some(detailed.breakdown)),
            Ok(Err(e)) => {
                warn!("Analysis failed, returning degraded result: {}", e);
                (AnalysisResult::degraded(), None)
            }
            Err(_) => {
                warn!("Analysis panicked, returning degraded result");
                (AnalysisResult::degraded(), None)
            }
        }
    }

    /// Like [`analyze`](Self::analyze) for raw strings; empty input also
    /// degrades instead of failing.
    pub fn analyze_texts(&self, resume_text: &str, job_description: &str) -> AnalysisResult {
        match AnalysisInput::new(resume_text, job_description) {
            Ok(input) => self.analyze(&input),
            Err(e) => {
                warn!("Rejected analysis input: {}", e);
                AnalysisResult::degraded()
            }
        }
    }

    /// Run the pipeline and keep the intermediate values. Errors propagate.
    pub fn analyze_detailed(&self, input: &AnalysisInput) -> Result<DetailedAnalysis> {
        let resume = input.resume_text();
        let job = input.job_description();

        let role = self.roles.detect_role(job);
        info!("Detected role: {}", role.name);

        let matches = self.matcher.match_skills(resume, job, role);
        let base_score = matches.base_score();

        let bonus = self.bonus.compute_bonus(resume);
        let similarity = self.similarity.compute_similarity(resume, job);
        let is_low_quality = self.quality.is_low_quality(resume);
        if is_low_quality {
            info!("Resume text looks incomplete; scoring with low confidence");
        }

        let outcome = self.blender.blend(&BlendInputs {
            base: base_score,
            bonus: bonus.total(),
            similarity,
            resume_text: resume,
            is_low_quality,
            job_text: job,
        })?;

        let recommendations = generate_recommendations(&RecommendationSignals {
            missing_skills: &matches.missing,
            achievement_bonus: bonus.achievement_bonus,
            education_bonus: bonus.education_bonus,
            base_score,
            is_low_quality,
        });

        debug!(
            "Base {} + bonus {} | similarity {} | final {}",
            base_score,
            bonus.total(),
            similarity,
            outcome.overall_score
        );

        let breakdown = ScoreBreakdown {
            detected_role: role.name.clone(),
            weighted_score: matches.weighted_score,
            total_weight: matches.total_weight,
            base_score,
            bonus,
            similarity,
            similarity_backend: self.similarity.name().to_string(),
            uniqueness_factor: outcome.uniqueness_factor,
            skill_score: outcome.skill_score,
            containerization_capped: outcome.containerization_capped,
        };

        let result = AnalysisResult {
            overall_score: outcome.overall_score,
            matched_skills: matches.matched,
            missing_skills: matches.missing,
            recommendations,
            experience_years: bonus.experience_years.max(1),
            low_confidence: is_low_quality,
        };

        Ok(DetailedAnalysis { result, breakdown })
    }
}
