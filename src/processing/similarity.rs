//! Lexical similarity between resume and job description
//!
//! Backends report a ratio in [0, 1]; the shared scaling maps it to an
//! integer percentage that saturates before a perfect match.

use crate::config::{SimilarityBackend, SimilarityConfig};
use crate::error::Result;
use crate::processing::text_processor::TextProcessor;
use crate::processing::tfidf::{cosine_similarity, TfidfVectorizer};
use log::{debug, warn};

pub trait SimilarityScorer: Send + Sync {
    fn name(&self) -> &'static str;

    /// Multiplier applied to the ratio before clamping to [0, 100].
    fn scale(&self) -> f64;

    fn similarity_ratio(&self, resume_text: &str, job_text: &str) -> Result<f64>;

    /// Percentage score; any failure degrades to 0.
    fn compute_similarity(&self, resume_text: &str, job_text: &str) -> u8 {
        match self.similarity_ratio(resume_text, job_text) {
            Ok(ratio) => {
                let score = scale_ratio(ratio, self.scale());
                debug!("{} similarity ratio {:.4} -> {}", self.name(), ratio, score);
                score
            }
            Err(e) => {
                warn!("{} similarity unavailable, scoring 0: {}", self.name(), e);
                0
            }
        }
    }
}

/// `trunc(ratio * scale)` clamped to [0, 100]; non-finite ratios give 0.
pub fn scale_ratio(ratio: f64, scale: f64) -> u8 {
    let scaled = ratio * scale;
    if !scaled.is_finite() {
        return 0;
    }
    scaled.trunc().clamp(0.0, 100.0) as u8
}

/// Cosine similarity of TF-IDF vectors fitted on {job, resume}. A fresh
/// vectorizer is built for every call.
pub struct TfidfSimilarity {
    config: SimilarityConfig,
}

impl TfidfSimilarity {
    pub fn new(config: SimilarityConfig) -> Self {
        Self { config }
    }
}

impl Default for TfidfSimilarity {
    fn default() -> Self {
        Self::new(SimilarityConfig::default())
    }
}

impl SimilarityScorer for TfidfSimilarity {
    fn name(&self) -> &'static str {
        "tfidf"
    }

    fn scale(&self) -> f64 {
        self.config.scale
    }

    fn similarity_ratio(&self, resume_text: &str, job_text: &str) -> Result<f64> {
        let vectorizer = TfidfVectorizer::new(
            self.config.max_features,
            self.config.max_df,
            self.config.ngram_max,
        )?;
        let matrix = vectorizer.fit_transform(&[job_text, resume_text])?;
        Ok(cosine_similarity(&matrix.rows[0], &matrix.rows[1]))
    }
}

/// Token-set overlap; needs no vector model.
pub struct JaccardSimilarity {
    processor: TextProcessor,
    scale: f64,
}

impl JaccardSimilarity {
    pub fn new(scale: f64) -> Self {
        Self {
            processor: TextProcessor::new(),
            scale,
        }
    }
}

impl Default for JaccardSimilarity {
    fn default() -> Self {
        Self::new(SimilarityConfig::default().scale)
    }
}

impl SimilarityScorer for JaccardSimilarity {
    fn name(&self) -> &'static str {
        "jaccard"
    }

    fn scale(&self) -> f64 {
        self.scale
    }

    fn similarity_ratio(&self, resume_text: &str, job_text: &str) -> Result<f64> {
        Ok(self.processor.jaccard_similarity(resume_text, job_text))
    }
}

/// Scorer selected by the configuration.
pub fn scorer_from_config(config: &SimilarityConfig) -> Box<dyn SimilarityScorer> {
    match config.backend {
        SimilarityBackend::Tfidf => Box::new(TfidfSimilarity::new(config.clone())),
        SimilarityBackend::Jaccard => Box::new(JaccardSimilarity::new(config.scale)),
    }
}

/// Similarity percentage with the default TF-IDF settings.
pub fn compute_similarity(resume_text: &str, job_text: &str) -> u8 {
    TfidfSimilarity::default().compute_similarity(resume_text, job_text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scale_ratio() {
        assert_eq!(scale_ratio(0.0, 120.0), 0);
        assert_eq!(scale_ratio(0.5, 120.0), 60);
        assert_eq!(scale_ratio(0.84, 120.0), 100);
        assert_eq!(scale_ratio(1.0, 120.0), 100);
        assert_eq!(scale_ratio(-0.2, 120.0), 0);
        assert_eq!(scale_ratio(f64::NAN, 120.0), 0);
    }

    #[test]
    fn test_default_tfidf_prunes_shared_vocabulary() {
        // With two documents and max_df 0.95 every shared term is dropped,
        // leaving the vectors orthogonal.
        assert_eq!(
            compute_similarity("python sql developer", "python java developer"),
            0
        );
    }

    #[test]
    fn test_tfidf_without_df_pruning_rewards_overlap() {
        let scorer = TfidfSimilarity::new(SimilarityConfig {
            max_df: 1.0,
            ..SimilarityConfig::default()
        });
        let close = scorer.compute_similarity(
            "python developer building data pipelines",
            "python developer for data pipelines",
        );
        let far = scorer.compute_similarity("barista latte art", "python developer for data pipelines");
        assert!(close > far);
        assert_eq!(far, 0);
    }

    #[test]
    fn test_degenerate_input_scores_zero() {
        assert_eq!(compute_similarity("the and", "of a"), 0);
    }

    #[test]
    fn test_jaccard_backend() {
        let scorer = JaccardSimilarity::default();
        assert_eq!(scorer.compute_similarity("python sql", "python sql"), 100);
        // 1/3 overlap * 120, truncated
        let partial = scorer.compute_similarity("python sql", "python java");
        assert!((39..=40).contains(&partial));
    }

    #[test]
    fn test_scorer_from_config() {
        let config = SimilarityConfig {
            backend: SimilarityBackend::Jaccard,
            ..SimilarityConfig::default()
        };
        assert_eq!(scorer_from_config(&config).name(), "jaccard");
        assert_eq!(scorer_from_config(&SimilarityConfig::default()).name(), "tfidf");
    }
}
