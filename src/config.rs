//! Configuration management for the resume matcher

use crate::error::{Result, ResumeMatcherError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub catalog: CatalogConfig,
    pub scoring: ScoringConfig,
    pub similarity: SimilarityConfig,
    pub output: OutputConfig,
}

/// Where the skill dictionary and role profiles come from.
///
/// When `path` is unset the built-in tables are used.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub skill_weight: f64,
    pub similarity_weight: f64,
    pub uniqueness_weight: f64,
    pub skill_score_floor: i64,
    pub skill_score_ceiling: i64,
    pub low_quality_min_chars: usize,
    pub low_quality_neutral_score: i64,
    pub containerization_cap: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimilarityConfig {
    pub backend: SimilarityBackend,
    pub max_features: usize,
    pub max_df: f64,
    pub ngram_max: usize,
    pub scale: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SimilarityBackend {
    Tfidf,
    Jaccard,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub detailed: bool,
    pub color_output: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Console,
    Json,
    Markdown,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            skill_weight: 0.6,
            similarity_weight: 0.25,
            uniqueness_weight: 0.15,
            skill_score_floor: 45,
            skill_score_ceiling: 95,
            low_quality_min_chars: 200,
            low_quality_neutral_score: 60,
            containerization_cap: 75,
        }
    }
}

impl Default for SimilarityConfig {
    fn default() -> Self {
        Self {
            backend: SimilarityBackend::Tfidf,
            max_features: 3000,
            max_df: 0.95,
            ngram_max: 2,
            scale: 120.0,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Console,
            detailed: false,
            color_output: true,
        }
    }
}

impl Config {
    /// Load the configuration from the default location, writing defaults
    /// there on first use.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            let config = Self::default();
            config.save_to(&config_path)?;
            Ok(config)
        }
    }

    /// Load the configuration from an explicit file. The file must exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content).map_err(|e| {
            ResumeMatcherError::Configuration(format!(
                "Failed to parse config '{}': {}",
                path.display(),
                e
            ))
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self).map_err(|e| {
            ResumeMatcherError::Configuration(format!("Failed to serialize config: {}", e))
        })?;

        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("resume-matcher")
            .join("config.toml")
    }

    /// Reject settings the scoring pipeline cannot work with.
    pub fn validate(&self) -> Result<()> {
        let scoring = &self.scoring;
        if scoring.skill_score_floor > scoring.skill_score_ceiling {
            return Err(ResumeMatcherError::Configuration(format!(
                "scoring.skill_score_floor ({}) exceeds scoring.skill_score_ceiling ({})",
                scoring.skill_score_floor, scoring.skill_score_ceiling
            )));
        }

        let similarity = &self.similarity;
        if similarity.max_features == 0 {
            return Err(ResumeMatcherError::Configuration(
                "similarity.max_features must be at least 1".to_string(),
            ));
        }
        if !(similarity.max_df > 0.0 && similarity.max_df <= 1.0) {
            return Err(ResumeMatcherError::Configuration(format!(
                "similarity.max_df must be in (0, 1], got {}",
                similarity.max_df
            )));
        }
        if similarity.ngram_max == 0 {
            return Err(ResumeMatcherError::Configuration(
                "similarity.ngram_max must be at least 1".to_string(),
            ));
        }

        Ok(())
    }
}
