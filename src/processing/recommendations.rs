//! Improvement suggestions derived from intermediate scoring signals

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Priority::High => write!(f, "high"),
            Priority::Medium => write!(f, "medium"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub title: String,
    pub description: String,
    pub impact: u32,
    pub priority: Priority,
}

impl Recommendation {
    fn new(title: &str, description: String, impact: u32, priority: Priority) -> Self {
        Self {
            title: title.to_string(),
            description,
            impact,
            priority,
        }
    }
}

/// The signals each rule looks at.
#[derive(Debug, Clone, Copy)]
pub struct RecommendationSignals<'a> {
    pub missing_skills: &'a [String],
    pub achievement_bonus: u32,
    pub education_bonus: u32,
    pub base_score: i64,
    pub is_low_quality: bool,
}

/// Rules fire independently and append in a fixed order.
pub fn generate_recommendations(signals: &RecommendationSignals<'_>) -> Vec<Recommendation> {
    let mut recommendations = Vec::new();

    if !signals.missing_skills.is_empty() {
        let named: Vec<&str> = signals
            .missing_skills
            .iter()
            .take(3)
            .map(String::as_str)
            .collect();
        recommendations.push(Recommendation::new(
            "Skill Enhancement",
            format!("Focus on adding these missing skills: {}", named.join(", ")),
            15,
            Priority::High,
        ));
    }

    if signals.achievement_bonus < 5 {
        recommendations.push(Recommendation::new(
            "Quantify Achievements",
            "Add measurable results and achievements to strengthen your resume".to_string(),
            10,
            Priority::Medium,
        ));
    }

    if signals.education_bonus < 3 && signals.base_score < 70 {
        recommendations.push(Recommendation::new(
            "Highlight Education",
            "Make your educational qualifications more prominent".to_string(),
            8,
            Priority::Medium,
        ));
    }

    if signals.is_low_quality {
        recommendations.push(Recommendation::new(
            "Improve Extraction Quality",
            "Upload a plain-text (TXT) version of the resume for accurate analysis; PDF and DOC parsing is limited."
                .to_string(),
            20,
            Priority::High,
        ));
    }

    recommendations
}
