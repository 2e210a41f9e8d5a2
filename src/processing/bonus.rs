//! Additive resume bonuses: length, experience, education and achievements

use crate::error::Result;
use crate::processing::phrase::{any_found_in, Phrase};
use log::debug;
use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};

/// Bonus awarded when experience is mentioned but no year count can be used.
const FLAT_EXPERIENCE_BONUS: u32 = 3;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BonusBreakdown {
    pub length_bonus: u32,
    pub experience_bonus: u32,
    /// Years parsed from the resume; 0 when none could be determined.
    pub experience_years: u32,
    pub education_bonus: u32,
    pub achievement_bonus: u32,
}

impl BonusBreakdown {
    pub fn total(&self) -> u32 {
        self.length_bonus + self.experience_bonus + self.education_bonus + self.achievement_bonus
    }
}

struct EducationTier {
    bonus: u32,
    phrases: Vec<Phrase>,
}

pub struct BonusScorer {
    experience_forward: Regex,
    experience_reverse: Regex,
    education_tiers: Vec<EducationTier>,
    strong_achievement: Regex,
    weak_achievement: Regex,
}

impl BonusScorer {
    pub fn new() -> Result<Self> {
        let experience_forward =
            RegexBuilder::new(r"(\d+)\+?\s*(?:years?|yrs?)\s*(?:of)?\s*experience")
                .case_insensitive(true)
                .build()?;

        // "experience with 3 years", "experience of 5+ yrs"
        let experience_reverse =
            RegexBuilder::new(r"\bexperience\W+(?:\w+\W+){0,3}?(\d+)\+?\s*(?:years?|yrs?)\b")
                .case_insensitive(true)
                .build()?;

        let tier = |bonus: u32, words: &[&str]| -> Result<EducationTier> {
            Ok(EducationTier {
                bonus,
                phrases: words.iter().map(|w| Phrase::new(w)).collect::<Result<_>>()?,
            })
        };
        let education_tiers = vec![
            tier(8, &["phd", "doctorate"])?,
            tier(6, &["master", "msc", "ms in"])?,
            tier(4, &["bachelor", "bsc", "bs in"])?,
            tier(2, &["degree"])?,
        ];

        let strong_achievement = RegexBuilder::new(
            r"\d+%|\b(?:increased|improved|reduced|saved|delivered|led|managed|created)\b",
        )
        .case_insensitive(true)
        .build()?;

        let weak_achievement =
            RegexBuilder::new(r"\b(?:completed|developed|implemented|designed|built)\b")
                .case_insensitive(true)
                .build()?;

        Ok(Self {
            experience_forward,
            experience_reverse,
            education_tiers,
            strong_achievement,
            weak_achievement,
        })
    }

    pub fn compute_bonus(&self, resume_text: &str) -> BonusBreakdown {
        let (experience_bonus, experience_years) = self.experience_bonus(resume_text);
        let breakdown = BonusBreakdown {
            length_bonus: Self::length_bonus(resume_text),
            experience_bonus,
            experience_years,
            education_bonus: self.education_bonus(resume_text),
            achievement_bonus: self.achievement_bonus(resume_text),
        };

        debug!("Bonus breakdown: {:?} (total {})", breakdown, breakdown.total());
        breakdown
    }

    fn length_bonus(text: &str) -> u32 {
        match text.chars().count() {
            n if n > 1200 => 6,
            n if n > 600 => 3,
            _ => 0,
        }
    }

    /// Returns `(bonus, years)`.
    fn experience_bonus(&self, text: &str) -> (u32, u32) {
        let captured = self
            .experience_forward
            .captures(text)
            .or_else(|| self.experience_reverse.captures(text))
            .and_then(|caps| caps.get(1));

        match captured {
            Some(years) => match years.as_str().parse::<u32>() {
                Ok(years) => {
                    let bonus = match years {
                        y if y > 10 => 10,
                        y if y > 5 => 7,
                        y if y > 2 => 4,
                        _ => 2,
                    };
                    (bonus, years)
                }
                Err(e) => {
                    debug!("Unusable experience figure '{}': {}", years.as_str(), e);
                    (FLAT_EXPERIENCE_BONUS, 0)
                }
            },
            None if text.to_lowercase().contains("experience") => (FLAT_EXPERIENCE_BONUS, 0),
            None => (0, 0),
        }
    }

    /// Highest applicable tier only.
    fn education_bonus(&self, text: &str) -> u32 {
        self.education_tiers
            .iter()
            .find(|tier| any_found_in(&tier.phrases, text))
            .map_or(0, |tier| tier.bonus)
    }

    fn achievement_bonus(&self, text: &str) -> u32 {
        if self.strong_achievement.is_match(text) {
            6
        } else if self.weak_achievement.is_match(text) {
            4
        } else {
            0
        }
    }
}
