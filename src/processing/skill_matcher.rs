//! Weighted skill matching between resume and job description

use crate::error::Result;
use crate::processing::phrase::{any_found_in, Phrase};
use crate::processing::skills::{RoleProfile, SkillCatalog};
use log::debug;
use serde::{Deserialize, Serialize};

/// Base score when the job text names no dictionary skill.
pub const NEUTRAL_BASE_SCORE: i64 = 60;

struct CompiledSkill {
    name: String,
    synonyms: Vec<Phrase>,
}

/// Outcome of matching the dictionary against both documents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub matched: Vec<String>,
    pub missing: Vec<String>,
    pub weighted_score: f64,
    pub total_weight: f64,
}

impl MatchResult {
    /// `40 + 60 * weighted/total`, truncated; 60 when nothing was required.
    pub fn base_score(&self) -> i64 {
        if self.total_weight > 0.0 {
            (40.0 + 60.0 * (self.weighted_score / self.total_weight)) as i64
        } else {
            NEUTRAL_BASE_SCORE
        }
    }
}

pub struct SkillMatcher {
    skills: Vec<CompiledSkill>,
}

impl SkillMatcher {
    pub fn new(catalog: &SkillCatalog) -> Result<Self> {
        let skills = catalog
            .skills
            .iter()
            .map(|entry| {
                let synonyms = entry
                    .synonyms
                    .iter()
                    .map(|s| Phrase::new(s))
                    .collect::<Result<Vec<_>>>()?;
                Ok(CompiledSkill {
                    name: entry.name.clone(),
                    synonyms,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { skills })
    }

    /// Walk the dictionary in declared order. Skills the job text never
    /// mentions are ignored; the rest land in `matched` or `missing` and
    /// contribute their role weight.
    pub fn match_skills(&self, resume_text: &str, job_text: &str, role: &RoleProfile) -> MatchResult {
        let mut result = MatchResult {
            matched: Vec::new(),
            missing: Vec::new(),
            weighted_score: 0.0,
            total_weight: 0.0,
        };

        for skill in &self.skills {
            if !any_found_in(&skill.synonyms, job_text) {
                continue;
            }

            let weight = f64::from(role.weight_of(&skill.name));
            result.total_weight += weight;

            if any_found_in(&skill.synonyms, resume_text) {
                result.matched.push(title_case(&skill.name));
                result.weighted_score += weight;
            } else {
                result.missing.push(title_case(&skill.name));
            }
        }

        debug!(
            "Skill match for role '{}': {}/{} weight, {} matched, {} missing",
            role.name,
            result.weighted_score,
            result.total_weight,
            result.matched.len(),
            result.missing.len()
        );

        result
    }
}

/// Uppercase the first letter of every alphabetic run and lowercase the rest:
/// `sql` → `Sql`, `power bi` → `Power Bi`, `c++` → `C++`.
pub fn title_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut prev_alpha = false;

    for c in name.chars() {
        if c.is_alphabetic() {
            if prev_alpha {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(c);
            prev_alpha = false;
        }
    }

    out
}
