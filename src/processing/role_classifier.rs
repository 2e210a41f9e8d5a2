//! Job-role detection from the job description

use crate::error::Result;
use crate::processing::phrase::Phrase;
use crate::processing::skills::{RoleProfile, SkillCatalog, FALLBACK_ROLE};
use log::debug;

struct CompiledRole {
    profile: RoleProfile,
    phrases: Vec<Phrase>,
}

/// Picks the role profile whose skills the job description mentions most.
pub struct RoleClassifier {
    roles: Vec<CompiledRole>,
    fallback: RoleProfile,
}

impl RoleClassifier {
    pub fn new(catalog: &SkillCatalog) -> Result<Self> {
        let roles = catalog
            .roles
            .iter()
            .map(|profile| {
                let phrases = profile
                    .weights
                    .keys()
                    .map(|skill| Phrase::new(skill))
                    .collect::<Result<Vec<_>>>()?;
                Ok(CompiledRole {
                    profile: profile.clone(),
                    phrases,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            roles,
            fallback: RoleProfile::uniform(FALLBACK_ROLE),
        })
    }

    /// Number of the role's skill names present in the job text.
    fn hits(role: &CompiledRole, job_text: &str) -> usize {
        role.phrases.iter().filter(|p| p.is_found_in(job_text)).count()
    }

    /// Role with the most skill hits; the first profile wins ties. Falls back
    /// to the uniform `general` profile when nothing hits.
    pub fn detect_role(&self, job_text: &str) -> &RoleProfile {
        let mut best: Option<(&CompiledRole, usize)> = None;

        for role in &self.roles {
            let hits = Self::hits(role, job_text);
            debug!("Role '{}' scored {} hits", role.profile.name, hits);
            if hits > 0 && best.map_or(true, |(_, top)| hits > top) {
                best = Some((role, hits));
            }
        }

        match best {
            Some((role, _)) => &role.profile,
            None => &self.fallback,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classifier() -> RoleClassifier {
        RoleClassifier::new(&SkillCatalog::default()).unwrap()
    }

    #[test]
    fn test_detects_data_scientist() {
        let classifier = classifier();
        let role = classifier.detect_role("We need Python, SQL, and machine learning skills");
        assert_eq!(role.name, "data_scientist");
        assert_eq!(role.weight_of("python"), 3);
    }

    #[test]
    fn test_detects_devops() {
        let classifier = classifier();
        let role = classifier
            .detect_role("Run Docker and Kubernetes on AWS, maintain Jenkins and CI/CD pipelines");
        assert_eq!(role.name, "devops");
    }

    #[test]
    fn test_detects_frontend() {
        let classifier = classifier();
        let role = classifier.detect_role("Build UIs in React and Vue with HTML and CSS");
        assert_eq!(role.name, "frontend");
    }

    #[test]
    fn test_tie_goes_to_first_profile() {
        // python + sql hit data_scientist, software_engineer, backend and
        // data_analyst equally; data_scientist is declared first.
        let classifier = classifier();
        let role = classifier.detect_role("python and sql");
        assert_eq!(role.name, "data_scientist");
    }

    #[test]
    fn test_fallback_when_no_hits() {
        let classifier = classifier();
        let role = classifier.detect_role("Friendly barista wanted for the morning shift");
        assert_eq!(role.name, FALLBACK_ROLE);
        assert!(role.weights.is_empty());
    }
}
