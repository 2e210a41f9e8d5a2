//! Skill dictionary and role profiles
//!
//! The catalog is plain data: built-in defaults, or a TOML file named in the
//! configuration. It is loaded once and handed to the scoring engine by
//! reference.

use crate::error::{Result, ResumeMatcherError};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::path::Path;

/// Role assigned when no profile has any hits in the job description.
pub const FALLBACK_ROLE: &str = "general";

/// A canonical skill and the surface forms that count as mentioning it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillEntry {
    pub name: String,
    pub synonyms: Vec<String>,
}

/// Per-role skill importance. Skills missing from `weights` weigh 1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleProfile {
    pub name: String,
    #[serde(default)]
    pub weights: BTreeMap<String, u32>,
}

impl RoleProfile {
    /// Profile with no explicit weights, so every skill counts once.
    pub fn uniform(name: &str) -> Self {
        Self {
            name: name.to_string(),
            weights: BTreeMap::new(),
        }
    }

    pub fn weight_of(&self, skill: &str) -> u32 {
        self.weights.get(skill).copied().unwrap_or(1)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillCatalog {
    pub skills: Vec<SkillEntry>,
    #[serde(default)]
    pub roles: Vec<RoleProfile>,
}

impl Default for SkillCatalog {
    fn default() -> Self {
        Self {
            skills: default_skills(),
            roles: default_roles(),
        }
    }
}

impl SkillCatalog {
    /// Load a catalog from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content).map_err(|e| match e {
            ResumeMatcherError::Catalog(msg) => {
                ResumeMatcherError::Catalog(format!("{}: {}", path.display(), msg))
            }
            other => other,
        })
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let catalog: SkillCatalog = toml::from_str(content)
            .map_err(|e| ResumeMatcherError::Catalog(format!("Failed to parse catalog: {}", e)))?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// The catalog named by the configuration, or the built-in one.
    pub fn from_config(config: &crate::config::Config) -> Result<Self> {
        match &config.catalog.path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for skill in &self.skills {
            let key = skill.name.trim().to_lowercase();
            if key.is_empty() {
                return Err(ResumeMatcherError::Catalog(
                    "skill with an empty name".to_string(),
                ));
            }
            if !seen.insert(key) {
                return Err(ResumeMatcherError::Catalog(format!(
                    "duplicate skill '{}'",
                    skill.name
                )));
            }
            if skill.synonyms.iter().all(|s| s.trim().is_empty()) {
                return Err(ResumeMatcherError::Catalog(format!(
                    "skill '{}' has no usable synonyms",
                    skill.name
                )));
            }
        }

        let mut role_names = HashSet::new();
        for role in &self.roles {
            if !role_names.insert(role.name.as_str()) {
                return Err(ResumeMatcherError::Catalog(format!(
                    "duplicate role '{}'",
                    role.name
                )));
            }
            if let Some((skill, _)) = role.weights.iter().find(|(_, w)| **w == 0) {
                return Err(ResumeMatcherError::Catalog(format!(
                    "role '{}' gives skill '{}' a zero weight",
                    role.name, skill
                )));
            }
        }

        Ok(())
    }

    pub fn skill_count(&self) -> usize {
        self.skills.len()
    }

    pub fn find_role(&self, name: &str) -> Option<&RoleProfile> {
        self.roles.iter().find(|r| r.name == name)
    }
}

fn entry(name: &str, synonyms: &[&str]) -> SkillEntry {
    SkillEntry {
        name: name.to_string(),
        synonyms: synonyms.iter().map(|s| s.to_string()).collect(),
    }
}

fn role(name: &str, weights: &[(&str, u32)]) -> RoleProfile {
    RoleProfile {
        name: name.to_string(),
        weights: weights
            .iter()
            .map(|(skill, weight)| (skill.to_string(), *weight))
            .collect(),
    }
}

/// Built-in skill dictionary, in matching order.
fn default_skills() -> Vec<SkillEntry> {
    vec![
        entry("python", &["python", "py", "python3"]),
        entry("sql", &["sql", "mysql", "postgresql", "database", "oracle", "nosql"]),
        entry(
            "machine learning",
            &["machine learning", "ml", "ai", "artificial intelligence", "deep learning"],
        ),
        entry(
            "data analysis",
            &["data analysis", "analytics", "data science", "data mining", "statistical analysis"],
        ),
        entry("pandas", &["pandas", "pd"]),
        entry("numpy", &["numpy", "np"]),
        entry("excel", &["excel", "spreadsheet", "microsoft excel"]),
        entry("git", &["git", "github", "version control", "gitlab"]),
        entry("aws", &["aws", "amazon web services", "cloud", "s3", "ec2", "lambda"]),
        entry("tensorflow", &["tensorflow", "tf", "keras"]),
        entry("docker", &["docker", "container", "kubernetes", "containerization"]),
        entry("java", &["java", "j2ee", "spring", "hibernate"]),
        entry("javascript", &["javascript", "js", "node.js", "react", "angular", "vue"]),
        entry("c++", &["c++", "cpp", "c plus plus"]),
        entry("c#", &["c#", "csharp", ".net", "dotnet"]),
        entry("php", &["php", "laravel", "symfony"]),
        entry("ruby", &["ruby", "rails", "ruby on rails"]),
        entry("scala", &["scala", "spark"]),
        entry("r", &["r programming", "r language", "r"]),
        entry("tableau", &["tableau", "data visualization"]),
        entry("power bi", &["power bi", "powerbi", "business intelligence"]),
        entry("hadoop", &["hadoop", "big data", "spark", "hive"]),
        entry("devops", &["devops", "ci/cd", "jenkins", "continuous integration"]),
        entry("agile", &["agile", "scrum", "kanban", "jira"]),
    ]
}

/// Built-in role profiles, in detection order.
fn default_roles() -> Vec<RoleProfile> {
    vec![
        role(
            "data_scientist",
            &[
                ("python", 3),
                ("machine learning", 3),
                ("sql", 2),
                ("pandas", 2),
                ("numpy", 2),
                ("tensorflow", 2),
                ("aws", 1),
                ("git", 1),
            ],
        ),
        role(
            "software_engineer",
            &[
                ("java", 2),
                ("javascript", 2),
                ("python", 2),
                ("sql", 1),
                ("git", 2),
                ("aws", 1),
                ("docker", 1),
                ("agile", 1),
            ],
        ),
        role(
            "devops",
            &[
                ("aws", 3),
                ("docker", 3),
                ("kubernetes", 3),
                ("git", 2),
                ("devops", 2),
                ("ci/cd", 2),
                ("jenkins", 2),
                ("python", 1),
            ],
        ),
        role(
            "frontend",
            &[
                ("javascript", 3),
                ("react", 2),
                ("angular", 2),
                ("vue", 2),
                ("html", 1),
                ("css", 1),
                ("git", 1),
            ],
        ),
        role(
            "backend",
            &[
                ("java", 2),
                ("python", 2),
                ("c#", 2),
                ("sql", 2),
                ("aws", 1),
                ("docker", 1),
                ("git", 1),
            ],
        ),
        role(
            "data_analyst",
            &[
                ("sql", 3),
                ("excel", 2),
                ("python", 2),
                ("tableau", 2),
                ("power bi", 2),
                ("pandas", 1),
                ("numpy", 1),
            ],
        ),
    ]
}
