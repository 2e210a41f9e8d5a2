//! Integration tests for the resume matcher

use resume_matcher::config::{Config, SimilarityBackend, SimilarityConfig};
use resume_matcher::input::manager::InputManager;
use resume_matcher::output::formatter::ReportGenerator;
use resume_matcher::output::{ReportMetadata, ScoreReport};
use resume_matcher::processing::analyzer::DEGRADED_SCORE;
use resume_matcher::{AnalysisInput, AnalysisResult, ResumeMatcherError, ScoringEngine, SkillCatalog};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

const SCENARIO_RESUME: &str = "I have Python and SQL experience with 3 years in data science";
const SCENARIO_JOB: &str = "We need Python, SQL, and machine learning skills";

fn engine() -> ScoringEngine {
    ScoringEngine::with_defaults().unwrap()
}

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

async fn read_fixture(name: &str) -> String {
    InputManager::new().extract_text(&fixture(name)).await.unwrap()
}

fn assert_well_formed(result: &AnalysisResult) {
    assert!(result.overall_score <= 100);
    assert!(result.experience_years >= 1);
    let matched: HashSet<&String> = result.matched_skills.iter().collect();
    assert!(result.missing_skills.iter().all(|s| !matched.contains(s)));
}

#[tokio::test]
async fn test_text_extraction_from_txt() {
    let text = read_fixture("sample_resume.txt").await;

    assert!(text.contains("John Doe"));
    assert!(text.contains("Software Engineer"));
    assert!(text.contains("React"));
    assert!(text.contains("Node.js"));
}

#[tokio::test]
async fn test_text_extraction_from_markdown() {
    let text = read_fixture("sample_resume.md").await;

    assert!(text.contains("John Doe"));
    assert!(text.contains("Software Engineer"));
    assert!(text.contains("React"));
    assert!(text.contains("Node.js"));
    assert!(!text.contains("**"));
    assert!(!text.contains("##"));
}

#[tokio::test]
async fn test_caching_functionality() {
    let mut manager = InputManager::new();
    let path = fixture("sample_resume.txt");

    let text1 = manager.extract_text(&path).await.unwrap();
    assert_eq!(manager.cache_size(), 1);

    let text2 = manager.extract_text(&path).await.unwrap();
    assert_eq!(text1, text2);
    assert_eq!(manager.cache_size(), 1);
}

#[tokio::test]
async fn test_unsupported_file_type() {
    let mut manager = InputManager::new();
    let result = manager.extract_text(&fixture("unsupported.xyz")).await;

    assert!(matches!(result, Err(ResumeMatcherError::UnsupportedFormat(_))));
}

#[tokio::test]
async fn test_nonexistent_file() {
    let mut manager = InputManager::new();
    let result = manager.extract_text(&fixture("nonexistent.txt")).await;

    assert!(matches!(result, Err(ResumeMatcherError::InvalidInput(_))));
}

#[test]
fn test_scenario_short_resume() {
    let input = AnalysisInput::new(SCENARIO_RESUME, SCENARIO_JOB).unwrap();
    let detailed = engine().analyze_detailed(&input).unwrap();
    let result = &detailed.result;

    assert!(result.matched_skills.contains(&"Python".to_string()));
    assert!(result.matched_skills.contains(&"Sql".to_string()));
    assert!(result.missing_skills.contains(&"Machine Learning".to_string()));
    assert_eq!(result.experience_years, 3);
    assert!(result.low_confidence);

    // Low-confidence resumes score on a neutral skill value of 60 with no
    // uniqueness contribution.
    let expected = (0.6 * 60.0 + 0.25 * f64::from(detailed.breakdown.similarity)).round() as u8;
    assert_eq!(result.overall_score, expected);
    assert!(result
        .recommendations
        .iter()
        .any(|r| r.title == "Improve Extraction Quality"));
}

#[test]
fn test_scenario_padded_resume() {
    let padded = format!(
        "{}. Built reporting pipelines, cleaned messy inputs and presented results \
         to product teams every quarter. Worked closely with finance and \
         operations on forecasting, planning and experimentation.",
        SCENARIO_RESUME
    );
    assert!(padded.chars().count() > 200);

    let input = AnalysisInput::new(padded, SCENARIO_JOB).unwrap();
    let detailed = engine().analyze_detailed(&input).unwrap();

    assert!(!detailed.result.low_confidence);
    assert!((45..=95).contains(&detailed.breakdown.skill_score));
    assert!(!detailed.breakdown.containerization_capped);
    assert_well_formed(&detailed.result);
}

#[tokio::test]
async fn test_fixture_resume_against_data_science_job() {
    let resume = read_fixture("sample_resume.txt").await;
    let job = read_fixture("job_data_scientist.md").await;

    let input = AnalysisInput::new(resume, job).unwrap();
    let detailed = engine().analyze_detailed(&input).unwrap();
    let result = &detailed.result;

    assert_eq!(detailed.breakdown.detected_role, "data_scientist");
    for skill in ["Python", "Sql", "Git"] {
        assert!(result.matched_skills.contains(&skill.to_string()), "{skill} should match");
    }
    for skill in ["Machine Learning", "Pandas", "Numpy", "Tensorflow"] {
        assert!(result.missing_skills.contains(&skill.to_string()), "{skill} should be missing");
    }
    assert_eq!(result.experience_years, 5);
    assert!(!result.low_confidence);
    assert_well_formed(result);
}

#[tokio::test]
async fn test_containerization_cap() {
    let resume = read_fixture("sample_resume.txt").await;
    let job = read_fixture("job_devops.txt").await;
    assert!(!resume.to_lowercase().contains("docker"));

    let input = AnalysisInput::new(resume, job).unwrap();
    let detailed = engine().analyze_detailed(&input).unwrap();

    assert_eq!(detailed.breakdown.detected_role, "devops");
    assert!(!detailed.result.low_confidence);
    assert!(detailed.result.overall_score <= 75);
    assert!(detailed.result.missing_skills.contains(&"Docker".to_string()));
}

#[test]
fn test_job_without_catalog_skills() {
    let resume = "Barista with six years behind the counter, trained new staff and \
                  ran the morning shift at a busy downtown cafe. Handled stock \
                  ordering, opening and closing, and customer complaints with calm.";
    let job = "We are looking for a friendly barista who loves coffee";

    let input = AnalysisInput::new(resume, job).unwrap();
    let detailed = engine().analyze_detailed(&input).unwrap();

    assert_eq!(detailed.breakdown.detected_role, "general");
    assert_eq!(detailed.breakdown.base_score, 60);
    assert_eq!(detailed.breakdown.total_weight, 0.0);
    assert!(detailed.result.matched_skills.is_empty());
    assert!(detailed.result.missing_skills.is_empty());
}

#[test]
fn test_scores_are_bounded_and_idempotent() {
    let engine = engine();
    let long_resume = "Python developer with 12 years of experience. PhD in physics. \
                       Increased throughput by 300%. Docker, Kubernetes, AWS, Jenkins. "
        .repeat(20);
    let pairs = [
        (SCENARIO_RESUME.to_string(), SCENARIO_JOB),
        (long_resume.clone(), "DevOps role: Docker, Kubernetes, AWS, CI/CD"),
        (long_resume, "Frontend: React, Angular, CSS and HTML"),
        ("x".to_string(), "y"),
    ];

    for (resume, job) in &pairs {
        let first = engine.analyze_texts(resume, job);
        let second = engine.analyze_texts(resume, job);
        assert_eq!(first, second);
        assert_well_formed(&first);
    }
}

#[test]
fn test_engine_shared_across_threads() {
    let engine = Arc::new(engine());
    let expected = engine.analyze_texts(SCENARIO_RESUME, SCENARIO_JOB);

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let engine = Arc::clone(&engine);
            std::thread::spawn(move || engine.analyze_texts(SCENARIO_RESUME, SCENARIO_JOB))
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}

#[tokio::test]
async fn test_unreadable_pdf_scores_with_low_confidence() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("jane_doe.pdf");
    std::fs::write(&path, b"%PDF-1.4 truncated").unwrap();

    let resume = InputManager::new().extract_text(&path).await.unwrap();
    assert!(resume.starts_with("Resume: jane doe"));

    // Pad past the length threshold so only the marker flags it.
    let padded = format!("{}\n{}", resume, "Python and SQL developer. ".repeat(20));
    let result = engine().analyze_texts(&padded, SCENARIO_JOB);

    assert!(result.low_confidence);
    assert!(result
        .recommendations
        .iter()
        .any(|r| r.title == "Improve Extraction Quality"));
}

fn write_docx(path: &Path, text: &str) {
    use std::io::Write;

    let body: String = text
        .lines()
        .map(|line| {
            let line = line.replace('&', "&amp;").replace('<', "&lt;");
            format!("<w:p><w:r><w:t>{}</w:t></w:r></w:p>", line)
        })
        .collect();
    let xml = format!(
        "<w:document xmlns:w=\"http://schemas.openxmlformats.org/wordprocessingml/2006/main\">\
         <w:body>{}</w:body></w:document>",
        body
    );

    let mut zip = zip::ZipWriter::new(std::fs::File::create(path).unwrap());
    zip.start_file("word/document.xml", zip::write::FileOptions::default())
        .unwrap();
    zip.write_all(xml.as_bytes()).unwrap();
    zip.finish().unwrap();
}

#[tokio::test]
async fn test_docx_resume_scores_like_text() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("john_doe.docx");
    write_docx(&path, &read_fixture("sample_resume.txt").await);

    let resume = InputManager::new().extract_text(&path).await.unwrap();
    assert!(resume.starts_with("John Doe\nSoftware Engineer"));

    let job = read_fixture("job_data_scientist.md").await;
    let result = engine().analyze_texts(&resume, &job);

    for skill in ["Python", "Sql", "Git"] {
        assert!(result.matched_skills.contains(&skill.to_string()), "{skill} should match");
    }
    assert_eq!(result.experience_years, 5);
    assert!(!result.low_confidence);
    assert_well_formed(&result);
}

#[tokio::test]
async fn test_broken_docx_scores_with_low_confidence() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("jane_doe.docx");
    std::fs::write(&path, b"PK\x03\x04 truncated").unwrap();

    let resume = InputManager::new().extract_text(&path).await.unwrap();
    assert!(resume.contains("DOCX text extraction yielded low content"));

    let padded = format!("{}\n{}", resume, "Python and SQL developer. ".repeat(20));
    let result = engine().analyze_texts(&padded, SCENARIO_JOB);
    assert!(result.low_confidence);
}

#[test]
fn test_empty_input_degrades() {
    let result = engine().analyze_texts("   ", SCENARIO_JOB);

    assert_eq!(result.overall_score, DEGRADED_SCORE);
    assert_eq!(result.experience_years, 1);
    assert!(result.low_confidence);
    assert_eq!(result.recommendations.len(), 1);
    assert_eq!(result.recommendations[0].title, "Error Recovery");
}

#[test]
fn test_jaccard_backend() {
    let config = Config {
        similarity: SimilarityConfig {
            backend: SimilarityBackend::Jaccard,
            ..SimilarityConfig::default()
        },
        ..Config::default()
    };
    let engine = ScoringEngine::new(&SkillCatalog::default(), &config).unwrap();
    assert_eq!(engine.similarity_backend(), "jaccard");

    let text = "Python engineer shipping SQL reporting services";
    let input = AnalysisInput::new(text, text).unwrap();
    let detailed = engine.analyze_detailed(&input).unwrap();

    assert_eq!(detailed.breakdown.similarity_backend, "jaccard");
    assert_eq!(detailed.breakdown.similarity, 100);
}

#[tokio::test]
async fn test_custom_catalog_from_config() {
    let config = Config {
        catalog: resume_matcher::config::CatalogConfig {
            path: Some(fixture("catalog.toml")),
        },
        ..Config::default()
    };
    let catalog = SkillCatalog::from_config(&config).unwrap();
    assert_eq!(catalog.skill_count(), 3);

    let engine = ScoringEngine::new(&catalog, &config).unwrap();
    let resume = read_fixture("sample_resume.txt").await;
    let job = "Systems engineer writing Rust services on Tokio, backed by Postgres";
    let detailed = engine
        .analyze_detailed(&AnalysisInput::new(resume, job).unwrap())
        .unwrap();

    assert_eq!(detailed.breakdown.detected_role, "systems");
    assert_eq!(detailed.result.matched_skills, vec!["Postgres".to_string()]);
    assert_eq!(
        detailed.result.missing_skills,
        vec!["Rust".to_string(), "Tokio".to_string()]
    );
    // 1 of 6 weight: 40 + 60 / 6
    assert_eq!(detailed.breakdown.base_score, 50);
}

#[test]
fn test_invalid_catalog_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("catalog.toml");
    std::fs::write(
        &path,
        "[[skills]]\nname = \"go\"\nsynonyms = [\"go\"]\n\n[[skills]]\nname = \"Go\"\nsynonyms = [\"golang\"]\n",
    )
    .unwrap();

    assert!(matches!(
        SkillCatalog::from_file(&path),
        Err(ResumeMatcherError::Catalog(_))
    ));
}

#[tokio::test]
async fn test_report_rendering_end_to_end() {
    let resume_path = fixture("sample_resume.md");
    let job_path = fixture("job_data_scientist.md");
    let mut manager = InputManager::new();
    let resume = manager.extract_text(&resume_path).await.unwrap();
    let job = manager.extract_text(&job_path).await.unwrap();

    let engine = engine();
    let metadata = ReportMetadata::new(
        resume_path.display().to_string(),
        job_path.display().to_string(),
        engine.similarity_backend(),
        &resume,
    );
    let input = AnalysisInput::new(resume, job).unwrap();
    let (result, breakdown) = engine.analyze_with_breakdown(&input);
    assert!(breakdown.is_some());
    let report = ScoreReport::with_breakdown(result, breakdown, metadata);

    let generator = ReportGenerator::new(false, false);
    let json = generator
        .generate_report(&report, resume_matcher::config::OutputFormat::Json)
        .unwrap();
    let parsed: AnalysisResult = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, report.result);

    let markdown = generator
        .generate_report(&report, resume_matcher::config::OutputFormat::Markdown)
        .unwrap();
    assert!(markdown.contains("**Resume:** `sample_resume.md`"));
    assert!(!markdown.contains("## Score Breakdown"));
}
