//! Resume matcher: score a resume against a job description

use anyhow::{anyhow, Context};
use clap::Parser;
use log::{error, info};
use resume_matcher::cli::{self, Cli, Commands, ConfigAction};
use resume_matcher::input::InputManager;
use resume_matcher::output::formatter::{save_report_to_file, ReportGenerator};
use resume_matcher::output::{ReportMetadata, ScoreReport};
use resume_matcher::{AnalysisInput, Config, ScoringEngine, SkillCatalog};
use std::path::{Path, PathBuf};
use std::process;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {:#}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run_command(cli.command, config, cli.config).await {
        error!("Command failed: {:#}", e);
        process::exit(1);
    }
}

fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    match path {
        Some(path) => Config::load_from(path)
            .with_context(|| format!("reading configuration from {}", path.display())),
        None => Ok(Config::load()?),
    }
}

async fn run_command(
    command: Commands,
    mut config: Config,
    config_path: Option<PathBuf>,
) -> anyhow::Result<()> {
    match command {
        Commands::Score {
            resume,
            job,
            output,
            save,
            detailed,
            similarity,
        } => {
            cli::validate_file_extension(&resume, cli::RESUME_EXTENSIONS)
                .map_err(|e| anyhow!("Resume file: {}", e))?;
            cli::validate_file_extension(&job, cli::JOB_EXTENSIONS)
                .map_err(|e| anyhow!("Job description file: {}", e))?;

            let format = match output {
                Some(output) => cli::parse_output_format(&output).map_err(|e| anyhow!(e))?,
                None => config.output.format,
            };
            if let Some(backend) = similarity {
                config.similarity.backend =
                    cli::parse_similarity_backend(&backend).map_err(|e| anyhow!(e))?;
            }
            let detailed = detailed || config.output.detailed;

            let catalog = SkillCatalog::from_config(&config).context("loading skill catalog")?;
            let engine = ScoringEngine::new(&catalog, &config)?;

            let mut input_manager = InputManager::new();
            let resume_text = input_manager
                .extract_text(&resume)
                .await
                .with_context(|| format!("reading resume {}", resume.display()))?;
            let job_text = input_manager
                .extract_text(&job)
                .await
                .with_context(|| format!("reading job description {}", job.display()))?;
            info!(
                "Loaded resume ({} chars) and job description ({} chars)",
                resume_text.len(),
                job_text.len()
            );

            let metadata = ReportMetadata::new(
                resume.display().to_string(),
                job.display().to_string(),
                engine.similarity_backend(),
                &resume_text,
            );
            let report = match AnalysisInput::new(resume_text, job_text) {
                Ok(input) if detailed => {
                    let (result, breakdown) = engine.analyze_with_breakdown(&input);
                    ScoreReport::with_breakdown(result, breakdown, metadata)
                }
                Ok(input) => ScoreReport::new(engine.analyze(&input), metadata),
                Err(e) => {
                    error!("{}", e);
                    ScoreReport::new(resume_matcher::AnalysisResult::degraded(), metadata)
                }
            };

            let generator = ReportGenerator::new(config.output.color_output, detailed);
            let rendered = generator.generate_report(&report, format)?;
            println!("{}", rendered);

            if let Some(path) = save {
                // Saved reports never carry terminal colour codes.
                let plain = ReportGenerator::new(false, detailed).generate_report(&report, format)?;
                save_report_to_file(&plain, &path)?;
                info!("Report saved to {}", path.display());
            }
        }

        Commands::Skills => {
            let catalog = SkillCatalog::from_config(&config)?;
            println!("Skill dictionary ({} skills)\n", catalog.skill_count());
            for skill in &catalog.skills {
                println!("  {:<20} {}", skill.name, skill.synonyms.join(", "));
            }
        }

        Commands::Roles => {
            let catalog = SkillCatalog::from_config(&config)?;
            println!("Role profiles ({})\n", catalog.roles.len());
            for role in &catalog.roles {
                println!("{}", role.name);
                for (skill, weight) in &role.weights {
                    println!("  {:<20} x{}", skill, weight);
                }
            }
            println!(
                "\nJobs matching no profile use the '{}' profile (every skill weighs 1).",
                resume_matcher::processing::skills::FALLBACK_ROLE
            );
        }

        Commands::Config { action } => {
            let path = config_path.unwrap_or_else(Config::config_path);
            match action {
                Some(ConfigAction::Show) | None => {
                    let content = toml::to_string_pretty(&config)?;
                    println!("# {}\n{}", path.display(), content);
                }
                Some(ConfigAction::Reset) => {
                    Config::default().save_to(&path)?;
                    println!("Configuration reset to defaults at {}", path.display());
                }
                Some(ConfigAction::Path) => {
                    println!("{}", path.display());
                }
            }
        }
    }

    Ok(())
}
