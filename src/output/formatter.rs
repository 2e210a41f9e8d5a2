//! Output formatters: console, JSON and Markdown renderings of a score report

use crate::config::OutputFormat;
use crate::error::{Result, ResumeMatcherError};
use crate::output::report::ScoreReport;
use crate::processing::recommendations::{Priority, Recommendation};
use colored::{Color, Colorize};
use std::path::Path;

pub trait OutputFormatter {
    fn format_report(&self, report: &ScoreReport) -> Result<String>;
    fn supports_format(&self) -> OutputFormat;
}

/// Human-readable terminal output
pub struct ConsoleFormatter {
    use_colors: bool,
    detailed: bool,
}

/// JSON output. Emits the bare analysis result unless `detailed` is set,
/// in which case the whole report is serialized.
pub struct JsonFormatter {
    pretty: bool,
    detailed: bool,
}

pub struct MarkdownFormatter {
    include_metadata: bool,
    detailed: bool,
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool, detailed: bool) -> Self {
        Self { use_colors, detailed }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str, level: u8) -> String {
        let prefix = match level {
            1 => "█",
            2 => "▓",
            _ => "▒",
        };
        let color = match level {
            1 => Color::Blue,
            2 => Color::Green,
            _ => Color::Yellow,
        };

        if self.use_colors {
            format!("\n{} {}\n", prefix.color(color).bold(), title.color(color).bold())
        } else {
            format!("\n{} {}\n", prefix, title)
        }
    }

    fn format_score_badge(&self, score: u8) -> String {
        let (badge, color) = score_band(score);
        if self.use_colors {
            format!("[{}]", badge.color(color).bold())
        } else {
            format!("[{}]", badge)
        }
    }

    fn format_priority(&self, priority: Priority) -> String {
        match priority {
            Priority::High => self.colorize("[HIGH]", Color::Red),
            Priority::Medium => self.colorize("[MEDIUM]", Color::Yellow),
        }
    }
}

fn score_band(score: u8) -> (&'static str, Color) {
    match score {
        80..=100 => ("STRONG", Color::Green),
        65..=79 => ("GOOD", Color::BrightGreen),
        50..=64 => ("PARTIAL", Color::Yellow),
        _ => ("WEAK", Color::Red),
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_report(&self, report: &ScoreReport) -> Result<String> {
        let result = &report.result;
        let mut output = String::new();

        output.push_str(&self.format_header("RESUME MATCH ANALYSIS", 1));
        output.push_str(&format!(
            "Generated: {} | Similarity: {}\n",
            report.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
            report.metadata.similarity_backend
        ));

        output.push_str(&self.format_header("Summary", 2));
        output.push_str(&format!(
            "Overall Score: {}% {}\n",
            result.overall_score,
            self.format_score_badge(result.overall_score)
        ));
        output.push_str(&format!("Verdict: {}\n", self.colorize(report.verdict(), Color::Cyan)));
        output.push_str(&format!("Experience: {} year(s)\n", result.experience_years));
        if result.low_confidence {
            output.push_str(&format!(
                "{}\n",
                self.colorize(
                    "Low confidence: the resume text looks incomplete or placeholder-like",
                    Color::Yellow
                )
            ));
        }

        if !result.matched_skills.is_empty() {
            output.push_str(&self.format_header("Matched Skills", 3));
            for skill in &result.matched_skills {
                output.push_str(&format!("  + {}\n", self.colorize(skill, Color::Green)));
            }
        }

        if !result.missing_skills.is_empty() {
            output.push_str(&self.format_header("Missing Skills", 3));
            for skill in &result.missing_skills {
                output.push_str(&format!("  - {}\n", self.colorize(skill, Color::Red)));
            }
        }

        if !result.recommendations.is_empty() {
            output.push_str(&self.format_header("Recommendations", 2));
            for (i, rec) in result.recommendations.iter().enumerate() {
                output.push_str(&format!(
                    "{}. {} {} (impact +{})\n   {}\n",
                    i + 1,
                    self.format_priority(rec.priority),
                    rec.title,
                    rec.impact,
                    rec.description
                ));
            }
        }

        if self.detailed {
            if let Some(breakdown) = &report.breakdown {
                output.push_str(&self.format_header("Score Breakdown", 2));
                output.push_str(&format!("Detected role: {}\n", breakdown.detected_role));
                output.push_str(&format!(
                    "Weighted skills: {:.0}/{:.0} -> base {}\n",
                    breakdown.weighted_score, breakdown.total_weight, breakdown.base_score
                ));
                output.push_str(&format!(
                    "Bonus: {} (length {}, experience {}, education {}, achievements {})\n",
                    breakdown.bonus.total(),
                    breakdown.bonus.length_bonus,
                    breakdown.bonus.experience_bonus,
                    breakdown.bonus.education_bonus,
                    breakdown.bonus.achievement_bonus
                ));
                output.push_str(&format!("Skill score: {}\n", breakdown.skill_score));
                output.push_str(&format!(
                    "Similarity ({}): {}\n",
                    breakdown.similarity_backend, breakdown.similarity
                ));
                output.push_str(&format!("Uniqueness factor: {}\n", breakdown.uniqueness_factor));
                if breakdown.containerization_capped {
                    output.push_str("Capped: job requires Docker/Kubernetes not shown in resume\n");
                }
            }
            output.push_str(&format!(
                "\nResume: {} ({} words) | Job: {}\n",
                report.metadata.resume_file,
                report.metadata.resume_word_count,
                report.metadata.job_file
            ));
        }

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Console
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool, detailed: bool) -> Self {
        Self { pretty, detailed }
    }

    fn to_json<T: serde::Serialize>(&self, value: &T) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(value)?)
        } else {
            Ok(serde_json::to_string(value)?)
        }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_report(&self, report: &ScoreReport) -> Result<String> {
        if self.detailed {
            self.to_json(report)
        } else {
            self.to_json(&report.result)
        }
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Json
    }
}

impl MarkdownFormatter {
    pub fn new(include_metadata: bool, detailed: bool) -> Self {
        Self {
            include_metadata,
            detailed,
        }
    }

    fn file_name(path: &str) -> String {
        Path::new(path)
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.to_string())
    }

    fn format_recommendation(index: usize, rec: &Recommendation) -> String {
        format!(
            "{}. **{}** ({} priority, impact +{}): {}\n",
            index, rec.title, rec.priority, rec.impact, rec.description
        )
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format_report(&self, report: &ScoreReport) -> Result<String> {
        let result = &report.result;
        let mut output = String::new();

        output.push_str("# Resume Match Report\n\n");

        if self.include_metadata {
            output.push_str(&format!(
                "**Generated:** {} | **Version:** {}\n",
                report.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
                report.metadata.version
            ));
            output.push_str(&format!(
                "**Resume:** `{}` | **Job:** `{}`\n\n",
                Self::file_name(&report.metadata.resume_file),
                Self::file_name(&report.metadata.job_file)
            ));
        }

        output.push_str("## Summary\n\n");
        output.push_str(&format!(
            "**Overall Score:** {}% ({})\n\n",
            result.overall_score,
            score_band(result.overall_score).0
        ));
        output.push_str(&format!("**Verdict:** {}\n\n", report.verdict()));
        output.push_str(&format!("**Experience:** {} year(s)\n\n", result.experience_years));
        if result.low_confidence {
            output.push_str("> Low confidence: the resume text looks incomplete or placeholder-like.\n\n");
        }

        output.push_str("## Skills\n\n");
        output.push_str("| Status | Skill |\n");
        output.push_str("|--------|-------|\n");
        for skill in &result.matched_skills {
            output.push_str(&format!("| Matched | {} |\n", skill));
        }
        for skill in &result.missing_skills {
            output.push_str(&format!("| Missing | {} |\n", skill));
        }
        output.push('\n');

        if !result.recommendations.is_empty() {
            output.push_str("## Recommendations\n\n");
            for (i, rec) in result.recommendations.iter().enumerate() {
                output.push_str(&Self::format_recommendation(i + 1, rec));
            }
            output.push('\n');
        }

        if self.detailed {
            if let Some(breakdown) = &report.breakdown {
                output.push_str("## Score Breakdown\n\n");
                output.push_str("| Component | Value |\n");
                output.push_str("|-----------|-------|\n");
                output.push_str(&format!("| Detected role | {} |\n", breakdown.detected_role));
                output.push_str(&format!("| Base score | {} |\n", breakdown.base_score));
                output.push_str(&format!("| Bonus | {} |\n", breakdown.bonus.total()));
                output.push_str(&format!("| Skill score | {} |\n", breakdown.skill_score));
                output.push_str(&format!(
                    "| Similarity ({}) | {} |\n",
                    breakdown.similarity_backend, breakdown.similarity
                ));
                output.push_str(&format!("| Uniqueness factor | {} |\n", breakdown.uniqueness_factor));
                output.push_str(&format!(
                    "| Containerization cap | {} |\n",
                    if breakdown.containerization_capped { "applied" } else { "no" }
                ));
                output.push('\n');
            }
        }

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Markdown
    }
}

/// Picks the formatter for a requested format.
pub struct ReportGenerator {
    console_formatter: ConsoleFormatter,
    json_formatter: JsonFormatter,
    markdown_formatter: MarkdownFormatter,
}

impl ReportGenerator {
    pub fn new(use_colors: bool, detailed: bool) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(use_colors, detailed),
            json_formatter: JsonFormatter::new(true, detailed),
            markdown_formatter: MarkdownFormatter::new(true, detailed),
        }
    }

    pub fn generate_report(&self, report: &ScoreReport, format: OutputFormat) -> Result<String> {
        let formatter: &dyn OutputFormatter = match format {
            OutputFormat::Console => &self.console_formatter,
            OutputFormat::Json => &self.json_formatter,
            OutputFormat::Markdown => &self.markdown_formatter,
        };
        debug_assert_eq!(formatter.supports_format(), format);
        formatter.format_report(report)
    }
}

pub fn save_report_to_file(content: &str, file_path: &Path) -> Result<()> {
    use std::fs;
    if let Some(parent) = file_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(file_path, content).map_err(|e| {
        ResumeMatcherError::OutputFormatting(format!(
            "Failed to write report to '{}': {}",
            file_path.display(),
            e
        ))
    })
}
