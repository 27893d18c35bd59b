//! Report formatters: colored console, JSON and Markdown

use crate::config::OutputFormat;
use crate::error::Result;
use crate::processing::analyzer::AnalysisResult;
use crate::processing::grammar::GrammarIssue;
use colored::{Color, Colorize};
use std::path::Path;

/// Issues shown when the report is not detailed
const SUMMARY_ISSUE_LIMIT: usize = 3;
/// Weighted job skills shown in detailed reports
const WEIGHT_LIMIT: usize = 10;

pub trait OutputFormatter {
    fn format_report(&self, result: &AnalysisResult) -> Result<String>;
    fn supports_format(&self) -> OutputFormat;
}

pub struct ConsoleFormatter {
    use_colors: bool,
    detailed: bool,
}

pub struct JsonFormatter {
    pretty: bool,
}

pub struct MarkdownFormatter {
    include_metadata: bool,
    detailed: bool,
}

/// Picks the formatter for the requested output format
pub struct ReportGenerator {
    console_formatter: ConsoleFormatter,
    json_formatter: JsonFormatter,
    markdown_formatter: MarkdownFormatter,
}

fn verdict(score: f32) -> &'static str {
    match score.round() as u8 {
        90..=100 => "EXCELLENT",
        80..=89 => "VERY GOOD",
        70..=79 => "GOOD",
        60..=69 => "FAIR",
        50..=59 => "BELOW AVG",
        _ => "POOR",
    }
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
        let (prefix, color) = match level {
            1 => ("█", Color::Blue),
            2 => ("▓", Color::Green),
            _ => ("▒", Color::Yellow),
        };

        if self.use_colors {
            format!("\n{} {}\n", prefix.color(color).bold(), title.color(color).bold())
        } else {
            format!("\n{} {}\n", prefix, title)
        }
    }

    fn score_color(score: f32) -> Color {
        match score.round() as u8 {
            80..=100 => Color::Green,
            60..=79 => Color::Yellow,
            _ => Color::Red,
        }
    }

    fn format_score_line(&self, label: &str, score: f32) -> String {
        let value = format!("{:>5.1}%", score);
        format!("  {:<22} {}\n", label, self.colorize(&value, Self::score_color(score)))
    }

    fn format_priority_icon(&self, priority: u8) -> &'static str {
        match (self.use_colors, priority) {
            (true, 1) => "🚨",
            (true, 2) => "⚠️",
            (true, _) => "💡",
            (false, 1) => "[!]",
            (false, 2) => "[*]",
            (false, _) => "[+]",
        }
    }

    fn format_issue(&self, issue: &GrammarIssue) -> String {
        let mut output = format!("  • {}\n", issue.message);
        if !issue.context.is_empty() {
            output.push_str(&format!("    {}\n", self.colorize(&issue.context, Color::BrightBlack)));
        }
        if !issue.suggestions.is_empty() {
            output.push_str(&format!("    Try: {}\n", self.colorize(&issue.suggestions.join(", "), Color::Green)));
        }
        output
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_report(&self, result: &AnalysisResult) -> Result<String> {
        let mut output = String::new();
        let breakdown = &result.breakdown;

        output.push_str(&self.format_header("📊 RESUME MATCH ANALYSIS", 1));
        output.push_str(&format!(
            "Analyzed: {} | Processing time: {}ms\n",
            result.metadata.analyzed_at.format("%Y-%m-%d %H:%M:%S UTC"),
            result.metadata.processing_time_ms
        ));

        let badge = format!("[{}]", verdict(result.overall_score));
        output.push_str(&format!(
            "\nOverall Score: {} {}\n",
            self.colorize(&format!("{:.1}%", result.overall_score), Self::score_color(result.overall_score)),
            if self.use_colors { badge.bold().to_string() } else { badge }
        ));

        output.push_str(&self.format_header("Score Breakdown", 2));
        output.push_str(&self.format_score_line("Keyword match", breakdown.keyword_match));
        output.push_str(&self.format_score_line("Skills coverage", breakdown.skills_coverage));
        if result.metadata.semantic_enabled {
            output.push_str(&self.format_score_line("Semantic similarity", breakdown.semantic_similarity));
        } else {
            output.push_str(&format!("  {:<22} {}\n", "Semantic similarity", self.colorize("disabled", Color::BrightBlack)));
        }
        output.push_str(&self.format_score_line("Experience relevance", breakdown.experience_relevance));
        if result.metadata.grammar_enabled {
            output.push_str(&self.format_score_line("Grammar", breakdown.grammar));
        } else {
            output.push_str(&format!("  {:<22} {}\n", "Grammar", self.colorize("disabled", Color::BrightBlack)));
        }

        if !result.missing_keywords.is_empty() {
            output.push_str(&self.format_header("❌ Missing Skills", 2));
            for missing in &result.missing_keywords {
                output.push_str(&format!(
                    "  • {} {}\n",
                    self.colorize(&missing.keyword, Color::Red),
                    self.colorize(&format!("(mentioned {}x)", missing.importance), Color::BrightBlack)
                ));
            }
        }

        if !result.detected_keywords.is_empty() {
            output.push_str(&self.format_header("✅ Detected Skills", 2));
            output.push_str(&format!("  {}\n", self.colorize(&result.detected_keywords.join(", "), Color::Green)));
        }

        output.push_str(&self.format_header("📋 Improvement Tips", 2));
        for (i, tip) in result.improvement_tips.iter().enumerate() {
            output.push_str(&format!(
                "{}. {} {} {}\n",
                i + 1,
                self.format_priority_icon(tip.priority),
                self.colorize(&tip.category, Color::Cyan),
                self.colorize(&format!("(priority {})", tip.priority), Color::BrightBlack)
            ));
            output.push_str(&format!("   {}\n", tip.tip));
        }

        if !result.grammar_issues.is_empty() {
            output.push_str(&self.format_header("✏️ Grammar Issues", 2));
            let limit = if self.detailed { result.grammar_issues.len() } else { SUMMARY_ISSUE_LIMIT };
            for issue in result.grammar_issues.iter().take(limit) {
                output.push_str(&self.format_issue(issue));
            }
            if result.grammar_issues.len() > limit {
                output.push_str(&format!(
                    "  ... and {} more (use --detailed to see all)\n",
                    result.grammar_issues.len() - limit
                ));
            }
        }

        if self.detailed {
            output.push_str(&self.format_header("📊 Detailed Analysis", 2));
            output.push_str(&format!(
                "Job description skills: {}\n",
                result.job_description_keywords.join(", ")
            ));

            if !result.job_skill_weights.is_empty() {
                output.push_str(&self.format_header("Most characteristic job skills (TF-IDF)", 3));
                for weighted in result.job_skill_weights.iter().take(WEIGHT_LIMIT) {
                    output.push_str(&format!("  {:<28} {:.3}\n", weighted.skill, weighted.weight));
                }
            }

            output.push_str(&format!(
                "\nWords: job {} | resume {}\n",
                result.metadata.job_word_count, result.metadata.resume_word_count
            ));
        }

        output.push_str(&format!(
            "\n{} Generated by resume-scorer v{}\n",
            self.colorize("ℹ", Color::Blue),
            env!("CARGO_PKG_VERSION")
        ));

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Console
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_report(&self, result: &AnalysisResult) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(result)?)
        } else {
            Ok(serde_json::to_string(result)?)
        }
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Json
    }
}

impl MarkdownFormatter {
    pub fn new(include_metadata: bool, detailed: bool) -> Self {
        Self { include_metadata, detailed }
    }

    fn markdown_score_badge(score: f32) -> &'static str {
        match score.round() as u8 {
            90..=100 => "🟢 Excellent",
            80..=89 => "🟡 Very Good",
            70..=79 => "🟠 Good",
            60..=69 => "🔴 Fair",
            50..=59 => "🔴 Below Average",
            _ => "🔴 Poor",
        }
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format_report(&self, result: &AnalysisResult) -> Result<String> {
        let mut output = String::new();
        let breakdown = &result.breakdown;

        output.push_str("# 📊 Resume Match Report\n\n");

        if self.include_metadata {
            output.push_str(&format!(
                "**Analyzed:** {} | **Processing Time:** {}ms\n\n",
                result.metadata.analyzed_at.format("%Y-%m-%d %H:%M:%S UTC"),
                result.metadata.processing_time_ms
            ));
        }

        output.push_str(&format!(
            "**Overall Score:** {:.1}% {}\n\n",
            result.overall_score,
            Self::markdown_score_badge(result.overall_score)
        ));

        output.push_str("## Score Breakdown\n\n");
        output.push_str("| Component | Score |\n");
        output.push_str("|-----------|-------|\n");
        output.push_str(&format!("| Keyword match | {:.1}% |\n", breakdown.keyword_match));
        output.push_str(&format!("| Skills coverage | {:.1}% |\n", breakdown.skills_coverage));
        if result.metadata.semantic_enabled {
            output.push_str(&format!("| Semantic similarity | {:.1}% |\n", breakdown.semantic_similarity));
        } else {
            output.push_str("| Semantic similarity | disabled |\n");
        }
        output.push_str(&format!("| Experience relevance | {:.1}% |\n", breakdown.experience_relevance));
        if result.metadata.grammar_enabled {
            output.push_str(&format!("| Grammar | {:.1}% |\n", breakdown.grammar));
        } else {
            output.push_str("| Grammar | disabled |\n");
        }
        output.push('\n');

        if !result.missing_keywords.is_empty() {
            output.push_str("## ❌ Missing Skills\n\n");
            output.push_str("| Skill | Mentions in job |\n");
            output.push_str("|-------|-----------------|\n");
            for missing in &result.missing_keywords {
                output.push_str(&format!("| {} | {} |\n", missing.keyword, missing.importance));
            }
            output.push('\n');
        }

        if !result.detected_keywords.is_empty() {
            output.push_str("## ✅ Detected Skills\n\n");
            output.push_str(&format!("`{}`\n\n", result.detected_keywords.join("`, `")));
        }

        output.push_str("## 📋 Improvement Tips\n\n");
        for (i, tip) in result.improvement_tips.iter().enumerate() {
            output.push_str(&format!(
                "{}. **{}** (priority {}): {}\n",
                i + 1,
                tip.category,
                tip.priority,
                tip.tip
            ));
        }
        output.push('\n');

        if !result.grammar_issues.is_empty() {
            output.push_str("## ✏️ Grammar Issues\n\n");
            let limit = if self.detailed { result.grammar_issues.len() } else { SUMMARY_ISSUE_LIMIT };
            for issue in result.grammar_issues.iter().take(limit) {
                output.push_str(&format!("- {}", issue.message));
                if !issue.context.is_empty() {
                    output.push_str(&format!(" in `{}`", issue.context.replace('`', "'")));
                }
                if !issue.suggestions.is_empty() {
                    output.push_str(&format!(" (try: {})", issue.suggestions.join(", ")));
                }
                output.push('\n');
            }
            output.push('\n');
        }

        if self.detailed && !result.job_skill_weights.is_empty() {
            output.push_str("## 📊 Job Skill Weights (TF-IDF)\n\n");
            output.push_str("| Skill | Weight |\n");
            output.push_str("|-------|--------|\n");
            for weighted in result.job_skill_weights.iter().take(WEIGHT_LIMIT) {
                output.push_str(&format!("| {} | {:.3} |\n", weighted.skill, weighted.weight));
            }
            output.push('\n');
        }

        if self.include_metadata {
            output.push_str("---\n\n");
            output.push_str(&format!("*Generated by resume-scorer v{}*\n", env!("CARGO_PKG_VERSION")));
        }

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Markdown
    }
}

impl ReportGenerator {
    pub fn new() -> Self {
        Self::with_options(true, false)
    }

    pub fn with_options(use_colors: bool, detailed: bool) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(use_colors, detailed),
            json_formatter: JsonFormatter::new(true),
            markdown_formatter: MarkdownFormatter::new(true, detailed),
        }
    }

    pub fn generate_report(&self, result: &AnalysisResult, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Console => self.console_formatter.format_report(result),
            OutputFormat::Json => self.json_formatter.format_report(result),
            OutputFormat::Markdown => self.markdown_formatter.format_report(result),
        }
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

pub fn save_report_to_file(content: &str, file_path: &Path) -> Result<()> {
    if let Some(parent) = file_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(file_path, content)?;
    Ok(())
}

/// `<resume stem>_analysis[_timestamp].<ext>`
pub fn suggest_filename(format: OutputFormat, resume_name: &str, timestamp: bool) -> String {
    let base_name = Path::new(resume_name)
        .file_stem()
        .unwrap_or_default()
        .to_string_lossy();

    let timestamp_suffix = if timestamp {
        format!("_{}", chrono::Utc::now().format("%Y%m%d_%H%M%S"))
    } else {
        String::new()
    };

    let extension = match format {
        OutputFormat::Console => "txt",
        OutputFormat::Json => "json",
        OutputFormat::Markdown => "md",
    };

    format!("{}_analysis{}.{}", base_name, timestamp_suffix, extension)
}
