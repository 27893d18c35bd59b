//! CLI interface for the resume scorer

use crate::config::OutputFormat;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "resume-scorer")]
#[command(version)]
#[command(about = "Score how well a resume matches a job description")]
#[command(long_about = "Score a resume against a job description using skill keywords, TF-IDF skill coverage, \
semantic embeddings, experience relevance and grammar quality, then print ranked improvement tips")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Score a resume against a job description
    Analyze {
        /// Path to resume file (PDF, TXT, MD)
        #[arg(short, long)]
        resume: PathBuf,

        /// Path to job description file (PDF, TXT, MD)
        #[arg(short, long)]
        job: PathBuf,

        /// Output format: console, json, markdown
        #[arg(short, long, value_parser = parse_output_format)]
        output: Option<OutputFormat>,

        /// Save the report to a file
        #[arg(short, long)]
        save: Option<PathBuf>,

        /// Include every grammar issue and the TF-IDF skill weights
        #[arg(short, long)]
        detailed: bool,

        /// Skip the grammar check
        #[arg(long)]
        no_grammar: bool,

        /// Skip semantic similarity (no embedding model is loaded)
        #[arg(long)]
        no_embeddings: bool,
    },

    /// List the skill catalog
    Skills {
        /// Also show the synonyms of each skill
        #[arg(long)]
        synonyms: bool,
    },

    /// Show or reset configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Reset configuration to defaults
    Reset,

    /// Print the configuration file path
    Path,
}

/// Parse and validate output format
pub fn parse_output_format(format: &str) -> Result<OutputFormat, String> {
    match format.to_lowercase().as_str() {
        "console" => Ok(OutputFormat::Console),
        "json" => Ok(OutputFormat::Json),
        "markdown" | "md" => Ok(OutputFormat::Markdown),
        _ => Err(format!(
            "Invalid output format: {}. Supported: console, json, markdown",
            format
        )),
    }
}
