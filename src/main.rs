//! resume-scorer: score a resume against a job description

use clap::Parser;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info, warn};
use resume_scorer::cli::{Cli, Commands, ConfigAction};
use resume_scorer::config::{Config, OutputFormat};
use resume_scorer::error::{Result, ScorerError};
use resume_scorer::input::InputManager;
use resume_scorer::output::{save_report_to_file, ReportGenerator};
use resume_scorer::processing::embeddings::{EmbeddingBackend, Model2VecBackend};
use resume_scorer::processing::grammar::{GrammarBackend, LanguageToolClient};
use resume_scorer::processing::{AnalysisEngine, SkillCatalog};
use std::path::Path;
use std::process;
use std::sync::Arc;
use std::time::Duration;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config_path = cli.config.clone().unwrap_or_else(Config::config_path);
    let config = match Config::load_from(&config_path) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration from {}: {}", config_path.display(), e);
            process::exit(1);
        }
    };

    if let Err(e) = run_command(cli.command, config, &config_path).await {
        error!("Command failed: {}", e);
        process::exit(1);
    }
}

async fn run_command(command: Commands, config: Config, config_path: &Path) -> Result<()> {
    match command {
        Commands::Analyze {
            resume,
            job,
            output,
            save,
            detailed,
            no_grammar,
            no_embeddings,
        } => {
            let format = output.unwrap_or(config.output.format);
            let detailed = detailed || config.output.detailed;

            info!("Scoring {} against {}", resume.display(), job.display());

            let mut input_manager = InputManager::new();
            let resume_text = input_manager.extract_text(&resume).await?;
            let job_text = input_manager.extract_text(&job).await?;

            let catalog = Arc::new(SkillCatalog::from_config(&config.catalog)?);

            let embedding = if no_embeddings || !config.models.enable_embeddings {
                info!("Semantic similarity disabled");
                None
            } else {
                load_embedding_backend(&config).await
            };

            let grammar: Option<Arc<dyn GrammarBackend>> = if no_grammar || !config.grammar.enabled {
                info!("Grammar check disabled");
                None
            } else {
                Some(Arc::new(LanguageToolClient::new(&config.grammar)))
            };

            let engine = AnalysisEngine::new(&config, catalog, embedding, grammar)?;
            let result = engine.analyze(&job_text, &resume_text).await?;

            let generator = ReportGenerator::with_options(config.output.color_output, detailed);
            println!("{}", generator.generate_report(&result, format)?);

            if let Some(save_path) = save {
                // Saved console reports never carry ANSI colors
                let content = if format == OutputFormat::Console {
                    ReportGenerator::with_options(false, detailed).generate_report(&result, format)?
                } else {
                    generator.generate_report(&result, format)?
                };
                save_report_to_file(&content, &save_path)?;
                println!("💾 Report saved to {}", save_path.display());
            }
        }

        Commands::Skills { synonyms } => {
            let catalog = SkillCatalog::from_config(&config.catalog)?;

            println!("{}", format!("🧰 Skill catalog ({} skills)", catalog.skill_count()).bold());
            for entry in catalog.entries() {
                if synonyms && !entry.synonyms.is_empty() {
                    println!("  • {} {}", entry.canonical, format!("({})", entry.synonyms.join(", ")).dimmed());
                } else {
                    println!("  • {}", entry.canonical);
                }
            }
            if synonyms {
                println!("\n{} synonyms", catalog.synonym_count());
            }
        }

        Commands::Config { action } => match action.unwrap_or(ConfigAction::Show) {
            ConfigAction::Show => {
                println!("⚙️  Current Configuration ({})\n", config_path.display());
                let rendered = toml::to_string_pretty(&config)
                    .map_err(|e| ScorerError::Configuration(format!("Failed to render config: {}", e)))?;
                println!("{}", rendered);
            }
            ConfigAction::Reset => {
                Config::default().save_to(config_path)?;
                println!("✅ Configuration reset to defaults: {}", config_path.display());
            }
            ConfigAction::Path => {
                println!("{}", config_path.display());
            }
        },
    }

    Ok(())
}

/// Load the embedding model off the async runtime; a failed load disables semantic similarity
async fn load_embedding_backend(config: &Config) -> Option<Arc<dyn EmbeddingBackend>> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner:.cyan} {msg}").unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(format!("Loading embedding model {}", config.models.embedding_model));
    spinner.enable_steady_tick(Duration::from_millis(100));

    let model_config = config.clone();
    let loaded = tokio::task::spawn_blocking(move || Model2VecBackend::load(&model_config)).await;
    spinner.finish_and_clear();

    match loaded {
        Ok(Ok(backend)) => {
            info!("Embedding model {} ready", backend.model_name());
            Some(Arc::new(backend))
        }
        Ok(Err(e)) => {
            warn!("Semantic similarity disabled: {}", e);
            None
        }
        Err(e) => {
            warn!("Semantic similarity disabled, model loader failed: {}", e);
            None
        }
    }
}
