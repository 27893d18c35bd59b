//! Configuration management for the resume scorer

use crate::error::{Result, ScorerError};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub models: ModelConfig,
    pub processing: ProcessingConfig,
    pub scoring: ScoringConfig,
    pub grammar: GrammarConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    pub models_dir: PathBuf,
    /// Local directory name under `models_dir`, or a Hugging Face repo id
    pub embedding_model: String,
    pub enable_embeddings: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessingConfig {
    /// Maximum words per chunk handed to the embedding backend
    pub chunk_size: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub semantic_weight: f32,
    pub keyword_weight: f32,
    pub skills_weight: f32,
    pub experience_weight: f32,
    /// Share of the final score taken by grammar; the rest comes from the base aggregate
    pub grammar_weight: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GrammarConfig {
    pub enabled: bool,
    pub server_url: String,
    pub language: String,
    pub max_issues: usize,
    pub max_context_chars: usize,
    pub max_suggestions: usize,
    pub ignored_rules: Vec<String>,
    pub timeout_secs: u64,
}

/// Extra vocabulary merged into the built-in skill catalog
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogConfig {
    #[serde(default)]
    pub extra_skills: Vec<String>,
    #[serde(default)]
    pub extra_synonyms: HashMap<String, Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub detailed: bool,
    pub color_output: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    Console,
    Json,
    Markdown,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            semantic_weight: 0.25,
            keyword_weight: 0.25,
            skills_weight: 0.30,
            experience_weight: 0.20,
            grammar_weight: 0.10,
        }
    }
}

impl Default for GrammarConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            server_url: "http://localhost:8081".to_string(),
            language: "en-US".to_string(),
            max_issues: 15,
            max_context_chars: 100,
            max_suggestions: 3,
            ignored_rules: vec![
                "WHITESPACE_RULE".to_string(),
                "COMMA_PARENTHESIS_WHITESPACE".to_string(),
            ],
            timeout_secs: 30,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        let models_dir = dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".resume-scorer")
            .join("models");

        Self {
            models: ModelConfig {
                models_dir,
                embedding_model: "minishlab/potion-base-8M".to_string(),
                enable_embeddings: true,
            },
            processing: ProcessingConfig { chunk_size: 512 },
            scoring: ScoringConfig::default(),
            grammar: GrammarConfig::default(),
            catalog: CatalogConfig::default(),
            output: OutputConfig {
                format: OutputFormat::Console,
                detailed: false,
                color_output: true,
            },
        }
    }
}

impl Config {
    /// Load from `config_path`, writing defaults there on first run
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            let config: Config = toml::from_str(&content)
                .map_err(|e| ScorerError::Configuration(format!("Failed to parse config: {}", e)))?;
            config.validate()?;
            Ok(config)
        } else {
            let config = Self::default();
            config.save_to(config_path)?;
            Ok(config)
        }
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| ScorerError::Configuration(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("resume-scorer")
            .join("config.toml")
    }

    /// Resolve the embedding model to a local path when one exists, else pass the repo id through
    pub fn embedding_model_location(&self) -> PathBuf {
        let local_path = self.models.models_dir.join(&self.models.embedding_model);
        if local_path.exists() {
            local_path
        } else {
            PathBuf::from(&self.models.embedding_model)
        }
    }

    pub fn validate(&self) -> Result<()> {
        let weights = [
            ("semantic_weight", self.scoring.semantic_weight),
            ("keyword_weight", self.scoring.keyword_weight),
            ("skills_weight", self.scoring.skills_weight),
            ("experience_weight", self.scoring.experience_weight),
            ("grammar_weight", self.scoring.grammar_weight),
        ];
        for (name, weight) in weights {
            if !(0.0..=1.0).contains(&weight) {
                return Err(ScorerError::Configuration(format!(
                    "scoring.{} must be within 0.0..=1.0, got {}",
                    name, weight
                )));
            }
        }

        if self.processing.chunk_size == 0 {
            return Err(ScorerError::Configuration(
                "processing.chunk_size must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }
}
