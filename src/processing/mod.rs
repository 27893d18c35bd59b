//! Scoring pipeline: normalization, keyword signals, semantic and grammar backends

pub mod normalizer;
pub mod catalog;
pub mod keywords;
pub mod tfidf;
pub mod embeddings;
pub mod experience;
pub mod grammar;
pub mod scoring;
pub mod advisor;
pub mod analyzer;

pub use analyzer::{AnalysisEngine, AnalysisResult, MissingKeyword, ScoreBreakdown};
pub use catalog::{SkillCatalog, SkillEntry};
