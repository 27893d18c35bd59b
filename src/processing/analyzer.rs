//! Analysis engine combining keyword, semantic, experience and grammar signals

use crate::config::Config;
use crate::error::{Result, ScorerError};
use crate::processing::advisor::{sort_by_priority, ImprovementAdvisor, ImprovementTip};
use crate::processing::catalog::SkillCatalog;
use crate::processing::embeddings::{EmbeddingBackend, SemanticSimilarityScorer};
use crate::processing::experience::ExperienceRelevanceScorer;
use crate::processing::grammar::{GrammarBackend, GrammarIssue, GrammarScorer};
use crate::processing::keywords::{KeywordExtractor, KeywordSet};
use crate::processing::scoring::ScoreAggregator;
use crate::processing::tfidf::{WeightedKeywordScorer, WeightedKeywordSet};
use chrono::{DateTime, Utc};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;

/// Runs the whole scoring pipeline for one job description / resume pair.
///
/// Cheap to clone; clones share the catalog and backend handles.
#[derive(Clone)]
pub struct AnalysisEngine {
    catalog: Arc<SkillCatalog>,
    extractor: Arc<KeywordExtractor>,
    weigher: Arc<WeightedKeywordScorer>,
    semantic: SemanticSimilarityScorer,
    experience: Arc<ExperienceRelevanceScorer>,
    grammar: GrammarScorer,
    aggregator: ScoreAggregator,
    advisor: ImprovementAdvisor,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Final score on [0, 100] after the grammar blend
    pub overall_score: f32,
    pub breakdown: ScoreBreakdown,
    /// Job skills absent from the resume, most frequent first
    pub missing_keywords: Vec<MissingKeyword>,
    pub detected_keywords: Vec<String>,
    pub job_description_keywords: Vec<String>,
    /// Job skills by TF-IDF weight, heaviest first
    pub job_skill_weights: Vec<WeightedSkill>,
    pub improvement_tips: Vec<ImprovementTip>,
    pub grammar_issues: Vec<GrammarIssue>,
    pub metadata: AnalysisMetadata,
}

/// Every score is on [0, 100]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub keyword_match: f32,
    pub semantic_similarity: f32,
    pub skills_coverage: f32,
    pub experience_relevance: f32,
    pub grammar: f32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissingKeyword {
    pub keyword: String,
    /// Occurrences in the job description
    pub importance: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeightedSkill {
    pub skill: String,
    pub weight: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisMetadata {
    pub analyzed_at: DateTime<Utc>,
    pub processing_time_ms: u64,
    pub semantic_enabled: bool,
    pub grammar_enabled: bool,
    pub job_word_count: usize,
    pub resume_word_count: usize,
}

impl AnalysisEngine {
    /// Absent backends switch the matching signal to its fallback value
    pub fn new(
        config: &Config,
        catalog: Arc<SkillCatalog>,
        embedding: Option<Arc<dyn EmbeddingBackend>>,
        grammar: Option<Arc<dyn GrammarBackend>>,
    ) -> Result<Self> {
        config.validate()?;

        let extractor = KeywordExtractor::new(catalog.clone())?;
        let weigher = WeightedKeywordScorer::new(catalog.clone())?;

        info!(
            "Analysis engine ready: {} skills, {} patterns, semantic {}, grammar {}",
            catalog.skill_count(),
            extractor.pattern_count(),
            if embedding.is_some() { "on" } else { "off" },
            if grammar.is_some() { "on" } else { "off" },
        );

        Ok(Self {
            extractor: Arc::new(extractor),
            weigher: Arc::new(weigher),
            semantic: SemanticSimilarityScorer::new(embedding, config.processing.chunk_size),
            experience: Arc::new(ExperienceRelevanceScorer::new(catalog.clone())),
            grammar: GrammarScorer::new(grammar, &config.grammar),
            aggregator: ScoreAggregator::new(config.scoring.clone()),
            advisor: ImprovementAdvisor::new(),
            catalog,
        })
    }

    pub fn catalog(&self) -> &SkillCatalog {
        &self.catalog
    }

    pub fn semantic_enabled(&self) -> bool {
        self.semantic.is_enabled()
    }

    pub fn grammar_enabled(&self) -> bool {
        self.grammar.is_enabled()
    }

    pub async fn analyze(&self, job_text: &str, resume_text: &str) -> Result<AnalysisResult> {
        if job_text.trim().is_empty() {
            return Err(ScorerError::InvalidInput("job description text is empty".to_string()));
        }
        if resume_text.trim().is_empty() {
            return Err(ScorerError::InvalidInput("resume text is empty".to_string()));
        }

        let start_time = Instant::now();

        let job_keywords = self.extractor.extract(job_text);
        let resume_keywords = self.extractor.extract(resume_text);
        let (job_weights, _) = self.weigher.weigh(job_text, resume_text);

        let semantic = self.semantic.similarity(job_text, resume_text);
        let keyword_match = self.aggregator.keyword_match(&job_keywords, &resume_keywords);
        let skills_coverage = self.aggregator.skills_coverage(&job_weights, &resume_keywords);
        let experience = self.experience.score(job_text, resume_text);
        let (grammar_score, grammar_issues) = self.grammar.check(resume_text).await;

        debug!(
            "Signals: semantic {:.3}, keyword {:.1}, skills {:.1}, experience {:.1}, grammar {:.1}",
            semantic, keyword_match, skills_coverage, experience, grammar_score
        );

        let base = self.aggregator.aggregate(semantic, keyword_match, skills_coverage, experience);
        let overall_score = self.aggregator.blend_grammar(base, grammar_score);

        let missing_keywords = missing_keywords(&job_keywords, &resume_keywords);
        let missing_names: Vec<String> = missing_keywords.iter().map(|m| m.keyword.clone()).collect();

        let mut improvement_tips = self.advisor.advise(&missing_names, semantic, keyword_match, experience);
        if let Some(tip) = self.advisor.grammar_tip(grammar_score, grammar_issues.len()) {
            improvement_tips.insert(0, tip);
            sort_by_priority(&mut improvement_tips);
        }

        let processing_time_ms = start_time.elapsed().as_millis() as u64;
        info!("Analysis completed in {}ms, overall score {:.1}", processing_time_ms, overall_score);

        Ok(AnalysisResult {
            overall_score,
            breakdown: ScoreBreakdown {
                keyword_match,
                semantic_similarity: semantic * 100.0,
                skills_coverage,
                experience_relevance: experience,
                grammar: grammar_score,
            },
            missing_keywords,
            detected_keywords: sorted_keys(&resume_keywords),
            job_description_keywords: sorted_keys(&job_keywords),
            job_skill_weights: ranked_weights(&job_weights),
            improvement_tips,
            grammar_issues,
            metadata: AnalysisMetadata {
                analyzed_at: Utc::now(),
                processing_time_ms,
                semantic_enabled: self.semantic.is_enabled(),
                grammar_enabled: self.grammar.is_enabled(),
                job_word_count: job_text.split_whitespace().count(),
                resume_word_count: resume_text.split_whitespace().count(),
            },
        })
    }
}

fn missing_keywords(job: &KeywordSet, resume: &KeywordSet) -> Vec<MissingKeyword> {
    let mut missing: Vec<MissingKeyword> = job
        .iter()
        .filter(|(skill, _)| !resume.contains_key(*skill))
        .map(|(skill, &count)| MissingKeyword {
            keyword: skill.clone(),
            importance: count.max(1),
        })
        .collect();

    missing.sort_by(|a, b| b.importance.cmp(&a.importance).then_with(|| a.keyword.cmp(&b.keyword)));
    missing
}

fn sorted_keys(set: &KeywordSet) -> Vec<String> {
    let mut keys: Vec<String> = set.keys().cloned().collect();
    keys.sort();
    keys
}

fn ranked_weights(weights: &WeightedKeywordSet) -> Vec<WeightedSkill> {
    let mut ranked: Vec<WeightedSkill> = weights
        .iter()
        .map(|(skill, &weight)| WeightedSkill {
            skill: skill.clone(),
            weight,
        })
        .collect();

    ranked.sort_by(|a, b| b.weight.total_cmp(&a.weight).then_with(|| a.skill.cmp(&b.skill)));
    ranked
}
