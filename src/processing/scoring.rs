//! Weighted combination of the individual signals

use crate::config::ScoringConfig;
use crate::processing::keywords::KeywordSet;
use crate::processing::tfidf::WeightedKeywordSet;

/// Round to one decimal place
pub fn round1(value: f32) -> f32 {
    (value * 10.0).round() / 10.0
}

#[derive(Debug, Clone)]
pub struct ScoreAggregator {
    weights: ScoringConfig,
}

impl Default for ScoreAggregator {
    fn default() -> Self {
        Self::new(ScoringConfig::default())
    }
}

impl ScoreAggregator {
    pub fn new(weights: ScoringConfig) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> &ScoringConfig {
        &self.weights
    }

    /// `semantic` is on [0, 1]; the other inputs are on [0, 100]
    pub fn aggregate(&self, semantic: f32, keyword: f32, skills: f32, experience: f32) -> f32 {
        let w = &self.weights;
        let overall = semantic * 100.0 * w.semantic_weight
            + keyword * w.keyword_weight
            + skills * w.skills_weight
            + experience * w.experience_weight;

        round1(overall).clamp(0.0, 100.0)
    }

    pub fn blend_grammar(&self, base: f32, grammar: f32) -> f32 {
        let share = self.weights.grammar_weight;
        round1(base * (1.0 - share) + grammar * share).clamp(0.0, 100.0)
    }

    /// Percentage of distinct job skills that also appear in the resume
    pub fn keyword_match(&self, job: &KeywordSet, resume: &KeywordSet) -> f32 {
        if job.is_empty() {
            return 0.0;
        }

        let common = job.keys().filter(|skill| resume.contains_key(*skill)).count();
        common as f32 / job.len() as f32 * 100.0
    }

    /// Share of the job's TF-IDF weight carried by skills the resume mentions
    pub fn skills_coverage(&self, job_weights: &WeightedKeywordSet, resume: &KeywordSet) -> f32 {
        let total: f32 = job_weights.values().sum();
        if job_weights.is_empty() || total == 0.0 {
            return 0.0;
        }

        let matched: f32 = job_weights
            .iter()
            .filter(|(skill, _)| resume.contains_key(*skill))
            .map(|(_, weight)| weight)
            .sum();

        matched / total * 100.0
    }
}
