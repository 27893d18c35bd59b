//! TF-IDF skill weighting over a two-document corpus (job description, resume)

use crate::error::{Result, ScorerError};
use crate::processing::catalog::SkillCatalog;
use crate::processing::keywords::PatternMatcher;
use crate::processing::normalizer::TextNormalizer;
use log::debug;
use std::collections::HashMap;
use std::sync::Arc;

/// Canonical skill -> TF-IDF weight; only non-zero catalog skills appear
pub type WeightedKeywordSet = HashMap<String, f32>;

/// Weighs catalog skills by how characteristic they are of each document.
///
/// The vocabulary is exactly the catalog's canonical names (synonyms are not
/// folded in). With only two documents, a skill present in both gets
/// `idf = 1`, a skill present in one gets `idf = ln(3/2) + 1`.
pub struct WeightedKeywordScorer {
    catalog: Arc<SkillCatalog>,
    normalizer: TextNormalizer,
    matcher: PatternMatcher,
}

impl WeightedKeywordScorer {
    pub fn new(catalog: Arc<SkillCatalog>) -> Result<Self> {
        let vocabulary = catalog
            .skills()
            .iter()
            .enumerate()
            .map(|(i, skill)| (skill.clone(), i))
            .collect();
        let matcher = PatternMatcher::new(vocabulary, catalog.skill_count())?;

        Ok(Self {
            catalog,
            normalizer: TextNormalizer::new(),
            matcher,
        })
    }

    /// Returns `(job_weights, resume_weights)`; degenerate input yields two empty maps
    pub fn weigh(&self, job_text: &str, resume_text: &str) -> (WeightedKeywordSet, WeightedKeywordSet) {
        match self.try_weigh(job_text, resume_text) {
            Ok(weights) => weights,
            Err(e) => {
                debug!("Skipping TF-IDF weighting: {}", e);
                (HashMap::new(), HashMap::new())
            }
        }
    }

    fn try_weigh(&self, job_text: &str, resume_text: &str) -> Result<(WeightedKeywordSet, WeightedKeywordSet)> {
        let job_counts = self.matcher.count(&self.normalizer.normalize(job_text));
        let resume_counts = self.matcher.count(&self.normalizer.normalize(resume_text));

        if job_counts.iter().chain(resume_counts.iter()).all(|&c| c == 0) {
            return Err(ScorerError::InvalidInput(
                "no vocabulary term occurs in either document".to_string(),
            ));
        }

        let corpus = [&job_counts, &resume_counts];
        let n_docs = corpus.len() as f32;
        let idf: Vec<f32> = (0..self.catalog.skill_count())
            .map(|term| {
                let df = corpus.iter().filter(|counts| counts[term] > 0).count() as f32;
                ((1.0 + n_docs) / (1.0 + df)).ln() + 1.0
            })
            .collect();

        Ok((self.weights(&job_counts, &idf), self.weights(&resume_counts, &idf)))
    }

    /// L2-normalized `tf * idf`, zero entries dropped
    fn weights(&self, counts: &[usize], idf: &[f32]) -> WeightedKeywordSet {
        let raw: Vec<f32> = counts
            .iter()
            .zip(idf)
            .map(|(&count, &idf)| count as f32 * idf)
            .collect();

        let norm = raw.iter().map(|w| w * w).sum::<f32>().sqrt();
        if norm == 0.0 {
            return HashMap::new();
        }

        raw.into_iter()
            .enumerate()
            .filter(|(_, weight)| *weight > 0.0)
            .map(|(i, weight)| (self.catalog.skills()[i].clone(), weight / norm))
            .collect()
    }
}
