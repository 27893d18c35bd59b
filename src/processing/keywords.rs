//! Catalog-driven keyword extraction

use crate::error::{Result, ScorerError};
use crate::processing::catalog::SkillCatalog;
use crate::processing::normalizer::TextNormalizer;
use aho_corasick::{AhoCorasick, MatchKind};
use std::collections::HashMap;
use std::sync::Arc;

/// Canonical skill -> occurrence count for one document
pub type KeywordSet = HashMap<String, usize>;

/// Multi-pattern counter over normalized text.
///
/// Every pattern is counted independently. Patterns containing a space are
/// plain substring counts; single-word patterns only count where both
/// neighbours are non-alphanumeric.
pub struct PatternMatcher {
    automaton: AhoCorasick,
    patterns: Vec<String>,
    targets: Vec<usize>,
    target_count: usize,
}

impl PatternMatcher {
    /// `patterns` pairs each pattern with the index of the target it counts towards.
    ///
    /// Patterns go through the same [`TextNormalizer`] as the searched text, so
    /// `scikit-learn` is matched as `scikit learn`. Patterns that normalize to
    /// nothing are dropped.
    pub fn new(patterns: Vec<(String, usize)>, target_count: usize) -> Result<Self> {
        let normalizer = TextNormalizer::new();
        let mut patterns: Vec<(String, usize)> = patterns
            .into_iter()
            .map(|(pattern, target)| (normalizer.normalize(&pattern), target))
            .filter(|(pattern, _)| !pattern.is_empty())
            .collect();

        // Longest first so pattern ids follow specificity
        patterns.sort_by(|a, b| b.0.len().cmp(&a.0.len()).then_with(|| a.0.cmp(&b.0)).then(a.1.cmp(&b.1)));
        patterns.dedup();

        let automaton = AhoCorasick::builder()
            .match_kind(MatchKind::Standard)
            .build(patterns.iter().map(|(pattern, _)| pattern.as_str()))
            .map_err(|e| ScorerError::Configuration(format!("Failed to build keyword matcher: {}", e)))?;

        let (patterns, targets) = patterns.into_iter().unzip();

        Ok(Self {
            automaton,
            patterns,
            targets,
            target_count,
        })
    }

    /// Occurrences per target in already-normalized text
    pub fn count(&self, normalized: &str) -> Vec<usize> {
        let bytes = normalized.as_bytes();
        let mut counts = vec![0; self.target_count];

        for mat in self.automaton.find_overlapping_iter(normalized) {
            let id = mat.pattern().as_usize();
            if self.patterns[id].contains(' ') || is_word_bounded(bytes, mat.start(), mat.end()) {
                counts[self.targets[id]] += 1;
            }
        }

        counts
    }

    pub fn pattern_count(&self) -> usize {
        self.patterns.len()
    }
}

fn is_word_bounded(bytes: &[u8], start: usize, end: usize) -> bool {
    let before = start == 0 || !bytes[start - 1].is_ascii_alphanumeric();
    let after = end == bytes.len() || !bytes[end].is_ascii_alphanumeric();
    before && after
}

/// Extracts canonical skills from free text.
///
/// A skill reached through several synonyms accumulates all of their counts,
/// so "REST API (RESTful)" counts `rest api` more than once.
pub struct KeywordExtractor {
    catalog: Arc<SkillCatalog>,
    normalizer: TextNormalizer,
    matcher: PatternMatcher,
}

impl KeywordExtractor {
    pub fn new(catalog: Arc<SkillCatalog>) -> Result<Self> {
        let index: HashMap<&str, usize> = catalog
            .skills()
            .iter()
            .enumerate()
            .map(|(i, skill)| (skill.as_str(), i))
            .collect();

        let patterns = catalog
            .patterns()
            .into_iter()
            .filter_map(|(pattern, canonical)| index.get(canonical.as_str()).map(|&i| (pattern, i)))
            .collect();

        let matcher = PatternMatcher::new(patterns, catalog.skill_count())?;

        Ok(Self {
            catalog,
            normalizer: TextNormalizer::new(),
            matcher,
        })
    }

    pub fn extract(&self, text: &str) -> KeywordSet {
        self.extract_normalized(&self.normalizer.normalize(text))
    }

    pub fn extract_normalized(&self, normalized: &str) -> KeywordSet {
        self.matcher
            .count(normalized)
            .into_iter()
            .enumerate()
            .filter(|(_, count)| *count > 0)
            .map(|(i, count)| (self.catalog.skills()[i].clone(), count))
            .collect()
    }

    pub fn catalog(&self) -> &SkillCatalog {
        &self.catalog
    }

    pub fn pattern_count(&self) -> usize {
        self.matcher.pattern_count()
    }
}
