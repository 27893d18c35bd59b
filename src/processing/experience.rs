//! Seniority and role relevance scoring

use crate::processing::catalog::SkillCatalog;
use crate::processing::normalizer::TextNormalizer;
use log::debug;
use std::sync::Arc;

/// Score returned when the job description names no experience level
pub const NEUTRAL_EXPERIENCE_SCORE: f32 = 70.0;
const BASE_SCALE: f32 = 80.0;
const VERB_BONUS_EACH: f32 = 2.0;
const VERB_BONUS_CAP: f32 = 20.0;

/// Keyword containment is plain substring matching on normalized text, so
/// "lead" is found inside "leadership".
pub struct ExperienceRelevanceScorer {
    catalog: Arc<SkillCatalog>,
    normalizer: TextNormalizer,
}

impl ExperienceRelevanceScorer {
    pub fn new(catalog: Arc<SkillCatalog>) -> Self {
        Self {
            catalog,
            normalizer: TextNormalizer::new(),
        }
    }

    pub fn score(&self, job_text: &str, resume_text: &str) -> f32 {
        let job = self.normalizer.normalize(job_text);
        let resume = self.normalizer.normalize(resume_text);

        let job_keywords: Vec<&String> = self
            .catalog
            .experience_keywords()
            .iter()
            .filter(|keyword| job.contains(keyword.as_str()))
            .collect();

        if job_keywords.is_empty() {
            return NEUTRAL_EXPERIENCE_SCORE;
        }

        let matched = job_keywords
            .iter()
            .filter(|keyword| resume.contains(keyword.as_str()))
            .count();
        let base = matched as f32 / job_keywords.len() as f32 * BASE_SCALE;

        let verbs = self
            .catalog
            .action_verbs()
            .iter()
            .filter(|verb| resume.contains(verb.as_str()))
            .count();
        let bonus = (verbs as f32 * VERB_BONUS_EACH).min(VERB_BONUS_CAP);

        debug!(
            "Experience: {}/{} level keywords matched, {} action verbs",
            matched,
            job_keywords.len(),
            verbs
        );

        (base + bonus).min(100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn scorer() -> ExperienceRelevanceScorer {
        ExperienceRelevanceScorer::new(Arc::new(SkillCatalog::builtin()))
    }

    #[test]
    fn test_neutral_when_job_names_no_level() {
        let score = scorer().score("We need Rust and Kafka", "Rust developer");
        assert_eq!(score, NEUTRAL_EXPERIENCE_SCORE);
    }

    #[test]
    fn test_partial_match_with_verb_bonus() {
        // job keywords: senior, engineer; resume has engineer only and one verb
        let score = scorer().score("Senior Engineer wanted", "Engineer who deployed services");
        assert_relative_eq!(score, 0.5 * 80.0 + 2.0, epsilon = 1e-4);
    }

    #[test]
    fn test_no_overlap_without_verbs() {
        let score = scorer().score("Principal architect", "Gardening and cooking");
        assert_eq!(score, 0.0);
    }

    #[test]
    fn test_verb_bonus_is_capped() {
        let resume = "Senior. developed implemented designed created built managed optimized \
                      improved increased decreased reduced launched";
        let score = scorer().score("Senior", resume);
        assert_eq!(score, 100.0);
    }

    #[test]
    fn test_score_bounds() {
        let scorer = scorer();
        let samples = [
            ("", ""),
            ("senior lead", ""),
            ("", "built and deployed"),
            ("junior developer", "junior developer who built, deployed, automated and led"),
        ];
        for (job, resume) in samples {
            let score = scorer.score(job, resume);
            assert!((0.0..=100.0).contains(&score), "{} out of range", score);
        }
    }
}
