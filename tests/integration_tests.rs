//! Integration tests for the resume scorer

use async_trait::async_trait;
use resume_scorer::config::Config;
use resume_scorer::error::{Result, ScorerError};
use resume_scorer::input::InputManager;
use resume_scorer::output::ReportGenerator;
use resume_scorer::processing::embeddings::EmbeddingBackend;
use resume_scorer::processing::grammar::{GrammarBackend, GrammarMatch};
use resume_scorer::processing::{AnalysisEngine, SkillCatalog};
use resume_scorer::config::OutputFormat;
use std::path::Path;
use std::sync::Arc;

/// Hashed bag-of-words vectors, enough to make similar texts score high
struct HashedWordsBackend;

impl EmbeddingBackend for HashedWordsBackend {
    fn encode(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        Ok(texts
            .iter()
            .map(|text| {
                let mut vector = vec![0.0f32; 64];
                for word in text.split_whitespace() {
                    let bucket = word
                        .to_lowercase()
                        .bytes()
                        .fold(0usize, |acc, b| acc.wrapping_mul(31).wrapping_add(b as usize));
                    vector[bucket % 64] += 1.0;
                }
                vector
            })
            .collect())
    }
}

struct OneTypoGrammar;

#[async_trait]
impl GrammarBackend for OneTypoGrammar {
    async fn check(&self, _text: &str) -> Result<Vec<GrammarMatch>> {
        Ok(vec![GrammarMatch {
            rule_id: "MORFOLOGIK_RULE_EN_US".to_string(),
            message: "Possible spelling mistake found.".to_string(),
            context: "Deployed on AWS usign Docker.".to_string(),
            replacements: vec!["using".to_string()],
        }])
    }
}

fn engine_with_backends() -> AnalysisEngine {
    AnalysisEngine::new(
        &Config::default(),
        Arc::new(SkillCatalog::builtin()),
        Some(Arc::new(HashedWordsBackend)),
        Some(Arc::new(OneTypoGrammar)),
    )
    .unwrap()
}

fn engine_without_backends() -> AnalysisEngine {
    AnalysisEngine::new(&Config::default(), Arc::new(SkillCatalog::builtin()), None, None).unwrap()
}

#[tokio::test]
async fn test_text_extraction_from_txt() {
    let mut manager = InputManager::new();
    let path = Path::new("tests/fixtures/sample_resume.txt");

    let text = manager.extract_text(path).await.unwrap();
    assert!(text.contains("John Doe"));
    assert!(text.contains("Software Engineer"));
    assert!(text.contains("React"));
    assert!(text.contains("Node.js"));
}

#[tokio::test]
async fn test_text_extraction_from_markdown() {
    let mut manager = InputManager::new();
    let path = Path::new("tests/fixtures/sample_resume.md");

    let text = manager.extract_text(path).await.unwrap();
    assert!(text.contains("John Doe"));
    assert!(text.contains("Software Engineer"));
    assert!(text.contains("React"));
    assert!(text.contains("Node.js"));
    assert!(!text.contains("**"));
    assert!(!text.contains("##"));
    assert!(!text.contains('|'));
}

#[tokio::test]
async fn test_caching_functionality() {
    let mut manager = InputManager::new();
    let path = Path::new("tests/fixtures/sample_resume.txt");

    let text1 = manager.extract_text(path).await.unwrap();
    assert_eq!(manager.cache_size(), 1);

    let text2 = manager.extract_text(path).await.unwrap();
    assert_eq!(text1, text2);
    assert_eq!(manager.cache_size(), 1);

    manager.clear_cache();
    assert_eq!(manager.cache_size(), 0);
}

#[tokio::test]
async fn test_unsupported_file_type() {
    let mut manager = InputManager::new();
    let result = manager.extract_text(Path::new("tests/fixtures/unsupported.xyz")).await;
    assert!(matches!(result, Err(ScorerError::UnsupportedFormat(_))));
}

#[tokio::test]
async fn test_nonexistent_file() {
    let mut manager = InputManager::new();
    let result = manager.extract_text(Path::new("tests/fixtures/nonexistent.txt")).await;
    assert!(matches!(result, Err(ScorerError::InvalidInput(_))));
}

#[tokio::test]
async fn test_python_django_aws_scenario() {
    let result = engine_without_backends()
        .analyze(
            "Looking for a Python developer with Django and AWS experience",
            "Experienced Python developer. Built REST APIs with Django. Deployed on AWS using Docker.",
        )
        .await
        .unwrap();

    for skill in ["python", "django", "aws"] {
        assert!(result.job_description_keywords.contains(&skill.to_string()), "job missing {}", skill);
    }
    for skill in ["python", "django", "aws", "docker", "rest api"] {
        assert!(result.detected_keywords.contains(&skill.to_string()), "resume missing {}", skill);
    }
    assert_eq!(result.breakdown.keyword_match, 100.0);
    assert!(result.missing_keywords.is_empty());
    assert!(result.improvement_tips.iter().all(|t| t.category != "Missing Skills"));
}

#[tokio::test]
async fn test_missing_kubernetes_scenario() {
    let result = engine_without_backends()
        .analyze(
            "We need hands-on Kubernetes knowledge.",
            "Python developer who ships Docker images.",
        )
        .await
        .unwrap();

    assert_eq!(result.missing_keywords.len(), 1);
    assert_eq!(result.missing_keywords[0].keyword, "kubernetes");
    assert!(result.missing_keywords[0].importance >= 1);
    assert_eq!(result.breakdown.keyword_match, 0.0);

    let first = &result.improvement_tips[0];
    assert_eq!(first.category, "Missing Skills");
    assert!(first.tip.ends_with("kubernetes"));
}

#[tokio::test]
async fn test_fixture_documents_end_to_end() {
    let mut manager = InputManager::new();
    let job = manager.extract_text(Path::new("tests/fixtures/sample_job.txt")).await.unwrap();
    let resume = manager.extract_text(Path::new("tests/fixtures/sample_resume.txt")).await.unwrap();

    let result = engine_with_backends().analyze(&job, &resume).await.unwrap();

    let missing: Vec<&str> = result.missing_keywords.iter().map(|m| m.keyword.as_str()).collect();
    assert!(missing.contains(&"terraform"));
    assert!(missing.contains(&"kafka"));
    assert!(!missing.contains(&"python"));
    assert!(result.missing_keywords.windows(2).all(|w| w[0].importance >= w[1].importance));

    let b = &result.breakdown;
    for score in [b.keyword_match, b.semantic_similarity, b.skills_coverage, b.experience_relevance, b.grammar] {
        assert!((0.0..=100.0).contains(&score), "score {} out of range", score);
    }
    assert!(b.semantic_similarity > 0.0);
    assert!(b.keyword_match > 0.0 && b.keyword_match < 100.0);
    assert!((0.0..=100.0).contains(&result.overall_score));

    assert_eq!(result.grammar_issues.len(), 1);
    assert_eq!(result.grammar_issues[0].suggestions, vec!["using"]);
    assert!(result.improvement_tips.windows(2).all(|w| w[0].priority <= w[1].priority));
    assert_eq!(result.improvement_tips.last().unwrap().category, "General");

    let weights: Vec<&str> = result.job_skill_weights.iter().map(|w| w.skill.as_str()).collect();
    assert!(weights.contains(&"kubernetes"));
    for pair in result.job_skill_weights.windows(2) {
        assert!(pair[0].weight >= pair[1].weight);
    }
}

#[tokio::test]
async fn test_markdown_job_against_markdown_resume() {
    let mut manager = InputManager::new();
    let job = manager.extract_text(Path::new("tests/fixtures/kubernetes_job.md")).await.unwrap();
    let resume = manager.extract_text(Path::new("tests/fixtures/sample_resume.md")).await.unwrap();

    let result = engine_without_backends().analyze(&job, &resume).await.unwrap();
    assert_eq!(result.job_description_keywords, vec!["kubernetes"]);
    assert_eq!(result.breakdown.keyword_match, 100.0);
    assert_eq!(result.breakdown.skills_coverage, 100.0);
}

#[tokio::test]
async fn test_identical_documents_score_high() {
    let text = "Senior Rust engineer. Built distributed systems with Kafka, Kubernetes and PostgreSQL.";
    let result = engine_with_backends().analyze(text, text).await.unwrap();

    assert_eq!(result.breakdown.keyword_match, 100.0);
    assert!((result.breakdown.semantic_similarity - 100.0).abs() < 1e-3);
    assert!(result.missing_keywords.is_empty());
    assert!(result.overall_score > 80.0);
}

#[tokio::test]
async fn test_reports_render_in_every_format() {
    let result = engine_with_backends()
        .analyze("Python and Kubernetes", "Python developer")
        .await
        .unwrap();

    let generator = ReportGenerator::with_options(false, true);
    let console = generator.generate_report(&result, OutputFormat::Console).unwrap();
    assert!(console.contains("Overall Score"));
    assert!(console.contains("kubernetes"));

    let json = generator.generate_report(&result, OutputFormat::Json).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["missing_keywords"][0]["keyword"], "kubernetes");
    assert!(value["breakdown"]["keyword_match"].is_number());

    let markdown = generator.generate_report(&result, OutputFormat::Markdown).unwrap();
    assert!(markdown.contains("| kubernetes | 1 |"));
}

#[tokio::test]
async fn test_blank_documents_are_rejected() {
    let engine = engine_without_backends();
    assert!(matches!(engine.analyze("", "resume").await, Err(ScorerError::InvalidInput(_))));
    assert!(matches!(engine.analyze("job", "   ").await, Err(ScorerError::InvalidInput(_))));
}
