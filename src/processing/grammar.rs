//! Grammar and spelling quality via a LanguageTool server

use crate::config::GrammarConfig;
use crate::error::{Result, ScorerError};
use crate::processing::normalizer::word_count;
use crate::processing::scoring::round1;
use async_trait::async_trait;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::OnceCell;
use unicode_segmentation::UnicodeSegmentation;

/// One raw finding reported by a grammar backend
#[derive(Debug, Clone, PartialEq)]
pub struct GrammarMatch {
    pub rule_id: String,
    pub message: String,
    pub context: String,
    pub replacements: Vec<String>,
}

/// A finding as surfaced to the user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrammarIssue {
    pub message: String,
    pub context: String,
    pub suggestions: Vec<String>,
}

#[async_trait]
pub trait GrammarBackend: Send + Sync {
    async fn check(&self, text: &str) -> Result<Vec<GrammarMatch>>;
}

#[derive(Debug, Deserialize)]
struct CheckResponse {
    #[serde(default)]
    matches: Vec<LtMatch>,
}

#[derive(Debug, Deserialize)]
struct LtMatch {
    message: String,
    #[serde(default)]
    replacements: Vec<LtReplacement>,
    context: Option<LtContext>,
    rule: LtRule,
}

#[derive(Debug, Deserialize)]
struct LtReplacement {
    value: String,
}

#[derive(Debug, Deserialize)]
struct LtContext {
    text: String,
}

#[derive(Debug, Deserialize)]
struct LtRule {
    id: String,
}

impl From<LtMatch> for GrammarMatch {
    fn from(m: LtMatch) -> Self {
        Self {
            rule_id: m.rule.id,
            message: m.message,
            context: m.context.map(|c| c.text).unwrap_or_default(),
            replacements: m.replacements.into_iter().map(|r| r.value).collect(),
        }
    }
}

/// HTTP client for the LanguageTool `/v2/check` endpoint.
///
/// The underlying HTTP client is built on the first check and reused.
pub struct LanguageToolClient {
    server_url: String,
    language: String,
    timeout: Duration,
    client: OnceCell<reqwest::Client>,
}

impl LanguageToolClient {
    pub fn new(config: &GrammarConfig) -> Self {
        Self {
            server_url: config.server_url.trim_end_matches('/').to_string(),
            language: config.language.clone(),
            timeout: Duration::from_secs(config.timeout_secs),
            client: OnceCell::new(),
        }
    }

    pub fn endpoint(&self) -> String {
        format!("{}/v2/check", self.server_url)
    }

    async fn client(&self) -> Result<&reqwest::Client> {
        self.client
            .get_or_try_init(|| async {
                debug!("Building LanguageTool HTTP client for {}", self.server_url);
                reqwest::Client::builder()
                    .timeout(self.timeout)
                    .build()
                    .map_err(ScorerError::from)
            })
            .await
    }
}

#[async_trait]
impl GrammarBackend for LanguageToolClient {
    async fn check(&self, text: &str) -> Result<Vec<GrammarMatch>> {
        let response = self
            .client()
            .await?
            .post(self.endpoint())
            .form(&[("text", text), ("language", self.language.as_str())])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ScorerError::Grammar(format!(
                "LanguageTool returned {}: {}",
                status, body
            )));
        }

        let body = response.text().await?;
        parse_check_response(&body)
    }
}

fn parse_check_response(body: &str) -> Result<Vec<GrammarMatch>> {
    let parsed: CheckResponse = serde_json::from_str(body)?;
    Ok(parsed.matches.into_iter().map(GrammarMatch::from).collect())
}

/// Converts backend findings into a 0-100 score and a short issue list.
///
/// The score is driven by every raw match; the issue list only shows the
/// first `max_issues` matches minus cosmetic rules.
#[derive(Clone)]
pub struct GrammarScorer {
    backend: Option<Arc<dyn GrammarBackend>>,
    max_issues: usize,
    max_context_chars: usize,
    max_suggestions: usize,
    ignored_rules: Vec<String>,
}

impl GrammarScorer {
    pub fn new(backend: Option<Arc<dyn GrammarBackend>>, config: &GrammarConfig) -> Self {
        Self {
            backend,
            max_issues: config.max_issues,
            max_context_chars: config.max_context_chars,
            max_suggestions: config.max_suggestions,
            ignored_rules: config.ignored_rules.clone(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.backend.is_some()
    }

    /// `(100.0, [])` for blank text, no backend, or a failing backend
    pub async fn check(&self, text: &str) -> (f32, Vec<GrammarIssue>) {
        let Some(backend) = &self.backend else {
            return (100.0, Vec::new());
        };

        let words = word_count(text);
        if words == 0 {
            return (100.0, Vec::new());
        }

        match backend.check(text).await {
            Ok(matches) => self.score_matches(matches, words),
            Err(e) => {
                warn!("Grammar check failed: {}", e);
                (100.0, Vec::new())
            }
        }
    }

    fn score_matches(&self, matches: Vec<GrammarMatch>, words: usize) -> (f32, Vec<GrammarIssue>) {
        let error_rate = matches.len() as f32 / words as f32 * 100.0;
        let score = round1((100.0 - error_rate * 10.0).clamp(0.0, 100.0));

        debug!("Grammar: {} matches over {} words, score {}", matches.len(), words, score);

        let issues = matches
            .into_iter()
            .take(self.max_issues)
            .filter(|m| !self.ignored_rules.contains(&m.rule_id))
            .map(|m| GrammarIssue {
                message: m.message,
                context: m.context.graphemes(true).take(self.max_context_chars).collect(),
                suggestions: m.replacements.into_iter().take(self.max_suggestions).collect(),
            })
            .collect();

        (score, issues)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct StubBackend {
        matches: Vec<GrammarMatch>,
    }

    #[async_trait]
    impl GrammarBackend for StubBackend {
        async fn check(&self, _text: &str) -> Result<Vec<GrammarMatch>> {
            Ok(self.matches.clone())
        }
    }

    struct FailingBackend;

    #[async_trait]
    impl GrammarBackend for FailingBackend {
        async fn check(&self, _text: &str) -> Result<Vec<GrammarMatch>> {
            Err(ScorerError::Grammar("server unreachable".to_string()))
        }
    }

    fn finding(rule_id: &str) -> GrammarMatch {
        GrammarMatch {
            rule_id: rule_id.to_string(),
            message: format!("{} message", rule_id),
            context: "ctx".to_string(),
            replacements: vec!["a".into(), "b".into(), "c".into(), "d".into()],
        }
    }

    fn scorer_with(matches: Vec<GrammarMatch>) -> GrammarScorer {
        GrammarScorer::new(Some(Arc::new(StubBackend { matches })), &GrammarConfig::default())
    }

    #[tokio::test]
    async fn test_clean_text_scores_full() {
        let (score, issues) = scorer_with(vec![]).check("This sentence is fine.").await;
        assert_eq!(score, 100.0);
        assert!(issues.is_empty());
    }

    #[tokio::test]
    async fn test_score_from_error_rate() {
        // 1 match over 20 words: 5 errors per 100 words
        let text = vec!["word"; 20].join(" ");
        let (score, issues) = scorer_with(vec![finding("MORFOLOGIK_RULE_EN_US")]).check(&text).await;
        assert_eq!(score, 50.0);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].suggestions, vec!["a", "b", "c"]);
    }

    #[tokio::test]
    async fn test_score_clamps_at_zero() {
        let (score, _) = scorer_with(vec![finding("A"), finding("B")]).check("two words").await;
        assert_eq!(score, 0.0);
    }

    #[tokio::test]
    async fn test_cosmetic_rules_filtered_but_counted() {
        let text = vec!["word"; 100].join(" ");
        let matches = vec![
            finding("WHITESPACE_RULE"),
            finding("UPPERCASE_SENTENCE_START"),
            finding("COMMA_PARENTHESIS_WHITESPACE"),
        ];
        let (score, issues) = scorer_with(matches).check(&text).await;
        assert_eq!(score, 70.0);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].message, "UPPERCASE_SENTENCE_START message");
    }

    #[tokio::test]
    async fn test_issue_list_takes_first_fifteen_then_filters() {
        let text = vec!["word"; 1000].join(" ");
        let mut matches: Vec<GrammarMatch> = (0..14).map(|i| finding(&format!("RULE_{}", i))).collect();
        matches.push(finding("WHITESPACE_RULE"));
        matches.extend((14..20).map(|i| finding(&format!("RULE_{}", i))));

        let (_, issues) = scorer_with(matches).check(&text).await;
        assert_eq!(issues.len(), 14);
    }

    #[tokio::test]
    async fn test_context_truncated_by_graphemes() {
        let mut long = finding("RULE");
        long.context = "é".repeat(150);
        let (_, issues) = scorer_with(vec![long]).check("some text here").await;
        assert_eq!(issues[0].context.graphemes(true).count(), 100);
    }

    #[tokio::test]
    async fn test_fallbacks() {
        let config = GrammarConfig::default();

        let absent = GrammarScorer::new(None, &config);
        assert!(!absent.is_enabled());
        assert_eq!(absent.check("Some text").await, (100.0, vec![]));

        let failing = GrammarScorer::new(Some(Arc::new(FailingBackend)), &config);
        assert_eq!(failing.check("Some text").await, (100.0, vec![]));

        assert_eq!(scorer_with(vec![finding("A")]).check("   ").await, (100.0, vec![]));
    }

    #[test]
    fn test_parse_languagetool_response() {
        let body = r#"{
            "software": {"name": "LanguageTool"},
            "matches": [{
                "message": "Possible spelling mistake found.",
                "offset": 0,
                "length": 4,
                "replacements": [{"value": "This"}, {"value": "Thus"}],
                "context": {"text": "Thsi is a test.", "offset": 0, "length": 4},
                "rule": {"id": "MORFOLOGIK_RULE_EN_US", "description": "Spelling"}
            }]
        }"#;

        let matches = parse_check_response(body).unwrap();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].rule_id, "MORFOLOGIK_RULE_EN_US");
        assert_eq!(matches[0].context, "Thsi is a test.");
        assert_eq!(matches[0].replacements, vec!["This", "Thus"]);
    }

    #[test]
    fn test_malformed_response_is_error() {
        assert!(matches!(
            parse_check_response("<html>"),
            Err(ScorerError::Serialization(_))
        ));
    }

    #[test]
    fn test_endpoint_trims_trailing_slash() {
        let mut config = GrammarConfig::default();
        config.server_url = "http://lt.local:8010/".to_string();
        assert_eq!(LanguageToolClient::new(&config).endpoint(), "http://lt.local:8010/v2/check");
    }
}
