//! Text normalization shared by every keyword-based scorer

use regex::Regex;

/// Symbol-bearing tokens that must survive punctuation stripping, with the
/// alphanumeric placeholder used while the strip runs
const PROTECTED_TOKENS: &[(&str, &str)] = &[("c++", "cplusplus"), ("c#", "csharp")];

pub struct TextNormalizer {
    noise_regex: Regex,
    whitespace_regex: Regex,
}

impl Default for TextNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl TextNormalizer {
    pub fn new() -> Self {
        // '.' and '/' stay so "node.js" and "ci/cd" remain single tokens
        let noise_regex = Regex::new(r"[^a-z0-9\s./]").expect("Invalid noise regex");
        let whitespace_regex = Regex::new(r"\s+").expect("Invalid whitespace regex");

        Self {
            noise_regex,
            whitespace_regex,
        }
    }

    /// Lowercase, strip noise symbols and collapse whitespace.
    ///
    /// Output holds lowercase ASCII letters, digits, single spaces, `.` and `/`;
    /// `+` and `#` appear only inside protected tokens such as `c++` and `c#`.
    /// Idempotent.
    pub fn normalize(&self, text: &str) -> String {
        let mut normalized = text.to_lowercase().replace(['\n', '\r'], " ");

        for (token, placeholder) in PROTECTED_TOKENS {
            normalized = normalized.replace(token, placeholder);
        }

        normalized = self.noise_regex.replace_all(&normalized, " ").into_owned();

        for (token, placeholder) in PROTECTED_TOKENS {
            normalized = normalized.replace(placeholder, token);
        }

        self.whitespace_regex
            .replace_all(&normalized, " ")
            .trim()
            .to_string()
    }

    /// Absent input normalizes to the empty string
    pub fn normalize_opt(&self, text: Option<&str>) -> String {
        text.map(|t| self.normalize(t)).unwrap_or_default()
    }
}

/// Whitespace-delimited word count of the raw text
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}
