//! Skill vocabulary: canonical skills, synonyms, experience keywords and action verbs

use crate::config::CatalogConfig;
use crate::error::{Result, ScorerError};
use crate::processing::normalizer::TextNormalizer;
use std::collections::HashMap;

/// One canonical skill and the alternate spellings that map onto it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillEntry {
    pub canonical: String,
    pub synonyms: Vec<String>,
}

impl SkillEntry {
    pub fn new(canonical: &str, synonyms: &[&str]) -> Self {
        Self {
            canonical: canonical.trim().to_lowercase(),
            synonyms: synonyms.iter().map(|s| s.trim().to_lowercase()).collect(),
        }
    }
}

/// Immutable skill vocabulary shared by all scorers.
///
/// Every synonym resolves to exactly one canonical skill and no synonym may
/// shadow another canonical name, so [`SkillCatalog::canonicalize`] is a
/// total, unambiguous function.
#[derive(Debug, Clone)]
pub struct SkillCatalog {
    entries: Vec<SkillEntry>,
    skills: Vec<String>,
    synonym_index: HashMap<String, String>,
    experience_keywords: Vec<String>,
    action_verbs: Vec<String>,
}

impl SkillCatalog {
    pub fn new(
        entries: Vec<SkillEntry>,
        experience_keywords: Vec<String>,
        action_verbs: Vec<String>,
    ) -> Result<Self> {
        let mut merged: Vec<SkillEntry> = Vec::with_capacity(entries.len());
        let mut positions: HashMap<String, usize> = HashMap::new();

        // Repeated canonical names merge their synonym lists
        for entry in entries {
            if entry.canonical.is_empty() {
                return Err(ScorerError::Configuration("Skill names must not be empty".to_string()));
            }
            match positions.get(&entry.canonical) {
                Some(&idx) => {
                    for synonym in entry.synonyms {
                        if !merged[idx].synonyms.contains(&synonym) {
                            merged[idx].synonyms.push(synonym);
                        }
                    }
                }
                None => {
                    positions.insert(entry.canonical.clone(), merged.len());
                    merged.push(entry);
                }
            }
        }

        let mut synonym_index = HashMap::new();
        for entry in &merged {
            for synonym in &entry.synonyms {
                if synonym.is_empty() || *synonym == entry.canonical {
                    continue;
                }
                if positions.contains_key(synonym) {
                    return Err(ScorerError::Configuration(format!(
                        "Synonym '{}' of '{}' is itself a canonical skill",
                        synonym, entry.canonical
                    )));
                }
                if let Some(existing) = synonym_index.insert(synonym.clone(), entry.canonical.clone()) {
                    if existing != entry.canonical {
                        return Err(ScorerError::Configuration(format!(
                            "Synonym '{}' maps to both '{}' and '{}'",
                            synonym, existing, entry.canonical
                        )));
                    }
                }
            }
        }

        // Text is matched after normalization, so names must stay distinct in that form
        let normalizer = TextNormalizer::new();
        let mut normalized_index: HashMap<String, &str> = HashMap::new();
        for entry in &merged {
            let names = std::iter::once(&entry.canonical)
                .chain(entry.synonyms.iter().filter(|s| synonym_index.get(*s) == Some(&entry.canonical)));
            for name in names {
                let normalized = normalizer.normalize(name);
                if normalized.is_empty() {
                    return Err(ScorerError::Configuration(format!(
                        "Skill name '{}' has no matchable characters",
                        name
                    )));
                }
                if let Some(existing) = normalized_index.insert(normalized.clone(), &entry.canonical) {
                    if existing != entry.canonical {
                        return Err(ScorerError::Configuration(format!(
                            "'{}' matches the same text as a name of '{}'",
                            name, existing
                        )));
                    }
                }
            }
        }

        let skills = merged.iter().map(|e| e.canonical.clone()).collect();

        Ok(Self {
            entries: merged,
            skills,
            synonym_index,
            experience_keywords: lowercase_all(experience_keywords),
            action_verbs: lowercase_all(action_verbs),
        })
    }

    /// Built-in technology catalog
    pub fn builtin() -> Self {
        Self::new(
            default_skill_entries(),
            DEFAULT_EXPERIENCE_KEYWORDS.iter().map(|s| s.to_string()).collect(),
            DEFAULT_ACTION_VERBS.iter().map(|s| s.to_string()).collect(),
        )
        .expect("built-in skill catalog is consistent")
    }

    /// Built-in catalog extended with the vocabulary from config
    pub fn from_config(config: &CatalogConfig) -> Result<Self> {
        let mut entries = default_skill_entries();
        entries.extend(config.extra_skills.iter().map(|skill| SkillEntry::new(skill, &[])));
        for (canonical, synonyms) in &config.extra_synonyms {
            let synonyms: Vec<&str> = synonyms.iter().map(String::as_str).collect();
            entries.push(SkillEntry::new(canonical, &synonyms));
        }

        Self::new(
            entries,
            DEFAULT_EXPERIENCE_KEYWORDS.iter().map(|s| s.to_string()).collect(),
            DEFAULT_ACTION_VERBS.iter().map(|s| s.to_string()).collect(),
        )
    }

    /// Map a skill or synonym to its canonical form; unknown strings pass through lowercased
    pub fn canonicalize(&self, skill: &str) -> String {
        let lowered = skill.trim().to_lowercase();
        match self.synonym_index.get(&lowered) {
            Some(canonical) => canonical.clone(),
            None => lowered,
        }
    }

    /// Every (pattern, canonical) pair: canonical names plus all synonyms
    pub fn patterns(&self) -> Vec<(String, String)> {
        let mut patterns = Vec::with_capacity(self.skills.len() + self.synonym_index.len());
        for entry in &self.entries {
            patterns.push((entry.canonical.clone(), entry.canonical.clone()));
            for synonym in &entry.synonyms {
                if self.synonym_index.get(synonym) == Some(&entry.canonical) {
                    patterns.push((synonym.clone(), entry.canonical.clone()));
                }
            }
        }
        patterns.dedup_by(|a, b| a.0 == b.0);
        patterns
    }

    pub fn skills(&self) -> &[String] {
        &self.skills
    }

    pub fn entries(&self) -> &[SkillEntry] {
        &self.entries
    }

    pub fn experience_keywords(&self) -> &[String] {
        &self.experience_keywords
    }

    pub fn action_verbs(&self) -> &[String] {
        &self.action_verbs
    }

    pub fn skill_count(&self) -> usize {
        self.skills.len()
    }

    pub fn synonym_count(&self) -> usize {
        self.synonym_index.len()
    }
}

impl Default for SkillCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

fn lowercase_all(words: Vec<String>) -> Vec<String> {
    words.into_iter().map(|w| w.trim().to_lowercase()).collect()
}

const DEFAULT_EXPERIENCE_KEYWORDS: &[&str] = &[
    "senior", "junior", "lead", "principal", "staff", "manager", "director",
    "head", "chief", "architect", "engineer", "developer", "analyst", "specialist",
    "consultant", "intern", "associate", "entry level", "mid level", "experienced",
];

const DEFAULT_ACTION_VERBS: &[&str] = &[
    "developed", "implemented", "designed", "created", "built", "led", "managed",
    "optimized", "improved", "increased", "decreased", "reduced", "launched",
    "deployed", "architected", "spearheaded", "collaborated", "coordinated",
    "streamlined", "automated", "resolved", "analyzed", "delivered", "achieved",
];

/// Skills without synonyms, grouped the way job descriptions tend to list them
const PLAIN_SKILLS: &[&str] = &[
    // Programming languages
    "java", "go", "rust", "php", "ruby", "swift", "kotlin", "scala", "r", "matlab",
    "perl", "bash", "shell scripting",
    // Web
    "express", "next.js", "html", "css", "sass", "less", "tailwind", "bootstrap",
    "jquery", "webpack", "django", "flask", "rails", "spring boot", "dotnet",
    // Databases
    "sql", "nosql", "mysql", "redis", "elasticsearch", "oracle", "sqlite",
    "cassandra", "dynamodb", "firebase",
    // Cloud & DevOps
    "docker", "terraform", "jenkins", "ci/cd", "github actions", "gitlab",
    "ansible", "puppet", "chef", "containerization",
    // Data science & ML
    "data science", "pytorch", "tensorflow", "keras", "scikit-learn", "pandas",
    "numpy", "spark", "hadoop", "kafka", "airflow", "dbt", "statistical analysis",
    "predictive modeling", "big data analytics",
    // Methodologies & practices
    "agile", "scrum", "kanban", "devops", "devsecops", "tdd", "bdd",
    "microservices", "graphql", "grpc",
    // Tools & platforms
    "git", "jira", "confluence", "slack", "figma", "tableau", "power bi", "excel",
    "linux", "unix", "windows",
    // Soft skills
    "problem solving", "communication", "teamwork", "leadership", "project management",
    // Domains
    "cybersecurity", "security", "blockchain", "mobile development", "android", "ios",
    "web development", "frontend", "backend", "fullstack", "data analysis",
    "data visualization", "cloud computing", "cloud security", "networking",
    "system design", "api design", "database management", "distributed systems",
    "computer vision", "reinforcement learning", "big data", "etl", "data warehousing",
    // Common job-description terms
    "software development", "coding", "programming", "clean code", "scalable",
    "design patterns", "debugging", "testing", "unit testing", "integration testing",
    "end-to-end testing", "qa", "automation", "performance", "performance tuning",
    "optimization", "mentoring", "collaboration", "technical documentation",
    "computer science", "bachelor", "master", "degree",
];

fn default_skill_entries() -> Vec<SkillEntry> {
    let mut entries = vec![
        SkillEntry::new("python", &["py", "python3", "python2"]),
        SkillEntry::new("javascript", &["js", "es6", "ecmascript", "es2015", "es2020"]),
        SkillEntry::new("typescript", &["ts"]),
        SkillEntry::new("c++", &["cpp"]),
        SkillEntry::new("c#", &["c sharp"]),
        SkillEntry::new("react", &["reactjs", "react.js"]),
        SkillEntry::new("angular", &["angularjs", "angular.js"]),
        SkillEntry::new("vue.js", &["vue", "vuejs"]),
        SkillEntry::new("node.js", &["nodejs", "node"]),
        SkillEntry::new("postgresql", &["postgres", "psql", "pg"]),
        SkillEntry::new("mongodb", &["mongo"]),
        SkillEntry::new("aws", &["amazon web services"]),
        SkillEntry::new("azure", &["microsoft azure"]),
        SkillEntry::new("google cloud", &["gcp", "google cloud platform"]),
        SkillEntry::new("kubernetes", &["k8s"]),
        SkillEntry::new("continuous integration", &["ci"]),
        SkillEntry::new("continuous delivery", &["cd"]),
        SkillEntry::new("machine learning", &["ml", "ai", "artificial intelligence"]),
        SkillEntry::new("deep learning", &["dl", "neural networks", "neural network"]),
        SkillEntry::new("natural language processing", &["nlp"]),
        SkillEntry::new("rest api", &["restful", "rest", "restful api"]),
        SkillEntry::new("ui/ux", &["ui", "ux", "user interface", "user experience"]),
        SkillEntry::new(
            "software engineer",
            &["swe", "sde", "software developer", "software development engineer", "software dev"],
        ),
        SkillEntry::new("data structures", &["dsa", "ds"]),
        SkillEntry::new("algorithms", &["algo", "algos"]),
        SkillEntry::new("object oriented programming", &["oop", "object oriented"]),
        SkillEntry::new("site reliability engineering", &["sre"]),
    ];
    entries.extend(PLAIN_SKILLS.iter().map(|skill| SkillEntry::new(skill, &[])));
    entries
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog_is_consistent() {
        let catalog = SkillCatalog::builtin();
        assert!(catalog.skill_count() > 100);
        assert!(catalog.synonym_count() > 40);

        let mut seen = std::collections::HashSet::new();
        for skill in catalog.skills() {
            assert!(seen.insert(skill.clone()), "duplicate skill {}", skill);
            assert_eq!(skill, &skill.to_lowercase());
        }
    }

    #[test]
    fn test_canonicalize() {
        let catalog = SkillCatalog::builtin();
        assert_eq!(catalog.canonicalize("K8s"), "kubernetes");
        assert_eq!(catalog.canonicalize(" postgres "), "postgresql");
        assert_eq!(catalog.canonicalize("Amazon Web Services"), "aws");
        assert_eq!(catalog.canonicalize("aws"), "aws");
        assert_eq!(catalog.canonicalize("Kubernetes"), "kubernetes");
        assert_eq!(catalog.canonicalize("Haskell"), "haskell");
    }

    #[test]
    fn test_patterns_cover_skills_and_synonyms() {
        let catalog = SkillCatalog::builtin();
        let patterns = catalog.patterns();
        assert_eq!(patterns.len(), catalog.skill_count() + catalog.synonym_count());
        assert!(patterns.contains(&("k8s".to_string(), "kubernetes".to_string())));
        assert!(patterns.contains(&("django".to_string(), "django".to_string())));
        assert!(patterns.iter().all(|(_, canonical)| catalog.skills().contains(canonical)));
    }

    #[test]
    fn test_conflicting_synonym_is_rejected() {
        let result = SkillCatalog::new(
            vec![SkillEntry::new("go", &["golang"]), SkillEntry::new("rust", &["golang"])],
            vec![],
            vec![],
        );
        assert!(matches!(result, Err(ScorerError::Configuration(_))));
    }

    #[test]
    fn test_synonym_shadowing_canonical_is_rejected() {
        let result = SkillCatalog::new(
            vec![SkillEntry::new("python", &["django"]), SkillEntry::new("django", &[])],
            vec![],
            vec![],
        );
        assert!(matches!(result, Err(ScorerError::Configuration(_))));
    }

    #[test]
    fn test_names_colliding_after_normalization_are_rejected() {
        let result = SkillCatalog::new(
            vec![SkillEntry::new("ci-cd", &[]), SkillEntry::new("ci cd", &[])],
            vec![],
            vec![],
        );
        assert!(matches!(result, Err(ScorerError::Configuration(_))));

        let result = SkillCatalog::new(vec![SkillEntry::new("++", &[])], vec![], vec![]);
        assert!(matches!(result, Err(ScorerError::Configuration(_))));
    }

    #[test]
    fn test_config_extends_builtin() {
        let mut config = CatalogConfig::default();
        config.extra_skills.push("Haskell".to_string());
        config
            .extra_synonyms
            .insert("go".to_string(), vec!["golang".to_string()]);

        let catalog = SkillCatalog::from_config(&config).unwrap();
        assert!(catalog.skills().contains(&"haskell".to_string()));
        assert_eq!(catalog.canonicalize("golang"), "go");
        assert_eq!(catalog.skill_count(), SkillCatalog::builtin().skill_count() + 1);
    }
}
