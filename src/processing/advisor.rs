//! Rule-based improvement guidance

use serde::{Deserialize, Serialize};

/// How many missing skills the missing-skills tip names
const MISSING_SKILLS_SHOWN: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImprovementTip {
    pub category: String,
    pub tip: String,
    /// 1 is most urgent, 3 least
    pub priority: u8,
}

impl ImprovementTip {
    pub fn new(category: &str, tip: impl Into<String>, priority: u8) -> Self {
        Self {
            category: category.to_string(),
            tip: tip.into(),
            priority,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ImprovementAdvisor;

impl ImprovementAdvisor {
    pub fn new() -> Self {
        Self
    }

    /// Tips ordered by priority; always ends with at least the general ATS tip.
    ///
    /// `missing` is expected in importance order, `semantic` on [0, 1],
    /// `keyword` and `experience` on [0, 100].
    pub fn advise(&self, missing: &[String], semantic: f32, keyword: f32, experience: f32) -> Vec<ImprovementTip> {
        let mut tips = Vec::new();

        if !missing.is_empty() {
            let shown: Vec<&str> = missing.iter().take(MISSING_SKILLS_SHOWN).map(String::as_str).collect();
            tips.push(ImprovementTip::new(
                "Missing Skills",
                format!("Add these important skills to your resume: {}", shown.join(", ")),
                1,
            ));
        }

        if semantic < 0.6 {
            tips.push(ImprovementTip::new(
                "Content Alignment",
                "Rewrite your experience bullets to mirror the language and responsibilities in the job description",
                1,
            ));
        } else if semantic < 0.8 {
            tips.push(ImprovementTip::new(
                "Content Alignment",
                "Use more action verbs and quantify your achievements to better match the job requirements",
                2,
            ));
        }

        if keyword < 50.0 {
            tips.push(ImprovementTip::new(
                "Keyword Optimization",
                "Your resume is missing many key terms. Review the job description and incorporate relevant keywords naturally",
                1,
            ));
        } else if keyword < 75.0 {
            tips.push(ImprovementTip::new(
                "Keyword Optimization",
                "Add more technical skills from the job description to your Skills section",
                2,
            ));
        }

        if experience < 60.0 {
            tips.push(ImprovementTip::new(
                "Experience Match",
                "Highlight experience that directly relates to the job level and responsibilities mentioned",
                2,
            ));
        }

        tips.push(ImprovementTip::new(
            "General",
            "Ensure your resume is ATS-friendly: use standard section headers, avoid tables/graphics, and save as PDF",
            3,
        ));

        sort_by_priority(&mut tips);
        tips
    }

    /// Tip for a weak grammar score, `None` at 80 and above
    pub fn grammar_tip(&self, grammar_score: f32, issue_count: usize) -> Option<ImprovementTip> {
        if grammar_score >= 80.0 {
            return None;
        }

        let priority = if grammar_score < 60.0 { 1 } else { 2 };
        Some(ImprovementTip::new(
            "Grammar & Spelling",
            format!(
                "Fix {} grammar/spelling issues found in your resume to improve professionalism",
                issue_count
            ),
            priority,
        ))
    }
}

/// Stable sort, so tips of equal priority keep their insertion order
pub fn sort_by_priority(tips: &mut [ImprovementTip]) {
    tips.sort_by_key(|tip| tip.priority);
}
