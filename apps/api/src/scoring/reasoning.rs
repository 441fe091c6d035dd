//! Reasoning — one fixed sentence explaining the score, chosen by tier and
//! detected domain. Deterministic: the same inputs always pick the same template.

use serde::{Deserialize, Serialize};

use crate::scoring::visa::VisaStatus;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreTier {
    High,
    Medium,
    Low,
}

impl ScoreTier {
    pub fn from_score(fit_score: f64) -> Self {
        if fit_score >= 75.0 {
            ScoreTier::High
        } else if fit_score >= 50.0 {
            ScoreTier::Medium
        } else {
            ScoreTier::Low
        }
    }
}

/// Dominant kind of work, in precedence order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Domain {
    MachineLearning,
    Backend,
    FullStack,
    General,
}

const ML_TERMS: &[&str] = &[
    "machine learning",
    "ml",
    "ai",
    "data science",
    "nlp",
    "deep learning",
    "pytorch",
    "tensorflow",
];
const BACKEND_TERMS: &[&str] = &[
    "backend",
    "api",
    "server",
    "database",
    "microservices",
    "rest",
    "graphql",
];
const FULLSTACK_TERMS: &[&str] = &[
    "fullstack",
    "full stack",
    "full-stack",
    "frontend",
    "react",
    "vue",
    "angular",
];

impl Domain {
    /// Detects the domain from matched terms. Terms are compared as whole-word
    /// phrases so "ai" never fires inside "sustainability".
    pub fn detect<'a>(terms: impl IntoIterator<Item = &'a str>) -> Self {
        let words: Vec<String> = terms.into_iter().flat_map(tokenize).collect();
        let mentions = |phrases: &[&str]| {
            phrases.iter().any(|phrase| {
                let needle = tokenize(phrase);
                !needle.is_empty() && words.windows(needle.len()).any(|w| w == needle.as_slice())
            })
        };

        if mentions(ML_TERMS) {
            Domain::MachineLearning
        } else if mentions(BACKEND_TERMS) {
            Domain::Backend
        } else if mentions(FULLSTACK_TERMS) {
            Domain::FullStack
        } else {
            Domain::General
        }
    }
}

fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(str::to_string)
        .collect()
}

/// Everything the template choice depends on.
#[derive(Debug, Clone)]
pub struct ReasoningInput<'a> {
    /// Gated total before rounding.
    pub total_score: f64,
    pub tech_matches: &'a [String],
    pub role_matches: &'a [String],
    pub industry_matches: &'a [String],
    pub priority_industry: bool,
    pub visa_status: VisaStatus,
    pub seniority_ok: bool,
}

pub fn generate_reasoning(input: &ReasoningInput<'_>) -> String {
    let domain = Domain::detect(
        input
            .tech_matches
            .iter()
            .chain(input.role_matches)
            .chain(input.industry_matches)
            .map(String::as_str),
    );

    let sentence = match (ScoreTier::from_score(input.total_score), domain) {
        (ScoreTier::High, Domain::MachineLearning) if input.priority_industry => {
            "My production ML pipeline work, turning raw data into shipped features, maps directly onto your mission-driven domain."
        }
        (ScoreTier::High, Domain::MachineLearning) => {
            "Having built and deployed production ML systems end to end, I'm ready to apply that foundation to your data challenges."
        }
        (ScoreTier::High, Domain::Backend) if input.priority_industry => {
            "Scaling backend systems and deploying models in production positions me well for your tech-driven mission."
        }
        (ScoreTier::High, Domain::Backend) => {
            "From scalable APIs to production data services, I bring a strong foundation in backend engineering."
        }
        (ScoreTier::High, Domain::FullStack) => {
            "My work across backend services and user-facing features gives me the versatility this role demands."
        }
        (ScoreTier::High, Domain::General) => {
            "My experience turning raw inputs into user-focused production features positions me well for this challenge."
        }
        (ScoreTier::Medium, Domain::MachineLearning) => {
            "My ML work centers on a different kind of data, but building robust pipelines and deploying models transfers well here."
        }
        (ScoreTier::Medium, Domain::Backend) => {
            "My backend engineering background in APIs, databases and scaling gives a solid footing for this role's technical demands."
        }
        (ScoreTier::Medium, Domain::FullStack) => {
            "My focus has been backend-heavy, yet hands-on full-stack delivery makes me adaptable to this role."
        }
        (ScoreTier::Medium, Domain::General) => {
            let tech = input
                .tech_matches
                .first()
                .map(String::as_str)
                .unwrap_or("your stack");
            return format!(
                "My foundation in backend engineering and data pipelines gives me a strong starting point for working with {}.",
                tech
            );
        }
        (ScoreTier::Low, _) if input.visa_status == VisaStatus::Excluded => {
            "This looks interesting, though the visa sponsorship situation needs clarification before proceeding."
        }
        (ScoreTier::Low, _) if !input.seniority_ok => {
            "This role seems geared toward more senior candidates, but my production experience may still translate; worth exploring."
        }
        (ScoreTier::Low, _) => {
            "The stack differs from my core experience, though a foundation in production systems could still make this work."
        }
    };

    sentence.to_string()
}
