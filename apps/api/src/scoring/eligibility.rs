//! Eligibility — pulls the requirements-like section out of a description and
//! scores it for experience fit and skill coverage.
//!
//! Extraction is line-based: a header phrase switches capture on, a stop phrase
//! or two consecutive blank lines switch it off. Descriptions without any
//! recognizable header yield an empty section, which scores neutral.

use serde::{Deserialize, Serialize};

use crate::scoring::config::EligibilityScoring;
use crate::scoring::profile_index::ProfileIndex;
use crate::scoring::years::{open_mentions, range_mentions};

const REQUIREMENT_HEADERS: &[&str] = &[
    "requirements",
    "qualifications",
    "required qualifications",
    "minimum qualifications",
    "about you",
    "you have",
    "you are",
    "what we're looking for",
    "what you'll need",
    "must have",
    "basic qualifications",
    "experience required",
    "skills required",
];

const SECTION_STOPS: &[&str] = &[
    "responsibilities",
    "what you'll do",
    "about us",
    "benefits",
    "perks",
    "our company",
    "the role",
    "why join",
    "what we offer",
];

/// Returns the space-joined requirement lines of `description`, or "" when no
/// header is found. Each header occurrence restarts capture.
pub fn extract_eligibility_text(description: &str) -> String {
    let lines: Vec<&str> = description.lines().collect();
    let mut captured: Vec<&str> = Vec::new();
    let mut capturing = false;

    for (i, line) in lines.iter().enumerate() {
        let trimmed = line.trim();
        let lower = trimmed.to_lowercase();

        if REQUIREMENT_HEADERS.iter().any(|h| lower.contains(h)) {
            capturing = true;
            captured.push(trimmed);
            continue;
        }

        if !capturing {
            continue;
        }

        if SECTION_STOPS.iter().any(|s| lower.contains(s)) {
            capturing = false;
            continue;
        }

        if trimmed.is_empty() {
            // one blank line is tolerated, two end the section
            if lines.get(i + 1).is_some_and(|next| next.trim().is_empty()) {
                capturing = false;
            }
            continue;
        }

        captured.push(trimmed);
    }

    captured.join(" ")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EligibilityStatus {
    NoRequirementsFound,
    Evaluated,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EligibilityAssessment {
    pub score: f64,
    pub status: EligibilityStatus,
    pub experience_match: bool,
    pub skills_in_requirements: Vec<String>,
    /// One `requires_N+_years` tag per over-threshold mention.
    pub concerns: Vec<String>,
}

/// Scores the extracted eligibility section against the profile.
pub fn score_eligibility(
    eligibility_text: &str,
    index: &ProfileIndex,
    config: &EligibilityScoring,
) -> EligibilityAssessment {
    if eligibility_text.trim().is_empty() {
        return EligibilityAssessment {
            score: config.neutral,
            status: EligibilityStatus::NoRequirementsFound,
            experience_match: false,
            skills_in_requirements: Vec::new(),
            concerns: Vec::new(),
        };
    }

    let experience = &index.experience;
    let mut experience_match = false;
    let mut concerns = Vec::new();

    for (min, max) in range_mentions(eligibility_text) {
        if experience.candidate_years.overlaps(min, max) {
            experience_match = true;
        } else if min >= experience.concern_threshold {
            concerns.push(concern_tag(min));
        }
    }

    for years in open_mentions(eligibility_text) {
        if experience.accepted_years.contains(years) {
            experience_match = true;
        } else if years >= experience.concern_threshold {
            concerns.push(concern_tag(years));
        }
    }

    let skills_in_requirements: Vec<String> = index
        .skills
        .iter()
        .filter(|p| p.is_match(eligibility_text))
        .map(|p| p.keyword().to_string())
        .collect();

    let mut score = config.base;
    if experience_match {
        score += config.experience_bonus;
    }
    if skills_in_requirements.len() >= config.many_skills_hits {
        score += config.many_skills_bonus;
    } else if !skills_in_requirements.is_empty() {
        score += config.some_skills_bonus;
    }
    score -= concerns.len() as f64 * config.concern_penalty;

    EligibilityAssessment {
        score: score.clamp(0.0, 100.0),
        status: EligibilityStatus::Evaluated,
        experience_match,
        skills_in_requirements,
        concerns,
    }
}

fn concern_tag(years: u32) -> String {
    format!("requires_{years}+_years")
}
