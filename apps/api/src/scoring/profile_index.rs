//! Profile Index — the candidate profile flattened into deduplicated lowercase
//! keyword sets with their whole-word patterns compiled up front.
//!
//! Built once per engine. Everything here is read-only afterwards, so the index
//! is shared across concurrent `score()` calls without locking.

use std::collections::HashSet;

use regex::Regex;
use serde::Serialize;

use crate::errors::ProfileError;
use crate::models::profile::{CandidateProfile, ExperiencePreferences};

/// A lowercase keyword with its compiled whole-word matcher.
#[derive(Debug, Clone)]
pub struct KeywordPattern {
    keyword: String,
    regex: Regex,
}

impl KeywordPattern {
    pub fn compile(raw: &str, field: &'static str) -> Result<Self, ProfileError> {
        let keyword = raw.trim().to_lowercase();
        if keyword.is_empty() {
            return Err(ProfileError::EmptyKeyword { field });
        }
        let regex = Regex::new(&whole_word_pattern(&keyword)).map_err(|source| {
            ProfileError::InvalidPattern {
                field,
                keyword: keyword.clone(),
                source,
            }
        })?;
        Ok(Self { keyword, regex })
    }

    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }
}

/// Case-insensitive pattern for `keyword` as a whole word.
///
/// Word boundaries are only asserted on edges that are word characters, so
/// keywords like "c++" or "c#" still match when followed by punctuation.
fn whole_word_pattern(keyword: &str) -> String {
    let leading = if keyword.chars().next().is_some_and(is_word_char) {
        r"\b"
    } else {
        ""
    };
    let trailing = if keyword.chars().last().is_some_and(is_word_char) {
        r"\b"
    } else {
        ""
    };
    format!("(?i){leading}{}{trailing}", regex::escape(keyword))
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

#[derive(Debug, Clone)]
pub struct ProfileIndex {
    pub skills: Vec<KeywordPattern>,
    pub industries: Vec<KeywordPattern>,
    pub priority_industry_keywords: Vec<String>,
    pub roles: Vec<KeywordPattern>,
    pub visa_positive: Vec<KeywordPattern>,
    pub visa_negative: Vec<KeywordPattern>,
    pub visa_ambiguous: Vec<KeywordPattern>,
    pub visa_class_keywords: Vec<String>,
    pub leadership: Vec<KeywordPattern>,
    pub senior: Vec<KeywordPattern>,
    pub home_locations: Vec<String>,
    pub remote_locations: Vec<String>,
    pub nearby_locations: Vec<String>,
    pub experience: ExperiencePreferences,
    /// Prose rendering of the profile for the semantic provider.
    pub profile_text: String,
}

/// Keyword counts per dimension, for logging and the profile endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct IndexSummary {
    pub skills: usize,
    pub industries: usize,
    pub roles: usize,
    pub visa_positive: usize,
    pub visa_negative: usize,
    pub visa_ambiguous: usize,
    pub leadership: usize,
    pub locations: usize,
}

impl ProfileIndex {
    pub fn build(profile: &CandidateProfile) -> Result<Self, ProfileError> {
        let experience = profile.experience;
        check_window("experience.candidate_years", experience.candidate_years.min, experience.candidate_years.max)?;
        check_window("experience.accepted_years", experience.accepted_years.min, experience.accepted_years.max)?;

        let skills = compile_set(
            profile.skills.iter().flat_map(|g| g.keywords.iter()),
            "skills",
        )?;

        Ok(Self {
            skills,
            industries: compile_set(&profile.industries, "industries")?,
            priority_industry_keywords: lowercase_set(
                &profile.priority_industry_keywords,
                "priority_industry_keywords",
            )?,
            roles: compile_set(&profile.roles, "roles")?,
            visa_positive: compile_set(&profile.visa.positive_keywords, "visa.positive_keywords")?,
            visa_negative: compile_set(&profile.visa.negative_keywords, "visa.negative_keywords")?,
            visa_ambiguous: compile_set(
                &profile.visa.ambiguous_keywords,
                "visa.ambiguous_keywords",
            )?,
            visa_class_keywords: lowercase_set(&profile.visa.class_keywords, "visa.class_keywords")?,
            leadership: compile_set(
                &profile.seniority.leadership_keywords,
                "seniority.leadership_keywords",
            )?,
            senior: compile_set(&profile.seniority.senior_keywords, "seniority.senior_keywords")?,
            home_locations: lowercase_set(&profile.location.home, "location.home")?,
            remote_locations: lowercase_set(&profile.location.remote, "location.remote")?,
            nearby_locations: lowercase_set(&profile.location.nearby, "location.nearby")?,
            experience,
            profile_text: profile.render_text(),
        })
    }

    pub fn summary(&self) -> IndexSummary {
        IndexSummary {
            skills: self.skills.len(),
            industries: self.industries.len(),
            roles: self.roles.len(),
            visa_positive: self.visa_positive.len(),
            visa_negative: self.visa_negative.len(),
            visa_ambiguous: self.visa_ambiguous.len(),
            leadership: self.leadership.len(),
            locations: self.home_locations.len()
                + self.remote_locations.len()
                + self.nearby_locations.len(),
        }
    }
}

fn check_window(field: &'static str, min: u32, max: u32) -> Result<(), ProfileError> {
    if min > max {
        return Err(ProfileError::InvalidWindow { field, min, max });
    }
    Ok(())
}

/// Compiles keywords in first-seen order, dropping case-insensitive duplicates.
fn compile_set<'a, I>(raw: I, field: &'static str) -> Result<Vec<KeywordPattern>, ProfileError>
where
    I: IntoIterator<Item = &'a String>,
{
    let mut seen = HashSet::new();
    let mut patterns = Vec::new();
    for keyword in raw {
        let pattern = KeywordPattern::compile(keyword, field)?;
        if seen.insert(pattern.keyword.clone()) {
            patterns.push(pattern);
        }
    }
    Ok(patterns)
}

/// Lowercased, deduplicated substring keywords. Empty entries would match
/// every string, so they are rejected.
fn lowercase_set<'a, I>(raw: I, field: &'static str) -> Result<Vec<String>, ProfileError>
where
    I: IntoIterator<Item = &'a String>,
{
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for keyword in raw {
        let keyword = keyword.trim().to_lowercase();
        if keyword.is_empty() {
            return Err(ProfileError::EmptyKeyword { field });
        }
        if seen.insert(keyword.clone()) {
            out.push(keyword);
        }
    }
    Ok(out)
}
