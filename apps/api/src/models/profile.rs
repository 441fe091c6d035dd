//! Candidate profile — the declarative document the engine is built from.
//!
//! Loaded once at startup (from `PROFILE_PATH` or the bundled default) and never
//! mutated afterwards. Flattening into match patterns happens in
//! `scoring::profile_index`.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::ProfileError;
use crate::scoring::config::ScoringConfig;

const DEFAULT_PROFILE: &str = include_str!("../../profile/default.json");

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateProfile {
    pub skills: Vec<SkillGroup>,
    pub industries: Vec<String>,
    /// Substrings that mark an industry hit as a focus area (bonus-eligible).
    pub priority_industry_keywords: Vec<String>,
    pub roles: Vec<String>,
    pub visa: VisaPreferences,
    pub experience: ExperiencePreferences,
    pub seniority: SeniorityPreferences,
    pub location: LocationPreferences,
    #[serde(default)]
    pub scoring: ScoringConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillGroup {
    pub category: String,
    pub keywords: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisaPreferences {
    /// Keywords naming the candidate's own visa class (e.g. "e-3").
    pub class_keywords: Vec<String>,
    pub positive_keywords: Vec<String>,
    /// Hard negatives: any hit excludes the posting's visa signal.
    pub negative_keywords: Vec<String>,
    /// "Must be authorized"-style wording that reads as neutral.
    #[serde(default)]
    pub ambiguous_keywords: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearsWindow {
    pub min: u32,
    pub max: u32,
}

impl YearsWindow {
    pub fn contains(&self, years: u32) -> bool {
        (self.min..=self.max).contains(&years)
    }

    pub fn overlaps(&self, min: u32, max: u32) -> bool {
        min <= self.max && max >= self.min
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExperiencePreferences {
    /// Actual experience; a requirement range overlapping this is a match.
    pub candidate_years: YearsWindow,
    /// Open-ended "N+ years" requirements inside this window are a match.
    pub accepted_years: YearsWindow,
    /// Requirements at or above this many years are flagged as concerns.
    pub concern_threshold: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeniorityPreferences {
    pub leadership_keywords: Vec<String>,
    pub senior_keywords: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationPreferences {
    pub home: Vec<String>,
    pub remote: Vec<String>,
    pub nearby: Vec<String>,
}

impl CandidateProfile {
    /// The bundled profile shipped with the service.
    pub fn bundled() -> Result<Self, ProfileError> {
        Ok(serde_json::from_str(DEFAULT_PROFILE)?)
    }

    pub fn from_path(path: &Path) -> Result<Self, ProfileError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ProfileError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Loads from `path` when given, otherwise falls back to the bundled profile.
    pub fn load(path: Option<&Path>) -> Result<Self, ProfileError> {
        match path {
            Some(p) => Self::from_path(p),
            None => Self::bundled(),
        }
    }

    /// Renders the profile as one block of prose for the semantic provider.
    pub fn render_text(&self) -> String {
        let mut parts: Vec<String> = self
            .skills
            .iter()
            .filter(|g| !g.keywords.is_empty())
            .map(|g| format!("{}: {}", g.category, g.keywords.join(", ")))
            .collect();

        if !self.industries.is_empty() {
            parts.push(format!("Industries: {}", self.industries.join(", ")));
        }
        if !self.roles.is_empty() {
            parts.push(format!("Target roles: {}", self.roles.join(", ")));
        }

        parts.join(". ")
    }
}
