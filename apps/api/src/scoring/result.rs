use serde::{Deserialize, Serialize};

use crate::scoring::aggregate::ScoreBreakdown;
use crate::scoring::eligibility::EligibilityStatus;
use crate::scoring::location::LocationFlag;
use crate::scoring::seniority::SeniorityFlag;
use crate::scoring::visa::VisaStatus;
use crate::semantic::SemanticOutcome;

/// Matched keywords per dimension, in the order they were found.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchSet {
    pub tech: Vec<String>,
    pub industry: Vec<String>,
    pub role: Vec<String>,
    pub eligibility_skills: Vec<String>,
    pub visa_keywords: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EligibilitySummary {
    pub status: EligibilityStatus,
    pub experience_match: bool,
    pub concerns: Vec<String>,
}

/// The full, explainable outcome of scoring one posting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringResult {
    pub fit_score: f64,
    pub breakdown: ScoreBreakdown,
    pub matches: MatchSet,
    pub eligibility: EligibilitySummary,
    pub semantic: SemanticOutcome,
    pub visa_status: VisaStatus,
    pub location_ok: bool,
    pub location_flag: LocationFlag,
    pub seniority_ok: bool,
    pub seniority_flag: SeniorityFlag,
    pub reasoning: String,
}

impl ScoringResult {
    /// Whether the posting clears an alerting threshold.
    pub fn meets_threshold(&self, min_fit_score: f64) -> bool {
        self.fit_score >= min_fit_score
    }
}
