//! Visa classifier — reads sponsorship signals from the posting.
//!
//! Decision order is fixed: hard negatives beat positives, positives beat
//! ambiguous "must be authorized" wording, and silence is neutral.

use serde::{Deserialize, Serialize};

use crate::scoring::config::VisaScoring;
use crate::scoring::profile_index::{KeywordPattern, ProfileIndex};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VisaStatus {
    /// Sponsorship is explicitly offered.
    Explicit,
    /// No usable signal, or only ambiguous wording.
    #[serde(rename = "none")]
    NotStated,
    /// The posting rules sponsorship out.
    Excluded,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisaAssessment {
    pub score: f64,
    pub status: VisaStatus,
    /// Keywords that drove the decision.
    pub keywords: Vec<String>,
}

pub fn classify_visa(text: &str, index: &ProfileIndex, config: &VisaScoring) -> VisaAssessment {
    let negative = matched(&index.visa_negative, text);
    if !negative.is_empty() {
        return VisaAssessment {
            score: 0.0,
            status: VisaStatus::Excluded,
            keywords: negative,
        };
    }

    let positive = matched(&index.visa_positive, text);
    if !positive.is_empty() {
        let names_class = positive.iter().any(|kw| {
            index
                .visa_class_keywords
                .iter()
                .any(|class| kw.contains(class.as_str()))
        });
        return VisaAssessment {
            score: if names_class {
                config.class_match
            } else {
                config.explicit
            },
            status: VisaStatus::Explicit,
            keywords: positive,
        };
    }

    VisaAssessment {
        score: config.neutral,
        status: VisaStatus::NotStated,
        keywords: matched(&index.visa_ambiguous, text),
    }
}

fn matched(patterns: &[KeywordPattern], text: &str) -> Vec<String> {
    patterns
        .iter()
        .filter(|p| p.is_match(text))
        .map(|p| p.keyword().to_string())
        .collect()
}
