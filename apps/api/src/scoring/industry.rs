use serde::{Deserialize, Serialize};

use crate::scoring::config::IndustryScoring;
use crate::scoring::profile_index::ProfileIndex;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndustryMatch {
    pub score: f64,
    pub matches: Vec<String>,
    /// A focus industry (health, agriculture, fashion tech) was signalled.
    pub priority: bool,
}

/// Industry match over the lowercased title + description.
///
/// The priority check only runs once some industry matched; it looks for the
/// priority substrings in both the matched industries and the raw text.
pub fn score_industry(text: &str, index: &ProfileIndex, config: &IndustryScoring) -> IndustryMatch {
    let matches: Vec<String> = index
        .industries
        .iter()
        .filter(|p| p.is_match(text))
        .map(|p| p.keyword().to_string())
        .collect();

    if matches.is_empty() {
        return IndustryMatch {
            score: 0.0,
            matches,
            priority: false,
        };
    }

    let priority = index.priority_industry_keywords.iter().any(|kw| {
        text.contains(kw.as_str()) || matches.iter().any(|m| m.contains(kw.as_str()))
    });

    let mut score = match matches.len() {
        1 => config.single,
        2 => config.double,
        _ => config.many,
    };
    if priority {
        score = (score + config.priority_bonus).min(100.0);
    }

    IndustryMatch {
        score,
        matches,
        priority,
    }
}
