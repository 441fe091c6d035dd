//! Technical stack match — profile skills found in the posting, with extra credit
//! for skills that appear inside the requirements section.

use serde::{Deserialize, Serialize};

use crate::scoring::config::TechnicalBands;
use crate::scoring::profile_index::ProfileIndex;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TechnicalMatch {
    pub score: f64,
    /// Matched skills in profile order.
    pub matches: Vec<String>,
    /// How many of `matches` were found in the eligibility section.
    pub eligibility_hits: usize,
}

/// `text` is the lowercased title + description; `eligibility_text` the
/// extracted requirements section (may be empty).
pub fn score_technical(
    text: &str,
    eligibility_text: &str,
    index: &ProfileIndex,
    bands: &TechnicalBands,
) -> TechnicalMatch {
    let mut matches = Vec::new();
    let mut eligibility_hits = 0;

    for skill in &index.skills {
        if !eligibility_text.is_empty() && skill.is_match(eligibility_text) {
            eligibility_hits += 1;
            matches.push(skill.keyword().to_string());
        } else if skill.is_match(text) {
            matches.push(skill.keyword().to_string());
        }
    }

    let mut score = bands.band_score(matches.len());
    if eligibility_hits >= bands.eligibility_bonus_hits {
        score = (score + bands.eligibility_bonus).min(100.0);
    }

    TechnicalMatch {
        score,
        matches,
        eligibility_hits,
    }
}
