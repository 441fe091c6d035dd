//! Seniority gate — an ordered, short-circuiting rule list.
//!
//! 1. leadership title keywords
//! 2. the largest "N+ years" requirement, whenever one is present
//! 3. a "senior" title
//! 4. otherwise ok

use serde::{Deserialize, Serialize};

use crate::scoring::config::SeniorityRules;
use crate::scoring::profile_index::ProfileIndex;
use crate::scoring::years::max_open_mention;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeniorityFlag {
    Ok,
    SeniorTitle,
    #[serde(rename = "years_5_plus")]
    Years5Plus,
    #[serde(rename = "years_6_plus")]
    Years6Plus,
    #[serde(rename = "years_8_plus")]
    Years8Plus,
    Leadership,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeniorityAssessment {
    pub ok: bool,
    pub multiplier: f64,
    pub flag: SeniorityFlag,
}

impl SeniorityAssessment {
    fn new(ok: bool, multiplier: f64, flag: SeniorityFlag) -> Self {
        Self {
            ok,
            multiplier,
            flag,
        }
    }
}

/// `text` is the lowercased title + description.
pub fn assess_seniority(
    text: &str,
    index: &ProfileIndex,
    rules: &SeniorityRules,
) -> SeniorityAssessment {
    if index.leadership.iter().any(|p| p.is_match(text)) {
        return SeniorityAssessment::new(false, rules.leadership_multiplier, SeniorityFlag::Leadership);
    }

    if let Some(years) = max_open_mention(text) {
        return if years >= rules.hard_years {
            SeniorityAssessment::new(false, rules.hard_years_multiplier, SeniorityFlag::Years8Plus)
        } else if years >= rules.over_years {
            SeniorityAssessment::new(false, rules.over_years_multiplier, SeniorityFlag::Years6Plus)
        } else if years == rules.soft_years {
            SeniorityAssessment::new(true, rules.soft_years_multiplier, SeniorityFlag::Years5Plus)
        } else {
            SeniorityAssessment::new(true, 1.0, SeniorityFlag::Ok)
        };
    }

    if index.senior.iter().any(|p| p.is_match(text)) {
        return SeniorityAssessment::new(
            false,
            rules.senior_title_multiplier,
            SeniorityFlag::SeniorTitle,
        );
    }

    SeniorityAssessment::new(true, 1.0, SeniorityFlag::Ok)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::profile::CandidateProfile;

    fn assess(text: &str) -> SeniorityAssessment {
        let index = ProfileIndex::build(&CandidateProfile::bundled().unwrap()).unwrap();
        assess_seniority(text, &index, &SeniorityRules::default())
    }

    #[test]
    fn test_plain_title_is_ok() {
        let a = assess("software engineer build apis");
        assert_eq!(a.flag, SeniorityFlag::Ok);
        assert!(a.ok);
        assert_eq!(a.multiplier, 1.0);
    }

    #[test]
    fn test_leadership_short_circuits_years() {
        let a = assess("staff engineer 10+ years experience required");
        assert_eq!(a.flag, SeniorityFlag::Leadership);
        assert!(!a.ok);
        assert_eq!(a.multiplier, 0.5);
    }

    #[test]
    fn test_leadership_is_whole_word() {
        // "leading" and "headquarters" must not trip "lead" / "head"
        let a = assess("software engineer at a leading company headquartered in nyc");
        assert_eq!(a.flag, SeniorityFlag::Ok);
    }

    #[test]
    fn test_years_thresholds() {
        assert_eq!(assess("8+ years").flag, SeniorityFlag::Years8Plus);
        assert_eq!(assess("8+ years").multiplier, 0.5);
        assert_eq!(assess("6 years python").flag, SeniorityFlag::Years6Plus);
        assert_eq!(assess("6 years python").multiplier, 0.6);

        let five = assess("5+ years python");
        assert_eq!(five.flag, SeniorityFlag::Years5Plus);
        assert!(five.ok);
        assert_eq!(five.multiplier, 0.85);
    }

    #[test]
    fn test_max_mention_wins() {
        assert_eq!(assess("2+ years go, 9 years overall").flag, SeniorityFlag::Years8Plus);
    }

    #[test]
    fn test_low_years_stop_before_senior_check() {
        let a = assess("senior engineer 3+ years");
        assert_eq!(a.flag, SeniorityFlag::Ok);
        assert_eq!(a.multiplier, 1.0);
    }

    #[test]
    fn test_senior_title_without_years() {
        let a = assess("senior software engineer");
        assert_eq!(a.flag, SeniorityFlag::SeniorTitle);
        assert!(!a.ok);
        assert_eq!(a.multiplier, 0.6);
    }

    #[test]
    fn test_flag_serialization() {
        assert_eq!(
            serde_json::to_string(&SeniorityFlag::Years5Plus).unwrap(),
            "\"years_5_plus\""
        );
        assert_eq!(
            serde_json::to_string(&SeniorityFlag::SeniorTitle).unwrap(),
            "\"senior_title\""
        );
    }
}
