use serde::{Deserialize, Serialize};

use crate::scoring::config::LocationMultipliers;
use crate::scoring::profile_index::ProfileIndex;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LocationFlag {
    Preferred,
    Remote,
    Nearby,
    Outside,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LocationAssessment {
    pub ok: bool,
    pub multiplier: f64,
    pub flag: LocationFlag,
}

/// Gates on the posting's location string by substring membership.
/// Home city wins over remote, remote over nearby.
pub fn assess_location(
    location: &str,
    index: &ProfileIndex,
    config: &LocationMultipliers,
) -> LocationAssessment {
    let location = location.trim().to_lowercase();
    let mentions = |keywords: &[String]| keywords.iter().any(|kw| location.contains(kw.as_str()));

    let (ok, multiplier, flag) = if location.is_empty() {
        (true, 1.0, LocationFlag::Unknown)
    } else if mentions(&index.home_locations) {
        (true, 1.0, LocationFlag::Preferred)
    } else if mentions(&index.remote_locations) {
        (true, 1.0, LocationFlag::Remote)
    } else if mentions(&index.nearby_locations) {
        (true, config.nearby, LocationFlag::Nearby)
    } else {
        (false, config.outside, LocationFlag::Outside)
    };

    LocationAssessment {
        ok,
        multiplier,
        flag,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::profile::CandidateProfile;

    fn assess(location: &str) -> LocationAssessment {
        let index = ProfileIndex::build(&CandidateProfile::bundled().unwrap()).unwrap();
        assess_location(location, &index, &LocationMultipliers::default())
    }

    #[test]
    fn test_home_city_is_preferred() {
        let a = assess("New York, NY");
        assert_eq!(a.flag, LocationFlag::Preferred);
        assert!(a.ok);
        assert_eq!(a.multiplier, 1.0);
    }

    #[test]
    fn test_remote() {
        let a = assess("Remote (US)");
        assert_eq!(a.flag, LocationFlag::Remote);
        assert_eq!(a.multiplier, 1.0);
    }

    #[test]
    fn test_home_city_beats_remote() {
        assert_eq!(assess("Remote or NYC").flag, LocationFlag::Preferred);
    }

    #[test]
    fn test_nearby_penalized_lightly() {
        let a = assess("Jersey City, NJ");
        assert_eq!(a.flag, LocationFlag::Nearby);
        assert!(a.ok);
        assert_eq!(a.multiplier, 0.9);
    }

    #[test]
    fn test_other_city_is_outside() {
        let a = assess("Austin, TX");
        assert_eq!(a.flag, LocationFlag::Outside);
        assert!(!a.ok);
        assert_eq!(a.multiplier, 0.75);
    }

    #[test]
    fn test_empty_is_unknown_and_ok() {
        for location in ["", "   "] {
            let a = assess(location);
            assert_eq!(a.flag, LocationFlag::Unknown);
            assert!(a.ok);
            assert_eq!(a.multiplier, 1.0);
        }
    }
}
