use serde::{Deserialize, Serialize};

use crate::scoring::config::RoleScoring;
use crate::scoring::profile_index::ProfileIndex;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoleMatch {
    pub score: f64,
    /// Union of title and description matches, title first.
    pub matches: Vec<String>,
    pub description_matches: usize,
}

/// Role match, weighting the description over the title: a role named in the
/// body says more about the actual work than a title alone.
pub fn score_role(
    title: &str,
    description: &str,
    index: &ProfileIndex,
    config: &RoleScoring,
) -> RoleMatch {
    let mut matches: Vec<String> = Vec::new();
    let mut title_matches = 0;
    let mut description_matches = 0;

    for role in &index.roles {
        if role.is_match(title) {
            title_matches += 1;
            matches.push(role.keyword().to_string());
        }
    }
    for role in &index.roles {
        if role.is_match(description) {
            description_matches += 1;
            if !matches.iter().any(|m| m == role.keyword()) {
                matches.push(role.keyword().to_string());
            }
        }
    }

    let score = if description_matches >= 2 {
        config.multi_description
    } else if description_matches == 1 {
        config.single_description
    } else if title_matches > 0 {
        config.title_only
    } else {
        0.0
    };

    RoleMatch {
        score,
        matches,
        description_matches,
    }
}
