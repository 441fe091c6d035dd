use serde::{Deserialize, Serialize};

use crate::scoring::config::CategoryWeights;

/// Raw 0–100 sub-scores for one posting. `semantic` is `None` when the
/// provider produced nothing usable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ComponentScores {
    pub semantic: Option<f64>,
    pub technical: f64,
    pub industry: f64,
    pub role: f64,
    pub eligibility: f64,
    pub visa: f64,
}

/// Per-category sub-scores as reported in results, one decimal each.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub semantic: f64,
    pub technical: f64,
    pub industry: f64,
    pub role: f64,
    pub eligibility: f64,
    pub visa: f64,
}

impl From<&ComponentScores> for ScoreBreakdown {
    fn from(scores: &ComponentScores) -> Self {
        Self {
            semantic: round1(scores.semantic.unwrap_or(0.0)),
            technical: round1(scores.technical),
            industry: round1(scores.industry),
            role: round1(scores.role),
            eligibility: round1(scores.eligibility),
            visa: round1(scores.visa),
        }
    }
}

/// Gated total before and after presentation rounding. Tier decisions read
/// `total`; `fit_score` is what gets reported.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightedTotal {
    pub total: f64,
    pub fit_score: f64,
}

/// Weighted sum under the active weights, then the gate multipliers.
/// Multipliers scale the combined total, never the individual sub-scores.
pub fn aggregate(
    scores: &ComponentScores,
    weights: &CategoryWeights,
    location_multiplier: f64,
    seniority_multiplier: f64,
) -> WeightedTotal {
    let active = weights.active(scores.semantic.is_some());

    let mut total = scores.technical * active.technical
        + scores.industry * active.industry
        + scores.role * active.role
        + scores.eligibility * active.eligibility
        + scores.visa * active.visa;
    if let Some(semantic) = scores.semantic {
        total += semantic * active.semantic;
    }
    total /= 100.0;

    total *= location_multiplier;
    total *= seniority_multiplier;

    let total = total.clamp(0.0, 100.0);
    WeightedTotal {
        total,
        fit_score: round1(total),
    }
}

pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::reasoning::ScoreTier;

    fn scores(semantic: Option<f64>, all: f64) -> ComponentScores {
        ComponentScores {
            semantic,
            technical: all,
            industry: all,
            role: all,
            eligibility: all,
            visa: all,
        }
    }

    #[test]
    fn test_uniform_scores_survive_renormalization() {
        let weights = CategoryWeights::default();
        assert_eq!(aggregate(&scores(None, 80.0), &weights, 1.0, 1.0).fit_score, 80.0);
        assert_eq!(aggregate(&scores(Some(80.0), 80.0), &weights, 1.0, 1.0).fit_score, 80.0);
    }

    #[test]
    fn test_semantic_weight_used_when_available() {
        let weights = CategoryWeights::default();
        // 100·0.5 + 0·0.5
        assert_eq!(aggregate(&scores(Some(100.0), 0.0), &weights, 1.0, 1.0).fit_score, 50.0);
    }

    #[test]
    fn test_renormalized_weights_without_semantic() {
        let weights = CategoryWeights::default();
        let only_technical = ComponentScores {
            semantic: None,
            technical: 100.0,
            industry: 0.0,
            role: 0.0,
            eligibility: 0.0,
            visa: 0.0,
        };
        // technical 20 of 50 keyword weight → 40%
        assert_eq!(aggregate(&only_technical, &weights, 1.0, 1.0).fit_score, 40.0);
    }

    #[test]
    fn test_multipliers_compose() {
        let weights = CategoryWeights::default();
        let total = aggregate(&scores(None, 100.0), &weights, 0.75, 0.5);
        assert_eq!(total.fit_score, 37.5);
    }

    #[test]
    fn test_result_clamped_and_rounded() {
        let weights = CategoryWeights::default();
        assert_eq!(aggregate(&scores(None, 100.0), &weights, 1.5, 1.0).fit_score, 100.0);
        assert_eq!(aggregate(&scores(None, 33.333), &weights, 1.0, 1.0).fit_score, 33.3);
    }

    #[test]
    fn test_total_keeps_precision_below_tier_boundary() {
        let weights = CategoryWeights::default();
        let result = aggregate(&scores(None, 74.96), &weights, 1.0, 1.0);
        assert_eq!(result.fit_score, 75.0);
        assert!(result.total < 75.0);
        assert_eq!(ScoreTier::from_score(result.total), ScoreTier::Medium);
    }

    #[test]
    fn test_breakdown_rounds_to_one_decimal() {
        let breakdown = ScoreBreakdown::from(&ComponentScores {
            semantic: None,
            technical: 62.46,
            industry: 0.0,
            role: 80.0,
            eligibility: 50.0,
            visa: 50.0,
        });
        assert_eq!(breakdown.semantic, 0.0);
        assert_eq!(breakdown.technical, 62.5);
    }
}
