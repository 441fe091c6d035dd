//! Scoring tunables. Every constant the classifiers use lives here so a profile
//! document can override it; `Default` reproduces the calibrated values.

use serde::{Deserialize, Serialize};

use crate::errors::ProfileError;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub weights: CategoryWeights,
    pub technical: TechnicalBands,
    pub industry: IndustryScoring,
    pub role: RoleScoring,
    pub eligibility: EligibilityScoring,
    pub visa: VisaScoring,
    pub location: LocationMultipliers,
    pub seniority: SeniorityRules,
    pub semantic: SemanticScoring,
}

impl ScoringConfig {
    pub fn validate(&self) -> Result<(), ProfileError> {
        self.weights.validate()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Category weights
// ────────────────────────────────────────────────────────────────────────────

/// Percentage weights per category. Base weights sum to 100.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CategoryWeights {
    pub semantic: f64,
    pub technical: f64,
    pub industry: f64,
    pub role: f64,
    pub eligibility: f64,
    pub visa: f64,
}

impl Default for CategoryWeights {
    fn default() -> Self {
        Self {
            semantic: 50.0,
            technical: 20.0,
            industry: 12.0,
            role: 10.0,
            eligibility: 5.0,
            visa: 3.0,
        }
    }
}

impl CategoryWeights {
    pub fn sum(&self) -> f64 {
        self.semantic + self.technical + self.industry + self.role + self.eligibility + self.visa
    }

    /// Sum of every weight except the optional semantic one.
    pub fn keyword_sum(&self) -> f64 {
        self.sum() - self.semantic
    }

    /// Weights in effect for one call. Without a semantic score the semantic
    /// slice is dropped and the rest rescaled to sum to 100 again.
    pub fn active(&self, semantic_available: bool) -> CategoryWeights {
        if semantic_available {
            return *self;
        }

        let rest = self.keyword_sum();
        // validate() rejects a zero keyword sum at construction
        debug_assert!(rest > 0.0, "keyword weights must not sum to zero");
        if rest <= 0.0 {
            return CategoryWeights {
                semantic: 0.0,
                ..*self
            };
        }

        let factor = 100.0 / rest;
        CategoryWeights {
            semantic: 0.0,
            technical: self.technical * factor,
            industry: self.industry * factor,
            role: self.role * factor,
            eligibility: self.eligibility * factor,
            visa: self.visa * factor,
        }
    }

    pub fn validate(&self) -> Result<(), ProfileError> {
        let all = [
            self.semantic,
            self.technical,
            self.industry,
            self.role,
            self.eligibility,
            self.visa,
        ];
        if all.iter().any(|w| !w.is_finite() || *w < 0.0) {
            return Err(ProfileError::InvalidWeights(
                "weights must be finite and non-negative".to_string(),
            ));
        }
        if (self.sum() - 100.0).abs() > 1e-6 {
            return Err(ProfileError::InvalidWeights(format!(
                "weights must sum to 100, got {}",
                self.sum()
            )));
        }
        if self.keyword_sum() <= 0.0 {
            return Err(ProfileError::InvalidWeights(
                "keyword categories must carry non-zero weight".to_string(),
            ));
        }
        Ok(())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Per-classifier constants
// ────────────────────────────────────────────────────────────────────────────

/// Hit-count bands for the technical score.
///
/// 1–2 hits: `low_base + low_step·n`; from `mid_hits`: `mid_base + mid_step·(n − mid_hits)`;
/// from `high_hits`: `high_base + high_step·(n − high_hits)`; from `saturation_hits`: 100.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TechnicalBands {
    pub low_base: f64,
    pub low_step: f64,
    pub mid_hits: usize,
    pub mid_base: f64,
    pub mid_step: f64,
    pub high_hits: usize,
    pub high_base: f64,
    pub high_step: f64,
    pub saturation_hits: usize,
    pub eligibility_bonus_hits: usize,
    pub eligibility_bonus: f64,
    /// Matched skills listed in a result; scoring counts all of them.
    pub presented_matches: usize,
}

impl Default for TechnicalBands {
    fn default() -> Self {
        Self {
            low_base: 30.0,
            low_step: 10.0,
            mid_hits: 3,
            mid_base: 50.0,
            mid_step: 10.0,
            high_hits: 6,
            high_base: 80.0,
            high_step: 5.0,
            saturation_hits: 10,
            eligibility_bonus_hits: 3,
            eligibility_bonus: 10.0,
            presented_matches: 10,
        }
    }
}

impl TechnicalBands {
    pub fn band_score(&self, hits: usize) -> f64 {
        let score = if hits == 0 {
            0.0
        } else if hits >= self.saturation_hits {
            100.0
        } else if hits >= self.high_hits {
            self.high_base + self.high_step * (hits - self.high_hits) as f64
        } else if hits >= self.mid_hits {
            self.mid_base + self.mid_step * (hits - self.mid_hits) as f64
        } else {
            self.low_base + self.low_step * hits as f64
        };
        score.min(100.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndustryScoring {
    pub single: f64,
    pub double: f64,
    pub many: f64,
    pub priority_bonus: f64,
}

impl Default for IndustryScoring {
    fn default() -> Self {
        Self {
            single: 55.0,
            double: 75.0,
            many: 95.0,
            priority_bonus: 15.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoleScoring {
    pub multi_description: f64,
    pub single_description: f64,
    pub title_only: f64,
}

impl Default for RoleScoring {
    fn default() -> Self {
        Self {
            multi_description: 90.0,
            single_description: 80.0,
            title_only: 60.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EligibilityScoring {
    /// Score when no requirements section was found.
    pub neutral: f64,
    pub base: f64,
    pub experience_bonus: f64,
    pub many_skills_hits: usize,
    pub many_skills_bonus: f64,
    pub some_skills_bonus: f64,
    pub concern_penalty: f64,
}

impl Default for EligibilityScoring {
    fn default() -> Self {
        Self {
            neutral: 50.0,
            base: 50.0,
            experience_bonus: 30.0,
            many_skills_hits: 3,
            many_skills_bonus: 20.0,
            some_skills_bonus: 10.0,
            concern_penalty: 40.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VisaScoring {
    pub class_match: f64,
    pub explicit: f64,
    pub neutral: f64,
}

impl Default for VisaScoring {
    fn default() -> Self {
        Self {
            class_match: 100.0,
            explicit: 80.0,
            neutral: 50.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocationMultipliers {
    pub nearby: f64,
    pub outside: f64,
}

impl Default for LocationMultipliers {
    fn default() -> Self {
        Self {
            nearby: 0.9,
            outside: 0.75,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeniorityRules {
    pub leadership_multiplier: f64,
    pub hard_years: u32,
    pub hard_years_multiplier: f64,
    pub over_years: u32,
    pub over_years_multiplier: f64,
    pub soft_years: u32,
    pub soft_years_multiplier: f64,
    pub senior_title_multiplier: f64,
}

impl Default for SeniorityRules {
    fn default() -> Self {
        Self {
            leadership_multiplier: 0.5,
            hard_years: 8,
            hard_years_multiplier: 0.5,
            over_years: 6,
            over_years_multiplier: 0.6,
            soft_years: 5,
            soft_years_multiplier: 0.85,
            senior_title_multiplier: 0.6,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SemanticScoring {
    /// Descriptions at or below this many characters skip the provider.
    pub min_description_len: usize,
    /// Similarity mapped to 0.
    pub similarity_floor: f64,
    /// Similarity mapped to 100.
    pub similarity_ceiling: f64,
}

impl Default for SemanticScoring {
    fn default() -> Self {
        Self {
            min_description_len: 50,
            similarity_floor: 0.1,
            similarity_ceiling: 0.6,
        }
    }
}

impl SemanticScoring {
    /// Piecewise-linear remap of a raw similarity onto 0–100.
    pub fn remap(&self, similarity: f64) -> f64 {
        if similarity <= self.similarity_floor {
            0.0
        } else if similarity >= self.similarity_ceiling {
            100.0
        } else {
            (similarity - self.similarity_floor) / (self.similarity_ceiling - self.similarity_floor)
                * 100.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_weights_sum_to_100() {
        let w = CategoryWeights::default();
        assert!((w.sum() - 100.0).abs() < 1e-9);
        assert!(w.validate().is_ok());
    }

    #[test]
    fn test_active_weights_without_semantic_renormalize() {
        let w = CategoryWeights::default().active(false);
        assert_eq!(w.semantic, 0.0);
        assert!((w.sum() - 100.0).abs() < 1e-9);
        // 20 / 50 of the remaining mass
        assert!((w.technical - 40.0).abs() < 1e-9);
        assert!((w.visa - 6.0).abs() < 1e-9);
    }

    #[test]
    fn test_active_weights_with_semantic_unchanged() {
        let w = CategoryWeights::default();
        assert_eq!(w.active(true), w);
    }

    #[test]
    fn test_validate_rejects_bad_sum() {
        let w = CategoryWeights {
            semantic: 10.0,
            ..CategoryWeights::default()
        };
        assert!(matches!(w.validate(), Err(ProfileError::InvalidWeights(_))));
    }

    #[test]
    fn test_validate_rejects_semantic_only() {
        let w = CategoryWeights {
            semantic: 100.0,
            technical: 0.0,
            industry: 0.0,
            role: 0.0,
            eligibility: 0.0,
            visa: 0.0,
        };
        assert!(matches!(w.validate(), Err(ProfileError::InvalidWeights(_))));
    }

    #[test]
    fn test_validate_rejects_negative() {
        let w = CategoryWeights {
            technical: 40.0,
            industry: -8.0,
            ..CategoryWeights::default()
        };
        assert!(w.validate().is_err());
    }

    #[test]
    fn test_band_score_table() {
        let b = TechnicalBands::default();
        let expected = [
            (0, 0.0),
            (1, 40.0),
            (2, 50.0),
            (3, 50.0),
            (4, 60.0),
            (5, 70.0),
            (6, 80.0),
            (7, 85.0),
            (9, 95.0),
            (10, 100.0),
            (25, 100.0),
        ];
        for (hits, score) in expected {
            assert_eq!(b.band_score(hits), score, "hits={hits}");
        }
    }

    #[test]
    fn test_band_score_is_monotonic() {
        let b = TechnicalBands::default();
        for n in 0..30 {
            assert!(b.band_score(n + 1) >= b.band_score(n), "drop at n={n}");
        }
    }

    #[test]
    fn test_semantic_remap_bounds_and_midpoint() {
        let s = SemanticScoring::default();
        assert_eq!(s.remap(0.05), 0.0);
        assert_eq!(s.remap(0.1), 0.0);
        assert_eq!(s.remap(0.6), 100.0);
        assert_eq!(s.remap(0.95), 100.0);
        assert!((s.remap(0.35) - 50.0).abs() < 1e-9);
        assert_eq!(s.remap(-0.4), 0.0);
    }

    #[test]
    fn test_partial_override_keeps_defaults() {
        let cfg: ScoringConfig =
            serde_json::from_str(r#"{"technical": {"saturation_hits": 8}}"#).unwrap();
        assert_eq!(cfg.technical.saturation_hits, 8);
        assert_eq!(cfg.technical.low_base, 30.0);
        assert_eq!(cfg.weights, CategoryWeights::default());
    }
}
