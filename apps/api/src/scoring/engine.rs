//! FitEngine — scores one posting against the candidate profile.
//!
//! `evaluate()` is the synchronous, pure core. `score()` wraps it with the
//! optional semantic provider, which is the only awaited dependency.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::errors::ProfileError;
use crate::models::job::JobPosting;
use crate::models::profile::CandidateProfile;
use crate::scoring::aggregate::{aggregate, ComponentScores, ScoreBreakdown};
use crate::scoring::config::ScoringConfig;
use crate::scoring::eligibility::{extract_eligibility_text, score_eligibility};
use crate::scoring::industry::score_industry;
use crate::scoring::location::assess_location;
use crate::scoring::profile_index::ProfileIndex;
use crate::scoring::reasoning::{generate_reasoning, ReasoningInput};
use crate::scoring::result::{EligibilitySummary, MatchSet, ScoringResult};
use crate::scoring::role::score_role;
use crate::scoring::seniority::assess_seniority;
use crate::scoring::technical::score_technical;
use crate::scoring::visa::classify_visa;
use crate::semantic::{SemanticMethod, SemanticOutcome, SemanticSimilarityProvider};

pub struct FitEngine {
    index: ProfileIndex,
    config: ScoringConfig,
    provider: Option<Arc<dyn SemanticSimilarityProvider>>,
    semantic_timeout: Duration,
}

impl FitEngine {
    /// Compiles the profile once. Fails on invalid keywords, windows or weights.
    pub fn new(
        profile: &CandidateProfile,
        provider: Option<Arc<dyn SemanticSimilarityProvider>>,
        semantic_timeout: Duration,
    ) -> Result<Self, ProfileError> {
        profile.scoring.validate()?;
        let index = ProfileIndex::build(profile)?;

        let summary = index.summary();
        info!(
            "Fit engine ready: {} skills, {} industries, {} roles, {} visa keywords, semantic provider: {}",
            summary.skills,
            summary.industries,
            summary.roles,
            summary.visa_positive + summary.visa_negative + summary.visa_ambiguous,
            provider.as_ref().map_or("none", |p| p.name())
        );

        Ok(Self {
            index,
            config: profile.scoring.clone(),
            provider,
            semantic_timeout,
        })
    }

    pub fn index(&self) -> &ProfileIndex {
        &self.index
    }

    pub fn has_semantic_provider(&self) -> bool {
        self.provider.is_some()
    }

    /// Scores a posting. Never fails: provider problems only drop the
    /// semantic weight.
    pub async fn score(&self, job: &JobPosting) -> ScoringResult {
        let semantic = self.semantic_outcome(job).await;
        self.evaluate(job, semantic)
    }

    async fn semantic_outcome(&self, job: &JobPosting) -> SemanticOutcome {
        let Some(provider) = &self.provider else {
            return SemanticOutcome::unavailable(SemanticMethod::Disabled);
        };

        if job.description.trim().chars().count() <= self.config.semantic.min_description_len {
            return SemanticOutcome::unavailable(SemanticMethod::InsufficientText);
        }

        let job_text = job.semantic_text();
        let call = provider.similarity(&self.index.profile_text, &job_text);

        match tokio::time::timeout(self.semantic_timeout, call).await {
            Ok(Ok(similarity)) if similarity.is_finite() => SemanticOutcome::from_similarity(
                f64::from(similarity),
                provider.name(),
                &self.config.semantic,
            ),
            Ok(Ok(similarity)) => {
                warn!(
                    "Semantic provider '{}' returned non-finite similarity {}, falling back to keyword weights",
                    provider.name(),
                    similarity
                );
                SemanticOutcome::failed(SemanticMethod::Error, provider.name(), "non-finite similarity")
            }
            Ok(Err(e)) => {
                warn!(
                    "Semantic provider '{}' failed, falling back to keyword weights: {}",
                    provider.name(),
                    e
                );
                SemanticOutcome::failed(SemanticMethod::Error, provider.name(), e.to_string())
            }
            Err(_) => {
                warn!(
                    "Semantic provider '{}' timed out after {}ms, falling back to keyword weights",
                    provider.name(),
                    self.semantic_timeout.as_millis()
                );
                SemanticOutcome::failed(
                    SemanticMethod::Timeout,
                    provider.name(),
                    format!("timed out after {}ms", self.semantic_timeout.as_millis()),
                )
            }
        }
    }

    /// Deterministic core: same posting and semantic outcome, same result.
    pub fn evaluate(&self, job: &JobPosting, semantic: SemanticOutcome) -> ScoringResult {
        let title = job.title.to_lowercase();
        let description = job.description.to_lowercase();
        let text = format!("{} {}", title, description);
        let eligibility_text = extract_eligibility_text(&job.description).to_lowercase();

        let config = &self.config;
        let index = &self.index;

        let technical = score_technical(&text, &eligibility_text, index, &config.technical);
        let industry = score_industry(&text, index, &config.industry);
        let role = score_role(&title, &description, index, &config.role);
        let eligibility = score_eligibility(&eligibility_text, index, &config.eligibility);
        let visa = classify_visa(&text, index, &config.visa);
        let location = assess_location(&job.location, index, &config.location);
        let seniority = assess_seniority(&text, index, &config.seniority);

        let components = ComponentScores {
            semantic: semantic.available.then_some(semantic.score),
            technical: technical.score,
            industry: industry.score,
            role: role.score,
            eligibility: eligibility.score,
            visa: visa.score,
        };
        let weighted = aggregate(
            &components,
            &config.weights,
            location.multiplier,
            seniority.multiplier,
        );
        let fit_score = weighted.fit_score;

        // reasoning sees every match; the result only presents the first few
        let reasoning = generate_reasoning(&ReasoningInput {
            total_score: weighted.total,
            tech_matches: &technical.matches,
            role_matches: &role.matches,
            industry_matches: &industry.matches,
            priority_industry: industry.priority,
            visa_status: visa.status,
            seniority_ok: seniority.ok,
        });

        debug!(
            "Scored '{}' at {}: fit={} technical={} industry={} role={} visa={:?} location={:?} seniority={:?} semantic={:?}",
            job.title,
            job.company,
            fit_score,
            technical.score,
            industry.score,
            role.score,
            visa.status,
            location.flag,
            seniority.flag,
            semantic.metadata.method
        );

        let mut tech_matches = technical.matches;
        tech_matches.truncate(config.technical.presented_matches);

        ScoringResult {
            fit_score,
            breakdown: ScoreBreakdown::from(&components),
            matches: MatchSet {
                tech: tech_matches,
                industry: industry.matches,
                role: role.matches,
                eligibility_skills: eligibility.skills_in_requirements,
                visa_keywords: visa.keywords,
            },
            eligibility: EligibilitySummary {
                status: eligibility.status,
                experience_match: eligibility.experience_match,
                concerns: eligibility.concerns,
            },
            semantic,
            visa_status: visa.status,
            location_ok: location.ok,
            location_flag: location.flag,
            seniority_ok: seniority.ok,
            seniority_flag: seniority.flag,
            reasoning,
        }
    }
}
