//! Ranking service. What the UI calls.
//!
//! Flow:
//! 1. List candidates for a posting
//! 2. Two-phase location filter
//! 3. Fetch resumes for the survivors
//! 4. Score through the dispatcher and rank

use super::location_filter::{self, LocationFilter};
use super::scoring_dispatcher::{ProgressFn, RetryPolicy, ScoringDispatcher};
use crate::domain::location::{self, LocationFilterSpec};
use crate::domain::{
    Candidate, CandidateWithResume, DomainError, Posting, RankedCandidate, ScoringCriteria,
};
use crate::ports::{AtsPort, ScoringPort};
use std::sync::Arc;
use tracing::info;

pub struct RankingService {
    ats: Arc<dyn AtsPort>,
    location_filter: LocationFilter,
    dispatcher: ScoringDispatcher,
    resume_concurrency: usize,
}

impl RankingService {
    pub fn new(
        ats: Arc<dyn AtsPort>,
        scorer: Arc<dyn ScoringPort>,
        policy: RetryPolicy,
        resume_concurrency: usize,
    ) -> Self {
        Self {
            location_filter: LocationFilter::with_concurrency(Arc::clone(&ats), resume_concurrency),
            dispatcher: ScoringDispatcher::new(scorer, policy),
            ats,
            resume_concurrency: resume_concurrency.max(1),
        }
    }

    pub async fn list_postings(&self) -> Result<Vec<Posting>, DomainError> {
        self.ats.list_postings().await
    }

    pub async fn filter_by_location(
        &self,
        candidates: Vec<Candidate>,
        spec: &LocationFilterSpec,
    ) -> Vec<Candidate> {
        self.location_filter.filter(candidates, spec).await
    }

    /// Best known location for display; `None` when no source yields one.
    pub fn resolve_candidate_location(
        &self,
        candidate: &Candidate,
        resume_text: Option<&str>,
    ) -> Option<String> {
        location::detect(candidate, resume_text)
    }

    /// Candidates of a posting that pass the location filter and have resume
    /// text. ATS listing failures propagate; candidates without a usable
    /// resume are skipped.
    pub async fn prepare_candidates(
        &self,
        posting_id: &str,
        include_archived: bool,
        spec: &LocationFilterSpec,
    ) -> Result<Vec<CandidateWithResume>, DomainError> {
        let candidates = self
            .ats
            .list_candidates(posting_id, include_archived)
            .await?;
        let listed = candidates.len();

        let mut candidates = self.filter_by_location(candidates, spec).await;
        let after_filter = candidates.len();

        location_filter::fetch_missing_resumes(&self.ats, &mut candidates, self.resume_concurrency)
            .await;

        let prepared: Vec<CandidateWithResume> = candidates
            .into_iter()
            .filter_map(|candidate| {
                let Some(resume_text) = candidate.resume_text.clone() else {
                    info!(candidate_id = %candidate.id, name = %candidate.name, "no resume text; skipped");
                    return None;
                };
                Some(CandidateWithResume {
                    candidate,
                    resume_text,
                })
            })
            .collect();

        info!(
            posting_id,
            listed,
            after_filter,
            with_resume = prepared.len(),
            "candidates prepared"
        );

        Ok(prepared)
    }

    /// Scores every candidate and returns them best first. Equal scores keep
    /// input order. Invalid criteria are rejected before any scoring call.
    pub async fn rank_candidates(
        &self,
        candidates: Vec<CandidateWithResume>,
        criteria: &ScoringCriteria,
        worker_count: usize,
        progress: Option<ProgressFn<'_>>,
    ) -> Result<Vec<RankedCandidate>, DomainError> {
        criteria.validate()?;

        let requests = candidates
            .iter()
            .map(|c| criteria.request_for(&c.candidate.id, &c.resume_text))
            .collect();

        let results = self
            .dispatcher
            .score_indexed(requests, worker_count, progress)
            .await;

        let mut ranked: Vec<RankedCandidate> = candidates
            .into_iter()
            .zip(results)
            .map(|(c, (_, result))| RankedCandidate {
                candidate: c.candidate,
                result,
            })
            .collect();
        ranked.sort_by(|a, b| b.result.overall_score.total_cmp(&a.result.overall_score));

        Ok(ranked)
    }
}

/// Drops results scoring below `min_score`. A threshold of 0 or less keeps everything.
pub fn filter_results_by_score(results: Vec<RankedCandidate>, min_score: f64) -> Vec<RankedCandidate> {
    if min_score <= 0.0 {
        return results;
    }
    results
        .into_iter()
        .filter(|r| r.result.overall_score >= min_score)
        .collect()
}
