//! Outbound ports. Application calls into infrastructure.
//!
//! Implemented by adapters.

use crate::domain::{Candidate, DomainError, Posting, ScoreBreakdown, ScoringRequest};

/// Applicant-tracking system gateway. Postings, candidates, resumes.
#[async_trait::async_trait]
pub trait AtsPort: Send + Sync {
    /// All postings visible to the API key.
    async fn list_postings(&self) -> Result<Vec<Posting>, DomainError>;

    /// Candidates who applied to a posting.
    ///
    /// - `include_archived`: false drops candidates whose opportunity is archived
    async fn list_candidates(
        &self,
        posting_id: &str,
        include_archived: bool,
    ) -> Result<Vec<Candidate>, DomainError>;

    /// Plain text of the candidate's resume. `Ok(None)` when there is no
    /// resume or its text cannot be extracted.
    async fn fetch_resume_text(&self, candidate_id: &str) -> Result<Option<String>, DomainError>;
}

/// Scoring service (LLM or mock). One call per candidate.
#[async_trait::async_trait]
pub trait ScoringPort: Send + Sync {
    /// Score one resume. Must signal rate limits as `DomainError::RateLimited`
    /// so the dispatcher can back off and retry.
    async fn score(&self, request: &ScoringRequest) -> Result<ScoreBreakdown, DomainError>;
}
