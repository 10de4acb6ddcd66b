//! Two-phase location filter.
//!
//! Phase A uses only the structured ATS location. Resumes are fetched in
//! phase B, and only for candidates phase A could not place.

use crate::domain::location::{self, LocationFilterSpec};
use crate::domain::Candidate;
use crate::ports::AtsPort;
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::{debug, info, warn};

/// Default number of resume downloads in flight during the deep phase.
pub const DEFAULT_RESUME_CONCURRENCY: usize = 4;

pub struct LocationFilter {
    ats: Arc<dyn AtsPort>,
    resume_concurrency: usize,
}

impl LocationFilter {
    pub fn new(ats: Arc<dyn AtsPort>) -> Self {
        Self::with_concurrency(ats, DEFAULT_RESUME_CONCURRENCY)
    }

    pub fn with_concurrency(ats: Arc<dyn AtsPort>, resume_concurrency: usize) -> Self {
        Self {
            ats,
            resume_concurrency: resume_concurrency.max(1),
        }
    }

    /// Keeps candidates whose location matches any term of `spec`.
    ///
    /// Result order: structured-field matches first, then resume/phone
    /// matches, each in input order. Duplicate ids keep their first
    /// occurrence. Deep matches come back with `resume_text` attached so a
    /// second pass does not refetch. An empty filter returns the input as is.
    pub async fn filter(
        &self,
        candidates: Vec<Candidate>,
        spec: &LocationFilterSpec,
    ) -> Vec<Candidate> {
        if spec.is_empty() {
            return candidates;
        }

        let total = candidates.len();
        let mut seen = HashSet::new();
        let mut matched_fast = Vec::new();
        let mut needs_deep_check = Vec::new();
        let mut excluded = 0usize;

        for candidate in candidates {
            if !seen.insert(candidate.id.clone()) {
                debug!(candidate_id = %candidate.id, "duplicate candidate id dropped");
                continue;
            }
            match location::detect_structured(&candidate) {
                Some(loc) if spec.matches_any(&loc) => matched_fast.push(candidate),
                Some(loc) => {
                    debug!(candidate_id = %candidate.id, location = %loc, "excluded by structured location");
                    excluded += 1;
                }
                None => needs_deep_check.push(candidate),
            }
        }

        info!(
            total,
            matched = matched_fast.len(),
            excluded,
            deep_check = needs_deep_check.len(),
            "location filter fast phase done"
        );

        if needs_deep_check.is_empty() {
            return matched_fast;
        }

        let deep_matches = self.deep_phase(needs_deep_check, spec).await;

        info!(
            fast = matched_fast.len(),
            deep = deep_matches.len(),
            "location filter done"
        );

        matched_fast.extend(deep_matches);
        matched_fast
    }

    async fn deep_phase(
        &self,
        mut candidates: Vec<Candidate>,
        spec: &LocationFilterSpec,
    ) -> Vec<Candidate> {
        fetch_missing_resumes(&self.ats, &mut candidates, self.resume_concurrency).await;

        candidates
            .into_iter()
            .filter(|candidate| match location::detect_with_source(candidate, None) {
                Some(found) if spec.matches_any(&found.location) => {
                    debug!(
                        candidate_id = %candidate.id,
                        location = %found.location,
                        source = %found.source,
                        "deep location match"
                    );
                    true
                }
                Some(found) => {
                    debug!(candidate_id = %candidate.id, location = %found.location, "deep location mismatch");
                    false
                }
                None => {
                    debug!(candidate_id = %candidate.id, "no location found; excluded");
                    false
                }
            })
            .collect()
    }
}

/// Fills `resume_text` for candidates that lack it, with at most
/// `concurrency` downloads in flight. Fetch failures leave it `None`.
pub(crate) async fn fetch_missing_resumes(
    ats: &Arc<dyn AtsPort>,
    candidates: &mut [Candidate],
    concurrency: usize,
) {
    let semaphore = Arc::new(Semaphore::new(concurrency.max(1)));

    let handles: Vec<_> = candidates
        .iter()
        .map(|candidate| {
            if candidate.resume_text.is_some() {
                return None;
            }
            let sem = Arc::clone(&semaphore);
            let ats = Arc::clone(ats);
            let id = candidate.id.clone();
            Some(tokio::spawn(async move {
                let Ok(_permit) = sem.acquire_owned().await else {
                    return None;
                };
                match ats.fetch_resume_text(&id).await {
                    Ok(text) => text,
                    Err(e) => {
                        warn!(candidate_id = %id, error = %e, "resume fetch failed; treating as no data");
                        None
                    }
                }
            }))
        })
        .collect();

    for (candidate, handle) in candidates.iter_mut().zip(handles) {
        let Some(handle) = handle else { continue };
        candidate.resume_text = match handle.await {
            Ok(text) => text.filter(|t| !t.trim().is_empty()),
            Err(e) => {
                warn!(candidate_id = %candidate.id, error = %e, "resume fetch task failed");
                None
            }
        };
    }
}
