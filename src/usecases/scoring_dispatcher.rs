//! Bounded worker pool over the scoring port.
//!
//! Workers pull requests from a shared queue and report `(index, result)`
//! over a channel. The calling task aggregates results and drives progress,
//! so progress is reported once per request in completion order.

use crate::domain::{DomainError, ScoringRequest, ScoringResult};
use crate::ports::ScoringPort;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

/// `(completed, total)` after each finished request.
pub type ProgressFn<'a> = &'a mut (dyn FnMut(usize, usize) + Send);

/// Retry and timeout settings for scoring calls.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Total attempts per request, first call included.
    pub max_attempts: u32,
    pub initial_backoff: Duration,
    pub max_backoff: Duration,
    /// Bound on a single scoring call.
    pub call_timeout: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 7,
            initial_backoff: Duration::from_secs(2),
            max_backoff: Duration::from_secs(128),
            call_timeout: Duration::from_secs(60),
        }
    }
}

impl RetryPolicy {
    /// Delay before retry number `retry` (1-based): `initial * 2^(retry-1)`,
    /// raised to the server hint when one is given, capped at `max_backoff`.
    pub fn backoff_for(&self, retry: u32, retry_after_secs: Option<u64>) -> Duration {
        let factor = 1u32 << retry.saturating_sub(1).min(16);
        let exponential = self.initial_backoff.saturating_mul(factor);
        let hinted = retry_after_secs
            .map(Duration::from_secs)
            .map_or(exponential, |hint| hint.max(exponential));
        hinted.min(self.max_backoff)
    }
}

pub struct ScoringDispatcher {
    scorer: Arc<dyn ScoringPort>,
    policy: RetryPolicy,
}

impl ScoringDispatcher {
    pub fn new(scorer: Arc<dyn ScoringPort>, policy: RetryPolicy) -> Self {
        Self { scorer, policy }
    }

    /// Scores every request with at most `worker_count` calls in flight.
    ///
    /// Returns exactly one result per request, sorted by score descending;
    /// equal scores keep submission order. Failed requests come back as
    /// degraded results.
    pub async fn score_batch(
        &self,
        requests: Vec<ScoringRequest>,
        worker_count: usize,
        progress: Option<ProgressFn<'_>>,
    ) -> Vec<ScoringResult> {
        let mut indexed = self.score_indexed(requests, worker_count, progress).await;
        indexed.sort_by(|a, b| b.1.overall_score.total_cmp(&a.1.overall_score));
        indexed.into_iter().map(|(_, result)| result).collect()
    }

    /// Results in submission order, paired with their submission index.
    pub(crate) async fn score_indexed(
        &self,
        requests: Vec<ScoringRequest>,
        worker_count: usize,
        mut progress: Option<ProgressFn<'_>>,
    ) -> Vec<(usize, ScoringResult)> {
        let total = requests.len();
        if total == 0 {
            return Vec::new();
        }

        let ids: Vec<String> = requests.iter().map(|r| r.candidate_id.clone()).collect();
        let queue: Arc<Mutex<VecDeque<(usize, ScoringRequest)>>> =
            Arc::new(Mutex::new(requests.into_iter().enumerate().collect()));
        let (tx, mut rx) = mpsc::unbounded_channel::<(usize, ScoringResult)>();

        let workers = worker_count.clamp(1, total);
        info!(total, workers, "scoring batch started");

        let handles: Vec<_> = (0..workers)
            .map(|worker_id| {
                let queue = Arc::clone(&queue);
                let tx = tx.clone();
                let scorer = Arc::clone(&self.scorer);
                let policy = self.policy.clone();
                tokio::spawn(async move {
                    while let Some((idx, request)) = next_request(&queue) {
                        debug!(worker_id, candidate_id = %request.candidate_id, "scoring");
                        let result = score_one(&*scorer, &policy, &request).await;
                        if tx.send((idx, result)).is_err() {
                            break;
                        }
                    }
                })
            })
            .collect();
        drop(tx);

        let mut slots: Vec<Option<ScoringResult>> = vec![None; total];
        let mut completed = 0usize;

        while let Some((idx, result)) = rx.recv().await {
            slots[idx] = Some(result);
            completed += 1;
            if let Some(cb) = progress.as_mut() {
                cb(completed, total);
            }
        }

        for handle in handles {
            if let Err(e) = handle.await {
                error!(error = %e, "scoring worker panicked");
            }
        }

        // A panicked worker loses its in-flight request; keep the one-result-per-request count.
        let results: Vec<(usize, ScoringResult)> = slots
            .into_iter()
            .enumerate()
            .map(|(idx, slot)| {
                let result = slot.unwrap_or_else(|| {
                    completed += 1;
                    if let Some(cb) = progress.as_mut() {
                        cb(completed, total);
                    }
                    ScoringResult::degraded(&ids[idx], "scoring worker stopped unexpectedly")
                });
                (idx, result)
            })
            .collect();

        let failed = results.iter().filter(|(_, r)| r.error).count();
        info!(total, failed, "scoring batch complete");

        results
    }
}

fn next_request(
    queue: &Mutex<VecDeque<(usize, ScoringRequest)>>,
) -> Option<(usize, ScoringRequest)> {
    queue
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
        .pop_front()
}

/// One request through its retry state machine. Never fails: exhausted or
/// non-retryable errors become a degraded result.
async fn score_one(
    scorer: &dyn ScoringPort,
    policy: &RetryPolicy,
    request: &ScoringRequest,
) -> ScoringResult {
    let max_attempts = policy.max_attempts.max(1);
    let mut attempt = 0u32;

    loop {
        attempt += 1;
        let outcome = match tokio::time::timeout(policy.call_timeout, scorer.score(request)).await
        {
            Ok(outcome) => outcome,
            Err(_) => Err(DomainError::Timeout(format!(
                "scoring call exceeded {}s",
                policy.call_timeout.as_secs_f64()
            ))),
        };

        match outcome {
            Ok(breakdown) => return ScoringResult::scored(&request.candidate_id, breakdown),
            Err(e) if e.is_retryable() && attempt < max_attempts => {
                let hint = match &e {
                    DomainError::RateLimited { retry_after_secs } => *retry_after_secs,
                    _ => None,
                };
                let delay = policy.backoff_for(attempt, hint);
                warn!(
                    candidate_id = %request.candidate_id,
                    attempt,
                    max_attempts,
                    delay_ms = delay.as_millis() as u64,
                    error = %e,
                    "scoring call failed, retrying"
                );
                tokio::time::sleep(delay).await;
            }
            Err(e) => {
                warn!(
                    candidate_id = %request.candidate_id,
                    attempt,
                    error = %e,
                    "scoring failed, recording degraded result"
                );
                return ScoringResult::degraded(&request.candidate_id, &e.to_string());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ScoreBreakdown;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Score taken from the resume text; `fail:` prefixes always fail,
    /// `flaky:` prefixes are rate limited twice before succeeding.
    #[derive(Default)]
    struct ScriptedScorer {
        calls: Mutex<HashMap<String, u32>>,
        in_flight: AtomicUsize,
        peak: AtomicUsize,
    }

    #[async_trait::async_trait]
    impl ScoringPort for ScriptedScorer {
        async fn score(&self, request: &ScoringRequest) -> Result<ScoreBreakdown, DomainError> {
            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.peak.fetch_max(now, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(2)).await;
            self.in_flight.fetch_sub(1, Ordering::SeqCst);

            let calls = {
                let mut map = self.calls.lock().unwrap();
                let entry = map.entry(request.candidate_id.clone()).or_default();
                *entry += 1;
                *entry
            };

            let text = request.resume_text.as_str();
            if let Some(rest) = text.strip_prefix("fail:") {
                return Err(DomainError::Scoring(rest.to_string()));
            }
            if text.starts_with("limit:") {
                return Err(DomainError::RateLimited {
                    retry_after_secs: None,
                });
            }
            let score_text = match text.strip_prefix("flaky:") {
                Some(_) if calls <= 2 => {
                    return Err(DomainError::RateLimited {
                        retry_after_secs: None,
                    });
                }
                Some(rest) => rest,
                None => text,
            };
            Ok(ScoreBreakdown {
                overall_score: score_text.parse().unwrap_or(0.0),
                summary: format!("scored {}", request.candidate_id),
                ..ScoreBreakdown::default()
            })
        }
    }

    fn fast_policy() -> RetryPolicy {
        RetryPolicy {
            max_attempts: 4,
            initial_backoff: Duration::from_millis(1),
            max_backoff: Duration::from_millis(4),
            call_timeout: Duration::from_secs(5),
        }
    }

    fn request(id: &str, resume: &str) -> ScoringRequest {
        ScoringRequest {
            candidate_id: id.to_string(),
            resume_text: resume.to_string(),
            weighted_requirements: Vec::new(),
            job_description: Some("Rust engineer".to_string()),
            jd_weight: 100,
        }
    }

    #[test]
    fn test_backoff_doubles_and_caps() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.backoff_for(1, None), Duration::from_secs(2));
        assert_eq!(policy.backoff_for(2, None), Duration::from_secs(4));
        assert_eq!(policy.backoff_for(4, None), Duration::from_secs(16));
        assert_eq!(policy.backoff_for(10, None), Duration::from_secs(128));
        assert_eq!(policy.backoff_for(1, Some(30)), Duration::from_secs(30));
        assert_eq!(policy.backoff_for(1, Some(600)), Duration::from_secs(128));
    }

    #[tokio::test]
    async fn test_results_sorted_and_complete() {
        let scorer = Arc::new(ScriptedScorer::default());
        let dispatcher = ScoringDispatcher::new(scorer.clone(), fast_policy());
        let requests = vec![
            request("a", "40"),
            request("b", "90"),
            request("c", "fail:bad json"),
            request("d", "40"),
            request("e", "75"),
        ];

        let results = dispatcher.score_batch(requests, 2, None).await;

        let order: Vec<&str> = results.iter().map(|r| r.candidate_id.as_str()).collect();
        assert_eq!(order, ["b", "e", "a", "d", "c"]);
        assert!(results[4].error);
        assert_eq!(results[4].overall_score, 0.0);
        assert!(scorer.peak.load(Ordering::SeqCst) <= 2);
    }

    #[tokio::test]
    async fn test_progress_called_once_per_request() {
        let dispatcher =
            ScoringDispatcher::new(Arc::new(ScriptedScorer::default()), fast_policy());
        let requests: Vec<_> = (0..7)
            .map(|i| request(&i.to_string(), &(i * 10).to_string()))
            .collect();

        let mut seen = Vec::new();
        let mut record = |done: usize, total: usize| seen.push((done, total));
        let results = dispatcher.score_batch(requests, 3, Some(&mut record)).await;

        assert_eq!(results.len(), 7);
        assert_eq!(seen, (1..=7).map(|i| (i, 7)).collect::<Vec<_>>());
    }

    #[tokio::test]
    async fn test_rate_limit_retried_until_success() {
        let scorer = Arc::new(ScriptedScorer::default());
        let dispatcher = ScoringDispatcher::new(scorer.clone(), fast_policy());

        let results = dispatcher
            .score_batch(vec![request("x", "flaky:88")], 4, None)
            .await;

        assert_eq!(results.len(), 1);
        assert!(!results[0].error);
        assert_eq!(results[0].overall_score, 88.0);
        assert_eq!(scorer.calls.lock().unwrap()["x"], 3);
    }

    #[tokio::test]
    async fn test_exhausted_retries_degrade() {
        let scorer = Arc::new(ScriptedScorer::default());
        let dispatcher = ScoringDispatcher::new(scorer.clone(), fast_policy());

        let results = dispatcher
            .score_batch(vec![request("y", "limit:"), request("z", "10")], 2, None)
            .await;

        assert_eq!(results[0].candidate_id, "z");
        assert_eq!(results[1].candidate_id, "y");
        assert!(results[1].error);
        assert_eq!(results[1].overall_score, 0.0);
        assert!(results[1].summary.starts_with("Analysis failed"));
        assert_eq!(scorer.calls.lock().unwrap()["y"], 4);
    }

    #[tokio::test]
    async fn test_slow_call_times_out() {
        struct Stalled;

        #[async_trait::async_trait]
        impl ScoringPort for Stalled {
            async fn score(&self, _: &ScoringRequest) -> Result<ScoreBreakdown, DomainError> {
                tokio::time::sleep(Duration::from_secs(60)).await;
                Ok(ScoreBreakdown::default())
            }
        }

        let policy = RetryPolicy {
            max_attempts: 2,
            call_timeout: Duration::from_millis(10),
            ..fast_policy()
        };
        let dispatcher = ScoringDispatcher::new(Arc::new(Stalled), policy);
        let results = dispatcher
            .score_batch(vec![request("slow", "50")], 1, None)
            .await;

        assert!(results[0].error);
        assert!(results[0].summary.contains("timed out"));
    }

    #[tokio::test]
    async fn test_empty_batch() {
        let dispatcher =
            ScoringDispatcher::new(Arc::new(ScriptedScorer::default()), fast_policy());
        let mut calls = 0;
        let mut record = |_: usize, _: usize| calls += 1;
        assert!(dispatcher
            .score_batch(Vec::new(), 4, Some(&mut record))
            .await
            .is_empty());
        assert_eq!(calls, 0);
    }
}
