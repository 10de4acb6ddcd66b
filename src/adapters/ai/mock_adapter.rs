//! Mock scoring adapter for running without API calls.
//!
//! Scores by keyword overlap between the resume and each requirement, so
//! rankings are deterministic and roughly sensible.

use crate::domain::{DomainError, RequirementScore, ScoreBreakdown, ScoringRequest};
use crate::ports::ScoringPort;
use std::collections::HashSet;
use std::time::Duration;
use tracing::info;

/// Mock scoring adapter.
///
/// Simulates network latency with configurable delay.
pub struct MockAiAdapter {
    /// Simulated network delay in milliseconds.
    delay_ms: u64,
}

impl MockAiAdapter {
    /// Create a new mock adapter with default delay (100ms).
    pub fn new() -> Self {
        Self { delay_ms: 100 }
    }

    /// Create a mock adapter with custom delay.
    pub fn with_delay(delay_ms: u64) -> Self {
        Self { delay_ms }
    }
}

impl Default for MockAiAdapter {
    fn default() -> Self {
        Self::new()
    }
}

fn keywords(text: &str) -> HashSet<String> {
    text.split(|c: char| !c.is_alphanumeric() && c != '+' && c != '#')
        .filter(|w| w.chars().count() > 2)
        .map(str::to_lowercase)
        .collect()
}

/// Share (0..=100) of `criterion` keywords present in the resume.
fn coverage(resume: &HashSet<String>, criterion: &str) -> f64 {
    let wanted = keywords(criterion);
    if wanted.is_empty() {
        return 0.0;
    }
    let hits = wanted.iter().filter(|w| resume.contains(*w)).count();
    (hits as f64 / wanted.len() as f64 * 100.0).round()
}

#[async_trait::async_trait]
impl ScoringPort for MockAiAdapter {
    async fn score(&self, request: &ScoringRequest) -> Result<ScoreBreakdown, DomainError> {
        info!(
            candidate_id = %request.candidate_id,
            resume_len = request.resume_text.len(),
            "[MOCK] Simulating resume scoring"
        );

        tokio::time::sleep(Duration::from_millis(self.delay_ms)).await;

        let resume = keywords(&request.resume_text);

        let requirement_scores: Vec<RequirementScore> = request
            .weighted_requirements
            .iter()
            .map(|req| RequirementScore {
                requirement: req.text.clone(),
                score: coverage(&resume, &req.text),
            })
            .collect();
        let requirements_score: f64 = request
            .weighted_requirements
            .iter()
            .zip(&requirement_scores)
            .map(|(req, s)| s.score * f64::from(req.weight) / 100.0)
            .sum();

        let jd_match_score = request
            .job_description
            .as_deref()
            .map(|jd| coverage(&resume, jd));

        let overall_score = match (jd_match_score, requirement_scores.is_empty()) {
            (Some(jd), false) => {
                let jd_share = f64::from(request.jd_weight) / 100.0;
                jd * jd_share + requirements_score * (1.0 - jd_share)
            }
            (Some(jd), true) => jd,
            (None, false) => requirements_score,
            (None, true) => 50.0,
        };

        let (strengths, weaknesses): (Vec<_>, Vec<_>) =
            requirement_scores.iter().partition(|r| r.score >= 50.0);

        Ok(ScoreBreakdown {
            overall_score: overall_score.round(),
            strengths: strengths
                .iter()
                .map(|r| format!("[MOCK] Mentions {}", r.requirement))
                .collect(),
            weaknesses: weaknesses
                .iter()
                .map(|r| format!("[MOCK] Little evidence of {}", r.requirement))
                .collect(),
            summary: format!(
                "[MOCK] Keyword-overlap score for candidate {}. Configure a real AI API key for actual assessments.",
                request.candidate_id
            ),
            requirement_scores,
            jd_match_score,
        })
    }
}
