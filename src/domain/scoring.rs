//! Scoring types: what is sent to the scoring collaborator and what comes back.

use super::entities::Candidate;
use super::errors::DomainError;
use serde::{Deserialize, Serialize};

/// One weighted requirement. `weight` is a percentage share.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightedRequirement {
    pub text: String,
    pub weight: u8,
}

impl WeightedRequirement {
    pub fn new(text: impl Into<String>, weight: u8) -> Self {
        Self {
            text: text.into(),
            weight,
        }
    }
}

/// What the user ranks against: requirements and/or a job description.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScoringCriteria {
    pub requirements: Vec<WeightedRequirement>,
    pub job_description: Option<String>,
    /// Share (0..=100) of the score given to the job description.
    pub jd_weight: u8,
}

impl ScoringCriteria {
    /// Drops blank requirements and blank job descriptions, clamps `jd_weight`.
    pub fn new(
        requirements: Vec<WeightedRequirement>,
        job_description: Option<String>,
        jd_weight: u8,
    ) -> Self {
        let requirements = requirements
            .into_iter()
            .filter(|r| !r.text.trim().is_empty())
            .map(|r| WeightedRequirement::new(r.text.trim(), r.weight))
            .collect();
        let job_description = job_description
            .map(|jd| jd.trim().to_string())
            .filter(|jd| !jd.is_empty());
        Self {
            requirements,
            job_description,
            jd_weight: jd_weight.min(100),
        }
    }

    pub fn total_weight(&self) -> u32 {
        self.requirements.iter().map(|r| u32::from(r.weight)).sum()
    }

    /// Rankable when requirements total exactly 100, or a job description is present.
    pub fn validate(&self) -> Result<(), DomainError> {
        let requirements_ok = !self.requirements.is_empty() && self.total_weight() == 100;
        if requirements_ok || self.job_description.is_some() {
            return Ok(());
        }
        if self.requirements.is_empty() {
            return Err(DomainError::InvalidCriteria(
                "add weighted requirements or a job description".to_string(),
            ));
        }
        Err(DomainError::InvalidCriteria(format!(
            "requirement weights total {}%, expected 100%",
            self.total_weight()
        )))
    }

    /// JD share actually sent to the scorer: 0 when there is no job description.
    pub fn effective_jd_weight(&self) -> u8 {
        if self.job_description.is_some() {
            self.jd_weight
        } else {
            0
        }
    }

    pub fn request_for(&self, candidate_id: &str, resume_text: &str) -> ScoringRequest {
        ScoringRequest {
            candidate_id: candidate_id.to_string(),
            resume_text: resume_text.to_string(),
            weighted_requirements: self.requirements.clone(),
            job_description: self.job_description.clone(),
            jd_weight: self.effective_jd_weight(),
        }
    }
}

/// One unit of work for the scoring dispatcher.
#[derive(Debug, Clone)]
pub struct ScoringRequest {
    pub candidate_id: String,
    pub resume_text: String,
    pub weighted_requirements: Vec<WeightedRequirement>,
    pub job_description: Option<String>,
    pub jd_weight: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequirementScore {
    pub requirement: String,
    pub score: f64,
}

/// Normalized scorer payload. Adapters build this from whatever shape the
/// model returned; nothing downstream sees the raw payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    /// 0..=100
    pub overall_score: f64,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub summary: String,
    pub requirement_scores: Vec<RequirementScore>,
    pub jd_match_score: Option<f64>,
}

/// Exactly one per submitted `ScoringRequest`, including failed ones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringResult {
    pub candidate_id: String,
    pub overall_score: f64,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub summary: String,
    pub requirement_scores: Vec<RequirementScore>,
    pub jd_match_score: Option<f64>,
    pub error: bool,
}

impl ScoringResult {
    pub fn scored(candidate_id: impl Into<String>, breakdown: ScoreBreakdown) -> Self {
        Self {
            candidate_id: candidate_id.into(),
            overall_score: clamp_score(breakdown.overall_score),
            strengths: breakdown.strengths,
            weaknesses: breakdown.weaknesses,
            summary: breakdown.summary,
            requirement_scores: breakdown.requirement_scores,
            jd_match_score: breakdown.jd_match_score.map(clamp_score),
            error: false,
        }
    }

    /// Zero-score result flagged as an error, kept in the ranking.
    pub fn degraded(candidate_id: impl Into<String>, reason: &str) -> Self {
        Self {
            candidate_id: candidate_id.into(),
            overall_score: 0.0,
            strengths: Vec::new(),
            weaknesses: vec!["Error analyzing resume".to_string()],
            summary: format!("Analysis failed: {}", reason),
            requirement_scores: Vec::new(),
            jd_match_score: None,
            error: true,
        }
    }
}

/// Scores outside 0..=100 (or NaN) are pulled back into range.
pub fn clamp_score(score: f64) -> f64 {
    if score.is_nan() {
        0.0
    } else {
        score.clamp(0.0, 100.0)
    }
}

/// Ranked output entry handed to the UI/export layer.
#[derive(Debug, Clone)]
pub struct RankedCandidate {
    pub candidate: Candidate,
    pub result: ScoringResult,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_criteria_drops_blank_requirements() {
        let criteria = ScoringCriteria::new(
            vec![
                WeightedRequirement::new("  Rust  ", 60),
                WeightedRequirement::new("   ", 10),
                WeightedRequirement::new("Kubernetes", 40),
            ],
            Some("   ".into()),
            150,
        );
        assert_eq!(criteria.requirements.len(), 2);
        assert_eq!(criteria.requirements[0].text, "Rust");
        assert!(criteria.job_description.is_none());
        assert_eq!(criteria.jd_weight, 100);
        assert!(criteria.validate().is_ok());
    }

    #[test]
    fn test_criteria_validation() {
        let partial = ScoringCriteria::new(vec![WeightedRequirement::new("Go", 40)], None, 50);
        assert!(matches!(
            partial.validate(),
            Err(DomainError::InvalidCriteria(_))
        ));

        let jd_only = ScoringCriteria::new(vec![], Some("Backend engineer".into()), 50);
        assert!(jd_only.validate().is_ok());

        let empty = ScoringCriteria::default();
        assert!(empty.validate().is_err());
    }

    #[test]
    fn test_effective_jd_weight_without_jd() {
        let criteria = ScoringCriteria::new(vec![WeightedRequirement::new("Go", 100)], None, 70);
        let req = criteria.request_for("c1", "resume");
        assert_eq!(req.jd_weight, 0);
        assert_eq!(req.weighted_requirements.len(), 1);
    }

    #[test]
    fn test_degraded_result_shape() {
        let r = ScoringResult::degraded("c9", "boom");
        assert!(r.error);
        assert_eq!(r.overall_score, 0.0);
        assert_eq!(r.summary, "Analysis failed: boom");
    }

    #[test]
    fn test_scored_clamps() {
        let r = ScoringResult::scored(
            "c1",
            ScoreBreakdown {
                overall_score: 140.0,
                jd_match_score: Some(f64::NAN),
                ..Default::default()
            },
        );
        assert_eq!(r.overall_score, 100.0);
        assert_eq!(r.jd_match_score, Some(0.0));
        assert!(!r.error);
    }
}
