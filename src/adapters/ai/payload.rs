//! Normalizes the scorer's JSON into `ScoreBreakdown`.
//!
//! Models are loose with types: numbers arrive as strings, lists as a single
//! string, requirement scores as an object or a list. Everything is coerced
//! here so nothing past the adapter sees the raw shape.

use crate::domain::scoring::clamp_score;
use crate::domain::{DomainError, RequirementScore, ScoreBreakdown};
use serde_json::{Map, Value};

pub fn normalize(payload: &Value) -> Result<ScoreBreakdown, DomainError> {
    let obj = payload.as_object().ok_or_else(|| {
        DomainError::Scoring(format!("expected a JSON object, got {}", kind(payload)))
    })?;

    Ok(ScoreBreakdown {
        overall_score: obj
            .get("overall_score")
            .and_then(as_number)
            .map(clamp_score)
            .unwrap_or(0.0),
        strengths: string_list(obj.get("strengths")),
        weaknesses: string_list(obj.get("weaknesses")),
        summary: obj.get("summary").map(as_text).unwrap_or_default(),
        requirement_scores: requirement_scores(obj.get("requirement_scores")),
        jd_match_score: obj.get("jd_match_score").and_then(as_number).map(clamp_score),
    })
}

/// Number, or a string holding one ("85", "85%", " 72.5 ").
fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().trim_end_matches('%').trim().parse().ok(),
        _ => None,
    }
}

fn as_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.trim().to_string(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn string_list(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::Array(items)) => items
            .iter()
            .map(as_text)
            .filter(|s| !s.is_empty())
            .collect(),
        Some(Value::Null) | None => Vec::new(),
        Some(other) => {
            let text = as_text(other);
            if text.is_empty() { Vec::new() } else { vec![text] }
        }
    }
}

fn requirement_scores(value: Option<&Value>) -> Vec<RequirementScore> {
    match value {
        Some(Value::Object(map)) => from_object(map),
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|item| {
                let obj = item.as_object()?;
                let requirement = ["requirement", "name", "text"]
                    .iter()
                    .find_map(|k| obj.get(*k))
                    .map(as_text)?;
                let score = obj.get("score").and_then(as_number)?;
                Some(RequirementScore {
                    requirement,
                    score: clamp_score(score),
                })
            })
            .collect(),
        _ => Vec::new(),
    }
}

fn from_object(map: &Map<String, Value>) -> Vec<RequirementScore> {
    map.iter()
        .filter_map(|(requirement, score)| {
            Some(RequirementScore {
                requirement: requirement.clone(),
                score: clamp_score(as_number(score)?),
            })
        })
        .collect()
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_well_formed_payload() {
        let breakdown = normalize(&json!({
            "overall_score": 82,
            "strengths": ["Rust", "Distributed systems"],
            "weaknesses": ["No Kubernetes"],
            "requirement_scores": {"5+ years Rust": 90, "Kubernetes": 40},
            "jd_match_score": 78.5,
            "summary": "Strong backend engineer."
        }))
        .unwrap();

        assert_eq!(breakdown.overall_score, 82.0);
        assert_eq!(breakdown.strengths.len(), 2);
        assert_eq!(breakdown.jd_match_score, Some(78.5));
        assert_eq!(breakdown.requirement_scores.len(), 2);
        assert!(
            breakdown
                .requirement_scores
                .iter()
                .any(|r| r.requirement == "Kubernetes" && r.score == 40.0)
        );
    }

    #[test]
    fn test_loose_types_are_coerced() {
        let breakdown = normalize(&json!({
            "overall_score": "85%",
            "strengths": "Great communicator",
            "weaknesses": null,
            "requirement_scores": [
                {"requirement": "Python", "score": "70"},
                {"name": "SQL", "score": 120},
                {"score": 10}
            ],
            "jd_match_score": "n/a",
            "summary": 42
        }))
        .unwrap();

        assert_eq!(breakdown.overall_score, 85.0);
        assert_eq!(breakdown.strengths, vec!["Great communicator"]);
        assert!(breakdown.weaknesses.is_empty());
        assert_eq!(
            breakdown.requirement_scores,
            vec![
                RequirementScore {
                    requirement: "Python".into(),
                    score: 70.0
                },
                RequirementScore {
                    requirement: "SQL".into(),
                    score: 100.0
                },
            ]
        );
        assert_eq!(breakdown.jd_match_score, None);
        assert_eq!(breakdown.summary, "42");
    }

    #[test]
    fn test_missing_score_defaults_to_zero() {
        let breakdown = normalize(&json!({"summary": "?"})).unwrap();
        assert_eq!(breakdown.overall_score, 0.0);
        assert!(normalize(&json!([1, 2])).is_err());
    }
}
