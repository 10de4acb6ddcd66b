//! OpenAI-compatible adapter for resume scoring.
//!
//! Supports OpenAI API, Azure OpenAI, and local Ollama instances.
//! Implements `ScoringPort` with markdown stripping and payload normalization.

use super::payload;
use crate::domain::{DomainError, ScoreBreakdown, ScoringRequest};
use crate::ports::ScoringPort;
use reqwest::StatusCode;
use reqwest::header::RETRY_AFTER;
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use std::time::Duration;
use tracing::{debug, info, warn};

const MAX_COMPLETION_TOKENS: u32 = 2048;

/// OpenAI-compatible scoring adapter.
///
/// Can be configured to work with:
/// - OpenAI API (api.openai.com)
/// - Azure OpenAI
/// - Ollama (localhost)
/// - Any OpenAI-compatible API
pub struct OpenAiAdapter {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
    model: String,
}

impl OpenAiAdapter {
    /// Create a new OpenAI adapter.
    ///
    /// # Arguments
    /// * `api_url` - API endpoint (e.g., "https://api.openai.com/v1/chat/completions")
    /// * `api_key` - API key (can be empty for local Ollama)
    /// * `model` - Model name (e.g., "gpt-4o-mini", "llama3.2")
    /// * `timeout` - Bound on each request
    pub fn new(
        api_url: String,
        api_key: String,
        model: String,
        timeout: Duration,
    ) -> Result<Self, DomainError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| DomainError::Scoring(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self {
            client,
            api_url,
            api_key,
            model,
        })
    }

    /// Build the scoring prompt for one resume.
    fn build_prompt(request: &ScoringRequest) -> String {
        let mut requirements = String::new();
        if !request.weighted_requirements.is_empty() {
            requirements.push_str("Weighted Requirements:\n");
            for req in &request.weighted_requirements {
                let _ = writeln!(requirements, "- {} (Weight: {}%)", req.text, req.weight);
            }
        }

        let jd = request
            .job_description
            .as_deref()
            .map(str::trim)
            .filter(|jd| !jd.is_empty());
        let jd_block = jd
            .map(|jd| format!("Job Description:\n{}\n\n", jd))
            .unwrap_or_default();

        let has_requirements = !request.weighted_requirements.is_empty();
        let instructions = match (jd.is_some(), has_requirements) {
            (true, true) => format!(
                "\nScoring Breakdown:\n\
                 - Job Description Match: {jd}% of total score\n\
                 - Weighted Requirements Match: {req}% of total score\n\n\
                 For the requirements portion, score each requirement based on how well the candidate meets it,\n\
                 then calculate the weighted average using the provided weights.\n",
                jd = request.jd_weight,
                req = 100u8.saturating_sub(request.jd_weight)
            ),
            (true, false) => {
                "Score based entirely on how well the candidate matches the job description."
                    .to_string()
            }
            (false, true) => "Score based entirely on the weighted requirements.".to_string(),
            (false, false) => {
                "Provide a general assessment of the candidate's qualifications.".to_string()
            }
        };

        format!(
            r#"Analyze this resume against the provided criteria and provide a detailed assessment.

{jd_block}{requirements}

{instructions}

Resume:
{resume}

Provide your analysis in the following JSON format:
{{
    "overall_score": <number between 0 and 100>,
    "strengths": [<list of 3-5 key strengths>],
    "weaknesses": [<list of 2-4 areas of concern or gaps>],
    "requirement_scores": {{<requirement: score for each weighted requirement if applicable>}},
    "jd_match_score": <score for job description match if applicable>,
    "summary": "<2-3 sentence summary of the candidate's fit>"
}}

Be objective and thorough in your analysis."#,
            jd_block = jd_block,
            requirements = requirements,
            instructions = instructions,
            resume = request.resume_text
        )
    }

    /// Sanitize JSON response from LLM.
    ///
    /// LLMs sometimes wrap JSON in markdown code blocks. This strips them.
    fn sanitize_json(raw_text: &str) -> String {
        let trimmed = raw_text.trim();

        if let Some(rest) = trimmed.strip_prefix("```") {
            let without_prefix = rest.strip_prefix("json").unwrap_or(rest);
            return match without_prefix.rfind("```") {
                Some(end_idx) => without_prefix[..end_idx].trim().to_string(),
                None => without_prefix.trim().to_string(),
            };
        }

        // Prose around the object
        match (trimmed.find('{'), trimmed.rfind('}')) {
            (Some(start), Some(end)) if start < end => trimmed[start..=end].to_string(),
            _ => trimmed.to_string(),
        }
    }

    /// Maps an unsuccessful HTTP response to a domain error.
    fn classify_failure(status: StatusCode, retry_after: Option<u64>, body: &str) -> DomainError {
        if status == StatusCode::TOO_MANY_REQUESTS || is_rate_limit_message(body) {
            return DomainError::RateLimited {
                retry_after_secs: retry_after,
            };
        }
        DomainError::Scoring(format!(
            "API error {}: {}",
            status,
            body.chars().take(200).collect::<String>()
        ))
    }
}

/// Provider messages that mean "slow down" even without a 429.
fn is_rate_limit_message(body: &str) -> bool {
    let lower = body.to_lowercase();
    body.contains("RATELIMIT_EXCEEDED") || lower.contains("rate limit") || lower.contains("quota")
}

fn map_send_error(e: reqwest::Error) -> DomainError {
    if e.is_timeout() {
        DomainError::Timeout(format!("AI request: {}", e))
    } else {
        DomainError::Scoring(format!("HTTP request failed: {}", e))
    }
}

/// OpenAI API request structure.
#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    max_completion_tokens: u32,
    response_format: ResponseFormat,
}

#[derive(Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    format_type: String,
}

/// OpenAI API response structure.
#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: MessageContent,
}

#[derive(Deserialize)]
struct MessageContent {
    content: Option<String>,
}

#[async_trait::async_trait]
impl ScoringPort for OpenAiAdapter {
    async fn score(&self, request: &ScoringRequest) -> Result<ScoreBreakdown, DomainError> {
        debug!(
            candidate_id = %request.candidate_id,
            resume_len = request.resume_text.len(),
            requirements = request.weighted_requirements.len(),
            "sending resume to AI for scoring"
        );

        let body = ChatRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: Self::build_prompt(request),
            }],
            max_completion_tokens: MAX_COMPLETION_TOKENS,
            response_format: ResponseFormat {
                format_type: "json_object".to_string(),
            },
        };

        let response = self
            .client
            .post(&self.api_url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(map_send_error)?;

        let status = response.status();
        if !status.is_success() {
            let retry_after = response
                .headers()
                .get(RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.trim().parse::<u64>().ok());
            let text = response.text().await.unwrap_or_default();
            warn!(status = %status, body = %text.chars().take(200).collect::<String>(), "AI API returned error");
            return Err(Self::classify_failure(status, retry_after, &text));
        }

        let chat_response: ChatResponse = response.json().await.map_err(|e| {
            if e.is_timeout() {
                DomainError::Timeout(format!("AI response body: {}", e))
            } else {
                DomainError::Scoring(format!("Failed to parse API response: {}", e))
            }
        })?;

        let raw_content = chat_response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| DomainError::Scoring("No response choices returned".to_string()))?
            .message
            .content
            .unwrap_or_else(|| "{}".to_string());

        let clean_json = Self::sanitize_json(&raw_content);
        let value: serde_json::Value = serde_json::from_str(&clean_json).map_err(|e| {
            warn!(error = %e, json = %clean_json.chars().take(200).collect::<String>(), "JSON parse failed");
            DomainError::Scoring(format!("Failed to parse LLM JSON: {}", e))
        })?;

        let breakdown = payload::normalize(&value)?;
        info!(
            candidate_id = %request.candidate_id,
            score = breakdown.overall_score,
            "resume scored"
        );
        Ok(breakdown)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::WeightedRequirement;

    fn request(jd: Option<&str>, requirements: Vec<WeightedRequirement>, jd_weight: u8) -> ScoringRequest {
        ScoringRequest {
            candidate_id: "c1".into(),
            resume_text: "Jane Doe\nRust, Go, Kubernetes".into(),
            weighted_requirements: requirements,
            job_description: jd.map(str::to_string),
            jd_weight,
        }
    }

    fn adapter(url: String) -> OpenAiAdapter {
        OpenAiAdapter::new(url, "sk-test".into(), "gpt-4o-mini".into(), Duration::from_secs(5))
            .unwrap()
    }

    #[test]
    fn test_sanitize_json_clean() {
        let input = r#"{"overall_score": 70}"#;
        assert_eq!(OpenAiAdapter::sanitize_json(input), input);
    }

    #[test]
    fn test_sanitize_json_markdown() {
        let input = "```json\n{\"overall_score\": 70}\n```";
        assert_eq!(OpenAiAdapter::sanitize_json(input), r#"{"overall_score": 70}"#);
        let input = "```\n{\"overall_score\": 70}\n```";
        assert_eq!(OpenAiAdapter::sanitize_json(input), r#"{"overall_score": 70}"#);
    }

    #[test]
    fn test_sanitize_json_with_text() {
        let input = "Here is the analysis:\n{\"overall_score\": 70}\nThanks";
        assert_eq!(OpenAiAdapter::sanitize_json(input), r#"{"overall_score": 70}"#);
    }

    #[test]
    fn test_prompt_with_jd_and_requirements() {
        let prompt = OpenAiAdapter::build_prompt(&request(
            Some("Senior backend engineer"),
            vec![
                WeightedRequirement::new("5+ years Rust", 60),
                WeightedRequirement::new("Kubernetes", 40),
            ],
            30,
        ));
        assert!(prompt.contains("Job Description:\nSenior backend engineer"));
        assert!(prompt.contains("- 5+ years Rust (Weight: 60%)"));
        assert!(prompt.contains("Job Description Match: 30% of total score"));
        assert!(prompt.contains("Weighted Requirements Match: 70% of total score"));
        assert!(prompt.contains("Resume:\nJane Doe"));
        assert!(prompt.contains("\"overall_score\": <number between 0 and 100>"));
    }

    #[test]
    fn test_prompt_instruction_variants() {
        let jd_only = OpenAiAdapter::build_prompt(&request(Some("JD"), Vec::new(), 100));
        assert!(jd_only.contains("Score based entirely on how well the candidate matches"));
        assert!(!jd_only.contains("Weighted Requirements:"));

        let req_only = OpenAiAdapter::build_prompt(&request(
            None,
            vec![WeightedRequirement::new("Rust", 100)],
            0,
        ));
        assert!(req_only.contains("Score based entirely on the weighted requirements."));
        assert!(!req_only.contains("Job Description:"));
    }

    #[test]
    fn test_classify_failure() {
        assert!(matches!(
            OpenAiAdapter::classify_failure(StatusCode::TOO_MANY_REQUESTS, Some(7), ""),
            DomainError::RateLimited {
                retry_after_secs: Some(7)
            }
        ));
        assert!(matches!(
            OpenAiAdapter::classify_failure(StatusCode::FORBIDDEN, None, "You exceeded your current quota"),
            DomainError::RateLimited { .. }
        ));
        assert!(matches!(
            OpenAiAdapter::classify_failure(StatusCode::BAD_REQUEST, None, "bad model"),
            DomainError::Scoring(_)
        ));
    }

    #[tokio::test]
    async fn test_score_parses_fenced_payload() {
        let mut server = mockito::Server::new_async().await;
        let content = "```json\n{\"overall_score\": \"91\", \"strengths\": \"Rust\", \"summary\": \"Fit\"}\n```";
        let body = serde_json::json!({
            "choices": [{"message": {"role": "assistant", "content": content}}]
        });
        let mock = server
            .mock("POST", "/v1/chat/completions")
            .match_header("authorization", "Bearer sk-test")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body.to_string())
            .create_async()
            .await;

        let adapter = adapter(format!("{}/v1/chat/completions", server.url()));
        let breakdown = adapter
            .score(&request(Some("JD"), Vec::new(), 100))
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(breakdown.overall_score, 91.0);
        assert_eq!(breakdown.strengths, vec!["Rust"]);
        assert_eq!(breakdown.summary, "Fit");
    }

    #[tokio::test]
    async fn test_score_rate_limited_with_retry_after() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/v1/chat/completions")
            .with_status(429)
            .with_header("retry-after", "12")
            .with_body(r#"{"error": {"message": "Rate limit reached"}}"#)
            .create_async()
            .await;

        let adapter = adapter(format!("{}/v1/chat/completions", server.url()));
        let err = adapter
            .score(&request(Some("JD"), Vec::new(), 100))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            DomainError::RateLimited {
                retry_after_secs: Some(12)
            }
        ));
        assert!(err.is_retryable());
    }

    #[tokio::test]
    async fn test_score_invalid_json_is_not_retryable() {
        let mut server = mockito::Server::new_async().await;
        let body = serde_json::json!({
            "choices": [{"message": {"content": "I cannot score this resume."}}]
        });
        server
            .mock("POST", "/v1/chat/completions")
            .with_status(200)
            .with_body(body.to_string())
            .create_async()
            .await;

        let adapter = adapter(format!("{}/v1/chat/completions", server.url()));
        let err = adapter
            .score(&request(Some("JD"), Vec::new(), 100))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Scoring(_)));
        assert!(!err.is_retryable());
    }
}
