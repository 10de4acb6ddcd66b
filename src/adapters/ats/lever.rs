//! Lever adapter. Implements AtsPort over the Lever REST API (v1).
//!
//! Basic auth with the API key as username. List endpoints are paged with
//! `hasNext` / `next` offset tokens.

use super::mapper;
use crate::domain::{Candidate, DomainError, Posting};
use crate::ports::AtsPort;
use reqwest::header::CONTENT_TYPE;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, info, warn};

const PAGE_LIMIT: &str = "100";

/// Lever API adapter.
pub struct LeverAdapter {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

/// One page of a Lever list endpoint.
#[derive(Deserialize)]
struct Page {
    #[serde(default)]
    data: Vec<Value>,
    #[serde(default, rename = "hasNext")]
    has_next: bool,
    #[serde(default)]
    next: Option<String>,
}

impl LeverAdapter {
    /// Create a new Lever adapter.
    ///
    /// # Arguments
    /// * `base_url` - API root (e.g., "https://api.lever.co/v1")
    /// * `api_key` - Lever API key
    /// * `timeout` - Bound on each request, downloads included
    pub fn new(base_url: String, api_key: String, timeout: Duration) -> Result<Self, DomainError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| DomainError::Ats(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    fn get(&self, url: &str) -> reqwest::RequestBuilder {
        self.client
            .get(url)
            .basic_auth(&self.api_key, None::<&str>)
    }

    /// Follows `next` tokens until `hasNext` is false. Non-200 is a hard error.
    async fn fetch_all(&self, path: &str, params: &[(&str, &str)]) -> Result<Vec<Value>, DomainError> {
        let url = format!("{}{}", self.base_url, path);
        let mut records = Vec::new();
        let mut offset: Option<String> = None;

        loop {
            let mut query: Vec<(&str, &str)> = params.to_vec();
            if let Some(token) = offset.as_deref() {
                query.push(("offset", token));
            }

            let response = self
                .get(&url)
                .query(&query)
                .send()
                .await
                .map_err(|e| DomainError::Ats(format!("GET {} failed: {}", path, e)))?;

            let status = response.status();
            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                return Err(DomainError::Ats(format!(
                    "GET {} returned {}: {}",
                    path,
                    status,
                    body.chars().take(200).collect::<String>()
                )));
            }

            let page: Page = response
                .json()
                .await
                .map_err(|e| DomainError::Ats(format!("Invalid response from {}: {}", path, e)))?;
            debug!(path, records = page.data.len(), has_next = page.has_next, "fetched page");
            records.extend(page.data);

            match (page.has_next, page.next) {
                (true, Some(next)) if !next.is_empty() => offset = Some(next),
                _ => break,
            }
        }

        Ok(records)
    }

    /// Download one resume file and extract its text.
    async fn download_resume(&self, download_url: &str) -> Result<Option<String>, DomainError> {
        let response = self
            .get(download_url)
            .send()
            .await
            .map_err(|e| DomainError::ResumeFetch(format!("download failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(DomainError::ResumeFetch(format!(
                "download returned {}",
                response.status()
            )));
        }

        let is_pdf = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.to_lowercase().contains("pdf"))
            || download_url.to_lowercase().ends_with(".pdf");

        let bytes = response
            .bytes()
            .await
            .map_err(|e| DomainError::ResumeFetch(format!("download body: {}", e)))?;

        let text = if is_pdf {
            tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&bytes))
                .await
                .map_err(|e| DomainError::ResumeFetch(format!("pdf task: {}", e)))?
                .map_err(|e| DomainError::ResumeFetch(format!("pdf extraction: {}", e)))?
        } else {
            String::from_utf8_lossy(&bytes).into_owned()
        };

        let text = text.trim();
        Ok((!text.is_empty()).then(|| text.to_string()))
    }

    async fn resume_text(&self, candidate_id: &str) -> Result<Option<String>, DomainError> {
        let url = format!("{}/opportunities/{}/resumes", self.base_url, candidate_id);
        let response = self
            .get(&url)
            .send()
            .await
            .map_err(|e| DomainError::ResumeFetch(format!("list resumes failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(DomainError::ResumeFetch(format!(
                "list resumes returned {}",
                response.status()
            )));
        }

        let page: Page = response
            .json()
            .await
            .map_err(|e| DomainError::ResumeFetch(format!("invalid resumes payload: {}", e)))?;

        let download_urls = page.data.iter().filter_map(|resume| {
            resume
                .get("file")
                .and_then(|f| f.get("downloadUrl"))
                .and_then(Value::as_str)
        });

        for download_url in download_urls {
            match self.download_resume(download_url).await {
                Ok(Some(text)) => return Ok(Some(text)),
                Ok(None) => debug!(candidate_id, "resume file has no text"),
                Err(e) => warn!(candidate_id, error = %e, "resume file unusable"),
            }
        }

        Ok(None)
    }
}

#[async_trait::async_trait]
impl AtsPort for LeverAdapter {
    async fn list_postings(&self) -> Result<Vec<Posting>, DomainError> {
        let records = self
            .fetch_all("/postings", &[("limit", PAGE_LIMIT), ("mode", "all")])
            .await?;
        let postings: Vec<Posting> = records.iter().filter_map(mapper::posting_from_json).collect();
        info!(count = postings.len(), "fetched postings");
        Ok(postings)
    }

    async fn list_candidates(
        &self,
        posting_id: &str,
        include_archived: bool,
    ) -> Result<Vec<Candidate>, DomainError> {
        let mut params = vec![("posting_id", posting_id), ("limit", PAGE_LIMIT)];
        if include_archived {
            params.push(("expand", "archived"));
        }

        let records = self.fetch_all("/opportunities", &params).await?;
        let total = records.len();
        let candidates: Vec<Candidate> = records
            .iter()
            .filter_map(mapper::candidate_from_json)
            .filter(|c| include_archived || !c.archived)
            .collect();

        info!(
            posting_id,
            include_archived,
            total,
            kept = candidates.len(),
            "fetched candidates"
        );
        Ok(candidates)
    }

    async fn fetch_resume_text(&self, candidate_id: &str) -> Result<Option<String>, DomainError> {
        match self.resume_text(candidate_id).await {
            Ok(text) => Ok(text),
            Err(e) => {
                warn!(candidate_id, error = %e, "resume unavailable");
                Ok(None)
            }
        }
    }
}
