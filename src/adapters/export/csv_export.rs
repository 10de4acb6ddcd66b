//! CSV export of ranked candidates. Uses the `csv` crate with every field
//! quoted so spreadsheet apps keep the HYPERLINK formulas intact.

use crate::domain::{DomainError, RankedCandidate};
use chrono::Local;
use std::path::{Path, PathBuf};
use tracing::info;

const HEADER: [&str; 13] = [
    "Rank",
    "Name",
    "Email",
    "Overall Score",
    "Position",
    "Summary",
    "Strengths",
    "Weaknesses",
    "JD Match Score",
    "Requirement Scores",
    "Lever Profile",
    "LinkedIn Profile",
    "Status",
];

fn hyperlink(url: Option<&str>, label: &str) -> String {
    url.filter(|u| !u.is_empty())
        .map(|u| format!("=HYPERLINK(\"{}\", \"{}\")", u.replace('"', "%22"), label))
        .unwrap_or_default()
}

/// Integral scores print without a fractional part.
fn format_score(score: f64) -> String {
    if score.fract() == 0.0 {
        format!("{:.0}", score)
    } else {
        format!("{:.1}", score)
    }
}

/// Ranked results as a CSV document, rank 1 first.
pub fn results_to_csv(results: &[RankedCandidate]) -> Result<String, csv::Error> {
    let mut wtr = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Always)
        .from_writer(Vec::new());

    wtr.write_record(HEADER)?;

    for (rank, ranked) in results.iter().enumerate() {
        let candidate = &ranked.candidate;
        let result = &ranked.result;

        let requirement_scores = result
            .requirement_scores
            .iter()
            .map(|r| format!("{}: {}", r.requirement, format_score(r.score)))
            .collect::<Vec<_>>()
            .join("; ");

        wtr.write_record([
            (rank + 1).to_string(),
            candidate.name.clone(),
            candidate.primary_email().unwrap_or_default().to_string(),
            format_score(result.overall_score),
            candidate.posting_name.clone().unwrap_or_default(),
            result.summary.clone(),
            result.strengths.join("; "),
            result.weaknesses.join("; "),
            result.jd_match_score.map(format_score).unwrap_or_default(),
            requirement_scores,
            hyperlink(candidate.profile_url.as_deref(), "View Profile"),
            hyperlink(candidate.linkedin(), "View LinkedIn"),
            if result.error { "error" } else { "ok" }.to_string(),
        ])?;
    }

    wtr.flush()?;
    let bytes = wtr
        .into_inner()
        .map_err(|e| csv::Error::from(std::io::Error::other(e.to_string())))?;

    String::from_utf8(bytes).map_err(|e| {
        csv::Error::from(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            e.to_string(),
        ))
    })
}

/// Writes the CSV under `reports_dir` as `candidate_rankings_<timestamp>.csv`.
pub async fn export_results(
    results: &[RankedCandidate],
    reports_dir: &Path,
) -> Result<PathBuf, DomainError> {
    let content = results_to_csv(results)
        .map_err(|e| DomainError::Export(format!("Failed to generate CSV: {}", e)))?;

    tokio::fs::create_dir_all(reports_dir)
        .await
        .map_err(|e| DomainError::Export(format!("Failed to create reports dir: {}", e)))?;

    let filename = format!(
        "candidate_rankings_{}.csv",
        Local::now().format("%Y%m%d_%H%M%S")
    );
    let path = reports_dir.join(filename);

    tokio::fs::write(&path, content)
        .await
        .map_err(|e| DomainError::Export(format!("Failed to write CSV: {}", e)))?;

    info!(path = %path.display(), rows = results.len(), "results exported");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Candidate, RequirementScore, ScoreBreakdown, ScoringResult};

    fn ranked() -> Vec<RankedCandidate> {
        let mut jane = Candidate::new("opp-1", "Jane Doe");
        jane.emails = vec!["jane@example.com".into()];
        jane.profile_url = Some("https://hire.lever.co/candidates/opp-1".into());
        jane.links = vec!["https://www.linkedin.com/in/jane".into()];
        jane.posting_name = Some("Backend Engineer".into());

        let breakdown = ScoreBreakdown {
            overall_score: 87.0,
            strengths: vec!["Rust".into(), "Distributed systems".into()],
            weaknesses: vec!["No Go".into()],
            summary: "Strong fit, \"senior\" level.".into(),
            requirement_scores: vec![RequirementScore {
                requirement: "Rust".into(),
                score: 92.5,
            }],
            jd_match_score: Some(80.0),
        };

        vec![
            RankedCandidate {
                candidate: jane,
                result: ScoringResult::scored("opp-1", breakdown),
            },
            RankedCandidate {
                candidate: Candidate::new("opp-2", "John Roe"),
                result: ScoringResult::degraded("opp-2", "timeout"),
            },
        ]
    }

    #[test]
    fn test_csv_layout() {
        let csv = results_to_csv(&ranked()).unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("\"Rank\",\"Name\",\"Email\",\"Overall Score\""));
        assert!(lines[0].ends_with("\"Status\""));
        assert!(lines[1].starts_with("\"1\",\"Jane Doe\",\"jane@example.com\",\"87\",\"Backend Engineer\""));
        assert!(lines[1].contains("\"Rust; Distributed systems\""));
        assert!(lines[1].contains("\"Rust: 92.5\""));
        assert!(lines[1].contains(
            "\"=HYPERLINK(\"\"https://hire.lever.co/candidates/opp-1\"\", \"\"View Profile\"\")\""
        ));
        assert!(lines[1].contains("\"Strong fit, \"\"senior\"\" level.\""));
        assert!(lines[2].starts_with("\"2\",\"John Roe\",\"\",\"0\""));
        assert!(lines[2].ends_with("\"error\""));
    }

    #[test]
    fn test_empty_results_still_have_header() {
        let csv = results_to_csv(&[]).unwrap();
        assert_eq!(csv.lines().count(), 1);
    }

    #[tokio::test]
    async fn test_export_writes_file() {
        let dir = std::env::temp_dir().join(format!("lever-rank-export-{}", std::process::id()));
        let path = export_results(&ranked(), &dir).await.unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("Jane Doe"));
        assert!(path.file_name().unwrap().to_string_lossy().starts_with("candidate_rankings_"));
        let _ = std::fs::remove_dir_all(&dir);
    }
}
