//! Implements InputPort. Inquire-based interactive prompts.
//!
//! Collects criteria, shows progress with indicatif, prints the ranking and
//! offers a CSV export.

use crate::adapters::export;
use crate::domain::{
    DomainError, LocationFilterSpec, Posting, RankedCandidate, ScoringCriteria,
    WeightedRequirement,
};
use crate::ports::InputPort;
use crate::usecases::{ProgressFn, RankingService, filter_results_by_score};
use async_trait::async_trait;
use indicatif::{ProgressBar, ProgressStyle};
use inquire::ui::RenderConfig;
use inquire::{Confirm, CustomType, InquireError, Select, Text};
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

/// Applies the colored inquire theme to every prompt that follows.
pub fn apply_theme() {
    inquire::set_global_render_config(RenderConfig::default_colored());
}

fn ui_err(e: InquireError) -> DomainError {
    DomainError::Ui(e.to_string())
}

/// Select option wrapper so the chosen posting comes back without string matching.
struct PostingOption(Posting);

impl fmt::Display for PostingOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let p = &self.0;
        write!(f, "{}", p.title)?;
        if let Some(team) = &p.team {
            write!(f, " · {}", team)?;
        }
        if let Some(location) = &p.location {
            write!(f, " · {}", location)?;
        }
        if let Some(state) = &p.state {
            write!(f, " [{}]", state)?;
        }
        Ok(())
    }
}

/// TUI adapter. Inquire prompts.
pub struct TuiInputPort {
    service: Arc<RankingService>,
    reports_dir: PathBuf,
    scoring_workers: usize,
}

impl TuiInputPort {
    pub fn new(service: Arc<RankingService>, reports_dir: PathBuf, scoring_workers: usize) -> Self {
        Self {
            service,
            reports_dir,
            scoring_workers,
        }
    }

    async fn select_posting(&self) -> Result<Option<Posting>, DomainError> {
        let spinner = spinner("Loading postings from Lever...");
        let postings = self.service.list_postings().await;
        spinner.finish_and_clear();
        let postings = postings?;

        if postings.is_empty() {
            println!("No postings found for this API key.");
            return Ok(None);
        }

        let options: Vec<PostingOption> = postings.into_iter().map(PostingOption).collect();
        let selected = Select::new("Select a posting:", options)
            .with_page_size(15)
            .prompt()
            .map_err(ui_err)?;
        Ok(Some(selected.0))
    }

    /// Inline text, or `@path` to read the description from a file.
    async fn prompt_job_description(&self) -> Result<Option<String>, DomainError> {
        let raw = Text::new("Job description (optional, @file to load):")
            .prompt()
            .map_err(ui_err)?;
        let raw = raw.trim();
        if raw.is_empty() {
            return Ok(None);
        }
        match raw.strip_prefix('@') {
            Some(path) => tokio::fs::read_to_string(path.trim())
                .await
                .map(Some)
                .map_err(|e| DomainError::Ui(format!("Cannot read {}: {}", path.trim(), e))),
            None => Ok(Some(raw.to_string())),
        }
    }

    fn prompt_requirements(&self) -> Result<Vec<WeightedRequirement>, DomainError> {
        let mut requirements = Vec::new();
        loop {
            let total: u32 = requirements
                .iter()
                .map(|r: &WeightedRequirement| u32::from(r.weight))
                .sum();
            let text = Text::new(&format!(
                "Requirement #{} (empty to finish, weights so far {}%):",
                requirements.len() + 1,
                total
            ))
            .prompt()
            .map_err(ui_err)?;
            if text.trim().is_empty() {
                return Ok(requirements);
            }
            let remaining = 100u32.saturating_sub(total).min(100) as u8;
            let weight = CustomType::<u8>::new("Weight (%):")
                .with_default(remaining)
                .with_error_message("Enter a whole number between 0 and 100")
                .prompt()
                .map_err(ui_err)?;
            requirements.push(WeightedRequirement::new(text, weight.min(100)));
        }
    }

    async fn prompt_criteria(&self) -> Result<ScoringCriteria, DomainError> {
        loop {
            let job_description = self.prompt_job_description().await?;
            let requirements = self.prompt_requirements()?;

            let jd_weight = match (&job_description, requirements.is_empty()) {
                (Some(_), false) => CustomType::<u8>::new("Job description weight (%):")
                    .with_default(50)
                    .with_help_message("Requirements get the remaining share")
                    .prompt()
                    .map_err(ui_err)?
                    .min(100),
                (Some(_), true) => 100,
                (None, _) => 0,
            };

            let criteria = ScoringCriteria::new(requirements, job_description, jd_weight);
            match criteria.validate() {
                Ok(()) => return Ok(criteria),
                Err(e) => println!("{}. Let's try again.\n", e),
            }
        }
    }

    fn prompt_filters(&self) -> Result<(LocationFilterSpec, bool, f64), DomainError> {
        let locations = Text::new("Location filter (optional):")
            .with_help_message("Cities, states, countries or regions like \"Bay Area\"; separate with |")
            .prompt()
            .map_err(ui_err)?;
        let include_archived = Confirm::new("Include archived candidates?")
            .with_default(false)
            .prompt()
            .map_err(ui_err)?;
        let min_score = CustomType::<f64>::new("Minimum score to show (0-100):")
            .with_default(0.0)
            .prompt()
            .map_err(ui_err)?;
        Ok((
            LocationFilterSpec::parse(&locations),
            include_archived,
            min_score.clamp(0.0, 100.0),
        ))
    }

    fn print_results(&self, results: &[RankedCandidate]) {
        println!();
        for (rank, ranked) in results.iter().enumerate() {
            let c = &ranked.candidate;
            let r = &ranked.result;
            let location = self
                .service
                .resolve_candidate_location(c, c.resume_text.as_deref())
                .unwrap_or_else(|| "unknown location".to_string());
            let flag = if r.error { "  [error]" } else { "" };
            println!(
                "{:>3}. {:<30} {:>5.1}  {}{}",
                rank + 1,
                c.name,
                r.overall_score,
                location,
                flag
            );
            if !r.summary.is_empty() {
                println!("     {}", r.summary);
            }
        }
        println!();
    }
}

fn spinner(message: &'static str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

fn scoring_bar(total: u64) -> ProgressBar {
    let pb = ProgressBar::new(total);
    if let Ok(style) =
        ProgressStyle::with_template("{spinner} Scoring [{bar:40}] {pos}/{len} ({eta})")
    {
        pb.set_style(style.progress_chars("=> "));
    }
    pb
}

#[async_trait]
impl InputPort for TuiInputPort {
    async fn run(&self) -> Result<(), DomainError> {
        let Some(posting) = self.select_posting().await? else {
            return Ok(());
        };

        let criteria = self.prompt_criteria().await?;
        let (location_filter, include_archived, min_score) = self.prompt_filters()?;

        let spinner = spinner("Fetching candidates and resumes...");
        let prepared = self
            .service
            .prepare_candidates(&posting.id, include_archived, &location_filter)
            .await;
        spinner.finish_and_clear();
        let mut prepared = prepared?;

        if prepared.is_empty() {
            println!("No candidates with resumes matched. Nothing to rank.");
            return Ok(());
        }
        for c in &mut prepared {
            c.candidate.posting_name = Some(posting.title.clone());
        }
        println!("Scoring {} candidates...", prepared.len());

        let bar = scoring_bar(prepared.len() as u64);
        let mut on_progress = |done: usize, _total: usize| bar.set_position(done as u64);
        let progress: ProgressFn<'_> = &mut on_progress;
        let ranked = self
            .service
            .rank_candidates(prepared, &criteria, self.scoring_workers, Some(progress))
            .await;
        bar.finish_and_clear();
        let ranked = filter_results_by_score(ranked?, min_score);

        if ranked.is_empty() {
            println!("No candidates scored at or above {}.", min_score);
            return Ok(());
        }
        self.print_results(&ranked);

        let export_now = Confirm::new("Export results to CSV?")
            .with_default(true)
            .prompt()
            .map_err(ui_err)?;
        if export_now {
            let path = export::export_results(&ranked, &self.reports_dir).await?;
            println!("Saved {}", path.display());
        }
        Ok(())
    }
}
