//! Wiring & DI. Entry point: bootstrap adapters, inject into services, run UI.
//! No business logic here.

use dotenv::dotenv;
use lever_rank::adapters::ai::{MockAiAdapter, OpenAiAdapter};
use lever_rank::adapters::ats::LeverAdapter;
use lever_rank::adapters::ui::tui::TuiInputPort;
use lever_rank::ports::{AtsPort, InputPort, ScoringPort};
use lever_rank::shared::config::AppConfig;
use lever_rank::usecases::{RankingService, RetryPolicy};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let env_loaded = dotenv();
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    match &env_loaded {
        Ok(path) => info!(path = %path.display(), "loaded .env"),
        Err(_) => info!(cwd = %cwd.display(), "no .env found (check CWD)"),
    }

    lever_rank::adapters::ui::init_ui();

    let cfg = AppConfig::load().unwrap_or_else(|e| {
        warn!(error = %e, "config could not be loaded, using defaults");
        AppConfig::default()
    });

    let Some(lever_key) = cfg.lever_api_key() else {
        anyhow::bail!("Set LEVER_API_KEY (env or .env) to a Lever API key with read access");
    };
    let timeout = cfg.request_timeout_or_default();

    // --- ATS ---
    let ats: Arc<dyn AtsPort> = Arc::new(
        LeverAdapter::new(cfg.lever_api_url_or_default(), lever_key, timeout)
            .map_err(|e| anyhow::anyhow!("{}", e))?,
    );

    // --- Scoring ---
    let scorer: Arc<dyn ScoringPort> = if cfg.is_ai_configured() {
        info!(
            model = %cfg.ai_model_or_default(),
            url = %cfg.ai_api_url_or_default(),
            "LLM scoring enabled"
        );
        Arc::new(
            OpenAiAdapter::new(
                cfg.ai_api_url_or_default(),
                cfg.ai_api_key().unwrap_or_default(),
                cfg.ai_model_or_default(),
                timeout,
            )
            .map_err(|e| anyhow::anyhow!("{}", e))?,
        )
    } else {
        warn!("LEVER_RANK_AI_API_KEY not set, using keyword mock scorer");
        Arc::new(MockAiAdapter::new())
    };

    let policy = RetryPolicy {
        max_attempts: cfg.max_scoring_attempts_or_default(),
        initial_backoff: cfg.backoff_min_or_default(),
        max_backoff: cfg.backoff_max_or_default(),
        call_timeout: timeout,
    };
    let workers = cfg.scoring_workers_or_default();
    info!(
        workers,
        max_attempts = policy.max_attempts,
        "scoring pool: {} workers",
        workers
    );

    // --- Services ---
    let service = Arc::new(RankingService::new(
        ats,
        scorer,
        policy,
        cfg.resume_fetch_concurrency_or_default(),
    ));

    let input_port: Arc<dyn InputPort> = Arc::new(TuiInputPort::new(
        service,
        cfg.reports_dir_or_default(),
        workers,
    ));

    // --- Run (posting -> criteria -> filter -> rank -> export) ---
    input_port
        .run()
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    Ok(())
}
