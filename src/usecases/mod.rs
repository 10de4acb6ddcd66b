//! Application use cases. Orchestrate domain logic via ports.

pub mod location_filter;
pub mod ranking_service;
pub mod scoring_dispatcher;

pub use location_filter::LocationFilter;
pub use ranking_service::{RankingService, filter_results_by_score};
pub use scoring_dispatcher::{ProgressFn, RetryPolicy, ScoringDispatcher};
