//! Inbound port. UI (adapter) calls into the application.

use crate::domain::DomainError;

/// Input port: UI/CLI drives the ranking flow.
#[async_trait::async_trait]
pub trait InputPort: Send + Sync {
    /// Run the interactive flow (pick posting, collect criteria, rank, export).
    async fn run(&self) -> Result<(), DomainError>;
}
