//! Port traits. API boundaries for the hexagon.
//!
//! - Inbound: the terminal UI drives the ranking flow
//! - Outbound: the ATS and the scoring model, implemented by adapters

pub mod inbound;
pub mod outbound;

pub use inbound::InputPort;
pub use outbound::{AtsPort, ScoringPort};
