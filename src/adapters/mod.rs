//! Infrastructure adapters. Implement outbound ports.
//!
//! Lever ATS, LLM scoring, CSV export, terminal UI. Map errors to DomainError.

pub mod ai;
pub mod ats;
pub mod export;
pub mod ui;
