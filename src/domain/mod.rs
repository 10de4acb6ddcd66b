//! Core domain layer. No external I/O dependencies.
//!
//! Entities and business rules live here. Dependencies flow inward.

pub mod entities;
pub mod errors;
pub mod location;
pub mod scoring;

pub use entities::{Candidate, CandidateWithResume, Posting};
pub use errors::DomainError;
pub use location::{GeoDescriptor, LocationFilterSpec};
pub use scoring::{
    RankedCandidate, RequirementScore, ScoreBreakdown, ScoringCriteria, ScoringRequest,
    ScoringResult, WeightedRequirement,
};
