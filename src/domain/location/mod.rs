//! Location resolution and matching.
//!
//! Reference tables are static and read-only. Nothing in here does I/O.

pub mod detector;
pub mod extract;
pub mod filter_terms;
pub mod matcher;
pub mod region;
pub mod resolver;
pub mod tables;

pub use detector::{DetectedLocation, LocationSource, detect, detect_structured, detect_with_source};
pub use filter_terms::LocationFilterSpec;
pub use matcher::{matches, matches_with};
pub use resolver::{GeoDescriptor, resolve};
