//! ATS adapter module. Implements AtsPort for Lever.

pub mod lever;
pub mod mapper;

pub use lever::LeverAdapter;
