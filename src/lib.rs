//! lever-rank: Rank Lever candidates against weighted requirements with Hexagonal Architecture.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod shared;
pub mod usecases;
