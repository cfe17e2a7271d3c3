//! # WasteTrack Domain
//!
//! Business domain types shared by every WasteTrack crate.
//!
//! This crate contains:
//! - Domain data types (users, roles, coordinates, location inputs)
//! - Domain error types and Result definitions
//! - Configuration structures with their built-in fallbacks
//! - Domain constants
//!
//! ## Architecture
//! - No dependencies on other WasteTrack crates
//! - Only external dependencies allowed
//! - Pure domain models and data structures

pub mod config;
pub mod constants;
pub mod errors;
pub mod types;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
