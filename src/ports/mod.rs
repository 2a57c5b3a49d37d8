//! Ports Layer - Trait definitions for external dependencies
//!
//! This module defines the interfaces (ports) that adapters must implement.
//! Following hexagonal architecture, these traits abstract the upstream
//! token listing APIs behind a single `TokenSource` trait so the
//! aggregation and fallback logic never touch HTTP directly.

pub mod mocks;
pub mod token_source;

// Re-export main traits and types
pub use token_source::{SourceError, TokenSource};
