//! Shared domain types for Confab.
//!
//! This crate contains the core domain types used across the Confab chat
//! scaffold: message roles, transcript messages, the transcript export
//! shape, and their associated error types.
//!
//! Zero infrastructure dependencies -- only serde and thiserror.

pub mod error;
pub mod transcript;
