//! Session state and transcript management for Confab.
//!
//! This crate is the core of the chat scaffold: `SessionState` owns the
//! conversation transcript and its settings, the `codec` module handles
//! export/import of the transcript file format, the `generate` module
//! defines the pluggable reply-generation boundary, and `ChatController`
//! orchestrates one conversation turn at a time.
//!
//! Presentation (rendering, input widgets) is the embedding application's
//! responsibility: it drives `ChatController` and polls `SessionState`
//! accessors after each mutation.

pub mod codec;
pub mod controller;
pub mod generate;
pub mod session;

pub use controller::{ChatController, Turn};
pub use session::SessionState;
