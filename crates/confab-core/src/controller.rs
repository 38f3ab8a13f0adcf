//! Chat turn orchestration.
//!
//! `ChatController` coordinates one conversation turn: append the user
//! message, flatten the history, await the generator, append the reply.
//! From the caller's point of view a turn is atomic; the only suspension
//! point is the generator call.

use confab_types::error::GenerateError;
use confab_types::transcript::MessageRole;
use tracing::{Instrument, debug, info_span, warn};

use crate::generate::ResponseGenerator;
use crate::session::SessionState;

/// Outcome of a submitted user message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Turn {
    /// Input was empty or whitespace-only; nothing changed.
    Skipped,
    /// User message and assistant reply were both appended.
    Replied { reply: String },
}

/// Orchestrates turns for one session against one generator backend.
///
/// Owns the `SessionState`; `submit_user_message` takes `&mut self`, so a
/// caller cannot re-enter it while a generation is in flight, and no other
/// mutation can interleave with the pending append. That exclusivity is the
/// whole concurrency model: no locks, no background tasks, no retries.
pub struct ChatController<G: ResponseGenerator> {
    session: SessionState,
    generator: G,
}

impl<G: ResponseGenerator> ChatController<G> {
    /// Create a controller for the given session and generator.
    pub fn new(session: SessionState, generator: G) -> Self {
        Self { session, generator }
    }

    /// The session, for observation and for settings/import mutations
    /// between turns.
    pub fn session(&self) -> &SessionState {
        &self.session
    }

    /// Mutable session access (reset, new welcome, settings, import).
    pub fn session_mut(&mut self) -> &mut SessionState {
        &mut self.session
    }

    /// Tear down the controller and keep the session.
    pub fn into_session(self) -> SessionState {
        self.session
    }

    /// Process one user message end to end.
    ///
    /// Empty or whitespace-only input is a no-op. Otherwise the user
    /// message is appended first and stays appended even if generation
    /// fails; on success the reply is appended as an assistant message, on
    /// failure the error is returned and no assistant message (and no
    /// placeholder) is added.
    pub async fn submit_user_message(&mut self, text: &str) -> Result<Turn, GenerateError> {
        if text.trim().is_empty() {
            debug!("Ignoring empty user message");
            return Ok(Turn::Skipped);
        }

        self.session.append_message(MessageRole::User, text);
        let history = self.session.flattened_history();

        let span = info_span!(
            "generate_reply",
            generator = self.generator.name(),
            temperature = self.session.temperature(),
            history_lines = history.len(),
        );
        let reply = self
            .generator
            .generate(
                text,
                &history,
                self.session.system_prompt(),
                self.session.temperature(),
            )
            .instrument(span)
            .await
            .inspect_err(|e| {
                warn!(error = %e, "Reply generation failed; user message retained");
            })?;

        self.session.append_message(MessageRole::Assistant, reply.clone());
        Ok(Turn::Replied { reply })
    }
}
