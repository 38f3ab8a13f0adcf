//! Session state for a single chat conversation.
//!
//! `SessionState` owns the ordered transcript, the system prompt, and the
//! sampling temperature, and enforces their invariants across every
//! mutation. It performs no I/O; export/import lives in the `codec` module.

use confab_types::error::{SessionError, TranscriptError};
use confab_types::transcript::{Message, MessageRole};
use tracing::{debug, info, warn};

/// Default system prompt for a fresh session.
pub const DEFAULT_SYSTEM_PROMPT: &str = "you are a helpful, concise assistant.";

/// Default sampling temperature for a fresh session.
pub const DEFAULT_TEMPERATURE: f64 = 0.3;

/// Greeting shown when a session is first created.
pub const DEFAULT_GREETING: &str = "hi! i'm your chatbot. how can i help today?";

/// Greeting used by the "new welcome" action.
pub const DEFAULT_WELCOME: &str = "hey again! what shall we tackle?";

/// Inclusive temperature bounds. UIs present 0.1 steps, but any float in
/// this range is a valid stored value.
pub const TEMPERATURE_MIN: f64 = 0.0;
pub const TEMPERATURE_MAX: f64 = 1.5;

/// State of one chat session: transcript, system prompt, and temperature.
///
/// Messages are kept in insertion order (oldest first) and never reordered.
/// Each session instance is independent; a server can hold many of them
/// side by side. Mutations require `&mut self`, so the borrow checker is
/// the mutual-exclusion boundary for concurrent access.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionState {
    messages: Vec<Message>,
    system_prompt: String,
    temperature: f64,
}

impl SessionState {
    /// Create a session with the default greeting, prompt, and temperature.
    pub fn new() -> Self {
        Self {
            messages: vec![Message::assistant(DEFAULT_GREETING)],
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
            temperature: DEFAULT_TEMPERATURE,
        }
    }

    /// The transcript, oldest first.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// The current system prompt.
    pub fn system_prompt(&self) -> &str {
        &self.system_prompt
    }

    /// The current sampling temperature, always within [0.0, 1.5].
    pub fn temperature(&self) -> f64 {
        self.temperature
    }

    /// Append one message to the transcript.
    ///
    /// Never fails; there is no upper bound on transcript length.
    pub fn append_message(&mut self, role: MessageRole, content: impl Into<String>) {
        self.messages.push(Message {
            role,
            content: content.into(),
        });
        debug!(role = %role, message_count = self.messages.len(), "Message appended");
    }

    /// Clear the transcript.
    pub fn reset(&mut self) {
        self.messages.clear();
        info!("Transcript reset");
    }

    /// Replace the transcript with a single assistant greeting.
    pub fn new_welcome(&mut self, text: impl Into<String>) {
        self.messages = vec![Message::assistant(text)];
        info!("Transcript replaced with new welcome");
    }

    /// Replace the system prompt. Any text is accepted, including empty.
    pub fn set_system_prompt(&mut self, text: impl Into<String>) {
        self.system_prompt = text.into();
    }

    /// Set the sampling temperature.
    ///
    /// Out-of-range and non-finite values are rejected with
    /// `SessionError::TemperatureOutOfRange`; the stored value is left
    /// unchanged. The bounds 0.0 and 1.5 are inclusive. The same policy
    /// applies to every programmatic path (the transcript file format
    /// carries no temperature, so import never hits this).
    pub fn set_temperature(&mut self, value: f64) -> Result<(), SessionError> {
        if !value.is_finite() || !(TEMPERATURE_MIN..=TEMPERATURE_MAX).contains(&value) {
            warn!(value, "Rejected out-of-range temperature");
            return Err(SessionError::TemperatureOutOfRange { value });
        }
        self.temperature = value;
        Ok(())
    }

    /// Atomically replace the transcript (and optionally the system prompt)
    /// from raw imported values.
    ///
    /// Every element is validated into a well-formed `Message` before
    /// anything is committed: on failure the prior state is untouched.
    /// `system_prompt: None` keeps the current prompt, matching an import
    /// payload that omits the key.
    pub fn replace_all(
        &mut self,
        raw_messages: &[serde_json::Value],
        system_prompt: Option<String>,
    ) -> Result<(), TranscriptError> {
        let mut messages = Vec::with_capacity(raw_messages.len());
        for (index, raw) in raw_messages.iter().enumerate() {
            if !raw.is_object() {
                return Err(TranscriptError::MessageNotObject { index });
            }
            let message: Message = serde_json::from_value(raw.clone()).map_err(|e| {
                TranscriptError::InvalidMessage {
                    index,
                    reason: e.to_string(),
                }
            })?;
            messages.push(message);
        }

        self.messages = messages;
        if let Some(prompt) = system_prompt {
            self.system_prompt = prompt;
        }
        info!(message_count = self.messages.len(), "Transcript imported");
        Ok(())
    }

    /// Flatten the session into history lines for a reply generator:
    /// `"system: {prompt}"` first, then `"{role}: {content}"` per message,
    /// oldest first. This line format is a stable contract with generator
    /// backends.
    pub fn flattened_history(&self) -> Vec<String> {
        let mut lines = Vec::with_capacity(self.messages.len() + 1);
        lines.push(format!("system: {}", self.system_prompt));
        for message in &self.messages {
            lines.push(format!("{}: {}", message.role, message.content));
        }
        lines
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_new_session_defaults() {
        let state = SessionState::new();
        assert_eq!(state.messages(), &[Message::assistant(DEFAULT_GREETING)]);
        assert_eq!(state.system_prompt(), DEFAULT_SYSTEM_PROMPT);
        assert_eq!(state.temperature(), DEFAULT_TEMPERATURE);
    }

    #[test]
    fn test_append_preserves_order() {
        let mut state = SessionState::new();
        state.reset();
        state.append_message(MessageRole::User, "first");
        state.append_message(MessageRole::Assistant, "second");
        state.append_message(MessageRole::User, "");
        assert_eq!(
            state.messages(),
            &[
                Message::user("first"),
                Message::assistant("second"),
                Message::user(""),
            ]
        );
    }

    #[test]
    fn test_reset_empties_transcript() {
        let mut state = SessionState::new();
        state.append_message(MessageRole::User, "hello");
        state.reset();
        assert!(state.messages().is_empty());

        // Reset is idempotent
        state.reset();
        assert!(state.messages().is_empty());
    }

    #[test]
    fn test_new_welcome_replaces_transcript() {
        let mut state = SessionState::new();
        state.append_message(MessageRole::User, "hello");
        state.new_welcome("hey again!");
        assert_eq!(state.messages(), &[Message::assistant("hey again!")]);
    }

    #[test]
    fn test_set_system_prompt_accepts_empty() {
        let mut state = SessionState::new();
        state.set_system_prompt("");
        assert_eq!(state.system_prompt(), "");
    }

    #[test]
    fn test_set_temperature_bounds_inclusive() {
        let mut state = SessionState::new();
        state.set_temperature(TEMPERATURE_MIN).unwrap();
        assert_eq!(state.temperature(), 0.0);
        state.set_temperature(TEMPERATURE_MAX).unwrap();
        assert_eq!(state.temperature(), 1.5);
        state.set_temperature(0.7).unwrap();
        assert_eq!(state.temperature(), 0.7);
    }

    #[test]
    fn test_set_temperature_rejects_out_of_range() {
        let mut state = SessionState::new();
        state.set_temperature(1.0).unwrap();

        for value in [-0.5, 2.0, f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let err = state.set_temperature(value).unwrap_err();
            assert!(matches!(err, SessionError::TemperatureOutOfRange { .. }));
            // Rejection leaves the stored value unchanged
            assert_eq!(state.temperature(), 1.0);
        }
    }

    #[test]
    fn test_replace_all_commits_valid_messages() {
        let mut state = SessionState::new();
        let raw = vec![
            json!({"role": "user", "content": "q"}),
            json!({"role": "assistant", "content": "a"}),
        ];
        state
            .replace_all(&raw, Some("new prompt".to_string()))
            .unwrap();
        assert_eq!(
            state.messages(),
            &[Message::user("q"), Message::assistant("a")]
        );
        assert_eq!(state.system_prompt(), "new prompt");
    }

    #[test]
    fn test_replace_all_keeps_prompt_when_absent() {
        let mut state = SessionState::new();
        state.replace_all(&[], None).unwrap();
        assert!(state.messages().is_empty());
        assert_eq!(state.system_prompt(), DEFAULT_SYSTEM_PROMPT);
    }

    #[test]
    fn test_replace_all_is_atomic_on_invalid_element() {
        let mut state = SessionState::new();
        let before = state.clone();

        // Second element has an invalid role; first is fine
        let raw = vec![
            json!({"role": "user", "content": "ok"}),
            json!({"role": "system", "content": "sneaky"}),
        ];
        let err = state.replace_all(&raw, Some("ignored".to_string())).unwrap_err();
        assert!(matches!(err, TranscriptError::InvalidMessage { index: 1, .. }));
        assert_eq!(state, before);
    }

    #[test]
    fn test_replace_all_rejects_non_object_element() {
        let mut state = SessionState::new();
        let before = state.clone();
        let raw = vec![json!("not-a-mapping")];
        let err = state.replace_all(&raw, None).unwrap_err();
        assert!(matches!(err, TranscriptError::MessageNotObject { index: 0 }));
        assert_eq!(state, before);
    }

    #[test]
    fn test_flattened_history_format() {
        let mut state = SessionState::new();
        state.reset();
        state.set_system_prompt("be terse");
        state.append_message(MessageRole::User, "hi");
        state.append_message(MessageRole::Assistant, "hello");
        assert_eq!(
            state.flattened_history(),
            vec![
                "system: be terse".to_string(),
                "user: hi".to_string(),
                "assistant: hello".to_string(),
            ]
        );
    }
}
