use thiserror::Error;

/// Errors from transcript encoding and import validation.
///
/// All variants are recoverable: a failed import leaves the prior session
/// state untouched and the error is surfaced to the caller.
#[derive(Debug, Error)]
pub enum TranscriptError {
    #[error("malformed transcript: {0}")]
    Malformed(String),

    #[error("transcript has no 'messages' key")]
    MissingMessages,

    #[error("'messages' is not an array")]
    MessagesNotArray,

    #[error("message at index {index} is not an object")]
    MessageNotObject { index: usize },

    #[error("invalid message at index {index}: {reason}")]
    InvalidMessage { index: usize, reason: String },

    #[error("failed to serialize transcript: {0}")]
    Serialize(String),
}

/// Errors from session setting mutations.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Out-of-range temperatures are rejected, not clamped; the stored
    /// value is left unchanged.
    #[error("temperature {value} outside [0.0, 1.5]")]
    TemperatureOutOfRange { value: f64 },
}

/// Errors from the reply-generation collaborator.
///
/// Recovered at the controller boundary: the user's message stays in the
/// transcript, no assistant message is appended.
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("generator backend error: {message}")]
    Backend { message: String },

    #[error("generation timed out after {after_ms}ms")]
    Timeout { after_ms: u64 },

    #[error("generator returned invalid output: {0}")]
    InvalidOutput(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transcript_error_display() {
        let err = TranscriptError::InvalidMessage {
            index: 3,
            reason: "unknown role".to_string(),
        };
        assert_eq!(err.to_string(), "invalid message at index 3: unknown role");
    }

    #[test]
    fn test_session_error_display() {
        let err = SessionError::TemperatureOutOfRange { value: 2.0 };
        assert!(err.to_string().contains("2"));
        assert!(err.to_string().contains("[0.0, 1.5]"));
    }

    #[test]
    fn test_generate_error_display() {
        let err = GenerateError::Timeout { after_ms: 30_000 };
        assert_eq!(err.to_string(), "generation timed out after 30000ms");
    }
}
