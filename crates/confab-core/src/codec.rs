//! Transcript export/import codec.
//!
//! `encode` serializes a session into the transcript file format and
//! `decode` validates the structure of an imported payload. Decoding is a
//! pure parse step: applying the result to a session happens separately
//! through `SessionState::replace_all`, so a malformed payload can never
//! partially overwrite live state.
//!
//! The file format, UTF-8 JSON:
//!
//! ```json
//! {
//!   "messages": [ { "role": "user", "content": "..." }, ... ],
//!   "system_prompt": "..."
//! }
//! ```

use chrono::{DateTime, TimeZone};
use confab_types::error::TranscriptError;
use confab_types::transcript::Transcript;
use serde_json::Value;

use std::fmt;

use crate::session::SessionState;

/// Structurally valid transcript payload, not yet applied to a session.
///
/// `messages` elements are guaranteed to be JSON objects; deep validation
/// (role enumeration, string content) happens in
/// `SessionState::replace_all`. `system_prompt: None` means the key was
/// absent and the current prompt should be kept.
#[derive(Debug, Clone)]
pub struct DecodedTranscript {
    pub messages: Vec<Value>,
    pub system_prompt: Option<String>,
}

/// Serialize a session into the transcript file format.
///
/// Pretty-printed with 2-space indent and stable field order so exported
/// files are readable and diffable. Round-trips exactly with `decode` +
/// `replace_all`. Temperature is not part of the format.
pub fn encode(state: &SessionState) -> Result<String, TranscriptError> {
    let transcript = Transcript {
        messages: state.messages().to_vec(),
        system_prompt: state.system_prompt().to_string(),
    };
    serde_json::to_string_pretty(&transcript).map_err(|e| TranscriptError::Serialize(e.to_string()))
}

/// Parse and structurally validate an imported transcript payload.
///
/// Accepts only a top-level JSON object with a `messages` array of objects
/// and an optional string `system_prompt`. Any structural deviation is a
/// `TranscriptError`. Never mutates anything.
pub fn decode(raw: &str) -> Result<DecodedTranscript, TranscriptError> {
    let value: Value =
        serde_json::from_str(raw).map_err(|e| TranscriptError::Malformed(e.to_string()))?;
    let Value::Object(mut map) = value else {
        return Err(TranscriptError::Malformed(
            "top level is not an object".to_string(),
        ));
    };

    let messages = map.remove("messages").ok_or(TranscriptError::MissingMessages)?;
    let Value::Array(messages) = messages else {
        return Err(TranscriptError::MessagesNotArray);
    };
    for (index, message) in messages.iter().enumerate() {
        if !message.is_object() {
            return Err(TranscriptError::MessageNotObject { index });
        }
    }

    let system_prompt = match map.remove("system_prompt") {
        None | Some(Value::Null) => None,
        Some(Value::String(prompt)) => Some(prompt),
        Some(_) => {
            return Err(TranscriptError::Malformed(
                "'system_prompt' is not a string".to_string(),
            ));
        }
    };

    Ok(DecodedTranscript {
        messages,
        system_prompt,
    })
}

/// Suggested file name for a transcript export: `chat-YYYYMMDD-HHMMSS.json`.
pub fn export_file_name<Tz: TimeZone>(now: DateTime<Tz>) -> String
where
    Tz::Offset: fmt::Display,
{
    format!("chat-{}.json", now.format("%Y%m%d-%H%M%S"))
}
