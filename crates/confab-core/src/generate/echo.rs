//! Demo echo generator.

use confab_types::error::GenerateError;

use super::provider::ResponseGenerator;

/// Pure, deterministic demo backend: echoes the user message along with
/// the temperature and the transcript message count. Makes no external
/// calls and never fails. Swap in a real backend by implementing
/// `ResponseGenerator` with the same signature.
#[derive(Debug, Clone, Copy, Default)]
pub struct EchoGenerator;

impl ResponseGenerator for EchoGenerator {
    fn name(&self) -> &str {
        "echo"
    }

    fn generate(
        &self,
        user_message: &str,
        history: &[String],
        _system_prompt: &str,
        temperature: f64,
    ) -> impl std::future::Future<Output = Result<String, GenerateError>> + Send {
        // history[0] is the system line; the rest are transcript messages
        let message_count = history.len().saturating_sub(1);
        let reply = format!(
            "you said: {user_message}\n\n(temp={temperature}; messages so far={message_count})"
        );
        async move { Ok(reply) }
    }
}
