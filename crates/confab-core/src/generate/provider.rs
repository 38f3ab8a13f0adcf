//! ResponseGenerator trait definition.
//!
//! This is the abstraction that all reply backends implement. Uses native
//! async fn in traits (RPITIT, Rust 2024 edition); the controller awaits a
//! single string result before proceeding.

use confab_types::error::GenerateError;

/// Trait for reply-generation backends.
///
/// A generator is a pure collaborator: it only reads the inputs it is
/// given and has no access to session state. `history` is the flattened
/// transcript -- one `"system: {prompt}"` line followed by one
/// `"{role}: {content}"` line per message, oldest first -- a stable
/// contract any backend must accept. `temperature` is passed through
/// unmodified; whether and how to use it is the backend's business.
///
/// Implementations may do arbitrary internal work (network calls, retries,
/// timeouts) but report failure as a single `GenerateError`.
pub trait ResponseGenerator: Send + Sync {
    /// Human-readable backend name (e.g., "echo", "anthropic").
    fn name(&self) -> &str;

    /// Produce a reply to `user_message` given the flattened history.
    fn generate(
        &self,
        user_message: &str,
        history: &[String],
        system_prompt: &str,
        temperature: f64,
    ) -> impl std::future::Future<Output = Result<String, GenerateError>> + Send;
}
