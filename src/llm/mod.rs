pub mod gemini;
mod prompts;
pub mod prompt_builder;

use crate::error::ServiceError;

/// Trait for talking to an LLM (real backend).
pub trait LlmClient: Send + Sync {
    /// Send one prompt and return the model's text reply.
    fn generate(&self, prompt: &str) -> Result<String, ServiceError>;
}
