use anyhow::Result;
use log::debug;
use crate::config::Config;
use crate::llm::LlmClient;
use crate::llm::gemini::GeminiClient;

/// Build the LLM client from the resolved config.
pub fn build_llm_client(cfg: &Config) -> Result<Box<dyn LlmClient>> {
    debug!("Using GeminiClient with model {} at {}", cfg.model, cfg.api_base_url);

    let client = GeminiClient::new(
        cfg.api_key.clone(),
        cfg.model.clone(),
        cfg.api_base_url.clone(),
    )?;

    Ok(Box::new(client))
}
