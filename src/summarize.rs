use crate::changelog::{RawChangelog, SummarizedChangelog};
use crate::llm::{prompt_builder, LlmClient};

/// Ask the model once for a changelog. Any service failure is logged and the raw
/// text is returned instead, so callers always have something to publish.
pub fn summarize_changelog(
    llm: &dyn LlmClient,
    app_name: &str,
    raw: &RawChangelog,
) -> SummarizedChangelog {
    let prompt = prompt_builder::changelog_prompt(app_name, raw.as_str());

    log::debug!("Changelog prompt:\n{}", truncate(&prompt, 3000));

    match llm.generate(&prompt) {
        Ok(text) if !text.trim().is_empty() => SummarizedChangelog::from_model(&text),
        Ok(_) => {
            log::error!("Error calling Gemini API: no text returned from the model");
            SummarizedChangelog::fallback(raw)
        }
        Err(err) => {
            log::error!("Error calling Gemini API: {err}");
            if err.is_authentication() {
                log::error!("Check that GEMINI_API_KEY holds a valid key.");
            }
            SummarizedChangelog::fallback(raw)
        }
    }
}

/// Truncate long strings for debug logging.
fn truncate(s: &str, max_len: usize) -> String {
    match s.char_indices().nth(max_len) {
        None => s.to_string(),
        Some((cut, _)) => format!("{}...\n[truncated {} bytes]", &s[..cut], s.len() - cut),
    }
}
