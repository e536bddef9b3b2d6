use crate::llm::prompts;

/// Substitute the app name and the raw commit text into the changelog template.
///
/// The commit text is inserted verbatim and last, so placeholders that happen to
/// appear inside commit messages are left alone.
pub fn changelog_prompt(app_name: &str, raw_commits: &str) -> String {
    let (head, tail) = prompts::CHANGELOG_TEMPLATE
        .split_once("{commits}")
        .unwrap_or((prompts::CHANGELOG_TEMPLATE, ""));

    let mut prompt = head.replace("{app_name}", app_name);
    prompt.push_str(raw_commits);
    prompt.push_str(tail);
    prompt
}
