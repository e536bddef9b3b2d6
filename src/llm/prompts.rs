/// Template for the single changelog request. `{app_name}` and `{commits}` are
/// substituted by `prompt_builder::changelog_prompt`.
pub const CHANGELOG_TEMPLATE: &str = r#"The following is a list of commit messages for a mobile app {app_name}.
Please summarize them into a professional and concise changelog.
Categorize the changes into groups like "Features", "Improvements", "Bug Fixes", and "Chores/Internal".
Make it user-friendly for a release note.

Commit Messages:
{commits}

Summarized Changelog:
"#;

