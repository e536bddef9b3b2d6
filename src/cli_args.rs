use clap::{ArgAction, Parser};
use std::path::PathBuf;

/// CLI options
#[derive(Parser, Debug)]
#[command(
    name = "changelog-summarizer",
    version,
    about = "Summarize raw commit messages into a release changelog with Gemini"
)]
pub struct Cli {
    /// Path to a text file containing raw commit messages
    pub input: Option<PathBuf>,

    /// API key (otherwise uses GEMINI_API_KEY env var)
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Model name to use (e.g. gemini-3-flash)
    #[arg(long, env = "CHANGELOG_MODEL")]
    pub model: Option<String>,

    /// Base URL of the Generative Language API
    #[arg(long, env = "GEMINI_API_BASE_URL")]
    pub api_base_url: Option<String>,

    /// Application name mentioned in the prompt
    #[arg(long, env = "CHANGELOG_APP_NAME")]
    pub app_name: Option<String>,

    /// Where to write the changelog (defaults to summarized_changelog.md)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}
