use crate::cli_args::Cli;
use crate::error::InvokeError;
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;

pub const DEFAULT_MODEL: &str = "gemini-3-flash";
pub const DEFAULT_API_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_APP_NAME: &str = "FarmDashR (Flutter)";
pub const DEFAULT_OUTPUT: &str = "summarized_changelog.md";

/// Final resolved configuration for a run.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: String,
    pub model: String,
    pub api_base_url: String,
    pub app_name: String,
    pub output: PathBuf,
}

impl Config {
    /// Build the final config from CLI flags, environment, TOML file, and defaults.
    ///
    /// Precedence:
    ///   1. CLI flags
    ///   2. Env vars (`GEMINI_API_KEY`, `CHANGELOG_MODEL`, ...), resolved by clap
    ///   3. TOML `~/.config/changelog-summarizer.toml`
    ///   4. Hardcoded defaults
    ///
    /// The API key never comes from the TOML file.
    pub fn from_sources(cli: &Cli) -> Result<Self, InvokeError> {
        let file_cfg = load_file_config().unwrap_or_default();
        Self::resolve(cli, file_cfg)
    }

    fn resolve(cli: &Cli, file_cfg: FileConfig) -> Result<Self, InvokeError> {
        let api_key = cli
            .api_key
            .clone()
            .filter(|key| !key.trim().is_empty())
            .ok_or(InvokeError::MissingCredential)?;

        let model = cli
            .model
            .clone()
            .or(file_cfg.model)
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());

        let api_base_url = cli
            .api_base_url
            .clone()
            .or(file_cfg.api_base_url)
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());

        let app_name = cli
            .app_name
            .clone()
            .or(file_cfg.app_name)
            .unwrap_or_else(|| DEFAULT_APP_NAME.to_string());

        let output = cli
            .output
            .clone()
            .or(file_cfg.output)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT));

        Ok(Config {
            api_key,
            model,
            api_base_url,
            app_name,
            output,
        })
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    pub model: Option<String>,
    pub api_base_url: Option<String>,
    pub app_name: Option<String>,
    pub output: Option<PathBuf>,
}

/// Return `~/.config/changelog-summarizer.toml`
fn config_path() -> Option<PathBuf> {
    let home = dirs::home_dir()?;
    Some(home.join(".config").join("changelog-summarizer.toml"))
}

fn load_file_config() -> Option<FileConfig> {
    let path = config_path()?;
    if !path.exists() {
        return None;
    }

    let data = fs::read_to_string(&path).ok()?;
    match toml::from_str::<FileConfig>(&data) {
        Ok(cfg) => Some(cfg),
        Err(e) => {
            log::warn!("Ignoring malformed config {}: {e}", path.display());
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn cli(args: &[&str]) -> Cli {
        let mut argv = vec!["changelog-summarizer"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap()
    }

    #[test]
    fn missing_api_key_is_a_credential_error() {
        let mut parsed = cli(&["commits.txt"]);
        parsed.api_key = None;

        let err = Config::resolve(&parsed, FileConfig::default()).unwrap_err();
        assert!(matches!(err, InvokeError::MissingCredential));
    }

    #[test]
    fn blank_api_key_counts_as_missing() {
        let parsed = cli(&["commits.txt", "--api-key", "  "]);

        let err = Config::resolve(&parsed, FileConfig::default()).unwrap_err();
        assert!(matches!(err, InvokeError::MissingCredential));
    }

    #[test]
    fn defaults_apply_when_nothing_else_is_set() {
        let mut parsed = cli(&["commits.txt", "--api-key", "k"]);
        parsed.model = None;
        parsed.api_base_url = None;
        parsed.app_name = None;

        let cfg = Config::resolve(&parsed, FileConfig::default()).unwrap();
        assert_eq!(cfg.api_key, "k");
        assert_eq!(cfg.model, DEFAULT_MODEL);
        assert_eq!(cfg.api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(cfg.app_name, DEFAULT_APP_NAME);
        assert_eq!(cfg.output, PathBuf::from(DEFAULT_OUTPUT));
    }

    #[test]
    fn file_config_fills_gaps_but_cli_wins() {
        let parsed = cli(&[
            "commits.txt",
            "--api-key",
            "k",
            "--model",
            "gemini-cli-model",
            "--output",
            "out.md",
        ]);
        let file_cfg: FileConfig = toml::from_str(
            r#"
            model = "gemini-file-model"
            app_name = "Orchard"
            output = "file.md"
            "#,
        )
        .unwrap();
        let mut parsed = parsed;
        parsed.app_name = None;

        let cfg = Config::resolve(&parsed, file_cfg).unwrap();
        assert_eq!(cfg.model, "gemini-cli-model");
        assert_eq!(cfg.output, PathBuf::from("out.md"));
        assert_eq!(cfg.app_name, "Orchard");
    }
}
