use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use crate::error::InvokeError;

/// Commit-message text exactly as it was read from disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawChangelog(String);

impl RawChangelog {
    pub fn new(text: impl Into<String>) -> Self {
        RawChangelog(text.into())
    }

    /// Read the whole file verbatim. A path that does not exist is reported as
    /// `InvokeError::MissingInputFile`; any other read failure carries context.
    pub fn read(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(InvokeError::MissingInputFile(path.to_path_buf()).into());
        }

        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read raw changelog from {}", path.display()))?;

        log::info!("Read {} bytes of commit messages from {}", text.len(), path.display());

        Ok(RawChangelog::new(text))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Where the final changelog text came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    Model,
    Fallback,
}

/// The text that ends up on stdout and in the output file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummarizedChangelog {
    text: String,
    origin: Origin,
}

impl SummarizedChangelog {
    /// Model output, stripped of surrounding whitespace.
    pub fn from_model(text: &str) -> Self {
        SummarizedChangelog {
            text: text.trim().to_string(),
            origin: Origin::Model,
        }
    }

    /// The raw text, unchanged.
    pub fn fallback(raw: &RawChangelog) -> Self {
        SummarizedChangelog {
            text: raw.as_str().to_string(),
            origin: Origin::Fallback,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn origin(&self) -> Origin {
        self.origin
    }

    /// Overwrite `path` with the changelog text.
    pub fn write_to(&self, path: &Path) -> Result<()> {
        fs::write(path, &self.text)
            .with_context(|| format!("failed to write changelog to {}", path.display()))?;
        log::info!("Wrote changelog to {}", path.display());
        Ok(())
    }
}
