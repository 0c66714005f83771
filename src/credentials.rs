/*!
 * API key storage.
 *
 * The generation service key is asked for once and remembered in a file
 * under the user's config directory. Subsequent runs read it back silently;
 * an environment variable or CLI flag always wins over the stored key.
 */

use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use log::debug;

use crate::errors::GenerationError;

/// File name holding the stored key, under the app config directory
const KEY_FILE_NAME: &str = "api_key";

/// File-backed store for the generation API key
#[derive(Debug, Clone)]
pub struct CredentialStore {
    path: PathBuf,
}

impl CredentialStore {
    /// Store under the platform config directory (`<config>/easyread/api_key`).
    pub fn default_location() -> Result<Self> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow!("Could not determine user config directory"))?;
        Ok(Self::at(config_dir.join("easyread").join(KEY_FILE_NAME)))
    }

    /// Store at an explicit path.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the stored key, if any. A missing file or a blank file both
    /// count as no key.
    pub fn load(&self) -> Result<Option<String>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read key file {}", self.path.display()))?;
        let key = content.trim();
        if key.is_empty() {
            Ok(None)
        } else {
            Ok(Some(key.to_string()))
        }
    }

    /// Persist a key, creating the parent directory as needed.
    pub fn save(&self, key: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }
        fs::write(&self.path, key.trim())
            .with_context(|| format!("Failed to write key file {}", self.path.display()))?;
        debug!("Stored API key at {}", self.path.display());
        Ok(())
    }

    /// Resolve the key: stored value if present, otherwise prompt once on
    /// the terminal and remember the answer.
    pub fn load_or_prompt(&self) -> Result<String> {
        if let Some(key) = self.load()? {
            return Ok(key);
        }
        let key = prompt_for_key(io::stdin().lock(), io::stderr())?;
        self.save(&key)?;
        Ok(key)
    }
}

/// Ask for an API key on the given streams. An empty answer (including a
/// closed, non-interactive stdin) is `MissingCredential`; generation cannot
/// proceed without a key.
fn prompt_for_key(mut input: impl BufRead, mut output: impl Write) -> Result<String> {
    write!(output, "Enter your generation API key: ")?;
    output.flush()?;

    let mut answer = String::new();
    input.read_line(&mut answer)?;
    let key = answer.trim();
    if key.is_empty() {
        return Err(GenerationError::MissingCredential.into());
    }
    Ok(key.to_string())
}
