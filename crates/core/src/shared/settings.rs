use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::constants::{DEFAULT_LANGUAGE, DEFAULT_LOOKAHEAD, DEFAULT_MARKER};
use super::language::Language;
use crate::transcript::domain::aligner::{AlignerOptions, MissPolicy};

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("failed to read settings from {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid settings in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to write settings to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Persisted defaults for a subtitle build. CLI flags override these.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub language: String,
    pub marker: String,
    pub miss_policy: MissPolicy,
    /// Records searched past the cursor per token; 0 searches the whole
    /// remaining stream.
    pub lookahead: usize,
    pub word_srt: bool,
    pub word_listing: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            language: DEFAULT_LANGUAGE.to_string(),
            marker: DEFAULT_MARKER.to_string(),
            miss_policy: MissPolicy::Skip,
            lookahead: DEFAULT_LOOKAHEAD,
            word_srt: false,
            word_listing: false,
        }
    }
}

impl Settings {
    fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("Wordwise").join("settings.json"))
    }

    /// Per-user settings, or defaults when the file is absent or unreadable.
    pub fn load() -> Self {
        Self::config_path()
            .filter(|path| path.exists())
            .and_then(|path| match Self::from_file(&path) {
                Ok(settings) => Some(settings),
                Err(e) => {
                    log::warn!("Ignoring settings file: {e}");
                    None
                }
            })
            .unwrap_or_default()
    }

    pub fn from_file(path: &Path) -> Result<Self, SettingsError> {
        let json = fs::read_to_string(path).map_err(|e| SettingsError::Read {
            path: path.to_path_buf(),
            source: e,
        })?;
        serde_json::from_str(&json).map_err(|e| SettingsError::Parse {
            path: path.to_path_buf(),
            source: e,
        })
    }

    pub fn save_to(&self, path: &Path) -> Result<(), SettingsError> {
        let write_err = |e| SettingsError::Write {
            path: path.to_path_buf(),
            source: e,
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(write_err)?;
        }
        let json = serde_json::to_string_pretty(self).map_err(|e| SettingsError::Parse {
            path: path.to_path_buf(),
            source: e,
        })?;
        fs::write(path, json).map_err(write_err)
    }

    /// Best-effort save to the per-user location.
    pub fn save(&self) {
        if let Some(path) = Self::config_path() {
            if let Err(e) = self.save_to(&path) {
                log::warn!("{e}");
            }
        }
    }

    pub fn language(&self) -> Language {
        Language::from_tag(&self.language)
    }

    pub fn aligner_options(&self) -> AlignerOptions {
        AlignerOptions {
            miss_policy: self.miss_policy,
            lookahead: (self.lookahead > 0).then_some(self.lookahead),
        }
    }
}
