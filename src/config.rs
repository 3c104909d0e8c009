// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Application settings read from the environment.

use anyhow::{bail, Context, Result};
use std::path::PathBuf;

const DATA_DIR_VAR: &str = "VIDNOTES_DATA_DIR";
const HISTORY_LIMIT_VAR: &str = "VIDNOTES_HISTORY_LIMIT";
const EXPORT_NAME_VAR: &str = "VIDNOTES_EXPORT_NAME";
const MEDIA_LENGTH_VAR: &str = "VIDNOTES_MEDIA_LENGTH";

/// Runtime configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Directory holding the persisted notes, categories and filters
    pub data_dir: PathBuf,
    /// Number of undo steps kept
    pub history_limit: usize,
    /// Suggested file name for the plain-text notes export
    pub export_file_name: String,
    /// Length in seconds assumed for newly opened media
    pub media_length: f64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            history_limit: 50,
            export_file_name: "video-notes.txt".to_string(),
            media_length: 3600.0,
        }
    }
}

impl AppConfig {
    /// Build the configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(dir) = lookup(DATA_DIR_VAR).filter(|v| !v.trim().is_empty()) {
            config.data_dir = PathBuf::from(dir);
        }

        if let Some(raw) = lookup(HISTORY_LIMIT_VAR) {
            let limit: usize = raw
                .trim()
                .parse()
                .with_context(|| format!("{} must be a positive integer, got {:?}", HISTORY_LIMIT_VAR, raw))?;
            if limit == 0 {
                bail!("{} must be a positive integer, got 0", HISTORY_LIMIT_VAR);
            }
            config.history_limit = limit;
        }

        if let Some(name) = lookup(EXPORT_NAME_VAR).filter(|v| !v.trim().is_empty()) {
            config.export_file_name = name;
        }

        if let Some(raw) = lookup(MEDIA_LENGTH_VAR) {
            let length: f64 = raw
                .trim()
                .parse()
                .with_context(|| format!("{} must be a number of seconds, got {:?}", MEDIA_LENGTH_VAR, raw))?;
            if !length.is_finite() || length <= 0.0 {
                bail!("{} must be a positive number of seconds, got {}", MEDIA_LENGTH_VAR, length);
            }
            config.media_length = length;
        }

        Ok(config)
    }

    /// Interaction log kept next to the persisted notes.
    pub fn log_file(&self) -> PathBuf {
        self.data_dir.join("vidnotes.log")
    }
}

fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
        .join("vidnotes")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| vars.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.history_limit, 50);
        assert_eq!(config.export_file_name, "video-notes.txt");
        assert!(config.data_dir.ends_with("vidnotes"));
        assert_eq!(config.media_length, 3600.0);
        assert!(config.log_file().ends_with("vidnotes/vidnotes.log"));
    }

    #[test]
    fn test_overrides() {
        let config = AppConfig::from_lookup(lookup(&[
            ("VIDNOTES_DATA_DIR", "/tmp/notes"),
            ("VIDNOTES_HISTORY_LIMIT", " 10 "),
            ("VIDNOTES_EXPORT_NAME", "review.txt"),
            ("VIDNOTES_MEDIA_LENGTH", "90.5"),
        ]))
        .unwrap();
        assert_eq!(config.media_length, 90.5);
        assert_eq!(config.log_file(), PathBuf::from("/tmp/notes/vidnotes.log"));
        assert_eq!(config.data_dir, PathBuf::from("/tmp/notes"));
        assert_eq!(config.history_limit, 10);
        assert_eq!(config.export_file_name, "review.txt");
    }

    #[test]
    fn test_invalid_history_limit() {
        assert!(AppConfig::from_lookup(lookup(&[("VIDNOTES_HISTORY_LIMIT", "many")])).is_err());
        assert!(AppConfig::from_lookup(lookup(&[("VIDNOTES_HISTORY_LIMIT", "0")])).is_err());
    }

    #[test]
    fn test_invalid_media_length() {
        assert!(AppConfig::from_lookup(lookup(&[("VIDNOTES_MEDIA_LENGTH", "long")])).is_err());
        assert!(AppConfig::from_lookup(lookup(&[("VIDNOTES_MEDIA_LENGTH", "-1")])).is_err());
        assert!(AppConfig::from_lookup(lookup(&[("VIDNOTES_MEDIA_LENGTH", "0")])).is_err());
    }
}
