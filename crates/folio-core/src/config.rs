// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Application configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::Result;

/// Persistent application settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FolioConfig {
    /// How many leading lines of a recipe page are searched for its title.
    pub title_scan_lines: usize,
    /// Target number of sections for projects without a specialised strategy.
    pub generic_sections: usize,
    /// Upper bound on chapter writes in flight at once.
    pub max_concurrent_writes: usize,
    /// SQLite database used by the command-line front end.
    pub database_path: Option<PathBuf>,
}

impl Default for FolioConfig {
    fn default() -> Self {
        Self {
            title_scan_lines: 5,
            generic_sections: 3,
            max_concurrent_writes: 4,
            database_path: None,
        }
    }
}

impl FolioConfig {
    /// Load settings from a JSON file. A missing file yields the defaults;
    /// keys absent from the file keep their default values.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&raw)?;
        info!(path = %path.display(), "configuration loaded");
        Ok(config)
    }

    /// Classifier knobs derived from this configuration.
    pub fn classifier(&self) -> ClassifierConfig {
        ClassifierConfig {
            title_scan_lines: self.title_scan_lines.max(1),
            generic_sections: self.generic_sections.max(1),
        }
    }
}

/// Tuning for the page classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassifierConfig {
    pub title_scan_lines: usize,
    pub generic_sections: usize,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        FolioConfig::default().classifier()
    }
}
