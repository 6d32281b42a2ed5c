//! Launcher configuration file.

use capy_iconpacks::IconPackConfig;
use log::warn;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const DEFAULT_EXPORT_JOBS: usize = 4;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LauncherConfig {
    /// Installed packages root, overriding the XDG default.
    pub packages_dir: Option<PathBuf>,
    /// Icons resolved in parallel by `export`.
    pub export_jobs: usize,
    pub icon_packs: IconPackConfig,
}

impl Default for LauncherConfig {
    fn default() -> Self {
        Self {
            packages_dir: None,
            export_jobs: DEFAULT_EXPORT_JOBS,
            icon_packs: IconPackConfig::default(),
        }
    }
}

impl LauncherConfig {
    /// Load from config file, or return default if not found or malformed
    pub fn load(path: &Path) -> Self {
        let Ok(content) = fs::read_to_string(path) else {
            return Self::default();
        };

        match serde_json::from_str(&content) {
            Ok(config) => config,
            Err(e) => {
                warn!("Ignoring malformed config {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn export_jobs(&self) -> usize {
        self.export_jobs.max(1)
    }
}
