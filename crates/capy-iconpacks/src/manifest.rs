//! Package manifest parsing.

use log::debug;
use serde::Deserialize;
use std::fs;
use std::path::Path;

pub const MANIFEST_FILE: &str = "package.json";

pub const ACTION_MAIN: &str = "android.intent.action.MAIN";
pub const CATEGORY_LAUNCHER: &str = "android.intent.category.LAUNCHER";

/// parsed from <package>/package.json.
#[derive(Clone, Debug, Deserialize)]
pub struct PackageManifest {
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default = "enabled_by_default")]
    pub enabled: bool,
    #[serde(default)]
    pub activities: Vec<ActivityDecl>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct ActivityDecl {
    pub name: String,
    #[serde(default)]
    pub actions: Vec<String>,
    #[serde(default)]
    pub categories: Vec<String>,
}

fn enabled_by_default() -> bool {
    true
}

impl PackageManifest {
    /// First activity that is both MAIN and LAUNCHER.
    pub fn launch_activity(&self) -> Option<&ActivityDecl> {
        self.activities.iter().find(|a| {
            a.actions.iter().any(|x| x == ACTION_MAIN)
                && a.categories.iter().any(|c| c == CATEGORY_LAUNCHER)
        })
    }

    /// Activities declaring `action`.
    pub fn handlers<'a>(&'a self, action: &'a str) -> impl Iterator<Item = &'a ActivityDecl> + 'a {
        self.activities
            .iter()
            .filter(move |a| a.actions.iter().any(|x| x == action))
    }
}

/// Read the manifest of a package directory.
/// Disabled or unparseable packages count as not installed.
pub fn read_manifest(package_dir: &Path) -> Option<PackageManifest> {
    let path = package_dir.join(MANIFEST_FILE);
    let content = fs::read_to_string(&path).ok()?;

    let manifest: PackageManifest = match serde_json::from_str(&content) {
        Ok(manifest) => manifest,
        Err(e) => {
            debug!("Malformed manifest {}: {}", path.display(), e);
            return None;
        }
    };

    manifest.enabled.then_some(manifest)
}
