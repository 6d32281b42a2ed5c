//! Tunables for discovery, descriptor parsing and normalization.

use serde::{Deserialize, Serialize};

/// Intent actions advertised by popular icon packs.
pub const DEFAULT_THEME_ACTIONS: [&str; 2] =
    ["org.adw.launcher.THEMES", "com.gau.go.launcherex.theme"];

/// Asset name of the component-to-drawable descriptor.
pub const DEFAULT_DESCRIPTOR: &str = "appfilter.xml";

/// Edge of the square raster used when a drawable has no intrinsic size.
pub const DEFAULT_FALLBACK_SIZE: u32 = 192;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IconPackConfig {
    /// Intent actions that mark a package as an icon pack, in priority order.
    pub theme_actions: Vec<String>,
    /// Asset holding the component mapping.
    pub descriptor: String,
    /// Square size for drawables without intrinsic dimensions.
    pub fallback_size: u32,
}

impl Default for IconPackConfig {
    fn default() -> Self {
        Self {
            theme_actions: DEFAULT_THEME_ACTIONS.iter().map(|a| a.to_string()).collect(),
            descriptor: DEFAULT_DESCRIPTOR.to_string(),
            fallback_size: DEFAULT_FALLBACK_SIZE,
        }
    }
}
