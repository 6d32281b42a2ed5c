//! capy-iconpacks: Icon pack discovery and per-app icon resolver.
//!
//! Provides a unified service for:
//! - Discovering installed icon packs advertising the ADW / GO launcher theme actions
//! - Parsing each pack's appfilter.xml into a component -> drawable index, once per pack
//! - Resolving an app's launch component to a drawable in a chosen pack
//! - Normalizing that drawable into PNG bytes for the caller

pub mod appfilter;
pub mod cache;
pub mod config;
pub mod discovery;
pub mod drawable;
pub mod error;
pub mod manager;
pub mod manifest;
pub mod memory;
pub mod normalize;
pub mod packages;
pub mod paths;
pub mod registry;
pub mod types;

pub use appfilter::Mapping;
pub use cache::{PackIndexCache, ParsedPack};
pub use config::IconPackConfig;
pub use drawable::{ArtworkHandle, BitmapDrawable, ColorDrawable, Drawable};
pub use error::IconPackError;
pub use manager::IconPackManager;
pub use packages::FsRegistry;
pub use registry::{PackageRegistry, ResourceContainer};
pub use types::{ComponentKey, IconPack};

use std::sync::{Arc, OnceLock};

static MANAGER: OnceLock<Arc<IconPackManager>> = OnceLock::new();

/// Install the global manager. Returns false if one is already in use.
pub fn install_manager(manager: IconPackManager) -> bool {
    MANAGER.set(Arc::new(manager)).is_ok()
}

/// Get the global manager instance.
/// Defaults to the filesystem registry under the XDG data directory.
pub fn get_manager() -> Arc<IconPackManager> {
    MANAGER
        .get_or_init(|| {
            let registry = FsRegistry::new(paths::get_packages_directory());
            Arc::new(IconPackManager::new(Arc::new(registry), IconPackConfig::default()))
        })
        .clone()
}

/// Convenience function to list installed icon packs.
pub fn list_icon_packs() -> Result<Vec<IconPack>, IconPackError> {
    get_manager().list_icon_packs()
}

/// Convenience function to get PNG bytes of an app's icon from a pack.
pub fn get_icon_for_app(pack_id: &str, app_id: &str) -> Result<Option<Vec<u8>>, IconPackError> {
    get_manager().get_icon_for_app(pack_id, app_id)
}
