//! Icon resolution entry point.

use crate::cache::PackIndexCache;
use crate::config::IconPackConfig;
use crate::discovery;
use crate::drawable::ArtworkHandle;
use crate::error::IconPackError;
use crate::normalize;
use crate::registry::{DRAWABLE, PackageRegistry};
use crate::types::IconPack;
use log::debug;
use std::sync::Arc;

/// Discovers icon packs and resolves per-app icons from them.
pub struct IconPackManager {
    registry: Arc<dyn PackageRegistry>,
    config: IconPackConfig,
    cache: PackIndexCache,
}

impl IconPackManager {
    pub fn new(registry: Arc<dyn PackageRegistry>, config: IconPackConfig) -> Self {
        let cache = PackIndexCache::new(registry.clone(), config.descriptor.clone());
        Self {
            registry,
            config,
            cache,
        }
    }

    pub fn config(&self) -> &IconPackConfig {
        &self.config
    }

    pub fn registry(&self) -> &Arc<dyn PackageRegistry> {
        &self.registry
    }

    pub fn cache(&self) -> &PackIndexCache {
        &self.cache
    }

    /// Installed icon packs, sorted by label.
    pub fn list_icon_packs(&self) -> Result<Vec<IconPack>, IconPackError> {
        discovery::list_icon_packs(self.registry.as_ref(), &self.config.theme_actions)
    }

    /// Find the drawable `pack_id` provides for `app_id`.
    ///
    /// `Ok(None)` when either id is blank, the app has no launch component,
    /// the pack does not map it, or the mapped drawable does not exist.
    /// Only exact component matches count.
    pub fn resolve_icon(
        &self,
        pack_id: &str,
        app_id: &str,
    ) -> Result<Option<ArtworkHandle>, IconPackError> {
        if pack_id.trim().is_empty() || app_id.trim().is_empty() {
            return Ok(None);
        }

        let Some(component) = self.registry.launch_component(app_id) else {
            debug!("{} has no launch component", app_id);
            return Ok(None);
        };

        let pack = self.cache.get_or_build(pack_id)?;
        let key = component.to_string();

        let Some(drawable_name) = pack.mapping.drawable_for(&key) else {
            debug!("{} has no icon for {}", pack_id, key);
            return Ok(None);
        };

        let Some(id) = pack.resources.identifier(drawable_name, DRAWABLE) else {
            debug!("{} maps {} to missing drawable {}", pack_id, key, drawable_name);
            return Ok(None);
        };

        Ok(pack.resources.drawable(id))
    }

    /// PNG bytes of the icon `pack_id` provides for `app_id`, if any.
    pub fn get_icon_for_app(
        &self,
        pack_id: &str,
        app_id: &str,
    ) -> Result<Option<Vec<u8>>, IconPackError> {
        match self.resolve_icon(pack_id, app_id)? {
            Some(artwork) => {
                normalize::to_png(artwork.as_ref(), self.config.fallback_size).map(Some)
            }
            None => Ok(None),
        }
    }
}
