//! Pack index cache.
//!
//! One parsed descriptor per pack, built on first use and kept for the
//! process lifetime. Each pack has its own slot so building one pack never
//! blocks lookups against another, and concurrent first requests for the same
//! pack parse it once.

use crate::appfilter::{Mapping, load_mapping};
use crate::error::IconPackError;
use crate::registry::{PackageRegistry, ResourceContainer};
use log::{debug, info, warn};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, OnceLock, PoisonError, RwLock};

/// A pack's mapping together with its live resource container.
pub struct ParsedPack {
    pub package_id: String,
    pub mapping: Mapping,
    pub resources: Arc<dyn ResourceContainer>,
}

#[derive(Default)]
struct Slot {
    pack: OnceLock<Arc<ParsedPack>>,
    /// Held while building so racing callers wait for one build.
    build: Mutex<()>,
}

pub struct PackIndexCache {
    registry: Arc<dyn PackageRegistry>,
    descriptor: String,
    slots: RwLock<HashMap<String, Arc<Slot>>>,
}

impl PackIndexCache {
    pub fn new(registry: Arc<dyn PackageRegistry>, descriptor: impl Into<String>) -> Self {
        Self {
            registry,
            descriptor: descriptor.into(),
            slots: RwLock::new(HashMap::new()),
        }
    }

    /// Return the parsed pack, building it on first request.
    ///
    /// Fails with `PackNotFound` if the pack's resources cannot be opened; a
    /// failed build leaves nothing behind, so a later call retries.
    pub fn get_or_build(&self, package_id: &str) -> Result<Arc<ParsedPack>, IconPackError> {
        loop {
            let slot = self.slot(package_id);

            if let Some(pack) = slot.pack.get() {
                return Ok(pack.clone());
            }

            let _building = slot.build.lock().unwrap_or_else(PoisonError::into_inner);
            if let Some(pack) = slot.pack.get() {
                return Ok(pack.clone());
            }
            // Evicted by a failed build while we waited.
            if !self.is_current(package_id, &slot) {
                continue;
            }

            return match self.build(package_id) {
                Ok(pack) => Ok(slot.pack.get_or_init(|| Arc::new(pack)).clone()),
                Err(e) => {
                    self.evict(package_id, &slot);
                    Err(e)
                }
            };
        }
    }

    /// Number of packs built so far.
    pub fn len(&self) -> usize {
        self.slots
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .filter(|slot| slot.pack.get().is_some())
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn slot(&self, package_id: &str) -> Arc<Slot> {
        {
            let slots = self.slots.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(slot) = slots.get(package_id) {
                return slot.clone();
            }
        }

        let mut slots = self.slots.write().unwrap_or_else(PoisonError::into_inner);
        slots.entry(package_id.to_string()).or_default().clone()
    }

    fn is_current(&self, package_id: &str, slot: &Arc<Slot>) -> bool {
        let slots = self.slots.read().unwrap_or_else(PoisonError::into_inner);
        slots.get(package_id).is_some_and(|s| Arc::ptr_eq(s, slot))
    }

    fn evict(&self, package_id: &str, slot: &Arc<Slot>) {
        let mut slots = self.slots.write().unwrap_or_else(PoisonError::into_inner);
        if slots.get(package_id).is_some_and(|s| Arc::ptr_eq(s, slot)) {
            slots.remove(package_id);
        }
    }

    fn build(&self, package_id: &str) -> Result<ParsedPack, IconPackError> {
        let resources = self.registry.resources_for_application(package_id)?;

        let mapping = match load_mapping(resources.as_ref(), package_id, &self.descriptor) {
            Ok(mapping) => mapping,
            Err(e) => {
                warn!("{}. Using an empty mapping", e);
                Mapping::default()
            }
        };

        if mapping.is_empty() {
            debug!("Icon pack {} maps no components", package_id);
        }
        info!("Indexed icon pack {} ({} components)", package_id, mapping.len());

        Ok(ParsedPack {
            package_id: package_id.to_string(),
            mapping,
            resources,
        })
    }
}
