//! In-memory package registry.
//!
//! Stands in for the platform registry when embedding the resolver in hosts
//! without installed packages, and in tests.

use crate::drawable::{ArtworkHandle, BitmapDrawable, ColorDrawable};
use crate::error::IconPackError;
use crate::registry::{DRAWABLE, PackageRegistry, ResourceContainer};
use crate::types::{ActivityInfo, ApplicationInfo, ComponentKey, ResourceId};
use image::{Rgba, RgbaImage};
use std::collections::HashMap;
use std::io::{Cursor, Read};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Counts how many times assets were opened.
#[derive(Clone, Debug, Default)]
pub struct OpenCounter(Arc<AtomicUsize>);

impl OpenCounter {
    pub fn get(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }

    fn bump(&self) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }
}

#[derive(Clone, Debug)]
enum MemoryArtwork {
    Bitmap(RgbaImage),
    Color(Rgba<u8>),
    /// Named but no longer loadable.
    Gone,
}

#[derive(Clone, Debug, Default)]
pub struct MemoryResources {
    assets: HashMap<String, Vec<u8>>,
    drawables: Vec<(String, MemoryArtwork)>,
    opens: OpenCounter,
}

impl MemoryResources {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn asset(mut self, name: &str, content: impl Into<Vec<u8>>) -> Self {
        self.assets.insert(name.to_string(), content.into());
        self
    }

    pub fn bitmap(mut self, name: &str, bitmap: RgbaImage) -> Self {
        self.drawables.push((name.to_string(), MemoryArtwork::Bitmap(bitmap)));
        self
    }

    /// A solid color drawable without intrinsic size.
    pub fn color(mut self, name: &str, color: Rgba<u8>) -> Self {
        self.drawables.push((name.to_string(), MemoryArtwork::Color(color)));
        self
    }

    /// A drawable whose name resolves but whose content cannot be loaded.
    pub fn gone(mut self, name: &str) -> Self {
        self.drawables.push((name.to_string(), MemoryArtwork::Gone));
        self
    }

    /// Shared handle to the asset open counter.
    pub fn open_counter(&self) -> OpenCounter {
        self.opens.clone()
    }
}

impl ResourceContainer for MemoryResources {
    fn open_asset(&self, name: &str) -> std::io::Result<Box<dyn Read + Send>> {
        self.opens.bump();
        match self.assets.get(name) {
            Some(content) => Ok(Box::new(Cursor::new(content.clone()))),
            None => Err(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("asset {} not found", name),
            )),
        }
    }

    fn identifier(&self, name: &str, kind: &str) -> Option<ResourceId> {
        if kind != DRAWABLE {
            return None;
        }
        self.drawables
            .iter()
            .position(|(n, _)| n == name)
            .and_then(ResourceId::from_index)
    }

    fn drawable(&self, id: ResourceId) -> Option<ArtworkHandle> {
        match &self.drawables.get(id.index()?)?.1 {
            MemoryArtwork::Bitmap(bitmap) => Some(Box::new(BitmapDrawable::new(bitmap.clone()))),
            MemoryArtwork::Color(color) => Some(Box::new(ColorDrawable::new(*color))),
            MemoryArtwork::Gone => None,
        }
    }
}

/// One installed package.
#[derive(Clone, Debug)]
pub struct MemoryPackage {
    package_id: String,
    label: Option<String>,
    /// (activity class, intent action)
    intent_filters: Vec<(String, String)>,
    launch_class: Option<String>,
    resources: Arc<MemoryResources>,
    broken: bool,
}

impl MemoryPackage {
    pub fn new(package_id: &str) -> Self {
        Self {
            package_id: package_id.to_string(),
            label: None,
            intent_filters: Vec::new(),
            launch_class: None,
            resources: Arc::new(MemoryResources::new()),
            broken: false,
        }
    }

    pub fn label(mut self, label: &str) -> Self {
        self.label = Some(label.to_string());
        self
    }

    /// Declare an activity handling `action`.
    pub fn handles(mut self, action: &str) -> Self {
        let activity = format!("{}.ThemeActivity", self.package_id);
        self.intent_filters.push((activity, action.to_string()));
        self
    }

    /// Set the launch activity class.
    pub fn launchable(mut self, class: &str) -> Self {
        self.launch_class = Some(class.to_string());
        self
    }

    pub fn resources(mut self, resources: MemoryResources) -> Self {
        self.resources = Arc::new(resources);
        self
    }

    /// Matches intent queries but its metadata cannot be read.
    pub fn broken(mut self) -> Self {
        self.broken = true;
        self
    }
}

#[derive(Clone, Debug, Default)]
pub struct MemoryRegistry {
    packages: Vec<MemoryPackage>,
    unavailable: bool,
}

impl MemoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_package(mut self, package: MemoryPackage) -> Self {
        self.packages.push(package);
        self
    }

    /// Every query fails as if the platform registry were down.
    pub fn unavailable(mut self) -> Self {
        self.unavailable = true;
        self
    }

    fn package(&self, package_id: &str) -> Option<&MemoryPackage> {
        self.packages.iter().find(|p| p.package_id == package_id)
    }

    fn check_available(&self) -> Result<(), IconPackError> {
        if self.unavailable {
            return Err(IconPackError::RegistryUnavailable(
                "in-memory registry disabled".to_string(),
            ));
        }
        Ok(())
    }
}

impl PackageRegistry for MemoryRegistry {
    fn query_intent_activities(&self, action: &str) -> Result<Vec<ActivityInfo>, IconPackError> {
        self.check_available()?;
        Ok(self
            .packages
            .iter()
            .flat_map(|p| {
                p.intent_filters
                    .iter()
                    .filter(|(_, a)| a == action)
                    .map(|(activity, _)| ActivityInfo {
                        package_id: p.package_id.clone(),
                        name: activity.clone(),
                    })
            })
            .collect())
    }

    fn application_info(&self, package_id: &str) -> Result<ApplicationInfo, IconPackError> {
        match self.package(package_id) {
            Some(p) if !p.broken => Ok(ApplicationInfo {
                package_id: p.package_id.clone(),
                label: p.label.clone(),
            }),
            _ => Err(IconPackError::PackNotFound(package_id.to_string())),
        }
    }

    fn launch_component(&self, package_id: &str) -> Option<ComponentKey> {
        let package = self.package(package_id)?;
        let class = package.launch_class.as_deref()?;
        Some(ComponentKey::from_manifest(package_id, class))
    }

    fn resources_for_application(
        &self,
        package_id: &str,
    ) -> Result<Arc<dyn ResourceContainer>, IconPackError> {
        match self.package(package_id) {
            Some(p) if !p.broken => Ok(p.resources.clone()),
            _ => Err(IconPackError::PackNotFound(package_id.to_string())),
        }
    }

    fn installed_packages(&self) -> Result<Vec<String>, IconPackError> {
        self.check_available()?;
        Ok(self
            .packages
            .iter()
            .filter(|p| !p.broken)
            .map(|p| p.package_id.clone())
            .collect())
    }
}
