//! Filesystem package registry.
//!
//! Layout under the root:
//! - `<package>/package.json` - manifest (label, activities)
//! - `<package>/assets/` - raw assets, including the descriptor
//! - `<package>/res/drawable*/` - artwork, `<name>.png` or `<name>.color`

use crate::drawable::{ArtworkHandle, BitmapDrawable, ColorDrawable};
use crate::error::IconPackError;
use crate::manifest::{PackageManifest, read_manifest};
use crate::paths::{DRAWABLE_DIRS, is_plain_name};
use crate::registry::{DRAWABLE, PackageRegistry, ResourceContainer};
use crate::types::{ActivityInfo, ApplicationInfo, ComponentKey, ResourceId};
use log::debug;
use std::collections::{HashMap, HashSet};
use std::fs::{self, File};
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;

const ASSETS_DIR: &str = "assets";
const RES_DIR: &str = "res";
const COLOR_EXTENSION: &str = "color";

/// Packages installed as directories under a root.
pub struct FsRegistry {
    root: PathBuf,
}

impl FsRegistry {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn package_dir(&self, package_id: &str) -> Option<PathBuf> {
        is_plain_name(package_id).then(|| self.root.join(package_id))
    }

    fn manifest(&self, package_id: &str) -> Option<PackageManifest> {
        read_manifest(&self.package_dir(package_id)?)
    }

    /// Installed (id, manifest) pairs in directory name order.
    fn scan(&self) -> Result<Vec<(String, PackageManifest)>, IconPackError> {
        if !self.root.is_dir() {
            return Err(IconPackError::RegistryUnavailable(format!(
                "{} is not a directory",
                self.root.display()
            )));
        }

        let walker = walkdir::WalkDir::new(&self.root)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .sort_by_file_name();

        let mut packages = Vec::new();
        for entry in walker.into_iter().filter_map(|e| e.ok()) {
            if !entry.file_type().is_dir() {
                continue;
            }
            let Some(package_id) = entry.file_name().to_str() else {
                continue;
            };
            if let Some(manifest) = read_manifest(entry.path()) {
                packages.push((package_id.to_string(), manifest));
            }
        }

        Ok(packages)
    }
}

impl PackageRegistry for FsRegistry {
    fn query_intent_activities(&self, action: &str) -> Result<Vec<ActivityInfo>, IconPackError> {
        let mut matches = Vec::new();
        for (package_id, manifest) in self.scan()? {
            for activity in manifest.handlers(action) {
                matches.push(ActivityInfo {
                    package_id: package_id.clone(),
                    name: ComponentKey::from_manifest(&package_id, &activity.name).class,
                });
            }
        }
        Ok(matches)
    }

    fn application_info(&self, package_id: &str) -> Result<ApplicationInfo, IconPackError> {
        let manifest = self
            .manifest(package_id)
            .ok_or_else(|| IconPackError::PackNotFound(package_id.to_string()))?;

        Ok(ApplicationInfo {
            package_id: package_id.to_string(),
            label: manifest.label,
        })
    }

    fn launch_component(&self, package_id: &str) -> Option<ComponentKey> {
        let manifest = self.manifest(package_id)?;
        let activity = manifest.launch_activity()?;
        Some(ComponentKey::from_manifest(package_id, &activity.name))
    }

    fn resources_for_application(
        &self,
        package_id: &str,
    ) -> Result<Arc<dyn ResourceContainer>, IconPackError> {
        let not_found = || IconPackError::PackNotFound(package_id.to_string());

        let dir = self.package_dir(package_id).ok_or_else(not_found)?;
        if read_manifest(&dir).is_none() {
            return Err(not_found());
        }

        Ok(Arc::new(FsResources::open(package_id, &dir)))
    }

    fn installed_packages(&self) -> Result<Vec<String>, IconPackError> {
        Ok(self.scan()?.into_iter().map(|(id, _)| id).collect())
    }
}

/// Resources of one package directory.
pub struct FsResources {
    package_id: String,
    assets_dir: PathBuf,
    /// Indexed by `ResourceId::index`.
    drawables: Vec<PathBuf>,
    /// Drawable name -> index into `drawables`.
    names: HashMap<String, usize>,
}

impl FsResources {
    /// Index the drawables of a package directory.
    /// Density directories are scanned highest first; the first file per name wins.
    pub fn open(package_id: &str, package_dir: &Path) -> Self {
        let allowed_extensions: HashSet<&str> =
            ["png", "jpg", "jpeg", "webp", COLOR_EXTENSION].into_iter().collect();
        let mut drawables = Vec::new();
        let mut names = HashMap::new();

        for density in DRAWABLE_DIRS {
            let dir = package_dir.join(RES_DIR).join(density);
            if !dir.is_dir() {
                continue;
            }

            let walker = walkdir::WalkDir::new(&dir)
                .min_depth(1)
                .max_depth(1)
                .follow_links(true)
                .sort_by_file_name();

            for entry in walker.into_iter().filter_map(|e| e.ok()) {
                let path = entry.path();
                let ext = match path.extension().and_then(|e| e.to_str()) {
                    Some(e) => e.to_lowercase(),
                    None => continue,
                };
                if !allowed_extensions.contains(ext.as_str()) {
                    continue;
                }

                let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                    continue;
                };
                if !names.contains_key(stem) {
                    names.insert(stem.to_string(), drawables.len());
                    drawables.push(path.to_path_buf());
                }
            }
        }

        debug!("Indexed {} drawables for {}", drawables.len(), package_id);

        Self {
            package_id: package_id.to_string(),
            assets_dir: package_dir.join(ASSETS_DIR),
            drawables,
            names,
        }
    }

    fn load(&self, path: &Path) -> Option<ArtworkHandle> {
        let is_color = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case(COLOR_EXTENSION));

        if is_color {
            let value = fs::read_to_string(path).ok()?;
            let color = ColorDrawable::parse(&value);
            if color.is_none() {
                debug!("Invalid color resource {}", path.display());
            }
            return color.map(|c| Box::new(c) as ArtworkHandle);
        }

        match image::open(path) {
            Ok(img) => Some(Box::new(BitmapDrawable::new(img.to_rgba8()))),
            Err(e) => {
                debug!("Cannot decode {} in {}: {}", path.display(), self.package_id, e);
                None
            }
        }
    }
}

impl ResourceContainer for FsResources {
    fn open_asset(&self, name: &str) -> std::io::Result<Box<dyn Read + Send>> {
        if !is_plain_name(name) {
            return Err(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("invalid asset name {:?}", name),
            ));
        }
        let file = File::open(self.assets_dir.join(name))?;
        Ok(Box::new(file))
    }

    fn identifier(&self, name: &str, kind: &str) -> Option<ResourceId> {
        if kind != DRAWABLE {
            return None;
        }
        self.names.get(name).copied().and_then(ResourceId::from_index)
    }

    fn drawable(&self, id: ResourceId) -> Option<ArtworkHandle> {
        self.load(self.drawables.get(id.index()?)?)
    }
}
