use crate::drawable::ArtworkHandle;
use crate::error::IconPackError;
use crate::types::{ActivityInfo, ApplicationInfo, ComponentKey, ResourceId};
use std::io::Read;
use std::sync::Arc;

/// Resource kind of pack artwork.
pub const DRAWABLE: &str = "drawable";

/// Installed package registry of the host platform.
/// Discovery and resolution go through this so any backend can be plugged in.
pub trait PackageRegistry: Send + Sync {
    /// Every activity declaring support for `action`.
    /// Fails only when the registry itself cannot be queried.
    fn query_intent_activities(&self, action: &str) -> Result<Vec<ActivityInfo>, IconPackError>;

    /// Metadata for one package. Fails if it is missing or unreadable.
    fn application_info(&self, package_id: &str) -> Result<ApplicationInfo, IconPackError>;

    /// The launch entry point of a package, if it has one.
    fn launch_component(&self, package_id: &str) -> Option<ComponentKey>;

    /// Open the resource container of a package.
    /// Fails with `PackNotFound` if the package is not installed.
    fn resources_for_application(
        &self,
        package_id: &str,
    ) -> Result<Arc<dyn ResourceContainer>, IconPackError>;

    /// Ids of every installed package.
    fn installed_packages(&self) -> Result<Vec<String>, IconPackError>;
}

/// Resources shipped inside one package.
pub trait ResourceContainer: Send + Sync {
    /// Open a raw asset as a byte stream.
    fn open_asset(&self, name: &str) -> std::io::Result<Box<dyn Read + Send>>;

    /// Resolve a resource name of the given kind to its id.
    fn identifier(&self, name: &str, kind: &str) -> Option<ResourceId>;

    /// Load a drawable by id. `None` if it no longer exists.
    fn drawable(&self, id: ResourceId) -> Option<ArtworkHandle>;
}
