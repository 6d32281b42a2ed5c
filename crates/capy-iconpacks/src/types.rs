//! Core types for capy-iconpacks

use serde::Serialize;
use std::fmt;

/// A discovered icon pack provider.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct IconPack {
    /// Package id of the provider, e.g. "com.example.pixelicons"
    pub package_id: String,
    /// User-visible label, e.g. "Pixel Icons"
    pub display_name: String,
}

/// Launch entry point of an installed application.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ComponentKey {
    pub package: String,
    pub class: String,
}

impl ComponentKey {
    pub fn new(package: impl Into<String>, class: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            class: class.into(),
        }
    }

    /// Build a key from a manifest activity name.
    /// ".Main" in package "app.pkg" -> "app.pkg.Main"
    pub fn from_manifest(package: &str, activity: &str) -> Self {
        let class = if activity.starts_with('.') {
            format!("{}{}", package, activity)
        } else {
            activity.to_string()
        };
        Self::new(package, class)
    }
}

impl fmt::Display for ComponentKey {
    /// Renders the form used by descriptors: `ComponentInfo{pkg/class}`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ComponentInfo{{{}/{}}}", self.package, self.class)
    }
}

/// An activity matched by an intent query.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActivityInfo {
    pub package_id: String,
    pub name: String,
}

/// Metadata of an installed package.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApplicationInfo {
    pub package_id: String,
    pub label: Option<String>,
}

impl ApplicationInfo {
    /// User-facing label, falling back to the package id.
    pub fn display_label(&self) -> &str {
        match self.label.as_deref() {
            Some(label) if !label.trim().is_empty() => label,
            _ => &self.package_id,
        }
    }
}

/// Positive handle of a resource inside a pack's container.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ResourceId(pub u32);

impl ResourceId {
    /// Id of the resource at zero-based `index`, if it fits.
    pub fn from_index(index: usize) -> Option<Self> {
        let id = index.checked_add(1)?;
        u32::try_from(id).ok().map(ResourceId)
    }

    /// Zero-based index, `None` for the invalid id 0.
    pub fn index(self) -> Option<usize> {
        (self.0 as usize).checked_sub(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_component_key_display() {
        let key = ComponentKey::new("app.pkg", "app.pkg.Main");
        assert_eq!(key.to_string(), "ComponentInfo{app.pkg/app.pkg.Main}");
    }

    #[test]
    fn test_component_key_expands_relative_class() {
        let key = ComponentKey::from_manifest("app.pkg", ".Main");
        assert_eq!(key.class, "app.pkg.Main");

        let key = ComponentKey::from_manifest("app.pkg", "other.pkg.Launcher");
        assert_eq!(key.class, "other.pkg.Launcher");
    }

    #[test]
    fn test_resource_id_index_conversion() {
        assert_eq!(ResourceId::from_index(0), Some(ResourceId(1)));
        assert_eq!(ResourceId::from_index(41).and_then(ResourceId::index), Some(41));
        assert_eq!(ResourceId::from_index(u32::MAX as usize), None);
        assert_eq!(ResourceId::from_index(usize::MAX), None);
        assert_eq!(ResourceId(0).index(), None);
    }

    #[test]
    fn test_label_falls_back_to_package() {
        let info = ApplicationInfo {
            package_id: "pack.one".to_string(),
            label: Some("  ".to_string()),
        };
        assert_eq!(info.display_label(), "pack.one");
    }
}
