//! Error types for capy-iconpacks

/// Icon pack resolution errors.
///
/// Lookups that legitimately find nothing (no launch component, no mapping
/// entry, no matching drawable) are `Ok(None)`, not one of these.
#[derive(Debug, thiserror::Error)]
pub enum IconPackError {
    #[error("Icon pack not found: {0}")]
    PackNotFound(String),

    #[error("Cannot read descriptor of {package}: {message}")]
    Parse { package: String, message: String },

    #[error("Encode error: {0}")]
    Encode(#[from] image::ImageError),

    #[error("Raster of {width}x{height} cannot be allocated")]
    RasterTooLarge { width: u32, height: u32 },

    #[error("Package registry unavailable: {0}")]
    RegistryUnavailable(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl IconPackError {
    /// True when the requested pack is not an accessible installed package.
    pub fn is_not_found(&self) -> bool {
        matches!(self, IconPackError::PackNotFound(_))
    }
}
